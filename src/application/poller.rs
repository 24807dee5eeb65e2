// src/application/poller.rs
//
// Long-polling loop
//
// CONCURRENCY:
// - Each getUpdates batch is split by user
// - One task per user, updates of that user handled strictly in order
// - Different users run in parallel
// - The whole batch finishes before the next poll, so a user's next batch
//   can never overtake the previous one

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use super::dispatcher::Dispatcher;
use crate::integrations::telegram::{TelegramClient, Update};

pub const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(3);

pub struct Poller {
    client: Arc<TelegramClient>,
    dispatcher: Arc<Dispatcher>,
    error_backoff: Duration,
}

impl Poller {
    pub fn new(client: Arc<TelegramClient>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            client,
            dispatcher,
            error_backoff: DEFAULT_ERROR_BACKOFF,
        }
    }

    pub fn with_error_backoff(mut self, error_backoff: Duration) -> Self {
        self.error_backoff = error_backoff;
        self
    }

    /// Poll forever. Polling errors are logged and retried after a pause.
    pub async fn run(&self) {
        info!("Polling for updates");
        let mut offset = None;

        loop {
            match self.client.get_updates(offset).await {
                Ok(updates) if updates.is_empty() => {}
                Ok(updates) => {
                    offset = next_offset(&updates, offset);
                    debug!("Received {} updates", updates.len());
                    process_batch(&self.dispatcher, updates).await;
                }
                Err(e) => {
                    error!("getUpdates failed: {}", e);
                    tokio::time::sleep(self.error_backoff).await;
                }
            }
        }
    }
}

/// Offset that confirms every update in the batch
pub fn next_offset(updates: &[Update], current: Option<i64>) -> Option<i64> {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .max(current)
}

/// Split a batch per user, keeping arrival order inside each group and the
/// order in which users first appear. Updates without a sender get a group
/// of their own.
pub fn group_by_user(updates: Vec<Update>) -> Vec<Vec<Update>> {
    let mut groups: Vec<Vec<Update>> = Vec::new();
    let mut index_of: HashMap<i64, usize> = HashMap::new();

    for update in updates {
        match update.sender_id() {
            Some(user) => match index_of.get(&user) {
                Some(&i) => groups[i].push(update),
                None => {
                    index_of.insert(user, groups.len());
                    groups.push(vec![update]);
                }
            },
            None => groups.push(vec![update]),
        }
    }

    groups
}

/// Dispatch a batch: sequential per user, parallel across users
pub async fn process_batch(dispatcher: &Arc<Dispatcher>, updates: Vec<Update>) {
    let tasks: Vec<_> = group_by_user(updates)
        .into_iter()
        .map(|group| {
            let dispatcher = Arc::clone(dispatcher);
            tokio::spawn(async move {
                for update in group {
                    let update_id = update.update_id;
                    if let Err(e) = dispatcher.dispatch(update).await {
                        error!("Update {} failed: {}", update_id, e);
                    }
                }
            })
        })
        .collect();

    for task in tasks {
        if let Err(e) = task.await {
            error!("Update task panicked: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::copy;
    use crate::application::presenter::Presenter;
    use crate::application::state::AppState;
    use crate::integrations::filmix::MockLinkSearchSource;
    use crate::integrations::kinopoisk::MockMetadataProvider;
    use crate::integrations::telegram::MockMessenger;
    use crate::repositories::MockSearchHistoryRepository;
    use crate::services::{FilmLookupService, HistoryService, LinkResolver, SessionStore};

    fn message(update_id: i64, user: i64, text: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": update_id,
            "message": {
                "message_id": update_id,
                "chat": {"id": user},
                "from": {"id": user, "first_name": "U"},
                "text": text
            }
        }))
        .unwrap()
    }

    fn anonymous(update_id: i64) -> Update {
        serde_json::from_value(json!({"update_id": update_id})).unwrap()
    }

    fn ids(group: &[Update]) -> Vec<i64> {
        group.iter().map(|u| u.update_id).collect()
    }

    #[test]
    fn test_group_by_user_keeps_order() {
        let groups = group_by_user(vec![
            message(1, 10, "a"),
            message(2, 20, "b"),
            message(3, 10, "c"),
            anonymous(4),
            message(5, 20, "d"),
        ]);

        assert_eq!(groups.len(), 3);
        assert_eq!(ids(&groups[0]), vec![1, 3]);
        assert_eq!(ids(&groups[1]), vec![2, 5]);
        assert_eq!(ids(&groups[2]), vec![4]);
    }

    #[test]
    fn test_next_offset() {
        assert_eq!(next_offset(&[], None), None);
        assert_eq!(next_offset(&[], Some(7)), Some(7));
        assert_eq!(next_offset(&[message(3, 1, "x"), message(9, 1, "y")], Some(4)), Some(10));
    }

    #[tokio::test]
    async fn test_batch_runs_each_users_updates_in_order() {
        let mut seq = mockall::Sequence::new();
        let mut messenger = MockMessenger::new();
        messenger
            .expect_deliver()
            .withf(|chat, payload| *chat == 1 && payload.body == copy::START_MESSAGE)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        messenger
            .expect_deliver()
            .withf(|chat, payload| *chat == 1 && payload.body == copy::HELP_MESSAGE)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        messenger
            .expect_deliver()
            .withf(|chat, _| *chat == 2)
            .times(1)
            .returning(|_, _| Ok(()));

        let links = Arc::new(LinkResolver::new(Arc::new(MockLinkSearchSource::new()), 1));
        let state = Arc::new(AppState {
            sessions: Arc::new(SessionStore::default()),
            film_lookup: Arc::new(FilmLookupService::new(
                Arc::new(MockMetadataProvider::new()),
                3,
                Duration::from_millis(1),
            )),
            history_service: Arc::new(HistoryService::new(Arc::new(MockSearchHistoryRepository::new()))),
            presenter: Arc::new(Presenter::new(links)),
        });
        let dispatcher = Arc::new(Dispatcher::new(state, Arc::new(messenger)));

        process_batch(
            &dispatcher,
            vec![message(1, 1, "/start"), message(2, 2, "/help"), message(3, 1, "/help")],
        )
        .await;
    }
}
