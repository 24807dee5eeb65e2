// src/application/dispatcher.rs
//
// Update Dispatcher
//
// ARCHITECTURE:
// - Text messages: /start, /help, /history, /stats, anything else is a search
// - Callback queries: prev/next buttons of the three paged views
// - Every handled update produces exactly one reply; errors become the
//   generic localized message after logging

use std::sync::Arc;

use log::{error, info, warn};

use super::commands;
use super::state::AppState;
use crate::domain::navigation::NavAction;
use crate::domain::{DisplayPayload, UserId};
use crate::error::{AppError, AppResult};
use crate::integrations::telegram::{CallbackQuery, Message, Messenger, Update};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    History,
    Stats,
    Search(String),
}

impl Command {
    /// `None` for blank text. Unknown slash commands are searched for, like
    /// any other text.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let head = text.split_whitespace().next().unwrap_or_default();
        // Group chats address commands as /history@SomeBot
        let name = head.split('@').next().unwrap_or(head);

        Some(match name {
            "/start" => Command::Start,
            "/help" => Command::Help,
            "/history" => Command::History,
            "/stats" => Command::Stats,
            _ => Command::Search(text.to_string()),
        })
    }
}

pub struct Dispatcher {
    state: Arc<AppState>,
    messenger: Arc<dyn Messenger>,
}

impl Dispatcher {
    pub fn new(state: Arc<AppState>, messenger: Arc<dyn Messenger>) -> Self {
        Self { state, messenger }
    }

    pub async fn dispatch(&self, update: Update) -> AppResult<()> {
        if let Some(message) = update.message {
            return self.on_message(message).await;
        }
        if let Some(query) = update.callback_query {
            return self.on_callback(query).await;
        }
        Ok(())
    }

    async fn on_message(&self, message: Message) -> AppResult<()> {
        let (Some(user), Some(text)) = (&message.from, message.text.as_deref()) else {
            return Ok(());
        };
        let Some(command) = Command::parse(text) else {
            return Ok(());
        };

        info!("Received message: {} from {}({})", text, user.full_name(), user.id);

        let payload = self.run_command(user.id, command).await;
        self.messenger.deliver(message.chat.id, &payload).await
    }

    async fn run_command(&self, user_id: UserId, command: Command) -> DisplayPayload {
        let result = match command {
            Command::Start => Ok(commands::start()),
            Command::Help => Ok(commands::help()),
            Command::History => commands::show_history(&self.state, user_id).await,
            Command::Stats => commands::show_stats(&self.state, user_id).await,
            Command::Search(query) => Ok(commands::search_film(&self.state, user_id, &query).await),
        };
        result.unwrap_or_else(|e| failure_payload(user_id, e))
    }

    async fn on_callback(&self, query: CallbackQuery) -> AppResult<()> {
        let user_id = query.from.id;

        let action = match query.data.as_deref().map(str::parse::<NavAction>) {
            Some(Ok(action)) => action,
            Some(Err(e)) => {
                warn!("Ignoring callback from user {}: {}", user_id, e);
                return self.messenger.acknowledge(&query.id).await;
            }
            None => return self.messenger.acknowledge(&query.id).await,
        };

        let payload = commands::navigate(&self.state, user_id, action)
            .await
            .unwrap_or_else(|e| failure_payload(user_id, e));

        let delivered = match &query.message {
            Some(message) => self.messenger.replace(message.reference(), &payload).await,
            None => self.messenger.deliver(user_id, &payload).await,
        };

        if let Err(e) = self.messenger.acknowledge(&query.id).await {
            warn!("Failed to acknowledge callback {}: {}", query.id, e);
        }
        delivered
    }
}

fn failure_payload(user_id: UserId, e: AppError) -> DisplayPayload {
    error!("Request from user {} failed ({:?}): {}", user_id, e.kind(), e);
    DisplayPayload::text(e.user_message())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::application::copy;
    use crate::application::presenter::Presenter;
    use crate::domain::film::FilmDetails;
    use crate::domain::history::NewSearchRecord;
    use crate::integrations::filmix::MockLinkSearchSource;
    use crate::integrations::kinopoisk::{MockMetadataProvider, ProviderReply};
    use crate::integrations::telegram::MockMessenger;
    use crate::repositories::MockSearchHistoryRepository;
    use crate::services::{FilmLookupService, HistoryService, LinkResolver, SessionStore};

    fn state(
        provider: MockMetadataProvider,
        repo: MockSearchHistoryRepository,
        catalogue: MockLinkSearchSource,
    ) -> Arc<AppState> {
        let links = Arc::new(LinkResolver::new(Arc::new(catalogue), 1));
        Arc::new(AppState {
            sessions: Arc::new(SessionStore::default()),
            film_lookup: Arc::new(FilmLookupService::new(
                Arc::new(provider),
                3,
                Duration::from_millis(1),
            )),
            history_service: Arc::new(HistoryService::new(Arc::new(repo))),
            presenter: Arc::new(Presenter::new(links)),
        })
    }

    fn quiet_catalogue() -> MockLinkSearchSource {
        let mut catalogue = MockLinkSearchSource::new();
        catalogue.expect_search().returning(|_, _| Ok(Vec::new()));
        catalogue
    }

    fn text_update(user: i64, text: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "chat": {"id": user},
                "from": {"id": user, "first_name": "Test"},
                "text": text
            }
        }))
        .unwrap()
    }

    fn callback_update(user: i64, data: &str) -> Update {
        serde_json::from_value(json!({
            "update_id": 2,
            "callback_query": {
                "id": "cb",
                "from": {"id": user, "first_name": "Test"},
                "data": data,
                "message": {"message_id": 11, "chat": {"id": user}}
            }
        }))
        .unwrap()
    }

    fn films(n: usize) -> Vec<FilmDetails> {
        (1..=n)
            .map(|i| FilmDetails {
                provider_id: Some(i as i64),
                name_ru: Some(format!("Фильм {}", i)),
                year: Some("2014".to_string()),
                poster_url: Some(format!("https://img/{}.jpg", i)),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/history@CinemaBot"), Some(Command::History));
        assert_eq!(Command::parse("  /stats  "), Some(Command::Stats));
        assert_eq!(
            Command::parse("  Interstellar "),
            Some(Command::Search("Interstellar".to_string()))
        );
        assert_eq!(
            Command::parse("/unknown"),
            Some(Command::Search("/unknown".to_string()))
        );
        assert_eq!(Command::parse("   "), None);
    }

    #[tokio::test]
    async fn test_start_delivers_greeting() {
        let mut messenger = MockMessenger::new();
        messenger
            .expect_deliver()
            .withf(|chat, payload| *chat == 5 && payload.body == copy::START_MESSAGE)
            .times(1)
            .returning(|_, _| Ok(()));

        let state = state(
            MockMetadataProvider::new(),
            MockSearchHistoryRepository::new(),
            MockLinkSearchSource::new(),
        );
        let dispatcher = Dispatcher::new(state, Arc::new(messenger));
        dispatcher.dispatch(text_update(5, "/start")).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_renders_first_film_and_records_it() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_by_keyword()
            .times(1)
            .returning(|_| Ok(ProviderReply::Films(films(5))));

        let mut repo = MockSearchHistoryRepository::new();
        repo.expect_record()
            .withf(|record| *record == NewSearchRecord::resolved(7, "Interstellar", "Фильм 1", "2014"))
            .times(1)
            .returning(|_| Ok(1));

        let mut messenger = MockMessenger::new();
        messenger
            .expect_deliver()
            .withf(|chat, payload| {
                *chat == 7
                    && payload.image.as_deref() == Some("https://img/1.jpg")
                    && payload.body.contains("Фильм 1")
                    && payload.controls.is_some_and(|c| c.previous.is_none() && c.next.is_some())
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let state = state(provider, repo, quiet_catalogue());
        let dispatcher = Dispatcher::new(Arc::clone(&state), Arc::new(messenger));
        dispatcher.dispatch(text_update(7, "Interstellar")).await.unwrap();

        assert_eq!(state.sessions.get(7).await.unwrap().page(), 0);
    }

    #[tokio::test]
    async fn test_record_failure_still_shows_results() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_by_keyword()
            .returning(|_| Ok(ProviderReply::Films(films(1))));

        let mut repo = MockSearchHistoryRepository::new();
        repo.expect_record()
            .returning(|_| Err(AppError::Pool("timed out".to_string())));

        let mut messenger = MockMessenger::new();
        messenger
            .expect_deliver()
            .withf(|_, payload| payload.body.contains("Фильм 1"))
            .times(1)
            .returning(|_, _| Ok(()));

        let dispatcher = Dispatcher::new(state(provider, repo, quiet_catalogue()), Arc::new(messenger));
        dispatcher.dispatch(text_update(8, "Venom")).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_next_edits_message_then_acknowledges() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_by_keyword()
            .times(1)
            .returning(|_| Ok(ProviderReply::Films(films(3))));

        let mut repo = MockSearchHistoryRepository::new();
        repo.expect_record().times(1).returning(|_| Ok(1));

        let mut seq = mockall::Sequence::new();
        let mut messenger = MockMessenger::new();
        messenger
            .expect_deliver()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        messenger
            .expect_replace()
            .withf(|target, payload| target.message_id == 11 && payload.body.contains("Фильм 2"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        messenger
            .expect_acknowledge()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let dispatcher = Dispatcher::new(state(provider, repo, quiet_catalogue()), Arc::new(messenger));
        dispatcher.dispatch(text_update(9, "Venom")).await.unwrap();
        dispatcher.dispatch(callback_update(9, "search_next")).await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_search_button() {
        let mut messenger = MockMessenger::new();
        messenger
            .expect_replace()
            .withf(|_, payload| payload.body == copy::STALE_SEARCH && payload.controls.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        messenger.expect_acknowledge().times(1).returning(|_| Ok(()));

        let state = state(
            MockMetadataProvider::new(),
            MockSearchHistoryRepository::new(),
            MockLinkSearchSource::new(),
        );
        let dispatcher = Dispatcher::new(state, Arc::new(messenger));
        dispatcher.dispatch(callback_update(3, "search_prev")).await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_history_button_reopens_history() {
        let mut repo = MockSearchHistoryRepository::new();
        repo.expect_history().times(1).returning(|_, _| Ok(Vec::new()));

        let mut messenger = MockMessenger::new();
        messenger
            .expect_replace()
            .withf(|_, payload| payload.body == copy::EMPTY_HISTORY)
            .times(1)
            .returning(|_, _| Ok(()));
        messenger.expect_acknowledge().returning(|_| Ok(()));

        let state = state(MockMetadataProvider::new(), repo, MockLinkSearchSource::new());
        let dispatcher = Dispatcher::new(Arc::clone(&state), Arc::new(messenger));
        dispatcher.dispatch(callback_update(4, "history_next")).await.unwrap();

        assert!(state.sessions.get(4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repository_error_becomes_generic_reply() {
        let mut repo = MockSearchHistoryRepository::new();
        repo.expect_stats()
            .returning(|_| Err(AppError::Pool("no connection".to_string())));

        let mut messenger = MockMessenger::new();
        messenger
            .expect_deliver()
            .withf(|_, payload| payload.body == "Произошла неизвестная ошибка")
            .times(1)
            .returning(|_, _| Ok(()));

        let state = state(MockMetadataProvider::new(), repo, MockLinkSearchSource::new());
        let dispatcher = Dispatcher::new(state, Arc::new(messenger));
        dispatcher.dispatch(text_update(6, "/stats")).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_callback_only_acknowledged() {
        let mut messenger = MockMessenger::new();
        messenger.expect_acknowledge().times(1).returning(|_| Ok(()));
        messenger.expect_replace().never();
        messenger.expect_deliver().never();

        let state = state(
            MockMetadataProvider::new(),
            MockSearchHistoryRepository::new(),
            MockLinkSearchSource::new(),
        );
        let dispatcher = Dispatcher::new(state, Arc::new(messenger));
        dispatcher.dispatch(callback_update(1, "bogus")).await.unwrap();
    }
}
