// src/integrations/telegram/types.rs
//
// Bot API wire types. Only the fields the bot reads or writes are modelled;
// everything else in Telegram's payloads is ignored on deserialization.

use serde::{Deserialize, Serialize};

use crate::domain::NavigationControls;

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    /// Present when the message is a photo; sizes are irrelevant to us
    pub photo: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

/// Photo replacement for `editMessageMedia`
#[derive(Debug, Clone, Serialize)]
pub struct InputMediaPhoto {
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub media: String,
    pub caption: String,
    pub parse_mode: &'static str,
}

/// Where a message lives, plus whether it carries a photo. Photo messages can
/// only have their caption or media edited, never their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
    pub has_photo: bool,
}

pub const PREVIOUS_BUTTON: &str = "◀️";
pub const NEXT_BUTTON: &str = "▶️";

impl Update {
    /// Id of the user who caused this update, used to serialize per-user work
    pub fn sender_id(&self) -> Option<i64> {
        if let Some(message) = &self.message {
            return message.from.as_ref().map(|u| u.id);
        }
        self.callback_query.as_ref().map(|q| q.from.id)
    }
}

impl Message {
    pub fn reference(&self) -> MessageRef {
        MessageRef {
            chat_id: self.chat.id,
            message_id: self.message_id,
            has_photo: self.photo.as_ref().is_some_and(|p| !p.is_empty()),
        }
    }
}

impl User {
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

impl InlineKeyboardMarkup {
    /// One row: "previous" on the left, "next" on the right
    pub fn from_controls(controls: &NavigationControls) -> Self {
        let mut row = Vec::with_capacity(2);
        if let Some(previous) = controls.previous {
            row.push(InlineKeyboardButton {
                text: PREVIOUS_BUTTON.to_string(),
                callback_data: previous.to_string(),
            });
        }
        if let Some(next) = controls.next {
            row.push(InlineKeyboardButton {
                text: NEXT_BUTTON.to_string(),
                callback_data: next.to_string(),
            });
        }

        Self {
            inline_keyboard: if row.is_empty() { Vec::new() } else { vec![row] },
        }
    }
}

impl InputMediaPhoto {
    pub fn html(media: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            media_type: "photo",
            media: media.into(),
            caption: caption.into(),
            parse_mode: "HTML",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContextKind, Direction, NavAction};

    #[test]
    fn test_deserialize_text_update() {
        let raw = r#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private"},
                "from": {"id": 42, "is_bot": false, "first_name": "Ann", "last_name": "Lee"},
                "text": "Interstellar"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.sender_id(), Some(42));
        let message = update.message.unwrap();
        assert_eq!(message.text.as_deref(), Some("Interstellar"));
        assert_eq!(message.from.as_ref().unwrap().full_name(), "Ann Lee");
        assert!(!message.reference().has_photo);
    }

    #[test]
    fn test_deserialize_callback_on_photo() {
        let raw = r#"{
            "update_id": 11,
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 7, "is_bot": false, "first_name": "Bob"},
                "data": "search_next",
                "message": {
                    "message_id": 99,
                    "chat": {"id": 7, "type": "private"},
                    "photo": [{"file_id": "x", "width": 90, "height": 90}]
                }
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.sender_id(), Some(7));
        let query = update.callback_query.unwrap();
        let reference = query.message.unwrap().reference();
        assert_eq!(reference.message_id, 99);
        assert!(reference.has_photo);
    }

    #[test]
    fn test_keyboard_from_controls() {
        let controls = NavigationControls {
            previous: Some(NavAction::new(ContextKind::Stats, Direction::Prev)),
            next: Some(NavAction::new(ContextKind::Stats, Direction::Next)),
        };
        let markup = InlineKeyboardMarkup::from_controls(&controls);
        assert_eq!(markup.inline_keyboard.len(), 1);
        let row = &markup.inline_keyboard[0];
        assert_eq!(row[0].text, PREVIOUS_BUTTON);
        assert_eq!(row[0].callback_data, "stats_prev");
        assert_eq!(row[1].text, NEXT_BUTTON);
        assert_eq!(row[1].callback_data, "stats_next");
    }

    #[test]
    fn test_keyboard_next_only() {
        let controls = NavigationControls {
            previous: None,
            next: Some(NavAction::new(ContextKind::History, Direction::Next)),
        };
        let markup = InlineKeyboardMarkup::from_controls(&controls);
        assert_eq!(markup.inline_keyboard[0].len(), 1);
        assert_eq!(markup.inline_keyboard[0][0].callback_data, "history_next");
    }
}
