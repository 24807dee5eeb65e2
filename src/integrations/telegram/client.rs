// src/integrations/telegram/client.rs
//
// Telegram Bot API client
//
// ARCHITECTURE:
// - JSON-over-HTTPS calls to https://api.telegram.org/bot<token>/<method>
// - Long polling via getUpdates
// - `Messenger` is the seam the application layer talks to; it only knows
//   about DisplayPayload, never about Bot API methods
//
// CRITICAL RULES:
// - All text is sent with parse_mode=HTML; bodies arrive pre-escaped
// - A failed edit falls back to a fresh message, the user always sees a reply

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::types::{ApiResponse, InlineKeyboardMarkup, InputMediaPhoto, MessageRef, Update};
use crate::domain::DisplayPayload;
use crate::error::{AppError, AppResult};

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Seconds getUpdates may hold the connection open
pub const LONG_POLL_SECS: u64 = 30;

const PARSE_MODE: &str = "HTML";

/// Delivery of rendered pages to a chat
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send the payload as a new message
    async fn deliver(&self, chat_id: i64, payload: &DisplayPayload) -> AppResult<()>;

    /// Swap the content of an existing message for the payload
    async fn replace(&self, target: MessageRef, payload: &DisplayPayload) -> AppResult<()>;

    /// Stop the client-side spinner on a pressed button
    async fn acknowledge(&self, callback_id: &str) -> AppResult<()>;
}

pub struct TelegramClient {
    base_url: String,
    http_client: Client,
}

impl TelegramClient {
    /// `timeout` bounds regular calls; getUpdates additionally gets the long
    /// poll window on top.
    pub fn new(token: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout + Duration::from_secs(LONG_POLL_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: format!("{}/bot{}", TELEGRAM_API_URL, token),
            http_client,
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> AppResult<T> {
        let response = self
            .http_client
            .post(format!("{}/{}", self.base_url, method))
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Telegram {} failed: {}", method, e.without_url())))?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Telegram {} response: {}", method, e.without_url())))?;

        unwrap_envelope(method, envelope)
    }

    pub async fn get_updates(&self, offset: Option<i64>) -> AppResult<Vec<Update>> {
        let mut body = json!({
            "timeout": LONG_POLL_SECS,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        self.call("getUpdates", &body).await
    }

    pub async fn send_message(&self, chat_id: i64, payload: &DisplayPayload) -> AppResult<()> {
        self.call::<Value>("sendMessage", &send_message_body(chat_id, payload))
            .await
            .map(drop)
    }

    pub async fn send_photo(&self, chat_id: i64, photo: &str, payload: &DisplayPayload) -> AppResult<()> {
        self.call::<Value>("sendPhoto", &send_photo_body(chat_id, photo, payload))
            .await
            .map(drop)
    }

    pub async fn edit_message_text(&self, target: MessageRef, payload: &DisplayPayload) -> AppResult<()> {
        self.edit("editMessageText", &edit_text_body(target, payload)).await
    }

    pub async fn edit_message_caption(&self, target: MessageRef, payload: &DisplayPayload) -> AppResult<()> {
        self.edit("editMessageCaption", &edit_caption_body(target, payload)).await
    }

    pub async fn edit_message_media(&self, target: MessageRef, photo: &str, payload: &DisplayPayload) -> AppResult<()> {
        self.edit("editMessageMedia", &edit_media_body(target, photo, payload)).await
    }

    pub async fn answer_callback_query(&self, callback_id: &str) -> AppResult<()> {
        self.call::<Value>("answerCallbackQuery", &json!({ "callback_query_id": callback_id }))
            .await
            .map(drop)
    }

    /// Edits that change nothing are rejected by Telegram; that still means the
    /// message shows what we wanted.
    async fn edit(&self, method: &str, body: &Value) -> AppResult<()> {
        match self.call::<Value>(method, body).await {
            Ok(_) => Ok(()),
            Err(AppError::Telegram(description)) if description.contains("message is not modified") => {
                debug!("{} skipped: content unchanged", method);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

fn unwrap_envelope<T>(method: &str, envelope: ApiResponse<T>) -> AppResult<T> {
    match envelope {
        ApiResponse { ok: true, result: Some(result), .. } => Ok(result),
        ApiResponse { description, error_code, .. } => Err(AppError::Telegram(format!(
            "{} rejected ({}): {}",
            method,
            error_code.unwrap_or_default(),
            description.unwrap_or_else(|| "no description".to_string())
        ))),
    }
}

fn attach_markup(body: &mut Value, payload: &DisplayPayload) {
    if let Some(controls) = &payload.controls {
        body["reply_markup"] = json!(InlineKeyboardMarkup::from_controls(controls));
    }
}

fn send_message_body(chat_id: i64, payload: &DisplayPayload) -> Value {
    let mut body = json!({
        "chat_id": chat_id,
        "text": payload.body,
        "parse_mode": PARSE_MODE,
        "disable_web_page_preview": payload.disable_link_preview,
    });
    attach_markup(&mut body, payload);
    body
}

fn send_photo_body(chat_id: i64, photo: &str, payload: &DisplayPayload) -> Value {
    let mut body = json!({
        "chat_id": chat_id,
        "photo": photo,
        "caption": payload.body,
        "parse_mode": PARSE_MODE,
    });
    attach_markup(&mut body, payload);
    body
}

fn edit_text_body(target: MessageRef, payload: &DisplayPayload) -> Value {
    let mut body = json!({
        "chat_id": target.chat_id,
        "message_id": target.message_id,
        "text": payload.body,
        "parse_mode": PARSE_MODE,
        "disable_web_page_preview": payload.disable_link_preview,
    });
    attach_markup(&mut body, payload);
    body
}

fn edit_caption_body(target: MessageRef, payload: &DisplayPayload) -> Value {
    let mut body = json!({
        "chat_id": target.chat_id,
        "message_id": target.message_id,
        "caption": payload.body,
        "parse_mode": PARSE_MODE,
    });
    attach_markup(&mut body, payload);
    body
}

fn edit_media_body(target: MessageRef, photo: &str, payload: &DisplayPayload) -> Value {
    let mut body = json!({
        "chat_id": target.chat_id,
        "message_id": target.message_id,
        "media": InputMediaPhoto::html(photo, payload.body.as_str()),
    });
    attach_markup(&mut body, payload);
    body
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn deliver(&self, chat_id: i64, payload: &DisplayPayload) -> AppResult<()> {
        match &payload.image {
            Some(photo) => match self.send_photo(chat_id, photo, payload).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    // Telegram could not fetch the poster; the text still matters
                    warn!("sendPhoto failed, sending text instead: {}", e);
                    self.send_message(chat_id, payload).await
                }
            },
            None => self.send_message(chat_id, payload).await,
        }
    }

    async fn replace(&self, target: MessageRef, payload: &DisplayPayload) -> AppResult<()> {
        let edited = match (&payload.image, target.has_photo) {
            (Some(photo), _) => self.edit_message_media(target, photo, payload).await,
            (None, true) => self.edit_message_caption(target, payload).await,
            (None, false) => self.edit_message_text(target, payload).await,
        };

        match edited {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Edit of message {} failed, sending a new one: {}", target.message_id, e);
                self.deliver(target.chat_id, payload).await
            }
        }
    }

    async fn acknowledge(&self, callback_id: &str) -> AppResult<()> {
        self.answer_callback_query(callback_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContextKind, Direction, NavAction, NavigationControls};

    fn target(has_photo: bool) -> MessageRef {
        MessageRef {
            chat_id: 1,
            message_id: 2,
            has_photo,
        }
    }

    fn paged(body: &str) -> DisplayPayload {
        DisplayPayload::text(body).with_controls(Some(NavigationControls {
            previous: None,
            next: Some(NavAction::new(ContextKind::Search, Direction::Next)),
        }))
    }

    #[test]
    fn test_token_is_part_of_base_url() {
        let client = TelegramClient::new("123:abc", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "https://api.telegram.org/bot123:abc");
    }

    #[test]
    fn test_send_message_body_with_keyboard() {
        let mut payload = paged("<b>hi</b>");
        payload.disable_link_preview = true;

        let body = send_message_body(42, &payload);
        assert_eq!(body["chat_id"], 42);
        assert_eq!(body["text"], "<b>hi</b>");
        assert_eq!(body["parse_mode"], "HTML");
        assert_eq!(body["disable_web_page_preview"], true);
        assert_eq!(
            body["reply_markup"]["inline_keyboard"][0][0]["callback_data"],
            "search_next"
        );
    }

    #[test]
    fn test_plain_text_has_no_markup() {
        let body = send_message_body(42, &DisplayPayload::text("plain"));
        assert!(body.get("reply_markup").is_none());
    }

    #[test]
    fn test_edit_bodies_address_the_message() {
        let payload = paged("caption");

        let caption = edit_caption_body(target(true), &payload);
        assert_eq!(caption["message_id"], 2);
        assert_eq!(caption["caption"], "caption");

        let media = edit_media_body(target(true), "https://img/p.jpg", &payload);
        assert_eq!(media["media"]["type"], "photo");
        assert_eq!(media["media"]["media"], "https://img/p.jpg");
        assert_eq!(media["media"]["caption"], "caption");
        assert_eq!(media["media"]["parse_mode"], "HTML");

        let text = edit_text_body(target(false), &payload);
        assert_eq!(text["text"], "caption");
    }

    #[test]
    fn test_rejected_envelope_is_telegram_error() {
        let envelope: ApiResponse<Value> = serde_json::from_str(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: message is not modified"}"#,
        )
        .unwrap();

        let err = unwrap_envelope("editMessageText", envelope).unwrap_err();
        match err {
            AppError::Telegram(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("message is not modified"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_ok_envelope_yields_result() {
        let envelope: ApiResponse<Vec<Update>> =
            serde_json::from_str(r#"{"ok": true, "result": []}"#).unwrap();
        assert!(unwrap_envelope("getUpdates", envelope).unwrap().is_empty());
    }
}
