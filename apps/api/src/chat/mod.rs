//! Chat assistant — the single point of entry for all Gemini API calls.
//! Failures never reach the user as errors: the handler degrades every
//! failure class to a static apology string.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod handlers;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all assistant calls.
pub const MODEL: &str = "gemini-1.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 30;

const SYSTEM_INSTRUCTION: &str = "You are a helpful and professional travel assistant for DGD Hoteles. \
You assist agents with hotel information, travel tips, and operational questions. \
Keep responses concise and business-friendly.";

/// Shown when no API key is configured.
pub const UNAVAILABLE_REPLY: &str =
    "El asistente no está disponible en este momento (API Key faltante).";
/// Shown when the model returns no usable text.
pub const EMPTY_REPLY: &str = "Lo siento, no pude generar una respuesta en este momento.";
/// Shown on any transport or API failure.
pub const ERROR_REPLY: &str =
    "Ocurrió un error al conectar con el asistente. Por favor intente más tarde.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Assistant returned empty content")]
    Empty,
}

/// One prior turn of the conversation, relayed as-is to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// The assistant seam. `AppState` carries an `Arc<dyn ChatAssistant>` so the
/// handler does not care whether a real backend is configured.
#[async_trait]
pub trait ChatAssistant: Send + Sync {
    /// Sends one message plus prior history, returning the reply text.
    async fn reply(&self, message: &str, history: &[ChatTurn]) -> Result<String, ChatError>;
}

// ── Gemini wire types ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest {
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiResponse {
    /// Text of the first candidate part, if any.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}

fn build_request(message: &str, history: &[ChatTurn]) -> GeminiRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| Content {
            role: turn.role.as_str().to_string(),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        })
        .collect();
    contents.push(Content {
        role: "user".to_string(),
        parts: vec![Part {
            text: message.to_string(),
        }],
    });

    GeminiRequest {
        system_instruction: SystemInstruction {
            parts: vec![Part {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
        contents,
    }
}

/// Gemini-backed assistant.
#[derive(Clone)]
pub struct GeminiChat {
    client: Client,
    api_key: String,
}

impl GeminiChat {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[async_trait]
impl ChatAssistant for GeminiChat {
    async fn reply(&self, message: &str, history: &[ChatTurn]) -> Result<String, ChatError> {
        let url = format!("{GEMINI_API_URL}/{MODEL}:generateContent");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&build_request(message, history))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GeminiResponse = response.json().await?;
        let text = body.text().ok_or(ChatError::Empty)?;
        if text.trim().is_empty() {
            return Err(ChatError::Empty);
        }

        debug!("Assistant reply: {} chars", text.len());
        Ok(text.to_string())
    }
}

/// Stand-in used when no API key is configured; always apologizes.
pub struct DisabledChat;

#[async_trait]
impl ChatAssistant for DisabledChat {
    async fn reply(&self, _message: &str, _history: &[ChatTurn]) -> Result<String, ChatError> {
        Ok(UNAVAILABLE_REPLY.to_string())
    }
}

/// Builds the HTTP client shared by assistant calls and sheet downloads.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_appends_current_message_last() {
        let history = vec![
            ChatTurn {
                role: ChatRole::User,
                text: "Hola".into(),
            },
            ChatTurn {
                role: ChatRole::Model,
                text: "¿En qué puedo ayudar?".into(),
            },
        ];
        let req = build_request("Hoteles en Cartagena", &history);
        assert_eq!(req.contents.len(), 3);
        assert_eq!(req.contents[1].role, "model");
        assert_eq!(req.contents[2].role, "user");
        assert_eq!(req.contents[2].parts[0].text, "Hoteles en Cartagena");
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Claro, con gusto."}]}}
            ]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("Claro, con gusto."));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }

    #[tokio::test]
    async fn test_disabled_chat_always_apologizes() {
        let reply = DisabledChat.reply("hola", &[]).await.unwrap();
        assert_eq!(reply, UNAVAILABLE_REPLY);
    }

    #[test]
    fn test_chat_role_serde_lowercase() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"role": "model", "text": "ok"}"#).unwrap();
        assert_eq!(turn.role, ChatRole::Model);
    }
}
