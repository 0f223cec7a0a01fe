use super::models::{ChatResponse, HistoryItem, ImageAttachment};
use super::prompt::SYSTEM_PROMPT;
use crate::common::AppState;
use crate::services::openai::ChatMessage;
use axum::{
    extract::{Extension, Multipart},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use base64::Engine;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

const MAX_HISTORY_TURNS: usize = 10;
const MAX_CONTENT_CHARS: usize = 2000;
pub(crate) const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Truncate without splitting a multi-byte character
fn clamp_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Rebuild untrusted client history into messages safe to forward:
/// keep the most recent turns, drop anything without string content,
/// coerce unknown roles to "assistant" and clamp each turn's length.
pub(crate) fn sanitize_history(raw: Option<&str>) -> Vec<ChatMessage> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let items: Vec<HistoryItem> = match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(_) => return Vec::new(),
    };

    let start = items.len().saturating_sub(MAX_HISTORY_TURNS);
    items[start..]
        .iter()
        .filter_map(|item| {
            let content = item.content.as_ref()?.as_str()?;
            let role = match item.role.as_deref() {
                Some("user") => "user",
                _ => "assistant",
            };
            Some(ChatMessage::text(role, clamp_chars(content, MAX_CONTENT_CHARS)))
        })
        .collect()
}

/// Build the user turn, inlining the image as a data URL content part
/// when one was attached. Low detail keeps vision token cost down.
pub(crate) fn build_user_message(message: &str, image: Option<&ImageAttachment>) -> ChatMessage {
    let text = clamp_chars(message, MAX_CONTENT_CHARS);

    match image {
        Some(attachment) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(&attachment.bytes);
            ChatMessage {
                role: "user".to_string(),
                content: serde_json::json!([
                    { "type": "text", "text": text },
                    {
                        "type": "image_url",
                        "image_url": {
                            "url": format!("data:{};base64,{}", attachment.mime_type, encoded),
                            "detail": "low"
                        }
                    }
                ]),
            }
        }
        None => ChatMessage::text("user", text),
    }
}

/// POST /api/chat - Ask the Asylum AI helper (public)
///
/// Multipart body: `message` (required), `history` (optional JSON array
/// of prior turns), `image` (optional attachment). The body is always
/// `{ "response": ... }`, including on errors, so the widget can render
/// whatever comes back.
pub async fn chat(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut message: Option<String> = None;
    let mut history: Option<String> = None;
    let mut image: Option<ImageAttachment> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed chat multipart body");
                return chat_error(StatusCode::BAD_REQUEST, "Please provide a message.");
            }
        };

        match field.name() {
            Some("message") => match field.text().await {
                Ok(text) => message = Some(text),
                Err(_) => {
                    return chat_error(StatusCode::BAD_REQUEST, "Please provide a message.")
                }
            },
            Some("history") => {
                if let Ok(text) = field.text().await {
                    history = Some(text);
                }
            }
            Some("image") => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                if let Ok(bytes) = field.bytes().await {
                    if bytes.len() > MAX_IMAGE_BYTES {
                        return chat_error(
                            StatusCode::BAD_REQUEST,
                            "Image is too large. Please send something under 10MB.",
                        );
                    }
                    image = Some(ImageAttachment {
                        bytes: bytes.to_vec(),
                        mime_type,
                    });
                }
            }
            _ => {}
        }
    }

    let message = match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => return chat_error(StatusCode::BAD_REQUEST, "Please provide a message."),
    };

    let app_state = state.read().await.clone();
    let openai_service = app_state.openai_service.clone();

    if !openai_service.is_configured() {
        return chat_error(StatusCode::INTERNAL_SERVER_ERROR, "AI service not configured.");
    }

    let mut messages = vec![ChatMessage::text("system", SYSTEM_PROMPT)];
    messages.extend(sanitize_history(history.as_deref()));
    messages.push(build_user_message(&message, image.as_ref()));

    let with_image = image.is_some();
    match openai_service.chat_completion(messages, with_image).await {
        Ok(response) => {
            info!(with_image, "Chat completion served");
            (StatusCode::OK, Json(ChatResponse { response }))
        }
        Err(e) => {
            error!(error = %e, "Chat completion failed");
            chat_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sorry, I encountered an error. Please try again.",
            )
        }
    }
}

fn chat_error(status: StatusCode, text: &str) -> (StatusCode, Json<ChatResponse>) {
    (
        status,
        Json(ChatResponse {
            response: text.to_string(),
        }),
    )
}
