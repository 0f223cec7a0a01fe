//! Chat endpoint data models

use serde::{Deserialize, Serialize};

/// One prior turn as the client remembers it. Everything is untrusted;
/// the handler re-checks roles and clamps content before forwarding.
#[derive(Deserialize, Debug, Clone)]
pub struct HistoryItem {
    pub role: Option<String>,
    pub content: Option<serde_json::Value>,
}

/// The endpoint always answers with this shape, even on errors, so the
/// chat widget can render whatever comes back as a bubble.
#[derive(Serialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}

/// An image attachment pulled out of the multipart body
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}
