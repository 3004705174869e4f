use serde::{Deserialize, Serialize};

/// Maximum number of characters accepted for a message body.
pub const CONTENT_LIMIT: usize = 280;

/// A single board message as served by the backend.
///
/// Records are immutable once created and are only ever removed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Payload of the `/hello` health probe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct HelloResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Returns the trimmed content if it is postable, `None` otherwise.
///
/// Postable means non-empty after trimming and at most [`CONTENT_LIMIT`]
/// characters. The limit counts characters, not bytes, to match the
/// backend validator.
pub fn postable_content(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().count() > CONTENT_LIMIT {
        return None;
    }
    Some(trimmed)
}
