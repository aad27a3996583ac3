use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

use crate::models::Category;

// -- Request payloads --
//
// Every field is optional on the wire so that a missing field surfaces as a
// validation message instead of a deserialization failure. A field of the
// wrong JSON type counts as missing.

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Field>::deserialize(deserializer)? {
        Some(Field::Text(s)) => Some(s),
        Some(Field::Other(_)) | None => None,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardPayload {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardPayload {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub gif: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPayload {
    #[serde(default, deserialize_with = "text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub author: Option<String>,
}

// -- Validated drafts --

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDraft {
    pub title: String,
    pub description: String,
    pub gif: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub message: String,
    pub author: Option<String>,
}

// -- Response bodies --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
