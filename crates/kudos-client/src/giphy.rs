use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::ClientError;

pub const GIPHY_API_URL: &str = "https://api.giphy.com";
pub const DEFAULT_LIMIT: u32 = 20;

/// Content rating sent with every request.
const RATING: &str = "g";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendition {
    pub url: String,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GifImages {
    pub original: Rendition,
    pub fixed_height: Rendition,
    #[serde(default)]
    pub fixed_width: Option<Rendition>,
    #[serde(default)]
    pub preview_gif: Option<Rendition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gif {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub images: GifImages,
}

impl Gif {
    /// The only part of a provider result that is ever stored on a card.
    pub fn card_url(&self) -> &str {
        &self.images.original.url
    }

    /// Smaller rendition for result grids.
    pub fn thumbnail_url(&self) -> &str {
        &self.images.fixed_height.url
    }
}

#[derive(Debug, Deserialize)]
struct GiphyResponse {
    data: Vec<Gif>,
}

#[derive(Debug, Clone)]
pub struct GiphyClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GiphyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(Client::new(), api_key, GIPHY_API_URL)
    }

    pub fn with_base_url(http: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn trending(&self, limit: u32) -> Result<Vec<Gif>, ClientError> {
        let limit = limit.to_string();
        self.fetch(
            "/v1/gifs/trending",
            &[("api_key", self.api_key.as_str()), ("limit", limit.as_str()), ("rating", RATING)],
        )
        .await
    }

    /// A blank query returns nothing without contacting the provider.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Gif>, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let limit = limit.to_string();
        self.fetch(
            "/v1/gifs/search",
            &[
                ("api_key", self.api_key.as_str()),
                ("q", query),
                ("limit", limit.as_str()),
                ("rating", RATING),
            ],
        )
        .await
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Gif>, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!("GIF request to {} failed: {}", path, e);
                ClientError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("GIF request to {} returned HTTP {}", path, status);
            return Err(ClientError::Status(status));
        }

        let body: GiphyResponse = response.json().await.map_err(|e| {
            error!("GIF response from {} could not be decoded: {}", path, e);
            ClientError::Decode(e)
        })?;
        debug!("GIF request to {} returned {} results", path, body.data.len());
        Ok(body.data)
    }
}
