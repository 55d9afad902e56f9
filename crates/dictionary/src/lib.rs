use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use dictionary_api::get_definition;
use reqwest::Url;
use serde::Deserialize;

mod dictionary;
mod dictionary_api;

pub use dictionary::{Definition, License, LookupResult, Meaning, Phonetic};
pub use dictionary_api::DEFAULT_API_BASE;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("could not reach the dictionary: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("unexpected response from the dictionary: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("{0}")]
    NotFound(NotFoundError),
    #[error("invalid dictionary url: {0}")]
    InvalidBase(String),
}

/// Error body the api sends along with a failed status.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotFoundError {
    pub title: String,
    pub message: String,
    pub resolution: String,
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.title.is_empty(), self.message.is_empty()) {
            (false, false) => write!(f, "{}: {}", self.title, self.message),
            (false, true) => f.write_str(&self.title),
            (true, false) => f.write_str(&self.message),
            (true, true) => f.write_str("no definitions found"),
        }
    }
}

/// Anything that can turn a word into dictionary entries.
#[async_trait]
pub trait DictionaryApi: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<Vec<LookupResult>, DictionaryError>;
}

pub struct Dictionary {
    client: reqwest::Client,
    base: Url,
}

impl Dictionary {
    pub fn new() -> Result<Self, DictionaryError> {
        Self::with_base(DEFAULT_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Client against a custom endpoint with a per-request timeout.
    pub fn with_base(base: &str, timeout: Duration) -> Result<Self, DictionaryError> {
        let base = Url::parse(base)
            .map_err(|err| DictionaryError::InvalidBase(format!("{base}: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(DictionaryError::InvalidBase(base.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DictionaryError::Fetch)?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The underlying http client, shared for fetching pronunciation clips.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn get_definition(&self, word: &str) -> Result<Vec<LookupResult>, DictionaryError> {
        get_definition(&self.client, &self.base, word).await
    }
}

#[async_trait]
impl DictionaryApi for Dictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<LookupResult>, DictionaryError> {
        self.get_definition(word).await
    }
}
