// https://dictionaryapi.dev/ - free english dictionary, one GET per word, json array of entries

use reqwest::{StatusCode, Url};

use crate::{DictionaryError, LookupResult, NotFoundError};

pub const DEFAULT_API_BASE: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Appends `word` to the base url as a single, percent-encoded path segment.
pub(crate) fn entry_url(base: &Url, word: &str) -> Result<Url, DictionaryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DictionaryError::InvalidBase(base.to_string()))?
        .pop_if_empty()
        .push(word);
    Ok(url)
}

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    base: &Url,
    word: &str,
) -> Result<Vec<LookupResult>, DictionaryError> {
    let url = entry_url(base, word)?;
    tracing::debug!(%url, "requesting definition");
    let res = client.get(url).send().await.map_err(DictionaryError::Fetch)?;
    let status = res.status();
    let body = res.bytes().await.map_err(DictionaryError::Fetch)?;
    interpret_response(status, &body)
}

/// Decides what a response means. A failed status never reaches the entry
/// parser; its body is only read for the api's error message.
pub(crate) fn interpret_response(
    status: StatusCode,
    body: &[u8],
) -> Result<Vec<LookupResult>, DictionaryError> {
    if !status.is_success() {
        let error = serde_json::from_slice::<NotFoundError>(body).unwrap_or_else(|err| {
            tracing::debug!(%status, "unreadable error body: {err}");
            NotFoundError {
                title: status.to_string(),
                ..NotFoundError::default()
            }
        });
        return Err(DictionaryError::NotFound(error));
    }
    serde_json::from_slice(body).map_err(DictionaryError::Deserialize)
}
