//! URL and header helpers shared by the fetchers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, SourceError};

/// Parse a base URL that request paths will be appended to.
pub(crate) fn parse_base(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| SourceError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.cannot_be_a_base() {
        return Err(SourceError::InvalidUrl {
            url: url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(parsed)
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Build a `Basic` authorization header value.
pub(crate) fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

/// Deserialize a response body, tagging failures with `context`.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8], context: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| SourceError::Parse {
        context: context.to_string(),
        source,
    })
}
