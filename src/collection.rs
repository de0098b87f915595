//! Collection loading
//!
//! Fetches the collection feed over HTTP or reads it from disk, then
//! filters out malformed items so the grid only ever sees complete ones.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::http::HTTP_AGENT;
use crate::models::{CollectionItem, RawCollectionItem};

/// Errors raised while loading a collection
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("failed to load collection from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("failed to read collection from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("collection is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the collection comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionSource {
    Url(String),
    File(PathBuf),
}

impl CollectionSource {
    /// `http://` and `https://` are fetched, anything else is a file path
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CollectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Extract the valid items of a feed document.
///
/// A missing or non-array `collection` yields an empty list; entries with a
/// missing or mistyped `id`, `title` or `images.artwork_portrait` are dropped.
pub fn parse_collection(data: &Value) -> Vec<CollectionItem> {
    let Some(raw) = data.get("collection").and_then(Value::as_array) else {
        return Vec::new();
    };

    let items: Vec<CollectionItem> = raw
        .iter()
        .filter_map(|entry| serde_json::from_value::<RawCollectionItem>(entry.clone()).ok())
        .filter_map(RawCollectionItem::validate)
        .collect();

    let dropped = raw.len() - items.len();
    if dropped > 0 {
        warn!(dropped, kept = items.len(), "dropped malformed collection items");
    }
    items
}

/// Parse a feed document from text
pub fn parse_collection_str(content: &str) -> Result<Vec<CollectionItem>, CollectionError> {
    let data: Value = serde_json::from_str(content)?;
    Ok(parse_collection(&data))
}

/// Load and validate the collection from `source`
pub fn load_collection(source: &CollectionSource) -> Result<Vec<CollectionItem>, CollectionError> {
    info!(%source, "loading collection");

    let items = match source {
        CollectionSource::Url(url) => {
            let mut response = HTTP_AGENT.get(url).call().map_err(|e| CollectionError::Http {
                url: url.clone(),
                source: e,
            })?;
            debug!(status = %response.status(), "collection response");
            let data: Value = response
                .body_mut()
                .read_json()
                .map_err(|e| CollectionError::Http {
                    url: url.clone(),
                    source: e,
                })?;
            parse_collection(&data)
        }
        CollectionSource::File(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| CollectionError::Io {
                path: path.clone(),
                source: e,
            })?;
            parse_collection_str(&content)?
        }
    };

    info!(count = items.len(), "collection loaded");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            CollectionSource::parse("https://example.org/feed.json"),
            CollectionSource::Url("https://example.org/feed.json".to_string())
        );
        assert_eq!(
            CollectionSource::parse("fixtures/feed.json"),
            CollectionSource::File(PathBuf::from("fixtures/feed.json"))
        );
    }

    #[test]
    fn test_parse_keeps_complete_items() {
        let data = json!({
            "collection": [
                { "id": 1, "title": "Alpha", "images": { "artwork_portrait": "a.jpg" } },
                { "id": 2, "title": "Beta", "images": { "artwork_portrait": "b.jpg" } }
            ]
        });
        let items = parse_collection(&data);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], CollectionItem::new(1, "Alpha", "a.jpg"));
        assert_eq!(items[1].images.artwork_portrait, "b.jpg");
    }

    #[test]
    fn test_parse_filters_malformed_items() {
        let data = json!({
            "collection": [
                { "id": 1, "title": "Ok", "images": { "artwork_portrait": "ok.jpg" } },
                { "title": "No id", "images": { "artwork_portrait": "x.jpg" } },
                { "id": "3", "title": "String id", "images": { "artwork_portrait": "x.jpg" } },
                { "id": 4, "images": { "artwork_portrait": "x.jpg" } },
                { "id": 5, "title": "No images" },
                { "id": 6, "title": "Null art", "images": { "artwork_portrait": null } },
                null,
                42
            ]
        });
        let items = parse_collection(&data);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn test_parse_missing_collection_is_empty() {
        assert!(parse_collection(&json!({})).is_empty());
        assert!(parse_collection(&json!({ "collection": "nope" })).is_empty());
        assert!(parse_collection(&json!(null)).is_empty());
    }

    #[test]
    fn test_parse_str_rejects_invalid_json() {
        assert!(matches!(
            parse_collection_str("{ not json"),
            Err(CollectionError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let source = CollectionSource::File(PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(
            load_collection(&source),
            Err(CollectionError::Io { .. })
        ));
    }
}
