//! Data models for content-grid

use serde::{Deserialize, Serialize};

/// Artwork attached to a collection item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    pub artwork_portrait: String,
}

/// A validated media item shown in the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: i64,
    pub title: String,
    pub images: Images,
}

impl CollectionItem {
    pub fn new(id: i64, title: impl Into<String>, artwork_portrait: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            images: Images {
                artwork_portrait: artwork_portrait.into(),
            },
        }
    }

    /// Title to show, falling back when the feed sent an empty string
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Feed item before validation: any field may be missing or mistyped
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCollectionItem {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<serde_json::Value>,
    #[serde(default)]
    pub images: Option<RawImages>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImages {
    #[serde(default)]
    pub artwork_portrait: Option<serde_json::Value>,
}

impl RawCollectionItem {
    /// Keep the item only when every required field has the right type
    pub fn validate(self) -> Option<CollectionItem> {
        let id = self.id?.as_i64()?;
        let title = self.title?.as_str()?.to_string();
        let artwork = self.images?.artwork_portrait?.as_str()?.to_string();
        Some(CollectionItem::new(id, title, artwork))
    }
}
