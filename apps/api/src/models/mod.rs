//! Wire shapes of the content API. Field names follow its camelCase JSON.

pub mod application;
pub mod company;
pub mod job;
pub mod user;

use serde::{Deserialize, Serialize};

/// `{ id, text }` repeatable component used for benefits, about paragraphs, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: i64,
    pub text: String,
}

/// A stored file (company logo, uploaded resume).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

impl Pagination {
    /// The page to load after this one, if any.
    pub fn next_page(&self) -> Option<u32> {
        (self.page < self.page_count).then_some(self.page + 1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionMeta {
    pub pagination: Pagination,
}

/// `{ data: [...], meta: { pagination } }` list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    pub data: Vec<T>,
    pub meta: CollectionMeta,
}

/// `{ data: {...} }` single-entry envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Single<T> {
    pub data: T,
}

/// Flattens an optional list of text blocks into their texts.
pub(crate) fn texts(blocks: &Option<Vec<TextBlock>>) -> Vec<String> {
    blocks
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|b| b.text.clone())
        .collect()
}
