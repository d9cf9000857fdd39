//! Shared photo records.
//!
//! These mirror the JSON the media backend returns for photo listings, so a
//! listing fetched from the backend (or written by `photowall scan`) can be
//! fed straight into the layout and pagination code.

use serde::{Deserialize, Serialize};

/// A photo metadata record.
///
/// Only the fields the grid needs are modelled; anything else the backend
/// sends (mimetype, owner, timestamps) is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Photo {
    pub id: u64,
    /// Stored filename on the server.
    pub filename: String,
    /// Filename as uploaded by the user.
    pub original_name: String,
    /// Storage path or URL, possibly with `?w=..&h=..` query parameters.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Photo {
    /// Photo with only an id and a storage path.
    pub fn new(id: u64, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set explicit pixel dimensions.
    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = name.into();
        self
    }
}

/// A list response from the backend.
///
/// Endpoints answer either with a bare JSON array or with an
/// `{ "items": [...], "total": n }` envelope; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Envelope { items: Vec<T>, total: u64 },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    /// Total number of records the backend reports, or the item count for
    /// bare arrays.
    pub fn total(&self) -> u64 {
        match self {
            Listing::Envelope { total, .. } => *total,
            Listing::Bare(items) => items.len() as u64,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Envelope { items, .. } | Listing::Bare(items) => items,
        }
    }
}
