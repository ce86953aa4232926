//! Typed view of the scrap API payload.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// Envelope the API wraps a single scrap in: `{ "scrap": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapResponse {
    pub scrap: Scrap,
}

/// One scrap: metadata plus the root comments of its discussion tree.
///
/// Fields the exporter does not read are left undeclared and ignored
/// during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scrap {
    pub slug: String,
    pub title: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub topics: Vec<ScrapTopic>,
    pub user: ScrapUser,
    #[serde(default)]
    pub comments: Vec<ScrapComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapUser {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapTopic {
    pub display_name: String,
}

/// One comment in the thread tree.
///
/// `body_html` is the rendered HTML fragment of the comment body;
/// `children` are the nested replies in display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapComment {
    pub body_html: String,
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub children: Vec<ScrapComment>,
}
