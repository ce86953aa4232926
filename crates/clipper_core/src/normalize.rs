//! Thread flattening and metadata extraction.

use chrono::{DateTime, FixedOffset};

use crate::types::{Scrap, ScrapComment};

/// Host under which scraps are published:
/// `https://zenn.dev/<username>/scraps/<slug>`.
pub const SCRAP_HOST: &str = "zenn.dev";

/// One flattened comment body, the unit the converter renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub html_content: String,
    pub created_at: DateTime<FixedOffset>,
}

/// All posts derived from one top-level comment and its nested replies,
/// in depth-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadGroup {
    pub posts: Vec<Post>,
}

/// Normalized scrap: frontmatter metadata plus ordered thread groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapDocument {
    pub title: String,
    pub author: String,
    pub url: String,
    pub created_at: DateTime<FixedOffset>,
    pub topics: Vec<String>,
    pub groups: Vec<ThreadGroup>,
}

/// Restructures a scrap into a [`ScrapDocument`]:
/// - one [`ThreadGroup`] per top-level comment, each flattened pre-order
///   (parent before its replies, replies in source order)
/// - topics mapped to their display names, source order preserved
/// - the canonical public URL derived from username and slug.
///
/// Pure; the input is not mutated.
pub fn normalize_scrap(scrap: &Scrap) -> ScrapDocument {
    let groups = scrap
        .comments
        .iter()
        .map(|root| ThreadGroup {
            posts: flatten_thread(root),
        })
        .collect();

    ScrapDocument {
        title: scrap.title.clone(),
        author: scrap.user.username.clone(),
        url: canonical_scrap_url(&scrap.user.username, &scrap.slug),
        created_at: scrap.created_at,
        topics: scrap
            .topics
            .iter()
            .map(|topic| topic.display_name.clone())
            .collect(),
        groups,
    }
}

/// Canonical public URL of a scrap.
pub fn canonical_scrap_url(username: &str, slug: &str) -> String {
    format!("https://{SCRAP_HOST}/{username}/scraps/{slug}")
}

fn flatten_thread(root: &ScrapComment) -> Vec<Post> {
    let mut posts = Vec::new();
    collect_posts(root, &mut posts);
    posts
}

fn collect_posts(comment: &ScrapComment, posts: &mut Vec<Post>) {
    posts.push(Post {
        html_content: comment.body_html.clone(),
        created_at: comment.created_at,
    });
    for child in &comment.children {
        collect_posts(child, posts);
    }
}
