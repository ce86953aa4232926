//! Clipper core: pure scrap to Markdown conversion pipeline.
mod types;
mod normalize;
mod markdown;
mod frontmatter;

pub use frontmatter::build_markdown_document;
pub use markdown::{collapse_newline_runs, convert_html_to_markdown, strip_image_size};
pub use normalize::{
    canonical_scrap_url, normalize_scrap, Post, ScrapDocument, ThreadGroup, SCRAP_HOST,
};
pub use types::{Scrap, ScrapComment, ScrapResponse, ScrapTopic, ScrapUser};
