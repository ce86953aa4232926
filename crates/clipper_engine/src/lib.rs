//! Clipper engine: scrap fetching and file export around the pure core.
mod fetch;
mod save;
mod slug;

pub use fetch::{fetch_scrap_blocking, FetchScrapError, FetchSettings, ScrapClient};
pub use save::{ensure_output_dir, scrap_filename, write_markdown, SaveError};
pub use slug::extract_slug;
