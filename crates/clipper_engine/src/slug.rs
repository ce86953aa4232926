//! Scrap URL parsing.

use url::Url;

use clipper_core::SCRAP_HOST;

/// Extracts the scrap slug from a scrap URL, or passes a bare slug through.
///
/// `https://zenn.dev/<username>/scraps/<slug>` yields `<slug>`; query
/// strings, fragments, and trailing path segments are tolerated. Any other
/// URL yields `None`. An input that is just alphanumeric characters is
/// treated as an already-extracted slug.
pub fn extract_slug(input: &str) -> Option<String> {
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(input.to_string());
    }

    let url = Url::parse(input).ok()?;
    if url.host_str() != Some(SCRAP_HOST) {
        return None;
    }

    let mut segments = url.path_segments()?;
    segments.next().filter(|username| !username.is_empty())?;
    if segments.next() != Some("scraps") {
        return None;
    }
    let slug = segments.next().filter(|slug| !slug.is_empty())?;
    Some(slug.to_string())
}
