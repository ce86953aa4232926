//! Markdown file export.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;
use thiserror::Error;

const MAX_TITLE_CHARS: usize = 80;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Deterministic filename for one exported scrap:
/// `{sanitized_title}-{slug}.md`, or `{slug}.md` when the title sanitizes
/// to nothing.
pub fn scrap_filename(title: &str, slug: &str) -> String {
    let sanitized = sanitize_title(title);
    if sanitized.is_empty() {
        format!("{slug}.md")
    } else {
        format!("{sanitized}-{slug}.md")
    }
}

fn sanitize_title(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    // Collapse runs of underscores left by adjacent forbidden characters.
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }

    // Truncation counts characters, not bytes; titles are often CJK.
    if compacted.chars().count() > MAX_TITLE_CHARS {
        compacted.chars().take(MAX_TITLE_CHARS).collect()
    } else {
        compacted
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

/// Ensure the output directory exists; create it if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), SaveError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(SaveError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| SaveError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically writes the document to `{dir}/{filename}` by writing a temp
/// file in the same directory and renaming it over the final path.
pub fn write_markdown(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, SaveError> {
    ensure_output_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace an existing export of the same scrap to keep determinism.
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| SaveError::Io(e.error))?;

    info!("wrote {}", target.display());
    Ok(target)
}
