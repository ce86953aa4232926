//! YAML frontmatter and final document assembly.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::markdown::convert_html_to_markdown;
use crate::normalize::ScrapDocument;

/// Separator emitted between thread groups, never inside one.
const GROUP_SEPARATOR: &str = "\n\n---\n\n";

/// Characters that force a YAML scalar into double quotes.
const YAML_SPECIALS: &[char] = &[
    ':', '-', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`', '[', ']', '{', '}', '?',
    ',', '\n',
];

/// Composes the full Markdown document for a normalized scrap:
/// frontmatter, blank line, `# <title>` heading, blank line, then the
/// converted posts. Posts within a thread group are joined with a blank
/// line; groups are joined with a `---` thematic break.
///
/// `exported_at` is sampled by the caller so the assembly stays pure.
pub fn build_markdown_document(doc: &ScrapDocument, exported_at: DateTime<Utc>) -> String {
    let frontmatter = render_frontmatter(doc, exported_at);

    let groups: Vec<String> = doc
        .groups
        .iter()
        .map(|group| {
            group
                .posts
                .iter()
                .map(|post| convert_html_to_markdown(&post.html_content))
                .collect::<Vec<_>>()
                .join("\n\n")
        })
        .collect();
    let body = groups.join(GROUP_SEPARATOR);

    format!("{frontmatter}\n\n# {title}\n\n{body}", title = doc.title)
}

fn render_frontmatter(doc: &ScrapDocument, exported_at: DateTime<Utc>) -> String {
    let mut lines = vec!["---".to_string()];
    lines.push(format!("title: {}", escape_yaml_scalar(&doc.title)));
    lines.push(format!("author: {}", escape_yaml_scalar(&doc.author)));
    lines.push(format!("url: \"{}\"", doc.url));
    lines.push(format!(
        "created_at: \"{}\"",
        doc.created_at.with_timezone(&Utc).format("%Y-%m-%d")
    ));
    if !doc.topics.is_empty() {
        lines.push("topics:".to_string());
        for topic in &doc.topics {
            lines.push(format!("  - {}", escape_yaml_scalar(topic)));
        }
    }
    lines.push(format!(
        "exported_at: \"{}\"",
        exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    lines.push("---".to_string());
    lines.join("\n")
}

/// Double-quotes a scalar when it contains YAML-significant characters or
/// surrounding whitespace, escaping `\` and `"` inside the quotes.
fn escape_yaml_scalar(value: &str) -> String {
    let needs_quoting = value.contains(YAML_SPECIALS) || value.trim() != value;
    if needs_quoting {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
