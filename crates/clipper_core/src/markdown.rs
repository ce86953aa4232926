//! HTML fragment to Markdown rendering.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

static CODE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("code").expect("code selector"));

static THEAD_ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead tr").expect("thead row selector"));

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("row selector"));

static LANGUAGE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:language-|lang-)(\w+)").expect("language class pattern"));

static IMAGE_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\s+=\d+x?\d*\)").expect("image size pattern"));

static NEWLINE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline run pattern"));

/// Renders one HTML fragment (a single post body) into Markdown.
///
/// The output is trimmed and contains no run of three or more consecutive
/// newlines. Unrecognized elements pass their children through unchanged,
/// and the parser is lenient, so this never fails; malformed input degrades
/// to a best-effort render.
pub fn convert_html_to_markdown(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let rendered = render_children_of(fragment.root_element());

    let stripped = strip_image_size(&rendered);
    collapse_newline_runs(stripped.trim())
}

/// Rewrites image size annotations `![alt](url =WxH)` or `![alt](url =Wx)`
/// down to `![alt](url)`.
pub fn strip_image_size(markdown: &str) -> String {
    IMAGE_SIZE_RE.replace_all(markdown, "![${1}](${2})").into_owned()
}

/// Collapses every run of 3+ consecutive newlines to exactly 2. Idempotent.
pub fn collapse_newline_runs(text: &str) -> String {
    NEWLINE_RUN_RE.replace_all(text, "\n\n").into_owned()
}

fn render_node(node: NodeRef<Node>) -> String {
    match node.value() {
        Node::Text(text) => text.text.to_string(),
        Node::Element(_) => match ElementRef::wrap(node) {
            Some(element) => render_element(element),
            None => String::new(),
        },
        _ => node.children().map(render_node).collect(),
    }
}

fn render_children_of(element: ElementRef) -> String {
    element.children().map(render_node).collect()
}

fn render_element(element: ElementRef) -> String {
    let tag = element.value().name().to_ascii_lowercase();
    match tag.as_str() {
        "p" => format!("{}\n\n", render_children_of(element)),
        "br" => "\n".to_string(),
        "hr" => "\n---\n\n".to_string(),
        "strong" | "b" => format!("**{}**", render_children_of(element)),
        "em" | "i" => format!("*{}*", render_children_of(element)),
        "code" => render_code(element),
        "pre" => render_code_block(element),
        "a" => render_anchor(element),
        "img" => render_image(element),
        "ul" => render_list(element, false),
        "ol" => render_list(element, true),
        "li" => render_children_of(element),
        "blockquote" => render_blockquote(element),
        "h1" => render_heading(element, 1),
        "h2" => render_heading(element, 2),
        "h3" => render_heading(element, 3),
        "h4" => render_heading(element, 4),
        "h5" => render_heading(element, 5),
        "h6" => render_heading(element, 6),
        "table" => render_table(element),
        _ => render_children_of(element),
    }
}

fn render_code(element: ElementRef) -> String {
    let children = render_children_of(element);
    if has_parent_tag(element, "pre") {
        // fencing is handled by the enclosing code block
        children
    } else {
        format!("`{children}`")
    }
}

fn render_code_block(element: ElementRef) -> String {
    match element.select(&CODE_SELECTOR).next() {
        Some(code) => {
            let language = code_language(code);
            // raw text content, not the rendered form, so code is never re-escaped
            let raw: String = code.text().collect();
            format!("\n```{language}\n{raw}\n```\n\n")
        }
        None => format!("\n```\n{}\n```\n\n", render_children_of(element)),
    }
}

fn code_language(element: ElementRef) -> String {
    let class_attr = element.value().attr("class").unwrap_or_default();
    LANGUAGE_CLASS_RE
        .captures(class_attr)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn render_anchor(element: ElementRef) -> String {
    let children = render_children_of(element);
    if children.trim().is_empty() {
        // elides empty anchors, e.g. heading permalinks
        return String::new();
    }
    let href = element.value().attr("href").unwrap_or_default();
    format!("[{children}]({href})")
}

fn render_image(element: ElementRef) -> String {
    let alt = element.value().attr("alt").unwrap_or_default();
    let src = element.value().attr("src").unwrap_or_default();
    format!("![{alt}]({src})")
}

fn render_list(element: ElementRef, ordered: bool) -> String {
    let items: Vec<String> = element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name().eq_ignore_ascii_case("li"))
        .enumerate()
        .map(|(index, item)| {
            let content = render_children_of(item);
            let content = content.trim();
            if ordered {
                format!("{}. {content}", index + 1)
            } else {
                format!("- {content}")
            }
        })
        .collect();

    format!("{}\n", items.join("\n"))
}

fn render_blockquote(element: ElementRef) -> String {
    let children = render_children_of(element);
    let quoted: Vec<String> = children
        .trim()
        .split('\n')
        .map(|line| format!("> {line}"))
        .collect();

    format!("{}\n\n", quoted.join("\n"))
}

fn render_heading(element: ElementRef, level: usize) -> String {
    let children = render_children_of(element);
    format!("{} {}\n\n", "#".repeat(level), children.trim())
}

fn render_table(element: ElementRef) -> String {
    let rows: Vec<ElementRef> = element.select(&ROW_SELECTOR).collect();
    if rows.is_empty() {
        return String::new();
    }

    // header: the first row inside a thead if present, otherwise the first row
    let header_index = element
        .select(&THEAD_ROW_SELECTOR)
        .next()
        .and_then(|header| rows.iter().position(|row| row.id() == header.id()))
        .unwrap_or(0);

    let mut cell_rows: Vec<Vec<String>> = rows.iter().map(|row| row_cells(*row)).collect();

    let width = cell_rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }
    for cells in &mut cell_rows {
        cells.resize(width, String::new());
    }

    let header = cell_rows.remove(header_index);
    let separator = vec!["---".to_string(); width];

    let mut lines = Vec::with_capacity(cell_rows.len() + 2);
    lines.push(format_table_row(&header));
    lines.push(format_table_row(&separator));
    for cells in &cell_rows {
        lines.push(format_table_row(cells));
    }

    format!("{}\n\n", lines.join("\n"))
}

fn row_cells(row: ElementRef) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .map(|cell| normalize_cell(&render_children_of(cell)))
        .collect()
}

/// Cells must stay on one table line with unescaped pipes removed.
fn normalize_cell(content: &str) -> String {
    content.trim().replace('\n', " ").replace('|', "\\|")
}

fn format_table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn has_parent_tag(element: ElementRef, tag: &str) -> bool {
    element
        .parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|parent| parent.value().name().eq_ignore_ascii_case(tag))
}
