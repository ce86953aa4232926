use clipper_core::{collapse_newline_runs, convert_html_to_markdown, strip_image_size};
use pretty_assertions::assert_eq;

#[test]
fn paragraphs_are_separated_by_blank_lines() {
    assert_eq!(
        convert_html_to_markdown("<p>Hello</p><p>World</p>"),
        "Hello\n\nWorld"
    );
}

#[test]
fn line_breaks_become_single_newlines() {
    assert_eq!(
        convert_html_to_markdown("<p>Line 1<br>Line 2</p>"),
        "Line 1\nLine 2"
    );
}

#[test]
fn horizontal_rule_renders_between_paragraphs() {
    assert_eq!(
        convert_html_to_markdown("<p>Before</p><hr><p>After</p>"),
        "Before\n\n---\n\nAfter"
    );
}

#[test]
fn bold_and_italic_wrap_their_content() {
    assert_eq!(
        convert_html_to_markdown("<p><strong>Bold</strong> and <em>italic</em></p>"),
        "**Bold** and *italic*"
    );
    assert_eq!(
        convert_html_to_markdown("<p><b>fat</b> <i>lean</i></p>"),
        "**fat** *lean*"
    );
}

#[test]
fn inline_code_is_wrapped_in_backticks() {
    assert_eq!(
        convert_html_to_markdown("<p>Run <code>cargo test</code> now</p>"),
        "Run `cargo test` now"
    );
}

#[test]
fn code_block_with_language_class_renders_fenced() {
    assert_eq!(
        convert_html_to_markdown(
            r#"<pre><code class="language-typescript">const x = 1;</code></pre>"#
        ),
        "```typescript\nconst x = 1;\n```"
    );
}

#[test]
fn lang_class_prefix_is_also_recognized() {
    assert_eq!(
        convert_html_to_markdown(r#"<pre><code class="lang-rust">fn main() {}</code></pre>"#),
        "```rust\nfn main() {}\n```"
    );
}

#[test]
fn code_block_without_nested_code_is_fenced_without_language() {
    assert_eq!(
        convert_html_to_markdown("<pre>plain text</pre>"),
        "```\nplain text\n```"
    );
}

#[test]
fn code_block_content_is_taken_raw_not_re_rendered() {
    // entities decode once during parsing and must not pick up extra markup
    assert_eq!(
        convert_html_to_markdown("<pre><code>a &lt; b &amp;&amp; c</code></pre>"),
        "```\na < b && c\n```"
    );
}

#[test]
fn empty_anchor_is_elided() {
    assert_eq!(
        convert_html_to_markdown(r#"<a href="https://example.com"></a>"#),
        ""
    );
}

#[test]
fn anchor_with_text_renders_as_link() {
    assert_eq!(
        convert_html_to_markdown(r#"<a href="https://example.com">Example</a>"#),
        "[Example](https://example.com)"
    );
}

#[test]
fn anchor_without_href_links_to_empty_target() {
    assert_eq!(convert_html_to_markdown("<a>text</a>"), "[text]()");
}

#[test]
fn image_renders_alt_and_src() {
    assert_eq!(
        convert_html_to_markdown(r#"<img alt="Logo" src="https://example.com/logo.png">"#),
        "![Logo](https://example.com/logo.png)"
    );
    assert_eq!(convert_html_to_markdown(r#"<img src="x.png">"#), "![](x.png)");
}

#[test]
fn image_size_annotation_is_stripped_from_rendered_output() {
    assert_eq!(
        convert_html_to_markdown(r#"<img alt="shot" src="https://img.example/pic.png =600x400">"#),
        "![shot](https://img.example/pic.png)"
    );
}

#[test]
fn strip_image_size_handles_both_annotation_forms() {
    assert_eq!(strip_image_size("![alt](url =300x200)"), "![alt](url)");
    assert_eq!(strip_image_size("![alt](url =300x)"), "![alt](url)");
    assert_eq!(strip_image_size("![alt](url)"), "![alt](url)");
}

#[test]
fn unordered_list_items_get_dash_prefixes() {
    assert_eq!(
        convert_html_to_markdown("<ul><li>One</li><li>Two</li></ul>"),
        "- One\n- Two"
    );
}

#[test]
fn ordered_list_items_are_numbered_from_one() {
    assert_eq!(
        convert_html_to_markdown("<ol><li>First</li><li>Second</li><li>Third</li></ol>"),
        "1. First\n2. Second\n3. Third"
    );
}

#[test]
fn list_is_terminated_by_a_single_newline() {
    assert_eq!(
        convert_html_to_markdown("<ul><li>One</li></ul><p>After</p>"),
        "- One\nAfter"
    );
}

#[test]
fn blockquote_prefixes_every_line() {
    assert_eq!(
        convert_html_to_markdown("<blockquote><p>Quote line</p></blockquote>"),
        "> Quote line"
    );
    assert_eq!(
        convert_html_to_markdown("<blockquote><p>A</p><p>B</p></blockquote>"),
        "> A\n> \n> B"
    );
}

#[test]
fn headings_render_with_matching_hash_count() {
    assert_eq!(convert_html_to_markdown("<h1>Top</h1>"), "# Top");
    assert_eq!(convert_html_to_markdown("<h2>Section</h2>"), "## Section");
    assert_eq!(convert_html_to_markdown("<h6>Deep</h6>"), "###### Deep");
}

#[test]
fn heading_permalink_anchors_disappear() {
    assert_eq!(
        convert_html_to_markdown(r##"<h1><a href="#anchor"></a>Title</h1>"##),
        "# Title"
    );
}

#[test]
fn table_renders_header_separator_and_rows() {
    let html = "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
                <tbody><tr><td>1</td><td>2</td></tr></tbody></table>";
    assert_eq!(
        convert_html_to_markdown(html),
        "| A | B |\n| --- | --- |\n| 1 | 2 |"
    );
}

#[test]
fn table_without_thead_uses_first_row_as_header() {
    let html = "<table><tr><th>H1</th><th>H2</th></tr><tr><td>a</td><td>b</td></tr></table>";
    assert_eq!(
        convert_html_to_markdown(html),
        "| H1 | H2 |\n| --- | --- |\n| a | b |"
    );
}

#[test]
fn short_table_rows_are_padded_to_the_widest_row() {
    let html = "<table><tr><th>A</th><th>B</th></tr><tr><td>only</td></tr></table>";
    assert_eq!(
        convert_html_to_markdown(html),
        "| A | B |\n| --- | --- |\n| only |  |"
    );
}

#[test]
fn table_cells_escape_pipes_and_flatten_newlines() {
    let html = "<table><tr><th>a|b</th><th>c<br>d</th></tr><tr><td>x</td><td>y</td></tr></table>";
    assert_eq!(
        convert_html_to_markdown(html),
        "| a\\|b | c d |\n| --- | --- |\n| x | y |"
    );
}

#[test]
fn generic_containers_pass_children_through() {
    assert_eq!(
        convert_html_to_markdown("<div><span>Text</span> more</div>"),
        "Text more"
    );
    assert_eq!(
        convert_html_to_markdown("<section><article><p>Inner</p></article></section>"),
        "Inner"
    );
    assert_eq!(convert_html_to_markdown("<custom-widget>w</custom-widget>"), "w");
}

#[test]
fn text_renders_literally_without_markdown_escaping() {
    assert_eq!(
        convert_html_to_markdown("<p>5 * 3 = 15 _and_ [not a link]</p>"),
        "5 * 3 = 15 _and_ [not a link]"
    );
}

#[test]
fn entities_are_decoded_once() {
    assert_eq!(convert_html_to_markdown("<p>a &amp; b</p>"), "a & b");
}

#[test]
fn newline_runs_never_exceed_two_in_final_output() {
    let html = "<p>A</p><br><br><br><p>B</p><hr><p>C</p>";
    let markdown = convert_html_to_markdown(html);
    assert!(!markdown.contains("\n\n\n"), "got: {markdown:?}");
}

#[test]
fn collapse_newline_runs_is_idempotent() {
    let input = "a\n\n\n\nb\n\n\nc\nd";
    let once = collapse_newline_runs(input);
    assert_eq!(once, "a\n\nb\n\nc\nd");
    assert_eq!(collapse_newline_runs(&once), once);
}

#[test]
fn conversion_is_deterministic() {
    let html = r#"<h2>Notes</h2><ul><li>alpha</li><li>beta</li></ul><pre><code class="language-sh">ls</code></pre>"#;
    assert_eq!(
        convert_html_to_markdown(html),
        convert_html_to_markdown(html)
    );
}
