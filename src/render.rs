//! Pure content-rendering pipeline: split YAML front matter from the
//! markdown body, then render each half to HTML independently. No storage
//! or transport dependencies, so everything here is unit-testable.

use std::sync::LazyLock;

use comrak::{markdown_to_html, ComrakOptions};
use regex::Regex;
use serde_yaml::{Mapping, Value};

/// Metadata nesting deeper than this renders a truncation item instead of
/// recursing further; adversarial input must not exhaust the stack.
const MAX_METADATA_DEPTH: usize = 32;

static WIKILINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").unwrap());

/// Split content into an optional front-matter block and the body.
///
/// Front matter is delimited by a leading `---` and a second `---` anywhere
/// after it. With no opening marker, or an opening marker that is never
/// closed, the whole content is the body.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    if let Some(rest) = content.strip_prefix("---") {
        if let Some(idx) = rest.find("---") {
            return (Some(rest[..idx].trim()), rest[idx + 3..].trim());
        }
    }
    (None, content)
}

/// Parse a front-matter block as YAML. A parse failure never propagates:
/// it becomes a mapping carrying the error and its detail string, rendered
/// like any other metadata.
pub fn parse_metadata(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(err) => {
            let mut map = Mapping::new();
            map.insert(
                Value::String("error".to_string()),
                Value::String("Failed to parse YAML".to_string()),
            );
            map.insert(
                Value::String("details".to_string()),
                Value::String(err.to_string()),
            );
            Value::Mapping(map)
        }
    }
}

/// Replace every `[[name]]` span with an inert anchor before markdown
/// rendering, so Obsidian-style links survive as visible placeholders.
pub fn link_wikilinks(body: &str) -> String {
    WIKILINK_RE
        .replace_all(body, "<a href='#'>$1</a>")
        .into_owned()
}

/// Render the body as markdown. Tables, fenced code blocks, and
/// newline-as-break semantics match the reference renderer; raw HTML
/// passthrough keeps the injected wikilink anchors intact.
pub fn render_markdown(body: &str) -> String {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.render.hardbreaks = true;
    options.render.unsafe_ = true;
    markdown_to_html(body, &options)
}

/// Render parsed metadata as a nested unordered list: capitalized keys,
/// scalars inlined, sequences as nested lists, mappings recursed.
pub fn render_metadata(data: &Value) -> String {
    render_level(data, 0)
}

fn render_level(data: &Value, depth: usize) -> String {
    if depth > MAX_METADATA_DEPTH {
        return "<ul><li>…</li></ul>".to_string();
    }

    let mut html = String::from("<ul>");
    match data {
        Value::Mapping(map) => {
            for (key, value) in map {
                let key = escape_html(&capitalize(&scalar_string(key)));
                match value {
                    Value::Mapping(_) => {
                        html.push_str(&format!(
                            "<li><strong>{}:</strong>{}</li>",
                            key,
                            render_level(value, depth + 1)
                        ));
                    }
                    Value::Sequence(items) => {
                        html.push_str(&format!("<li><strong>{}:</strong><ul>", key));
                        for item in items {
                            match item {
                                Value::Mapping(_) | Value::Sequence(_) => {
                                    html.push_str(&format!(
                                        "<li>{}</li>",
                                        render_level(item, depth + 1)
                                    ));
                                }
                                _ => {
                                    html.push_str(&format!(
                                        "<li>{}</li>",
                                        escape_html(&scalar_string(item))
                                    ));
                                }
                            }
                        }
                        html.push_str("</ul></li>");
                    }
                    _ => {
                        html.push_str(&format!(
                            "<li><strong>{}:</strong> {}</li>",
                            key,
                            escape_html(&scalar_string(value))
                        ));
                    }
                }
            }
        }
        Value::Null => {}
        other => {
            html.push_str(&format!("<li>{}</li>", escape_html(&scalar_string(other))));
        }
    }
    html.push_str("</ul>");
    html
}

/// Full pipeline: raw note content to (metadata HTML, body HTML).
pub fn render(content: &str) -> (String, String) {
    let (front_matter, body) = split_front_matter(content);
    let metadata = match front_matter {
        Some(raw) => parse_metadata(raw),
        None => Value::Null,
    };
    (
        render_metadata(&metadata),
        render_markdown(&link_wikilinks(body)),
    )
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const PAGE_HEAD: &str = r#"<html>
<head>
    <title>Shared Note</title>
    <style>
        body {
            font-family: 'Inter', Arial, sans-serif;
            line-height: 1.6;
            margin: 20px;
            padding: 20px;
            background-color: #f9f9f9;
            color: #333;
        }
        .metadata {
            background-color: #f0f0f0;
            padding: 10px;
            border-radius: 5px;
            margin-bottom: 20px;
        }
        .content h1, .content h2, .content h3 {
            margin-top: 20px;
            margin-bottom: 10px;
            border-bottom: 1px solid #ddd;
            padding-bottom: 5px;
        }
        .content ul, .content ol {
            margin: 10px 0;
            padding-left: 30px;
        }
        .content ul ul, .content ol ol {
            margin: 5px 0;
            padding-left: 30px;
        }
        .content li {
            margin-bottom: 5px;
            line-height: 1.6;
        }
        .content p {
            margin: 10px 0;
        }
        .content a {
            color: #007BFF;
            text-decoration: none;
        }
        .content a:hover {
            text-decoration: underline;
        }
        pre {
            background-color: #f4f4f4;
            padding: 10px;
            border-radius: 5px;
            overflow-x: auto;
        }
        hr {
            border: 0;
            border-top: 1px solid #ddd;
            margin: 20px 0;
        }
    </style>
</head>
<body>
    <h1>Shared Note</h1>
    <div class="metadata">
"#;

const PAGE_MID: &str = r#"
    </div>
    <hr>
    <div class="content">
"#;

const PAGE_TAIL: &str = r#"
    </div>
</body>
</html>
"#;

/// Compose the rendered halves into the full note page.
pub fn page(metadata_html: &str, body_html: &str) -> String {
    let mut out = String::with_capacity(
        PAGE_HEAD.len() + metadata_html.len() + PAGE_MID.len() + body_html.len() + PAGE_TAIL.len(),
    );
    out.push_str(PAGE_HEAD);
    out.push_str(metadata_html);
    out.push_str(PAGE_MID);
    out.push_str(body_html);
    out.push_str(PAGE_TAIL);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_extracts_front_matter_and_body() {
        let (meta, body) = split_front_matter("---\nkey: value\n---\nBody text");
        assert_eq!(meta, Some("key: value"));
        assert_eq!(body, "Body text");
    }

    #[test]
    fn split_without_opening_marker_is_all_body() {
        let (meta, body) = split_front_matter("just a note");
        assert_eq!(meta, None);
        assert_eq!(body, "just a note");
    }

    #[test]
    fn split_with_unclosed_marker_is_all_body() {
        let content = "---\nkey: value\nno closing marker";
        let (meta, body) = split_front_matter(content);
        assert_eq!(meta, None);
        assert_eq!(body, content);
    }

    #[test]
    fn wikilinks_become_inert_anchors() {
        let out = link_wikilinks("See [[foo]] and [[bar baz]].");
        assert_eq!(
            out,
            "See <a href='#'>foo</a> and <a href='#'>bar baz</a>."
        );
        assert!(!out.contains("[["));
        assert!(!out.contains("]]"));
    }

    #[test]
    fn markdown_supports_breaks_tables_and_fences() {
        let html = render_markdown("line one\nline two");
        assert!(html.contains("<br"));

        let html = render_markdown("| a | b |\n| - | - |\n| 1 | 2 |");
        assert!(html.contains("<table>"));

        let html = render_markdown("```\nlet x = 1;\n```");
        assert!(html.contains("<pre><code>"));
    }

    #[test]
    fn metadata_renders_scalars_lists_and_nested_mappings() {
        let value = parse_metadata("author:\n  name: jo\ntags:\n  - one\n  - two\nkey: value");
        let html = render_metadata(&value);
        assert!(html.contains("<li><strong>Key:</strong> value</li>"));
        assert!(html.contains("<strong>Author:</strong><ul>"));
        assert!(html.contains("<li><strong>Name:</strong> jo</li>"));
        assert!(html.contains("<strong>Tags:</strong><ul><li>one</li><li>two</li></ul>"));
    }

    #[test]
    fn malformed_yaml_renders_error_mapping() {
        let value = parse_metadata("key: [unterminated");
        let html = render_metadata(&value);
        assert!(html.contains("<strong>Error:</strong> Failed to parse YAML"));
        assert!(html.contains("<strong>Details:</strong>"));
    }

    #[test]
    fn empty_metadata_renders_empty_list() {
        assert_eq!(render_metadata(&Value::Null), "<ul></ul>");
    }

    #[test]
    fn deeply_nested_metadata_is_truncated_not_overflowed() {
        let mut value = Value::String("leaf".to_string());
        for _ in 0..MAX_METADATA_DEPTH + 8 {
            let mut map = Mapping::new();
            map.insert(Value::String("inner".to_string()), value);
            value = Value::Mapping(map);
        }
        let html = render_metadata(&value);
        assert!(html.contains("…"));
        assert!(!html.contains("leaf"));
    }

    #[test]
    fn full_pipeline_matches_reference_shape() {
        let (metadata_html, body_html) = render("---\nkey: value\n---\nBody [[X]]");
        assert!(metadata_html.contains("<li><strong>Key:</strong> value</li>"));
        assert!(body_html.contains("<a href='#'>X</a>"));
        assert!(!body_html.contains("[["));
        assert!(!body_html.contains("]]"));
    }

    #[test]
    fn page_embeds_both_halves() {
        let html = page("<ul><li>m</li></ul>", "<p>b</p>");
        assert!(html.contains("class=\"metadata\""));
        assert!(html.contains("<ul><li>m</li></ul>"));
        assert!(html.contains("<p>b</p>"));
        // nested lists get the tighter spacing rule
        assert!(html.contains(".content ul ul, .content ol ol"));
    }
}
