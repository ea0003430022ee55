//! Markdown for model replies: GFM extensions on, raw HTML shown as text,
//! output sanitised before it reaches a page.

use pulldown_cmark::{Event, Options, Parser, html};
use std::collections::HashMap;
use tera::Value;

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render `text` to sanitised HTML.
pub fn render_markdown(text: &str) -> String {
    let events = Parser::new_ext(text, options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut rendered = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut rendered, events);
    ammonia::clean(&rendered)
}

/// Tera filter form of [`render_markdown`]. Pair with `| safe`.
pub(super) fn markdown_filter(
    value: &Value,
    _args: &HashMap<String, Value>,
) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("markdown filter expects a string"))?;
    Ok(Value::String(render_markdown(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_and_lists() {
        let html = render_markdown("**bold** and *it*\n\n- one\n- two");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>it</em>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn gfm_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>2</td>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn raw_html_is_shown_as_text() {
        let html = render_markdown("before <script>alert(1)</script> after");
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn script_links_are_dropped() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(html.contains("click"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn code_blocks_are_escaped() {
        let html = render_markdown("```\nif a < b {}\n```");
        assert!(html.contains("<pre><code>"));
        assert!(html.contains("if a &lt; b {}"));
    }

    #[test]
    fn filter_rejects_non_strings() {
        let args = HashMap::new();
        assert!(markdown_filter(&Value::from(3), &args).is_err());
        assert_eq!(
            markdown_filter(&Value::from("*x*"), &args).unwrap(),
            Value::from("<p><em>x</em></p>\n")
        );
    }
}
