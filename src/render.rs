//! Markdown → HTML for generated tutorials.

use pulldown_cmark::{Event, Options, Parser, html};

/// Render tutorial markdown to an HTML fragment.
///
/// Raw HTML in model output is dropped. Malformed markdown still renders;
/// the parser never fails.
#[must_use]
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
