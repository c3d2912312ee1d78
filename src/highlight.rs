use ratatui::style::Style;
use ratatui::text::Span;
use regex::{Regex, RegexBuilder};

/// Case-insensitive matcher for the list filter. `None` when there is
/// nothing to highlight.
pub fn filter_regex(filter: &str) -> Option<Regex> {
    if filter.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(filter))
        .case_insensitive(true)
        .build()
        .ok()
}

pub fn highlight_matches(
    text: &str,
    regex: Option<&Regex>,
    highlight_style: Style,
    base_style: Style,
) -> Vec<Span<'static>> {
    let Some(regex) = regex else {
        return vec![Span::styled(text.to_string(), base_style)];
    };
    let mut spans = Vec::new();
    let mut last = 0;
    for m in regex.find_iter(text) {
        if m.start() > last {
            spans.push(Span::styled(text[last..m.start()].to_string(), base_style));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last = m.end();
    }
    if last < text.len() || spans.is_empty() {
        spans.push(Span::styled(text[last..].to_string(), base_style));
    }
    spans
}
