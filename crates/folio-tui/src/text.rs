//! Text measuring and wrapping for styled ratatui lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Wrap plain text to `width` cells.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

/// Wrap every line to `width` cells, keeping span styles and alignment.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if line.width() <= width {
        return vec![line];
    }

    let styled: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();
    let plain: String = styled.iter().map(|(ch, _)| *ch).collect();

    // textwrap drops the whitespace it breaks on, so walk the source
    // characters alongside each row to recover their styles.
    let mut cursor = 0;
    let mut result = Vec::new();
    for row in textwrap::wrap(&plain, width) {
        while cursor < styled.len()
            && styled[cursor].0.is_whitespace()
            && !row.starts_with(styled[cursor].0)
        {
            cursor += 1;
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        for ch in row.chars() {
            let style = styled.get(cursor).map_or(Style::default(), |&(_, s)| s);
            cursor += 1;
            match spans.last_mut() {
                Some(last) if last.style == style => last.content.to_mut().push(ch),
                _ => spans.push(Span::styled(ch.to_string(), style)),
            }
        }

        let mut wrapped = Line::from(spans).style(line.style);
        wrapped.alignment = line.alignment;
        result.push(wrapped);
    }

    if result.is_empty() {
        result.push(Line::from(""));
    }
    result
}
