use ratatui::{prelude::*, widgets::*};

/// Renders the view tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .divider("|")
}

/// Border style for a field, highlighted when it holds focus
pub fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

/// Pretty-print a JSON body for display; anything else is returned unchanged
pub fn pretty_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

/// Simple JSON syntax highlighting, one `Line` per input line
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_json_line).collect()
}

fn highlight_json_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        let (len, style) = match c {
            '"' => {
                let len = string_literal_len(rest);
                let is_key = rest[len..].trim_start().starts_with(':');
                let color = if is_key { Color::Cyan } else { Color::Green };
                (len, Style::default().fg(color))
            }
            '{' | '}' | '[' | ']' => (1, Style::default().fg(Color::Yellow)),
            '-' | '0'..='9' => {
                let len = rest
                    .find(|ch: char| !(ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E')))
                    .unwrap_or(rest.len());
                (len, Style::default().fg(Color::Yellow))
            }
            _ => {
                if let Some(word) = ["true", "false", "null"].iter().find(|w| rest.starts_with(**w)) {
                    (word.len(), Style::default().fg(Color::Magenta))
                } else {
                    (c.len_utf8(), Style::default())
                }
            }
        };

        spans.push(Span::styled(rest[..len].to_string(), style));
        rest = &rest[len..];
    }

    Line::from(spans)
}

/// Byte length of the string literal at the start of `s`, quotes included.
/// An unterminated literal runs to the end of the line.
fn string_literal_len(s: &str) -> usize {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return i + 1,
            _ => escaped = false,
        }
    }
    s.len()
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        "HEAD" => Color::Magenta,
        _ => Color::White,
    }
}

/// Terminal column of a text cursor inside a bordered field, clamped to the border
pub fn cursor_x(area: Rect, column: usize) -> u16 {
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let column = u16::try_from(column).unwrap_or(u16::MAX);
    area.x.saturating_add(column).saturating_add(1).min(max_x)
}
