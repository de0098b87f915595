//! Helper functions for UI rendering

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rect of `percent_x` by `percent_y` centered in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Truncate to `max` characters, ending with an ellipsis when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Short caption for an artwork URL: its file name, or a fallback when missing
pub fn artwork_caption(url: &str) -> &str {
    let url = url.trim();
    if url.is_empty() {
        return "No image";
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
}

/// Horizontal screen span `[left, right)` of a cell at `x` clipped to `area`
pub fn clip_span(x: i64, width: u16, area: Rect) -> Option<(u16, u16)> {
    let left = x.max(i64::from(area.x));
    let right = (x + i64::from(width)).min(i64::from(area.right()));
    if right <= left {
        return None;
    }
    let left = u16::try_from(left).ok()?;
    let right = u16::try_from(right).ok()?;
    Some((left, right - left))
}
