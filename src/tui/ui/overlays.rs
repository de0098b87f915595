//! Overlay rendering
//!
//! Help and loading popups drawn above the grid.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::app::{App, LoadState};
use super::super::theme::Theme;
use super::helpers::centered_rect;

fn key_line<'a>(keys: &'a str, description: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {keys:<12}"), Style::default().fg(theme.focus)),
        Span::styled(description, Style::default().fg(theme.text)),
    ])
}

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().fg(theme.heading).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled("Navigation", Style::default().fg(theme.heading).bold())),
        key_line("→ / l / ⏭", "Next item (wraps)", theme),
        key_line("← / h / ⏮", "Previous item (wraps)", theme),
        key_line("↓ / j", "Next row (multi-row grids)", theme),
        key_line("↑ / k", "Previous row (multi-row grids)", theme),
        key_line("Enter", "Select focused item", theme),
        key_line("Click", "Focus a cell", theme),
        Line::from(""),
        Line::from(Span::styled("General", Style::default().fg(theme.heading).bold())),
        key_line("r", "Reload collection", theme),
        key_line("t", "Cycle theme", theme),
        key_line("?", "Toggle help", theme),
        key_line("q / Esc", "Quit", theme),
    ];

    let popup = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.focus))
            .title(Span::styled(" Help ", Style::default().fg(theme.heading).bold()))
            .style(Style::default().bg(theme.background)),
    );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// Small loading box shown while a reload runs over an existing grid
pub fn render_loading_overlay(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let LoadState::Loading(op) = &app.load_state else {
        return;
    };
    let elapsed = Instant::now().saturating_duration_since(op.start_time);

    let width = 30.min(area.width);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height / 2,
        width,
        height: 3,
    }
    .intersection(area);

    let popup = Paragraph::new(format!("Loading… {:.1}s", elapsed.as_secs_f32()))
        .style(Style::default().fg(theme.busy))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.busy))
                .style(Style::default().bg(theme.cell)),
        );

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
