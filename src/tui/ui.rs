//! UI rendering for the TUI

mod helpers;
mod overlays;

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Wrap,
    },
};

use super::app::{App, LoadState};
use super::theme::Theme;
use super::view::{CellView, GridView, RowView, StatusView, StripView};
use helpers::{artwork_caption, clip_span, truncate};

/// Columns left blank before the focused cell
const STRIP_PADDING: u16 = 1;

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = app.theme_variant.theme();
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, &theme, chunks[0]);
    render_body(frame, app, &theme, chunks[1]);
    render_footer(frame, app, &theme, chunks[2]);

    if app.is_loading() && !app.items.is_empty() {
        overlays::render_loading_overlay(frame, app, &theme, area);
    }

    if app.show_help() {
        overlays::render_help_overlay(frame, &theme, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::styled(
        " Content list ",
        Style::default().fg(theme.heading).bold(),
    )];
    if !app.items.is_empty() {
        spans.push(Span::styled(
            format!("{} items", app.items.len()),
            Style::default().fg(theme.muted),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.outline)),
    );
    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    app.cell_areas.clear();

    if app.items.is_empty() && app.is_loading() {
        render_status(frame, "Loading…", theme.busy, area);
        return;
    }

    match app.view() {
        GridView::Empty(status) => render_empty_state(frame, app, &status, theme, area),
        GridView::Grid { label, rows, .. } => {
            let border_color = if app.grid.is_focused() {
                theme.focus
            } else {
                theme.outline
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(Span::styled(format!(" {label} "), Style::default().fg(theme.text)));
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let row_height = row_height(app);
            let mut constraints: Vec<Constraint> =
                rows.iter().map(|_| Constraint::Length(row_height)).collect();
            constraints.push(Constraint::Min(0));
            let row_areas = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(inner);

            let now = Instant::now();
            for (row, row_area) in rows.iter().zip(row_areas.iter()) {
                match &row.list {
                    RowView::Strip(strip) => render_strip(frame, app, strip, theme, *row_area, now),
                    RowView::Empty(status) => {
                        render_status(frame, status.message, theme.muted, *row_area);
                    }
                }
            }
        }
    }
}

/// Cell height plus the scrollbar line
fn row_height(app: &App) -> u16 {
    let height = app.grid.settings().item_height.saturating_add(1);
    u16::try_from(height).unwrap_or(u16::MAX)
}

fn render_empty_state(frame: &mut Frame, app: &App, status: &StatusView, theme: &Theme, area: Rect) {
    let color = match app.load_state {
        LoadState::Failed(_) => theme.failure,
        _ => theme.muted,
    };
    render_status(frame, status.message, color, area);
}

fn render_status(frame: &mut Frame, message: &str, color: ratatui::style::Color, area: Rect) {
    let y = area.y + area.height / 2;
    let line_area = Rect { y, height: 1, ..area }.intersection(area);
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, line_area);
}

fn render_strip(
    frame: &mut Frame,
    app: &mut App,
    strip: &StripView,
    theme: &Theme,
    area: Rect,
    now: Instant,
) {
    let settings = app.grid.settings();
    let stride = settings.stride();
    let cell_width = u16::try_from(settings.item_width).unwrap_or(u16::MAX);
    let cell_height = u16::try_from(settings.item_height)
        .unwrap_or(u16::MAX)
        .min(area.height);

    let row = strip.row.unwrap_or(0);
    let offset = app.strip_offset_at(row, now);
    let origin = i64::from(area.x) + i64::from(STRIP_PADDING) + offset;
    let row_focused = strip.row.is_none_or(|r| r == app.store.focused_row());

    for cell in &strip.cells {
        let x = origin + cell_x(cell.index, stride);
        let Some((left, width)) = clip_span(x, cell_width, area) else {
            continue;
        };
        let cell_area = Rect::new(left, area.y, width, cell_height);
        render_cell(frame, cell, theme, cell_area, row_focused);
        app.cell_areas.push((cell_area, cell.id.clone()));
    }

    if area.height > cell_height {
        let bar_area = Rect {
            y: area.y + cell_height,
            height: 1,
            ..area
        };
        let position = usize::try_from(-offset).unwrap_or(0);
        let mut scrollbar_state = ScrollbarState::new(strip.content_width(stride))
            .position(position)
            .viewport_content_length(usize::from(area.width));
        let scrollbar = Scrollbar::new(ScrollbarOrientation::HorizontalBottom)
            .begin_symbol(None)
            .end_symbol(None)
            .track_symbol(Some("─"))
            .thumb_symbol("━")
            .style(Style::default().fg(theme.outline));
        frame.render_stateful_widget(scrollbar, bar_area, &mut scrollbar_state);
    }
}

fn cell_x(index: usize, stride: usize) -> i64 {
    i64::try_from(index.saturating_mul(stride)).unwrap_or(i64::MAX / 2)
}

fn render_cell(frame: &mut Frame, cell: &CellView, theme: &Theme, area: Rect, row_focused: bool) {
    let (border_type, border_color) = if cell.focused {
        (BorderType::Thick, theme.focus)
    } else {
        (BorderType::Rounded, theme.outline)
    };
    let mut style = Style::default().bg(theme.cell);
    if !row_focused {
        style = style.add_modifier(Modifier::DIM);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let width = usize::from(inner.width);
    let artwork = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("▚▞▚▞", Style::default().fg(theme.muted))),
        Line::from(Span::styled(
            truncate(artwork_caption(&cell.artwork), width),
            Style::default().fg(theme.muted).italic(),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(artwork, parts[0]);

    let title_style = if cell.focused {
        Style::default().fg(theme.focus).bold()
    } else {
        Style::default().fg(theme.text)
    };
    let title = Paragraph::new(Span::styled(cell.title.clone(), title_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(title, parts[1]);
}

fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let mut spans = Vec::new();

    if !app.items.is_empty() {
        spans.push(Span::styled(
            format!(
                " row {}/{} · item {}/{} ",
                app.store.focused_row() + 1,
                app.grid.rows(),
                app.store.focused_index() + 1,
                app.items.len()
            ),
            Style::default().fg(theme.focus),
        ));
    }

    match &app.status_message {
        Some(status) => {
            let color = if status.is_error {
                theme.failure
            } else {
                theme.text
            };
            spans.push(Span::styled(format!(" {} ", status.text), Style::default().fg(color)));
        }
        None => spans.push(Span::styled(
            " ←/→ move  ↑/↓ row  Enter select  ? help  q quit",
            Style::default().fg(theme.muted),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
