use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::app::App;
use super::widgets::{
    carousel_view::render_carousel, document_view::render_document,
    help_popup::render_help_popup, status_bar::render_status_bar,
};

/// Width of each carousel arrow button
const ARROW_WIDTH: u16 = 3;

/// Screen regions, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub carousel: Rect,
    pub arrow_previous: Rect,
    pub titles: Rect,
    pub arrow_next: Rect,
    pub more_above: Rect,
    pub document: Rect,
    /// Document area without the scrollbar column
    pub document_text: Rect,
    pub more_below: Rect,
    pub status: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Carousel
            Constraint::Length(1), // More above
            Constraint::Min(1),    // Document
            Constraint::Length(1), // More below
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let strip = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ARROW_WIDTH),
            Constraint::Min(1),
            Constraint::Length(ARROW_WIDTH),
        ])
        .split(rows[0]);

    let document = rows[2];
    Areas {
        carousel: rows[0],
        arrow_previous: strip[0],
        titles: strip[1],
        arrow_next: strip[2],
        more_above: rows[1],
        document,
        document_text: Rect {
            width: document.width.saturating_sub(1),
            ..document
        },
        more_below: rows[3],
        status: rows[4],
    }
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = areas(frame.area());

    render_carousel(frame, app, &areas);
    render_indicator(frame, app, areas.more_above, app.host.boundary().more_above, "▲ more above");
    render_document(frame, app, areas.document);
    render_indicator(frame, app, areas.more_below, app.host.boundary().more_below, "▼ more below");
    render_status_bar(frame, app, areas.status);

    if app.show_help {
        render_help_popup(frame, app);
    }
}

fn render_indicator(frame: &mut Frame, app: &App, area: Rect, active: bool, label: &str) {
    let line = if active {
        let padding = " ".repeat((area.width as usize).saturating_sub(label.chars().count()) / 2);
        Line::from(Span::styled(format!("{padding}{label}"), app.theme.indicator_on))
    } else {
        Line::from(Span::styled("─".repeat(area.width as usize), app.theme.indicator_off))
    };
    let style = if active {
        app.theme.indicator_on
    } else {
        app.theme.indicator_off
    };
    frame.render_widget(Paragraph::new(line).style(style), area);
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Whether `(column, row)` lies inside `area`
pub fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
