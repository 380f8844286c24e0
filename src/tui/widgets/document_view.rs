use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::layout::{LaidLine, LineKind, SIDE_PADDING};
use crate::tui::app::App;
use crate::tui::theme::TuiTheme;

pub fn render_document(frame: &mut Frame, app: &App, area: Rect) {
    let layout = app.host.layout();
    let scroll = app.host.scroll_pos() as usize;
    let selected = app.host.selected_section();

    let lines: Vec<Line> = layout
        .lines()
        .iter()
        .skip(scroll)
        .take(area.height as usize)
        .map(|line| render_line(line, selected, &app.theme))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    if layout.height() > area.height as usize {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        let mut scrollbar_state = ScrollbarState::new(layout.max_scroll() as usize + 1)
            .position(scroll)
            .viewport_content_length(area.height as usize);
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn render_line<'a>(line: &'a LaidLine, selected: Option<usize>, theme: &TuiTheme) -> Line<'a> {
    let indent = Span::raw(" ".repeat(SIDE_PADDING));
    match line.kind {
        LineKind::Heading if line.section.is_some() && line.section == selected => Line::from(vec![
            indent,
            Span::styled(format!(" {} ", line.text), theme.selected_heading),
        ]),
        LineKind::Heading => Line::from(vec![
            indent,
            Span::styled(format!(" {} ", line.text), theme.heading),
        ]),
        LineKind::Body => Line::from(vec![indent, Span::styled(line.text.as_str(), theme.body)]),
        LineKind::Spacer => Line::from(""),
    }
}
