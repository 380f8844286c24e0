use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind};

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Status message replaces the position summary while it lasts
    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    if let Some(ref msg) = app.status_message {
        let style = match msg.kind {
            StatusKind::Error => app.theme.error,
            StatusKind::Info => app.theme.info,
        };
        spans.push(Span::styled(msg.text.as_str(), style));
    } else if let Some((label, section, count)) = app.focused() {
        spans.push(Span::styled(label, app.theme.heading));
        spans.push(Span::styled(
            format!(" {section}/{count}"),
            app.theme.muted,
        ));
        if app.is_guarded() {
            spans.push(Span::styled(" · scrolling", app.theme.muted));
        }
    }

    let keybindings = [
        ("←/→", "Page"),
        ("↑/↓", "Scroll"),
        ("r", "Reload"),
        ("?", "Help"),
        ("q", "Quit"),
    ];
    spans.push(Span::styled("   ", app.theme.muted));
    for (i, (key, desc)) in keybindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", app.theme.muted));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            app.theme.muted.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), app.theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
