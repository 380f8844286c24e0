use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

const BINDINGS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Carousel",
        &[
            ("←/h     ", "Previous section"),
            ("→/l     ", "Next section"),
            ("drag    ", "Spin the title strip"),
            ("click ‹›", "Previous / next section"),
        ],
    ),
    (
        "Document",
        &[
            ("↑/k ↓/j ", "Scroll one line"),
            ("PgUp/Dn ", "Scroll one page"),
            ("g/G     ", "Go to top / bottom"),
            ("wheel   ", "Scroll"),
            ("drag    ", "Fling the document"),
        ],
    ),
    (
        "Other",
        &[
            ("r       ", "Reload content"),
            ("?       ", "Toggle this help"),
            ("q/Esc   ", "Quit"),
        ],
    ),
];

pub fn render_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(46, 20, frame.area());

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(Color::Black));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = app.theme.muted;
    let section_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut text = Vec::new();
    for (section, bindings) in BINDINGS {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(format!("  {section}"), section_style)));
        for (key, desc) in bindings {
            text.push(Line::from(vec![
                Span::styled(format!("    {key}  "), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled("      Press any key to close", desc_style)));

    frame.render_widget(Clear, area);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text), inner);
}
