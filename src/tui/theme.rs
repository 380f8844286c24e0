use ratatui::style::{Color, Modifier, Style};

use crate::config::{Rgb, ThemeColors};
use crate::rotator::SlotStyle;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// TUI theme with ratatui styles
#[derive(Debug, Clone)]
pub struct TuiTheme {
    colors: ThemeColors,
    pub carousel: Style,
    pub arrow: Style,
    pub heading: Style,
    pub selected_heading: Style,
    pub body: Style,
    pub indicator_on: Style,
    pub indicator_off: Style,
    pub muted: Style,
    pub info: Style,
    pub error: Style,
    pub border: Style,
}

impl TuiTheme {
    /// Style for a carousel title. Faded titles blend toward the strip color.
    pub fn title(&self, style: SlotStyle) -> Style {
        let fg = self.colors.highlight.blend(self.colors.accent, style.opacity);
        let mut title = Style::default().fg(color(fg)).bg(color(self.colors.accent));
        if style.weight >= 800 {
            title = title.add_modifier(Modifier::BOLD);
        }
        title
    }
}

impl From<&ThemeColors> for TuiTheme {
    fn from(colors: &ThemeColors) -> Self {
        let accent = color(colors.accent);
        Self {
            colors: colors.clone(),
            carousel: Style::default().bg(accent),
            arrow: Style::default()
                .fg(color(colors.accent_text))
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            heading: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            selected_heading: Style::default()
                .fg(color(colors.highlight))
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            body: Style::default(),
            indicator_on: Style::default()
                .fg(color(colors.highlight))
                .bg(color(colors.indicator)),
            indicator_off: Style::default().fg(color(colors.muted)),
            muted: Style::default().fg(color(colors.muted)),
            info: Style::default().fg(color(colors.indicator)),
            error: Style::default().fg(Color::Rgb(230, 90, 90)),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
        }
    }
}
