use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::tui::app::App;
use crate::tui::host::TitleCell;
use crate::tui::ui::Areas;

pub fn render_carousel(frame: &mut Frame, app: &App, areas: &Areas) {
    frame.render_widget(Block::default().style(app.theme.carousel), areas.carousel);

    let middle = Rect {
        y: areas.carousel.y + areas.carousel.height / 2,
        height: 1,
        ..areas.carousel
    };
    let arrow = |area: Rect| Rect {
        y: middle.y,
        height: 1,
        ..area
    };
    frame.render_widget(
        Paragraph::new(Span::styled("‹", app.theme.arrow)).alignment(Alignment::Center),
        arrow(areas.arrow_previous),
    );
    frame.render_widget(
        Paragraph::new(Span::styled("›", app.theme.arrow)).alignment(Alignment::Center),
        arrow(areas.arrow_next),
    );

    let titles = app.host.titles();
    let strip = Rect {
        y: middle.y,
        height: 1,
        ..areas.titles
    };
    for (cell, area) in titles.iter().zip(cell_areas(strip, titles)) {
        let label = truncate(&cell.label, area.width.saturating_sub(1) as usize);
        let paragraph = Paragraph::new(Line::from(Span::styled(label, app.theme.title(cell.style))))
            .style(app.theme.carousel)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}

/// Split `strip` among the cells in proportion to their scale
pub(crate) fn cell_areas(strip: Rect, cells: &[TitleCell]) -> Vec<Rect> {
    let total_scale: f32 = cells.iter().map(|c| c.style.scale).sum();
    if cells.is_empty() || total_scale <= 0.0 {
        return Vec::new();
    }

    let mut areas = Vec::with_capacity(cells.len());
    let mut x = strip.x;
    let mut used_scale = 0.0;
    for cell in cells {
        used_scale += cell.style.scale;
        let end = strip.x + (strip.width as f32 * used_scale / total_scale).round() as u16;
        let end = end.min(strip.x + strip.width);
        areas.push(Rect {
            x,
            width: end.saturating_sub(x),
            ..strip
        });
        x = end;
    }
    areas
}

/// Cut `text` to at most `width` columns, ending in an ellipsis when cut
pub(crate) fn truncate(text: &str, width: usize) -> String {
    let full: usize = text.chars().filter_map(|c| c.width()).sum();
    if full <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotator::FALLOFF;

    fn cells() -> Vec<TitleCell> {
        [3, 2, 1, 0, 1, 2, 3]
            .iter()
            .enumerate()
            .map(|(position, &distance)| TitleCell {
                position,
                label: format!("T{position}"),
                style: FALLOFF[distance],
            })
            .collect()
    }

    #[test]
    fn test_cells_fill_strip() {
        let strip = Rect::new(3, 1, 74, 1);
        let areas = cell_areas(strip, &cells());
        assert_eq!(areas.len(), 7);
        assert_eq!(areas[0].x, 3);
        let last = areas[6];
        assert_eq!(last.x + last.width, 77);
        assert!(areas.windows(2).all(|w| w[0].x + w[0].width == w[1].x));
    }

    #[test]
    fn test_focused_cell_is_widest() {
        let areas = cell_areas(Rect::new(0, 0, 80, 1), &cells());
        let widest = areas.iter().map(|a| a.width).max().unwrap();
        assert_eq!(areas[3].width, widest);
        assert!(areas[3].width > areas[0].width);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Summary", 10), "Summary");
        assert_eq!(truncate("Interfaces", 6), "Inter…");
        assert_eq!(truncate("Interfaces", 0), "");
    }
}
