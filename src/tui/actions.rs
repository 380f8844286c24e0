use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::error::Result;
use crate::layout::LineKind;
use crate::widget::{EventResult, WidgetEvent};

use super::app::{App, Drag};
use super::ui::{self, hit};

/// Rows moved by one mouse wheel notch
const WHEEL_ROWS: i64 = 3;

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Any key closes the help popup
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }

    let page = app.host.viewport_height().max(1) as i64;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Carousel
        KeyCode::Char('h') | KeyCode::Left => {
            app.dispatch(WidgetEvent::TapPrevious)?;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.dispatch(WidgetEvent::TapNext)?;
        }

        // Document
        KeyCode::Char('k') | KeyCode::Up => app.host.user_scroll(-1),
        KeyCode::Char('j') | KeyCode::Down => app.host.user_scroll(1),
        KeyCode::PageUp => app.host.user_scroll(-page),
        KeyCode::PageDown => app.host.user_scroll(page),
        KeyCode::Char('g') | KeyCode::Home => app.host.user_scroll_to(0),
        KeyCode::Char('G') | KeyCode::End => {
            let end = app.host.layout().max_scroll();
            app.host.user_scroll_to(end);
        }

        KeyCode::Char('r') => app.reload()?,
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }

    app.pump()
}

/// Handle a mouse event
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    let areas = ui::areas(app.size);
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp if hit(areas.document, column, row) => {
            app.host.user_scroll(-WHEEL_ROWS)
        }
        MouseEventKind::ScrollDown if hit(areas.document, column, row) => {
            app.host.user_scroll(WHEEL_ROWS)
        }

        MouseEventKind::Down(MouseButton::Left) => {
            if hit(areas.arrow_previous, column, row) {
                app.dispatch(WidgetEvent::TapPrevious)?;
            } else if hit(areas.arrow_next, column, row) {
                app.dispatch(WidgetEvent::TapNext)?;
            } else if hit(areas.titles, column, row) {
                app.drag = Some(Drag::Carousel { column });
                app.dispatch(WidgetEvent::CarouselDragStart)?;
            } else if hit(areas.document, column, row) {
                app.drag = Some(Drag::Content { row, moved: false });
                app.host.begin_drag();
            }
        }

        MouseEventKind::Drag(MouseButton::Left) => match app.drag {
            Some(Drag::Carousel { column: last }) => {
                let dx = column as i32 - last as i32;
                if dx != 0 {
                    app.drag = Some(Drag::Carousel { column });
                    app.dispatch(WidgetEvent::CarouselDragMove { dx })?;
                }
            }
            Some(Drag::Content { row: last, .. }) => {
                let dy = row as i32 - last as i32;
                if dy != 0 {
                    app.drag = Some(Drag::Content { row, moved: true });
                    app.host.drag_by(dy);
                }
            }
            None => {}
        },

        MouseEventKind::Up(MouseButton::Left) => match app.drag.take() {
            Some(Drag::Carousel { .. }) => {
                app.dispatch(WidgetEvent::CarouselDragEnd)?;
            }
            Some(Drag::Content { moved: true, .. }) => app.host.end_drag(),
            Some(Drag::Content { moved: false, .. }) => {
                let result = app.dispatch(WidgetEvent::ContentTap)?;
                app.host.end_drag();
                if result == EventResult::PassThrough {
                    click_document(app, row.saturating_sub(areas.document.y));
                }
            }
            None => {}
        },

        _ => {}
    }

    app.pump()
}

/// A plain click on a heading scrolls that section to the top
fn click_document(app: &mut App, row_in_view: u16) {
    let row = app.host.scroll_pos() as usize + row_in_view as usize;
    let Some(line) = app.host.layout().lines().get(row) else {
        return;
    };
    if line.kind != LineKind::Heading {
        return;
    }
    let Some(section) = line.section else {
        return;
    };
    let rows = app.host.layout().heading_rows();
    if let (Some(&top), Some(&first)) = (rows.get(section), rows.first()) {
        app.host.user_scroll_to((top - first) as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tui::app::ContentSource;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::layout::Rect;
    use std::time::{Duration, Instant};

    fn app() -> App {
        App::new(
            Config::default(),
            ContentSource::Demo { alternate: false },
            None,
            Rect::new(0, 0, 80, 24),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn settle(app: &mut App) {
        app.host.tick(Instant::now() + Duration::from_secs(1));
        app.pump().unwrap();
    }

    #[test]
    fn test_arrow_keys_page_sections() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Right)).unwrap();
        handle_key_event(&mut app, key(KeyCode::Char('l'))).unwrap();
        settle(&mut app);
        assert_eq!(app.focused().unwrap().0, "Monitor");

        handle_key_event(&mut app, key(KeyCode::Left)).unwrap();
        settle(&mut app);
        assert_eq!(app.focused().unwrap().0, "Health");
    }

    #[test]
    fn test_previous_wraps_to_last_section() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('h'))).unwrap();
        settle(&mut app);
        assert_eq!(app.focused().unwrap().0, "Config");
    }

    #[test]
    fn test_jump_to_end_selects_near_last_section() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('G'))).unwrap();
        assert_eq!(app.host.scroll_pos(), app.host.layout().max_scroll());
        assert!(app.host.boundary().more_above);
        assert!(!app.host.boundary().more_below);
    }

    #[test]
    fn test_help_popup_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?'))).unwrap();
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!app.show_help);
        assert!(app.running);
        handle_key_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_clicking_next_arrow_taps() {
        let mut app = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 78, 1))
            .unwrap();
        settle(&mut app);
        assert_eq!(app.focused().unwrap().0, "Health");
    }

    #[test]
    fn test_dragging_strip_left_moves_forward() {
        let mut app = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 40, 1))
            .unwrap();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 32, 1))
            .unwrap();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 24, 1))
            .unwrap();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 24, 1)).unwrap();
        settle(&mut app);
        assert_eq!(app.focused().unwrap().0, "Monitor");
    }

    #[test]
    fn test_wheel_scrolls_document() {
        let mut app = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollDown, 10, 10)).unwrap();
        assert_eq!(app.host.scroll_pos(), 3);
        handle_mouse_event(&mut app, mouse(MouseEventKind::ScrollUp, 10, 1)).unwrap();
        assert_eq!(app.host.scroll_pos(), 3);
    }

    #[test]
    fn test_click_on_heading_brings_section_up() {
        let mut app = app();
        let areas = ui::areas(app.size);
        let heading = app.host.heading_row(1).unwrap() as u16;
        let screen_row = areas.document.y + heading - app.host.scroll_pos() as u16;

        handle_mouse_event(
            &mut app,
            mouse(MouseEventKind::Down(MouseButton::Left), 10, screen_row),
        )
        .unwrap();
        handle_mouse_event(
            &mut app,
            mouse(MouseEventKind::Up(MouseButton::Left), 10, screen_row),
        )
        .unwrap();
        assert_eq!(app.focused().unwrap().0, "Health");
    }
}
