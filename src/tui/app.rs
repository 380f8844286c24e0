use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::Config;
use crate::content::Document;
use crate::demo;
use crate::error::Result;
use crate::registry::{ContainerId, Registry};
use crate::widget::{EventResult, WidgetEvent};

use super::host::TerminalHost;
use super::theme::TuiTheme;
use super::ui;

/// Container the TUI mounts its single carousel in
pub const CONTAINER: &str = "main";

/// Feedback from the host can trigger more feedback; stop after this many rounds
const MAX_PUMP_ROUNDS: usize = 16;

/// Where the document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    File(PathBuf),
    /// Built-in sample; `alternate` picks the second document
    Demo { alternate: bool },
}

impl ContentSource {
    pub fn load(&self) -> Result<Document> {
        let markup = match self {
            ContentSource::File(path) => fs::read_to_string(path)?,
            ContentSource::Demo { alternate: false } => demo::sample_markup(),
            ContentSource::Demo { alternate: true } => demo::alternate_markup(),
        };
        Ok(Document::parse(&markup))
    }

    /// Source used by a reload: files are re-read, the demo flips documents
    fn reloaded(&self) -> Self {
        match self {
            ContentSource::File(path) => ContentSource::File(path.clone()),
            ContentSource::Demo { alternate } => ContentSource::Demo {
                alternate: !alternate,
            },
        }
    }

    pub fn name(&self) -> String {
        match self {
            ContentSource::File(path) => path.display().to_string(),
            ContentSource::Demo { alternate: false } => "sample report".to_string(),
            ContentSource::Demo { alternate: true } => "sample story".to_string(),
        }
    }
}

/// Pointer gesture in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drag {
    /// Horizontal drag on the carousel strip, last column seen
    Carousel { column: u16 },
    /// Vertical drag on the document, last row seen
    Content { row: u16, moved: bool },
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Error,
    Info,
}

/// Main application state
pub struct App {
    /// Widget instances; the TUI mounts one
    pub registry: Registry,
    /// Terminal side of the widget
    pub host: TerminalHost,
    pub container: ContainerId,
    pub source: ContentSource,
    /// Caller-supplied carousel labels
    pub labels: Option<Vec<String>>,
    pub show_help: bool,
    pub status_message: Option<StatusMessage>,
    /// Application running flag
    pub running: bool,
    pub theme: TuiTheme,
    pub config: Config,
    /// Full terminal area
    pub size: Rect,
    pub drag: Option<Drag>,
}

impl App {
    pub fn new(
        config: Config,
        source: ContentSource,
        labels: Option<Vec<String>>,
        size: Rect,
    ) -> Result<Self> {
        let theme = TuiTheme::from(&config.theme.resolve());
        let document_area = ui::areas(size).document_text;
        let mut host = TerminalHost::new(document_area.width, document_area.height);
        let mut registry = Registry::new(config.widget.clone());
        let container = ContainerId::from(CONTAINER);

        let document = source.load()?;
        registry.create(
            container.clone(),
            &document,
            labels.as_deref(),
            None,
            &mut host,
        )?;

        let mut app = Self {
            registry,
            host,
            container,
            source,
            labels,
            show_help: false,
            status_message: None,
            running: true,
            theme,
            config,
            size,
            drag: None,
        };
        app.pump()?;
        Ok(app)
    }

    /// Deliver an input to the carousel, then any feedback it caused
    pub fn dispatch(&mut self, event: WidgetEvent) -> Result<EventResult> {
        let result = self
            .registry
            .dispatch(&self.container, event, &mut self.host)?;
        self.pump()?;
        Ok(result)
    }

    /// Deliver events the host queued (scrolls, settled animations, timers)
    pub fn pump(&mut self) -> Result<()> {
        for _ in 0..MAX_PUMP_ROUNDS {
            let events = self.host.take_events();
            if events.is_empty() {
                return Ok(());
            }
            for event in events {
                self.registry
                    .dispatch(&self.container, event, &mut self.host)?;
            }
        }
        tracing::warn!("host feedback did not settle");
        Ok(())
    }

    pub fn tick(&mut self) -> Result<()> {
        self.host.tick(Instant::now());
        self.pump()?;

        if let Some(ref msg) = self.status_message {
            if Instant::now() >= msg.expires_at {
                self.status_message = None;
            }
        }
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.size = Rect::new(0, 0, width, height);
        let area = ui::areas(self.size).document_text;
        if self.host.set_viewport(area.width, area.height) {
            self.registry.relayout(&self.container, &mut self.host)?;
        }
        self.pump()
    }

    /// Re-read the content file, or switch to the other built-in document
    pub fn reload(&mut self) -> Result<()> {
        let source = self.source.reloaded();
        let document = match source.load() {
            Ok(document) => document,
            Err(err) => {
                self.set_status(format!("Reload failed: {err}"), StatusKind::Error);
                return Ok(());
            }
        };

        let labels = match source {
            ContentSource::File(_) => self.labels.as_deref(),
            ContentSource::Demo { .. } => None,
        };
        match self
            .registry
            .change_content(&self.container, &document, labels, &mut self.host)
        {
            Ok(()) => {
                self.set_status(format!("Loaded {}", source.name()), StatusKind::Info);
                self.source = source;
            }
            Err(err) => self.set_status(format!("Reload failed: {err}"), StatusKind::Error),
        }
        self.pump()
    }

    pub fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text,
            kind,
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    /// Label of the focused title and its 1-based section number
    pub fn focused(&self) -> Option<(String, usize, usize)> {
        let state = self.registry.get(&self.container)?.state();
        let table = state.table();
        let label = table.label(state.selected())?.to_string();
        Some((
            label,
            table.section_of(state.selected()) + 1,
            table.section_count(),
        ))
    }

    pub fn is_guarded(&self) -> bool {
        self.registry
            .get(&self.container)
            .is_some_and(|widget| widget.state().is_guarded())
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_app() -> App {
        App::new(
            Config::default(),
            ContentSource::Demo { alternate: false },
            None,
            Rect::new(0, 0, 80, 24),
        )
        .unwrap()
    }

    #[test]
    fn test_starts_on_first_section() {
        let app = demo_app();
        let (label, section, count) = app.focused().unwrap();
        assert_eq!(label, "Summary");
        assert_eq!((section, count), (1, 8));
        assert_eq!(app.host.selected_section(), Some(0));
        assert!(!app.is_guarded());
    }

    #[test]
    fn test_tap_next_scrolls_after_animation() {
        let mut app = demo_app();
        app.dispatch(WidgetEvent::TapNext).unwrap();
        assert!(app.is_guarded());
        assert_eq!(app.focused().unwrap().0, "Health");

        app.host.tick(Instant::now() + Duration::from_secs(1));
        app.pump().unwrap();
        assert!(!app.is_guarded());
        // Offsets are measured from the first heading
        let expected = app.host.heading_row(1).unwrap() - app.host.heading_row(0).unwrap();
        assert_eq!(app.host.scroll_pos() as usize, expected);
    }

    #[test]
    fn test_user_scroll_moves_carousel() {
        let mut app = demo_app();
        let row = app.host.heading_row(3).unwrap() as u32;
        app.host.user_scroll_to(row);
        app.pump().unwrap();
        assert_eq!(app.focused().unwrap().0, "Contacts");
        assert_eq!(app.host.selected_section(), Some(3));
    }

    #[test]
    fn test_reload_swaps_demo_document() {
        let mut app = demo_app();
        app.reload().unwrap();
        assert_eq!(app.source, ContentSource::Demo { alternate: true });
        let (label, _, count) = app.focused().unwrap();
        assert_eq!((label.as_str(), count), ("Flopsy", 4));
    }

    #[test]
    fn test_missing_file_reports_error_on_reload() {
        let mut app = demo_app();
        app.source = ContentSource::File(PathBuf::from("/nonexistent/carouscroll.txt"));
        app.reload().unwrap();
        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.kind, StatusKind::Error);
        assert_eq!(app.focused().unwrap().0, "Summary");
    }

    #[test]
    fn test_resize_keeps_selection() {
        let mut app = demo_app();
        app.dispatch(WidgetEvent::TapNext).unwrap();
        app.dispatch(WidgetEvent::TapNext).unwrap();
        app.resize(60, 30).unwrap();
        app.host.tick(Instant::now() + Duration::from_secs(1));
        app.pump().unwrap();
        assert_eq!(app.focused().unwrap().0, "Monitor");
    }
}
