//! One carousel/scroll widget instance and the host it drives.
//!
//! The widget never touches a screen directly. Everything visible (loading
//! content, scrolling, painting titles, gesture momentum) goes through a
//! [`WidgetHost`], so the same state machine runs in the terminal and in
//! tests.

use std::time::Duration;

use crate::boundary::Boundary;
use crate::config::{GuardRelease, WidgetOptions};
use crate::content::Document;
use crate::error::{CarouscrollError, Result};
use crate::geometry::{self, Measurements, TitleTable};
use crate::rotator::{Rotation, SlotStyle};
use crate::state::{CarouselState, ScrollMode, ScrollTicket};
use crate::sync::{sync_to_scroll, SyncOutcome};

/// Environment a widget renders into
pub trait WidgetHost {
    /// Fill the container with `document` and report its layout
    fn load_content(&mut self, document: &Document) -> Measurements;

    /// Re-measure the content already loaded
    fn measure(&mut self) -> Measurements;

    /// Scroll the document to `offset`. Under
    /// [`GuardRelease::AnimationComplete`] the host must answer with
    /// [`WidgetEvent::ScrollSettled`] carrying `ticket`.
    fn scroll_to(&mut self, offset: u32, duration: Duration, ticket: ScrollTicket);

    /// Deliver [`WidgetEvent::GuardTimer`] with `ticket` after `delay`
    fn schedule_guard_release(&mut self, delay: Duration, ticket: ScrollTicket);

    fn show_titles(&mut self, rotation: &Rotation, table: &TitleTable, transition: Duration);

    /// Mark the heading of `section` as selected
    fn select_section(&mut self, section: usize);

    fn show_boundary(&mut self, boundary: Boundary);

    /// Current content gesture velocity `(vx, vy)`
    fn gesture_velocity(&self) -> (f64, f64);

    /// Halt any gesture-driven momentum scrolling
    fn stop_gesture_scroll(&mut self);

    fn has_style_marker(&self) -> bool;

    fn install_styles(&mut self, tiers: &[SlotStyle]);

    /// Empty the container
    fn clear(&mut self);
}

/// Input delivered to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    TapPrevious,
    TapNext,
    CarouselDragStart,
    CarouselDragMove { dx: i32 },
    CarouselDragEnd,
    /// Native scroll of the document
    Scroll(u32),
    /// A scroll-to animation finished
    ScrollSettled(ScrollTicket),
    /// A guard release timer fired
    GuardTimer(ScrollTicket),
    /// The content drag gesture came to rest
    DragStopped,
    ContentTap,
}

/// Whether the host should continue default handling of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    PassThrough,
}

#[derive(Debug)]
pub struct Widget {
    state: CarouselState,
    options: WidgetOptions,
    carousel_drag: Option<i32>,
}

fn build_state(
    document: &Document,
    labels: Option<&[String]>,
    measurements: &Measurements,
    visible_slots: usize,
) -> Result<CarouselState> {
    let geometry = geometry::resolve(measurements)?;
    let labels = geometry::resolve_labels(document.headings(), labels);
    CarouselState::new(&labels, &geometry, visible_slots)
}

fn validate(document: &Document) -> Result<()> {
    if document.is_empty() {
        return Err(CarouscrollError::NoContent);
    }
    if document.heading_count() == 0 {
        return Err(CarouscrollError::NoSections);
    }
    Ok(())
}

impl Widget {
    /// Load `document` into the host and focus the first title
    pub fn create<H: WidgetHost>(
        document: &Document,
        labels: Option<&[String]>,
        options: WidgetOptions,
        host: &mut H,
    ) -> Result<Self> {
        validate(document)?;
        let measurements = host.load_content(document);
        let state = build_state(document, labels, &measurements, options.visible_slots)?;

        let mut widget = Self {
            state,
            options,
            carousel_drag: None,
        };
        widget.rotate(0, ScrollMode::Follow, host);
        Ok(widget)
    }

    /// Replace the content and reset the carousel to the first title.
    ///
    /// Invalid content is rejected before the host is touched.
    pub fn change_content<H: WidgetHost>(
        &mut self,
        document: &Document,
        labels: Option<&[String]>,
        host: &mut H,
    ) -> Result<()> {
        validate(document)?;
        let measurements = host.load_content(document);
        self.state = build_state(document, labels, &measurements, self.options.visible_slots)?;
        self.carousel_drag = None;
        self.rotate(0, ScrollMode::Follow, host);
        Ok(())
    }

    /// Re-resolve geometry after the host's viewport changed size
    pub fn relayout<H: WidgetHost>(&mut self, host: &mut H) -> Result<()> {
        let geometry = geometry::resolve(&host.measure())?;
        self.state.relayout(&geometry)?;
        self.rotate(0, ScrollMode::Follow, host);
        Ok(())
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn handle<H: WidgetHost>(&mut self, event: WidgetEvent, host: &mut H) -> EventResult {
        match event {
            WidgetEvent::TapPrevious => self.rotate(-1, ScrollMode::Follow, host),
            WidgetEvent::TapNext => self.rotate(1, ScrollMode::Follow, host),
            WidgetEvent::CarouselDragStart => self.carousel_drag = Some(0),
            WidgetEvent::CarouselDragMove { dx } => {
                if let Some(total) = self.carousel_drag.as_mut() {
                    *total += dx;
                }
            }
            WidgetEvent::CarouselDragEnd => {
                if let Some(total) = self.carousel_drag.take() {
                    let steps = self.drag_steps(total);
                    if steps != 0 {
                        self.rotate(steps, ScrollMode::Follow, host);
                    }
                }
            }
            WidgetEvent::Scroll(pos) => self.sync(pos, host),
            WidgetEvent::ScrollSettled(ticket) => {
                if self.options.guard_release == GuardRelease::AnimationComplete {
                    self.release(ticket, host);
                }
            }
            WidgetEvent::GuardTimer(ticket) => {
                if matches!(self.options.guard_release, GuardRelease::Delay { .. }) {
                    self.release(ticket, host);
                }
            }
            WidgetEvent::DragStopped => {
                self.state.clear_guard();
                self.sync(self.state.scroll_pos(), host);
            }
            WidgetEvent::ContentTap => {
                let (vx, vy) = host.gesture_velocity();
                host.stop_gesture_scroll();
                // Slow enough to be a deliberate click on the content
                if vx.abs() + vy.abs() < self.options.stop_velocity {
                    return EventResult::PassThrough;
                }
            }
        }
        EventResult::Consumed
    }

    /// Titles to rotate for a horizontal drag; dragging left moves forward.
    fn drag_steps(&self, dx: i32) -> i64 {
        let step = self.options.carousel_drag_step.max(1) as f64;
        -(dx as f64 / step).round() as i64
    }

    fn transition(&self, delta: i64) -> Duration {
        if delta == 0 {
            Duration::ZERO
        } else {
            self.options.animation()
        }
    }

    fn rotate<H: WidgetHost>(&mut self, delta: i64, mode: ScrollMode, host: &mut H) {
        let advance = self.state.advance(delta, mode);
        host.show_titles(&advance.rotation, self.state.table(), self.transition(delta));
        if let Some(section) = advance.section {
            host.select_section(section);
        }

        if let Some(request) = advance.scroll {
            let duration = if request.animate {
                self.options.animation()
            } else {
                Duration::ZERO
            };
            host.scroll_to(request.offset, duration, request.ticket);
            if let GuardRelease::Delay { ms } = self.options.guard_release {
                host.schedule_guard_release(Duration::from_millis(ms), request.ticket);
            }
            host.show_boundary(self.state.boundary_at(request.offset));
        }
    }

    fn sync<H: WidgetHost>(&mut self, scroll_pos: u32, host: &mut H) {
        match sync_to_scroll(&mut self.state, scroll_pos) {
            SyncOutcome::Guarded => {}
            SyncOutcome::Unchanged => host.show_boundary(self.state.boundary()),
            SyncOutcome::Rotated { rotation, section } => {
                host.show_boundary(self.state.boundary());
                host.show_titles(&rotation, self.state.table(), self.transition(rotation.delta));
                if let Some(section) = section {
                    host.select_section(section);
                }
            }
        }
    }

    fn release<H: WidgetHost>(&mut self, ticket: ScrollTicket, host: &mut H) {
        if self.state.release_guard(ticket) {
            tracing::debug!(pos = self.state.scroll_pos(), "self-scroll guard released");
            host.show_boundary(self.state.boundary());
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{scenario_document, RecordingHost};
    use super::*;

    fn create(options: WidgetOptions) -> (Widget, RecordingHost) {
        let mut host = RecordingHost::scenario();
        let widget = Widget::create(&scenario_document(), None, options, &mut host).unwrap();
        (widget, host)
    }

    /// Finish the pending scroll-to the way a host would
    fn settle(widget: &mut Widget, host: &mut RecordingHost) {
        let (offset, _, ticket) = host.last_scroll().unwrap();
        widget.handle(WidgetEvent::Scroll(offset), host);
        widget.handle(WidgetEvent::ScrollSettled(ticket), host);
    }

    #[test]
    fn test_create_focuses_first_title_without_animation() {
        let (widget, host) = create(WidgetOptions::default());
        assert_eq!(widget.state().table().len(), 8);
        assert_eq!(widget.state().selected(), 0);
        assert_eq!(host.focused, vec![Some(0)]);
        assert_eq!(host.sections, vec![0]);
        let (offset, duration, _) = host.last_scroll().unwrap();
        assert_eq!(offset, 0);
        assert_eq!(duration, Duration::ZERO);
    }

    #[test]
    fn test_tap_next_scrolls_to_next_section() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        settle(&mut widget, &mut host);

        widget.handle(WidgetEvent::TapNext, &mut host);
        assert_eq!(widget.state().selected(), 1);
        let (offset, duration, _) = host.last_scroll().unwrap();
        assert_eq!(offset, 100);
        assert_eq!(duration, Duration::from_millis(200));
        assert_eq!(host.sections.last(), Some(&1));
    }

    #[test]
    fn test_tap_previous_wraps_to_last_tile() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        settle(&mut widget, &mut host);

        widget.handle(WidgetEvent::TapPrevious, &mut host);
        assert_eq!(widget.state().selected(), 7);
        assert_eq!(host.sections.last(), Some(&3));
        assert_eq!(host.last_scroll().unwrap().0, 300);
    }

    #[test]
    fn test_animation_frames_do_not_resync() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        settle(&mut widget, &mut host);
        widget.handle(WidgetEvent::TapNext, &mut host);
        let scrolls = host.scrolls.len();

        // Intermediate animation frames pass other sections
        for pos in [10, 40, 60, 95] {
            widget.handle(WidgetEvent::Scroll(pos), &mut host);
            assert_eq!(widget.state().selected(), 1);
        }
        assert_eq!(host.scrolls.len(), scrolls);

        settle(&mut widget, &mut host);
        assert!(!widget.state().is_guarded());
        assert!(host.boundaries.last().unwrap().more_above);
    }

    #[test]
    fn test_user_scroll_selects_nearest_without_scroll_to() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        settle(&mut widget, &mut host);
        let scrolls = host.scrolls.len();

        widget.handle(WidgetEvent::Scroll(205), &mut host);
        assert_eq!(widget.state().selected(), 2);
        assert_eq!(host.sections.last(), Some(&2));
        assert_eq!(host.focused.last(), Some(&Some(2)));
        assert_eq!(host.scrolls.len(), scrolls);
    }

    #[test]
    fn test_delay_strategy_ignores_settle() {
        let options = WidgetOptions {
            guard_release: GuardRelease::Delay { ms: 500 },
            ..WidgetOptions::default()
        };
        let (mut widget, mut host) = create(options);
        let (_, ticket) = host.timers[0];
        assert_eq!(host.timers[0].0, Duration::from_millis(500));

        widget.handle(WidgetEvent::ScrollSettled(ticket), &mut host);
        assert!(widget.state().is_guarded());
        widget.handle(WidgetEvent::GuardTimer(ticket), &mut host);
        assert!(!widget.state().is_guarded());
    }

    #[test]
    fn test_rapid_taps_keep_guard_until_last_settles() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        settle(&mut widget, &mut host);

        widget.handle(WidgetEvent::TapNext, &mut host);
        let (_, _, first) = host.last_scroll().unwrap();
        widget.handle(WidgetEvent::TapNext, &mut host);

        // The superseded animation reports late
        widget.handle(WidgetEvent::ScrollSettled(first), &mut host);
        assert!(widget.state().is_guarded());
        widget.handle(WidgetEvent::Scroll(150), &mut host);
        assert_eq!(widget.state().selected(), 2);

        settle(&mut widget, &mut host);
        assert!(!widget.state().is_guarded());
    }

    #[test]
    fn test_drag_stop_clears_guard_and_syncs() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        widget.handle(WidgetEvent::TapNext, &mut host);
        assert!(widget.state().is_guarded());

        widget.handle(WidgetEvent::Scroll(290), &mut host);
        assert_eq!(widget.state().selected(), 1);
        widget.handle(WidgetEvent::DragStopped, &mut host);
        assert!(!widget.state().is_guarded());
        assert_eq!(widget.state().selected(), 3);
    }

    #[test]
    fn test_carousel_drag_rotates_by_steps() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        settle(&mut widget, &mut host);

        widget.handle(WidgetEvent::CarouselDragStart, &mut host);
        widget.handle(WidgetEvent::CarouselDragMove { dx: -9 }, &mut host);
        widget.handle(WidgetEvent::CarouselDragMove { dx: -8 }, &mut host);
        widget.handle(WidgetEvent::CarouselDragEnd, &mut host);
        // -17 columns at 8 per title rounds to two titles forward
        assert_eq!(widget.state().selected(), 2);
        assert_eq!(host.last_scroll().unwrap().0, 200);
    }

    #[test]
    fn test_short_carousel_drag_does_nothing() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        let scrolls = host.scrolls.len();
        widget.handle(WidgetEvent::CarouselDragStart, &mut host);
        widget.handle(WidgetEvent::CarouselDragMove { dx: 3 }, &mut host);
        widget.handle(WidgetEvent::CarouselDragEnd, &mut host);
        assert_eq!(host.scrolls.len(), scrolls);
        // A stray end without a start is ignored as well
        widget.handle(WidgetEvent::CarouselDragEnd, &mut host);
        assert_eq!(host.scrolls.len(), scrolls);
    }

    #[test]
    fn test_content_tap_passes_through_when_slow() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        host.velocity = (0.02, -0.03);
        assert_eq!(widget.handle(WidgetEvent::ContentTap, &mut host), EventResult::PassThrough);
        assert!(host.gesture_stopped);

        host.velocity = (0.0, -2.5);
        assert_eq!(widget.handle(WidgetEvent::ContentTap, &mut host), EventResult::Consumed);
    }

    #[test]
    fn test_change_content_resets_to_first_title() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        settle(&mut widget, &mut host);
        widget.handle(WidgetEvent::Scroll(300), &mut host);
        assert_eq!(widget.state().selected(), 7);

        host.measurements.heading_tops = vec![0, 40, 80];
        let doc = Document::parse("# Flopsy\n# Mopsy\n# Peter");
        widget.change_content(&doc, None, &mut host).unwrap();
        assert_eq!(widget.state().selected(), 0);
        assert_eq!(widget.state().circular_offset(), 0);
        assert_eq!(widget.state().table().len(), 9);
        assert_eq!(widget.state().table().label(1), Some("Mopsy"));
    }

    #[test]
    fn test_guard_timer_from_before_change_content_is_stale() {
        let options = WidgetOptions {
            guard_release: GuardRelease::Delay { ms: 500 },
            ..WidgetOptions::default()
        };
        let (mut widget, mut host) = create(options);
        let (_, created) = host.timers[0];
        widget.handle(WidgetEvent::GuardTimer(created), &mut host);
        widget.handle(WidgetEvent::TapNext, &mut host);
        let (_, pending) = *host.timers.last().unwrap();

        widget
            .change_content(&scenario_document(), None, &mut host)
            .unwrap();
        let (_, reloaded) = *host.timers.last().unwrap();
        widget.handle(WidgetEvent::GuardTimer(reloaded), &mut host);
        widget.handle(WidgetEvent::TapNext, &mut host);
        let (_, current) = *host.timers.last().unwrap();
        assert_ne!(pending, current);

        // The timer scheduled for the old content fires late
        widget.handle(WidgetEvent::GuardTimer(pending), &mut host);
        assert!(widget.state().is_guarded());
        widget.handle(WidgetEvent::Scroll(250), &mut host);
        assert_eq!(widget.state().selected(), 1);

        widget.handle(WidgetEvent::GuardTimer(current), &mut host);
        assert!(!widget.state().is_guarded());
    }

    #[test]
    fn test_change_content_rejects_headingless_document() {
        let (mut widget, mut host) = create(WidgetOptions::default());
        let loads = host.loads;
        let err = widget
            .change_content(&Document::parse("just text"), None, &mut host)
            .unwrap_err();
        assert!(matches!(err, CarouscrollError::NoSections));
        assert_eq!(host.loads, loads);
        assert_eq!(widget.state().table().len(), 8);
    }

    #[test]
    fn test_caller_labels_override_headings() {
        let mut host = RecordingHost::scenario();
        let labels: Vec<String> = vec!["Summary".into(), "Health".into()];
        let widget = Widget::create(
            &scenario_document(),
            Some(labels.as_slice()),
            WidgetOptions::default(),
            &mut host,
        )
        .unwrap();
        let table = widget.state().table();
        assert_eq!(table.label(0), Some("Summary"));
        assert_eq!(table.label(2), Some("C"));
    }
}
