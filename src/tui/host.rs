//! Terminal implementation of [`WidgetHost`].
//!
//! The host owns everything a browser would: the laid-out document, the
//! scroll position, scroll animations, timers and drag momentum. Changes it
//! makes to the scroll position come back to the widget as events, exactly
//! like native scroll events would.

use std::collections::VecDeque;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

use crate::boundary::Boundary;
use crate::content::Document;
use crate::geometry::{Measurements, TitleTable};
use crate::layout::DocumentLayout;
use crate::rotator::{Rotation, SlotStyle};
use crate::state::ScrollTicket;
use crate::widget::{WidgetEvent, WidgetHost};

/// Momentum multiplier applied every tick after a content drag
const MOMENTUM_DECAY: f64 = 0.85;
/// Momentum below this many rows per tick counts as stopped
const MOMENTUM_FLOOR: f64 = 0.05;

/// A title placed on the carousel strip
#[derive(Debug, Clone, PartialEq)]
pub struct TitleCell {
    pub position: usize,
    pub label: String,
    pub style: SlotStyle,
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: u32,
    to: u32,
    started: Instant,
    duration: Duration,
    ticket: ScrollTicket,
}

impl ScrollAnimation {
    /// Position at `now` with swing easing, and whether the animation is done
    fn position_at(&self, now: Instant) -> (u32, bool) {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            now.saturating_duration_since(self.started).as_secs_f64()
                / self.duration.as_secs_f64()
        }
        .min(1.0);
        let eased = 0.5 - (t * PI).cos() / 2.0;
        let pos = self.from as f64 + (self.to as f64 - self.from as f64) * eased;
        (pos.round().max(0.0) as u32, t >= 1.0)
    }
}

#[derive(Debug)]
pub struct TerminalHost {
    document: Document,
    layout: DocumentLayout,
    width: u16,
    viewport_height: u16,
    scroll_pos: u32,
    animation: Option<ScrollAnimation>,
    timers: Vec<(Instant, ScrollTicket)>,
    titles: Vec<TitleCell>,
    selected_section: Option<usize>,
    boundary: Boundary,
    momentum: f64,
    momentum_carry: f64,
    dragging: bool,
    styles: Option<Vec<SlotStyle>>,
    events: VecDeque<WidgetEvent>,
}

impl TerminalHost {
    pub fn new(width: u16, viewport_height: u16) -> Self {
        let document = Document::default();
        Self {
            layout: DocumentLayout::compute(&document, width, viewport_height),
            document,
            width,
            viewport_height,
            scroll_pos: 0,
            animation: None,
            timers: Vec::new(),
            titles: Vec::new(),
            selected_section: None,
            boundary: Boundary::default(),
            momentum: 0.0,
            momentum_carry: 0.0,
            dragging: false,
            styles: None,
            events: VecDeque::new(),
        }
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    pub fn scroll_pos(&self) -> u32 {
        self.scroll_pos
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn titles(&self) -> &[TitleCell] {
        &self.titles
    }

    pub fn selected_section(&self) -> Option<usize> {
        self.selected_section
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Row of the heading that opens `section`
    pub fn heading_row(&self, section: usize) -> Option<usize> {
        self.layout.heading_rows().get(section).copied()
    }

    /// Resize the viewport. Returns whether the layout changed.
    pub fn set_viewport(&mut self, width: u16, viewport_height: u16) -> bool {
        if width == self.width && viewport_height == self.viewport_height {
            return false;
        }
        self.width = width;
        self.viewport_height = viewport_height;
        self.layout = DocumentLayout::compute(&self.document, width, viewport_height);
        let clamped = self.scroll_pos.min(self.layout.max_scroll());
        self.set_scroll(clamped);
        true
    }

    /// Events produced since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<WidgetEvent> {
        self.events.drain(..).collect()
    }

    /// Scroll by `rows` on behalf of the user
    pub fn user_scroll(&mut self, rows: i64) {
        self.interrupt_animation();
        self.momentum = 0.0;
        let target = (self.scroll_pos as i64 + rows).max(0) as u32;
        self.set_scroll(target);
    }

    /// Scroll to an absolute row on behalf of the user
    pub fn user_scroll_to(&mut self, row: u32) {
        self.user_scroll(row as i64 - self.scroll_pos as i64);
    }

    pub fn begin_drag(&mut self) {
        self.interrupt_animation();
        self.dragging = true;
    }

    /// Content dragged down by `rows` (negative drags up)
    pub fn drag_by(&mut self, rows: i32) {
        let target = (self.scroll_pos as i64 - rows as i64).max(0) as u32;
        self.set_scroll(target);
        self.momentum = -(rows as f64);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        if self.momentum.abs() < MOMENTUM_FLOOR {
            self.stop_momentum();
        }
    }

    /// Advance animations, timers and momentum to `now`
    pub fn tick(&mut self, now: Instant) {
        if let Some(animation) = self.animation {
            let (pos, done) = animation.position_at(now);
            self.set_scroll(pos);
            if done {
                self.animation = None;
                self.events.push_back(WidgetEvent::ScrollSettled(animation.ticket));
            }
        }

        let mut due = Vec::new();
        self.timers.retain(|&(at, ticket)| {
            if at <= now {
                due.push(ticket);
                false
            } else {
                true
            }
        });
        self.events
            .extend(due.into_iter().map(WidgetEvent::GuardTimer));

        if !self.dragging && self.momentum != 0.0 {
            self.momentum_carry += self.momentum;
            let whole = self.momentum_carry.trunc();
            self.momentum_carry -= whole;
            let before = self.scroll_pos;
            let target = (self.scroll_pos as i64 + whole as i64).max(0) as u32;
            self.set_scroll(target);

            self.momentum *= MOMENTUM_DECAY;
            let stuck = whole != 0.0 && self.scroll_pos == before;
            if self.momentum.abs() < MOMENTUM_FLOOR || stuck {
                self.stop_momentum();
            }
        }
    }

    fn set_scroll(&mut self, pos: u32) {
        let pos = pos.min(self.layout.max_scroll());
        if pos != self.scroll_pos {
            self.scroll_pos = pos;
            self.events.push_back(WidgetEvent::Scroll(pos));
        }
    }

    /// A user gesture cuts a running scroll-to short; report it as finished
    fn interrupt_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.events
                .push_back(WidgetEvent::ScrollSettled(animation.ticket));
        }
    }

    fn stop_momentum(&mut self) {
        self.momentum = 0.0;
        self.momentum_carry = 0.0;
        self.events.push_back(WidgetEvent::DragStopped);
    }
}

impl WidgetHost for TerminalHost {
    fn load_content(&mut self, document: &Document) -> Measurements {
        self.document = document.clone();
        self.layout = DocumentLayout::compute(&self.document, self.width, self.viewport_height);
        self.animation = None;
        self.timers.clear();
        self.momentum = 0.0;
        self.selected_section = None;
        self.scroll_pos = 0;
        self.layout.measurements()
    }

    fn measure(&mut self) -> Measurements {
        self.layout.measurements()
    }

    fn scroll_to(&mut self, offset: u32, duration: Duration, ticket: ScrollTicket) {
        // A newer scroll-to replaces the running one; its ticket is dropped
        self.animation = None;
        let target = offset.min(self.layout.max_scroll());
        if duration.is_zero() || target == self.scroll_pos {
            self.set_scroll(target);
            self.events.push_back(WidgetEvent::ScrollSettled(ticket));
        } else {
            self.animation = Some(ScrollAnimation {
                from: self.scroll_pos,
                to: target,
                started: Instant::now(),
                duration,
                ticket,
            });
        }
    }

    fn schedule_guard_release(&mut self, delay: Duration, ticket: ScrollTicket) {
        self.timers.push((Instant::now() + delay, ticket));
    }

    fn show_titles(&mut self, rotation: &Rotation, table: &TitleTable, _transition: Duration) {
        let center = rotation.center();
        self.titles = rotation
            .visible()
            .into_iter()
            .filter_map(|slot| {
                let position = slot.position?;
                let style = match &self.styles {
                    Some(tiers) if !tiers.is_empty() => {
                        tiers[position.abs_diff(center).min(tiers.len() - 1)]
                    }
                    _ => slot.style?,
                };
                Some(TitleCell {
                    position,
                    label: table.label(slot.title).unwrap_or_default().to_string(),
                    style,
                })
            })
            .collect();
    }

    fn select_section(&mut self, section: usize) {
        self.selected_section = Some(section);
    }

    fn show_boundary(&mut self, boundary: Boundary) {
        self.boundary = boundary;
    }

    fn gesture_velocity(&self) -> (f64, f64) {
        (0.0, self.momentum)
    }

    fn stop_gesture_scroll(&mut self) {
        if self.momentum != 0.0 {
            self.stop_momentum();
        }
    }

    fn has_style_marker(&self) -> bool {
        self.styles.is_some()
    }

    fn install_styles(&mut self, tiers: &[SlotStyle]) {
        self.styles = Some(tiers.to_vec());
    }

    fn clear(&mut self) {
        self.load_content(&Document::default());
        self.titles.clear();
        self.boundary = Boundary::default();
    }
}
