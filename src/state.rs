//! Per-widget carousel state and the self-scroll guard.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::boundary::{Boundary, ScrollBounds};
use crate::error::Result;
use crate::geometry::{SectionGeometry, TitleTable};
use crate::rotator::{Rotation, TitleRotator};

/// Identifies the scroll-to that armed the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollTicket(u64);

/// Source of tickets. Shared by every guard so a ticket issued before a
/// content change or re-create never matches one issued after it.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Suppresses scroll events caused by our own scroll-to requests.
///
/// Each arm hands out a fresh ticket; only the newest ticket can release the
/// guard, so a superseded animation finishing late does not unlock it.
#[derive(Debug, Default)]
pub struct ScrollGuard {
    armed: Option<ScrollTicket>,
}

impl ScrollGuard {
    pub fn arm(&mut self) -> ScrollTicket {
        let ticket = ScrollTicket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        self.armed = Some(ticket);
        ticket
    }

    /// Release the guard if `ticket` is the one currently holding it
    pub fn release(&mut self, ticket: ScrollTicket) -> bool {
        if self.armed == Some(ticket) {
            self.armed = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

/// Whether a rotation should move the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Scroll the document to the focused section
    Follow,
    /// Only rotate; the document is already there
    Suppress,
}

/// A scroll-to the host should perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub offset: u32,
    pub ticket: ScrollTicket,
    /// False for the initial placement and zero-step rotations
    pub animate: bool,
}

/// Outcome of one rotation step
#[derive(Debug, Clone)]
pub struct Advance {
    pub rotation: Rotation,
    /// Heading to mark as selected
    pub section: Option<usize>,
    pub scroll: Option<ScrollRequest>,
}

#[derive(Debug)]
pub struct CarouselState {
    table: TitleTable,
    rotator: TitleRotator,
    selected: usize,
    guard: ScrollGuard,
    bounds: ScrollBounds,
    scroll_pos: u32,
}

impl CarouselState {
    pub fn new(labels: &[String], geometry: &SectionGeometry, visible_slots: usize) -> Result<Self> {
        let table = TitleTable::normalize(labels, &geometry.offsets, visible_slots)?;
        let rotator = TitleRotator::new(table.len(), visible_slots);

        Ok(Self {
            table,
            rotator,
            selected: 0,
            guard: ScrollGuard::default(),
            bounds: ScrollBounds::new(geometry.scroll_min, geometry.scroll_max),
            scroll_pos: 0,
        })
    }

    pub fn table(&self) -> &TitleTable {
        &self.table
    }

    pub fn rotator(&self) -> &TitleRotator {
        &self.rotator
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn circular_offset(&self) -> usize {
        self.rotator.offset()
    }

    pub fn bounds(&self) -> ScrollBounds {
        self.bounds
    }

    pub fn scroll_pos(&self) -> u32 {
        self.scroll_pos
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_armed()
    }

    pub fn boundary(&self) -> Boundary {
        self.bounds.indicator(self.scroll_pos)
    }

    pub fn boundary_at(&self, scroll_pos: u32) -> Boundary {
        self.bounds.indicator(scroll_pos)
    }

    pub fn record_scroll(&mut self, scroll_pos: u32) {
        self.scroll_pos = scroll_pos;
    }

    pub fn release_guard(&mut self, ticket: ScrollTicket) -> bool {
        self.guard.release(ticket)
    }

    pub fn clear_guard(&mut self) {
        self.guard.clear();
    }

    /// Rotate the carousel and select the focused title.
    ///
    /// With [`ScrollMode::Follow`] the guard is armed and a scroll request to
    /// the focused title's offset is returned.
    pub fn advance(&mut self, delta: i64, mode: ScrollMode) -> Advance {
        let rotation = self.rotator.advance(delta);
        let focused = rotation.focused();

        let mut scroll = None;
        if let Some(title) = focused {
            self.selected = title;
            if mode == ScrollMode::Follow {
                if let Some(offset) = self.table.offset(title) {
                    scroll = Some(ScrollRequest {
                        offset,
                        ticket: self.guard.arm(),
                        animate: delta != 0,
                    });
                }
            }
        }

        tracing::debug!(
            delta,
            selected = self.selected,
            offset = self.rotator.offset(),
            follow = scroll.is_some(),
            "carousel advanced"
        );

        Advance {
            section: focused.map(|t| self.table.section_of(t)),
            rotation,
            scroll,
        }
    }

    /// Swap in freshly measured geometry for the same sections
    pub fn relayout(&mut self, geometry: &SectionGeometry) -> Result<()> {
        self.table = self.table.with_offsets(&geometry.offsets)?;
        self.bounds = ScrollBounds::new(geometry.scroll_min, geometry.scroll_max);
        Ok(())
    }
}
