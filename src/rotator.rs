//! Circular title rotation for the carousel strip.
//!
//! Every title in the normalized table owns one physical slot. Rotating the
//! carousel reassigns which visual position each slot occupies; the title
//! that lands on the center position is the focused one.

use serde::Serialize;

/// Default number of visible carousel positions
pub const DEFAULT_VISIBLE_SLOTS: usize = 7;

/// Visual weight of a carousel position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotStyle {
    pub opacity: f32,
    pub weight: u16,
    pub scale: f32,
}

/// Style tiers by distance from the center position
pub const FALLOFF: [SlotStyle; 4] = [
    SlotStyle {
        opacity: 1.0,
        weight: 800,
        scale: 2.2,
    },
    SlotStyle {
        opacity: 0.4,
        weight: 400,
        scale: 1.2,
    },
    SlotStyle {
        opacity: 0.3,
        weight: 200,
        scale: 1.0,
    },
    SlotStyle {
        opacity: 0.1,
        weight: 200,
        scale: 0.5,
    },
];

/// Style for a position `distance` steps away from the center
pub fn falloff(distance: usize) -> SlotStyle {
    FALLOFF[distance.min(FALLOFF.len() - 1)]
}

/// Reduce `value` into `[0, modulus)`, negative values included.
pub fn wrap(value: i64, modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    value.rem_euclid(modulus as i64) as usize
}

/// Placement of one title after a rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Index into the normalized title table
    pub title: usize,
    /// Visual position, `None` when the title is off-strip
    pub position: Option<usize>,
    pub style: Option<SlotStyle>,
}

/// Result of rotating the carousel
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    pub slots: Vec<Slot>,
    pub delta: i64,
    center: usize,
}

impl Rotation {
    /// Title sitting on the center position.
    ///
    /// Looked up explicitly: once the table is tiled several titles can
    /// carry the same label.
    pub fn focused(&self) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.position == Some(self.center))
            .map(|slot| slot.title)
    }

    pub fn center(&self) -> usize {
        self.center
    }

    /// Visible slots ordered left to right
    pub fn visible(&self) -> Vec<&Slot> {
        let mut visible: Vec<&Slot> = self
            .slots
            .iter()
            .filter(|slot| slot.position.is_some())
            .collect();
        visible.sort_by_key(|slot| slot.position);
        visible
    }
}

#[derive(Debug, Clone)]
pub struct TitleRotator {
    title_count: usize,
    visible_count: usize,
    offset: usize,
}

impl TitleRotator {
    pub fn new(title_count: usize, visible_count: usize) -> Self {
        Self {
            title_count,
            visible_count: visible_count.clamp(1, title_count.max(1)),
            offset: 0,
        }
    }

    pub fn title_count(&self) -> usize {
        self.title_count
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn center(&self) -> usize {
        self.visible_count / 2
    }

    /// Circular offset, which is also the focused title
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Slot assignment for `delta` without committing it
    pub fn preview(&self, delta: i64) -> Rotation {
        let target = wrap(self.offset as i64 + delta, self.title_count);
        let center = self.center();

        let slots = (0..self.title_count)
            .map(|title| {
                let position = wrap(
                    title as i64 + center as i64 - target as i64,
                    self.title_count,
                );
                if position < self.visible_count {
                    Slot {
                        title,
                        position: Some(position),
                        style: Some(falloff(position.abs_diff(center))),
                    }
                } else {
                    Slot {
                        title,
                        position: None,
                        style: None,
                    }
                }
            })
            .collect();

        Rotation {
            slots,
            delta,
            center,
        }
    }

    /// Rotate by `delta` titles; positive moves toward later titles.
    pub fn advance(&mut self, delta: i64) -> Rotation {
        let rotation = self.preview(delta);
        self.offset = wrap(self.offset as i64 + delta, self.title_count);
        rotation
    }
}
