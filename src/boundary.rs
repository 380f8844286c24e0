/// Scroll bounds of the current content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollBounds {
    pub min: u32,
    pub max: u32,
}

/// Whether more content exists beyond the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boundary {
    pub more_above: bool,
    pub more_below: bool,
}

impl ScrollBounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn indicator(&self, scroll_pos: u32) -> Boundary {
        Boundary {
            more_above: scroll_pos > self.min,
            more_below: scroll_pos < self.max,
        }
    }
}
