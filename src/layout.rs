//! Row layout of a [`Document`] at a fixed column width.
//!
//! This is the terminal's stand-in for browser layout: it decides which row
//! every heading lands on, which is all the geometry resolver needs.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::content::{Block, Document};
use crate::geometry::Measurements;

/// Columns of padding on each side of the text
pub const SIDE_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Body,
    Spacer,
}

/// A single laid-out row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaidLine {
    pub kind: LineKind,
    pub text: String,
    /// Section the row belongs to, `None` for the preamble
    pub section: Option<usize>,
}

/// A document wrapped at a given width
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    lines: Vec<LaidLine>,
    heading_rows: Vec<usize>,
    viewport_height: u16,
}

impl DocumentLayout {
    pub fn compute(document: &Document, width: u16, viewport_height: u16) -> Self {
        let available = (width as usize).saturating_sub(SIDE_PADDING * 2).max(1);
        let mut lines = Vec::new();
        let mut heading_rows = Vec::new();
        let mut section: Option<usize> = None;

        for block in document.blocks() {
            let kind = match block {
                Block::Heading(_) => {
                    section = Some(section.map_or(0, |s| s + 1));
                    heading_rows.push(lines.len());
                    LineKind::Heading
                }
                Block::Paragraph(_) => LineKind::Body,
            };

            for row in wrap_text(block.text(), available) {
                lines.push(LaidLine {
                    kind,
                    text: row,
                    section,
                });
            }
            lines.push(LaidLine {
                kind: LineKind::Spacer,
                text: String::new(),
                section,
            });
        }

        Self {
            lines,
            heading_rows,
            viewport_height,
        }
    }

    pub fn lines(&self) -> &[LaidLine] {
        &self.lines
    }

    pub fn heading_rows(&self) -> &[usize] {
        &self.heading_rows
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Largest scroll position the viewport can actually reach
    pub fn max_scroll(&self) -> u32 {
        (self.lines.len() as u32).saturating_sub(self.viewport_height as u32)
    }

    pub fn measurements(&self) -> Measurements {
        Measurements {
            heading_tops: self.heading_rows.iter().map(|&r| r as i64).collect(),
            scroll_height: self.lines.len() as i64,
            viewport_height: self.viewport_height as i64,
        }
    }
}

/// Greedy word wrap by display width. Words wider than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };

        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += w;
            }
        }
    }

    if !current.is_empty() || rows.is_empty() {
        rows.push(current);
    }
    rows
}
