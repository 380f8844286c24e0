use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::content::Document;
use crate::demo;
use crate::error::{CarouscrollError, Result};
use crate::geometry::{self, TitleTable};
use crate::layout::DocumentLayout;
use crate::render::Render;
use crate::rotator::{SlotStyle, TitleRotator};

/// Resolved carousel for a document, as printed by `--outline`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub table: TitleTable,
    pub scroll_min: u32,
    pub scroll_max: u32,
    pub visible_slots: usize,
    /// Initial carousel, left to right
    pub slots: Vec<OutlineSlot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlineSlot {
    pub title: usize,
    pub label: String,
    pub style: SlotStyle,
}

impl Outline {
    pub fn build(
        document: &Document,
        labels: Option<&[String]>,
        visible_slots: usize,
        width: u16,
        height: u16,
    ) -> Result<Self> {
        let layout = DocumentLayout::compute(document, width, height);
        let geometry = geometry::resolve(&layout.measurements())?;
        let labels = geometry::resolve_labels(document.headings(), labels);
        let table = TitleTable::normalize(&labels, &geometry.offsets, visible_slots)?;

        let rotator = TitleRotator::new(table.len(), visible_slots);
        let slots = rotator
            .preview(0)
            .visible()
            .into_iter()
            .filter_map(|slot| {
                Some(OutlineSlot {
                    title: slot.title,
                    label: table.label(slot.title)?.to_string(),
                    style: slot.style?,
                })
            })
            .collect();

        Ok(Self {
            scroll_min: geometry.scroll_min,
            scroll_max: geometry.scroll_max,
            visible_slots: rotator.visible_count(),
            table,
            slots,
        })
    }
}

/// Print the title table for `file` (or the built-in sample)
pub fn outline(
    file: Option<&Path>,
    labels: &[String],
    visible_slots: usize,
    width: u16,
    height: u16,
    json: bool,
) -> Result<()> {
    let markup = match file {
        Some(path) => fs::read_to_string(path)?,
        None => demo::sample_markup(),
    };
    let document = Document::parse(&markup);
    if document.is_empty() {
        return Err(CarouscrollError::NoContent);
    }

    let labels = (!labels.is_empty()).then_some(labels);
    let outline = Outline::build(&document, labels, visible_slots, width, height)?;
    tracing::debug!(titles = outline.table.len(), "outline resolved");

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
    } else {
        Render::new().display_outline(&outline);
    }
    Ok(())
}
