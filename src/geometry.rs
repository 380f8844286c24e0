//! Section geometry and the normalized title table.
//!
//! Offsets are measured from the first heading, so the first section always
//! sits at 0. The table tiles `(label, offset)` pairs until there are enough
//! titles to fill every visible carousel slot.

use serde::Serialize;

use crate::error::{CarouscrollError, Result};

/// Layout facts reported by the host for one piece of content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measurements {
    /// Top of each section heading relative to the scroll area
    pub heading_tops: Vec<i64>,
    /// Total scrollable height
    pub scroll_height: i64,
    /// Visible viewport height
    pub viewport_height: i64,
}

/// Resolved section offsets and scroll bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGeometry {
    pub offsets: Vec<u32>,
    pub scroll_min: u32,
    pub scroll_max: u32,
}

/// Compute section offsets and scroll bounds from raw measurements.
///
/// Fails with [`CarouscrollError::NoSections`] when there are no headings.
pub fn resolve(measurements: &Measurements) -> Result<SectionGeometry> {
    let first = *measurements
        .heading_tops
        .first()
        .ok_or(CarouscrollError::NoSections)?;

    let offsets = measurements
        .heading_tops
        .iter()
        .map(|&top| clamp_u32(top - first))
        .collect();

    let scroll_min = clamp_u32(first);
    let scroll_max = clamp_u32(
        measurements.scroll_height - measurements.viewport_height - scroll_min as i64,
    );

    Ok(SectionGeometry {
        offsets,
        scroll_min,
        scroll_max,
    })
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

/// Pair caller labels with heading text, one label per section.
///
/// Missing caller labels fall back to the heading text; surplus caller labels
/// are dropped.
pub fn resolve_labels<'a>(
    headings: impl IntoIterator<Item = &'a str>,
    caller: Option<&[String]>,
) -> Vec<String> {
    let headings: Vec<&str> = headings.into_iter().collect();
    let caller = caller.unwrap_or(&[]);

    if caller.len() > headings.len() {
        tracing::warn!(
            labels = caller.len(),
            headings = headings.len(),
            "more labels than section headings, extra labels ignored"
        );
    }

    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            caller
                .get(i)
                .cloned()
                .unwrap_or_else(|| (*heading).to_string())
        })
        .collect()
}

/// Length of the tiled table: the smallest multiple of `count` that is at
/// least `min_len`.
pub fn normalized_len(count: usize, min_len: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let repeats = min_len.div_ceil(count).max(1);
    count * repeats
}

/// Labels and offsets tiled to at least the visible slot count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleTable {
    labels: Vec<String>,
    offsets: Vec<u32>,
    section_count: usize,
}

impl TitleTable {
    /// Tile `labels`/`offsets` pairs until the table holds `min_len` titles.
    ///
    /// Both lists describe the same sections and are truncated to the shorter
    /// of the two.
    pub fn normalize(labels: &[String], offsets: &[u32], min_len: usize) -> Result<Self> {
        let section_count = labels.len().min(offsets.len());
        if section_count == 0 {
            return Err(CarouscrollError::NoSections);
        }

        let len = normalized_len(section_count, min_len);
        let (labels, offsets): (Vec<String>, Vec<u32>) = (0..len)
            .map(|i| {
                let s = i % section_count;
                (labels[s].clone(), offsets[s])
            })
            .unzip();

        Ok(Self {
            labels,
            offsets,
            section_count,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct sections before tiling
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn label(&self, title: usize) -> Option<&str> {
        self.labels.get(title).map(String::as_str)
    }

    pub fn offset(&self, title: usize) -> Option<u32> {
        self.offsets.get(title).copied()
    }

    /// Section (heading) a tiled title refers to
    pub fn section_of(&self, title: usize) -> usize {
        title % self.section_count
    }

    /// Replace offsets after a relayout, keeping labels and tiling
    pub fn with_offsets(&self, offsets: &[u32]) -> Result<Self> {
        if offsets.len() < self.section_count {
            return Err(CarouscrollError::NoSections);
        }
        let labels = &self.labels[..self.section_count];
        Self::normalize(labels, &offsets[..self.section_count], self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalized_len() {
        assert_eq!(normalized_len(1, 7), 7);
        assert_eq!(normalized_len(3, 7), 9);
        assert_eq!(normalized_len(7, 7), 7);
        assert_eq!(normalized_len(10, 7), 10);
        assert_eq!(normalized_len(4, 7), 8);
        assert_eq!(normalized_len(0, 7), 0);
    }

    #[test]
    fn test_normalize_tiles_pairs() {
        let table =
            TitleTable::normalize(&labels(&["A", "B", "C"]), &[0, 10, 20], 7).unwrap();
        assert_eq!(table.len(), 9);
        assert_eq!(table.len() % table.section_count(), 0);
        assert_eq!(table.label(4), Some("B"));
        assert_eq!(table.offset(8), Some(20));
        assert_eq!(table.section_of(7), 1);
    }

    #[test]
    fn test_normalize_single_section() {
        let table = TitleTable::normalize(&labels(&["Only"]), &[0], 7).unwrap();
        assert_eq!(table.len(), 7);
        assert!(table.labels().iter().all(|l| l == "Only"));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(
            TitleTable::normalize(&[], &[], 7),
            Err(CarouscrollError::NoSections)
        ));
    }

    #[test]
    fn test_resolve_offsets_relative_to_first_heading() {
        let m = Measurements {
            heading_tops: vec![3, 10, 25],
            scroll_height: 60,
            viewport_height: 20,
        };
        let g = resolve(&m).unwrap();
        assert_eq!(g.offsets, vec![0, 7, 22]);
        assert_eq!(g.scroll_min, 3);
        assert_eq!(g.scroll_max, 37);
    }

    #[test]
    fn test_resolve_clamps_negative_offsets() {
        let m = Measurements {
            heading_tops: vec![10, 4, 30],
            scroll_height: 20,
            viewport_height: 40,
        };
        let g = resolve(&m).unwrap();
        assert_eq!(g.offsets, vec![0, 0, 20]);
        // Content shorter than the viewport cannot scroll
        assert_eq!(g.scroll_max, 0);
    }

    #[test]
    fn test_resolve_without_headings_fails() {
        let m = Measurements::default();
        assert!(matches!(resolve(&m), Err(CarouscrollError::NoSections)));
    }

    #[test]
    fn test_resolve_labels_prefers_caller_list() {
        let caller = labels(&["One"]);
        let resolved = resolve_labels(["Alpha", "Beta"], Some(caller.as_slice()));
        assert_eq!(resolved, vec!["One", "Beta"]);

        let extra = labels(&["x", "y", "z"]);
        assert_eq!(resolve_labels(["Alpha"], Some(extra.as_slice())), vec!["x"]);
        assert_eq!(resolve_labels(["Alpha"], None), vec!["Alpha"]);
    }

    #[test]
    fn test_with_offsets_keeps_tiling() {
        let table = TitleTable::normalize(&labels(&["A", "B"]), &[0, 5], 7).unwrap();
        let moved = table.with_offsets(&[0, 9]).unwrap();
        assert_eq!(moved.len(), 8);
        assert_eq!(moved.offset(3), Some(9));
        assert_eq!(moved.labels(), table.labels());
    }
}
