//! Scroll synchronizer: follows the document's scroll position with the
//! carousel.

use crate::rotator::Rotation;
use crate::state::{CarouselState, ScrollMode};

/// What a scroll event did to the carousel
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Scroll was self-initiated and ignored
    Guarded,
    /// Nearest title is already selected
    Unchanged,
    /// Carousel rotated to the nearest title
    Rotated {
        rotation: Rotation,
        section: Option<usize>,
    },
}

/// Index of the offset closest to `scroll_pos`.
///
/// Tiled copies share offsets, so ties go to the copy fewest carousel steps
/// from `selected`, then to the lowest index.
pub fn nearest_title(offsets: &[u32], scroll_pos: u32, selected: usize) -> Option<usize> {
    let len = offsets.len();
    offsets
        .iter()
        .enumerate()
        .map(|(i, &offset)| {
            let steps = i.abs_diff(selected);
            let steps = steps.min(len.saturating_sub(steps));
            (offset.abs_diff(scroll_pos), steps, i)
        })
        .min()
        .map(|(_, _, i)| i)
}

/// Handle one native scroll event at `scroll_pos`.
///
/// The position is always recorded, but selection only follows it when the
/// scroll was not caused by our own scroll-to.
pub fn sync_to_scroll(state: &mut CarouselState, scroll_pos: u32) -> SyncOutcome {
    state.record_scroll(scroll_pos);
    if state.is_guarded() {
        return SyncOutcome::Guarded;
    }

    let selected = state.selected();
    let Some(nearest) = nearest_title(state.table().offsets(), scroll_pos, selected) else {
        return SyncOutcome::Unchanged;
    };
    if nearest == selected {
        return SyncOutcome::Unchanged;
    }

    let delta = nearest as i64 - selected as i64;
    tracing::debug!(scroll_pos, from = selected, to = nearest, "syncing carousel to scroll");
    let advance = state.advance(delta, ScrollMode::Suppress);

    SyncOutcome::Rotated {
        rotation: advance.rotation,
        section: advance.section,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SectionGeometry;

    fn scenario_state() -> CarouselState {
        let labels: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let geometry = SectionGeometry {
            offsets: vec![0, 100, 200, 300],
            scroll_min: 0,
            scroll_max: 300,
        };
        let mut state = CarouselState::new(&labels, &geometry, 7).unwrap();
        state.advance(0, ScrollMode::Suppress);
        state
    }

    #[test]
    fn test_nearest_title_ties_prefer_closest_copy() {
        assert_eq!(nearest_title(&[0, 100, 200], 150, 0), Some(1));
        assert_eq!(nearest_title(&[0, 100, 0, 100], 90, 0), Some(1));
        assert_eq!(nearest_title(&[0, 100, 0, 100], 90, 3), Some(3));
        // Both copies are one step away
        assert_eq!(nearest_title(&[0, 100, 0, 100], 90, 2), Some(1));
        assert_eq!(nearest_title(&[0, 100, 0, 100], 10, 1), Some(0));
        assert_eq!(nearest_title(&[], 10, 0), None);
    }

    #[test]
    fn test_sync_keeps_selected_copy_of_section() {
        let mut state = scenario_state();
        state.advance(-1, ScrollMode::Suppress);
        assert_eq!(state.selected(), 7);
        let offset = state.circular_offset();

        assert!(matches!(sync_to_scroll(&mut state, 301), SyncOutcome::Unchanged));
        assert_eq!(state.selected(), 7);
        assert_eq!(state.circular_offset(), offset);
    }

    #[test]
    fn test_external_scroll_selects_nearest_section() {
        let mut state = scenario_state();
        let outcome = sync_to_scroll(&mut state, 205);
        match outcome {
            SyncOutcome::Rotated { rotation, section } => {
                assert_eq!(rotation.focused(), Some(2));
                assert_eq!(section, Some(2));
            }
            other => panic!("expected rotation, got {other:?}"),
        }
        assert_eq!(state.selected(), 2);
        assert_eq!(state.table().label(2), Some("C"));
        // No scroll-to was requested, so nothing is guarded
        assert!(!state.is_guarded());
    }

    #[test]
    fn test_second_sync_at_same_position_is_noop() {
        let mut state = scenario_state();
        sync_to_scroll(&mut state, 120);
        let offset = state.circular_offset();
        let selected = state.selected();

        assert!(matches!(sync_to_scroll(&mut state, 120), SyncOutcome::Unchanged));
        assert_eq!(state.circular_offset(), offset);
        assert_eq!(state.selected(), selected);
    }

    #[test]
    fn test_guarded_scroll_never_changes_selection() {
        let mut state = scenario_state();
        state.advance(1, ScrollMode::Follow);
        assert!(state.is_guarded());

        for pos in [0, 37, 200, 300, 999] {
            assert!(matches!(sync_to_scroll(&mut state, pos), SyncOutcome::Guarded));
            assert_eq!(state.selected(), 1);
        }
        assert_eq!(state.scroll_pos(), 999);
    }

    #[test]
    fn test_sync_backwards() {
        let mut state = scenario_state();
        // Title 7 repeats section 3 one step behind the focus
        sync_to_scroll(&mut state, 300);
        assert_eq!(state.selected(), 7);
        assert_eq!(state.table().section_of(7), 3);
        sync_to_scroll(&mut state, 10);
        assert_eq!(state.selected(), 0);
        assert_eq!(state.circular_offset(), 0);
    }
}
