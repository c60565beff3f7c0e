//! Column resize state machine.
//!
//! Platform-free half of the drag interaction: the browser crate feeds it
//! pointer coordinates and container widths, it hands back percent vectors to
//! apply. A drag only ever trades width between the two columns adjacent to
//! the dragged boundary.

use crate::error::{AuthoringError, Result};
use crate::percent::ColumnPercents;
use crate::style::round_percent;

/// Smallest share a column can be dragged down to.
pub const MIN_COLUMN_PERCENT: f64 = 5.0;

/// Move `boundary` by `delta` percentage points, starting from `start`.
///
/// Columns `boundary` and `boundary + 1` trade width; both stay at or above
/// `min_pct`. If the pair is too narrow to honour the minimum on both sides
/// the vector is returned unchanged.
pub fn resize_pair(
    start: &ColumnPercents,
    boundary: usize,
    delta: f64,
    min_pct: f64,
) -> ColumnPercents {
    let (Some(&left), Some(&right)) = (start.get(boundary), start.get(boundary + 1)) else {
        return start.clone();
    };

    let pair = left + right;
    if pair < 2.0 * min_pct || !delta.is_finite() {
        return start.clone();
    }

    let new_left = round_percent((left + delta).clamp(min_pct, pair - min_pct));
    let mut values = start.to_vec();
    values[boundary] = new_left;
    values[boundary + 1] = pair - new_left;
    ColumnPercents::normalized(values)
}

/// What the controller captured when the pointer went down.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSnapshot {
    pub boundary: usize,
    /// Pointer x coordinate at drag start.
    pub start_x: f64,
    /// Full vector at drag start; every update is computed from this.
    pub start_percents: ColumnPercents,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResizeState {
    #[default]
    Idle,
    Dragging(DragSnapshot),
}

/// Per-table drag state: `Idle -> Dragging -> Idle`.
#[derive(Clone, Debug)]
pub struct ResizeController {
    state: ResizeState,
    latest: Option<ColumnPercents>,
    min_pct: f64,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(MIN_COLUMN_PERCENT)
    }
}

impl ResizeController {
    pub fn new(min_pct: f64) -> Self {
        Self {
            state: ResizeState::Idle,
            latest: None,
            min_pct,
        }
    }

    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ResizeState::Dragging(_))
    }

    pub fn min_pct(&self) -> f64 {
        self.min_pct
    }

    /// Start dragging `boundary` from pointer position `start_x`.
    ///
    /// `visible` is the boundary filter output for the table; hidden
    /// boundaries cannot be grabbed.
    pub fn begin(
        &mut self,
        boundary: usize,
        start_x: f64,
        start_percents: ColumnPercents,
        visible: &[bool],
    ) -> Result<()> {
        if self.is_dragging() {
            return Err(AuthoringError::AlreadyDragging);
        }
        let col_count = start_percents.len();
        if col_count < 2 {
            return Err(AuthoringError::ResizeDisabled);
        }
        if boundary >= col_count - 1 {
            return Err(AuthoringError::BoundaryOutOfRange {
                boundary,
                col_count,
            });
        }
        if !visible.get(boundary).copied().unwrap_or(false) {
            return Err(AuthoringError::HiddenBoundary(boundary));
        }

        tracing::debug!(boundary, start_x, "resize drag started");
        self.latest = None;
        self.state = ResizeState::Dragging(DragSnapshot {
            boundary,
            start_x,
            start_percents,
        });
        Ok(())
    }

    /// Pointer moved to `current_x` over a container `container_width` pixels
    /// wide. Returns the vector to apply, or `None` when idle or when the
    /// container has no width.
    pub fn update(&mut self, current_x: f64, container_width: f64) -> Option<ColumnPercents> {
        let ResizeState::Dragging(snapshot) = &self.state else {
            return None;
        };
        if container_width.is_nan() || container_width <= 0.0 {
            return None;
        }

        let delta = (current_x - snapshot.start_x) / container_width * 100.0;
        let next = resize_pair(
            &snapshot.start_percents,
            snapshot.boundary,
            delta,
            self.min_pct,
        );
        tracing::trace!(boundary = snapshot.boundary, delta, "resize drag update");
        self.latest = Some(next.clone());
        Some(next)
    }

    /// Pointer released. Returns the final vector (the start vector if the
    /// pointer never moved), or `None` if no drag was active.
    pub fn finish(&mut self) -> Option<ColumnPercents> {
        let ResizeState::Dragging(snapshot) = std::mem::take(&mut self.state) else {
            return None;
        };
        let result = self.latest.take().unwrap_or(snapshot.start_percents);
        tracing::debug!(boundary = snapshot.boundary, "resize drag finished");
        Some(result)
    }

    /// Abort the drag and return the vector captured at drag start.
    pub fn cancel(&mut self) -> Option<ColumnPercents> {
        let ResizeState::Dragging(snapshot) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.latest = None;
        tracing::debug!(boundary = snapshot.boundary, "resize drag cancelled");
        Some(snapshot.start_percents)
    }
}

/// Where a handle sits, in pixels from the table's left edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandlePlacement {
    pub boundary: usize,
    pub offset_px: f64,
}

/// Handle positions for every visible boundary.
pub fn handle_placements(
    percents: &ColumnPercents,
    visible: &[bool],
    container_width: f64,
) -> Vec<HandlePlacement> {
    visible
        .iter()
        .enumerate()
        .filter(|(_, shown)| **shown)
        .map(|(boundary, _)| HandlePlacement {
            boundary,
            offset_px: percents.cumulative(boundary) / 100.0 * container_width,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(values: &[f64]) -> ColumnPercents {
        ColumnPercents::normalized(values.to_vec())
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-4, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_drag_right_ten_percent() {
        let mut ctl = ResizeController::default();
        ctl.begin(0, 100.0, pct(&[50.0, 50.0]), &[true]).unwrap();

        let next = ctl.update(150.0, 500.0).unwrap();
        assert_close(&next, &[60.0, 40.0]);

        assert_close(&ctl.finish().unwrap(), &[60.0, 40.0]);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_drag_clamps_to_minimum() {
        let mut ctl = ResizeController::default();
        ctl.begin(0, 0.0, pct(&[50.0, 50.0]), &[true]).unwrap();

        assert_close(&ctl.update(10_000.0, 500.0).unwrap(), &[95.0, 5.0]);
        assert_close(&ctl.update(-10_000.0, 500.0).unwrap(), &[5.0, 95.0]);
    }

    #[test]
    fn test_updates_use_start_snapshot() {
        let mut ctl = ResizeController::default();
        ctl.begin(1, 0.0, pct(&[20.0, 30.0, 50.0]), &[true, true])
            .unwrap();

        ctl.update(50.0, 1000.0);
        // Deltas are absolute from the drag start, not cumulative.
        let next = ctl.update(100.0, 1000.0).unwrap();
        assert_close(&next, &[20.0, 40.0, 40.0]);
    }

    #[test]
    fn test_other_columns_untouched() {
        let next = resize_pair(&pct(&[25.0, 25.0, 25.0, 25.0]), 2, -10.0, 5.0);
        assert_close(&next, &[25.0, 25.0, 15.0, 35.0]);
        assert!((next.sum() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_narrow_pair_unchanged() {
        let start = pct(&[4.0, 4.0, 92.0]);
        assert_eq!(resize_pair(&start, 0, 2.0, 5.0), start);
    }

    #[test]
    fn test_cancel_reverts() {
        let mut ctl = ResizeController::default();
        let start = pct(&[50.0, 50.0]);
        ctl.begin(0, 0.0, start.clone(), &[true]).unwrap();
        ctl.update(100.0, 200.0);
        assert_eq!(ctl.cancel(), Some(start));
        assert_eq!(ctl.update(10.0, 200.0), None);
    }

    #[test]
    fn test_finish_without_move_returns_start() {
        let mut ctl = ResizeController::default();
        let start = pct(&[30.0, 70.0]);
        ctl.begin(0, 0.0, start.clone(), &[true]).unwrap();
        assert_eq!(ctl.finish(), Some(start));
        assert_eq!(ctl.finish(), None);
    }

    #[test]
    fn test_zero_container_width_ignored() {
        let mut ctl = ResizeController::default();
        ctl.begin(0, 0.0, pct(&[50.0, 50.0]), &[true]).unwrap();
        assert_eq!(ctl.update(10.0, 0.0), None);
    }

    #[test]
    fn test_begin_rejects_bad_boundaries() {
        let mut ctl = ResizeController::default();
        assert_eq!(
            ctl.begin(0, 0.0, pct(&[100.0]), &[]),
            Err(AuthoringError::ResizeDisabled)
        );
        assert_eq!(
            ctl.begin(2, 0.0, pct(&[50.0, 50.0]), &[true]),
            Err(AuthoringError::BoundaryOutOfRange {
                boundary: 2,
                col_count: 2
            })
        );
        assert_eq!(
            ctl.begin(1, 0.0, pct(&[30.0, 30.0, 40.0]), &[true, false]),
            Err(AuthoringError::HiddenBoundary(1))
        );

        ctl.begin(0, 0.0, pct(&[50.0, 50.0]), &[true]).unwrap();
        assert_eq!(
            ctl.begin(0, 0.0, pct(&[50.0, 50.0]), &[true]),
            Err(AuthoringError::AlreadyDragging)
        );
    }

    #[test]
    fn test_handle_placements() {
        let placements = handle_placements(&pct(&[20.0, 30.0, 50.0]), &[true, false], 400.0);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].boundary, 0);
        assert!((placements[0].offset_px - 80.0).abs() < 1e-9);
    }
}
