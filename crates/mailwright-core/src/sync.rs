//! Editor ↔ preview synchronization state.
//!
//! Content flows both ways: editor edits re-render the preview, and direct
//! preview edits are pushed back into the editor. Each push triggers the other
//! side's change notification, so without a guard the two would echo forever.
//!
//! [`SyncState`] holds exactly one phase: idle, or active in one direction.
//! Entering hands out a [`SyncGuard`]; the phase returns to idle when the
//! guard drops. While one direction is active the other is refused, which is
//! how the echo gets suppressed.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use web_time::Instant;

/// Which side is being written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncDirection {
    /// Editor content is being rendered into the preview.
    EditorToPreview,
    /// Preview edits are being loaded back into the editor.
    PreviewToEditor,
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::EditorToPreview => f.write_str("editor→preview"),
            SyncDirection::PreviewToEditor => f.write_str("preview→editor"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncPhase {
    #[default]
    Idle,
    Active(SyncDirection),
}

/// Shared sync phase. Clones share the same state.
#[derive(Clone, Debug, Default)]
pub struct SyncState {
    phase: Rc<Cell<SyncPhase>>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase.get()
    }

    pub fn is_idle(&self) -> bool {
        self.phase.get() == SyncPhase::Idle
    }

    /// Try to start writing in `direction`.
    ///
    /// Returns `None` when any sync is already running; callers drop the
    /// update, since it is the echo of the running one.
    pub fn enter(&self, direction: SyncDirection) -> Option<SyncGuard> {
        match self.phase.get() {
            SyncPhase::Idle => {
                self.phase.set(SyncPhase::Active(direction));
                Some(SyncGuard {
                    phase: Rc::clone(&self.phase),
                    direction,
                    started: Instant::now(),
                })
            }
            SyncPhase::Active(active) => {
                tracing::trace!(%direction, %active, "suppressed sync echo");
                None
            }
        }
    }
}

/// Holds the sync phase active until dropped.
#[must_use = "the sync phase returns to idle as soon as the guard is dropped"]
pub struct SyncGuard {
    phase: Rc<Cell<SyncPhase>>,
    direction: SyncDirection,
    started: Instant,
}

impl SyncGuard {
    pub fn direction(&self) -> SyncDirection {
        self.direction
    }
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.phase.set(SyncPhase::Idle);
        tracing::trace!(
            direction = %self.direction,
            elapsed = ?self.started.elapsed(),
            "sync finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_release() {
        let state = SyncState::new();
        {
            let guard = state.enter(SyncDirection::EditorToPreview).unwrap();
            assert_eq!(guard.direction(), SyncDirection::EditorToPreview);
            assert_eq!(
                state.phase(),
                SyncPhase::Active(SyncDirection::EditorToPreview)
            );
        }
        assert!(state.is_idle());
    }

    #[test]
    fn test_echo_suppressed() {
        let state = SyncState::new();
        let _guard = state.enter(SyncDirection::EditorToPreview).unwrap();
        assert!(state.enter(SyncDirection::PreviewToEditor).is_none());
        assert!(state.enter(SyncDirection::EditorToPreview).is_none());
    }

    #[test]
    fn test_clones_share_phase() {
        let state = SyncState::new();
        let other = state.clone();
        let guard = other.enter(SyncDirection::PreviewToEditor).unwrap();
        assert!(!state.is_idle());
        drop(guard);
        assert!(state.enter(SyncDirection::EditorToPreview).is_some());
    }
}
