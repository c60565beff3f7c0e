//! Error types for authoring operations.
//!
//! Everything here is local and non-fatal: callers surface the message to the
//! user (alert, toast) and carry on. Nothing is retried.

/// Errors raised by the authoring core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AuthoringError {
    /// A style operation ran with no cell or element selected.
    #[error("Please click on a table cell in the preview.")]
    NoSelection,

    /// Copy was requested but there is no generated HTML.
    #[error("There is no generated HTML code to copy.")]
    EmptyExport,

    /// Boundary index does not exist for this table.
    #[error("boundary {boundary} out of range for a table with {col_count} columns")]
    BoundaryOutOfRange { boundary: usize, col_count: usize },

    /// Boundary lies inside a spanning cell and cannot be dragged.
    #[error("boundary {0} is inside a merged cell")]
    HiddenBoundary(usize),

    /// Table has no logical columns.
    #[error("resize is disabled for this table")]
    ResizeDisabled,

    /// A drag is already in progress on this table.
    #[error("a resize drag is already in progress")]
    AlreadyDragging,

    /// Clipboard write rejected by the platform.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// A required page element could not be found.
    #[error("missing element #{0}")]
    MissingElement(String),

    /// A DOM call threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl AuthoringError {
    /// Whether the message is meant for the person using the tool rather
    /// than for logs.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AuthoringError::NoSelection | AuthoringError::EmptyExport | AuthoringError::Clipboard(_)
        )
    }
}

pub type Result<T, E = AuthoringError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert!(AuthoringError::NoSelection.is_user_facing());
        assert_eq!(
            AuthoringError::EmptyExport.to_string(),
            "There is no generated HTML code to copy."
        );
        assert!(!AuthoringError::HiddenBoundary(1).is_user_facing());
    }
}
