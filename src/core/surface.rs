use crate::domain::ui::{CursorPosition, Splice};
use crate::error::SurfaceError;

/// Cursor and selection state captured before a mutation.
///
/// Produced by [`EditSurface::save_cursor`] and handed back to
/// [`EditSurface::restore_cursor`] within the same event cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSnapshot {
    cursor: CursorPosition,
    anchor: Option<CursorPosition>,
}

impl CursorSnapshot {
    /// `anchor` is the fixed end of an active selection, if any.
    pub fn new(cursor: CursorPosition, anchor: Option<CursorPosition>) -> Self {
        Self { cursor, anchor }
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn anchor(&self) -> Option<CursorPosition> {
        self.anchor
    }

    /// Carries the snapshot through `splice` so it points at the same text.
    pub fn rebased(self, splice: &Splice) -> Self {
        Self {
            cursor: splice.map(self.cursor),
            anchor: self.anchor.map(|anchor| splice.map(anchor)),
        }
    }
}

/// The editable text surface an engine operates on.
///
/// The active container is the line holding the cursor. Implementations
/// report unavailable state through [`SurfaceError`]; the engine never
/// retries.
pub trait EditSurface {
    fn save_cursor(&mut self) -> Result<CursorSnapshot, SurfaceError>;

    /// Index of the active container.
    fn active_container(&self) -> Result<usize, SurfaceError>;

    fn container_text(&self, container: usize) -> Result<String, SurfaceError>;

    fn set_container_text(&mut self, container: usize, text: &str) -> Result<(), SurfaceError>;

    fn restore_cursor(&mut self, snapshot: CursorSnapshot) -> Result<(), SurfaceError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rebased_moves_cursor_and_anchor() {
        let snapshot = CursorSnapshot::new(
            CursorPosition::new(0, 11),
            Some(CursorPosition::new(0, 2)),
        );
        let splice = Splice {
            line: 0,
            column: 4,
            removed: 7,
            inserted: 3,
        };
        let rebased = snapshot.rebased(&splice);
        assert_eq!(rebased.cursor(), CursorPosition::new(0, 7));
        assert_eq!(rebased.anchor(), Some(CursorPosition::new(0, 2)));
    }

    #[test]
    fn test_rebased_other_line_untouched() {
        let snapshot = CursorSnapshot::new(CursorPosition::new(3, 9), None);
        let splice = Splice {
            line: 1,
            column: 0,
            removed: 5,
            inserted: 10,
        };
        assert_eq!(snapshot.rebased(&splice), snapshot);
    }
}
