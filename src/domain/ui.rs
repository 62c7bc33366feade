use serde::{Deserialize, Serialize};

/// Canonical cursor position type used across the editing surface.
///
/// `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    pub line: usize,
    pub column: usize,
}

impl CursorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A single in-line replacement: `removed` characters starting at `column`
/// were replaced by `inserted` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice {
    pub line: usize,
    pub column: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl Splice {
    /// Maps a position from before the splice to the same logical place after it.
    ///
    /// Positions inside the removed range land at the end of the inserted text.
    pub fn map(&self, pos: CursorPosition) -> CursorPosition {
        if pos.line != self.line || pos.column <= self.column {
            return pos;
        }
        let removed_end = self.column + self.removed;
        let column = if pos.column >= removed_end {
            pos.column - self.removed + self.inserted
        } else {
            self.column + self.inserted
        };
        CursorPosition::new(pos.line, column)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    // "say {hello} now" -> "say Hello there  now"
    const SPLICE: Splice = Splice {
        line: 0,
        column: 4,
        removed: 7,
        inserted: 12,
    };

    #[rstest]
    #[case(CursorPosition::new(0, 0), CursorPosition::new(0, 0))]
    #[case(CursorPosition::new(0, 4), CursorPosition::new(0, 4))]
    #[case(CursorPosition::new(0, 6), CursorPosition::new(0, 16))]
    #[case(CursorPosition::new(0, 11), CursorPosition::new(0, 16))]
    #[case(CursorPosition::new(0, 15), CursorPosition::new(0, 20))]
    #[case(CursorPosition::new(1, 11), CursorPosition::new(1, 11))]
    fn test_splice_map(#[case] before: CursorPosition, #[case] expected: CursorPosition) {
        assert_eq!(SPLICE.map(before), expected);
    }

    #[test]
    fn test_shrinking_splice_moves_cursor_left() {
        let splice = Splice {
            line: 2,
            column: 1,
            removed: 9,
            inserted: 2,
        };
        assert_eq!(
            splice.map(CursorPosition::new(2, 12)),
            CursorPosition::new(2, 5)
        );
    }
}
