//! Renderer-facing pull snapshot
//!
//! The core never pushes frames: a renderer asks for a snapshot whenever it
//! wants one. Row-flash effects are the renderer's interpretation of
//! `last_cleared_rows`; the core itself completes every clear synchronously
//! and never blocks the command stream.

use crate::core::board::Board;
use crate::types::ShapeKind;

/// One grid slot as a renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotCell {
    pub occupied: bool,
    pub kind: Option<ShapeKind>,
}

/// Full copy of the grid plus one-shot flash hints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    width: usize,
    height: usize,
    hidden_rows: usize,
    /// Row-major (y * width + x)
    cells: Vec<SnapshotCell>,
    /// Rows cleared by the command that produced this snapshot, as they
    /// stood when cleared; valid only immediately after a lock event
    pub last_cleared_rows: Vec<usize>,
    pub overflowed: bool,
}

impl BoardSnapshot {
    /// Empty snapshot sized for a board; refresh before use
    pub fn new(width: usize, height: usize, hidden_rows: usize) -> Self {
        Self {
            width,
            height,
            hidden_rows,
            cells: vec![SnapshotCell::default(); width * height],
            last_cleared_rows: Vec::new(),
            overflowed: false,
        }
    }

    /// Re-capture the board state without reallocating the grid
    pub(crate) fn refresh(&mut self, board: &Board, cleared_rows: &[usize], overflowed: bool) {
        debug_assert_eq!(self.width, board.width());
        debug_assert_eq!(self.height, board.height());
        for y in 0..self.height {
            for x in 0..self.width {
                let occupant = board.occupant_at(x, y);
                self.cells[y * self.width + x] = SnapshotCell {
                    occupied: occupant.is_some(),
                    kind: occupant.map(|o| o.kind),
                };
            }
        }
        self.last_cleared_rows.clear();
        self.last_cleared_rows.extend_from_slice(cleared_rows);
        self.overflowed = overflowed;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// First row of the visible play area
    pub fn first_visible_row(&self) -> usize {
        self.hidden_rows + 1
    }

    /// Cell at (x, y); panics out of range like the board it mirrors
    pub fn cell(&self, x: usize, y: usize) -> SnapshotCell {
        assert!(x < self.width && y < self.height, "snapshot access out of range");
        self.cells[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cell::Occupant;

    #[test]
    fn test_refresh_mirrors_board() {
        let mut board = Board::new(12, 26, 5);
        board.place(
            &[(4, 20)],
            Occupant {
                id: 1,
                kind: ShapeKind::Z,
                locked: true,
            },
        );

        let mut snapshot = BoardSnapshot::new(12, 26, 5);
        snapshot.refresh(&board, &[25], false);

        let cell = snapshot.cell(4, 20);
        assert!(cell.occupied);
        assert_eq!(cell.kind, Some(ShapeKind::Z));
        assert!(!snapshot.cell(5, 20).occupied);
        assert_eq!(snapshot.last_cleared_rows, vec![25]);
        assert!(!snapshot.overflowed);
        assert_eq!(snapshot.first_visible_row(), 6);
    }

    #[test]
    fn test_refresh_clears_stale_hints() {
        let board = Board::new(12, 26, 5);
        let mut snapshot = BoardSnapshot::new(12, 26, 5);
        snapshot.refresh(&board, &[25, 25], false);
        snapshot.refresh(&board, &[], false);
        assert!(snapshot.last_cleared_rows.is_empty());
    }
}
