//! Board module - manages the game grid
//!
//! A dense width x height array of cells, created once and never resized.
//! Coordinates: (x, y) with x ranging left to right and y top to bottom.
//! Rows `0..=hidden_rows` are buffer space above the visible play area.
//!
//! Out-of-range access through `cell_at` is a programming error and panics;
//! all gameplay callers pre-validate coordinates through the piece-level
//! collision checks.

use crate::core::cell::{Cell, Occupant};
use crate::types::{Coord, PieceId};

/// The game grid and its occupancy bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Zero-indexed last fully-hidden row
    hidden_rows: usize,
    /// Row-major (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Dimensions are fixed for the board's lifetime.
    pub fn new(width: usize, height: usize, hidden_rows: usize) -> Self {
        assert!(width > 0 && height > hidden_rows + 2, "degenerate board geometry");
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(x, y));
            }
        }
        Self {
            width,
            height,
            hidden_rows,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Zero-indexed last fully-hidden row (the overflow canary row)
    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    /// First row of the visible play area
    pub fn first_visible_row(&self) -> usize {
        self.hidden_rows + 1
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell at (x, y). Panics when out of range - bounds are the caller's
    /// responsibility.
    pub fn cell_at(&self, x: usize, y: usize) -> &Cell {
        assert!(x < self.width && y < self.height, "cell access out of range");
        &self.cells[self.index(x, y)]
    }

    /// Whether a signed coordinate lies inside the grid
    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    pub fn occupant_at(&self, x: usize, y: usize) -> Option<&Occupant> {
        self.cell_at(x, y).occupant()
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cell_at(x, y).is_occupied()
    }

    /// Shared collision rule: a candidate cell is usable by `id` iff it is
    /// inside the grid and either empty or already held by that same entity.
    pub fn cell_free_for(&self, id: PieceId, x: i32, y: i32) -> bool {
        if !self.is_inside(x, y) {
            return false;
        }
        match self.occupant_at(x as usize, y as usize) {
            Some(occupant) => occupant.id == id,
            None => true,
        }
    }

    /// Place an occupant record on each of the given cells.
    ///
    /// Callers validate first; finding a different entity already on a
    /// target cell means the occupancy bookkeeping is corrupt.
    pub fn place(&mut self, cells: &[Coord], occupant: Occupant) {
        for &(x, y) in cells {
            assert!(self.is_inside(x, y), "placement out of range at ({x}, {y})");
            let idx = self.index(x as usize, y as usize);
            if let Some(existing) = self.cells[idx].occupant() {
                assert!(
                    existing.id == occupant.id,
                    "cell ({x}, {y}) already held by entity {}",
                    existing.id
                );
            }
            self.cells[idx].set_occupant(Some(occupant));
        }
    }

    /// Remove entity `id` from each of the given cells.
    pub(crate) fn vacate(&mut self, cells: &[Coord], id: PieceId) {
        for &(x, y) in cells {
            assert!(self.is_inside(x, y), "vacate out of range at ({x}, {y})");
            let idx = self.index(x as usize, y as usize);
            match self.cells[idx].take_occupant() {
                Some(occupant) if occupant.id == id => {}
                other => panic!(
                    "vacating ({x}, {y}) expected entity {id}, found {:?}",
                    other.map(|o| o.id)
                ),
            }
        }
    }

    /// Flip the locked bit on the cells of a freshly locked entity.
    pub(crate) fn mark_locked(&mut self, cells: &[Coord], id: PieceId) {
        for &(x, y) in cells {
            assert!(self.is_inside(x, y), "lock mark out of range at ({x}, {y})");
            let idx = self.index(x as usize, y as usize);
            match self.cells[idx].occupant_mut() {
                Some(occupant) if occupant.id == id => occupant.locked = true,
                other => panic!(
                    "locking ({x}, {y}) expected entity {id}, found {:?}",
                    other.map(|o| o.id)
                ),
            }
        }
    }

    /// Primary game-over signal: true when any cell of `threshold_row`
    /// holds a locked entity. The same check serves both the per-tick and
    /// the spawn-time call site.
    pub fn is_overflowed(&self, threshold_row: usize) -> bool {
        (0..self.width).any(|x| {
            self.occupant_at(x, threshold_row)
                .is_some_and(|occupant| occupant.locked)
        })
    }

    /// A row is complete only when every cell holds an occupant; an empty
    /// cell is always a gap, whatever its neighbors hold.
    fn row_full(&self, y: usize) -> bool {
        (0..self.width).all(|x| self.is_occupied(x, y))
    }

    /// Clear a completed row and shift every row above it down by one,
    /// moving occupants only (cell coordinates stay put). The vacated top
    /// row ends empty.
    fn clear_row_and_shift(&mut self, row: usize) {
        for x in 0..self.width {
            let idx = self.index(x, row);
            self.cells[idx].set_occupant(None);
        }
        for y in (1..=row).rev() {
            for x in 0..self.width {
                let src = self.index(x, y - 1);
                let moved = self.cells[src].take_occupant();
                let dst = self.index(x, y);
                self.cells[dst].set_occupant(moved);
            }
        }
    }

    /// Scan the visible rows bottom to top and remove every completed one,
    /// returning how many were cleared.
    ///
    /// After a clear the same row index is re-tested, because the row above
    /// has just shifted into it - this is what makes cascading multi-clears
    /// work in a single pass, without a second compaction sweep.
    pub fn clear_completed_lines(&mut self) -> usize {
        let mut rows = Vec::new();
        self.clear_completed_lines_into(&mut rows)
    }

    /// As [`clear_completed_lines`](Self::clear_completed_lines), also
    /// appending each cleared row index (as it stood when cleared) to `out`.
    pub fn clear_completed_lines_into(&mut self, out: &mut Vec<usize>) -> usize {
        let mut cleared = 0;
        let stop = self.hidden_rows + 2;
        let mut y = self.height - 1;
        while y >= stop {
            if self.row_full(y) {
                self.clear_row_and_shift(y);
                out.push(y);
                cleared += 1;
                // re-test the same index: the row above just moved in
            } else {
                if y == stop {
                    break;
                }
                y -= 1;
            }
        }
        cleared
    }
}
