//! Active piece module - the falling four-cell unit
//!
//! A piece owns its position, orientation and lock-delay state; the board
//! only sees occupancy records. Movement, rotation and gravity all share one
//! collision rule and are all-or-nothing: a rejected command leaves both the
//! piece and the board exactly as they were.
//!
//! Lock delay: the first tick that finds the piece blocked below parks it in
//! `Locking` instead of lodging it outright. A successful move or rotation
//! that un-blocks it returns it to `Free`; the next tick that still finds it
//! blocked commits it permanently.

use tracing::{debug, trace};

use crate::core::board::Board;
use crate::core::cell::Occupant;
use crate::core::entity::PlacedEntity;
use crate::core::shapes::{footprint, orientation_offsets, OrientationRow};
use crate::types::{Coord, LockState, PieceId, ShapeKind, BLOCKS_PER_PIECE, DISTINCT_ORIENTATIONS};

/// The falling piece currently under driver control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    kind: ShapeKind,
    /// Orientation index, always in `0..DISTINCT_ORIENTATIONS`
    orientation: usize,
    /// Anchor cell; block offsets are relative to it
    base: Coord,
    cells: [Coord; BLOCKS_PER_PIECE],
    lock: LockState,
}

impl Piece {
    /// Place a new piece on the board at orientation 0.
    ///
    /// Returns `None` without touching the board when any footprint cell is
    /// out of bounds or held by another entity.
    pub fn spawn(board: &mut Board, id: PieceId, kind: ShapeKind, base: Coord) -> Option<Self> {
        let offsets = orientation_offsets(kind, 0);
        let cells = footprint(base, &offsets);
        if !cells.iter().all(|&(x, y)| board.cell_free_for(id, x, y)) {
            debug!(id, kind = kind.as_str(), "spawn footprint blocked");
            return None;
        }
        board.place(
            &cells,
            Occupant {
                id,
                kind,
                locked: false,
            },
        );
        Some(Self {
            id,
            kind,
            orientation: 0,
            base,
            cells,
            lock: LockState::Free,
        })
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    pub fn cells(&self) -> &[Coord; BLOCKS_PER_PIECE] {
        &self.cells
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    pub fn is_locked(&self) -> bool {
        self.lock == LockState::Locked
    }

    fn candidate_ok(&self, board: &Board, cells: &[Coord; BLOCKS_PER_PIECE]) -> bool {
        cells.iter().all(|&(x, y)| board.cell_free_for(self.id, x, y))
    }

    /// Whether the floor or another entity sits directly under any block
    fn blocked_below(&self, board: &Board) -> bool {
        self.cells
            .iter()
            .any(|&(x, y)| !board.cell_free_for(self.id, x, y + 1))
    }

    /// Atomically re-home the piece onto `cells`, then re-evaluate the
    /// lock-delay state: a piece no longer blocked below is free again.
    fn commit(
        &mut self,
        board: &mut Board,
        base: Coord,
        orientation: usize,
        cells: [Coord; BLOCKS_PER_PIECE],
    ) {
        board.vacate(&self.cells, self.id);
        board.place(
            &cells,
            Occupant {
                id: self.id,
                kind: self.kind,
                locked: false,
            },
        );
        self.base = base;
        self.orientation = orientation;
        self.cells = cells;
        if !self.blocked_below(board) {
            self.lock = LockState::Free;
        }
    }

    /// Translate horizontally by `dx`. Boolean no-op when the piece is
    /// locked, a target cell is out of bounds, or a target cell is held by
    /// another entity.
    pub fn try_move(&mut self, board: &mut Board, dx: i32) -> bool {
        if self.lock == LockState::Locked {
            return false;
        }
        let base = (self.base.0 + dx, self.base.1);
        let cells = footprint(base, &orientation_offsets(self.kind, self.orientation));
        if !self.candidate_ok(board, &cells) {
            trace!(id = self.id, dx, "move rejected");
            return false;
        }
        self.commit(board, base, self.orientation, cells);
        true
    }

    /// Rotate one step. The next orientation wraps with a symmetric 0-based
    /// modulo; counter-clockwise steps backward through the same cycle.
    ///
    /// Wall compensation: the I piece is the only kind whose bounding box
    /// changes between orientations, so near a wall its rotated footprint
    /// can overhang the grid with no valid in-place target. The candidate is
    /// pre-shifted laterally by the minimal amount that brings it back
    /// inside horizontal bounds, then validated cell by cell like any move.
    /// Any failing cell aborts the whole rotation with no partial mutation.
    pub fn try_rotate(&mut self, board: &mut Board, clockwise: bool) -> bool {
        if self.lock == LockState::Locked {
            return false;
        }
        let next = if clockwise {
            (self.orientation + 1) % DISTINCT_ORIENTATIONS
        } else {
            (self.orientation + DISTINCT_ORIENTATIONS - 1) % DISTINCT_ORIENTATIONS
        };
        let offsets = orientation_offsets(self.kind, next);
        let shift = self.wall_compensation(board, &offsets);
        let base = (self.base.0 + shift, self.base.1);
        let cells = footprint(base, &offsets);
        if !self.candidate_ok(board, &cells) {
            trace!(id = self.id, clockwise, "rotation rejected");
            return false;
        }
        self.commit(board, base, next, cells);
        true
    }

    /// Lateral pre-shift bringing an I-piece footprint inside horizontal
    /// bounds; zero for every other kind.
    fn wall_compensation(&self, board: &Board, offsets: &OrientationRow) -> i32 {
        if self.kind != ShapeKind::I {
            return 0;
        }
        let mut min_dx = 0;
        let mut max_dx = 0;
        for &(dx, _) in offsets {
            min_dx = min_dx.min(dx);
            max_dx = max_dx.max(dx);
        }
        let left_overhang = -(self.base.0 + min_dx);
        if left_overhang > 0 {
            return left_overhang;
        }
        let right_edge = board.width() as i32 - 1;
        let right_overhang = self.base.0 + max_dx - right_edge;
        if right_overhang > 0 {
            return -right_overhang;
        }
        0
    }

    /// One gravity step.
    ///
    /// Returns true iff the piece descended one cell. A blocked descent
    /// parks the piece in `Locking` for one grace tick; a tick that finds it
    /// already `Locking` and still blocked commits it to `Locked`.
    pub fn tick_drop(&mut self, board: &mut Board) -> bool {
        match self.lock {
            LockState::Locked => return false,
            LockState::Locking => {
                if self.blocked_below(board) {
                    self.lock_now(board);
                    return false;
                }
                // Support vanished before the grace tick elapsed.
                self.lock = LockState::Free;
            }
            LockState::Free => {}
        }
        let base = (self.base.0, self.base.1 + 1);
        let cells = footprint(base, &orientation_offsets(self.kind, self.orientation));
        if self.candidate_ok(board, &cells) {
            self.commit(board, base, self.orientation, cells);
            true
        } else {
            self.lock = LockState::Locking;
            false
        }
    }

    /// Tick until locked. Returns false as a no-op when already locked.
    pub fn speed_drop(&mut self, board: &mut Board) -> bool {
        if self.is_locked() {
            return false;
        }
        while !self.is_locked() {
            self.tick_drop(board);
        }
        true
    }

    fn lock_now(&mut self, board: &mut Board) {
        self.lock = LockState::Locked;
        board.mark_locked(&self.cells, self.id);
        debug!(id = self.id, kind = self.kind.as_str(), "piece locked");
    }
}

impl PlacedEntity for Piece {
    fn entity_id(&self) -> PieceId {
        self.id
    }

    fn occupied_cells(&self) -> [Coord; BLOCKS_PER_PIECE] {
        self.cells
    }

    fn is_locked(&self) -> bool {
        Piece::is_locked(self)
    }
}
