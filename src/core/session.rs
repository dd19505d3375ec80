//! Session module - the driver-facing boundary
//!
//! One external driver issues serialized commands against the single active
//! piece; the session routes them, runs line clearing when a piece locks,
//! and notifies the scoring and overflow collaborators. There is no
//! concurrency here by design: every mutation happens inside one command.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{ensure, Result};
use tracing::debug;

use crate::core::board::Board;
use crate::core::entity::PlacedEntity;
use crate::core::piece::Piece;
use crate::core::rng::ShapeSource;
use crate::core::snapshot::BoardSnapshot;
use crate::types::{
    Command, Coord, PieceId, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS, SPAWN_COLUMN,
    SPAWN_ROW,
};

/// Scoring collaborator: receives one call per lock event that cleared
/// at least one line.
pub trait ScoreSink {
    fn on_lines_cleared(&mut self, count: u32);
}

/// Game-over collaborator: `on_overflow` fires exactly once, after which
/// the driver must stop issuing commands and construct a new session.
pub trait OverflowSink {
    fn on_overflow(&mut self);
}

impl<S: ScoreSink> ScoreSink for Rc<RefCell<S>> {
    fn on_lines_cleared(&mut self, count: u32) {
        self.borrow_mut().on_lines_cleared(count);
    }
}

impl<S: OverflowSink> OverflowSink for Rc<RefCell<S>> {
    fn on_overflow(&mut self) {
        self.borrow_mut().on_overflow();
    }
}

/// Construction-time constants; fixed for the session's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    /// Zero-indexed last fully-hidden row (overflow canary)
    pub hidden_rows: usize,
    pub spawn_column: i32,
    pub spawn_row: i32,
    pub seed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            hidden_rows: HIDDEN_ROWS,
            spawn_column: SPAWN_COLUMN,
            spawn_row: SPAWN_ROW,
            seed: 1,
        }
    }
}

/// A single game session: board, at most one active piece, and the
/// collaborator seams.
pub struct Session {
    board: Board,
    active: Option<Piece>,
    source: ShapeSource,
    next_id: PieceId,
    spawn: Coord,
    score_sink: Option<Box<dyn ScoreSink>>,
    overflow_sink: Option<Box<dyn OverflowSink>>,
    overflowed: bool,
    last_cleared_rows: Vec<usize>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        ensure!(config.width >= 4, "board width {} cannot fit a piece", config.width);
        ensure!(
            config.height > config.hidden_rows + 2,
            "board height {} leaves no visible rows under hidden band {}",
            config.height,
            config.hidden_rows
        );
        ensure!(
            config.spawn_column >= 1 && (config.spawn_column as usize) < config.width - 1,
            "spawn column {} out of range",
            config.spawn_column
        );
        ensure!(
            config.spawn_row >= 1 && (config.spawn_row as usize) <= config.hidden_rows,
            "spawn row {} outside the hidden band",
            config.spawn_row
        );
        Ok(Self {
            board: Board::new(config.width, config.height, config.hidden_rows),
            active: None,
            source: ShapeSource::new(config.seed),
            next_id: 1,
            spawn: (config.spawn_column, config.spawn_row),
            score_sink: None,
            overflow_sink: None,
            overflowed: false,
            last_cleared_rows: Vec::new(),
        })
    }

    /// Register the scoring collaborator
    pub fn set_score_sink(&mut self, sink: impl ScoreSink + 'static) {
        self.score_sink = Some(Box::new(sink));
    }

    /// Register the game-over collaborator
    pub fn set_overflow_sink(&mut self, sink: impl OverflowSink + 'static) {
        self.overflow_sink = Some(Box::new(sink));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for drivers that stage positions up front
    /// (and for tests)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// The active piece through its capability seam
    pub fn active_entity(&self) -> Option<&dyn PlacedEntity> {
        self.active.as_ref().map(|piece| piece as &dyn PlacedEntity)
    }

    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Shape the source will deliver to the next kind-less spawn
    pub fn next_preview(&self) -> ShapeKind {
        self.source.peek()
    }

    /// Spawn a new active piece at the configured anchor, orientation 0.
    ///
    /// Draws from the shape source when `kind` is `None`. Rejected (returns
    /// `None`, no state change) when the session has overflowed, when the
    /// current piece has not locked yet, or when the spawn footprint is
    /// blocked. Spawning detaches the previous piece; the cells it locked
    /// into remain the durable record on the board.
    pub fn spawn_piece(&mut self, kind: Option<ShapeKind>) -> Option<PieceId> {
        if self.check_overflow() {
            return None;
        }
        if self.active.as_ref().is_some_and(|piece| !piece.is_locked()) {
            return None;
        }
        let kind = kind.unwrap_or_else(|| self.source.draw());
        let id = self.next_id;
        let piece = Piece::spawn(&mut self.board, id, kind, self.spawn)?;
        self.next_id += 1;
        self.active = Some(piece);
        debug!(id, kind = kind.as_str(), "piece spawned");
        Some(id)
    }

    /// Route one command to the active piece.
    ///
    /// Returns the operation's success value; rejections (stale piece id,
    /// overflowed session, blocked motion) are no-ops. A command that ends
    /// with the piece newly locked synchronously clears completed lines,
    /// reports the count to the scoring collaborator, and runs the overflow
    /// check.
    pub fn command(&mut self, id: PieceId, command: Command) -> bool {
        if self.overflowed {
            return false;
        }
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if piece.id() != id {
            return false;
        }
        self.last_cleared_rows.clear();
        let was_locked = piece.is_locked();
        let accepted = match command {
            Command::Move(dx) => piece.try_move(&mut self.board, dx),
            Command::Rotate { clockwise } => piece.try_rotate(&mut self.board, clockwise),
            Command::Tick => piece.tick_drop(&mut self.board),
            Command::SpeedDrop => piece.speed_drop(&mut self.board),
        };
        let newly_locked = !was_locked && piece.is_locked();
        if newly_locked {
            self.settle_lock();
        }
        accepted
    }

    /// Pull-based renderer view of the whole grid
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::new(
            self.board.width(),
            self.board.height(),
            self.board.hidden_rows(),
        );
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Re-capture into an existing snapshot without reallocating
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.refresh(&self.board, &self.last_cleared_rows, self.overflowed);
    }

    /// Post-lock bookkeeping: clear lines, feed the scoring collaborator,
    /// then run the authoritative overflow check.
    fn settle_lock(&mut self) {
        let cleared = self
            .board
            .clear_completed_lines_into(&mut self.last_cleared_rows);
        if cleared > 0 {
            debug!(cleared, "completed lines removed");
            if let Some(sink) = self.score_sink.as_mut() {
                sink.on_lines_cleared(cleared as u32);
            }
        }
        self.check_overflow();
    }

    /// The one overflow check, shared by the per-lock and spawn-time call
    /// sites. Fires the collaborator exactly once.
    fn check_overflow(&mut self) -> bool {
        if self.overflowed {
            return true;
        }
        if self.board.is_overflowed(self.board.hidden_rows()) {
            self.overflowed = true;
            debug!("locked piece in the hidden band; session over");
            if let Some(sink) = self.overflow_sink.as_mut() {
                sink.on_overflow();
            }
            return true;
        }
        false
    }
}
