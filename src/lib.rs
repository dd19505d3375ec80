//! Falling-block puzzle core.
//!
//! One active four-cell piece at a time falls on a rectangular grid, can be
//! translated and rotated under collision constraints, locks in place, and
//! triggers row clearing when a row becomes fully occupied. Rendering, input
//! devices, the driving clock and score arithmetic are external
//! collaborators: the crate exposes a command-oriented [`core::Session`]
//! boundary, pull-based snapshots for renderers, and sink traits for
//! line-clear and overflow notifications.

pub mod core;
pub mod scoring;
pub mod types;

pub use crate::core::{
    Board, BoardSnapshot, OverflowSink, Piece, PlacedEntity, ScoreSink, Session, SessionConfig,
    SnapshotCell,
};
pub use crate::types::{Command, LockState, PieceId, ShapeKind};
