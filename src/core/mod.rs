//! Core module - pure game rules with no I/O
//!
//! Everything the grid/collision/rotation/line-clear state machine needs
//! lives here; rendering, input and the driving clock stay outside.

pub mod board;
pub mod cell;
pub mod entity;
pub mod piece;
pub mod rng;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use board::Board;
pub use cell::{Cell, Occupant};
pub use entity::PlacedEntity;
pub use piece::Piece;
pub use rng::{ShapeSource, SimpleRng};
pub use session::{OverflowSink, ScoreSink, Session, SessionConfig};
pub use shapes::orientation_offsets;
pub use snapshot::{BoardSnapshot, SnapshotCell};
