//! Placed-entity capability
//!
//! The minimal surface shared by anything that can occupy board cells and
//! be asked whether it has already locked. Only the active piece implements
//! it today; the seam exists so future piece-like entities (garbage blocks,
//! say) can join without the board caring.

use crate::types::{Coord, PieceId, BLOCKS_PER_PIECE};

pub trait PlacedEntity {
    /// Monotonic identity, unique per spawned entity
    fn entity_id(&self) -> PieceId;

    /// The four board cells currently covered
    fn occupied_cells(&self) -> [Coord; BLOCKS_PER_PIECE];

    /// Whether the entity has permanently lodged
    fn is_locked(&self) -> bool;
}
