//! Shape table - static rotation geometry for the seven piece kinds
//!
//! Each kind maps to five orientation slots of four `(dx, dy)` offsets from
//! the piece's base cell; offset 0 is always the base itself. Only four
//! orientations are distinct - slot 4 is a byte-identical copy of slot 0 so
//! a rotation step can index forward without a separate wrap calculation.
//! The tables are immutable shared data; there is no behavior here beyond
//! lookup.

use crate::types::{Coord, Offset, ShapeKind, BLOCKS_PER_PIECE, DISTINCT_ORIENTATIONS, ORIENTATION_SLOTS};

/// One orientation: the four block offsets from the base cell
pub type OrientationRow = [Offset; BLOCKS_PER_PIECE];

/// Full rotation cycle for one kind (4 distinct + 1 wrap-around duplicate)
pub type ShapeTable = [OrientationRow; ORIENTATION_SLOTS];

const I_TABLE: ShapeTable = [
    [(0, 0), (0, 1), (0, 2), (0, 3)], // vertical
    [(0, 0), (1, 0), (2, 0), (3, 0)], // horizontal
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, 1), (0, 2), (0, 3)],
];

const S_TABLE: ShapeTable = [
    [(0, 0), (0, -1), (1, -1), (-1, 0)],
    [(0, 0), (0, -1), (1, 0), (1, 1)],
    [(0, 0), (0, -1), (1, -1), (-1, 0)],
    [(0, 0), (0, -1), (1, 0), (1, 1)],
    [(0, 0), (0, -1), (1, -1), (-1, 0)],
];

const Z_TABLE: ShapeTable = [
    [(0, 0), (-1, 0), (0, 1), (1, 1)],
    [(0, 0), (0, -1), (-1, 0), (-1, 1)],
    [(0, 0), (-1, 0), (0, 1), (1, 1)],
    [(0, 0), (0, -1), (-1, 0), (-1, 1)],
    [(0, 0), (-1, 0), (0, 1), (1, 1)],
];

const O_TABLE: ShapeTable = [
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
];

const L_TABLE: ShapeTable = [
    [(0, 0), (0, -1), (0, 1), (1, 1)],
    [(0, 0), (-1, 0), (-1, 1), (1, 0)],
    [(0, 0), (0, -1), (-1, -1), (0, 1)],
    [(0, 0), (-1, 0), (1, 0), (1, -1)],
    [(0, 0), (0, -1), (0, 1), (1, 1)],
];

const J_TABLE: ShapeTable = [
    [(0, 0), (0, -1), (0, 1), (-1, 1)],
    [(0, 0), (-1, -1), (-1, 0), (1, 0)],
    [(0, 0), (0, 1), (1, -1), (0, -1)],
    [(0, 0), (-1, 0), (1, 0), (1, 1)],
    [(0, 0), (0, -1), (0, 1), (-1, 1)],
];

const T_TABLE: ShapeTable = [
    [(0, 0), (-1, 1), (0, 1), (1, 1)],
    [(0, 0), (-1, 0), (-1, -1), (-1, 1)],
    [(0, 0), (-1, -1), (0, -1), (1, -1)],
    [(0, 0), (1, 0), (1, -1), (1, 1)],
    [(0, 0), (-1, 1), (0, 1), (1, 1)],
];

/// Full five-slot table for a kind
pub fn shape_table(kind: ShapeKind) -> &'static ShapeTable {
    match kind {
        ShapeKind::I => &I_TABLE,
        ShapeKind::S => &S_TABLE,
        ShapeKind::Z => &Z_TABLE,
        ShapeKind::O => &O_TABLE,
        ShapeKind::L => &L_TABLE,
        ShapeKind::J => &J_TABLE,
        ShapeKind::T => &T_TABLE,
    }
}

/// Block offsets for a kind at an orientation index.
///
/// The index is taken modulo the four distinct rotations, so any forward
/// increment is a valid argument.
pub fn orientation_offsets(kind: ShapeKind, index: usize) -> OrientationRow {
    shape_table(kind)[index % DISTINCT_ORIENTATIONS]
}

/// Absolute cells covered by an orientation anchored at `base`
pub fn footprint(base: Coord, offsets: &OrientationRow) -> [Coord; BLOCKS_PER_PIECE] {
    offsets.map(|(dx, dy)| (base.0 + dx, base.1 + dy))
}
