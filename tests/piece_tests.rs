//! Active piece tests - movement, rotation, lock delay, wall compensation

use tetrad_core::core::{Board, Occupant, Piece, PlacedEntity};
use tetrad_core::types::{LockState, ShapeKind};

fn board() -> Board {
    Board::new(12, 26, 5)
}

fn locked(id: u32) -> Occupant {
    Occupant {
        id,
        kind: ShapeKind::I,
        locked: true,
    }
}

#[test]
fn test_spawn_starts_free_at_orientation_zero() {
    let mut board = board();
    let piece = Piece::spawn(&mut board, 1, ShapeKind::T, (5, 2)).unwrap();
    assert_eq!(piece.orientation(), 0);
    assert_eq!(piece.lock_state(), LockState::Free);
    assert!(!piece.is_locked());
    assert_eq!(piece.entity_id(), 1);
}

#[test]
fn test_move_stops_at_the_walls() {
    let mut board = board();
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::O, (5, 2)).unwrap();

    let mut rights = 0;
    while piece.try_move(&mut board, 1) {
        rights += 1;
    }
    // O spans two columns; base column tops out at width - 2.
    assert_eq!(rights, 5);
    assert_eq!(piece.cells()[1].0, 11);

    let mut lefts = 0;
    while piece.try_move(&mut board, -1) {
        lefts += 1;
    }
    assert_eq!(lefts, 10);
    assert_eq!(piece.cells()[0].0, 0);
}

#[test]
fn test_move_blocked_by_other_entity() {
    let mut board = board();
    board.place(&[(7, 2)], locked(99));
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::O, (5, 2)).unwrap();

    let before = piece.clone();
    assert!(!piece.try_move(&mut board, 1));
    assert_eq!(piece, before);
    // Occupancy on both sides of the rejected move is unchanged.
    assert!(board.is_occupied(5, 2));
    assert_eq!(board.occupant_at(7, 2).map(|o| o.id), Some(99));
}

#[test]
fn test_self_overlap_is_never_a_collision() {
    let mut board = board();
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::I, (5, 2)).unwrap();
    // A vertical I moving down one re-covers three of its own cells.
    assert!(piece.tick_drop(&mut board));
    assert_eq!(piece.cells(), &[(5, 3), (5, 4), (5, 5), (5, 6)]);
}

#[test]
fn test_failed_rotation_mutates_nothing() {
    let mut board = board();
    // Rotating a T into slot 1 needs the column left of its base.
    board.place(&[(0, 9)], locked(50));
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::T, (1, 10)).unwrap();
    let before = piece.clone();
    assert!(!piece.try_rotate(&mut board, true));
    assert_eq!(piece, before);
    assert_eq!(piece.orientation(), 0);
}

#[test]
fn test_rotation_commits_atomically() {
    let mut board = board();
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::L, (5, 10)).unwrap();
    assert!(piece.try_rotate(&mut board, true));
    assert_eq!(piece.orientation(), 1);
    // Board occupancy matches the new footprint exactly.
    for &(x, y) in piece.cells() {
        assert_eq!(board.occupant_at(x as usize, y as usize).map(|o| o.id), Some(1));
    }
    let mut count = 0;
    for y in 0..board.height() {
        for x in 0..board.width() {
            if board.is_occupied(x, y) {
                count += 1;
            }
        }
    }
    assert_eq!(count, 4);
}

#[test]
fn test_lock_delay_two_tick_commit() {
    let mut board = board();
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::O, (5, 2)).unwrap();

    // Ride gravity to the floor.
    while piece.tick_drop(&mut board) {}
    assert_eq!(piece.lock_state(), LockState::Locking);
    assert_eq!(piece.cells()[2].1, 25);

    // Second blocked tick commits permanently.
    assert!(!piece.tick_drop(&mut board));
    assert_eq!(piece.lock_state(), LockState::Locked);
    for &(x, y) in piece.cells() {
        assert!(board
            .occupant_at(x as usize, y as usize)
            .is_some_and(|o| o.locked));
    }

    // Locked is terminal: nothing moves any more.
    assert!(!piece.try_move(&mut board, 1));
    assert!(!piece.try_rotate(&mut board, true));
    assert!(!piece.tick_drop(&mut board));
}

#[test]
fn test_lateral_move_recovers_from_locking() {
    let mut board = board();
    // A one-column ledge under the spawn path.
    board.place(&[(5, 10), (6, 10)], locked(77));
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::O, (5, 2)).unwrap();

    while piece.tick_drop(&mut board) {}
    assert_eq!(piece.lock_state(), LockState::Locking);

    // Sliding right off the ledge un-blocks the piece: grace recovered.
    assert!(piece.try_move(&mut board, 2));
    assert_eq!(piece.lock_state(), LockState::Free);

    // Gravity resumes instead of locking.
    assert!(piece.tick_drop(&mut board));
}

#[test]
fn test_lateral_move_on_support_stays_locking() {
    let mut board = board();
    board.place(&[(4, 10), (5, 10), (6, 10), (7, 10)], locked(77));
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::O, (5, 2)).unwrap();

    while piece.tick_drop(&mut board) {}
    assert_eq!(piece.lock_state(), LockState::Locking);

    // Still fully on the ledge after the slide; the grace tick is not
    // re-armed by a move that leaves the piece blocked.
    assert!(piece.try_move(&mut board, 1));
    assert_eq!(piece.lock_state(), LockState::Locking);
    assert!(!piece.tick_drop(&mut board));
    assert!(piece.is_locked());
}

#[test]
fn test_i_rotation_near_right_wall_compensates() {
    let mut board = board();
    // Vertical I one column from the right edge.
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::I, (10, 8)).unwrap();
    assert!(piece.try_rotate(&mut board, true));
    assert_eq!(piece.orientation(), 1);
    // Footprint fully inside bounds after the lateral pre-shift.
    assert_eq!(piece.cells(), &[(8, 8), (9, 8), (10, 8), (11, 8)]);
}

#[test]
fn test_i_rotation_near_left_wall_compensates() {
    let mut board = board();
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::I, (1, 8)).unwrap();
    assert!(piece.try_rotate(&mut board, true));
    // Horizontal footprint extends right of the base; near the left wall a
    // vertical I at column 1 already fits in place.
    assert_eq!(piece.cells(), &[(1, 8), (2, 8), (3, 8), (4, 8)]);

    // Rotating back to vertical needs no compensation either.
    assert!(piece.try_rotate(&mut board, true));
    assert_eq!(piece.cells(), &[(1, 8), (1, 9), (1, 10), (1, 11)]);
}

#[test]
fn test_i_rotation_fails_when_compensated_target_occupied() {
    let mut board = board();
    board.place(&[(11, 8)], locked(42));
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::I, (10, 8)).unwrap();

    let before = piece.clone();
    assert!(!piece.try_rotate(&mut board, true));
    assert_eq!(piece, before);
    assert_eq!(piece.orientation(), 0);
    // The blocker is untouched and the piece still stands in place.
    assert_eq!(board.occupant_at(11, 8).map(|o| o.id), Some(42));
    assert_eq!(board.occupant_at(10, 9).map(|o| o.id), Some(1));
}

#[test]
fn test_speed_drop_runs_to_locked() {
    let mut board = board();
    let mut piece = Piece::spawn(&mut board, 1, ShapeKind::T, (5, 2)).unwrap();
    assert!(piece.speed_drop(&mut board));
    assert!(piece.is_locked());
    // T slot 0 hangs below the base; the lowest blocks rest on the floor.
    assert_eq!(piece.cells(), &[(5, 24), (4, 25), (5, 25), (6, 25)]);

    // A second speed drop is a no-op on a locked piece.
    assert!(!piece.speed_drop(&mut board));
}

#[test]
fn test_occupied_cells_capability_matches_board() {
    let mut board = board();
    let piece = Piece::spawn(&mut board, 3, ShapeKind::Z, (5, 10)).unwrap();
    let entity: &dyn PlacedEntity = &piece;
    for (x, y) in entity.occupied_cells() {
        assert_eq!(board.occupant_at(x as usize, y as usize).map(|o| o.id), Some(3));
    }
    assert!(!entity.is_locked());
    assert_eq!(entity.entity_id(), 3);
}
