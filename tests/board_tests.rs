use seabattle::{Board, BoardError, Cell, Coord, Shot, BOARD_SIZE, FLEET, PLACEMENT_TARGET};

fn at(row: i64, col: i64) -> Coord {
    Coord::new(row, col).unwrap()
}

fn full_board() -> Board {
    let mut board = Board::new();
    for at in Coord::all().take(PLACEMENT_TARGET) {
        board.place(at).unwrap();
    }
    board
}

#[test]
fn test_placement_target_matches_fleet() {
    let cells: usize = FLEET.iter().map(|p| p.length() * p.count()).sum();
    assert_eq!(PLACEMENT_TARGET, cells);
    assert_eq!(PLACEMENT_TARGET, 20);
}

#[test]
fn test_fleet_composition() {
    let fleet: Vec<(&str, usize, usize)> = FLEET
        .iter()
        .map(|p| (p.name(), p.length(), p.count()))
        .collect();
    assert_eq!(
        fleet,
        vec![
            ("Battleship", 4, 1),
            ("Cruiser", 3, 2),
            ("Destroyer", 2, 3),
            ("Boat", 1, 4),
        ]
    );
}

#[test]
fn test_coord_range() {
    assert!(Coord::new(1, 1).is_ok());
    assert!(Coord::new(BOARD_SIZE as i64, BOARD_SIZE as i64).is_ok());
    assert_eq!(Coord::new(0, 5).unwrap_err(), BoardError::OutOfRange);
    assert_eq!(Coord::new(5, 11).unwrap_err(), BoardError::OutOfRange);
    assert_eq!(Coord::new(-3, 2).unwrap_err(), BoardError::OutOfRange);

    let c = at(3, 7);
    assert_eq!((c.row(), c.col()), (3, 7));
    assert_eq!(Coord::all().count(), BOARD_SIZE * BOARD_SIZE);
}

#[test]
fn test_place_marks_cell_occupied() {
    let mut board = Board::new();
    board.place(at(1, 1)).unwrap();
    assert_eq!(board.cell(at(1, 1)), Cell::Occupied);
    assert_eq!(board.placed(), 1);
    assert_eq!(board.remaining_pieces(), 1);
    assert!(!board.is_ready());
}

#[test]
fn test_place_twice_on_same_cell_rejected() {
    let mut board = Board::new();
    board.place(at(4, 4)).unwrap();
    assert_eq!(board.place(at(4, 4)).unwrap_err(), BoardError::Occupied);
    assert_eq!(board.placed(), 1);
}

#[test]
fn test_ready_board_rejects_placement() {
    let mut board = full_board();
    assert!(board.is_ready());
    assert_eq!(board.place(at(10, 10)).unwrap_err(), BoardError::PlacementComplete);
    assert_eq!(board.placed(), PLACEMENT_TARGET);
}

#[test]
fn test_fire_hit_and_miss() {
    let mut board = Board::new();
    board.place(at(2, 3)).unwrap();

    assert_eq!(board.fire(at(2, 3)).unwrap(), Shot::Hit);
    assert_eq!(board.cell(at(2, 3)), Cell::Hit);
    assert_eq!(board.fire(at(5, 5)).unwrap(), Shot::Miss);
    assert_eq!(board.cell(at(5, 5)), Cell::Miss);

    assert_eq!(board.remaining_pieces(), 0);
    assert_eq!(board.placed(), 1);
}

#[test]
fn test_repeat_fire_rejected_without_change() {
    let mut board = Board::new();
    board.place(at(1, 1)).unwrap();
    board.fire(at(1, 1)).unwrap();
    board.fire(at(1, 2)).unwrap();
    let before = board;

    assert_eq!(board.fire(at(1, 1)).unwrap_err(), BoardError::AlreadyTargeted);
    assert_eq!(board.fire(at(1, 2)).unwrap_err(), BoardError::AlreadyTargeted);
    assert_eq!(board, before);
}

#[test]
fn test_views_hide_pieces_from_opponent() {
    let mut board = Board::new();
    board.place(at(1, 1)).unwrap();
    board.place(at(1, 2)).unwrap();
    board.fire(at(1, 2)).unwrap();
    board.fire(at(3, 3)).unwrap();

    let own = board.own_view();
    assert_eq!(own[0][0], Cell::Occupied);
    assert_eq!(own[0][1], Cell::Hit);
    assert_eq!(own[2][2], Cell::Miss);

    let theirs = board.opponent_view();
    assert_eq!(theirs[0][0], Cell::Empty);
    assert_eq!(theirs[0][1], Cell::Hit);
    assert_eq!(theirs[2][2], Cell::Miss);
    assert!(theirs.iter().flatten().all(|c| *c != Cell::Occupied));
}

#[test]
fn test_pieces_iterates_placements() {
    let mut board = Board::new();
    board.place(at(2, 9)).unwrap();
    board.place(at(7, 1)).unwrap();
    let pieces: Vec<(i64, i64)> = board.pieces().map(|c| (c.row(), c.col())).collect();
    assert_eq!(pieces, vec![(2, 9), (7, 1)]);
}

#[test]
fn test_cell_symbols() {
    assert_eq!(Cell::Empty.symbol(), "");
    assert_eq!(Cell::Occupied.symbol(), "S");
    assert_eq!(Cell::Hit.symbol(), "X");
    assert_eq!(Cell::Miss.symbol(), "*");
}
