//! Behavioural tests for the robot's move selection.

use tictactoe_bot::rules::{LINES, check_winner};
use tictactoe_bot::{Board, Cell, Heuristic, MoveEngine, Symbol};

/// Every one of the 3^9 cell layouts, legal game position or not.
fn all_boards() -> impl Iterator<Item = Board> {
    (0..3u32.pow(9)).map(|mut code| {
        let mut cells = [Cell::Empty; 9];
        for cell in cells.iter_mut() {
            *cell = match code % 3 {
                0 => Cell::Empty,
                1 => Cell::Marked(Symbol::X),
                _ => Cell::Marked(Symbol::O),
            };
            code /= 3;
        }
        Board::from_cells(cells)
    })
}

fn board(layout: &str) -> Board {
    layout.parse().expect("valid layout")
}

#[test]
fn test_never_picks_occupied_cell_and_none_only_when_full() {
    let mut engine = MoveEngine::seeded(11);
    for board in all_boards() {
        let full = board.empty_cells().is_empty();
        for round in [0, 1, 4] {
            match engine.select_opponent_move(&board, Symbol::O, Symbol::X, round) {
                Some(index) => {
                    assert!(!full);
                    assert!(board.is_empty(index), "picked occupied {index} on {board:?}");
                }
                None => assert!(full, "no move on a board with free cells: {board:?}"),
            }
        }
    }
}

#[test]
fn test_winner_iff_monochromatic_line() {
    for board in all_boards() {
        let monochrome = LINES.iter().find_map(|&[a, b, c]| {
            match (board.get(a), board.get(b), board.get(c)) {
                (Some(Cell::Marked(x)), Some(Cell::Marked(y)), Some(Cell::Marked(z)))
                    if x == y && y == z =>
                {
                    Some(x)
                }
                _ => None,
            }
        });
        assert_eq!(check_winner(&board), monochrome, "{board:?}");
    }
}

#[test]
fn test_win_before_block_everywhere() {
    let mut engine = MoveEngine::seeded(12);
    for board in all_boards() {
        let Some(decision) = engine.decide(&board, Symbol::O, Symbol::X, 1) else {
            continue;
        };
        if decision.heuristic == Heuristic::Block {
            assert_eq!(
                tictactoe_bot::rules::completing_cell(&board, Symbol::O),
                None,
                "blocked although a win was available on {board:?}"
            );
        }
    }
}

#[test]
fn test_blocks_human_pair() {
    let mut engine = MoveEngine::seeded(13);
    for round in 1..4 {
        assert_eq!(
            engine.select_opponent_move(&board("XX_ ___ ___"), Symbol::O, Symbol::X, round),
            Some(2)
        );
    }
}

#[test]
fn test_completes_own_pair() {
    let mut engine = MoveEngine::seeded(14);
    for round in 1..4 {
        assert_eq!(
            engine.select_opponent_move(&board("OO_ ___ ___"), Symbol::O, Symbol::X, round),
            Some(2)
        );
    }
}

#[test]
fn test_prefers_win_over_separate_block() {
    let mut engine = MoveEngine::seeded(15);
    // Human X threatens column 0 at 6, robot O completes column 1 at 7.
    let decision = engine
        .decide(&board("XO_ XO_ ___"), Symbol::O, Symbol::X, 2)
        .expect("free cells");
    assert_eq!(decision.index, 7);
    assert_eq!(decision.heuristic, Heuristic::Win);
}

#[test]
fn test_opening_corner_on_first_move() {
    for seed in 0..64 {
        let mut engine = MoveEngine::seeded(seed);
        let index = engine
            .select_opponent_move(&Board::new(), Symbol::O, Symbol::X, 0)
            .expect("free cells");
        assert!([0, 2, 6, 8].contains(&index));
    }
}

#[test]
fn test_opening_corners_are_all_reachable() {
    let mut seen = [false; 9];
    for seed in 0..200 {
        let mut engine = MoveEngine::seeded(seed);
        if let Some(index) = engine.select_opponent_move(&board("____X____"), Symbol::O, Symbol::X, 0) {
            seen[index] = true;
        }
    }
    assert_eq!(
        seen,
        [true, false, true, false, false, false, true, false, true]
    );
}

#[test]
fn test_opening_ignores_threats() {
    // The corner rule outranks blocking on the robot's first move.
    for seed in 0..32 {
        let mut engine = MoveEngine::seeded(seed);
        let decision = engine
            .decide(&board("_XX ___ ___"), Symbol::O, Symbol::X, 0)
            .expect("free cells");
        assert_eq!(decision.heuristic, Heuristic::Opening);
        assert!([0, 6, 8].contains(&decision.index));
    }
}
