//! Property tests for board and game loop invariants
//!
//! Invariants covered:
//! - The active piece never overlaps settled cells or leaves the grid.
//! - Every locking step clears no row that stays full, and the settled cell
//!   count changes by `4 - columns * cleared`.
//! - `lines_removed` never decreases and the tick interval stays positive.
//! - Rotating right then left the same number of times is an identity when
//!   nothing blocks.
//! - `drop_piece` leaves the piece unable to move down.

use proptest::prelude::*;
use wahoo::core::grid::Grid;
use wahoo::core::{Board, GameConfig, GameLoop, Piece, SimpleRng, StepOutcome};
use wahoo::types::{GameCommand, PlayState, ShapeKind};

fn active_piece_fits(board: &Board<SimpleRng>) -> bool {
    match board.current() {
        Some(piece) => piece
            .cells()
            .all(|(row, col)| board.grid().get(row, col) == Some(None)),
        None => true,
    }
}

fn command_strategy() -> impl Strategy<Value = Option<GameCommand>> {
    prop_oneof![
        Just(None),
        Just(Some(GameCommand::Left)),
        Just(Some(GameCommand::Right)),
        Just(Some(GameCommand::RotateLeft)),
        Just(Some(GameCommand::RotateRight)),
        Just(Some(GameCommand::Drop)),
    ]
}

fn kind_strategy() -> impl Strategy<Value = ShapeKind> {
    (0usize..7).prop_map(|i| ShapeKind::ALL[i])
}

proptest! {
    #[test]
    fn generated_games_respect_invariants(
        seed in any::<u32>(),
        rows in 4usize..24,
        columns in 4usize..14,
        inputs in proptest::collection::vec(command_strategy(), 1..400),
    ) {
        let config = GameConfig { rows, columns, ..GameConfig::default() };
        let mut game = GameLoop::new(config, SimpleRng::new(seed), (), ()).unwrap();
        game.new_game();

        for input in inputs {
            let lines_before = game.lines_removed();
            let filled_before = game.board().filled_count();

            match input {
                Some(command) => {
                    game.apply_command(command);
                    prop_assert_eq!(game.board().filled_count(), filled_before);
                }
                None => {
                    let outcome = game.tick();
                    let cleared = game.lines_removed() - lines_before;
                    let filled_after = game.board().filled_count();
                    if cleared > 0 || filled_after != filled_before {
                        prop_assert_eq!(
                            filled_after + cleared as usize * columns,
                            filled_before + 4
                        );
                    }
                    if !outcome.keep_scheduling {
                        prop_assert_eq!(game.state(), PlayState::GameOver);
                    }
                }
            }

            prop_assert!(active_piece_fits(game.board()));
            prop_assert!(game.lines_removed() >= lines_before);
            prop_assert!(game.tick_interval_ms() > 0);
            for row in 0..rows as i32 {
                prop_assert!(!game.board().grid().is_row_full(row));
            }

            if game.state() == PlayState::GameOver {
                break;
            }
        }
    }

    #[test]
    fn outside_cells_always_filled(
        rows in 1usize..30,
        columns in 1usize..30,
        offset in 0i32..50,
    ) {
        let grid = Grid::new(rows, columns);
        let (r, c) = (rows as i32, columns as i32);
        prop_assert!(grid.cell_filled(-1 - offset, 0));
        prop_assert!(grid.cell_filled(r + offset, 0));
        prop_assert!(grid.cell_filled(0, -1 - offset));
        prop_assert!(grid.cell_filled(0, c + offset));
        prop_assert!(!grid.cell_filled(r - 1, c - 1));
    }

    #[test]
    fn rotation_round_trip_is_identity(
        kind in kind_strategy(),
        turns in 1usize..9,
        row in 4i32..14,
        column in 4i32..6,
    ) {
        let grid = Grid::new(20, 10);
        let start = Piece::at(kind, row, column, 0);
        let mut piece = start;
        for _ in 0..turns {
            prop_assert!(piece.rotate_right(&grid));
        }
        for _ in 0..turns {
            prop_assert!(piece.rotate_left(&grid));
        }
        prop_assert_eq!(piece, start);
    }

    #[test]
    fn drop_rests_on_something(seed in any::<u32>(), shifts in -5i32..5) {
        let mut board = Board::new(20, 10, SimpleRng::new(seed));
        board.reset();
        for _ in 0..shifts.abs() {
            if shifts < 0 { board.left(); } else { board.right(); }
        }
        board.drop_piece();
        prop_assert!(!board.down());
        let locked = matches!(
            board.step(),
            StepOutcome::Locked { .. } | StepOutcome::ToppedOut { .. }
        );
        prop_assert!(locked);
    }
}
