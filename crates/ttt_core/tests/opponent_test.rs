//! Tests for the greedy computer opponent.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ttt_core::rules::check_win;
use ttt_core::{Board, Cell, Choice, GameState, GreedyOpponent, Mark, Position};

fn opponent(seed: u64) -> GreedyOpponent<ChaCha8Rng> {
    GreedyOpponent::new(Mark::O, ChaCha8Rng::seed_from_u64(seed))
}

fn board(s: &str) -> Board {
    s.parse().expect("valid board literal")
}

#[test]
fn test_first_reply_to_center_is_an_empty_cell() {
    for seed in 0..32 {
        let mut game = GameState::new();
        game.apply_move(Position::Center, Mark::X).unwrap();

        let choice = opponent(seed).choose(game.board());
        let Choice::Random(pos) = choice else {
            panic!("expected a random move, got {:?}", choice);
        };
        assert_ne!(pos, Position::Center);
        game.apply_move(pos, Mark::O).expect("opponent picked a legal cell");
    }
}

#[test]
fn test_blocks_middle_row() {
    // X holds 3 and 4, O has nothing to win with.
    let b = board("O__ XX_ ___");
    assert_eq!(opponent(0).choose(&b).position(), Position::MiddleRight);
}

#[test]
fn test_win_beats_block() {
    // O can win at 2 while X threatens 5.
    let b = board("OO_ XX_ X__");
    assert_eq!(opponent(0).choose(&b), Choice::Win(Position::TopRight));
}

#[test]
fn test_lowest_win_index_is_taken() {
    // O wins at 2 (top row) or 6 (left column); 2 comes first.
    let b = board("OO_ OXX _X_");
    assert_eq!(opponent(0).choose(&b), Choice::Win(Position::TopRight));
}

#[test]
fn test_random_choice_spreads_over_empty_cells() {
    let b = board("___ _X_ ___");
    let mut opp = opponent(42);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(opp.choose(&b).position());
    }
    assert_eq!(seen.len(), 8);
    assert!(!seen.contains(&Position::Center));
}

fn arb_board() -> impl Strategy<Value = Board> {
    prop::array::uniform9(prop_oneof![
        2 => Just(Cell::Empty),
        1 => Just(Cell::Occupied(Mark::X)),
        1 => Just(Cell::Occupied(Mark::O)),
    ])
    .prop_map(Board::from_cells)
}

fn lowest_completing(b: &Board, mark: Mark) -> Option<Position> {
    (0..9)
        .filter_map(Position::from_index)
        .filter(|&p| b.is_empty(p))
        .find(|&p| {
            let mut next = *b;
            next.set(p, Cell::Occupied(mark));
            check_win(&next, mark)
        })
}

proptest! {
    #[test]
    fn choice_follows_win_block_random(b in arb_board(), seed in any::<u64>()) {
        let choice = opponent(seed).choose(&b);
        match (lowest_completing(&b, Mark::O), lowest_completing(&b, Mark::X)) {
            (Some(win), _) => prop_assert_eq!(choice, Choice::Win(win)),
            (None, Some(block)) => prop_assert_eq!(choice, Choice::Block(block)),
            (None, None) => match choice {
                Choice::Random(pos) => prop_assert!(b.is_empty(pos)),
                Choice::Exhausted => prop_assert!(b.empty_positions().is_empty()),
                other => prop_assert!(false, "unexpected choice {:?}", other),
            },
        }
    }

    #[test]
    fn win_and_block_do_not_depend_on_seed(
        b in arb_board(),
        s1 in any::<u64>(),
        s2 in any::<u64>(),
    ) {
        let a = opponent(s1).choose(&b);
        let c = opponent(s2).choose(&b);
        if !matches!(a, Choice::Random(_)) {
            prop_assert_eq!(a, c);
        }
    }
}
