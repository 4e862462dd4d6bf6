//! Tests for board search and word classification properties.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use strictly_wordgrid::{
    ALPHABET, Coord, Dictionary, Direction, Grid, Verdict, WordFinder, classify, exists_on_board,
    find_path, generate_with,
};

fn cat_grid() -> Grid {
    "CATTT/CATTT/CATTT/CATTT/CATTT".parse().expect("Valid grid")
}

fn dictionary() -> Dictionary {
    Dictionary::from_words(["cat", "impossible", "act", "tact"])
}

/// Random word of `len` letters drawn from the grid's own letters, so that a
/// fair share of them are actually traceable.
fn word_from_grid(grid: &Grid, len: usize, rng: &mut StdRng) -> String {
    (0..len)
        .map(|_| *grid.cells().choose(rng).expect("Grid is non-empty"))
        .collect()
}

#[test]
fn test_cat_is_ok() {
    assert_eq!(classify(&cat_grid(), "cat", &dictionary()), Verdict::Ok);
}

#[test]
fn test_impossible_is_not_on_board() {
    assert_eq!(
        classify(&cat_grid(), "impossible", &dictionary()),
        Verdict::NotOnBoard
    );
}

#[test]
fn test_gibberish_is_not_word_on_any_grid() {
    let mut rng = StdRng::seed_from_u64(1);
    let word = "fsjdakfkldsfjdslkfjdlksf";
    assert_eq!(classify(&cat_grid(), word, &dictionary()), Verdict::NotAWord);
    for _ in 0..20 {
        let grid = generate_with(5, &mut rng).expect("Valid size");
        assert_eq!(classify(&grid, word, &dictionary()), Verdict::NotAWord);
    }
}

#[test]
fn test_not_in_dictionary_even_when_traceable() {
    // "tac" traces on the CAT grid but is not a word.
    assert!(exists_on_board(&cat_grid(), "tac"));
    assert_eq!(classify(&cat_grid(), "tac", &dictionary()), Verdict::NotAWord);
}

#[test]
fn test_board_search_is_case_insensitive() {
    assert!(exists_on_board(&cat_grid(), "cat"));
    assert!(exists_on_board(&cat_grid(), "CaT"));
}

#[test]
fn test_every_letter_on_grid_is_found() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let grid = generate_with(5, &mut rng).expect("Valid size");
        for &letter in grid.cells() {
            assert!(exists_on_board(&grid, &letter.to_string()));
        }
    }
}

#[test]
fn test_words_with_absent_letters_are_never_found() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let grid = generate_with(5, &mut rng).expect("Valid size");
        let Some(&missing) = ALPHABET.iter().find(|&&c| !grid.contains_letter(c)) else {
            continue;
        };
        let mut word = word_from_grid(&grid, 3, &mut rng);
        word.insert(rng.gen_range(0..=word.len()), missing);
        assert!(!exists_on_board(&grid, &word), "{word} on\n{grid}");
    }
}

#[test]
fn test_direction_order_does_not_change_result() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut orders = vec![Direction::ALL];
    let mut reversed = Direction::ALL;
    reversed.reverse();
    orders.push(reversed);
    for _ in 0..6 {
        let mut order = Direction::ALL;
        order.shuffle(&mut rng);
        orders.push(order);
    }

    let mut found = 0;
    for _ in 0..100 {
        let grid = generate_with(4, &mut rng).expect("Valid size");
        let len = rng.gen_range(1..=6);
        let word = word_from_grid(&grid, len, &mut rng);
        let expected = exists_on_board(&grid, &word);
        if expected {
            found += 1;
        }
        for order in orders.iter().copied() {
            assert_eq!(WordFinder::with_order(order).exists(&grid, &word), expected);
        }
    }
    assert!(found > 0, "Sample should include traceable words");
}

#[test]
fn test_no_cell_reuse() {
    // All A except a single B at (0, 1).
    let grid: Grid = "ABAAA/AAAAA/AAAAA/AAAAA/AAAAA".parse().expect("Valid grid");
    assert!(exists_on_board(&grid, "ABA"));
    assert!(exists_on_board(&grid, "AAB"));
    // The only B cannot be used twice.
    assert!(!exists_on_board(&grid, "ABAB"));
    assert!(!exists_on_board(&grid, "BAB"));
}

#[test]
fn test_abandoned_branch_does_not_block_siblings() {
    // Every path starts at the lone B (1, 0), steps onto an A, then runs the
    // B column end to end. Branches that enter the column at its middle fail
    // first, and a visited set leaking out of them would hide the real path.
    let grid: Grid = "AAB/BAB/AAB".parse().expect("Valid grid");
    assert!(exists_on_board(&grid, "BABBB"));

    let mut reversed = Direction::ALL;
    reversed.reverse();
    for order in [Direction::ALL, reversed] {
        let path = WordFinder::with_order(order)
            .find(&grid, "BABBB")
            .expect("Word is on the board");
        assert_eq!(path[0], Coord::new(1, 0));
        assert_eq!(path[3], Coord::new(1, 2));
    }
}

#[test]
fn test_witness_path_is_simple_and_adjacent() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let grid = generate_with(5, &mut rng).expect("Valid size");
        let word = word_from_grid(&grid, rng.gen_range(1..=5), &mut rng);
        let Some(path) = find_path(&grid, &word) else {
            assert!(!exists_on_board(&grid, &word));
            continue;
        };

        assert_eq!(path.len(), word.len());
        for (coord, letter) in path.iter().zip(word.chars()) {
            assert_eq!(grid.get(*coord), Some(letter));
        }
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1);
            assert_ne!(a, b);
        }
        let mut unique = path.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), path.len());
    }
}

#[test]
fn test_cat_path_starts_in_first_column() {
    let path = find_path(&cat_grid(), "cat").expect("cat is on the board");
    assert_eq!(path[0].col, 0);
    assert_eq!(path[1].col, 1);
    assert_eq!(path[2].col, 2);
    assert_eq!(path[0], Coord::new(0, 0));
}

#[test]
fn test_generated_boards_vary() {
    let mut rng = StdRng::seed_from_u64(6);
    let boards: Vec<Grid> = (0..10)
        .map(|_| generate_with(5, &mut rng).expect("Valid size"))
        .collect();
    for board in &boards {
        assert_eq!(board.len(), 25);
        assert!(board.cells().iter().all(|c| ALPHABET.contains(c)));
    }
    assert!(boards.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_generated_letters_cover_alphabet() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut counts = [0usize; 26];
    for _ in 0..400 {
        let grid = generate_with(5, &mut rng).expect("Valid size");
        for &c in grid.cells() {
            counts[(c as u8 - b'A') as usize] += 1;
        }
    }
    // 10_000 draws: each letter expected ~385 times.
    assert!(counts.iter().all(|&n| (250..=520).contains(&n)), "{counts:?}");
}
