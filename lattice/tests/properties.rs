//! Property-based tests for the lattice engines.

use std::collections::BTreeSet;

use lattice::{elementary, Boundary, Direction, LatticeError, LifeGrid, RuleTable};
use proptest::prelude::*;

fn boundary() -> impl Strategy<Value = Boundary> {
    prop_oneof![Just(Boundary::Periodic), Just(Boundary::Zero)]
}

fn life_grid(max: usize) -> impl Strategy<Value = LifeGrid> {
    (1..max, 1..max)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), prop::collection::vec(any::<bool>(), w * h)))
        .prop_map(|(w, h, cells)| {
            let mut grid = LifeGrid::new(w, h);
            for (i, alive) in cells.into_iter().enumerate() {
                if alive {
                    grid.set(i / w, i % w, true).unwrap();
                }
            }
            grid
        })
}

// =============================================================================
// Rule decoding
// =============================================================================

proptest! {
    #[test]
    fn out_of_range_rules_are_rejected(n in prop_oneof![i64::MIN..0, 256..i64::MAX]) {
        prop_assert_eq!(
            RuleTable::decode(n),
            Err(LatticeError::InvalidRuleNumber(n.to_string()))
        );
    }

    #[test]
    fn text_and_number_decode_agree(n in 0u8..=255) {
        prop_assert_eq!(RuleTable::parse(&n.to_string()), RuleTable::decode(i64::from(n)));
    }
}

// =============================================================================
// 1-D stepping
// =============================================================================

proptest! {
    #[test]
    fn step_is_pure(
        cells in prop::collection::vec(any::<bool>(), 0..64),
        rule in any::<u8>(),
        boundary in boundary(),
    ) {
        let table = RuleTable::new(rule);
        let first = elementary::step(&cells, &table, boundary);
        prop_assert_eq!(first.len(), cells.len());
        prop_assert_eq!(first, elementary::step(&cells, &table, boundary));
    }

    #[test]
    fn constant_rules_give_constant_rows(
        cells in prop::collection::vec(any::<bool>(), 1..64),
        boundary in boundary(),
    ) {
        let width = cells.len();
        prop_assert_eq!(elementary::step(&cells, &RuleTable::new(0), boundary), vec![false; width]);
        prop_assert_eq!(elementary::step(&cells, &RuleTable::new(255), boundary), vec![true; width]);
    }

    #[test]
    fn periodic_step_commutes_with_rotation(
        cells in prop::collection::vec(any::<bool>(), 1..64),
        rule in any::<u8>(),
        shift in 0usize..64,
    ) {
        let table = RuleTable::new(rule);
        let shift = shift % cells.len();
        let mut rotated = cells.clone();
        rotated.rotate_left(shift);

        let mut expected = elementary::step(&cells, &table, Boundary::Periodic);
        expected.rotate_left(shift);
        prop_assert_eq!(elementary::step(&rotated, &table, Boundary::Periodic), expected);
    }

    #[test]
    fn zero_boundary_matches_a_dead_padded_row(
        cells in prop::collection::vec(any::<bool>(), 1..64),
        rule in any::<u8>(),
    ) {
        // Padding with one dead cell per side and wrapping is the same as a dead boundary.
        let table = RuleTable::new(rule);
        let mut padded = vec![false];
        padded.extend(&cells);
        padded.push(false);
        let wrapped = elementary::step(&padded, &table, Boundary::Periodic);
        prop_assert_eq!(
            elementary::step(&cells, &table, Boundary::Zero),
            wrapped[1..wrapped.len() - 1].to_vec()
        );
    }
}

// =============================================================================
// 2-D stepping and growth
// =============================================================================

proptest! {
    #[test]
    fn life_step_keeps_bounds_and_viewport(grid in life_grid(16)) {
        let next = grid.step();
        prop_assert_eq!((next.width(), next.height()), (grid.width(), grid.height()));
        prop_assert_eq!(next.viewport(), grid.viewport());
        prop_assert_eq!(next, grid.step());
    }

    #[test]
    fn expansion_preserves_live_cells(grid in life_grid(12), amount in 0usize..8) {
        for direction in Direction::ALL {
            let mut grown = grid.clone();
            grown.expand_border(direction, amount);
            let (dr, dc) = match direction {
                Direction::North => (amount, 0),
                Direction::West => (0, amount),
                Direction::South | Direction::East => (0, 0),
            };
            let shifted: BTreeSet<_> = grid.live_cells().map(|(r, c)| (r + dr, c + dc)).collect();
            prop_assert_eq!(grown.live_cells().collect::<BTreeSet<_>>(), shifted);
            prop_assert_eq!(grown.visible_rows(), grid.visible_rows());
        }
    }

    #[test]
    fn single_cell_contact_matches_its_position(
        width in 3usize..12,
        height in 3usize..12,
        row_seed in any::<usize>(),
        col_seed in any::<usize>(),
    ) {
        let (row, col) = (row_seed % height, col_seed % width);
        let mut grid = LifeGrid::new(width, height);
        grid.set(row, col, true).unwrap();

        let mut expected = BTreeSet::new();
        if row == 0 { expected.insert(Direction::North); }
        if row == height - 1 { expected.insert(Direction::South); }
        if col == 0 { expected.insert(Direction::West); }
        if col == width - 1 { expected.insert(Direction::East); }
        prop_assert_eq!(grid.border_contact(), expected);
    }

    #[test]
    fn advance_leaves_no_edge_contact(grid in life_grid(10)) {
        let mut grid = grid;
        grid.advance(4);
        prop_assert!(grid.border_contact().is_empty());
    }
}
