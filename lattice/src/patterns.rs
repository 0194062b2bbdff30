// patterns.rs - Preset library for the Life lattice
//
// Offsets are (row, col) relative to the center of the visible area.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{LatticeError, Result};
use crate::life::LifeGrid;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern { name: "Glider", cells: GLIDER },
    Pattern { name: "Block", cells: &[(0, 0), (0, 1), (1, 0), (1, 1)] },
    Pattern { name: "Blinker", cells: &[(0, -1), (0, 0), (0, 1)] },
    Pattern {
        name: "Toad",
        cells: &[(-1, 0), (-1, 1), (-1, 2), (0, -1), (0, 0), (0, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(-1, -1), (-1, 0), (0, -1), (0, 0), (1, 1), (1, 2), (2, 1), (2, 2)],
    },
    Pattern { name: "Pulsar", cells: PULSAR },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 0), (0, 1), (-1, 1), (1, 0), (1, -1)],
    },
    Pattern { name: "Gosper Glider Gun", cells: GOSPER_GUN },
    Pattern { name: "101", cells: P101 },
    Pattern { name: "119", cells: P119 },
    Pattern { name: "1234", cells: P1234 },
    Pattern { name: "295", cells: P295 },
    Pattern { name: "GtoG", cells: G_TO_G },
    Pattern { name: "60P", cells: P60 },
    Pattern { name: "AK94", cells: AK94 },
    Pattern { name: "Trigger", cells: TRIGGER },
    Pattern { name: "Snail", cells: SNAIL },
    Pattern { name: "Tub", cells: TUB },
];

/// Case-insensitive lookup.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name.trim()))
}

/// Writes `pattern` around the viewport center of `grid`, on top of whatever
/// is already there. Cells that land outside the grid are skipped; the number
/// skipped is returned.
pub fn apply_pattern(grid: &mut LifeGrid, pattern: &Pattern) -> usize {
    let (center_row, center_col) = grid.view_center();
    let mut clipped = 0;
    for &(d_row, d_col) in pattern.cells {
        let row = center_row as i64 + i64::from(d_row);
        let col = center_col as i64 + i64::from(d_col);
        if grid.set_signed(row, col).is_err() {
            clipped += 1;
        }
    }
    if clipped > 0 {
        log::warn!(
            "{}: {clipped} of {} cells fell outside the {}x{} grid",
            pattern.name,
            pattern.cells.len(),
            grid.height(),
            grid.width()
        );
    }
    clipped
}

/// A fresh `view_width x view_height` grid holding only the named preset.
pub fn load(name: &str, view_width: usize, view_height: usize) -> Result<LifeGrid> {
    let pattern = find(name).ok_or_else(|| LatticeError::UnknownPreset(name.to_string()))?;
    let mut grid = LifeGrid::new(view_width, view_height);
    apply_pattern(&mut grid, pattern);
    Ok(grid)
}

/// Clears the grid and fills the viewport with a seeded soup, about a third alive.
pub fn apply_random_pattern(grid: &mut LifeGrid, seed_value: u64) {
    grid.clear();

    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    grid.fill_view(|_, _| {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        (seed >> 16) % 3 == 0
    });
}

const GLIDER: &[(i32, i32)] = &[
    (1, 0), (0, 1), (1, 1), (1, -1), (-1, 0),
];

const P101: &[(i32, i32)] = &[
    (1, 0), (0, 1), (1, -1), (-1, 1), (-2, 0), (-2, -1), (-1, -2), (0, -2),
    (-1, -4), (-2, -4), (0, -4), (1, -4), (-1, 3), (-2, 3), (0, 3), (1, 3),
    (-5, -4), (-6, -4), (-6, -5), (-5, -6), (-4, -6), (-3, -6), (-2, -6), (-1, -6),
    (0, -6), (1, -6), (2, -6), (3, -6), (4, -6), (4, -4), (5, -4), (5, -5),
    (-3, -8), (-2, -8), (-3, -9), (-2, -9), (1, -8), (2, -8), (1, -9), (2, -9),
    (-5, 3), (-6, 3), (-6, 4), (-5, 5), (-4, 5), (-2, 5), (-3, 5), (-1, 5),
    (0, 5), (1, 5), (2, 5), (3, 5), (4, 5), (4, 3), (5, 3), (5, 4),
    (-3, 7), (-2, 7), (-3, 8), (-2, 8), (1, 7), (2, 7), (1, 8), (2, 8),
];

const P119: &[(i32, i32)] = &[
    (0, -28), (1, -27), (-1, -27), (2, -27), (-2, -27), (-2, -24), (-3, -24), (-1, -24),
    (-3, -23), (-2, -23), (3, -24), (2, -24), (1, -24), (3, -23), (2, -23), (5, -22),
    (6, -22), (7, -22), (-5, -22), (-6, -22), (-7, -22), (-7, -20), (7, -20), (-5, -20),
    (-5, -19), (-4, -19), (-5, -18), (-5, -17), (-5, -16), (-5, -15), (-6, -17), (-5, -14),
    (-5, -13), (-4, -13), (5, -20), (5, -19), (4, -19), (5, -18), (5, -17), (5, -16),
    (5, -15), (6, -17), (5, -14), (5, -13), (4, -13), (-2, -15), (-2, -14), (2, -14),
    (2, -15), (-6, -12), (-7, -13), (-8, -12), (6, -12), (7, -13), (8, -12), (-6, -10),
    (-6, -9), (-6, -8), (-6, -7), (-7, -7), (-7, -6), (-6, -6), (-6, -5), (6, -10),
    (6, -9), (6, -8), (6, -7), (7, -7), (7, -6), (6, -6), (6, -5), (-4, -5),
    (-3, -5), (-2, -5), (-4, -4), (-3, -4), (-2, -4), (-4, -3), (-3, -3), (-4, -2),
    (-5, -2), (-3, -1), (4, -5), (3, -5), (2, -5), (4, -4), (3, -4), (2, -4),
    (4, -3), (3, -3), (4, -2), (5, -2), (3, -1), (-6, 0), (-6, 1), (-5, 1),
    (6, 0), (6, 1), (5, 1), (-5, 3), (-4, 3), (-5, 4), (-4, 4), (-5, 5),
    (-4, 5), (5, 3), (4, 3), (5, 4), (4, 4), (5, 5), (4, 5), (-7, 3),
    (-8, 4), (-9, 5), (-8, 6), (7, 3), (8, 4), (9, 5), (8, 6),
];

const P1234: &[(i32, i32)] = &[
    (0, 0), (-2, 0), (-3, -1), (-4, 0), (-3, 1), (-2, -2), (-1, -2), (0, -2),
    (0, 2), (-2, 2), (-1, 2), (1, -3), (0, -4), (0, -5), (1, -5), (1, 3),
    (0, 4), (0, 5), (1, 5), (2, 2), (2, 1), (2, 0), (2, -1), (2, -2),
    (4, 0), (6, 0), (5, -1), (5, 1),
];

const P295: &[(i32, i32)] = &[
    (-20, -20), (-19, -20), (-20, -19), (-21, -19), (-21, -18), (-21, -17), (-22, -17), (-22, -18),
    (-19, -21), (-18, -21), (-17, -21), (-18, -22), (-17, -22), (-17, -19), (-16, -19), (-15, -18),
    (-15, -17), (-15, -16), (-14, -16), (-14, -17), (-13, -17), (-12, -17), (-16, -15), (-16, -14),
    (-17, -15), (-17, -14), (-18, -15), (-17, -13), (-17, -12), (-19, -16), (-19, -17), (-11, -16),
    (-11, -15), (-11, -14), (-11, -13), (-11, -12), (-12, -14), (-12, -11), (-13, -11), (-14, -11),
    (-15, -11), (-16, -11), (-14, -12), (-10, -16), (-9, -15), (-8, -14), (-8, -16), (-16, -10),
    (-15, -9), (-14, -8), (-16, -8), (-12, -19), (-12, -20), (-12, -21), (-12, -22), (-11, -20),
    (-11, -21), (-11, -22), (-9, -21), (-10, -21), (-10, -23), (-9, -22), (-9, -23), (-9, -19),
    (-7, -22), (-22, -11), (-21, -11), (-20, -11), (-23, -10), (-23, -9), (-22, -9), (-21, -9),
    (-21, -10), (-22, -7), (-19, -9), (-19, -12), (-20, -12), (-21, -12), (-22, -12), (-7, -18),
    (-6, -19), (-5, -20), (-4, -18), (-3, -18), (-18, -7), (-19, -6), (-20, -5), (-18, -4),
    (-18, -3), (-9, -11), (-8, -11), (-7, -11), (-6, -11), (-5, -11), (-4, -11), (-3, -11),
    (-7, -12), (-2, -10), (-1, -10), (-1, -11), (-5, -10), (-5, -9), (-4, -9), (-3, -9),
    (-3, -8), (-2, -8), (-2, -7), (-2, -6), (-2, -5), (-1, -7), (-1, -6), (0, -6),
    (-1, -4), (-3, -4), (-4, -3), (-5, -2), (-6, -2), (-7, -2), (-8, -2), (-7, -1),
    (-6, -1), (-6, 0), (-4, -1), (-8, -3), (-9, -3), (-9, -4), (-9, -5), (-10, -5),
    (-11, -3), (-11, -4), (-11, -5), (-11, -6), (-11, -7), (-11, -8), (-11, -9), (-12, -7),
    (-10, -2), (-10, -1), (-11, -1), (-2, -1), (1, -3), (-3, 1), (2, -6), (2, -7),
    (3, -5), (4, -7), (4, -6), (5, -6), (6, -6), (-5, 3), (-6, 2), (-7, 2),
    (-7, 4), (-6, 4), (-6, 5), (-6, 6), (2, -1), (1, 0), (0, 1), (-1, 2),
    (2, 2), (-1, -2), (4, -1), (5, -1), (6, -1), (6, 0), (5, 0), (4, 0),
    (5, -2), (8, -2), (7, 1), (8, 1), (0, 4), (-1, 4), (-1, 5), (-1, 6),
    (0, 6), (0, 5), (-2, 5), (1, 7), (1, 8), (-2, 8), (0, 10), (0, 11),
    (0, 12), (3, 9), (4, 9), (5, 9), (6, 9), (7, 10), (8, 10), (9, 3),
    (9, 4), (9, 5), (9, 6), (10, 7), (10, 8), (10, 0), (11, 0), (12, 0),
    (14, 2), (13, 2), (13, 3), (13, 5), (11, 5), (5, 11), (5, 13), (3, 13),
    (2, 13), (2, 14), (15, 5), (15, 6), (15, 7), (14, 7), (13, 7), (16, 6),
    (15, 9), (16, 9), (16, 10), (15, 10), (16, 12), (15, 13), (13, 15), (12, 16),
    (10, 16), (10, 15), (9, 15), (9, 16), (7, 13), (7, 14), (7, 15), (6, 15),
    (5, 15), (6, 16), (18, 11), (20, 10), (20, 9), (19, 8), (11, 18), (10, 20),
    (9, 20), (8, 19), (18, 13), (18, 14), (19, 14), (17, 14), (17, 15), (18, 16),
    (18, 17), (17, 18), (16, 18), (18, 19), (19, 18), (15, 17), (14, 17), (14, 18),
    (14, 19), (13, 18), (15, 21), (16, 22), (17, 22), (18, 22), (18, 23), (15, 23),
    (15, 24), (16, 25), (20, 23), (20, 24), (21, 24), (21, 23), (22, 23), (22, 22),
    (23, 22), (23, 21), (23, 20), (24, 21), (24, 20), (23, 18), (22, 18), (22, 17),
    (22, 16), (23, 15), (24, 15), (25, 16), (21, 15), (26, 19), (27, 18), (28, 19),
    (28, 20), (26, 22), (22, 26), (19, 26), (18, 27), (19, 28), (20, 28),
];

const G_TO_G: &[(i32, i32)] = &[
    (19, 24), (17, 23), (18, 23), (18, 22), (19, 22), (18, 1), (17, 2), (18, 0),
    (17, 0), (16, 0), (17, -3), (16, -3), (15, -3), (17, -4), (16, -5), (-8, -18),
    (-9, -18), (-8, -19), (-7, -19), (-9, -20),
];

const P60: &[(i32, i32)] = &[
    (-3, -26), (-2, -25), (-3, -25), (-2, -26), (0, -20), (-1, -20), (-1, -19), (-1, -18),
    (0, -17), (-12, -20), (-13, -21), (-14, -21), (-15, -20), (-14, -19), (-13, -19), (-14, -3),
    (-15, -4), (-16, -4), (-17, -4), (-17, -3), (-22, -5), (-23, -5), (-23, -6), (-22, -6),
    (-17, 4), (-18, 5), (-18, 6), (-17, 7), (-16, 6), (-16, 5), (-5, 6), (-4, 7),
    (-4, 8), (-4, 9), (-5, 9), (-3, 14), (-2, 15), (-3, 15), (-2, 14), (7, 9),
    (8, 8), (9, 8), (10, 9), (9, 10), (8, 10), (11, -17), (11, -16), (12, -18),
    (13, -17), (13, -16), (12, -15), (12, -8), (12, -7), (11, -7), (10, -7), (9, -8),
    (17, -6), (18, -6), (18, -5), (17, -5),
];

const AK94: &[(i32, i32)] = &[
    (14, 1), (13, 0), (13, 2), (12, -1), (11, -1), (10, -1), (9, 0), (8, 1),
    (9, 2), (10, 3), (11, 3), (12, 3), (17, 3), (16, 3), (16, 4), (18, 4),
    (18, 5), (18, 6), (19, 6), (18, -3), (18, -2), (19, -2), (19, -3), (15, -9),
    (14, -9), (15, -10), (14, -11), (13, -12), (13, -13), (12, -13), (11, -13), (10, -13),
    (9, -14), (11, -15), (11, -16), (10, -16), (14, -14), (14, -15), (15, -16), (15, -13),
    (16, -15), (16, -14), (9, -11), (10, -11), (10, -10), (9, -10), (9, -13), (5, -8),
    (5, -9), (4, -8), (3, -9), (3, -10), (3, -11), (2, -11), (-2, -7), (-2, -6),
    (-3, -6), (-4, -7), (-4, -8), (-4, -9), (-5, -9), (-4, -1), (-5, -1), (-4, 0),
    (-4, 1), (-3, 2), (-2, 2), (-2, 1), (-4, 7), (-4, 8), (-5, 8), (-5, 7),
    (-1, 14), (0, 14), (-1, 15), (0, 16), (1, 17), (1, 18), (2, 18), (3, 18),
    (4, 18), (5, 18), (5, 19), (3, 20), (3, 21), (4, 21), (4, 16), (5, 16),
    (5, 15), (4, 15), (0, 19), (0, 20), (-1, 21), (-2, 20), (-2, 19), (-1, 18),
    (9, 14), (9, 13), (10, 13), (11, 14), (11, 15), (11, 16), (12, 16),
];

const TRIGGER: &[(i32, i32)] = &[
    (19, -22), (18, -21), (17, -22), (18, -23), (17, -24), (16, -24), (16, -23), (11, -17),
    (11, -16), (10, -16), (9, -17), (10, -18), (10, -13), (11, -12), (11, -11), (10, -11),
    (9, -12), (23, -11), (24, -11), (24, -12), (25, -12), (25, -10), (4, 3), (4, 4),
    (3, 4), (2, 3), (3, 2), (-1, 3), (-1, 4), (-2, 4), (-3, 3), (-2, 2),
    (-19, 11), (-20, 11), (-19, 10), (-20, 9), (-21, 10), (-24, 11), (-25, 11), (-24, 10),
    (-25, 9), (-26, 10), (-28, 16), (-29, 17), (-29, 16), (-28, 17), (-24, 22), (-23, 23),
    (-24, 24), (-25, 24), (-25, 23), (-26, 27), (-27, 27), (-27, 28), (-25, 28), (-24, 29),
    (-26, 29), (-25, 30), (-21, 29), (-21, 30), (-21, 28), (-20, 28), (-19, 29), (-34, 28),
    (-35, 29), (-34, 29), (-35, 28), (-34, 25), (-34, 24), (-33, 25), (-33, 24),
];

const SNAIL: &[(i32, i32)] = &[
    (-10, -15), (-9, -15), (-8, -16), (-7, -15), (-7, -14), (-6, -14), (-6, -15), (-7, -13),
    (-6, -12), (-5, -14), (-3, -13), (-2, -13), (-2, -12), (-2, -10), (-3, -10), (-4, -10),
    (-3, -8), (-3, -7), (-3, -6), (-1, -7), (-1, -5), (-1, -4), (-1, -3), (-1, -2),
    (-1, -1), (-1, 0), (-1, 1), (-2, -4), (-2, 2), (-3, -2), (-3, -1), (-4, -3),
    (-5, -2), (-5, -1), (-6, -2), (-5, 1), (-4, 1), (-6, 2), (-4, 3), (-6, 4),
    (-7, 5), (-7, 6), (-7, 7), (-5, 9), (-4, 7), (-4, 8), (-3, 9), (-4, 10),
    (-6, 11), (-7, 11), (-7, 12), (-7, 13), (-6, 13), (-6, 12), (-5, 14), (-5, 15),
    (-5, 16), (-5, 17), (-4, 16), (-4, 17), (-3, 18), (-3, 19), (-2, 20), (1, -7),
    (1, -5), (1, -4), (1, -3), (1, -2), (1, -1), (1, 0), (1, 1), (2, 2),
    (2, -4), (3, -8), (3, -7), (3, -6), (3, -1), (3, -2), (4, -3), (6, -2),
    (5, -2), (5, -1), (2, -10), (3, -10), (4, -10), (2, -12), (2, -13), (3, -13),
    (5, -14), (6, -14), (7, -14), (6, -15), (7, -15), (7, -13), (6, -12), (8, -16),
    (9, -15), (10, -15), (4, 1), (5, 1), (6, 2), (4, 3), (6, 4), (7, 5),
    (7, 6), (7, 7), (5, 9), (4, 8), (4, 7), (3, 9), (4, 10), (6, 11),
    (7, 11), (7, 12), (7, 13), (6, 13), (6, 12), (5, 14), (5, 15), (5, 16),
    (5, 17), (4, 16), (4, 17), (3, 18), (3, 19), (2, 20), (-3, 21), (3, 21),
];

const TUB: &[(i32, i32)] = &[
    (4, 6), (5, 5), (6, 6), (5, 7), (2, 4), (1, 4), (1, 3), (0, 1),
    (-1, 0), (-2, 0), (-2, 1), (-2, 2), (5, 2), (4, 2), (4, 1), (5, 1),
    (6, 2), (6, 0), (7, 0), (7, -1), (8, 1), (8, -1), (8, -2), (8, -3),
    (8, -4), (9, -3), (9, -2), (7, -6), (6, -7), (5, -7), (5, -6), (5, -5),
];

const GOSPER_GUN: &[(i32, i32)] = &[
    (0, -17), (0, -16), (1, -17), (1, -16), (0, -7), (1, -7), (2, -7), (-1, -6),
    (3, -6), (-2, -5), (4, -5), (-2, -4), (4, -4), (1, -3), (-1, -2), (3, -2),
    (0, -1), (1, -1), (2, -1), (1, 0), (-2, 3), (-1, 3), (0, 3), (-2, 4),
    (-1, 4), (0, 4), (-3, 5), (1, 5), (-4, 7), (-3, 7), (1, 7), (2, 7),
    (-2, 17), (-1, 17), (-2, 18), (-1, 18),
];

const PULSAR: &[(i32, i32)] = &[
    (-6, -4), (-6, -3), (-6, -2), (-6, 2), (-6, 3), (-6, 4), (-4, -6), (-4, -1),
    (-4, 1), (-4, 6), (-3, -6), (-3, -1), (-3, 1), (-3, 6), (-2, -6), (-2, -1),
    (-2, 1), (-2, 6), (-1, -4), (-1, -3), (-1, -2), (-1, 2), (-1, 3), (-1, 4),
    (1, -4), (1, -3), (1, -2), (1, 2), (1, 3), (1, 4), (2, -6), (2, -1),
    (2, 1), (2, 6), (3, -6), (3, -1), (3, 1), (3, 6), (4, -6), (4, -1),
    (4, 1), (4, 6), (6, -4), (6, -3), (6, -2), (6, 2), (6, 3), (6, 4),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn glider_lands_around_the_center() {
        let grid = load("glider", 10, 10).unwrap();
        let live: BTreeSet<_> = grid.live_cells().collect();
        assert_eq!(live, BTreeSet::from([(6, 5), (5, 6), (6, 6), (6, 4), (4, 5)]));
        assert_eq!((grid.width(), grid.height()), (10, 10));
    }

    #[test]
    fn loading_is_deterministic() {
        assert_eq!(load("AK94", 80, 80).unwrap(), load("ak94", 80, 80).unwrap());
    }

    #[test]
    fn preset_sizes_match_their_tables() {
        for pattern in PATTERNS {
            let grid = load(pattern.name, 80, 80).unwrap();
            let distinct: BTreeSet<_> = pattern.cells.iter().collect();
            assert_eq!(grid.population(), distinct.len(), "{}", pattern.name);
            assert_eq!(distinct.len(), pattern.cells.len(), "{} has duplicates", pattern.name);
        }
        assert_eq!(find("295").map(|p| p.cells.len()), Some(295));
        assert_eq!(find("119").map(|p| p.cells.len()), Some(119));
        assert_eq!(find("60P").map(|p| p.cells.len()), Some(60));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        assert_eq!(
            load("Spaceship", 10, 10).unwrap_err(),
            LatticeError::UnknownPreset("Spaceship".into())
        );
    }

    #[test]
    fn oversized_presets_are_clipped() {
        let mut grid = LifeGrid::new(5, 5);
        let pattern = find("Gosper Glider Gun").unwrap();
        let clipped = apply_pattern(&mut grid, pattern);
        assert_eq!(clipped + grid.population(), pattern.cells.len());
        assert!(clipped > 0);
    }

    #[test]
    fn presets_use_the_viewport_center() {
        let mut grid = LifeGrid::with_margin(10, 10, 5);
        apply_pattern(&mut grid, find("Block").unwrap());
        let live: BTreeSet<_> = grid.live_cells().collect();
        assert_eq!(live, BTreeSet::from([(10, 10), (10, 11), (11, 10), (11, 11)]));
    }

    #[test]
    fn random_soup_stays_in_view() {
        let mut a = LifeGrid::with_margin(20, 20, 4);
        let mut b = a.clone();
        apply_random_pattern(&mut a, 42);
        apply_random_pattern(&mut b, 42);
        assert_eq!(a, b);
        let view = a.viewport();
        assert!(a.live_cells().all(|(row, col)| view.contains(row, col)));
        assert!(a.population() > 0);
    }
}
