//! One-dimensional elementary automaton: each generation is a row computed
//! from the row above it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};
use crate::rule::RuleTable;

/// How the cells past either end of a row are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Boundary {
    /// Row wraps: column 0 and the last column are neighbors.
    #[default]
    Periodic,
    /// Missing neighbors are dead.
    Zero,
}

/// An all-dead seed row.
pub fn reset(width: usize) -> Vec<bool> {
    vec![false; width]
}

/// Neighborhood index `left*4 + center*2 + right` for column `i`.
#[inline]
fn neighborhood(cells: &[bool], i: usize, boundary: Boundary) -> usize {
    let last = cells.len() - 1;
    let bit = |j: usize| cells[j] as usize;

    match boundary {
        Boundary::Periodic => {
            let left = if i == 0 { last } else { i - 1 };
            let right = if i == last { 0 } else { i + 1 };
            bit(left) * 4 + bit(i) * 2 + bit(right)
        }
        // Edge formulas drop the missing term instead of multiplying a zero.
        Boundary::Zero if i == 0 => bit(i) * 2 + if last > 0 { bit(1) } else { 0 },
        Boundary::Zero if i == last => bit(i - 1) * 4 + bit(i) * 2,
        Boundary::Zero => bit(i - 1) * 4 + bit(i) * 2 + bit(i + 1),
    }
}

/// Computes the next generation. Pure: same input, same output.
pub fn step(generation: &[bool], table: &RuleTable, boundary: Boundary) -> Vec<bool> {
    (0..generation.len())
        .map(|i| table.lookup(neighborhood(generation, i, boundary)))
        .collect()
}

/// Sequential variant of [`step`]: cells are rewritten one at a time in
/// `order`, and a neighbor that was already rewritten in this pass is read
/// with its new value.
pub fn step_ordered(
    generation: &[bool],
    table: &RuleTable,
    boundary: Boundary,
    order: &[usize],
) -> Result<Vec<bool>> {
    let width = generation.len();
    let mut seen = vec![false; width];
    if order.len() != width {
        return Err(LatticeError::InvalidUpdateOrder(width));
    }
    for &k in order {
        if k >= width || seen[k] {
            return Err(LatticeError::InvalidUpdateOrder(width));
        }
        seen[k] = true;
    }

    let mut cells = generation.to_vec();
    for &k in order {
        cells[k] = table.lookup(neighborhood(&cells, k, boundary));
    }
    Ok(cells)
}

/// Deterministic permutation of `0..width` for [`step_ordered`].
pub fn shuffled_order(width: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..width).collect();
    let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
    // Fisher-Yates driven by the same LCG the random soup uses.
    for i in (1..width).rev() {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let j = ((state >> 33) as usize) % (i + 1);
        order.swap(i, j);
    }
    order
}

fn parse_bounded(input: &str, max: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=max).contains(n))
}

/// Validates a requested row width against `1..=max`.
pub fn parse_lattice_width(input: &str, max: usize) -> Result<usize> {
    parse_bounded(input, max).ok_or_else(|| LatticeError::InvalidLatticeSize(input.trim().to_string()))
}

/// Validates a hidden buffer size against `0..=max`. Zero turns the buffer off.
pub fn parse_buffer(input: &str, max: usize) -> Result<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n <= max)
        .ok_or_else(|| LatticeError::InvalidBufferSize(input.trim().to_string()))
}

/// Validates a requested row count against `1..=max`.
pub fn parse_iterations(input: &str, max: usize) -> Result<usize> {
    parse_bounded(input, max)
        .ok_or_else(|| LatticeError::InvalidIterationCount(input.trim().to_string()))
}

/// Generation history of a 1-D run. Row 0 is the seed.
///
/// Only the seed is edited directly; every later row is derived from the one
/// above it. Rows already computed are never recomputed, even if the seed
/// changes afterwards; [`OneDimGrid::clear_derived`] drops them.
///
/// With a `buffer`, every stored row carries that many hidden cells on each
/// side of the `width` visible ones, so edge effects stay out of view.
/// [`OneDimGrid::rows`] exposes the stored rows; [`OneDimGrid::visible_rows`]
/// trims the padding. Seed columns are always addressed in visible coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneDimGrid {
    width: usize,
    buffer: usize,
    rows: Vec<Vec<bool>>,
}

impl OneDimGrid {
    pub fn new(width: usize) -> Self {
        Self::with_buffer(width, 0)
    }

    /// A dead grid with `buffer` hidden cells on both sides of `width` visible ones.
    pub fn with_buffer(width: usize, buffer: usize) -> Self {
        Self {
            width,
            buffer,
            rows: vec![reset(width + 2 * buffer)],
        }
    }

    /// Visible cells per row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn buffer(&self) -> usize {
        self.buffer
    }

    /// Cells per stored row, padding included.
    pub fn full_width(&self) -> usize {
        self.width + 2 * self.buffer
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// The rows as they should be drawn, padding removed.
    pub fn visible_rows(&self) -> Vec<Vec<bool>> {
        let visible = self.buffer..self.buffer + self.width;
        self.rows.iter().map(|row| row[visible.clone()].to_vec()).collect()
    }

    /// Number of rows, seed included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn seed(&self) -> &[bool] {
        &self.rows[0]
    }

    pub fn last(&self) -> &[bool] {
        &self.rows[self.rows.len() - 1]
    }

    /// Toggles a visible seed cell and returns its new state.
    pub fn flip_seed(&mut self, col: usize) -> Result<bool> {
        if col >= self.width {
            return Err(LatticeError::OutOfBoundsWrite {
                row: 0,
                col: col as i64,
                height: 1,
                width: self.width,
            });
        }
        let cell = &mut self.rows[0][self.buffer + col];
        *cell = !*cell;
        Ok(*cell)
    }

    /// Seeds a single live cell in the middle (the usual starting condition).
    pub fn set_center_seed(&mut self) {
        self.clear();
        if self.width > 0 {
            self.rows[0][self.buffer + self.width / 2] = true;
        }
    }

    /// Every visible seed cell alive, hidden padding dead. Derived rows are dropped.
    pub fn fill_seed(&mut self) {
        self.clear();
        let visible = self.buffer..self.buffer + self.width;
        self.rows[0][visible].fill(true);
    }

    /// Seeded coin flip for every visible seed cell. Derived rows are dropped.
    pub fn randomize_seed(&mut self, seed_value: u64) {
        self.clear();

        let mut hasher = DefaultHasher::new();
        seed_value.hash(&mut hasher);
        let mut seed = hasher.finish();

        let visible = self.buffer..self.buffer + self.width;
        for cell in &mut self.rows[0][visible] {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            *cell = (seed >> 16) % 2 == 1;
        }
    }

    /// Changes the hidden padding. The visible seed is kept, derived rows are dropped.
    pub fn set_buffer(&mut self, buffer: usize) {
        if buffer == self.buffer {
            return;
        }
        let visible = self.seed()[self.buffer..self.buffer + self.width].to_vec();
        *self = Self::with_buffer(self.width, buffer);
        self.rows[0][buffer..buffer + self.width].copy_from_slice(&visible);
    }

    /// Appends rows until there are `row_count` of them. Returns how many were added.
    pub fn grow_to(&mut self, row_count: usize, table: &RuleTable, boundary: Boundary) -> usize {
        self.grow_to_with(row_count, |last| step(last, table, boundary))
    }

    /// [`OneDimGrid::grow_to`] with a caller-supplied step function over full rows.
    pub fn grow_to_with<F>(&mut self, row_count: usize, mut next_row: F) -> usize
    where
        F: FnMut(&[bool]) -> Vec<bool>,
    {
        let before = self.rows.len();
        while self.rows.len() < row_count {
            let next = next_row(self.last());
            debug_assert_eq!(next.len(), self.full_width());
            self.rows.push(next);
        }
        self.rows.len() - before
    }

    /// Drops trailing rows so at most `row_count` remain. The seed is always kept.
    pub fn truncate_to(&mut self, row_count: usize) {
        self.rows.truncate(row_count.max(1));
    }

    /// Back to a single all-dead seed row.
    pub fn clear(&mut self) {
        self.rows = vec![reset(self.full_width())];
    }

    /// Keeps the seed, drops everything derived from it.
    pub fn clear_derived(&mut self) {
        self.rows.truncate(1);
    }
}
