//! Conway's Game of Life on a grid that grows when live cells reach an edge.
//!
//! The backing [`Grid`] is the simulation. The [`Viewport`] is the part of it a
//! front end shows; it moves with the cells when rows or columns are added on
//! the north or west side, so nothing jumps on screen.

use std::collections::BTreeSet;

use crate::error::{LatticeError, Result};
use crate::grid::Grid;

/// One of the four grid edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];
}

/// Half-open window `[x0, x1) x [y0, y1)` over the backing grid.
/// `x` runs along columns, `y` along rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Viewport {
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.y0..self.y1).contains(&row) && (self.x0..self.x1).contains(&col)
    }
}

/// Relative positions of the eight Moore neighbors.
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LifeGrid {
    cells: Grid,
    viewport: Viewport,
}

impl LifeGrid {
    /// A dead grid whose viewport covers all of it.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Grid::new(width, height),
            viewport: Viewport { x0: 0, y0: 0, x1: width, y1: height },
        }
    }

    /// A dead grid with `margin` hidden cells on every side of a
    /// `view_width x view_height` viewport.
    pub fn with_margin(view_width: usize, view_height: usize, margin: usize) -> Self {
        Self {
            cells: Grid::new(view_width + 2 * margin, view_height + 2 * margin),
            viewport: Viewport {
                x0: margin,
                y0: margin,
                x1: margin + view_width,
                y1: margin + view_height,
            },
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells.get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        self.cells.set(row, col, alive)
    }

    pub(crate) fn set_signed(&mut self, row: i64, col: i64) -> Result<()> {
        self.cells.checked_index(row, col)?;
        self.cells.set(row as usize, col as usize, true)
    }

    /// Toggles a cell addressed in backing-grid coordinates.
    pub fn flip(&mut self, row: usize, col: usize) -> Result<bool> {
        self.cells.flip(row, col)
    }

    /// Toggles a cell addressed relative to the viewport's top-left corner.
    pub fn flip_in_view(&mut self, row: usize, col: usize) -> Result<bool> {
        let view = self.viewport;
        if row >= view.height() || col >= view.width() {
            return Err(LatticeError::OutOfBoundsWrite {
                row: row as i64,
                col: col as i64,
                height: view.height(),
                width: view.width(),
            });
        }
        self.cells.flip(view.y0 + row, view.x0 + col)
    }

    /// Backing-grid coordinates of the viewport center, rounded down.
    pub fn view_center(&self) -> (usize, usize) {
        let view = self.viewport;
        (view.y0 + view.height() / 2, view.x0 + view.width() / 2)
    }

    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let (row, col) = (row as i64, col as i64);
        NEIGHBORS
            .iter()
            .filter(|&&(dr, dc)| self.cells.get_signed(row + dr, col + dc))
            .count() as u8
    }

    /// Next generation under B3/S23. Cells beyond the edges count as dead.
    pub fn step(&self) -> LifeGrid {
        let next = Grid::from_fn(self.width(), self.height(), |row, col| {
            match (self.get(row, col), self.live_neighbors(row, col)) {
                (true, 2) | (true, 3) => true,   // Survival
                (false, 3)            => true,   // Birth
                _                     => false,  // Death or stays dead
            }
        });
        LifeGrid { cells: next, viewport: self.viewport }
    }

    /// Edges that have at least one live cell on them.
    pub fn border_contact(&self) -> BTreeSet<Direction> {
        let mut touched = BTreeSet::new();
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            return touched;
        }
        if self.cells.row(0).contains(&true) {
            touched.insert(Direction::North);
        }
        if self.cells.row(height - 1).contains(&true) {
            touched.insert(Direction::South);
        }
        if (0..height).any(|row| self.get(row, 0)) {
            touched.insert(Direction::West);
        }
        if (0..height).any(|row| self.get(row, width - 1)) {
            touched.insert(Direction::East);
        }
        touched
    }

    /// Adds `amount` dead rows or columns on one side.
    ///
    /// Growing north or west moves every existing cell, and the viewport with
    /// them, by `amount`. Growing south or east moves nothing.
    pub fn expand_border(&mut self, direction: Direction, amount: usize) {
        if amount == 0 {
            return;
        }
        let (width, height) = (self.width(), self.height());
        self.cells = match direction {
            Direction::North => {
                self.viewport.y0 += amount;
                self.viewport.y1 += amount;
                self.cells.resized(width, height + amount, amount, 0)
            }
            Direction::South => self.cells.resized(width, height + amount, 0, 0),
            Direction::West => {
                self.viewport.x0 += amount;
                self.viewport.x1 += amount;
                self.cells.resized(width + amount, height, 0, amount)
            }
            Direction::East => self.cells.resized(width + amount, height, 0, 0),
        };
        log::debug!(
            "grew {direction:?} by {amount}, grid now {}x{}",
            self.width(),
            self.height()
        );
    }

    /// One full iteration: step, then grow once toward every edge the new
    /// generation touches. Returns the edges that were grown.
    pub fn advance(&mut self, growth: usize) -> BTreeSet<Direction> {
        *self = self.step();
        let touched = self.border_contact();
        for &direction in &touched {
            self.expand_border(direction, growth);
        }
        touched
    }

    /// Rewrites every viewport cell from `alive(row, col)`, row-major.
    /// Cells outside the viewport are left as they are.
    pub(crate) fn fill_view<F>(&mut self, mut alive: F)
    where
        F: FnMut(usize, usize) -> bool,
    {
        let view = self.viewport;
        self.cells = Grid::from_fn(self.width(), self.height(), |row, col| {
            if view.contains(row, col) {
                alive(row, col)
            } else {
                self.cells.get(row, col)
            }
        });
    }

    pub fn population(&self) -> usize {
        self.cells.population()
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.live_cells()
    }

    /// The cells inside the viewport, row by row. This is all a renderer needs.
    pub fn visible_rows(&self) -> Vec<Vec<bool>> {
        let view = self.viewport;
        (view.y0..view.y1)
            .map(|row| self.cells.row(row)[view.x0..view.x1].to_vec())
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
