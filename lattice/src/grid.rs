// grid.rs - Flat row-major cell buffer backing the Life lattice

use crate::error::{LatticeError, Result};

/// A `height x width` block of binary cells stored row by row in one `Vec`.
///
/// Reads outside the bounds are dead; writes outside the bounds are errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// A grid whose cell at (row, col) is `alive(row, col)`.
    pub(crate) fn from_fn<F>(width: usize, height: usize, mut alive: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut cells = Vec::with_capacity(width * height);
        for row in 0..height {
            cells.extend((0..width).map(|col| alive(row, col)));
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Like [`Grid::get`] but accepts coordinates that may be negative.
    #[inline]
    pub fn get_signed(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && self.get(row as usize, col as usize)
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<()> {
        let i = self.checked_index(row as i64, col as i64)?;
        self.cells[i] = alive;
        Ok(())
    }

    /// Toggles a cell and returns its new state.
    pub fn flip(&mut self, row: usize, col: usize) -> Result<bool> {
        let i = self.checked_index(row as i64, col as i64)?;
        self.cells[i] = !self.cells[i];
        Ok(self.cells[i])
    }

    pub(crate) fn checked_index(&self, row: i64, col: i64) -> Result<usize> {
        let out_of_bounds = || LatticeError::OutOfBoundsWrite {
            row,
            col,
            height: self.height,
            width: self.width,
        };
        if row < 0 || col < 0 {
            return Err(out_of_bounds());
        }
        self.index(row as usize, col as usize).ok_or_else(out_of_bounds)
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Panics if `row >= height`; callers inside the crate index by known bounds.
    pub(crate) fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics, an empty grid simply has no rows
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i / self.width, i % self.width))
    }

    /// New buffer of `height x width` with this grid copied in at
    /// (`row_offset`, `col_offset`). New space is dead; anything that no
    /// longer fits is dropped.
    pub fn resized(&self, width: usize, height: usize, row_offset: usize, col_offset: usize) -> Grid {
        let mut out = Grid::new(width, height);
        if col_offset >= width {
            return out;
        }
        let copy_width = self.width.min(width - col_offset);
        for row in 0..self.height {
            let target_row = row + row_offset;
            if target_row >= height {
                break;
            }
            let src = &self.row(row)[..copy_width];
            let start = target_row * width + col_offset;
            out.cells[start..start + copy_width].copy_from_slice(src);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_outside_are_dead() {
        let mut grid = Grid::new(3, 2);
        grid.set(1, 2, true).unwrap();
        assert!(grid.get(1, 2));
        assert!(!grid.get(2, 2));
        assert!(!grid.get(1, 3));
        assert!(!grid.get_signed(-1, 0));
        assert!(grid.get_signed(1, 2));
    }

    #[test]
    fn writes_outside_fail() {
        let mut grid = Grid::new(3, 2);
        assert_eq!(
            grid.set(2, 0, true),
            Err(LatticeError::OutOfBoundsWrite {
                row: 2,
                col: 0,
                height: 2,
                width: 3
            })
        );
        assert!(grid.flip(0, 3).is_err());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn resize_keeps_cells_at_offset() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, true).unwrap();
        grid.set(2, 1, true).unwrap();

        let grown = grid.resized(5, 6, 2, 1);
        assert_eq!((grown.width(), grown.height()), (5, 6));
        assert_eq!(grown.live_cells().collect::<Vec<_>>(), vec![(2, 1), (4, 2)]);
    }

    #[test]
    fn resize_can_clip() {
        let mut grid = Grid::new(4, 4);
        grid.set(3, 3, true).unwrap();
        grid.set(0, 0, true).unwrap();
        let small = grid.resized(2, 2, 0, 0);
        assert_eq!(small.live_cells().collect::<Vec<_>>(), vec![(0, 0)]);
        assert_eq!(grid.resized(2, 2, 0, 5).population(), 0);
    }

    #[test]
    fn rows_iterate_in_order() {
        let mut grid = Grid::new(2, 3);
        grid.flip(1, 1).unwrap();
        let rows: Vec<&[bool]> = grid.rows().collect();
        assert_eq!(rows, vec![&[false, false][..], &[false, true], &[false, false]]);
        assert_eq!(Grid::new(0, 0).rows().count(), 0);
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = Grid::from_fn(3, 2, |row, col| row == 1 && col != 1);
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![(1, 0), (1, 2)]);
        assert_eq!(grid.rows().collect::<Vec<_>>(), vec![&[false; 3][..], &[true, false, true][..]]);
    }
}
