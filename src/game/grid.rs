//! Toroidal grid of cell occupants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::UnitId;

/// Offsets of the eight neighbours of a cell, centre excluded.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Step `value` by `offset` on an axis of length `size`, wrapping around.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn wrap(value: u16, offset: i32, size: u16) -> u16 {
    let size = i32::from(size);
    // `size` fits in u16 so the remainder does too.
    (i32::from(value) + offset + size).rem_euclid(size) as u16
}

/// Shortest distance between two positions on a wrapping axis.
#[inline]
fn axis_distance(a: u16, b: u16, size: u16) -> u16 {
    let direct = a.abs_diff(b);
    direct.min(size - direct)
}

/// Fixed-size wrap-around grid holding at most one unit per cell.
///
/// The grid knows nothing about game rules; it only stores which unit
/// (if any) occupies each cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width of the grid in cells.
    width: u16,
    /// Height of the grid in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Option<UnitId>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        Some(Self {
            width,
            height,
            cells: vec![None; size],
        })
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Bring any coordinate into bounds by wrapping both axes.
    #[must_use]
    pub fn normalize(&self, coord: Coord) -> Coord {
        Coord::new(coord.x % self.width, coord.y % self.height)
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        let coord = self.normalize(coord);
        usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x)
    }

    /// The unit occupying `coord`, if any.
    #[must_use]
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<UnitId> {
        self.cells[self.index(coord)]
    }

    /// Replace the occupant of `coord`, returning the previous one.
    pub fn set(&mut self, coord: Coord, occupant: Option<UnitId>) -> Option<UnitId> {
        let idx = self.index(coord);
        std::mem::replace(&mut self.cells[idx], occupant)
    }

    /// Check whether `coord` is unoccupied.
    #[must_use]
    #[inline]
    pub fn is_free(&self, coord: Coord) -> bool {
        self.get(coord).is_none()
    }

    /// The eight wrapped neighbours of `coord`, never including `coord` itself.
    ///
    /// On grids narrower than three cells some neighbours coincide.
    #[must_use]
    pub fn neighbours(&self, coord: Coord) -> [Coord; 8] {
        NEIGHBOUR_OFFSETS.map(|(dx, dy)| {
            Coord::new(
                wrap(coord.x, dx, self.width),
                wrap(coord.y, dy, self.height),
            )
        })
    }

    /// King-move distance between two cells with wrap-around.
    ///
    /// Out-of-bounds coordinates are wrapped first, like [`Grid::get`].
    #[must_use]
    pub fn distance(&self, a: Coord, b: Coord) -> u16 {
        let (a, b) = (self.normalize(a), self.normalize(b));
        let dx = axis_distance(a.x, b.x, self.width);
        let dy = axis_distance(a.y, b.y, self.height);
        dx.max(dy)
    }

    /// Iterate over all coordinates and their occupants, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Option<UnitId>)> + '_ {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, occupant)| {
            // Both quotients are bounded by u16 dimensions.
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx % width) as u16, (idx / width) as u16);
            (coord, *occupant)
        })
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<UnitId>]> {
        self.cells.chunks(usize::from(self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 8).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.area(), 80);
        assert!(grid.iter().all(|(_, occupant)| occupant.is_none()));
    }

    #[test]
    fn test_grid_zero_size() {
        assert!(Grid::new(0, 10).is_none());
        assert!(Grid::new(10, 0).is_none());
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert!(grid.is_free(Coord::new(2, 3)));
        assert_eq!(grid.set(Coord::new(2, 3), Some(9)), None);
        assert_eq!(grid.get(Coord::new(2, 3)), Some(9));
        assert_eq!(grid.set(Coord::new(2, 3), None), Some(9));
        assert!(grid.is_free(Coord::new(2, 3)));
    }

    #[test]
    fn test_neighbours_interior() {
        let grid = Grid::new(10, 10).unwrap();
        let adj = grid.neighbours(Coord::new(5, 5));
        assert!(!adj.contains(&Coord::new(5, 5)));
        assert!(adj.contains(&Coord::new(4, 4)));
        assert!(adj.contains(&Coord::new(6, 6)));
        assert!(adj.contains(&Coord::new(5, 4)));
    }

    #[test]
    fn test_neighbours_wrap_corner() {
        let grid = Grid::new(10, 10).unwrap();
        let adj = grid.neighbours(Coord::new(0, 0));
        assert!(adj.contains(&Coord::new(9, 9)));
        assert!(adj.contains(&Coord::new(0, 9)));
        assert!(adj.contains(&Coord::new(9, 0)));
        assert!(adj.contains(&Coord::new(1, 1)));
        assert!(adj.iter().all(|c| grid.in_bounds(*c)));
    }

    #[test]
    fn test_distance_wraps() {
        let grid = Grid::new(10, 10).unwrap();
        assert_eq!(grid.distance(Coord::new(0, 0), Coord::new(9, 9)), 1);
        assert_eq!(grid.distance(Coord::new(0, 0), Coord::new(5, 2)), 5);
        assert_eq!(grid.distance(Coord::new(2, 2), Coord::new(2, 2)), 0);
    }

    #[test]
    fn test_distance_rectangular() {
        let grid = Grid::new(20, 6).unwrap();
        assert_eq!(grid.distance(Coord::new(0, 0), Coord::new(10, 3)), 10);
        assert_eq!(grid.distance(Coord::new(0, 0), Coord::new(1, 5)), 1);
    }

    #[test]
    fn test_distance_out_of_bounds_wraps() {
        let grid = Grid::new(10, 10).unwrap();
        assert_eq!(grid.distance(Coord::new(15, 0), Coord::new(0, 0)), 5);
        assert_eq!(grid.distance(Coord::new(19, 29), Coord::new(0, 0)), 1);
        assert_eq!(grid.distance(Coord::new(10, 10), Coord::new(0, 0)), 0);
    }

    #[test]
    fn test_rows() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(Coord::new(2, 1), Some(4));
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[None, None, Some(4)]);
    }
}
