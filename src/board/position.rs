//! Board coordinates and cardinal directions.

use serde::{Deserialize, Serialize};

/// A square on the board, addressed by zero-based row and column.
///
/// Ordering is row-major, so iterating an ordered index keyed by
/// `Position` visits squares top-to-bottom, left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighboring square one step in `dir`, if it lies on a
    /// `rows` x `cols` board.
    #[must_use]
    pub fn step(self, dir: Direction, rows: usize, cols: usize) -> Option<Position> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Position { row, col })
    }

    /// Row-major flat index on a board with `cols` columns.
    #[inline]
    #[must_use]
    pub const fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// True if both squares share a row or a column (and differ).
    #[must_use]
    pub fn is_orthogonal_to(self, other: Position) -> bool {
        self != other && (self.row == other.row || self.col == other.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four orthogonal directions pieces slide and capture along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    /// (row, col) offset of one step.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Direction of travel from `from` to `to`, if they share a line.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        use std::cmp::Ordering::*;
        match (to.row.cmp(&from.row), to.col.cmp(&from.col)) {
            (Less, Equal) => Some(Direction::North),
            (Greater, Equal) => Some(Direction::South),
            (Equal, Greater) => Some(Direction::East),
            (Equal, Less) => Some(Direction::West),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::North, 3, 3), None);
        assert_eq!(corner.step(Direction::West, 3, 3), None);
        assert_eq!(corner.step(Direction::South, 3, 3), Some(Position::new(1, 0)));
        assert_eq!(corner.step(Direction::East, 3, 3), Some(Position::new(0, 1)));

        let far = Position::new(2, 2);
        assert_eq!(far.step(Direction::South, 3, 3), None);
        assert_eq!(far.step(Direction::East, 3, 3), None);
    }

    #[test]
    fn test_row_major_ordering() {
        let mut squares = vec![Position::new(1, 0), Position::new(0, 2), Position::new(0, 1)];
        squares.sort();
        assert_eq!(
            squares,
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(1, 0)]
        );
    }

    #[test]
    fn test_direction_between() {
        let origin = Position::new(2, 2);
        assert_eq!(Direction::between(origin, Position::new(0, 2)), Some(Direction::North));
        assert_eq!(Direction::between(origin, Position::new(2, 5)), Some(Direction::East));
        assert_eq!(Direction::between(origin, Position::new(3, 3)), None);
        assert_eq!(Direction::between(origin, origin), None);
        assert_eq!(Direction::North.opposite(), Direction::South);
    }
}
