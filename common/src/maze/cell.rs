use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbor one step away in `direction`, or `None` if that would
    /// leave the non-negative quadrant. Callers still need to bounds check
    /// against the grid.
    pub fn step(&self, direction: Direction) -> Option<Position> {
        let (drow, dcol) = direction.delta();
        let row = self.row.checked_add_signed(drow)?;
        let col = self.col.checked_add_signed(dcol)?;
        Some(Position { row, col })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Row and column offsets. Rows grow downwards.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn from_delta(drow: isize, dcol: isize) -> Option<Direction> {
        match (drow, dcol) {
            (-1, 0) => Some(Direction::Top),
            (0, 1) => Some(Direction::Right),
            (1, 0) => Some(Direction::Bottom),
            (0, -1) => Some(Direction::Left),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl Walls {
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub fn remove(&mut self, direction: Direction) {
        match direction {
            Direction::Top => self.top = false,
            Direction::Right => self.right = false,
            Direction::Bottom => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }

    pub fn count(&self) -> usize {
        Direction::ALL.iter().filter(|&&d| self.has(d)).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub walls: Walls,
    pub visited: bool,
    pub explored: bool, // Set when the player passes through during play.
    pub is_exit: bool,
}

impl Cell {
    pub fn new(position: Position, is_exit: bool) -> Self {
        Cell {
            position,
            walls: Walls::default(),
            visited: false,
            explored: false,
            is_exit,
        }
    }
}

/// What a renderer should show for a cell. The core decides the category,
/// the renderer decides what it looks like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CellState {
    Blank,
    Active,
    Visited,
    Explored,
    Exit,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::iter() {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn from_delta_inverts_delta() {
        for direction in Direction::iter() {
            let (drow, dcol) = direction.delta();
            assert_eq!(Direction::from_delta(drow, dcol), Some(direction));
        }
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(-2, 0), None);
    }

    #[test]
    fn step_refuses_to_underflow() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Top), None);
        assert_eq!(corner.step(Direction::Left), None);
        assert_eq!(corner.step(Direction::Bottom), Some(Position::new(1, 0)));
        assert_eq!(corner.step(Direction::Right), Some(Position::new(0, 1)));
    }

    #[test]
    fn new_cell_is_blank_with_all_walls() {
        let cell = Cell::new(Position::new(2, 3), false);
        assert_eq!(cell.walls.count(), 4);
        assert!(!cell.visited);
        assert!(!cell.explored);
        assert!(!cell.is_exit);
    }

    #[test]
    fn removing_a_wall_only_touches_that_side() {
        let mut walls = Walls::default();
        walls.remove(Direction::Left);
        assert!(!walls.has(Direction::Left));
        assert!(walls.has(Direction::Top));
        assert!(walls.has(Direction::Right));
        assert!(walls.has(Direction::Bottom));
        assert_eq!(walls.count(), 3);
    }
}
