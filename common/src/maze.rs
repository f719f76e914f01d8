pub mod cell;
pub mod maker;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cell::{Cell, CellState, Direction, Position, Walls};
pub use maker::{Animation, MazeMaker, Speed, Tick};

/// A rectangular grid of cells whose walls are carved into a perfect maze.
///
/// The maze owns its cells outright. Dimensions are fixed for the lifetime
/// of the value; a new maze on the same grid is made by rebuilding the cells,
/// which also bumps `epoch` so that anything still holding on to the previous
/// generation can tell it has been superseded.
#[derive(Clone, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>, // Row-major.
    exit: Position,
    epoch: u64,
    ready: bool,
    active: Option<Position>, // The cell most recently carved into, while generating.
}

impl Maze {
    /// Allocates a blank grid: every wall present, nothing visited. The exit
    /// is baked into its cell here, so it has to be chosen first.
    pub fn build(rows: usize, cols: usize, exit: Position) -> Self {
        assert!(rows > 0 && cols > 0, "maze must have at least one cell");
        debug_assert!(
            exit.row < rows && exit.col < cols,
            "exit coordinates are out of bounds"
        );

        let mut maze = Maze {
            rows,
            cols,
            cells: Vec::with_capacity(rows * cols),
            exit,
            epoch: 0,
            ready: false,
            active: None,
        };
        maze.fill_cells();
        maze
    }

    fn fill_cells(&mut self) {
        self.cells.clear();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let position = Position::new(row, col);
                self.cells.push(Cell::new(position, position == self.exit));
            }
        }
    }

    /// Starts a new generation: bumps the epoch, marks the maze as not ready
    /// and rebuilds every cell blank around the given exit.
    pub fn rebuild(&mut self, exit: Position) {
        debug_assert!(self.contains(exit), "exit coordinates are out of bounds");

        self.epoch += 1;
        self.ready = false;
        self.active = None;
        self.exit = exit;
        self.fill_cells();
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn active(&self) -> Option<Position> {
        self.active
    }

    pub fn is_inside(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    pub fn is_exit(&self, position: Position) -> bool {
        position == self.exit
    }

    pub fn is_visited(&self, position: Position) -> bool {
        self.cell(position).visited
    }

    pub fn cell(&self, position: Position) -> &Cell {
        &self.cells[self.index(position)]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    fn cell_mut(&mut self, position: Position) -> &mut Cell {
        let index = self.index(position);
        &mut self.cells[index]
    }

    fn index(&self, position: Position) -> usize {
        debug_assert!(
            self.contains(position),
            "cell coordinates are out of bounds"
        );
        position.row * self.cols + position.col
    }

    /// Removes the wall on `from` facing `direction` together with the wall on
    /// the neighbor facing back, so the two cells always agree.
    pub fn remove_wall_pair(&mut self, from: Position, direction: Direction) {
        let to = from
            .step(direction)
            .filter(|&to| self.contains(to))
            .expect("cannot carve through the outer wall");

        self.cell_mut(from).walls.remove(direction);
        self.cell_mut(to).walls.remove(direction.opposite());
    }

    pub fn visit(&mut self, position: Position) {
        self.cell_mut(position).visited = true;
    }

    pub fn activate(&mut self, position: Position) {
        self.active = Some(position);
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
        self.active = None;
    }

    pub fn explore(&mut self, position: Position) {
        self.cell_mut(position).explored = true;
    }

    pub fn unexplore_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.explored = false;
        }
    }

    pub fn cell_state(&self, position: Position) -> CellState {
        let cell = self.cell(position);

        if cell.is_exit {
            CellState::Exit
        } else if self.active == Some(position) {
            CellState::Active
        } else if cell.explored {
            CellState::Explored
        } else if cell.visited {
            CellState::Visited
        } else {
            CellState::Blank
        }
    }

    /// Number of wall pairs removed so far. A finished maze has exactly one
    /// fewer passage than it has cells.
    pub fn carved_passages(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                usize::from(!cell.walls.has(Direction::Right) && cell.position.col + 1 < self.cols)
                    + usize::from(
                        !cell.walls.has(Direction::Bottom) && cell.position.row + 1 < self.rows,
                    )
            })
            .sum()
    }

    /// Whether an actor standing on `(from_row, from_col)` may step onto
    /// `(to_row, to_col)`. Only single orthogonal steps can ever be legal; the
    /// delta is checked before any wall is looked at.
    pub fn can_move(&self, from_row: isize, from_col: isize, to_row: isize, to_col: isize) -> bool {
        let Some(direction) = Direction::from_delta(to_row - from_row, to_col - from_col) else {
            return false;
        };

        if !self.is_inside(to_row, to_col) || !self.is_inside(from_row, from_col) {
            return false;
        }

        let from = Position::new(from_row as usize, from_col as usize);
        !self.cell(from).walls.has(direction)
    }

    pub fn log(&self) -> String {
        let mut lines = Vec::with_capacity(2 * self.rows + 1);

        let mut top = String::from("+");
        for col in 0..self.cols {
            let cell = self.cell(Position::new(0, col));
            top.push_str(if cell.walls.top { "--+" } else { "  +" });
        }
        lines.push(top);

        for row in 0..self.rows {
            let mut middle = String::new();
            let mut bottom = String::from("+");

            let first = self.cell(Position::new(row, 0));
            middle.push(if first.walls.left { '|' } else { ' ' });

            for col in 0..self.cols {
                let position = Position::new(row, col);
                let cell = self.cell(position);
                middle.push_str(if cell.is_exit { "[]" } else { "  " });
                middle.push(if cell.walls.right { '|' } else { ' ' });
                bottom.push_str(if cell.walls.bottom { "--+" } else { "  +" });
            }

            lines.push(middle);
            lines.push(bottom);
        }

        lines.join("\n")
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
