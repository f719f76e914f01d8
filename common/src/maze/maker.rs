pub mod animation;
pub mod frontier;

use std::time::Instant;

use rand::{
    Rng, SeedableRng,
    rngs::StdRng,
    seq::SliceRandom,
};

use super::{Direction, Maze, Position};
pub use animation::{Animation, Speed, Tick};
pub use frontier::{Frontier, Move};

/// Carves perfect mazes with a randomized depth-first search ("recursive
/// backtracker") driven by an explicit [`Frontier`] stack.
///
/// The maker owns the only source of randomness in a generation: the exit,
/// the start cell and the neighbor order at every step. Two makers built
/// from the same seed carve identical mazes, whether they run synchronously
/// or one step per animation tick.
pub struct MazeMaker {
    rng: StdRng,
}

impl Default for MazeMaker {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeMaker {
    pub fn new() -> Self {
        Self::from_seed(rand::random())
    }

    pub fn from_seed(seed: u64) -> Self {
        MazeMaker {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn random_position(&mut self, rows: usize, cols: usize) -> Position {
        let row = self.rng.random_range(0..rows);
        let col = self.rng.random_range(0..cols);
        Position::new(row, col)
    }

    /// Wipes `maze` for a new generation and seeds the frontier with a random
    /// start cell. The exit is chosen before the cells are rebuilt.
    pub fn prepare(&mut self, maze: &mut Maze) -> Frontier {
        let exit = self.random_position(maze.rows(), maze.cols());
        maze.rebuild(exit);

        let start = self.random_position(maze.rows(), maze.cols());
        Frontier::new(start)
    }

    /// One iteration of the search. Returns the move that was taken, or `None`
    /// once the frontier is exhausted.
    pub fn step(&mut self, maze: &mut Maze, frontier: &mut Frontier) -> Option<Move> {
        let entry = frontier.pop()?;
        let current = entry.current;

        if let (Some(previous), Some(direction)) = (entry.previous, entry.direction()) {
            if !maze.is_visited(current) {
                maze.remove_wall_pair(previous, direction);
            }
        }

        maze.visit(current);
        maze.activate(current);

        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);

        for direction in directions {
            let Some(next) = current.step(direction) else {
                continue;
            };
            if maze.contains(next) && !maze.is_visited(next) {
                frontier.push(Move::between(current, next));
            }
        }

        Some(entry)
    }

    /// Runs the search to completion and marks the maze ready.
    pub fn finish(&mut self, maze: &mut Maze, frontier: &mut Frontier) {
        while self.step(maze, frontier).is_some() {}
        maze.mark_ready();
    }

    /// Synchronous generation: no intermediate state is ever observable.
    pub fn generate(&mut self, maze: &mut Maze) {
        let mut frontier = self.prepare(maze);
        self.finish(maze, &mut frontier);
    }

    /// Starts a generation that advances one step per [`Animation::tick`].
    /// Any animation started earlier on the same maze goes stale.
    pub fn generate_animated(&mut self, maze: &mut Maze, now: Instant) -> Animation {
        let frontier = self.prepare(maze);
        Animation::new(maze.epoch(), frontier, now)
    }
}
