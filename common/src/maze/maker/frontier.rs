use std::collections::HashMap;

use crate::maze::cell::{Direction, Position};

/// A pending carve from `previous` into `current`. The root of the spanning
/// tree has no previous cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub current: Position,
    pub previous: Option<Position>,
}

impl Move {
    pub fn root(start: Position) -> Self {
        Move {
            current: start,
            previous: None,
        }
    }

    pub fn between(previous: Position, current: Position) -> Self {
        Move {
            current,
            previous: Some(previous),
        }
    }

    /// Direction of travel from the previous cell into the current one.
    pub fn direction(&self) -> Option<Direction> {
        let previous = self.previous?;
        let drow = self.current.row as isize - previous.row as isize;
        let dcol = self.current.col as isize - previous.col as isize;
        Direction::from_delta(drow, dcol)
    }
}

/// Stack of discovered-but-not-yet-carved cells, holding at most one entry per
/// target cell. Pushing a move for a cell that is already pending evicts the
/// older entry and leaves every other entry where it was.
///
/// Evicted entries are tombstoned in place rather than shifted out, and the
/// index finds them by target position, so pushes never scan the stack.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    slots: Vec<Option<Move>>,
    index: HashMap<Position, usize>,
}

impl Frontier {
    pub fn new(start: Position) -> Self {
        let mut frontier = Frontier::default();
        frontier.push(Move::root(start));
        frontier
    }

    /// Pushes `entry` on top, returning the stale entry it evicted, if any.
    pub fn push(&mut self, entry: Move) -> Option<Move> {
        let evicted = self
            .index
            .remove(&entry.current)
            .and_then(|slot| self.slots[slot].take());

        self.index.insert(entry.current, self.slots.len());
        self.slots.push(Some(entry));

        if evicted.is_some() {
            self.compact_if_sparse();
        }

        evicted
    }

    pub fn pop(&mut self) -> Option<Move> {
        while let Some(slot) = self.slots.pop() {
            if let Some(entry) = slot {
                self.index.remove(&entry.current);
                return Some(entry);
            }
        }
        None
    }

    pub fn peek(&self) -> Option<&Move> {
        self.slots.iter().rev().find_map(|slot| slot.as_ref())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.index.contains_key(&position)
    }

    /// Live entries, bottom of the stack first.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    fn compact_if_sparse(&mut self) {
        let live = self.index.len();
        if self.slots.len() <= 2 * live + 16 {
            return;
        }

        self.slots.retain(Option::is_some);
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Some(entry) = entry {
                self.index.insert(entry.current, slot);
            }
        }
    }
}
