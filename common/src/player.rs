use serde::{Deserialize, Serialize};

use crate::maze::{Direction, Position};

pub const BLINK_FRAMES: u32 = 15; // Frames the player stays lit per blink cycle.

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    blink_counter: u32,
    is_showing: bool,
}

impl Player {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            blink_counter: 0,
            is_showing: true,
        }
    }

    pub fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Where a step in `direction` would land, as signed coordinates so the
    /// validator can reject steps off the grid.
    pub fn target(&self, direction: Direction) -> (isize, isize) {
        let (drow, dcol) = direction.delta();
        (
            self.position.row as isize + drow,
            self.position.col as isize + dcol,
        )
    }

    /// Advances the blink cycle by one frame: lit for the first
    /// `BLINK_FRAMES + 1` frames, dark until the counter passes one and a half
    /// times that, then around again.
    pub fn blink(&mut self) {
        self.is_showing = self.blink_counter <= BLINK_FRAMES;
        if 2 * self.blink_counter <= 3 * BLINK_FRAMES {
            self.blink_counter += 1;
        } else {
            self.blink_counter = 0;
        }
    }

    pub fn is_showing(&self) -> bool {
        self.is_showing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_one_step_away() {
        let player = Player::new(Position::new(0, 3));
        assert_eq!(player.target(Direction::Top), (-1, 3));
        assert_eq!(player.target(Direction::Right), (0, 4));
        assert_eq!(player.target(Direction::Bottom), (1, 3));
        assert_eq!(player.target(Direction::Left), (0, 2));
    }

    #[test]
    fn blink_cycle_is_lit_then_dark() {
        let mut player = Player::new(Position::new(0, 0));
        let mut pattern = Vec::new();
        for _ in 0..48 {
            player.blink();
            pattern.push(player.is_showing());
        }

        // 16 lit frames, 8 dark frames, repeated.
        let cycle: Vec<bool> = (0..24).map(|i| i < 16).collect();
        assert_eq!(&pattern[..24], cycle.as_slice());
        assert_eq!(&pattern[24..], cycle.as_slice());
    }

    #[test]
    fn new_player_starts_lit() {
        let player = Player::new(Position::new(1, 1));
        assert!(player.is_showing());
    }
}
