use glam::{Vec2, vec2};

use crate::{
    game::{Game, Outcome},
    maze::{CellState, Maze, Position, Speed, Walls},
    notice::Notice,
    player::Player,
};

pub const CELL_SIZE: f32 = 20.0;
pub const PLAYER_INSET: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn inset(&self, by: f32) -> Rect {
        Rect {
            origin: self.origin + Vec2::splat(by),
            size: (self.size - Vec2::splat(2.0 * by)).max(Vec2::ZERO),
        }
    }
}

/// Maps grid coordinates to geometry. The renderer decides what a unit is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub cell_size: Vec2,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: Vec2::splat(CELL_SIZE),
        }
    }
}

impl Layout {
    pub fn cell_rect(&self, position: Position) -> Rect {
        Rect {
            origin: vec2(position.col as f32, position.row as f32) * self.cell_size,
            size: self.cell_size,
        }
    }

    pub fn player_rect(&self, position: Position) -> Rect {
        self.cell_rect(position).inset(PLAYER_INSET)
    }

    pub fn maze_size(&self, maze: &Maze) -> Vec2 {
        vec2(maze.cols() as f32, maze.rows() as f32) * self.cell_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub position: Position,
    pub rect: Rect,
    pub walls: Walls,
    pub state: CellState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub position: Position,
    pub rect: Rect,
    pub blink_on: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub remaining: i32,
    pub speed: Speed,
    pub generating: bool,
    pub ready: bool,
    pub outcome: Option<Outcome>,
    pub notices: Vec<Notice>,
}

/// Whatever draws the game. The engine supplies categories and geometry,
/// never colors or pixels.
pub trait RenderSink {
    fn draw_cell(&mut self, cell: &CellView);
    fn draw_player(&mut self, player: &PlayerView);
    fn draw_status(&mut self, status: &StatusView);
}

pub fn render_maze(maze: &Maze, layout: &Layout, sink: &mut impl RenderSink) {
    for cell in maze.cells() {
        sink.draw_cell(&CellView {
            position: cell.position,
            rect: layout.cell_rect(cell.position),
            walls: cell.walls,
            state: maze.cell_state(cell.position),
        });
    }
}

pub fn render_player(player: &Player, layout: &Layout, sink: &mut impl RenderSink) {
    sink.draw_player(&PlayerView {
        position: player.position,
        rect: layout.player_rect(player.position),
        blink_on: player.is_showing(),
    });
}

/// Emits one full frame: every cell, then the player, then the status.
pub fn render(game: &Game, layout: &Layout, sink: &mut impl RenderSink) {
    render_maze(game.maze(), layout, sink);

    if let Some(player) = game.player() {
        render_player(player, layout, sink);
    }

    sink.draw_status(&StatusView {
        remaining: game.countdown().remaining(),
        speed: game.speed(),
        generating: game.is_generating(),
        ready: game.maze().is_ready(),
        outcome: game.outcome(),
        notices: game.notices().visible(),
    });
}
