use crossterm::style::Color;
use glam::vec2;

use common::{
    maze::{CellState, Direction},
    render::{CellView, Layout, PlayerView},
};

// One cell is three columns wide and two lines tall, sharing its walls with
// its neighbours: `+--+` over `|██|`.
pub const CELL_WIDTH: usize = 3;
pub const CELL_HEIGHT: usize = 2;

const CORNER: char = '+';
const HORIZONTAL_WALL: char = '-';
const VERTICAL_WALL: char = '|';
const FILL: char = '█';
const PLAYER: [char; 2] = ['(', ')'];

pub const WALL_COLOR: Color = rgb(0x4d, 0x4f, 0x45);
pub const PLAYER_COLOR: Color = rgb(0xff, 0x7f, 0x50);
pub const PLAYER_BLINK_COLOR: Color = rgb(0xe6, 0x39, 0x46);

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

pub fn state_color(state: CellState) -> Color {
    match state {
        CellState::Blank => rgb(0xcf, 0xcf, 0xce),
        CellState::Active => rgb(0x63, 0xbe, 0xc2),
        CellState::Visited => rgb(0xe0, 0xe1, 0xdd),
        CellState::Explored => rgb(0xe8, 0xcb, 0xbe),
        CellState::Exit => rgb(0x87, 0xc9, 0x7b),
    }
}

/// Geometry in terminal character units, so a cell rect's origin is the
/// column and line of its top-left corner.
pub fn terminal_layout() -> Layout {
    Layout {
        cell_size: vec2(CELL_WIDTH as f32, CELL_HEIGHT as f32),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub color: Color,
}

impl Glyph {
    const EMPTY: Glyph = Glyph {
        symbol: ' ',
        color: Color::Reset,
    };
}

/// A character buffer the size of the drawn maze. Cells paint into it and
/// the terminal UI prints it line by line.
#[derive(Debug, Clone)]
pub struct Frame {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(rows: usize, cols: usize) -> Self {
        let width = cols * CELL_WIDTH + 1;
        let height = rows * CELL_HEIGHT + 1;
        Self {
            width,
            height,
            glyphs: vec![Glyph::EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Glyph> {
        (x < self.width && y < self.height).then(|| self.glyphs[y * self.width + x])
    }

    pub fn lines(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks(self.width)
    }

    pub fn text(&self) -> String {
        self.lines()
            .map(|line| line.iter().map(|glyph| glyph.symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn set(&mut self, x: usize, y: usize, symbol: char, color: Color) {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x] = Glyph { symbol, color };
        }
    }

    pub fn draw_cell(&mut self, cell: &CellView) {
        let x = cell.rect.origin.x as usize;
        let y = cell.rect.origin.y as usize;
        let right = x + CELL_WIDTH;
        let bottom = y + CELL_HEIGHT;
        let edge = |direction, wall| {
            if cell.walls.has(direction) {
                wall
            } else {
                ' '
            }
        };

        for (cx, cy) in [(x, y), (right, y), (x, bottom), (right, bottom)] {
            self.set(cx, cy, CORNER, WALL_COLOR);
        }

        for dx in 1..CELL_WIDTH {
            self.set(x + dx, y, edge(Direction::Top, HORIZONTAL_WALL), WALL_COLOR);
            self.set(
                x + dx,
                bottom,
                edge(Direction::Bottom, HORIZONTAL_WALL),
                WALL_COLOR,
            );
            self.set(x + dx, y + 1, FILL, state_color(cell.state));
        }

        self.set(x, y + 1, edge(Direction::Left, VERTICAL_WALL), WALL_COLOR);
        self.set(
            right,
            y + 1,
            edge(Direction::Right, VERTICAL_WALL),
            WALL_COLOR,
        );
    }

    pub fn draw_player(&mut self, player: &PlayerView) {
        let origin = terminal_layout().cell_rect(player.position).origin;
        let x = origin.x as usize;
        let y = origin.y as usize + 1;
        let color = if player.blink_on {
            PLAYER_COLOR
        } else {
            PLAYER_BLINK_COLOR
        };

        for (dx, symbol) in PLAYER.into_iter().enumerate() {
            self.set(x + 1 + dx, y, symbol, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use common::maze::{Maze, MazeMaker, Position};

    use super::*;

    fn draw_maze(maze: &Maze) -> Frame {
        let mut frame = Frame::new(maze.rows(), maze.cols());
        let layout = terminal_layout();
        for cell in maze.cells() {
            frame.draw_cell(&CellView {
                position: cell.position,
                rect: layout.cell_rect(cell.position),
                walls: cell.walls,
                state: maze.cell_state(cell.position),
            });
        }
        frame
    }

    #[test]
    fn frame_is_sized_to_shared_walls() {
        let frame = Frame::new(3, 4);
        assert_eq!(frame.width(), 13);
        assert_eq!(frame.height(), 7);
        assert_eq!(frame.lines().count(), 7);
        assert_eq!(frame.get(13, 0), None);
    }

    #[test]
    fn blank_maze_draws_every_wall() {
        let maze = Maze::build(1, 2, Position::new(0, 1));
        let frame = draw_maze(&maze);
        assert_eq!(frame.text(), "+--+--+\n|██|██|\n+--+--+");
        assert_eq!(frame.get(0, 0).map(|glyph| glyph.color), Some(WALL_COLOR));
        assert_eq!(
            frame.get(4, 1).map(|glyph| glyph.color),
            Some(state_color(CellState::Exit))
        );
    }

    #[test]
    fn carved_passages_leave_gaps() {
        let mut maze = Maze::build(1, 2, Position::new(0, 0));
        MazeMaker::from_seed(3).generate(&mut maze);
        let frame = draw_maze(&maze);
        assert_eq!(frame.text(), "+--+--+\n|██ ██|\n+--+--+");
    }

    #[test]
    fn player_sits_inside_its_cell_and_blinks() {
        let mut frame = Frame::new(2, 2);
        let position = Position::new(1, 1);
        let rect = Layout::default().player_rect(position);

        frame.draw_player(&PlayerView {
            position,
            rect,
            blink_on: true,
        });
        assert_eq!(frame.get(4, 3).map(|glyph| glyph.symbol), Some('('));
        assert_eq!(frame.get(5, 3).map(|glyph| glyph.symbol), Some(')'));
        assert_eq!(frame.get(4, 3).map(|glyph| glyph.color), Some(PLAYER_COLOR));

        frame.draw_player(&PlayerView {
            position,
            rect,
            blink_on: false,
        });
        assert_eq!(
            frame.get(5, 3).map(|glyph| glyph.color),
            Some(PLAYER_BLINK_COLOR)
        );
    }

    #[test]
    fn terminal_layout_puts_cells_on_character_corners() {
        let rect = terminal_layout().cell_rect(Position::new(2, 3));
        assert_eq!(rect.origin, vec2(9.0, 4.0));

        let maze = Maze::build(2, 2, Position::new(0, 0));
        let size = terminal_layout().maze_size(&maze);
        assert_eq!(size, vec2(6.0, 4.0));
    }
}
