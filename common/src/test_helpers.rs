use crate::render::{CellView, PlayerView, RenderSink, StatusView};

/// Remembers everything it was asked to draw, in order.
#[derive(Default)]
pub struct MockRenderSink {
    pub cells: Vec<CellView>,
    pub players: Vec<PlayerView>,
    pub statuses: Vec<StatusView>,
}

impl RenderSink for MockRenderSink {
    fn draw_cell(&mut self, cell: &CellView) {
        self.cells.push(*cell);
    }

    fn draw_player(&mut self, player: &PlayerView) {
        self.players.push(*player);
    }

    fn draw_status(&mut self, status: &StatusView) {
        self.statuses.push(status.clone());
    }
}
