//! Tile and grid widgets
//!
//! Tiles are laid out like a CSS grid: a fixed number of equally wide columns
//! filled in row-major order, so uneven template rows wrap into the next row.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::theme;
use crate::config::TileSize;
use crate::grid::template::Cell;
use crate::grid::{Location, Matrix};
use crate::theme::parse_color;

/// One bordered, fixed-size tile
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    pub cell: &'a Cell,
    pub location: Location,
}

impl<'a> Tile<'a> {
    pub fn new(cell: &'a Cell, location: Location) -> Self {
        Self { cell, location }
    }
}

impl Widget for Tile<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut style = Style::default();
        if let Some(bg) = self.cell.bg_color.as_deref().and_then(parse_color) {
            style = style.bg(bg);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme().border))
            .style(style);

        Paragraph::new(self.cell.icon.as_deref().unwrap_or_default())
            .style(Style::default().fg(theme().icon))
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

/// Every tile of a matrix, `width()` columns wide
pub struct Grid<'a> {
    tiles: &'a Matrix<Cell>,
    size: TileSize,
}

impl<'a> Grid<'a> {
    pub fn new(tiles: &'a Matrix<Cell>, size: TileSize) -> Self {
        Self { tiles, size }
    }
}

impl Widget for Grid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = self.tiles.width();
        let tiles = self.tiles.map(Tile::new);

        for (slot, tile) in tiles.into_cells().enumerate() {
            if let Some(rect) = slot_rect(slot, columns, area, self.size) {
                tile.render(rect, buf);
            }
        }
    }
}

/// Screen rectangle of the `slot`-th tile, or `None` when it does not fit
pub fn slot_rect(slot: usize, columns: usize, area: Rect, size: TileSize) -> Option<Rect> {
    if columns == 0 {
        return None;
    }

    let width = usize::from(size.width);
    let height = usize::from(size.height);
    let x = usize::from(area.x) + (slot % columns) * width;
    let y = usize::from(area.y) + (slot / columns) * height;

    if x + width > usize::from(area.right()) || y + height > usize::from(area.bottom()) {
        return None;
    }
    Some(Rect::new(x as u16, y as u16, size.width, size.height))
}

/// Which tile is drawn at screen position (`x`, `y`)
pub fn tile_at(
    tiles: &Matrix<Cell>,
    area: Rect,
    size: TileSize,
    x: u16,
    y: u16,
) -> Option<Location> {
    let columns = tiles.width();
    tiles
        .iter()
        .enumerate()
        .find(|(slot, _)| {
            slot_rect(*slot, columns, area, size).is_some_and(|rect| {
                x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
            })
        })
        .map(|(_, (location, _))| location)
}
