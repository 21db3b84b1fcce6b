// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Tile packer

use crate::config::TileConfig;
use crate::geom::{Coord, Rect, Size};
use crate::node::TileMode;

/// First-fit packer of tiles into a grid of fixed width
///
/// Cells are filled row-major. [`TileMode::Tiny`] tiles share one normal cell
/// four to a cell, in the quadrant order top-left, top-right, bottom-left,
/// bottom-right; a fifth tiny tile opens a new cell. Any other tile closes
/// the open tiny cell.
#[derive(Clone, Debug)]
pub struct TilePacker {
    columns: usize,
    rows: Vec<Vec<bool>>,
    tiny: Option<(usize, usize, u8)>,
}

impl TilePacker {
    /// Construct for a grid `columns` cells wide
    pub fn new(columns: u32) -> Self {
        TilePacker {
            columns: usize::try_from(columns.max(1)).unwrap_or(1),
            rows: vec![],
            tiny: None,
        }
    }

    /// Number of rows in use
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    fn is_free(&self, col: usize, row: usize, w: usize, h: usize) -> bool {
        if col + w > self.columns {
            return false;
        }
        (row..row + h).all(|r| match self.rows.get(r) {
            Some(cells) => cells[col..col + w].iter().all(|used| !used),
            None => true,
        })
    }

    fn occupy(&mut self, col: usize, row: usize, w: usize, h: usize) {
        while self.rows.len() < row + h {
            self.rows.push(vec![false; self.columns]);
        }
        for cells in &mut self.rows[row..row + h] {
            for used in &mut cells[col..col + w] {
                *used = true;
            }
        }
    }

    fn first_fit(&mut self, w: usize, h: usize) -> (usize, usize) {
        let w = w.min(self.columns);
        let mut row = 0;
        loop {
            for col in 0..self.columns {
                if self.is_free(col, row, w, h) {
                    self.occupy(col, row, w, h);
                    return (col, row);
                }
            }
            row += 1;
        }
    }

    /// Place a tile, returning its cell position, footprint and quadrant
    ///
    /// The quadrant is `Some(0..4)` for tiny tiles.
    pub fn place(&mut self, mode: TileMode) -> TileSlot {
        if mode == TileMode::Tiny {
            let (col, row, quadrant) = match self.tiny {
                Some((col, row, q)) if q < 4 => (col, row, q),
                _ => {
                    let (col, row) = self.first_fit(1, 1);
                    (col, row, 0)
                }
            };
            self.tiny = Some((col, row, quadrant + 1));
            return TileSlot {
                col,
                row,
                cells: (1, 1),
                quadrant: Some(quadrant),
            };
        }

        self.tiny = None;
        let (w, h) = mode.cells();
        let w = usize::try_from(w).unwrap_or(1).min(self.columns);
        let h = usize::try_from(h).unwrap_or(1);
        let (col, row) = self.first_fit(w, h);
        TileSlot {
            col,
            row,
            cells: (w, h),
            quadrant: None,
        }
    }

    /// Pixel size of the occupied grid
    pub fn extent(&self, config: &TileConfig) -> Size {
        let cols = i32::try_from(self.columns).unwrap_or(1);
        let rows = i32::try_from(self.rows.len()).unwrap_or(0);
        let step = config.cell + config.spacing;
        let h = match rows {
            0 => 0,
            n => n * step - config.spacing,
        };
        Size::clamped(cols * step - config.spacing, h)
    }
}

/// Position of a placed tile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSlot {
    pub col: usize,
    pub row: usize,
    /// Footprint in cells (columns, rows)
    pub cells: (usize, usize),
    /// Quadrant of a tiny tile (0: top-left, 1: top-right, 2: bottom-left, 3: bottom-right)
    pub quadrant: Option<u8>,
}

impl TileSlot {
    /// Rect relative to the grid origin
    pub fn rect(&self, config: &TileConfig) -> Rect {
        let step = config.cell + config.spacing;
        let cell = |n: usize| i32::try_from(n).unwrap_or(0);
        let pos = Coord(cell(self.col) * step, cell(self.row) * step);
        let span = |n: usize| cell(n) * step - config.spacing;
        match self.quadrant {
            None => Rect::new(pos, Size::clamped(span(self.cells.0), span(self.cells.1))),
            Some(q) => {
                let half = (config.cell - config.spacing) / 2;
                let dx = i32::from(q % 2) * (half + config.spacing);
                let dy = i32::from(q / 2) * (half + config.spacing);
                Rect::new(Coord(pos.0 + dx, pos.1 + dy), Size::clamped(half, half))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_fit_fills_gaps() {
        let mut packer = TilePacker::new(4);
        assert_eq!(packer.place(TileMode::DoubleSquare).col, 0);
        let a = packer.place(TileMode::Double);
        assert_eq!((a.col, a.row), (2, 0));
        let b = packer.place(TileMode::Normal);
        assert_eq!((b.col, b.row), (2, 1));
        let c = packer.place(TileMode::Double);
        assert_eq!((c.col, c.row), (0, 2));
        let d = packer.place(TileMode::Normal);
        assert_eq!((d.col, d.row), (3, 1));
        assert_eq!(packer.rows(), 3);
    }

    #[test]
    fn tiny_quadrants() {
        let mut packer = TilePacker::new(2);
        let slots: Vec<_> = (0..5).map(|_| packer.place(TileMode::Tiny)).collect();
        let quadrants: Vec<_> = slots.iter().map(|s| s.quadrant).collect();
        assert_eq!(quadrants, vec![Some(0), Some(1), Some(2), Some(3), Some(0)]);
        assert_eq!((slots[3].col, slots[3].row), (0, 0));
        assert_eq!((slots[4].col, slots[4].row), (1, 0));

        let config = TileConfig::default();
        // half = (120 - 8) / 2 = 56
        assert_eq!(slots[3].rect(&config), Rect::clamped(64, 64, 56, 56));
    }

    #[test]
    fn normal_tile_closes_tiny_cell() {
        let mut packer = TilePacker::new(4);
        packer.place(TileMode::Tiny);
        packer.place(TileMode::Normal);
        let t = packer.place(TileMode::Tiny);
        assert_eq!((t.col, t.quadrant), (2, Some(0)));
    }

    #[test]
    fn rects_and_extent() {
        let config = TileConfig::default();
        let mut packer = TilePacker::new(4);
        let slot = packer.place(TileMode::DoubleSquare);
        assert_eq!(slot.rect(&config), Rect::clamped(0, 0, 248, 248));
        assert_eq!(packer.extent(&config), Size(4 * 128 - 8, 248));
    }

    #[test]
    fn wide_tile_in_narrow_grid() {
        let mut packer = TilePacker::new(1);
        let slot = packer.place(TileMode::DoubleSquare);
        assert_eq!(slot.cells, (1, 2));
    }
}
