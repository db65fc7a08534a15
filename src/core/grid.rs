//! Tile grid: loading, validation and cell queries.
use crate::core::math::Vec2;
use crate::error::GridError;

/// Material id of a cell. 0 is open floor, anything else is a wall.
pub type Tile = u8;

pub const OPEN: Tile = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// `cells` is row-major, `width * height` long.
    pub fn new(width: usize, height: usize, cells: Vec<Tile>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != width * height {
            return Err(GridError::Shape {
                width,
                height,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// One row per line, one decimal digit per cell. Whitespace inside a row
    /// is ignored and blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for line in text.lines() {
            let mut row = Vec::new();
            for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let tile = ch.to_digit(10).ok_or(GridError::InvalidTile {
                    row: height,
                    col,
                    ch,
                })?;
                row.push(tile as Tile);
            }
            if row.is_empty() {
                continue;
            }
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(GridError::RaggedRow {
                        row: height,
                        expected: w,
                        found: row.len(),
                    });
                }
                Some(_) => {}
            }
            cells.extend(row);
            height += 1;
        }

        Self::new(width.unwrap_or(0), height, cells)
    }

    /// The stock 10x10 level: border of material 3 with brick (1) and
    /// eagle (2) blocks inside, and an eagle tile set into the east wall.
    pub fn original_level() -> Self {
        #[rustfmt::skip]
        let cells = vec![
            3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
            3, 0, 0, 0, 0, 0, 0, 0, 0, 3,
            3, 0, 1, 2, 1, 1, 0, 0, 0, 3,
            3, 0, 0, 0, 0, 1, 0, 0, 0, 2,
            3, 0, 0, 0, 0, 0, 0, 0, 0, 3,
            3, 0, 0, 0, 0, 0, 1, 0, 0, 3,
            3, 0, 0, 1, 2, 1, 1, 1, 0, 3,
            3, 0, 0, 0, 0, 0, 1, 0, 0, 3,
            3, 0, 0, 0, 0, 0, 0, 0, 0, 3,
            3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
        ];
        Self {
            width: 10,
            height: 10,
            cells,
        }
    }

    /// Open `width x height` room bordered by `wall`.
    pub fn bordered(width: usize, height: usize, wall: Tile) -> Result<Self, GridError> {
        let mut cells = vec![OPEN; width * height];
        for cy in 0..height {
            for cx in 0..width {
                if cx == 0 || cy == 0 || cx + 1 == width || cy + 1 == height {
                    cells[cy * width + cx] = wall;
                }
            }
        }
        Self::new(width, height, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, cx: i64, cy: i64) -> bool {
        cx >= 0 && cy >= 0 && (cx as usize) < self.width && (cy as usize) < self.height
    }

    /// Tile at a cell, `None` outside the grid.
    #[inline]
    pub fn tile(&self, cx: i64, cy: i64) -> Option<Tile> {
        if self.in_bounds(cx, cy) {
            Some(self.cells[cy as usize * self.width + cx as usize])
        } else {
            None
        }
    }

    /// Outside the grid counts as solid.
    #[inline]
    pub fn is_open(&self, cx: i64, cy: i64) -> bool {
        self.tile(cx, cy) == Some(OPEN)
    }

    /// Cell containing a world-space point.
    #[inline]
    pub fn cell_of(p: Vec2, cell_size: f32) -> (i64, i64) {
        (
            (p.x / cell_size).floor() as i64,
            (p.y / cell_size).floor() as i64,
        )
    }

    #[inline]
    pub fn is_open_at(&self, p: Vec2, cell_size: f32) -> bool {
        let (cx, cy) = Self::cell_of(p, cell_size);
        self.is_open(cx, cy)
    }

    /// True when every border cell is a wall, so no ray can leave the grid.
    pub fn is_enclosed(&self) -> bool {
        let (w, h) = (self.width as i64, self.height as i64);
        let rows = (0..w).all(|cx| !self.is_open(cx, 0) && !self.is_open(cx, h - 1));
        let cols = (0..h).all(|cy| !self.is_open(0, cy) && !self.is_open(w - 1, cy));
        rows && cols
    }

    /// Iterates `(cx, cy, tile)` over every wall cell.
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, t)| **t != OPEN)
            .map(|(i, t)| (i % self.width, i / self.width, *t))
    }
}
