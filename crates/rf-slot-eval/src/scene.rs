//! Game scene: the visible symbol window
//!
//! Cells are stored column-major, `cells[x][y]`: `x` is the reel, `y` the
//! row within that reel counted from the top. Reads outside the scene (or
//! below an irregular reel's visible height) return [`EMPTY`].

use std::fmt;

use serde::Serialize;

use crate::error::{SlotEvalError, SlotEvalResult};
use crate::symbols::{EMPTY, ReelStrip, Symbol};

/// A cell position, `(x, y)`
pub type Pos = (usize, usize);

/// Offsets of the 8 neighbours visited by [`GameScene::for_each_around`]
const AROUND: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The symbol grid of one spin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameScene {
    width: usize,
    height: usize,
    cells: Vec<Vec<Symbol>>,
    /// Visible height per reel when reels are irregular
    reel_heights: Option<Vec<usize>>,
}

impl GameScene {
    /// Create an empty scene
    pub fn new(width: usize, height: usize) -> SlotEvalResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlotEvalError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![vec![EMPTY; height]; width],
            reel_heights: None,
        })
    }

    /// Create an empty scene whose reels have individual visible heights.
    ///
    /// `height` is the tallest reel; every entry of `reel_heights` must be in
    /// `1..=height`.
    pub fn with_reel_heights(reel_heights: &[usize]) -> SlotEvalResult<Self> {
        let height = reel_heights.iter().copied().max().unwrap_or(0);
        let mut scene = Self::new(reel_heights.len(), height)?;

        for (reel, &h) in reel_heights.iter().enumerate() {
            if h == 0 {
                return Err(SlotEvalError::InvalidReelHeight {
                    reel,
                    height: h,
                    max: height,
                });
            }
        }

        if reel_heights.iter().any(|&h| h != height) {
            scene.reel_heights = Some(reel_heights.to_vec());
        }
        Ok(scene)
    }

    /// Build a scene from reel columns, `columns[x][y]`
    pub fn from_columns(columns: Vec<Vec<Symbol>>) -> SlotEvalResult<Self> {
        let width = columns.len();
        let height = columns.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(SlotEvalError::InvalidDimensions { width, height });
        }

        for (reel, column) in columns.iter().enumerate() {
            if column.len() != height {
                return Err(SlotEvalError::JaggedColumns {
                    reel,
                    len: column.len(),
                    expected: height,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells: columns,
            reel_heights: None,
        })
    }

    /// Number of reels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the tallest reel
    pub fn height(&self) -> usize {
        self.height
    }

    /// Visible height of reel `x` (0 outside the scene)
    pub fn reel_height(&self, x: usize) -> usize {
        if x >= self.width {
            return 0;
        }
        match &self.reel_heights {
            Some(heights) => heights[x],
            None => self.height,
        }
    }

    /// Whether reels have individual heights
    pub fn is_irregular(&self) -> bool {
        self.reel_heights.is_some()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.reel_height(x)
    }

    /// Symbol at `(x, y)`, [`EMPTY`] outside the scene
    pub fn get(&self, x: usize, y: usize) -> Symbol {
        if self.in_bounds(x, y) {
            self.cells[x][y]
        } else {
            EMPTY
        }
    }

    /// Set a cell. Writes outside the scene are ignored and return `false`.
    pub fn set(&mut self, x: usize, y: usize, symbol: Symbol) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.cells[x][y] = symbol;
        true
    }

    /// Reel columns, `columns()[x][y]`
    pub fn columns(&self) -> &[Vec<Symbol>] {
        &self.cells
    }

    /// Populate every reel from its strip starting at the stop index.
    pub fn fill(&mut self, reels: &[ReelStrip], stops: &[usize]) -> SlotEvalResult<()> {
        self.check_reels(reels, stops)?;

        for x in 0..self.width {
            for y in 0..self.reel_height(x) {
                self.cells[x][y] = reels[x].symbol_at(stops[x] + y);
            }
        }

        log::debug!("Filled {}x{} scene from stops {:?}", self.width, self.height, stops);
        Ok(())
    }

    fn check_reels(&self, reels: &[ReelStrip], stops: &[usize]) -> SlotEvalResult<()> {
        if reels.len() != self.width {
            return Err(SlotEvalError::ReelCountMismatch {
                expected: self.width,
                actual: reels.len(),
            });
        }
        if stops.len() != self.width {
            return Err(SlotEvalError::ReelCountMismatch {
                expected: self.width,
                actual: stops.len(),
            });
        }
        if let Some(reel) = reels.iter().position(ReelStrip::is_empty) {
            return Err(SlotEvalError::EmptyReel(reel));
        }
        Ok(())
    }

    /// Visit every visible cell, reel by reel.
    pub fn for_each(&self, mut f: impl FnMut(usize, usize, Symbol)) {
        for x in 0..self.width {
            for y in 0..self.reel_height(x) {
                f(x, y, self.cells[x][y]);
            }
        }
    }

    /// Visit the up-to-8 neighbours of `(x, y)` that lie inside the scene.
    pub fn for_each_around(&self, x: usize, y: usize, mut f: impl FnMut(usize, usize, Symbol)) {
        for (dx, dy) in AROUND {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if self.in_bounds(nx, ny) {
                f(nx, ny, self.cells[nx][ny]);
            }
        }
    }

    /// Number of cells holding `symbol`
    pub fn count_symbol(&self, symbol: Symbol) -> usize {
        let mut count = 0;
        self.for_each(|_, _, s| {
            if s == symbol {
                count += 1;
            }
        });
        count
    }

    /// Positions holding `symbol`, reel by reel
    pub fn positions_of(&self, symbol: Symbol) -> Vec<Pos> {
        let mut positions = Vec::new();
        self.for_each(|x, y, s| {
            if s == symbol {
                positions.push((x, y));
            }
        });
        positions
    }

    /// Empty the given cells; returns how many were non-empty before.
    pub fn remove_positions(&mut self, positions: &[Pos]) -> usize {
        let mut removed = 0;
        for &(x, y) in positions {
            if self.get(x, y) != EMPTY {
                self.cells[x][y] = EMPTY;
                removed += 1;
            }
        }
        removed
    }

    /// Slide surviving symbols down each reel so holes collect at the top.
    ///
    /// Returns `true` if anything moved.
    pub fn drop_down(&mut self) -> bool {
        let mut moved = false;

        for x in 0..self.width {
            let h = self.reel_height(x);
            let column = &mut self.cells[x][..h];
            let mut write = h;
            for read in (0..h).rev() {
                if column[read] == EMPTY {
                    continue;
                }
                write -= 1;
                if write != read {
                    column[write] = column[read];
                    column[read] = EMPTY;
                    moved = true;
                }
            }
        }

        moved
    }

    /// Number of empty cells per reel
    pub fn holes(&self) -> Vec<usize> {
        (0..self.width)
            .map(|x| {
                self.cells[x][..self.reel_height(x)]
                    .iter()
                    .filter(|&&s| s == EMPTY)
                    .count()
            })
            .collect()
    }

    /// Fill every empty cell from the reel strips.
    ///
    /// Empty cells of reel `x` take consecutive strip symbols starting at
    /// `stops[x]`, top to bottom. Returns the number of cells filled.
    pub fn refill_holes(&mut self, reels: &[ReelStrip], stops: &[usize]) -> SlotEvalResult<usize> {
        self.check_reels(reels, stops)?;

        let mut filled = 0;
        for x in 0..self.width {
            let mut offset = 0;
            for y in 0..self.reel_height(x) {
                if self.cells[x][y] == EMPTY {
                    self.cells[x][y] = reels[x].symbol_at(stops[x] + offset);
                    offset += 1;
                    filled += 1;
                }
            }
        }
        Ok(filled)
    }
}

impl fmt::Display for GameScene {
    /// Rows top to bottom, reels left to right
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: Vec<String> = (0..self.width).map(|x| self.get(x, y).to_string()).collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
