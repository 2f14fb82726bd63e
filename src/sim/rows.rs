//! Row generation
//!
//! A row is one horizontal band of cells. Two adjacent columns (the gap pair)
//! are always breakable so the path downward can be cleared; every other
//! cell is unbreakable with a fixed probability. One boundary marker sits on
//! each side of the playfield.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::CELL_SIZE;

/// What occupies a slot in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Can be dug out by the player
    Breakable,
    /// Never destroyed
    Unbreakable,
    /// Impassable marker beyond the playfield edge
    Boundary,
}

/// A slot in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Only breakable cells are ever destroyed
    pub destroyed: bool,
}

impl Cell {
    fn new(kind: CellKind) -> Self {
        Self {
            kind,
            destroyed: false,
        }
    }

    /// True when nothing blocks this slot
    pub fn is_clear(&self) -> bool {
        self.destroyed
    }
}

/// One generated row of cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Row index, counting downward from 0
    pub index: u32,
    /// `columns + 2` slots; first and last are boundary markers
    cells: Vec<Cell>,
    /// Lowest forced-breakable column
    gap_start: usize,
    /// Highest forced-breakable column (equal to `gap_start` for a single-wide gap)
    gap_end: usize,
}

impl Row {
    /// Playfield width (boundary markers excluded)
    pub fn columns(&self) -> usize {
        self.cells.len() - 2
    }

    /// World Y of this row's center
    pub fn y(&self) -> f32 {
        row_y(self.index as i32)
    }

    /// All slots including the two boundary markers
    pub fn slots(&self) -> &[Cell] {
        &self.cells
    }

    /// Playfield cells only
    pub fn cells(&self) -> &[Cell] {
        &self.cells[1..self.cells.len() - 1]
    }

    /// Cell at a playfield column; out-of-range columns read as boundary
    pub fn cell(&self, column: i32) -> Cell {
        if column < 0 || column as usize >= self.columns() {
            Cell::new(CellKind::Boundary)
        } else {
            self.cells[column as usize + 1]
        }
    }

    /// True when the player can occupy this column
    pub fn is_clear(&self, column: i32) -> bool {
        self.cell(column).is_clear()
    }

    /// Columns forced breakable when the row was generated
    pub fn gap_columns(&self) -> std::ops::RangeInclusive<usize> {
        if self.columns() == 0 {
            // Empty range for a zero-width playfield
            return std::ops::RangeInclusive::new(1, 0);
        }
        self.gap_start..=self.gap_end
    }

    /// Destroy a breakable cell. Returns false for anything else.
    pub fn destroy(&mut self, column: usize) -> bool {
        if column >= self.columns() {
            return false;
        }
        let cell = &mut self.cells[column + 1];
        if cell.kind != CellKind::Breakable || cell.destroyed {
            return false;
        }
        cell.destroyed = true;
        true
    }
}

/// World Y of a row index (row 0 at y = 0, growing downward)
#[inline]
pub fn row_y(index: i32) -> f32 {
    -(index as f32) * CELL_SIZE
}

/// World X of a column center for a playfield `columns` wide, centered on 0
#[inline]
pub fn column_x(column: usize, columns: usize) -> f32 {
    (column as f32 - (columns.saturating_sub(1)) as f32 / 2.0) * CELL_SIZE
}

/// Generate one row.
///
/// `gap_column` and `gap_column + direction` (clamped to the playfield) are
/// forced breakable. Other cells are unbreakable with `unbreakable_chance`.
pub fn generate_row<R: Rng>(
    index: u32,
    columns: usize,
    gap_column: usize,
    direction: i32,
    unbreakable_chance: f32,
    rng: &mut R,
) -> Row {
    let mut cells = Vec::with_capacity(columns + 2);
    cells.push(Cell::new(CellKind::Boundary));

    let (gap_start, gap_end) = if columns == 0 {
        (0, 0)
    } else {
        let last = columns - 1;
        let a = gap_column.min(last);
        let b = (a as i64 + direction.signum() as i64).clamp(0, last as i64) as usize;
        (a.min(b), a.max(b))
    };

    let chance = unbreakable_chance.clamp(0.0, 1.0) as f64;
    for column in 0..columns {
        let kind = if (gap_start..=gap_end).contains(&column) {
            CellKind::Breakable
        } else if rng.random_bool(chance) {
            CellKind::Unbreakable
        } else {
            CellKind::Breakable
        };
        cells.push(Cell::new(kind));
    }

    cells.push(Cell::new(CellKind::Boundary));

    Row {
        index,
        cells,
        gap_start,
        gap_end,
    }
}
