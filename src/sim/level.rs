//! Level streaming
//!
//! Stacks generated rows downward, keeps enough of them below the player,
//! and drops rows once the ceiling has passed them.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::gap::GapWalker;
use super::rows::{Cell, CellKind, Row, column_x, generate_row, row_y};
use crate::tuning::LevelTuning;

/// The stack of rows currently alive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    columns: usize,
    unbreakable_chance: f32,
    walker: GapWalker,
    /// Contiguous rows, front is the shallowest
    rows: VecDeque<Row>,
    /// Index the next generated row will get
    next_index: u32,
}

impl Level {
    /// Create a level and generate its initial rows
    pub fn new<R: Rng>(tuning: &LevelTuning, rng: &mut R) -> Self {
        let mut level = Self {
            columns: tuning.columns,
            unbreakable_chance: tuning.unbreakable_chance,
            walker: GapWalker::random(tuning.columns, rng),
            rows: VecDeque::new(),
            next_index: 0,
        };
        for _ in 0..tuning.initial_rows {
            level.push_row(rng);
        }
        log::debug!(
            "Level created: {} columns, {} initial rows",
            level.columns,
            level.rows.len()
        );
        level
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Rows currently alive, shallowest first
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Number of rows generated so far (including culled ones)
    pub fn generated(&self) -> u32 {
        self.next_index
    }

    fn push_row<R: Rng>(&mut self, rng: &mut R) {
        let step = self.walker.step(rng);
        let row = generate_row(
            self.next_index,
            self.columns,
            step.column,
            step.direction,
            self.unbreakable_chance,
            rng,
        );
        self.rows.push_back(row);
        self.next_index += 1;
    }

    /// Generate rows until at least `lookahead` exist below `player_level`.
    /// Returns how many rows were added.
    pub fn ensure_rows_below<R: Rng>(
        &mut self,
        player_level: i32,
        lookahead: u32,
        rng: &mut R,
    ) -> u32 {
        let wanted = player_level as i64 + lookahead as i64;
        let mut added = 0;
        while (self.next_index as i64) <= wanted {
            self.push_row(rng);
            added += 1;
        }
        added
    }

    /// Drop rows lying above `ceiling_y + margin`. Returns how many were dropped.
    pub fn cull_above(&mut self, ceiling_y: f32, margin: f32) -> usize {
        let mut dropped = 0;
        while let Some(front) = self.rows.front() {
            if front.y() > ceiling_y + margin {
                self.rows.pop_front();
                dropped += 1;
            } else {
                break;
            }
        }
        dropped
    }

    fn first_index(&self) -> u32 {
        self.rows.front().map(|r| r.index).unwrap_or(self.next_index)
    }

    /// Row by index, if it is alive
    pub fn row(&self, index: i32) -> Option<&Row> {
        if index < 0 {
            return None;
        }
        let offset = (index as u32).checked_sub(self.first_index())?;
        self.rows.get(offset as usize)
    }

    fn row_mut(&mut self, index: i32) -> Option<&mut Row> {
        if index < 0 {
            return None;
        }
        let offset = (index as u32).checked_sub(self.first_index())?;
        self.rows.get_mut(offset as usize)
    }

    /// Cell at `(row, column)`.
    ///
    /// The surface above row 0 and culled rows read as cleared; rows not
    /// generated yet read as unbreakable; columns outside the playfield read
    /// as boundary.
    pub fn cell(&self, row: i32, column: i32) -> Cell {
        if column < 0 || column as usize >= self.columns {
            return Cell {
                kind: CellKind::Boundary,
                destroyed: false,
            };
        }
        if row < 0 || (row as u32) < self.first_index() {
            return Cell {
                kind: CellKind::Breakable,
                destroyed: true,
            };
        }
        match self.row(row) {
            Some(r) => r.cell(column),
            None => Cell {
                kind: CellKind::Unbreakable,
                destroyed: false,
            },
        }
    }

    /// True when the player may occupy `(row, column)`
    pub fn is_clear(&self, row: i32, column: i32) -> bool {
        self.cell(row, column).is_clear()
    }

    /// Destroy the breakable cell at `(row, column)`
    pub fn destroy(&mut self, row: i32, column: i32) -> bool {
        if column < 0 {
            return false;
        }
        match self.row_mut(row) {
            Some(r) => r.destroy(column as usize),
            None => false,
        }
    }

    /// World X of a column
    pub fn column_x(&self, column: usize) -> f32 {
        column_x(column, self.columns)
    }

    /// World Y of a row (the surface is row -1)
    pub fn row_y(&self, row: i32) -> f32 {
        row_y(row)
    }

    /// Row index containing world height `y`
    pub fn row_at(&self, y: f32) -> i32 {
        (-y / crate::consts::CELL_SIZE).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn level(seed: u64) -> (Level, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = Level::new(&LevelTuning::default(), &mut rng);
        (level, rng)
    }

    #[test]
    fn test_initial_rows() {
        let (level, _) = level(1);
        assert_eq!(level.generated(), 6);
        let indices: Vec<u32> = level.rows().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_ensure_rows_below_extends_stack() {
        let (mut level, mut rng) = level(2);
        let added = level.ensure_rows_below(3, 8, &mut rng);
        assert_eq!(added, 6);
        assert_eq!(level.generated(), 12);
        assert_eq!(level.ensure_rows_below(3, 8, &mut rng), 0);
    }

    #[test]
    fn test_cull_above_ceiling() {
        let (mut level, _) = level(3);
        // Ceiling at y = -3 with margin 1 drops rows whose y > -2 (rows 0 and 1)
        assert_eq!(level.cull_above(-3.0, 1.0), 2);
        assert!(level.row(1).is_none());
        assert_eq!(level.row(2).map(|r| r.index), Some(2));
        // Culled rows read as open space
        assert!(level.is_clear(0, 3));
    }

    #[test]
    fn test_cell_lookup_edges() {
        let (level, _) = level(4);
        assert!(level.is_clear(-1, 0), "surface is open");
        assert_eq!(level.cell(0, -1).kind, CellKind::Boundary);
        assert_eq!(level.cell(0, 8).kind, CellKind::Boundary);
        assert_eq!(level.cell(50, 2).kind, CellKind::Unbreakable);
    }

    #[test]
    fn test_destroy_through_level() {
        let (mut level, _) = level(5);
        let gap = *level.row(0).unwrap().gap_columns().start() as i32;
        assert!(level.destroy(0, gap));
        assert!(level.is_clear(0, gap));
        assert!(!level.destroy(0, gap));
        assert!(!level.destroy(-1, gap));
        assert!(!level.destroy(99, gap));
    }

    #[test]
    fn test_row_at() {
        let (level, _) = level(6);
        assert_eq!(level.row_at(0.2), 0);
        assert_eq!(level.row_at(-2.4), 2);
        assert_eq!(level.row_at(1.0), -1);
    }
}
