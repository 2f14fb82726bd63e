//! Gap walker
//!
//! Picks the gap column for each successive row. The gap moves exactly one
//! column left or right per row (uniformly, clamped at the edges), so it
//! traces a meandering single-width path downward.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Input for generating one row: the gap column and the direction toward
/// the next gap. The row forces `column` and `column + direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapStep {
    pub column: usize,
    pub direction: i32,
}

/// Choose the next gap column: one of `current - 1` / `current + 1`,
/// restricted to `[0, columns - 1]`.
pub fn next_gap<R: Rng>(current: usize, columns: usize, rng: &mut R) -> usize {
    if columns <= 1 {
        return 0;
    }
    let current = current.min(columns - 1);
    let can_left = current > 0;
    let can_right = current + 1 < columns;
    match (can_left, can_right) {
        (true, true) => {
            if rng.random_bool(0.5) {
                current - 1
            } else {
                current + 1
            }
        }
        (true, false) => current - 1,
        (false, true) => current + 1,
        (false, false) => current,
    }
}

/// Rolling gap state across rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapWalker {
    columns: usize,
    current: usize,
    previous: usize,
}

impl GapWalker {
    /// Start the walk at `start` (clamped to the playfield)
    pub fn new(columns: usize, start: usize) -> Self {
        let start = start.min(columns.saturating_sub(1));
        Self {
            columns,
            current: start,
            previous: start,
        }
    }

    /// Start the walk at a random column
    pub fn random<R: Rng>(columns: usize, rng: &mut R) -> Self {
        let start = if columns == 0 {
            0
        } else {
            rng.random_range(0..columns)
        };
        Self::new(columns, start)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Current gap column
    pub fn current(&self) -> usize {
        self.current
    }

    /// Gap column before the last step
    pub fn previous(&self) -> usize {
        self.previous
    }

    /// `sign(current - previous)`, 0 before the first step
    pub fn direction(&self) -> i32 {
        (self.current as i64 - self.previous as i64).signum() as i32
    }

    /// Advance one row. The returned step forces both the old and the new
    /// gap column, which is what keeps consecutive rows connected.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> GapStep {
        let next = next_gap(self.current, self.columns, rng);
        self.previous = self.current;
        self.current = next;
        GapStep {
            column: self.previous,
            direction: self.direction(),
        }
    }
}
