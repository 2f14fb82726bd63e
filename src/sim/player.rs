//! Player movement and digging on the cell grid

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::rows::CellKind;
use crate::tuning::PlayerTuning;

/// Where a dig is aimed relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigDirection {
    Left,
    Right,
    Down,
}

/// Result of a dig attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigResult {
    Destroyed { row: i32, column: usize },
    /// Target cannot be dug
    Blocked(CellKind),
    /// Target is already open
    Nothing,
}

/// The digger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub column: usize,
    /// Row the player occupies; -1 is the surface
    pub level: i32,
    move_cooldown: f32,
    fall_timer: f32,
    /// Last horizontal direction pressed (-1, 0, 1)
    last_pressed: i32,
}

impl Player {
    /// A player standing on the surface
    pub fn new(column: usize) -> Self {
        Self {
            column,
            level: -1,
            move_cooldown: 0.0,
            fall_timer: 0.0,
            last_pressed: 0,
        }
    }

    /// World position
    pub fn pos(&self, level: &Level) -> Vec2 {
        Vec2::new(level.column_x(self.column), level.row_y(self.level))
    }

    /// Resolve held and freshly pressed keys into a direction. With both held
    /// the most recent press wins.
    pub fn horizontal_intent(
        &mut self,
        left_held: bool,
        right_held: bool,
        left_pressed: bool,
        right_pressed: bool,
    ) -> i32 {
        if left_pressed && !right_pressed {
            self.last_pressed = -1;
        } else if right_pressed && !left_pressed {
            self.last_pressed = 1;
        }
        match (left_held, right_held) {
            (true, true) => self.last_pressed,
            (true, false) => -1,
            (false, true) => 1,
            (false, false) => 0,
        }
    }

    /// Step one column in `direction` when the repeat timer allows and the
    /// target cell is open. Returns true when the player moved.
    pub fn step_horizontal(
        &mut self,
        direction: i32,
        dt: f32,
        level: &Level,
        tuning: &PlayerTuning,
    ) -> bool {
        if direction == 0 {
            self.move_cooldown = 0.0;
            return false;
        }
        self.move_cooldown -= dt;
        if self.move_cooldown > 0.0 {
            return false;
        }
        self.move_cooldown = tuning.move_interval;

        let target = self.column as i32 + direction.signum();
        if level.is_clear(self.level, target) {
            self.column = target as usize;
            true
        } else {
            false
        }
    }

    /// Cell a dig in `direction` would hit
    pub fn dig_target(&self, direction: DigDirection) -> (i32, i32) {
        let column = self.column as i32;
        match direction {
            DigDirection::Left => (self.level, column - 1),
            DigDirection::Right => (self.level, column + 1),
            DigDirection::Down => (self.level + 1, column),
        }
    }

    pub fn dig(&self, direction: DigDirection, level: &mut Level) -> DigResult {
        let (row, column) = self.dig_target(direction);
        let cell = level.cell(row, column);
        if cell.is_clear() {
            return DigResult::Nothing;
        }
        match cell.kind {
            CellKind::Breakable if level.destroy(row, column) => DigResult::Destroyed {
                row,
                column: column as usize,
            },
            kind => DigResult::Blocked(kind),
        }
    }

    /// Drop through open cells, one level per `fall_step`. Returns levels fallen.
    pub fn fall(&mut self, dt: f32, level: &Level, tuning: &PlayerTuning) -> u32 {
        let column = self.column as i32;
        if !level.is_clear(self.level + 1, column) {
            self.fall_timer = 0.0;
            return 0;
        }
        self.fall_timer += dt;
        let step = tuning.fall_step.max(f32::EPSILON);
        let mut fallen = 0;
        while self.fall_timer >= step && level.is_clear(self.level + 1, column) {
            self.fall_timer -= step;
            self.level += 1;
            fallen += 1;
        }
        fallen
    }

    pub fn is_falling(&self) -> bool {
        self.fall_timer > 0.0
    }
}
