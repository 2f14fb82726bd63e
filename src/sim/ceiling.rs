//! Descending ceiling and falling debris
//!
//! The ceiling creeps down after the player and speeds up over time. A failed
//! password either shoves it closer or, when it is already close, rains
//! debris into random columns.

use rand::Rng;
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::consts::PLAYER_RADIUS;
use crate::move_towards;
use crate::tuning::CeilingTuning;

/// Debris spawns this far above the ceiling line
const DEBRIS_SPAWN_HEIGHT: f32 = 1.5;
/// Half extent of a debris block
const DEBRIS_HALF_SIZE: f32 = 0.4;

/// The crushing ceiling
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ceiling {
    /// World height of the ceiling's lower edge
    pub y: f32,
    /// Current descent speed
    pub speed: f32,
}

/// What a punishment did
#[derive(Debug, Clone, PartialEq)]
pub enum Punishment {
    /// Ceiling moved down to `to`
    Pushed { to: f32 },
    /// Debris dropped in these columns
    Debris { columns: Vec<usize> },
}

impl Ceiling {
    pub fn new(player_y: f32, tuning: &CeilingTuning) -> Self {
        Self {
            y: player_y + tuning.start_gap,
            speed: tuning.speed,
        }
    }

    /// Accelerate toward max speed, then descend
    pub fn update(&mut self, dt: f32, tuning: &CeilingTuning) {
        self.speed = move_towards(self.speed, tuning.max_speed, tuning.acceleration * dt);
        self.y -= self.speed * dt;
    }

    /// Vertical clearance above the player
    pub fn distance(&self, player_y: f32) -> f32 {
        self.y - player_y
    }

    pub fn touches(&self, player_y: f32, tuning: &CeilingTuning) -> bool {
        self.distance(player_y) <= tuning.contact_distance
    }

    /// Apply a failed-challenge punishment
    pub fn punish<R: Rng>(
        &mut self,
        player_y: f32,
        columns: usize,
        tuning: &CeilingTuning,
        rng: &mut R,
    ) -> Punishment {
        if self.distance(player_y) < tuning.punish_threshold {
            let amount = tuning.debris_count.min(columns);
            let mut picked = sample(rng, columns, amount).into_vec();
            picked.sort_unstable();
            log::info!("Ceiling too close, dropping debris in columns {:?}", picked);
            Punishment::Debris { columns: picked }
        } else {
            let to = player_y + tuning.punish_threshold;
            log::info!("Ceiling pushed from {:.2} to {:.2}", self.y, to);
            self.y = to;
            Punishment::Pushed { to }
        }
    }

    /// Height new debris appears at
    pub fn debris_spawn_y(&self) -> f32 {
        self.y + DEBRIS_SPAWN_HEIGHT
    }
}

/// A falling block dropped by a punishment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Debris {
    pub id: u32,
    pub column: usize,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebrisReport {
    pub hit_player: bool,
    pub shattered: usize,
}

/// Drop every debris block by `speed * dt`. Blocks shatter on the player, on
/// an intact cell below `ceiling_y`, or once they fall `view_distance` below
/// the player. Cells the ceiling has already passed do not stop debris.
#[allow(clippy::too_many_arguments)]
pub fn update_debris(
    debris: &mut Vec<Debris>,
    level: &Level,
    ceiling_y: f32,
    player_column: usize,
    player_y: f32,
    dt: f32,
    speed: f32,
    view_distance: f32,
) -> DebrisReport {
    let mut report = DebrisReport::default();
    debris.retain_mut(|block| {
        block.y -= speed * dt;

        if block.column == player_column
            && (block.y - player_y).abs() < DEBRIS_HALF_SIZE + PLAYER_RADIUS
        {
            report.hit_player = true;
            return false;
        }

        // Leading edge entered an intact cell under the ceiling
        let bottom = block.y - DEBRIS_HALF_SIZE;
        let blocked =
            bottom <= ceiling_y && !level.is_clear(level.row_at(bottom), block.column as i32);
        if blocked || block.y < player_y - view_distance {
            report.shattered += 1;
            return false;
        }
        true
    });
    report
}
