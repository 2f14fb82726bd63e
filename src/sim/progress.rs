//! Survival bonus bar

use serde::{Deserialize, Serialize};

use crate::lerp;

/// Largest fill shown on the bar before it completes
pub const DISPLAY_MAX_FILL: f32 = 0.92;

/// Fills over a fixed duration, pays out, and starts over
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SurvivalBonus {
    elapsed: f32,
    completed: u32,
}

impl SurvivalBonus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt`. Returns true when the bar filled this step.
    pub fn update(&mut self, dt: f32, fill_duration: f32) -> bool {
        if fill_duration <= 0.0 {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= fill_duration {
            self.elapsed = 0.0;
            self.completed += 1;
            log::info!("Survival bonus #{} earned", self.completed);
            return true;
        }
        false
    }

    /// Raw progress in [0, 1]
    pub fn fraction(&self, fill_duration: f32) -> f32 {
        if fill_duration <= 0.0 {
            return 0.0;
        }
        (self.elapsed / fill_duration).clamp(0.0, 1.0)
    }

    /// Fill amount for the bar graphic
    pub fn display_fill(&self, fill_duration: f32) -> f32 {
        lerp(0.0, DISPLAY_MAX_FILL, self.fraction(fill_duration))
    }

    /// Bonuses paid so far
    pub fn completed(&self) -> u32 {
        self.completed
    }
}
