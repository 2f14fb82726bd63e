//! Glitch Dive - A descending arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rows, boss, password challenge, run state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted player preferences
//! - `highscores`: Local leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{Difficulty, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World size of one grid cell
    pub const CELL_SIZE: f32 = 1.0;
    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 0.4;
    /// Boss bullet collision radius
    pub const BULLET_RADIUS: f32 = 0.2;

    /// Boss proximity tolerance when checking for a reached boundary
    pub const BOSS_EDGE_EPSILON: f32 = 0.1;

    /// Number of digits in a password challenge
    pub const CODE_LENGTH: usize = 3;

    /// Death animation length before the run is over
    pub const DEATH_DURATION: f32 = 1.5;
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Format elapsed seconds as `MM:SS`
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a score as five zero-padded digits (negative scores keep their sign)
pub fn format_score(score: i64) -> String {
    if score < 0 {
        format!("-{:05}", score.unsigned_abs())
    } else {
        format!("{:05}", score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 2.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, -1.0), 0.0);
    }

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(1.0, 2.0, 0.25), 1.25);
        assert_eq!(move_towards(1.0, 2.0, 5.0), 2.0);
        assert_eq!(move_towards(2.0, 1.0, 0.5), 1.5);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(75.9), "01:15");
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(42), "00042");
        assert_eq!(format_score(-50), "-00050");
    }
}
