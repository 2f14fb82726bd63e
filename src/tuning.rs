//! Data-driven game balance
//!
//! Every number the simulation uses to pace a run lives here so a host can
//! ship presets or load overrides from JSON.

use serde::{Deserialize, Serialize};

use crate::sim::boss::{Bounds, FirePolicy};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Balance values for this preset
    pub fn tuning(&self) -> Tuning {
        let mut tuning = Tuning::default();
        match self {
            Difficulty::Easy => {
                tuning.level.unbreakable_chance = 0.12;
                tuning.ceiling.max_speed = 0.8;
                tuning.challenge.code_time_limit = 7.0;
                tuning.boss.attack_interval = 1.4;
            }
            Difficulty::Normal => {}
            Difficulty::Hard => {
                tuning.level.unbreakable_chance = 0.2;
                tuning.ceiling.max_speed = 1.6;
                tuning.challenge.code_time_limit = 4.0;
                tuning.boss.attack_interval = 0.7;
                tuning.boss.fire_policy = FirePolicy::Simultaneous;
            }
        }
        tuning
    }
}

/// Row generation and level streaming
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Playfield width in cells
    pub columns: usize,
    /// Chance that a non-gap cell is unbreakable
    pub unbreakable_chance: f32,
    /// Rows generated when the run starts
    pub initial_rows: u32,
    /// Minimum rows kept generated below the player
    pub lookahead_rows: u32,
    /// Rows further than this above the ceiling are dropped
    pub cull_margin: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            columns: 8,
            unbreakable_chance: 0.175,
            initial_rows: 6,
            lookahead_rows: 8,
            cull_margin: 6.0,
        }
    }
}

/// Player movement pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Seconds between steps while a direction is held
    pub move_interval: f32,
    /// Seconds per level while falling through cleared cells
    pub fall_step: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_interval: 0.12,
            fall_step: 0.08,
        }
    }
}

/// Score deltas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    /// Awarded for each destroyed breakable cell
    pub dig: i64,
    /// Awarded for a correct password
    pub challenge_reward: i64,
    /// Deducted for a wrong or expired password
    pub challenge_penalty: i64,
    /// Awarded each time the survival bar fills
    pub survival_bonus: i64,
    /// Seconds for the survival bar to fill
    pub survival_fill_duration: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            dig: 10,
            challenge_reward: 100,
            challenge_penalty: 50,
            survival_bonus: 100,
            survival_fill_duration: 30.0,
        }
    }
}

/// Descending ceiling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CeilingTuning {
    /// Initial distance above the player
    pub start_gap: f32,
    /// Initial descent speed (units/s)
    pub speed: f32,
    /// Speed the descent approaches over time
    pub max_speed: f32,
    /// Speed change per second
    pub acceleration: f32,
    /// Player dies when the ceiling is this close
    pub contact_distance: f32,
    /// Punishment pushes the ceiling to this distance above the player
    pub punish_threshold: f32,
    /// Debris pieces dropped when the ceiling is already close
    pub debris_count: usize,
    /// Debris fall speed (units/s)
    pub debris_speed: f32,
}

impl Default for CeilingTuning {
    fn default() -> Self {
        Self {
            start_gap: 8.0,
            speed: 0.3,
            max_speed: 1.2,
            acceleration: 0.01,
            contact_distance: 0.5,
            punish_threshold: 4.0,
            debris_count: 3,
            debris_speed: 4.0,
        }
    }
}

/// Per-hand projectile settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandTuning {
    /// Bullet speed (units/s)
    pub bullet_speed: f32,
    /// Fire straight down instead of toward the player
    pub vertical: bool,
    /// Fire point relative to the boss center
    pub offset: (f32, f32),
}

/// Boss behaviour and spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub move_speed: f32,
    /// Exponential smoothing factor for following the player's height
    pub follow_smoothness: f32,
    /// Dwell time at each edge
    pub edge_wait: f32,
    pub entry_duration: f32,
    /// Seconds between shots while moving or waiting
    pub attack_interval: f32,
    pub fire_policy: FirePolicy,
    pub left_hand: HandTuning,
    pub right_hand: HandTuning,
    /// Max random deviation (degrees) of aimed shots
    pub diagonal_angle_offset: f32,
    pub bullet_lifetime: f32,
    /// Spawn height above the player
    pub y_offset: f32,
    /// Spawn X relative to the player
    pub spawn_x: f32,
    /// Activity area offsets from the player at spawn; `None` leaves the boss unbounded
    pub area: Option<Bounds>,
    /// Recompute the area from the player's position every tick
    pub area_relative: bool,
    /// Respawns allowed per run; `None` respawns forever
    pub respawn_limit: Option<u32>,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            follow_smoothness: 2.0,
            edge_wait: 3.0,
            entry_duration: 2.5,
            attack_interval: 1.0,
            fire_policy: FirePolicy::Alternating,
            left_hand: HandTuning {
                bullet_speed: 4.0,
                vertical: true,
                offset: (-1.5, -0.5),
            },
            right_hand: HandTuning {
                bullet_speed: 4.0,
                vertical: false,
                offset: (1.5, -0.5),
            },
            diagonal_angle_offset: 15.0,
            bullet_lifetime: 10.0,
            y_offset: 8.0,
            spawn_x: 0.0,
            area: Some(Bounds {
                left: -8.0,
                right: 8.0,
                top: 15.0,
                bottom: 5.0,
            }),
            area_relative: true,
            respawn_limit: Some(5),
        }
    }
}

/// Password challenge pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeTuning {
    /// Shortest idle wait before a new code
    pub min_delay: f32,
    /// Longest idle wait before a new code
    pub max_delay: f32,
    /// Seconds to enter the full code
    pub code_time_limit: f32,
    /// Seconds the result stays on screen before returning to idle
    pub result_display: f32,
}

impl Default for ChallengeTuning {
    fn default() -> Self {
        Self {
            min_delay: 5.0,
            max_delay: 10.0,
            code_time_limit: 5.0,
            // Four 0.4s blinks, then the verdict for 2s
            result_display: 4.0 * 0.4 + 2.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub level: LevelTuning,
    pub player: PlayerTuning,
    pub score: ScoreTuning,
    pub ceiling: CeilingTuning,
    pub boss: BossTuning,
    pub challenge: ChallengeTuning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("Normal"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
        // Only the full preset names are accepted
        assert_eq!(Difficulty::from_str("norm"), None);
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_presets_scale_pressure() {
        let easy = Difficulty::Easy.tuning();
        let hard = Difficulty::Hard.tuning();
        assert!(easy.level.unbreakable_chance < hard.level.unbreakable_chance);
        assert!(easy.challenge.code_time_limit > hard.challenge.code_time_limit);
        assert!(easy.boss.attack_interval > hard.boss.attack_interval);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{"level":{"columns":5},"boss":{"area":null}}"#).unwrap();
        assert_eq!(tuning.level.columns, 5);
        assert_eq!(tuning.level.initial_rows, 6);
        assert!(tuning.boss.area.is_none());
        assert_eq!(tuning.challenge.code_time_limit, 5.0);
    }
}
