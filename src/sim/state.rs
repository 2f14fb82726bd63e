//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::{BossPhase, BossSpawner, Hand};
use super::bullet::Bullet;
use super::ceiling::{Ceiling, Debris};
use super::challenge::{ChallengeOutcome, Code, PasswordChallenge};
use super::level::Level;
use super::player::Player;
use super::progress::SurvivalBonus;
use super::rows::CellKind;
use crate::tuning::Tuning;

/// Distance from the player past which bullets and debris are dropped
pub const VIEW_DISTANCE: f32 = 14.0;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Death animation running
    Dying,
    /// Run ended
    GameOver,
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Ceiling,
    Bullet,
    Debris,
}

/// Things that happened during the last tick, for hosts to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CellDestroyed { row: i32, column: usize },
    DigBlocked { kind: CellKind },
    BossSpawned { pos: Vec2, respawn: bool },
    /// Respawn limit hit; no more bosses this run
    BossRetired,
    BossPhaseChanged(BossPhase),
    BossFired { hand: Hand },
    ChallengeStarted { code: Code },
    DigitEntered { position: usize },
    ChallengeResolved { outcome: ChallengeOutcome, score_delta: i64 },
    ChallengeReset,
    Reward,
    CeilingPushed { to: f32 },
    DebrisDropped { columns: Vec<usize> },
    SurvivalBonus { amount: i64 },
    PlayerDied { cause: DeathCause },
    GameOver { score: i64, survival_secs: f32 },
}

impl GameEvent {
    /// Sound effect key for this event, if any
    pub fn sound_cue(&self) -> Option<&'static str> {
        match self {
            GameEvent::BossSpawned { .. } => Some("BossAppear"),
            GameEvent::BossFired { .. } => Some("BossAttack"),
            GameEvent::PlayerDied {
                cause: DeathCause::Bullet,
            } => Some("BulletHitPlayer"),
            GameEvent::DigitEntered { .. } => Some("PasswordEnter"),
            GameEvent::ChallengeResolved { outcome, .. } => Some(if outcome.is_success() {
                "PasswordCorrect"
            } else {
                "PasswordWrong"
            }),
            GameEvent::GameOver { .. } => Some("GameOver"),
            _ => None,
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance table this run was started with
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Seconds left in the death animation
    pub death_timer: f32,
    pub death_cause: Option<DeathCause>,
    pub score: i64,
    /// Simulation tick counter (only advances while playing)
    pub time_ticks: u64,
    /// Survival time in seconds
    pub elapsed: f32,
    /// Deepest row reached, counting the first row as 1
    pub max_depth: u32,
    pub player: Player,
    pub level: Level,
    pub ceiling: Ceiling,
    pub debris: Vec<Debris>,
    pub boss_spawner: BossSpawner,
    /// Live boss bullets (sorted by id for determinism)
    pub bullets: Vec<Bullet>,
    pub challenge: PasswordChallenge,
    pub survival: SurvivalBonus,
    /// Run RNG; every random draw goes through it
    pub(crate) rng: Pcg32,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut level = Level::new(&tuning.level, &mut rng);
        let player = Player::new(tuning.level.columns / 2);
        level.ensure_rows_below(player.level, tuning.level.lookahead_rows, &mut rng);
        let ceiling = Ceiling::new(player.pos(&level).y, &tuning.ceiling);
        let challenge = PasswordChallenge::new(&tuning.challenge, &mut rng);

        log::info!("New run, seed {}", seed);

        Self {
            seed,
            tuning,
            phase: GamePhase::Playing,
            death_timer: 0.0,
            death_cause: None,
            score: 0,
            time_ticks: 0,
            elapsed: 0.0,
            max_depth: 0,
            player,
            level,
            ceiling,
            debris: Vec::new(),
            boss_spawner: BossSpawner::new(),
            bullets: Vec::new(),
            challenge,
            survival: SurvivalBonus::new(),
            rng,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Player position in world space
    pub fn player_pos(&self) -> Vec2 {
        self.player.pos(&self.level)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.bullets.sort_by_key(|b| b.id);
        self.debris.sort_by_key(|d| d.id);
    }
}
