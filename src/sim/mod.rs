//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod boss;
pub mod bullet;
pub mod ceiling;
pub mod challenge;
pub mod gap;
pub mod level;
pub mod player;
pub mod progress;
pub mod rows;
pub mod state;
pub mod tick;

pub use boss::{ActivityArea, Boss, BossPhase, BossSpawner, Bounds, FirePolicy, Hand};
pub use bullet::Bullet;
pub use ceiling::{Ceiling, Debris, Punishment};
pub use challenge::{ChallengeOutcome, ChallengePhase, DigitFeedback, DigitResult, PasswordChallenge};
pub use gap::{GapWalker, next_gap};
pub use level::Level;
pub use player::{DigDirection, DigResult, Player};
pub use progress::SurvivalBonus;
pub use rows::{Cell, CellKind, Row, generate_row};
pub use state::{DeathCause, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
