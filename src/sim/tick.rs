//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::boss::SpawnerEvent;
use super::bullet::{Bullet, update_bullets};
use super::ceiling::{Debris, Punishment, update_debris};
use super::challenge::{ChallengeEvent, ChallengeOutcome, DigitFeedback, DigitResult};
use super::player::{DigDirection, DigResult};
use super::state::{DeathCause, GameEvent, GamePhase, GameState, VIEW_DISTANCE};
use crate::consts::DEATH_DURATION;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left_held: bool,
    pub right_held: bool,
    /// Left went down this tick
    pub left_pressed: bool,
    /// Right went down this tick
    pub right_pressed: bool,
    pub dig: Option<DigDirection>,
    /// Password digit typed this tick
    pub digit: Option<u8>,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Dying => {
            state.death_timer -= dt;
            if state.death_timer <= 0.0 {
                state.phase = GamePhase::GameOver;
                log::info!(
                    "Game over: score {}, survived {}",
                    state.score,
                    crate::format_clock(state.elapsed)
                );
                state.events.push(GameEvent::GameOver {
                    score: state.score,
                    survival_secs: state.elapsed,
                });
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    update_player(state, &input, dt);
    let lookahead = state.tuning.level.lookahead_rows;
    state
        .level
        .ensure_rows_below(state.player.level, lookahead, &mut state.rng);

    state.ceiling.update(dt, &state.tuning.ceiling);
    state
        .level
        .cull_above(state.ceiling.y, state.tuning.level.cull_margin);

    update_hazards(state, dt);
    update_challenge(state, input.digit, dt);

    if state.phase == GamePhase::Playing
        && state
            .survival
            .update(dt, state.tuning.score.survival_fill_duration)
    {
        let amount = state.tuning.score.survival_bonus;
        state.score += amount;
        state.events.push(GameEvent::SurvivalBonus { amount });
        state.events.push(GameEvent::Reward);
    }

    if state
        .ceiling
        .touches(state.player_pos().y, &state.tuning.ceiling)
    {
        kill(state, DeathCause::Ceiling);
    }

    state.normalize_order();
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let direction = state.player.horizontal_intent(
        input.left_held,
        input.right_held,
        input.left_pressed,
        input.right_pressed,
    );
    state
        .player
        .step_horizontal(direction, dt, &state.level, &state.tuning.player);

    if let Some(dig) = input.dig {
        match state.player.dig(dig, &mut state.level) {
            DigResult::Destroyed { row, column } => {
                state.score += state.tuning.score.dig;
                log::debug!("Dug cell ({}, {})", row, column);
                state.events.push(GameEvent::CellDestroyed { row, column });
            }
            DigResult::Blocked(kind) => {
                state.events.push(GameEvent::DigBlocked { kind });
            }
            DigResult::Nothing => {}
        }
    }

    if state.player.fall(dt, &state.level, &state.tuning.player) > 0 {
        let depth = (state.player.level + 1).max(0) as u32;
        state.max_depth = state.max_depth.max(depth);
    }
}

/// Boss, bullets, and debris
fn update_hazards(state: &mut GameState, dt: f32) {
    let player_pos = state.player_pos();

    let report = update_debris(
        &mut state.debris,
        &state.level,
        state.ceiling.y,
        state.player.column,
        player_pos.y,
        dt,
        state.tuning.ceiling.debris_speed,
        VIEW_DISTANCE,
    );
    if report.hit_player {
        kill(state, DeathCause::Debris);
        return;
    }

    let mut spawner_events = Vec::new();
    let update = state.boss_spawner.update(
        player_pos,
        dt,
        &state.tuning.boss,
        &mut state.rng,
        &mut spawner_events,
    );
    for event in spawner_events {
        state.events.push(match event {
            SpawnerEvent::Spawned { pos, respawn } => GameEvent::BossSpawned { pos, respawn },
            SpawnerEvent::Retired => GameEvent::BossRetired,
        });
    }
    if let Some(phase) = update.phase_change {
        state.events.push(GameEvent::BossPhaseChanged(phase));
    }
    for shot in &update.shots {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::from_shot(id, shot));
        state.events.push(GameEvent::BossFired { hand: shot.hand });
    }

    let report = update_bullets(
        &mut state.bullets,
        player_pos,
        dt,
        state.tuning.boss.bullet_lifetime,
        VIEW_DISTANCE,
    );
    if report.hit_player {
        kill(state, DeathCause::Bullet);
    }
}

fn update_challenge(state: &mut GameState, digit: Option<u8>, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if let Some(digit) = digit {
        match state.challenge.press_digit(digit, &state.tuning.challenge) {
            DigitResult::Rejected => log::debug!("Digit {} ignored", digit),
            DigitResult::Accepted { position } => {
                state.events.push(GameEvent::DigitEntered { position });
            }
            DigitResult::Resolved(outcome) => {
                let position = state
                    .challenge
                    .feedback()
                    .iter()
                    .rposition(|f| *f != DigitFeedback::Pending)
                    .unwrap_or(0);
                state.events.push(GameEvent::DigitEntered { position });
                resolve_challenge(state, outcome);
            }
        }
    }

    match state
        .challenge
        .update(dt, &state.tuning.challenge, &mut state.rng)
    {
        Some(ChallengeEvent::Started { code }) => {
            state.events.push(GameEvent::ChallengeStarted { code });
        }
        Some(ChallengeEvent::Resolved { outcome }) => resolve_challenge(state, outcome),
        Some(ChallengeEvent::Reset) => state.events.push(GameEvent::ChallengeReset),
        None => {}
    }
}

/// Apply the score change and the reward or punishment for a verdict
fn resolve_challenge(state: &mut GameState, outcome: ChallengeOutcome) {
    let score_delta = outcome.score_delta(&state.tuning.score);
    state.score += score_delta;
    state.events.push(GameEvent::ChallengeResolved {
        outcome,
        score_delta,
    });

    if outcome.is_success() {
        state.events.push(GameEvent::Reward);
        return;
    }

    let player_y = state.player_pos().y;
    let columns = state.level.columns();
    match state
        .ceiling
        .punish(player_y, columns, &state.tuning.ceiling, &mut state.rng)
    {
        Punishment::Pushed { to } => state.events.push(GameEvent::CeilingPushed { to }),
        Punishment::Debris { columns } => {
            let y = state.ceiling.debris_spawn_y();
            for &column in &columns {
                let id = state.next_entity_id();
                state.debris.push(Debris { id, column, y });
            }
            state.events.push(GameEvent::DebrisDropped { columns });
        }
    }
}

fn kill(state: &mut GameState, cause: DeathCause) {
    if state.phase != GamePhase::Playing {
        return;
    }
    log::info!("Player died: {:?}", cause);
    state.phase = GamePhase::Dying;
    state.death_timer = DEATH_DURATION;
    state.death_cause = Some(cause);
    state.boss_spawner.on_player_death();
    state.events.push(GameEvent::PlayerDied { cause });
}

/// Demo AI: answers codes and digs along the gap path
fn autopilot(state: &GameState, input: &mut TickInput) {
    if input.digit.is_none() {
        if let (Some(code), Some(cursor)) = (state.challenge.code(), state.challenge.cursor()) {
            input.digit = Some(code[cursor]);
        }
    }

    let player = &state.player;
    if player.is_falling() {
        return;
    }
    let column = player.column as i32;
    let below = player.level + 1;
    if state.level.is_clear(below, column) {
        return;
    }

    // Nearest gap column of the row below
    let target = state
        .level
        .row(below)
        .and_then(|row| {
            row.gap_columns()
                .min_by_key(|c| (*c as i32 - column).abs())
        })
        .map(|c| c as i32)
        .unwrap_or(column);

    if target == column {
        input.dig = Some(DigDirection::Down);
        return;
    }

    let (dig, step) = if target < column {
        (DigDirection::Left, -1)
    } else {
        (DigDirection::Right, 1)
    };
    if state.level.is_clear(player.level, column + step) {
        input.left_held = step < 0;
        input.right_held = step > 0;
    } else {
        input.dig = Some(dig);
    }
}
