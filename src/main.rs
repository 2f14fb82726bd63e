//! Glitch Dive headless runner
//!
//! Plays an autopilot session through the fixed-timestep loop, prints a run
//! summary, and records qualifying scores.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use clap::Parser;

use glitch_dive::consts::{MAX_SUBSTEPS, SIM_DT};
use glitch_dive::sim::{GameEvent, GameState, TickInput, tick};
use glitch_dive::{Difficulty, HighScores, Settings, format_clock, format_score};

/// Host frame length the runner pretends to render at
const FRAME_DT: f32 = 1.0 / 30.0;

/// Run an autopilot session of Glitch Dive and print the result.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Run seed; overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Seconds of play to simulate before stopping
    #[arg(long, value_name = "SECONDS", default_value_t = 120.0)]
    seconds: f32,
    /// Difficulty preset (easy, normal, hard); replaces the stored tuning
    #[arg(long, value_name = "PRESET")]
    difficulty: Option<String>,
    /// Settings file, created with defaults when missing
    #[arg(long, value_name = "PATH", default_value = "glitch-dive-settings.json")]
    settings: PathBuf,
    /// High score table
    #[arg(long, value_name = "PATH", default_value = "glitch-dive-scores.json")]
    scores: PathBuf,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let mut settings = Settings::load(&args.settings);
    if !args.settings.exists() {
        settings.save(&args.settings)?;
    }
    if let Some(name) = &args.difficulty {
        let Some(preset) = Difficulty::from_str(name) else {
            bail!("unknown difficulty '{name}'");
        };
        settings.apply_preset(preset);
    }

    let seed = args.seed.or(settings.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!(
        "Glitch Dive starting: seed {}, difficulty {}",
        seed,
        settings.difficulty.as_str()
    );

    let mut state = GameState::new(seed, settings.tuning.clone());
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut cues: BTreeMap<&'static str, u32> = BTreeMap::new();
    let mut accumulator = 0.0;
    let mut wall_time = 0.0;
    while wall_time < args.seconds && !state.is_over() {
        wall_time += FRAME_DT;
        accumulator += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            for event in &state.events {
                if let Some(cue) = event.sound_cue() {
                    *cues.entry(cue).or_default() += 1;
                }
                if let GameEvent::ChallengeResolved { outcome, .. } = event {
                    log::debug!("Challenge: {}", outcome.label());
                }
            }
        }
    }

    println!("seed      {}", seed);
    println!("score     {}", format_score(state.score));
    println!("survived  {}", format_clock(state.elapsed));
    println!("depth     {}", state.max_depth);
    match state.death_cause {
        Some(cause) => println!("died by   {:?}", cause),
        None => println!("alive at the time limit"),
    }
    for (cue, count) in &cues {
        println!("  {cue:<16} x{count}");
    }

    let mut scores = HighScores::load(&args.scores);
    if let Some(rank) = scores.add_score(state.score, state.elapsed, state.max_depth, now_secs()) {
        println!("new high score, rank #{rank}");
        scores.save(&args.scores)?;
    }

    Ok(())
}
