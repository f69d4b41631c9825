//! Headless match execution
//!
//! Runs a match without any window or rendering, one fixed tick per app
//! update, suitable for automated testing.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::combat::log::{FighterMetadata, MatchLog, MatchLogEventType, MatchMetadata};
use crate::combat::{record_match_log, CombatPlugin};
use crate::states::play_match::constants::FIXED_TICK_HZ;
use crate::states::play_match::systems::{self, MatchSystemPhase};
use crate::states::play_match::{
    Fighter, FighterSide, GameRng, MatchOutcome, MatchState, PlayerInput,
};

use super::config::{HeadlessMatchConfig, ScriptStep};

/// Result of a completed headless match
///
/// This struct provides programmatic access to match results for testing and analysis.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// How the match ended, or None if the safety cap stopped it first
    pub outcome: Option<MatchOutcome>,
    /// Match time in seconds when the run stopped
    pub match_time: f32,
    /// Match ticks simulated
    pub ticks: u64,
    pub player: FighterResult,
    pub enemy: FighterResult,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

/// Statistics for a single fighter after the match
#[derive(Debug, Clone)]
pub struct FighterResult {
    /// "Player 1" or "Enemy"
    pub name: String,
    /// Health remaining at match end (0 if knocked out)
    pub final_health: u32,
    pub survived: bool,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    /// Top-left corner in stage coordinates
    pub final_position: Vec2,
}

impl FighterResult {
    fn from_fighter(fighter: &Fighter) -> Self {
        Self {
            name: fighter.side.name().to_string(),
            final_health: fighter.health(),
            survived: !fighter.is_dead(),
            damage_dealt: fighter.damage_dealt,
            damage_taken: fighter.damage_taken,
            final_position: fighter.position,
        }
    }

    fn metadata(&self) -> FighterMetadata {
        FighterMetadata {
            name: self.name.clone(),
            final_health: self.final_health,
            damage_dealt: self.damage_dealt,
            damage_taken: self.damage_taken,
            final_position: (self.final_position.x, self.final_position.y),
        }
    }
}

impl MatchResult {
    pub fn fighter(&self, side: FighterSide) -> &FighterResult {
        match side {
            FighterSide::Player => &self.player,
            FighterSide::Enemy => &self.enemy,
        }
    }
}

/// Resource to track headless match state
#[derive(Resource)]
pub struct HeadlessMatchState {
    /// Ticks after which the run is abandoned
    pub max_ticks: u64,
    /// Custom output path for match log
    pub output_path: Option<String>,
    /// Random seed for deterministic simulation (if provided)
    pub random_seed: Option<u64>,
    /// Scripted player inputs, sorted by tick
    pub script: Vec<ScriptStep>,
    /// Index of the next script step to apply
    pub next_step: usize,
    /// Whether the match has completed
    pub match_complete: bool,
    /// Match result (populated when match completes)
    pub result: Option<MatchResult>,
}

impl HeadlessMatchState {
    pub fn new(config: &HeadlessMatchConfig) -> Self {
        let mut script = config.player_script.clone();
        script.sort_by_key(|step| step.tick);
        Self {
            max_ticks: (config.max_duration_secs as f64 * FIXED_TICK_HZ).ceil() as u64,
            output_path: config.output_path.clone(),
            random_seed: config.random_seed,
            script,
            next_step: 0,
            match_complete: false,
            result: None,
        }
    }
}

/// Plugin for headless match execution
pub struct HeadlessPlugin {
    pub config: HeadlessMatchConfig,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        let game_rng = match self.config.random_seed {
            Some(seed) => {
                info!("Using deterministic RNG with seed: {}", seed);
                GameRng::from_seed(seed)
            }
            None => {
                info!("Using non-deterministic RNG (no seed provided)");
                GameRng::from_entropy()
            }
        };

        app.insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
                1.0 / FIXED_TICK_HZ,
            )))
            .insert_resource(game_rng)
            .insert_resource(HeadlessMatchState::new(&self.config))
            .add_plugins(CombatPlugin);

        systems::configure_match_system_ordering(app);
        systems::add_core_match_systems(app, || true);

        app.add_systems(Startup, headless_setup_match)
            .add_systems(
                FixedUpdate,
                apply_player_script.in_set(MatchSystemPhase::Input),
            )
            .add_systems(
                FixedUpdate,
                headless_check_match_end
                    .in_set(MatchSystemPhase::Resolution)
                    .after(record_match_log),
            );
    }
}

fn headless_setup_match(mut match_log: ResMut<MatchLog>) {
    match_log.clear();
    match_log.log(
        MatchLogEventType::MatchEvent,
        "Match started (headless mode)!".to_string(),
    );
}

/// Feed every script step that is due before the coming tick.
fn apply_player_script(
    state: Res<MatchState>,
    mut headless_state: ResMut<HeadlessMatchState>,
    mut input: ResMut<PlayerInput>,
) {
    let HeadlessMatchState {
        script, next_step, ..
    } = &mut *headless_state;

    while let Some(step) = script.get(*next_step) {
        if step.tick > state.ticks() {
            break;
        }
        if let Err(e) = step.apply(&mut input) {
            warn!("Skipping script step at tick {}: {}", step.tick, e);
        }
        *next_step += 1;
    }
}

/// Stop once the match has ended or the safety cap is reached.
fn headless_check_match_end(
    state: Res<MatchState>,
    match_log: Res<MatchLog>,
    mut headless_state: ResMut<HeadlessMatchState>,
) {
    if headless_state.match_complete {
        return;
    }

    let timed_out = state.ticks() >= headless_state.max_ticks;
    if state.is_running() && !timed_out {
        return;
    }

    if state.is_running() {
        warn!(
            "Safety cap reached after {} ticks - abandoning match",
            state.ticks()
        );
    }

    let result = MatchResult {
        outcome: state.outcome(),
        match_time: state.clock().as_secs_f32(),
        ticks: state.ticks(),
        player: FighterResult::from_fighter(&state.player),
        enemy: FighterResult::from_fighter(&state.enemy),
        random_seed: headless_state.random_seed,
    };

    save_headless_match_log(&match_log, &result, headless_state.output_path.as_deref());
    headless_state.result = Some(result);
    headless_state.match_complete = true;
}

/// Save the match log to a file
fn save_headless_match_log(match_log: &MatchLog, result: &MatchResult, output_path: Option<&str>) {
    let metadata = MatchMetadata {
        result: result
            .outcome
            .map(|outcome| outcome.message().to_string())
            .unwrap_or_else(|| "Unfinished".to_string()),
        match_time: result.match_time,
        random_seed: result.random_seed,
        player: result.player.metadata(),
        enemy: result.enemy.metadata(),
    };

    match match_log.save_to_file(&metadata, output_path) {
        Ok(filename) => {
            println!("Match complete. Log saved to: {}", filename);
        }
        Err(e) => {
            eprintln!("Failed to save match log: {}", e);
        }
    }
}

/// Run a headless match with the given configuration
pub fn run_headless_match(
    config: HeadlessMatchConfig,
    verbose: bool,
) -> Result<MatchResult, String> {
    config.validate()?;

    println!("Starting headless match simulation...");
    println!("  Seed: {:?}", config.random_seed);
    println!("  Script steps: {}", config.player_script.len());
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let mut app = App::new();
    // Minimal plugins - no window, no rendering
    app.add_plugins(MinimalPlugins);
    if verbose {
        app.add_plugins(LogPlugin::default());
    }
    app.add_plugins(HeadlessPlugin { config });
    app.finish();
    app.cleanup();

    // A few spare updates for the zero-length first frame.
    let update_limit = app
        .world()
        .resource::<HeadlessMatchState>()
        .max_ticks
        .saturating_add(8);
    for _ in 0..update_limit {
        app.update();
        if app.world().resource::<HeadlessMatchState>().match_complete {
            break;
        }
    }

    app.world_mut()
        .resource_mut::<HeadlessMatchState>()
        .result
        .take()
        .ok_or_else(|| "Headless match stopped without a result".to_string())
}
