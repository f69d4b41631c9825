//! Play Match Scene - 2D Fighting Stage
//!
//! Two fighters on a bounded stage trade timed melee attacks until one is
//! knocked out or the 60 second timer runs out.
//!
//! ## Simulation
//! - **Fighters**: gravity, ground contact, stage bounds, attack windows
//! - **Collision**: inclusive AABB test of attack box against body box
//! - **Enemy AI**: walk in, stop at close range, swing at random
//! - **Timer**: one decrement per second of match time
//! - **Match loop**: `MatchState::step`, one fixed tick at a time
//!
//! ## Flow
//! 1. `setup_play_match`: resets the match and spawns camera and sprites
//! 2. Each fixed tick: input, `advance_match`, then HUD and log updates
//! 3. Each frame: keyboard is read, sprites synced, HUD drawn
//! 4. `cleanup_play_match`: despawns everything when leaving the scene

pub mod collision;
pub mod components;
pub mod constants;
pub mod enemy_ai;
pub mod fighter;
pub mod input;
pub mod match_state;
pub mod match_timer;
pub mod rendering;
pub mod systems;

pub use collision::*;
pub use components::*;
pub use enemy_ai::*;
pub use fighter::*;
pub use input::*;
pub use match_state::*;
pub use match_timer::*;
pub use rendering::*;
pub use systems::*;

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use super::GameState;
use crate::combat::log::{MatchLog, MatchLogEventType};
use crate::keybindings::{GameAction, Keybindings};
use crate::ui::colors;

/// Start a fresh match: new fighters, full timer, cleared log and HUD.
pub fn reset_match(
    state: &mut MatchState,
    input: &mut PlayerInput,
    hud: &mut HudState,
    rng: &mut GameRng,
    match_log: &mut MatchLog,
) {
    *state = MatchState::new();
    input.reset();
    *hud = HudState::default();
    rng.reseed();
    match_log.clear();
    match_log.log(MatchLogEventType::MatchEvent, "Match started!".to_string());
}

/// Setup system: spawns the 2D camera, ground and fighter sprites.
pub fn setup_play_match(
    mut commands: Commands,
    mut state: ResMut<MatchState>,
    mut input: ResMut<PlayerInput>,
    mut hud: ResMut<HudState>,
    mut rng: ResMut<GameRng>,
    mut match_log: ResMut<MatchLog>,
) {
    reset_match(&mut state, &mut input, &mut hud, &mut rng, &mut match_log);
    info!("Setting up Play Match scene");

    // Fit the whole stage in the window at any resolution.
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: constants::STAGE_WIDTH,
                min_height: constants::STAGE_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        },
        PlayMatchEntity,
    ));

    let stage = state.stage;
    commands.spawn((
        Sprite::from_color(colors::GROUND, Vec2::new(stage.width, stage.ground_height)),
        Transform::from_translation(
            stage_to_world(
                Vec2::new(0.0, stage.ground_line()),
                Vec2::new(stage.width, stage.ground_height),
            )
            .extend(-1.0),
        ),
        PlayMatchEntity,
    ));

    for side in FighterSide::all() {
        let fighter = state.fighter(side);
        commands.spawn((
            Sprite::from_color(side.color(), fighter.size),
            Transform::from_translation(stage_to_world(fighter.position, fighter.size).extend(0.0)),
            FighterSprite(side),
            PlayMatchEntity,
        ));
    }
}

/// Cleanup system: despawns all Play Match entities when exiting the state.
pub fn cleanup_play_match(
    mut commands: Commands,
    query: Query<Entity, With<PlayMatchEntity>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Restart after the match ends, or leave for the main menu.
pub fn handle_match_controls(
    keybindings: Res<Keybindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut state: ResMut<MatchState>,
    mut input: ResMut<PlayerInput>,
    mut hud: ResMut<HudState>,
    mut rng: ResMut<GameRng>,
    mut match_log: ResMut<MatchLog>,
) {
    if keybindings.action_just_pressed(GameAction::Back, &keyboard) {
        next_state.set(GameState::MainMenu);
        return;
    }

    if !state.is_running() && keybindings.action_just_pressed(GameAction::Restart, &keyboard) {
        info!("Restarting match");
        reset_match(&mut state, &mut input, &mut hud, &mut rng, &mut match_log);
    }
}
