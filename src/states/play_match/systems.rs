//! Match Systems API
//!
//! Stable entry points for wiring the match loop into a Bevy app. Both
//! graphical and headless modes register the simulation through here.
//!
//! ## System Phases
//!
//! The match runs in `FixedUpdate` (one fixed tick == one match tick) in
//! three ordered phases:
//!
//! 1. **Input** - feed scripted player input (headless runs only)
//! 2. **Simulation** - step `MatchState` and re-emit its events
//! 3. **Resolution** - consume events (HUD, match log, headless bookkeeping)
//!
//! Keyboard input is read every frame in `Update` by `read_player_input`,
//! so the Input phase is empty in windowed mode.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::states::play_match::systems;
//!
//! systems::configure_match_system_ordering(&mut app);
//! systems::add_core_match_systems(&mut app, in_state(GameState::PlayMatch));
//! ```

use bevy::prelude::*;

use super::components::{GameRng, HudState};
use super::input::{Control, PlayerInput};
use super::match_state::MatchState;
use crate::combat::events::{
    CombatEventWriters, HealthChangedEvent, MatchEndedEvent, TimerChangedEvent,
};
use crate::keybindings::{GameAction, Keybindings};

/// System set labels for match system ordering.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchSystemPhase {
    /// Phase 1: scripted player input for the coming tick
    Input,
    /// Phase 2: the match loop itself
    Simulation,
    /// Phase 3: displays and logs reacting to the tick
    Resolution,
}

/// Configures the ordering between match system phases.
///
/// Call this once during app setup before adding match systems.
pub fn configure_match_system_ordering(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            MatchSystemPhase::Input,
            MatchSystemPhase::Simulation,
            MatchSystemPhase::Resolution,
        )
            .chain(),
    );
}

/// Adds the core match systems to the app.
///
/// # Arguments
/// * `app` - The Bevy App to add systems to
/// * `run_condition` - A run condition (e.g., `in_state(GameState::PlayMatch)`)
pub fn add_core_match_systems<M>(app: &mut App, run_condition: impl Condition<M> + Clone)
where
    M: 'static,
{
    app.init_resource::<MatchState>()
        .init_resource::<PlayerInput>()
        .init_resource::<HudState>()
        .init_resource::<GameRng>();

    app.add_systems(
        FixedUpdate,
        advance_match
            .in_set(MatchSystemPhase::Simulation)
            .run_if(run_condition.clone()),
    );

    app.add_systems(
        FixedUpdate,
        update_hud_state
            .in_set(MatchSystemPhase::Resolution)
            .run_if(run_condition),
    );
}

/// Step the match by one fixed tick and publish what happened.
pub fn advance_match(
    time: Res<Time>,
    mut state: ResMut<MatchState>,
    mut input: ResMut<PlayerInput>,
    mut rng: ResMut<GameRng>,
    mut writers: CombatEventWriters,
) {
    let events = state.step(&mut input, time.delta(), &mut *rng);
    for event in events {
        writers.forward(event);
    }
}

/// Mirror published health, timer and result into the HUD state.
pub fn update_hud_state(
    mut hud: ResMut<HudState>,
    mut health: EventReader<HealthChangedEvent>,
    mut timer: EventReader<TimerChangedEvent>,
    mut ended: EventReader<MatchEndedEvent>,
) {
    for change in health.read() {
        hud.set_health_percent(change.side, change.percent);
    }
    for tick in timer.read() {
        hud.timer_remaining = tick.remaining;
    }
    for end in ended.read() {
        hud.result = Some(end.outcome);
    }
}

/// Translate keyboard state into player input. Runs every frame so no key
/// edge is missed between fixed ticks.
pub fn read_player_input(
    keybindings: Res<Keybindings>,
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<MatchState>,
    mut input: ResMut<PlayerInput>,
) {
    if !state.is_running() {
        input.reset();
        return;
    }

    for control in Control::all() {
        let action = GameAction::for_control(control);
        if keybindings.action_just_pressed(action, &keyboard) {
            input.press(control);
        }
        if keybindings.action_just_released(action, &keyboard) {
            input.release(control);
        }
    }
}
