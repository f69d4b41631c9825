//! Combat system
//!
//! Bevy plumbing around the match loop:
//! - Combat events re-emitted from each simulation tick
//! - The match log, fed from those events

use bevy::prelude::*;

pub mod events;
pub mod log;

use events::*;
use log::{MatchLog, MatchLogEventType};

use crate::states::play_match::{FighterSide, MatchState, MatchSystemPhase};

/// Plugin for the combat system
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Combat events
            .add_event::<AttackLandedEvent>()
            .add_event::<HealthChangedEvent>()
            .add_event::<TimerChangedEvent>()
            .add_event::<MatchEndedEvent>()
            // Resources
            .init_resource::<MatchLog>()
            // Systems
            .add_systems(
                FixedUpdate,
                record_match_log.in_set(MatchSystemPhase::Resolution),
            );
    }
}

/// Append this tick's combat events to the match log.
pub fn record_match_log(
    state: Res<MatchState>,
    mut match_log: ResMut<MatchLog>,
    mut attacks: EventReader<AttackLandedEvent>,
    mut health: EventReader<HealthChangedEvent>,
    mut timer: EventReader<TimerChangedEvent>,
    mut ended: EventReader<MatchEndedEvent>,
) {
    match_log.match_time = state.clock().as_secs_f32();

    for hit in attacks.read() {
        match_log.log_hit(hit.attacker, hit.defender, hit.damage);
        info!(
            "{} hits {} for {}",
            hit.attacker.name(),
            hit.defender.name(),
            hit.damage
        );
    }

    for change in health.read() {
        if change.percent == 0 {
            match_log.log(
                MatchLogEventType::Death,
                format!("{} has been defeated", change.side.name()),
            );
        }
    }

    for tick in timer.read() {
        match_log.log(
            MatchLogEventType::Timer,
            format!("{}s remaining", tick.remaining),
        );
    }

    for end in ended.read() {
        let player = state.fighter(FighterSide::Player).health();
        let enemy = state.fighter(FighterSide::Enemy).health();
        match_log.log(
            MatchLogEventType::MatchEvent,
            format!(
                "{} ({:?}, {} vs {})",
                end.outcome.message(),
                end.reason,
                player,
                enemy
            ),
        );
    }
}
