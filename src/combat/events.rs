//! Combat events
//!
//! Bevy-side copies of the match loop's events. The match systems re-emit
//! every `MatchEvent` as one of these so displays, the match log and the
//! headless runner can each read them independently.

use bevy::prelude::*;

use crate::states::play_match::{EndReason, FighterSide, MatchEvent, MatchOutcome};

/// Fired when an attack connects with a living defender
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackLandedEvent {
    pub attacker: FighterSide,
    pub defender: FighterSide,
    /// Damage actually taken by the defender
    pub damage: u32,
}

/// Fired after a hit with the defender's health as a percentage of max
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChangedEvent {
    pub side: FighterSide,
    pub percent: u32,
}

/// Fired once per second of match time with the seconds left
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TimerChangedEvent {
    pub remaining: u32,
}

/// Fired exactly once, when the match ends
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MatchEndedEvent {
    pub outcome: MatchOutcome,
    pub reason: EndReason,
}

/// Writers for every combat event, bundled so one system can forward a
/// whole tick's worth of `MatchEvent`s.
#[derive(bevy::ecs::system::SystemParam)]
pub struct CombatEventWriters<'w> {
    pub attacks: EventWriter<'w, AttackLandedEvent>,
    pub health: EventWriter<'w, HealthChangedEvent>,
    pub timer: EventWriter<'w, TimerChangedEvent>,
    pub ended: EventWriter<'w, MatchEndedEvent>,
}

impl CombatEventWriters<'_> {
    pub fn forward(&mut self, event: MatchEvent) {
        match event {
            MatchEvent::AttackLanded {
                attacker,
                defender,
                damage,
            } => {
                self.attacks.send(AttackLandedEvent {
                    attacker,
                    defender,
                    damage,
                });
            }
            MatchEvent::HealthChanged { side, percent } => {
                self.health.send(HealthChangedEvent { side, percent });
            }
            MatchEvent::TimerChanged { remaining } => {
                self.timer.send(TimerChangedEvent { remaining });
            }
            MatchEvent::MatchEnded { outcome, reason } => {
                self.ended.send(MatchEndedEvent { outcome, reason });
            }
        }
    }
}
