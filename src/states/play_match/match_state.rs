//! Match state and the per-tick match loop
//!
//! `MatchState` owns both fighters, the timer and the match status. One call
//! to [`MatchState::step`] is one simulation tick:
//!
//! 1. advance both fighters' physics
//! 2. derive the player's velocity and actions from held input
//! 3. run the enemy AI
//! 4. resolve the player's attack against the enemy
//! 5. resolve the enemy's attack against the player
//! 6. advance the timer and end the match on timeout or a knockout
//!
//! The tick's observable results come back as [`MatchEvent`]s for the HUD,
//! match log and any other display.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;

use super::collision;
use super::constants::*;
use super::enemy_ai::{self, EnemyDecision};
use super::fighter::{Facing, Fighter, FighterSide, Stage};
use super::input::{Horizontal, PlayerInput};
use super::match_timer::MatchTimer;

/// Match status. Moves one way, from `Running` to `Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStatus {
    #[default]
    Running,
    Ended,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Tie,
    PlayerWins,
    EnemyWins,
}

impl MatchOutcome {
    /// Compare remaining health. Equal health, including both at zero, ties.
    pub fn from_health(player_health: u32, enemy_health: u32) -> Self {
        if player_health == enemy_health {
            MatchOutcome::Tie
        } else if player_health > enemy_health {
            MatchOutcome::PlayerWins
        } else {
            MatchOutcome::EnemyWins
        }
    }

    /// Banner text shown when the match ends.
    pub fn message(&self) -> &'static str {
        match self {
            MatchOutcome::Tie => "Tie",
            MatchOutcome::PlayerWins => "Player 1 Wins",
            MatchOutcome::EnemyWins => "Enemy Wins",
        }
    }

    /// The winning side, or `None` for a tie.
    pub fn winner(&self) -> Option<FighterSide> {
        match self {
            MatchOutcome::Tie => None,
            MatchOutcome::PlayerWins => Some(FighterSide::Player),
            MatchOutcome::EnemyWins => Some(FighterSide::Enemy),
        }
    }
}

/// Why the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimeUp,
    Knockout,
}

/// Something a display or log needs to know about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    /// An attack connected with a living defender.
    AttackLanded {
        attacker: FighterSide,
        defender: FighterSide,
        damage: u32,
    },
    /// A fighter's health changed; `percent` is of max health (0-100).
    HealthChanged { side: FighterSide, percent: u32 },
    /// The timer ticked down to `remaining` seconds.
    TimerChanged { remaining: u32 },
    /// The match is over. Emitted exactly once.
    MatchEnded {
        outcome: MatchOutcome,
        reason: EndReason,
    },
}

/// Events produced by one tick. Most ticks produce none.
pub type MatchEvents = SmallVec<[MatchEvent; 4]>;

#[derive(Resource, Debug, Clone)]
pub struct MatchState {
    pub stage: Stage,
    pub player: Fighter,
    pub enemy: Fighter,
    pub timer: MatchTimer,
    status: MatchStatus,
    outcome: Option<MatchOutcome>,
    /// Match time elapsed, advanced by each tick's `dt`.
    clock: Duration,
    ticks: u64,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// A fresh match with both fighters at their starting spots.
    pub fn new() -> Self {
        Self {
            stage: Stage::default(),
            player: Fighter::player(),
            enemy: Fighter::enemy(),
            timer: MatchTimer::default(),
            status: MatchStatus::Running,
            outcome: None,
            clock: Duration::ZERO,
            ticks: 0,
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == MatchStatus::Running
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Ticks stepped so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn fighter(&self, side: FighterSide) -> &Fighter {
        match side {
            FighterSide::Player => &self.player,
            FighterSide::Enemy => &self.enemy,
        }
    }

    /// Split into (attacker, defender) for `attacker_side`.
    fn pair_mut(&mut self, attacker_side: FighterSide) -> (&mut Fighter, &mut Fighter) {
        match attacker_side {
            FighterSide::Player => (&mut self.player, &mut self.enemy),
            FighterSide::Enemy => (&mut self.enemy, &mut self.player),
        }
    }

    /// Advance the match by one tick of `dt` match time.
    ///
    /// Once the match has ended, fighters keep settling under gravity but
    /// input, AI, hits and the timer are ignored.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        input: &mut PlayerInput,
        dt: Duration,
        rng: &mut R,
    ) -> MatchEvents {
        let mut events = MatchEvents::new();
        self.clock += dt;
        self.ticks += 1;

        self.player.tick(&self.stage, self.clock);
        self.enemy.tick(&self.stage, self.clock);

        if !self.is_running() {
            input.clear_requests();
            return events;
        }

        self.apply_player_input(input);

        let running = self.is_running();
        if let EnemyDecision::Engage { attacked: true } =
            enemy_ai::drive_enemy(&mut self.enemy, &self.player, running, self.clock, rng)
        {
            debug!("Enemy swings at {:.2}s", self.clock.as_secs_f32());
        }

        self.resolve_attack(FighterSide::Player, &mut events);
        self.resolve_attack(FighterSide::Enemy, &mut events);

        let advance = self.timer.advance(dt);
        for remaining in advance.published {
            events.push(MatchEvent::TimerChanged { remaining });
        }

        if advance.expired {
            self.end_match(EndReason::TimeUp, &mut events);
        } else if self.player.health() == 0 || self.enemy.health() == 0 {
            self.end_match(EndReason::Knockout, &mut events);
        }

        events
    }

    /// Reset the player's horizontal velocity and rebuild it from input.
    fn apply_player_input(&mut self, input: &mut PlayerInput) {
        let player = &mut self.player;
        player.velocity.x = 0.0;

        if player.is_dead() {
            input.clear_requests();
            return;
        }

        match input.horizontal() {
            Some(Horizontal::Left) => {
                player.velocity.x = -PLAYER_MOVE_SPEED;
                player.facing = Facing::Left;
            }
            Some(Horizontal::Right) => {
                player.velocity.x = PLAYER_MOVE_SPEED;
                player.facing = Facing::Right;
            }
            None => {}
        }

        if input.take_jump() {
            player.try_jump();
        }
        if input.take_attack() {
            player.initiate_attack(self.clock);
        }
    }

    /// Check `attacker_side`'s active attack against the other fighter.
    fn resolve_attack(&mut self, attacker_side: FighterSide, events: &mut MatchEvents) {
        let running = self.is_running();
        let (attacker, defender) = self.pair_mut(attacker_side);

        if !running || !attacker.is_attacking() || !collision::overlaps(attacker, defender) {
            return;
        }

        attacker.end_attack();
        if defender.is_dead() {
            return;
        }

        let damage = defender.apply_damage(ATTACK_DAMAGE);
        attacker.damage_dealt += damage;

        events.push(MatchEvent::AttackLanded {
            attacker: attacker.side,
            defender: defender.side,
            damage,
        });
        events.push(MatchEvent::HealthChanged {
            side: defender.side,
            percent: defender.health_percent(),
        });
    }

    /// Run terminal evaluation. Does nothing if the match already ended.
    fn end_match(&mut self, reason: EndReason, events: &mut MatchEvents) {
        if !self.is_running() {
            return;
        }
        let outcome = MatchOutcome::from_health(self.player.health(), self.enemy.health());
        self.status = MatchStatus::Ended;
        self.outcome = Some(outcome);
        self.player.velocity.x = 0.0;
        self.enemy.velocity.x = 0.0;

        info!(
            "Match ended ({:?}) at {:.2}s: {}",
            reason,
            self.clock.as_secs_f32(),
            outcome.message()
        );
        events.push(MatchEvent::MatchEnded { outcome, reason });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::play_match::input::Control;
    use rand::rngs::mock::StepRng;

    const TICK: Duration = Duration::from_millis(16);

    /// Every draw is just below 1.0, so the enemy never swings on its own.
    fn never_attacks() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn ground_y(state: &MatchState) -> f32 {
        state.stage.ground_line() - FIGHTER_HEIGHT
    }

    /// Both fighters grounded and facing each other, `gap` apart.
    fn face_off(gap: f32) -> MatchState {
        let mut state = MatchState::new();
        let y = ground_y(&state);
        state.player.position = Vec2::new(300.0, y);
        state.player.facing = Facing::Right;
        state.enemy.position = Vec2::new(300.0 + FIGHTER_WIDTH + gap, y);
        state.enemy.facing = Facing::Left;
        state
    }

    #[test]
    fn test_outcome_from_health() {
        assert_eq!(MatchOutcome::from_health(100, 100), MatchOutcome::Tie);
        assert_eq!(MatchOutcome::from_health(100, 0), MatchOutcome::PlayerWins);
        assert_eq!(MatchOutcome::from_health(0, 100), MatchOutcome::EnemyWins);
        assert_eq!(MatchOutcome::from_health(50, 50), MatchOutcome::Tie);
        assert_eq!(MatchOutcome::from_health(0, 0), MatchOutcome::Tie);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(MatchOutcome::Tie.message(), "Tie");
        assert_eq!(MatchOutcome::PlayerWins.message(), "Player 1 Wins");
        assert_eq!(MatchOutcome::EnemyWins.message(), "Enemy Wins");
    }

    #[test]
    fn test_outcome_winner() {
        assert_eq!(MatchOutcome::Tie.winner(), None);
        assert_eq!(MatchOutcome::PlayerWins.winner(), Some(FighterSide::Player));
        assert_eq!(MatchOutcome::EnemyWins.winner(), Some(FighterSide::Enemy));
    }

    #[test]
    fn test_player_attack_damages_enemy_once() {
        let mut state = face_off(10.0);
        let mut input = PlayerInput::default();
        let mut rng = never_attacks();

        input.press(Control::Attack);
        let events = state.step(&mut input, TICK, &mut rng);
        assert_eq!(state.enemy.health(), MAX_HEALTH - ATTACK_DAMAGE);
        assert!(!state.player.is_attacking());
        assert!(events.contains(&MatchEvent::AttackLanded {
            attacker: FighterSide::Player,
            defender: FighterSide::Enemy,
            damage: ATTACK_DAMAGE,
        }));
        assert!(events.contains(&MatchEvent::HealthChanged {
            side: FighterSide::Enemy,
            percent: 90,
        }));
        assert_eq!(state.player.damage_dealt, ATTACK_DAMAGE);

        state.step(&mut input, TICK, &mut rng);
        assert_eq!(state.enemy.health(), MAX_HEALTH - ATTACK_DAMAGE);
    }

    #[test]
    fn test_player_moves_with_held_keys() {
        let mut state = face_off(500.0);
        let mut input = PlayerInput::default();
        let mut rng = never_attacks();
        let start_x = state.player.position.x;

        input.press(Control::MoveLeft);
        state.step(&mut input, TICK, &mut rng);
        assert_eq!(state.player.velocity.x, -PLAYER_MOVE_SPEED);
        assert_eq!(state.player.facing, Facing::Left);

        input.release(Control::MoveLeft);
        state.step(&mut input, TICK, &mut rng);
        assert_eq!(state.player.velocity.x, 0.0);
        assert_eq!(state.player.position.x, start_x - PLAYER_MOVE_SPEED);
    }

    #[test]
    fn test_knockout_ends_match_once() {
        let mut state = face_off(10.0);
        let mut input = PlayerInput::default();
        let mut rng = never_attacks();
        state.enemy.apply_damage(MAX_HEALTH - ATTACK_DAMAGE);

        state.player.initiate_attack(state.clock());
        let mut ended = 0;
        for _ in 0..10 {
            for event in state.step(&mut input, TICK, &mut rng) {
                if let MatchEvent::MatchEnded { outcome, reason } = event {
                    assert_eq!(outcome, MatchOutcome::PlayerWins);
                    assert_eq!(reason, EndReason::Knockout);
                    ended += 1;
                }
            }
        }
        assert_eq!(ended, 1);
        assert_eq!(state.status(), MatchStatus::Ended);
        assert!(state.enemy.is_dead());
    }

    #[test]
    fn test_inputs_ignored_after_match_ends() {
        let mut state = face_off(500.0);
        let mut input = PlayerInput::default();
        let mut rng = never_attacks();
        state.player.apply_damage(MAX_HEALTH);
        state.step(&mut input, TICK, &mut rng);
        assert_eq!(state.status(), MatchStatus::Ended);

        let x = state.player.position.x;
        input.press(Control::MoveRight);
        input.press(Control::Attack);
        for _ in 0..5 {
            assert!(state.step(&mut input, TICK, &mut rng).is_empty());
        }
        assert_eq!(state.player.position.x, x);
        assert!(!state.player.is_attacking());
    }

    #[test]
    fn test_timer_runs_out_to_tie() {
        let mut state = MatchState::new();
        let mut input = PlayerInput::default();
        let mut rng = never_attacks();
        let mut timer_events = 0;
        let mut outcome = None;

        for _ in 0..61 {
            for event in state.step(&mut input, Duration::from_secs(1), &mut rng) {
                match event {
                    MatchEvent::TimerChanged { .. } => timer_events += 1,
                    MatchEvent::MatchEnded { outcome: o, reason } => {
                        assert!(outcome.is_none());
                        assert_eq!(reason, EndReason::TimeUp);
                        outcome = Some(o);
                    }
                    _ => {}
                }
            }
        }
        assert_eq!(timer_events, 60);
        assert_eq!(outcome, Some(MatchOutcome::Tie));
        assert_eq!(state.timer.remaining(), 0);
    }
}
