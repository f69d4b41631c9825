//! Components and Resources for Play Match
//!
//! ECS-side types used while a match is on screen or running headless.
//! The simulation itself lives in plain structs owned by `MatchState`.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::fighter::FighterSide;
use super::match_state::MatchOutcome;

/// Seeded random number generator for deterministic match simulation.
///
/// When a seed is provided (e.g., via headless config), the same seed and the
/// same player input always produce the same match. Without a seed, uses
/// system entropy.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Rewind to the start of the seeded sequence, or draw fresh entropy.
    pub fn reseed(&mut self) {
        *self = match self.seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        };
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Marker for every entity spawned for a match; despawned when it ends.
#[derive(Component)]
pub struct PlayMatchEntity;

/// Sprite drawing one fighter's body.
#[derive(Component, Debug, Clone, Copy)]
pub struct FighterSprite(pub FighterSide);

/// What the HUD shows. Updated only from match events, never read back from
/// the simulation, so it reflects exactly what was published.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudState {
    pub player_health_percent: u32,
    pub enemy_health_percent: u32,
    pub timer_remaining: u32,
    pub result: Option<MatchOutcome>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            player_health_percent: 100,
            enemy_health_percent: 100,
            timer_remaining: super::constants::MATCH_DURATION_SECS,
            result: None,
        }
    }
}

impl HudState {
    pub fn health_percent(&self, side: FighterSide) -> u32 {
        match side {
            FighterSide::Player => self.player_health_percent,
            FighterSide::Enemy => self.enemy_health_percent,
        }
    }

    pub fn set_health_percent(&mut self, side: FighterSide, percent: u32) {
        match side {
            FighterSide::Player => self.player_health_percent = percent,
            FighterSide::Enemy => self.enemy_health_percent = percent,
        }
    }
}
