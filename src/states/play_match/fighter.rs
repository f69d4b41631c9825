//! Fighter state
//!
//! One `Fighter` per side. Holds the body box, velocity, facing, health and
//! the attack window. Positions are in stage space: origin at the top-left
//! of the stage, y grows downward.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::collision::Hitbox;
use super::constants::*;
use crate::ui::colors;

/// Which fighter a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterSide {
    Player,
    Enemy,
}

impl FighterSide {
    /// Both sides, player first.
    pub fn all() -> [FighterSide; 2] {
        [FighterSide::Player, FighterSide::Enemy]
    }

    /// Display name used in logs and the HUD.
    pub fn name(&self) -> &'static str {
        match self {
            FighterSide::Player => "Player 1",
            FighterSide::Enemy => "Enemy",
        }
    }

    /// Body color for rendering.
    pub fn color(&self) -> Color {
        match self {
            FighterSide::Player => colors::PLAYER,
            FighterSide::Enemy => colors::ENEMY,
        }
    }
}

/// Direction a fighter faces. Attacks always reach toward the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing that looks from `from_x` toward `to_x`.
    pub fn toward(from_x: f32, to_x: f32) -> Facing {
        if to_x < from_x {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Strike region anchored to a fighter.
///
/// `position` is recomputed every tick from the owner's position, width,
/// facing and `offset`, whether or not an attack is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackBox {
    pub offset: Vec2,
    pub size: Vec2,
    pub position: Vec2,
}

impl AttackBox {
    pub fn new(offset: Vec2) -> Self {
        Self {
            offset,
            size: Vec2::new(ATTACK_BOX_WIDTH, ATTACK_BOX_HEIGHT),
            position: Vec2::ZERO,
        }
    }

    /// Re-anchor the box to its owner. Facing left mirrors the reach so the
    /// same offset extends past the owner's left edge instead of its right.
    pub fn align(&mut self, owner_position: Vec2, owner_width: f32, facing: Facing) {
        self.position.x = match facing {
            Facing::Right => owner_position.x + self.offset.x,
            Facing::Left => owner_position.x - self.size.x + owner_width - self.offset.x,
        };
        self.position.y = owner_position.y + self.offset.y;
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.position, self.size)
    }
}

/// Physical and combat state of one fighter.
#[derive(Debug, Clone)]
pub struct Fighter {
    pub side: FighterSide,
    /// Top-left corner of the body box.
    pub position: Vec2,
    /// Displacement per tick. `y` accumulates gravity.
    pub velocity: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub attack_box: AttackBox,
    /// Total damage this fighter has landed.
    pub damage_dealt: u32,
    /// Total damage this fighter has received.
    pub damage_taken: u32,
    health: u32,
    is_dead: bool,
    is_attacking: bool,
    attack_started_at: Option<Duration>,
}

impl Fighter {
    pub fn new(side: FighterSide, position: Vec2, facing: Facing) -> Self {
        Self {
            side,
            position,
            velocity: Vec2::ZERO,
            size: Vec2::new(FIGHTER_WIDTH, FIGHTER_HEIGHT),
            facing,
            attack_box: AttackBox::new(ATTACK_BOX_OFFSET),
            damage_dealt: 0,
            damage_taken: 0,
            health: MAX_HEALTH,
            is_dead: false,
            is_attacking: false,
            attack_started_at: None,
        }
    }

    /// The player at its starting spot, facing the enemy.
    pub fn player() -> Self {
        Self::new(FighterSide::Player, PLAYER_START, Facing::Right)
    }

    /// The enemy at its starting spot, facing the player.
    pub fn enemy() -> Self {
        Self::new(FighterSide::Enemy, ENEMY_START, Facing::Left)
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Health as a whole percentage of `MAX_HEALTH` (0-100).
    pub fn health_percent(&self) -> u32 {
        self.health * 100 / MAX_HEALTH
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_attacking(&self) -> bool {
        self.is_attacking
    }

    pub fn is_grounded(&self) -> bool {
        self.velocity.y == 0.0
    }

    pub fn body(&self) -> Hitbox {
        Hitbox::new(self.position, self.size)
    }

    /// Advance one tick of physics.
    ///
    /// Order matters and matches what players see: the attack window is
    /// expired, the attack box is re-anchored to the pre-move position,
    /// velocity is applied, then ground contact and stage bounds resolve.
    /// Dead fighters still fall and land; callers stop feeding them intent.
    pub fn tick(&mut self, stage: &Stage, now: Duration) {
        self.expire_attack(now);
        self.attack_box.align(self.position, self.size.x, self.facing);

        self.position += self.velocity;

        let ground_line = stage.ground_line();
        if self.position.y + self.size.y + self.velocity.y >= ground_line {
            self.velocity.y = 0.0;
            self.position.y = ground_line - self.size.y;
        } else {
            self.velocity.y = (self.velocity.y + stage.gravity).min(stage.terminal_velocity);
        }

        self.position.x = self.position.x.clamp(0.0, stage.width - self.size.x);
    }

    /// Open the attack window at match time `now`.
    ///
    /// Calling again while attacking restarts the window.
    pub fn initiate_attack(&mut self, now: Duration) {
        self.is_attacking = true;
        self.attack_started_at = Some(now);
    }

    /// Close the attack window early (the strike connected).
    pub fn end_attack(&mut self) {
        self.is_attacking = false;
        self.attack_started_at = None;
    }

    fn expire_attack(&mut self, now: Duration) {
        let Some(started_at) = self.attack_started_at else {
            return;
        };
        if now.saturating_sub(started_at) >= ATTACK_DURATION {
            self.end_attack();
        }
    }

    /// Subtract `amount` from health, clamping at zero.
    ///
    /// Returns the damage actually taken. No effect once dead.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        if self.is_dead {
            return 0;
        }
        let taken = amount.min(self.health);
        self.health -= taken;
        self.damage_taken += taken;
        if self.health == 0 {
            self.is_dead = true;
        }
        taken
    }

    /// Jump if standing on the ground. Returns whether the jump happened.
    pub fn try_jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.velocity.y = JUMP_VELOCITY;
        true
    }
}

/// Stage bounds and physics parameters handed to `Fighter::tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: STAGE_WIDTH,
            height: STAGE_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
        }
    }
}

impl Stage {
    /// Y coordinate of the ground surface. A fighter's bottom edge never
    /// passes below it.
    pub fn ground_line(&self) -> f32 {
        self.height - self.ground_height
    }
}
