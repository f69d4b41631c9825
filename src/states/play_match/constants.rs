//! Match Constants
//!
//! Every gameplay number lives here. None of these are user-facing: a match
//! always runs with exactly these values.

use bevy::math::Vec2;
use std::time::Duration;

// ============================================================================
// Stage
// ============================================================================

/// Stage width in stage units (pixels in the windowed view).
pub const STAGE_WIDTH: f32 = 1024.0;

/// Stage height in stage units.
pub const STAGE_HEIGHT: f32 = 576.0;

/// Height of the ground strip at the bottom of the stage.
/// Fighters stand on its top edge.
pub const GROUND_HEIGHT: f32 = 96.0;

// ============================================================================
// Physics
// ============================================================================

/// Downward acceleration added to vertical velocity every tick.
pub const GRAVITY: f32 = 0.7;

/// Cap on downward velocity (stage units per tick).
pub const TERMINAL_VELOCITY: f32 = 20.0;

/// Vertical velocity applied by a jump (negative is up).
pub const JUMP_VELOCITY: f32 = -20.0;

/// Fixed simulation rate. One fixed tick is one match loop tick.
pub const FIXED_TICK_HZ: f64 = 60.0;

// ============================================================================
// Fighters
// ============================================================================

/// Body box width shared by both fighters.
pub const FIGHTER_WIDTH: f32 = 50.0;

/// Body box height shared by both fighters.
pub const FIGHTER_HEIGHT: f32 = 150.0;

/// Attack box width (reach).
pub const ATTACK_BOX_WIDTH: f32 = 100.0;

/// Attack box height.
pub const ATTACK_BOX_HEIGHT: f32 = 50.0;

/// Attack box offset from the fighter's top-left corner.
/// Mirrored horizontally when the fighter faces left.
pub const ATTACK_BOX_OFFSET: Vec2 = Vec2::new(0.0, 0.0);

/// Starting top-left position of the player.
pub const PLAYER_START: Vec2 = Vec2::new(0.0, 0.0);

/// Starting top-left position of the enemy.
pub const ENEMY_START: Vec2 = Vec2::new(400.0, 100.0);

/// Player horizontal speed while a movement key is held.
pub const PLAYER_MOVE_SPEED: f32 = 5.0;

// ============================================================================
// Combat
// ============================================================================

/// Health every fighter starts a match with.
pub const MAX_HEALTH: u32 = 100;

/// Damage dealt by one landed attack.
pub const ATTACK_DAMAGE: u32 = 10;

/// How long an attack stays active after it is initiated.
pub const ATTACK_DURATION: Duration = Duration::from_millis(100);

// ============================================================================
// Enemy AI
// ============================================================================

/// Enemy horizontal speed while closing in on the player.
pub const ENEMY_MOVE_SPEED: f32 = 2.0;

/// The enemy ignores a player at or beyond this horizontal distance.
pub const ENEMY_DETECTION_RADIUS: f32 = 400.0;

/// Within this horizontal distance the enemy stops and swings.
pub const ENEMY_ENGAGE_RADIUS: f32 = 60.0;

/// Chance per tick that an engaged enemy starts an attack.
pub const ENEMY_ATTACK_CHANCE: f32 = 0.02;

// ============================================================================
// Timing
// ============================================================================

/// Match length in seconds.
pub const MATCH_DURATION_SECS: u32 = 60;

/// Interval between timer decrements.
pub const TIMER_STEP: Duration = Duration::from_secs(1);
