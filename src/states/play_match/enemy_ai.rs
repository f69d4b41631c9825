//! Enemy AI
//!
//! Reactive policy for the computer-controlled fighter. Nothing is remembered
//! between ticks: each decision is recomputed from the horizontal distance to
//! the player, so the policy can be stopped and resumed at any point.
//!
//! - Beyond `ENEMY_DETECTION_RADIUS`: idle.
//! - Between the engage and detection radii: walk toward the player.
//! - Within `ENEMY_ENGAGE_RADIUS`: stand, face the player and swing with
//!   probability `ENEMY_ATTACK_CHANCE` per tick.

use rand::Rng;
use std::time::Duration;

use super::constants::*;
use super::fighter::{Facing, Fighter};

/// What the enemy decided to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyDecision {
    /// Dead, or the match is over.
    Inactive,
    /// Player out of detection range.
    Idle,
    /// Walking toward the player.
    Approach,
    /// In striking range; `attacked` is whether a swing started this tick.
    Engage { attacked: bool },
}

/// Set the enemy's velocity, facing and attacks for this tick.
pub fn drive_enemy<R: Rng + ?Sized>(
    enemy: &mut Fighter,
    player: &Fighter,
    match_running: bool,
    now: Duration,
    rng: &mut R,
) -> EnemyDecision {
    enemy.velocity.x = 0.0;

    if enemy.is_dead() || !match_running {
        return EnemyDecision::Inactive;
    }

    let distance = player.position.x - enemy.position.x;
    let abs_distance = distance.abs();

    if abs_distance >= ENEMY_DETECTION_RADIUS {
        return EnemyDecision::Idle;
    }

    enemy.facing = Facing::toward(enemy.position.x, player.position.x);

    if abs_distance > ENEMY_ENGAGE_RADIUS {
        enemy.velocity.x = ENEMY_MOVE_SPEED * distance.signum();
        return EnemyDecision::Approach;
    }

    let attacked = rng.gen::<f32>() < ENEMY_ATTACK_CHANCE;
    if attacked {
        enemy.initiate_attack(now);
    }
    EnemyDecision::Engage { attacked }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::play_match::fighter::FighterSide;
    use bevy::math::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pair(enemy_x: f32, player_x: f32) -> (Fighter, Fighter) {
        let enemy = Fighter::new(FighterSide::Enemy, Vec2::new(enemy_x, 330.0), Facing::Left);
        let player = Fighter::new(FighterSide::Player, Vec2::new(player_x, 330.0), Facing::Right);
        (enemy, player)
    }

    #[test]
    fn test_idles_when_player_far_away() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(100.0, 600.0);
        enemy.velocity.x = 2.0;
        let decision = drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert_eq!(decision, EnemyDecision::Idle);
        assert_eq!(enemy.velocity.x, 0.0);
    }

    #[test]
    fn test_idles_exactly_at_detection_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(0.0, ENEMY_DETECTION_RADIUS);
        let decision = drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert_eq!(decision, EnemyDecision::Idle);
    }

    #[test]
    fn test_engages_exactly_at_engage_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(100.0, 100.0 + ENEMY_ENGAGE_RADIUS);
        enemy.velocity.x = 2.0;
        let decision = drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert!(matches!(decision, EnemyDecision::Engage { .. }));
        assert_eq!(enemy.velocity.x, 0.0);
    }

    #[test]
    fn test_approaches_just_beyond_engage_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(100.0, 100.5 + ENEMY_ENGAGE_RADIUS);
        let decision = drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert_eq!(decision, EnemyDecision::Approach);
        assert_eq!(enemy.velocity.x, ENEMY_MOVE_SPEED);
    }

    #[test]
    fn test_approaches_player_on_the_right() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(100.0, 300.0);
        let decision = drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert_eq!(decision, EnemyDecision::Approach);
        assert_eq!(enemy.velocity.x, ENEMY_MOVE_SPEED);
        assert_eq!(enemy.facing, Facing::Right);
    }

    #[test]
    fn test_approaches_player_on_the_left() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(500.0, 300.0);
        drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert_eq!(enemy.velocity.x, -ENEMY_MOVE_SPEED);
        assert_eq!(enemy.facing, Facing::Left);
    }

    #[test]
    fn test_stands_and_faces_player_when_close() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(300.0, 330.0);
        enemy.velocity.x = -2.0;
        let decision = drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert!(matches!(decision, EnemyDecision::Engage { .. }));
        assert_eq!(enemy.velocity.x, 0.0);
        assert_eq!(enemy.facing, Facing::Right);
    }

    #[test]
    fn test_inactive_when_dead_or_match_over() {
        let mut rng = StdRng::seed_from_u64(1);
        let (mut enemy, player) = pair(100.0, 300.0);
        enemy.velocity.x = 2.0;
        let decision = drive_enemy(&mut enemy, &player, false, Duration::ZERO, &mut rng);
        assert_eq!(decision, EnemyDecision::Inactive);
        assert_eq!(enemy.velocity.x, 0.0);

        enemy.apply_damage(MAX_HEALTH);
        let decision = drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng);
        assert_eq!(decision, EnemyDecision::Inactive);
        assert!(!enemy.is_attacking());
    }

    #[test]
    fn test_attack_rate_matches_chance() {
        let mut rng = StdRng::seed_from_u64(0xF16);
        let trials = 200_000;
        let mut attacks = 0;
        for _ in 0..trials {
            let (mut enemy, player) = pair(300.0, 330.0);
            if let EnemyDecision::Engage { attacked: true } =
                drive_enemy(&mut enemy, &player, true, Duration::ZERO, &mut rng)
            {
                assert!(enemy.is_attacking());
                attacks += 1;
            }
        }
        let rate = attacks as f64 / trials as f64;
        // 0.02 with a std-dev of ~0.0003 at this sample size
        assert!((rate - ENEMY_ATTACK_CHANCE as f64).abs() < 0.002, "rate {}", rate);
    }
}
