//! Axis-aligned box overlap
//!
//! Hit detection tests one fighter's attack box against the other's body.

use bevy::prelude::*;

use super::fighter::Fighter;

/// Axis-aligned rectangle in stage space (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub position: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Inclusive overlap: boxes that only touch along an edge still count.
    pub fn intersects(&self, other: &Hitbox) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }
}

/// Whether `attacker`'s attack box overlaps `defender`'s body.
///
/// Does not look at whether an attack is active; the match loop checks that.
pub fn overlaps(attacker: &Fighter, defender: &Fighter) -> bool {
    attacker.attack_box.hitbox().intersects(&defender.body())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::states::play_match::fighter::{Facing, FighterSide};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Hitbox {
        Hitbox::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        assert!(rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_count_as_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(a.intersects(&rect(0.0, 10.0, 10.0, 10.0)));
        assert!(a.intersects(&rect(-10.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&rect(10.1, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, -10.5, 10.0, 10.0)));
    }

    #[test]
    fn test_overlaps_uses_attack_box_against_body() {
        let mut attacker = Fighter::new(FighterSide::Player, Vec2::new(100.0, 330.0), Facing::Right);
        let defender = Fighter::new(FighterSide::Enemy, Vec2::new(190.0, 330.0), Facing::Left);

        attacker.attack_box.align(attacker.position, attacker.size.x, attacker.facing);
        // Reach ends at 200, defender body starts at 190.
        assert!(overlaps(&attacker, &defender));

        attacker.facing = Facing::Left;
        attacker.attack_box.align(attacker.position, attacker.size.x, attacker.facing);
        assert!(!overlaps(&attacker, &defender));
    }
}
