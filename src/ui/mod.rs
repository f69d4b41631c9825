//! UI constants
//!
//! Shared colors and font sizes for sprites, gizmos and egui panels.

use bevy::prelude::*;
use bevy_egui::egui;

/// Common colors used throughout the UI
pub mod colors {
    use bevy::prelude::*;

    /// Player 1 body color (red)
    pub const PLAYER: Color = Color::srgb(0.85, 0.2, 0.2);
    /// Enemy body color (blue)
    pub const ENEMY: Color = Color::srgb(0.2, 0.4, 0.85);
    /// Body color of a defeated fighter
    pub const DEFEATED: Color = Color::srgb(0.35, 0.35, 0.35);
    /// Attack box outline
    pub const ATTACK_BOX: Color = Color::srgb(1.0, 0.9, 0.2);
    /// Ground strip and line
    pub const GROUND: Color = Color::srgb(0.25, 0.22, 0.2);
    /// Health bar low color
    pub const HEALTH_LOW: Color = Color::srgb(0.9, 0.5, 0.1);
}

/// Font sizes used throughout the UI
pub mod fonts {
    /// Large title text
    pub const TITLE: f32 = 48.0;
    /// Section headers
    pub const HEADER: f32 = 32.0;
    /// Normal body text
    pub const BODY: f32 = 18.0;
    /// Small labels and annotations
    pub const SMALL: f32 = 14.0;
}

/// Convert a Bevy color for use in egui widgets.
pub fn to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(srgba.red),
        channel(srgba.green),
        channel(srgba.blue),
        channel(srgba.alpha),
    )
}
