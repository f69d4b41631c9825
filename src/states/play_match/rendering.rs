//! Rendering Systems
//!
//! Draws the match: fighter bodies as sprites, the ground line and active
//! attack boxes as gizmos, and the HUD (health bars, timer, result banner)
//! with egui. Nothing here mutates the simulation.

use bevy::math::Isometry2d;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::components::{FighterSprite, HudState};
use super::constants::{STAGE_HEIGHT, STAGE_WIDTH};
use super::fighter::FighterSide;
use super::match_state::MatchState;
use crate::keybindings::{GameAction, Keybindings};
use crate::ui::{colors, fonts, to_egui};

/// Convert a stage-space box (top-left origin, y down) to the Bevy world
/// position of its center (stage centered on the origin, y up).
pub fn stage_to_world(top_left: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(
        top_left.x + size.x / 2.0 - STAGE_WIDTH / 2.0,
        STAGE_HEIGHT / 2.0 - (top_left.y + size.y / 2.0),
    )
}

/// Move fighter sprites to their simulated positions.
pub fn sync_fighter_sprites(
    state: Res<MatchState>,
    mut sprites: Query<(&FighterSprite, &mut Transform, &mut Sprite)>,
) {
    for (FighterSprite(side), mut transform, mut sprite) in sprites.iter_mut() {
        let fighter = state.fighter(*side);
        let center = stage_to_world(fighter.position, fighter.size);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        sprite.color = if fighter.is_dead() {
            colors::DEFEATED
        } else {
            side.color()
        };
    }
}

/// Ground line and any active attack boxes.
pub fn draw_stage_gizmos(state: Res<MatchState>, mut gizmos: Gizmos) {
    let ground_y = STAGE_HEIGHT / 2.0 - state.stage.ground_line();
    gizmos.line_2d(
        Vec2::new(-STAGE_WIDTH / 2.0, ground_y),
        Vec2::new(STAGE_WIDTH / 2.0, ground_y),
        colors::GROUND,
    );

    for side in FighterSide::all() {
        let fighter = state.fighter(side);
        if !fighter.is_attacking() {
            continue;
        }
        let attack_box = fighter.attack_box;
        gizmos.rect_2d(
            Isometry2d::from_translation(stage_to_world(attack_box.position, attack_box.size)),
            attack_box.size,
            colors::ATTACK_BOX,
        );
    }
}

/// Health bars, countdown and the result banner.
pub fn render_hud(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    keybindings: Res<Keybindings>,
) {
    let ctx = contexts.ctx_mut();

    egui::TopBottomPanel::top("match_hud")
        .frame(egui::Frame::none().inner_margin(egui::Margin::same(12.0)))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let bar_width = (ui.available_width() - 120.0) / 2.0;
                health_bar(ui, FighterSide::Player, hud.player_health_percent, bar_width);
                ui.add_sized(
                    egui::vec2(100.0, 30.0),
                    egui::Label::new(
                        egui::RichText::new(hud.timer_remaining.to_string())
                            .size(fonts::HEADER)
                            .color(egui::Color32::WHITE),
                    ),
                );
                health_bar(ui, FighterSide::Enemy, hud.enemy_health_percent, bar_width);
            });
        });

    let Some(outcome) = hud.result else {
        return;
    };

    egui::Area::new(egui::Id::new("result_banner"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(outcome.message())
                        .size(fonts::TITLE)
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "{} to fight again  -  {} for menu",
                        keybindings.binding_display(GameAction::Restart),
                        keybindings.binding_display(GameAction::Back),
                    ))
                    .size(fonts::BODY)
                    .color(egui::Color32::LIGHT_GRAY),
                );
            });
        });
}

fn health_bar(ui: &mut egui::Ui, side: FighterSide, percent: u32, width: f32) {
    let fill = if percent <= 30 {
        colors::HEALTH_LOW
    } else {
        side.color()
    };
    ui.add(
        egui::ProgressBar::new(percent as f32 / 100.0)
            .desired_width(width)
            .fill(to_egui(fill))
            .text(format!("{}  {}%", side.name(), percent)),
    );
}
