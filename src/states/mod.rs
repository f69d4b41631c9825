//! Game state management
//!
//! Defines the core game states and transitions between them.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub mod play_match;

use play_match::{
    cleanup_play_match, draw_stage_gizmos, handle_match_controls, read_player_input, render_hud,
    setup_play_match, sync_fighter_sprites, systems,
};

use crate::keybindings::{GameAction, Keybindings};
use crate::ui::{fonts, to_egui, colors};

/// The core game states representing the main screens of the game.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Main menu - entry point
    #[default]
    MainMenu,
    /// Active match - player against the enemy AI
    PlayMatch,
}

/// Plugin for managing game states and transitions
pub struct StatesPlugin;

impl Plugin for StatesPlugin {
    fn build(&self, app: &mut App) {
        systems::configure_match_system_ordering(app);
        systems::add_core_match_systems(app, in_state(GameState::PlayMatch));

        app
            // Main menu systems (egui)
            .add_systems(
                Update,
                main_menu_ui.run_if(in_state(GameState::MainMenu)),
            )
            // Play match systems
            .add_systems(OnEnter(GameState::PlayMatch), setup_play_match)
            .add_systems(OnExit(GameState::PlayMatch), cleanup_play_match)
            .add_systems(
                Update,
                (
                    handle_match_controls,
                    read_player_input,
                    sync_fighter_sprites,
                    draw_stage_gizmos,
                    render_hud,
                )
                    .chain()
                    .run_if(in_state(GameState::PlayMatch)),
            );
    }
}

// ============================================================================
// Main Menu (egui)
// ============================================================================

fn main_menu_ui(
    mut contexts: EguiContexts,
    keybindings: Res<Keybindings>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit_events: EventWriter<AppExit>,
) {
    let ctx = contexts.ctx_mut();
    let background = egui::Color32::from_rgb(20, 20, 30);

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(background))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);

                ui.heading(
                    egui::RichText::new("FIGHTSIM")
                        .size(72.0)
                        .color(to_egui(colors::PLAYER)),
                );
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new("Player 1 vs the machine")
                        .size(24.0)
                        .color(egui::Color32::from_rgb(153, 140, 128)),
                );

                ui.add_space(50.0);

                let button_size = egui::vec2(280.0, 60.0);
                let button_text = |text: &str| {
                    egui::RichText::new(text)
                        .size(28.0)
                        .color(egui::Color32::from_rgb(230, 217, 191))
                };

                if ui
                    .add_sized(button_size, egui::Button::new(button_text("FIGHT")))
                    .clicked()
                {
                    info!("Fight button pressed - transitioning to PlayMatch");
                    next_state.set(GameState::PlayMatch);
                }

                ui.add_space(10.0);

                if ui
                    .add_sized(button_size, egui::Button::new(button_text("EXIT")))
                    .clicked()
                {
                    info!("Exit button pressed - quitting application");
                    exit_events.send(AppExit::Success);
                }

                ui.add_space(40.0);

                for action in GameAction::all() {
                    ui.label(
                        egui::RichText::new(format!(
                            "{:<12} {}",
                            action.description(),
                            keybindings.binding_display(action)
                        ))
                        .size(fonts::SMALL)
                        .monospace()
                        .color(egui::Color32::from_rgb(153, 153, 153)),
                    );
                }
            });
        });
}
