//! FightSim - two-fighter arena brawler
//!
//! Player 1 against an AI enemy on a flat stage. Runs windowed by default,
//! or headless with `--headless <CONFIG_FILE>`.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use fightsim::cli;
use fightsim::combat::CombatPlugin;
use fightsim::headless::{run_headless_match, HeadlessMatchConfig, MatchResult};
use fightsim::settings::{GameSettings, SettingsPlugin};
use fightsim::states::play_match::constants::FIXED_TICK_HZ;
use fightsim::states::{GameState, StatesPlugin};

fn main() {
    let args = cli::parse_args();

    if let Some(config_path) = args.headless {
        let mut config = match HeadlessMatchConfig::load_from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };

        // Command-line flags override the config file
        if let Some(output) = args.output {
            config.output_path = Some(output.to_string_lossy().into_owned());
        }
        if let Some(seed) = args.seed {
            config.random_seed = Some(seed);
        }

        match run_headless_match(config, args.verbose) {
            Ok(result) => print_summary(&result),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Peek at the settings file for the window; SettingsPlugin owns it afterwards.
    let settings = GameSettings::load();
    let (width, height) = settings.resolution.dimensions();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "FightSim".to_string(),
                resolution: (width, height).into(),
                present_mode: settings.present_mode(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.12)))
        .add_plugins((EguiPlugin, SettingsPlugin, StatesPlugin, CombatPlugin))
        .init_state::<GameState>()
        .run();
}

fn print_summary(result: &MatchResult) {
    let outcome = result
        .outcome
        .map(|outcome| outcome.message())
        .unwrap_or("Unfinished (safety cap reached)");

    println!();
    println!("Result: {}", outcome);
    if let Some(winner) = result.outcome.and_then(|outcome| outcome.winner()) {
        println!("  Winner: {}", result.fighter(winner).name);
    }
    println!(
        "  Match time: {:.2}s ({} ticks)",
        result.match_time, result.ticks
    );
    for fighter in [&result.player, &result.enemy] {
        println!(
            "  {:<9} health {:>3}  dealt {:>3}  taken {:>3}  at ({:.0}, {:.0})",
            fighter.name,
            fighter.final_health,
            fighter.damage_dealt,
            fighter.damage_taken,
            fighter.final_position.x,
            fighter.final_position.y
        );
    }
    if let Some(seed) = result.random_seed {
        println!("  Seed: {}", seed);
    }
}
