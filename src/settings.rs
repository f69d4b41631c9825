//! Game settings and configuration
//!
//! Window preferences and keybindings, persisted to `settings.ron`.

use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::keybindings::Keybindings;

/// User-configurable game settings
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct GameSettings {
    pub resolution: ResolutionOption,
    pub vsync: bool,
    #[serde(default)]
    pub keybindings: Keybindings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            resolution: ResolutionOption::Stage,
            vsync: true,
            keybindings: Keybindings::default(),
        }
    }
}

impl GameSettings {
    /// Get the path to the settings file
    fn settings_path() -> PathBuf {
        PathBuf::from("settings.ron")
    }

    /// Load settings from `settings.ron`, writing defaults if it is missing
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, writing defaults to {:?}", path);
            let settings = Self::default();
            if let Err(e) = settings.save_to(path) {
                warn!("Failed to write default settings: {}", e);
            }
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("{}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        ron::from_str(contents).map_err(|e| format!("Failed to parse settings file: {}", e))
    }

    /// Save settings to `settings.ron`
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        fs::write(path, contents).map_err(|e| format!("Failed to write {:?}: {}", path, e))?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn present_mode(&self) -> PresentMode {
        if self.vsync {
            PresentMode::AutoVsync
        } else {
            PresentMode::AutoNoVsync
        }
    }
}

/// Resolution presets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionOption {
    /// Native stage size, 1024 × 576
    Stage,
    HD720,
    HD1080,
}

impl ResolutionOption {
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            ResolutionOption::Stage => (1024.0, 576.0),
            ResolutionOption::HD720 => (1280.0, 720.0),
            ResolutionOption::HD1080 => (1920.0, 1080.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionOption::Stage => "1024 × 576",
            ResolutionOption::HD720 => "1280 × 720",
            ResolutionOption::HD1080 => "1920 × 1080",
        }
    }
}

/// Plugin for managing game settings
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = GameSettings::load();
        let keybindings = settings.keybindings.clone();

        app.insert_resource(settings)
            .insert_resource(keybindings)
            .add_systems(Update, (save_settings_on_change, apply_vsync, sync_keybindings));
    }
}

fn save_settings_on_change(settings: Res<GameSettings>) {
    if settings.is_changed() && !settings.is_added() {
        if let Err(e) = settings.save() {
            error!("Failed to save settings: {}", e);
        }
    }
}

fn apply_vsync(settings: Res<GameSettings>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if settings.is_changed() && !settings.is_added() {
        if let Ok(mut window) = windows.get_single_mut() {
            window.present_mode = settings.present_mode();
            info!("Applied VSync: {}", settings.vsync);
        }
    }
}

/// Keep the Keybindings resource in sync with GameSettings
fn sync_keybindings(settings: Res<GameSettings>, mut keybindings: ResMut<Keybindings>) {
    if settings.is_changed() && !settings.is_added() {
        *keybindings = settings.keybindings.clone();
        info!("Synced keybindings from settings");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::GameAction;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fightsim_settings_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_settings_survive_ron() {
        let mut settings = GameSettings::default();
        settings.resolution = ResolutionOption::HD1080;
        settings.vsync = false;

        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default()).unwrap();
        let parsed = GameSettings::parse(&text).unwrap();
        assert_eq!(parsed.resolution, ResolutionOption::HD1080);
        assert!(!parsed.vsync);
        assert_eq!(
            parsed.keybindings.binding_display(GameAction::Attack),
            settings.keybindings.binding_display(GameAction::Attack)
        );
    }

    #[test]
    fn test_missing_keybindings_fall_back_to_defaults() {
        let parsed = GameSettings::parse("(resolution: HD720, vsync: true)").unwrap();
        assert_eq!(parsed.resolution, ResolutionOption::HD720);
        assert_eq!(parsed.keybindings.binding_display(GameAction::Back), "ESC");
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        assert!(GameSettings::parse("(resolution: Potato").is_err());

        let path = scratch_path("malformed.ron");
        fs::write(&path, "not ron at all {").unwrap();
        let settings = GameSettings::load_from(&path);
        assert_eq!(settings.resolution, ResolutionOption::Stage);
        assert!(settings.vsync);
    }

    #[test]
    fn test_missing_file_is_written() {
        let path = scratch_path("missing.ron");
        let _ = fs::remove_file(&path);

        let settings = GameSettings::load_from(&path);
        assert_eq!(settings.resolution, ResolutionOption::Stage);
        assert!(path.exists());
        assert!(GameSettings::parse(&fs::read_to_string(&path).unwrap()).is_ok());
    }
}
