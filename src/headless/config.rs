//! JSON configuration parsing for headless mode
//!
//! Parses a headless match configuration: RNG seed, report path, safety cap
//! and a scripted sequence of player inputs.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::states::play_match::{Control, PlayerInput};

/// Headless match configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessMatchConfig {
    /// Custom output path for the match log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// Match time after which the run is abandoned (default: 90)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Random seed for deterministic match reproduction
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Player inputs, applied before the match tick they name
    #[serde(default)]
    pub player_script: Vec<ScriptStep>,
}

impl Default for HeadlessMatchConfig {
    fn default() -> Self {
        Self {
            output_path: None,
            max_duration_secs: default_max_duration(),
            random_seed: None,
            player_script: Vec::new(),
        }
    }
}

fn default_max_duration() -> f32 {
    90.0
}

/// Longest safety cap a config may ask for (one hour of match time)
pub const MAX_DURATION_LIMIT_SECS: f32 = 3600.0;

/// One scripted input: `{ "tick": 10, "press": "MoveRight" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Number of match ticks completed before this input applies
    pub tick: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptAction {
    Press(String),
    Release(String),
}

impl ScriptStep {
    pub fn press(tick: u64, control: Control) -> Self {
        Self {
            tick,
            action: ScriptAction::Press(format!("{:?}", control)),
        }
    }

    pub fn release(tick: u64, control: Control) -> Self {
        Self {
            tick,
            action: ScriptAction::Release(format!("{:?}", control)),
        }
    }

    pub fn control(&self) -> Result<Control, String> {
        match &self.action {
            ScriptAction::Press(name) | ScriptAction::Release(name) => Control::parse(name),
        }
    }

    /// Feed this step into the player's input.
    pub fn apply(&self, input: &mut PlayerInput) -> Result<(), String> {
        let control = self.control()?;
        match self.action {
            ScriptAction::Press(_) => input.press(control),
            ScriptAction::Release(_) => input.release(control),
        }
        Ok(())
    }
}

impl HeadlessMatchConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_json(&contents)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self, String> {
        let mut config: HeadlessMatchConfig = serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        config.player_script.sort_by_key(|step| step.tick);
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_duration_secs.is_nan() || self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }
        if self.max_duration_secs > MAX_DURATION_LIMIT_SECS {
            return Err(format!(
                "max_duration_secs must be at most {}",
                MAX_DURATION_LIMIT_SECS
            ));
        }

        for (index, step) in self.player_script.iter().enumerate() {
            step.control()
                .map_err(|e| format!("player_script[{}]: {}", index, e))?;
        }

        Ok(())
    }
}
