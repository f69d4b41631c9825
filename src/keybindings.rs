//! Keybinding system for remappable controls
//!
//! Maps game actions to keys. Bindings are stored in `settings.ron` by key
//! name so players can remap them by hand.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::states::play_match::Control;

/// All possible actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameAction {
    // Fighting
    MoveLeft,
    MoveRight,
    Jump,
    Attack,

    // Match flow
    Restart,
    Back,
}

impl GameAction {
    pub fn description(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "Move Left",
            GameAction::MoveRight => "Move Right",
            GameAction::Jump => "Jump",
            GameAction::Attack => "Attack",
            GameAction::Restart => "Fight Again",
            GameAction::Back => "Back / Menu",
        }
    }

    pub fn all() -> Vec<GameAction> {
        vec![
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::Jump,
            GameAction::Attack,
            GameAction::Restart,
            GameAction::Back,
        ]
    }

    /// The action that drives a player control
    pub fn for_control(control: Control) -> GameAction {
        match control {
            Control::MoveLeft => GameAction::MoveLeft,
            Control::MoveRight => GameAction::MoveRight,
            Control::Jump => GameAction::Jump,
            Control::Attack => GameAction::Attack,
        }
    }
}

/// Keys that can be bound, with their settings-file name and display label.
const KEY_NAMES: &[(KeyCode, &str, &str)] = &[
    (KeyCode::Escape, "Escape", "ESC"),
    (KeyCode::Enter, "Enter", "ENTER"),
    (KeyCode::Space, "Space", "SPACE"),
    (KeyCode::Tab, "Tab", "TAB"),
    (KeyCode::ShiftLeft, "ShiftLeft", "L-SHIFT"),
    (KeyCode::ControlLeft, "ControlLeft", "L-CTRL"),
    (KeyCode::KeyA, "KeyA", "A"),
    (KeyCode::KeyD, "KeyD", "D"),
    (KeyCode::KeyE, "KeyE", "E"),
    (KeyCode::KeyF, "KeyF", "F"),
    (KeyCode::KeyJ, "KeyJ", "J"),
    (KeyCode::KeyK, "KeyK", "K"),
    (KeyCode::KeyL, "KeyL", "L"),
    (KeyCode::KeyQ, "KeyQ", "Q"),
    (KeyCode::KeyR, "KeyR", "R"),
    (KeyCode::KeyS, "KeyS", "S"),
    (KeyCode::KeyW, "KeyW", "W"),
    (KeyCode::KeyX, "KeyX", "X"),
    (KeyCode::KeyZ, "KeyZ", "Z"),
    (KeyCode::ArrowUp, "ArrowUp", "↑"),
    (KeyCode::ArrowDown, "ArrowDown", "↓"),
    (KeyCode::ArrowLeft, "ArrowLeft", "←"),
    (KeyCode::ArrowRight, "ArrowRight", "→"),
];

/// Settings-file name for a key
pub fn key_code_name(key: KeyCode) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|(code, _, _)| *code == key)
        .map(|(_, name, _)| *name)
}

/// Parse a settings-file key name
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    KEY_NAMES
        .iter()
        .find(|(_, key_name, _)| *key_name == name)
        .map(|(code, _, _)| *code)
}

/// Key binding with primary and optional secondary key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyBinding {
    #[serde(with = "keycode_serde")]
    pub primary: KeyCode,
    #[serde(default, with = "option_keycode_serde")]
    pub secondary: Option<KeyCode>,
}

mod keycode_serde {
    use super::*;
    use serde::de::Error;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &KeyCode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key_code_name(*key) {
            Some(name) => serializer.serialize_str(name),
            None => Err(serde::ser::Error::custom(format!("unbindable key {:?}", key))),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<KeyCode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        parse_key_code(&name).ok_or_else(|| D::Error::custom(format!("unknown key '{}'", name)))
    }
}

mod option_keycode_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(key: &Option<KeyCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match key.and_then(key_code_name) {
            Some(name) => serializer.serialize_some(name),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<KeyCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name: Option<String> = Option::deserialize(deserializer)?;
        Ok(name.as_deref().and_then(parse_key_code))
    }
}

impl KeyBinding {
    pub fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.primary == key || self.secondary == Some(key)
    }

    fn keys(&self) -> impl Iterator<Item = KeyCode> {
        std::iter::once(self.primary).chain(self.secondary)
    }
}

/// Complete keybindings configuration
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct Keybindings {
    bindings: HashMap<GameAction, KeyBinding>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::create_defaults()
    }
}

impl Keybindings {
    /// Create default keybindings
    pub fn create_defaults() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(
            GameAction::MoveLeft,
            KeyBinding::with_secondary(KeyCode::KeyA, KeyCode::ArrowLeft),
        );
        bindings.insert(
            GameAction::MoveRight,
            KeyBinding::with_secondary(KeyCode::KeyD, KeyCode::ArrowRight),
        );
        bindings.insert(
            GameAction::Jump,
            KeyBinding::with_secondary(KeyCode::KeyW, KeyCode::ArrowUp),
        );
        bindings.insert(GameAction::Attack, KeyBinding::new(KeyCode::Space));
        bindings.insert(GameAction::Restart, KeyBinding::new(KeyCode::Enter));
        bindings.insert(GameAction::Back, KeyBinding::new(KeyCode::Escape));

        Self { bindings }
    }

    /// Get the binding for an action
    pub fn get(&self, action: GameAction) -> Option<&KeyBinding> {
        self.bindings.get(&action)
    }

    /// Check if an action is currently pressed
    pub fn action_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action)
            .is_some_and(|binding| binding.keys().any(|key| keyboard.pressed(key)))
    }

    /// Check if an action was just pressed this frame
    pub fn action_just_pressed(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action)
            .is_some_and(|binding| binding.keys().any(|key| keyboard.just_pressed(key)))
    }

    /// Check if an action was just released this frame.
    ///
    /// With two keys bound, releasing one while the other is still down does
    /// not count as releasing the action.
    pub fn action_just_released(&self, action: GameAction, keyboard: &ButtonInput<KeyCode>) -> bool {
        self.get(action).is_some_and(|binding| {
            binding.keys().any(|key| keyboard.just_released(key))
                && !binding.keys().any(|key| keyboard.pressed(key))
        })
    }

    /// Check if a key is already bound to any action (for conflict detection)
    pub fn is_key_bound(&self, key: KeyCode, exclude_action: Option<GameAction>) -> Option<GameAction> {
        self.bindings
            .iter()
            .filter(|(action, _)| Some(**action) != exclude_action)
            .find(|(_, binding)| binding.matches(key))
            .map(|(action, _)| *action)
    }

    /// Get a human-readable string for a key
    pub fn key_name(key: KeyCode) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(code, _, _)| *code == key)
            .map(|(_, _, label)| *label)
            .unwrap_or("???")
    }

    /// Get display string for a binding
    pub fn binding_display(&self, action: GameAction) -> String {
        if let Some(binding) = self.get(action) {
            let primary = Self::key_name(binding.primary);
            if let Some(secondary) = binding.secondary {
                format!("{} / {}", primary, Self::key_name(secondary))
            } else {
                primary.to_string()
            }
        } else {
            "Unbound".to_string()
        }
    }
}
