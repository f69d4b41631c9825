//! FightSim - two-fighter arena brawler
//!
//! Player 1 fights an AI-controlled enemy on a bounded stage with gravity,
//! timed melee attacks and a 60 second match timer.
//!
//! This library exposes the core game modules for testing and reuse.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod keybindings;
pub mod settings;
pub mod states;
pub mod ui;

// Re-export commonly used types
pub use combat::log::{MatchLog, MatchLogEventType};
pub use headless::{HeadlessMatchConfig, MatchResult};
pub use states::play_match::{Fighter, FighterSide, MatchOutcome, MatchState, PlayerInput};
