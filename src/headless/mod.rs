//! Headless mode for automated testing
//!
//! Runs a match with no window or rendering. Player 1 follows a scripted
//! input sequence; the enemy AI runs as usual, optionally from a fixed seed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --headless match_config.json --seed 42
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "random_seed": 42,
//!   "max_duration_secs": 90,
//!   "player_script": [
//!     { "tick": 0, "press": "MoveRight" },
//!     { "tick": 120, "press": "Attack" },
//!     { "tick": 121, "release": "Attack" }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{HeadlessMatchConfig, ScriptAction, ScriptStep};
pub use runner::{run_headless_match, FighterResult, MatchResult};
