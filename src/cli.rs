//! Command-line interface for FightSim
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

/// Two-fighter arena brawler
#[derive(Parser, Debug)]
#[command(name = "fightsim")]
#[command(about = "Two-fighter arena brawler: Player 1 against an AI enemy")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Output path for match log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Random seed for the enemy AI (headless mode only)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print per-event simulation logs (headless mode only)
    #[arg(long, short)]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphical_by_default() {
        let args = Args::parse_from(["fightsim"]);
        assert!(args.headless.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_headless_flags() {
        let args = Args::parse_from([
            "fightsim",
            "--headless",
            "match.json",
            "--output",
            "out.json",
            "--seed",
            "42",
            "-v",
        ]);
        assert_eq!(args.headless, Some(PathBuf::from("match.json")));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.seed, Some(42));
        assert!(args.verbose);
    }
}
