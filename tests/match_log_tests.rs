//! Integration tests for the match log
//!
//! These tests verify that the MatchLog correctly:
//! - Aggregates damage dealt and taken per fighter
//! - Filters entries by type
//! - Records combat events forwarded from the match loop
//! - Writes a JSON report to disk

use bevy::prelude::*;
use regex::Regex;

use fightsim::combat::events::{AttackLandedEvent, HealthChangedEvent, MatchEndedEvent, TimerChangedEvent};
use fightsim::combat::log::{
    default_log_path, FighterMetadata, MatchLog, MatchLogEventType, MatchMetadata,
};
use fightsim::combat::record_match_log;
use fightsim::states::play_match::{EndReason, FighterSide, MatchOutcome, MatchState};

fn fighter_metadata(name: &str, final_health: u32) -> FighterMetadata {
    FighterMetadata {
        name: name.to_string(),
        final_health,
        damage_dealt: 100 - final_health,
        damage_taken: 100 - final_health,
        final_position: (120.0, 330.0),
    }
}

// =============================================================================
// Damage Aggregation Tests
// =============================================================================

#[test]
fn test_empty_log_has_no_damage() {
    let log = MatchLog::default();
    assert_eq!(log.total_damage_dealt(FighterSide::Player), 0);
    assert_eq!(log.total_damage_taken(FighterSide::Enemy), 0);
    assert_eq!(log.hits_landed(FighterSide::Player), 0);
}

#[test]
fn test_damage_totals_by_side() {
    let mut log = MatchLog::default();
    log.log_hit(FighterSide::Player, FighterSide::Enemy, 10);
    log.log_hit(FighterSide::Player, FighterSide::Enemy, 10);
    log.log_hit(FighterSide::Enemy, FighterSide::Player, 10);
    log.log(MatchLogEventType::Timer, "59s remaining".to_string());

    assert_eq!(log.total_damage_dealt(FighterSide::Player), 20);
    assert_eq!(log.total_damage_taken(FighterSide::Enemy), 20);
    assert_eq!(log.total_damage_dealt(FighterSide::Enemy), 10);
    assert_eq!(log.total_damage_taken(FighterSide::Player), 10);
    assert_eq!(log.hits_landed(FighterSide::Player), 2);
    assert_eq!(log.filter_by_type(MatchLogEventType::Hit).len(), 3);
    assert_eq!(log.filter_by_type(MatchLogEventType::Timer).len(), 1);
}

#[test]
fn test_recent_returns_newest_in_order() {
    let mut log = MatchLog::default();
    for second in (57..60).rev() {
        log.log(MatchLogEventType::Timer, format!("{}s remaining", second));
    }

    let recent: Vec<_> = log.recent(2).iter().map(|e| e.message.clone()).collect();
    assert_eq!(recent, vec!["58s remaining", "57s remaining"]);
}

#[test]
fn test_clear_resets_entries_and_time() {
    let mut log = MatchLog::default();
    log.match_time = 12.5;
    log.log_hit(FighterSide::Enemy, FighterSide::Player, 10);
    log.clear();
    assert!(log.entries.is_empty());
    assert_eq!(log.match_time, 0.0);
}

// =============================================================================
// Event Recording
// =============================================================================

#[test]
fn test_forwarded_events_are_recorded() {
    let mut app = App::new();
    app.add_event::<AttackLandedEvent>()
        .add_event::<HealthChangedEvent>()
        .add_event::<TimerChangedEvent>()
        .add_event::<MatchEndedEvent>()
        .init_resource::<MatchLog>()
        .init_resource::<MatchState>()
        .add_systems(Update, record_match_log);

    app.world_mut().send_event(AttackLandedEvent {
        attacker: FighterSide::Enemy,
        defender: FighterSide::Player,
        damage: 10,
    });
    app.world_mut().send_event(HealthChangedEvent {
        side: FighterSide::Player,
        percent: 0,
    });
    app.world_mut().send_event(TimerChangedEvent { remaining: 41 });
    app.world_mut().send_event(MatchEndedEvent {
        outcome: MatchOutcome::EnemyWins,
        reason: EndReason::Knockout,
    });
    app.update();

    let log = app.world().resource::<MatchLog>();
    assert_eq!(log.total_damage_dealt(FighterSide::Enemy), 10);
    assert_eq!(log.filter_by_type(MatchLogEventType::Death).len(), 1);
    assert_eq!(log.filter_by_type(MatchLogEventType::Timer).len(), 1);

    let ending = log.filter_by_type(MatchLogEventType::MatchEvent);
    assert_eq!(ending.len(), 1);
    assert!(ending[0].message.starts_with("Enemy Wins"));
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn test_save_to_custom_path_creates_directories() {
    let mut log = MatchLog::default();
    log.log(MatchLogEventType::MatchEvent, "Match started!".to_string());
    log.match_time = 3.0;
    log.log_hit(FighterSide::Player, FighterSide::Enemy, 10);

    let metadata = MatchMetadata {
        result: MatchOutcome::PlayerWins.message().to_string(),
        match_time: 3.0,
        random_seed: Some(9),
        player: fighter_metadata("Player 1", 100),
        enemy: fighter_metadata("Enemy", 90),
    };

    let path = std::env::temp_dir()
        .join(format!("fightsim_log_test_{}", std::process::id()))
        .join("nested")
        .join("report.json");
    let _ = std::fs::remove_file(&path);

    let written = log
        .save_to_file(&metadata, Some(path.to_str().unwrap()))
        .unwrap();
    assert_eq!(written, path.to_str().unwrap());

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(report["metadata"]["result"], "Player 1 Wins");
    assert_eq!(report["metadata"]["random_seed"], 9);
    assert_eq!(report["metadata"]["enemy"]["final_health"], 90);

    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["event_type"], "Hit");
    assert_eq!(entries[1]["hit"]["damage"], 10);
    assert_eq!(entries[1]["timestamp"], 3.0);
    assert!(entries[0].get("hit").is_none());
}

#[test]
fn test_default_log_path_format() {
    let pattern = Regex::new(r"^match_logs/match_\d+\.json$").unwrap();
    assert!(pattern.is_match(&default_log_path(1_700_000_000)));
    assert!(pattern.is_match(&default_log_path(0)));
}
