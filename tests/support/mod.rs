// Shared stage builders and drivers for the integration tests.
#![allow(dead_code)]

use arena_sim::domain::tuning::session::SessionConfig;
use arena_sim::frameworks::config::parse_session_config;
use arena_sim::interface_adapters::physics::ArcadePhysics;
use arena_sim::use_cases::{Session, WorldUpdate};
use std::time::Duration;

// Fixed step used by the deterministic session tests.
pub const DT: Duration = Duration::from_millis(10);

// Flat stage: one player standing at x=200 on a floor whose top is y=400.
// `hazards` and `monsters` are raw JSON arrays spliced into the layout.
pub fn floor_stage(hazards: &str, monsters: &str) -> SessionConfig {
    let text = format!(
        r#"{{
            "players": [ {{ "respawn_x": 200.0, "respawn_y": 400.0 }} ],
            "obstacles": [ {{ "x": 400.0, "y": 424.0, "width": 800.0, "height": 24.0 }} ],
            "hazards": {hazards},
            "monsters": {monsters},
            "collectibles": []
        }}"#
    );
    parse_session_config(&text).expect("stage layout should be valid")
}

// Builds a session driven by the reference physics.
pub fn session(config: &SessionConfig) -> (Session, ArcadePhysics) {
    let session = Session::new(config, DT).expect("session should build");
    (session, ArcadePhysics::new())
}

// Runs `ticks` steps and returns every update in order.
pub fn run_ticks(
    session: &mut Session,
    physics: &mut ArcadePhysics,
    ticks: usize,
) -> Vec<WorldUpdate> {
    (0..ticks).map(|_| session.tick(physics)).collect()
}

// Parses the JSON lines written by the stdio adapter.
pub fn parse_lines(out: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(out)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each output line should be JSON"))
        .collect()
}
