//! # match_core - Deterministic Match-Action Simulation
//!
//! Advances a football match one discrete action at a time:
//! - line-of-sight pass interception against the defending roster
//! - boundary classification and set-piece restarts (corner, goal kick, throw-in)
//! - an append-only event log, the only output of the core
//!
//! Same seed + same sequence of steps = same event log.
//!
//! ```rust
//! use match_core::{Action, MatchSimulator, Player, Position, Role, Team};
//!
//! let home = Team::new("Home", vec![Player::new("Nine", Position::new(40.0, 34.0), Role::Forward)])?;
//! let away = Team::new("Away", vec![Player::new("Five", Position::new(52.0, 34.0), Role::Defender)])?;
//!
//! let mut sim = MatchSimulator::with_seed(home, away, 42);
//! sim.ball_mut().position = Position::new(40.0, 34.0);
//! let event = sim.simulate_step(Action::Pass, Some(Position::new(70.0, 34.0)))?;
//! assert_eq!(event.interceptor.as_deref(), Some("Five"));
//! # Ok::<(), match_core::SimError>(())
//! ```

pub mod config;
pub mod decision;
pub mod entity;
pub mod error;
pub mod event;
pub mod geometry;
pub mod set_piece;
pub mod simulator;

pub use config::SimConfig;
pub use decision::{DecisionSource, ScriptedDecisions, SeededDecisions};
pub use entity::{Ball, Player, Role, Team, TeamSide};
pub use error::{Result, SimError};
pub use event::{Action, Event, EventLog, StepResult};
pub use geometry::{check_interception, distance_point_to_segment, Position};
pub use set_piece::{GameState, SetPieceManager};
pub use simulator::MatchSimulator;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_semver() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.parse::<u32>().is_ok()));
    }
}
