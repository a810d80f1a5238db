//! # Simulation Configuration
//!
//! Pitch dimensions, set-piece spots and the interception radius in one place.
//! Defaults reproduce the standard 105 x 68 pitch with a 2 m passing-lane radius.
//!
//! ```rust
//! use match_core::config::SimConfig;
//!
//! let config = SimConfig::default();
//! assert_eq!(config.interception_radius, 2.0);
//! let tight = SimConfig::tight_marking();
//! assert!(tight.interception_radius > config.interception_radius);
//! ```

use serde::{Deserialize, Serialize};

use crate::entity::CENTER_SPOT;
use crate::error::{Result, SimError};
use crate::geometry::Position;

/// Pitch size in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchConfig {
    /// Goal line to goal line
    pub length: f64,
    /// Touchline to touchline
    pub width: f64,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self { length: 105.0, width: 68.0 }
    }
}

/// Axis-aligned region players are scrambled into for a corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxRegion {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl BoxRegion {
    pub fn contains(&self, pos: Position) -> bool {
        (self.x_min..=self.x_max).contains(&pos.x) && (self.y_min..=self.y_max).contains(&pos.y)
    }
}

impl Default for BoxRegion {
    fn default() -> Self {
        Self { x_min: 95.0, x_max: 104.0, y_min: 20.0, y_max: 48.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Max distance from the pass lane at which a defender blocks it (strict `<`)
    pub interception_radius: f64,
    pub pitch: PitchConfig,
    /// Ball position after `reset()`
    pub kickoff_spot: Position,
    pub goal_kick_spot: Position,
    /// Defending goalkeeper's spot for a corner
    pub keeper_goal_line_spot: Position,
    pub corner_box: BoxRegion,
    /// Past the attacking goal line, a roll above this gives a corner, otherwise a goal kick
    pub corner_chance_threshold: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            interception_radius: 2.0,
            pitch: PitchConfig::default(),
            kickoff_spot: CENTER_SPOT,
            goal_kick_spot: Position::new(5.0, 34.0),
            keeper_goal_line_spot: Position::new(104.0, 34.0),
            corner_box: BoxRegion::default(),
            corner_chance_threshold: 0.5,
        }
    }
}

impl SimConfig {
    /// Wider passing lanes: defenders reach 3 m either side
    pub fn tight_marking() -> Self {
        Self { interception_radius: 3.0, ..Self::default() }
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let radius = self.interception_radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "interception_radius must be positive, got {radius}"
            )));
        }

        let PitchConfig { length, width } = self.pitch;
        if !(length.is_finite() && width.is_finite() && length > 0.0 && width > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "pitch must be positive, got {length} x {width}"
            )));
        }

        let b = self.corner_box;
        let finite = [b.x_min, b.x_max, b.y_min, b.y_max].iter().all(|v| v.is_finite());
        if !finite || b.x_min > b.x_max || b.y_min > b.y_max {
            return Err(SimError::InvalidConfig(format!("corner_box is not a region: {b:?}")));
        }

        for (label, spot) in [
            ("kickoff_spot", self.kickoff_spot),
            ("goal_kick_spot", self.goal_kick_spot),
            ("keeper_goal_line_spot", self.keeper_goal_line_spot),
        ] {
            if !spot.is_finite() {
                return Err(SimError::InvalidConfig(format!("{label} is not finite")));
            }
        }

        if !(0.0..=1.0).contains(&self.corner_chance_threshold) {
            return Err(SimError::InvalidConfig(format!(
                "corner_chance_threshold must be in [0, 1], got {}",
                self.corner_chance_threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pitch.length, 105.0);
        assert_eq!(config.pitch.width, 68.0);
        assert_eq!(config.kickoff_spot, Position::new(52.5, 34.0));
        assert_eq!(config.goal_kick_spot, Position::new(5.0, 34.0));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SimConfig::from_json_str(r#"{"interception_radius": 1.5}"#).unwrap();
        assert_eq!(config.interception_radius, 1.5);
        assert_eq!(config.corner_box, BoxRegion::default());
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let err = SimConfig::from_json_str(r#"{"interception_radius": 0.0}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_inverted_box() {
        let mut config = SimConfig::default();
        config.corner_box.x_min = 110.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let config = SimConfig { corner_chance_threshold: 1.5, ..SimConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn test_box_contains() {
        let b = BoxRegion::default();
        assert!(b.contains(Position::new(95.0, 20.0)));
        assert!(b.contains(Position::new(104.0, 48.0)));
        assert!(!b.contains(Position::new(94.9, 30.0)));
    }
}
