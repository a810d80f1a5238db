//! Pitch geometry and pass-lane interception
//!
//! Field coordinates are meters with the origin at a goal-line corner:
//! - X: 0 = own goal line, 105 = attacking goal line (LENGTH direction)
//! - Y: 0 = touchline, 68 = touchline (WIDTH direction)
//!
//! Everything here is pure. Inputs are assumed finite; callers validate
//! coordinates where they enter the simulation (team construction, step
//! invocation), not here.

use serde::{Deserialize, Serialize};

use crate::entity::Player;

/// Position in meters. Copied on assignment, never aliased.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in meters
    pub fn distance_to(&self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [f64; 2] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y]
    }
}

/// Shortest distance from `p` to the segment `[a, b]`.
///
/// Projects `p - a` onto `b - a`, clamps the projection to the segment and
/// measures to the closest point. A zero-length segment degrades to the
/// point distance `|p - a|`.
pub fn distance_point_to_segment(p: Position, a: Position, b: Position) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (p.x - a.x, p.y - a.y);

    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }

    let t = ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0);
    let closest = Position::new(a.x + t * abx, a.y + t * aby);

    p.distance_to(closest)
}

/// First defender (roster order) whose distance to the pass lane is strictly
/// below `interception_radius`.
///
/// No tie-break between several qualifying defenders and no skill roll:
/// the first one in `defenders` wins. An empty roster never intercepts.
pub fn check_interception(
    pass_start: Position,
    pass_end: Position,
    defenders: &[Player],
    interception_radius: f64,
) -> Option<&Player> {
    defenders.iter().find(|defender| {
        distance_point_to_segment(defender.position, pass_start, pass_end) < interception_radius
    })
}
