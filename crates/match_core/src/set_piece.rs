//! Boundary classification and set-piece restarts (corners, goal kicks, throw-ins)
//!
//! `SetPieceManager` is a classifier plus a repositioning function. It holds
//! the current `GameState` for readers, but only the simulator moves it.
//!
//! Randomness (corner vs goal kick past the attacking goal line, corner side,
//! scramble spots) comes from the injected `DecisionSource`, so every branch
//! can be forced in tests.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BoxRegion, PitchConfig, SimConfig};
use crate::decision::{DecisionSource, SeededDecisions};
use crate::entity::Team;
use crate::geometry::Position;

// ============================================================================
// GameState / Boundary
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    OpenPlay,
    Corner,
    GoalKick,
    ThrowIn,
}

impl GameState {
    pub const fn is_stoppage(self) -> bool {
        !matches!(self, GameState::OpenPlay)
    }
}

/// Where the ball sits relative to the pitch lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// On or inside all four lines
    InPlay,
    /// `x > length`
    BeyondAttackingGoalLine,
    /// `x < 0`
    BeyondOwnGoalLine,
    /// Off a touchline (`y` outside `[0, width]`)
    Touchline,
}

/// Pure classification of a ball position. Lines are in play.
pub fn classify_boundary(pitch: &PitchConfig, x: f64, y: f64) -> Boundary {
    if (0.0..=pitch.length).contains(&x) && (0.0..=pitch.width).contains(&y) {
        Boundary::InPlay
    } else if x > pitch.length {
        Boundary::BeyondAttackingGoalLine
    } else if x < 0.0 {
        Boundary::BeyondOwnGoalLine
    } else {
        Boundary::Touchline
    }
}

// ============================================================================
// SetPieceManager
// ============================================================================

#[derive(Debug, Clone)]
pub struct SetPieceManager<D = SeededDecisions> {
    game_state: GameState,
    pitch: PitchConfig,
    corner_box: BoxRegion,
    goal_kick_spot: Position,
    keeper_goal_line_spot: Position,
    corner_chance_threshold: f64,
    decisions: D,
}

impl<D: DecisionSource> SetPieceManager<D> {
    pub fn new(config: &SimConfig, decisions: D) -> Self {
        Self {
            game_state: GameState::OpenPlay,
            pitch: config.pitch,
            corner_box: config.corner_box,
            goal_kick_spot: config.goal_kick_spot,
            keeper_goal_line_spot: config.keeper_goal_line_spot,
            corner_chance_threshold: config.corner_chance_threshold,
            decisions,
        }
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub(crate) fn set_game_state(&mut self, state: GameState) {
        self.game_state = state;
    }

    pub fn decisions(&self) -> &D {
        &self.decisions
    }

    pub(crate) fn decisions_mut(&mut self) -> &mut D {
        &mut self.decisions
    }

    /// State the ball position calls for.
    ///
    /// Past the attacking goal line the corner/goal-kick call is a roll against
    /// `corner_chance_threshold` (50/50 by default); nothing records who touched
    /// the ball last. Every other branch is a pure function of `(x, y)`.
    pub fn check_boundaries(&mut self, x: f64, y: f64) -> GameState {
        match classify_boundary(&self.pitch, x, y) {
            Boundary::InPlay => GameState::OpenPlay,
            Boundary::BeyondAttackingGoalLine => {
                if self.decisions.next_unit() > self.corner_chance_threshold {
                    GameState::Corner
                } else {
                    GameState::GoalKick
                }
            }
            Boundary::BeyondOwnGoalLine => GameState::Corner,
            Boundary::Touchline => GameState::ThrowIn,
        }
    }

    /// Reposition players for a restart and return the new ball position.
    ///
    /// `None` means the ball stays where it is (throw-ins and open play have
    /// no repositioning).
    pub fn resolve_set_piece(
        &mut self,
        state: GameState,
        attacking_team: &mut Team,
        defending_team: &mut Team,
    ) -> Option<Position> {
        match state {
            GameState::Corner => Some(self.setup_corner(attacking_team, defending_team)),
            GameState::GoalKick => {
                // Formation reset is not modelled; only the ball moves
                debug!(spot = ?self.goal_kick_spot, "goal kick reset");
                Some(self.goal_kick_spot)
            }
            GameState::ThrowIn | GameState::OpenPlay => None,
        }
    }

    /// Restart where one side both takes and defends it: a pass intercepted
    /// over the line leaves the interceptors on both sides of the corner.
    ///
    /// Rolls are drawn in the same order as `resolve_set_piece`: the team's
    /// outfielders are scrambled as attackers, then again as defenders, and
    /// its keeper goes to the goal line. The other side is untouched.
    pub fn resolve_set_piece_single_side(
        &mut self,
        state: GameState,
        team: &mut Team,
    ) -> Option<Position> {
        match state {
            GameState::Corner => {
                let ball = self.corner_spot();
                debug!(team = team.name(), ?ball, "setting up corner kick against own side");
                self.scramble_attackers(team);
                self.scramble_defenders(team);
                Some(ball)
            }
            GameState::GoalKick => Some(self.goal_kick_spot),
            GameState::ThrowIn | GameState::OpenPlay => None,
        }
    }

    fn setup_corner(&mut self, attacking_team: &mut Team, defending_team: &mut Team) -> Position {
        let ball = self.corner_spot();

        debug!(
            attacking = attacking_team.name(),
            defending = defending_team.name(),
            ?ball,
            "setting up corner kick"
        );

        self.scramble_attackers(attacking_team);
        self.scramble_defenders(defending_team);
        ball
    }

    fn corner_spot(&mut self) -> Position {
        let side = if self.decisions.next_unit() < 0.5 { 0.0 } else { self.pitch.width };
        Position::new(self.pitch.length, side)
    }

    // Goalmouth scramble: everyone but the keepers piles into the box
    fn scramble_attackers(&mut self, team: &mut Team) {
        for player in team.players_mut() {
            if !player.role.is_goalkeeper() {
                player.position = self.scramble_spot();
            }
        }
    }

    fn scramble_defenders(&mut self, team: &mut Team) {
        for player in team.players_mut() {
            player.position = if player.role.is_goalkeeper() {
                self.keeper_goal_line_spot
            } else {
                self.scramble_spot()
            };
        }
    }

    fn scramble_spot(&mut self) -> Position {
        let b = self.corner_box;
        let x = self.decisions.uniform(b.x_min, b.x_max);
        let y = self.decisions.uniform(b.y_min, b.y_max);
        Position::new(x, y)
    }
}
