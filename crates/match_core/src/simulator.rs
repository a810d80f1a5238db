//! MatchSimulator - one discrete action per step
//!
//! Step pipeline:
//! 1. validate the request (target present and finite, ball finite)
//! 2. snapshot pre-state
//! 3. resolve the action (pass interception / shot / dribble)
//! 4. boundary check and set-piece restart
//! 5. append the event to the log
//!
//! A rejected step returns an error and leaves the match exactly as it was:
//! no ball movement, no possession change, nothing logged.

use tracing::{debug, info};

use crate::config::SimConfig;
use crate::decision::{DecisionSource, SeededDecisions, DEFAULT_SEED};
use crate::entity::{Ball, Team, TeamSide};
use crate::error::{Result, SimError};
use crate::event::{Action, Event, EventLog, StepResult};
use crate::geometry::{check_interception, Position};
use crate::set_piece::{GameState, SetPieceManager};

/// Deterministic match-action simulator.
///
/// Owns both teams, the ball, possession, the set-piece manager and the
/// event log. Not meant to be shared: run one simulator per match.
#[derive(Debug, Clone)]
pub struct MatchSimulator<D = SeededDecisions> {
    home_team: Team,
    away_team: Team,
    ball: Ball,
    possession: TeamSide,
    set_pieces: SetPieceManager<D>,
    events: EventLog,
    config: SimConfig,
}

impl MatchSimulator<SeededDecisions> {
    /// Default config and seed
    pub fn new(home_team: Team, away_team: Team) -> Self {
        Self::with_seed(home_team, away_team, DEFAULT_SEED)
    }

    pub fn with_seed(home_team: Team, away_team: Team, seed: u64) -> Self {
        Self::build(home_team, away_team, SimConfig::default(), SeededDecisions::new(seed))
    }
}

impl<D: DecisionSource> MatchSimulator<D> {
    /// Custom config and decision source. The config is validated here.
    pub fn with_decisions(
        home_team: Team,
        away_team: Team,
        config: SimConfig,
        decisions: D,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(home_team, away_team, config, decisions))
    }

    fn build(home_team: Team, away_team: Team, config: SimConfig, decisions: D) -> Self {
        Self {
            home_team,
            away_team,
            ball: Ball { position: config.kickoff_spot },
            possession: TeamSide::Home,
            set_pieces: SetPieceManager::new(&config, decisions),
            events: EventLog::new(),
            config,
        }
    }

    // ===========================================
    // Step
    // ===========================================

    /// Run one action and log it.
    ///
    /// Every action here needs a target; a missing or non-finite one is
    /// rejected with the match state untouched.
    pub fn simulate_step(&mut self, action: Action, target: Option<Position>) -> Result<&Event> {
        let target = target.ok_or_else(|| SimError::MissingTarget { action: action.to_string() })?;
        if !target.is_finite() {
            return Err(SimError::NonFinitePosition { context: format!("{action} target") });
        }
        if !self.ball.position.is_finite() {
            return Err(SimError::NonFinitePosition { context: "ball".to_string() });
        }

        let ball_pos_before = self.ball.position;
        let possession_before = self.possession_team().name().to_string();
        let state_before = self.set_pieces.game_state();
        let defending = self.possession.opponent();

        let mut interceptor = None;
        let result = match action {
            Action::Pass => {
                let hit = check_interception(
                    self.ball.position,
                    target,
                    self.team(defending).players(),
                    self.config.interception_radius,
                )
                .map(|p| (p.name.clone(), p.position));

                match hit {
                    Some((name, position)) => {
                        info!(interceptor = %name, ?position, "pass intercepted");
                        self.possession = defending;
                        self.ball.position = position;
                        interceptor = Some(name);
                        StepResult::Intercepted
                    }
                    None => {
                        self.ball.position = target;
                        StepResult::Success
                    }
                }
            }
            // Shots skip the passing-lane check
            Action::Shoot => {
                self.ball.position = target;
                StepResult::Shot
            }
            Action::Dribble => {
                self.ball.position = target;
                StepResult::Dribble
            }
        };

        let set_piece = self.apply_boundaries(defending);

        let event = Event {
            action,
            ball_pos_before,
            possession_before,
            game_state: state_before,
            result: Some(result),
            interceptor,
            set_piece,
            ball_pos_after: self.ball.position,
            possession_after: self.possession_team().name().to_string(),
        };

        debug!(
            step = self.events.len(),
            %action,
            ?result,
            ?set_piece,
            ball = ?event.ball_pos_after,
            "step simulated"
        );

        Ok(self.events.push(event))
    }

    /// Parse the action name first; unknown names are rejected like missing targets.
    pub fn simulate_named_step(&mut self, action: &str, target: Option<Position>) -> Result<&Event> {
        let action: Action = action.parse()?;
        self.simulate_step(action, target)
    }

    /// Boundary check on the current ball position. A stoppage repositions
    /// the side now in possession against `defending`, the side that was
    /// defending when the step began. After an interception both are the
    /// intercepting side.
    fn apply_boundaries(&mut self, defending: TeamSide) -> Option<GameState> {
        let Position { x, y } = self.ball.position;
        let state = self.set_pieces.check_boundaries(x, y);

        if !state.is_stoppage() {
            self.set_pieces.set_game_state(GameState::OpenPlay);
            return None;
        }

        let restart = if self.possession == defending {
            let team = match defending {
                TeamSide::Home => &mut self.home_team,
                TeamSide::Away => &mut self.away_team,
            };
            self.set_pieces.resolve_set_piece_single_side(state, team)
        } else {
            let (attacking, defending) = match self.possession {
                TeamSide::Home => (&mut self.home_team, &mut self.away_team),
                TeamSide::Away => (&mut self.away_team, &mut self.home_team),
            };
            self.set_pieces.resolve_set_piece(state, attacking, defending)
        };
        if let Some(restart) = restart {
            self.ball.position = restart;
        }
        self.set_pieces.set_game_state(state);

        debug!(?state, ball = ?self.ball.position, "stoppage");
        Some(state)
    }

    // ===========================================
    // Lifecycle
    // ===========================================

    /// Ball to the kickoff spot, possession to home, open play, empty log.
    ///
    /// Player positions and the decision stream carry on from where they were.
    pub fn reset(&mut self) {
        self.ball = Ball { position: self.config.kickoff_spot };
        self.possession = TeamSide::Home;
        self.set_pieces.set_game_state(GameState::OpenPlay);
        self.events.clear();
        info!(home = self.home_team.name(), away = self.away_team.name(), "match reset");
    }

    /// Full event log, oldest first
    pub fn get_training_data(&self) -> &[Event] {
        self.events.as_slice()
    }

    pub fn event_log(&self) -> &EventLog {
        &self.events
    }

    // ===========================================
    // Accessors
    // ===========================================

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// For staging scenarios before a step
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn possession(&self) -> TeamSide {
        self.possession
    }

    pub fn possession_team(&self) -> &Team {
        self.team(self.possession)
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home_team,
            TeamSide::Away => &self.away_team,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home_team,
            TeamSide::Away => &mut self.away_team,
        }
    }

    pub fn home_team(&self) -> &Team {
        &self.home_team
    }

    pub fn away_team(&self) -> &Team {
        &self.away_team
    }

    pub fn game_state(&self) -> GameState {
        self.set_pieces.game_state()
    }

    pub fn set_piece_manager(&self) -> &SetPieceManager<D> {
        &self.set_pieces
    }

    pub fn decisions_mut(&mut self) -> &mut D {
        self.set_pieces.decisions_mut()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Hand the teams back (home, away)
    pub fn into_teams(self) -> (Team, Team) {
        (self.home_team, self.away_team)
    }
}
