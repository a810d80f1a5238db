//! Match entities: players, teams, the ball
//!
//! Plain value/aggregate types. Teams are validated once at construction
//! (non-empty roster, unique names, finite positions); after that the
//! simulator and set-piece manager mutate player positions in place.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::decision::DecisionSource;
use crate::error::{Result, SimError};
use crate::geometry::Position;

/// Default interception skill for players built without one
pub const DEFAULT_INTERCEPTION_SKILL: f64 = 0.5;

/// Kickoff spot on a 105 x 68 pitch
pub const CENTER_SPOT: Position = Position::new(52.5, 34.0);

// ============================================================================
// Role
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MF")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Role {
    pub const fn code(self) -> &'static str {
        match self {
            Role::Goalkeeper => "GK",
            Role::Defender => "DEF",
            Role::Midfielder => "MF",
            Role::Forward => "FWD",
        }
    }

    pub const fn is_goalkeeper(self) -> bool {
        matches!(self, Role::Goalkeeper)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Role {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GK" | "GOALKEEPER" => Ok(Role::Goalkeeper),
            "DEF" | "DEFENDER" => Ok(Role::Defender),
            "MF" | "MIDFIELDER" => Ok(Role::Midfielder),
            "FWD" | "FORWARD" => Ok(Role::Forward),
            _ => Err(SimError::UnknownRole(s.to_string())),
        }
    }
}

// ============================================================================
// Player
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub role: Role,
    /// Nominally 0-1. Carried as metadata; interception is decided by distance alone.
    #[serde(default = "default_interception_skill")]
    pub interception_skill: f64,
}

fn default_interception_skill() -> f64 {
    DEFAULT_INTERCEPTION_SKILL
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, role: Role) -> Self {
        Self {
            name: name.into(),
            position,
            role,
            interception_skill: DEFAULT_INTERCEPTION_SKILL,
        }
    }

    pub fn with_interception_skill(mut self, skill: f64) -> Self {
        self.interception_skill = skill;
        self
    }
}

// ============================================================================
// Team
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    name: String,
    players: Vec<Player>,
}

impl Team {
    /// Build a team, rejecting empty rosters, duplicate names and
    /// non-finite positions. Roster order is kept as given.
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Result<Self> {
        let name = name.into();
        if players.is_empty() {
            return Err(SimError::EmptyRoster { team: name });
        }

        {
            let mut seen = HashSet::with_capacity(players.len());
            for player in &players {
                if !seen.insert(player.name.as_str()) {
                    return Err(SimError::DuplicatePlayer {
                        team: name.clone(),
                        player: player.name.clone(),
                    });
                }
                if !player.position.is_finite() {
                    return Err(SimError::NonFinitePosition {
                        context: format!("player {} of {}", player.name, name),
                    });
                }
            }
        }

        Ok(Self { name, players })
    }

    /// Sample squad: goalkeeper first, then four defenders, three midfielders
    /// and forwards for the rest. Outfield spots are drawn from `decisions`,
    /// mirrored for the away side.
    pub fn sample<D: DecisionSource + ?Sized>(
        name: impl Into<String>,
        side: TeamSide,
        num_players: usize,
        decisions: &mut D,
    ) -> Result<Self> {
        let name = name.into();
        if num_players == 0 {
            return Err(SimError::EmptyRoster { team: name });
        }

        let is_home = side == TeamSide::Home;
        let mut players = Vec::with_capacity(num_players);
        players.push(Player::new(
            format!("{name}_GK"),
            Position::new(if is_home { 5.0 } else { 100.0 }, 34.0),
            Role::Goalkeeper,
        ));

        for i in 0..num_players - 1 {
            let (role, home_x, away_x) = match i {
                0..=3 => (Role::Defender, (15.0, 30.0), (75.0, 90.0)),
                4..=6 => (Role::Midfielder, (35.0, 50.0), (55.0, 70.0)),
                _ => (Role::Forward, (55.0, 70.0), (35.0, 50.0)),
            };
            let (lo, hi) = if is_home { home_x } else { away_x };
            let x = decisions.uniform(lo, hi);
            let y = decisions.uniform(10.0, 58.0);
            let skill = decisions.uniform(0.3, 0.8);

            players.push(
                Player::new(format!("{name}_P{}", i + 1), Position::new(x, y), role)
                    .with_interception_skill(skill),
            );
        }

        Self::new(name, players)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roster in tie-break order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Mutable roster. A slice, so the squad size cannot change.
    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn goalkeeper(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.role.is_goalkeeper())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false for a constructed team
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Deserialisation goes through `Team::new` so file-loaded squads get the same checks.
impl<'de> Deserialize<'de> for Team {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawTeam {
            name: String,
            players: Vec<Player>,
        }

        let raw = RawTeam::deserialize(deserializer)?;
        Team::new(raw.name, raw.players).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TeamSide / Ball
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Position,
}

impl Default for Ball {
    fn default() -> Self {
        Self { position: CENTER_SPOT }
    }
}
