use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Action {action} requires a target position")]
    MissingTarget { action: String },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Team {team} has no players")]
    EmptyRoster { team: String },

    #[error("Team {team} lists player {player} more than once")]
    DuplicatePlayer { team: String, player: String },

    #[error("Non-finite position: {context}")]
    NonFinitePosition { context: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Missing target or unrecognised action kind.
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, SimError::MissingTarget { .. } | SimError::UnknownAction(_))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
