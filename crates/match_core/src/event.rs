//! Step events and the append-only event log
//!
//! One `Event` per accepted `simulate_step`. The log is the only signal the
//! core produces for the outside world (training-data export and the like),
//! so its JSON shape is kept flat: absent fields are omitted, enum tags are
//! upper snake case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, SimError};
use crate::geometry::Position;
use crate::set_piece::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Pass,
    Shoot,
    Dribble,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Pass => "PASS",
            Action::Shoot => "SHOOT",
            Action::Dribble => "DRIBBLE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" => Ok(Action::Pass),
            "SHOOT" => Ok(Action::Shoot),
            "DRIBBLE" => Ok(Action::Dribble),
            _ => Err(SimError::UnknownAction(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepResult {
    Success,
    Intercepted,
    Shot,
    Dribble,
}

/// Record of one simulated action. Never mutated once logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub action: Action,
    pub ball_pos_before: Position,
    pub possession_before: String,
    /// State at the start of the step
    pub game_state: GameState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<StepResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interceptor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<GameState>,
    pub ball_pos_after: Position,
    pub possession_after: String,
}

impl Event {
    pub fn was_intercepted(&self) -> bool {
        self.result == Some(StepResult::Intercepted)
    }

    pub fn possession_changed(&self) -> bool {
        self.possession_before != self.possession_after
    }
}

// ============================================================================
// EventLog
// ============================================================================

/// Ordered, append-only. Only the simulator appends; readers get slices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: Event) -> &Event {
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// SHA-256 of the JSON lines encoding, hex. Equal logs give equal digests.
    pub fn digest(&self) -> Result<String> {
        let mut hasher = Sha256::new();
        for event in &self.events {
            let line = serde_json::to_vec(event)?;
            hasher.update(&line);
            hasher.update(b"\n");
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass_event(result: StepResult) -> Event {
        Event {
            action: Action::Pass,
            ball_pos_before: Position::new(40.0, 34.0),
            possession_before: "Home".into(),
            game_state: GameState::OpenPlay,
            result: Some(result),
            interceptor: None,
            set_piece: None,
            ball_pos_after: Position::new(45.0, 40.0),
            possession_after: "Home".into(),
        }
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("PASS".parse::<Action>().unwrap(), Action::Pass);
        assert_eq!("shoot".parse::<Action>().unwrap(), Action::Shoot);
        assert_eq!(" Dribble ".parse::<Action>().unwrap(), Action::Dribble);

        let err = "TACKLE".parse::<Action>().unwrap_err();
        assert!(err.is_invalid_action());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(pass_event(StepResult::Success)).unwrap();
        assert_eq!(json["action"], "PASS");
        assert_eq!(json["result"], "SUCCESS");
        assert_eq!(json["game_state"], "OPEN_PLAY");
        assert_eq!(json["ball_pos_after"], serde_json::json!([45.0, 40.0]));
        assert!(json.get("interceptor").is_none());
        assert!(json.get("set_piece").is_none());
    }

    #[test]
    fn test_event_round_trips_with_set_piece() {
        let mut event = pass_event(StepResult::Intercepted);
        event.interceptor = Some("Defender".into());
        event.set_piece = Some(GameState::ThrowIn);

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""set_piece":"THROW_IN""#));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert!(back.was_intercepted());
    }

    #[test]
    fn test_log_digest_tracks_content() {
        let mut a = EventLog::new();
        let mut b = EventLog::new();
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());

        a.push(pass_event(StepResult::Success));
        b.push(pass_event(StepResult::Success));
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
        assert_eq!(a.digest().unwrap().len(), 64);

        b.push(pass_event(StepResult::Dribble));
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());

        // Matches the hash of the JSON lines a writer would produce
        let mut lines = Vec::new();
        for event in &a {
            lines.extend(serde_json::to_vec(event).unwrap());
            lines.push(b'\n');
        }
        assert_eq!(a.digest().unwrap(), format!("{:x}", Sha256::digest(&lines)));
    }

    #[test]
    fn test_log_clear_and_iter() {
        let mut log = EventLog::new();
        log.push(pass_event(StepResult::Success));
        log.push(pass_event(StepResult::Shot));
        assert_eq!(log.len(), 2);
        assert_eq!((&log).into_iter().count(), 2);
        assert_eq!(log.last().and_then(|e| e.result), Some(StepResult::Shot));

        log.clear();
        assert!(log.is_empty());
    }
}
