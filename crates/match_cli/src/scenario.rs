//! Scenario files: two squads, an optional config and a list of steps
//!
//! JSON or YAML, chosen by file extension. Steps keep their action as a
//! plain string so a bad entry is reported and skipped instead of failing
//! the whole file.

use std::fs;
use std::io::{BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{Context, Result};
use match_core::decision::DEFAULT_SEED;
use match_core::{Event, MatchSimulator, Position, SeededDecisions, SimConfig, Team};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub config: SimConfig,
    pub home: Team,
    pub away: Team,
    /// Ball position before the first step; kickoff spot when absent
    #[serde(default)]
    pub ball: Option<Position>,
    pub steps: Vec<StepSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    pub action: String,
    #[serde(default)]
    pub target: Option<Position>,
}

/// Step the simulator refused, with its index in the scenario
#[derive(Debug, Clone, Serialize)]
pub struct RejectedStep {
    pub index: usize,
    pub action: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub events: Vec<Event>,
    pub rejected: Vec<RejectedStep>,
    pub digest: String,
}

/// One line of batch output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub seed: u64,
    pub events: usize,
    pub rejected: usize,
    pub digest: String,
}

impl Scenario {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Failed to parse scenario JSON")
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("Failed to parse scenario YAML")
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Load a scenario; `.yaml`/`.yml` go through YAML, anything else JSON
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let scenario = if is_yaml {
        Scenario::from_yaml_str(&text)?
    } else {
        Scenario::from_json_str(&text)?
    };

    info!(
        path = %path.display(),
        home = scenario.home.name(),
        away = scenario.away.name(),
        steps = scenario.steps.len(),
        "scenario loaded"
    );
    Ok(scenario)
}

/// Play every step in order on a fresh simulator
pub fn run_scenario(scenario: &Scenario, seed: u64) -> Result<RunReport> {
    let mut sim = MatchSimulator::with_decisions(
        scenario.home.clone(),
        scenario.away.clone(),
        scenario.config.clone(),
        SeededDecisions::new(seed),
    )
    .context("Invalid scenario config")?;

    if let Some(ball) = scenario.ball {
        sim.ball_mut().position = ball;
    }

    let mut rejected = Vec::new();
    for (index, step) in scenario.steps.iter().enumerate() {
        if let Err(err) = sim.simulate_named_step(&step.action, step.target) {
            warn!(index, action = %step.action, error = %err, "step rejected");
            rejected.push(RejectedStep {
                index,
                action: step.action.clone(),
                reason: err.to_string(),
            });
        }
    }

    Ok(RunReport {
        seed: sim.set_piece_manager().decisions().seed(),
        digest: sim.event_log().digest().context("Failed to digest event log")?,
        events: sim.get_training_data().to_vec(),
        rejected,
    })
}

/// One simulator per seed, run in parallel. Output is ordered by seed.
pub fn run_batch(scenario: &Scenario, seeds: RangeInclusive<u64>) -> Result<Vec<BatchEntry>> {
    let seeds: Vec<u64> = seeds.collect();
    seeds
        .par_iter()
        .map(|&seed| -> Result<BatchEntry> {
            let report = run_scenario(scenario, seed)?;
            Ok(BatchEntry {
                seed,
                events: report.events.len(),
                rejected: report.rejected.len(),
                digest: report.digest,
            })
        })
        .collect()
}

/// Events as JSON lines, one event per line
pub fn write_json_lines(path: &Path, events: &[Event]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
    }

    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for event in events {
        serde_json::to_writer(&mut writer, event).context("Failed to serialize event")?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_core::{GameState, StepResult};

    const SCENARIO_JSON: &str = r#"{
        "seed": 11,
        "home": {"name": "Home", "players": [
            {"name": "Attacker", "position": [40.0, 34.0], "role": "FWD"}
        ]},
        "away": {"name": "Away", "players": [
            {"name": "Defender", "position": [52.0, 34.0], "role": "DEF", "interception_skill": 0.8}
        ]},
        "ball": [40.0, 34.0],
        "steps": [
            {"action": "PASS", "target": [45.0, 40.0]},
            {"action": "TACKLE", "target": [45.0, 40.0]},
            {"action": "SHOOT"},
            {"action": "DRIBBLE", "target": [50.0, 75.0]}
        ]
    }"#;

    #[test]
    fn test_run_reports_rejections() {
        let scenario = Scenario::from_json_str(SCENARIO_JSON).unwrap();
        let report = run_scenario(&scenario, scenario.seed()).unwrap();

        assert_eq!(report.seed, 11);
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.events[0].result, Some(StepResult::Success));
        assert_eq!(report.events[1].set_piece, Some(GameState::ThrowIn));

        let indices: Vec<usize> = report.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert!(report.rejected[0].reason.contains("TACKLE"));
    }

    #[test]
    fn test_yaml_and_json_agree() {
        let yaml = r#"
seed: 11
home:
  name: Home
  players:
    - { name: Attacker, position: [40.0, 34.0], role: FWD }
away:
  name: Away
  players:
    - { name: Defender, position: [52.0, 34.0], role: DEF, interception_skill: 0.8 }
ball: [40.0, 34.0]
steps:
  - { action: PASS, target: [45.0, 40.0] }
  - { action: TACKLE, target: [45.0, 40.0] }
  - { action: SHOOT }
  - { action: DRIBBLE, target: [50.0, 75.0] }
"#;
        let from_yaml = Scenario::from_yaml_str(yaml).unwrap();
        let from_json = Scenario::from_json_str(SCENARIO_JSON).unwrap();

        let a = run_scenario(&from_yaml, 3).unwrap();
        let b = run_scenario(&from_json, 3).unwrap();
        assert_eq!(a.digest, b.digest);
    }

    #[test]
    fn test_empty_team_rejected_at_load() {
        let json = r#"{"home": {"name": "H", "players": []},
                       "away": {"name": "A", "players": [{"name": "X", "position": [1.0, 1.0], "role": "GK"}]},
                       "steps": []}"#;
        assert!(Scenario::from_json_str(json).is_err());
    }

    #[test]
    fn test_invalid_config_fails_run() {
        let mut scenario = Scenario::from_json_str(SCENARIO_JSON).unwrap();
        scenario.config.interception_radius = 0.0;
        assert!(run_scenario(&scenario, 1).is_err());
    }

    #[test]
    fn test_batch_is_ordered_and_reproducible() {
        let scenario = Scenario::from_json_str(SCENARIO_JSON).unwrap();
        let first = run_batch(&scenario, 1..=8).unwrap();
        let second = run_batch(&scenario, 1..=8).unwrap();

        assert_eq!(first.len(), 8);
        assert_eq!(first, second);
        let seeds: Vec<u64> = first.iter().map(|e| e.seed).collect();
        assert_eq!(seeds, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_write_and_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let scenario_path = dir.path().join("scenario.json");
        fs::write(&scenario_path, SCENARIO_JSON).unwrap();

        let scenario = load_scenario(&scenario_path).unwrap();
        let report = run_scenario(&scenario, scenario.seed()).unwrap();

        let out = dir.path().join("logs").join("events.jsonl");
        write_json_lines(&out, &report.events).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), report.events.len());
        let first: Event = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, report.events[0]);
    }

    #[test]
    fn test_bundled_yaml_scenario() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/through_ball.yaml");
        let scenario = load_scenario(&path).unwrap();
        let report = run_scenario(&scenario, scenario.seed()).unwrap();

        assert_eq!(report.seed, 42);
        assert!(report.rejected.is_empty());
        assert_eq!(report.events.len(), 5);
        assert!(report.events[..3].iter().all(|e| e.set_piece.is_none()));
        assert!(report.events[3].set_piece.is_some());
        assert_eq!(report.events[4].set_piece, Some(GameState::ThrowIn));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_scenario(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read scenario"));
    }
}
