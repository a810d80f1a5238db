//! Walkthrough scenarios: interception, set pieces, a short tactical move
//! and segment-distance checks. Each narrates through `tracing` and hands
//! back the events it produced.

use anyhow::Result;
use match_core::{
    check_interception, distance_point_to_segment, Action, Event, MatchSimulator, Player,
    Position, Role, SeededDecisions, StepResult, Team, TeamSide,
};
use tracing::info;

fn at(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

fn narrate(event: &Event) {
    match (event.result, event.interceptor.as_deref()) {
        (Some(StepResult::Intercepted), Some(name)) => {
            info!(action = %event.action, interceptor = name, ball = ?event.ball_pos_after, "intercepted")
        }
        (result, _) => {
            info!(action = %event.action, ?result, ball = ?event.ball_pos_after, "completed")
        }
    }
    if let Some(state) = event.set_piece {
        info!(?state, ball = ?event.ball_pos_after, "set piece awarded");
    }
}

/// A pass straight through a defender, then the same pass played around them
pub fn interception(seed: u64) -> Result<Vec<Event>> {
    info!("demo: pass interception");

    let home = Team::new("Home", vec![Player::new("Attacker", at(40.0, 34.0), Role::Forward)])?;
    let away = Team::new(
        "Away",
        vec![
            Player::new("Defender1", at(52.0, 34.0), Role::Defender).with_interception_skill(0.8),
            Player::new("Defender2", at(60.0, 20.0), Role::Defender).with_interception_skill(0.7),
            Player::new("Defender3", at(60.0, 48.0), Role::Defender).with_interception_skill(0.6),
        ],
    )?;

    let mut sim = MatchSimulator::with_seed(home, away, seed);
    let mut events = Vec::new();

    sim.ball_mut().position = at(40.0, 34.0);
    let event = sim.simulate_step(Action::Pass, Some(at(70.0, 34.0)))?;
    narrate(event);
    events.push(event.clone());
    info!(possession = sim.possession_team().name(), "after the through ball");

    sim.reset();
    sim.ball_mut().position = at(40.0, 34.0);
    let event = sim.simulate_step(Action::Pass, Some(at(70.0, 5.0)))?;
    narrate(event);
    events.push(event.clone());

    Ok(events)
}

/// Shot over the attacking goal line, back pass over the own line, dribble off a touchline
pub fn set_pieces(seed: u64) -> Result<Vec<Event>> {
    info!("demo: set pieces");

    let mut squads = SeededDecisions::new(seed);
    let home = Team::sample("Home", TeamSide::Home, 11, &mut squads)?;
    let away = Team::sample("Away", TeamSide::Away, 11, &mut squads)?;
    let mut sim = MatchSimulator::with_seed(home, away, seed);
    let mut events = Vec::new();

    let plays = [
        (at(100.0, 34.0), Action::Shoot, at(110.0, 34.0)),
        (at(2.0, 34.0), Action::Pass, at(-5.0, 34.0)),
        (at(50.0, 60.0), Action::Dribble, at(50.0, 75.0)),
    ];
    for (start, action, target) in plays {
        sim.reset();
        sim.ball_mut().position = start;
        let event = sim.simulate_step(action, Some(target))?;
        narrate(event);
        events.push(event.clone());
        info!(state = ?sim.game_state(), "game state");
    }

    Ok(events)
}

/// Build-up from midfield: ball out wide, then a cross into the box
pub fn tactical(seed: u64) -> Result<Vec<Event>> {
    info!("demo: tactical build-up");

    let home = Team::new(
        "Arsenal",
        vec![
            Player::new("GK_Ramsdale", at(5.0, 34.0), Role::Goalkeeper),
            Player::new("DEF_Saliba", at(20.0, 25.0), Role::Defender),
            Player::new("DEF_Gabriel", at(20.0, 43.0), Role::Defender),
            Player::new("MF_Odegaard", at(50.0, 34.0), Role::Midfielder),
            Player::new("FWD_Saka", at(70.0, 20.0), Role::Forward),
            Player::new("FWD_Martinelli", at(70.0, 48.0), Role::Forward),
        ],
    )?;
    let away = Team::new(
        "Chelsea",
        vec![
            Player::new("GK_Sanchez", at(100.0, 34.0), Role::Goalkeeper),
            Player::new("DEF_Silva", at(85.0, 25.0), Role::Defender),
            Player::new("DEF_James", at(85.0, 43.0), Role::Defender),
            Player::new("MF_Enzo", at(60.0, 34.0), Role::Midfielder),
            Player::new("FWD_Sterling", at(40.0, 20.0), Role::Forward),
        ],
    )?;

    let mut sim = MatchSimulator::with_seed(home, away, seed);
    sim.ball_mut().position = at(50.0, 34.0);

    let first = sim.simulate_step(Action::Pass, Some(at(70.0, 20.0)))?.clone();
    narrate(&first);

    if first.result == Some(StepResult::Success) {
        let cross = sim.simulate_step(Action::Pass, Some(at(95.0, 34.0)))?;
        narrate(cross);
    }

    for (i, event) in sim.get_training_data().iter().enumerate() {
        info!(step = i + 1, action = %event.action, result = ?event.result, interceptor = ?event.interceptor, "log");
    }
    Ok(sim.get_training_data().to_vec())
}

/// Segment distances and a two-defender lane check; returns the three distances
pub fn geometry() -> [f64; 3] {
    info!("demo: geometry");

    let distances = [
        distance_point_to_segment(at(5.0, 5.0), at(0.0, 0.0), at(10.0, 10.0)),
        distance_point_to_segment(at(5.0, 0.0), at(0.0, 5.0), at(10.0, 5.0)),
        distance_point_to_segment(at(15.0, 5.0), at(0.0, 5.0), at(10.0, 5.0)),
    ];
    info!(on_line = distances[0], perpendicular = distances[1], beyond_end = distances[2], "segment distances");

    let defenders = [
        Player::new("Close_Defender", at(5.0, 1.0), Role::Defender),
        Player::new("Far_Defender", at(5.0, 10.0), Role::Defender),
    ];
    let hit = check_interception(at(0.0, 0.0), at(10.0, 0.0), &defenders, 2.0);
    info!(interceptor = ?hit.map(|p| p.name.as_str()), radius = 2.0, "lane check");

    distances
}

/// Every demo in order; events concatenated
pub fn run_all(seed: u64) -> Result<Vec<Event>> {
    let mut events = interception(seed)?;
    events.extend(set_pieces(seed)?);
    events.extend(tactical(seed)?);
    geometry();
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use match_core::GameState;

    #[test]
    fn test_interception_demo() {
        let events = interception(1).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].interceptor.as_deref(), Some("Defender1"));
        assert_eq!(events[1].result, Some(StepResult::Success));
        assert_eq!(events[1].ball_pos_after, at(70.0, 5.0));
    }

    #[test]
    fn test_set_pieces_demo() {
        let events = set_pieces(4).unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0].set_piece,
            Some(GameState::Corner) | Some(GameState::GoalKick)
        ));
        assert_eq!(events[2].set_piece, Some(GameState::ThrowIn));
    }

    #[test]
    fn test_tactical_demo_runs() {
        let events = tactical(2).unwrap();
        assert!(!events.is_empty());
        assert_eq!(events[0].possession_before, "Arsenal");
    }

    #[test]
    fn test_geometry_demo() {
        let [on_line, perpendicular, beyond] = geometry();
        assert!(on_line.abs() < 1e-9);
        assert_eq!(perpendicular, 5.0);
        assert_eq!(beyond, 5.0);
    }

    #[test]
    fn test_run_all_is_deterministic() {
        let a = serde_json::to_string(&run_all(9).unwrap()).unwrap();
        let b = serde_json::to_string(&run_all(9).unwrap()).unwrap();
        assert_eq!(a, b);
    }
}
