//! Fixed timestep simulation tick
//!
//! Advances a level in a fixed order: player intent first, then every
//! actor in list order, then touches evaluated against the post-move state.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::level::{Level, Obstacle, TouchKind};
use super::vector::Vector;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Movement intent. One axis at a time, no diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn unit(self) -> Vector {
        match self {
            Direction::Left => Vector::new(-1.0, 0.0),
            Direction::Right => Vector::new(1.0, 0.0),
            Direction::Up => Vector::new(0.0, -1.0),
            Direction::Down => Vector::new(0.0, 1.0),
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Where the player wants to go (None = stand still)
    pub direction: Option<Direction>,
}

impl TickInput {
    pub fn toward(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
        }
    }
}

/// Advance the level by `dt` seconds. Steps longer than `MAX_STEP` are
/// split so fast actors cannot skip over a cell. `dt` must be finite and
/// non-negative; ticks longer than `MAX_TICK` are clamped.
pub fn tick(level: &mut Level, input: &TickInput, dt: f32, settings: &Settings) -> Result<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(Error::invalid(format!("tick length must be finite and non-negative, got {dt}")));
    }
    let dt = if dt > MAX_TICK {
        log::warn!("Tick of {dt}s clamped to {MAX_TICK}s");
        MAX_TICK
    } else {
        dt
    };

    let steps = (dt / MAX_STEP).ceil() as u32;
    if steps == 0 {
        return Ok(());
    }
    let step = dt / steps as f32;
    for _ in 0..steps {
        if level.is_finished() {
            break;
        }
        step_once(level, input, step, settings.player_speed)?;
    }
    Ok(())
}

fn step_once(level: &mut Level, input: &TickInput, step: f32, player_speed: f32) -> Result<()> {
    if level.is_finished() {
        return Ok(());
    }

    let blocked_by = move_player(level, input, step, player_speed)?;

    level.step_actors(step)?;

    // Touches only after every move of this step has been applied
    if let Some(obstacle) = blocked_by {
        level.player_touched(obstacle.into(), None);
    }
    let hit = player_contact(level).map(|a| (a.actor_type(), a.id));
    if let Some((kind, id)) = hit {
        level.player_touched(TouchKind::from(kind), Some(id));
    }

    if level.status().is_some() {
        level.finish_delay -= step;
    }
    Ok(())
}

/// Move the player along its intent. Returns the obstacle that stopped it.
fn move_player(
    level: &mut Level,
    input: &TickInput,
    step: f32,
    player_speed: f32,
) -> Result<Option<Obstacle>> {
    let Some(player) = level.player() else {
        return Ok(None);
    };

    let speed = input
        .direction
        .map(|d| d.unit().times(player_speed))
        .unwrap_or(Vector::ZERO);
    let next = player.pos.plus(speed.times(step));
    let obstacle = if speed == Vector::ZERO {
        None
    } else {
        level.obstacle_at(next, player.size)?
    };

    if let Some(player) = level.player_mut() {
        player.speed = speed;
        if obstacle.is_none() {
            player.pos = next;
        }
    }
    Ok(obstacle)
}

/// Accumulates frame time and runs whole `SIM_DT` ticks
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    accumulator: f32,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `frame_dt` seconds of wall time. Returns the number of ticks run.
    pub fn advance(
        &mut self,
        level: &mut Level,
        input: &TickInput,
        frame_dt: f32,
        settings: &Settings,
    ) -> Result<u32> {
        let dt = frame_dt.min(0.1).max(0.0);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(level, input, SIM_DT, settings)?;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        Ok(substeps)
    }

    /// Leftover time not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}

/// Actor the player is currently overlapping, if any
pub fn player_contact(level: &Level) -> Option<&Actor> {
    level.player().and_then(|p| level.actor_at(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Status;
    use crate::sim::parser::LevelParser;

    fn parse(plan: &[&str]) -> Level {
        LevelParser::standard().parse(plan)
    }

    #[test]
    fn test_tick_moves_player() {
        let mut level = parse(&["     ", "  @  ", "xxxxx"]);
        let settings = Settings::default();
        let start = level.player().unwrap().pos;

        tick(&mut level, &TickInput::toward(Direction::Right), 0.1, &settings).unwrap();
        let pos = level.player().unwrap().pos;
        assert!((pos.x - (start.x + 0.7)).abs() < 1e-5);
        assert_eq!(pos.y, start.y);
        assert_eq!(level.player().unwrap().speed, Vector::new(7.0, 0.0));

        tick(&mut level, &TickInput::default(), 0.1, &settings).unwrap();
        assert_eq!(level.player().unwrap().speed, Vector::ZERO);
    }

    #[test]
    fn test_walls_stop_player() {
        let mut level = parse(&["     ", " x@  ", "xxxxx"]);
        let settings = Settings::default();
        let start = level.player().unwrap().pos;
        for _ in 0..10 {
            tick(&mut level, &TickInput::toward(Direction::Left), SIM_DT, &settings).unwrap();
        }
        assert_eq!(level.player().unwrap().pos, start);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_walking_into_lava_loses() {
        let mut level = parse(&["     ", " !@  ", "xxxxx"]);
        let settings = Settings::default();
        tick(&mut level, &TickInput::toward(Direction::Left), SIM_DT, &settings).unwrap();
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_collecting_last_coin_wins_and_delay_runs_down() {
        let mut level = parse(&["     ", " o@  ", "xxxxx"]);
        let settings = Settings::default();
        for _ in 0..30 {
            tick(&mut level, &TickInput::toward(Direction::Left), SIM_DT, &settings).unwrap();
            if level.status().is_some() {
                break;
            }
        }
        assert_eq!(level.status(), Some(Status::Won));
        assert!(level.no_more_actors(crate::sim::ActorType::Coin));
        assert!(!level.is_finished());

        for _ in 0..70 {
            tick(&mut level, &TickInput::default(), SIM_DT, &settings).unwrap();
        }
        assert!(level.is_finished());
    }

    #[test]
    fn test_fireball_hits_player() {
        let mut level = parse(&["      ", "=   @ ", "xxxxxx"]);
        let settings = Settings::default();
        for _ in 0..200 {
            tick(&mut level, &TickInput::default(), SIM_DT, &settings).unwrap();
        }
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_long_tick_is_split() {
        // In one piece, a 2 second tick would carry the fireball past the wall
        let mut level = parse(&["=  x  "]);
        let settings = Settings::default();
        tick(&mut level, &TickInput::default(), 2.0, &settings).unwrap();
        let fb = &level.actors[0];
        assert!(fb.pos.x >= 0.0 && fb.pos.x + fb.size.x <= 3.0 + 1e-4);
    }

    #[test]
    fn test_stepper_runs_whole_ticks() {
        let mut level = parse(&["     ", "  @  ", "xxxxx"]);
        let settings = Settings::default();
        let mut stepper = Stepper::new();
        let ran = stepper
            .advance(&mut level, &TickInput::default(), SIM_DT * 2.5, &settings)
            .unwrap();
        assert_eq!(ran, 2);
        assert!(stepper.pending() < SIM_DT);

        // Huge frames are clamped to 0.1s
        let ran = stepper
            .advance(&mut level, &TickInput::default(), 10.0, &settings)
            .unwrap();
        assert_eq!(ran, 6);
        assert!(ran <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_player_contact() {
        let level = parse(&["     ", " o@  ", "xxxxx"]);
        assert!(player_contact(&level).is_none());

        let player = Actor::player(Vector::new(1.0, 1.0));
        let coin = Actor::with_defaults(Vector::new(1.5, 1.0)).unwrap();
        let coin_id = coin.id;
        let level = Level::new(vec![vec![None; 3]; 3], vec![player, coin]).unwrap();
        assert_eq!(player_contact(&level).map(|a| a.id), Some(coin_id));
    }

    #[test]
    fn test_tick_rejects_bad_lengths() {
        let mut level = parse(&["     ", "  @  ", "xxxxx"]);
        let settings = Settings::default();
        for dt in [f32::INFINITY, f32::NAN, -0.1] {
            assert!(matches!(
                tick(&mut level, &TickInput::default(), dt, &settings),
                Err(Error::InvalidArgument(_))
            ));
        }
        tick(&mut level, &TickInput::default(), 0.0, &settings).unwrap();
    }

    #[test]
    fn test_huge_tick_is_clamped_and_returns() {
        let mut level = parse(&["|", " ", " ", "x"]);
        let settings = Settings::default();
        tick(&mut level, &TickInput::default(), 1.0e7, &settings).unwrap();
        tick(&mut level, &TickInput::default(), f32::MAX, &settings).unwrap();
        let fb = &level.actors[0];
        assert!(fb.pos.y >= 0.0 && fb.pos.y + fb.size.y <= 3.0 + 1e-4);
    }

    #[test]
    fn test_tick_stops_once_finished() {
        let mut level = parse(&["     ", " !@  ", "xxxxx"]);
        let settings = Settings::default();
        tick(&mut level, &TickInput::toward(Direction::Left), 30.0, &settings).unwrap();
        assert!(level.is_finished());
        // Countdown stops on the first step past the delay
        assert!(level.finish_delay < 0.0 && level.finish_delay > -2.0 * MAX_STEP);
    }
}
