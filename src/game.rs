//! Headless game loop: input sources, single level runs and level sequencing

use glam::Vec2;

use crate::error::{Error, Result};
use crate::plans::LevelPlan;
use crate::settings::Settings;
use crate::sim::{ActorType, Direction, Level, LevelParser, Status, TickInput, tick};

/// Supplies player intent each tick
pub trait InputSource {
    fn next_input(&mut self, level: &Level) -> TickInput;

    /// Called before every level attempt
    fn reset(&mut self) {}
}

/// Never moves
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl InputSource for Idle {
    fn next_input(&mut self, _level: &Level) -> TickInput {
        TickInput::default()
    }
}

/// Replays a fixed sequence of inputs, then stands still
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl Scripted {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }

    /// Hold `direction` for `ticks` ticks
    pub fn hold(direction: Direction, ticks: usize) -> Self {
        Self::new(vec![TickInput::toward(direction); ticks])
    }

    /// Rewind to the first input. `run_game` does this before each attempt.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl InputSource for Scripted {
    fn next_input(&mut self, _level: &Level) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        input
    }

    fn reset(&mut self) {
        self.rewind();
    }
}

/// Walks toward the nearest coin, one axis at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

/// How close (in tiles) a center must be before switching axis
const AUTOPILOT_SLACK: f32 = 0.05;

impl InputSource for Autopilot {
    fn next_input(&mut self, level: &Level) -> TickInput {
        let Some(player) = level.player() else {
            return TickInput::default();
        };
        let center = |pos: Vec2, size: Vec2| pos + size * 0.5;
        let me = center(player.pos.into(), player.size.into());

        let target = level
            .actors
            .iter()
            .filter(|a| a.actor_type() == ActorType::Coin)
            .map(|a| center(a.pos.into(), a.size.into()))
            .min_by(|a, b| {
                a.distance_squared(me)
                    .partial_cmp(&b.distance_squared(me))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(target) = target else {
            return TickInput::default();
        };
        let delta = target - me;
        let direction = if delta.x.abs() > AUTOPILOT_SLACK {
            Some(if delta.x < 0.0 { Direction::Left } else { Direction::Right })
        } else if delta.y.abs() > AUTOPILOT_SLACK {
            Some(if delta.y < 0.0 { Direction::Up } else { Direction::Down })
        } else {
            None
        };
        TickInput { direction }
    }
}

/// Result of one level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    /// Terminal status, or `None` if the tick budget ran out first
    pub status: Option<Status>,
    pub ticks: u64,
}

impl LevelOutcome {
    pub fn is_won(&self) -> bool {
        self.status == Some(Status::Won)
    }
}

/// Result of a full run over a plan list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// Levels won, in order
    pub levels_won: usize,
    pub levels_total: usize,
    /// Attempts made across all levels
    pub attempts: u32,
}

impl GameOutcome {
    pub fn completed(&self) -> bool {
        self.levels_won == self.levels_total
    }
}

/// Tick `level` until it finishes or the tick budget runs out
pub fn run_level<I: InputSource + ?Sized>(
    level: &mut Level,
    input: &mut I,
    settings: &Settings,
) -> Result<LevelOutcome> {
    let mut ticks = 0;
    while !level.is_finished() {
        if ticks >= settings.max_ticks {
            log::warn!("Tick budget of {} exhausted", settings.max_ticks);
            break;
        }
        let intent = input.next_input(level);
        tick(level, &intent, settings.dt, settings)?;
        ticks += 1;
    }

    Ok(LevelOutcome {
        status: level.status(),
        ticks,
    })
}

/// Play `plans` in order. A lost level is retried from scratch up to
/// `settings.max_attempts` times; running out of attempts ends the run.
pub fn run_game<I: InputSource + ?Sized>(
    plans: &[LevelPlan],
    parser: &LevelParser,
    input: &mut I,
    settings: &Settings,
) -> Result<GameOutcome> {
    if plans.is_empty() {
        return Err(Error::EmptyPlan);
    }

    let mut outcome = GameOutcome {
        levels_won: 0,
        levels_total: plans.len(),
        attempts: 0,
    };

    for (index, plan) in plans.iter().enumerate() {
        let mut won = false;
        for attempt in 1..=settings.max_attempts {
            outcome.attempts += 1;
            log::info!("Level {} attempt {}", index + 1, attempt);

            let mut level = parser.parse(plan.rows.as_slice());
            input.reset();
            let result = run_level(&mut level, input, settings)?;
            match result.status {
                Some(status) => log::info!("Level {} {} after {} ticks", index + 1, status, result.ticks),
                None => log::info!("Level {} unfinished after {} ticks", index + 1, result.ticks),
            }

            if result.is_won() {
                won = true;
                break;
            }
        }

        if !won {
            return Ok(outcome);
        }
        outcome.levels_won += 1;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            max_ticks: 600,
            max_attempts: 2,
            ..Settings::default()
        }
    }

    #[test]
    fn test_scripted_then_idle() {
        let level = LevelParser::standard().parse(&["@"]);
        let mut script = Scripted::hold(Direction::Right, 2);
        assert_eq!(script.next_input(&level), TickInput::toward(Direction::Right));
        assert_eq!(script.next_input(&level), TickInput::toward(Direction::Right));
        assert_eq!(script.next_input(&level), TickInput::default());
        script.rewind();
        assert_eq!(script.next_input(&level), TickInput::toward(Direction::Right));
    }

    #[test]
    fn test_autopilot_heads_for_nearest_coin() {
        let level = LevelParser::standard().parse(&["          ", "o  @     o", "xxxxxxxxxx"]);
        assert_eq!(Autopilot.next_input(&level), TickInput::toward(Direction::Left));

        let level = LevelParser::standard().parse(&["          ", "o     @  o", "xxxxxxxxxx"]);
        assert_eq!(Autopilot.next_input(&level), TickInput::toward(Direction::Right));

        let level = LevelParser::standard().parse(&["@"]);
        assert_eq!(Autopilot.next_input(&level), TickInput::default());
    }

    #[test]
    fn test_run_level_until_won() {
        let mut level = LevelParser::standard().parse(&["      ", " o  @ ", "xxxxxx"]);
        let outcome = run_level(&mut level, &mut Autopilot, &settings()).unwrap();
        assert!(outcome.is_won());
        assert!(level.is_finished());
        assert!(outcome.ticks < 600);
    }

    #[test]
    fn test_run_level_budget() {
        let mut level = LevelParser::standard().parse(&["      ", " o  @ ", "xxxxxx"]);
        let outcome = run_level(&mut level, &mut Idle, &settings()).unwrap();
        assert_eq!(outcome.status, None);
        assert_eq!(outcome.ticks, 600);
    }

    #[test]
    fn test_run_game_sequences_levels() {
        let plans = vec![
            LevelPlan::new(["      ", " o  @ ", "xxxxxx"]),
            LevelPlan::new(["      ", " @  o ", "xxxxxx"]),
        ];
        let outcome = run_game(&plans, &LevelParser::standard(), &mut Autopilot, &settings()).unwrap();
        assert!(outcome.completed());
        assert_eq!(outcome.levels_won, 2);
        assert_eq!(outcome.attempts, 2);
    }

    #[test]
    fn test_run_game_retries_then_stops() {
        let plans = vec![
            LevelPlan::new(["      ", " !  @ ", "xxxxxx"]),
            LevelPlan::new(["      ", " @  o ", "xxxxxx"]),
        ];
        // Walk left into the lava on every attempt
        let outcome = run_game(
            &plans,
            &LevelParser::standard(),
            &mut Scripted::new(vec![TickInput::toward(Direction::Left); 10_000]),
            &settings(),
        )
        .unwrap();
        assert!(!outcome.completed());
        assert_eq!(outcome.levels_won, 0);
        assert_eq!(outcome.attempts, 2);
    }

    #[test]
    fn test_run_game_replays_script_on_every_attempt() {
        /// Counts attempts and walks left for a few ticks each time
        struct Counting {
            script: Scripted,
            resets: u32,
        }

        impl InputSource for Counting {
            fn next_input(&mut self, level: &Level) -> TickInput {
                self.script.next_input(level)
            }

            fn reset(&mut self) {
                self.resets += 1;
                self.script.reset();
            }
        }

        let plan = ["      ", " !  @ ", "xxxxxx"];
        let mut level = LevelParser::standard().parse(&plan);
        let single = run_level(&mut level, &mut Scripted::hold(Direction::Left, 20), &settings()).unwrap();
        assert_eq!(single.status, Some(Status::Lost));

        let plans = vec![LevelPlan::new(plan)];
        let mut input = Counting {
            script: Scripted::hold(Direction::Left, 20),
            resets: 0,
        };
        let outcome = run_game(&plans, &LevelParser::standard(), &mut input, &settings()).unwrap();
        assert_eq!(input.resets, 2);
        assert_eq!(outcome.attempts, 2);
        // Without a rewind the second attempt would idle until the budget ran out
        assert_eq!(input.script.cursor as u64, single.ticks);
    }

    #[test]
    fn test_run_game_rejects_empty_plan_list() {
        let result = run_game(&[], &LevelParser::standard(), &mut Idle, &settings());
        assert!(matches!(result, Err(Error::EmptyPlan)));
    }
}
