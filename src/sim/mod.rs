//! Level simulation module
//!
//! All gameplay logic lives here. This module is pure and single-threaded:
//! - One mutator (the driving loop) advances a level tick by tick
//! - Actors update in list order
//! - Seeded RNG only (coin phases)
//! - No rendering or platform dependencies

pub mod actor;
pub mod behavior;
pub mod level;
pub mod parser;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorType};
pub use behavior::{Behavior, Environment, FireballKind, Spring};
pub use level::{Level, Obstacle, ObstacleMap, Status, TouchKind};
pub use parser::{DEFAULT_PARSE_SEED, LevelParser, SpawnKind, standard_dictionary};
pub use tick::{Direction, Stepper, TickInput, player_contact, tick};
pub use vector::Vector;
