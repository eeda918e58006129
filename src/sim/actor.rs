//! Actors: positioned, sized, moving entities and their overlap test

use std::f32::consts::TAU;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::behavior::{Behavior, Environment, FireballKind, Spring, fireball_next_position};
use super::vector::Vector;
use crate::error::{Error, Result};

static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);

/// Actor identity. Every constructed actor gets a fresh id from a single
/// process-wide counter; only clones share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(u32);

impl ActorId {
    fn next() -> Self {
        ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type tag used by the level's status rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorType {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Actor => "actor",
            ActorType::Player => "player",
            ActorType::Coin => "coin",
            ActorType::Fireball => "fireball",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamic object in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub behavior: Behavior,
}

impl Actor {
    /// Build an inert actor, rejecting non-finite vectors and negative sizes
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Result<Self> {
        Self::with_behavior(pos, size, speed, Behavior::Inert)
    }

    /// Inert actor with unit size and no speed
    pub fn with_defaults(pos: Vector) -> Result<Self> {
        Self::new(pos, Vector::ONE, Vector::ZERO)
    }

    pub fn with_behavior(pos: Vector, size: Vector, speed: Vector, behavior: Behavior) -> Result<Self> {
        if !(pos.is_finite() && size.is_finite() && speed.is_finite()) {
            return Err(Error::invalid(format!(
                "actor vectors must be finite (pos {pos:?}, size {size:?}, speed {speed:?})"
            )));
        }
        if size.x < 0.0 || size.y < 0.0 {
            return Err(Error::invalid(format!("actor size must be non-negative, got {size:?}")));
        }
        Ok(Self {
            id: ActorId::next(),
            pos,
            size,
            speed,
            behavior,
        })
    }

    /// Player anchored at the feet: hitbox is taller than one tile
    pub fn player(cell: Vector) -> Self {
        Self {
            id: ActorId::next(),
            pos: cell.plus(Vector::new(0.0, -0.5)),
            size: Vector::new(0.8, 1.5),
            speed: Vector::ZERO,
            behavior: Behavior::Player,
        }
    }

    /// Coin inset into its tile with a random bobbing phase
    pub fn coin<R: Rng>(cell: Vector, rng: &mut R) -> Self {
        let pos = cell.plus(Vector::new(0.2, 0.1));
        Self {
            id: ActorId::next(),
            pos,
            size: Vector::new(0.6, 0.6),
            speed: Vector::ZERO,
            behavior: Behavior::Coin(Spring::new(pos, rng.random_range(0.0..TAU))),
        }
    }

    pub fn fireball(cell: Vector, kind: FireballKind) -> Self {
        Self {
            id: ActorId::next(),
            pos: cell,
            size: Vector::ONE,
            speed: kind.initial_speed(),
            behavior: Behavior::Fireball { kind, spawn: cell },
        }
    }

    pub fn actor_type(&self) -> ActorType {
        match self.behavior {
            Behavior::Inert => ActorType::Actor,
            Behavior::Player => ActorType::Player,
            Behavior::Coin(_) => ActorType::Coin,
            Behavior::Fireball { .. } => ActorType::Fireball,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict bounding-box overlap. Shared edges do not count and an actor
    /// never intersects itself (or a clone of itself).
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if other.id == self.id {
            return false;
        }
        self.right() > other.left()
            && self.left() < other.right()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }

    /// Advance this actor by `time` seconds
    pub fn act<E: Environment + ?Sized>(&mut self, time: f32, env: &E) -> Result<()> {
        match self.behavior {
            Behavior::Inert | Behavior::Player => {}
            Behavior::Coin(mut spring) => {
                self.pos = spring.next_position(time);
                self.behavior = Behavior::Coin(spring);
            }
            Behavior::Fireball { .. } => {
                let next = fireball_next_position(self.pos, self.speed, time);
                if env.obstacle_at(next, self.size)?.is_some() {
                    self.handle_obstacle();
                } else {
                    self.pos = next;
                }
            }
        }
        Ok(())
    }

    /// Reaction to a blocked move: rain restarts from its spawn cell,
    /// other fireballs reverse.
    pub fn handle_obstacle(&mut self) {
        match self.behavior {
            Behavior::Fireball { kind: FireballKind::Rain, spawn } => self.pos = spawn,
            Behavior::Fireball { .. } => self.speed = -self.speed,
            _ => {}
        }
    }
}
