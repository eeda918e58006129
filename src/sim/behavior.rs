//! Per-variant actor behavior
//!
//! Actors carry a tagged `Behavior` instead of a class hierarchy. Movement
//! that needs the level (obstacle queries) goes through the `Environment`
//! trait so actors never hold a reference to the level they live in.

use serde::{Deserialize, Serialize};

use super::level::Obstacle;
use super::vector::Vector;
use crate::consts::*;
use crate::error::Result;

/// What an actor may ask about its surroundings during a tick
pub trait Environment {
    /// Obstacle covering the rectangle at `pos` with `size`, if any
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>>;
}

/// Fireball movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireballKind {
    /// Bounces left and right
    Horizontal,
    /// Bounces up and down
    Vertical,
    /// Falls, then restarts from its spawn cell on impact
    Rain,
}

impl FireballKind {
    pub fn initial_speed(self) -> Vector {
        match self {
            FireballKind::Horizontal => Vector::new(HORIZONTAL_FIREBALL_SPEED, 0.0),
            FireballKind::Vertical => Vector::new(0.0, VERTICAL_FIREBALL_SPEED),
            FireballKind::Rain => Vector::new(0.0, FIRE_RAIN_SPEED),
        }
    }
}

/// Coin bobbing state: oscillation phase around a fixed anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Current phase (radians)
    pub phase: f32,
    /// Anchor the coin bobs around
    pub start: Vector,
}

impl Spring {
    pub fn new(start: Vector, phase: f32) -> Self {
        Self { phase, start }
    }

    /// Advance the phase by `time` seconds
    pub fn advance(&mut self, time: f32) {
        self.phase += COIN_SPRING_SPEED * time;
    }

    /// Vertical offset for the current phase
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, COIN_SPRING_DIST * self.phase.sin())
    }

    /// Advance, then return the bobbed position
    pub fn next_position(&mut self, time: f32) -> Vector {
        self.advance(time);
        self.start.plus(self.offset())
    }
}

/// Behavior variant of an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Plain actor, never moves on its own
    Inert,
    /// Moved by the driving loop from player intent
    Player,
    Coin(Spring),
    Fireball { kind: FireballKind, spawn: Vector },
}

/// Straight-line motion shared by every fireball kind
#[inline]
pub fn fireball_next_position(pos: Vector, speed: Vector, time: f32) -> Vector {
    pos.plus(speed.times(time))
}
