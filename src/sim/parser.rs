//! Text level plans → `Level`
//!
//! A plan is a list of rows; each character is one cell. Obstacles are
//! fixed (`x` wall, `!` lava). Actors come from a symbol dictionary that
//! maps characters to a closed set of spawnable kinds.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::behavior::FireballKind;
use super::level::{Level, Obstacle};
use super::vector::Vector;

/// Seed used for coin phases when none is given
pub const DEFAULT_PARSE_SEED: u64 = 0x1a7a;

/// Actor kinds a plan symbol can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
}

impl SpawnKind {
    /// Build the actor for this kind in grid cell `cell`
    pub fn spawn(self, cell: Vector, rng: &mut Pcg32) -> Actor {
        match self {
            SpawnKind::Player => Actor::player(cell),
            SpawnKind::Coin => Actor::coin(cell, rng),
            SpawnKind::HorizontalFireball => Actor::fireball(cell, FireballKind::Horizontal),
            SpawnKind::VerticalFireball => Actor::fireball(cell, FireballKind::Vertical),
            SpawnKind::FireRain => Actor::fireball(cell, FireballKind::Rain),
        }
    }
}

/// The symbol set used by the bundled levels
pub fn standard_dictionary() -> HashMap<char, SpawnKind> {
    HashMap::from([
        ('@', SpawnKind::Player),
        ('v', SpawnKind::FireRain),
        ('o', SpawnKind::Coin),
        ('=', SpawnKind::HorizontalFireball),
        ('|', SpawnKind::VerticalFireball),
    ])
}

/// Turns plans into levels. Owns its dictionary, so it can be reused for
/// any number of plans.
#[derive(Debug, Clone)]
pub struct LevelParser {
    dictionary: HashMap<char, SpawnKind>,
    seed: u64,
}

impl Default for LevelParser {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl LevelParser {
    pub fn new(dictionary: HashMap<char, SpawnKind>) -> Self {
        Self {
            dictionary,
            seed: DEFAULT_PARSE_SEED,
        }
    }

    pub fn standard() -> Self {
        Self::new(standard_dictionary())
    }

    /// Seed the coin phase generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<SpawnKind> {
        self.dictionary.get(&symbol).copied()
    }

    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Obstacle> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    pub fn create_grid<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Vec<Option<Obstacle>>> {
        plan.iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|c| self.obstacle_from_symbol(c))
                    .collect()
            })
            .collect()
    }

    /// Actors for every mapped symbol, in row-major order
    pub fn create_actors<S: AsRef<str>>(&self, plan: &[S]) -> Vec<Actor> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut actors = Vec::new();

        for (row_index, row) in plan.iter().enumerate() {
            for (col_index, symbol) in row.as_ref().chars().enumerate() {
                if let Some(kind) = self.actor_from_symbol(symbol) {
                    let cell = Vector::new(col_index as f32, row_index as f32);
                    actors.push(kind.spawn(cell, &mut rng));
                }
            }
        }

        actors
    }

    pub fn parse<S: AsRef<str>>(&self, plan: &[S]) -> Level {
        // Freshly spawned actors never share an id
        let level = Level::assemble(self.create_grid(plan), self.create_actors(plan));
        log::debug!(
            "Parsed {}x{} level with {} actors",
            level.width(),
            level.height(),
            level.actors.len()
        );
        level
    }
}
