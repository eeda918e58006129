//! Level state: static obstacle grid, live actors and the won/lost machine

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorType};
use super::behavior::Environment;
use super::vector::Vector;
use crate::consts::FINISH_DELAY;
use crate::error::{Error, Result};

/// Static cell contents. Empty cells are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Obstacle {
    /// Blocks movement on all four edges
    Wall,
    /// Lethal on contact
    Lava,
}

impl Obstacle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Won,
    Lost,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the player ran into, as reported to `Level::player_touched`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchKind {
    Wall,
    Lava,
    Actor,
    Player,
    Coin,
    Fireball,
}

impl From<Obstacle> for TouchKind {
    fn from(o: Obstacle) -> Self {
        match o {
            Obstacle::Wall => TouchKind::Wall,
            Obstacle::Lava => TouchKind::Lava,
        }
    }
}

impl From<ActorType> for TouchKind {
    fn from(t: ActorType) -> Self {
        match t {
            ActorType::Actor => TouchKind::Actor,
            ActorType::Player => TouchKind::Player,
            ActorType::Coin => TouchKind::Coin,
            ActorType::Fireball => TouchKind::Fireball,
        }
    }
}

impl FromStr for TouchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wall" => Ok(TouchKind::Wall),
            "lava" => Ok(TouchKind::Lava),
            "actor" => Ok(TouchKind::Actor),
            "player" => Ok(TouchKind::Player),
            "coin" => Ok(TouchKind::Coin),
            "fireball" => Ok(TouchKind::Fireball),
            other => Err(Error::invalid(format!("unknown touch kind {other:?}"))),
        }
    }
}

/// Obstacle grid, possibly ragged. Immutable after construction, so the
/// dimensions are computed once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleMap {
    rows: Vec<Vec<Option<Obstacle>>>,
    width: usize,
    height: usize,
}

impl ObstacleMap {
    pub fn new(rows: Vec<Vec<Option<Obstacle>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        Self { rows, width, height }
    }

    /// Longest row length
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Option<Obstacle>>] {
        &self.rows
    }

    /// Cell contents; cells past the end of a short row are empty
    pub fn cell(&self, col: usize, row: usize) -> Option<Obstacle> {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Obstacle under the rectangle at `pos` with `size`.
    ///
    /// The rectangle is widened to whole cells (`floor` on the top-left,
    /// `ceil` on the bottom-right). Leaving through the left, top or right
    /// edge hits a wall; leaving through the bottom is lava. Otherwise the
    /// first non-empty covered cell in row-major order wins.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        if !pos.is_finite() || !size.is_finite() {
            return Err(Error::invalid(format!(
                "obstacle query needs finite vectors (pos {pos:?}, size {size:?})"
            )));
        }
        if size.x < 0.0 || size.y < 0.0 {
            return Err(Error::invalid(format!("obstacle query size must be non-negative, got {size:?}")));
        }

        let left = pos.x.floor() as i64;
        let top = pos.y.floor() as i64;
        let right = (pos.x + size.x).ceil() as i64;
        let bottom = (pos.y + size.y).ceil() as i64;

        if left < 0 || top < 0 || right > self.width as i64 {
            return Ok(Some(Obstacle::Wall));
        }
        if bottom > self.height as i64 {
            return Ok(Some(Obstacle::Lava));
        }

        for row in top..bottom {
            for col in left..right {
                if let Some(obstacle) = self.cell(col as usize, row as usize) {
                    return Ok(Some(obstacle));
                }
            }
        }
        Ok(None)
    }
}

impl Environment for ObstacleMap {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        ObstacleMap::obstacle_at(self, pos, size)
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    map: ObstacleMap,
    /// Live actors in update order
    pub actors: Vec<Actor>,
    player: Option<ActorId>,
    status: Option<Status>,
    /// Seconds left before a finished level reports done. Counted down by
    /// the driving loop once a status is set.
    pub finish_delay: f32,
}

impl Level {
    /// Build a level. Fails with `InvalidArgument` if two actors share an id,
    /// which only happens when the same actor is passed in twice.
    pub fn new(grid: Vec<Vec<Option<Obstacle>>>, actors: Vec<Actor>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(actors.len());
        if let Some(dup) = actors.iter().find(|a| !seen.insert(a.id)) {
            return Err(Error::invalid(format!("actor {} appears more than once", dup.id)));
        }
        Ok(Self::assemble(grid, actors))
    }

    /// Build a level from actors already known to have distinct ids
    pub(super) fn assemble(grid: Vec<Vec<Option<Obstacle>>>, actors: Vec<Actor>) -> Self {
        let player = actors
            .iter()
            .find(|a| a.actor_type() == ActorType::Player)
            .map(|a| a.id);
        Self {
            map: ObstacleMap::new(grid),
            actors,
            player,
            status: None,
            finish_delay: FINISH_DELAY,
        }
    }

    pub fn width(&self) -> usize {
        self.map.width()
    }

    pub fn height(&self) -> usize {
        self.map.height()
    }

    pub fn map(&self) -> &ObstacleMap {
        &self.map
    }

    pub fn obstacle_cell(&self, col: usize, row: usize) -> Option<Obstacle> {
        self.map.cell(col, row)
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn player_id(&self) -> Option<ActorId> {
        self.player
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        let id = self.player?;
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// True once a status is set and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// First actor, in list order, overlapping `actor`
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| actor.is_intersect(other))
    }

    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        self.map.obstacle_at(pos, size)
    }

    /// Remove the actor with `id`; nothing happens if it is not present.
    /// Ids are unique within a level, so at most one actor matches.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.id == id)?;
        Some(self.actors.remove(index))
    }

    /// True when no actor of `kind` is left
    pub fn no_more_actors(&self, kind: ActorType) -> bool {
        !self.actors.iter().any(|a| a.actor_type() == kind)
    }

    /// Advance every actor by `time` seconds, in list order
    pub fn step_actors(&mut self, time: f32) -> Result<()> {
        let map = &self.map;
        for actor in self.actors.iter_mut() {
            actor.act(time, map)?;
        }
        Ok(())
    }

    /// Apply the effect of the player touching `kind`.
    ///
    /// Lava and fireballs lose the level. Picking up the last coin wins it.
    /// Returns `false` without doing anything once the level is decided.
    pub fn player_touched(&mut self, kind: TouchKind, touched: Option<ActorId>) -> bool {
        if self.status.is_some() {
            return false;
        }

        match kind {
            TouchKind::Lava | TouchKind::Fireball => {
                log::debug!("Player touched {:?}, level lost", kind);
                self.status = Some(Status::Lost);
            }
            TouchKind::Coin => {
                let coin = touched.filter(|&id| {
                    self.actor(id)
                        .is_some_and(|a| a.actor_type() == ActorType::Coin)
                });
                if let Some(id) = coin {
                    self.remove_actor(id);
                    log::debug!("Coin {} collected", id);
                    if self.no_more_actors(ActorType::Coin) {
                        log::debug!("Last coin collected, level won");
                        self.status = Some(Status::Won);
                    }
                }
            }
            _ => {}
        }
        true
    }
}
