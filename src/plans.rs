//! Level plan loading
//!
//! Plans come as a JSON array of levels, each an array of row strings:
//! `[["  x  ", " @o "], ...]`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Levels compiled into the binary
const BUNDLED_LEVELS: &str = include_str!("../levels/levels.json");

/// One level: rows of cell symbols, top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelPlan {
    pub rows: Vec<String>,
}

impl LevelPlan {
    pub fn new<S: Into<String>>(rows: impl IntoIterator<Item = S>) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }
}

impl AsRef<[String]> for LevelPlan {
    fn as_ref(&self) -> &[String] {
        &self.rows
    }
}

/// Decode a plan list. An empty list is an error.
pub fn parse_plans(json: &str) -> Result<Vec<LevelPlan>> {
    let plans: Vec<LevelPlan> = serde_json::from_str(json)?;
    if plans.is_empty() {
        return Err(Error::EmptyPlan);
    }
    Ok(plans)
}

pub fn load_plans(path: &Path) -> Result<Vec<LevelPlan>> {
    let json = std::fs::read_to_string(path)?;
    let plans = parse_plans(&json)?;
    log::info!("Loaded {} level plans from {}", plans.len(), path.display());
    Ok(plans)
}

/// The default level set
pub fn bundled() -> Result<Vec<LevelPlan>> {
    parse_plans(BUNDLED_LEVELS)
}
