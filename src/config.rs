//! Explorer settings.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! reproduces the stock attractor: ten trajectories, seed 1, four time
//! units at 250 samples per unit.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ensemble::initial::{DEFAULT_SEED, DEFAULT_SPREAD, InitialConditions};
use crate::envs::lorenz::LorenzParams;
use crate::error::{LorenzError, Result};
use crate::explore::slider::TRAJECTORIES;
use crate::ode::dopri::Tolerances;
use crate::ode::grid::DEFAULT_SAMPLES_PER_UNIT;
use crate::util::graph::View;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub params: LorenzParams,
    pub max_time: f64,
    pub samples_per_unit: f64,
    pub trajectories: usize,
    /// Seed of the initial-condition stream.
    pub seed: u64,
    /// Half-width of the cube initial conditions are drawn from.
    pub spread: f64,
    /// How many initial conditions the session generates up front.
    pub capacity: usize,
    pub tolerances: Tolerances,
    pub view: View,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            params: LorenzParams::default(),
            max_time: 4.,
            samples_per_unit: DEFAULT_SAMPLES_PER_UNIT,
            trajectories: 10,
            seed: DEFAULT_SEED,
            spread: DEFAULT_SPREAD,
            capacity: TRAJECTORIES.max as usize,
            tolerances: Tolerances::default(),
            view: View::default(),
        }
    }
}

impl ExplorerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Structural checks only; Lorenz coefficients are never inspected.
    pub fn validate(&self) -> Result<()> {
        if self.trajectories > self.capacity {
            return Err(LorenzError::Config(format!(
                "trajectories ({}) exceeds capacity ({})",
                self.trajectories, self.capacity
            )));
        }
        if !(self.samples_per_unit.is_finite() && self.samples_per_unit > 0.) {
            return Err(LorenzError::Config(format!(
                "samples_per_unit must be positive, got {}",
                self.samples_per_unit
            )));
        }
        if !(self.spread.is_finite() && self.spread >= 0.) {
            return Err(LorenzError::Config(format!(
                "spread must be non-negative, got {}",
                self.spread
            )));
        }
        Ok(())
    }

    pub fn initial_conditions(&self) -> InitialConditions {
        InitialConditions::seeded(self.seed, self.capacity, self.spread)
    }
}
