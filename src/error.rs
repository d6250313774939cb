use thiserror::Error;

use crate::ode::dopri::StepFailure;

/// Errors raised while integrating, rendering or configuring the explorer.
#[derive(Debug, Error)]
pub enum LorenzError {
    /// The adaptive solver could not advance one of the trajectories.
    #[error("integration failed for trajectory {trajectory}: {source}")]
    Integration {
        trajectory: usize,
        #[source]
        source: StepFailure,
    },

    #[error("time horizon must be positive and finite, got {0}")]
    InvalidHorizon(f64),

    /// The horizon times the sample density asks for a grid larger than a call may hold.
    #[error("time grid of {requested} samples exceeds the limit of {max}")]
    TooManySamples { requested: f64, max: usize },

    #[error("at least one trajectory is required")]
    EmptyEnsemble,

    /// Requested more trajectories than the session generated initial conditions for.
    #[error("requested {requested} trajectories but only {available} initial conditions exist")]
    EnsembleTooLarge { requested: usize, available: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LorenzError>;
