//! Lorenz system explorer.
//!
//! Integrates an ensemble of Lorenz trajectories with an adaptive
//! Dormand–Prince solver, draws them as a 3D plotly figure, and keeps the
//! raw result around for follow-up analysis such as time averages.

pub mod config;
pub mod ensemble;
pub mod envs;
pub mod error;
pub mod explore;
pub mod ode;
pub mod present;
pub mod util;

pub use config::ExplorerConfig;
pub use ensemble::initial::InitialConditions;
pub use ensemble::solution::{Solution, solve_lorenz};
pub use envs::lorenz::LorenzParams;
pub use error::{LorenzError, Result};
pub use explore::explorer::{Explorer, Frame};
pub use ode::dopri::Tolerances;
pub use ode::grid::TimeGrid;
pub use util::graph::View;
