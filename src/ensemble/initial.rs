use ndarray::{Array2, ArrayView1, Axis};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::envs::lorenz::State;
use crate::error::{LorenzError, Result};

pub const DEFAULT_SEED: u64 = 1;
/// Half-width of the default starting cube: small perturbations of the origin.
pub const DEFAULT_SPREAD: f64 = 1.;

/// Fixed starting points for an ensemble of trajectories.
///
/// Drawn once, uniformly from `[-spread, spread)^3`, with a seeded ChaCha8
/// stream. Rows are produced in order, so the first `n` points of a larger
/// set equal a set generated with size `n` and the same seed.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialConditions {
    seed: u64,
    spread: f64,
    points: Array2<f64>,
}

impl InitialConditions {
    pub fn seeded(seed: u64, count: usize, spread: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let points =
            Array2::from_shape_fn((count, 3), |_| spread * (2. * rng.random::<f64>() - 1.));

        Self {
            seed,
            spread,
            points,
        }
    }

    /// Use explicit starting points, one row per trajectory.
    pub fn from_points(points: Array2<f64>) -> Result<Self> {
        if points.ncols() != 3 {
            return Err(LorenzError::Config(format!(
                "initial conditions need 3 columns, got {}",
                points.ncols()
            )));
        }

        Ok(Self {
            seed: 0,
            spread: 0.,
            points,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    pub fn point(&self, i: usize) -> State {
        let row: ArrayView1<f64> = self.points.row(i);
        [row[0], row[1], row[2]]
    }

    /// The first `n` starting points.
    pub fn take(&self, n: usize) -> Result<Vec<State>> {
        if n == 0 {
            return Err(LorenzError::EmptyEnsemble);
        }
        if n > self.len() {
            return Err(LorenzError::EnsembleTooLarge {
                requested: n,
                available: self.len(),
            });
        }

        Ok(self
            .points
            .axis_iter(Axis(0))
            .take(n)
            .map(|r| [r[0], r[1], r[2]])
            .collect())
    }
}
