use ndarray::{Array1, Array2, Array3, ArrayView1, Axis, s};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::envs::lorenz::LorenzParams;
use crate::error::{LorenzError, Result};
use crate::ode::dopri::{Dopri5, Tolerances};
use crate::ode::grid::TimeGrid;
use crate::util::stats;

use super::initial::InitialConditions;

/// Time grid plus every trajectory sampled on it.
///
/// `trajectories` has shape `[n, 3, m]`: trajectory, coordinate, sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub t: Array1<f64>,
    pub trajectories: Array3<f64>,
}

impl Solution {
    pub fn n_trajectories(&self) -> usize {
        self.trajectories.len_of(Axis(0))
    }

    pub fn n_samples(&self) -> usize {
        self.t.len()
    }

    /// Coordinate `axis` (0 = x, 1 = y, 2 = z) of trajectory `i` over time.
    pub fn coordinate(&self, i: usize, axis: usize) -> ArrayView1<'_, f64> {
        self.trajectories.slice(s![i, axis, ..])
    }

    /// Mean position of each trajectory over the time axis, shape `[n, 3]`.
    pub fn time_average(&self) -> Array2<f64> {
        self.trajectories
            .mean_axis(Axis(2))
            .unwrap_or_else(|| Array2::zeros((self.n_trajectories(), 3)))
    }

    /// `(min, max)` of each coordinate over all trajectories, NaN samples skipped.
    pub fn extent(&self) -> [(f64, f64); 3] {
        let mut out = [(f64::NAN, f64::NAN); 3];
        for (axis, slot) in out.iter_mut().enumerate() {
            let view = self.trajectories.index_axis(Axis(1), axis);
            *slot = stats::extent(&view);
        }
        out
    }
}

/// Integrate the Lorenz system once per starting point.
///
/// The first `n` initial conditions are used. Failure on any trajectory
/// aborts the whole call.
pub fn solve_lorenz(
    params: &LorenzParams,
    initial: &InitialConditions,
    n: usize,
    grid: &TimeGrid,
    tol: Tolerances,
) -> Result<Solution> {
    let starts = initial.take(n)?;
    let m = grid.len();
    let mut trajectories = Array3::zeros((n, 3, m));
    let mut solver = Dopri5::new(tol);

    for (i, y0) in starts.into_iter().enumerate() {
        let samples = solver
            .solve(params, y0, grid.as_slice())
            .map_err(|source| LorenzError::Integration {
                trajectory: i,
                source,
            })?;

        debug!(
            trajectory = i,
            accepted = solver.accepted,
            rejected = solver.rejected,
            "integrated"
        );

        for (j, y) in samples.iter().enumerate() {
            for (c, v) in y.iter().enumerate() {
                trajectories[[i, c, j]] = *v;
            }
        }
    }

    Ok(Solution {
        t: grid.clone().into_array(),
        trajectories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::initial::{DEFAULT_SEED, DEFAULT_SPREAD};
    use crate::ode::grid::DEFAULT_SAMPLES_PER_UNIT;

    fn solve(params: LorenzParams, n: usize, max_time: f64) -> Solution {
        let ics = InitialConditions::seeded(DEFAULT_SEED, n, DEFAULT_SPREAD);
        let grid = TimeGrid::for_horizon(max_time, DEFAULT_SAMPLES_PER_UNIT).unwrap();
        solve_lorenz(&params, &ics, n, &grid, Tolerances::default()).unwrap()
    }

    #[test]
    fn shape_is_n_by_3_by_m() {
        for n in [1, 3, 7] {
            let sol = solve(LorenzParams::default(), n, 0.5);
            assert_eq!(sol.trajectories.dim(), (n, 3, 125));
            assert_eq!(sol.n_samples(), 125);
        }
    }

    #[test]
    fn first_sample_is_initial_condition() {
        let ics = InitialConditions::seeded(DEFAULT_SEED, 2, DEFAULT_SPREAD);
        let sol = solve(LorenzParams::default(), 2, 0.2);

        for i in 0..2 {
            let p = ics.point(i);
            for c in 0..3 {
                assert_eq!(sol.trajectories[[i, c, 0]], p[c]);
            }
        }
    }

    #[test]
    fn time_average_shape_and_value() {
        let sol = Solution {
            t: Array1::linspace(0., 1., 4),
            trajectories: Array3::from_shape_fn((2, 3, 4), |(i, c, j)| {
                (i * 100 + c * 10 + j) as f64
            }),
        };

        let avg = sol.time_average();
        assert_eq!(avg.dim(), (2, 3));
        assert_eq!(avg[[0, 0]], 1.5);
        assert_eq!(avg[[1, 2]], 121.5);
    }

    #[test]
    fn extent_skips_nan() {
        let mut trajectories = Array3::zeros((1, 3, 3));
        trajectories[[0, 0, 0]] = -4.;
        trajectories[[0, 0, 1]] = f64::NAN;
        trajectories[[0, 0, 2]] = 9.;
        let sol = Solution {
            t: Array1::linspace(0., 1., 3),
            trajectories,
        };

        assert_eq!(sol.extent()[0], (-4., 9.));
        assert_eq!(sol.extent()[1], (0., 0.));
    }

    #[test]
    fn coordinate_view_follows_time() {
        let sol = solve(LorenzParams::default(), 1, 0.1);
        assert_eq!(sol.coordinate(0, 2).len(), sol.n_samples());
    }
}
