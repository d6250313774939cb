//! Turning a solved ensemble into figures.

pub mod surface;

use tracing::debug;

use crate::ensemble::solution::Solution;
use crate::error::Result;
use crate::util::graph::{self, View};

use surface::Surface;

/// Bins used for the time-average histograms.
pub const HISTOGRAM_BINS: usize = 20;

/// Draw the 3D trajectory figure and hand the solution back untouched.
pub fn present<'a>(
    solution: &'a Solution,
    view: &View,
    surface: &mut impl Surface,
) -> Result<&'a Solution> {
    debug!(
        trajectories = solution.n_trajectories(),
        samples = solution.n_samples(),
        azimuth = view.azimuth_deg,
        "drawing trajectories"
    );
    surface.draw(&graph::trajectory_plot(solution, view))?;
    Ok(solution)
}

/// Draw histograms of each trajectory's time-averaged position.
pub fn present_averages(solution: &Solution, surface: &mut impl Surface) -> Result<()> {
    let averages = solution.time_average();
    surface.draw(&graph::histogram_of_averages(&averages, HISTOGRAM_BINS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};
    use surface::Recorder;

    #[test]
    fn returns_input_unchanged() {
        let sol = Solution {
            t: Array1::linspace(0., 1., 3),
            trajectories: Array3::ones((2, 3, 3)),
        };
        let mut rec = Recorder::default();

        let out = present(&sol, &View::default(), &mut rec).unwrap();

        assert!(std::ptr::eq(out, &sol));
        assert_eq!(rec.frames.len(), 1);
    }

    #[test]
    fn averages_figure() {
        let sol = Solution {
            t: Array1::linspace(0., 1., 3),
            trajectories: Array3::ones((4, 3, 3)),
        };
        let mut rec = Recorder::default();

        present_averages(&sol, &mut rec).unwrap();
        assert!(rec.frames[0].contains("\"histogram\""));
    }
}
