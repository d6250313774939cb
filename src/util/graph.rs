use ndarray::{Array2, Axis as NdAxis};
use plotly::color::Rgb;
use plotly::common::{Line, Mode};
use plotly::layout::{Axis, BarMode, Camera, Eye, LayoutScene};
use plotly::{Histogram, Layout, Plot, Scatter3D};
use serde::{Deserialize, Serialize};

use crate::ensemble::solution::Solution;

use super::palette;

/// Camera and canvas settings for the trajectory figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct View {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    /// Distance of the camera eye from the scene center, in plotly scene units.
    pub distance: f64,
    pub width: usize,
    pub height: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub z_range: (f64, f64),
}

impl Default for View {
    fn default() -> Self {
        Self {
            elevation_deg: 30.,
            azimuth_deg: 0.,
            distance: 2.,
            width: 800,
            height: 800,
            x_range: (-25., 25.),
            y_range: (-35., 35.),
            z_range: (5., 55.),
        }
    }
}

impl View {
    pub fn eye(&self) -> (f64, f64, f64) {
        let e = self.elevation_deg.to_radians();
        let a = self.azimuth_deg.to_radians();
        (
            self.distance * e.cos() * a.cos(),
            self.distance * e.cos() * a.sin(),
            self.distance * e.sin(),
        )
    }
}

fn hidden_axis(range: (f64, f64)) -> Axis {
    Axis::new().visible(false).range(vec![range.0, range.1])
}

/// One colored line per trajectory, axes hidden.
pub fn trajectory_plot(solution: &Solution, view: &View) -> Plot {
    let mut plot = Plot::new();
    let colors = palette::spaced(solution.n_trajectories());

    for (i, [r, g, b]) in colors.into_iter().enumerate() {
        let x = solution.coordinate(i, 0).to_vec();
        let y = solution.coordinate(i, 1).to_vec();
        let z = solution.coordinate(i, 2).to_vec();

        let trace = Scatter3D::new(x, y, z)
            .name(&format!("trajectory {i}"))
            .mode(Mode::Lines)
            .line(Line::new().color(Rgb::new(r, g, b)).width(1.))
            .show_legend(false);
        plot.add_trace(trace);
    }

    let scene = LayoutScene::new()
        .x_axis(hidden_axis(view.x_range))
        .y_axis(hidden_axis(view.y_range))
        .z_axis(hidden_axis(view.z_range))
        .camera(Camera::new().eye(Eye::from(view.eye())));

    plot.set_layout(
        Layout::new()
            .width(view.width)
            .height(view.height)
            .show_legend(false)
            .scene(scene),
    );
    plot
}

/// Overlaid histograms of the x, y and z columns of an `[n, 3]` average table.
pub fn histogram_of_averages(averages: &Array2<f64>, bins: usize) -> Plot {
    let mut plot = Plot::new();

    for (name, column) in ["x", "y", "z"].iter().zip(averages.axis_iter(NdAxis(1))) {
        let trace = Histogram::new(column.to_vec())
            .name(*name)
            .n_bins_x(bins)
            .opacity(0.6);
        plot.add_trace(trace);
    }

    plot.set_layout(Layout::new().bar_mode(BarMode::Overlay).show_legend(true));
    plot
}
