use ndarray::Array1;

use crate::error::{LorenzError, Result};

/// Samples per unit of simulated time used when no density is configured.
pub const DEFAULT_SAMPLES_PER_UNIT: f64 = 250.;

/// Largest grid a single call may allocate.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Uniform output grid over `[0, max_time]`, both ends included.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Array1<f64>,
}

impl TimeGrid {
    pub fn linspace(max_time: f64, samples: usize) -> Result<Self> {
        if !(max_time.is_finite() && max_time > 0.) {
            return Err(LorenzError::InvalidHorizon(max_time));
        }

        if samples > MAX_SAMPLES {
            return Err(LorenzError::TooManySamples {
                requested: samples as f64,
                max: MAX_SAMPLES,
            });
        }

        let samples = samples.max(2);
        let mut times = Array1::linspace(0., max_time, samples);
        // linspace can land a hair off the end point.
        times[samples - 1] = max_time;

        Ok(Self { times })
    }

    /// `floor(samples_per_unit * max_time)` samples, at least two.
    pub fn for_horizon(max_time: f64, samples_per_unit: f64) -> Result<Self> {
        if !(max_time.is_finite() && max_time > 0.) {
            return Err(LorenzError::InvalidHorizon(max_time));
        }

        let samples = (samples_per_unit * max_time).floor();
        if samples > MAX_SAMPLES as f64 {
            return Err(LorenzError::TooManySamples {
                requested: samples,
                max: MAX_SAMPLES,
            });
        }
        let samples = if samples.is_finite() && samples > 0. {
            samples as usize
        } else {
            2
        };
        Self::linspace(max_time, samples)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn max_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        self.times
            .as_slice()
            .expect("linspace output is contiguous")
    }

    pub fn into_array(self) -> Array1<f64> {
        self.times
    }
}
