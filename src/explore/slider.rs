/// Range of one interactive control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

pub const ANGLE: Slider = Slider {
    name: "angle",
    min: 0.,
    max: 360.,
};

pub const MAX_TIME: Slider = Slider {
    name: "max_time",
    min: 0.1,
    max: 4.,
};

pub const TRAJECTORIES: Slider = Slider {
    name: "n",
    min: 0.,
    max: 50.,
};

pub const SIGMA: Slider = Slider {
    name: "sigma",
    min: 0.,
    max: 50.,
};

pub const RHO: Slider = Slider {
    name: "rho",
    min: 0.,
    max: 50.,
};

impl Slider {
    /// Snap a value into range; NaN is left alone for the solver to deal with.
    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_nan() { v } else { v.clamp(self.min, self.max) }
    }

    pub fn clamp_count(&self, v: f64) -> usize {
        let v = self.clamp(v.round());
        if v.is_nan() { 0 } else { v as usize }
    }
}
