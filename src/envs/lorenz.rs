use serde::{Deserialize, Serialize};

use crate::ode::dopri::VectorField;

/// Point in (x, y, z) phase space.
pub type State = [f64; 3];

/// Coefficients of the Lorenz equations.
///
/// Values are taken as given: zero, negative or huge coefficients are all
/// legal and simply produce different (possibly degenerate) dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LorenzParams {
    pub sigma: f64,
    pub beta: f64,
    pub rho: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            beta: 8.0 / 3.0,
            rho: 28.0,
        }
    }
}

impl LorenzParams {
    pub fn new(sigma: f64, beta: f64, rho: f64) -> Self {
        Self { sigma, beta, rho }
    }

    pub fn derivative(&self, state: &State) -> State {
        let [x, y, z] = *state;

        // Lorenz ODEs
        let dx = self.sigma * (y - x);
        let dy = self.rho * x - y - x * z;
        let dz = -self.beta * z + x * y;

        [dx, dy, dz]
    }
}

impl VectorField for LorenzParams {
    fn eval(&self, _t: f64, y: &State) -> State {
        self.derivative(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_fixed_point() {
        let d = LorenzParams::default().derivative(&[0.0, 0.0, 0.0]);
        assert_eq!(d, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_coefficients_reduce_dynamics() {
        let p = LorenzParams::new(0.0, 0.0, 0.0);
        let [dx, dy, dz] = p.derivative(&[2.0, 3.0, 5.0]);

        assert_eq!(dx, 0.0);
        assert_eq!(dy, -3.0 - 2.0 * 5.0);
        assert_eq!(dz, 2.0 * 3.0);
    }

    #[test]
    fn symmetric_under_xy_flip() {
        let p = LorenzParams::default();
        let a = p.derivative(&[1.5, -2.0, 7.0]);
        let b = p.derivative(&[-1.5, 2.0, 7.0]);

        assert_eq!(a[0], -b[0]);
        assert_eq!(a[1], -b[1]);
        assert_eq!(a[2], b[2]);
    }
}
