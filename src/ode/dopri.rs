//! Dormand–Prince 5(4) integrator with adaptive step-size control.
//!
//! Specialised to three-dimensional state vectors. The solver
//! never steps past a requested output time, so every grid point is hit
//! exactly instead of interpolated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Vec3 = [f64; 3];

/// Right-hand side of `dy/dt = f(t, y)`.
pub trait VectorField {
    fn eval(&self, t: f64, y: &Vec3) -> Vec3;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepFailure {
    #[error("step size underflow at t={t} (h={h:e})")]
    StepSizeUnderflow { t: f64, h: f64 },

    #[error("exceeded {max_steps} steps between t={from} and t={to}")]
    TooManySteps { max_steps: usize, from: f64, to: f64 },

    #[error("output times must be increasing, got {prev} then {next}")]
    UnorderedOutput { prev: f64, next: f64 },
}

/// Error tolerances and work limits for the adaptive solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    pub rtol: f64,
    pub atol: f64,
    /// Budget of attempted steps between two consecutive output times.
    pub max_steps: usize,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            rtol: 1.49012e-8,
            atol: 1.49012e-8,
            max_steps: 500,
        }
    }
}

const C2: f64 = 1. / 5.;
const C3: f64 = 3. / 10.;
const C4: f64 = 4. / 5.;
const C5: f64 = 8. / 9.;

const A21: f64 = 1. / 5.;
const A31: f64 = 3. / 40.;
const A32: f64 = 9. / 40.;
const A41: f64 = 44. / 45.;
const A42: f64 = -56. / 15.;
const A43: f64 = 32. / 9.;
const A51: f64 = 19372. / 6561.;
const A52: f64 = -25360. / 2187.;
const A53: f64 = 64448. / 6561.;
const A54: f64 = -212. / 729.;
const A61: f64 = 9017. / 3168.;
const A62: f64 = -355. / 33.;
const A63: f64 = 46732. / 5247.;
const A64: f64 = 49. / 176.;
const A65: f64 = -5103. / 18656.;
const A71: f64 = 35. / 384.;
const A73: f64 = 500. / 1113.;
const A74: f64 = 125. / 192.;
const A75: f64 = -2187. / 6784.;
const A76: f64 = 11. / 84.;

// Difference between the 5th and embedded 4th order weights.
const E1: f64 = 71. / 57600.;
const E3: f64 = -71. / 16695.;
const E4: f64 = 71. / 1920.;
const E5: f64 = -17253. / 339200.;
const E6: f64 = 22. / 525.;
const E7: f64 = -1. / 40.;

const SAFETY: f64 = 0.9;
const FAC_MIN: f64 = 0.2;
const FAC_MAX: f64 = 10.0;

fn axpy(y: &Vec3, terms: &[(f64, &Vec3)], h: f64) -> Vec3 {
    let mut out = *y;
    for (c, k) in terms {
        for i in 0..3 {
            out[i] += h * c * k[i];
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct Dopri5 {
    tol: Tolerances,
    /// Number of accepted steps over the last `solve` call.
    pub accepted: usize,
    /// Number of rejected steps over the last `solve` call.
    pub rejected: usize,
}

impl Dopri5 {
    pub fn new(tol: Tolerances) -> Self {
        Self {
            tol,
            accepted: 0,
            rejected: 0,
        }
    }

    fn scale(&self, a: &Vec3, b: &Vec3) -> Vec3 {
        let mut sc = [0.; 3];
        for i in 0..3 {
            sc[i] = self.tol.atol + self.tol.rtol * a[i].abs().max(b[i].abs());
        }
        sc
    }

    fn rms(v: &Vec3, sc: &Vec3) -> f64 {
        let sum: f64 = (0..3).map(|i| (v[i] / sc[i]).powi(2)).sum();
        (sum / 3.).sqrt()
    }

    /// Starting step guess (Hairer, Nørsett & Wanner, II.4).
    fn initial_step(&self, f: &impl VectorField, t: f64, y: &Vec3, f0: &Vec3, span: f64) -> f64 {
        let sc = self.scale(y, y);
        let d0 = Self::rms(y, &sc);
        let d1 = Self::rms(f0, &sc);

        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        };
        let h0 = h0.min(span);

        let y1 = axpy(y, &[(1., f0)], h0);
        let f1 = f.eval(t + h0, &y1);
        let diff = [f1[0] - f0[0], f1[1] - f0[1], f1[2] - f0[2]];
        let d2 = Self::rms(&diff, &sc) / h0;

        let d = d1.max(d2);
        let h1 = if d <= 1e-15 || !d.is_finite() {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d).powf(1. / 5.)
        };

        (100. * h0).min(h1).min(span)
    }

    /// Integrate from `times[0]` with state `y0`, returning the state at each
    /// entry of `times` (the first entry is `y0` itself).
    pub fn solve(
        &mut self,
        f: &impl VectorField,
        y0: Vec3,
        times: &[f64],
    ) -> Result<Vec<Vec3>, StepFailure> {
        self.accepted = 0;
        self.rejected = 0;

        let mut out = Vec::with_capacity(times.len());
        let Some((&t0, rest)) = times.split_first() else {
            return Ok(out);
        };
        out.push(y0);

        let mut t = t0;
        let mut y = y0;
        let mut k1 = f.eval(t, &y);
        let span = times.last().map_or(0., |&tn| tn - t0);
        let mut h = if span > 0. {
            self.initial_step(f, t, &y, &k1, span)
        } else {
            0.
        };

        for &t_next in rest {
            if t_next < t {
                return Err(StepFailure::UnorderedOutput {
                    prev: t,
                    next: t_next,
                });
            }

            let mut steps = 0;
            let mut reject_streak = false;

            while t < t_next {
                if steps >= self.tol.max_steps {
                    return Err(StepFailure::TooManySteps {
                        max_steps: self.tol.max_steps,
                        from: t,
                        to: t_next,
                    });
                }
                steps += 1;

                let remaining = t_next - t;
                let h_free = h;
                let last = h >= remaining;
                let h_step = if last { remaining } else { h };

                let min_step = 16. * f64::EPSILON * t.abs().max(t_next.abs());
                if h_step <= min_step && !last {
                    return Err(StepFailure::StepSizeUnderflow { t, h: h_step });
                }

                let k2 = f.eval(t + C2 * h_step, &axpy(&y, &[(A21, &k1)], h_step));
                let k3 = f.eval(
                    t + C3 * h_step,
                    &axpy(&y, &[(A31, &k1), (A32, &k2)], h_step),
                );
                let k4 = f.eval(
                    t + C4 * h_step,
                    &axpy(&y, &[(A41, &k1), (A42, &k2), (A43, &k3)], h_step),
                );
                let k5 = f.eval(
                    t + C5 * h_step,
                    &axpy(
                        &y,
                        &[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)],
                        h_step,
                    ),
                );
                let k6 = f.eval(
                    t + h_step,
                    &axpy(
                        &y,
                        &[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
                        h_step,
                    ),
                );
                let y_new = axpy(
                    &y,
                    &[(A71, &k1), (A73, &k3), (A74, &k4), (A75, &k5), (A76, &k6)],
                    h_step,
                );
                let k7 = f.eval(t + h_step, &y_new);

                let mut err_vec = [0.; 3];
                for i in 0..3 {
                    err_vec[i] = h_step
                        * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i]
                            + E7 * k7[i]);
                }
                let err = Self::rms(&err_vec, &self.scale(&y, &y_new));

                if err.is_finite() && err <= 1. {
                    self.accepted += 1;

                    t = if last { t_next } else { t + h_step };
                    y = y_new;
                    k1 = k7;

                    let fac = if err == 0. {
                        FAC_MAX
                    } else {
                        (SAFETY * err.powf(-1. / 5.)).clamp(FAC_MIN, FAC_MAX)
                    };
                    // No growth right after a rejection.
                    let fac = if reject_streak { fac.min(1.) } else { fac };
                    h = h_step * fac;
                    // A step shortened to land on an output time says nothing
                    // about the step the controller would have taken.
                    if last && h_step < h_free {
                        h = h.max(h_free);
                    }
                    reject_streak = false;
                } else {
                    self.rejected += 1;
                    reject_streak = true;

                    let fac = if err.is_finite() {
                        (SAFETY * err.powf(-1. / 5.)).clamp(FAC_MIN, 1.)
                    } else {
                        FAC_MIN
                    };
                    h = h_step * fac;

                    if h <= min_step {
                        return Err(StepFailure::StepSizeUnderflow { t, h });
                    }
                }
            }

            out.push(y);
        }

        Ok(out)
    }
}
