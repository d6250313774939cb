use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::ExplorerConfig;
use crate::ensemble::initial::InitialConditions;
use crate::ensemble::solution::{Solution, solve_lorenz};
use crate::envs::lorenz::LorenzParams;
use crate::error::Result;
use crate::ode::grid::TimeGrid;
use crate::present::{self, surface::Surface};
use crate::util::graph::View;

use super::events::{Command, ParamEvent};

/// The last successfully computed result, with the settings that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub params: LorenzParams,
    pub max_time: f64,
    pub trajectories: usize,
    pub solution: Solution,
}

/// Holds the current control values and recomputes on every change.
///
/// Events are processed one at a time: integrate, draw, cache. A failed
/// integration leaves the previous frame in place.
pub struct Explorer<S: Surface> {
    config: ExplorerConfig,
    initial: InitialConditions,
    surface: S,
    frame: Option<Frame>,
}

impl<S: Surface> Explorer<S> {
    pub fn new(config: ExplorerConfig, surface: S) -> Result<Self> {
        config.validate()?;
        let initial = config.initial_conditions();

        info!(
            seed = initial.seed(),
            points = initial.len(),
            spread = initial.spread(),
            "initial conditions generated"
        );

        Ok(Self {
            config,
            initial,
            surface,
            frame: None,
        })
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn params(&self) -> LorenzParams {
        self.config.params
    }

    pub fn view(&self) -> &View {
        &self.config.view
    }

    pub fn initial_conditions(&self) -> &InitialConditions {
        &self.initial
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Integrate with the current settings, draw, and cache the result.
    pub fn refresh(&mut self) -> Result<&Frame> {
        let c = &self.config;
        let grid = TimeGrid::for_horizon(c.max_time, c.samples_per_unit)?;
        let solution = solve_lorenz(&c.params, &self.initial, c.trajectories, &grid, c.tolerances)?;

        present::present(&solution, &c.view, &mut self.surface)?;

        info!(
            sigma = c.params.sigma,
            beta = c.params.beta,
            rho = c.params.rho,
            max_time = c.max_time,
            trajectories = c.trajectories,
            samples = solution.n_samples(),
            "frame updated"
        );

        Ok(self.frame.insert(Frame {
            params: c.params,
            max_time: c.max_time,
            trajectories: c.trajectories,
            solution,
        }))
    }

    /// Redraw the cached frame with the current view, computing it first if needed.
    pub fn redraw(&mut self) -> Result<&Frame> {
        let Some(frame) = self.frame.take() else {
            return self.refresh();
        };

        // Put the frame back before reporting a draw failure.
        let drawn =
            present::present(&frame.solution, &self.config.view, &mut self.surface).map(drop);
        let frame = self.frame.insert(frame);
        drawn?;
        Ok(frame)
    }

    pub fn apply(&mut self, event: ParamEvent) -> Result<&Frame> {
        match event {
            ParamEvent::Sigma(v) => self.config.params.sigma = v,
            ParamEvent::Beta(v) => self.config.params.beta = v,
            ParamEvent::Rho(v) => self.config.params.rho = v,
            ParamEvent::MaxTime(v) => self.config.max_time = v,
            ParamEvent::Trajectories(n) => self.config.trajectories = n,
            ParamEvent::Angle(v) => self.config.view.azimuth_deg = v,
        }

        if event.needs_solve() {
            self.refresh()
        } else {
            self.redraw()
        }
    }

    pub fn draw_averages(&mut self) -> Result<()> {
        if self.frame.is_none() {
            self.refresh()?;
        }
        if let Some(frame) = &self.frame {
            present::present_averages(&frame.solution, &mut self.surface)?;
        }
        Ok(())
    }

    /// Read commands line by line until `quit` or end of input.
    ///
    /// Errors from a single command are reported on `output` and the loop
    /// keeps going; only I/O failures on the streams end it early.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(output, "error: {e}")?;
                    continue;
                }
            };

            let outcome = match command {
                Command::Quit => break,
                Command::Set(event) => self.apply(event).map(describe),
                Command::Show => self.redraw().map(describe),
                Command::Averages => self.draw_averages().map(|_| "averages drawn".to_string()),
            };

            match outcome {
                Ok(status) => writeln!(output, "{status}")?,
                Err(e) => {
                    warn!(error = %e, "update failed");
                    writeln!(output, "error: {e}")?;
                }
            }
        }

        Ok(())
    }
}

fn describe(frame: &Frame) -> String {
    format!(
        "sigma={} beta={} rho={} max_time={} n={} samples={}",
        frame.params.sigma,
        frame.params.beta,
        frame.params.rho,
        frame.max_time,
        frame.trajectories,
        frame.solution.n_samples()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LorenzError;
    use crate::present::surface::Recorder;

    fn quick_config() -> ExplorerConfig {
        ExplorerConfig {
            max_time: 0.5,
            trajectories: 3,
            ..ExplorerConfig::default()
        }
    }

    #[test]
    fn no_frame_until_first_event() {
        let explorer = Explorer::new(quick_config(), Recorder::default()).unwrap();
        assert!(explorer.frame().is_none());
        assert!(explorer.surface().frames.is_empty());
    }

    #[test]
    fn param_change_recomputes_and_caches() {
        let mut explorer = Explorer::new(quick_config(), Recorder::default()).unwrap();

        let frame = explorer.apply(ParamEvent::Rho(15.)).unwrap();
        assert_eq!(frame.params.rho, 15.);
        assert_eq!(frame.solution.trajectories.dim(), (3, 3, 125));

        assert_eq!(explorer.surface().frames.len(), 1);
        assert_eq!(explorer.frame().unwrap().params.rho, 15.);
    }

    #[test]
    fn angle_reuses_cached_solution() {
        let mut explorer = Explorer::new(quick_config(), Recorder::default()).unwrap();
        let before = explorer.refresh().unwrap().solution.clone();

        let after = explorer.apply(ParamEvent::Angle(90.)).unwrap().solution.clone();

        assert_eq!(before, after);
        assert_eq!(explorer.view().azimuth_deg, 90.);
        assert_eq!(explorer.surface().frames.len(), 2);
        assert_ne!(explorer.surface().frames[0], explorer.surface().frames[1]);
    }

    #[test]
    fn failed_update_keeps_previous_frame() {
        let mut explorer = Explorer::new(quick_config(), Recorder::default()).unwrap();
        explorer.refresh().unwrap();

        assert!(explorer.apply(ParamEvent::Trajectories(0)).is_err());
        assert_eq!(explorer.frame().unwrap().trajectories, 3);
        assert_eq!(explorer.config().trajectories, 0);
    }

    #[test]
    fn oversized_horizon_is_an_error_not_a_panic() {
        let mut explorer = Explorer::new(quick_config(), Recorder::default()).unwrap();
        explorer.refresh().unwrap();

        let err = explorer.apply(ParamEvent::MaxTime(1e300)).unwrap_err();
        assert!(matches!(err, LorenzError::TooManySamples { .. }));
        assert_eq!(explorer.frame().unwrap().max_time, 0.5);
    }

    #[test]
    fn redraw_without_frame_computes_one() {
        let mut explorer = Explorer::new(quick_config(), Recorder::default()).unwrap();
        let frame = explorer.redraw().unwrap();
        assert_eq!(frame.trajectories, 3);
        assert_eq!(explorer.surface().frames.len(), 1);

        explorer.redraw().unwrap();
        assert_eq!(explorer.surface().frames.len(), 2);
    }

    #[test]
    fn run_processes_commands_in_order() {
        let mut explorer = Explorer::new(quick_config(), Recorder::default()).unwrap();
        let input = b"sigma 12\nbogus\nn 2\nangle 45\nhist\nquit\nrho 3\n";
        let mut output = Vec::new();

        explorer.run(&input[..], &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("sigma=12 "));
        assert!(lines[1].starts_with("error: unknown command"));
        assert!(lines[2].contains("n=2"));
        assert_eq!(lines[4], "averages drawn");

        // Nothing after `quit` is applied.
        assert_eq!(explorer.params().rho, 28.);
        assert_eq!(explorer.surface().frames.len(), 4);
    }
}
