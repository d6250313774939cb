use std::str::FromStr;

use crate::error::LorenzError;

use super::slider::{ANGLE, MAX_TIME, RHO, SIGMA, TRAJECTORIES};

/// A single control moved to a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEvent {
    Sigma(f64),
    Beta(f64),
    Rho(f64),
    MaxTime(f64),
    Trajectories(usize),
    Angle(f64),
}

impl ParamEvent {
    /// Whether the event changes the integrated result, not just its view.
    pub fn needs_solve(&self) -> bool {
        !matches!(self, ParamEvent::Angle(_))
    }
}

/// One line of input to the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Set(ParamEvent),
    /// Redraw the current frame.
    Show,
    /// Draw the time-average histograms of the current frame.
    Averages,
    Quit,
}

impl FromStr for Command {
    type Err = LorenzError;

    /// Accepts `name value` or `name=value`; values are clamped like a slider.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let unknown = || LorenzError::UnknownCommand(line.to_string());

        let (name, value) = match line.split_once(|c: char| c == '=' || c.is_whitespace()) {
            Some((n, v)) => (n.trim(), Some(v.trim().trim_start_matches('=').trim())),
            None => (line, None),
        };

        let Some(value) = value else {
            return match name.to_lowercase().as_str() {
                "show" | "draw" => Ok(Command::Show),
                "avg" | "averages" | "hist" => Ok(Command::Averages),
                "q" | "quit" | "exit" => Ok(Command::Quit),
                _ => Err(unknown()),
            };
        };

        let v: f64 = value.parse().map_err(|_| unknown())?;

        let event = match name.to_lowercase().as_str() {
            "sigma" => ParamEvent::Sigma(SIGMA.clamp(v)),
            "beta" => ParamEvent::Beta(v),
            "rho" => ParamEvent::Rho(RHO.clamp(v)),
            "time" | "max_time" | "t" => ParamEvent::MaxTime(MAX_TIME.clamp(v)),
            "n" | "trajectories" => ParamEvent::Trajectories(TRAJECTORIES.clamp_count(v)),
            "angle" | "azimuth" => ParamEvent::Angle(ANGLE.clamp(v)),
            _ => return Err(unknown()),
        };

        Ok(Command::Set(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_separators() {
        assert_eq!(
            "sigma 12".parse::<Command>().unwrap(),
            Command::Set(ParamEvent::Sigma(12.))
        );
        assert_eq!(
            "rho=20.5".parse::<Command>().unwrap(),
            Command::Set(ParamEvent::Rho(20.5))
        );
        assert_eq!(
            "  N = 5 ".parse::<Command>().unwrap(),
            Command::Set(ParamEvent::Trajectories(5))
        );
    }

    #[test]
    fn clamps_to_slider_range() {
        assert_eq!(
            "time 10".parse::<Command>().unwrap(),
            Command::Set(ParamEvent::MaxTime(4.))
        );
        assert_eq!(
            "angle -5".parse::<Command>().unwrap(),
            Command::Set(ParamEvent::Angle(0.))
        );
        // beta has no slider range.
        assert_eq!(
            "beta -7".parse::<Command>().unwrap(),
            Command::Set(ParamEvent::Beta(-7.))
        );
    }

    #[test]
    fn bare_commands() {
        assert_eq!("show".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("hist".parse::<Command>().unwrap(), Command::Averages);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "gamma 3".parse::<Command>(),
            Err(LorenzError::UnknownCommand(_))
        ));
        assert!("sigma abc".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn angle_skips_solve() {
        assert!(!ParamEvent::Angle(10.).needs_solve());
        assert!(ParamEvent::Rho(10.).needs_solve());
    }
}
