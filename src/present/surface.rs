use std::path::{Path, PathBuf};

use plotly::Plot;
use tracing::info;

use crate::error::Result;

/// Something a finished figure can be drawn onto.
pub trait Surface {
    fn draw(&mut self, plot: &Plot) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn draw(&mut self, plot: &Plot) -> Result<()> {
        (**self).draw(plot)
    }
}

/// Overwrites one HTML file on every draw.
#[derive(Debug, Clone)]
pub struct HtmlFile {
    path: PathBuf,
}

impl HtmlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Surface for HtmlFile {
    fn draw(&mut self, plot: &Plot) -> Result<()> {
        std::fs::write(&self.path, plot.to_html())?;
        info!(path = %self.path.display(), "figure written");
        Ok(())
    }
}

/// Opens each figure in the system browser.
#[derive(Debug, Clone, Default)]
pub struct Browser;

impl Surface for Browser {
    fn draw(&mut self, plot: &Plot) -> Result<()> {
        plot.show();
        Ok(())
    }
}

/// Keeps the JSON of every figure drawn, newest last.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub frames: Vec<String>,
}

impl Surface for Recorder {
    fn draw(&mut self, plot: &Plot) -> Result<()> {
        self.frames.push(plot.to_json());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = HtmlFile::new(dir.path().join("figure.html"));

        surface.draw(&Plot::new()).unwrap();
        surface.draw(&Plot::new()).unwrap();

        let html = std::fs::read_to_string(surface.path()).unwrap();
        assert!(html.contains("<html"));
    }

    #[test]
    fn html_file_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = HtmlFile::new(dir.path().join("missing").join("figure.html"));
        assert!(surface.draw(&Plot::new()).is_err());
    }

    #[test]
    fn boxed_surfaces_forward() {
        let mut boxed: Box<dyn Surface> = Box::new(Recorder::default());
        assert!(boxed.draw(&Plot::new()).is_ok());
    }

    #[test]
    fn recorder_keeps_order() {
        let mut rec = Recorder::default();
        rec.draw(&Plot::new()).unwrap();
        rec.draw(&Plot::new()).unwrap();
        assert_eq!(rec.frames.len(), 2);
    }
}
