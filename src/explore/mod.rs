//! Slider-driven recompute/redraw loop.

pub mod events;
pub mod explorer;
pub mod slider;
