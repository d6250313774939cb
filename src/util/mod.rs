pub mod graph;
pub mod palette;
pub mod stats;
