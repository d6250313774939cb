pub mod dopri;
pub mod grid;
