pub mod initial;
pub mod solution;
