pub mod lorenz;
