pub mod analysis;
pub mod astro;
pub mod config;
pub mod consts;
pub mod error;
pub mod file;
pub mod math;
pub mod sampling;
pub mod simulation;

pub use error::{SimError, SimResult};
