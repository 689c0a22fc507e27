//! Keplerian orbits around a fixed Sun.
//!
//! The two important types in this module are:
//! - [Orbit], the time-parameterized orbital elements of a single body
//! - [Planet], a named, immutable body travelling along an [Orbit]
//!
//! Positions are pure functions of time, so any sample can be recomputed
//! independently of every other one.

mod orbit;
mod planet;

use nalgebra::Vector3;

pub use orbit::Orbit;
pub use planet::{Planet, PlanetID};

/// Heliocentric position of `planet` at elapsed time `time`.
pub fn position(planet: &Planet, time: f64) -> Vector3<f64> {
    planet.position(time)
}

/// Euclidean distance between two planets at the same instant.
pub fn distance(a: &Planet, b: &Planet, time: f64) -> f64 {
    (position(a, time) - position(b, time)).norm()
}
