use nalgebra::Vector3;

use super::Orbit;
use crate::error::{SimError, SimResult};

/// Index of a planet within the set a sampler was built from.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanetID(pub usize);

/// A named body on a fixed orbit. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    name: String,
    orbit: Orbit,
}

impl Planet {
    pub fn new(name: impl Into<String>, orbit: Orbit) -> SimResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SimError::invalid("planet name must not be empty"));
        }
        Ok(Planet { name, orbit })
    }

    /// Shorthand for a planet on a circular, uninclined orbit.
    pub fn circular(
        name: impl Into<String>,
        radius: f64,
        period: f64,
        phase: f64,
    ) -> SimResult<Self> {
        Self::new(name, Orbit::circular(radius, period, phase)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn position(&self, time: f64) -> Vector3<f64> {
        self.orbit.position_at_time(time)
    }
}
