//! Serializable description of a simulation run.

use serde::{Deserialize, Serialize};

use crate::astro::{Orbit, Planet};
use crate::consts::{DEFAULT_HORIZON_DAYS, DEFAULT_SAMPLES, DEFAULT_SEED, INNER_PLANETS};
use crate::error::SimResult;
use crate::sampling::{SamplingMode, Schedule};

/// Orbital parameters of one planet. Angles are in radians; everything
/// except name, radius and period defaults to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub name: String,
    /// Semi-major axis, AU
    pub radius: f64,
    /// Days
    pub period: f64,
    #[serde(default)]
    pub phase: f64,
    #[serde(default)]
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination: f64,
    #[serde(default)]
    pub long_asc_node: f64,
    #[serde(default)]
    pub arg_periapsis: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Grid,
    MonteCarlo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub planets: Vec<PlanetConfig>,
    /// Days
    pub horizon: f64,
    /// Grid steps or Monte Carlo samples, depending on `mode`
    pub step_or_sample_count: u64,
    pub mode: Mode,
    /// Only used in Monte Carlo mode. Defaults to 0.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl PlanetConfig {
    pub fn circular(name: &str, radius: f64, period: f64, phase: f64) -> Self {
        PlanetConfig {
            name: name.to_owned(),
            radius,
            period,
            phase,
            eccentricity: 0.0,
            inclination: 0.0,
            long_asc_node: 0.0,
            arg_periapsis: 0.0,
        }
    }

    pub fn to_planet(&self) -> SimResult<Planet> {
        let orbit = Orbit::from_kepler(
            self.radius,
            self.eccentricity,
            self.period,
            self.phase,
            self.inclination,
            self.long_asc_node,
            self.arg_periapsis,
        )?;
        Planet::new(self.name.clone(), orbit)
    }
}

impl SimulationConfig {
    /// Mercury through Mars on circular orbits, sampled at random over a
    /// century.
    pub fn inner_planets() -> Self {
        SimulationConfig {
            planets: INNER_PLANETS
                .iter()
                .map(|&(name, radius, period, phase)| {
                    PlanetConfig::circular(name, radius, period, phase)
                })
                .collect(),
            horizon: DEFAULT_HORIZON_DAYS,
            step_or_sample_count: DEFAULT_SAMPLES,
            mode: Mode::MonteCarlo,
            seed: Some(DEFAULT_SEED),
        }
    }

    pub fn sampling_mode(&self) -> SamplingMode {
        match self.mode {
            Mode::Grid => SamplingMode::Grid {
                steps: self.step_or_sample_count,
            },
            Mode::MonteCarlo => SamplingMode::MonteCarlo {
                samples: self.step_or_sample_count,
                seed: self.seed.unwrap_or(0),
            },
        }
    }

    pub fn planets(&self) -> SimResult<Vec<Planet>> {
        self.planets.iter().map(PlanetConfig::to_planet).collect()
    }

    pub fn schedule(&self) -> SimResult<Schedule> {
        Schedule::new(self.horizon, self.sampling_mode())
    }
}
