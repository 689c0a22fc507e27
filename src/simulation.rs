use rayon::prelude::*;
use tracing::{debug, info};

use crate::analysis::{AverageAnalyzer, Report};
use crate::astro::Planet;
use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::sampling::{validate_planets, DistanceSampler, Schedule};

/// A set of planets plus the schedule they'll be sampled on.
#[derive(Debug, Clone)]
pub struct Simulation {
    planets: Vec<Planet>,
    schedule: Schedule,
}

impl Simulation {
    pub fn new(planets: Vec<Planet>, schedule: Schedule) -> SimResult<Self> {
        validate_planets(&planets)?;
        Ok(Simulation { planets, schedule })
    }

    pub fn from_config(config: &SimulationConfig) -> SimResult<Self> {
        Self::new(config.planets()?, config.schedule()?)
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn sampler(&self) -> SimResult<DistanceSampler<'_>> {
        DistanceSampler::new(&self.planets, self.schedule.clone())
    }

    /// Samples the whole horizon on the current thread.
    pub fn run(&self) -> SimResult<Report> {
        info!(
            planets = self.planets.len(),
            samples = self.schedule.len(),
            "running simulation"
        );
        let mut analyzer = accumulate(&self.sampler()?)?;
        let report = analyzer.finalize()?;
        info!(epochs = report.epochs, "simulation finished");
        Ok(report)
    }

    /// Splits the horizon into `chunks` pieces, samples them on the rayon
    /// pool, and merges the partial results.
    pub fn run_parallel(&self, chunks: usize) -> SimResult<Report> {
        let pieces = self.sampler()?.chunks(chunks);
        info!(
            planets = self.planets.len(),
            samples = self.schedule.len(),
            chunks = pieces.len(),
            "running simulation in parallel"
        );

        let partials = pieces
            .par_iter()
            .map(accumulate)
            .collect::<SimResult<Vec<_>>>()?;

        let mut analyzer = AverageAnalyzer::new(&self.planets)?;
        for partial in partials {
            analyzer.merge(partial)?;
        }
        let report = analyzer.finalize()?;
        info!(epochs = report.epochs, "simulation finished");
        Ok(report)
    }
}

fn accumulate(sampler: &DistanceSampler<'_>) -> SimResult<AverageAnalyzer> {
    let indices = sampler.schedule().indices();
    debug!(start = indices.start, end = indices.end, "sampling chunk");

    let mut analyzer = AverageAnalyzer::new(sampler.planets())?;
    for ephemeris in sampler.ephemerides() {
        analyzer.record_ephemeris(&ephemeris)?;
    }
    Ok(analyzer)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::SimError;
    use crate::sampling::SamplingMode;

    fn small_config() -> SimulationConfig {
        let mut config = SimulationConfig::inner_planets();
        config.step_or_sample_count = 2_000;
        config
    }

    #[test]
    fn test_deterministic() {
        let sim = Simulation::from_config(&small_config()).unwrap();
        assert_eq!(sim.run().unwrap(), sim.run().unwrap());
    }

    #[test]
    fn test_parallel_matches_serial() {
        for mode in [
            SamplingMode::Grid { steps: 1_234 },
            SamplingMode::MonteCarlo {
                samples: 1_234,
                seed: 3,
            },
        ] {
            let config = small_config();
            let sim = Simulation::new(
                config.planets().unwrap(),
                Schedule::new(config.horizon, mode).unwrap(),
            )
            .unwrap();

            let serial = sim.run().unwrap();
            let parallel = sim.run_parallel(5).unwrap();

            assert_eq!(serial.epochs, parallel.epochs);
            for (s, p) in serial.planets.iter().zip(&parallel.planets) {
                assert_eq!(s.closest, p.closest);
                for (name, stats) in &s.neighbors {
                    let other = &p.neighbors[name];
                    assert_relative_eq!(
                        other.mean_distance,
                        stats.mean_distance,
                        max_relative = 1e-9
                    );
                    assert_eq!(other.min_distance, stats.min_distance);
                    assert_eq!(other.max_distance, stats.max_distance);
                    assert_eq!(other.nearest_fraction, stats.nearest_fraction);
                }
            }
        }
    }

    #[test]
    fn test_invalid_setup() {
        let mut config = small_config();
        config.planets.truncate(1);
        assert!(matches!(
            Simulation::from_config(&config),
            Err(SimError::InvalidParameter(_))
        ));

        let mut config = small_config();
        config.step_or_sample_count = 0;
        assert!(matches!(
            Simulation::from_config(&config),
            Err(SimError::InvalidParameter(_))
        ));
    }
}
