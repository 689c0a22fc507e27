//! Streams of planet positions and pairwise distances over a time horizon.
//!
//! Nothing here keeps history around: every [Ephemeris] and
//! [DistanceRecord] is produced on demand and can be dropped as soon as the
//! consumer has folded it in.

mod schedule;

use std::collections::HashSet;

use itertools::Itertools;
use nalgebra::Vector3;
use tracing::debug;

use crate::astro::{Planet, PlanetID};
use crate::error::{SimError, SimResult};

pub use schedule::{SamplingMode, Schedule, Times};

/// Positions of every planet at one instant.
#[derive(Debug, Clone)]
pub struct Ephemeris {
    pub time: f64,
    /// Indexed by [PlanetID]
    pub positions: Vec<Vector3<f64>>,
}

/// Distance between planets `a` and `b` at `time`. Only stored one way round,
/// with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRecord {
    pub time: f64,
    pub a: PlanetID,
    pub b: PlanetID,
    pub distance: f64,
}

impl Ephemeris {
    pub fn at(planets: &[Planet], time: f64) -> Self {
        Ephemeris {
            time,
            positions: planets.iter().map(|p| p.position(time)).collect(),
        }
    }

    pub fn distance(&self, a: PlanetID, b: PlanetID) -> f64 {
        (self.positions[a.0] - self.positions[b.0]).norm()
    }

    pub fn records(&self) -> impl Iterator<Item = DistanceRecord> + '_ {
        (0..self.positions.len())
            .tuple_combinations::<(usize, usize)>()
            .map(move |(i, j)| self.record(PlanetID(i), PlanetID(j)))
    }

    pub fn into_records(self) -> impl Iterator<Item = DistanceRecord> {
        (0..self.positions.len())
            .tuple_combinations::<(usize, usize)>()
            .map(move |(i, j)| self.record(PlanetID(i), PlanetID(j)))
    }

    fn record(&self, a: PlanetID, b: PlanetID) -> DistanceRecord {
        DistanceRecord {
            time: self.time,
            a,
            b,
            distance: self.distance(a, b),
        }
    }
}

/// Samples a fixed set of planets according to a [Schedule].
///
/// The sampler borrows its planets, so several samplers (e.g. one per chunk)
/// can share them.
#[derive(Debug, Clone)]
pub struct DistanceSampler<'p> {
    planets: &'p [Planet],
    schedule: Schedule,
}

impl<'p> DistanceSampler<'p> {
    pub fn new(planets: &'p [Planet], schedule: Schedule) -> SimResult<Self> {
        validate_planets(planets)?;
        debug!(
            planets = planets.len(),
            samples = schedule.len(),
            horizon = schedule.horizon(),
            mode = ?schedule.mode(),
            "built distance sampler"
        );
        Ok(DistanceSampler { planets, schedule })
    }

    pub fn planets(&self) -> &'p [Planet] {
        self.planets
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn pair_count(&self) -> usize {
        let n = self.planets.len();
        n * (n - 1) / 2
    }

    /// Lazily computes the positions of every planet at each sample time.
    /// Calling this again restarts from the first sample.
    pub fn ephemerides(&self) -> impl Iterator<Item = Ephemeris> + 'p {
        let planets = self.planets;
        self.schedule
            .times()
            .map(move |time| Ephemeris::at(planets, time))
    }

    /// Every unordered pair at every sample time, one record at a time.
    pub fn records(&self) -> impl Iterator<Item = DistanceRecord> + 'p {
        self.ephemerides().flat_map(Ephemeris::into_records)
    }

    /// Partitions the horizon into at most `parts` disjoint samplers that
    /// together visit exactly the same times as this one.
    pub fn chunks(&self, parts: usize) -> Vec<DistanceSampler<'p>> {
        self.schedule
            .split(parts)
            .into_iter()
            .map(|schedule| DistanceSampler {
                planets: self.planets,
                schedule,
            })
            .collect()
    }
}

pub(crate) fn validate_planets(planets: &[Planet]) -> SimResult<()> {
    if planets.len() < 2 {
        return Err(SimError::invalid(format!(
            "need at least two planets, got {}",
            planets.len()
        )));
    }

    let mut seen = HashSet::new();
    for planet in planets {
        if !seen.insert(planet.name()) {
            return Err(SimError::invalid(format!(
                "duplicate planet name {:?}",
                planet.name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::astro::distance;

    fn three_planets() -> Vec<Planet> {
        vec![
            Planet::circular("Mercury", 0.39, 88.0, 0.0).unwrap(),
            Planet::circular("Venus", 0.72, 225.0, 1.0).unwrap(),
            Planet::circular("Earth", 1.0, 365.0, 2.0).unwrap(),
        ]
    }

    #[test]
    fn test_rejects_bad_planet_sets() {
        let schedule = Schedule::new(10.0, SamplingMode::Grid { steps: 10 }).unwrap();
        let planets = three_planets();

        assert!(matches!(
            DistanceSampler::new(&planets[..1], schedule.clone()),
            Err(SimError::InvalidParameter(_))
        ));

        let twins = vec![planets[0].clone(), planets[0].clone()];
        assert!(matches!(
            DistanceSampler::new(&twins, schedule),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_record_stream() {
        let planets = three_planets();
        let schedule = Schedule::new(100.0, SamplingMode::Grid { steps: 5 }).unwrap();
        let sampler = DistanceSampler::new(&planets, schedule).unwrap();
        assert_eq!(sampler.pair_count(), 3);

        let records: Vec<DistanceRecord> = sampler.records().collect();
        assert_eq!(records.len(), 15);

        for record in &records {
            assert!(record.a < record.b);
            let expected = distance(&planets[record.a.0], &planets[record.b.0], record.time);
            assert_relative_eq!(record.distance, expected);
        }

        // All pairs of one epoch come out together
        let first_epoch: Vec<_> = records[..3].iter().map(|r| (r.a.0, r.b.0)).collect();
        assert_eq!(first_epoch, vec![(0, 1), (0, 2), (1, 2)]);
        assert!(records[..3].iter().all(|r| r.time == 0.0));

        // And the stream restarts
        assert_eq!(records, sampler.records().collect::<Vec<_>>());
    }

    #[test]
    fn test_ephemeris() {
        let planets = three_planets();
        let ephemeris = Ephemeris::at(&planets, 42.0);
        assert_eq!(ephemeris.positions.len(), 3);
        assert_eq!(ephemeris.distance(PlanetID(1), PlanetID(1)), 0.0);
        assert_eq!(
            ephemeris.distance(PlanetID(0), PlanetID(2)),
            ephemeris.distance(PlanetID(2), PlanetID(0))
        );
        assert_eq!(ephemeris.records().count(), 3);
    }

    #[test]
    fn test_chunks_visit_same_records() {
        let planets = three_planets();
        let schedule = Schedule::new(
            1000.0,
            SamplingMode::MonteCarlo {
                samples: 333,
                seed: 11,
            },
        )
        .unwrap();
        let sampler = DistanceSampler::new(&planets, schedule).unwrap();

        let whole: Vec<_> = sampler.records().collect();
        let chunked: Vec<_> = sampler.chunks(4).iter().flat_map(|c| c.records()).collect();
        assert_eq!(whole, chunked);
    }
}
