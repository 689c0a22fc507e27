//! Folding distance streams into per-planet nearest-neighbour statistics.

mod report;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::trace;

use crate::astro::{Planet, PlanetID};
use crate::error::{SimError, SimResult};
use crate::math::stats::RunningMean;
use crate::sampling::{validate_planets, DistanceRecord, Ephemeris};

pub use report::{NeighborStats, PlanetSummary, Report};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnalyzerState {
    Accumulating,
    Finalized,
}

/// Running mean of every pairwise distance, plus a tally of which planet was
/// nearest at each recorded epoch.
///
/// Memory use depends only on the number of planets. Once [finalize] has
/// succeeded the analyzer refuses any further input.
///
/// [finalize]: AverageAnalyzer::finalize
#[derive(Debug, Clone)]
pub struct AverageAnalyzer {
    names: Vec<String>,
    // Upper triangle of the pair matrix, row by row
    pairs: Vec<RunningMean>,
    // nearest[i][j]: epochs in which j was the nearest planet to i
    nearest: Vec<Vec<u64>>,
    epochs: u64,
    state: AnalyzerState,
}

impl AverageAnalyzer {
    pub fn new(planets: &[Planet]) -> SimResult<Self> {
        validate_planets(planets)?;

        let n = planets.len();
        Ok(AverageAnalyzer {
            names: planets.iter().map(|p| p.name().to_owned()).collect(),
            pairs: vec![RunningMean::new(); n * (n - 1) / 2],
            nearest: vec![vec![0; n]; n],
            epochs: 0,
            state: AnalyzerState::Accumulating,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_finalized(&self) -> bool {
        self.state == AnalyzerState::Finalized
    }

    /// Number of distance values folded in so far.
    pub fn sample_count(&self) -> u64 {
        self.pairs.iter().map(RunningMean::count).sum()
    }

    pub fn epochs(&self) -> u64 {
        self.epochs
    }

    pub fn pair_mean(&self, a: PlanetID, b: PlanetID) -> Option<&RunningMean> {
        if a == b || a.0 >= self.names.len() || b.0 >= self.names.len() {
            return None;
        }
        Some(&self.pairs[self.pair_index(a, b)])
    }

    pub fn record(&mut self, record: &DistanceRecord) -> SimResult<()> {
        self.check_accumulating("record")?;
        let idx = self.check_record(record)?;
        self.pairs[idx].push(record.distance);
        Ok(())
    }

    /// Records every pair of one epoch, and which planet was nearest to
    /// which at that instant.
    pub fn record_ephemeris(&mut self, ephemeris: &Ephemeris) -> SimResult<()> {
        self.check_accumulating("record")?;

        let n = self.names.len();
        if ephemeris.positions.len() != n {
            return Err(SimError::invalid(format!(
                "ephemeris has {} positions, expected {}",
                ephemeris.positions.len(),
                n
            )));
        }

        // Nothing is folded in unless the whole epoch is usable
        let samples = ephemeris
            .records()
            .map(|record| self.check_record(&record).map(|idx| (idx, record.distance)))
            .collect::<SimResult<Vec<_>>>()?;
        for (idx, distance) in samples {
            self.pairs[idx].push(distance);
        }

        for i in 0..n {
            let nearest = (0..n)
                .filter(|&j| j != i)
                .min_by(|&j, &k| {
                    let dj = ephemeris.distance(PlanetID(i), PlanetID(j));
                    let dk = ephemeris.distance(PlanetID(i), PlanetID(k));
                    self.tie_break(dj, j, dk, k)
                });
            if let Some(j) = nearest {
                self.nearest[i][j] += 1;
            }
        }
        self.epochs += 1;
        Ok(())
    }

    /// Folds in a partial analyzer built over the same planets, e.g. one that
    /// covered a different chunk of the horizon.
    pub fn merge(&mut self, other: AverageAnalyzer) -> SimResult<()> {
        self.check_accumulating("merge into")?;
        if other.is_finalized() {
            return Err(SimError::InvalidState(
                "cannot merge an analyzer that was already finalized".to_owned(),
            ));
        }
        if self.names != other.names {
            return Err(SimError::invalid(
                "cannot merge analyzers built over different planets",
            ));
        }

        for (mine, theirs) in self.pairs.iter_mut().zip(&other.pairs) {
            mine.merge(theirs);
        }
        for (mine, theirs) in self.nearest.iter_mut().zip(&other.nearest) {
            for (m, t) in mine.iter_mut().zip(theirs) {
                *m += t;
            }
        }
        self.epochs += other.epochs;

        trace!(samples = self.sample_count(), epochs = self.epochs, "merged partial analyzer");
        Ok(())
    }

    /// Produces the final report. Fails with [SimError::EmptySampleSet] if any
    /// pair has not been sampled yet, in which case more input may still be
    /// recorded. Succeeds at most once.
    pub fn finalize(&mut self) -> SimResult<Report> {
        self.check_accumulating("finalize")?;
        if self.pairs.iter().any(RunningMean::is_empty) {
            return Err(SimError::EmptySampleSet);
        }

        let n = self.names.len();
        let planets = (0..n).map(|i| self.summarize(i)).collect();
        self.state = AnalyzerState::Finalized;

        Ok(Report {
            epochs: self.epochs,
            planets,
        })
    }

    fn summarize(&self, i: usize) -> PlanetSummary {
        let others = (0..self.names.len()).filter(|&j| j != i);

        let mut neighbors = BTreeMap::new();
        for j in others.clone() {
            let stats = &self.pairs[self.pair_index(PlanetID(i), PlanetID(j))];
            neighbors.insert(
                self.names[j].clone(),
                NeighborStats {
                    mean_distance: stats.mean().unwrap_or(f64::NAN),
                    min_distance: stats.min().unwrap_or(f64::NAN),
                    max_distance: stats.max().unwrap_or(f64::NAN),
                    samples: stats.count(),
                    nearest_fraction: (self.epochs > 0)
                        .then(|| self.nearest[i][j] as f64 / self.epochs as f64),
                },
            );
        }

        let mean_to = |j: usize| neighbors[&self.names[j]].mean_distance;
        let closest = others
            .min_by(|&j, &k| self.tie_break(mean_to(j), j, mean_to(k), k))
            .map(|j| self.names[j].clone())
            .unwrap_or_default();

        PlanetSummary {
            name: self.names[i].clone(),
            closest,
            neighbors,
        }
    }

    /// Orders by value, then by planet name.
    fn tie_break(&self, value_j: f64, j: usize, value_k: f64, k: usize) -> Ordering {
        value_j
            .total_cmp(&value_k)
            .then_with(|| self.names[j].cmp(&self.names[k]))
    }

    fn pair_index(&self, a: PlanetID, b: PlanetID) -> usize {
        let (i, j) = if a < b { (a.0, b.0) } else { (b.0, a.0) };
        let n = self.names.len();
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Index of the record's pair, if the record is one we can fold in.
    fn check_record(&self, record: &DistanceRecord) -> SimResult<usize> {
        let n = self.names.len();
        if record.a == record.b || record.a.0 >= n || record.b.0 >= n {
            return Err(SimError::invalid(format!(
                "record refers to pair ({}, {}) but there are {} planets",
                record.a.0, record.b.0, n
            )));
        }
        if !record.distance.is_finite() || record.distance < 0.0 {
            return Err(SimError::invalid(format!(
                "distance must be finite and non-negative, got {}",
                record.distance
            )));
        }
        Ok(self.pair_index(record.a, record.b))
    }

    fn check_accumulating(&self, action: &str) -> SimResult<()> {
        match self.state {
            AnalyzerState::Accumulating => Ok(()),
            AnalyzerState::Finalized => Err(SimError::InvalidState(format!(
                "cannot {} an analyzer that was already finalized",
                action
            ))),
        }
    }
}
