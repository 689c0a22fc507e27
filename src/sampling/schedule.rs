use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::error::{SimError, SimResult};

/// How sample times are chosen across the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// `steps` evenly spaced times `i * horizon / steps`
    Grid { steps: u64 },
    /// `samples` times drawn uniformly from `[0, horizon)`
    MonteCarlo { samples: u64, seed: u64 },
}

impl SamplingMode {
    pub fn sample_count(&self) -> u64 {
        match *self {
            SamplingMode::Grid { steps } => steps,
            SamplingMode::MonteCarlo { samples, .. } => samples,
        }
    }
}

/// A finite, restartable sequence of sample times.
///
/// A schedule covers a contiguous range of sample indices, so it can be split
/// into disjoint pieces which together reproduce the exact same times as the
/// whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    horizon: f64,
    mode: SamplingMode,
    indices: Range<u64>,
}

impl Schedule {
    pub fn new(horizon: f64, mode: SamplingMode) -> SimResult<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(SimError::invalid(format!(
                "horizon must be positive and finite, got {}",
                horizon
            )));
        }
        if mode.sample_count() == 0 {
            return Err(SimError::invalid("sample count must be at least 1"));
        }

        Ok(Schedule {
            horizon,
            mode,
            indices: 0..mode.sample_count(),
        })
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    pub fn indices(&self) -> Range<u64> {
        self.indices.clone()
    }

    pub fn len(&self) -> u64 {
        self.indices.end - self.indices.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits into at most `parts` contiguous, non-empty pieces of nearly
    /// equal size.
    pub fn split(&self, parts: usize) -> Vec<Schedule> {
        let parts = (parts.max(1) as u64).min(self.len().max(1));
        let base = self.len() / parts;
        let extra = self.len() % parts;

        let mut start = self.indices.start;
        (0..parts)
            .map(|k| {
                let size = base + u64::from(k < extra);
                let piece = Schedule {
                    horizon: self.horizon,
                    mode: self.mode,
                    indices: start..start + size,
                };
                start += size;
                piece
            })
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    pub fn times(&self) -> Times {
        match self.mode {
            SamplingMode::Grid { steps } => Times::Grid {
                step: self.horizon / steps as f64,
                indices: self.indices(),
            },
            SamplingMode::MonteCarlo { seed, .. } => {
                let mut rng = ChaChaRng::seed_from_u64(seed);
                // Each sample consumes one u64, i.e. two words of the stream
                rng.set_word_pos(2 * u128::from(self.indices.start));
                Times::MonteCarlo {
                    rng,
                    horizon: self.horizon,
                    remaining: self.len(),
                }
            }
        }
    }
}

/// Iterator over the times of a [Schedule].
#[derive(Debug, Clone)]
pub enum Times {
    Grid {
        step: f64,
        indices: Range<u64>,
    },
    MonteCarlo {
        rng: ChaChaRng,
        horizon: f64,
        remaining: u64,
    },
}

impl Iterator for Times {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Times::Grid { step, indices } => indices.next().map(|i| i as f64 * *step),
            Times::MonteCarlo {
                rng,
                horizon,
                remaining,
            } => {
                if *remaining == 0 {
                    return None;
                }
                *remaining -= 1;
                Some(rng.random::<f64>() * *horizon)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            Times::Grid { indices, .. } => indices.end - indices.start,
            Times::MonteCarlo { remaining, .. } => *remaining,
        } as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Times {}
