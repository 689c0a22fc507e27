/// Online mean of a stream of samples, with the extrema seen so far.
///
/// Uses the incremental update `mean += (x - mean) / n`, so the history never
/// needs to be kept around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningMean {
    count: u64,
    mean: f64,
    min: f64,
    max: f64,
}

impl Default for RunningMean {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningMean {
    pub fn new() -> Self {
        RunningMean {
            count: 0,
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.mean += (value - self.mean) / self.count as f64;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Combines two partial means, weighting each by its sample count.
    pub fn merge(&mut self, other: &RunningMean) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let total = self.count + other.count;
        let (c1, c2) = (self.count as f64, other.count as f64);
        self.mean = (self.mean * c1 + other.mean * c2) / total as f64;
        self.count = total;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }
}

impl Extend<f64> for RunningMean {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for RunningMean {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut mean = RunningMean::new();
        mean.extend(iter);
        mean
    }
}
