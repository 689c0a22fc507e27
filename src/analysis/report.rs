use std::collections::BTreeMap;

use serde::Serialize;

/// What one planet saw of one other planet over the whole horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborStats {
    pub mean_distance: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub samples: u64,
    /// Share of sampled epochs in which this neighbour was the nearest one.
    /// Only known when whole epochs were recorded.
    pub nearest_fraction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetSummary {
    pub name: String,
    /// Neighbour with the smallest mean distance; ties go to the
    /// lexicographically smaller name.
    pub closest: String,
    pub neighbors: BTreeMap<String, NeighborStats>,
}

/// Final output of an analysis run, with planets in their original order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub epochs: u64,
    pub planets: Vec<PlanetSummary>,
}

impl PlanetSummary {
    pub fn closest_stats(&self) -> &NeighborStats {
        // `closest` is always one of the neighbours
        &self.neighbors[&self.closest]
    }
}

impl Report {
    pub fn planet(&self, name: &str) -> Option<&PlanetSummary> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn closest_to(&self, name: &str) -> Option<&str> {
        self.planet(name).map(|p| p.closest.as_str())
    }

    pub fn mean_distance(&self, a: &str, b: &str) -> Option<f64> {
        self.planet(a)?.neighbors.get(b).map(|n| n.mean_distance)
    }
}
