use std::f64::consts::PI;

pub const DAYS_PER_YEAR: f64 = 365.25;

// Semi-major axis (AU), sidereal period (days), and starting phase (rad).
// Venus and Mars start on the far side of the Sun.
pub const MERCURY: (&str, f64, f64, f64) = ("Mercury", 0.387, 87.969, 0.0);
pub const VENUS: (&str, f64, f64, f64) = ("Venus", 0.723, 224.701, PI);
pub const EARTH: (&str, f64, f64, f64) = ("Earth", 1.0, 365.256, 0.0);
pub const MARS: (&str, f64, f64, f64) = ("Mars", 1.524, 686.980, PI);

pub const INNER_PLANETS: [(&str, f64, f64, f64); 4] = [MERCURY, VENUS, EARTH, MARS];

pub const DEFAULT_HORIZON_DAYS: f64 = 100.0 * DAYS_PER_YEAR;
pub const DEFAULT_SAMPLES: u64 = 100_000;
pub const DEFAULT_SEED: u64 = 42;
