use std::f64::consts::{PI, TAU};

use crate::error::SimResult;
use crate::math::root_finding::{find_root_bracket, newton_plus_bisection};

const KEPLER_ITERATIONS: usize = 100;

/// Wraps an angle into `[-pi, pi)`.
pub fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly.
/// The result lies within `e` of the normalized mean anomaly.
pub fn mean_to_eccentric(mean_anomaly: f64, e: f64) -> SimResult<f64> {
    debug_assert!((0.0..1.0).contains(&e));

    let mean_anomaly = normalize_angle(mean_anomaly);
    if e == 0.0 {
        return Ok(mean_anomaly);
    }

    // |E - M| = e |sin E| <= e, so the first bracket we try already works
    let kepler = |x: f64| -> f64 { x - e * x.sin() - mean_anomaly };
    let kepler_der = |x: f64| -> f64 { 1.0 - e * x.cos() };
    let bracket = find_root_bracket(kepler, mean_anomaly, e + 0.1, KEPLER_ITERATIONS)?;

    newton_plus_bisection(|x| (kepler(x), kepler_der(x)), bracket, KEPLER_ITERATIONS)
}

pub fn eccentric_to_mean(eccentric_anomaly: f64, e: f64) -> f64 {
    eccentric_anomaly - e * eccentric_anomaly.sin()
}

pub fn eccentric_to_true(eccentric_anomaly: f64, e: f64) -> f64 {
    // tan(theta/2) = sqrt((1+e)/(1-e)) tan(E/2), written with atan2 so the
    // result stays on the same branch as E
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}

pub fn true_to_eccentric(true_anomaly: f64, e: f64) -> f64 {
    let half = true_anomaly / 2.0;
    2.0 * ((1.0 - e).sqrt() * half.sin()).atan2((1.0 + e).sqrt() * half.cos())
}

pub fn mean_to_true(mean_anomaly: f64, ecc: f64) -> SimResult<f64> {
    Ok(eccentric_to_true(mean_to_eccentric(mean_anomaly, ecc)?, ecc))
}

pub fn true_to_mean(true_anomaly: f64, ecc: f64) -> f64 {
    eccentric_to_mean(true_to_eccentric(true_anomaly, ecc), ecc)
}
