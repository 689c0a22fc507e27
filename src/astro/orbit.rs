use std::f64::consts::TAU;

use nalgebra::{Rotation3, Vector3};
use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::math::anomaly::mean_to_true;

/// A closed Keplerian orbit around a fixed central body, parameterized by
/// time rather than by gravitational parameter.
///
/// Units are up to the caller, but the rest of the crate uses AU and days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Semi-major axis. For circular orbits this is just the radius.
    semimajor_axis: f64,
    eccentricity: f64,
    period: f64,
    /// Mean anomaly at t = 0
    phase: f64,
    /// Moves the xy plane to the orbital plane, and x to point towards
    /// periapsis.
    rotation: Rotation3<f64>,
}

impl Orbit {
    pub fn circular(radius: f64, period: f64, phase: f64) -> SimResult<Self> {
        Self::from_kepler(radius, 0.0, period, phase, 0.0, 0.0, 0.0)
    }

    pub fn from_kepler(
        a: f64,
        ecc: f64,
        period: f64,
        phase: f64,
        incl: f64,
        lan: f64,
        argp: f64,
    ) -> SimResult<Self> {
        for (label, value) in [
            ("radius", a),
            ("eccentricity", ecc),
            ("period", period),
            ("phase", phase),
            ("inclination", incl),
            ("longitude of ascending node", lan),
            ("argument of periapsis", argp),
        ] {
            if !value.is_finite() {
                return Err(SimError::invalid(format!("{} must be finite, got {}", label, value)));
            }
        }
        if period <= 0.0 {
            return Err(SimError::invalid(format!("period must be positive, got {}", period)));
        }
        if a < 0.0 {
            return Err(SimError::invalid(format!("radius must be non-negative, got {}", a)));
        }
        if !(0.0..1.0).contains(&ecc) {
            return Err(SimError::invalid(format!(
                "eccentricity must be in [0, 1), got {}",
                ecc
            )));
        }

        Ok(Orbit {
            semimajor_axis: a,
            eccentricity: ecc,
            period,
            phase,
            rotation: rotation_from_angles(incl, lan, argp),
        })
    }

    // -- Orbital elements --

    pub fn semimajor_axis(&self) -> f64 {
        self.semimajor_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn rotation(&self) -> Rotation3<f64> {
        self.rotation
    }

    pub fn normal_vector(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }

    pub fn is_circular(&self) -> bool {
        self.eccentricity == 0.0
    }

    pub fn semilatus_rectum(&self) -> f64 {
        self.semimajor_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    pub fn periapsis(&self) -> f64 {
        self.semimajor_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis(&self) -> f64 {
        self.semimajor_axis * (1.0 + self.eccentricity)
    }

    // -- Positions --

    pub fn mean_motion(&self) -> f64 {
        TAU / self.period
    }

    pub fn mean_anomaly_at(&self, time: f64) -> f64 {
        self.mean_motion() * time + self.phase
    }

    pub fn position_at_theta(&self, theta: f64) -> Vector3<f64> {
        let radius = self.semilatus_rectum() / (1.0 + self.eccentricity * theta.cos());
        self.rotation * (radius * Vector3::new(theta.cos(), theta.sin(), 0.0))
    }

    /// Position at elapsed time `time`, relative to the central body.
    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        let mean_anomaly = self.mean_anomaly_at(time);
        if self.is_circular() {
            // Mean and true anomaly coincide, no need to go through Kepler
            return self.position_at_theta(mean_anomaly);
        }

        // The Kepler bracket always holds the root for e < 1, so this shouldn't
        // fail in practice
        let theta = match mean_to_true(mean_anomaly, self.eccentricity) {
            Ok(theta) => theta,
            Err(err) => {
                debug_assert!(false, "Kepler solve failed: {}", err);
                warn!(
                    eccentricity = self.eccentricity,
                    mean_anomaly,
                    %err,
                    "Kepler solve failed, falling back to the mean anomaly"
                );
                mean_anomaly
            }
        };
        self.position_at_theta(theta)
    }
}

fn rotation_from_angles(incl: f64, lan: f64, argp: f64) -> Rotation3<f64> {
    // We have an orbit in the xy plane where the periapsis is pointed along the
    // x-axis. So first, we rotate it around z until the periapsis is at argp
    // away from the x-axis (which will now be the ascending node). We then
    // rotate around x to get the inclination, and then one final turn around z
    // to get the correct longitude of the AN.
    Rotation3::from_axis_angle(&Vector3::z_axis(), lan)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), incl)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), argp)
}
