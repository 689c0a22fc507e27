use super::intervals::Interval;
use crate::error::{SimError, SimResult};

/// Very primitive way to construct a bracket for future root-finding.
/// Simply doubles the radius until a bracket with opposite signs at the
/// endpoints is found.
pub fn find_root_bracket(
    f: impl Fn(f64) -> f64,
    center: f64,
    mut radius: f64,
    num_iterations: usize,
) -> SimResult<Interval> {
    let initial = Interval::around(center, radius);
    for _ in 0..num_iterations {
        let a = center - radius;
        let b = center + radius;

        if f(a) * f(b) < 0.0 {
            return Ok(Interval::new(a, b));
        }

        // Double the search radius
        radius *= 2.0;
    }

    Err(SimError::NoConvergence {
        iterations: num_iterations,
        interval: initial.to_string(),
    })
}

// Adapted from `rtsafe` in Numerical Recipes in C
#[allow(clippy::float_cmp)]
pub fn newton_plus_bisection(
    f_and_f_prime: impl Fn(f64) -> (f64, f64),
    mut interval: Interval,
    num_iterations: usize,
) -> SimResult<f64> {
    // Initial setup: we guess right in the middle of the interval. Also, we need to
    // determine which way f is oriented.
    let mut guess = interval.midpoint();
    let f_lo = f_and_f_prime(interval.lo()).0;
    if f_lo == 0.0 {
        return Ok(interval.lo());
    }
    if f_and_f_prime(interval.hi()).0 == 0.0 {
        return Ok(interval.hi());
    }
    let lo_is_neg = f_lo < 0.0;

    for _ in 0..num_iterations {
        let (f, f_prime) = f_and_f_prime(guess);
        if f == 0.0 {
            return Ok(guess);
        }

        interval = match (lo_is_neg, f < 0.0) {
            (true, true) => interval.split_right(guess),   // - - +
            (true, false) => interval.split_left(guess),   // - + +
            (false, true) => interval.split_left(guess),   // + - -
            (false, false) => interval.split_right(guess), // + + -
        };

        if interval.is_exhausted() {
            return Ok(guess);
        }

        // Newton steps that land outside the bracket (or on its edge) won't
        // shrink the search space, so fall back to the midpoint.
        let newton_guess = guess - f / f_prime;
        guess = if interval.contains(newton_guess)
            && newton_guess != interval.lo()
            && newton_guess != interval.hi()
        {
            newton_guess
        } else {
            interval.midpoint()
        };
    }

    Err(SimError::NoConvergence {
        iterations: num_iterations,
        interval: interval.to_string(),
    })
}
