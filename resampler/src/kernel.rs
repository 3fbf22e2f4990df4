//! Lanczos-windowed sinc interpolation kernel.
//!
//! The weight of an input sample at offset `x` (in input samples) from the
//! query position is `sinc(x) * lanczos_window(x, a)`, where `a` is the
//! filter window half-width. Outside `[-a, a]` the weight is 0.

use std::f64::consts::PI;

/// Normalized sinc: `sin(πx) / (πx)`, exactly 1 at `x == 0`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let pi_x = PI * x;
    pi_x.sin() / pi_x
}

/// Lanczos window of half-width `a`: `sinc(x / a)` inside `[-a, a]`, 0 outside.
#[inline]
pub fn lanczos_window(x: f64, a: f64) -> f64 {
    if x.abs() > a {
        return 0.0;
    }
    sinc(x / a)
}
