//! Analog frequency transforms of the normalized low-pass prototype.
//!
//! All cutoffs are pre-warped angular frequencies (rad/s).

use crate::analog::Roots;
use num_complex::Complex64;

/// Low-pass with cutoff `wc`: `p -> wc * p`
pub fn lowpass(prototype: &Roots, wc: f64) -> Roots {
    prototype.map(|p| p * wc)
}

/// High-pass with cutoff `wc`: `p -> wc / p`
pub fn highpass(prototype: &Roots, wc: f64) -> Roots {
    prototype.map(|p| wc / p)
}

/// Band-pass between `wc_low` and `wc_high`.
///
/// Each prototype pole `p` yields the two roots of
/// `s^2 - p*BW*s + w0^2 = 0` with `w0^2 = wc_low * wc_high` and
/// `BW = wc_high - wc_low`, so N poles become 2N. The principal complex square
/// root covers both real and complex discriminants; since the transform maps
/// the left half-plane onto itself, both roots stay stable.
pub fn bandpass(prototype: &Roots, wc_low: f64, wc_high: f64) -> Roots {
    let bw = wc_high - wc_low;
    let w0_sq = wc_low * wc_high;

    let mut poles = Roots::new();
    for &p in prototype.iter() {
        let pb = p * bw;
        let disc = (pb * pb - 4.0 * w0_sq).sqrt();
        poles.push((pb + disc) * 0.5);
        poles.push((pb - disc) * 0.5);
    }
    poles
}

/// Geometric centre of a band in rad/s
pub fn geometric_center(wc_low: f64, wc_high: f64) -> f64 {
    (wc_low * wc_high).sqrt()
}

/// `true` if every root lies strictly in the left half-plane
pub fn all_stable(poles: &Roots) -> bool {
    poles.iter().all(|p: &Complex64| p.re < 0.0)
}
