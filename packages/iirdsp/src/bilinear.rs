//! Analog-to-digital conversion of Butterworth designs.
//!
//! Steps: pre-warp the cutoffs, map analog poles with the bilinear transform,
//! place the digital zeros for the band type, pair poles and zeros into
//! real-coefficient sections, then scale the first section so the passband
//! gain is exactly one.

use crate::analog::Roots;
use crate::biquad::{BiquadCoeffs, SectionSet};
use crate::sos::cascade_response;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Imaginary parts below this are treated as real roots
const REAL_TOLERANCE: f64 = 1e-10;

/// Below this passband magnitude normalization is skipped
const MIN_NORMALIZATION_GAIN: f64 = 1e-12;

/// Passband of a Butterworth design, dispatched once per design call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Lowpass,
    Highpass,
    /// Digital centre frequency (Hz) where the gain is normalized
    Bandpass { center_hz: f64 },
}

impl Band {
    /// Digital zeros for `num_poles` poles.
    ///
    /// Low-pass puts every zero at Nyquist (z = -1), high-pass at DC (z = +1).
    /// Band-pass alternates the two so each section gets one of each.
    pub fn zeros(&self, num_poles: usize) -> Roots {
        let nyquist = Complex64::new(-1.0, 0.0);
        let dc = Complex64::new(1.0, 0.0);
        match self {
            Band::Lowpass => Roots::repeated(nyquist, num_poles),
            Band::Highpass => Roots::repeated(dc, num_poles),
            Band::Bandpass { .. } => {
                let mut zeros = Roots::new();
                for i in 0..num_poles {
                    zeros.push(if i % 2 == 0 { nyquist } else { dc });
                }
                zeros
            }
        }
    }

    /// Frequency (Hz) at which the passband gain is set to one
    pub fn reference_hz(&self, sample_rate: f64) -> f64 {
        match self {
            Band::Lowpass => 0.0,
            Band::Highpass => sample_rate / 2.0,
            Band::Bandpass { center_hz } => *center_hz,
        }
    }
}

/// Pre-warp a cutoff in Hz to the analog angular frequency that the bilinear
/// transform maps back onto it: `2*fs*tan(pi*f/fs)`
pub fn prewarp(freq_hz: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * freq_hz / sample_rate).tan()
}

/// Inverse of [`prewarp`]: digital frequency (Hz) of an analog angular frequency
pub fn unwarp(omega: f64, sample_rate: f64) -> f64 {
    sample_rate / PI * (omega / (2.0 * sample_rate)).atan()
}

/// Bilinear transform of one s-plane root: `(1 + s/2fs) / (1 - s/2fs)`
pub fn bilinear(s: Complex64, sample_rate: f64) -> Complex64 {
    let k = 2.0 * sample_rate;
    (k + s) / (k - s)
}

/// Convert analog poles into a normalized cascade of digital sections.
pub fn discretize(analog_poles: &Roots, band: Band, sample_rate: f64) -> SectionSet {
    let digital = analog_poles.map(|p| bilinear(p, sample_rate));
    let zeros = band.zeros(digital.len());

    let mut sections = pair_sections(&digital, &zeros);
    normalize_gain(&mut sections, band.reference_hz(sample_rate), sample_rate);
    sections
}

/// Group conjugate pole pairs (and leftover real poles) into sections.
///
/// Conjugate pairs are represented by their upper-half-plane member. Real
/// poles are paired with each other; a final unpaired real pole becomes a
/// first-order section. Zeros are consumed in order, one per pole.
fn pair_sections(poles: &Roots, zeros: &Roots) -> SectionSet {
    let mut sections = SectionSet::new();
    let zeros = zeros.as_slice();
    let mut next_zero = 0;
    let mut take_zero = || {
        let z = zeros
            .get(next_zero)
            .copied()
            .unwrap_or_else(|| Complex64::new(0.0, 0.0));
        next_zero += 1;
        z
    };

    for &p in poles.iter().filter(|p| p.im > REAL_TOLERANCE) {
        let z1 = take_zero();
        let z2 = take_zero();
        sections.push(second_order_section(p, p.conj(), z1, z2));
    }

    let mut pending_real: Option<Complex64> = None;
    for &p in poles.iter().filter(|p| p.im.abs() <= REAL_TOLERANCE) {
        match pending_real.take() {
            Some(first) => {
                let z1 = take_zero();
                let z2 = take_zero();
                sections.push(second_order_section(first, p, z1, z2));
            }
            None => pending_real = Some(p),
        }
    }

    if let Some(p) = pending_real {
        let z = take_zero();
        sections.push(first_order_section(p.re, z.re));
    }

    sections
}

/// `(z - z1)(z - z2) / ((z - p1)(z - p2))` expanded into biquad coefficients
fn second_order_section(p1: Complex64, p2: Complex64, z1: Complex64, z2: Complex64) -> BiquadCoeffs {
    let b = [1.0, -(z1 + z2).re, (z1 * z2).re];
    let a = [1.0, -(p1 + p2).re, (p1 * p2).re];
    BiquadCoeffs::from_polynomials(b, a)
}

/// `(z - zero) / (z - pole)` stored in a biquad slot
fn first_order_section(pole: f64, zero: f64) -> BiquadCoeffs {
    BiquadCoeffs::from_polynomials([1.0, -zero, 0.0], [1.0, -pole, 0.0])
}

/// Divide the first section's numerator by the cascade magnitude at `reference_hz`
fn normalize_gain(sections: &mut SectionSet, reference_hz: f64, sample_rate: f64) {
    let gain = cascade_response(sections.as_slice().iter(), reference_hz, sample_rate).norm();

    if !gain.is_finite() || gain < MIN_NORMALIZATION_GAIN {
        log::warn!(
            "Passband gain {:e} at {} Hz too small to normalize, leaving sections unscaled",
            gain,
            reference_hz
        );
        return;
    }

    if let Some(first) = sections.as_mut_slice().first_mut() {
        first.scale(1.0 / gain);
    }
}
