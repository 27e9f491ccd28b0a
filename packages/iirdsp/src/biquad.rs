//! Second-Order Section (biquad)
//!
//! One recursive stage of a cascade, run in Direct Form II Transposed:
//!
//! ```text
//! y  = b0*x + z1
//! z1 = b1*x - a1*y + z2
//! z2 = b2*x - a2*y
//! ```
//!
//! Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Maximum number of second-order sections in a cascade
pub const MAX_SECTIONS: usize = 8;

/// Biquad coefficients, a0 normalized to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Pass-through section
    pub const IDENTITY: BiquadCoeffs = BiquadCoeffs {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Build coefficients from raw polynomials `b = [b0, b1, b2]`, `a = [a0, a1, a2]`,
    /// normalizing everything by `a0`.
    pub fn from_polynomials(b: [f64; 3], a: [f64; 3]) -> Self {
        let a0 = a[0];
        Self {
            b0: b[0] / a0,
            b1: b[1] / a0,
            b2: b[2] / a0,
            a1: a[1] / a0,
            a2: a[2] / a0,
        }
    }

    /// Evaluate the section transfer function at a point `z` of the z-plane
    pub fn response(&self, z: Complex64) -> Complex64 {
        let z1 = z.inv();
        let z2 = z1 * z1;
        let num = self.b0 + z1 * self.b1 + z2 * self.b2;
        let den = 1.0 + z1 * self.a1 + z2 * self.a2;
        num / den
    }

    /// Scale the numerator (section gain)
    pub fn scale(&mut self, gain: f64) {
        self.b0 *= gain;
        self.b1 *= gain;
        self.b2 *= gain;
    }

    /// Jury stability test for a second-order denominator
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// State for a single biquad section (Direct Form II Transposed)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadState {
    z1: f64,
    z2: f64,
}

/// Single biquad filter section
#[derive(Debug, Clone, Copy, Default)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    state: BiquadState,
}

impl Biquad {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            state: BiquadState::default(),
        }
    }

    /// Process a single sample using Direct Form II Transposed
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + self.state.z1;
        self.state.z1 = c.b1 * input - c.a1 * output + self.state.z2;
        self.state.z2 = c.b2 * input - c.a2 * output;
        output
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.state = BiquadState::default();
    }

    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }

    pub fn state(&self) -> (f64, f64) {
        (self.state.z1, self.state.z2)
    }
}

/// Fixed-capacity list of section coefficients produced by a design call.
///
/// Lives on the stack so designing a filter never touches the heap.
#[derive(Debug, Clone, Copy)]
pub struct SectionSet {
    coeffs: [BiquadCoeffs; MAX_SECTIONS],
    len: usize,
}

impl SectionSet {
    pub fn new() -> Self {
        Self {
            coeffs: [BiquadCoeffs::IDENTITY; MAX_SECTIONS],
            len: 0,
        }
    }

    /// Append a section; sections past capacity are dropped.
    pub fn push(&mut self, coeffs: BiquadCoeffs) {
        debug_assert!(self.len < MAX_SECTIONS, "section capacity exceeded");
        if self.len < MAX_SECTIONS {
            self.coeffs[self.len] = coeffs;
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[BiquadCoeffs] {
        &self.coeffs[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [BiquadCoeffs] {
        &mut self.coeffs[..self.len]
    }
}

impl Default for SectionSet {
    fn default() -> Self {
        Self::new()
    }
}
