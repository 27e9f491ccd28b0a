//! Analog Butterworth prototype
//!
//! For order N the normalized (1 rad/s) prototype has its poles evenly spaced
//! on the unit circle in the left half of the s-plane:
//!
//! ```text
//! p_k = exp(j * pi * (2k + N + 1) / (2N)),  k = 0..N-1
//! ```

use crate::biquad::MAX_SECTIONS;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Maximum number of poles or zeros handled by the design pipeline
pub const MAX_ROOTS: usize = 2 * MAX_SECTIONS;

/// Fixed-capacity set of complex roots (poles or zeros)
#[derive(Debug, Clone, Copy)]
pub struct Roots {
    roots: [Complex64; MAX_ROOTS],
    len: usize,
}

impl Roots {
    pub fn new() -> Self {
        Self {
            roots: [Complex64::new(0.0, 0.0); MAX_ROOTS],
            len: 0,
        }
    }

    /// `count` copies of the same root
    pub fn repeated(root: Complex64, count: usize) -> Self {
        let mut roots = Self::new();
        for _ in 0..count {
            roots.push(root);
        }
        roots
    }

    pub fn push(&mut self, root: Complex64) {
        debug_assert!(self.len < MAX_ROOTS, "root capacity exceeded");
        if self.len < MAX_ROOTS {
            self.roots[self.len] = root;
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.roots[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Complex64> {
        self.as_slice().iter()
    }

    /// Apply `f` to every root
    pub fn map(&self, mut f: impl FnMut(Complex64) -> Complex64) -> Self {
        let mut out = Self::new();
        for &r in self.iter() {
            out.push(f(r));
        }
        out
    }
}

impl Default for Roots {
    fn default() -> Self {
        Self::new()
    }
}

/// Left-half-plane poles of the normalized Butterworth prototype of `order`.
///
/// `order` is validated by the caller; anything above `MAX_ROOTS` is truncated.
pub fn butterworth_poles(order: usize) -> Roots {
    let mut poles = Roots::new();
    let n = order.min(MAX_ROOTS);
    for k in 0..n {
        let theta = PI * (2 * k + n + 1) as f64 / (2 * n) as f64;
        poles.push(Complex64::new(theta.cos(), theta.sin()));
    }
    poles
}
