//! Cascaded Second-Order Sections
//!
//! A fixed-capacity chain of biquads. Streaming calls (`process_sample`,
//! `process_buffer`, `process_in_place`) never allocate and never fail, so they
//! can run from an interrupt or audio callback. Zero-phase filtering
//! (`filtfilt`) needs the whole signal and a scratch buffer and is offline-only.

use crate::biquad::{Biquad, BiquadCoeffs, MAX_SECTIONS};
use crate::error::{IirError, Result};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Cascaded second-order sections filter
///
/// A default-constructed cascade has no active sections and passes its input
/// through unchanged. Design calls that fail leave the cascade untouched, so a
/// caller that ignores a design error keeps running the previous design.
#[derive(Debug, Clone)]
pub struct SosFilter {
    sections: [Biquad; MAX_SECTIONS],
    num_sections: usize,
}

impl Default for SosFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl SosFilter {
    /// Create an empty (pass-through) cascade
    pub fn new() -> Self {
        Self {
            sections: [Biquad::default(); MAX_SECTIONS],
            num_sections: 0,
        }
    }

    /// Build a cascade directly from section coefficients.
    ///
    /// Returns `InvalidOrder` if more than `MAX_SECTIONS` sections are given.
    pub fn from_sections(coeffs: &[BiquadCoeffs]) -> Result<Self> {
        if coeffs.len() > MAX_SECTIONS {
            return Err(IirError::InvalidOrder {
                order: coeffs.len(),
                max: MAX_SECTIONS,
            });
        }
        let mut filter = Self::new();
        filter.load(coeffs);
        Ok(filter)
    }

    /// Replace the active sections and zero all state
    pub(crate) fn load(&mut self, coeffs: &[BiquadCoeffs]) {
        debug_assert!(coeffs.len() <= MAX_SECTIONS);
        let n = coeffs.len().min(MAX_SECTIONS);
        for (slot, c) in self.sections.iter_mut().zip(coeffs.iter().take(n)) {
            *slot = Biquad::new(*c);
        }
        for slot in &mut self.sections[n..] {
            *slot = Biquad::default();
        }
        self.num_sections = n;
    }

    /// Number of active sections
    pub fn num_sections(&self) -> usize {
        self.num_sections
    }

    /// Active sections in processing order
    pub fn sections(&self) -> &[Biquad] {
        &self.sections[..self.num_sections]
    }

    /// Copy of the active section coefficients
    pub fn coefficients(&self) -> Vec<BiquadCoeffs> {
        self.sections().iter().map(|s| *s.coeffs()).collect()
    }

    /// Reset all section states
    pub fn reset(&mut self) {
        for section in &mut self.sections[..self.num_sections] {
            section.reset();
        }
    }

    /// Process a single sample through all sections
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let mut output = input;
        for section in &mut self.sections[..self.num_sections] {
            output = section.process(output);
        }
        output
    }

    /// Filter `input` into `output`, sample by sample.
    ///
    /// State carries over from previous calls. Only the common prefix of the
    /// two slices is processed.
    pub fn process_buffer(&mut self, input: &[f64], output: &mut [f64]) {
        for (out, &x) in output.iter_mut().zip(input.iter()) {
            *out = self.process_sample(x);
        }
    }

    /// Filter a buffer in place
    pub fn process_in_place(&mut self, signal: &mut [f64]) {
        for sample in signal.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Process a signal and return a new array (original unchanged)
    pub fn filter(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&s| self.process_sample(s)).collect()
    }

    /// Zero-phase forward-backward filtering.
    ///
    /// Resets state, filters forward into a scratch buffer, resets again,
    /// filters the reversed scratch into `output` and reverses `output`.
    /// No edge padding is applied, so the first and last few time constants
    /// carry start-up transients.
    ///
    /// `output` is not written if the lengths differ or the scratch buffer
    /// cannot be allocated.
    pub fn filtfilt(&mut self, input: &[f64], output: &mut [f64]) -> Result<()> {
        if input.len() != output.len() {
            return Err(IirError::LengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }

        let mut scratch = scratch_buffer(input.len())?;

        self.reset();
        scratch.extend(input.iter().map(|&x| self.process_sample(x)));

        self.reset();
        scratch.reverse();
        self.process_buffer(&scratch, output);
        output.reverse();

        Ok(())
    }

    /// Zero-phase filtering where the output overwrites the input.
    ///
    /// The forward pass is fully materialized before `signal` is written.
    pub fn filtfilt_in_place(&mut self, signal: &mut [f64]) -> Result<()> {
        let mut scratch = scratch_buffer(signal.len())?;

        self.reset();
        scratch.extend(signal.iter().map(|&x| self.process_sample(x)));

        self.reset();
        for (out, &x) in signal.iter_mut().zip(scratch.iter().rev()) {
            *out = self.process_sample(x);
        }
        signal.reverse();

        Ok(())
    }

    /// Zero-phase filtering into a new vector
    pub fn filtfilt_vec(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let mut output = signal.to_vec();
        self.filtfilt_in_place(&mut output)?;
        Ok(output)
    }

    /// Complex frequency response of the cascade at `freq_hz`
    pub fn frequency_response(&self, freq_hz: f64, sample_rate: f64) -> Complex64 {
        cascade_response(
            self.sections().iter().map(|s| s.coeffs()),
            freq_hz,
            sample_rate,
        )
    }

    /// Magnitude response of the cascade at `freq_hz`
    pub fn magnitude(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        self.frequency_response(freq_hz, sample_rate).norm()
    }
}

/// Product of section responses at `z = exp(j*2*pi*f/fs)`
pub(crate) fn cascade_response<'a>(
    sections: impl Iterator<Item = &'a BiquadCoeffs>,
    freq_hz: f64,
    sample_rate: f64,
) -> Complex64 {
    let z = Complex64::from_polar(1.0, 2.0 * PI * freq_hz / sample_rate);
    sections.map(|c| c.response(z)).product()
}

fn scratch_buffer(len: usize) -> Result<Vec<f64>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        log::error!("filtfilt scratch allocation failed: {}", e);
        IirError::Allocation(len)
    })?;
    Ok(buf)
}
