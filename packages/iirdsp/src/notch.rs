//! Second-order notch (band-reject) sections for narrowband interference
//! such as 50/60 Hz powerline noise.

use crate::biquad::{BiquadCoeffs, SectionSet, MAX_SECTIONS};
use crate::error::{IirError, Result};
use std::f64::consts::PI;

/// Notch section centred on `center_freq` (Hz).
///
/// `w0 = 2*pi*f0/fs`, `alpha = sin(w0) / (2Q)`,
/// `b = [1, -2cos(w0), 1]`, `a = [1 + alpha, -2cos(w0), 1 - alpha]`.
/// Parameters are validated by the design facade.
pub fn notch_section(center_freq: f64, q_factor: f64, sample_rate: f64) -> BiquadCoeffs {
    let w0 = 2.0 * PI * center_freq / sample_rate;
    let cos_w0 = w0.cos();
    let alpha = w0.sin() / (2.0 * q_factor);

    BiquadCoeffs::from_polynomials(
        [1.0, -2.0 * cos_w0, 1.0],
        [1.0 + alpha, -2.0 * cos_w0, 1.0 - alpha],
    )
}

/// One notch per harmonic of `fundamental` (1x, 2x, ...) that lies below Nyquist.
///
/// Harmonics at or above Nyquist are skipped. Asking for more notches below
/// Nyquist than the cascade holds is an `InvalidOrder` error. At most
/// `MAX_SECTIONS + 1` harmonics are visited whatever `harmonics` is.
pub fn harmonic_sections(
    fundamental: f64,
    q_factor: f64,
    harmonics: usize,
    sample_rate: f64,
) -> Result<SectionSet> {
    let nyquist = sample_rate / 2.0;
    let in_band = (1..=harmonics)
        .map(|h| fundamental * h as f64)
        .take_while(|&freq| freq < nyquist);

    let mut sections = SectionSet::new();
    for (i, freq) in in_band.enumerate() {
        if i == MAX_SECTIONS {
            return Err(IirError::InvalidOrder {
                order: harmonics,
                max: MAX_SECTIONS,
            });
        }
        sections.push(notch_section(freq, q_factor, sample_rate));
    }

    if sections.len() < harmonics {
        log::debug!(
            "Kept {} of {} harmonics below Nyquist ({} Hz)",
            sections.len(),
            harmonics,
            nyquist
        );
    }

    Ok(sections)
}
