//! Filter design entry points.
//!
//! Every call validates its parameters before computing anything. On error
//! the target cascade is left exactly as it was; on success its sections are
//! replaced and all state is zeroed. A caller that ignores the returned error
//! and keeps processing runs the previous (or empty, pass-through) cascade.
//!
//! Design calls never allocate, so redesigning a live filter is safe from a
//! real-time context as long as nothing processes it concurrently.

use crate::analog::{butterworth_poles, MAX_ROOTS};
use crate::bilinear::{discretize, prewarp, unwarp, Band};
use crate::biquad::MAX_SECTIONS;
use crate::error::{IirError, Result};
use crate::notch::{harmonic_sections, notch_section};
use crate::sos::SosFilter;
use crate::transform;

/// Highest low-pass/high-pass order (one pole per order)
pub const MAX_ORDER: usize = MAX_ROOTS;

/// Highest band-pass order (the transform doubles the pole count)
pub const MAX_BANDPASS_ORDER: usize = MAX_SECTIONS;

/// Butterworth low-pass of `order` with a -3 dB point at `cutoff_hz`
pub fn design_lowpass(
    filter: &mut SosFilter,
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
) -> Result<()> {
    validate_order(order, MAX_ORDER)?;
    validate_sample_rate(sample_rate)?;
    validate_cutoff("Cutoff", cutoff_hz, sample_rate)?;

    let wc = prewarp(cutoff_hz, sample_rate);
    let poles = transform::lowpass(&butterworth_poles(order), wc);
    let sections = discretize(&poles, Band::Lowpass, sample_rate);

    filter.load(sections.as_slice());
    log::debug!(
        "Designed lowpass: order {}, cutoff {} Hz, fs {} Hz, {} sections",
        order,
        cutoff_hz,
        sample_rate,
        sections.len()
    );
    Ok(())
}

/// Butterworth high-pass of `order` with a -3 dB point at `cutoff_hz`
pub fn design_highpass(
    filter: &mut SosFilter,
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
) -> Result<()> {
    validate_order(order, MAX_ORDER)?;
    validate_sample_rate(sample_rate)?;
    validate_cutoff("Cutoff", cutoff_hz, sample_rate)?;

    let wc = prewarp(cutoff_hz, sample_rate);
    let poles = transform::highpass(&butterworth_poles(order), wc);
    let sections = discretize(&poles, Band::Highpass, sample_rate);

    filter.load(sections.as_slice());
    log::debug!(
        "Designed highpass: order {}, cutoff {} Hz, fs {} Hz, {} sections",
        order,
        cutoff_hz,
        sample_rate,
        sections.len()
    );
    Ok(())
}

/// Butterworth band-pass of prototype `order` between `low_hz` and `high_hz`.
///
/// The result has `2 * order` poles in `order` sections.
pub fn design_bandpass(
    filter: &mut SosFilter,
    order: usize,
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
) -> Result<()> {
    validate_order(order, MAX_BANDPASS_ORDER)?;
    validate_sample_rate(sample_rate)?;
    validate_cutoff("Low cutoff", low_hz, sample_rate)?;
    validate_cutoff("High cutoff", high_hz, sample_rate)?;
    if low_hz >= high_hz {
        return Err(IirError::InvalidFrequency(format!(
            "Low cutoff ({} Hz) must be less than high cutoff ({} Hz)",
            low_hz, high_hz
        )));
    }

    let wc_low = prewarp(low_hz, sample_rate);
    let wc_high = prewarp(high_hz, sample_rate);
    let poles = transform::bandpass(&butterworth_poles(order), wc_low, wc_high);
    let center_hz = unwarp(transform::geometric_center(wc_low, wc_high), sample_rate);
    let sections = discretize(&poles, Band::Bandpass { center_hz }, sample_rate);

    filter.load(sections.as_slice());
    log::debug!(
        "Designed bandpass: order {}, {}-{} Hz (centre {:.3} Hz), fs {} Hz, {} sections",
        order,
        low_hz,
        high_hz,
        center_hz,
        sample_rate,
        sections.len()
    );
    Ok(())
}

/// Single-section notch at `center_hz` with quality factor `q_factor`
pub fn design_notch(
    filter: &mut SosFilter,
    center_hz: f64,
    q_factor: f64,
    sample_rate: f64,
) -> Result<()> {
    validate_quality(q_factor)?;
    validate_sample_rate(sample_rate)?;
    validate_cutoff("Notch frequency", center_hz, sample_rate)?;

    let coeffs = notch_section(center_hz, q_factor, sample_rate);
    filter.load(&[coeffs]);
    log::debug!(
        "Designed notch: {} Hz, Q {}, fs {} Hz",
        center_hz,
        q_factor,
        sample_rate
    );
    Ok(())
}

/// Notches at `fundamental_hz` and its harmonics up to `harmonics` (1 = fundamental only)
pub fn design_notch_harmonics(
    filter: &mut SosFilter,
    fundamental_hz: f64,
    q_factor: f64,
    harmonics: usize,
    sample_rate: f64,
) -> Result<()> {
    if harmonics == 0 {
        return Err(IirError::InvalidOrder {
            order: 0,
            max: MAX_SECTIONS,
        });
    }
    validate_quality(q_factor)?;
    validate_sample_rate(sample_rate)?;
    validate_cutoff("Notch frequency", fundamental_hz, sample_rate)?;

    let sections = harmonic_sections(fundamental_hz, q_factor, harmonics, sample_rate)?;
    filter.load(sections.as_slice());
    log::debug!(
        "Designed notch comb: {} Hz x{}, Q {}, fs {} Hz, {} sections",
        fundamental_hz,
        harmonics,
        q_factor,
        sample_rate,
        sections.len()
    );
    Ok(())
}

/// Digital centre frequency (Hz) of a band-pass design, where its gain is one
pub fn bandpass_center_hz(low_hz: f64, high_hz: f64, sample_rate: f64) -> f64 {
    let wc = transform::geometric_center(
        prewarp(low_hz, sample_rate),
        prewarp(high_hz, sample_rate),
    );
    unwarp(wc, sample_rate)
}

impl SosFilter {
    /// New Butterworth low-pass cascade
    pub fn lowpass(order: usize, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        let mut filter = Self::new();
        design_lowpass(&mut filter, order, cutoff_hz, sample_rate)?;
        Ok(filter)
    }

    /// New Butterworth high-pass cascade
    pub fn highpass(order: usize, cutoff_hz: f64, sample_rate: f64) -> Result<Self> {
        let mut filter = Self::new();
        design_highpass(&mut filter, order, cutoff_hz, sample_rate)?;
        Ok(filter)
    }

    /// New Butterworth band-pass cascade
    pub fn bandpass(order: usize, low_hz: f64, high_hz: f64, sample_rate: f64) -> Result<Self> {
        let mut filter = Self::new();
        design_bandpass(&mut filter, order, low_hz, high_hz, sample_rate)?;
        Ok(filter)
    }

    /// New notch cascade
    pub fn notch(center_hz: f64, q_factor: f64, sample_rate: f64) -> Result<Self> {
        let mut filter = Self::new();
        design_notch(&mut filter, center_hz, q_factor, sample_rate)?;
        Ok(filter)
    }
}

fn validate_order(order: usize, max: usize) -> Result<()> {
    if order == 0 || order > max {
        return Err(IirError::InvalidOrder { order, max });
    }
    Ok(())
}

fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if !(sample_rate > 0.0) || !sample_rate.is_finite() {
        return Err(IirError::InvalidFrequency(format!(
            "Sample rate ({} Hz) must be positive",
            sample_rate
        )));
    }
    Ok(())
}

fn validate_cutoff(label: &str, freq_hz: f64, sample_rate: f64) -> Result<()> {
    let nyquist = sample_rate / 2.0;
    if !(freq_hz > 0.0) {
        return Err(IirError::InvalidFrequency(format!(
            "{} ({} Hz) must be positive",
            label, freq_hz
        )));
    }
    if freq_hz >= nyquist {
        return Err(IirError::InvalidFrequency(format!(
            "{} ({} Hz) must be less than Nyquist ({} Hz)",
            label, freq_hz, nyquist
        )));
    }
    Ok(())
}

fn validate_quality(q_factor: f64) -> Result<()> {
    if !(q_factor > 0.0) || !q_factor.is_finite() {
        return Err(IirError::InvalidQuality(q_factor));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_counts() {
        for order in 1..=MAX_ORDER {
            let lp = SosFilter::lowpass(order, 40.0, 500.0).unwrap();
            let hp = SosFilter::highpass(order, 40.0, 500.0).unwrap();
            assert_eq!(lp.num_sections(), order.div_ceil(2));
            assert_eq!(hp.num_sections(), order.div_ceil(2));
        }
        for order in 1..=MAX_BANDPASS_ORDER {
            let bp = SosFilter::bandpass(order, 0.5, 40.0, 500.0).unwrap();
            assert_eq!(bp.num_sections(), order);
        }
    }

    #[test]
    fn test_order_bounds() {
        assert!(matches!(
            SosFilter::lowpass(0, 10.0, 100.0),
            Err(IirError::InvalidOrder { order: 0, .. })
        ));
        assert!(matches!(
            SosFilter::highpass(MAX_ORDER + 1, 10.0, 100.0),
            Err(IirError::InvalidOrder { .. })
        ));
        assert!(matches!(
            SosFilter::bandpass(MAX_BANDPASS_ORDER + 1, 1.0, 10.0, 100.0),
            Err(IirError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_nyquist_rejected_not_clamped() {
        assert!(matches!(
            SosFilter::lowpass(2, 50.0, 100.0),
            Err(IirError::InvalidFrequency(_))
        ));
        assert!(matches!(
            SosFilter::highpass(2, 75.0, 100.0),
            Err(IirError::InvalidFrequency(_))
        ));
        assert!(matches!(
            SosFilter::bandpass(2, 10.0, 50.0, 100.0),
            Err(IirError::InvalidFrequency(_))
        ));
        assert!(matches!(
            SosFilter::notch(50.0, 30.0, 100.0),
            Err(IirError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn test_invalid_frequencies() {
        assert!(SosFilter::lowpass(2, 0.0, 100.0).is_err());
        assert!(SosFilter::lowpass(2, -5.0, 100.0).is_err());
        assert!(SosFilter::lowpass(2, f64::NAN, 100.0).is_err());
        assert!(SosFilter::lowpass(2, 10.0, 0.0).is_err());
        assert!(SosFilter::lowpass(2, 10.0, f64::INFINITY).is_err());
        assert!(matches!(
            SosFilter::bandpass(2, 20.0, 20.0, 100.0),
            Err(IirError::InvalidFrequency(_))
        ));
        assert!(matches!(
            SosFilter::bandpass(2, 30.0, 20.0, 100.0),
            Err(IirError::InvalidFrequency(_))
        ));
    }

    #[test]
    fn test_notch_quality_validation() {
        assert!(matches!(
            SosFilter::notch(50.0, 0.0, 500.0),
            Err(IirError::InvalidQuality(_))
        ));
        assert!(matches!(
            SosFilter::notch(50.0, -1.0, 500.0),
            Err(IirError::InvalidQuality(_))
        ));
        assert!(matches!(
            SosFilter::notch(0.0, 30.0, 500.0),
            Err(IirError::InvalidFrequency(_))
        ));
        assert!(matches!(
            SosFilter::notch(50.0, 30.0, -500.0),
            Err(IirError::InvalidFrequency(_))
        ));
        assert_eq!(SosFilter::notch(50.0, 30.0, 500.0).unwrap().num_sections(), 1);
    }

    #[test]
    fn test_failed_redesign_keeps_previous_cascade() {
        let mut filter = SosFilter::lowpass(4, 40.0, 500.0).unwrap();
        let before = filter.coefficients();
        assert!(design_highpass(&mut filter, 4, 400.0, 500.0).is_err());
        assert_eq!(filter.coefficients(), before);
    }

    #[test]
    fn test_redesign_zeroes_state() {
        let mut filter = SosFilter::lowpass(2, 40.0, 500.0).unwrap();
        filter.process_sample(1.0);
        design_highpass(&mut filter, 2, 40.0, 500.0).unwrap();
        assert!(filter.sections().iter().all(|s| s.state() == (0.0, 0.0)));
    }

    #[test]
    fn test_notch_harmonics() {
        let mut filter = SosFilter::new();
        design_notch_harmonics(&mut filter, 50.0, 30.0, 3, 500.0).unwrap();
        assert_eq!(filter.num_sections(), 3);
        for f in [50.0, 100.0, 150.0] {
            assert!(filter.magnitude(f, 500.0) < 1e-6);
        }
        assert!(design_notch_harmonics(&mut filter, 50.0, 30.0, 0, 500.0).is_err());
    }

    #[test]
    fn test_bandpass_center_between_cutoffs() {
        let c = bandpass_center_hz(0.5, 40.0, 500.0);
        assert!(c > 0.5 && c < 40.0);
    }
}
