use crate::biquad::BiquadCoeffs;
use crate::design::{
    bandpass_center_hz, design_bandpass, design_highpass, design_lowpass, design_notch,
    design_notch_harmonics,
};
use crate::error::{IirError, Result};
use crate::sos::SosFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filter kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
    Notch,
}

impl FilterKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "lowpass" | "low" | "lp" => Some(FilterKind::Lowpass),
            "highpass" | "high" | "hp" => Some(FilterKind::Highpass),
            "bandpass" | "band" | "bp" => Some(FilterKind::Bandpass),
            "notch" => Some(FilterKind::Notch),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Lowpass => "lowpass",
            FilterKind::Highpass => "highpass",
            FilterKind::Bandpass => "bandpass",
            FilterKind::Notch => "notch",
        }
    }
}

/// How a designed cascade is run over a recorded signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Single forward pass (streaming-compatible, introduces phase delay)
    #[default]
    Causal,
    /// Forward-backward pass (offline, no phase distortion)
    ZeroPhase,
}

/// Configuration for a single filter stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub kind: FilterKind,
    /// Cutoff frequency in Hz (lowpass/highpass), low cutoff (bandpass) or centre (notch)
    pub frequency: f64,
    /// High cutoff for bandpass
    #[serde(default)]
    pub frequency_high: Option<f64>,
    /// Butterworth order (bandpass: prototype order, poles are doubled)
    #[serde(default = "default_order")]
    pub order: usize,
    /// Notch quality factor (higher = narrower, typical: 30-50)
    #[serde(default = "default_q")]
    pub q: f64,
    /// Number of notch harmonics (1 = fundamental only)
    #[serde(default = "default_harmonics")]
    pub harmonics: usize,
}

fn default_order() -> usize {
    4
}
fn default_q() -> f64 {
    30.0
}
fn default_harmonics() -> usize {
    1
}

impl FilterConfig {
    pub fn lowpass(order: usize, cutoff: f64) -> Self {
        Self::new(FilterKind::Lowpass, order, cutoff, None)
    }

    pub fn highpass(order: usize, cutoff: f64) -> Self {
        Self::new(FilterKind::Highpass, order, cutoff, None)
    }

    pub fn bandpass(order: usize, low: f64, high: f64) -> Self {
        Self::new(FilterKind::Bandpass, order, low, Some(high))
    }

    pub fn notch(frequency: f64, q: f64) -> Self {
        Self {
            q,
            ..Self::new(FilterKind::Notch, 2, frequency, None)
        }
    }

    fn new(kind: FilterKind, order: usize, frequency: f64, frequency_high: Option<f64>) -> Self {
        Self {
            kind,
            frequency,
            frequency_high,
            order,
            q: default_q(),
            harmonics: default_harmonics(),
        }
    }

    /// Design the configured cascade at `sample_rate`
    pub fn build(&self, sample_rate: f64) -> Result<SosFilter> {
        let mut filter = SosFilter::new();
        match self.kind {
            FilterKind::Lowpass => {
                design_lowpass(&mut filter, self.order, self.frequency, sample_rate)?
            }
            FilterKind::Highpass => {
                design_highpass(&mut filter, self.order, self.frequency, sample_rate)?
            }
            FilterKind::Bandpass => {
                let high = self.frequency_high.ok_or_else(|| {
                    IirError::InvalidConfig("Bandpass filter requires frequency_high".to_string())
                })?;
                design_bandpass(&mut filter, self.order, self.frequency, high, sample_rate)?
            }
            FilterKind::Notch if self.harmonics > 1 => design_notch_harmonics(
                &mut filter,
                self.frequency,
                self.q,
                self.harmonics,
                sample_rate,
            )?,
            FilterKind::Notch => design_notch(&mut filter, self.frequency, self.q, sample_rate)?,
        }
        Ok(filter)
    }

    /// Check the stage against `sample_rate` without keeping the design
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        self.build(sample_rate).map(|_| ())
    }

    /// Frequency (Hz) where the passband gain is normalized to one
    pub fn reference_hz(&self, sample_rate: f64) -> f64 {
        match self.kind {
            FilterKind::Lowpass | FilterKind::Notch => 0.0,
            FilterKind::Highpass => sample_rate / 2.0,
            FilterKind::Bandpass => match self.frequency_high {
                Some(high) => bandpass_center_hz(self.frequency, high, sample_rate),
                None => self.frequency,
            },
        }
    }

    /// Short human-readable description, e.g. "bandpass 0.5-40 Hz (order 4)"
    pub fn describe(&self) -> String {
        match self.kind {
            FilterKind::Bandpass => format!(
                "bandpass {}-{} Hz (order {})",
                self.frequency,
                self.frequency_high.unwrap_or(f64::NAN),
                self.order
            ),
            FilterKind::Notch => format!("notch {} Hz (Q={})", self.frequency, self.q),
            kind => format!("{} {} Hz (order {})", kind.name(), self.frequency, self.order),
        }
    }
}

/// Multi-stage filtering configuration, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sample rate of the data (Hz)
    pub sample_rate: f64,

    #[serde(default)]
    pub mode: FilterMode,

    /// Stages applied in order
    #[serde(default)]
    pub stages: Vec<FilterConfig>,
}

impl PipelineConfig {
    pub fn new(sample_rate: f64, mode: FilterMode, stages: Vec<FilterConfig>) -> Self {
        Self {
            sample_rate,
            mode,
            stages,
        }
    }

    /// Standard ECG preprocessing: powerline notch, then 0.5-40 Hz band-pass, zero-phase
    pub fn ecg(sample_rate: f64, powerline_freq: f64) -> Self {
        Self {
            sample_rate,
            mode: FilterMode::ZeroPhase,
            stages: vec![
                FilterConfig::notch(powerline_freq, 30.0),
                FilterConfig::bandpass(4, 0.5, 40.0),
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| IirError::InvalidConfig(format!("Failed to parse pipeline config: {}", e)))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }
}

/// Designed cascade with its parameters, for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SosReport {
    pub config: FilterConfig,
    pub sample_rate: f64,
    pub num_sections: usize,
    pub sections: Vec<BiquadCoeffs>,
    /// Frequency where the gain was normalized
    pub reference_hz: f64,
    /// Magnitude at `reference_hz` (1.0 for a correctly normalized design)
    pub reference_gain: f64,
    pub created_at: String,
}

impl SosReport {
    pub fn new(config: FilterConfig, sample_rate: f64, filter: &SosFilter) -> Self {
        let reference_hz = config.reference_hz(sample_rate);
        Self {
            reference_gain: filter.magnitude(reference_hz, sample_rate),
            reference_hz,
            num_sections: filter.num_sections(),
            sections: filter.coefficients(),
            config,
            sample_rate,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Design `config` at `sample_rate` and report it
    pub fn design(config: FilterConfig, sample_rate: f64) -> Result<Self> {
        let filter = config.build(sample_rate)?;
        Ok(Self::new(config, sample_rate, &filter))
    }
}
