use crate::cli::FilterFlags;
use iirdsp::{FilterConfig, FilterKind, FilterMode, PipelineConfig};
use std::path::Path;

/// Validate that an input file exists.
pub fn validate_file(file_path: &str) -> Result<(), String> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("Input file not found: {}", file_path));
    }
    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", file_path));
    }
    Ok(())
}

pub fn require_sample_rate(flags: &FilterFlags) -> Result<f64, String> {
    flags
        .fs
        .ok_or_else(|| "--fs (sampling rate in Hz) is required".to_string())
}

/// Build a single filter stage from command-line flags.
///
/// Only presence and syntax are checked here; ranges are checked by the designer.
pub fn build_filter_config(flags: &FilterFlags) -> Result<FilterConfig, String> {
    let kind_name = flags
        .kind
        .as_deref()
        .ok_or_else(|| "--kind is required (lowpass, highpass, bandpass, notch)".to_string())?;
    let kind = FilterKind::from_name(kind_name).ok_or_else(|| {
        format!(
            "Unknown filter kind '{}'. Valid kinds: lowpass, highpass, bandpass, notch",
            kind_name
        )
    })?;
    let cutoff = flags
        .cutoff
        .ok_or_else(|| "--cutoff is required".to_string())?;

    let config = match kind {
        FilterKind::Lowpass => FilterConfig::lowpass(flags.order, cutoff),
        FilterKind::Highpass => FilterConfig::highpass(flags.order, cutoff),
        FilterKind::Bandpass => {
            let high = flags
                .cutoff_high
                .ok_or_else(|| "Band-pass filter requires --cutoff-high".to_string())?;
            FilterConfig::bandpass(flags.order, cutoff, high)
        }
        FilterKind::Notch => FilterConfig {
            harmonics: flags.harmonics,
            ..FilterConfig::notch(cutoff, flags.q)
        },
    };
    Ok(config)
}

/// Resolve the pipeline from `--config` (if given) or from single-stage flags.
///
/// `--fs` overrides the sampling rate of a config file and `--zero-phase`
/// forces forward-backward filtering.
pub fn resolve_pipeline(
    config_path: &Option<String>,
    flags: &FilterFlags,
    zero_phase: bool,
) -> Result<PipelineConfig, String> {
    let mut pipeline = match config_path {
        Some(path) => {
            let mut config = PipelineConfig::from_file(path)
                .map_err(|e| format!("Failed to load config '{}': {}", path, e))?;
            if let Some(fs) = flags.fs {
                config.sample_rate = fs;
            }
            config
        }
        None => {
            let stage = build_filter_config(flags)?;
            PipelineConfig::new(require_sample_rate(flags)?, FilterMode::Causal, vec![stage])
        }
    };

    if zero_phase {
        pipeline.mode = FilterMode::ZeroPhase;
    }
    if pipeline.stages.is_empty() {
        log::warn!("Pipeline has no stages; output equals input");
    }
    Ok(pipeline)
}
