//! Preprocessing Pipeline
//!
//! Runs an ordered list of filter stages over recorded channels, e.g. for ECG:
//! 1. Notch filter (power line noise removal)
//! 2. Bandpass filter (frequency band selection)
//!
//! Stages are designed once; every channel gets its own copy of the cascades,
//! so channels are filtered independently and in parallel.

use crate::error::Result;
use crate::sos::SosFilter;
use crate::types::{FilterMode, PipelineConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Result of running the pipeline over a set of channels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Filtered channel data, same layout as the input
    pub channels: Vec<Vec<f64>>,
    /// Applied configuration
    pub config: PipelineConfig,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

/// Designed filter stages plus the mode they run in
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    stages: Vec<SosFilter>,
}

impl Pipeline {
    /// Design every stage; fails on the first invalid stage
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let stages = config
            .stages
            .iter()
            .map(|stage| stage.build(config.sample_rate))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Pipeline ready: {} stage(s) at {} Hz, {:?}",
            stages.len(),
            config.sample_rate,
            config.mode
        );
        for stage in &config.stages {
            log::debug!("  stage: {}", stage.describe());
        }

        Ok(Self { config, stages })
    }

    /// Get the current configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Designed stages in processing order
    pub fn stages(&self) -> &[SosFilter] {
        &self.stages
    }

    /// Filter one channel through all stages, starting from zero state
    pub fn apply(&self, channel: &[f64]) -> Result<Vec<f64>> {
        let mut data = channel.to_vec();
        for stage in &self.stages {
            let mut filter = stage.clone();
            match self.config.mode {
                FilterMode::Causal => filter.process_in_place(&mut data),
                FilterMode::ZeroPhase => filter.filtfilt_in_place(&mut data)?,
            }
        }
        Ok(data)
    }

    /// Filter all channels in parallel (original data unchanged)
    pub fn apply_all(&self, channels: &[Vec<f64>]) -> Result<PipelineResult> {
        let start = std::time::Instant::now();

        let processed = channels
            .par_iter()
            .map(|channel| self.apply(channel))
            .collect::<Result<Vec<_>>>()?;

        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "Filtered {} channel(s) in {:.3}ms",
            processed.len(),
            processing_time_ms
        );

        Ok(PipelineResult {
            channels: processed,
            config: self.config.clone(),
            processing_time_ms,
        })
    }
}

/// Stateless one-shot pipeline run
pub fn run_pipeline(channels: &[Vec<f64>], config: &PipelineConfig) -> Result<PipelineResult> {
    Pipeline::new(config.clone())?.apply_all(channels)
}
