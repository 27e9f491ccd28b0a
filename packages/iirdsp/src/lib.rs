pub mod analog;
pub mod bilinear;
pub mod biquad;
pub mod design;
pub mod error;
pub mod notch;
pub mod pipeline;
pub mod signal;
pub mod sos;
pub mod transform;
pub mod types;

pub use biquad::{Biquad, BiquadCoeffs, MAX_SECTIONS};
pub use design::{
    bandpass_center_hz, design_bandpass, design_highpass, design_lowpass, design_notch,
    design_notch_harmonics, MAX_BANDPASS_ORDER, MAX_ORDER,
};
pub use error::{IirError, Result};
pub use pipeline::{run_pipeline, Pipeline, PipelineResult};
pub use sos::SosFilter;
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
