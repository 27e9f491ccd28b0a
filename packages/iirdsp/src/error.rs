use thiserror::Error;

#[derive(Error, Debug)]
pub enum IirError {
    #[error("Invalid filter order {order}: must be between 1 and {max}")]
    InvalidOrder { order: usize, max: usize },

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid quality factor {0}: must be positive")]
    InvalidQuality(f64),

    #[error("Failed to allocate scratch buffer of {0} samples")]
    Allocation(usize),

    #[error("Buffer length mismatch: input has {input} samples, output has {output}")]
    LengthMismatch { input: usize, output: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse signal data: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, IirError>;
