use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "iirdsp",
    version,
    about = "Butterworth and notch IIR filter design and filtering",
    long_about = "Design Butterworth low/high/band-pass and notch filters as second-order\n\
                  sections and apply them to ASCII signal files (one channel per column).\n\
                  Multi-stage pipelines are read from JSON via --config or $IIRDSP_CONFIG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Design a filter and print its second-order sections
    Design(DesignArgs),
    /// Filter a signal file
    Filter(FilterArgs),
    /// Filter many signal files with the same pipeline
    Batch(BatchArgs),
    /// Run the ECG preprocessing demo on a synthetic signal
    Demo(DemoArgs),
    /// Show version and capacity limits
    Info(InfoArgs),
}

/// Single-stage filter parameters shared by several subcommands
#[derive(Args, Clone, Debug)]
pub struct FilterFlags {
    /// Filter kind: lowpass, highpass, bandpass or notch
    #[arg(long)]
    pub kind: Option<String>,

    /// Butterworth order (band-pass: prototype order)
    #[arg(long, default_value_t = 4)]
    pub order: usize,

    /// Cutoff frequency in Hz (band-pass: low edge, notch: centre)
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Band-pass high edge in Hz
    #[arg(long)]
    pub cutoff_high: Option<f64>,

    /// Notch quality factor
    #[arg(long, default_value_t = 30.0)]
    pub q: f64,

    /// Number of notch harmonics (1 = fundamental only)
    #[arg(long, default_value_t = 1)]
    pub harmonics: usize,

    /// Sampling rate in Hz
    #[arg(long)]
    pub fs: Option<f64>,
}

#[derive(Args)]
pub struct DesignArgs {
    #[command(flatten)]
    pub filter: FilterFlags,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Input signal file (whitespace or comma separated columns)
    #[arg(long)]
    pub file: String,

    /// Pipeline configuration (JSON)
    #[arg(long, env = "IIRDSP_CONFIG")]
    pub config: Option<String>,

    #[command(flatten)]
    pub filter: FilterFlags,

    /// Forward-backward (zero-phase) filtering
    #[arg(long, default_value_t = false)]
    pub zero_phase: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the result as JSON instead of columns
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for input files (e.g., "data/*.txt")
    #[arg(long, conflicts_with = "files")]
    pub glob: Option<String>,

    /// Explicit list of input files
    #[arg(long, num_args = 1..)]
    pub files: Option<Vec<String>>,

    /// Directory for filtered output files
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Pipeline configuration (JSON)
    #[arg(long, env = "IIRDSP_CONFIG")]
    pub config: Option<String>,

    #[command(flatten)]
    pub filter: FilterFlags,

    /// Forward-backward (zero-phase) filtering
    #[arg(long, default_value_t = false)]
    pub zero_phase: bool,

    /// Write results as JSON instead of columns
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Compact JSON output (no indentation)
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Keep going after a file fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// List matching files and exit
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Sampling rate in Hz
    #[arg(long, default_value_t = 500.0)]
    pub fs: f64,

    /// Signal duration in seconds
    #[arg(long, default_value_t = 5.0)]
    pub seconds: f64,

    /// Noise generator seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
