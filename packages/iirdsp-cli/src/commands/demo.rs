use crate::cli::DemoArgs;
use crate::exit_codes;
use crate::output;
use iirdsp::{FilterConfig, SosFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::PI;

const PREVIEW_SAMPLES: usize = 10;
const MAX_DEMO_SAMPLES: usize = 10_000_000;

#[derive(Serialize)]
struct DemoSample {
    time: f64,
    raw: f64,
    pqrst: f64,
}

#[derive(Serialize)]
struct DemoRms {
    raw: f64,
    pqrst: f64,
    baseline: f64,
    emg: f64,
    powerline: f64,
}

#[derive(Serialize)]
struct DemoOutput {
    sample_rate: f64,
    num_samples: usize,
    seed: u64,
    filters: Vec<String>,
    first_samples: Vec<DemoSample>,
    rms: DemoRms,
}

/// Synthetic ECG-like trace: 1 Hz base, 5 Hz component and uniform noise
fn synthetic_ecg(sample_rate: f64, num_samples: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_samples)
        .map(|n| {
            let t = n as f64 / sample_rate;
            (2.0 * PI * t).sin() + 0.5 * (2.0 * PI * 5.0 * t).sin() + 0.1 * rng.random::<f64>()
        })
        .collect()
}

/// Sample count for `seconds` at `sample_rate`, at most `MAX_DEMO_SAMPLES`
fn demo_length(seconds: f64, sample_rate: f64) -> Result<usize, String> {
    if !(seconds > 0.0) || !seconds.is_finite() {
        return Err("--seconds must be positive".to_string());
    }
    let samples = (seconds * sample_rate).round();
    if samples < 1.0 {
        return Err("signal has no samples".to_string());
    }
    if samples > MAX_DEMO_SAMPLES as f64 {
        return Err(format!(
            "{} s at {} Hz is {} samples, the demo allows at most {}",
            seconds, sample_rate, samples, MAX_DEMO_SAMPLES
        ));
    }
    Ok(samples as usize)
}

fn rms(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    (x.iter().map(|v| v * v).sum::<f64>() / x.len() as f64).sqrt()
}

pub fn execute(args: DemoArgs) -> i32 {
    // PQRST band, baseline drift, EMG noise, powerline
    let stages = [
        FilterConfig::bandpass(4, 0.5, 40.0),
        FilterConfig::lowpass(2, 0.5),
        FilterConfig::highpass(2, 40.0),
        FilterConfig::notch(50.0, 30.0),
    ];
    let mut filters: Vec<SosFilter> = Vec::with_capacity(stages.len());
    for stage in &stages {
        match stage.build(args.fs) {
            Ok(f) => filters.push(f),
            Err(e) => {
                eprintln!("Design failed for {}: {}", stage.describe(), e);
                return exit_codes::DESIGN_ERROR;
            }
        }
    }

    let num_samples = match demo_length(args.seconds, args.fs) {
        Ok(n) => n,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let raw = synthetic_ecg(args.fs, num_samples, args.seed);
    let mut outputs: Vec<Vec<f64>> = Vec::with_capacity(filters.len());
    for filter in filters.iter_mut() {
        match filter.filtfilt_vec(&raw) {
            Ok(y) => outputs.push(y),
            Err(e) => {
                eprintln!("Filtering failed: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    }

    let result = DemoOutput {
        sample_rate: args.fs,
        num_samples,
        seed: args.seed,
        filters: stages.iter().map(|s| s.describe()).collect(),
        first_samples: (0..PREVIEW_SAMPLES.min(num_samples))
            .map(|n| DemoSample {
                time: n as f64 / args.fs,
                raw: raw[n],
                pqrst: outputs[0][n],
            })
            .collect(),
        rms: DemoRms {
            raw: rms(&raw),
            pqrst: rms(&outputs[0]),
            baseline: rms(&outputs[1]),
            emg: rms(&outputs[2]),
            powerline: rms(&outputs[3]),
        },
    };

    if args.json {
        match output::to_json(&result, false) {
            Ok(json) => {
                if let Err(e) = output::write_output(&json, None) {
                    eprintln!("Error: {}", e);
                    return exit_codes::EXECUTION_ERROR;
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else {
        print_summary(&result);
    }

    exit_codes::SUCCESS
}

fn print_summary(result: &DemoOutput) {
    println!("iirdsp ECG preprocessing demo");
    println!("Sampling frequency: {:.1} Hz", result.sample_rate);
    println!(
        "Signal duration: {:.1} s ({} samples)",
        result.num_samples as f64 / result.sample_rate,
        result.num_samples
    );
    println!();
    println!("Filters (zero-phase):");
    for f in &result.filters {
        println!("  {}", f);
    }
    println!();
    println!("First {} samples (time [s], raw, PQRST):", result.first_samples.len());
    for s in &result.first_samples {
        println!("{:.3}, {:.6}, {:.6}", s.time, s.raw, s.pqrst);
    }
    println!();
    println!("Signal RMS values:");
    println!("  Raw:       {:.6}", result.rms.raw);
    println!("  PQRST:     {:.6}", result.rms.pqrst);
    println!("  Baseline:  {:.6}", result.rms.baseline);
    println!("  EMG:       {:.6}", result.rms.emg);
    println!("  Powerline: {:.6}", result.rms.powerline);
}
