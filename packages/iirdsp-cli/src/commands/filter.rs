use crate::cli::FilterArgs;
use crate::exit_codes;
use crate::filter_params;
use crate::output;
use iirdsp::{signal, Pipeline};
use std::path::Path;

pub fn execute(args: FilterArgs) -> i32 {
    if let Err(msg) = filter_params::validate_file(&args.file) {
        eprintln!("Error: {}", msg);
        return exit_codes::INPUT_ERROR;
    }

    let config = match filter_params::resolve_pipeline(&args.config, &args.filter, args.zero_phase)
    {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let pipeline = match Pipeline::new(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Design failed: {}", e);
            return exit_codes::DESIGN_ERROR;
        }
    };

    let channels = match signal::read_columns(Path::new(&args.file)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading '{}': {}", args.file, e);
            return exit_codes::INPUT_ERROR;
        }
    };

    if !args.quiet {
        eprintln!(
            "Filtering {} ({} channel(s), {} samples)...",
            args.file,
            channels.len(),
            channels.first().map(|c| c.len()).unwrap_or(0)
        );
        for stage in &pipeline.config().stages {
            eprintln!("  {}", stage.describe());
        }
    }

    let result = match pipeline.apply_all(&channels) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Filtering failed: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    };

    match output::render(&result, &result.channels, args.json, args.compact) {
        Ok(text) => {
            if let Err(e) = output::write_output(&text, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            if !args.quiet {
                if let Some(ref path) = args.output {
                    eprintln!("Results written to {}", path);
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}
