use crate::cli::InfoArgs;
use crate::exit_codes;
use crate::output;
use iirdsp::{MAX_BANDPASS_ORDER, MAX_ORDER, MAX_SECTIONS};
use serde::Serialize;

#[derive(Serialize)]
struct InfoOutput {
    cli_version: String,
    library_version: &'static str,
    max_sections: usize,
    max_order: usize,
    max_bandpass_order: usize,
    filter_kinds: Vec<&'static str>,
    platform: String,
    arch: String,
}

pub fn execute(args: InfoArgs) -> i32 {
    let info = InfoOutput {
        cli_version: env!("CARGO_PKG_VERSION").to_string(),
        library_version: iirdsp::VERSION,
        max_sections: MAX_SECTIONS,
        max_order: MAX_ORDER,
        max_bandpass_order: MAX_BANDPASS_ORDER,
        filter_kinds: vec!["lowpass", "highpass", "bandpass", "notch"],
        platform: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    };

    if args.json {
        match output::to_json(&info, false) {
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
        println!("iirdsp CLI v{} (library v{})", info.cli_version, info.library_version);
        println!("Platform: {} ({})", info.platform, info.arch);
        println!();
        println!("Filter kinds: {}", info.filter_kinds.join(", "));
        println!("Max sections per cascade: {}", info.max_sections);
        println!("Max low-pass/high-pass order: {}", info.max_order);
        println!("Max band-pass order: {}", info.max_bandpass_order);
    }

    exit_codes::SUCCESS
}
