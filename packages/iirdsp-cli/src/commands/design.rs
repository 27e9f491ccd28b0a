use crate::cli::DesignArgs;
use crate::exit_codes;
use crate::filter_params;
use crate::output;
use iirdsp::SosReport;

pub fn execute(args: DesignArgs) -> i32 {
    let config = match filter_params::build_filter_config(&args.filter) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };
    let fs = match filter_params::require_sample_rate(&args.filter) {
        Ok(fs) => fs,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    let report = match SosReport::design(config, fs) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Design failed: {}", e);
            return exit_codes::DESIGN_ERROR;
        }
    };

    let rendered = if args.json || args.output.is_some() {
        output::to_json(&report, args.compact)
    } else {
        Ok(format_report(&report))
    };

    match rendered {
        Ok(text) => {
            if let Err(e) = output::write_output(&text, args.output.as_deref()) {
                eprintln!("Error: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_codes::EXECUTION_ERROR
        }
    }
}

fn format_report(report: &SosReport) -> String {
    let mut lines = vec![
        format!("{} at {} Hz", report.config.describe(), report.sample_rate),
        format!(
            "{} section(s), gain {:.6} at {:.3} Hz",
            report.num_sections, report.reference_gain, report.reference_hz
        ),
        String::new(),
        format!(
            "{:>3}  {:>14} {:>14} {:>14} {:>14} {:>14}",
            "#", "b0", "b1", "b2", "a1", "a2"
        ),
    ];
    for (i, c) in report.sections.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:>14.9} {:>14.9} {:>14.9} {:>14.9} {:>14.9}",
            i, c.b0, c.b1, c.b2, c.a1, c.a2
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use iirdsp::FilterConfig;

    #[test]
    fn test_format_report_lists_sections() {
        let report = SosReport::design(FilterConfig::lowpass(3, 40.0), 500.0).unwrap();
        let text = format_report(&report);
        assert!(text.starts_with("lowpass 40 Hz (order 3) at 500 Hz"));
        assert!(text.contains("2 section(s), gain 1.000000"));
        // four heading lines, then one row per section
        assert_eq!(text.lines().count(), 4 + 2);
    }
}
