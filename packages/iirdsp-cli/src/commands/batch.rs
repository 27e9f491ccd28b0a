use crate::cli::BatchArgs;
use crate::exit_codes;
use crate::filter_params;
use crate::output;
use iirdsp::{signal, Pipeline};
use std::path::Path;
use std::time::Instant;

pub fn execute(args: BatchArgs) -> i32 {
    let files = match resolve_files(&args) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    if files.is_empty() {
        eprintln!("Error: No matching files found");
        return exit_codes::INPUT_ERROR;
    }

    if args.dry_run {
        for f in &files {
            println!("{}", f);
        }
        if !args.quiet {
            eprintln!("Found {} file(s)", files.len());
        }
        return exit_codes::SUCCESS;
    }

    let output_dir = match args.output_dir {
        Some(ref dir) => dir.clone(),
        None => {
            eprintln!("Error: --output-dir is required");
            return exit_codes::INPUT_ERROR;
        }
    };

    let config = match filter_params::resolve_pipeline(&args.config, &args.filter, args.zero_phase)
    {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return exit_codes::INPUT_ERROR;
        }
    };

    // Designed once, reused for every file
    let pipeline = match Pipeline::new(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Design failed: {}", e);
            return exit_codes::DESIGN_ERROR;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        eprintln!(
            "Error: Failed to create output directory '{}': {}",
            output_dir, e
        );
        return exit_codes::EXECUTION_ERROR;
    }

    let total = files.len();
    let mut succeeded = 0usize;
    let mut failed = 0usize;
    let start_time = Instant::now();

    for (i, file_path) in files.iter().enumerate() {
        if !args.quiet {
            eprintln!("[{}/{}] {}...", i + 1, total, file_path);
        }

        match filter_file(&pipeline, file_path, &output_dir, &args) {
            Ok(out_path) => {
                log::info!("Wrote {}", out_path);
                succeeded += 1;
            }
            Err(msg) => {
                eprintln!("  Error: {}", msg);
                failed += 1;
                if !args.continue_on_error {
                    break;
                }
            }
        }
    }

    let elapsed = start_time.elapsed();

    if !args.quiet {
        eprintln!(
            "Batch complete: {}/{} succeeded, {}/{} failed, {:.1}s",
            succeeded,
            total,
            failed,
            total,
            elapsed.as_secs_f64()
        );
    }

    if failed == 0 {
        exit_codes::SUCCESS
    } else if succeeded > 0 {
        exit_codes::PARTIAL_FAILURE
    } else {
        exit_codes::EXECUTION_ERROR
    }
}

/// Filter one file into `output_dir`, returning the written path
fn filter_file(
    pipeline: &Pipeline,
    file_path: &str,
    output_dir: &str,
    args: &BatchArgs,
) -> Result<String, String> {
    filter_params::validate_file(file_path)?;

    let channels = signal::read_columns(Path::new(file_path)).map_err(|e| e.to_string())?;
    let result = pipeline
        .apply_all(&channels)
        .map_err(|e| format!("Filtering failed: {}", e))?;
    let text = output::render(&result, &result.channels, args.json, args.compact)?;

    let out_path = output_path(file_path, output_dir, args.json);
    output::write_output(&text, Some(&out_path))?;
    Ok(out_path)
}

fn output_path(file_path: &str, output_dir: &str, json: bool) -> String {
    let stem = Path::new(file_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = if json { "json" } else { "txt" };
    Path::new(output_dir)
        .join(format!("{}_filtered.{}", stem, ext))
        .to_string_lossy()
        .into_owned()
}

fn resolve_files(args: &BatchArgs) -> Result<Vec<String>, String> {
    if let Some(ref pattern) = args.glob {
        resolve_glob(pattern)
    } else if let Some(ref files) = args.files {
        Ok(files.clone())
    } else {
        Err("One of --glob or --files must be specified".to_string())
    }
}

fn resolve_glob(pattern: &str) -> Result<Vec<String>, String> {
    let paths =
        glob::glob(pattern).map_err(|e| format!("Invalid glob pattern '{}': {}", pattern, e))?;

    let mut files: Vec<String> = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    if let Some(s) = path.to_str() {
                        files.push(s.to_string());
                    }
                }
            }
            Err(e) => {
                eprintln!("Warning: glob error: {}", e);
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FilterFlags;
    use std::fs;

    fn make_batch_args() -> BatchArgs {
        BatchArgs {
            glob: None,
            files: None,
            output_dir: None,
            config: None,
            filter: FilterFlags {
                kind: Some("lowpass".to_string()),
                order: 2,
                cutoff: Some(10.0),
                cutoff_high: None,
                q: 30.0,
                harmonics: 1,
                fs: Some(100.0),
            },
            zero_phase: false,
            json: false,
            compact: false,
            continue_on_error: false,
            dry_run: false,
            quiet: true,
        }
    }

    #[test]
    fn test_resolve_files_no_input() {
        let args = make_batch_args();
        let result = resolve_files(&args);
        assert!(result.unwrap_err().contains("must be specified"));
    }

    #[test]
    fn test_resolve_files_explicit_list() {
        let mut args = make_batch_args();
        args.files = Some(vec!["/tmp/a.txt".to_string(), "/tmp/b.txt".to_string()]);
        let result = resolve_files(&args).unwrap();
        assert_eq!(result, vec!["/tmp/a.txt", "/tmp/b.txt"]);
    }

    #[test]
    fn test_resolve_glob_no_matches() {
        let result = resolve_glob("/nonexistent_dir_12345/*.txt").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_resolve_glob_with_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.txt"), "").unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join("c.csv"), "").unwrap();

        let pattern = format!("{}/*.txt", tmp.path().to_str().unwrap());
        let result = resolve_glob(&pattern).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result[0].ends_with("a.txt"));
    }

    #[test]
    fn test_output_path_naming() {
        assert!(output_path("/data/rec1.txt", "/out", false).ends_with("rec1_filtered.txt"));
        assert!(output_path("/data/rec1.csv", "/out", true).ends_with("rec1_filtered.json"));
    }

    #[test]
    fn test_filter_file_writes_output() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("rec.txt");
        fs::write(&input, "1 0\n0 1\n0 0\n0 0\n").unwrap();
        let out_dir = tmp.path().join("out");
        fs::create_dir_all(&out_dir).unwrap();

        let args = make_batch_args();
        let config = filter_params::resolve_pipeline(&None, &args.filter, false).unwrap();
        let pipeline = Pipeline::new(config).unwrap();

        let written = filter_file(
            &pipeline,
            input.to_str().unwrap(),
            out_dir.to_str().unwrap(),
            &args,
        )
        .unwrap();
        let channels = signal::read_columns(Path::new(&written)).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].len(), 4);
    }
}
