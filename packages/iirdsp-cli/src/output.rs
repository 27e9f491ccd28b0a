use iirdsp::signal;
use std::io::Write;
use std::path::Path;

/// Write text to stdout or a file, ending with a single newline.
pub fn write_output(content: &str, output_path: Option<&str>) -> Result<(), String> {
    let content = content.trim_end_matches('\n');
    match output_path {
        Some(path) => std::fs::write(Path::new(path), format!("{}\n", content))
            .map_err(|e| format!("Failed to write output file '{}': {}", path, e)),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| handle.write_all(b"\n"))
                .map_err(|e| format!("Failed to write to stdout: {}", e))
        }
    }
}

/// Serialize a value to JSON (pretty or compact).
pub fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String, String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.map_err(|e| format!("JSON serialization failed: {}", e))
}

/// Render filtered channels as columns, or as JSON of `value` when `json` is set.
pub fn render<T: serde::Serialize>(
    value: &T,
    channels: &[Vec<f64>],
    json: bool,
    compact: bool,
) -> Result<String, String> {
    if json {
        to_json(value, compact)
    } else {
        signal::format_columns(channels).map_err(|e| e.to_string())
    }
}
