//! ASCII signal files: one sample per row, one channel per column.
//!
//! Columns may be separated by whitespace or commas. Lines starting with `#`
//! and blank lines are skipped, as are rows whose column count differs from
//! the first data row.

use crate::error::{IirError, Result};
use memmap2::Mmap;
use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

/// Parse column data into `[channels][samples]`
pub fn parse_columns(content: &str) -> Result<Vec<Vec<f64>>> {
    let mut channels: Vec<Vec<f64>> = Vec::new();
    let mut row_values: Vec<f64> = Vec::with_capacity(16);

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        row_values.clear();
        for token in line
            .split(|c: char| c == ',' || c.is_ascii_whitespace())
            .filter(|t| !t.is_empty())
        {
            let value = token.parse::<f64>().map_err(|_| {
                IirError::ParseError(format!(
                    "line {}: '{}' is not a number",
                    line_no + 1,
                    token
                ))
            })?;
            row_values.push(value);
        }

        if channels.is_empty() {
            channels = vec![Vec::new(); row_values.len()];
        } else if row_values.len() != channels.len() {
            log::warn!(
                "Line {} has inconsistent column count ({} vs {}), skipping",
                line_no + 1,
                row_values.len(),
                channels.len()
            );
            continue;
        }

        for (channel, &value) in channels.iter_mut().zip(row_values.iter()) {
            channel.push(value);
        }
    }

    if channels.is_empty() {
        return Err(IirError::ParseError("No data rows found".to_string()));
    }

    Ok(channels)
}

/// Format `[channels][samples]` back into whitespace-separated rows.
///
/// Samples are written in their shortest form that parses back to the same
/// value. Channels shorter than the longest one are rejected.
pub fn format_columns(channels: &[Vec<f64>]) -> Result<String> {
    let num_samples = channels.first().map(|c| c.len()).unwrap_or(0);
    if let Some(bad) = channels.iter().position(|c| c.len() != num_samples) {
        return Err(IirError::InvalidConfig(format!(
            "Channel {} has {} samples, expected {}",
            bad,
            channels[bad].len(),
            num_samples
        )));
    }

    let mut out = String::with_capacity(num_samples * channels.len() * 12);
    for i in 0..num_samples {
        for (c, channel) in channels.iter().enumerate() {
            if c > 0 {
                out.push(' ');
            }
            // Writing into a String cannot fail
            let _ = write!(out, "{}", channel[i]);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Map a signal file into memory and parse it
pub fn read_columns(path: &Path) -> Result<Vec<Vec<f64>>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(IirError::ParseError(format!(
            "{} is empty",
            path.display()
        )));
    }
    let mmap = unsafe { Mmap::map(&file)? };
    let content = std::str::from_utf8(&mmap)
        .map_err(|e| IirError::ParseError(format!("{} is not UTF-8: {}", path.display(), e)))?;
    parse_columns(content)
}

/// Write channels to a signal file
pub fn write_columns(path: &Path, channels: &[Vec<f64>]) -> Result<()> {
    std::fs::write(path, format_columns(channels)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whitespace_and_commas() {
        let content = "# ECG lead I, lead II\n1.0 2.0\n3.0,4.0\n\n5.0\t6.0\n";
        let channels = parse_columns(content).unwrap();
        assert_eq!(channels, vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
    }

    #[test]
    fn test_inconsistent_rows_skipped() {
        let content = "1 2\n3\n4 5\n";
        let channels = parse_columns(content).unwrap();
        assert_eq!(channels, vec![vec![1.0, 4.0], vec![2.0, 5.0]]);
    }

    #[test]
    fn test_non_numeric_is_error() {
        assert!(matches!(
            parse_columns("1 abc\n"),
            Err(IirError::ParseError(_))
        ));
        assert!(parse_columns("# only comments\n").is_err());
    }

    #[test]
    fn test_format_then_parse() {
        let channels = vec![vec![0.5, -1.25], vec![2.0, 3.0]];
        let text = format_columns(&channels).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(parse_columns(&text).unwrap(), channels);
    }

    #[test]
    fn test_format_keeps_full_precision() {
        let channels = vec![vec![1.234567891234e-7, 3e-11, 0.1 + 0.2, -4.5e12]];
        let text = format_columns(&channels).unwrap();
        assert_eq!(parse_columns(&text).unwrap(), channels);
    }

    #[test]
    fn test_format_rejects_ragged_channels() {
        assert!(format_columns(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.txt");
        write_columns(&path, &[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(read_columns(&path).unwrap(), vec![vec![1.0, 2.0, 3.0]]);
    }
}
