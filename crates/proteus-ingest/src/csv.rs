use std::fs;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Reads `path` as a comma-delimited text file and invokes `row` for each non-blank
/// line, passing the comma-split fields. This is the pluggable equivalent of the
/// `strtok_r(s, ",", &t)` token loop repeated across the original library's
/// `read*GridPoint` functions: each caller supplies its own per-row logic (how many
/// fields it expects and what they mean) while the line-splitting mechanics live here.
pub fn for_each_row<F>(path: &Path, mut row: F) -> Result<()>
where
    F: FnMut(usize, &[&str]) -> Result<()>,
{
    let text = fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.display().to_string(),
        source,
    })?;

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        row(idx + 1, &fields)?;
    }

    Ok(())
}

/// Parses a field as `f32`, wrapping a failure into a [`IngestError::Row`] with context.
pub fn parse_f32(path: &Path, line: usize, field: &str) -> Result<f32> {
    field.parse::<f32>().map_err(|_| IngestError::Row {
        path: path.display().to_string(),
        line,
        message: format!("expected a floating point number, found {field:?}"),
    })
}

/// Parses a field as `i32`, wrapping a failure into a [`IngestError::Row`] with context.
pub fn parse_i32(path: &Path, line: usize, field: &str) -> Result<i32> {
    field.parse::<i32>().map_err(|_| IngestError::Row {
        path: path.display().to_string(),
        line,
        message: format!("expected an integer, found {field:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_rows_and_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "40.0,-60.0,2022,-12.5").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "41.0,-61.0,2022,-12.7").unwrap();

        let mut rows = Vec::new();
        for_each_row(file.path(), |_line, fields| {
            rows.push(fields.iter().map(|s| s.to_string()).collect::<Vec<_>>());
            Ok(())
        })
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "40.0");
    }
}
