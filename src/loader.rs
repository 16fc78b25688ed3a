//! Table loading boundary.
//!
//! Thin wrappers over the polars CSV and Parquet readers. The core pipeline
//! never parses files itself; it only relies on the `DataFrame` guarantee
//! that all columns have equal length.

use crate::error::{Result, TriageError};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Load a table from a CSV or Parquet file, dispatching on the extension.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let df = match extension.as_str() {
        "csv" => load_csv(path)?,
        "parquet" => load_parquet(path)?,
        other => {
            return Err(TriageError::UnsupportedFormat(if other.is_empty() {
                path.display().to_string()
            } else {
                other.to_string()
            }));
        }
    };

    info!(
        path = %path.display(),
        rows = df.height(),
        cols = df.width(),
        "table loaded"
    );
    Ok(df)
}

/// Load a CSV file, retrying without quote handling on failure.
fn load_csv(path: &Path) -> Result<DataFrame> {
    let standard = CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish();

    match standard {
        Ok(df) => Ok(df),
        Err(e) => {
            debug!(error = %e, "standard CSV loading failed, retrying without quotes");
            CsvReadOptions::default()
                .with_infer_schema_length(Some(100))
                .with_has_header(true)
                .with_parse_options(CsvParseOptions::default().with_quote_char(None))
                .try_into_reader_with_file_path(Some(path.to_path_buf()))?
                .finish()
                .map_err(|e| TriageError::LoadFailed(format!("{}: {e}", path.display())))
        }
    }
}

fn load_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| TriageError::LoadFailed(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unsupported_extension() {
        let err = load_table(Path::new("data.xlsx")).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");

        let err = load_table(Path::new("noextension")).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_load_csv_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join("triage_loader_test.csv");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            writeln!(f, "a,b").unwrap();
            writeln!(f, "1,x").unwrap();
            writeln!(f, "2,y").unwrap();
        }

        let df = load_table(&path).unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );

        std::fs::remove_file(&path).ok();
    }
}
