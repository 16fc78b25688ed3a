//! Best-effort string-to-number conversion.
//!
//! A string column is converted to Float64 when the fraction of its
//! non-null cells that parse as numbers strictly exceeds the configured
//! threshold. Cells that fail to parse become null; that is expected and
//! silent, surfaced only through `converted_to_numeric` and the missing
//! counts of the cleaned table.

use crate::error::Result;
use crate::utils::{numeric_ratio, parse_numeric_string};
use polars::prelude::*;
use tracing::debug;

/// Convert qualifying string columns to Float64 in place.
///
/// Returns the names of the converted columns, in table order.
pub fn coerce_numeric_columns(df: &mut DataFrame, threshold: f64) -> Result<Vec<String>> {
    let mut converted = Vec::new();
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    for name in names {
        let series = df.column(&name)?.as_materialized_series().clone();
        if series.dtype() != &DataType::String {
            continue;
        }

        let ratio = numeric_ratio(&series);
        if ratio <= threshold {
            continue;
        }

        let ca = series.str()?;
        let values: Vec<Option<f64>> = ca
            .into_iter()
            .map(|opt| opt.and_then(parse_numeric_string))
            .collect();

        debug!(column = %name, ratio, "converting text column to numeric");
        df.replace(&name, Series::new(name.as_str().into(), values))?;
        converted.push(name);
    }

    Ok(converted)
}
