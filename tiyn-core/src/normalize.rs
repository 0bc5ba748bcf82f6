//! Column normalization: guarantee `category` and `amount` columns on a
//! freshly decoded dataset.

use tracing::debug;

use crate::dataset::{Cell, Dataset};
use crate::error::AnalyzeError;

/// Category used when the input has neither a category nor a description
/// column.
pub const FALLBACK_CATEGORY: &str = "unspecified";

/// Rename or synthesize columns so the dataset exposes `category` and
/// `amount`.
///
/// The steps run in a fixed order that callers depend on:
/// 1. every column name is trimmed and lower-cased;
/// 2. `category` is ensured (rename `description`, else a constant column);
/// 3. `amount` is ensured by renaming the first column, in existing column
///    order, that holds at least one numeric cell. The scan includes the
///    column produced by step 2.
///
/// The heuristics never fail; the only error is a dataset with no numeric
/// column at all.
pub fn normalize_columns(dataset: &mut Dataset) -> Result<(), AnalyzeError> {
    dataset.normalize_column_names();

    if !dataset.has_column("category") {
        if dataset.rename_column("description", "category") {
            debug!("renamed description column to category");
        } else {
            dataset.push_constant_column("category", Cell::Text(FALLBACK_CATEGORY.to_string()));
            debug!("no category or description column, synthesized a constant one");
        }
    }

    if !dataset.has_column("amount") {
        let guess = (0..dataset.columns.len()).find(|&idx| dataset.column_has_number(idx));
        if let Some(idx) = guess {
            debug!(column = %dataset.columns[idx], "guessed amount column");
            dataset.rename_column_at(idx, "amount");
        }
    }

    if !dataset.has_column("amount") {
        return Err(AnalyzeError::MissingAmountColumn);
    }
    Ok(())
}
