//! Aggregation over a normalized dataset: group sums by category and by raw
//! date string, plus overall totals and the bounded transaction sample.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::dataset::{Cell, Dataset};

/// Upper bound on the raw rows echoed back in the report.
pub const TRANSACTION_SAMPLE_LIMIT: usize = 100;
/// Upper bound on the rows serialized into the model prompt.
pub const PROMPT_SAMPLE_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateTotal {
    pub date: String,
    pub amount: f64,
}

/// Aggregated view of one analyzed statement.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub transactions: Vec<Map<String, Value>>,
    /// Group order is arbitrary; callers must not depend on it.
    pub by_category: Vec<CategoryTotal>,
    /// Empty when the dataset has no `date` column. Dates are grouped as raw
    /// strings: `"1.3.24"` and `"01.03.2024"` are distinct keys.
    pub by_date: Vec<DateTotal>,
    pub total_amount: f64,
    pub transaction_count: usize,
}

/// Coerce the `amount` column to numbers, drop rows that fail, and group-sum
/// the survivors.
///
/// Row-level coercion failures are expected noise in real-world exports and
/// are dropped silently, mirroring the line-level policy of the document
/// parser.
pub fn aggregate(mut dataset: Dataset) -> Summary {
    let amount_idx = dataset.column_index("amount");

    let before = dataset.row_count();
    dataset.rows.retain_mut(|row| {
        let coerced = amount_idx.and_then(|idx| row.get(idx).and_then(Cell::coerce_number));
        match (coerced, amount_idx) {
            (Some(value), Some(idx)) => {
                row[idx] = Cell::Number(value);
                true
            }
            _ => false,
        }
    });
    if dataset.row_count() < before {
        debug!(
            dropped = before - dataset.row_count(),
            "dropped rows with unparsable amount"
        );
    }

    let category_idx = dataset.column_index("category");
    let date_idx = dataset.column_index("date");

    let mut category_totals: HashMap<String, f64> = HashMap::new();
    let mut date_totals: HashMap<String, f64> = HashMap::new();
    let mut total_amount = 0.0;

    for row in &dataset.rows {
        let Some(amount) = amount_idx.and_then(|idx| row[idx].coerce_number()) else {
            continue;
        };
        total_amount += amount;
        if let Some(idx) = category_idx {
            *category_totals.entry(row[idx].key_string()).or_insert(0.0) += amount;
        }
        if let Some(idx) = date_idx {
            *date_totals.entry(row[idx].key_string()).or_insert(0.0) += amount;
        }
    }

    Summary {
        transactions: dataset.rows_as_json(TRANSACTION_SAMPLE_LIMIT),
        by_category: category_totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect(),
        by_date: date_totals
            .into_iter()
            .map(|(date, amount)| DateTotal { date, amount })
            .collect(),
        total_amount,
        transaction_count: dataset.row_count(),
    }
}
