//! Request-scoped tabular data: ordered columns, ordered rows of typed cells.
//!
//! A `Dataset` is built once per analysis request by the decoder (or by the
//! document parser for unstructured text), renamed in place by the column
//! normalizer, filtered by the aggregator, and then read-only.

use serde_json::{Map, Value};

/// One decoded tabular value.
///
/// CSV columns are typed column-wise at decode time (a column is numeric when
/// every non-empty cell parses as a number); XLSX cells keep their native
/// worksheet types.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Best-effort numeric view: numbers pass through, text gets a plain
    /// `f64` parse. Non-finite values are rejected.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) => None,
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Cell::Empty => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }

    /// String view used as a grouping key (raw, no normalization).
    pub fn key_string(&self) -> String {
        match self {
            Cell::Number(n) => format!("{n}"),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Cell::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Cell::Text(s) => Value::String(s.clone()),
            Cell::Empty => Value::Null,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Trim and lower-case every column name.
    pub fn normalize_column_names(&mut self) {
        for name in &mut self.columns {
            *name = name.trim().to_lowercase();
        }
    }

    /// Rename the first column called `from`. Returns false if absent.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    pub fn rename_column_at(&mut self, idx: usize, to: &str) {
        if let Some(name) = self.columns.get_mut(idx) {
            *name = to.to_string();
        }
    }

    /// Add a column holding the same cell in every row.
    pub fn push_constant_column(&mut self, name: &str, cell: Cell) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(cell.clone());
        }
    }

    /// True if any cell in the column is numeric-typed.
    pub fn column_has_number(&self, idx: usize) -> bool {
        self.rows
            .iter()
            .any(|row| row.get(idx).is_some_and(Cell::is_number))
    }

    /// Bounded-prefix extraction of rows as JSON objects (column → value),
    /// used for the transaction sample and the model-prompt sample.
    pub fn rows_as_json(&self, limit: usize) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .take(limit)
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| (name.clone(), cell.to_json()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Dataset {
        let mut ds = Dataset::new(vec!["date".to_string(), "amount".to_string()]);
        ds.push_row(vec![
            Cell::Text("01.03.2024".to_string()),
            Cell::Number(3500.0),
        ]);
        ds.push_row(vec![Cell::Text("02.03.2024".to_string()), Cell::Empty]);
        ds
    }

    #[test]
    fn test_push_row_pads_short_rows() {
        let mut ds = Dataset::new(vec!["a".to_string(), "b".to_string()]);
        ds.push_row(vec![Cell::Number(1.0)]);
        assert_eq!(ds.rows[0], vec![Cell::Number(1.0), Cell::Empty]);
    }

    #[test]
    fn test_column_lookup_and_rename() {
        let mut ds = sample();
        assert_eq!(ds.column_index("amount"), Some(1));
        assert!(ds.rename_column("date", "when"));
        assert!(!ds.rename_column("date", "when"));
        assert_eq!(ds.columns, vec!["when", "amount"]);
    }

    #[test]
    fn test_normalize_column_names() {
        let mut ds = Dataset::new(vec!["  Description ".to_string(), "SUM".to_string()]);
        ds.normalize_column_names();
        assert_eq!(ds.columns, vec!["description", "sum"]);
    }

    #[test]
    fn test_constant_column_reaches_every_row() {
        let mut ds = sample();
        ds.push_constant_column("category", Cell::Text("unspecified".to_string()));
        assert!(
            ds.rows
                .iter()
                .all(|r| r[2] == Cell::Text("unspecified".to_string()))
        );
    }

    #[test]
    fn test_column_has_number() {
        let ds = sample();
        assert!(!ds.column_has_number(0));
        assert!(ds.column_has_number(1));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(Cell::Number(5.0).coerce_number(), Some(5.0));
        assert_eq!(Cell::Text(" -3.5 ".to_string()).coerce_number(), Some(-3.5));
        assert_eq!(Cell::Text("n/a".to_string()).coerce_number(), None);
        assert_eq!(Cell::Empty.coerce_number(), None);
        assert_eq!(Cell::Number(f64::NAN).coerce_number(), None);
    }

    #[test]
    fn test_rows_as_json_is_bounded() {
        let ds = sample();
        let rows = ds.rows_as_json(1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("date"), Some(&json!("01.03.2024")));
        assert_eq!(rows[0].get("amount"), Some(&json!(3500.0)));
        assert_eq!(ds.rows_as_json(10).len(), 2);
    }

    #[test]
    fn test_empty_cell_serializes_as_null() {
        let ds = sample();
        let rows = ds.rows_as_json(2);
        assert_eq!(rows[1].get("amount"), Some(&Value::Null));
    }
}
