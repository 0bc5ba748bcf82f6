//! Drive the line extractor across every page of an unstructured document
//! and assemble the categorized rows into a dataset.

use tiyn_core::{Cell, Dataset};
use tracing::debug;

use crate::categorize::categorize;
use crate::line::extract_line;

/// Parse decoded page texts into a `[date, category, amount]` dataset.
///
/// Lines are visited in page order then line order; lines without a usable
/// transaction are dropped. Pages with no extractable text (image-only
/// scans) are skipped without error.
pub fn parse_pages<S: AsRef<str>>(pages: &[S]) -> Dataset {
    let mut dataset = Dataset::new(vec![
        "date".to_string(),
        "category".to_string(),
        "amount".to_string(),
    ]);

    for (page_no, page) in pages.iter().enumerate() {
        let page = page.as_ref();
        if page.trim().is_empty() {
            debug!(page = page_no + 1, "skipping page with no text");
            continue;
        }
        for raw_line in page.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let Some(row) = extract_line(line) else {
                continue;
            };
            let category = categorize(&row.description);
            dataset.push_row(vec![
                Cell::Text(row.date),
                Cell::Text(category),
                Cell::Number(row.amount),
            ]);
        }
    }

    debug!(rows = dataset.row_count(), pages = pages.len(), "parsed document text");
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_in_page_then_line_order() {
        let pages = vec![
            "01.01.2024 Перевод 5000\n02.01.2024 Ozon shop -1200\n".to_string(),
            "03.01.2024 Снятие в банкомате 10 000,00 ₸\n".to_string(),
        ];
        let ds = parse_pages(&pages);
        assert_eq!(ds.columns, vec!["date", "category", "amount"]);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.rows[0][0], Cell::Text("01.01.2024".to_string()));
        assert_eq!(ds.rows[0][1], Cell::Text("transfer/deposit".to_string()));
        assert_eq!(ds.rows[0][2], Cell::Number(5000.0));
        assert_eq!(ds.rows[1][1], Cell::Text("purchase".to_string()));
        assert_eq!(ds.rows[1][2], Cell::Number(-1200.0));
        assert_eq!(ds.rows[2][1], Cell::Text("cash".to_string()));
        assert_eq!(ds.rows[2][2], Cell::Number(10000.0));
    }

    #[test]
    fn test_empty_and_unusable_pages_skipped() {
        let pages = vec![
            "".to_string(),
            "   \n\n".to_string(),
            "header without transactions\n01.02.2024 taxi 700\n".to_string(),
        ];
        let ds = parse_pages(&pages);
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.rows[0][2], Cell::Number(700.0));
    }

    #[test]
    fn test_no_pages_yields_empty_dataset() {
        let ds = parse_pages::<String>(&[]);
        assert!(ds.is_empty());
        assert_eq!(ds.columns.len(), 3);
    }
}
