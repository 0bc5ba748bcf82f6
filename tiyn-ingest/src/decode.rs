//! File decoding: turn an uploaded statement into a [`Dataset`].
//!
//! Dispatch is by extension. CSV and XLSX decode to tabular datasets
//! directly; PDFs go through the external `pdftotext` tool and the document
//! parser. Byte-level format handling stays here so the rest of the
//! pipeline only ever sees decoded text or cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};
use tiyn_core::{AnalyzeError, Cell, Dataset};
use tracing::info;

use crate::document::parse_pages;

/// Decode a statement file into a dataset, dispatching on its extension.
///
/// Unknown extensions fail with [`AnalyzeError::UnsupportedFormat`] before
/// any file I/O; a decode that yields zero rows fails with
/// [`AnalyzeError::EmptyDataset`].
pub fn decode_path(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            decode_csv(file)?
        }
        "xlsx" => decode_xlsx(path)?,
        "pdf" => parse_pages(&pdf_pages(path)?),
        _ => return Err(AnalyzeError::UnsupportedFormat(ext).into()),
    };

    if dataset.is_empty() {
        return Err(AnalyzeError::EmptyDataset.into());
    }
    info!(
        rows = dataset.row_count(),
        format = %ext,
        "decoded {}",
        path.display()
    );
    Ok(dataset)
}

/// Decode delimited text with a header row.
///
/// Column typing is column-wise, dataframe style: a column is numeric when
/// it has at least one non-empty value and every non-empty value parses as
/// a number. Mixed columns stay text.
pub fn decode_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns: Vec<String> = rdr
        .headers()
        .context("reading csv header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.context("reading csv record")?;
        raw_rows.push(
            (0..columns.len())
                .map(|i| record.get(i).unwrap_or("").to_string())
                .collect(),
        );
    }

    let numeric: Vec<bool> = (0..columns.len())
        .map(|i| {
            let mut saw_value = false;
            let all_parse = raw_rows.iter().all(|row| {
                let value = row[i].trim();
                if value.is_empty() {
                    true
                } else {
                    saw_value = true;
                    value.parse::<f64>().is_ok()
                }
            });
            saw_value && all_parse
        })
        .collect();

    let mut dataset = Dataset::new(columns);
    for row in raw_rows {
        let cells = row
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let value = value.trim();
                if value.is_empty() {
                    Cell::Empty
                } else if numeric[i] {
                    value.parse().map(Cell::Number).unwrap_or(Cell::Empty)
                } else {
                    Cell::Text(value.to_string())
                }
            })
            .collect();
        dataset.push_row(cells);
    }
    Ok(dataset)
}

/// Decode the first worksheet of an XLSX workbook, first row as header.
pub fn decode_xlsx(path: &Path) -> Result<Dataset> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("opening {}", path.display()))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.context("reading first worksheet")?,
        None => bail!("workbook has no sheets: {}", path.display()),
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Dataset::default());
    };
    let columns = header.iter().map(|cell| cell.to_string()).collect();

    let mut dataset = Dataset::new(columns);
    for row in rows {
        dataset.push_row(row.iter().map(cell_from_sheet).collect());
    }
    Ok(dataset)
}

fn cell_from_sheet(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        // Dates stay textual so the amount-column scan never picks them.
        Data::DateTime(_) => Cell::Text(data.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// Extract page texts from a PDF via the external `pdftotext` tool
/// (poppler). Pages are split on the form feeds it emits.
fn pdf_pages(path: &Path) -> Result<Vec<String>> {
    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg(path)
        .arg("-")
        .output()
        .context("running pdftotext (is poppler-utils installed?)")?;
    if !output.status.success() {
        bail!(
            "pdftotext failed on {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let text = String::from_utf8_lossy(&output.stdout).into_owned();
    Ok(text.split('\u{c}').map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extension_rejected_before_io() {
        let err = decode_path(Path::new("statement.docx")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalyzeError>(),
            Some(&AnalyzeError::UnsupportedFormat("docx".to_string()))
        );
        let err = decode_path(Path::new("noextension")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalyzeError>(),
            Some(AnalyzeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_decode_csv_types_numeric_columns() {
        let data = "Description,Sum\nOzon,1200.50\nTaxi,300\n";
        let ds = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.columns, vec!["Description", "Sum"]);
        assert_eq!(ds.rows[0][0], Cell::Text("Ozon".to_string()));
        assert_eq!(ds.rows[0][1], Cell::Number(1200.50));
        assert_eq!(ds.rows[1][1], Cell::Number(300.0));
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let data = "name,value\na,12\nb,n/a\n";
        let ds = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.rows[0][1], Cell::Text("12".to_string()));
        assert_eq!(ds.rows[1][1], Cell::Text("n/a".to_string()));
    }

    #[test]
    fn test_empty_fields_do_not_break_numeric_inference() {
        let data = "category,amount\nfood,10\ntransport,\n";
        let ds = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.rows[0][1], Cell::Number(10.0));
        assert_eq!(ds.rows[1][1], Cell::Empty);
    }

    #[test]
    fn test_short_records_padded() {
        let data = "a,b,c\n1,2\n";
        let ds = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(ds.rows[0].len(), 3);
        assert_eq!(ds.rows[0][2], Cell::Empty);
    }
}
