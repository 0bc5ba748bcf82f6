//! Scan one line of statement text for a date token, pick the amount that
//! belongs to the transaction, and derive the description from what is left.

use std::sync::LazyLock;

use regex::Regex;

use crate::amount::parse_amount;

// D.M.Y with two- or four-digit years, never validated against a calendar.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}\.\d{1,2}\.\d{2,4}").unwrap());

// Group 1 is the numeric token; the full match also covers the optional
// currency marker so span arithmetic sees the whole amount.
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+-]?\s?\d{1,3}(?:[\s\d]*\d)?(?:[.,]\d{2})?)\s*(?:₸|KZT|т|тг|\$|₽)?").unwrap()
});

/// One candidate transaction pulled out of a line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// The date substring exactly as matched.
    pub date: String,
    pub description: String,
    pub amount: f64,
}

/// Extract a transaction from a single line, or `None` if the line holds no
/// usable one.
///
/// Amount disambiguation: take the first amount match starting at or after
/// the end of the date (with one character of tolerance for adjacency);
/// if none qualifies, fall back to the last amount match in the line. This
/// suits the dominant "date description amount" statement layout while still
/// handling trailing dates, but it can pick a running balance on lines that
/// show both an amount and a balance. Kept as-is for compatibility.
pub fn extract_line(line: &str) -> Option<RawRow> {
    let date = DATE_RE.find(line)?;
    let date_end = date.end();

    let candidates: Vec<(usize, usize, &str)> = AMOUNT_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            let token = caps.get(1)?;
            Some((full.start(), full.end(), token.as_str()))
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let (start, end, token) = candidates
        .iter()
        .find(|(start, _, _)| start + 1 >= date_end)
        .or(candidates.last())
        .copied()?;

    let mut description = if start >= date_end {
        line[date_end..start].trim()
    } else {
        ""
    };
    if description.is_empty() {
        description = line[end..].trim();
    }

    // A line whose chosen token will not parse is unusable, not an error.
    let amount = parse_amount(token).ok()?;

    Some(RawRow {
        date: date.as_str().to_string(),
        description: description.to_string(),
        amount,
    })
}
