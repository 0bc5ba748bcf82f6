//! tiyn-ingest: statement ingestion — amount/line extraction from
//! unstructured text, keyword categorization, and file decoding
//! (CSV, XLSX, PDF text) into a [`tiyn_core::Dataset`].

pub mod amount;
pub mod categorize;
pub mod decode;
pub mod document;
pub mod line;

pub use amount::parse_amount;
pub use categorize::{CATEGORY_RULES, CategoryRule, categorize};
pub use decode::{decode_csv, decode_path, decode_xlsx};
pub use document::parse_pages;
pub use line::{RawRow, extract_line};
