//! tiyn-core: dataset model, column normalization, and aggregation for
//! statement analysis. No I/O happens in this crate.

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod normalize;

pub use aggregate::{CategoryTotal, DateTotal, Summary, aggregate};
pub use aggregate::{PROMPT_SAMPLE_LIMIT, TRANSACTION_SAMPLE_LIMIT};
pub use dataset::{Cell, Dataset};
pub use error::AnalyzeError;
pub use normalize::{FALLBACK_CATEGORY, normalize_columns};
