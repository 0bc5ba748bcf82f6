//! Prompt template for the spending-advice request.

use serde_json::{Map, Value};

/// Serialize the bounded row sample into the advice prompt.
///
/// Callers cap the sample (20 rows from the normalized dataset); this
/// function only formats what it is given.
pub fn build_prompt(sample: &[Map<String, Value>]) -> String {
    let rows = serde_json::to_string_pretty(sample).unwrap_or_else(|_| "[]".to_string());
    format!(
        "Here is a sample of the user's expenses:\n\
         {rows}\n\n\
         Analyze the spending and answer:\n\
         1. Which categories are overspending the budget?\n\
         2. What advice would help cut costs?\n\
         3. How much could be saved monthly?\n"
    )
}
