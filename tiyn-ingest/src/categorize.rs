//! Keyword categorization of transaction descriptions.
//!
//! An ordered rule list, first match wins, so precedence is an explicit
//! contract: a description containing both a purchase and a utilities
//! keyword is a purchase because that rule is checked first.

/// One categorization rule: case-insensitive substring containment of any
/// keyword maps the description to `label`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// Rules in evaluation order. Keywords mix Russian stems and latin merchant
/// names as they appear in Kazakh bank exports.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        label: "transfer/deposit",
        keywords: &["перевод", "пополнение", "deposit", "депозит"],
    },
    CategoryRule {
        label: "purchase",
        keywords: &["покупк", "магазин", "ozon", "market", "shop"],
    },
    CategoryRule {
        label: "utilities",
        keywords: &["коммун", "телеком", "kazakhtelecom", "услуги"],
    },
    CategoryRule {
        label: "cash",
        keywords: &["аппарат", "банкомат", "снятие"],
    },
];

const FALLBACK_MAX_CHARS: usize = 80;
const FALLBACK_KEEP_CHARS: usize = 77;

/// Map a free-text description to a category label.
///
/// With no rule match the description itself becomes a degenerate category,
/// truncated to 80 characters (77 plus `"..."`). Downstream aggregation
/// treats that label as opaque text. Never fails, never returns empty for a
/// non-empty description.
pub fn categorize(description: &str) -> String {
    let lower = description.to_lowercase();
    for rule in CATEGORY_RULES {
        if rule.keywords.iter().any(|keyword| lower.contains(keyword)) {
            return rule.label.to_string();
        }
    }

    if description.chars().count() <= FALLBACK_MAX_CHARS {
        description.to_string()
    } else {
        let head: String = description.chars().take(FALLBACK_KEEP_CHARS).collect();
        format!("{head}...")
    }
}
