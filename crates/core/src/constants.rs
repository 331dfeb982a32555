//! Category sets
//!
//! Transactions and recurrence rules reference a fixed category label per
//! kind. The labels mirror the sets exposed in the web client's category
//! pickers.

use crate::recurrence::TransactionKind;

/// Categories valid for expense transactions and rules.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "food",
    "transport",
    "shopping",
    "housing",
    "utilities",
    "entertainment",
    "healthcare",
    "education",
    "travel",
    "subscriptions",
    "other",
];

/// Categories valid for income transactions and rules.
pub const INCOME_CATEGORIES: &[&str] = &[
    "salary",
    "freelance",
    "investments",
    "gifts",
    "side_income",
    "interest",
    "other",
];

/// Returns the category set matching a transaction kind.
pub fn categories_for_kind(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Checks whether a category label belongs to the set for the given kind.
pub fn is_valid_category(kind: TransactionKind, category: &str) -> bool {
    categories_for_kind(kind).contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_sets_are_kind_specific() {
        assert!(is_valid_category(TransactionKind::Expense, "subscriptions"));
        assert!(is_valid_category(TransactionKind::Income, "salary"));
        assert!(!is_valid_category(TransactionKind::Income, "subscriptions"));
        assert!(!is_valid_category(TransactionKind::Expense, "salary"));
        // "other" exists in both sets
        assert!(is_valid_category(TransactionKind::Income, "other"));
        assert!(is_valid_category(TransactionKind::Expense, "other"));
    }
}
