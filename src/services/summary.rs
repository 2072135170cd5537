//! Derived views over the ledger
//!
//! Produces the per-category breakdowns that feed charts and summary tables,
//! plus the grand totals. Both read the ledger only; all debt arithmetic
//! goes through [`crate::models::money::total_debt`] so the breakdowns and
//! the totals stay numerically consistent.

use crate::ledger::Ledger;
use crate::models::category;
use crate::models::transaction::{Transaction, TransactionType};

/// Chart palette for expense categories
pub const EXPENSE_PALETTE: &[&str] = &[
    "#dc2626", "#ef4444", "#f87171", "#fca5a5", "#b91c1c",
    "#991b1b", "#7f1d1d", "#fee2e2", "#fecaca", "#dc2626",
];

/// Chart palette for income categories
pub const INCOME_PALETTE: &[&str] = &[
    "#065f46", "#059669", "#10b981", "#34d399", "#6ee7b7",
    "#a7f3d0", "#d1fae5",
];

/// Chart palette for debt categories
pub const DEBT_PALETTE: &[&str] = &[
    "#d97706", "#f59e0b", "#fbbf24", "#fcd34d", "#b45309",
    "#92400e", "#78350f",
];

fn palette(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Expense => EXPENSE_PALETTE,
        TransactionType::Income => INCOME_PALETTE,
        TransactionType::Debt => DEBT_PALETTE,
    }
}

/// One aggregated entry of a per-type breakdown: a chart slice or summary row
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// Category key (registry key, or the literal custom category text)
    pub key: String,
    /// Display label
    pub label: String,
    /// Summed contribution of every matching transaction
    pub total: f64,
    /// Palette color assigned by position
    pub color: &'static str,
}

/// Per-category totals for one transaction type.
///
/// Registry categories come first, in declaration order, colored by their
/// registry position; categories with a total of exactly 0 are omitted.
/// Custom (free-text) categories follow in first-seen order, grouped by
/// their literal key, cycling the same palette modulo its length.
pub fn breakdown(ledger: &Ledger, kind: TransactionType) -> Vec<CategorySlice> {
    let colors = palette(kind);

    let mut slices: Vec<CategorySlice> = category::registry(kind)
        .iter()
        .enumerate()
        .map(|(index, (key, label))| CategorySlice {
            key: key.to_string(),
            label: label.to_string(),
            total: ledger
                .iter()
                .filter(|t| t.kind == kind && t.category == key)
                .map(Transaction::contribution)
                .sum(),
            color: colors[index % colors.len()],
        })
        .filter(|slice| slice.total != 0.0)
        .collect();

    let mut custom: Vec<CategorySlice> = Vec::new();
    for txn in ledger.iter().filter(|t| t.kind == kind && t.is_custom_category()) {
        let value = txn.contribution();
        if let Some(slice) = custom.iter_mut().find(|s| s.key == txn.category) {
            slice.total += value;
        } else {
            custom.push(CategorySlice {
                key: txn.category.clone(),
                label: txn.category.clone(),
                total: value,
                color: colors[custom.len() % colors.len()],
            });
        }
    }
    custom.retain(|slice| slice.total != 0.0);

    slices.extend(custom);
    slices
}

/// Grand totals over the whole ledger, registry and custom categories alike
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    /// Interest-inclusive debt total
    pub debt: f64,
    /// `income - expense - debt`
    pub balance: f64,
}

impl Summary {
    /// Compute the totals directly from the ledger
    pub fn compute(ledger: &Ledger) -> Self {
        let total_for = |kind: TransactionType| -> f64 {
            ledger
                .iter()
                .filter(|t| t.kind == kind)
                .map(Transaction::contribution)
                .sum()
        };

        let income = total_for(TransactionType::Income);
        let expense = total_for(TransactionType::Expense);
        let debt = total_for(TransactionType::Debt);

        Self {
            income,
            expense,
            debt,
            balance: income - expense - debt,
        }
    }
}
