//! Transaction model and field mutation rules
//!
//! A transaction is one recorded income, expense or debt entry. Field names
//! on the wire are Spanish (`tipo`, `categoria`, `concepto`, `monto`,
//! `interes`, `fecha`) for compatibility with previously stored data, so
//! every serde rename here is part of the persistence contract.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use super::category;
use super::money;

/// The three kinds of ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionType {
    /// An expense (wire value `gasto`)
    #[default]
    #[serde(rename = "gasto")]
    Expense,
    /// An income (wire value `ingreso`)
    #[serde(rename = "ingreso")]
    Income,
    /// A debt, the only kind where interest applies (wire value `deuda`)
    #[serde(rename = "deuda")]
    Debt,
}

impl TransactionType {
    /// All types, in display order
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense, Self::Debt]
    }

    /// The wire value (also what the CLI accepts)
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Expense => "gasto",
            Self::Income => "ingreso",
            Self::Debt => "deuda",
        }
    }

    /// Parse a wire value
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "gasto" => Some(Self::Expense),
            "ingreso" => Some(Self::Income),
            "deuda" => Some(Self::Debt),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Gastos",
            Self::Income => "Ingresos",
            Self::Debt => "Deudas",
        }
    }

    /// The category a transaction falls back to when switched to this type
    pub fn default_category(&self) -> &'static str {
        match self {
            Self::Expense => "casa",
            Self::Income => "salario",
            Self::Debt => "prestamo",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Unique numeric transaction id, matching the wire contract (`id` is a
/// JSON number).
///
/// Generated ids combine epoch milliseconds with a random sub-millisecond
/// fraction, so two transactions created within the same instant still get
/// distinct ids. An id is assigned at creation and never mutated or reused.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(f64);

impl TransactionId {
    /// Generate a fresh collision-resistant id
    pub fn generate() -> Self {
        Self(Utc::now().timestamp_millis() as f64 + random_fraction())
    }

    /// Id for a historically saved record that has none: derived from its
    /// position in the stored array plus a timestamp/random component, so
    /// old data stays usable without loss.
    pub fn migrated(position: usize) -> Self {
        Self(Utc::now().timestamp_millis() as f64 + position as f64 + random_fraction())
    }

    /// The serde default for records missing an `id` field; replaced during
    /// load by [`TransactionId::migrated`].
    pub(crate) const fn unset() -> Self {
        Self(0.0)
    }

    pub(crate) fn is_unset(&self) -> bool {
        self.0 == 0.0
    }

    /// The raw numeric value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Fold some of a v4 UUID's random bits into `[0, 1)`.
fn random_fraction() -> f64 {
    const BITS: u32 = 52;
    let random = uuid::Uuid::new_v4().as_u128() & ((1u128 << BITS) - 1);
    random as f64 / (1u128 << BITS) as f64
}

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique id, stable for the lifetime of the ledger
    #[serde(default = "TransactionId::unset")]
    pub id: TransactionId,

    /// Entry kind; decides the category registry and whether interest applies
    #[serde(rename = "tipo", default)]
    pub kind: TransactionType,

    /// Category key: a registry key for `kind`, or user-defined free text
    #[serde(rename = "categoria", default)]
    pub category: String,

    /// Free-text label
    #[serde(rename = "concepto", default)]
    pub concept: String,

    /// Non-negative amount
    #[serde(rename = "monto", default)]
    pub amount: f64,

    /// Interest percentage, only meaningful for debts; held in `[0, 300]`
    #[serde(rename = "interes", default)]
    pub interest_rate: f64,

    /// Calendar date string (`YYYY-MM-DD` from the date picker, stored verbatim)
    #[serde(rename = "fecha", default)]
    pub date: String,
}

/// A single-field edit.
///
/// Numeric fields carry the raw text straight from an input widget; parsing
/// and clamping happen in [`Transaction::apply`] so malformed input degrades
/// to a safe default instead of failing the edit.
#[derive(Debug, Clone)]
pub enum Update {
    Kind(TransactionType),
    Category(String),
    Concept(String),
    Amount(String),
    InterestRate(String),
    Date(String),
}

impl Transaction {
    /// Create a transaction with default field values: an expense in the
    /// default expense category, dated today.
    pub fn new() -> Self {
        let kind = TransactionType::Expense;
        Self {
            id: TransactionId::generate(),
            kind,
            category: kind.default_category().to_string(),
            concept: String::new(),
            amount: 0.0,
            interest_rate: 0.0,
            date: Local::now().date_naive().to_string(),
        }
    }

    /// Apply a single-field edit per the mutation rules:
    ///
    /// - amount: parse as decimal; on failure or a negative result, store 0
    /// - interest rate: parse as decimal; on failure store 0; clamp to `[0, 300]`
    /// - type: switching away from debt zeroes the interest, and any type
    ///   switch resets the category to the new type's default (the old key
    ///   would belong to the wrong registry)
    /// - category/concept/date: stored verbatim, no validation
    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Amount(raw) => {
                let amount = parse_decimal(&raw);
                self.amount = if amount >= 0.0 { amount } else { 0.0 };
            }
            Update::InterestRate(raw) => {
                self.interest_rate = parse_decimal(&raw).clamp(0.0, 300.0);
            }
            Update::Kind(kind) => {
                self.kind = kind;
                if kind != TransactionType::Debt {
                    self.interest_rate = 0.0;
                }
                self.category = kind.default_category().to_string();
            }
            Update::Category(value) => self.category = value,
            Update::Concept(value) => self.concept = value,
            Update::Date(value) => self.date = value,
        }
    }

    /// What this transaction contributes to totals and breakdowns: the bare
    /// amount, except debts contribute their interest-inclusive total.
    pub fn contribution(&self) -> f64 {
        match self.kind {
            TransactionType::Debt => money::total_debt(self.amount, self.interest_rate),
            _ => self.amount,
        }
    }

    /// Whether the category is user-defined free text rather than a key from
    /// this type's registry.
    pub fn is_custom_category(&self) -> bool {
        category::is_custom(self.kind, &self.category)
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_decimal(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}
