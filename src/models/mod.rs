//! Core data models for presupuesto

pub mod category;
pub mod money;
pub mod transaction;

pub use category::{registry, CategoryRegistry, CUSTOM_CATEGORY_KEY};
pub use money::{format_money, total_debt};
pub use transaction::{Transaction, TransactionId, TransactionType, Update};
