//! Business logic layer: derived views over the ledger

pub mod summary;

pub use summary::{breakdown, CategorySlice, Summary};
