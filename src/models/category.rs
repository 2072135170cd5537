//! Fixed category registries, one per transaction type
//!
//! Each registry maps category keys to display labels. Declaration order
//! matters: it decides breakdown ordering and which palette color each
//! category gets. Registries are not user-editable; the only escape hatch
//! is a free-text "custom" category, signalled in the UI by the sentinel
//! key below.

use super::transaction::TransactionType;

/// Sentinel registry key: tells the UI to accept free text instead of a
/// fixed key. Excluded from iteration and aggregation.
pub const CUSTOM_CATEGORY_KEY: &str = "personalizada";

const CUSTOM_CATEGORY_LABEL: &str = "+ Agregar categoría personalizada";

/// An ordered key -> label mapping for one transaction type
#[derive(Debug)]
pub struct CategoryRegistry {
    entries: &'static [(&'static str, &'static str)],
}

pub static EXPENSE_CATEGORIES: CategoryRegistry = CategoryRegistry {
    entries: &[
        ("casa", "Casa"),
        ("entretenimiento", "Entretenimiento"),
        ("transporte", "Transporte"),
        ("tarjetas", "Tarjetas y Préstamos"),
        ("alimento", "Alimento"),
        ("impuestos", "Impuestos"),
        ("cuidadoPersonal", "Cuidado Personal"),
        ("varios", "Varios"),
        ("seguros", "Seguros"),
        ("ahorros", "Ahorros"),
        (CUSTOM_CATEGORY_KEY, CUSTOM_CATEGORY_LABEL),
    ],
};

pub static INCOME_CATEGORIES: CategoryRegistry = CategoryRegistry {
    entries: &[
        ("salario", "Salario"),
        ("freelance", "Freelance"),
        ("inversiones", "Inversiones"),
        ("alquiler", "Alquiler"),
        ("negocio", "Negocio"),
        ("bonos", "Bonos"),
        ("otros", "Otros"),
        (CUSTOM_CATEGORY_KEY, CUSTOM_CATEGORY_LABEL),
    ],
};

pub static DEBT_CATEGORIES: CategoryRegistry = CategoryRegistry {
    entries: &[
        ("prestamo", "Préstamo Personal"),
        ("hipoteca", "Hipoteca"),
        ("tarjetaCredito", "Tarjeta de Crédito"),
        ("prestamoCoche", "Préstamo de Coche"),
        ("estudiante", "Préstamo Estudiantil"),
        ("familiar", "Deuda Familiar"),
        ("otros", "Otros"),
        (CUSTOM_CATEGORY_KEY, CUSTOM_CATEGORY_LABEL),
    ],
};

impl CategoryRegistry {
    /// Fixed `(key, label)` pairs in declaration order, sentinel excluded
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries
            .iter()
            .copied()
            .filter(|(key, _)| *key != CUSTOM_CATEGORY_KEY)
    }

    /// Fixed keys in declaration order, sentinel excluded
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Look up the display label for a key (sentinel included)
    pub fn label(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, label)| *label)
    }

    /// Whether the key is declared in this registry (sentinel included)
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }
}

/// The registry for a transaction type
pub fn registry(kind: TransactionType) -> &'static CategoryRegistry {
    match kind {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Debt => &DEBT_CATEGORIES,
    }
}

/// A non-empty category key not declared in its type's registry is
/// user-defined free text. The sentinel key is never custom; it only marks
/// the free-text option in selection UIs.
pub fn is_custom(kind: TransactionType, key: &str) -> bool {
    !key.is_empty() && !registry(kind).contains(key)
}
