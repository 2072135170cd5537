//! Command handlers for the presupuesto CLI
//!
//! The CLI is a thin shell over the core: it parses arguments into ledger
//! operations and prints totals and breakdowns. Each invocation is a
//! one-shot process, so mutating commands flush the pending save before
//! returning.

use std::io::{self, Write};

use clap::Subcommand;

use crate::config::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::ledger::Ledger;
use crate::models::category;
use crate::models::money::format_money;
use crate::models::transaction::{TransactionId, TransactionType, Update};
use crate::services::summary::{breakdown, Summary};
use crate::session::Session;

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new transaction with default fields and print its id
    Add,

    /// Edit one field (tipo, categoria, concepto, monto, interes, fecha)
    Set {
        /// Transaction id, as printed by `add` and `list`
        id: TransactionId,
        /// Field name (wire name: tipo, categoria, concepto, monto, interes, fecha)
        field: String,
        /// New value; bad numeric input degrades to 0 instead of failing
        value: String,
    },

    /// Remove a transaction
    Rm {
        /// Transaction id
        id: TransactionId,
    },

    /// List all transactions in insertion order
    List,

    /// Show grand totals and the per-category breakdowns
    Summary {
        /// Restrict to one type (gasto, ingreso or deuda)
        #[arg(short, long)]
        tipo: Option<String>,
    },

    /// Delete every transaction and its stored data
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or set the dark-mode preference
    DarkMode {
        /// `on` or `off`; omit to show the current value
        state: Option<String>,
    },

    /// Show where data is stored
    Config,
}

/// Dispatch a parsed command against the session
pub fn handle_command(
    session: &mut Session,
    paths: &BudgetPaths,
    command: Commands,
) -> BudgetResult<()> {
    match command {
        Commands::Add => {
            let id = session.add();
            session.flush();
            println!("Added transaction {id}");
        }
        Commands::Set { id, field, value } => {
            let update = parse_update(&field, value)?;
            if session.ledger().get(id).is_none() {
                println!("No transaction with id {id}");
            } else {
                session.update(id, update);
                session.flush();
                println!("Updated transaction {id}");
            }
        }
        Commands::Rm { id } => {
            if session.ledger().get(id).is_none() {
                println!("No transaction with id {id}");
            } else {
                session.remove(id);
                session.flush();
                println!("Removed transaction {id}");
            }
        }
        Commands::List => print_list(session.ledger()),
        Commands::Summary { tipo } => match tipo {
            Some(tipo) => {
                let kind = parse_type(&tipo)?;
                print_breakdown(session.ledger(), kind);
            }
            None => print_summary(session.ledger()),
        },
        Commands::Clear { yes } => {
            if yes || confirm("Delete every transaction? This cannot be undone.")? {
                session.clear();
                println!("Ledger cleared");
            } else {
                println!("Aborted");
            }
        }
        Commands::DarkMode { state } => match state {
            Some(state) => {
                let dark = match state.as_str() {
                    "on" => true,
                    "off" => false,
                    other => {
                        return Err(BudgetError::Validation(format!(
                            "expected `on` or `off`, got `{other}`"
                        )))
                    }
                };
                session.set_dark_mode(dark);
                println!("Dark mode {state}");
            }
            None => {
                println!(
                    "Dark mode {}",
                    if session.dark_mode() { "on" } else { "off" }
                );
            }
        },
        Commands::Config => {
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
        }
    }
    Ok(())
}

fn parse_update(field: &str, value: String) -> BudgetResult<Update> {
    match field {
        "tipo" => parse_type(&value).map(Update::Kind),
        "categoria" => Ok(Update::Category(value)),
        "concepto" => Ok(Update::Concept(value)),
        "monto" => Ok(Update::Amount(value)),
        "interes" => Ok(Update::InterestRate(value)),
        "fecha" => Ok(Update::Date(value)),
        other => Err(BudgetError::Validation(format!(
            "unknown field `{other}` (expected tipo, categoria, concepto, monto, interes or fecha)"
        ))),
    }
}

fn parse_type(value: &str) -> BudgetResult<TransactionType> {
    TransactionType::from_wire(value).ok_or_else(|| {
        BudgetError::Validation(format!(
            "unknown type `{value}` (expected gasto, ingreso or deuda)"
        ))
    })
}

fn print_list(ledger: &Ledger) {
    if ledger.is_empty() {
        println!("No transactions. Run `presupuesto add` to create one.");
        return;
    }

    for txn in ledger.iter() {
        let label = category::registry(txn.kind)
            .label(&txn.category)
            .unwrap_or(&txn.category);
        let amount = if txn.kind == TransactionType::Debt {
            format!(
                "{} ({}% -> {})",
                format_money(txn.amount),
                txn.interest_rate,
                format_money(txn.contribution())
            )
        } else {
            format_money(txn.amount)
        };
        println!(
            "{}  {}  {:<8} {:<24} {:<20} {}",
            txn.id, txn.date, txn.kind, label, txn.concept, amount
        );
    }
    println!();
    println!(
        "{} transaction{}",
        ledger.len(),
        if ledger.len() == 1 { "" } else { "s" }
    );
}

fn print_summary(ledger: &Ledger) {
    let summary = Summary::compute(ledger);
    println!("Ingresos: {}", format_money(summary.income));
    println!("Gastos:   {}", format_money(summary.expense));
    println!("Deudas:   {}", format_money(summary.debt));
    println!("Balance:  {}", format_money(summary.balance));

    for kind in TransactionType::all() {
        print_breakdown(ledger, *kind);
    }
}

fn print_breakdown(ledger: &Ledger, kind: TransactionType) {
    let slices = breakdown(ledger, kind);
    if slices.is_empty() {
        return;
    }
    println!();
    println!("{}:", kind.label());
    for slice in slices {
        println!("  {:<28} {}", slice.label, format_money(slice.total));
    }
}

fn confirm(prompt: &str) -> BudgetResult<bool> {
    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .map_err(|e| BudgetError::Io(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| BudgetError::Io(e.to_string()))?;

    Ok(matches!(line.trim(), "y" | "Y" | "yes" | "si" | "sí"))
}
