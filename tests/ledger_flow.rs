//! End-to-end flow against the real file-backed store

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use presupuesto::models::transaction::{TransactionType, Update};
use presupuesto::services::summary::Summary;
use presupuesto::session::Session;
use presupuesto::storage::FileStore;

const TEST_DELAY: Duration = Duration::from_millis(50);

fn open_session(dir: &TempDir) -> Session {
    let store = Arc::new(FileStore::new(dir.path()).unwrap());
    Session::load_with_delay(store, TEST_DELAY)
}

#[test]
fn test_totals_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut session = open_session(&dir);

        let income = session.add();
        session.update(income, Update::Kind(TransactionType::Income));
        session.update(income, Update::Category("salario".into()));
        session.update(income, Update::Amount("1000".into()));

        let expense = session.add();
        session.update(expense, Update::Category("alimento".into()));
        session.update(expense, Update::Amount("200".into()));

        let debt = session.add();
        session.update(debt, Update::Kind(TransactionType::Debt));
        session.update(debt, Update::Category("tarjetaCredito".into()));
        session.update(debt, Update::Amount("100".into()));
        session.update(debt, Update::InterestRate("10".into()));

        session.flush();
    }

    let session = open_session(&dir);
    assert_eq!(session.ledger().len(), 3);

    let summary = Summary::compute(session.ledger());
    assert_eq!(summary.income, 1000.0);
    assert_eq!(summary.expense, 200.0);
    assert_eq!(summary.debt, 110.0);
    assert_eq!(summary.balance, 690.0);
}

#[test]
fn test_debounced_save_reaches_disk_without_flush() {
    let dir = TempDir::new().unwrap();

    let mut session = open_session(&dir);
    let id = session.add();
    session.update(id, Update::Amount("75".into()));
    std::thread::sleep(TEST_DELAY * 4);

    let reloaded = open_session(&dir);
    assert_eq!(reloaded.ledger().len(), 1);
    assert_eq!(reloaded.ledger().get(id).unwrap().amount, 75.0);
}

#[test]
fn test_corrupt_ledger_file_recovers_empty() {
    let dir = TempDir::new().unwrap();
    let ledger_path = dir.path().join("transacciones.json");
    std::fs::write(&ledger_path, "][not json at all").unwrap();

    let session = open_session(&dir);

    assert!(session.ledger().is_empty());
    assert!(!ledger_path.exists());
}

#[test]
fn test_legacy_records_without_ids_get_migrated() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transacciones.json"),
        r#"[
            {"tipo":"gasto","categoria":"casa","concepto":"alquiler","monto":300.0,"interes":0.0,"fecha":"2022-01-15"},
            {"tipo":"deuda","categoria":"hipoteca","concepto":"","monto":1000.0,"interes":5.0,"fecha":"2022-02-01"}
        ]"#,
    )
    .unwrap();

    let mut session = open_session(&dir);
    assert_eq!(session.ledger().len(), 2);
    let ids: Vec<_> = session.ledger().iter().map(|t| t.id).collect();
    assert_ne!(ids[0], ids[1]);
    assert!(ids.iter().all(|id| id.value() != 0.0));

    // The assigned ids are addressable like any other
    session.update(ids[0], Update::Amount("350".into()));
    session.flush();

    let reloaded = open_session(&dir);
    assert_eq!(reloaded.ledger().get(ids[0]).unwrap().amount, 350.0);
    assert_eq!(reloaded.ledger().get(ids[1]).unwrap().interest_rate, 5.0);
}

#[test]
fn test_clear_removes_the_file() {
    let dir = TempDir::new().unwrap();

    let mut session = open_session(&dir);
    session.add();
    session.flush();
    assert!(dir.path().join("transacciones.json").exists());

    session.clear();
    assert!(session.ledger().is_empty());
    assert!(!dir.path().join("transacciones.json").exists());
}

#[test]
fn test_clear_wins_over_pending_autosave() {
    let dir = TempDir::new().unwrap();

    let mut session = open_session(&dir);
    session.add();
    session.clear();
    std::thread::sleep(TEST_DELAY * 4);

    // The add's debounced write must not come back after the clear
    assert!(session.ledger().is_empty());
    assert!(!dir.path().join("transacciones.json").exists());
}

#[test]
fn test_dark_mode_persisted_across_sessions() {
    let dir = TempDir::new().unwrap();

    let mut session = open_session(&dir);
    assert!(!session.dark_mode());
    session.set_dark_mode(true);
    drop(session);

    let session = open_session(&dir);
    assert!(session.dark_mode());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("modoOscuro.json")).unwrap(),
        "true"
    );
}
