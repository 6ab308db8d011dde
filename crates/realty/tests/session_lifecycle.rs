//! Integration tests for opening, mutating and closing firm sessions.
//!
//! Run with:
//! ```bash
//! cargo test -p realty --test session_lifecycle
//! ```

use realty::firm::FirmError;
use realty::models::{Broker, Client, CongestionPolicy, RealtyConfig, StoreConfig};
use realty::store::{MemoryStore, StoreError};
use realty::FirmSession;
use rust_decimal_macros::dec;

fn config_in(dir: &std::path::Path) -> RealtyConfig {
    RealtyConfig {
        store: StoreConfig {
            data_dir: dir.join("data").to_string_lossy().into_owned(),
        },
        ..RealtyConfig::default()
    }
}

/// First run creates the store, later runs see earlier changes.
#[test]
fn changes_persist_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut session = realty::open_file_session(&config, "Sunny Side").unwrap();
    assert_eq!(session.firm().broker_count(), 0);
    let firm = session.firm_mut();
    firm.add_broker(Broker::new("Alice", 0).unwrap()).unwrap();
    firm.add_broker(Broker::new("Bob", 0).unwrap()).unwrap();
    firm.assign(Client::seller("Sam", "100").unwrap()).unwrap();
    let sam = firm.client_by_phone("100").unwrap();
    let apt = firm.list_apartment(sam, "1 Main St", dec!(54.5), 2).unwrap();
    firm.request_sale(apt, "2 days", true).unwrap();
    session.close().unwrap();

    assert!(dir.path().join("data").join("sunnyside.csv").exists());

    let mut session = realty::open_file_session(&config, "Sunny Side").unwrap();
    assert!(session.skipped().is_empty());
    let firm = session.firm_mut();
    assert_eq!(firm.broker_count(), 2);
    assert_eq!(firm.deal_count(), 1);

    // Alice already has Sam, so the next client goes to Bob.
    let bob = firm.assign(Client::buyer("Bea", "200").unwrap()).unwrap();
    assert_eq!(firm.broker(bob).unwrap().name(), "Bob");
    session.close().unwrap();

    let session = realty::open_file_session(&config, "sunnyside").unwrap();
    let firm = session.firm();
    assert_eq!(firm.client_count(), 2);
    let alice = firm.broker_by_name("Alice").unwrap();
    assert_eq!(firm.deal_stats(alice).successful, 1);
}

#[test]
fn dropping_without_close_discards_changes() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut session = realty::open_file_session(&config, "Acme").unwrap();
    session
        .firm_mut()
        .add_broker(Broker::new("Alice", 0).unwrap())
        .unwrap();
    drop(session);

    let session = realty::open_file_session(&config, "Acme").unwrap();
    assert_eq!(session.firm().broker_count(), 0);
}

#[test]
fn failed_assignment_leaves_store_consistent() {
    let store = MemoryStore::with_lines(["0,Alice,1", "2,Bea,200,Alice"]);
    let mut session = FirmSession::open(store, "Acme", CongestionPolicy::Trust).unwrap();

    let err = session
        .firm_mut()
        .assign(Client::seller("Bea Again", "200").unwrap())
        .unwrap_err();
    assert_eq!(err, FirmError::DuplicateClient("200".to_string()));

    let store = session.close().unwrap();
    assert_eq!(store.lines(), &["0,Alice,1", "2,Bea,200,Alice"]);
    assert_eq!(store.write_count(), 1);
}

#[test]
fn skipped_records_are_reported_and_not_rewritten() {
    let store = MemoryStore::with_lines(["4,1 Main St,2,Alice,1h", "0,Alice,0"]);
    let session = FirmSession::open(store, "Acme", CongestionPolicy::Trust).unwrap();
    assert_eq!(session.skipped().len(), 1);

    let store = session.close().unwrap();
    assert_eq!(store.lines(), &["0,Alice,0"]);
}

#[test]
fn malformed_store_refuses_to_open() {
    let store = MemoryStore::with_lines(["0,Alice,0", "0,Bob"]);
    let result = FirmSession::open(store, "Acme", CongestionPolicy::Trust);
    assert!(matches!(
        result,
        Err(StoreError::MalformedRecord { line: 2, .. })
    ));
}

#[test]
fn invalid_firm_name_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = realty::open_file_session(&config_in(dir.path()), "   ");
    assert!(matches!(result, Err(StoreError::InvalidStoreKey(_))));
}
