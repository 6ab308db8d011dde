//! Rebuild a firm's entity graph from store lines.
//!
//! Lines are decoded first; a single malformed line fails the whole load and
//! no graph is returned. Records are then linked in file order. References are
//! resolved only against entities introduced on earlier lines, so a record
//! pointing at an unknown broker, seller or apartment is skipped. Skips are
//! not errors: they are logged and returned in [`LoadReport::skipped`].

use realty_firm::{Firm, FirmError};
use realty_models::{Broker, Client, CongestionPolicy};
use thiserror::Error;

use crate::error::StoreError;
use crate::record::{Record, RecordTag};
use crate::store::LineStore;

/// Why a well-formed record was left out of the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("no broker named {0:?} loaded before this record")]
    UnknownBroker(String),

    #[error("no seller with phone {0:?} loaded before this record")]
    UnknownSeller(String),

    #[error("no apartment at {0:?} loaded before this record")]
    UnknownApartment(String),

    #[error("broker {0:?} already loaded")]
    DuplicateBroker(String),

    #[error("client with phone {0:?} already loaded")]
    DuplicateClient(String),

    #[error("apartment at {0:?} already loaded")]
    DuplicateApartment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the store.
    pub line: usize,
    pub tag: RecordTag,
    pub reason: SkipReason,
}

/// A loaded graph plus the records that could not be linked into it.
#[derive(Debug)]
pub struct LoadReport {
    pub firm: Firm,
    pub skipped: Vec<SkippedRecord>,
}

/// Decode and link `lines` into a new firm named `firm_name`.
pub fn load_graph<I, S>(
    firm_name: &str,
    lines: I,
    policy: CongestionPolicy,
) -> Result<LoadReport, StoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let records = decode_all(lines)?;

    let mut linker = Linker {
        firm: Firm::new(firm_name),
        skipped: Vec::new(),
    };
    for (line, record) in records {
        linker.link(line, record)?;
    }
    let Linker { mut firm, skipped } = linker;

    apply_congestion_policy(&mut firm, policy);

    tracing::info!(
        firm = firm_name,
        brokers = firm.broker_count(),
        clients = firm.client_count(),
        apartments = firm.apartment_count(),
        deals = firm.deal_count(),
        skipped = skipped.len(),
        "Loaded firm graph"
    );

    Ok(LoadReport { firm, skipped })
}

/// Read every line from `store` and load it.
pub fn load_from_store<L: LineStore + ?Sized>(
    store: &mut L,
    firm_name: &str,
    policy: CongestionPolicy,
) -> Result<LoadReport, StoreError> {
    let lines = store.read_lines()?;
    load_graph(firm_name, lines, policy)
}

fn decode_all<I, S>(lines: I) -> Result<Vec<(usize, Record)>, StoreError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (index, raw) in lines.into_iter().enumerate() {
        let line = index + 1;
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            continue;
        }
        let record = Record::decode_line(raw)
            .map_err(|source| StoreError::MalformedRecord { line, source })?;
        records.push((line, record));
    }
    Ok(records)
}

struct Linker {
    firm: Firm,
    skipped: Vec<SkippedRecord>,
}

impl Linker {
    fn link(&mut self, line: usize, record: Record) -> Result<(), StoreError> {
        let tag = record.tag();
        match self.try_link(record)? {
            None => Ok(()),
            Some(reason) => {
                tracing::warn!(line, %tag, %reason, "Skipping store record");
                self.skipped.push(SkippedRecord { line, tag, reason });
                Ok(())
            }
        }
    }

    /// Link one record, returning the skip reason when it cannot be linked.
    fn try_link(&mut self, record: Record) -> Result<Option<SkipReason>, StoreError> {
        let firm = &mut self.firm;
        match record {
            Record::Broker { name, congestion } => {
                let broker = Broker::new(name, congestion).map_err(FirmError::from)?;
                match firm.add_broker(broker) {
                    Ok(_) => Ok(None),
                    Err(FirmError::DuplicateBroker(name)) => {
                        Ok(Some(SkipReason::DuplicateBroker(name)))
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Record::Client {
                role,
                name,
                phone,
                broker,
            } => {
                let Some(broker_id) = firm.broker_by_name(&broker) else {
                    return Ok(Some(SkipReason::UnknownBroker(broker)));
                };
                let client = Client::with_role(role, name, phone).map_err(FirmError::from)?;
                match firm.attach_client(client, broker_id) {
                    Ok(_) => Ok(None),
                    Err(FirmError::DuplicateClient(phone)) => {
                        Ok(Some(SkipReason::DuplicateClient(phone)))
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Record::Apartment {
                address,
                area,
                num_rooms,
                owner_phone,
            } => {
                let Some(owner) = firm.seller_by_phone(&owner_phone) else {
                    return Ok(Some(SkipReason::UnknownSeller(owner_phone)));
                };
                match firm.list_apartment(owner, address, area, num_rooms) {
                    Ok(_) => Ok(None),
                    Err(FirmError::DuplicateApartment(address)) => {
                        Ok(Some(SkipReason::DuplicateApartment(address)))
                    }
                    Err(e) => Err(e.into()),
                }
            }
            Record::Deal {
                side,
                apartment,
                status,
                broker,
                time,
            } => {
                let Some(apartment_id) = firm.apartment_by_address(&apartment) else {
                    return Ok(Some(SkipReason::UnknownApartment(apartment)));
                };
                let Some(broker_id) = firm.broker_by_name(&broker) else {
                    return Ok(Some(SkipReason::UnknownBroker(broker)));
                };
                firm.record_deal(side, apartment_id, broker_id, time, status)?;
                Ok(None)
            }
        }
    }
}

fn apply_congestion_policy(firm: &mut Firm, policy: CongestionPolicy) {
    let drift = firm.congestion_drift();
    if drift.is_empty() {
        return;
    }
    match policy {
        CongestionPolicy::Trust => {
            for (id, stored, assigned) in drift {
                if let Some(broker) = firm.broker(id) {
                    tracing::warn!(
                        broker = %broker.name(),
                        stored,
                        assigned,
                        "Stored congestion does not match assigned clients"
                    );
                }
            }
        }
        CongestionPolicy::Recompute => {
            tracing::info!(
                brokers = drift.len(),
                "Recomputing congestion from client assignments"
            );
            firm.recompute_congestion();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use realty_models::DealStatus;

    fn load(lines: &[&str]) -> LoadReport {
        load_graph("Acme", lines, CongestionPolicy::Trust).unwrap()
    }

    #[test]
    fn empty_store_loads_empty_firm() {
        let report = load(&[]);
        assert_eq!(report.firm.name(), "Acme");
        assert_eq!(report.firm.broker_count(), 0);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn links_full_graph() {
        let report = load(&[
            "0,Alice,1",
            "0,Bob,1",
            "1,Sam,100,Alice",
            "2,Bea,200,Bob",
            "3,1 Main St,50.5,2,100",
            "4,1 Main St,2,Alice,2 days",
            "5,1 Main St,1,Bob,1h",
        ]);
        let firm = &report.firm;
        assert!(report.skipped.is_empty());
        assert_eq!(firm.broker_count(), 2);
        assert_eq!(firm.client_count(), 2);
        assert_eq!(firm.apartment_count(), 1);
        assert_eq!(firm.deal_count(), 2);

        let sam = firm.client_by_phone("100").unwrap();
        let alice = firm.broker_by_name("Alice").unwrap();
        assert_eq!(firm.broker_for(sam), Some(alice));
        let apt = firm.apartment_by_address("1 Main St").unwrap();
        assert_eq!(firm.apartment(apt).unwrap().owner(), sam);
        assert_eq!(firm.deal_stats(alice).successful, 1);
    }

    #[test]
    fn congestion_taken_from_store() {
        let report = load(&["0,Alice,7", "1,Sam,100,Alice"]);
        let alice = report.firm.broker_by_name("Alice").unwrap();
        assert_eq!(report.firm.broker(alice).unwrap().congestion(), 7);
    }

    #[test]
    fn recompute_policy_counts_assignments() {
        let report = load_graph(
            "Acme",
            ["0,Alice,7", "1,Sam,100,Alice", "2,Bea,200,Alice"],
            CongestionPolicy::Recompute,
        )
        .unwrap();
        let alice = report.firm.broker_by_name("Alice").unwrap();
        assert_eq!(report.firm.broker(alice).unwrap().congestion(), 2);
    }

    #[test]
    fn deal_before_its_broker_is_dropped() {
        let report = load(&[
            "0,Alice,1",
            "1,Sam,100,Alice",
            "3,1 Main St,50,2,100",
            "4,1 Main St,2,Zed,1h",
            "0,Zed,0",
        ]);
        assert_eq!(report.firm.deal_count(), 0);
        assert_eq!(report.firm.broker_count(), 2);
        assert_eq!(
            report.skipped,
            vec![SkippedRecord {
                line: 4,
                tag: RecordTag::SaleDeal,
                reason: SkipReason::UnknownBroker("Zed".to_string()),
            }]
        );
    }

    #[test]
    fn deal_before_any_entity_is_dropped() {
        let report = load(&["4,1 Main St,2,Alice,1h", "0,Alice,0"]);
        assert_eq!(report.firm.deal_count(), 0);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::UnknownApartment("1 Main St".to_string())
        );
    }

    #[test]
    fn client_with_unknown_broker_is_dropped() {
        let report = load(&["1,Sam,100,Nobody", "0,Nobody,0"]);
        assert_eq!(report.firm.client_count(), 0);
        assert_eq!(report.skipped[0].tag, RecordTag::Seller);
    }

    #[test]
    fn apartment_owned_by_buyer_is_dropped() {
        let report = load(&["0,Alice,1", "2,Bea,200,Alice", "3,1 Main St,50,2,200"]);
        assert_eq!(report.firm.apartment_count(), 0);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::UnknownSeller("200".to_string())
        );
    }

    #[test]
    fn duplicates_are_dropped() {
        let report = load(&[
            "0,Alice,2",
            "0,Alice,5",
            "1,Sam,100,Alice",
            "2,Sam Again,100,Alice",
            "3,1 Main St,50,2,100",
            "3,1 Main St,60,3,100",
        ]);
        let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::DuplicateBroker("Alice".to_string()),
                SkipReason::DuplicateClient("100".to_string()),
                SkipReason::DuplicateApartment("1 Main St".to_string()),
            ]
        );
        let alice = report.firm.broker_by_name("Alice").unwrap();
        assert_eq!(report.firm.broker(alice).unwrap().congestion(), 2);
    }

    #[test]
    fn blank_lines_ignored_but_counted() {
        let report = load(&["0,Alice,0", "", "2,Bea,200,Ghost"]);
        assert_eq!(report.skipped[0].line, 3);
    }

    #[test]
    fn malformed_line_fails_whole_load() {
        let err = load_graph(
            "Acme",
            ["0,Alice,0", "1,Sam,100,Alice", "7,bogus"],
            CongestionPolicy::Trust,
        )
        .unwrap_err();
        match err {
            StoreError::MalformedRecord { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source, RecordError::UnknownTag("7".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn status_codes_decoded() {
        let report = load(&[
            "0,Alice,0",
            "1,Sam,100,Alice",
            "3,1 Main St,50,2,100",
            "4,1 Main St,1,Alice,1h",
            "4,1 Main St,2,Alice,2h",
        ]);
        let statuses: Vec<_> = report.firm.deals().map(|(_, d)| d.status).collect();
        assert_eq!(statuses, vec![DealStatus::Failed, DealStatus::Done]);
    }
}
