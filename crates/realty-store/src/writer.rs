//! Serialize a firm back into store lines.
//!
//! Output order is fixed regardless of how the firm was built: brokers,
//! sellers, buyers, apartments grouped by seller, sale deals, buy deals. The
//! result replaces the whole store.

use realty_firm::Firm;
use realty_models::{ClientRole, DealSide};

use crate::error::StoreError;
use crate::record::{Record, SEPARATOR};
use crate::store::LineStore;

/// Encode every entity of `firm` as store lines.
pub fn serialize_graph(firm: &Firm) -> Vec<String> {
    graph_records(firm)
        .iter()
        .inspect(|record| warn_unescaped(record))
        .map(Record::encode)
        .collect()
}

/// Overwrite `store` with the serialized firm.
pub fn write_to_store<L: LineStore + ?Sized>(store: &mut L, firm: &Firm) -> Result<(), StoreError> {
    let lines = serialize_graph(firm);
    store.write_lines(&lines)?;
    tracing::info!(firm = firm.name(), lines = lines.len(), "Persisted firm graph");
    Ok(())
}

/// Build the records for `firm` in store order.
pub fn graph_records(firm: &Firm) -> Vec<Record> {
    let mut records = Vec::new();

    records.extend(firm.brokers().map(|(_, broker)| Record::Broker {
        name: broker.name().to_string(),
        congestion: broker.congestion(),
    }));

    for role in [ClientRole::Seller, ClientRole::Buyer] {
        for (id, client) in firm.clients_with_role(role) {
            let Some(broker) = firm.broker_for(id).and_then(|b| firm.broker(b)) else {
                tracing::warn!(client = %client, "Client has no broker, not persisted");
                continue;
            };
            records.push(Record::Client {
                role,
                name: client.name().to_string(),
                phone: client.phone().to_string(),
                broker: broker.name().to_string(),
            });
        }
    }

    for (_, apartment) in firm.apartments() {
        let Some(owner) = firm.client(apartment.owner()) else {
            tracing::warn!(address = apartment.address(), "Apartment has no owner, not persisted");
            continue;
        };
        records.push(Record::Apartment {
            address: apartment.address().to_string(),
            area: apartment.area(),
            num_rooms: apartment.num_rooms(),
            owner_phone: owner.phone().to_string(),
        });
    }

    for side in [DealSide::Sale, DealSide::Buy] {
        for (id, deal) in firm.deals().filter(|(_, d)| d.side == side) {
            let (Some(apartment), Some(broker)) =
                (firm.apartment(deal.apartment), firm.broker(deal.broker))
            else {
                tracing::warn!(deal = %id, "Deal references a missing entity, not persisted");
                continue;
            };
            records.push(Record::Deal {
                side,
                apartment: apartment.address().to_string(),
                status: deal.status,
                broker: broker.name().to_string(),
                time: deal.time.clone(),
            });
        }
    }

    records
}

fn warn_unescaped(record: &Record) {
    let unsafe_field = record
        .fields()
        .into_iter()
        .find(|f| f.contains(SEPARATOR) || f.contains(['\r', '\n']));
    if let Some(field) = unsafe_field {
        tracing::warn!(
            tag = %record.tag(),
            field = %field,
            "Field contains a separator or line break and will not reload as written"
        );
    }
}
