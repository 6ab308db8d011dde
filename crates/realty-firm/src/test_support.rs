//! Fixtures shared by unit and integration tests across the workspace.

use realty_models::{Broker, Client};
use rust_decimal::Decimal;

use crate::firm::Firm;

/// Build a broker. Panics on an invalid name.
pub fn broker(name: &str, congestion: u32) -> Broker {
    Broker::new(name, congestion).expect("valid broker fixture")
}

/// Build a seller. Panics on invalid fields.
pub fn seller(name: &str, phone: &str) -> Client {
    Client::seller(name, phone).expect("valid seller fixture")
}

/// Build a buyer. Panics on invalid fields.
pub fn buyer(name: &str, phone: &str) -> Client {
    Client::buyer(name, phone).expect("valid buyer fixture")
}

/// A small populated firm:
///
/// - brokers Alice and Bob, both starting at congestion 0
/// - sellers Sam (Alice) and Sue (Bob), buyer Bea (Alice)
/// - Sam lists "1 Main St" and "2 Oak Ave", Sue lists "3 Elm Rd"
/// - sale requests for Sam's apartments (one done, one failed) and a done
///   purchase by Bea of "3 Elm Rd"
pub fn sample_firm() -> Firm {
    let mut firm = Firm::new("Sample Realty");
    firm.add_broker(broker("Alice", 0)).expect("fixture broker");
    firm.add_broker(broker("Bob", 0)).expect("fixture broker");

    firm.assign(seller("Sam", "555-0100")).expect("fixture seller");
    firm.assign(seller("Sue", "555-0101")).expect("fixture seller");
    firm.assign(buyer("Bea", "555-0200")).expect("fixture buyer");

    let sam = firm.client_by_phone("555-0100").expect("fixture seller");
    let sue = firm.client_by_phone("555-0101").expect("fixture seller");
    let bea = firm.client_by_phone("555-0200").expect("fixture buyer");

    let main_st = firm
        .list_apartment(sam, "1 Main St", Decimal::new(545, 1), 2)
        .expect("fixture apartment");
    let oak_ave = firm
        .list_apartment(sam, "2 Oak Ave", Decimal::new(80, 0), 3)
        .expect("fixture apartment");
    let elm_rd = firm
        .list_apartment(sue, "3 Elm Rd", Decimal::new(3625, 2), 1)
        .expect("fixture apartment");

    firm.request_sale(main_st, "2 days", true)
        .expect("fixture deal");
    firm.request_sale(oak_ave, "1 week", false)
        .expect("fixture deal");
    firm.request_sale(elm_rd, "3 hours", true)
        .expect("fixture deal");
    firm.request_purchase(bea, elm_rd, "1 day", true)
        .expect("fixture deal");
    firm
}
