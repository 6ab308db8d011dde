//! End-to-end admission scenarios: brokers hired, clients admitted in a
//! stream, apartments listed and negotiated, then reported on.

use realty_firm::test_support::{broker, buyer, seller};
use realty_firm::{DealStats, Firm, FirmError};
use rust_decimal_macros::dec;

#[test]
fn load_balances_across_uneven_brokers() {
    let mut firm = Firm::new("Acme");
    firm.add_broker(broker("A", 2)).unwrap();
    firm.add_broker(broker("B", 2)).unwrap();
    firm.add_broker(broker("C", 1)).unwrap();

    let names: Vec<String> = (0..4)
        .map(|i| {
            let id = firm
                .assign(buyer(&format!("Buyer {i}"), &format!("555-01{i:02}")))
                .unwrap();
            firm.broker(id).unwrap().name().to_string()
        })
        .collect();

    // C catches up first, then ties resolve in hiring order.
    assert_eq!(names, vec!["C", "A", "B", "C"]);
    let congestion: Vec<u32> = firm.brokers().map(|(_, b)| b.congestion()).collect();
    assert_eq!(congestion, vec![3, 3, 3]);
}

#[test]
fn brokerage_day() {
    let mut firm = Firm::new("Acme");
    let x = firm.add_broker(broker("X", 0)).unwrap();
    let y = firm.add_broker(broker("Y", 0)).unwrap();

    assert_eq!(firm.assign(seller("Sam", "100")).unwrap(), x);
    assert_eq!(firm.assign(buyer("Bea", "200")).unwrap(), y);
    assert_eq!(
        firm.assign(buyer("Bea Twin", "200")).unwrap_err(),
        FirmError::DuplicateClient("200".to_string())
    );

    let sam = firm.client_by_phone("100").unwrap();
    let bea = firm.client_by_phone("200").unwrap();
    let first = firm.list_apartment(sam, "1 Main St", dec!(50), 2).unwrap();
    let second = firm.list_apartment(sam, "2 Oak Ave", dec!(65.5), 3).unwrap();

    firm.request_sale(first, "1 day", true).unwrap();
    firm.request_sale(second, "2 days", false).unwrap();
    firm.request_sale(second, "4 days", true).unwrap();
    firm.request_purchase(bea, first, "3 hours", true).unwrap();

    assert_eq!(
        firm.deal_stats(x),
        DealStats {
            total: 3,
            successful: 2
        }
    );
    assert_eq!(
        firm.deal_stats(y),
        DealStats {
            total: 1,
            successful: 1
        }
    );
    assert!(firm.congestion_drift().is_empty());
}
