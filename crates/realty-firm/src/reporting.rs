use realty_models::BrokerId;
use serde::{Deserialize, Serialize};

use crate::firm::Firm;

/// Deal counts for one broker.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealStats {
    pub total: usize,
    pub successful: usize,
}

/// One row of the per-broker summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrokerReport {
    pub name: String,
    pub congestion: u32,
    pub clients: usize,
    pub deals: DealStats,
}

impl Firm {
    /// Count all deals brokered by `broker` and how many of them closed.
    pub fn deal_stats(&self, broker: BrokerId) -> DealStats {
        self.deals()
            .filter(|(_, deal)| deal.broker == broker)
            .fold(DealStats::default(), |mut stats, (_, deal)| {
                stats.total += 1;
                if deal.status.is_done() {
                    stats.successful += 1;
                }
                stats
            })
    }

    pub fn broker_report(&self) -> Vec<BrokerReport> {
        self.brokers()
            .map(|(id, broker)| BrokerReport {
                name: broker.name().to_string(),
                congestion: broker.congestion(),
                clients: self.assigned_count(id),
                deals: self.deal_stats(id),
            })
            .collect()
    }
}
