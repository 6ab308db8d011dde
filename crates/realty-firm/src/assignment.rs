//! Least-loaded broker assignment for clients entering the firm.

use realty_models::{BrokerId, Client, ClientId};

use crate::error::FirmError;
use crate::firm::Firm;

impl Firm {
    /// The broker with the lowest congestion. Ties go to the broker hired first.
    pub fn least_congested(&self) -> Option<BrokerId> {
        self.brokers()
            .min_by_key(|(_, broker)| broker.congestion())
            .map(|(id, _)| id)
    }

    /// Admit a new client and hand them to the least congested broker.
    ///
    /// On error the firm is left untouched.
    pub fn assign(&mut self, client: Client) -> Result<BrokerId, FirmError> {
        if self.client_by_phone(client.phone()).is_some() {
            return Err(FirmError::DuplicateClient(client.phone().to_string()));
        }
        let broker = self.least_congested().ok_or(FirmError::NoBrokerAvailable)?;

        let phone = client.phone().to_string();
        self.push_client(client, broker);
        if let Some(b) = self.broker_mut(broker) {
            b.add_assignment();
            tracing::debug!(
                client = %phone,
                broker = %b.name(),
                congestion = b.congestion(),
                "Assigned client"
            );
        }
        Ok(broker)
    }

    /// Number of clients the division currently maps to `broker`.
    pub fn assigned_count(&self, broker: BrokerId) -> usize {
        self.clients()
            .filter(|(id, _)| self.broker_for(*id) == Some(broker))
            .count()
    }

    /// Clients whose responsible broker is `broker`.
    pub fn clients_of(&self, broker: BrokerId) -> Vec<ClientId> {
        self.clients()
            .filter(|(id, _)| self.broker_for(*id) == Some(broker))
            .map(|(id, _)| id)
            .collect()
    }

    /// Brokers whose stored congestion differs from their assigned client count,
    /// as `(broker, stored, assigned)`.
    pub fn congestion_drift(&self) -> Vec<(BrokerId, u32, usize)> {
        self.brokers()
            .filter_map(|(id, broker)| {
                let assigned = self.assigned_count(id);
                (broker.congestion() as usize != assigned).then_some((
                    id,
                    broker.congestion(),
                    assigned,
                ))
            })
            .collect()
    }

    /// Reset every broker's congestion to its assigned client count.
    pub fn recompute_congestion(&mut self) {
        let counts: Vec<_> = self
            .brokers()
            .map(|(id, _)| (id, self.assigned_count(id)))
            .collect();
        for (id, count) in counts {
            if let Some(broker) = self.broker_mut(id) {
                broker.set_congestion(u32::try_from(count).unwrap_or(u32::MAX));
            }
        }
    }
}
