//! Negotiations run by the responsible broker.
//!
//! A sale request is opened when a seller lists an apartment and is handled by
//! the seller's broker. A purchase request is handled by the buyer's broker.

use realty_models::{ApartmentId, BrokerId, ClientId, DealId, DealSide, DealStatus};

use crate::error::FirmError;
use crate::firm::Firm;

impl Firm {
    /// Record the seller-side negotiation for `apartment`.
    pub fn request_sale(
        &mut self,
        apartment: ApartmentId,
        time: impl Into<String>,
        accepted: bool,
    ) -> Result<DealId, FirmError> {
        let owner = self
            .apartment(apartment)
            .ok_or(FirmError::UnknownApartment(apartment))?
            .owner();
        let broker = self.responsible_broker(owner)?;
        let deal = self.record_deal(
            DealSide::Sale,
            apartment,
            broker,
            time,
            DealStatus::from_accepted(accepted),
        )?;
        tracing::info!(%apartment, %broker, accepted, "Recorded sale request");
        Ok(deal)
    }

    /// Record a buyer's negotiation over an already listed apartment.
    pub fn request_purchase(
        &mut self,
        buyer: ClientId,
        apartment: ApartmentId,
        time: impl Into<String>,
        accepted: bool,
    ) -> Result<DealId, FirmError> {
        let client = self.client(buyer).ok_or(FirmError::UnknownClient(buyer))?;
        if client.is_seller() {
            return Err(FirmError::NotABuyer(client.phone().to_string()));
        }
        self.apartment(apartment)
            .ok_or(FirmError::UnknownApartment(apartment))?;
        let broker = self.responsible_broker(buyer)?;
        let deal = self.record_deal(
            DealSide::Buy,
            apartment,
            broker,
            time,
            DealStatus::from_accepted(accepted),
        )?;
        tracing::info!(%buyer, %apartment, %broker, accepted, "Recorded purchase request");
        Ok(deal)
    }

    fn responsible_broker(&self, client: ClientId) -> Result<BrokerId, FirmError> {
        self.broker_for(client)
            .ok_or(FirmError::UnknownClient(client))
    }
}
