//! The firm aggregate: an arena of brokers, clients, apartments and deals.
//!
//! Entities are addressed by generated ids. Broker names, client phones and
//! apartment addresses are unique within a firm and are kept as secondary
//! indices so cross-references can be resolved without scanning.
//!
//! Every client has exactly one responsible broker (the division). It is
//! stored alongside the client list, so a client cannot exist unassigned.

use std::collections::HashMap;

use realty_models::{
    Apartment, ApartmentId, Broker, BrokerId, Client, ClientId, ClientRole, Deal, DealId,
    DealSide, DealStatus,
};
use rust_decimal::Decimal;

use crate::error::FirmError;

#[derive(Debug, Clone, Default)]
pub struct Firm {
    name: String,
    brokers: Vec<Broker>,
    clients: Vec<Client>,
    /// Responsible broker per client, indexed like `clients`.
    division: Vec<BrokerId>,
    apartments: Vec<Apartment>,
    deals: Vec<Deal>,
    brokers_by_name: HashMap<String, BrokerId>,
    clients_by_phone: HashMap<String, ClientId>,
    apartments_by_address: HashMap<String, ApartmentId>,
}

impl Firm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hire a broker. Names are unique within the firm.
    pub fn add_broker(&mut self, broker: Broker) -> Result<BrokerId, FirmError> {
        if self.brokers_by_name.contains_key(broker.name()) {
            return Err(FirmError::DuplicateBroker(broker.name().to_string()));
        }
        let id = BrokerId::new(self.brokers.len());
        self.brokers_by_name.insert(broker.name().to_string(), id);
        self.brokers.push(broker);
        Ok(id)
    }

    /// Add a client with a known responsible broker, leaving congestion as is.
    ///
    /// Used when restoring a stored division, where the broker's congestion
    /// already accounts for the client. New clients go through
    /// [`Firm::assign`].
    pub fn attach_client(&mut self, client: Client, broker: BrokerId) -> Result<ClientId, FirmError> {
        self.broker(broker).ok_or(FirmError::UnknownBroker(broker))?;
        if self.clients_by_phone.contains_key(client.phone()) {
            return Err(FirmError::DuplicateClient(client.phone().to_string()));
        }
        Ok(self.push_client(client, broker))
    }

    pub(crate) fn push_client(&mut self, client: Client, broker: BrokerId) -> ClientId {
        let id = ClientId::new(self.clients.len());
        self.clients_by_phone.insert(client.phone().to_string(), id);
        self.clients.push(client);
        self.division.push(broker);
        id
    }

    /// List a new apartment owned by `seller`.
    pub fn list_apartment(
        &mut self,
        seller: ClientId,
        address: impl Into<String>,
        area: Decimal,
        num_rooms: u32,
    ) -> Result<ApartmentId, FirmError> {
        let owner = self.client(seller).ok_or(FirmError::UnknownClient(seller))?;
        if !owner.is_seller() {
            return Err(FirmError::NotASeller(owner.phone().to_string()));
        }
        let apartment = Apartment::new(address, area, num_rooms, seller)?;
        if self.apartments_by_address.contains_key(apartment.address()) {
            return Err(FirmError::DuplicateApartment(
                apartment.address().to_string(),
            ));
        }

        let id = ApartmentId::new(self.apartments.len());
        self.apartments_by_address
            .insert(apartment.address().to_string(), id);
        self.apartments.push(apartment);
        self.clients[seller.index()].register_apartment(id);
        Ok(id)
    }

    /// Record a deal between existing entities.
    pub fn record_deal(
        &mut self,
        side: DealSide,
        apartment: ApartmentId,
        broker: BrokerId,
        time: impl Into<String>,
        status: DealStatus,
    ) -> Result<DealId, FirmError> {
        self.apartment(apartment)
            .ok_or(FirmError::UnknownApartment(apartment))?;
        self.broker(broker).ok_or(FirmError::UnknownBroker(broker))?;

        let id = DealId::new(self.deals.len());
        self.deals
            .push(Deal::new(side, apartment, broker, time, status));
        Ok(id)
    }

    pub fn broker(&self, id: BrokerId) -> Option<&Broker> {
        self.brokers.get(id.index())
    }

    pub(crate) fn broker_mut(&mut self, id: BrokerId) -> Option<&mut Broker> {
        self.brokers.get_mut(id.index())
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(id.index())
    }

    pub fn apartment(&self, id: ApartmentId) -> Option<&Apartment> {
        self.apartments.get(id.index())
    }

    pub fn deal(&self, id: DealId) -> Option<&Deal> {
        self.deals.get(id.index())
    }

    pub fn broker_by_name(&self, name: &str) -> Option<BrokerId> {
        self.brokers_by_name.get(name).copied()
    }

    pub fn client_by_phone(&self, phone: &str) -> Option<ClientId> {
        self.clients_by_phone.get(phone).copied()
    }

    /// Look up a seller by phone. Buyers with that phone do not match.
    pub fn seller_by_phone(&self, phone: &str) -> Option<ClientId> {
        self.client_by_phone(phone)
            .filter(|id| self.clients[id.index()].is_seller())
    }

    pub fn apartment_by_address(&self, address: &str) -> Option<ApartmentId> {
        self.apartments_by_address.get(address).copied()
    }

    /// The broker responsible for a client.
    pub fn broker_for(&self, client: ClientId) -> Option<BrokerId> {
        self.division.get(client.index()).copied()
    }

    pub fn brokers(&self) -> impl Iterator<Item = (BrokerId, &Broker)> {
        self.brokers
            .iter()
            .enumerate()
            .map(|(i, b)| (BrokerId::new(i), b))
    }

    /// All clients in admission order.
    pub fn clients(&self) -> impl Iterator<Item = (ClientId, &Client)> {
        self.clients
            .iter()
            .enumerate()
            .map(|(i, c)| (ClientId::new(i), c))
    }

    pub fn clients_with_role(&self, role: ClientRole) -> impl Iterator<Item = (ClientId, &Client)> {
        self.clients().filter(move |(_, c)| c.role() == role)
    }

    pub fn sellers(&self) -> impl Iterator<Item = (ClientId, &Client)> {
        self.clients_with_role(ClientRole::Seller)
    }

    pub fn buyers(&self) -> impl Iterator<Item = (ClientId, &Client)> {
        self.clients_with_role(ClientRole::Buyer)
    }

    /// All apartments, grouped by seller in seller order, then listing order.
    pub fn apartments(&self) -> impl Iterator<Item = (ApartmentId, &Apartment)> {
        self.sellers().flat_map(move |(_, seller)| {
            seller
                .apartments()
                .iter()
                .map(move |&id| (id, &self.apartments[id.index()]))
        })
    }

    pub fn deals(&self) -> impl Iterator<Item = (DealId, &Deal)> {
        self.deals
            .iter()
            .enumerate()
            .map(|(i, d)| (DealId::new(i), d))
    }

    pub fn broker_count(&self) -> usize {
        self.brokers.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn apartment_count(&self) -> usize {
        self.apartments.len()
    }

    pub fn deal_count(&self) -> usize {
        self.deals.len()
    }
}
