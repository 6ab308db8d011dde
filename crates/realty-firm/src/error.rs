use realty_models::{ApartmentId, BrokerId, ClientId, ValidationError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FirmError {
    #[error("no brokers available to take a client")]
    NoBrokerAvailable,

    #[error("a client with phone {0} already exists")]
    DuplicateClient(String),

    #[error("a broker named {0} already exists")]
    DuplicateBroker(String),

    #[error("an apartment at {0} is already listed")]
    DuplicateApartment(String),

    #[error("unknown broker: {0}")]
    UnknownBroker(BrokerId),

    #[error("unknown client: {0}")]
    UnknownClient(ClientId),

    #[error("unknown apartment: {0}")]
    UnknownApartment(ApartmentId),

    #[error("client with phone {0} is not a seller")]
    NotASeller(String),

    #[error("client with phone {0} is not a buyer")]
    NotABuyer(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
