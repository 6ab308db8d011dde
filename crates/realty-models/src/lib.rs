pub mod apartment;
pub mod broker;
pub mod client;
pub mod config;
pub mod deal;
pub mod error;
pub mod ids;

pub use apartment::Apartment;
pub use broker::Broker;
pub use client::{Client, ClientKind, ClientRole};
pub use config::{CongestionPolicy, LoadConfig, RealtyConfig, StoreConfig};
pub use deal::{Deal, DealSide, DealStatus};
pub use error::ValidationError;
pub use ids::{ApartmentId, BrokerId, ClientId, DealId};
