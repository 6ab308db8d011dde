pub mod assignment;
pub mod deals;
pub mod error;
pub mod firm;
pub mod reporting;
pub mod test_support;

pub use error::FirmError;
pub use firm::Firm;
pub use reporting::{BrokerReport, DealStats};
