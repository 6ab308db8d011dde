use serde::{Deserialize, Serialize};

use crate::error::{require_text, ValidationError};

/// A broker negotiating deals on behalf of the firm.
///
/// `congestion` is the number of clients currently assigned to the broker
/// and is the load metric used when admitting new clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Broker {
    name: String,
    congestion: u32,
}

impl Broker {
    pub fn new(name: impl Into<String>, congestion: u32) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("broker name", name.into())?,
            congestion,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn congestion(&self) -> u32 {
        self.congestion
    }

    /// Record one more client assigned to this broker.
    pub fn add_assignment(&mut self) {
        self.congestion = self.congestion.saturating_add(1);
    }

    pub fn set_congestion(&mut self, congestion: u32) {
        self.congestion = congestion;
    }
}
