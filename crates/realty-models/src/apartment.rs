use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::ClientId;

/// An apartment listed for sale. The owner is fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Apartment {
    address: String,
    area: Decimal,
    num_rooms: u32,
    owner: ClientId,
}

impl Apartment {
    pub fn new(
        address: impl Into<String>,
        area: Decimal,
        num_rooms: u32,
        owner: ClientId,
    ) -> Result<Self, ValidationError> {
        let address = address.into();
        Self::validate(&address, area, num_rooms)?;
        Ok(Self {
            address,
            area,
            num_rooms,
            owner,
        })
    }

    /// Check listing fields without building an apartment.
    pub fn validate(address: &str, area: Decimal, num_rooms: u32) -> Result<(), ValidationError> {
        if address.trim().is_empty() {
            return Err(ValidationError::EmptyField("address"));
        }
        if area <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveArea(area));
        }
        if num_rooms == 0 {
            return Err(ValidationError::NoRooms);
        }
        Ok(())
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn area(&self) -> Decimal {
        self.area
    }

    pub fn num_rooms(&self) -> u32 {
        self.num_rooms
    }

    pub fn owner(&self) -> ClientId {
        self.owner
    }
}

impl fmt::Display for Apartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Address: {}, Area: {} Number of rooms: {}",
            self.address, self.area, self.num_rooms
        )
    }
}
