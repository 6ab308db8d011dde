use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{require_text, ValidationError};
use crate::ids::ApartmentId;

/// Which side of the market a client is on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClientRole {
    Buyer,
    Seller,
}

impl fmt::Display for ClientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientRole::Buyer => f.write_str("buyer"),
            ClientRole::Seller => f.write_str("seller"),
        }
    }
}

/// Variant-specific client payload. Only sellers own apartments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum ClientKind {
    Buyer,
    Seller { apartments: Vec<ApartmentId> },
}

/// A buyer or seller served by the firm.
///
/// The phone number is the client's identity: two clients with the same
/// phone are the same client regardless of name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    name: String,
    phone: String,
    kind: ClientKind,
}

impl Client {
    pub fn buyer(name: impl Into<String>, phone: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(name.into(), phone.into(), ClientKind::Buyer)
    }

    /// A seller with no apartments listed yet.
    pub fn seller(name: impl Into<String>, phone: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(
            name.into(),
            phone.into(),
            ClientKind::Seller {
                apartments: Vec::new(),
            },
        )
    }

    pub fn with_role(
        role: ClientRole,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        match role {
            ClientRole::Buyer => Self::buyer(name, phone),
            ClientRole::Seller => Self::seller(name, phone),
        }
    }

    fn new(name: String, phone: String, kind: ClientKind) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("client name", name)?,
            phone: require_text("phone", phone)?,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn kind(&self) -> &ClientKind {
        &self.kind
    }

    pub fn role(&self) -> ClientRole {
        match self.kind {
            ClientKind::Buyer => ClientRole::Buyer,
            ClientKind::Seller { .. } => ClientRole::Seller,
        }
    }

    pub fn is_seller(&self) -> bool {
        self.role() == ClientRole::Seller
    }

    /// Apartments listed by this client, in listing order. Empty for buyers.
    pub fn apartments(&self) -> &[ApartmentId] {
        match &self.kind {
            ClientKind::Seller { apartments } => apartments.as_slice(),
            ClientKind::Buyer => &[],
        }
    }

    /// Append an apartment to a seller's listing.
    /// Returns `false` (and does nothing) when the client is a buyer.
    pub fn register_apartment(&mut self, apartment: ApartmentId) -> bool {
        match &mut self.kind {
            ClientKind::Seller { apartments } => {
                apartments.push(apartment);
                true
            }
            ClientKind::Buyer => false,
        }
    }

    /// Identity comparison: phone numbers only.
    pub fn same_identity(&self, other: &Client) -> bool {
        self.phone == other.phone
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.phone)
    }
}
