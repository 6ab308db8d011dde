//! Tagged flat records, one per store line.
//!
//! Each line is a comma-separated list whose first field is the record tag:
//!
//! | Tag | Entity    | Fields                                           |
//! |-----|-----------|--------------------------------------------------|
//! | 0   | Broker    | name, congestion                                 |
//! | 1   | Seller    | name, phone, broker-name                         |
//! | 2   | Buyer     | name, phone, broker-name                         |
//! | 3   | Apartment | address, area, num_rooms, owner-phone            |
//! | 4   | SaleDeal  | apartment-address, status-code, broker-name, time |
//! | 5   | BuyDeal   | apartment-address, status-code, broker-name, time |
//!
//! Fields are written verbatim. Values must not contain the separator or a
//! line break; this is not escaped.
//!
//! Decoded records keep references as raw keys (names, phones, addresses).
//! Resolving them against loaded entities is the loader's job.

use std::fmt;
use std::str::FromStr;

use realty_models::{Apartment, Broker, Client, ClientRole, DealSide, DealStatus};
use rust_decimal::Decimal;

use crate::error::RecordError;

pub const SEPARATOR: char = ',';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordTag {
    Broker,
    Seller,
    Buyer,
    Apartment,
    SaleDeal,
    BuyDeal,
}

impl RecordTag {
    pub fn code(self) -> u8 {
        match self {
            RecordTag::Broker => 0,
            RecordTag::Seller => 1,
            RecordTag::Buyer => 2,
            RecordTag::Apartment => 3,
            RecordTag::SaleDeal => 4,
            RecordTag::BuyDeal => 5,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" => Some(RecordTag::Broker),
            "1" => Some(RecordTag::Seller),
            "2" => Some(RecordTag::Buyer),
            "3" => Some(RecordTag::Apartment),
            "4" => Some(RecordTag::SaleDeal),
            "5" => Some(RecordTag::BuyDeal),
            _ => None,
        }
    }

    /// Number of fields following the tag.
    pub fn arity(self) -> usize {
        match self {
            RecordTag::Broker => 2,
            RecordTag::Seller | RecordTag::Buyer => 3,
            RecordTag::Apartment | RecordTag::SaleDeal | RecordTag::BuyDeal => 4,
        }
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordTag::Broker => "broker",
            RecordTag::Seller => "seller",
            RecordTag::Buyer => "buyer",
            RecordTag::Apartment => "apartment",
            RecordTag::SaleDeal => "sale deal",
            RecordTag::BuyDeal => "buy deal",
        };
        f.write_str(name)
    }
}

/// A decoded store line with unresolved references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Broker {
        name: String,
        congestion: u32,
    },
    Client {
        role: ClientRole,
        name: String,
        phone: String,
        broker: String,
    },
    Apartment {
        address: String,
        area: Decimal,
        num_rooms: u32,
        owner_phone: String,
    },
    Deal {
        side: DealSide,
        apartment: String,
        status: DealStatus,
        broker: String,
        time: String,
    },
}

impl Record {
    pub fn tag(&self) -> RecordTag {
        match self {
            Record::Broker { .. } => RecordTag::Broker,
            Record::Client {
                role: ClientRole::Seller,
                ..
            } => RecordTag::Seller,
            Record::Client {
                role: ClientRole::Buyer,
                ..
            } => RecordTag::Buyer,
            Record::Apartment { .. } => RecordTag::Apartment,
            Record::Deal {
                side: DealSide::Sale,
                ..
            } => RecordTag::SaleDeal,
            Record::Deal {
                side: DealSide::Buy,
                ..
            } => RecordTag::BuyDeal,
        }
    }

    /// Decode one store line. Trailing line-break characters are ignored.
    pub fn decode_line(line: &str) -> Result<Self, RecordError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut parts = line.split(SEPARATOR);
        let code = parts.next().unwrap_or_default();
        let tag =
            RecordTag::from_code(code).ok_or_else(|| RecordError::UnknownTag(code.to_string()))?;
        let fields: Vec<&str> = parts.collect();
        Self::decode(tag, &fields)
    }

    /// Build a record from its tag and the ordered fields that follow it.
    pub fn decode(tag: RecordTag, fields: &[&str]) -> Result<Self, RecordError> {
        if fields.len() != tag.arity() {
            return Err(RecordError::Arity {
                tag,
                expected: tag.arity(),
                found: fields.len(),
            });
        }

        let record = match tag {
            RecordTag::Broker => Record::Broker {
                name: fields[0].to_string(),
                congestion: parse_field("congestion", fields[1])?,
            },
            RecordTag::Seller | RecordTag::Buyer => Record::Client {
                role: if tag == RecordTag::Seller {
                    ClientRole::Seller
                } else {
                    ClientRole::Buyer
                },
                name: fields[0].to_string(),
                phone: fields[1].to_string(),
                broker: fields[2].to_string(),
            },
            RecordTag::Apartment => Record::Apartment {
                address: fields[0].to_string(),
                area: parse_field("area", fields[1])?,
                num_rooms: parse_field("num_rooms", fields[2])?,
                owner_phone: fields[3].to_string(),
            },
            RecordTag::SaleDeal | RecordTag::BuyDeal => Record::Deal {
                side: if tag == RecordTag::SaleDeal {
                    DealSide::Sale
                } else {
                    DealSide::Buy
                },
                apartment: fields[0].to_string(),
                status: parse_status(fields[1])?,
                broker: fields[2].to_string(),
                time: fields[3].to_string(),
            },
        };

        record.validate()?;
        Ok(record)
    }

    /// Apply entity construction rules to the record's own fields.
    /// Reference keys are not checked here.
    fn validate(&self) -> Result<(), RecordError> {
        match self {
            Record::Broker { name, congestion } => {
                Broker::new(name.as_str(), *congestion)?;
            }
            Record::Client {
                role, name, phone, ..
            } => {
                Client::with_role(*role, name.as_str(), phone.as_str())?;
            }
            Record::Apartment {
                address,
                area,
                num_rooms,
                ..
            } => Apartment::validate(address, *area, *num_rooms)?,
            Record::Deal { .. } => {}
        }
        Ok(())
    }

    /// Field values in store order, excluding the tag.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Record::Broker { name, congestion } => vec![name.clone(), congestion.to_string()],
            Record::Client {
                name,
                phone,
                broker,
                ..
            } => vec![name.clone(), phone.clone(), broker.clone()],
            Record::Apartment {
                address,
                area,
                num_rooms,
                owner_phone,
            } => vec![
                address.clone(),
                area.to_string(),
                num_rooms.to_string(),
                owner_phone.clone(),
            ],
            Record::Deal {
                apartment,
                status,
                broker,
                time,
                ..
            } => vec![
                apartment.clone(),
                status.code().to_string(),
                broker.clone(),
                time.clone(),
            ],
        }
    }

    /// Encode as a store line, without a trailing newline.
    pub fn encode(&self) -> String {
        let mut line = self.tag().code().to_string();
        for field in self.fields() {
            line.push(SEPARATOR);
            line.push_str(&field);
        }
        line
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidField {
            field,
            value: value.to_string(),
        })
}

fn parse_status(value: &str) -> Result<DealStatus, RecordError> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(DealStatus::from_code)
        .ok_or_else(|| RecordError::UnknownStatus(value.to_string()))
}
