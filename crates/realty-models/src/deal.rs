use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{ApartmentId, BrokerId};

/// Outcome of a negotiation. Stored as `1` (failed) or `2` (done).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    #[default]
    Failed,
    Done,
}

impl DealStatus {
    pub fn code(self) -> u8 {
        match self {
            DealStatus::Failed => 1,
            DealStatus::Done => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(DealStatus::Failed),
            2 => Some(DealStatus::Done),
            _ => None,
        }
    }

    /// `Done` when the client accepted the deal.
    pub fn from_accepted(accepted: bool) -> Self {
        if accepted {
            DealStatus::Done
        } else {
            DealStatus::Failed
        }
    }

    pub fn is_done(self) -> bool {
        self == DealStatus::Done
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealStatus::Failed => f.write_str("FAILED"),
            DealStatus::Done => f.write_str("DONE"),
        }
    }
}

/// Which party the negotiation was run for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DealSide {
    /// Seller-side negotiation, opened when an apartment is listed.
    Sale,
    /// Buyer-side negotiation for an already listed apartment.
    Buy,
}

/// A negotiation between the firm's broker and a client over an apartment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deal {
    pub side: DealSide,
    pub apartment: ApartmentId,
    pub broker: BrokerId,
    /// Free-form negotiation duration or label.
    pub time: String,
    pub status: DealStatus,
}

impl Deal {
    pub fn new(
        side: DealSide,
        apartment: ApartmentId,
        broker: BrokerId,
        time: impl Into<String>,
        status: DealStatus,
    ) -> Self {
        Self {
            side,
            apartment,
            broker,
            time: time.into(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(DealStatus::Failed.code(), 1);
        assert_eq!(DealStatus::Done.code(), 2);
        assert_eq!(DealStatus::from_code(2), Some(DealStatus::Done));
        assert_eq!(DealStatus::from_code(0), None);
        assert_eq!(DealStatus::from_code(3), None);
    }

    #[test]
    fn default_status_is_failed() {
        assert_eq!(DealStatus::default(), DealStatus::Failed);
    }

    #[test]
    fn accepted_maps_to_done() {
        assert_eq!(DealStatus::from_accepted(true), DealStatus::Done);
        assert_eq!(DealStatus::from_accepted(false), DealStatus::Failed);
    }

    #[test]
    fn status_serialization() {
        assert_eq!(
            serde_json::to_string(&DealStatus::Done).unwrap(),
            "\"done\""
        );
    }
}
