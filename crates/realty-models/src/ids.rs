//! Generated identifiers for entities held in a firm's arena.
//!
//! Ids are dense indices assigned in insertion order. They are never
//! persisted: the store keys relationships by name, phone and address, and
//! ids are regenerated on every load.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(usize);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifies a broker within a firm.
    BrokerId,
    "broker"
);
arena_id!(
    /// Identifies a buyer or seller within a firm.
    ClientId,
    "client"
);
arena_id!(
    /// Identifies a listed apartment within a firm.
    ApartmentId,
    "apartment"
);
arena_id!(
    /// Identifies a recorded deal within a firm.
    DealId,
    "deal"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_index() {
        assert_eq!(BrokerId::new(3).to_string(), "broker#3");
        assert_eq!(ApartmentId::new(0).to_string(), "apartment#0");
    }

    #[test]
    fn ids_order_by_index() {
        assert!(ClientId::new(1) < ClientId::new(2));
        assert_eq!(DealId::new(7).index(), 7);
    }
}
