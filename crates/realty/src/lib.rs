//! Realty - brokerage record store
//!
//! Keeps a real-estate firm's brokers, clients, apartments and deals in a
//! flat line store and rebuilds the linked graph on open.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use realty::models::{Client, RealtyConfig};
//!
//! let config = RealtyConfig::default();
//! let mut session = realty::open_file_session(&config, "Sunny Side Realty")?;
//! session.firm_mut().assign(Client::buyer("Bea", "555-0200")?)?;
//! session.close()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use realty_firm as firm;
pub use realty_models as models;
pub use realty_store as store;

use realty_firm::Firm;
use realty_models::{CongestionPolicy, RealtyConfig};
use realty_store::loader::load_from_store;
use realty_store::writer::write_to_store;
use realty_store::{FileStore, LineStore, SkippedRecord, StoreError};

/// An open firm: loaded from its store on [`FirmSession::open`] and written
/// back only by an explicit [`FirmSession::close`].
///
/// Dropping a session without closing it discards in-memory changes.
pub struct FirmSession<S: LineStore> {
    store: S,
    firm: Firm,
    skipped: Vec<SkippedRecord>,
}

impl<S: LineStore> FirmSession<S> {
    /// Read and link the firm's store.
    pub fn open(mut store: S, firm_name: &str, policy: CongestionPolicy) -> Result<Self, StoreError> {
        let report = load_from_store(&mut store, firm_name, policy)?;
        Ok(Self {
            store,
            firm: report.firm,
            skipped: report.skipped,
        })
    }

    pub fn firm(&self) -> &Firm {
        &self.firm
    }

    pub fn firm_mut(&mut self) -> &mut Firm {
        &mut self.firm
    }

    /// Records dropped while loading because their references did not resolve.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Overwrite the store with the current graph and hand the store back.
    pub fn close(mut self) -> Result<S, StoreError> {
        write_to_store(&mut self.store, &self.firm)?;
        Ok(self.store)
    }
}

/// Open the file-backed session for `firm_name` under the configured data directory.
pub fn open_file_session(
    config: &RealtyConfig,
    firm_name: &str,
) -> Result<FirmSession<FileStore>, StoreError> {
    let store = FileStore::for_firm(&config.store.data_dir, firm_name)?;
    tracing::debug!(path = %store.path().display(), "Opening firm store");
    FirmSession::open(store, firm_name, config.load.congestion_policy)
}
