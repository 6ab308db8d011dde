use serde::{Deserialize, Serialize};

/// Top-level configuration for the brokerage store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RealtyConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

/// Where firm stores live on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Directory holding one `<firm key>.csv` file per firm.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// How a stored graph is reconstructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoadConfig {
    #[serde(default)]
    pub congestion_policy: CongestionPolicy,
}

/// Source of broker congestion after a load.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CongestionPolicy {
    /// Keep the congestion value stored on each broker record.
    #[default]
    Trust,
    /// Recount congestion from the loaded client assignments.
    Recompute,
}

fn default_data_dir() -> String {
    "data".to_string()
}
