pub mod error;
pub mod file;
pub mod loader;
pub mod memory;
pub mod record;
pub mod store;
pub mod writer;

pub use error::{RecordError, StoreError};
pub use file::{store_key, FileStore};
pub use loader::{load_graph, LoadReport, SkipReason, SkippedRecord};
pub use memory::MemoryStore;
pub use record::{Record, RecordTag};
pub use store::LineStore;
pub use writer::serialize_graph;
