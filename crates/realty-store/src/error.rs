use realty_firm::FirmError;
use realty_models::ValidationError;
use thiserror::Error;

use crate::record::RecordTag;

/// Why a single store line could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("unknown record tag {0:?}")]
    UnknownTag(String),

    #[error("{tag} record expects {expected} fields, found {found}")]
    Arity {
        tag: RecordTag,
        expected: usize,
        found: usize,
    },

    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("unknown deal status code {0:?}")]
    UnknownStatus(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("malformed record on line {line}: {source}")]
    MalformedRecord { line: usize, source: RecordError },

    #[error("cannot derive a store key from firm name {0:?}")]
    InvalidStoreKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Firm error: {0}")]
    Firm(#[from] FirmError),
}
