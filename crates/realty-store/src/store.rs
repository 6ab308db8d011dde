use crate::error::StoreError;

/// A line-oriented backing store for one firm.
///
/// Reads return every line; writes replace the whole content. Implementations
/// do not hold the store open between calls.
pub trait LineStore {
    fn read_lines(&mut self) -> Result<Vec<String>, StoreError>;
    fn write_lines(&mut self, lines: &[String]) -> Result<(), StoreError>;
}
