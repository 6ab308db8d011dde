use crate::error::StoreError;
use crate::store::LineStore;

/// In-memory store. Useful for tests and for embedding without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    lines: Vec<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            writes: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// How many times the content has been replaced.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl LineStore for MemoryStore {
    fn read_lines(&mut self) -> Result<Vec<String>, StoreError> {
        Ok(self.lines.clone())
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<(), StoreError> {
        self.lines = lines.to_vec();
        self.writes += 1;
        Ok(())
    }
}
