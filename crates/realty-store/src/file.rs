use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::store::LineStore;

const STORE_EXTENSION: &str = "csv";

/// Derive a firm's store key: lowercase with all whitespace removed.
pub fn store_key(firm_name: &str) -> Result<String, StoreError> {
    let key: String = firm_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
        return Err(StoreError::InvalidStoreKey(firm_name.to_string()));
    }
    Ok(key)
}

/// File-backed store: one `<key>.csv` per firm under a data directory.
///
/// The file is opened per call. A missing file is created empty on first read.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `firm_name` inside `data_dir`.
    pub fn for_firm(data_dir: impl AsRef<Path>, firm_name: &str) -> Result<Self, StoreError> {
        let key = store_key(firm_name)?;
        Ok(Self::new(
            data_dir
                .as_ref()
                .join(format!("{key}.{STORE_EXTENSION}")),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl LineStore for FileStore {
    fn read_lines(&mut self) -> Result<Vec<String>, StoreError> {
        if !self.path.exists() {
            self.ensure_parent()?;
            fs::File::create(&self.path)?;
            tracing::info!(path = %self.path.display(), "Created empty store");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().map(str::to_string).collect())
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let mut out = BufWriter::new(fs::File::create(&self.path)?);
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_lowercase_without_spaces() {
        assert_eq!(store_key("Sunny Side Realty").unwrap(), "sunnysiderealty");
        assert_eq!(store_key(" ACME\tHomes ").unwrap(), "acmehomes");
    }

    #[test]
    fn unusable_keys_rejected() {
        for name in ["", "   ", "../etc", "a/b", ".hidden"] {
            assert!(
                matches!(store_key(name), Err(StoreError::InvalidStoreKey(_))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn first_read_creates_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::for_firm(dir.path().join("data"), "Acme Homes").unwrap();
        assert_eq!(store.path(), dir.path().join("data").join("acmehomes.csv"));

        assert!(store.read_lines().unwrap().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn write_truncates_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("firm.csv"));
        store
            .write_lines(&["0,Alice,0".to_string(), "0,Bob,1".to_string()])
            .unwrap();
        store.write_lines(&["0,Carol,2".to_string()]).unwrap();

        assert_eq!(store.read_lines().unwrap(), vec!["0,Carol,2"]);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "0,Carol,2\n");
    }

    #[test]
    fn reads_crlf_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("firm.csv");
        fs::write(&path, "0,Alice,0\r\n0,Bob,1\r\n").unwrap();
        let mut store = FileStore::new(path);
        assert_eq!(store.read_lines().unwrap(), vec!["0,Alice,0", "0,Bob,1"]);
    }
}
