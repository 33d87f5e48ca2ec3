use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{AnniversaryError, Result};

/// Read the schema document. Missing or unreadable is fatal.
pub fn read_schema(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AnniversaryError::SchemaUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the data file, `None` if it does not exist yet.
pub fn read_document(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replace the data file in one step: write a sibling temp file, then rename it over `path`.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| AnniversaryError::Io(e.error))?;
    Ok(())
}
