use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnniversaryError {
    #[error("Unable to read the schema file {path}: {source}. Run 'anniversary init' to create it.")]
    SchemaUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema file {path} is not a usable JSON Schema: {reason}")]
    SchemaMalformed { path: PathBuf, reason: String },

    #[error("The following validation errors occurred:\n{0}")]
    Validation(Violations),

    #[error("Anniversary index {index} is out of range ({count} saved)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Invalid anniversary number '{0}'. Use 'anniversary list' to see saved anniversaries.")]
    InvalidIndex(String),

    #[error("Invalid date '{0}'. Expected yyyy-mm-dd (e.g., 2024-06-02)")]
    MalformedDate(String),

    #[error("Data file is not an array of anniversaries: {0}")]
    MalformedDocument(String),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnniversaryError {
    /// Schema problems leave nothing safe to validate against.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnniversaryError::SchemaUnreadable { .. } | AnniversaryError::SchemaMalformed { .. }
        )
    }

    /// Violations carried by a rejected candidate, if that is what this is.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            AnniversaryError::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// A single schema non-conformance, attributed to the record it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Zero-based position of the offending record in the document
    pub record: usize,
    /// JSON pointer inside the record (empty for the record itself)
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "record #{} at '{}': {}", self.record + 1, path, self.message)
    }
}

/// Ordered list of violations, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "\t{v}")?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, AnniversaryError>;
