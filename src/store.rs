use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{AnniversaryError, Result};
use crate::record::{
    decode_records, encode_records, parse_document, render_document, upcoming, Anniversary,
    AnniversaryUpdate, Upcoming,
};
use crate::schema::{JsonSchemaValidator, SchemaValidator};
use crate::storage::{read_document, write_document};

/// Open a session: compile the schema, then load (or create) the data file.
pub fn load_session(settings: &Settings) -> Result<RecordStore> {
    let validator = JsonSchemaValidator::load(&settings.schema_path)?;
    RecordStore::open(validator, &settings.data_path)
}

/// The records of one session, kept in lockstep with the data file.
///
/// Every mutation builds a candidate collection, validates the whole of it,
/// writes it, and only then replaces the live collection. A rejected or
/// unwritten candidate leaves both memory and disk as they were.
pub struct RecordStore<V = JsonSchemaValidator> {
    records: Vec<Anniversary>,
    validator: V,
    data_path: PathBuf,
}

impl<V: SchemaValidator> RecordStore<V> {
    pub fn open(validator: V, data_path: impl Into<PathBuf>) -> Result<Self> {
        let data_path = data_path.into();

        let elements = match read_document(&data_path)? {
            Some(text) => parse_document(&text)?,
            None => {
                info!(path = %data_path.display(), "data file missing, creating empty collection");
                write_document(&data_path, "[]")?;
                Vec::new()
            }
        };

        validator
            .validate(&elements)
            .map_err(AnniversaryError::Validation)?;
        let records = decode_records(&elements)?;

        info!(
            path = %data_path.display(),
            count = records.len(),
            "loaded anniversaries"
        );

        Ok(Self {
            records,
            validator,
            data_path,
        })
    }

    pub fn list(&self) -> &[Anniversary] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Anniversary> {
        self.records
            .get(index)
            .ok_or(AnniversaryError::IndexOutOfRange {
                index,
                count: self.records.len(),
            })
    }

    pub fn add(&mut self, candidate: Anniversary) -> Result<()> {
        let mut working = self.records.clone();
        working.push(candidate);
        self.commit(working, "add")
    }

    /// Merge `update` into the record at `index`; blank fields keep their value.
    pub fn edit(&mut self, index: usize, update: &AnniversaryUpdate) -> Result<()> {
        let merged = update.apply_to(self.get(index)?);
        let mut working = self.records.clone();
        working[index] = merged;
        self.commit(working, "edit")
    }

    /// Remove the record at `index`, returning it.
    pub fn delete(&mut self, index: usize) -> Result<Anniversary> {
        let removed = self.get(index)?.clone();
        let mut working = self.records.clone();
        working.remove(index);
        self.commit(working, "delete")?;
        Ok(removed)
    }

    pub fn upcoming(&self, today: NaiveDate, days: i64) -> Vec<Upcoming> {
        upcoming(&self.records, today, days)
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn commit(&mut self, candidate: Vec<Anniversary>, operation: &str) -> Result<()> {
        let elements = encode_records(&candidate)?;

        if let Err(violations) = self.validator.validate(&elements) {
            warn!(operation, violations = violations.len(), "candidate rejected");
            for v in violations.iter() {
                debug!(%v, "violation");
            }
            return Err(AnniversaryError::Validation(violations));
        }

        let text = render_document(&elements)?;
        if let Err(e) = write_document(&self.data_path, &text) {
            warn!(operation, error = %e, "write failed, mutation discarded");
            return Err(e);
        }

        self.records = candidate;
        info!(operation, count = self.records.len(), "committed");
        Ok(())
    }
}
