use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::path::Path;

use crate::error::{AnniversaryError, Result, Violation, Violations};
use crate::storage::read_schema;

/// Capability to check a document against a fixed per-record schema.
///
/// Implementors only describe how one record is checked; `validate` walks the
/// whole document so that every invalid record is reported, not just the first.
pub trait SchemaValidator {
    /// Violations for the record at `index`, empty if it conforms
    fn check(&self, index: usize, record: &Value) -> Vec<Violation>;

    fn validate(&self, document: &[Value]) -> std::result::Result<(), Violations> {
        let violations: Vec<Violation> = document
            .iter()
            .enumerate()
            .flat_map(|(i, record)| self.check(i, record))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Violations(violations))
        }
    }
}

/// JSON Schema (Draft 7) validator compiled once per session
pub struct JsonSchemaValidator {
    schema: Value,
    compiled: JSONSchema,
}

impl JsonSchemaValidator {
    /// Read and compile the schema file. Any failure here is fatal to the session.
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_schema(path)?;
        Self::from_text(path, &text)
    }

    pub fn from_text(path: &Path, text: &str) -> Result<Self> {
        let malformed = |reason: String| AnniversaryError::SchemaMalformed {
            path: path.to_path_buf(),
            reason,
        };

        let schema: Value = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
        if !schema.is_object() {
            return Err(malformed("schema document must be a JSON object".to_string()));
        }

        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| malformed(e.to_string()))?;

        Ok(Self { schema, compiled })
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Enumerated values the schema accepts for a (possibly nested) property,
    /// e.g. `&["address", "province"]`. `None` means free text.
    pub fn allowed_values(&self, property: &[&str]) -> Option<Vec<String>> {
        let mut node = &self.schema;
        for name in property {
            node = node.get("properties")?.get(*name)?;
        }
        let values = node
            .get("enum")?
            .as_array()?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        Some(values)
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn check(&self, index: usize, record: &Value) -> Vec<Violation> {
        match self.compiled.validate(record) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|e| Violation {
                    record: index,
                    path: e.instance_path.to_string(),
                    message: e.to_string(),
                })
                .collect(),
        }
    }
}
