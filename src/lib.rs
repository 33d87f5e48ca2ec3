pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod shell;
pub mod storage;
pub mod store;

pub use config::{load_settings, Settings};
pub use error::{AnniversaryError, Result, Violation, Violations};
pub use record::{Address, AddressUpdate, Anniversary, AnniversaryUpdate, Upcoming};
pub use schema::{JsonSchemaValidator, SchemaValidator};
pub use store::{load_session, RecordStore};
