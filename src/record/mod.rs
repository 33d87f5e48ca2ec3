mod document;
mod model;
mod update;
mod upcoming;

pub use document::{decode_records, encode_records, parse_document, render_document};
pub use model::{parse_canonical_date, parse_date, Address, Anniversary, DATE_FORMAT};
pub use update::{AddressUpdate, AnniversaryUpdate};
pub use upcoming::{next_occurrence, upcoming, Upcoming};
