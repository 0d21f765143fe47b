//! Source extractors for the non-relational inputs
//!
//! - [`DocumentExtractor`]: multi-page tabular document
//! - [`StoresExtractor`]: paginated stores REST API
//! - [`ObjectStoreExtractor`]: CSV/JSON files in object storage
//!
//! The relational extractor lives in [`crate::database`].

mod document;
mod object_store;
mod parse;
mod source;
mod stores;

pub use document::{DocumentExtractor, read_pages, read_text_table};
pub use object_store::{FileFormat, ObjectStoreExtractor};
pub use parse::{parse_csv, parse_json};
pub use source::Location;
pub use stores::StoresExtractor;
