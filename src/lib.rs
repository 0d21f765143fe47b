//! Sales Data ETL
//!
//! Extracts retail business tables from a relational database, a multi-page
//! tabular document, a paginated REST API and object storage files, cleans
//! each entity, and loads the results into a destination database.

pub mod clean;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod etl;
pub mod extract;
pub mod table;

// Re-exports for convenience
pub use client::StoresApi;
pub use config::{DbCredentials, Entity, Settings, StoresApiSettings};
pub use database::{DatabaseConnector, TableExtractor, TableLoader};
pub use etl::{Extractor, IdentityTransformer, Loader, Pipeline, Transformer};
pub use extract::{DocumentExtractor, ObjectStoreExtractor, StoresExtractor};
pub use table::{Cell, Table, TableError};
