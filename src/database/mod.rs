//! Relational store access: connection factory, table extractor and loader

mod connector;
mod extractor;
mod loader;
mod sql;

pub use connector::DatabaseConnector;
pub use extractor::TableExtractor;
pub use loader::TableLoader;
