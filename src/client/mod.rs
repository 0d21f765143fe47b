//! HTTP API clients.
//!
//! This module provides the [`StoresApi`] client for the stores REST API.

mod stores;

pub use stores::StoresApi;
