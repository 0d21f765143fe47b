//! Configuration: credentials files, environment settings and entities

mod credentials;
mod entity;
mod settings;

pub use credentials::DbCredentials;
pub use entity::Entity;
pub use settings::{Settings, StoresApiSettings};
