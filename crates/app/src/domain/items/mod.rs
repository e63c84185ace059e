//! Item Catalog

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ItemsServiceError;
pub use service::*;
