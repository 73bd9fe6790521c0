//! # tablestore Core
//!
//! Typed persistence over a managed key-value store.
//!
//! This crate provides:
//! - [`PersistentItem`], the entity contract (a serde type with one key)
//! - [`DataStore`], typed CRUD, batch and scan operations on one table
//! - [`TableStore`], idempotent table creation and deletion
//! - [`StoreConfig`] and [`CoreError`]
//!
//! The key-value store itself is reached through a
//! [`StoreClient`](tablestore_client::StoreClient).

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod entity;
mod error;
mod store;
mod table;

pub use config::{ExistenceCheck, StoreConfig};
pub use entity::{ItemKey, PersistentItem};
pub use error::{CoreError, CoreResult};
pub use store::{DataStore, ScanOptions};
pub use table::{CreateTableOutcome, DeleteTableOutcome, TableDefinition, TableStore};
