//! # tablestore Testkit
//!
//! Test utilities for tablestore.
//!
//! This crate provides:
//! - Sample entities, table definitions and ready-made stores
//! - Property-based test generators using proptest
//! - A fault-injecting client wrapper that counts calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tablestore_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn add_then_get() {
//!     let store = TestStore::new().await;
//!     store.widgets.add_item(&Widget::new("w1", "red")).await.unwrap();
//!     // ... test operations
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
