//! # tablestore Client
//!
//! The backing store capability that tablestore is built on.
//!
//! This crate provides:
//! - [`StoreClient`], the narrow async interface to a key-value database
//! - Request and response shapes for item and table administration calls
//! - [`ScanCondition`] filters and their evaluation
//! - [`InMemoryClient`], a complete in-process implementation for tests
//!   and local development
//!
//! ## Usage
//!
//! ```
//! use tablestore_client::{
//!     AttributeDefinition, CreateTableRequest, InMemoryClient, KeySchemaElement,
//!     ProvisionedThroughput, ScalarAttributeType, StoreClient, WriteCondition,
//! };
//! use tablestore_codec::Item;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let client = InMemoryClient::new();
//! client
//!     .create_table(CreateTableRequest {
//!         table_name: "Widgets".into(),
//!         key_schema: vec![KeySchemaElement::hash("Id")],
//!         attribute_definitions: vec![AttributeDefinition::new("Id", ScalarAttributeType::S)],
//!         provisioned_throughput: ProvisionedThroughput {
//!             read_capacity_units: 5,
//!             write_capacity_units: 5,
//!         },
//!     })
//!     .await
//!     .unwrap();
//!
//! let widget = Item::new().with("Id", "w1").with("Color", "red");
//! client.put_item("Widgets", widget.clone(), WriteCondition::Always).await.unwrap();
//!
//! let key = Item::new().with("Id", "w1");
//! assert_eq!(client.get_item("Widgets", &key, true).await.unwrap(), Some(widget));
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod condition;
mod error;
mod memory;
mod model;

pub use client::{ClientLimits, StoreClient};
pub use condition::{matches_all, ScanCondition, ScanOperator};
pub use error::{ClientError, ClientResult};
pub use memory::{InMemoryClient, LIST_TABLES_PAGE_SIZE, SCAN_PAGE_BYTES};
pub use model::{
    is_valid_table_name, AttributeDefinition, CreateTableRequest, CreateTableResponse,
    DeleteTableResponse, DescribeTableResponse, KeySchemaElement, KeyType, ListTablesOutput,
    ProvisionedThroughput, ScalarAttributeType, ScanOutput, ScanRequest, TableDescription,
    TableStatus, WriteCondition,
};
