//! Request and response shapes exchanged with a backing store client.

use crate::condition::ScanCondition;
use std::fmt;
use tablestore_codec::{Item, Value};

/// Returns true if `name` is a legal table name: 3 to 255 characters drawn
/// from `[A-Za-z0-9_.-]`.
pub fn is_valid_table_name(name: &str) -> bool {
    (3..=255).contains(&name.len())
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
}

/// Whether a key schema element is the partition or the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Partition key.
    Hash,
    /// Sort key.
    Range,
}

impl KeyType {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Range => "RANGE",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar types allowed for key attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarAttributeType {
    /// Text.
    S,
    /// Number.
    N,
    /// Binary.
    B,
}

impl ScalarAttributeType {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::N => "N",
            Self::B => "B",
        }
    }

    /// Returns true if `value` has this scalar type.
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::S, Value::Text(_)) | (Self::N, Value::Integer(_)) | (Self::B, Value::Bytes(_))
        )
    }
}

impl fmt::Display for ScalarAttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One element of a table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchemaElement {
    /// Name of the key attribute.
    pub attribute_name: String,
    /// Partition or sort key.
    pub key_type: KeyType,
}

impl KeySchemaElement {
    /// Creates a partition key element.
    pub fn hash(attribute_name: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            key_type: KeyType::Hash,
        }
    }

    /// Creates a sort key element.
    pub fn range(attribute_name: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            key_type: KeyType::Range,
        }
    }
}

/// Declares the scalar type of a key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// Name of the attribute.
    pub attribute_name: String,
    /// Its scalar type.
    pub attribute_type: ScalarAttributeType,
}

impl AttributeDefinition {
    /// Creates an attribute definition.
    pub fn new(attribute_name: impl Into<String>, attribute_type: ScalarAttributeType) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            attribute_type,
        }
    }
}

/// Provisioned read and write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionedThroughput {
    /// Read capacity units.
    pub read_capacity_units: u64,
    /// Write capacity units.
    pub write_capacity_units: u64,
}

/// Lifecycle state of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// Being created.
    Creating,
    /// Ready for use.
    Active,
    /// Being updated.
    Updating,
    /// Being deleted.
    Deleting,
}

/// Current description of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    /// Table name.
    pub table_name: String,
    /// Primary key schema, hash element first.
    pub key_schema: Vec<KeySchemaElement>,
    /// Definitions of the key attributes.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Provisioned capacity.
    pub provisioned_throughput: ProvisionedThroughput,
    /// Lifecycle state.
    pub table_status: TableStatus,
    /// Approximate number of items.
    pub item_count: u64,
    /// Approximate size of all items in bytes.
    pub table_size_bytes: u64,
}

impl TableDescription {
    /// Name of the partition key attribute.
    pub fn hash_key_name(&self) -> Option<&str> {
        self.key_element(KeyType::Hash)
    }

    /// Name of the sort key attribute, if the table has one.
    pub fn range_key_name(&self) -> Option<&str> {
        self.key_element(KeyType::Range)
    }

    fn key_element(&self, key_type: KeyType) -> Option<&str> {
        self.key_schema
            .iter()
            .find(|e| e.key_type == key_type)
            .map(|e| e.attribute_name.as_str())
    }
}

/// Request to create a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableRequest {
    /// Table name.
    pub table_name: String,
    /// Primary key schema.
    pub key_schema: Vec<KeySchemaElement>,
    /// Definitions of the key attributes.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Provisioned capacity.
    pub provisioned_throughput: ProvisionedThroughput,
}

/// Response to a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableResponse {
    /// Description of the new table.
    pub table_description: TableDescription,
}

/// Response to a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTableResponse {
    /// Description of the table as it is being deleted.
    pub table_description: TableDescription,
}

/// Response to a describe call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeTableResponse {
    /// Current description.
    pub table: TableDescription,
}

/// One page of table names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTablesOutput {
    /// Table names in this page, ascending.
    pub table_names: Vec<String>,
    /// Set when more names follow; pass back as the start name.
    pub last_evaluated_table_name: Option<String>,
}

/// Precondition attached to a single-item write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteCondition {
    /// Write regardless of current state.
    #[default]
    Always,
    /// Write only if an item with the same key already exists.
    KeyExists,
}

/// A single page request of a filtered table scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Table to scan.
    pub table_name: String,
    /// Filters, combined with logical AND.
    pub conditions: Vec<ScanCondition>,
    /// Maximum items to evaluate in this page (before filtering).
    pub limit: Option<usize>,
    /// Attributes to return; `None` returns whole items.
    pub projection: Option<Vec<String>>,
    /// Strongly consistent scan.
    pub consistent_read: bool,
    /// Key of the last item evaluated by the previous page.
    pub exclusive_start_key: Option<Item>,
}

impl ScanRequest {
    /// Creates an unfiltered scan of `table_name`.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            conditions: Vec::new(),
            limit: None,
            projection: None,
            consistent_read: false,
            exclusive_start_key: None,
        }
    }
}

/// One page of scan results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    /// Items that passed the filter.
    pub items: Vec<Item>,
    /// Number of items evaluated before filtering.
    pub scanned_count: usize,
    /// Set when the scan has more pages.
    pub last_evaluated_key: Option<Item>,
}
