//! Typed store configuration.

use tablestore_client::ClientLimits;

/// How `modify_item` and `delete_item` establish that the key exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistenceCheck {
    /// A single conditional write that fails when the key is absent.
    #[default]
    Conditional,
    /// A strongly consistent read followed by an unconditional write.
    ///
    /// A concurrent delete between the two calls is not detected.
    ReadThenWrite,
}

/// Configuration for a [`DataStore`](crate::DataStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Table the store reads and writes.
    pub table_name: String,

    /// Whether point and batch reads are strongly consistent.
    pub consistent_read: bool,

    /// Existence gate used by modify and delete.
    pub existence_check: ExistenceCheck,

    /// Preferred number of puts per batch write request.
    pub batch_write_size: usize,

    /// Preferred number of keys per batch get request.
    pub batch_get_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: String::new(),
            consistent_read: true,
            existence_check: ExistenceCheck::Conditional,
            batch_write_size: 25,
            batch_get_size: 100,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for `table_name` with default values.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Sets whether reads are strongly consistent.
    #[must_use]
    pub const fn consistent_read(mut self, value: bool) -> Self {
        self.consistent_read = value;
        self
    }

    /// Sets the existence gate.
    #[must_use]
    pub const fn existence_check(mut self, value: ExistenceCheck) -> Self {
        self.existence_check = value;
        self
    }

    /// Sets the preferred batch write size.
    #[must_use]
    pub const fn batch_write_size(mut self, size: usize) -> Self {
        self.batch_write_size = size;
        self
    }

    /// Sets the preferred batch get size.
    #[must_use]
    pub const fn batch_get_size(mut self, size: usize) -> Self {
        self.batch_get_size = size;
        self
    }

    /// Batch write size after clamping to the client's limit.
    pub fn effective_batch_write_size(&self, limits: &ClientLimits) -> usize {
        self.batch_write_size.min(limits.max_batch_write).max(1)
    }

    /// Batch get size after clamping to the client's limit.
    pub fn effective_batch_get_size(&self, limits: &ClientLimits) -> usize {
        self.batch_get_size.min(limits.max_batch_get).max(1)
    }
}
