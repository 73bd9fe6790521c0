//! Backing store client capability.

use crate::error::ClientResult;
use crate::model::{
    CreateTableRequest, CreateTableResponse, DeleteTableResponse, DescribeTableResponse,
    ListTablesOutput, ScanOutput, ScanRequest, WriteCondition,
};
use std::future::Future;
use tablestore_codec::Item;

/// Request-size limits a client enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientLimits {
    /// Maximum puts in one batch write.
    pub max_batch_write: usize,
    /// Maximum keys in one batch get.
    pub max_batch_get: usize,
    /// Maximum canonical encoded size of one item, in bytes.
    pub max_item_size: usize,
}

impl Default for ClientLimits {
    fn default() -> Self {
        Self {
            max_batch_write: 25,
            max_batch_get: 100,
            max_item_size: 400 * 1024,
        }
    }
}

impl ClientLimits {
    /// Sets the batch write limit.
    #[must_use]
    pub const fn max_batch_write(mut self, n: usize) -> Self {
        self.max_batch_write = n;
        self
    }

    /// Sets the batch get limit.
    #[must_use]
    pub const fn max_batch_get(mut self, n: usize) -> Self {
        self.max_batch_get = n;
        self
    }

    /// Sets the item size limit.
    #[must_use]
    pub const fn max_item_size(mut self, n: usize) -> Self {
        self.max_item_size = n;
        self
    }
}

/// A client for a remote key-value database.
///
/// This is the narrow capability the typed store and the table manager are
/// built on. Implementations translate each call into one logical request
/// against the backend and report its failures as [`ClientError`]s without
/// retrying; retry policy, if any, lives inside the implementation.
///
/// Keys are [`Item`]s carrying only the table's key attributes.
///
/// Every method returns a `Send` future. Dropping the future abandons the
/// request.
///
/// # Implementors
///
/// - [`InMemoryClient`](crate::InMemoryClient) - For tests and local development
///
/// [`ClientError`]: crate::ClientError
pub trait StoreClient: Send + Sync {
    /// Limits this client enforces on batch and item sizes.
    fn limits(&self) -> ClientLimits;

    /// Writes one item, replacing any item with the same key.
    ///
    /// With [`WriteCondition::KeyExists`] the write happens only if the key
    /// is already present, otherwise it fails with `ConditionalCheckFailed`.
    fn put_item(
        &self,
        table: &str,
        item: Item,
        condition: WriteCondition,
    ) -> impl Future<Output = ClientResult<()>> + Send;

    /// Reads one item by key.
    fn get_item(
        &self,
        table: &str,
        key: &Item,
        consistent_read: bool,
    ) -> impl Future<Output = ClientResult<Option<Item>>> + Send;

    /// Deletes one item by key.
    ///
    /// Deleting an absent key succeeds unless the condition is
    /// [`WriteCondition::KeyExists`].
    fn delete_item(
        &self,
        table: &str,
        key: &Item,
        condition: WriteCondition,
    ) -> impl Future<Output = ClientResult<()>> + Send;

    /// Writes up to [`ClientLimits::max_batch_write`] items in one request.
    fn batch_put(
        &self,
        table: &str,
        items: Vec<Item>,
    ) -> impl Future<Output = ClientResult<()>> + Send;

    /// Reads up to [`ClientLimits::max_batch_get`] distinct keys in one
    /// request. Keys that do not exist are omitted from the result.
    fn batch_get(
        &self,
        table: &str,
        keys: Vec<Item>,
        consistent_read: bool,
    ) -> impl Future<Output = ClientResult<Vec<Item>>> + Send;

    /// Evaluates one page of a filtered scan.
    fn scan(&self, request: ScanRequest) -> impl Future<Output = ClientResult<ScanOutput>> + Send;

    /// Lists one page of table names after `exclusive_start_table_name`.
    fn list_tables(
        &self,
        exclusive_start_table_name: Option<String>,
        limit: Option<usize>,
    ) -> impl Future<Output = ClientResult<ListTablesOutput>> + Send;

    /// Creates a table.
    fn create_table(
        &self,
        request: CreateTableRequest,
    ) -> impl Future<Output = ClientResult<CreateTableResponse>> + Send;

    /// Deletes a table.
    fn delete_table(
        &self,
        table: &str,
    ) -> impl Future<Output = ClientResult<DeleteTableResponse>> + Send;

    /// Describes a table.
    fn describe_table(
        &self,
        table: &str,
    ) -> impl Future<Output = ClientResult<DescribeTableResponse>> + Send;
}
