//! Fault injection for backing store clients.
//!
//! [`FaultyClient`] wraps any [`StoreClient`], counts the calls made to
//! each operation, and fails chosen calls with a chosen error.

use parking_lot::Mutex;
use std::collections::HashMap;
use tablestore_client::{
    ClientError, ClientLimits, ClientResult, CreateTableRequest, CreateTableResponse,
    DeleteTableResponse, DescribeTableResponse, ListTablesOutput, ScanOutput, ScanRequest,
    StoreClient, WriteCondition,
};
use tablestore_codec::Item;

/// A client operation, for counting and fault targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `put_item`
    PutItem,
    /// `get_item`
    GetItem,
    /// `delete_item`
    DeleteItem,
    /// `batch_put`
    BatchPut,
    /// `batch_get`
    BatchGet,
    /// `scan`
    Scan,
    /// `list_tables`
    ListTables,
    /// `create_table`
    CreateTable,
    /// `delete_table`
    DeleteTable,
    /// `describe_table`
    DescribeTable,
}

struct Fault {
    operation: Operation,
    call: usize,
    error: fn() -> ClientError,
}

#[derive(Default)]
struct FaultState {
    calls: HashMap<Operation, usize>,
    faults: Vec<Fault>,
}

/// A client wrapper that injects failures.
///
/// Calls are counted per operation starting at 1. A scheduled fault fires
/// once, on its call number, instead of forwarding the call.
pub struct FaultyClient<C> {
    inner: C,
    state: Mutex<FaultState>,
}

impl<C: StoreClient> FaultyClient<C> {
    /// Wraps `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            state: Mutex::new(FaultState::default()),
        }
    }

    /// Fails the `call`-th call of `operation` with `error()`.
    #[must_use]
    pub fn fail_on(self, operation: Operation, call: usize, error: fn() -> ClientError) -> Self {
        self.state.lock().faults.push(Fault {
            operation,
            call,
            error,
        });
        self
    }

    /// Number of calls made to `operation` so far, including failed ones.
    pub fn calls(&self, operation: Operation) -> usize {
        self.state.lock().calls.get(&operation).copied().unwrap_or(0)
    }

    /// Total number of calls across all operations.
    pub fn total_calls(&self) -> usize {
        self.state.lock().calls.values().sum()
    }

    /// Returns the wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn record(&self, operation: Operation) -> ClientResult<()> {
        let mut state = self.state.lock();
        let count = state.calls.entry(operation).or_insert(0);
        *count += 1;
        let call = *count;

        let due = state
            .faults
            .iter()
            .position(|f| f.operation == operation && f.call == call);
        match due {
            Some(index) => Err((state.faults.remove(index).error)()),
            None => Ok(()),
        }
    }
}

impl<C: StoreClient> StoreClient for FaultyClient<C> {
    fn limits(&self) -> ClientLimits {
        self.inner.limits()
    }

    async fn put_item(&self, table: &str, item: Item, condition: WriteCondition) -> ClientResult<()> {
        self.record(Operation::PutItem)?;
        self.inner.put_item(table, item, condition).await
    }

    async fn get_item(
        &self,
        table: &str,
        key: &Item,
        consistent_read: bool,
    ) -> ClientResult<Option<Item>> {
        self.record(Operation::GetItem)?;
        self.inner.get_item(table, key, consistent_read).await
    }

    async fn delete_item(
        &self,
        table: &str,
        key: &Item,
        condition: WriteCondition,
    ) -> ClientResult<()> {
        self.record(Operation::DeleteItem)?;
        self.inner.delete_item(table, key, condition).await
    }

    async fn batch_put(&self, table: &str, items: Vec<Item>) -> ClientResult<()> {
        self.record(Operation::BatchPut)?;
        self.inner.batch_put(table, items).await
    }

    async fn batch_get(
        &self,
        table: &str,
        keys: Vec<Item>,
        consistent_read: bool,
    ) -> ClientResult<Vec<Item>> {
        self.record(Operation::BatchGet)?;
        self.inner.batch_get(table, keys, consistent_read).await
    }

    async fn scan(&self, request: ScanRequest) -> ClientResult<ScanOutput> {
        self.record(Operation::Scan)?;
        self.inner.scan(request).await
    }

    async fn list_tables(
        &self,
        exclusive_start_table_name: Option<String>,
        limit: Option<usize>,
    ) -> ClientResult<ListTablesOutput> {
        self.record(Operation::ListTables)?;
        self.inner.list_tables(exclusive_start_table_name, limit).await
    }

    async fn create_table(&self, request: CreateTableRequest) -> ClientResult<CreateTableResponse> {
        self.record(Operation::CreateTable)?;
        self.inner.create_table(request).await
    }

    async fn delete_table(&self, table: &str) -> ClientResult<DeleteTableResponse> {
        self.record(Operation::DeleteTable)?;
        self.inner.delete_table(table).await
    }

    async fn describe_table(&self, table: &str) -> ClientResult<DescribeTableResponse> {
        self.record(Operation::DescribeTable)?;
        self.inner.describe_table(table).await
    }
}

/// A retryable throttling error.
pub fn throttled() -> ClientError {
    ClientError::Throttled {
        message: "rate of requests exceeds the allowed throughput".into(),
    }
}

/// A non-retryable transport error.
pub fn connection_lost() -> ClientError {
    ClientError::transport_fatal("connection closed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablestore_client::InMemoryClient;

    #[tokio::test]
    async fn counts_and_fails_the_chosen_call() {
        let client = FaultyClient::new(InMemoryClient::new()).fail_on(
            Operation::DescribeTable,
            2,
            throttled,
        );

        assert!(matches!(
            client.describe_table("Widgets").await,
            Err(ClientError::ResourceNotFound { .. })
        ));
        assert!(matches!(
            client.describe_table("Widgets").await,
            Err(ClientError::Throttled { .. })
        ));
        assert!(matches!(
            client.describe_table("Widgets").await,
            Err(ClientError::ResourceNotFound { .. })
        ));

        assert_eq!(client.calls(Operation::DescribeTable), 3);
        assert_eq!(client.calls(Operation::Scan), 0);
        assert_eq!(client.total_calls(), 3);
    }
}
