//! Table lifecycle manager.

use super::definition::TableDefinition;
use crate::error::CoreResult;
use std::fmt;
use std::sync::Arc;
use tablestore_client::{CreateTableResponse, DeleteTableResponse, DescribeTableResponse, StoreClient};
use tracing::{debug, info};

/// Result of [`TableStore::create_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateTableOutcome {
    /// The table was created.
    Created(CreateTableResponse),
    /// A table with that name already existed; nothing was changed.
    AlreadyExists,
}

impl CreateTableOutcome {
    /// Returns true if the table was created by this call.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Result of [`TableStore::delete_table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTableOutcome {
    /// The table was deleted.
    Deleted(DeleteTableResponse),
    /// No table with that name existed.
    NotPresent,
}

impl DeleteTableOutcome {
    /// Returns true if the table was deleted by this call.
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

/// Creates, deletes and describes tables.
///
/// Create and delete are idempotent from the caller's view: they list the
/// existing tables first and report a no-op outcome instead of failing.
/// The check and the mutation are separate requests, so a concurrent
/// caller can still make the mutation fail with a backend error.
pub struct TableStore<C> {
    client: Arc<C>,
}

impl<C> Clone for TableStore<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C> fmt::Debug for TableStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableStore").finish_non_exhaustive()
    }
}

impl<C: StoreClient> TableStore<C> {
    /// Creates a manager over `client`.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Creates the table unless one with the same name exists.
    pub async fn create_table(&self, definition: &TableDefinition) -> CoreResult<CreateTableOutcome> {
        let request = definition.to_create_request()?;
        let table = definition.table_name.as_str();

        if self.table_exists(table).await? {
            info!(table, "table already exists");
            return Ok(CreateTableOutcome::AlreadyExists);
        }

        let response = self.client.create_table(request).await?;
        info!(table, status = ?response.table_description.table_status, "created table");
        Ok(CreateTableOutcome::Created(response))
    }

    /// Deletes the table if it exists.
    pub async fn delete_table(&self, table: &str) -> CoreResult<DeleteTableOutcome> {
        if !self.table_exists(table).await? {
            info!(table, "table not present");
            return Ok(DeleteTableOutcome::NotPresent);
        }

        let response = self.client.delete_table(table).await?;
        info!(table, "deleted table");
        Ok(DeleteTableOutcome::Deleted(response))
    }

    /// Describes the table. Fails with the backend's not-found error when it
    /// doesn't exist.
    pub async fn describe_table(&self, table: &str) -> CoreResult<DescribeTableResponse> {
        debug!(table, "describe table");
        Ok(self.client.describe_table(table).await?)
    }

    /// Checks if a table exists, by listing table names.
    pub async fn table_exists(&self, table: &str) -> CoreResult<bool> {
        Ok(self.list_tables().await?.iter().any(|name| name == table))
    }

    /// Returns every table name, following pagination.
    pub async fn list_tables(&self) -> CoreResult<Vec<String>> {
        let mut names = Vec::new();
        let mut start = None;
        loop {
            let page = self.client.list_tables(start, None).await?;
            names.extend(page.table_names);
            match page.last_evaluated_table_name {
                Some(last) => start = Some(last),
                None => break,
            }
        }
        debug!(tables = names.len(), "listed tables");
        Ok(names)
    }
}
