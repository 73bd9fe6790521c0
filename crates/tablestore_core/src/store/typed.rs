//! Typed store implementation.

use super::batch::{dedupe_by_key, into_chunks};
use super::ScanOptions;
use crate::config::{ExistenceCheck, StoreConfig};
use crate::entity::{self, ItemKey, PersistentItem};
use crate::error::{CoreError, CoreResult};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tablestore_client::{ClientError, ScanCondition, ScanRequest, StoreClient, WriteCondition};
use tablestore_codec::to_canonical_cbor;
use tracing::{debug, warn};

/// A typed store of entities in one table.
///
/// `DataStore<T, C>` maps entities of type `T` to items in the table named
/// by its [`StoreConfig`] and talks to the table through the client `C`.
/// Every operation is a stateless round trip: the store caches nothing and
/// owns no entities, so clones share only the client.
///
/// # Full Scans
///
/// [`get_all`](Self::get_all) and [`search_items`](Self::search_items)
/// read the entire table, following pagination to the end. Their cost
/// grows with table size, not with result size.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
/// use tablestore_client::{InMemoryClient, ScanCondition};
/// use tablestore_core::{DataStore, PersistentItem, ScanOptions, StoreConfig};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Widget {
///     id: String,
///     color: String,
/// }
///
/// impl PersistentItem for Widget {
///     type Key = String;
///     fn key(&self) -> String {
///         self.id.clone()
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # use tablestore_core::{TableDefinition, TableStore};
/// # use tablestore_client::ScalarAttributeType;
/// let client = Arc::new(InMemoryClient::new());
/// # TableStore::new(Arc::clone(&client))
/// #     .create_table(&TableDefinition::new("Widgets", "Id", ScalarAttributeType::S))
/// #     .await?;
/// let widgets: DataStore<Widget, _> = DataStore::new(client, StoreConfig::new("Widgets"));
///
/// widgets.add_item(&Widget { id: "w1".into(), color: "red".into() }).await?;
///
/// let red = widgets
///     .search_items(vec![ScanCondition::eq("Color", "red")], &ScanOptions::new())
///     .await?;
/// assert_eq!(red.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct DataStore<T, C> {
    client: Arc<C>,
    config: StoreConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> Clone for DataStore<T, C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C> fmt::Debug for DataStore<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: PersistentItem, C: StoreClient> DataStore<T, C> {
    /// Creates a store over `client` configured by `config`.
    pub fn new(client: Arc<C>, config: StoreConfig) -> Self {
        Self {
            client,
            config,
            _marker: PhantomData,
        }
    }

    /// Returns the table name.
    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the client.
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    /// Writes an entity, replacing any entity with the same key.
    pub async fn add_item(&self, entity: &T) -> CoreResult<()> {
        let item = entity::to_item(entity)?;
        debug!(table = self.table_name(), key = ?entity.key(), "add item");
        self.client
            .put_item(self.table_name(), item, WriteCondition::Always)
            .await?;
        Ok(())
    }

    /// Writes many entities in as few batch requests as the limits allow.
    ///
    /// Every entity is validated and serialized before the first request.
    /// Entities sharing a key collapse to the last one. Chunks are submitted
    /// in order; the first failing chunk stops the rest, leaving earlier
    /// chunks written. Empty input makes no requests.
    pub async fn batch_store(&self, entities: &[T]) -> CoreResult<()> {
        let keyed = entities
            .iter()
            .map(|entity| -> CoreResult<_> {
                let item = entity::to_item(entity)?;
                Ok((to_canonical_cbor(&entity.key().to_value()), item))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let items = dedupe_by_key(keyed);
        if items.is_empty() {
            return Ok(());
        }

        let size = self
            .config
            .effective_batch_write_size(&self.client.limits());
        let chunks = into_chunks(items, size);
        let total = chunks.len();

        for (index, chunk) in chunks.into_iter().enumerate() {
            debug!(
                table = self.table_name(),
                chunk = index + 1,
                of = total,
                items = chunk.len(),
                "batch store"
            );
            if let Err(e) = self.client.batch_put(self.table_name(), chunk).await {
                warn!(
                    table = self.table_name(),
                    chunk = index + 1,
                    of = total,
                    error = %e,
                    "batch store aborted"
                );
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Returns every entity in the table.
    ///
    /// **Warning**: This is a full table scan.
    pub async fn get_all(&self) -> CoreResult<Vec<T>> {
        let options = ScanOptions::new().consistent_read(self.config.consistent_read);
        self.search_items(vec![ScanCondition::not_null(T::KEY_ATTRIBUTE)], &options)
            .await
    }

    /// Reads an entity by key.
    ///
    /// Returns `None` if the entity doesn't exist.
    pub async fn get_item(&self, key: &T::Key) -> CoreResult<Option<T>> {
        let key_item = entity::key_item::<T>(key)?;
        debug!(table = self.table_name(), ?key, "get item");
        self.client
            .get_item(self.table_name(), &key_item, self.config.consistent_read)
            .await?
            .map(entity::from_item)
            .transpose()
    }

    /// Reads many entities by key.
    ///
    /// Returns the entities that exist, each once, in no particular order.
    pub async fn batch_get(&self, keys: &[T::Key]) -> CoreResult<Vec<T>> {
        let keyed = keys
            .iter()
            .map(|key| -> CoreResult<_> {
                let item = entity::key_item::<T>(key)?;
                Ok((item.to_canonical_cbor(), item))
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let key_items = dedupe_by_key(keyed);
        if key_items.is_empty() {
            return Ok(Vec::new());
        }

        let size = self.config.effective_batch_get_size(&self.client.limits());
        let chunks = into_chunks(key_items, size);
        let total = chunks.len();

        let mut found = Vec::new();
        for (index, chunk) in chunks.into_iter().enumerate() {
            debug!(
                table = self.table_name(),
                chunk = index + 1,
                of = total,
                keys = chunk.len(),
                "batch get"
            );
            let items = self
                .client
                .batch_get(self.table_name(), chunk, self.config.consistent_read)
                .await?;
            for item in items {
                found.push(entity::from_item(item)?);
            }
        }
        Ok(found)
    }

    /// Replaces an existing entity.
    ///
    /// Fails with [`CoreError::ItemNotFound`] and writes nothing when no
    /// entity has the same key.
    pub async fn modify_item(&self, entity: &T) -> CoreResult<()> {
        let key = entity.key();
        let item = entity::to_item(entity)?;
        debug!(table = self.table_name(), ?key, "modify item");

        let condition = self.existence_gate(&key).await?;
        match self.client.put_item(self.table_name(), item, condition).await {
            Err(ClientError::ConditionalCheckFailed) => Err(self.not_found(&key)),
            other => Ok(other?),
        }
    }

    /// Deletes an existing entity.
    ///
    /// Fails with [`CoreError::ItemNotFound`] when no entity has the same
    /// key.
    pub async fn delete_item(&self, entity: &T) -> CoreResult<()> {
        self.delete_by_key(&entity.key()).await
    }

    /// Deletes the entity with `key`.
    ///
    /// Fails with [`CoreError::ItemNotFound`] when it doesn't exist.
    pub async fn delete_by_key(&self, key: &T::Key) -> CoreResult<()> {
        let key_item = entity::key_item::<T>(key)?;
        debug!(table = self.table_name(), ?key, "delete item");

        let condition = self.existence_gate(key).await?;
        match self
            .client
            .delete_item(self.table_name(), &key_item, condition)
            .await
        {
            Err(ClientError::ConditionalCheckFailed) => Err(self.not_found(key)),
            other => Ok(other?),
        }
    }

    /// Checks if an entity with `key` exists, with a strongly consistent
    /// read.
    pub async fn exists(&self, key: &T::Key) -> CoreResult<bool> {
        let key_item = entity::key_item::<T>(key)?;
        Ok(self
            .client
            .get_item(self.table_name(), &key_item, true)
            .await?
            .is_some())
    }

    /// Returns the entities matching every condition.
    ///
    /// **Warning**: This is a full table scan; pages are requested until
    /// the table is exhausted or `options.limit` entities are found.
    pub async fn search_items(
        &self,
        conditions: Vec<ScanCondition>,
        options: &ScanOptions,
    ) -> CoreResult<Vec<T>> {
        for condition in &conditions {
            condition.validate()?;
        }
        let limit = options.limit.unwrap_or(usize::MAX);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut request = ScanRequest::new(self.table_name());
        request.conditions = conditions;
        request.limit = options.page_size;
        request.consistent_read = options.consistent_read;
        request.projection = options.projection.clone().map(|mut names| {
            if !names.iter().any(|n| n == T::KEY_ATTRIBUTE) {
                names.push(T::KEY_ATTRIBUTE.to_string());
            }
            names
        });

        let mut found = Vec::new();
        let mut pages = 0usize;
        loop {
            let page = self.client.scan(request.clone()).await?;
            pages += 1;

            for item in page.items.into_iter().take(limit - found.len()) {
                found.push(entity::from_item(item)?);
            }
            match page.last_evaluated_key {
                Some(key) if found.len() < limit => request.exclusive_start_key = Some(key),
                _ => break,
            }
        }

        debug!(
            table = self.table_name(),
            conditions = request.conditions.len(),
            pages,
            found = found.len(),
            "search items"
        );
        Ok(found)
    }

    /// Picks the write condition for modify and delete, performing the
    /// existence read first under [`ExistenceCheck::ReadThenWrite`].
    async fn existence_gate(&self, key: &T::Key) -> CoreResult<WriteCondition> {
        match self.config.existence_check {
            ExistenceCheck::Conditional => Ok(WriteCondition::KeyExists),
            ExistenceCheck::ReadThenWrite => {
                if self.exists(key).await? {
                    Ok(WriteCondition::Always)
                } else {
                    Err(self.not_found(key))
                }
            }
        }
    }

    fn not_found(&self, key: &T::Key) -> CoreError {
        debug!(table = self.table_name(), ?key, "item not found");
        CoreError::item_not_found(self.table_name(), format!("{key:?}"))
    }
}
