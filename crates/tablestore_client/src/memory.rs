//! In-memory backing store client.

use crate::client::{ClientLimits, StoreClient};
use crate::condition::matches_all;
use crate::error::{ClientError, ClientResult};
use crate::model::{
    is_valid_table_name, CreateTableRequest, CreateTableResponse, DeleteTableResponse,
    DescribeTableResponse, KeyType, ListTablesOutput, ScalarAttributeType, ScanOutput,
    ScanRequest, TableDescription, TableStatus, WriteCondition,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use tablestore_codec::Item;
use tracing::debug;

/// Maximum table names returned by one `list_tables` page.
pub const LIST_TABLES_PAGE_SIZE: usize = 100;

/// Maximum encoded bytes evaluated by one scan page.
pub const SCAN_PAGE_BYTES: usize = 1024 * 1024;

/// An in-memory key-value database.
///
/// This client keeps every table in process memory and is suitable for:
/// - Unit and integration tests
/// - Local development without a remote database
///
/// It behaves like the managed service on everything the typed store
/// relies on: key validation against the table's attribute definitions,
/// batch and item size limits, conditional writes, paginated scans and
/// table listing. Tables become `Active` immediately.
///
/// Items are ordered by the canonical encoding of their key, so scans are
/// deterministic.
///
/// # Thread Safety
///
/// All state sits behind a single `RwLock`; no lock is held across an
/// await point.
#[derive(Debug, Default)]
pub struct InMemoryClient {
    tables: RwLock<BTreeMap<String, MemoryTable>>,
    limits: ClientLimits,
}

impl InMemoryClient {
    /// Creates a client with the managed service's default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client with custom limits.
    #[must_use]
    pub fn with_limits(limits: ClientLimits) -> Self {
        Self {
            tables: RwLock::default(),
            limits,
        }
    }

    /// Number of items currently stored in `table`.
    pub fn item_count(&self, table: &str) -> Option<usize> {
        self.tables.read().get(table).map(|t| t.items.len())
    }

    fn check_size(&self, item: &Item) -> ClientResult<()> {
        let size = item.encoded_len();
        if size > self.limits.max_item_size {
            return Err(ClientError::ItemTooLarge {
                size,
                max: self.limits.max_item_size,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct KeyAttribute {
    name: String,
    attribute_type: ScalarAttributeType,
}

#[derive(Debug)]
struct MemoryTable {
    description: TableDescription,
    hash: KeyAttribute,
    range: Option<KeyAttribute>,
    items: BTreeMap<Vec<u8>, Item>,
    size_bytes: usize,
}

impl MemoryTable {
    fn create(request: CreateTableRequest) -> ClientResult<Self> {
        if !is_valid_table_name(&request.table_name) {
            return Err(ClientError::validation(format!(
                "invalid table name: {:?}",
                request.table_name
            )));
        }

        let throughput = request.provisioned_throughput;
        if throughput.read_capacity_units == 0 || throughput.write_capacity_units == 0 {
            return Err(ClientError::validation(
                "provisioned throughput must be at least 1 read and 1 write unit",
            ));
        }

        let lookup = |key_type: KeyType| -> ClientResult<Option<KeyAttribute>> {
            let mut elements = request.key_schema.iter().filter(|e| e.key_type == key_type);
            let Some(element) = elements.next() else {
                return Ok(None);
            };
            if elements.next().is_some() {
                return Err(ClientError::validation(format!(
                    "key schema has more than one {key_type} element"
                )));
            }
            let definition = request
                .attribute_definitions
                .iter()
                .find(|d| d.attribute_name == element.attribute_name)
                .ok_or_else(|| {
                    ClientError::validation(format!(
                        "no attribute definition for key attribute {}",
                        element.attribute_name
                    ))
                })?;
            Ok(Some(KeyAttribute {
                name: element.attribute_name.clone(),
                attribute_type: definition.attribute_type,
            }))
        };

        let hash = lookup(KeyType::Hash)?
            .ok_or_else(|| ClientError::validation("key schema requires a HASH element"))?;
        let range = lookup(KeyType::Range)?;

        let key_attrs = 1 + usize::from(range.is_some());
        if request.key_schema.len() != key_attrs
            || request.attribute_definitions.len() != key_attrs
        {
            return Err(ClientError::validation(
                "attribute definitions must match the key schema exactly",
            ));
        }
        if range.as_ref().is_some_and(|r| r.name == hash.name) {
            return Err(ClientError::validation(
                "HASH and RANGE keys must be different attributes",
            ));
        }

        let mut key_schema = request.key_schema;
        key_schema.sort_by_key(|e| e.key_type == KeyType::Range);

        Ok(Self {
            description: TableDescription {
                table_name: request.table_name,
                key_schema,
                attribute_definitions: request.attribute_definitions,
                provisioned_throughput: throughput,
                table_status: TableStatus::Active,
                item_count: 0,
                table_size_bytes: 0,
            },
            hash,
            range,
            items: BTreeMap::new(),
            size_bytes: 0,
        })
    }

    fn key_attributes(&self) -> impl Iterator<Item = &KeyAttribute> {
        std::iter::once(&self.hash).chain(self.range.as_ref())
    }

    /// Extracts and type-checks the key of a full item.
    fn key_of(&self, item: &Item) -> ClientResult<Item> {
        self.key_attributes()
            .map(|attr| match item.get(&attr.name) {
                Some(v) if attr.attribute_type.matches(v) => Ok((attr.name.clone(), v.clone())),
                Some(v) => Err(ClientError::validation(format!(
                    "key attribute {} must be of type {}, found {}",
                    attr.name,
                    attr.attribute_type,
                    v.type_name()
                ))),
                None => Err(ClientError::validation(format!(
                    "missing the key {} in the item",
                    attr.name
                ))),
            })
            .collect()
    }

    /// Validates a bare key and returns its storage bytes.
    fn storage_key(&self, key: &Item) -> ClientResult<Vec<u8>> {
        let extracted = self.key_of(key)?;
        if extracted.len() != key.len() {
            return Err(ClientError::validation(
                "the provided key element does not match the schema",
            ));
        }
        Ok(extracted.to_canonical_cbor())
    }

    fn insert(&mut self, key: Vec<u8>, item: Item) {
        self.size_bytes += item.encoded_len();
        if let Some(old) = self.items.insert(key, item) {
            self.size_bytes -= old.encoded_len();
        }
    }

    fn remove(&mut self, key: &[u8]) {
        if let Some(old) = self.items.remove(key) {
            self.size_bytes -= old.encoded_len();
        }
    }

    fn describe(&self) -> TableDescription {
        TableDescription {
            item_count: self.items.len() as u64,
            table_size_bytes: self.size_bytes as u64,
            ..self.description.clone()
        }
    }
}

impl StoreClient for InMemoryClient {
    fn limits(&self) -> ClientLimits {
        self.limits
    }

    async fn put_item(&self, table: &str, item: Item, condition: WriteCondition) -> ClientResult<()> {
        self.check_size(&item)?;
        let mut tables = self.tables.write();
        let t = tables
            .get_mut(table)
            .ok_or_else(|| ClientError::resource_not_found(table))?;

        let key = t.key_of(&item)?.to_canonical_cbor();
        if condition == WriteCondition::KeyExists && !t.items.contains_key(&key) {
            return Err(ClientError::ConditionalCheckFailed);
        }
        t.insert(key, item);
        Ok(())
    }

    async fn get_item(
        &self,
        table: &str,
        key: &Item,
        _consistent_read: bool,
    ) -> ClientResult<Option<Item>> {
        let tables = self.tables.read();
        let t = tables
            .get(table)
            .ok_or_else(|| ClientError::resource_not_found(table))?;
        let key = t.storage_key(key)?;
        Ok(t.items.get(&key).cloned())
    }

    async fn delete_item(
        &self,
        table: &str,
        key: &Item,
        condition: WriteCondition,
    ) -> ClientResult<()> {
        let mut tables = self.tables.write();
        let t = tables
            .get_mut(table)
            .ok_or_else(|| ClientError::resource_not_found(table))?;

        let key = t.storage_key(key)?;
        if condition == WriteCondition::KeyExists && !t.items.contains_key(&key) {
            return Err(ClientError::ConditionalCheckFailed);
        }
        t.remove(&key);
        Ok(())
    }

    async fn batch_put(&self, table: &str, items: Vec<Item>) -> ClientResult<()> {
        if items.is_empty() || items.len() > self.limits.max_batch_write {
            return Err(ClientError::validation(format!(
                "batch write must contain between 1 and {} items, got {}",
                self.limits.max_batch_write,
                items.len()
            )));
        }
        for item in &items {
            self.check_size(item)?;
        }

        let mut tables = self.tables.write();
        let t = tables
            .get_mut(table)
            .ok_or_else(|| ClientError::resource_not_found(table))?;

        // The whole batch is validated before anything is written.
        let mut seen = HashSet::with_capacity(items.len());
        let mut keyed = Vec::with_capacity(items.len());
        for item in items {
            let key = t.key_of(&item)?.to_canonical_cbor();
            if !seen.insert(key.clone()) {
                return Err(ClientError::validation(
                    "provided list of item keys contains duplicates",
                ));
            }
            keyed.push((key, item));
        }

        for (key, item) in keyed {
            t.insert(key, item);
        }
        Ok(())
    }

    async fn batch_get(
        &self,
        table: &str,
        keys: Vec<Item>,
        _consistent_read: bool,
    ) -> ClientResult<Vec<Item>> {
        if keys.is_empty() || keys.len() > self.limits.max_batch_get {
            return Err(ClientError::validation(format!(
                "batch get must contain between 1 and {} keys, got {}",
                self.limits.max_batch_get,
                keys.len()
            )));
        }

        let tables = self.tables.read();
        let t = tables
            .get(table)
            .ok_or_else(|| ClientError::resource_not_found(table))?;

        let mut seen = HashSet::with_capacity(keys.len());
        let mut found = Vec::new();
        for key in &keys {
            let key = t.storage_key(key)?;
            if !seen.insert(key.clone()) {
                return Err(ClientError::validation(
                    "provided list of item keys contains duplicates",
                ));
            }
            if let Some(item) = t.items.get(&key) {
                found.push(item.clone());
            }
        }
        Ok(found)
    }

    async fn scan(&self, request: ScanRequest) -> ClientResult<ScanOutput> {
        for condition in &request.conditions {
            condition.validate()?;
        }
        if request.limit == Some(0) {
            return Err(ClientError::validation("scan limit must be at least 1"));
        }

        let tables = self.tables.read();
        let t = tables
            .get(&request.table_name)
            .ok_or_else(|| ClientError::resource_not_found(&request.table_name))?;

        let start = match &request.exclusive_start_key {
            Some(key) => Bound::Excluded(t.storage_key(key)?),
            None => Bound::Unbounded,
        };
        let projection: Option<Vec<&str>> = request.projection.as_ref().map(|names| {
            names
                .iter()
                .map(String::as_str)
                .chain(t.key_attributes().map(|a| a.name.as_str()))
                .collect()
        });

        let page_items = request.limit.unwrap_or(usize::MAX);
        let mut output = ScanOutput::default();
        let mut page_bytes = 0;
        let mut last = None;
        let mut cursor = t.items.range((start, Bound::Unbounded)).peekable();

        while output.scanned_count < page_items && page_bytes < SCAN_PAGE_BYTES {
            let Some((_, item)) = cursor.next() else {
                break;
            };
            output.scanned_count += 1;
            page_bytes += item.encoded_len();
            last = Some(item);

            if matches_all(&request.conditions, item) {
                output.items.push(match &projection {
                    Some(names) => item.project(names.as_slice()),
                    None => item.clone(),
                });
            }
        }

        if cursor.peek().is_some() {
            if let Some(item) = last {
                output.last_evaluated_key = Some(t.key_of(item)?);
            }
        }
        Ok(output)
    }

    async fn list_tables(
        &self,
        exclusive_start_table_name: Option<String>,
        limit: Option<usize>,
    ) -> ClientResult<ListTablesOutput> {
        let limit = limit.unwrap_or(LIST_TABLES_PAGE_SIZE);
        if limit == 0 || limit > LIST_TABLES_PAGE_SIZE {
            return Err(ClientError::validation(format!(
                "list tables limit must be between 1 and {LIST_TABLES_PAGE_SIZE}"
            )));
        }

        let tables = self.tables.read();
        let start = match exclusive_start_table_name {
            Some(name) => Bound::Excluded(name),
            None => Bound::Unbounded,
        };
        let mut names = tables.range((start, Bound::Unbounded)).map(|(name, _)| name);

        let table_names: Vec<String> = names.by_ref().take(limit).cloned().collect();
        let last_evaluated_table_name = match names.next() {
            Some(_) => table_names.last().cloned(),
            None => None,
        };
        Ok(ListTablesOutput {
            table_names,
            last_evaluated_table_name,
        })
    }

    async fn create_table(&self, request: CreateTableRequest) -> ClientResult<CreateTableResponse> {
        let table = MemoryTable::create(request)?;
        let name = table.description.table_name.clone();

        let mut tables = self.tables.write();
        if tables.contains_key(&name) {
            return Err(ClientError::resource_in_use(name));
        }
        let table_description = table.describe();
        tables.insert(name.clone(), table);
        debug!(table = %name, "created in-memory table");

        Ok(CreateTableResponse { table_description })
    }

    async fn delete_table(&self, table: &str) -> ClientResult<DeleteTableResponse> {
        let removed = self
            .tables
            .write()
            .remove(table)
            .ok_or_else(|| ClientError::resource_not_found(table))?;
        debug!(table, items = removed.items.len(), "deleted in-memory table");

        Ok(DeleteTableResponse {
            table_description: TableDescription {
                table_status: TableStatus::Deleting,
                ..removed.describe()
            },
        })
    }

    async fn describe_table(&self, table: &str) -> ClientResult<DescribeTableResponse> {
        let tables = self.tables.read();
        let t = tables
            .get(table)
            .ok_or_else(|| ClientError::resource_not_found(table))?;
        Ok(DescribeTableResponse { table: t.describe() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ScanCondition;
    use crate::model::{AttributeDefinition, KeySchemaElement, ProvisionedThroughput};
    use tablestore_codec::Value;

    fn throughput() -> ProvisionedThroughput {
        ProvisionedThroughput {
            read_capacity_units: 5,
            write_capacity_units: 5,
        }
    }

    fn widgets_request() -> CreateTableRequest {
        CreateTableRequest {
            table_name: "Widgets".into(),
            key_schema: vec![KeySchemaElement::hash("Id")],
            attribute_definitions: vec![AttributeDefinition::new("Id", ScalarAttributeType::S)],
            provisioned_throughput: throughput(),
        }
    }

    async fn widgets_client(limits: ClientLimits) -> InMemoryClient {
        let client = InMemoryClient::with_limits(limits);
        client.create_table(widgets_request()).await.unwrap();
        client
    }

    fn widget(id: &str, color: &str) -> Item {
        Item::new().with("Id", id).with("Color", color)
    }

    fn key(id: &str) -> Item {
        Item::new().with("Id", id)
    }

    #[tokio::test]
    async fn put_then_get() {
        let client = widgets_client(ClientLimits::default()).await;
        client
            .put_item("Widgets", widget("w1", "red"), WriteCondition::Always)
            .await
            .unwrap();

        let found = client.get_item("Widgets", &key("w1"), true).await.unwrap();
        assert_eq!(found, Some(widget("w1", "red")));
        assert_eq!(client.get_item("Widgets", &key("w2"), true).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_table_is_resource_not_found() {
        let client = InMemoryClient::new();
        let err = client.get_item("Nope", &key("w1"), true).await.unwrap_err();
        assert!(matches!(err, ClientError::ResourceNotFound { .. }));
    }

    #[tokio::test]
    async fn key_type_and_presence_are_checked() {
        let client = widgets_client(ClientLimits::default()).await;

        let wrong_type = Item::new().with("Id", 7i64);
        let err = client
            .put_item("Widgets", wrong_type, WriteCondition::Always)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));

        let no_key = Item::new().with("Color", "red");
        assert!(client
            .put_item("Widgets", no_key, WriteCondition::Always)
            .await
            .is_err());

        // Keys must not carry non-key attributes.
        assert!(client
            .get_item("Widgets", &widget("w1", "red"), true)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn conditional_writes() {
        let client = widgets_client(ClientLimits::default()).await;

        let err = client
            .put_item("Widgets", widget("w1", "red"), WriteCondition::KeyExists)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ConditionalCheckFailed));
        assert_eq!(client.item_count("Widgets"), Some(0));

        client
            .put_item("Widgets", widget("w1", "red"), WriteCondition::Always)
            .await
            .unwrap();
        client
            .put_item("Widgets", widget("w1", "blue"), WriteCondition::KeyExists)
            .await
            .unwrap();

        client
            .delete_item("Widgets", &key("w1"), WriteCondition::KeyExists)
            .await
            .unwrap();
        let err = client
            .delete_item("Widgets", &key("w1"), WriteCondition::KeyExists)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ConditionalCheckFailed));

        // Unconditional delete of an absent key is fine.
        client
            .delete_item("Widgets", &key("w1"), WriteCondition::Always)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn batch_limits_are_enforced() {
        let client = widgets_client(ClientLimits::default().max_batch_write(2).max_batch_get(2)).await;

        let three = vec![widget("a", "r"), widget("b", "g"), widget("c", "b")];
        let err = client.batch_put("Widgets", three).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));
        assert_eq!(client.item_count("Widgets"), Some(0));

        client
            .batch_put("Widgets", vec![widget("a", "r"), widget("b", "g")])
            .await
            .unwrap();

        let err = client
            .batch_get("Widgets", vec![key("a"), key("b"), key("c")], true)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));
    }

    #[tokio::test]
    async fn batch_rejects_duplicate_keys() {
        let client = widgets_client(ClientLimits::default()).await;

        let err = client
            .batch_put("Widgets", vec![widget("a", "r"), widget("a", "g")])
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));

        let err = client
            .batch_get("Widgets", vec![key("a"), key("a")], true)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));
    }

    #[tokio::test]
    async fn batch_get_omits_missing_keys() {
        let client = widgets_client(ClientLimits::default()).await;
        client
            .batch_put("Widgets", vec![widget("a", "r"), widget("b", "g")])
            .await
            .unwrap();

        let found = client
            .batch_get("Widgets", vec![key("a"), key("zz"), key("b")], true)
            .await
            .unwrap();
        assert_eq!(found, vec![widget("a", "r"), widget("b", "g")]);
    }

    #[tokio::test]
    async fn oversized_items_are_rejected() {
        let client = widgets_client(ClientLimits::default().max_item_size(64)).await;
        let big = widget("w1", &"x".repeat(100));

        let err = client
            .put_item("Widgets", big, WriteCondition::Always)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ItemTooLarge { max: 64, .. }));
    }

    #[tokio::test]
    async fn scan_filters_and_paginates() {
        let client = widgets_client(ClientLimits::default()).await;
        for i in 0..5 {
            let color = if i % 2 == 0 { "red" } else { "blue" };
            client
                .put_item("Widgets", widget(&format!("w{i}"), color), WriteCondition::Always)
                .await
                .unwrap();
        }

        let mut request = ScanRequest::new("Widgets");
        request.conditions = vec![ScanCondition::eq("Color", "red")];
        request.limit = Some(2);

        let mut reds = Vec::new();
        let mut pages = 0;
        loop {
            let page = client.scan(request.clone()).await.unwrap();
            pages += 1;
            assert!(page.scanned_count <= 2);
            reds.extend(page.items);
            match page.last_evaluated_key {
                Some(k) => request.exclusive_start_key = Some(k),
                None => break,
            }
        }

        assert_eq!(pages, 3);
        assert_eq!(reds.len(), 3);
        assert!(reds.iter().all(|i| i.get("Color") == Some(&Value::from("red"))));
    }

    #[tokio::test]
    async fn scan_projection_keeps_key() {
        let client = widgets_client(ClientLimits::default()).await;
        client
            .put_item(
                "Widgets",
                widget("w1", "red").with("Size", 3i64),
                WriteCondition::Always,
            )
            .await
            .unwrap();

        let mut request = ScanRequest::new("Widgets");
        request.projection = Some(vec!["Size".into()]);
        let page = client.scan(request).await.unwrap();

        assert_eq!(page.items, vec![Item::new().with("Id", "w1").with("Size", 3i64)]);
    }

    #[tokio::test]
    async fn scan_rejects_bad_conditions() {
        let client = widgets_client(ClientLimits::default()).await;
        let mut request = ScanRequest::new("Widgets");
        request.conditions = vec![ScanCondition::new(
            "Color",
            crate::ScanOperator::Equal,
            vec![],
        )];
        assert!(client.scan(request).await.is_err());
    }

    #[tokio::test]
    async fn table_admin_lifecycle() {
        let client = InMemoryClient::new();

        let created = client.create_table(widgets_request()).await.unwrap();
        assert_eq!(created.table_description.table_status, TableStatus::Active);
        assert_eq!(created.table_description.hash_key_name(), Some("Id"));

        let err = client.create_table(widgets_request()).await.unwrap_err();
        assert!(matches!(err, ClientError::ResourceInUse { .. }));

        client
            .put_item("Widgets", widget("w1", "red"), WriteCondition::Always)
            .await
            .unwrap();
        let described = client.describe_table("Widgets").await.unwrap();
        assert_eq!(described.table.item_count, 1);
        assert!(described.table.table_size_bytes > 0);

        let deleted = client.delete_table("Widgets").await.unwrap();
        assert_eq!(deleted.table_description.table_status, TableStatus::Deleting);
        assert!(matches!(
            client.describe_table("Widgets").await,
            Err(ClientError::ResourceNotFound { .. })
        ));
        assert!(client.delete_table("Widgets").await.is_err());
    }

    #[tokio::test]
    async fn create_table_validates_schema() {
        let client = InMemoryClient::new();

        let mut missing_definition = widgets_request();
        missing_definition.attribute_definitions.clear();
        assert!(client.create_table(missing_definition).await.is_err());

        let mut no_hash = widgets_request();
        no_hash.key_schema = vec![KeySchemaElement::range("Id")];
        assert!(client.create_table(no_hash).await.is_err());

        let mut extra_definition = widgets_request();
        extra_definition
            .attribute_definitions
            .push(AttributeDefinition::new("Color", ScalarAttributeType::S));
        assert!(client.create_table(extra_definition).await.is_err());

        let mut bad_name = widgets_request();
        bad_name.table_name = "a b".into();
        assert!(client.create_table(bad_name).await.is_err());
    }

    #[tokio::test]
    async fn composite_keys() {
        let client = InMemoryClient::new();
        client
            .create_table(CreateTableRequest {
                table_name: "Events".into(),
                key_schema: vec![KeySchemaElement::range("Seq"), KeySchemaElement::hash("Stream")],
                attribute_definitions: vec![
                    AttributeDefinition::new("Stream", ScalarAttributeType::S),
                    AttributeDefinition::new("Seq", ScalarAttributeType::N),
                ],
                provisioned_throughput: throughput(),
            })
            .await
            .unwrap();

        let event = |seq: i64| Item::new().with("Stream", "s1").with("Seq", seq);
        client.put_item("Events", event(1), WriteCondition::Always).await.unwrap();
        client.put_item("Events", event(2), WriteCondition::Always).await.unwrap();
        assert_eq!(client.item_count("Events"), Some(2));

        let found = client.get_item("Events", &event(2), true).await.unwrap();
        assert_eq!(found, Some(event(2)));

        // Hash element is listed first regardless of request order.
        let described = client.describe_table("Events").await.unwrap();
        assert_eq!(described.table.key_schema[0].key_type, KeyType::Hash);
    }

    #[tokio::test]
    async fn list_tables_paginates() {
        let client = InMemoryClient::new();
        for name in ["Alpha", "Beta", "Gamma"] {
            let mut request = widgets_request();
            request.table_name = name.into();
            client.create_table(request).await.unwrap();
        }

        let first = client.list_tables(None, Some(2)).await.unwrap();
        assert_eq!(first.table_names, vec!["Alpha", "Beta"]);
        assert_eq!(first.last_evaluated_table_name.as_deref(), Some("Beta"));

        let second = client
            .list_tables(first.last_evaluated_table_name, Some(2))
            .await
            .unwrap();
        assert_eq!(second.table_names, vec!["Gamma"]);
        assert_eq!(second.last_evaluated_table_name, None);

        assert!(client.list_tables(None, Some(0)).await.is_err());
    }
}
