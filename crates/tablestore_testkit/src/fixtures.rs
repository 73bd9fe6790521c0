//! Test fixtures and store helpers.
//!
//! Provides sample entities, their table definitions, and a ready-made
//! store over an in-memory client.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tablestore_client::{ClientLimits, InMemoryClient, ScalarAttributeType, StoreClient};
use tablestore_core::{DataStore, PersistentItem, StoreConfig, TableDefinition, TableStore};

/// Name of the widgets table.
pub const WIDGETS_TABLE: &str = "Widgets";

/// Name of the gauges table.
pub const GAUGES_TABLE: &str = "Gauges";

/// A sample entity keyed by a string `Id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Widget {
    /// Unique identifier.
    pub id: String,
    /// Color name.
    pub color: String,
    /// Size in arbitrary units.
    #[serde(default)]
    pub size: i64,
    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Widget {
    /// Creates a widget of size 1 with no tags.
    pub fn new(id: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            size: 1,
            tags: Vec::new(),
        }
    }

    /// Creates a widget with a freshly generated id.
    pub fn generated(color: impl Into<String>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), color)
    }

    /// Sets the size.
    #[must_use]
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

impl PersistentItem for Widget {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

/// A sample entity keyed by an integer `GaugeId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauge {
    /// Unique identifier.
    #[serde(rename = "GaugeId")]
    pub gauge_id: i64,
    /// Last reading.
    #[serde(rename = "Reading")]
    pub reading: i64,
}

impl PersistentItem for Gauge {
    type Key = i64;
    const KEY_ATTRIBUTE: &'static str = "GaugeId";

    fn key(&self) -> i64 {
        self.gauge_id
    }
}

/// Definition of the widgets table: hash key `Id` of type `S`.
pub fn widgets_definition() -> TableDefinition {
    TableDefinition::new(WIDGETS_TABLE, "Id", ScalarAttributeType::S)
}

/// Definition of the gauges table: hash key `GaugeId` of type `N`.
pub fn gauges_definition() -> TableDefinition {
    TableDefinition::new(GAUGES_TABLE, "GaugeId", ScalarAttributeType::N)
}

/// A widgets store over an in-memory client, with the table created.
pub struct TestStore<C: StoreClient = InMemoryClient> {
    /// Shared client.
    pub client: Arc<C>,
    /// Table manager over the same client.
    pub tables: TableStore<C>,
    /// Typed widgets store.
    pub widgets: DataStore<Widget, C>,
}

impl TestStore<InMemoryClient> {
    /// Creates a store with default limits and configuration.
    pub async fn new() -> Self {
        Self::with_limits(ClientLimits::default()).await
    }

    /// Creates a store whose client enforces `limits`.
    pub async fn with_limits(limits: ClientLimits) -> Self {
        Self::over(InMemoryClient::with_limits(limits), StoreConfig::new(WIDGETS_TABLE)).await
    }

    /// Creates a store with a custom configuration.
    pub async fn with_config(config: StoreConfig) -> Self {
        Self::over(InMemoryClient::new(), config).await
    }
}

impl<C: StoreClient> TestStore<C> {
    /// Creates the widgets table on `client` and wraps it in a store.
    pub async fn over(client: C, config: StoreConfig) -> Self {
        let client = Arc::new(client);
        let tables = TableStore::new(Arc::clone(&client));
        tables
            .create_table(&widgets_definition())
            .await
            .expect("Failed to create widgets table");
        let widgets = DataStore::new(Arc::clone(&client), config);
        Self {
            client,
            tables,
            widgets,
        }
    }

    /// Creates a gauges store on the same client, creating its table.
    pub async fn gauges(&self) -> DataStore<Gauge, C> {
        self.tables
            .create_table(&gauges_definition())
            .await
            .expect("Failed to create gauges table");
        DataStore::new(Arc::clone(&self.client), StoreConfig::new(GAUGES_TABLE))
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Colors assigned round-robin by [`populated_store`].
    pub const COLORS: [&str; 3] = ["red", "green", "blue"];

    /// Creates a store holding `count` widgets `w0..w{count-1}`, colored
    /// round-robin from [`COLORS`] and sized by index.
    pub async fn populated_store(count: usize) -> TestStore {
        let store = TestStore::new().await;
        let widgets: Vec<Widget> = (0..count)
            .map(|i| {
                Widget::new(format!("w{i}"), COLORS[i % COLORS.len()])
                    .with_size(i64::try_from(i).unwrap_or(i64::MAX))
            })
            .collect();
        store
            .widgets
            .batch_store(&widgets)
            .await
            .expect("Failed to populate widgets");
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_has_widgets_table() {
        let store = TestStore::new().await;
        assert!(store.tables.table_exists(WIDGETS_TABLE).await.unwrap());
        assert!(store.widgets.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn populated_scenario() {
        let store = scenarios::populated_store(30).await;
        assert_eq!(store.widgets.get_all().await.unwrap().len(), 30);
        assert_eq!(store.client.item_count(WIDGETS_TABLE), Some(30));
    }

    #[tokio::test]
    async fn gauges_share_the_client() {
        let store = TestStore::new().await;
        let gauges = store.gauges().await;
        gauges
            .add_item(&Gauge {
                gauge_id: 0,
                reading: 12,
            })
            .await
            .unwrap();
        assert_eq!(store.tables.list_tables().await.unwrap().len(), 2);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(Widget::generated("red").id, Widget::generated("red").id);
    }
}
