//! Widgets demo
//!
//! Walks a widgets table on an in-memory client through table creation,
//! every typed store operation, and table deletion.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tablestore_client::{ClientLimits, InMemoryClient, ScalarAttributeType, ScanCondition};
use tablestore_core::{
    CreateTableOutcome, DataStore, DeleteTableOutcome, PersistentItem, ScanOptions, StoreConfig,
    TableDefinition, TableStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const COLORS: [&str; 3] = ["red", "green", "blue"];

/// Walk a widgets table through every store operation.
#[derive(Parser)]
#[command(name = "widgets-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of widgets to batch store
    #[arg(short, long, default_value = "40")]
    count: usize,

    /// Maximum puts per batch request
    #[arg(short, long, default_value = "25")]
    batch_limit: usize,

    /// Print search results as JSON lines
    #[arg(short, long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Widget {
    id: String,
    color: String,
    size: i64,
}

impl Widget {
    fn new(color: &str, size: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            color: color.to_string(),
            size,
        }
    }
}

impl PersistentItem for Widget {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let limits = ClientLimits::default().max_batch_write(cli.batch_limit.max(1));
    let client = Arc::new(InMemoryClient::with_limits(limits));
    let tables = TableStore::new(Arc::clone(&client));

    let definition = TableDefinition::new("Widgets", "Id", ScalarAttributeType::S);
    for _ in 0..2 {
        match tables.create_table(&definition).await? {
            CreateTableOutcome::Created(response) => println!(
                "created table {} ({:?})",
                response.table_description.table_name, response.table_description.table_status
            ),
            CreateTableOutcome::AlreadyExists => println!("table Widgets already exists"),
        }
    }

    let widgets: DataStore<Widget, _> =
        DataStore::new(Arc::clone(&client), StoreConfig::new("Widgets"));

    let batch: Vec<Widget> = (0..cli.count)
        .map(|i| Widget::new(COLORS[i % COLORS.len()], i64::try_from(i).unwrap_or(i64::MAX)))
        .collect();
    widgets.batch_store(&batch).await?;
    info!(count = batch.len(), "stored widgets");

    let mut special = Widget::new("red", 99);
    widgets.add_item(&special).await?;
    let fetched = widgets.get_item(&special.id).await?;
    println!("fetched {:?}", fetched);

    special.color = "blue".into();
    widgets.modify_item(&special).await?;

    let keys: Vec<String> = batch.iter().take(3).map(|w| w.id.clone()).collect();
    println!("batch get found {} of {}", widgets.batch_get(&keys).await?.len(), keys.len());

    let red = widgets
        .search_items(
            vec![ScanCondition::eq("Color", "red")],
            &ScanOptions::new().page_size(10),
        )
        .await?;
    if cli.json {
        for widget in &red {
            println!("{}", serde_json::to_string(widget)?);
        }
    } else {
        println!("{} red widgets", red.len());
    }

    println!("{} widgets in total", widgets.get_all().await?.len());

    widgets.delete_item(&special).await?;
    match widgets.modify_item(&special).await {
        Err(e) if e.is_not_found() => println!("modify after delete: {e}"),
        other => other?,
    }

    let described = tables.describe_table("Widgets").await?;
    println!(
        "table holds {} items, {} bytes",
        described.table.item_count, described.table.table_size_bytes
    );

    for _ in 0..2 {
        match tables.delete_table("Widgets").await? {
            DeleteTableOutcome::Deleted(_) => println!("deleted table Widgets"),
            DeleteTableOutcome::NotPresent => println!("table Widgets not present"),
        }
    }

    Ok(())
}
