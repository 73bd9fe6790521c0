//! Table lifecycle management.

mod definition;
mod manager;

pub use definition::TableDefinition;
pub use manager::{CreateTableOutcome, DeleteTableOutcome, TableStore};
