//! Property-based test generators using proptest.
//!
//! Provides strategies for widgets, attribute values and operation
//! sequences, plus a helper to drive async stores from a property.

use crate::fixtures::Widget;
use proptest::prelude::*;
use std::future::Future;
use tablestore_codec::Value;

/// Strategy for widget ids drawn from a small pool, so operations collide.
pub fn widget_id_strategy() -> impl Strategy<Value = String> {
    (0u8..12).prop_map(|n| format!("w{n}"))
}

/// Strategy for color names.
pub fn color_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["red", "green", "blue", "black"]).prop_map(str::to_string)
}

/// Strategy for widgets.
pub fn widget_strategy() -> impl Strategy<Value = Widget> {
    (
        widget_id_strategy(),
        color_strategy(),
        -100i64..100,
        prop::collection::vec("[a-z]{1,6}", 0..3),
    )
        .prop_map(|(id, color, size, tags)| Widget {
            id,
            color,
            size,
            tags,
        })
}

/// Strategy for attribute values, nested at most two levels.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::Text),
    ];
    leaf.prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4).prop_map(Value::Map),
        ]
    })
}

/// An operation against a widgets store.
#[derive(Debug, Clone)]
pub enum WidgetOperation {
    /// `add_item`
    Add(Widget),
    /// `modify_item`
    Modify(Widget),
    /// `delete_by_key`
    Delete(String),
    /// `get_item`
    Get(String),
    /// `batch_store`
    BatchStore(Vec<Widget>),
}

/// Strategy for one widget operation.
pub fn widget_operation_strategy() -> impl Strategy<Value = WidgetOperation> {
    prop_oneof![
        3 => widget_strategy().prop_map(WidgetOperation::Add),
        2 => widget_strategy().prop_map(WidgetOperation::Modify),
        2 => widget_id_strategy().prop_map(WidgetOperation::Delete),
        2 => widget_id_strategy().prop_map(WidgetOperation::Get),
        1 => prop::collection::vec(widget_strategy(), 0..8).prop_map(WidgetOperation::BatchStore),
    ]
}

/// Strategy for a sequence of widget operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<WidgetOperation>> {
    prop::collection::vec(widget_operation_strategy(), min_ops..max_ops)
}

/// Runs `future` to completion on a fresh current-thread runtime.
///
/// Property bodies are synchronous; use this to call async stores from
/// them.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
        .block_on(future)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
