//! Property tests: typed store behavior against a map model.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use tablestore_client::{ClientLimits, InMemoryClient, ScanCondition};
use tablestore_core::{ExistenceCheck, ScanOptions, StoreConfig};
use tablestore_testkit::prelude::*;

fn sorted(mut widgets: Vec<Widget>) -> Vec<Widget> {
    widgets.sort_by(|a, b| a.id.cmp(&b.id));
    widgets
}

async fn apply_and_check(
    store: &TestStore,
    model: &mut BTreeMap<String, Widget>,
    op: WidgetOperation,
) -> Result<(), TestCaseError> {
    match op {
        WidgetOperation::Add(widget) => {
            store.widgets.add_item(&widget).await.unwrap();
            model.insert(widget.id.clone(), widget);
        }
        WidgetOperation::Modify(widget) => {
            let result = store.widgets.modify_item(&widget).await;
            if model.contains_key(&widget.id) {
                prop_assert!(result.is_ok());
                model.insert(widget.id.clone(), widget);
            } else {
                prop_assert!(result.unwrap_err().is_not_found());
            }
        }
        WidgetOperation::Delete(id) => {
            let result = store.widgets.delete_by_key(&id).await;
            if model.remove(&id).is_some() {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.unwrap_err().is_not_found());
            }
        }
        WidgetOperation::Get(id) => {
            let found = store.widgets.get_item(&id).await.unwrap();
            prop_assert_eq!(found.as_ref(), model.get(&id));
        }
        WidgetOperation::BatchStore(widgets) => {
            store.widgets.batch_store(&widgets).await.unwrap();
            for widget in widgets {
                model.insert(widget.id.clone(), widget);
            }
        }
    }
    Ok(())
}

async fn run_against_model(
    ops: Vec<WidgetOperation>,
    check: ExistenceCheck,
) -> Result<(), TestCaseError> {
    let store = TestStore::over(
        InMemoryClient::with_limits(ClientLimits::default().max_batch_write(3)),
        StoreConfig::new(WIDGETS_TABLE).existence_check(check),
    )
    .await;
    let mut model = BTreeMap::new();

    for op in ops {
        apply_and_check(&store, &mut model, op).await?;
    }

    let all = sorted(store.widgets.get_all().await.unwrap());
    prop_assert_eq!(all, model.into_values().collect::<Vec<_>>());
    Ok(())
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn store_matches_map_model(
        ops in operation_sequence_strategy(1, 40),
        read_first in any::<bool>(),
    ) {
        let check = if read_first {
            ExistenceCheck::ReadThenWrite
        } else {
            ExistenceCheck::Conditional
        };
        block_on(run_against_model(ops, check))?;
    }

    #[test]
    fn batch_get_returns_existing_subset(
        stored in prop::collection::vec(widget_strategy(), 0..20),
        requested in prop::collection::vec(widget_id_strategy(), 0..30),
    ) {
        block_on(async {
            let store = TestStore::with_limits(ClientLimits::default().max_batch_get(4)).await;
            store.widgets.batch_store(&stored).await.unwrap();

            let found = sorted(store.widgets.batch_get(&requested).await.unwrap());

            let wanted: BTreeSet<&String> = requested.iter().collect();
            let mut model = BTreeMap::new();
            for widget in &stored {
                model.insert(widget.id.clone(), widget.clone());
            }
            let expected: Vec<Widget> = model
                .into_iter()
                .filter(|(id, _)| wanted.contains(id))
                .map(|(_, widget)| widget)
                .collect();

            prop_assert_eq!(found, expected);
            Ok(())
        })?;
    }

    #[test]
    fn search_matches_filter(
        stored in prop::collection::vec(widget_strategy(), 0..25),
        color in color_strategy(),
        page_size in 1usize..10,
    ) {
        block_on(async {
            let store = TestStore::new().await;
            store.widgets.batch_store(&stored).await.unwrap();

            let found = sorted(
                store
                    .widgets
                    .search_items(
                        vec![ScanCondition::eq("Color", color.as_str())],
                        &ScanOptions::new().page_size(page_size),
                    )
                    .await
                    .unwrap(),
            );

            let mut model = BTreeMap::new();
            for widget in stored {
                model.insert(widget.id.clone(), widget);
            }
            let expected: Vec<Widget> = model
                .into_values()
                .filter(|w| w.color == color)
                .collect();

            prop_assert_eq!(found, expected);
            Ok(())
        })?;
    }
}
