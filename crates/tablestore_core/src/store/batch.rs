//! Batch partitioning.

use std::collections::HashMap;
use tablestore_codec::Item;

/// Drops entries whose key repeats an earlier one. The surviving entry keeps
/// the position of the first occurrence and the item of the last.
pub(crate) fn dedupe_by_key(entries: impl IntoIterator<Item = (Vec<u8>, Item)>) -> Vec<Item> {
    let mut positions: HashMap<Vec<u8>, usize> = HashMap::new();
    let mut items: Vec<Item> = Vec::new();

    for (key, item) in entries {
        match positions.get(&key) {
            Some(&pos) => items[pos] = item,
            None => {
                positions.insert(key, items.len());
                items.push(item);
            }
        }
    }
    items
}

/// Splits `items` into consecutive chunks of at most `size`.
pub(crate) fn into_chunks<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    debug_assert!(size > 0);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(size));
    let mut rest = items.into_iter().peekable();
    while rest.peek().is_some() {
        chunks.push(rest.by_ref().take(size).collect());
    }
    chunks
}
