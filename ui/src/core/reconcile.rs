//! Keyed diff of two ordered sequences.
//!
//! The chart keeps one visual node per bar name across renders; this module
//! tells it which nodes to drop, which to create and which existing node
//! moves to which slot.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<K> {
    /// `key` at old position `index` has no counterpart any more.
    Remove { key: K, index: usize },
    /// `key` is new; it goes to slot `index`.
    Create { key: K, index: usize },
    /// `key` existed at `from` and now lives at `to`.
    Update { key: K, from: usize, to: usize },
}

/// Diff `old` against `new`. Removals come first, then one `Create` or
/// `Update` per entry of `new` in order. A key repeated in `new` reuses the
/// old node once; later repeats are created.
pub fn diff_keyed<K>(old: &[K], new: &[K]) -> Vec<Patch<K>>
where
    K: Eq + Hash + Clone,
{
    let mut old_index: HashMap<&K, usize> = HashMap::with_capacity(old.len());
    for (index, key) in old.iter().enumerate() {
        old_index.entry(key).or_insert(index);
    }
    let wanted: HashSet<&K> = new.iter().collect();

    let mut patches: Vec<Patch<K>> = old
        .iter()
        .enumerate()
        .filter(|(index, key)| !wanted.contains(key) || old_index.get(key) != Some(index))
        .map(|(index, key)| Patch::Remove {
            key: key.clone(),
            index,
        })
        .collect();

    let mut claimed: HashSet<&K> = HashSet::with_capacity(new.len());
    for (to, key) in new.iter().enumerate() {
        match old_index.get(key) {
            Some(&from) if claimed.insert(key) => patches.push(Patch::Update {
                key: key.clone(),
                from,
                to,
            }),
            _ => patches.push(Patch::Create {
                key: key.clone(),
                index: to,
            }),
        }
    }

    patches
}
