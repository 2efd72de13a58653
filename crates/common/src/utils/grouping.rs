//! Ordered group-by over flat sequences.
//!
//! SQL joins return one row per (parent, child) pair. `group_ordered` folds
//! such rows back into parents with their children, keeping the order in
//! which each parent was first seen and the order of children within it.

use std::collections::HashMap;
use std::hash::Hash;

/// Fold `items` into `(key, group)` pairs.
///
/// Groups appear in first-seen key order; members keep their input order.
/// Keys do not need to be contiguous in the input.
pub fn group_ordered<I, T, K, F>(items: I, mut key_of: F) -> Vec<(K, Vec<T>)>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let key = key_of(&item);
        match index.get(&key) {
            Some(&pos) => groups[pos].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }
    groups
}

/// Fold rows into parents, each with zero or more children.
///
/// `split` turns a row into its parent part and an optional child part
/// (left joins yield a parent row with no child). The parent of the first
/// row seen for a key is kept.
pub fn fold_parents<R, K, P, C, FK, FS>(rows: Vec<R>, key_of: FK, mut split: FS) -> Vec<(P, Vec<C>)>
where
    K: Eq + Hash + Clone,
    FK: FnMut(&R) -> K,
    FS: FnMut(R) -> (P, Option<C>),
{
    group_ordered(rows, key_of)
        .into_iter()
        .filter_map(|(_, members)| {
            let mut parent = None;
            let mut children = Vec::new();
            for row in members {
                let (p, child) = split(row);
                if parent.is_none() {
                    parent = Some(p);
                }
                children.extend(child);
            }
            parent.map(|p| (p, children))
        })
        .collect()
}
