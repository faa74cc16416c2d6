//! Deterministic subset enumeration for topic sets.

use std::collections::BTreeSet;

use topics_types::{ItemSet, TopicId};

/// Enumerate every subset of `topics` with size in `[min_size, max_size]`.
///
/// Order is deterministic: increasing size, then lexicographic over the
/// sorted topic ids. For a set of size n and the default bounds this yields
/// `2^n - n - 1` combinations, so callers must bound n before calling (the
/// miner does this with its `max_topic_set_size` guard).
pub fn combinations_of(
    topics: &BTreeSet<TopicId>,
    min_size: usize,
    max_size: usize,
) -> Vec<ItemSet> {
    let items: Vec<&TopicId> = topics.iter().collect();
    let upper = max_size.min(items.len());
    let lower = min_size.max(1);

    let mut out = Vec::new();
    for size in lower..=upper {
        let mut indices: Vec<usize> = (0..size).collect();
        loop {
            out.push(ItemSet::new(indices.iter().map(|&i| items[i].clone())));
            if !next_combination(&mut indices, items.len()) {
                break;
            }
        }
    }
    out
}

/// Advance `indices` to the next lexicographic k-combination of `0..n`.
/// Returns false when the last combination has been emitted.
fn next_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] < n - k + i {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}
