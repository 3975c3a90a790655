use std::collections::HashMap;
use std::hash::Hash;

/// Tally occurrences of each key.
pub fn count_by<K, I>(keys: I) -> HashMap<K, usize>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts = HashMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// HAVING-style post-filter: keep items whose related-row count is at least
/// `threshold`. Items missing from `counts` have zero related rows.
pub fn retain_min_count<T, F>(
    items: Vec<T>,
    counts: &HashMap<i32, usize>,
    threshold: usize,
    id_of: F,
) -> Vec<T>
where
    F: Fn(&T) -> i32,
{
    items
        .into_iter()
        .filter(|item| counts.get(&id_of(item)).copied().unwrap_or(0) >= threshold)
        .collect()
}

/// Order items by their count, highest first, dropping items with no related
/// rows, and truncate to `limit`. Equal counts keep their input order.
pub fn rank_by_count<T, F>(
    items: Vec<T>,
    counts: &HashMap<i32, usize>,
    limit: usize,
    id_of: F,
) -> Vec<(T, usize)>
where
    F: Fn(&T) -> i32,
{
    let mut ranked: Vec<(T, usize)> = items
        .into_iter()
        .filter_map(|item| {
            let count = counts.get(&id_of(&item)).copied().unwrap_or(0);
            (count > 0).then_some((item, count))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
