use std::collections::HashMap;
use std::hash::Hash;

// ---------------------------------------------------------------------------
// Group-by reduction
// ---------------------------------------------------------------------------

/// Statistic computed per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Arithmetic mean of the value column.
    Mean,
    /// Number of rows; the value column is ignored.
    Count,
}

/// One output row per distinct key.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow<K> {
    pub key: K,
    pub value: f64,
    /// Rows that fell into this group.
    pub members: usize,
}

/// Group `rows` by `key` and reduce `value` per group.
///
/// Groups are emitted in the order their key first appears in `rows`, so the
/// output is deterministic for a fixed input. Every group has at least one
/// member, which keeps [`Reducer::Mean`] well defined.
pub fn group_reduce<R, K, FK, FV>(rows: &[R], key: FK, value: FV, reducer: Reducer) -> Vec<AggregateRow<K>>
where
    K: Eq + Hash + Clone,
    FK: Fn(&R) -> K,
    FV: Fn(&R) -> f64,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    // (key, sum, members)
    let mut groups: Vec<(K, f64, usize)> = Vec::new();

    for row in rows {
        let k = key(row);
        let slot = match slots.get(&k) {
            Some(&slot) => slot,
            None => {
                slots.insert(k.clone(), groups.len());
                groups.push((k, 0.0, 0));
                groups.len() - 1
            }
        };
        let group = &mut groups[slot];
        if reducer == Reducer::Mean {
            group.1 += value(row);
        }
        group.2 += 1;
    }

    groups
        .into_iter()
        .map(|(key, sum, members)| AggregateRow {
            key,
            value: match reducer {
                Reducer::Mean => sum / members as f64,
                Reducer::Count => members as f64,
            },
            members,
        })
        .collect()
}

/// Sort aggregate rows by key, for charts with an ordered axis.
pub fn sorted_by_key<K: Ord>(mut rows: Vec<AggregateRow<K>>) -> Vec<AggregateRow<K>> {
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    rows
}
