//! Percentage specs and weighted index pools.
//!
//! Proportional selection is done with integer uniform draws from a flat
//! expanded pool, so outcome `i` appears `weight[i]` times and no floating
//! point bias can creep in.

use crate::conv::conv_int;

/// Parse a percentage spec, stripping a trailing `%` and falling back on
/// malformed input. The value is clamped to `[0, 100]`.
#[must_use]
pub fn parse_chance(spec: &str, default: i64) -> i64 {
    conv_int(spec.trim().trim_end_matches('%'), default).clamp(0, 100)
}

/// Expand a comma-separated weight spec into a flat index pool.
///
/// Missing entries default to weight 1, as do non-numeric entries; negative
/// weights count as 0. An empty spec gives every outcome weight 1. If the
/// spec zeroes out every outcome the pool degrades to uniform rather than
/// leaving nothing to draw from.
#[must_use]
pub fn weighted_pool(count: usize, spec: &str) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    if spec.trim().is_empty() {
        return (0..count).collect();
    }

    let mut weights: Vec<i64> = spec
        .split(',')
        .map(|part| conv_int(part, 1).max(0))
        .collect();
    weights.resize(count, 1);
    weights.truncate(count);

    let pool: Vec<usize> = weights
        .iter()
        .enumerate()
        .flat_map(|(i, &w)| std::iter::repeat(i).take(w as usize))
        .collect();
    if pool.is_empty() {
        (0..count).collect()
    } else {
        pool
    }
}
