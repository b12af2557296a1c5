//! Shared assertions for the contract tests in `tests/`.

use tw_core::TrendItem;

/// Checks the batch invariants every source must uphold for a request of
/// `limit` items: no more than `limit`, ranks exactly 1..=len, one timestamp.
pub fn assert_batch_contract(items: &[TrendItem], limit: usize) {
    assert!(items.len() <= limit, "{} items for limit {limit}", items.len());
    let ranks: Vec<i64> = items.iter().map(|t| t.rank).collect();
    let expected: Vec<i64> = (1..=items.len() as i64).collect();
    assert_eq!(ranks, expected, "ranks must be contiguous from 1");
    if let Some(first) = items.first() {
        assert!(
            items.iter().all(|t| t.fetched_at == first.fetched_at),
            "fetched_at must be shared across the batch"
        );
        assert!(items.iter().all(|t| t.platform == first.platform));
    }
}

/// Compares the portable fields of two records, ignoring `fetched_at`.
pub fn same_fields(a: &TrendItem, b: &TrendItem) -> bool {
    a.platform == b.platform && a.title == b.title && a.url == b.url && a.score == b.score && a.rank == b.rank
}
