//! Division of the keyspace index range across worker threads.

use std::ops::Range;

/// Splits `[0, total)` into `thread_count` contiguous ranges and returns the
/// one owned by `thread_index`.
///
/// Every range holds `total / thread_count` indices (truncating division);
/// the last range absorbs the remainder. Taken together the ranges are
/// gapless and disjoint, so the union over all workers covers the keyspace
/// exactly once.
pub fn partition(total: u32, thread_count: usize, thread_index: usize) -> Range<u32> {
    assert!(thread_count >= 1, "thread_count must be at least 1");
    assert!(
        thread_index < thread_count,
        "thread_index {thread_index} out of range for {thread_count} threads"
    );

    let range_size = total / thread_count as u32;
    let start = thread_index as u32 * range_size;
    let end = if thread_index == thread_count - 1 {
        total
    } else {
        start + range_size
    };

    start..end
}
