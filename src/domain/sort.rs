//! In-place quicksort used to order the identifier universe.
//!
//! The pivot is the midpoint element of each range and partitioning follows
//! the two-pointer (Hoare) scheme. The sort is unstable. Average cost is
//! O(n log n); the worst case is O(n²) comparisons with recursion depth O(n),
//! which is acceptable for catalog-sized inputs.

/// Sorts the whole slice into non-decreasing order.
pub fn sort<T: Ord + Clone>(items: &mut [T]) {
    if let Some(end) = items.len().checked_sub(1) {
        quick_sort(items, 0, end);
    }
}

/// Sorts `items[begin..=end]` into non-decreasing order, in place.
///
/// Both bounds are inclusive. A slice of length zero or one, or a range with
/// `begin >= end`, is left untouched.
///
/// # Panics
///
/// Panics if `end` is out of bounds for a range that needs sorting.
pub fn quick_sort<T: Ord + Clone>(items: &mut [T], begin: usize, end: usize) {
    if items.len() <= 1 || begin >= end {
        return;
    }

    let split = partition(items, begin, end);

    quick_sort(items, begin, split);
    quick_sort(items, split + 1, end);
}

/// Partitions `items[begin..=end]` around the midpoint value.
///
/// Returns the split point `s` such that every element of `begin..=s` is
/// less than or equal to every element of `s + 1..=end`. `s` is always
/// strictly less than `end`.
fn partition<T: Ord + Clone>(items: &mut [T], begin: usize, end: usize) -> usize {
    let mut low = begin;
    let mut high = end;

    let pivot = items[low + (high - low) / 2].clone();

    loop {
        while items[low] < pivot {
            low += 1;
        }

        while pivot < items[high] {
            high -= 1;
        }

        if low >= high {
            return high;
        }

        items.swap(low, high);
        low += 1;
        high -= 1;
    }
}
