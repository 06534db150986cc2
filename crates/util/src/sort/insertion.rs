use std::cmp::Ordering;

/// Stable insertion sort with a custom comparator.
///
/// Unlike `slice::sort_by`, this never panics when `compare` is not a total
/// order (for example a user callback that is inconsistent, or one that
/// reports every pair as equal): each element is simply shifted left past
/// the run of predecessors that compare `Greater` than it. Equal elements
/// keep their relative order.
///
/// # Examples
///
/// ```
/// use json_canon_util::sort::insertion_sort_by;
///
/// let mut keys = vec!["b", "c", "a"];
/// insertion_sort_by(&mut keys, |a, b| b.cmp(a)); // Descending order
/// assert_eq!(keys, vec!["c", "b", "a"]);
/// ```
pub fn insertion_sort_by<T, F>(arr: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..arr.len() {
        let mut j = i;
        while j > 0 && compare(&arr[j - 1], &arr[i]) == Ordering::Greater {
            j -= 1;
        }
        if j < i {
            arr[j..=i].rotate_right(1);
        }
    }
}
