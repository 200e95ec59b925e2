use crate::core::sorted_list::SortedList;
use std::cmp::Ordering;

/// Binary search driven by `compare`, which reports how an element orders
/// relative to the target. Returns the index of a matching element.
///
/// The list must be sorted consistently with `compare`.
pub fn binary_search_by<T, F>(list: &SortedList<T>, mut compare: F) -> Option<usize>
where
    T: Ord,
    F: FnMut(&T) -> Ordering,
{
    let items = list.as_slice();
    let mut low = 0;
    let mut high = items.len();

    while low < high {
        let mid = low + (high - low) / 2;
        match compare(&items[mid]) {
            Ordering::Equal => return Some(mid),
            Ordering::Greater => high = mid,
            Ordering::Less => low = mid + 1,
        }
    }

    None
}

/// Looks up an element equal to `probe`, which only needs its identity
/// fields filled in.
pub fn binary_search<T: Ord>(list: &SortedList<T>, probe: &T) -> Option<usize> {
    binary_search_by(list, |item| item.cmp(probe))
}
