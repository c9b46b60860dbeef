//! Pure list reordering used by section and component moves.
//!
//! `reorder` removes the element at `source` and reinserts it at `target` in
//! the already-shortened list. It is not a swap: moving the first of three
//! elements to index 2 yields `[B, C, A]`.

/// Reorder a list, or `None` when either index is out of bounds
pub fn try_reorder<T: Clone>(list: &[T], source: usize, target: usize) -> Option<Vec<T>> {
    if source >= list.len() || target >= list.len() {
        return None;
    }

    let mut reordered = list.to_vec();
    let item = reordered.remove(source);
    reordered.insert(target, item);
    Some(reordered)
}

/// Reorder a list; invalid indices return an unchanged copy
pub fn reorder<T: Clone>(list: &[T], source: usize, target: usize) -> Vec<T> {
    try_reorder(list, source, target).unwrap_or_else(|| list.to_vec())
}

/// Reorder using raw indices from a drag event.
///
/// Drag sources report positions as floating point numbers that may be NaN,
/// negative or fractional; any such value leaves the list unchanged.
pub fn reorder_from_drag<T: Clone>(list: &[T], source: f64, target: f64) -> Vec<T> {
    match (drag_index(source), drag_index(target)) {
        (Some(source), Some(target)) => reorder(list, source, target),
        _ => list.to_vec(),
    }
}

fn drag_index(raw: f64) -> Option<usize> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= usize::MAX as f64 {
        Some(raw as usize)
    } else {
        None
    }
}
