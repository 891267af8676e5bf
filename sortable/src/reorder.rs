//! Pure move helpers over ordered sequences.

#[cfg(test)]
#[path = "reorder_test.rs"]
mod reorder_test;

/// Move the element at `from` so it ends up at `to` in the same sequence.
///
/// `to` is clamped to the last position. Returns `false` (and leaves the
/// sequence untouched) when `from` is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let item = items.remove(from);
    insert_clamped(items, to, item);
    true
}

/// Move the element at `from` in `src` into `dst` at `to`.
///
/// `to` is clamped to `dst.len()`. Returns `false` when `from` is out of
/// range.
pub fn transfer<T>(src: &mut Vec<T>, from: usize, dst: &mut Vec<T>, to: usize) -> bool {
    if from >= src.len() {
        return false;
    }
    let item = src.remove(from);
    insert_clamped(dst, to, item);
    true
}

/// Insert at `index`, appending when it is past the end. Returns the index used.
pub fn insert_clamped<T>(items: &mut Vec<T>, index: usize, item: T) -> usize {
    let index = index.min(items.len());
    items.insert(index, item);
    index
}
