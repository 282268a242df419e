use crate::error::{BoardError, Result};

/// Moves the element at `from` so that it ends up at `to`
///
/// Returns a new sequence; the input is left untouched. Elements between the
/// two positions shift by one slot, everything outside that range keeps its
/// place. `from == to` yields an identical copy.
///
/// # Arguments
/// * `items` - The sequence to reorder
/// * `from` - Current index of the element to move
/// * `to` - Index the element occupies afterwards
///
/// # Examples
/// ```
/// use hlavi_board::domain::ordering::move_element;
///
/// let moved = move_element(&["todo", "doing", "done"], 0, 2).unwrap();
/// assert_eq!(moved, vec!["doing", "done", "todo"]);
/// ```
pub fn move_element<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(BoardError::IndexOutOfBounds { index, len });
        }
    }

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}
