pub mod board;
pub mod drag;
pub mod ids;
pub mod ordering;
pub mod preview;

pub use board::{Board, BoardConfig, Card, Column};
pub use drag::{
    drag_end, drag_over, drag_start, DragController, DragEvent, DragItem, DragOutcome, DragRef,
    DragSession,
};
pub use ids::{CardId, ColumnId, IdGenerator, IdStrategy};
pub use ordering::move_element;
pub use preview::DragPreview;
