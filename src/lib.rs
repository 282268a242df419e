//! # Hlavi Board
//!
//! In-memory reordering engine behind the Hlavi drag-and-drop kanban board.
//!
//! The board keeps an ordered list of columns and one global, ordered list
//! of cards; a card's column membership and its position within that column
//! are both read off the global order. Drag lifecycle events (start, over,
//! end) coming from whatever drag-interaction provider the UI uses are fed
//! to a [`DragController`], which reorders columns and cards accordingly.
//!
//! ```
//! use hlavi_board::{Board, ColumnId, DragController, DragEvent, DragItem, DragRef};
//!
//! let mut controller = DragController::new(Board::default());
//! let todo = controller.board().column(&ColumnId::from("todo")).unwrap().clone();
//!
//! controller.handle(DragEvent::Start(DragItem::Column(todo)));
//! controller.handle(DragEvent::End {
//!     active: DragRef::Column(ColumnId::from("todo")),
//!     over: Some(DragRef::Column(ColumnId::from("done"))),
//! });
//!
//! let order: Vec<_> = controller.board().columns().iter().map(|c| c.id.to_string()).collect();
//! assert_eq!(order, ["doing", "done", "todo"]);
//! ```

pub mod domain;
pub mod error;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, Card, Column},
    drag::{DragController, DragEvent, DragItem, DragOutcome, DragRef, DragSession},
    ids::{CardId, ColumnId, IdStrategy},
    preview::DragPreview,
};
pub use error::{BoardError, Result};
