use crate::domain::board::{Board, Card, Column};
use crate::domain::drag::DragSession;

/// Content of the floating overlay that follows the pointer during a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPreview {
    Column { column: Column, cards: Vec<Card> },
    Card(Card),
}

impl Board {
    /// Builds the overlay for the current session from the live board.
    ///
    /// The dragged entity is looked up again so the preview reflects any
    /// reassignment made by earlier drag-over events. Returns `None` when idle
    /// or when the dragged entity has since been deleted.
    pub fn preview(&self, session: &DragSession) -> Option<DragPreview> {
        match session {
            DragSession::Idle => None,
            DragSession::DraggingColumn(active) => {
                let column = self.column(&active.id)?.clone();
                let cards = self.cards_in_column(&column.id);
                Some(DragPreview::Column { column, cards })
            }
            DragSession::DraggingCard(active) => {
                self.card(&active.id).cloned().map(DragPreview::Card)
            }
        }
    }
}
