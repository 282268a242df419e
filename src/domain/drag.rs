//! Drag session state and the handlers for the three drag lifecycle events.
//!
//! Cards are reordered continuously while they are dragged over other cards
//! or columns; columns are committed once, when the drag ends. The session
//! is a plain value threaded through the handlers, so the whole lifecycle can
//! be driven without any rendering environment.

use crate::domain::board::{Board, Card, Column};
use crate::domain::ids::{CardId, ColumnId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// What is currently being dragged. At most one entity at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "entity", rename_all = "snake_case")]
pub enum DragSession {
    #[default]
    Idle,
    DraggingColumn(Column),
    DraggingCard(Card),
}

impl DragSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn active_column(&self) -> Option<&Column> {
        match self {
            Self::DraggingColumn(column) => Some(column),
            _ => None,
        }
    }

    pub fn active_card(&self) -> Option<&Card> {
        match self {
            Self::DraggingCard(card) => Some(card),
            _ => None,
        }
    }
}

/// Payload attached to a draggable when the drag begins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragItem {
    Column(Column),
    Card(Card),
    /// A draggable of a kind the board doesn't handle
    Foreign { id: String },
}

impl DragItem {
    pub fn to_ref(&self) -> DragRef {
        match self {
            Self::Column(column) => DragRef::Column(column.id.clone()),
            Self::Card(card) => DragRef::Card(card.id.clone()),
            Self::Foreign { id } => DragRef::Foreign(id.clone()),
        }
    }
}

/// Reference to the active draggable or the droppable under the pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DragRef {
    Column(ColumnId),
    Card(CardId),
    Foreign(String),
}

/// A drag lifecycle event reported by the drag-interaction provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent {
    Start(DragItem),
    Over {
        active: DragRef,
        over: Option<DragRef>,
    },
    End {
        active: DragRef,
        over: Option<DragRef>,
    },
}

/// What a drag event did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Unchanged,
    ColumnMoved {
        column: ColumnId,
        from: usize,
        to: usize,
    },
    /// Same-column reorder within the global card sequence
    CardReordered { card: CardId, from: usize, to: usize },
    /// Card reassigned to another column; `from`/`to` are global indices
    CardMoved {
        card: CardId,
        from_column: ColumnId,
        to_column: ColumnId,
        from: usize,
        to: usize,
    },
}

/// Begins a drag. Unrecognized kinds leave the session idle.
///
/// A new start replaces whatever was being dragged before.
pub fn drag_start(session: DragSession, item: DragItem) -> DragSession {
    if !session.is_idle() {
        warn!(?session, "Drag started while another drag was active");
    }

    match item {
        DragItem::Column(column) => {
            debug!(column = %column.id, "Drag start");
            DragSession::DraggingColumn(column)
        }
        DragItem::Card(card) => {
            debug!(card = %card.id, "Drag start");
            DragSession::DraggingCard(card)
        }
        DragItem::Foreign { id } => {
            trace!(%id, "Ignoring drag start of unrecognized draggable");
            DragSession::Idle
        }
    }
}

/// Handles the pointer moving over a droppable while a card is dragged
pub fn drag_over(
    board: &mut Board,
    session: &DragSession,
    active: &DragRef,
    over: Option<&DragRef>,
) -> DragOutcome {
    if session.is_idle() {
        trace!("Ignoring drag over without an active drag");
        return DragOutcome::Unchanged;
    }
    let Some(over) = over else {
        return DragOutcome::Unchanged;
    };
    if active == over {
        return DragOutcome::Unchanged;
    }

    let DragRef::Card(card_id) = active else {
        return DragOutcome::Unchanged;
    };

    match over {
        DragRef::Card(target_id) => card_over_card(board, card_id, target_id),
        DragRef::Column(column_id) => card_over_column(board, card_id, column_id),
        DragRef::Foreign(_) => DragOutcome::Unchanged,
    }
}

fn card_over_card(board: &mut Board, card_id: &CardId, target_id: &CardId) -> DragOutcome {
    let (Some(from), Some(target)) = (board.card_index(card_id), board.card_index(target_id))
    else {
        warn!(card = %card_id, target = %target_id, "Drag over references unknown card");
        return DragOutcome::Unchanged;
    };

    let cards = board.cards();
    let from_column = cards[from].column_id.clone();
    let to_column = cards[target].column_id.clone();

    if from_column == to_column {
        if let Err(e) = board.move_card(from, target, None) {
            warn!(error = %e, "Failed to reorder card");
            return DragOutcome::Unchanged;
        }
        debug!(card = %card_id, from, to = target, "Reordered card");
        return DragOutcome::CardReordered {
            card: card_id.clone(),
            from,
            to: target,
        };
    }

    // Insert just before the target's original slot
    let to = target.saturating_sub(1);
    if let Err(e) = board.move_card(from, to, Some(&to_column)) {
        warn!(error = %e, "Failed to move card");
        return DragOutcome::Unchanged;
    }

    debug!(card = %card_id, %from_column, %to_column, from, to, "Moved card over card");
    DragOutcome::CardMoved {
        card: card_id.clone(),
        from_column,
        to_column,
        from,
        to,
    }
}

fn card_over_column(board: &mut Board, card_id: &CardId, column_id: &ColumnId) -> DragOutcome {
    let Some(index) = board.card_index(card_id) else {
        warn!(card = %card_id, "Drag over references unknown card");
        return DragOutcome::Unchanged;
    };
    if board.column(column_id).is_none() {
        warn!(column = %column_id, "Drag over references unknown column");
        return DragOutcome::Unchanged;
    }

    let from_column = board.cards()[index].column_id.clone();
    if let Err(e) = board.move_card(index, index, Some(column_id)) {
        warn!(error = %e, "Failed to move card");
        return DragOutcome::Unchanged;
    }

    debug!(card = %card_id, %from_column, to_column = %column_id, "Moved card over column");
    DragOutcome::CardMoved {
        card: card_id.clone(),
        from_column,
        to_column: column_id.clone(),
        from: index,
        to: index,
    }
}

/// Ends the drag. The returned session is always idle.
pub fn drag_end(
    board: &mut Board,
    session: DragSession,
    active: &DragRef,
    over: Option<&DragRef>,
) -> (DragSession, DragOutcome) {
    trace!(?session, "Drag end");
    let outcome = commit_column_drop(board, active, over);
    (DragSession::Idle, outcome)
}

fn commit_column_drop(board: &mut Board, active: &DragRef, over: Option<&DragRef>) -> DragOutcome {
    let Some(over) = over else {
        trace!("Drag ended without a drop target");
        return DragOutcome::Unchanged;
    };
    if active == over {
        return DragOutcome::Unchanged;
    }

    let DragRef::Column(column_id) = active else {
        return DragOutcome::Unchanged;
    };
    let DragRef::Column(target_id) = over else {
        return DragOutcome::Unchanged;
    };

    let (Some(from), Some(to)) = (board.column_index(column_id), board.column_index(target_id))
    else {
        warn!(column = %column_id, target = %target_id, "Drag end references unknown column");
        return DragOutcome::Unchanged;
    };

    if let Err(e) = board.move_column(from, to) {
        warn!(error = %e, "Failed to move column");
        return DragOutcome::Unchanged;
    }

    debug!(column = %column_id, from, to, "Moved column");
    DragOutcome::ColumnMoved {
        column: column_id.clone(),
        from,
        to,
    }
}

/// Owns a board and its drag session and routes lifecycle events to them
#[derive(Debug, Clone, Default)]
pub struct DragController {
    board: Board,
    session: DragSession,
}

impl DragController {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            session: DragSession::Idle,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for user intents (create, rename, edit, delete)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn handle(&mut self, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Start(item) => {
                let session = std::mem::take(&mut self.session);
                self.session = drag_start(session, item);
                DragOutcome::Unchanged
            }
            DragEvent::Over { active, over } => {
                drag_over(&mut self.board, &self.session, &active, over.as_ref())
            }
            DragEvent::End { active, over } => {
                let session = std::mem::take(&mut self.session);
                let (session, outcome) = drag_end(&mut self.board, session, &active, over.as_ref());
                self.session = session;
                outcome
            }
        }
    }

    pub fn into_board(self) -> Board {
        self.board
    }
}
