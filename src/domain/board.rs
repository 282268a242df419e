use crate::domain::ids::{CardId, ColumnId, IdGenerator, IdStrategy};
use crate::domain::ordering::move_element;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A named, orderable container of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A card belonging to exactly one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column_id: ColumnId,
    pub content: String,
}

impl Card {
    pub fn new(
        id: impl Into<CardId>,
        column_id: impl Into<ColumnId>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            content: content.into(),
        }
    }
}

fn default_column_title_prefix() -> String {
    "Column".to_string()
}

fn default_card_content_prefix() -> String {
    "Card".to_string()
}

/// Board configuration: seed data plus naming and id policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default = "default_column_title_prefix")]
    pub column_title_prefix: String,
    #[serde(default = "default_card_content_prefix")]
    pub card_content_prefix: String,
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl BoardConfig {
    /// A configuration with no seed columns or cards
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            cards: Vec::new(),
            column_title_prefix: default_column_title_prefix(),
            card_content_prefix: default_card_content_prefix(),
            id_strategy: IdStrategy::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.column_title_prefix.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "column_title_prefix must not be blank".to_string(),
            ));
        }
        if self.card_content_prefix.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "card_content_prefix must not be blank".to_string(),
            ));
        }

        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(BoardError::DuplicateId {
                    kind: "column",
                    id: column.id.to_string(),
                });
            }
        }

        let mut card_ids = HashSet::new();
        for card in &self.cards {
            if !card_ids.insert(&card.id) {
                return Err(BoardError::DuplicateId {
                    kind: "card",
                    id: card.id.to_string(),
                });
            }
            if !column_ids.contains(&card.column_id) {
                return Err(BoardError::ColumnNotFound(card.column_id.to_string()));
            }
        }

        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        let columns = vec![
            Column::new("todo", "Todo"),
            Column::new("doing", "Work in progress"),
            Column::new("done", "Done"),
        ];
        let cards = vec![
            Card::new("1", "todo", "List admin APIs for dashboard"),
            Card::new(
                "2",
                "todo",
                "Develop user registration functionality with OTP delivered on SMS after email confirmation and phone number confirmation",
            ),
            Card::new("3", "doing", "Conduct security testing"),
            Card::new("4", "doing", "Analyze competitors"),
            Card::new("5", "done", "Create UI mockups"),
            Card::new("6", "done", "Prepare documentation"),
            Card::new("7", "done", "Release new version"),
            Card::new("8", "todo", "Choose technology stack"),
            Card::new("9", "todo", "Implement authentication"),
            Card::new("10", "todo", "Set up project structure"),
            Card::new("11", "doing", "Design database schema"),
            Card::new("12", "doing", "Develop API for user management"),
        ];

        Self {
            columns,
            cards,
            ..Self::empty("Default Board")
        }
    }
}

/// Board state: the ordered columns and the single global card sequence.
///
/// Every mutation swaps in a freshly built sequence, so a snapshot obtained
/// from [`Board::columns`] or [`Board::cards`] never changes afterwards.
/// A card's position within its column is its rank among same-column cards
/// in the global sequence.
#[derive(Debug, Clone)]
pub struct Board {
    pub name: String,
    columns: Arc<[Column]>,
    cards: Arc<[Card]>,
    column_ids: IdGenerator,
    card_ids: IdGenerator,
    column_title_prefix: String,
    card_content_prefix: String,
}

impl Board {
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: BoardConfig) -> Self {
        Self {
            name: config.name,
            columns: config.columns.into(),
            cards: config.cards.into(),
            column_ids: IdGenerator::new(config.id_strategy),
            card_ids: IdGenerator::new(config.id_strategy),
            column_title_prefix: config.column_title_prefix,
            card_content_prefix: config.card_content_prefix,
        }
    }

    /// Current column order
    pub fn columns(&self) -> Arc<[Column]> {
        Arc::clone(&self.columns)
    }

    /// Current global card order
    pub fn cards(&self) -> Arc<[Card]> {
        Arc::clone(&self.cards)
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == id)
    }

    pub fn card_index(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }

    /// Cards of a column in display order
    pub fn cards_in_column(&self, column_id: &ColumnId) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| &card.column_id == column_id)
            .cloned()
            .collect()
    }

    pub fn card_count(&self, column_id: &ColumnId) -> usize {
        self.cards
            .iter()
            .filter(|card| &card.column_id == column_id)
            .count()
    }

    /// Appends a column with a fresh id and the default title
    pub fn create_column(&mut self) -> ColumnId {
        let columns = &self.columns;
        let id = ColumnId::new(
            self.column_ids
                .next_id(|candidate| columns.iter().any(|col| col.id.as_str() == candidate)),
        );
        let title = format!("{} {}", self.column_title_prefix, self.columns.len() + 1);

        let mut next = self.columns.to_vec();
        next.push(Column::new(id.clone(), title));
        self.columns = next.into();

        debug!(column = %id, "Created column");
        id
    }

    /// Replaces the title of a column. Returns false if no column matched.
    pub fn rename_column(&mut self, id: &ColumnId, title: impl Into<String>) -> bool {
        let title = title.into();
        let mut found = false;

        self.columns = self
            .columns
            .iter()
            .map(|col| {
                if &col.id != id {
                    return col.clone();
                }
                found = true;
                Column {
                    title: title.clone(),
                    ..col.clone()
                }
            })
            .collect();

        if found {
            debug!(column = %id, %title, "Renamed column");
        }
        found
    }

    /// Removes a column together with every card it owns
    pub fn delete_column(&mut self, id: &ColumnId) -> bool {
        let Some(index) = self.column_index(id) else {
            return false;
        };

        let mut columns = self.columns.to_vec();
        columns.remove(index);
        let cards: Vec<Card> = self
            .cards
            .iter()
            .filter(|card| &card.column_id != id)
            .cloned()
            .collect();
        let removed = self.cards.len() - cards.len();

        self.columns = columns.into();
        self.cards = cards.into();

        debug!(column = %id, removed_cards = removed, "Deleted column");
        true
    }

    /// Appends a card to the given column
    ///
    /// Fails with [`BoardError::ColumnNotFound`] if the column does not exist.
    pub fn create_card(&mut self, column_id: &ColumnId) -> Result<CardId> {
        if self.column(column_id).is_none() {
            return Err(BoardError::ColumnNotFound(column_id.to_string()));
        }

        let cards = &self.cards;
        let id = CardId::new(
            self.card_ids
                .next_id(|candidate| cards.iter().any(|card| card.id.as_str() == candidate)),
        );
        let content = format!("{} {}", self.card_content_prefix, self.cards.len() + 1);

        let mut next = self.cards.to_vec();
        next.push(Card::new(id.clone(), column_id.clone(), content));
        self.cards = next.into();

        debug!(card = %id, column = %column_id, "Created card");
        Ok(id)
    }

    /// Replaces the content of a card. Returns false if no card matched.
    pub fn edit_card(&mut self, id: &CardId, content: impl Into<String>) -> bool {
        let content = content.into();
        let mut found = false;

        self.cards = self
            .cards
            .iter()
            .map(|card| {
                if &card.id != id {
                    return card.clone();
                }
                found = true;
                Card {
                    content: content.clone(),
                    ..card.clone()
                }
            })
            .collect();

        if found {
            debug!(card = %id, "Edited card");
        }
        found
    }

    pub fn delete_card(&mut self, id: &CardId) -> bool {
        let Some(index) = self.card_index(id) else {
            return false;
        };

        let mut cards = self.cards.to_vec();
        cards.remove(index);
        self.cards = cards.into();

        debug!(card = %id, "Deleted card");
        true
    }

    pub(crate) fn move_column(&mut self, from: usize, to: usize) -> Result<()> {
        self.columns = move_element(&self.columns[..], from, to)?.into();
        Ok(())
    }

    /// Optionally reassigns the card at `from` to `column_id`, then moves it
    /// to `to` in the global sequence. Both happen in one replacement.
    pub(crate) fn move_card(
        &mut self,
        from: usize,
        to: usize,
        column_id: Option<&ColumnId>,
    ) -> Result<()> {
        let mut cards = self.cards.to_vec();
        if let (Some(column_id), Some(card)) = (column_id, cards.get_mut(from)) {
            card.column_id = column_id.clone();
        }
        self.cards = move_element(&cards, from, to)?.into();
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_config(BoardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn card_ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|card| card.id.as_str()).collect()
    }

    #[test]
    fn test_default_board() {
        let board = Board::default();

        assert_eq!(board.columns().len(), 3);
        assert_eq!(board.cards().len(), 12);
        assert_eq!(board.card_count(&ColumnId::from("todo")), 5);
        assert_eq!(board.card_count(&ColumnId::from("doing")), 4);
        assert_eq!(board.card_count(&ColumnId::from("done")), 3);
    }

    #[test]
    fn test_cards_in_column_follow_global_order() {
        let board = Board::default();
        let todo = board.cards_in_column(&ColumnId::from("todo"));

        assert_eq!(card_ids(&todo), vec!["1", "2", "8", "9", "10"]);
    }

    #[test]
    fn test_create_column() {
        let mut board = Board::default();

        let id = board.create_column();

        let columns = board.columns();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[3].id, id);
        assert_eq!(columns[3].title, "Column 4");
    }

    #[test]
    fn test_rename_column() {
        let mut board = Board::default();

        assert!(board.rename_column(&ColumnId::from("doing"), "In Progress"));
        assert_eq!(
            board.column(&ColumnId::from("doing")).unwrap().title,
            "In Progress"
        );

        assert!(!board.rename_column(&ColumnId::from("missing"), "Nope"));
        assert_eq!(board.columns().len(), 3);
    }

    #[test]
    fn test_delete_column_cascades() {
        let mut board = Board::default();

        assert!(board.delete_column(&ColumnId::from("todo")));

        let columns = board.columns();
        assert_eq!(columns.len(), 2);
        assert!(board.column(&ColumnId::from("todo")).is_none());
        assert_eq!(
            card_ids(&board.cards()),
            vec!["3", "4", "5", "6", "7", "11", "12"]
        );
    }

    #[test]
    fn test_delete_missing_column_is_noop() {
        let mut board = Board::default();

        assert!(!board.delete_column(&ColumnId::from("missing")));
        assert_eq!(board.columns().len(), 3);
        assert_eq!(board.cards().len(), 12);
    }

    #[test]
    fn test_create_card() {
        let mut board = Board::default();

        let id = board.create_card(&ColumnId::from("doing")).unwrap();

        let card = board.card(&id).unwrap();
        assert_eq!(card.column_id.as_str(), "doing");
        assert_eq!(card.content, "Card 13");
        assert_eq!(board.card_index(&id), Some(12));
        // seeded ids 1..=12 are skipped
        assert_eq!(id.as_str(), "13");
    }

    #[test]
    fn test_create_card_in_missing_column() {
        let mut board = Board::default();

        let err = board.create_card(&ColumnId::from("missing")).unwrap_err();
        assert!(matches!(err, BoardError::ColumnNotFound(ref id) if id == "missing"));
        assert_eq!(board.cards().len(), 12);
    }

    #[test]
    fn test_edit_and_delete_card() {
        let mut board = Board::default();

        assert!(board.edit_card(&CardId::from("3"), "Pen test"));
        assert_eq!(board.card(&CardId::from("3")).unwrap().content, "Pen test");
        assert!(!board.edit_card(&CardId::from("99"), "x"));

        assert!(board.delete_card(&CardId::from("3")));
        assert!(board.card(&CardId::from("3")).is_none());
        assert!(!board.delete_card(&CardId::from("3")));
        assert_eq!(board.cards().len(), 11);
    }

    #[test]
    fn test_snapshots_are_not_aliased() {
        let mut board = Board::default();
        let before = board.cards();

        board.edit_card(&CardId::from("1"), "changed");
        board.delete_card(&CardId::from("2"));

        assert_eq!(before.len(), 12);
        assert_eq!(before[0].content, "List admin APIs for dashboard");
        assert_eq!(board.cards()[0].content, "changed");
    }

    #[test]
    fn test_move_card_reassigns_column() {
        let mut board = Board::default();

        board
            .move_card(0, 3, Some(&ColumnId::from("done")))
            .unwrap();

        let cards = board.cards();
        assert_eq!(cards[3].id.as_str(), "1");
        assert_eq!(cards[3].column_id.as_str(), "done");
    }

    #[test]
    fn test_config_rejects_duplicate_ids() {
        let mut config = BoardConfig::default();
        config.columns.push(Column::new("todo", "Again"));

        let err = Board::new(config).unwrap_err();
        assert!(matches!(err, BoardError::DuplicateId { kind: "column", .. }));

        let mut config = BoardConfig::default();
        config.cards.push(Card::new("1", "todo", "Again"));

        let err = Board::new(config).unwrap_err();
        assert!(matches!(err, BoardError::DuplicateId { kind: "card", .. }));
    }

    #[test]
    fn test_config_rejects_dangling_card() {
        let mut config = BoardConfig::empty("Test");
        config.columns.push(Column::new("a", "A"));
        config.cards.push(Card::new("1", "b", "Orphan"));

        assert!(matches!(
            Board::new(config),
            Err(BoardError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_config_rejects_blank_prefix() {
        let mut config = BoardConfig::empty("Test");
        config.card_content_prefix = "  ".to_string();

        assert!(matches!(Board::new(config), Err(BoardError::ConfigError(_))));
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let json = r#"{
            "name": "Sprint",
            "columns": [{ "id": "backlog", "title": "Backlog" }],
            "column_title_prefix": "Lane"
        }"#;

        let config = BoardConfig::from_json(json).unwrap();
        assert_eq!(config.card_content_prefix, "Card");
        assert_eq!(config.id_strategy, IdStrategy::Sequential);

        let mut board = Board::new(config).unwrap();
        board.create_column();
        assert_eq!(board.columns()[1].title, "Lane 2");
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&BoardConfig::default()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = BoardConfig::load(file.path()).unwrap();
        assert_eq!(config.columns.len(), 3);
        assert_eq!(config.cards.len(), 12);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BoardConfig::load(dir.path().join("board.json")).unwrap_err();
        assert!(matches!(err, BoardError::IoError(_)));
    }

    #[test]
    fn test_uuid_strategy() {
        let mut config = BoardConfig::empty("Test");
        config.id_strategy = IdStrategy::Uuid;
        let mut board = Board::new(config).unwrap();

        let column = board.create_column();
        let card = board.create_card(&column).unwrap();

        assert!(uuid::Uuid::parse_str(column.as_str()).is_ok());
        assert!(uuid::Uuid::parse_str(card.as_str()).is_ok());
    }

    #[derive(Debug, Clone)]
    enum Op {
        CreateColumn,
        DeleteColumn(usize),
        CreateCard(usize),
        DeleteCard(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::CreateColumn),
            (0..8usize).prop_map(Op::DeleteColumn),
            (0..8usize).prop_map(Op::CreateCard),
            (0..32usize).prop_map(Op::DeleteCard),
        ]
    }

    proptest! {
        /// Property: no card ever references a column that is gone
        #[test]
        fn prop_no_orphaned_cards(ops in prop::collection::vec(op(), 0..60)) {
            let mut board = Board::default();

            for op in ops {
                match op {
                    Op::CreateColumn => {
                        board.create_column();
                    }
                    Op::DeleteColumn(i) => {
                        if let Some(col) = board.columns().get(i) {
                            board.delete_column(&col.id);
                        }
                    }
                    Op::CreateCard(i) => {
                        if let Some(col) = board.columns().get(i) {
                            board.create_card(&col.id).unwrap();
                        }
                    }
                    Op::DeleteCard(i) => {
                        if let Some(card) = board.cards().get(i) {
                            board.delete_card(&card.id);
                        }
                    }
                }

                for card in board.cards().iter() {
                    prop_assert!(board.column(&card.column_id).is_some());
                }
                let ids: HashSet<_> = board.cards().iter().map(|c| c.id.clone()).collect();
                prop_assert_eq!(ids.len(), board.cards().len());
            }
        }
    }
}
