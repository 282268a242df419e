use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a board column (e.g., "todo", "doing", "4")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

/// Identifier of a card. Unique among cards only; a card and a column may
/// share the same string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(ColumnId);
string_id!(CardId);

/// How fresh identifiers are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Monotonic decimal counter ("1", "2", ...)
    #[default]
    Sequential,
    /// Random v4 UUIDs
    Uuid,
}

/// Produces identifiers that are unique among the live entities of one kind.
///
/// The caller passes a predicate telling whether a candidate is already
/// taken; sequential candidates that collide with caller-supplied ids are
/// skipped, so the counter never hands out an id twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: u64,
}

impl IdGenerator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self { strategy, next: 1 }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Generates the next identifier not rejected by `taken`
    pub fn next_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = match self.strategy {
                IdStrategy::Sequential => {
                    let value = self.next.to_string();
                    self.next += 1;
                    value
                }
                IdStrategy::Uuid => Uuid::new_v4().to_string(),
            };

            if !taken(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}
