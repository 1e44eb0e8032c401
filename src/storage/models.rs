use serde::{Deserialize, Serialize};

/// A persisted alias → target mapping. Aliases are write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub alias: String,
    pub target: String,
}
