//! Team data structure.

use serde::{Deserialize, Serialize};

/// Unique identifier for a team (e.g. `team-1`).
pub type TeamId = String;

/// A team entered into the tournament. Immutable once the bracket is built.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
