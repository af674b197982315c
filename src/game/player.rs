use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based player identifier stored in board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(1);

    /// Zero-based position in the roster
    pub fn index(self) -> usize {
        usize::from(self.0.saturating_sub(1))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display metadata for a seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
}

/// Largest roster a [`PlayerId`] can number.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

const DEFAULT_SEATS: [(&str, &str); 4] = [
    ("Red", "red"),
    ("Blue", "blue"),
    ("Yellow", "yellow"),
    ("Green", "green"),
];

/// Build the default roster for `count` players.
///
/// The first four seats are Red, Blue, Yellow and Green; any further seats
/// get a generic name.
pub fn default_roster(count: u8) -> Vec<Player> {
    (1..=count)
        .map(|id| {
            let (name, color) = DEFAULT_SEATS
                .get(usize::from(id - 1))
                .map(|(name, color)| (name.to_string(), color.to_string()))
                .unwrap_or_else(|| (format!("Player {id}"), "gray".to_string()));
            Player {
                id: PlayerId(id),
                name,
                color,
            }
        })
        .collect()
}
