use tracing::debug;

use super::player::{default_roster, Player, PlayerId, MAX_PLAYERS};
use crate::error::RosterError;

/// Rotates the active seat over a fixed, ordered cycle of players.
///
/// Once frozen (a winner exists) the active player no longer changes until
/// [`TurnController::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnController {
    players: Vec<Player>,
    active: PlayerId,
    frozen: bool,
}

impl TurnController {
    /// Create a controller over `players`. Identifiers are reassigned to
    /// 1..=N in roster order.
    pub fn new(players: Vec<Player>) -> Result<Self, RosterError> {
        if players.len() > MAX_PLAYERS {
            return Err(RosterError::TooManyPlayers {
                count: players.len(),
                max: MAX_PLAYERS,
            });
        }
        let players = (1..=u8::MAX)
            .zip(players)
            .map(|(id, p)| Player {
                id: PlayerId(id),
                ..p
            })
            .collect();
        Ok(Self::seat(players))
    }

    /// Seat the default roster for `count` players.
    pub fn with_default_roster(count: u8) -> Self {
        Self::seat(default_roster(count))
    }

    fn seat(players: Vec<Player>) -> Self {
        TurnController {
            players,
            active: PlayerId::FIRST,
            frozen: false,
        }
    }

    pub fn active(&self) -> PlayerId {
        self.active
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.player(self.active)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Pass the turn: active = (active mod N) + 1.
    pub fn advance(&mut self) {
        if self.frozen || self.players.is_empty() {
            return;
        }
        // Seating caps the roster at MAX_PLAYERS, so n is in 1..=255.
        let n = u8::try_from(self.players.len()).unwrap_or(u8::MAX);
        self.active = PlayerId((self.active.0 % n) + 1);
        debug!(active = %self.active, "turn advanced");
    }

    /// Stop rotation permanently until reset.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Change a player's display name. Unknown ids are ignored.
    pub fn rename(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Restore the first player as active and unfreeze rotation.
    pub fn reset(&mut self) {
        self.active = PlayerId::FIRST;
        self.frozen = false;
    }
}
