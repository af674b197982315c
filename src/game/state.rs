use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::board::{Board, Position, WinSet};
use super::player::{Player, PlayerId};
use super::turn::TurnController;
use crate::error::{MoveError, RosterError};

/// Board engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub players: u8,
    /// Convert an opposing disc directly above the landing cell.
    pub overwrite: bool,
    /// Require a correct quiz answer before a drop is committed.
    pub quiz_gate: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: 9,
            cols: 10,
            players: 4,
            overwrite: true,
            quiz_gate: true,
        }
    }
}

/// Result of a successful drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub player: PlayerId,
    pub position: Position,
    pub overwritten: Option<Position>,
    pub win: Option<WinSet>,
}

/// Read-only view of the board for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Vec<Option<PlayerId>>>,
    pub players: Vec<Player>,
    pub active_player: PlayerId,
    pub win_set: Option<WinSet>,
    pub winner: Option<PlayerId>,
    pub terminal: bool,
    pub full: bool,
}

/// The four-in-a-row engine: grid, roster, turn rotation and win record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turns: TurnController,
    win: Option<WinSet>,
    overwrite: bool,
}

impl GameState {
    /// Create initial game state with the default roster.
    pub fn new(config: &BoardConfig) -> Self {
        Self::seated(config, TurnController::with_default_roster(config.players))
    }

    /// Create a game with a custom roster, renumbered 1..=N.
    pub fn with_players(
        config: &BoardConfig,
        players: Vec<Player>,
    ) -> Result<Self, RosterError> {
        Ok(Self::seated(config, TurnController::new(players)?))
    }

    fn seated(config: &BoardConfig, turns: TurnController) -> Self {
        GameState {
            board: Board::new(config.rows, config.cols),
            turns,
            win: None,
            overwrite: config.overwrite,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turns(&self) -> &TurnController {
        &self.turns
    }

    pub fn active_player(&self) -> PlayerId {
        self.turns.active()
    }

    pub fn win_set(&self) -> Option<&WinSet> {
        self.win.as_ref()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.win.as_ref().map(|w| w.player)
    }

    /// Display name of the winning player, if any.
    pub fn winner_name(&self) -> Option<&str> {
        let id = self.winner()?;
        self.turns.player(id).map(|p| p.name.as_str())
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.win.is_some()
    }

    /// Columns that can still take a disc.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.board.cols())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop `player`'s disc into `column`.
    ///
    /// Applies the overwrite rule (when enabled) before evaluating the win
    /// seeded at the landing cell. Does not rotate the turn.
    #[instrument(skip(self))]
    pub fn drop(&mut self, column: usize, player: PlayerId) -> Result<MoveResult, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameAlreadyWon);
        }

        let landing = self.board.drop_piece(column, player, self.overwrite)?;
        let win = self.board.winning_line(landing.row, column);
        debug!(
            row = landing.row,
            overwritten = ?landing.overwritten,
            "disc dropped"
        );

        if let Some(win_set) = &win {
            info!(
                player = %win_set.player,
                direction = ?win_set.direction,
                length = win_set.len(),
                "four in a row"
            );
            self.win = Some(win_set.clone());
            self.turns.freeze();
        }

        Ok(MoveResult {
            player,
            position: Position::new(landing.row, column),
            overwritten: landing.overwritten,
            win,
        })
    }

    /// Drop for the active player and pass the turn unless the move won.
    pub fn play(&mut self, column: usize) -> Result<MoveResult, MoveError> {
        let result = self.drop(column, self.turns.active())?;
        if result.win.is_none() {
            self.turns.advance();
        }
        Ok(result)
    }

    /// Pass the turn. No-op once a winner exists.
    pub fn advance_turn(&mut self) {
        self.turns.advance();
    }

    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        self.turns.rename(id, name)
    }

    /// Clear the grid and win record and hand the turn back to player 1.
    pub fn reset(&mut self) {
        self.board.clear();
        self.win = None;
        self.turns.reset();
        info!("board reset");
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            cells: self.board.to_rows(),
            players: self.turns.players().to_vec(),
            active_player: self.turns.active(),
            win_set: self.win.clone(),
            winner: self.winner(),
            terminal: self.is_terminal(),
            full: self.board.is_full(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction};

    fn small_config() -> BoardConfig {
        BoardConfig {
            rows: 8,
            cols: 9,
            ..BoardConfig::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::default();
        assert_eq!(state.active_player(), PlayerId(1));
        assert!(!state.is_terminal());
        assert_eq!(state.legal_columns().len(), 10);
        assert_eq!(state.board().rows(), 9);
    }

    #[test]
    fn test_drop_does_not_rotate_turn() {
        let mut state = GameState::new(&small_config());
        let result = state.drop(3, PlayerId(2)).unwrap();
        assert_eq!(result.position, Position::new(7, 3));
        assert_eq!(state.board().get(7, 3), Cell::Occupied(PlayerId(2)));
        assert_eq!(state.active_player(), PlayerId(1));
    }

    #[test]
    fn test_play_rotates_turn() {
        let mut state = GameState::new(&small_config());
        state.play(0).unwrap();
        state.play(1).unwrap();
        assert_eq!(state.active_player(), PlayerId(3));
    }

    #[test]
    fn test_vertical_win_freezes_game() {
        let mut state = GameState::new(&small_config());
        for i in 0..4 {
            let result = state.drop(3, PlayerId(1)).unwrap();
            assert_eq!(result.win.is_some(), i == 3);
        }

        assert!(state.is_terminal());
        let win = state.win_set().unwrap();
        assert_eq!(win.direction, Direction::Down);
        assert!(win.len() >= 4);
        assert!(win.positions.iter().all(|p| p.col == 3));
        assert_eq!(state.winner_name(), Some("Red"));

        for col in 0..9 {
            assert_eq!(state.drop(col, PlayerId(2)), Err(MoveError::GameAlreadyWon));
        }
        assert!(state.legal_columns().is_empty());
    }

    #[test]
    fn test_advance_after_win_is_noop() {
        let mut state = GameState::new(&small_config());
        state.advance_turn();
        for _ in 0..4 {
            state.drop(0, PlayerId(2)).unwrap();
        }
        state.advance_turn();
        state.advance_turn();
        assert_eq!(state.active_player(), PlayerId(2));
    }

    #[test]
    fn test_winning_play_keeps_active_player() {
        let mut state = GameState::new(&small_config());
        for col in 0..3 {
            state.drop(col, PlayerId(1)).unwrap();
        }
        let result = state.play(3).unwrap();
        assert!(result.win.is_some());
        assert_eq!(state.active_player(), PlayerId(1));
    }

    #[test]
    fn test_column_full_error() {
        let mut state = GameState::new(&BoardConfig {
            rows: 2,
            cols: 4,
            ..BoardConfig::default()
        });
        state.play(0).unwrap();
        state.play(0).unwrap();
        assert_eq!(state.play(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(state.active_player(), PlayerId(3));
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::new(&small_config());
        state.rename_player(PlayerId(1), "Ada");
        for _ in 0..4 {
            state.play(5).unwrap();
        }
        state.reset();
        assert_eq!(state.board().occupied(), 0);
        assert!(state.win_set().is_none());
        assert_eq!(state.active_player(), PlayerId(1));
        assert_eq!(state.turns().players()[0].name, "Ada");
    }

    #[test]
    fn test_with_players_seats_custom_roster() {
        let roster = vec![
            Player {
                id: PlayerId(7),
                name: "Ada".to_string(),
                color: "purple".to_string(),
            },
            Player {
                id: PlayerId(7),
                name: "Grace".to_string(),
                color: "orange".to_string(),
            },
        ];
        let mut state = GameState::with_players(&small_config(), roster).unwrap();
        assert_eq!(state.turns().len(), 2);
        state.play(0).unwrap();
        state.play(1).unwrap();
        assert_eq!(state.active_player(), PlayerId(1));
        assert_eq!(state.turns().players()[1].id, PlayerId(2));
    }

    #[test]
    fn test_with_players_rejects_oversized_roster() {
        let roster = vec![
            Player {
                id: PlayerId(1),
                name: "Extra".to_string(),
                color: "gray".to_string(),
            };
            300
        ];
        assert_eq!(
            GameState::with_players(&small_config(), roster),
            Err(RosterError::TooManyPlayers {
                count: 300,
                max: 255
            })
        );
    }

    #[test]
    fn test_snapshot() {
        let mut state = GameState::new(&small_config());
        state.play(4).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.cells[7][4], Some(PlayerId(1)));
        assert_eq!(snap.active_player, PlayerId(2));
        assert!(!snap.terminal);
        assert_eq!(snap.players.len(), 4);
    }
}
