//! Four-in-a-row engine: board with the overwrite rule, player roster, turn
//! rotation and win detection.

mod board;
mod player;
mod state;
mod turn;

pub use board::{Board, Cell, Direction, Landing, Position, WinSet, WIN_LENGTH};
pub use player::{default_roster, Player, PlayerId, MAX_PLAYERS};
pub use state::{BoardConfig, BoardSnapshot, GameState, MoveResult};
pub use turn::TurnController;
