//! Quiz-gated moves: a drop request draws a question, and the disc only
//! lands if the question is answered correctly.

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::content::{ContentPool, Drawn, QuizItem};
use crate::error::{MoveError, QuizError};
use crate::game::{BoardConfig, BoardSnapshot, GameState, MoveResult, PlayerId};
use crate::observer::{Observers, SubscriptionId};

/// A question waiting for an answer, and the column it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub column: usize,
    drawn: Drawn,
    revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    #[default]
    Idle,
    Pending(PendingMove),
}

/// What happened when a move request or an answer was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The disc landed.
    Moved(MoveResult),
    /// The answer was correct but the board refused the move.
    Rejected(MoveError),
    /// The answer was wrong; the turn passed without a move.
    Penalized { next_player: PlayerId },
}

/// Result of [`QuizGate::request_drop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropRequest {
    /// A question was drawn and must be answered first.
    AwaitingAnswer,
    /// Gating is disabled and the move was applied directly.
    Resolved(GateOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateSnapshot {
    pub pending: bool,
    pub column: Option<usize>,
    pub question: Option<QuizItem>,
    pub revealed: bool,
    pub remaining_questions: usize,
}

/// Mediates between drop requests, the question pool and the board.
pub struct QuizGate<R = StdRng> {
    game: GameState,
    pool: ContentPool<QuizItem, R>,
    phase: GatePhase,
    gated: bool,
    board_observers: Observers<BoardSnapshot>,
    gate_observers: Observers<GateSnapshot>,
}

impl<R: Rng> QuizGate<R> {
    pub fn new(config: &BoardConfig, game: GameState, pool: ContentPool<QuizItem, R>) -> Self {
        QuizGate {
            game,
            pool,
            phase: GatePhase::Idle,
            gated: config.quiz_gate,
            board_observers: Observers::new(),
            gate_observers: Observers::new(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, GatePhase::Pending(_))
    }

    /// The question currently awaiting an answer.
    pub fn current_question(&self) -> Option<&QuizItem> {
        match self.phase {
            GatePhase::Pending(pending) => self.pool.get(pending.drawn),
            GatePhase::Idle => None,
        }
    }

    /// Ask to drop a disc in `column` for the active player.
    ///
    /// With gating on, this draws a question and waits for [`answer`](Self::answer);
    /// the board is not touched yet.
    pub fn request_drop(&mut self, column: usize) -> Result<DropRequest, QuizError> {
        if let GatePhase::Pending(pending) = self.phase {
            warn!(column, pending = pending.column, "drop requested while a question is pending");
            return Err(QuizError::AlreadyPending(pending.column));
        }
        if self.game.is_terminal() {
            warn!(column, "drop requested after the game was won");
            return Err(QuizError::GameOver);
        }
        let cols = self.game.board().cols();
        if column >= cols {
            return Err(QuizError::InvalidColumn { column, cols });
        }

        if !self.gated {
            let outcome = self.commit(column);
            self.notify_board();
            return Ok(DropRequest::Resolved(outcome));
        }

        let drawn = self.pool.draw()?;
        self.phase = GatePhase::Pending(PendingMove {
            column,
            drawn,
            revealed: false,
        });
        debug!(column, question = drawn.index(), "question pending");
        self.notify_gate();
        Ok(DropRequest::AwaitingAnswer)
    }

    /// Toggle whether the pending question's answer is shown.
    pub fn flip(&mut self) -> Result<bool, QuizError> {
        let GatePhase::Pending(ref mut pending) = self.phase else {
            return Err(QuizError::NotPending);
        };
        pending.revealed = !pending.revealed;
        let revealed = pending.revealed;
        self.notify_gate();
        Ok(revealed)
    }

    /// Resolve the pending question.
    ///
    /// A correct answer forwards the move to the board and passes the turn
    /// unless the move won. A wrong answer passes the turn without a move.
    /// Either way the question is consumed and the gate returns to idle.
    pub fn answer(&mut self, correct: bool) -> Result<GateOutcome, QuizError> {
        let GatePhase::Pending(pending) = self.phase else {
            return Err(QuizError::NotPending);
        };

        let outcome = if correct {
            self.commit(pending.column)
        } else {
            self.game.advance_turn();
            let next_player = self.game.active_player();
            info!(next = %next_player, "wrong answer, turn passes");
            GateOutcome::Penalized { next_player }
        };

        if !self.pool.consume(pending.drawn) {
            warn!(
                question = pending.drawn.index(),
                "pending question was no longer in the pool"
            );
        }
        self.phase = GatePhase::Idle;
        self.notify_board();
        self.notify_gate();
        Ok(outcome)
    }

    pub fn mark_correct(&mut self) -> Result<GateOutcome, QuizError> {
        self.answer(true)
    }

    pub fn mark_incorrect(&mut self) -> Result<GateOutcome, QuizError> {
        self.answer(false)
    }

    fn commit(&mut self, column: usize) -> GateOutcome {
        match self.game.play(column) {
            Ok(result) => GateOutcome::Moved(result),
            Err(err) => {
                warn!(column, error = %err, "move rejected");
                GateOutcome::Rejected(err)
            }
        }
    }

    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        let renamed = self.game.rename_player(id, name);
        if renamed {
            self.notify_board();
        }
        renamed
    }

    /// Start a new game: clear the board, refill the question pool and drop
    /// any pending question.
    pub fn reset(&mut self) {
        self.game.reset();
        self.pool.refill();
        self.phase = GatePhase::Idle;
        self.notify_board();
        self.notify_gate();
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.game.snapshot()
    }

    pub fn snapshot(&self) -> GateSnapshot {
        let (column, revealed) = match self.phase {
            GatePhase::Pending(p) => (Some(p.column), p.revealed),
            GatePhase::Idle => (None, false),
        };
        GateSnapshot {
            pending: self.is_pending(),
            column,
            question: self.current_question().cloned(),
            revealed,
            remaining_questions: self.pool.remaining(),
        }
    }

    pub fn subscribe_board(&mut self, f: impl FnMut(&BoardSnapshot) + 'static) -> SubscriptionId {
        self.board_observers.subscribe(f)
    }

    pub fn subscribe_gate(&mut self, f: impl FnMut(&GateSnapshot) + 'static) -> SubscriptionId {
        self.gate_observers.subscribe(f)
    }

    pub fn unsubscribe_board(&mut self, id: SubscriptionId) -> bool {
        self.board_observers.unsubscribe(id)
    }

    pub fn unsubscribe_gate(&mut self, id: SubscriptionId) -> bool {
        self.gate_observers.unsubscribe(id)
    }

    fn notify_board(&mut self) {
        if !self.board_observers.is_empty() {
            let snapshot = self.board_snapshot();
            self.board_observers.notify(&snapshot);
        }
    }

    fn notify_gate(&mut self) {
        if !self.gate_observers.is_empty() {
            let snapshot = self.snapshot();
            self.gate_observers.notify(&snapshot);
        }
    }
}
