use std::path::PathBuf;

/// Errors returned when a disc cannot be dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("game already has a winner")]
    GameAlreadyWon,
}

/// Errors raised when seating a roster.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("roster has {count} players, at most {max} can be seated")]
    TooManyPlayers { count: usize, max: usize },
}

/// Errors that can occur when drawing from a content pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("content collection is empty")]
    Empty,

    #[error("no eligible content remains")]
    Exhausted,
}

/// Errors raised by the timed round controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("time limit {value}s is outside [{min}, {max}]")]
    TimeLimitOutOfRange { value: u32, min: u32, max: u32 },

    #[error("time limit cannot change while a round is running")]
    NotConfigurable,
}

/// Errors raised by the quiz gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("no question is pending")]
    NotPending,

    #[error("a question is already pending for column {0}")]
    AlreadyPending(usize),

    #[error("game is over")]
    GameOver,

    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("pool error: {0}")]
    Pool(#[from] PoolError),
}

/// Errors that can occur when reading content collections.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse content JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::InvalidColumn {
            column: 12,
            cols: 10,
        };
        assert_eq!(
            err.to_string(),
            "column 12 is out of range (board has 10 columns)"
        );
        assert_eq!(MoveError::ColumnFull(3).to_string(), "column 3 is full");
    }

    #[test]
    fn test_roster_error_display() {
        let err = RosterError::TooManyPlayers {
            count: 300,
            max: 255,
        };
        assert_eq!(
            err.to_string(),
            "roster has 300 players, at most 255 can be seated"
        );
    }

    #[test]
    fn test_round_error_display() {
        let err = RoundError::TimeLimitOutOfRange {
            value: 10,
            min: 30,
            max: 300,
        };
        assert_eq!(err.to_string(), "time limit 10s is outside [30, 300]");
    }

    #[test]
    fn test_quiz_error_wraps_pool_error() {
        let err: QuizError = PoolError::Empty.into();
        assert_eq!(err.to_string(), "pool error: content collection is empty");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("round.tick_millis must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: round.tick_millis must be > 0"
        );
    }
}
