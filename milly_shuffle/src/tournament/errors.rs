//! Error types for the tournament module.

use thiserror::Error;

/// Result type for tournament operations
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Tournament errors
///
/// Every variant except [`TournamentError::InvalidConfiguration`] is
/// recoverable: the tournament is left exactly as it was before the failed
/// call, so the caller can correct its input and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    /// Setup parameters can't produce a playable tournament
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Every configured round has already been played
    #[error("Tournament complete: all {rounds} rounds have been played")]
    TournamentComplete { rounds: u32 },

    /// A round was drawn and is still waiting for its results
    #[error("Round {round} is still waiting for results")]
    RoundInProgress { round: u32 },

    /// Results were submitted but no round is waiting for them
    #[error("No round is waiting for results")]
    NoRoundInProgress,

    /// Number of submitted results doesn't match the number of matches
    #[error("Expected {expected} results, got {actual}")]
    ResultCountMismatch { expected: usize, actual: usize },

    /// A submitted score pair can't decide a winner
    #[error("Invalid score {score1}-{score2} for match {match_index}: {reason}")]
    InvalidScore {
        match_index: usize,
        score1: u32,
        score2: u32,
        reason: &'static str,
    },

    /// Applying the results would overflow a player's points or game count
    #[error("Results would overflow the totals of {player}")]
    StatOverflow { player: String },

    /// Snapshot couldn't be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TournamentError {
    /// Whether the failed call left the tournament untouched and can be retried
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfiguration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TournamentError::ResultCountMismatch {
            expected: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "Expected 2 results, got 1");

        let err = TournamentError::InvalidScore {
            match_index: 0,
            score1: 4,
            score2: 4,
            reason: "tied",
        };
        assert_eq!(err.to_string(), "Invalid score 4-4 for match 0: tied");
    }

    #[test]
    fn test_recoverability() {
        assert!(!TournamentError::InvalidConfiguration("odd roster".to_string()).is_recoverable());
        assert!(TournamentError::TournamentComplete { rounds: 3 }.is_recoverable());
        assert!(TournamentError::NoRoundInProgress.is_recoverable());
        assert!(
            TournamentError::StatOverflow {
                player: "p1".to_string()
            }
            .is_recoverable()
        );
    }
}
