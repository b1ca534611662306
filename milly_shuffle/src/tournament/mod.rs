//! Shuffle doubles tournaments.
//!
//! This module provides the round engine:
//! - Fair bye assignment when the roster isn't a multiple of four
//! - High/low partnering that avoids repeat partners
//! - Strength-ordered match scheduling
//! - Result validation and cumulative standings
//!
//! ## Example
//!
//! ```
//! use milly_shuffle::tournament::{Tournament, TournamentConfig};
//!
//! let players = ["Ann", "Bo", "Cy", "Di", "Ed", "Flo", "Gus", "Hal"];
//! let mut tournament = Tournament::new(&players, TournamentConfig::from_best_of(3, 21))?;
//!
//! let draw = tournament.advance_round()?;
//! assert_eq!(draw.matches.len(), 2);
//! assert!(draw.byes.is_empty());
//!
//! let standings = tournament.submit_results(&[(11, 7), (9, 11)])?;
//! assert_eq!(standings[0].points, 1);
//! # Ok::<(), milly_shuffle::tournament::TournamentError>(())
//! ```

pub mod bye_picker;
pub mod errors;
pub mod manager;
pub mod models;
pub mod pairing;
pub mod results;
pub mod scheduler;

pub use bye_picker::{ByePicker, RandomByePicker, ScriptedByePicker};
pub use errors::{TournamentError, TournamentResult};
pub use manager::Tournament;
pub use models::{
    Credit, GRAND_FINALISTS, MIN_PLAYERS, Match, MatchRecord, Player, PlayerId, RoundDraw,
    RoundRecord, Standing, Team, TournamentConfig, TournamentSnapshot, TournamentState,
};
pub use pairing::{PairingEngine, RoundPlan, bye_slots};
pub use results::{ResultAggregator, RoundOutcome, Score, ScoredMatch};
pub use scheduler::schedule_matches;
