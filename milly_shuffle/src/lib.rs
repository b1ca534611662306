//! # Milly Shuffle
//!
//! A shuffle doubles tournament engine. Every round players are re-partnered
//! into two-player teams, teams are drawn into matches, and the results feed
//! the ranking used to form the next round.
//!
//! ## Round lifecycle
//!
//! - **Byes**: `N % 4` players sit out, chosen at random among those with
//!   the fewest byes so far, and are credited a win at the first-to target
//! - **Partnering**: the best-ranked player takes the lowest-ranked player
//!   they haven't partnered yet
//! - **Scheduling**: teams are ordered by combined record and neighbours
//!   play each other
//! - **Results**: winners earn a point and their games, losers their games
//!
//! ## Core Modules
//!
//! - [`tournament`]: Players, teams, the pairing engine, and the round
//!   orchestrator
//!
//! ## Example
//!
//! ```
//! use milly_shuffle::Tournament;
//!
//! let mut tournament = Tournament::create(&["a", "b", "c", "d", "e", "f"], 2, 11)?;
//! let draw = tournament.advance_round()?;
//! assert_eq!(draw.byes.len(), 2);
//! # Ok::<(), milly_shuffle::TournamentError>(())
//! ```

/// Tournament engine: data model, pairing, scheduling, and results.
pub mod tournament;
pub use tournament::{
    RoundDraw, Standing, Tournament, TournamentConfig, TournamentError, TournamentResult,
    TournamentState,
};
