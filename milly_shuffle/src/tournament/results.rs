//! Turning submitted scores into player credits.
//!
//! [`ResultAggregator::aggregate`] validates the whole submission before
//! producing anything, so a rejected submission never reaches the roster.
//! That includes credits that would push a player's totals past `u32::MAX`.

use super::errors::{TournamentError, TournamentResult};
use super::models::{Credit, Match, Player, PlayerId};

/// Scores for one match, in `(team1, team2)` order
pub type Score = (u32, u32);

/// A match with its validated score and credited teams
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    pub fixture: Match,
    pub score: Score,
}

impl ScoredMatch {
    /// Whether team1 took the match
    pub fn team1_won(&self) -> bool {
        self.score.0 > self.score.1
    }
}

/// Everything a round's results change, ready to be committed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Matches in court order with team accumulators filled in
    pub matches: Vec<ScoredMatch>,
    /// Per-player credits, byes included
    pub credits: Vec<(PlayerId, Credit)>,
    /// Players who faced each other, one entry per direction
    pub opponents: Vec<(PlayerId, PlayerId)>,
}

/// Validates a round's scores and works out what each player earned
pub struct ResultAggregator<'a> {
    roster: &'a [Player],
    matches: &'a [Match],
    byes: &'a [PlayerId],
    first_to: u32,
}

impl<'a> ResultAggregator<'a> {
    pub fn new(
        roster: &'a [Player],
        matches: &'a [Match],
        byes: &'a [PlayerId],
        first_to: u32,
    ) -> Self {
        Self {
            roster,
            matches,
            byes,
            first_to,
        }
    }

    /// Check that there's one decisive score per match
    pub fn validate(&self, results: &[Score]) -> TournamentResult<()> {
        if results.len() != self.matches.len() {
            return Err(TournamentError::ResultCountMismatch {
                expected: self.matches.len(),
                actual: results.len(),
            });
        }

        for (match_index, &(score1, score2)) in results.iter().enumerate() {
            let reason = if score1 == 0 && score2 == 0 {
                "no games recorded"
            } else if score1 == score2 {
                "matches can't end in a tie"
            } else {
                continue;
            };

            return Err(TournamentError::InvalidScore {
                match_index,
                score1,
                score2,
                reason,
            });
        }

        Ok(())
    }

    /// Validate `results`, then compute the round's credits.
    ///
    /// The winning team and both its players earn a point plus the winning
    /// score in games; the losers earn their score in games. Each bye earns
    /// a point plus `first_to` games.
    ///
    /// Fails with [`TournamentError::StatOverflow`] if any credit would
    /// overflow a player's current totals.
    pub fn aggregate(&self, results: &[Score]) -> TournamentResult<RoundOutcome> {
        self.validate(results)?;

        let mut outcome = RoundOutcome::default();

        for (fixture, &score) in self.matches.iter().zip(results) {
            let mut scored = ScoredMatch {
                fixture: *fixture,
                score,
            };
            let high = score.0.max(score.1);
            let low = score.0.min(score.1);
            let win = Credit {
                points: 1,
                games: high,
            };
            let loss = Credit {
                points: 0,
                games: low,
            };

            let (winner, loser) = if scored.team1_won() {
                (&mut scored.fixture.team1, &mut scored.fixture.team2)
            } else {
                (&mut scored.fixture.team2, &mut scored.fixture.team1)
            };
            winner.credit(win);
            loser.credit(loss);
            outcome
                .credits
                .extend(winner.players.iter().map(|&id| (id, win)));
            outcome
                .credits
                .extend(loser.players.iter().map(|&id| (id, loss)));

            for &a in &fixture.team1.players {
                for &b in &fixture.team2.players {
                    outcome.opponents.push((a, b));
                    outcome.opponents.push((b, a));
                }
            }

            outcome.matches.push(scored);
        }

        let bye_credit = Credit {
            points: 1,
            games: self.first_to,
        };
        outcome
            .credits
            .extend(self.byes.iter().map(|&id| (id, bye_credit)));

        self.check_totals(&outcome.credits)?;
        Ok(outcome)
    }

    fn check_totals(&self, credits: &[(PlayerId, Credit)]) -> TournamentResult<()> {
        for &(id, credit) in credits {
            let player = &self.roster[id];
            let fits = player.points().checked_add(credit.points).is_some()
                && player.game_count().checked_add(credit.games).is_some();
            if !fits {
                return Err(TournamentError::StatOverflow {
                    player: player.name().to_string(),
                });
            }
        }
        Ok(())
    }
}
