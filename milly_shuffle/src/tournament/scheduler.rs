//! Team-to-match scheduling.

use std::cmp::Reverse;

use super::models::{Match, Player, Team};

/// Sort key for a team: strongest first.
///
/// Every team has exactly two players, so comparing totals orders teams the
/// same way as comparing averages.
fn strength_key(team: &Team, roster: &[Player]) -> (Reverse<u32>, Reverse<u32>, u32) {
    let [a, b] = team.players.map(|id| &roster[id]);
    (
        Reverse(a.points() + b.points()),
        Reverse(a.game_count() + b.game_count()),
        a.seed().min(b.seed()),
    )
}

/// Order teams by strength and pit neighbours against each other.
///
/// The strongest two teams meet on the first court, the next two on the
/// second, and so on. An odd team out is left unscheduled.
pub fn schedule_matches(teams: Vec<Team>, roster: &[Player]) -> Vec<Match> {
    let mut sorted = teams;
    sorted.sort_by_cached_key(|team| strength_key(team, roster));

    sorted
        .chunks_exact(2)
        .map(|pair| Match {
            team1: pair[0],
            team2: pair[1],
        })
        .collect()
}
