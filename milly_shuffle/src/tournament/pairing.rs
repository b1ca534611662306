//! Bye selection and team formation.
//!
//! The engine only reads the roster. It returns a [`RoundPlan`] and leaves it
//! to the tournament to record byes and partnerships.

use log::{debug, warn};

use super::bye_picker::ByePicker;
use super::models::{Player, PlayerId, Team};

/// Byes and teams for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPlan {
    /// Players sitting out, in the order they were picked
    pub byes: Vec<PlayerId>,
    /// Teams in formation order, stronger anchor first
    pub teams: Vec<Team>,
}

/// Number of players sitting out a round for a given roster size
pub fn bye_slots(roster_size: usize) -> usize {
    roster_size % 4
}

/// Forms the byes and teams of a round from a read-only roster
pub struct PairingEngine<'a> {
    roster: &'a [Player],
    opponents_count_as_partners: bool,
}

impl<'a> PairingEngine<'a> {
    pub fn new(roster: &'a [Player], opponents_count_as_partners: bool) -> Self {
        Self {
            roster,
            opponents_count_as_partners,
        }
    }

    /// Draw the byes, then partner everyone else
    pub fn plan_round(&self, picker: &mut dyn ByePicker) -> RoundPlan {
        let mut pool: Vec<PlayerId> = (0..self.roster.len()).collect();
        let byes = self.select_byes(&mut pool, picker);
        self.rank(&mut pool);
        let teams = self.form_teams(pool);
        RoundPlan { byes, teams }
    }

    /// Remove `roster.len() % 4` players from the pool.
    ///
    /// Each pick is made among the players with the fewest byes still in the
    /// pool, so nobody sits out twice while someone else has sat out less.
    pub fn select_byes(
        &self,
        pool: &mut Vec<PlayerId>,
        picker: &mut dyn ByePicker,
    ) -> Vec<PlayerId> {
        let slots = bye_slots(self.roster.len());
        let mut byes = Vec::with_capacity(slots);

        for _ in 0..slots {
            let Some(min_byes) = pool.iter().map(|&id| self.roster[id].bye_count()).min() else {
                break;
            };

            let candidates: Vec<usize> = pool
                .iter()
                .enumerate()
                .filter(|&(_, &id)| self.roster[id].bye_count() == min_byes)
                .map(|(pos, _)| pos)
                .collect();

            let choice = picker.pick(candidates.len()) % candidates.len();
            let id = pool.remove(candidates[choice]);
            debug!(
                "Bye for {} (had {} byes, {} candidates)",
                self.roster[id].name(),
                min_byes,
                candidates.len()
            );
            byes.push(id);
        }

        byes
    }

    /// Sort ids best first
    pub fn rank(&self, pool: &mut [PlayerId]) {
        pool.sort_by(|&a, &b| self.roster[a].cmp_rank(&self.roster[b]));
    }

    /// Pair a ranked pool head to tail.
    ///
    /// The best remaining player takes the lowest-ranked player they haven't
    /// partnered before. When every remaining player is a repeat, the
    /// lowest-ranked one is taken anyway. The pool must have an even size;
    /// a lone leftover player is not placed in a team.
    pub fn form_teams(&self, ranked: Vec<PlayerId>) -> Vec<Team> {
        let mut pool = ranked;
        let mut teams = Vec::with_capacity(pool.len() / 2);

        while !pool.is_empty() {
            let top = pool.remove(0);
            if pool.is_empty() {
                warn!("{} left without a partner", self.roster[top].name());
                break;
            }

            let pos = match pool.iter().rposition(|&id| !self.blocks(top, id)) {
                Some(pos) => pos,
                None => {
                    warn!(
                        "{} has partnered every remaining player, repeating with the lowest ranked",
                        self.roster[top].name()
                    );
                    pool.len() - 1
                }
            };
            let partner = pool.remove(pos);

            debug!(
                "Partnered {} with {}",
                self.roster[top].name(),
                self.roster[partner].name()
            );
            teams.push(Team::new(top, partner));
        }

        teams
    }

    fn blocks(&self, top: PlayerId, candidate: PlayerId) -> bool {
        if top == candidate {
            return true;
        }
        let player = &self.roster[top];
        let name = self.roster[candidate].name();
        player.has_partnered(name) || (self.opponents_count_as_partners && player.has_faced(name))
    }
}
