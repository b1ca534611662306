/// Property-based tests for round drawing using proptest
///
/// These tests play whole tournaments over random roster sizes, bye choices
/// and scores, and check the invariants every round must keep.
use milly_shuffle::tournament::{
    RandomByePicker, ScriptedByePicker, Tournament, TournamentConfig, bye_slots,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};

// Strategy to generate an even roster size from 4 to 32
fn roster_size_strategy() -> impl Strategy<Value = usize> {
    (2usize..=16).prop_map(|half| half * 2)
}

// Strategy to generate a decisive score pair for a first-to-11 match
fn score_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..11, any::<bool>()).prop_map(|(loser, team1_wins)| {
        if team1_wins { (11, loser) } else { (loser, 11) }
    })
}

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("player{}", i)).collect()
}

fn members(label: &str) -> Vec<String> {
    label.split('/').map(str::to_string).collect()
}

proptest! {
    #[test]
    fn test_every_player_placed_once_per_round(
        size in roster_size_strategy(),
        rounds in 1u32..6,
        picks in prop::collection::vec(0usize..32, 0..20),
        scores in prop::collection::vec(score_strategy(), 64),
    ) {
        let mut tournament = Tournament::create(&names(size), rounds, 11)
            .unwrap()
            .with_bye_picker(ScriptedByePicker::new(picks));

        for _ in 0..rounds {
            let draw = tournament.advance_round().unwrap();
            prop_assert_eq!(draw.byes.len(), bye_slots(size));

            let mut seen = HashSet::new();
            for (a, b) in &draw.matches {
                for label in [a, b] {
                    let team = members(label);
                    prop_assert_eq!(team.len(), 2);
                    prop_assert_ne!(&team[0], &team[1], "player partnered with themselves");
                    for name in team {
                        prop_assert!(seen.insert(name), "player placed twice");
                    }
                }
            }
            for bye in &draw.byes {
                prop_assert!(seen.insert(bye.clone()), "bye player also playing");
            }
            prop_assert_eq!(seen.len(), size);

            let results = scores[..draw.matches.len()].to_vec();
            tournament.submit_results(&results).unwrap();
        }

        prop_assert!(tournament.is_complete());
    }

    #[test]
    fn test_byes_stay_balanced(
        half in 2usize..=16,
        rounds in 1u32..8,
        seed in any::<u64>(),
    ) {
        let size = half * 2;
        let picker = RandomByePicker::seeded(seed);
        let mut tournament = Tournament::create(&names(size), rounds, 11)
            .unwrap()
            .with_bye_picker(picker);

        for _ in 0..rounds {
            let before: HashMap<String, u32> = tournament
                .players()
                .iter()
                .map(|p| (p.name().to_string(), p.bye_count()))
                .collect();
            let min_before = before.values().copied().min().unwrap_or(0);

            let at_min = before.values().filter(|&&count| count == min_before).count();

            let draw = tournament.advance_round().unwrap();
            for (i, bye) in draw.byes.iter().enumerate() {
                // Byes go past the minimum only once the minimum set is used up
                let had = before[bye];
                if i < at_min {
                    prop_assert_eq!(had, min_before);
                } else {
                    prop_assert_eq!(had, min_before + 1);
                }
            }

            let counts: Vec<u32> = tournament.players().iter().map(|p| p.bye_count()).collect();
            let spread = counts.iter().max().unwrap() - counts.iter().min().unwrap();
            prop_assert!(spread <= 1, "bye counts spread by {}", spread);

            let results = vec![(11, 4); draw.matches.len()];
            tournament.submit_results(&results).unwrap();
        }
    }

    #[test]
    fn test_stats_never_decrease(
        size in roster_size_strategy(),
        rounds in 1u32..5,
        scores in prop::collection::vec(score_strategy(), 64),
        opponents_as_partners in any::<bool>(),
    ) {
        let mut config = TournamentConfig::new(rounds, 11);
        config.opponents_count_as_partners = opponents_as_partners;
        let mut tournament = Tournament::new(&names(size), config)
            .unwrap()
            .with_bye_picker(ScriptedByePicker::default());

        for _ in 0..rounds {
            let before: Vec<(u32, u32)> = tournament
                .players()
                .iter()
                .map(|p| (p.points(), p.game_count()))
                .collect();

            let draw = tournament.advance_round().unwrap();
            let results = scores[..draw.matches.len()].to_vec();
            let standings = tournament.submit_results(&results).unwrap();

            for (player, (points, games)) in tournament.players().iter().zip(&before) {
                prop_assert!(player.points() >= *points);
                prop_assert!(player.points() - points <= 1);
                prop_assert!(player.game_count() >= *games);
            }

            // Strict total order: no two rows compare equal
            for window in standings.windows(2) {
                let (a, b) = (&window[0], &window[1]);
                prop_assert!(
                    (a.points, a.game_count, std::cmp::Reverse(a.seed))
                        > (b.points, b.game_count, std::cmp::Reverse(b.seed))
                );
            }
        }
    }

    #[test]
    fn test_repeats_only_when_unavoidable(
        size in roster_size_strategy(),
        rounds in 1u32..6,
        scores in prop::collection::vec(score_strategy(), 64),
    ) {
        let mut tournament = Tournament::create(&names(size), rounds, 11)
            .unwrap()
            .with_bye_picker(ScriptedByePicker::default());

        for _ in 0..rounds {
            let partners_before: HashMap<String, BTreeSet<String>> = tournament
                .players()
                .iter()
                .map(|p| (p.name().to_string(), p.previous_partners().clone()))
                .collect();
            let ranked_before: Vec<String> =
                tournament.standings().into_iter().map(|s| s.name).collect();

            let draw = tournament.advance_round().unwrap();
            let partner_of: HashMap<String, String> = draw
                .matches
                .iter()
                .flat_map(|(a, b)| [members(a), members(b)])
                .map(|team| (team[0].clone(), team[1].clone()))
                .collect();

            // Replay formation order: anchors are taken from the top of the
            // ranking, each removing itself and its partner from the pool
            let mut pool: Vec<String> = ranked_before
                .into_iter()
                .filter(|name| !draw.byes.contains(name))
                .collect();
            while !pool.is_empty() {
                let anchor = pool.remove(0);
                let partner = partner_of.get(&anchor).cloned();
                prop_assert!(partner.is_some(), "{} should anchor a team", anchor);
                let partner = partner.unwrap();

                let history = &partners_before[&anchor];
                if history.contains(&partner) {
                    prop_assert!(
                        pool.iter().all(|name| history.contains(name)),
                        "{} repeated with {} while a new partner was free",
                        anchor,
                        partner
                    );
                }

                let pos = pool.iter().position(|name| *name == partner);
                prop_assert!(pos.is_some());
                pool.remove(pos.unwrap());
            }

            let results = scores[..draw.matches.len()].to_vec();
            tournament.submit_results(&results).unwrap();
        }
    }
}
