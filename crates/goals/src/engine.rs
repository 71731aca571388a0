//! Goal validation engine.
//!
//! Pure decision logic over a ledger snapshot. A proposal moves through
//! `Proposed -> Scored -> Validated`, and the caller commits the returned
//! [`LedgerChange`]. Any gate may reject with a [`GoalRejection`].
//!
//! Gates on the append path run in this order:
//!
//! 1. score resolution (fill in the next score when the caller omitted it)
//! 2. order continuity (first goal is order 1, then previous order + 1)
//! 3. side consistency (per-fixture [`ScoreConsistencyRule`])
//! 4. uniqueness of `(match_date, order)`
//! 5. participants exist in the player registry
//!
//! Nothing here locks. Callers must serialize mutations of the same match.

use crate::fixture::MatchContext;
use crate::goal::{GoalEvent, GoalKey};
use crate::ledger::{GoalLedger, LedgerChange};
use crate::registry::PlayerRegistry;
use crate::rejection::GoalRejection;
use crate::rules::{ScoreChange, ScoreConsistencyRule, rule_for};
use crate::score::Score;

/// Attach the implied next score when the candidate has none.
///
/// A candidate that already carries a score is returned untouched; it is still
/// checked by the later gates. Fails only when the last score has no successor.
pub fn resolve_score(
    candidate: GoalEvent,
    match_ctx: &MatchContext,
    ledger: &GoalLedger,
) -> Result<GoalEvent, GoalRejection> {
    let score = candidate_score(&candidate, match_ctx, ledger)?;
    Ok(candidate.with_score(score))
}

fn candidate_score(
    candidate: &GoalEvent,
    match_ctx: &MatchContext,
    ledger: &GoalLedger,
) -> Result<Score, GoalRejection> {
    match candidate.score() {
        Some(score) => Ok(score),
        None => ledger
            .last_score_for_match(candidate.match_date())
            .next(candidate.is_team_goal(), match_ctx.is_home),
    }
}

/// Order continuity: the candidate must directly follow the last recorded goal.
pub fn check_order_continuity(
    match_date: chrono::NaiveDate,
    candidate: Score,
    ledger: &GoalLedger,
) -> Result<(), GoalRejection> {
    match ledger.last_event_for_match(match_date).and_then(|g| g.score()) {
        None if candidate.order() == 1 => Ok(()),
        None => Err(GoalRejection::NonFirstGoal {
            match_date,
            candidate,
        }),
        Some(previous) if previous.order().checked_add(1) == Some(candidate.order()) => Ok(()),
        Some(previous) => Err(GoalRejection::OutOfSequenceGoal {
            match_date,
            previous,
            candidate,
        }),
    }
}

/// Side consistency against the previous score, using the fixture's rule.
pub fn check_side_consistency(
    goal: &GoalEvent,
    candidate: Score,
    match_ctx: &MatchContext,
    ledger: &GoalLedger,
) -> Result<(), GoalRejection> {
    let change = ScoreChange {
        match_date: goal.match_date(),
        side: goal.side(),
        previous: ledger.last_score_for_match(goal.match_date()),
        candidate,
    };
    rule_for(match_ctx.fixture()).check(&change)
}

/// Every named participant must be on the roster.
pub fn check_participants<P>(goal: &GoalEvent, players: &P) -> Result<(), GoalRejection>
where
    P: PlayerRegistry + ?Sized,
{
    for player in [goal.scored_by(), goal.assisted_by()].into_iter().flatten() {
        if !players.exists(player) {
            return Err(GoalRejection::UnknownPlayer(player.clone()));
        }
    }
    Ok(())
}

/// Decide whether a proposed goal may be appended to the ledger.
///
/// On success returns the change to apply; the recorded goal always carries a score.
pub fn decide_append<P>(
    candidate: GoalEvent,
    match_ctx: &MatchContext,
    ledger: &GoalLedger,
    players: &P,
) -> Result<LedgerChange, GoalRejection>
where
    P: PlayerRegistry + ?Sized,
{
    if candidate.match_date() != match_ctx.match_date {
        return Err(GoalRejection::MatchNotFound(candidate.match_date()));
    }

    let score = candidate_score(&candidate, match_ctx, ledger)?;
    let goal = candidate.with_score(score);
    let key = GoalKey {
        match_date: goal.match_date(),
        order: score.order(),
    };

    check_order_continuity(key.match_date, score, ledger)?;
    check_side_consistency(&goal, score, match_ctx, ledger)?;

    if ledger.contains(key) {
        return Err(GoalRejection::DuplicateGoal {
            match_date: key.match_date,
            order: key.order,
        });
    }

    check_participants(&goal, players)?;

    Ok(LedgerChange::GoalRecorded(goal))
}

/// Decide whether a goal may be removed.
///
/// Only the goal whose order equals the number of goals recorded for its match
/// can be removed. The change carries the goal as stored, not the target.
pub fn decide_removal(target: &GoalEvent, ledger: &GoalLedger) -> Result<LedgerChange, GoalRejection> {
    let match_date = target.match_date();
    let goal_count = ledger.events_for_match(match_date).len();

    let key = match target.key() {
        Some(key) if key.order as usize == goal_count => key,
        _ => {
            return Err(GoalRejection::NotLastGoal {
                match_date,
                order: target.order(),
                goal_count,
            });
        }
    };

    let stored = ledger
        .goals()
        .iter()
        .find(|g| g.key() == Some(key))
        .ok_or(GoalRejection::GoalNotFound {
            match_date: key.match_date,
            order: key.order,
        })?;

    Ok(LedgerChange::GoalRemoved(stored.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use scoreline_core::{OpponentName, PlayerName};

    use crate::rejection::ScoringSide;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 18).unwrap()
    }

    fn player(name: &str) -> PlayerName {
        PlayerName::new(name).unwrap()
    }

    fn roster() -> Vec<PlayerName> {
        vec![player("Thijs"), player("Mark"), player("A")]
    }

    fn home_match() -> MatchContext {
        MatchContext::new(date(), OpponentName::new("TestOpponent").unwrap(), true)
    }

    fn away_match() -> MatchContext {
        MatchContext::new(date(), OpponentName::new("TestOpponent").unwrap(), false)
    }

    fn score(home: u32, away: u32) -> Score {
        Score::new(home, away).unwrap()
    }

    /// Apply a proposal and return the recorded goal.
    fn commit(ledger: &mut GoalLedger, candidate: GoalEvent, m: &MatchContext) -> GoalEvent {
        let change = decide_append(candidate, m, ledger, &roster()).unwrap();
        ledger.apply(&change);
        assert_eq!(change.change_type(), "goal.recorded");
        change.goal().clone()
    }

    fn away_ledger() -> GoalLedger {
        [
            GoalEvent::team(date(), player("Thijs")).with_score(score(0, 1)),
            GoalEvent::team(date(), player("Mark")).with_score(score(0, 2)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn home_fixture_scenario() {
        let m = home_match();
        let mut ledger = GoalLedger::new();

        let first = commit(&mut ledger, GoalEvent::team(date(), player("A")), &m);
        assert_eq!(first.score(), Some(score(1, 0)));
        assert_eq!(first.order(), Some(1));

        let second = commit(&mut ledger, GoalEvent::opponent(date()), &m);
        assert_eq!(second.score(), Some(score(1, 1)));
        assert_eq!(second.order(), Some(2));

        // Score did not move: its order repeats the previous goal's order.
        let third = GoalEvent::team(date(), player("A")).with_score(score(1, 1));
        let err = decide_append(third, &m, &ledger, &roster()).unwrap_err();
        assert_eq!(
            err,
            GoalRejection::OutOfSequenceGoal {
                match_date: date(),
                previous: score(1, 1),
                candidate: score(1, 1),
            }
        );
    }

    #[test]
    fn away_fixture_resolves_team_goal_into_away_column() {
        let m = away_match();
        let mut ledger = GoalLedger::new();
        let goal = commit(&mut ledger, GoalEvent::team(date(), player("Thijs")), &m);
        assert_eq!(goal.score(), Some(score(0, 1)));

        let goal = commit(&mut ledger, GoalEvent::opponent(date()), &m);
        assert_eq!(goal.score(), Some(score(1, 1)));
    }

    #[test]
    fn away_fixture_rejects_both_columns_moving() {
        let ledger: GoalLedger = [GoalEvent::team(date(), player("Thijs")).with_score(score(0, 1))]
            .into_iter()
            .collect();
        let candidate = GoalEvent::opponent(date()).with_score(score(2, 0));

        let err = decide_append(candidate, &away_match(), &ledger, &roster()).unwrap_err();
        assert!(matches!(err, GoalRejection::BothSidesChanged { .. }));
    }

    #[test]
    fn away_fixture_accepts_explicit_next_score() {
        let candidate = GoalEvent::team(date(), player("Thijs")).with_score(score(0, 3));
        let change = decide_append(candidate, &away_match(), &away_ledger(), &roster()).unwrap();
        assert!(matches!(change, LedgerChange::GoalRecorded(_)));
    }

    #[test]
    fn first_goal_must_be_order_one() {
        let candidate = GoalEvent::opponent(date()).with_score(score(0, 2));
        let err = decide_append(candidate, &home_match(), &GoalLedger::new(), &roster()).unwrap_err();
        assert_eq!(
            err,
            GoalRejection::NonFirstGoal {
                match_date: date(),
                candidate: score(0, 2),
            }
        );
    }

    #[test]
    fn skipping_ahead_is_out_of_sequence() {
        let ledger: GoalLedger = [GoalEvent::team(date(), player("Thijs")).with_score(score(1, 0))]
            .into_iter()
            .collect();
        let candidate = GoalEvent::opponent(date()).with_score(score(4, 1));
        let err = decide_append(candidate, &home_match(), &ledger, &roster()).unwrap_err();
        assert!(matches!(err, GoalRejection::OutOfSequenceGoal { .. }));
    }

    #[test]
    fn home_fixture_wrong_column_is_rejected() {
        let ledger: GoalLedger = [GoalEvent::team(date(), player("Thijs")).with_score(score(1, 0))]
            .into_iter()
            .collect();
        let candidate = GoalEvent::team(date(), player("Thijs")).with_score(score(1, 1));
        let err = decide_append(candidate, &home_match(), &ledger, &roster()).unwrap_err();
        assert!(matches!(
            err,
            GoalRejection::WrongSideIncremented {
                side: ScoringSide::Team,
                ..
            }
        ));
    }

    #[test]
    fn unknown_players_are_rejected() {
        let candidate = GoalEvent::team(date(), player("John"));
        let err = decide_append(candidate, &home_match(), &GoalLedger::new(), &roster()).unwrap_err();
        assert_eq!(err, GoalRejection::UnknownPlayer(player("John")));
        assert_eq!(err.to_string(), "a player named John does not exist");

        let candidate =
            GoalEvent::new(date(), Some(player("thijs")), Some(player("Bill")), None).unwrap();
        let err = decide_append(candidate, &home_match(), &GoalLedger::new(), &roster()).unwrap_err();
        assert_eq!(err, GoalRejection::UnknownPlayer(player("Bill")));
    }

    #[test]
    fn candidate_for_another_date_is_rejected() {
        let other = date().succ_opt().unwrap();
        let err = decide_append(GoalEvent::opponent(other), &home_match(), &GoalLedger::new(), &roster())
            .unwrap_err();
        assert_eq!(err, GoalRejection::MatchNotFound(other));
    }

    #[test]
    fn other_matches_do_not_affect_resolution() {
        let other = date().succ_opt().unwrap();
        let ledger: GoalLedger = [GoalEvent::opponent(other).with_score(score(3, 0))]
            .into_iter()
            .collect();
        let goal = resolve_score(GoalEvent::opponent(date()), &home_match(), &ledger).unwrap();
        assert_eq!(goal.score(), Some(score(0, 1)));
    }

    #[test]
    fn only_the_last_goal_can_be_removed() {
        let ledger = away_ledger();

        let earlier = GoalEvent::opponent(date()).with_score(score(0, 1));
        let err = decide_removal(&earlier, &ledger).unwrap_err();
        assert!(matches!(err, GoalRejection::NotLastGoal { goal_count: 2, .. }));

        // The target only needs the right key; the change carries the stored goal.
        let last = GoalEvent::opponent(date()).with_score(score(0, 2));
        let change = decide_removal(&last, &ledger).unwrap();
        assert_eq!(
            change,
            LedgerChange::GoalRemoved(GoalEvent::team(date(), player("Mark")).with_score(score(0, 2)))
        );
    }

    #[test]
    fn last_order_missing_from_ledger_is_not_found() {
        // Two goals of the match share order 1, so order 2 is the count but absent.
        let ledger: GoalLedger = [
            GoalEvent::opponent(date()).with_score(score(1, 0)),
            GoalEvent::opponent(date()).with_score(score(0, 1)),
        ]
        .into_iter()
        .collect();
        let target = GoalEvent::opponent(date()).with_score(score(2, 0));
        assert_eq!(
            decide_removal(&target, &ledger).unwrap_err(),
            GoalRejection::GoalNotFound {
                match_date: date(),
                order: 2,
            }
        );
    }

    #[test]
    fn explicit_score_at_the_order_limit_is_rejected_without_panicking() {
        let candidate = GoalEvent::opponent(date()).with_score(score(u32::MAX - 2, 1));
        let err = decide_append(candidate, &home_match(), &GoalLedger::new(), &roster()).unwrap_err();
        assert!(matches!(err, GoalRejection::NonFirstGoal { .. }));

        assert!("4294967295-1".parse::<Score>().is_err());
    }

    #[test]
    fn resolution_fails_when_last_score_has_no_successor() {
        let ledger: GoalLedger = [GoalEvent::opponent(date()).with_score(score(u32::MAX - 2, 1))]
            .into_iter()
            .collect();
        let err = decide_append(GoalEvent::opponent(date()), &home_match(), &ledger, &roster()).unwrap_err();
        assert!(matches!(err, GoalRejection::InvalidScore(_)));
    }

    #[test]
    fn unscored_removal_target_is_rejected() {
        let err = decide_removal(&GoalEvent::opponent(date()), &away_ledger()).unwrap_err();
        assert!(matches!(err, GoalRejection::NotLastGoal { order: None, .. }));
    }

    fn any_match() -> impl Strategy<Value = MatchContext> {
        prop_oneof![Just(home_match()), Just(away_match())]
    }

    fn proposal() -> impl Strategy<Value = GoalEvent> {
        prop_oneof![
            Just(GoalEvent::opponent(date())),
            Just(GoalEvent::team(date(), player("Thijs"))),
            Just(GoalEvent::new(date(), Some(player("Mark")), Some(player("Thijs")), None).unwrap()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Resolved sequences always number goals 1..=N with home + away == order.
        #[test]
        fn resolved_sequences_are_contiguous(
            m in any_match(),
            proposals in prop::collection::vec(proposal(), 1..20),
        ) {
            let mut ledger = GoalLedger::new();
            for (idx, candidate) in proposals.into_iter().enumerate() {
                let goal = commit(&mut ledger, candidate, &m);
                let s = goal.score().unwrap();
                prop_assert_eq!(goal.order(), Some(idx as u32 + 1));
                prop_assert_eq!(s.home() + s.away(), idx as u32 + 1);
            }
        }

        /// Any explicit score whose order is not previous + 1 is out of sequence.
        #[test]
        fn wrong_order_is_always_out_of_sequence(
            m in any_match(),
            prefix in 1usize..6,
            home in 0u32..12,
            away in 0u32..12,
        ) {
            prop_assume!(home + away != prefix as u32 + 1);
            prop_assume!(home + away != 0);

            let mut ledger = GoalLedger::new();
            for _ in 0..prefix {
                commit(&mut ledger, GoalEvent::opponent(date()), &m);
            }
            let candidate = GoalEvent::opponent(date()).with_score(score(home, away));
            let is_out_of_sequence = matches!(
                decide_append(candidate, &m, &ledger, &roster()),
                Err(GoalRejection::OutOfSequenceGoal { .. })
            );
            prop_assert!(is_out_of_sequence);
        }

        /// Proposing then removing the same goal restores the ledger.
        #[test]
        fn propose_then_remove_round_trips(
            m in any_match(),
            prefix in prop::collection::vec(proposal(), 0..8),
            last in proposal(),
        ) {
            let mut ledger = GoalLedger::new();
            for candidate in prefix {
                commit(&mut ledger, candidate, &m);
            }
            let before = ledger.clone();

            let goal = commit(&mut ledger, last, &m);
            let change = decide_removal(&goal, &ledger).unwrap();
            ledger.apply(&change);

            prop_assert_eq!(ledger, before);
        }

        /// Removal succeeds only for the goal whose order equals the match's goal count.
        #[test]
        fn removal_only_for_last(
            m in any_match(),
            goals in prop::collection::vec(proposal(), 1..10),
        ) {
            let mut ledger = GoalLedger::new();
            let recorded: Vec<GoalEvent> = goals
                .into_iter()
                .map(|candidate| commit(&mut ledger, candidate, &m))
                .collect();

            let count = recorded.len();
            for (idx, goal) in recorded.iter().enumerate() {
                let result = decide_removal(goal, &ledger);
                if idx + 1 == count {
                    prop_assert!(result.is_ok());
                } else {
                    let is_not_last = matches!(result, Err(GoalRejection::NotLastGoal { .. }));
                    prop_assert!(is_not_last);
                }
            }
        }
    }
}
