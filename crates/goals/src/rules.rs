//! Score consistency rules, one per fixture orientation.
//!
//! The two orientations are deliberately not symmetric:
//!
//! - **Home**: only the scoring side's column is checked. A team goal must move
//!   the home column, an opponent goal must move the away column. What happens
//!   to the other column is not inspected.
//! - **Away**: exactly one column must move, and it must be the scoring side's
//!   column (away for the team, home for the opponent).

use chrono::NaiveDate;

use crate::fixture::Fixture;
use crate::rejection::{GoalRejection, ScoringSide};
use crate::score::Score;

/// Which columns kept their value between two scores.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScoreDelta {
    pub same_home: bool,
    pub same_away: bool,
}

impl ScoreDelta {
    pub fn between(previous: Score, candidate: Score) -> Self {
        Self {
            same_home: candidate.home() == previous.home(),
            same_away: candidate.away() == previous.away(),
        }
    }
}

/// A proposed transition from one score to the next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScoreChange {
    pub match_date: NaiveDate,
    pub side: ScoringSide,
    pub previous: Score,
    pub candidate: Score,
}

impl ScoreChange {
    pub fn delta(&self) -> ScoreDelta {
        ScoreDelta::between(self.previous, self.candidate)
    }

    fn wrong_side(&self) -> GoalRejection {
        GoalRejection::WrongSideIncremented {
            match_date: self.match_date,
            side: self.side,
            previous: self.previous,
            candidate: self.candidate,
        }
    }
}

/// Checks that a score change is attributed to the correct column.
pub trait ScoreConsistencyRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, change: &ScoreChange) -> Result<(), GoalRejection>;
}

/// Rule for matches where the team is the home side.
#[derive(Debug, Default, Copy, Clone)]
pub struct HomeFixtureRule;

impl ScoreConsistencyRule for HomeFixtureRule {
    fn name(&self) -> &'static str {
        "home_fixture"
    }

    fn check(&self, change: &ScoreChange) -> Result<(), GoalRejection> {
        let delta = change.delta();
        match change.side {
            ScoringSide::Team if delta.same_home => Err(change.wrong_side()),
            ScoringSide::Opponent if delta.same_away => Err(change.wrong_side()),
            _ => Ok(()),
        }
    }
}

/// Rule for matches where the team is the away side.
#[derive(Debug, Default, Copy, Clone)]
pub struct AwayFixtureRule;

impl ScoreConsistencyRule for AwayFixtureRule {
    fn name(&self) -> &'static str {
        "away_fixture"
    }

    fn check(&self, change: &ScoreChange) -> Result<(), GoalRejection> {
        let delta = change.delta();
        if delta.same_home && delta.same_away {
            return Err(GoalRejection::BothSidesUnchanged {
                match_date: change.match_date,
                previous: change.previous,
                candidate: change.candidate,
            });
        }
        if !delta.same_home && !delta.same_away {
            return Err(GoalRejection::BothSidesChanged {
                match_date: change.match_date,
                previous: change.previous,
                candidate: change.candidate,
            });
        }
        match change.side {
            ScoringSide::Team if delta.same_away => Err(change.wrong_side()),
            ScoringSide::Opponent if delta.same_home => Err(change.wrong_side()),
            _ => Ok(()),
        }
    }
}

static HOME_RULE: HomeFixtureRule = HomeFixtureRule;
static AWAY_RULE: AwayFixtureRule = AwayFixtureRule;

/// The rule that applies to a fixture orientation.
pub fn rule_for(fixture: Fixture) -> &'static dyn ScoreConsistencyRule {
    match fixture {
        Fixture::Home => &HOME_RULE,
        Fixture::Away => &AWAY_RULE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 18).unwrap()
    }

    fn change(side: ScoringSide, previous: (u32, u32), candidate: (u32, u32)) -> ScoreChange {
        let score = |(h, a): (u32, u32)| {
            if h == 0 && a == 0 {
                Score::initial()
            } else {
                Score::new(h, a).unwrap()
            }
        };
        ScoreChange {
            match_date: date(),
            side,
            previous: score(previous),
            candidate: score(candidate),
        }
    }

    #[test]
    fn away_rejects_both_sides_changing() {
        let err = AwayFixtureRule
            .check(&change(ScoringSide::Team, (0, 2), (1, 1)))
            .unwrap_err();
        assert!(matches!(err, GoalRejection::BothSidesChanged { .. }));
        assert!(err.to_string().contains("team and opponent scores cannot both change"));
    }

    #[test]
    fn away_rejects_wrong_side() {
        let err = AwayFixtureRule
            .check(&change(ScoringSide::Team, (0, 2), (1, 2)))
            .unwrap_err();
        assert!(err.to_string().contains("team goal, so team score should increase"));
    }

    #[test]
    fn away_rejects_unchanged_score() {
        let err = AwayFixtureRule
            .check(&change(ScoringSide::Team, (0, 2), (0, 2)))
            .unwrap_err();
        assert!(err.to_string().contains("team and opponent scores cannot both stay the same"));
    }

    #[test]
    fn away_accepts_team_goal_in_away_column() {
        AwayFixtureRule
            .check(&change(ScoringSide::Team, (0, 2), (0, 3)))
            .unwrap();
        AwayFixtureRule
            .check(&change(ScoringSide::Opponent, (0, 2), (1, 2)))
            .unwrap();
    }

    #[test]
    fn home_rejects_team_goal_without_home_increase() {
        let err = HomeFixtureRule
            .check(&change(ScoringSide::Team, (1, 0), (1, 1)))
            .unwrap_err();
        assert!(matches!(
            err,
            GoalRejection::WrongSideIncremented {
                side: ScoringSide::Team,
                ..
            }
        ));
    }

    #[test]
    fn home_accepts_opponent_goal_in_away_column() {
        HomeFixtureRule
            .check(&change(ScoringSide::Opponent, (1, 0), (1, 1)))
            .unwrap();
    }

    #[test]
    fn home_does_not_inspect_the_other_column() {
        // Both columns moved; only the team's column is checked for a home fixture.
        HomeFixtureRule
            .check(&change(ScoringSide::Team, (1, 0), (2, 3)))
            .unwrap();
    }

    #[test]
    fn rule_for_selects_by_orientation() {
        assert_eq!(rule_for(Fixture::Home).name(), "home_fixture");
        assert_eq!(rule_for(Fixture::Away).name(), "away_fixture");
    }

    fn side() -> impl Strategy<Value = ScoringSide> {
        prop_oneof![Just(ScoringSide::Team), Just(ScoringSide::Opponent)]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Home fixture: the scoring side's column must move, whatever the other column does.
        #[test]
        fn home_requires_scoring_column_to_move(
            prev_home in 0u32..10,
            prev_away in 1u32..10,
            other in 0u32..10,
        ) {
            let team = change(ScoringSide::Team, (prev_home, prev_away), (prev_home, other));
            prop_assert!(HomeFixtureRule.check(&team).is_err());

            let opponent = change(ScoringSide::Opponent, (prev_away, prev_home), (other, prev_home));
            prop_assert!(HomeFixtureRule.check(&opponent).is_err());
        }

        /// Away fixture: candidates moving both or neither column are always rejected.
        #[test]
        fn away_requires_exactly_one_column_to_move(
            side in side(),
            prev_home in 0u32..10,
            prev_away in 1u32..10,
            dh in 1u32..5,
            da in 1u32..5,
        ) {
            let both = change(side, (prev_home, prev_away), (prev_home + dh, prev_away + da));
            let is_both_changed = matches!(
                AwayFixtureRule.check(&both),
                Err(GoalRejection::BothSidesChanged { .. })
            );
            prop_assert!(is_both_changed);

            let neither = change(side, (prev_home, prev_away), (prev_home, prev_away));
            let is_both_unchanged = matches!(
                AwayFixtureRule.check(&neither),
                Err(GoalRejection::BothSidesUnchanged { .. })
            );
            prop_assert!(is_both_unchanged);
        }
    }
}
