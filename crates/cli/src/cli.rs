use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use scoreline_core::PlayerName;
use scoreline_goals::{CountKind, Score};

#[derive(Parser)]
#[command(
    name = "scoreline",
    about = "Record goals, keep scores consistent, rank scorers",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding goals.json, players.json and matches.json
    #[arg(long, global = true)]
    pub assets_dir: Option<PathBuf>,

    /// Allow reading and writing the asset files
    #[arg(long, global = true)]
    pub local_access: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List, add or remove goals
    #[command(subcommand)]
    Goals(GoalsCommand),
    /// Rank players by goals or assists
    Stats(StatsArgs),
    /// Show effective settings
    Settings,
}

#[derive(Subcommand)]
pub enum GoalsCommand {
    /// List the goals of one match in order
    List(ListArgs),
    /// Propose a goal; the score is derived when omitted
    Add(AddArgs),
    /// Remove the last goal of a match
    Remove(RemoveArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Match date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
}

#[derive(Args)]
pub struct AddArgs {
    /// Match date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
    /// Scoring player; omit for an opponent goal
    #[arg(long)]
    pub scorer: Option<PlayerName>,
    /// Assisting player
    #[arg(long, requires = "scorer")]
    pub assist: Option<PlayerName>,
    /// Explicit score after the goal, as HOME-AWAY
    #[arg(long)]
    pub score: Option<Score>,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Match date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
    /// Score of the goal to remove, as HOME-AWAY
    #[arg(long)]
    pub score: Score,
}

#[derive(Args)]
pub struct StatsArgs {
    /// goal or assist
    pub kind: CountKind,
    /// Report every player with a masked count
    #[arg(long)]
    pub masked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_goal_add_with_explicit_score() {
        let cli = Cli::try_parse_from([
            "scoreline", "--local-access", "goals", "add", "--date", "2023-04-18", "--scorer", "Thijs",
            "--assist", "Mark", "--score", "2-1",
        ])
        .unwrap();

        assert!(cli.local_access);
        match cli.command {
            Command::Goals(GoalsCommand::Add(args)) => {
                assert_eq!(args.score, Some(Score::new(2, 1).unwrap()));
                assert_eq!(args.assist.unwrap().as_str(), "Mark");
            }
            _ => panic!("expected goals add"),
        }
    }

    #[test]
    fn assist_requires_scorer() {
        let parsed = Cli::try_parse_from([
            "scoreline", "goals", "add", "--date", "2023-04-18", "--assist", "Mark",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn parses_masked_stats() {
        let cli = Cli::try_parse_from(["scoreline", "stats", "assists", "--masked"]).unwrap();
        match cli.command {
            Command::Stats(args) => {
                assert_eq!(args.kind, CountKind::Assist);
                assert!(args.masked);
            }
            _ => panic!("expected stats"),
        }
    }
}
