use anyhow::Context;
use serde::Serialize;
use tracing::debug;

use scoreline_goals::{GoalEvent, PlayerStat};
use scoreline_infra::{
    GoalService, InMemoryMatchRegistry, InMemoryPlayerRegistry, JsonFileLedgerStore, JsonRegistryFiles,
    StoreConfig,
};

use crate::cli::*;

type Service = GoalService<JsonFileLedgerStore, InMemoryPlayerRegistry, InMemoryMatchRegistry>;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = settings(&cli)?;
    let format = cli.format;
    match cli.command {
        Command::Goals(GoalsCommand::List(args)) => cmd_list(&config, format, args),
        Command::Goals(GoalsCommand::Add(args)) => cmd_add(&config, format, args),
        Command::Goals(GoalsCommand::Remove(args)) => cmd_remove(&config, format, args),
        Command::Stats(args) => cmd_stats(&config, format, args),
        Command::Settings => {
            match format {
                OutputFormat::Text => println!("{config}"),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
            }
            Ok(())
        }
    }
}

/// Environment settings with command-line overrides applied.
fn settings(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = StoreConfig::from_env().context("reading settings from environment")?;
    if let Some(dir) = &cli.assets_dir {
        config = config.with_assets_dir(dir);
    }
    if cli.local_access {
        config = config.with_local_access(true);
    }
    debug!(assets_dir = %config.assets_dir.display(), local_access = config.local_access, "settings loaded");
    Ok(config)
}

fn service(config: &StoreConfig) -> anyhow::Result<Service> {
    let registries = JsonRegistryFiles::load(config)
        .with_context(|| format!("loading registries from {}", config.assets_dir.display()))?;
    Ok(GoalService::new(
        JsonFileLedgerStore::from_config(config),
        registries.players,
        registries.matches,
    ))
}

fn cmd_list(config: &StoreConfig, format: OutputFormat, args: ListArgs) -> anyhow::Result<()> {
    let goals = service(config)?.list_goals_for_match(args.date)?;
    match format {
        OutputFormat::Json => print_json(&goals),
        OutputFormat::Text => {
            if goals.is_empty() {
                println!("No goals on {}.", args.date);
            }
            for goal in &goals {
                println!("{}", describe(goal));
            }
            Ok(())
        }
    }
}

fn cmd_add(config: &StoreConfig, format: OutputFormat, args: AddArgs) -> anyhow::Result<()> {
    let candidate = GoalEvent::new(args.date, args.scorer, args.assist, args.score)?;
    let goal = service(config)?
        .propose_goal(candidate)
        .context("goal not recorded")?;
    match format {
        OutputFormat::Json => print_json(&goal),
        OutputFormat::Text => {
            println!("Recorded {}", describe(&goal));
            Ok(())
        }
    }
}

fn cmd_remove(config: &StoreConfig, format: OutputFormat, args: RemoveArgs) -> anyhow::Result<()> {
    let target = GoalEvent::opponent(args.date).with_score(args.score);
    let goal = service(config)?
        .remove_last_goal(target)
        .context("goal not removed")?;
    match format {
        OutputFormat::Json => print_json(&goal),
        OutputFormat::Text => {
            println!("Removed {}", describe(&goal));
            Ok(())
        }
    }
}

fn cmd_stats(config: &StoreConfig, format: OutputFormat, args: StatsArgs) -> anyhow::Result<()> {
    let stats: Vec<PlayerStat> = service(config)?.compute_stats(args.kind, args.masked)?;
    match format {
        OutputFormat::Json => print_json(&stats),
        OutputFormat::Text => {
            for stat in &stats {
                println!("{:<24} {}", stat.player.as_str(), stat.count);
            }
            Ok(())
        }
    }
}

fn describe(goal: &GoalEvent) -> String {
    let score = goal.score().map(|s| s.to_string()).unwrap_or_else(|| "?".into());
    let by = match (goal.scored_by(), goal.assisted_by()) {
        (Some(scorer), Some(assist)) => format!("{scorer}, assisted by {assist}"),
        (Some(scorer), None) => scorer.to_string(),
        (None, _) => "opponent".to_string(),
    };
    format!("{goal}: {score} ({by})")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
