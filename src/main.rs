use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playoff_scenarios::calculate::compute_standings;
use playoff_scenarios::config::AppConfig;
use playoff_scenarios::report::{
    all_play_records, critical_lines, render_all_play, render_scenarios, render_schedule_swap,
    render_standings, schedule_swap_records,
};
use playoff_scenarios::scenario::{validate_season, validate_teams, ScenarioEngine};
use playoff_scenarios::storage::{
    read_league_snapshot, write_json, RunHistory, RunRecord, StorageConfig,
};

#[derive(Parser)]
#[command(name = "playoff-scenarios")]
#[command(about = "Playoff magic numbers and clinch/elimination scenarios for a fantasy league")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./playoffs.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ranked standings with magic numbers and status
    Standings {
        /// League snapshot JSON file
        #[arg(long)]
        league: PathBuf,
    },

    /// Enumerate this week's outcomes and print clinch/elimination scenarios
    Scenarios {
        /// League snapshot JSON file
        #[arg(long)]
        league: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Also track teams that are already clinched or eliminated
        #[arg(long)]
        all_teams: bool,

        /// Override the matchup cap
        #[arg(long)]
        max_matchups: Option<usize>,

        /// Evaluate permutations on the current thread only
        #[arg(long)]
        sequential: bool,

        /// Keep matchups between two decided teams
        #[arg(long)]
        no_filter: bool,

        /// Write the report and append a history record under the data dir
        #[arg(long)]
        save: bool,
    },

    /// All-play and schedule-swap records from completed weeks
    Records {
        /// League snapshot JSON file
        #[arg(long)]
        league: PathBuf,

        /// Show each team's record against every other team's schedule
        #[arg(long)]
        vs_schedules: bool,
    },

    /// List saved scenario runs
    History {
        /// Number of runs to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let (json_layer, text_layer) = if json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting playoff-scenarios v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Standings { league } => {
            let snapshot = read_league_snapshot(&league)
                .with_context(|| format!("Failed to read league file {:?}", league))?;
            let teams = snapshot.teams();
            let season = snapshot.season();
            validate_season(&season, teams.len())?;
            validate_teams(&teams)?;

            let standings = compute_standings(teams, season);
            println!("{}\n", snapshot.league_name());
            println!("{}", render_standings(&standings));

            let critical = critical_lines(&standings);
            if !critical.is_empty() {
                println!("\nOne result away:");
                for line in critical {
                    println!("  {}", line);
                }
            }
            if standings.has_unresolved_boundary() {
                println!("\nPlayoff line unresolved: every team below the cutoff is tied with it");
            }
        }

        Commands::Scenarios {
            league,
            json,
            all_teams,
            max_matchups,
            sequential,
            no_filter,
            save,
        } => {
            let snapshot = read_league_snapshot(&league)
                .with_context(|| format!("Failed to read league file {:?}", league))?;

            let mut engine_config = config.engine.clone();
            if all_teams {
                engine_config.track_decided_teams = true;
            }
            if let Some(cap) = max_matchups {
                engine_config.max_matchups = cap;
            }
            if sequential {
                engine_config.parallel = false;
            }
            if no_filter {
                engine_config.filter_locked_matchups = false;
            }

            let report = ScenarioEngine::new(engine_config)
                .run(&snapshot)
                .context("Scenario run failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} week {}: {} matchups, {} permutations\n",
                    report.league,
                    report.standings.season.current_week,
                    report.schedule.len(),
                    report.permutation_count
                );
                println!("{}", render_scenarios(&report));
            }

            if save {
                let report_path = storage.report_path(report.run_id.as_str());
                write_json(&report_path, &report)
                    .with_context(|| format!("Failed to write report {:?}", report_path))?;

                let history = RunHistory::for_config(&storage);
                history
                    .append(&RunRecord::from_report(&report, chrono::Utc::now()))
                    .context("Failed to append run history")?;
                tracing::info!("Saved run {} to {:?}", report.run_id, report_path);
            }
        }

        Commands::Records {
            league,
            vs_schedules,
        } => {
            let snapshot = read_league_snapshot(&league)
                .with_context(|| format!("Failed to read league file {:?}", league))?;
            if snapshot.weekly_results.is_empty() {
                println!("No completed weeks in {:?}", league);
                return Ok(());
            }

            if vs_schedules {
                println!(
                    "{}",
                    render_schedule_swap(&schedule_swap_records(&snapshot.weekly_results))
                );
            } else {
                println!(
                    "{}",
                    render_all_play(&all_play_records(&snapshot.weekly_results))
                );
            }
        }

        Commands::History { limit } => {
            let history = RunHistory::for_config(&storage);
            let runs = history.recent(limit)?;
            if runs.is_empty() {
                println!("No saved runs in {:?}", history.path());
                return Ok(());
            }

            println!(
                "{:<18} {:<20} {:>4} {:>8} {:>6}  Created",
                "Run", "League", "Week", "Matchups", "Perms"
            );
            for run in runs {
                println!(
                    "{:<18} {:<20} {:>4} {:>8} {:>6}  {}",
                    run.id.as_str(),
                    run.league,
                    run.week,
                    run.matchups,
                    run.permutations,
                    run.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }

    Ok(())
}
