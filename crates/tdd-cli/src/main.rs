mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, milestone::MilestoneSubcommand, roadmap::RoadmapSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tdd",
    about = "Red-Green-Refactor action log: record what you did and keep TDD context files current",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .tdd/ or .git/)
    #[arg(long, global = true, env = "TDD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the TDD context directory in the current project
    Init,

    /// Log an action; its phase is inferred from keywords in the description
    Log {
        /// What you just did, e.g. "wrote failing test for login"
        #[arg(required = true, num_args = 1..)]
        action: Vec<String>,

        /// Roadmap phase to attach (default: the current roadmap phase)
        #[arg(long, value_name = "SLUG")]
        roadmap_phase: Option<String>,
    },

    /// Show current phase, counters and last action
    Status,

    /// Show what to do next
    Next,

    /// List logged actions
    History {
        /// Show only the most recent N actions
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
    },

    /// Show which phase an action would be classified as, without logging it
    Classify {
        #[arg(required = true, num_args = 1..)]
        action: Vec<String>,
    },

    /// Record the outcome of the latest test run
    Tests {
        #[arg(long)]
        passing: u32,
        #[arg(long)]
        failing: u32,
        /// Line coverage in percent
        #[arg(long)]
        coverage: Option<f64>,
    },

    /// Manage roadmap phases
    Roadmap {
        #[command(subcommand)]
        subcommand: RoadmapSubcommand,
    },

    /// Track completed milestones
    Milestone {
        #[command(subcommand)]
        subcommand: MilestoneSubcommand,
    },

    /// Inspect and validate .tdd/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root_path = cli.root.as_deref();
    let root = root::resolve_root(root_path);

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Log {
            action,
            roadmap_phase,
        } => cmd::log::run(&root, &action, roadmap_phase, cli.json),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Next => cmd::next::run(&root, cli.json),
        Commands::History { limit } => cmd::history::run(&root, limit, cli.json),
        Commands::Classify { action } => cmd::classify::run(&root, &action, cli.json),
        Commands::Tests {
            passing,
            failing,
            coverage,
        } => cmd::test_run::run(&root, passing, failing, coverage, cli.json),
        Commands::Roadmap { subcommand } => cmd::roadmap::run(&root, subcommand, cli.json),
        Commands::Milestone { subcommand } => cmd::milestone::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
