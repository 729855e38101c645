use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "campo", version, about = "Campo Sagrado CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend what to do next
    Recommend(commands::recommend::RecommendArgs),
    /// Sacred task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Energy level details
    Energy {
        #[command(subcommand)]
        action: commands::energy::EnergyAction,
    },
    /// Personal profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Work fields and the next action
    Field {
        #[command(subcommand)]
        action: commands::field::FieldAction,
    },
    /// Circadian phase and A/B recommendation
    Circadian(commands::circadian::CircadianArgs),
    /// Daily prayer times for the configured location
    Prayer(commands::prayer::PrayerArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CAMPO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("campo=warn,campo_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Recommend(args) => commands::recommend::run(args),
        Commands::Task { action } => commands::task::run(action),
        Commands::Energy { action } => commands::energy::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Field { action } => commands::field::run(action),
        Commands::Circadian(args) => commands::circadian::run(args),
        Commands::Prayer(args) => commands::prayer::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
