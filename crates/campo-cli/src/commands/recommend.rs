//! `campo recommend`: rank stored tasks for the current energy and time.

use clap::Args;

use campo_core::storage::data_dir;
use campo_core::{
    binary_recommendation, Config, GenerateRecommendation, KvTaskRepository, MarkdownExporter,
    RecommendationRequest, RecommendationResult, Recommender,
};

use super::common::{open_store, parse_at, print_json, CliResult};

#[derive(Args)]
pub struct RecommendArgs {
    /// Current energy, 1-10
    #[arg(short, long)]
    energy: f64,
    /// Local time "YYYY-MM-DD HH:MM" (defaults to now)
    #[arg(long)]
    at: Option<String>,
    /// Free-form JSON context attached to the request
    #[arg(long)]
    context: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Also write Markdown notes into the configured vault
    #[arg(long)]
    export: bool,
}

pub fn run(args: RecommendArgs) -> CliResult {
    let config = Config::load()?;
    let current_time = parse_at(args.at.as_deref())?;
    let context: Option<serde_json::Value> = match args.context.as_deref() {
        Some(raw) => Some(
            serde_json::from_str(raw).map_err(|e| format!("invalid --context JSON: {e}"))?,
        ),
        None => None,
    };

    let repo = KvTaskRepository::new(open_store(&config)?);
    let usecase =
        GenerateRecommendation::new(repo, Recommender::new(config.recommendation.clone()));
    let result = usecase.execute(&RecommendationRequest {
        current_energy: args.energy,
        current_time,
        context,
    })?;

    if args.json {
        print_json(&result)?;
    } else {
        print_result(&result);
    }

    if args.export {
        let binary = binary_recommendation(result.energy, current_time);
        let exporter = MarkdownExporter::new(config.vault_dir(&data_dir()?));
        let paths = exporter.export(&result, &binary)?;
        eprintln!("exported: {}", paths.dashboard.display());
        eprintln!("exported: {}", paths.daily.display());
    }
    Ok(())
}

fn print_result(result: &RecommendationResult) {
    println!("Energy: {} ({})", result.energy, result.energy.band().name());
    println!("Window: {}", result.optimal_time);
    println!();
    if result.tasks.is_empty() {
        println!("No tasks fit your current energy.");
    }
    for (i, task) in result.tasks.iter().enumerate() {
        let flag = if task.non_negotiable { " [non-negotiable]" } else { "" };
        let time = task
            .ideal_time
            .map(|t| format!(" @ {:02}:{:02}", t.hour, t.minute))
            .unwrap_or_default();
        println!(
            "{:>2}. {}{}  (priority {}, energy {}){}",
            i + 1,
            task.name,
            flag,
            task.priority,
            task.energy_required,
            time
        );
    }
    println!();
    println!("{}", result.reasoning);
    println!(
        "Confidence: {:.0}%  Alignment: {:.0}%",
        result.confidence * 100.0,
        result.energy_alignment * 100.0
    );
}
