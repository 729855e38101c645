//! `campo prayer`: today's prayer times from AlAdhan.

use chrono::{Local, NaiveDate};
use clap::Args;

use campo_core::{Config, PrayerAnchor, PrayerTimesClient};

use super::common::{print_json, CliResult};

#[derive(Args)]
pub struct PrayerArgs {
    /// Date "YYYY-MM-DD" (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    json: bool,
}

pub fn run(args: PrayerArgs) -> CliResult {
    let config = Config::load()?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let client = PrayerTimesClient::new(config.location.clone())?;
    let rt = tokio::runtime::Runtime::new()?;
    let timings = rt.block_on(client.fetch(date))?;

    if args.json {
        return print_json(&timings);
    }

    println!("Prayer times for {date} ({})", config.location.timezone);
    for anchor in PrayerAnchor::ALL {
        println!("  {:<8} {}", anchor.as_str(), timings.timing_for(anchor).format("%H:%M"));
    }
    println!("  {:<8} {}", "sunrise", timings.sunrise.format("%H:%M"));
    Ok(())
}
