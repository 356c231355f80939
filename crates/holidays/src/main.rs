use std::path::PathBuf;
use std::time::Duration;

use apipoll_common::logging::init_tracing;
use apipoll_holidays::{
    collect_counts, save_summary, HolidaySummary, HolidaysClient, DEFAULT_OUTPUT, DEFAULT_YEAR,
    HOLIDAYS_URL,
};
use clap::Parser;

/// holidays: public holiday counts per country
#[derive(Parser, Debug)]
#[command(name = "holidays", about = "Fetch public holidays from date.nager.at and summarize them")]
struct Args {
    /// Comma-separated ISO 3166-1 alpha-2 country codes
    #[arg(long, env = "HOLIDAYS_COUNTRIES", value_delimiter = ',', default_value = "US,CA,GB")]
    countries: Vec<String>,

    /// Calendar year
    #[arg(long, env = "HOLIDAYS_YEAR", default_value_t = DEFAULT_YEAR)]
    year: i32,

    /// Output JSON file
    #[arg(short, long, env = "HOLIDAYS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// API base URL
    #[arg(long, env = "HOLIDAYS_URL", default_value = HOLIDAYS_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "HOLIDAYS_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("info", None)?;

    let client = HolidaysClient::new(&args.base_url, Duration::from_secs(args.timeout_secs))?;
    let counts = collect_counts(&client, &args.countries, args.year).await;

    let summary = HolidaySummary::from_counts(counts);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    save_summary(&summary, &args.output)?;
    Ok(())
}
