use std::path::PathBuf;
use std::time::Duration;

use apipoll_catfacts::{
    collect_and_save, CatFactsClient, CAT_FACTS_URL, DEFAULT_FACT_COUNT, DEFAULT_OUTPUT,
};
use apipoll_common::logging::init_tracing;
use clap::Parser;

/// cat-facts: fetch random cat facts and save them as JSON
#[derive(Parser, Debug)]
#[command(name = "cat-facts", about = "Fetch random cat facts from catfact.ninja")]
struct Args {
    /// Number of facts to request
    #[arg(short = 'n', long, env = "CAT_FACTS_COUNT", default_value_t = DEFAULT_FACT_COUNT)]
    count: usize,

    /// Output JSON file
    #[arg(short, long, env = "CAT_FACTS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// API base URL
    #[arg(long, env = "CAT_FACTS_URL", default_value = CAT_FACTS_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "CAT_FACTS_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("info", None)?;

    let client = CatFactsClient::new(&args.base_url, Duration::from_secs(args.timeout_secs))?;
    let facts = collect_and_save(&client, args.count, &args.output).await?;

    for (i, fact) in facts.iter().enumerate() {
        println!("Cat fact {}: {}", i + 1, fact);
    }

    Ok(())
}
