use std::path::PathBuf;

use apipoll_common::logging::init_tracing;
use apipoll_kalshi::report::{DATA_FILE, METADATA_FILE, QUALITY_FILE, SUMMARY_FILE};
use apipoll_kalshi::{AgentConfig, CollectionAgent, KalshiMarketsClient};
use clap::Parser;

/// kalshi-agent: collect Kalshi markets into JSON reports
#[derive(Parser, Debug)]
#[command(name = "kalshi-agent", about = "Kalshi market data collection agent")]
struct Args {
    /// Optional JSON or YAML file with collection parameters
    #[arg(short, long, env = "KALSHI_AGENT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory the four report files are written to
    #[arg(long, env = "KALSHI_AGENT_OUTPUT_DIR", default_value = "json-outputs")]
    output_dir: PathBuf,

    /// Log file appended to in addition to stderr
    #[arg(long, env = "KALSHI_AGENT_LOG_FILE", default_value = "logs/data_collection.log")]
    log_file: PathBuf,

    /// Override the markets API base URL from the config
    #[arg(long, env = "KALSHI_BASE_URL")]
    base_url: Option<String>,
}

const RULE_WIDTH: usize = 60;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("info", Some(args.log_file.as_path()))?;

    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}\nKALSHI AI DATA COLLECTION AGENT\n{}\n", rule, rule);

    let mut config = match &args.config {
        Some(path) => AgentConfig::load_or_default(path),
        None => AgentConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let client = KalshiMarketsClient::new(&config.base_url, config.request_timeout())?;
    let mut agent = CollectionAgent::new(client, config);
    let result = agent.run(&args.output_dir).await;

    println!("\n{}\nCOLLECTION COMPLETE - FINAL SUMMARY\n{}", rule, rule);
    println!("\nTotal Records Collected: {}", agent.records().len());
    println!("Success Rate: {:.1}%", agent.success_rate() * 100.0);
    println!("Quality Score: {:.1}%", agent.quality_score() * 100.0);
    println!("\n{}", rule);

    result?;

    println!("\nReports saved to {}:", args.output_dir.display());
    for file in [DATA_FILE, METADATA_FILE, QUALITY_FILE, SUMMARY_FILE] {
        println!("  - {}", file);
    }
    println!("\nLogs saved to {}", args.log_file.display());
    println!("\n{}\n", rule);

    Ok(())
}
