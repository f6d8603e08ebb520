use clap::Parser;
use serde_json::json;
use std::error::Error;
use tech_news_bot::config::ConfigFile;
use tech_news_bot::{HttpTransport, SchemaChecked, TechNewsBot, flow};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.config, ?args.endpoint, describe = args.describe, "Parsed CLI arguments");

    if args.describe {
        println!("{}", serde_json::to_string_pretty(&flow::describe())?);
        return Ok(());
    }

    let file = match &args.config {
        Some(path) => ConfigFile::load(path).await?,
        None => ConfigFile::default(),
    };
    let config = file.resolve(args.api_key, args.endpoint)?;
    info!(?config, "Configuration resolved");

    let bot = SchemaChecked::new(TechNewsBot::new(HttpTransport::new(), config));
    let reply = bot.invoke(&json!({ "query": args.query })).await?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&reply)?
    } else {
        serde_json::to_string(&reply)?
    };
    println!("{out}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        news = reply.news.len(),
        "Execution complete"
    );
    Ok(())
}
