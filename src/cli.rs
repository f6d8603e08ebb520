//! Command-line interface definitions for the tech news bot.
//!
//! Secrets and the endpoint can come from flags or environment variables;
//! a YAML config file fills in whatever neither provides.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Ask a question (key from the environment)
/// NEWS_API_KEY=... tech_news_bot "AI chips"
///
/// # With a config file and pretty output
/// tech_news_bot -c ./config.yaml --pretty "open source LLMs"
///
/// # Print the flow's schemas and instruction
/// tech_news_bot --describe
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The question about tech news
    #[arg(required_unless_present = "describe")]
    pub query: Option<String>,

    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// NewsAPI search endpoint
    #[arg(long, env = "NEWS_API_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the reply JSON
    #[arg(long)]
    pub pretty: bool,

    /// Print the flow description and exit
    #[arg(long)]
    pub describe: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "tech_news_bot",
            "--api-key",
            "k",
            "--endpoint",
            "http://localhost:1234/v2/everything",
            "AI chips",
        ]);

        assert_eq!(cli.query.as_deref(), Some("AI chips"));
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert_eq!(
            cli.endpoint.as_deref(),
            Some("http://localhost:1234/v2/everything")
        );
        assert!(!cli.pretty);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["tech_news_bot", "-c", "/tmp/config.yaml", "--pretty", ""]);

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.yaml")));
        assert_eq!(cli.query.as_deref(), Some(""));
        assert!(cli.pretty);
    }

    #[test]
    fn test_describe_needs_no_query() {
        let cli = Cli::parse_from(["tech_news_bot", "--describe"]);
        assert!(cli.describe);
        assert!(cli.query.is_none());
    }

    #[test]
    fn test_query_required_otherwise() {
        assert!(Cli::try_parse_from(["tech_news_bot", "--pretty"]).is_err());
    }
}
