// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::search::{SearchConfig, SearchEngine, SearxngClient};
use crate::tools::WebSearchTool;

/// Configuration flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// TOML config file (environment variables are used when absent)
    #[arg(long, env = "SEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend to use (tavily, duckduckgo, brave, arxiv, searxng)
    #[arg(long)]
    pub engine: Option<SearchEngine>,

    /// Number of results to request
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Do not ask for image results
    #[arg(long)]
    pub no_images: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Use the blocking transport instead of the async one
    #[arg(long)]
    pub blocking: bool,

    /// Search query
    pub query: String,
}

/// Arguments for the searxng-params command
#[derive(Args, Debug)]
pub struct SearxngParamsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Comma-separated engine list, overriding the configured one
    #[arg(long, value_delimiter = ',')]
    pub engines: Option<Vec<String>>,

    /// Comma-separated category list, overriding the configured one
    #[arg(long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,

    /// Search query
    pub query: String,
}

/// Resolve configuration: file or environment, then command-line overrides
pub fn load_config(args: &ConfigArgs) -> Result<SearchConfig> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SearchConfig::from_env()?,
    };
    apply_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut SearchConfig, args: &ConfigArgs) {
    if let Some(engine) = args.engine {
        config.engine = engine;
    }
    if let Some(max_results) = args.max_results {
        config.max_results = max_results;
    }
    if args.no_images {
        config.include_images = false;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
}

/// Run one search and print the tool output
pub async fn run_search(args: SearchArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let tool = WebSearchTool::from_config(&config)?;
    info!("Searching with {} backend", tool.provider_name());

    let output = if args.blocking {
        let query = args.query.clone();
        tokio::task::spawn_blocking(move || tool.search_blocking(&query)).await?
    } else {
        tool.search(&args.query).await
    };

    println!("{}", serde_json::to_string_pretty(&output.to_json())?);

    match output.result {
        Ok(_) => Ok(()),
        Err(failure) => Err(anyhow!("search failed: {}", failure.message)),
    }
}

/// Print the SearXNG parameters for a query without sending anything
pub fn print_searxng_params(args: SearxngParamsArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let client = SearxngClient::new(config.searxng_config())?;

    let mut request = client
        .request(args.query)
        .max_results(config.max_results)
        .include_images(config.include_images);
    if let Some(engines) = args.engines {
        request = request.engines(engines);
    }
    if let Some(categories) = args.categories {
        request = request.categories(categories);
    }

    for (key, value) in client.params(&request) {
        println!("{}={}", key, value);
    }
    Ok(())
}

/// Print the tool definition
pub fn print_definition(args: ConfigArgs) -> Result<()> {
    let config = load_config(&args)?;
    let tool = WebSearchTool::from_config(&config)?;
    println!("{}", serde_json::to_string_pretty(&tool.definition())?);
    Ok(())
}
