// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod search;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Web search tool CLI
#[derive(Parser, Debug)]
#[command(name = "web-search")]
#[command(version)]
#[command(about = "Run the web search tool against a configured backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search and print the tool output as JSON
    Search(search::SearchArgs),

    /// Print the SearXNG query parameters a search would send
    SearxngParams(search::SearxngParamsArgs),

    /// Print the tool definition used for agent registration
    Definition(search::ConfigArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search(args) => search::run_search(args).await,
        Commands::SearxngParams(args) => search::print_searxng_params(args),
        Commands::Definition(args) => search::print_definition(args),
    }
}
