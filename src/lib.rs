// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod search;
pub mod tools;

pub use search::{
    SearchConfig, SearchEngine, SearchError, SearchProvider, SearchRecord, SearchResponse,
    SearchService,
};
pub use tools::{ToolOutput, WebSearchTool};
