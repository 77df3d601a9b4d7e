// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Agent-facing tools

pub mod web_search;

pub use web_search::{ToolFailure, ToolOutput, WebSearchTool, DEFAULT_TOOL_NAME};
