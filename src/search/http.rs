// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared HTTP plumbing for search backends

use reqwest::StatusCode;
use std::time::Duration;

use super::types::SearchError;

/// User-Agent sent to every backend
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the async client used by a provider
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SearchError::Transport {
            message: format!("failed to build HTTP client: {}", e),
        })
}

/// Build a blocking client; callers keep it for a single call only.
///
/// The blocking client owns a private runtime and must not be dropped
/// from inside an async context.
pub fn build_blocking_client(timeout: Duration) -> Result<reqwest::blocking::Client, SearchError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SearchError::Transport {
            message: format!("failed to build HTTP client: {}", e),
        })
}

/// Map a reqwest failure (async or blocking) onto the search taxonomy
pub fn request_error(err: reqwest::Error, timeout: Duration) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    } else if err.is_decode() {
        SearchError::Parse {
            message: err.to_string(),
        }
    } else {
        SearchError::Transport {
            message: err.to_string(),
        }
    }
}

/// Reject non-success statuses with the same error on every path
pub fn check_status(status: StatusCode) -> Result<(), SearchError> {
    if status.is_success() {
        return Ok(());
    }
    Err(SearchError::Status {
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .unwrap_or("Unknown status")
            .to_string(),
    })
}

/// Decode a response body as JSON
pub fn parse_json(body: &str) -> Result<serde_json::Value, SearchError> {
    serde_json::from_str(body).map_err(|e| SearchError::Parse {
        message: format!("JSON parse error: {}", e),
    })
}
