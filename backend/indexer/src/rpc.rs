//! Soroban RPC client for `getEvents`.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns a transport error,
//!   HTTP 429, an HTTP 5xx or a soft JSON-RPC error, doubling from [`INITIAL_BACKOFF_SECS`]
//!   up to [`MAX_BACKOFF_SECS`].
//! * Invalid-request / method-not-found errors are returned immediately.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

/// JSON-RPC codes that will not succeed on retry.
const HARD_ERROR_CODES: [i64; 2] = [-32600, -32601];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<EventsPage>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// One page of `getEvents` results.
#[derive(Debug, Deserialize, Default)]
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Topic list, either JSON-decoded `{"type":…,"value":…}` or raw strings.
    pub topic: Vec<String>,
    /// Event data as decoded by the RPC.
    pub value: Value,
    pub contract_id: Option<String>,
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    pub ledger_closed_at: Option<String>,
    pub in_successful_contract_call: Option<bool>,
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Back-off
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Backoff {
    secs: u64,
}

impl Backoff {
    fn new() -> Self {
        Self {
            secs: INITIAL_BACKOFF_SECS,
        }
    }

    /// Current delay; advances the schedule for the next call.
    fn next_delay(&mut self) -> Duration {
        let delay = Duration::from_secs(self.secs);
        self.secs = (self.secs * 2).min(MAX_BACKOFF_SECS);
        delay
    }

    async fn wait(&mut self, reason: &str) {
        let delay = self.next_delay();
        warn!("{reason} (retrying in {}s)", delay.as_secs());
        tokio::time::sleep(delay).await;
    }
}

// ─────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────

/// Thin wrapper binding an HTTP client to one RPC endpoint and contract.
#[derive(Clone)]
pub struct RpcClient {
    http: Client,
    rpc_url: String,
    contract_id: String,
}

impl RpcClient {
    pub fn new(http: Client, rpc_url: impl Into<String>, contract_id: impl Into<String>) -> Self {
        Self {
            http,
            rpc_url: rpc_url.into(),
            contract_id: contract_id.into(),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Fetch a page of events emitted by the configured contract.
    ///
    /// * `start_ledger` is used only when `cursor` is `None`.
    /// * `cursor` is the opaque pagination cursor from a previous page.
    pub async fn fetch_events(
        &self,
        start_ledger: u32,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<EventsPage> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getEvents",
            "params": build_params(&self.contract_id, start_ledger, cursor, limit),
        });
        let mut backoff = Backoff::new();

        loop {
            let resp = match self.http.post(&self.rpc_url).json(&body).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    backoff.wait(&format!("RPC request failed: {e}")).await;
                    continue;
                }
            };

            if let Some(reason) = retry_reason(resp.status()) {
                backoff.wait(&reason).await;
                continue;
            }

            let parsed: RpcResponse = resp.json().await?;
            if let Some(err) = parsed.error {
                if HARD_ERROR_CODES.contains(&err.code) {
                    return Err(IndexerError::Rpc {
                        code: err.code,
                        message: err.message,
                    });
                }
                backoff
                    .wait(&format!("RPC soft error {}: {}", err.code, err.message))
                    .await;
                continue;
            }

            let page = parsed.result.ok_or_else(|| {
                IndexerError::EventParse("Empty result from getEvents".to_string())
            })?;
            debug!(
                "Fetched {} events (latest_ledger={:?})",
                page.events.len(),
                page.latest_ledger
            );
            return Ok(page);
        }
    }
}

/// Why a response with this status should be retried, if it should.
fn retry_reason(status: StatusCode) -> Option<String> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        Some("Rate-limited by RPC".to_string())
    } else if status.is_server_error() {
        Some(format!("RPC server error {status}"))
    } else {
        None
    }
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    match cursor {
        Some(cur) => params["pagination"]["cursor"] = json!(cur),
        None => params["startLedger"] = json!(start_ledger),
    }

    params
}
