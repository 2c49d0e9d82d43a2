//! Soroban RPC client: polls `getEvents` and decodes escrow events.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EscrowEvent, EventKind};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

/// JSON-RPC codes that retrying cannot fix (invalid request, unknown method).
const HARD_ERROR_CODES: [i64; 2] = [-32600, -32601];

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawEvent {
    /// Decoded topic list
    pub topic: Vec<String>,
    /// Decoded event payload
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger`: the ledger sequence to scan from (inclusive).
/// * `cursor`: optional opaque pagination cursor from a previous response.
/// * `limit`: maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        let params = build_params(contract_id, start_ledger, cursor, limit);

        let response = client
            .post(rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getEvents",
                "params": params,
            }))
            .send()
            .await;

        let resp = match response {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                backoff = back_off(backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            backoff = back_off(backoff).await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            if HARD_ERROR_CODES.contains(&err.code) {
                return Err(IndexerError::Rpc {
                    code: err.code,
                    message: err.message,
                });
            }
            warn!(
                "RPC soft error (will retry in {backoff}s): {} {}",
                err.code, err.message
            );
            backoff = back_off(backoff).await;
            continue;
        }

        let result = body.result.ok_or_else(|| {
            IndexerError::EventParse("Empty result from getEvents".to_string())
        })?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok((result.events, result.cursor, result.latest_ledger));
    }
}

/// Sleep for `secs` and return the next, doubled delay.
async fn back_off(secs: u64) -> u64 {
    tokio::time::sleep(Duration::from_secs(secs)).await;
    (secs * 2).min(MAX_BACKOFF_SECS)
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

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`EscrowEvent`] structs.
///
/// Events from failed contract calls are dropped: their state changes were
/// rolled back, so they never happened as far as the ledger is concerned.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<EscrowEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call.unwrap_or(true))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<EscrowEvent> {
    // Extract leading topic symbol to determine event type.
    let first_topic = raw.topic.first()?;
    let kind = EventKind::from_topic(&extract_symbol(first_topic));

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let project_id = raw.topic.get(1).map(|t| extract_u64_or_raw(t));

    let (actor, amount) = decode_data(&raw.value, &kind);

    Some(EscrowEvent {
        event_type: kind.as_str().to_string(),
        project_id,
        actor,
        amount,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull the actor and amount out of the event payload, which the RPC decodes
/// from XDR into a JSON object keyed by the contract struct's field names.
fn decode_data(value: &Value, kind: &EventKind) -> (Option<String>, Option<String>) {
    match kind {
        EventKind::ProjectCreated => (
            extract_field(value, &["creator"]).or_else(|| find_nested(value, "creator")),
            extract_field(value, &["funding_goal"]),
        ),
        EventKind::ContributionMade => (
            extract_field(value, &["contributor"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::GoalReached => (None, extract_field(value, &["total_funds"])),
        EventKind::FundsClaimed => (
            extract_field(value, &["creator"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::RefundIssued => (
            extract_field(value, &["contributor"]),
            extract_field(value, &["amount"]),
        ),
        EventKind::Unknown => (None, None),
    }
}

fn extract_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn find_nested(value: &Value, key: &str) -> Option<String> {
    if let Value::Object(map) = value {
        for (k, v) in map {
            if k == key {
                return v.as_str().map(String::from);
            }
            if let Some(found) = find_nested(v, key) {
                return Some(found);
            }
        }
    }
    None
}

/// Extract a Soroban Symbol from the decoded topic string.
/// The RPC may return `{"type":"symbol","value":"created"}`,
/// `{"symbol":"created"}`, or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v
            .get("value")
            .or_else(|| v.get("symbol"))
            .and_then(|x| x.as_str())
        {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Extract the project id from a topic entry that might be a JSON object or raw number/string.
fn extract_u64_or_raw(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        let inner = v.get("value").or_else(|| v.get("u64"));
        if let Some(n) = inner.and_then(|x| x.as_u64()) {
            return n.to_string();
        }
        if let Some(s) = inner.and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
