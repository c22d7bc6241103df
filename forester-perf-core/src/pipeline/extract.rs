//! Field extraction for the forester log line shapes.
//!
//! Every `extract_*` function receives a line that already contains the
//! trigger substring for its kind. `None` means the full shape was not
//! present and the line is dropped.

use crate::pipeline::constants::*;
use crate::pipeline::types::*;
use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("ansi regex"));

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})[T ](\d{2}:\d{2}:\d{2}(?:\.\d{1,9})?)(Z|[+-]\d{2}:?\d{2})?")
        .expect("timestamp regex")
});

static SUBMISSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"Batch (\d+) \(([^)\s]+)\) submitted with job_id:\s*"?([^\s",:]+)"#)
        .expect("submission regex")
});

static TRANSACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"tx sent:\s*(\S+)").expect("transaction regex"));

static PROOF_REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Submitting (\S+) proof request for batch (\d+)").expect("proof request regex")
});

//-----------------------------------------------------------------------------
// Line normalization
//-----------------------------------------------------------------------------

pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    if !line.contains('\x1b') {
        return Cow::Borrowed(line);
    }
    ANSI_ESCAPE.replace_all(line, "")
}

pub fn extract_timestamp(line: &str) -> Option<Timestamp> {
    let caps = TIMESTAMP.captures(line)?;
    let naive = NaiveDateTime::parse_from_str(
        &format!("{}T{}", &caps[1], &caps[2]),
        "%Y-%m-%dT%H:%M:%S%.f",
    )
    .ok()?;

    match caps.get(3).map(|m| m.as_str()) {
        None | Some("Z") => Some(Utc.from_utc_datetime(&naive)),
        Some(offset) => {
            let offset = parse_offset(offset)?;
            offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let sign = if raw.starts_with('-') { -1 } else { 1 };
    let digits: String = raw[1..].chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Whitespace separated `key=value` tokens. Quotes around values and trailing
/// commas are stripped. Tokens without `=` are ignored.
pub fn parse_kv(text: &str) -> HashMap<&str, &str> {
    let mut map = HashMap::new();
    for token in text.split_whitespace() {
        if let Some((k, v)) = token.split_once('=') {
            let v = v.trim_end_matches(',').trim_matches('"');
            map.insert(k.trim(), v);
        }
    }
    map
}

/// Millisecond value, with or without an `ms` suffix.
fn parse_ms(raw: &str) -> Option<u64> {
    raw.strip_suffix("ms").unwrap_or(raw).parse().ok()
}

fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    line.find(marker).map(|idx| &line[idx + marker.len()..])
}

//-----------------------------------------------------------------------------
// Per-kind shapes
//-----------------------------------------------------------------------------

pub fn extract_submission(line: &str, timestamp: Timestamp) -> Option<ProofSubmission> {
    let caps = SUBMISSION.captures(line)?;
    Some(ProofSubmission {
        timestamp,
        seq: caps[1].parse().ok()?,
        proof_type: caps[2].to_string(),
        job_id: caps[3].to_string(),
    })
}

pub fn extract_completion(line: &str, timestamp: Timestamp) -> Option<ProofCompletion> {
    let kv = parse_kv(after_marker(line, COMPLETION_MARKER)?);
    Some(ProofCompletion {
        timestamp,
        round_trip_ms: kv.get("round_trip_ms").and_then(|v| parse_ms(v))?,
        job_id: kv.get("job_id").map(|v| v.to_string()),
        proof_type: None,
        proof_ms: kv.get("proof_ms").and_then(|v| parse_ms(v)),
    })
}

pub fn extract_transaction(line: &str, timestamp: Timestamp) -> Option<TransactionEvent> {
    let caps = TRANSACTION.captures(line)?;
    let whole = caps.get(0)?;
    let kv = parse_kv(&line[whole.end()..]);
    Some(TransactionEvent {
        timestamp,
        instructions: kv.get("ixs")?.parse().ok()?,
        tx_type: kv.get("type")?.to_string(),
        signature: caps[1].trim_end_matches(',').to_string(),
    })
}

pub fn extract_proof_request(line: &str, timestamp: Timestamp) -> Option<ProofRequest> {
    let caps = PROOF_REQUEST.captures(line)?;
    Some(ProofRequest {
        timestamp,
        proof_type: caps[1].to_string(),
        batch: caps[2].parse().ok()?,
    })
}

pub fn extract_bottleneck(
    line: &str,
    marker: &str,
    category: BottleneckCategory,
    timestamp: Timestamp,
) -> Option<BottleneckEvent> {
    let detail = after_marker(line, marker)?
        .trim_start_matches([':', ' '])
        .trim_end();
    Some(BottleneckEvent {
        timestamp,
        category,
        detail: detail.to_string(),
    })
}

pub fn extract_queue_update(line: &str, timestamp: Timestamp) -> Option<QueueUpdate> {
    let kv = parse_kv(after_marker(line, QUEUE_UPDATE_MARKER)?);
    Some(QueueUpdate {
        timestamp,
        tree: kv.get("tree")?.to_string(),
        items: kv.get("items")?.parse().ok()?,
    })
}

pub fn extract_throughput(line: &str, timestamp: Timestamp) -> Option<ThroughputSample> {
    let kv = parse_kv(after_marker(line, THROUGHPUT_MARKER)?);
    Some(ThroughputSample {
        timestamp,
        tree: kv.get("tree")?.to_string(),
        tree_type: kv.get("tree_type")?.to_string(),
        duration_ms: kv.get("duration_ms").and_then(|v| parse_ms(v))?,
        items_processed: kv.get("items_processed")?.parse().ok()?,
        zkp_batches: kv.get("zkp_batches").and_then(|v| v.parse().ok()),
        tps: kv.get("tps").and_then(|v| v.parse().ok()),
    })
}
