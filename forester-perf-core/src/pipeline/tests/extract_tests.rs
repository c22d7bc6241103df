use crate::pipeline::extract::*;
use chrono::{TimeZone, Timelike, Utc};
use pretty_assertions::assert_eq;

fn ts() -> crate::pipeline::Timestamp {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
}

#[test]
fn strip_ansi_removes_color_sequences() {
    let line = "\x1b[2m2025-01-15T10:00:00Z\x1b[0m \x1b[32m INFO\x1b[0m Proof completed";

    assert_eq!(
        strip_ansi(line),
        "2025-01-15T10:00:00Z  INFO Proof completed"
    );
}

#[test]
fn strip_ansi_is_noop_on_clean_input() {
    let line = "2025-01-15T10:00:00Z INFO plain";

    assert!(matches!(strip_ansi(line), std::borrow::Cow::Borrowed(_)));
}

#[test]
fn timestamp_with_zulu_and_micros() {
    let parsed = extract_timestamp("2025-01-15T10:23:45.123456Z  INFO forester: hi").unwrap();

    assert_eq!(parsed.hour(), 10);
    assert_eq!(parsed.minute(), 23);
    assert_eq!(parsed.second(), 45);
    assert_eq!(parsed.nanosecond(), 123_456_000);
}

#[test]
fn timestamp_without_zone_is_utc() {
    let parsed = extract_timestamp("[2025-01-15 10:00:00.500] Proof completed").unwrap();

    assert_eq!(parsed, ts() + chrono::Duration::milliseconds(500));
}

#[test]
fn timestamp_with_offset_is_normalized() {
    let parsed = extract_timestamp("2025-01-15T12:00:00+02:00 something").unwrap();

    assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap());
}

#[test]
fn missing_timestamp_is_none() {
    assert_eq!(extract_timestamp("Proof completed round_trip_ms=5"), None);
}

#[test]
fn parse_kv_strips_quotes_and_commas() {
    let kv = parse_kv(r#"job_id="abc", round_trip_ms=12, junk proof_ms=3"#);

    assert_eq!(kv.get("job_id"), Some(&"abc"));
    assert_eq!(kv.get("round_trip_ms"), Some(&"12"));
    assert_eq!(kv.get("proof_ms"), Some(&"3"));
    assert_eq!(kv.len(), 3);
}

#[test]
fn submission_shape() {
    let line = "INFO forester: Batch 7 (address) submitted with job_id: 4f2a-99";

    let s = extract_submission(line, ts()).unwrap();

    assert_eq!(s.seq, 7);
    assert_eq!(s.proof_type, "address");
    assert_eq!(s.job_id, "4f2a-99");
}

#[test]
fn submission_without_job_id_is_absent() {
    let line = "INFO forester: Batch 7 (address) submitted with job_id:";

    assert_eq!(extract_submission(line, ts()), None);
}

#[test]
fn submission_job_id_may_be_quoted_or_unspaced() {
    let quoted = r#"INFO Batch 3 (append) submitted with job_id: "q-1""#;
    let unspaced = "INFO Batch 4 (append) submitted with job_id:u-2";

    assert_eq!(extract_submission(quoted, ts()).map(|s| s.job_id), Some("q-1".to_string()));
    assert_eq!(extract_submission(unspaced, ts()).map(|s| s.job_id), Some("u-2".to_string()));
}

#[test]
fn submission_without_colon_is_absent() {
    let line = "INFO Batch 5 (append) submitted with job_id abc";

    assert_eq!(extract_submission(line, ts()), None);
}

#[test]
fn completion_with_all_fields() {
    let line = "INFO Proof completed job_id=abc round_trip_ms=1200 proof_ms=700";

    let c = extract_completion(line, ts()).unwrap();

    assert_eq!(c.round_trip_ms, 1200);
    assert_eq!(c.job_id.as_deref(), Some("abc"));
    assert_eq!(c.proof_ms, Some(700));
    assert_eq!(c.proof_type, None);
}

#[test]
fn completion_accepts_ms_suffix() {
    let line = "INFO Proof completed round_trip_ms=1200ms";

    let c = extract_completion(line, ts()).unwrap();

    assert_eq!(c.round_trip_ms, 1200);
    assert_eq!(c.job_id, None);
    assert_eq!(c.proof_ms, None);
}

#[test]
fn completion_without_round_trip_is_absent() {
    let line = "INFO Proof completed job_id=abc";

    assert_eq!(extract_completion(line, ts()), None);
}

#[test]
fn transaction_shape() {
    let line = "INFO tx sent: 5xQkT9a type=append ixs=3";

    let tx = extract_transaction(line, ts()).unwrap();

    assert_eq!(tx.signature, "5xQkT9a");
    assert_eq!(tx.tx_type, "append");
    assert_eq!(tx.instructions, 3);
}

#[test]
fn transaction_missing_instruction_count_is_absent() {
    assert_eq!(extract_transaction("tx sent: 5xQ type=append", ts()), None);
}

#[test]
fn proof_request_shape() {
    let r = extract_proof_request("DEBUG Submitting address proof request for batch 4", ts())
        .unwrap();

    assert_eq!(r.proof_type, "address");
    assert_eq!(r.batch, 4);
}

#[test]
fn queue_update_shape() {
    let q = extract_queue_update("INFO Queue update: tree=smt1 items=42", ts()).unwrap();

    assert_eq!(q.tree, "smt1");
    assert_eq!(q.items, 42);
}

#[test]
fn queue_update_with_non_numeric_items_is_absent() {
    assert_eq!(
        extract_queue_update("INFO Queue update: tree=smt1 items=many", ts()),
        None
    );
}

#[test]
fn throughput_shape() {
    let line = "INFO V2_TPS_METRIC: operation_complete tree=smt1 tree_type=StateV2 \
                duration_ms=5000 items_processed=500 zkp_batches=5 tps=100.0";

    let t = extract_throughput(line, ts()).unwrap();

    assert_eq!(t.tree, "smt1");
    assert_eq!(t.tree_type, "StateV2");
    assert_eq!(t.duration_ms, 5000);
    assert_eq!(t.items_processed, 500);
    assert_eq!(t.zkp_batches, Some(5));
    assert_eq!(t.tps, Some(100.0));
}
