// Trigger substrings, in classification priority order.
pub const SUBMISSION_MARKER: &str = "submitted with job_id";
pub const COMPLETION_MARKER: &str = "Proof completed";
pub const TRANSACTION_MARKER: &str = "tx sent:";
pub const PROOF_REQUEST_MARKER: &str = "proof request for batch";
pub const INDEXER_WAIT_MARKER: &str = "Waiting for indexer";
pub const BATCH_LIMIT_MARKER: &str = "Reached batch limit";
pub const QUEUE_UPDATE_MARKER: &str = "Queue update:";
pub const THROUGHPUT_MARKER: &str = "V2_TPS_METRIC: operation_complete";
pub const IDLE_MARKER: &str = "No work available";

/// Returned by the store for job ids it has never seen.
pub const UNKNOWN_PROOF_TYPE: &str = "unknown";
