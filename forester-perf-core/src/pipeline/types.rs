use chrono::{DateTime, Utc};
use serde::Serialize;

pub type Timestamp = DateTime<Utc>;

#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Submission(ProofSubmission),
    Completion(ProofCompletion),
    Transaction(TransactionEvent),
    Request(ProofRequest),
    Bottleneck(BottleneckEvent),
    Queue(QueueUpdate),
    Throughput(ThroughputSample),
}

impl LogEvent {
    pub fn timestamp(&self) -> Timestamp {
        match self {
            LogEvent::Submission(e) => e.timestamp,
            LogEvent::Completion(e) => e.timestamp,
            LogEvent::Transaction(e) => e.timestamp,
            LogEvent::Request(e) => e.timestamp,
            LogEvent::Bottleneck(e) => e.timestamp,
            LogEvent::Queue(e) => e.timestamp,
            LogEvent::Throughput(e) => e.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProofSubmission {
    pub timestamp: Timestamp,
    pub seq: u64,
    pub proof_type: String,
    pub job_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProofCompletion {
    pub timestamp: Timestamp,
    pub round_trip_ms: u64,
    pub job_id: Option<String>,
    /// Filled from the job-type map when the store records the completion.
    pub proof_type: Option<String>,
    pub proof_ms: Option<u64>,
}

impl ProofCompletion {
    /// Round trip minus pure proof time. Negative means the proof was
    /// already cached when the request arrived.
    pub fn queue_wait_ms(&self) -> Option<i64> {
        self.proof_ms.map(|proof| self.round_trip_ms as i64 - proof as i64)
    }

    pub fn is_cache_hit(&self) -> bool {
        self.queue_wait_ms().is_some_and(|w| w < 0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionEvent {
    pub timestamp: Timestamp,
    pub instructions: u32,
    pub tx_type: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProofRequest {
    pub timestamp: Timestamp,
    pub proof_type: String,
    pub batch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BottleneckCategory {
    IndexerSyncWait,
    BatchLimit,
    Idle,
}

impl BottleneckCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BottleneckCategory::IndexerSyncWait => "indexer sync wait",
            BottleneckCategory::BatchLimit => "batch limit",
            BottleneckCategory::Idle => "idle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleneckEvent {
    pub timestamp: Timestamp,
    pub category: BottleneckCategory,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Empty,
    HasElements,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueUpdate {
    pub timestamp: Timestamp,
    pub tree: String,
    pub items: u64,
}

impl QueueUpdate {
    pub fn status(&self) -> QueueStatus {
        if self.items == 0 {
            QueueStatus::Empty
        } else {
            QueueStatus::HasElements
        }
    }
}

/// One `V2_TPS_METRIC: operation_complete` line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputSample {
    pub timestamp: Timestamp,
    pub tree: String,
    pub tree_type: String,
    pub duration_ms: u64,
    pub items_processed: u64,
    pub zkp_batches: Option<u64>,
    pub tps: Option<f64>,
}
