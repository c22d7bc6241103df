use crate::pipeline::constants::*;
use crate::pipeline::extract::*;
use crate::pipeline::types::{BottleneckCategory, LogEvent, Timestamp};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Submission,
    Completion,
    Transaction,
    ProofRequest,
    IndexerWait,
    BatchLimit,
    QueueUpdate,
    Throughput,
    Idle,
}

/// Priority order. The first marker contained in a line decides its kind.
const MARKERS: &[(&str, LineKind)] = &[
    (SUBMISSION_MARKER, LineKind::Submission),
    (COMPLETION_MARKER, LineKind::Completion),
    (TRANSACTION_MARKER, LineKind::Transaction),
    (PROOF_REQUEST_MARKER, LineKind::ProofRequest),
    (INDEXER_WAIT_MARKER, LineKind::IndexerWait),
    (BATCH_LIMIT_MARKER, LineKind::BatchLimit),
    (QUEUE_UPDATE_MARKER, LineKind::QueueUpdate),
    (THROUGHPUT_MARKER, LineKind::Throughput),
    (IDLE_MARKER, LineKind::Idle),
];

pub fn line_kind(line: &str) -> Option<LineKind> {
    MARKERS
        .iter()
        .find(|(marker, _)| line.contains(marker))
        .map(|(_, kind)| *kind)
}

/// Turns one raw log line into an event.
///
/// Returns `None` for lines without a timestamp, without any known marker, or
/// whose marker matched but whose fields did not.
pub fn classify(raw: &str) -> Option<LogEvent> {
    let line = strip_ansi(raw);
    let line = line.as_ref();

    let kind = line_kind(line)?;
    let timestamp = extract_timestamp(line)?;

    let event = extract_fields(kind, line, timestamp);
    if event.is_none() {
        trace!(?kind, line, "marker matched but fields absent; skipping line");
    }
    event
}

fn extract_fields(kind: LineKind, line: &str, ts: Timestamp) -> Option<LogEvent> {
    match kind {
        LineKind::Submission => extract_submission(line, ts).map(LogEvent::Submission),
        LineKind::Completion => extract_completion(line, ts).map(LogEvent::Completion),
        LineKind::Transaction => extract_transaction(line, ts).map(LogEvent::Transaction),
        LineKind::ProofRequest => extract_proof_request(line, ts).map(LogEvent::Request),
        LineKind::IndexerWait => extract_bottleneck(
            line,
            INDEXER_WAIT_MARKER,
            BottleneckCategory::IndexerSyncWait,
            ts,
        )
        .map(LogEvent::Bottleneck),
        LineKind::BatchLimit => {
            extract_bottleneck(line, BATCH_LIMIT_MARKER, BottleneckCategory::BatchLimit, ts)
                .map(LogEvent::Bottleneck)
        }
        LineKind::QueueUpdate => extract_queue_update(line, ts).map(LogEvent::Queue),
        LineKind::Throughput => extract_throughput(line, ts).map(LogEvent::Throughput),
        LineKind::Idle => extract_bottleneck(line, IDLE_MARKER, BottleneckCategory::Idle, ts)
            .map(LogEvent::Bottleneck),
    }
}
