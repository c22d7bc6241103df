use crate::error::ReportError;
use crate::pipeline::classify::classify;
use crate::pipeline::constants::UNKNOWN_PROOF_TYPE;
use crate::pipeline::types::*;
use ahash::RandomState;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Append-only event sequences, one per kind, in input line order.
///
/// Chronological order of the input is assumed, not checked.
#[derive(Debug, Default)]
pub struct EventStore {
    submissions: Vec<ProofSubmission>,
    completions: Vec<ProofCompletion>,
    transactions: Vec<TransactionEvent>,
    requests: Vec<ProofRequest>,
    bottlenecks: Vec<BottleneckEvent>,
    queue_updates: Vec<QueueUpdate>,
    throughput: Vec<ThroughputSample>,

    job_types: HashMap<String, String, RandomState>,
    lines_read: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single pass over `reader`. Lines that are not valid UTF-8 are decoded
    /// lossily rather than aborting the run.
    pub fn from_reader<R: BufRead>(mut reader: R) -> std::io::Result<Self> {
        let mut store = Self::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            store.push_line(line.trim_end_matches(['\n', '\r']));
        }

        Ok(store)
    }

    pub fn push_line(&mut self, line: &str) {
        self.lines_read += 1;
        if let Some(event) = classify(line) {
            self.record(event);
        }
    }

    pub fn record(&mut self, event: LogEvent) {
        match event {
            LogEvent::Submission(e) => {
                self.job_types.insert(e.job_id.clone(), e.proof_type.clone());
                self.submissions.push(e);
            }
            LogEvent::Completion(mut e) => {
                if e.proof_type.is_none() {
                    e.proof_type = e
                        .job_id
                        .as_ref()
                        .and_then(|id| self.job_types.get(id))
                        .cloned();
                }
                self.completions.push(e);
            }
            LogEvent::Transaction(e) => self.transactions.push(e),
            LogEvent::Request(e) => self.requests.push(e),
            LogEvent::Bottleneck(e) => self.bottlenecks.push(e),
            LogEvent::Queue(e) => self.queue_updates.push(e),
            LogEvent::Throughput(e) => self.throughput.push(e),
        }
    }

    pub fn resolve_type(&self, job_id: &str) -> &str {
        self.job_types
            .get(job_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PROOF_TYPE)
    }

    pub fn submissions(&self) -> &[ProofSubmission] {
        &self.submissions
    }

    pub fn completions(&self) -> &[ProofCompletion] {
        &self.completions
    }

    pub fn transactions(&self) -> &[TransactionEvent] {
        &self.transactions
    }

    pub fn requests(&self) -> &[ProofRequest] {
        &self.requests
    }

    pub fn bottlenecks(&self) -> &[BottleneckEvent] {
        &self.bottlenecks
    }

    pub fn queue_updates(&self) -> &[QueueUpdate] {
        &self.queue_updates
    }

    pub fn throughput(&self) -> &[ThroughputSample] {
        &self.throughput
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn event_count(&self) -> usize {
        self.submissions.len()
            + self.completions.len()
            + self.transactions.len()
            + self.requests.len()
            + self.bottlenecks.len()
            + self.queue_updates.len()
            + self.throughput.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }

    /// Earliest and latest timestamp across every kind.
    pub fn window(&self) -> Option<(Timestamp, Timestamp)> {
        let stamps = self
            .submissions
            .iter()
            .map(|e| e.timestamp)
            .chain(self.completions.iter().map(|e| e.timestamp))
            .chain(self.transactions.iter().map(|e| e.timestamp))
            .chain(self.requests.iter().map(|e| e.timestamp))
            .chain(self.bottlenecks.iter().map(|e| e.timestamp))
            .chain(self.queue_updates.iter().map(|e| e.timestamp))
            .chain(self.throughput.iter().map(|e| e.timestamp));

        stamps.fold(None, |acc, ts| match acc {
            None => Some((ts, ts)),
            Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
        })
    }
}

/// Reads and classifies a whole log file. Failing to open or read the file is
/// the only error; everything inside it degrades silently.
pub fn load_log(path: &Path) -> Result<EventStore, ReportError> {
    let file = File::open(path).map_err(|e| ReportError::read_log(path, e))?;
    let store =
        EventStore::from_reader(BufReader::new(file)).map_err(|e| ReportError::read_log(path, e))?;

    debug!(
        path = %path.display(),
        lines = store.lines_read(),
        events = store.event_count(),
        "log loaded"
    );

    Ok(store)
}
