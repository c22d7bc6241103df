
use crate::conf::AnalysisConfig;
use crate::metrics::PerformanceReport;
use crate::pipeline::EventStore;
use std::io::Cursor;

pub(crate) const RUN: &str = "\
2025-01-15T10:00:00.100Z INFO Batch 1 (append) submitted with job_id: a1
2025-01-15T10:00:00.200Z INFO Batch 2 (nullify) submitted with job_id: n1
2025-01-15T10:00:01.000Z INFO Proof completed job_id=a1 round_trip_ms=500 proof_ms=700
2025-01-15T10:00:03.000Z INFO Proof completed job_id=n1 round_trip_ms=1500 proof_ms=1000
2025-01-15T10:00:03.500Z INFO tx sent: s1 type=append ixs=2
2025-01-15T10:00:05.000Z INFO Queue update: tree=smt1 items=4
2025-01-15T10:00:06.000Z INFO Queue update: tree=smt1 items=0
2025-01-15T10:00:07.000Z INFO Reached batch limit (10)
";

pub(crate) fn store_for(log: &str) -> EventStore {
    EventStore::from_reader(Cursor::new(log)).unwrap()
}

pub(crate) fn report_for(log: &str) -> PerformanceReport {
    PerformanceReport::build(&store_for(log), &AnalysisConfig::default())
}
