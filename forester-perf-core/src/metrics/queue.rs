use crate::metrics::gaps::seconds_between;
use crate::metrics::latency::LatencyStats;
use crate::pipeline::{QueueStatus, QueueUpdate, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueueTransitions {
    /// HasElements -> Empty, seconds since the previous transition.
    pub drain_secs: Vec<f64>,
    /// Empty -> HasElements, seconds since the previous transition.
    pub response_secs: Vec<f64>,
}

/// Walks a two-valued status sequence.
///
/// The first observation only seeds the state. Every later status change is a
/// transition, and its sample is measured from the previous transition, so the
/// seed itself never anchors a sample. Response samples under `noise_floor_secs`
/// are discarded.
pub fn queue_transitions(
    states: &[(Timestamp, QueueStatus)],
    noise_floor_secs: f64,
) -> QueueTransitions {
    let mut out = QueueTransitions::default();

    let Some((_, first)) = states.first() else {
        return out;
    };

    let mut current = *first;
    let mut last_transition: Option<Timestamp> = None;

    for (ts, status) in &states[1..] {
        if *status == current {
            continue;
        }

        if let Some(prev) = last_transition {
            let secs = seconds_between(prev, *ts);
            match status {
                QueueStatus::Empty => out.drain_secs.push(secs),
                QueueStatus::HasElements => {
                    if secs >= noise_floor_secs {
                        out.response_secs.push(secs);
                    }
                }
            }
        }

        current = *status;
        last_transition = Some(*ts);
    }

    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueSummary {
    pub tree: String,
    pub updates: usize,
    pub peak_items: u64,
    pub final_items: u64,
    pub transitions: QueueTransitions,
    pub drain: Option<LatencyStats>,
    pub response: Option<LatencyStats>,
}

/// One summary per tree, in order of first appearance.
pub fn summarize_queues(updates: &[QueueUpdate], noise_floor_secs: f64) -> Vec<QueueSummary> {
    let mut trees: Vec<(&str, Vec<&QueueUpdate>)> = Vec::new();
    for update in updates {
        match trees.iter_mut().find(|(tree, _)| *tree == update.tree) {
            Some((_, seq)) => seq.push(update),
            None => trees.push((update.tree.as_str(), vec![update])),
        }
    }

    trees
        .into_iter()
        .map(|(tree, seq)| {
            let states: Vec<_> = seq.iter().map(|u| (u.timestamp, u.status())).collect();
            let transitions = queue_transitions(&states, noise_floor_secs);

            QueueSummary {
                tree: tree.to_string(),
                updates: seq.len(),
                peak_items: seq.iter().map(|u| u.items).max().unwrap_or(0),
                final_items: seq.last().map(|u| u.items).unwrap_or(0),
                drain: LatencyStats::from_samples(&transitions.drain_secs),
                response: LatencyStats::from_samples(&transitions.response_secs),
                transitions,
            }
        })
        .collect()
}
