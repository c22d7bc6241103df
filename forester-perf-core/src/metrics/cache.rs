use crate::pipeline::ProofCompletion;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    /// Completions that carried a pure-proof time.
    pub with_timing: usize,
    pub hits: usize,
    pub hit_rate_pct: f64,
}

impl CacheStats {
    /// `None` when no completion carries timing data.
    pub fn from_completions(completions: &[ProofCompletion]) -> Option<Self> {
        let with_timing = completions
            .iter()
            .filter(|c| c.queue_wait_ms().is_some())
            .count();
        if with_timing == 0 {
            return None;
        }

        let hits = completions.iter().filter(|c| c.is_cache_hit()).count();

        Some(Self {
            with_timing,
            hits,
            hit_rate_pct: hits as f64 / with_timing as f64 * 100.0,
        })
    }
}
