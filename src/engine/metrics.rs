//! Per-stage timings for one resolution.
//!
//! Collected only by `resolve_verbose_with`; the plain entry points skip the
//! clock reads.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StageMetrics {
    pub normalize: Duration,
    pub classify: Duration,
    pub extract: Duration,
    /// Synthesis including the error path.
    pub synthesize: Duration,
    /// Classic template lookup.
    pub classic: Duration,
    /// Arbitration, which sanitizes both candidates.
    pub sanitize: Duration,
    /// Wall time for the whole call.
    pub total: Duration,
}

impl StageMetrics {
    /// Sum of the individual stages; at most `total`.
    pub fn stages(&self) -> Duration {
        self.normalize + self.classify + self.extract + self.synthesize + self.classic + self.sanitize
    }
}
