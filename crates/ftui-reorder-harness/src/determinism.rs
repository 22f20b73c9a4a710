#![forbid(unsafe_code)]

//! Deterministic clock and run identity for scenario runs.
//!
//! Scenario time never reads the wall clock after start-up: every step moves
//! the clock forward by a fixed amount (or by an explicit wait), so the same
//! scenario always produces the same trace.

use std::time::Duration;

use web_time::Instant;

/// Shared deterministic fixture for one scenario run.
#[derive(Debug, Clone)]
pub struct DeterminismFixture {
    run_id: String,
    step: Duration,
    origin: Instant,
    elapsed: Duration,
    ts_counter: u64,
}

impl DeterminismFixture {
    /// Create a fixture whose clock advances `step_ms` per step.
    pub fn new(prefix: &str, step_ms: u64) -> Self {
        Self {
            run_id: format!("{prefix}_step{step_ms}"),
            step: Duration::from_millis(step_ms),
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            ts_counter: 0,
        }
    }

    /// Stable run identifier for JSONL traces.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Advance by one regular step.
    pub fn advance_step(&mut self) {
        self.elapsed += self.step;
    }

    /// Advance by an explicit wait.
    pub fn advance_ms(&mut self, ms: u64) {
        self.elapsed += Duration::from_millis(ms);
    }

    /// Scenario time as an instant.
    pub fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    /// Scenario time in milliseconds since start.
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Next deterministic sequence stamp (`T000000`, `T000001`, ...).
    pub fn timestamp(&mut self) -> String {
        let n = self.ts_counter;
        self.ts_counter += 1;
        format!("T{n:06}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_monotonic() {
        let mut fixture = DeterminismFixture::new("fixture_ts", 16);
        assert_eq!(fixture.timestamp(), "T000000");
        assert_eq!(fixture.timestamp(), "T000001");
    }

    #[test]
    fn clock_advances_by_step_and_wait() {
        let mut fixture = DeterminismFixture::new("fixture_clock", 7);
        fixture.advance_step();
        assert_eq!(fixture.now_ms(), 7);
        fixture.advance_ms(200);
        assert_eq!(fixture.now_ms(), 207);
        assert!(fixture.now() > fixture.now() - Duration::from_millis(1));
    }

    #[test]
    fn run_id_is_stable() {
        let fixture = DeterminismFixture::new("demo", 16);
        assert_eq!(fixture.run_id(), "demo_step16");
    }
}
