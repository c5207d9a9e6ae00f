//! Throttled progress reporting for long splits.

use crate::models::ProgressSnapshot;
use std::time::{Duration, Instant};

const BYTE_TRIGGER: u64 = 64 * 1024 * 1024;
const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Pipeline counters at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounters {
    pub bytes_read: u64,
    pub features_scanned: u64,
    pub features_routed: u64,
}

/// Time/byte-based throttler governing progress snapshot emission.
#[derive(Debug)]
pub struct ProgressThrottler {
    interval: Duration,
    byte_trigger: u64,
    started: Instant,
    last_emit: Instant,
    last_emit_bytes: u64,
}

impl ProgressThrottler {
    /// Throttler emitting at most once per `interval` (minimum 100 ms), or
    /// whenever another 64 MiB of input has been read.
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            byte_trigger: BYTE_TRIGGER,
            started: now,
            last_emit: now,
            last_emit_bytes: 0,
        }
    }

    /// Emit a snapshot if the interval elapsed or the byte trigger was crossed.
    pub fn consider(&mut self, now: Instant, counters: ProgressCounters) -> Option<ProgressSnapshot> {
        let elapsed = now.saturating_duration_since(self.last_emit);
        let bytes_delta = counters.bytes_read.saturating_sub(self.last_emit_bytes);

        if elapsed >= self.interval || bytes_delta >= self.byte_trigger {
            return Some(self.emit(now, counters));
        }

        None
    }

    /// Emit a final snapshot regardless of thresholds.
    pub fn force_emit(&mut self, now: Instant, counters: ProgressCounters) -> ProgressSnapshot {
        self.emit(now, counters)
    }

    fn emit(&mut self, now: Instant, counters: ProgressCounters) -> ProgressSnapshot {
        self.last_emit = now;
        self.last_emit_bytes = counters.bytes_read;

        let elapsed_ms = now.saturating_duration_since(self.started).as_millis();
        ProgressSnapshot {
            timestamp_ms: u64::try_from(elapsed_ms).unwrap_or(u64::MAX),
            bytes_read: counters.bytes_read,
            features_scanned: counters.features_scanned,
            features_routed: counters.features_routed,
        }
    }
}
