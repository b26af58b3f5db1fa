//! Throughput sampling from cumulative OS byte counters.

use std::time::Instant;


/// Cumulative receive/send counters at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkTrafficSnapshot {
    pub received_bytes: u64,
    pub sent_bytes: u64,
}

/// Instantaneous throughput derived from two successive snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSpeedReading {
    pub download_bytes_per_second: f64,
    pub upload_bytes_per_second: f64,
}

impl NetworkSpeedReading {
    pub const ZERO: Self = Self {
        download_bytes_per_second: 0.0,
        upload_bytes_per_second: 0.0,
    };
}

/// Computes throughput deltas between successive counter snapshots.
///
/// Holds the last snapshot/timestamp pair as its only state; the single poll
/// loop owns the mutation, so there is no internal locking.
#[derive(Debug, Default)]
pub struct NetworkSpeedSampler {
    last: Option<(NetworkTrafficSnapshot, Instant)>,
}

impl NetworkSpeedSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the speed since the previous sample and advances the
    /// baseline.
    ///
    /// The first call, a non-positive elapsed time, and a counter reset all
    /// yield zero rather than a negative or wrapped value.
    pub fn next_speed(
        &mut self,
        snapshot: NetworkTrafficSnapshot,
        at: Instant,
    ) -> NetworkSpeedReading {
        let previous = self.last.replace((snapshot, at));

        let Some((last_snapshot, last_at)) = previous else {
            return NetworkSpeedReading::ZERO;
        };

        let elapsed = match at.checked_duration_since(last_at) {
            Some(elapsed) if !elapsed.is_zero() => elapsed.as_secs_f64(),
            _ => return NetworkSpeedReading::ZERO,
        };

        let download_delta = snapshot.received_bytes.saturating_sub(last_snapshot.received_bytes);
        let upload_delta = snapshot.sent_bytes.saturating_sub(last_snapshot.sent_bytes);

        NetworkSpeedReading {
            download_bytes_per_second: download_delta as f64 / elapsed,
            upload_bytes_per_second: upload_delta as f64 / elapsed,
        }
    }
}

/// Formats a byte rate for display, stepping through KB/s, MB/s, and GB/s at
/// 1024 boundaries.
pub fn format_speed(bytes_per_second: f64) -> String {
    if bytes_per_second < 1024.0 {
        return format!("{} B/s", bytes_per_second.round() as u64);
    }

    let kilobytes = bytes_per_second / 1024.0;
    if kilobytes < 1024.0 {
        return format!("{kilobytes:.1} KB/s");
    }

    let megabytes = kilobytes / 1024.0;
    if megabytes < 1024.0 {
        return format!("{megabytes:.1} MB/s");
    }

    format!("{:.1} GB/s", megabytes / 1024.0)
}
