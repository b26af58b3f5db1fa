//! Hardware-port label parsing and the rate-limited port-map cache.
//!
//! `networksetup -listallhardwareports` prints repeated `Hardware Port:` /
//! `Device:` pairs. The parser turns that text into a device-name →
//! normalized-label map; [`HardwarePortCache`] keeps the latest map behind a
//! mutex and re-scans at most once per refresh interval.

use std::collections::HashMap;
use std::process::Command;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};


const HARDWARE_PORT_PREFIX: &str = "Hardware Port:";
const DEVICE_PREFIX: &str = "Device:";

/// Parses hardware-port listing output into a device → label map.
///
/// A `Hardware Port:` line establishes the current port context; `Device:`
/// lines attach to it until the next port line. Pure function: malformed
/// input yields a partial or empty map, never an error.
pub fn parse_hardware_ports(output: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut current_port: Option<String> = None;

    for line in output.lines() {
        let trimmed = line.trim();

        if let Some(value) = trimmed.strip_prefix(HARDWARE_PORT_PREFIX) {
            current_port = Some(value.trim().to_string());
            continue;
        }

        if let Some(value) = trimmed.strip_prefix(DEVICE_PREFIX) {
            if let Some(port) = &current_port {
                map.insert(value.trim().to_string(), normalized_label(port));
            }
        }
    }

    map
}

/// Normalizes a vendor port label into the small set of medium labels the
/// classifier understands. First match wins; unrecognized labels pass
/// through unchanged.
fn normalized_label(port: &str) -> String {
    let lowered = port.to_lowercase();

    if lowered.contains("wi-fi") || lowered.contains("airport") {
        return "Wi-Fi".to_string();
    }

    if lowered.contains("thunderbolt") && lowered.contains("ethernet") {
        return "Ethernet".to_string();
    }

    if lowered.contains("bridge") {
        return "Bridge".to_string();
    }

    if lowered.contains("ethernet") {
        return "Ethernet".to_string();
    }

    if lowered.contains("thunderbolt") {
        return "Thunderbolt".to_string();
    }

    if lowered.contains("bluetooth") {
        return "Bluetooth".to_string();
    }

    port.to_string()
}

/// Loads the raw listing text; `None` on any failure.
pub type PortListingLoader = Box<dyn Fn() -> Option<String> + Send + Sync>;

/// Runs the refresh work, normally on a background thread.
pub type RefreshExecutor = Box<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>;

/// Monotonic clock source, injectable for tests.
pub type Clock = Box<dyn Fn() -> Instant + Send + Sync>;

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Default)]
struct CacheState {
    map: HashMap<String, String>,
    last_refresh_at: Option<Instant>,
    refresh_in_flight: bool,
}

struct CacheInner {
    refresh_interval: Duration,
    clock: Clock,
    loader: PortListingLoader,
    state: Mutex<CacheState>,
}

impl CacheInner {
    fn refresh_now(&self) {
        let output = (self.loader)();
        let parsed = output.as_deref().map(parse_hardware_ports);
        let finished_at = (self.clock)();

        let mut state = self.state.lock();
        match parsed {
            Some(map) => {
                debug!(ports = map.len(), "hardware port map refreshed");
                state.map = map;
            }
            // Loader failure keeps the previous map; the timestamp still
            // advances so the rate limiter moves on.
            None => warn!("hardware port listing failed, keeping previous map"),
        }
        state.last_refresh_at = Some(finished_at);
        state.refresh_in_flight = false;
    }
}

/// Cached device → hardware-port-label map with rate-limited background
/// refresh.
///
/// A refresh request is a no-op while one is in flight or within the refresh
/// interval of the last completed scan.
pub struct HardwarePortCache {
    inner: Arc<CacheInner>,
    executor: RefreshExecutor,
}

impl HardwarePortCache {
    pub fn new() -> Self {
        Self::with_parts(
            DEFAULT_REFRESH_INTERVAL,
            Box::new(Instant::now),
            Box::new(load_hardware_port_listing),
            Box::new(|work| {
                std::thread::spawn(work);
            }),
        )
    }

    pub fn with_parts(
        refresh_interval: Duration,
        clock: Clock,
        loader: PortListingLoader,
        executor: RefreshExecutor,
    ) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                refresh_interval,
                clock,
                loader,
                state: Mutex::new(CacheState::default()),
            }),
            executor,
        }
    }

    /// Returns a copy of the current map.
    pub fn current_map(&self) -> HashMap<String, String> {
        self.inner.state.lock().map.clone()
    }

    /// Schedules a refresh unless one is in flight or the last one is still
    /// fresh.
    pub fn refresh_if_needed(&self) {
        let now = (self.inner.clock)();

        {
            let mut state = self.inner.state.lock();
            if !should_refresh(&state, now, self.inner.refresh_interval) {
                return;
            }
            state.refresh_in_flight = true;
        }

        let inner = Arc::clone(&self.inner);
        (self.executor)(Box::new(move || inner.refresh_now()));
    }
}

impl Default for HardwarePortCache {
    fn default() -> Self {
        Self::new()
    }
}

fn should_refresh(state: &CacheState, now: Instant, refresh_interval: Duration) -> bool {
    if state.refresh_in_flight {
        return false;
    }

    match state.last_refresh_at {
        Some(last) => now.saturating_duration_since(last) >= refresh_interval,
        None => true,
    }
}

/// Shells out to `networksetup`; `None` on spawn failure, non-zero exit, or
/// undecodable output.
fn load_hardware_port_listing() -> Option<String> {
    let output = Command::new("/usr/sbin/networksetup")
        .arg("-listallhardwareports")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8(output.stdout).ok()
}
