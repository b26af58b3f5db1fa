//! Poll-loop orchestration: the snapshot engine, the path-update throttle,
//! refresh settings, and the monitor that ties interface snapshots, speed
//! sampling, and the public-IP lookup together.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::Stream;
use tracing::warn;

use crate::hardware_port::HardwarePortCache;
use crate::interface::{classify, fallback_label, ClassificationConfidence, InterfaceObservation};
use crate::snapshot::{build_snapshot, InterfaceSnapshot};
use crate::traffic::{NetworkSpeedReading, NetworkSpeedSampler};
use crate::traits::{
    DefaultRouteSource, InterfaceSnapshotSource, MetadataSource, ObservationSource, PublicIpSource,
    TrafficSnapshotSource,
};


const MIN_REFRESH_INTERVAL_SECS: u32 = 10;
const MAX_REFRESH_INTERVAL_SECS: u32 = 300;
const DEFAULT_REFRESH_INTERVAL_SECS: u32 = 30;
const DEFAULT_MINIMUM_PATH_REFRESH_INTERVAL: Duration = Duration::from_millis(500);

/// Clamps to the 10–300 s range and rounds to the nearest 10.
pub fn normalize_refresh_interval(secs: u32) -> u32 {
    let clamped = secs.clamp(MIN_REFRESH_INTERVAL_SECS, MAX_REFRESH_INTERVAL_SECS);
    (clamped + 5) / 10 * 10
}

/// User-configurable monitoring knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    refresh_interval_secs: u32,
    pub show_public_ip: bool,
}

impl MonitorSettings {
    pub fn new(refresh_interval_secs: u32, show_public_ip: bool) -> Self {
        Self {
            refresh_interval_secs: normalize_refresh_interval(refresh_interval_secs),
            show_public_ip,
        }
    }

    pub fn refresh_interval_secs(&self) -> u32 {
        self.refresh_interval_secs
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.refresh_interval_secs))
    }

    pub fn set_refresh_interval_secs(&mut self, secs: u32) {
        self.refresh_interval_secs = normalize_refresh_interval(secs);
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            show_public_ip: true,
        }
    }
}

/// Absorbs bursts of redundant path-change notifications: an update is
/// processed only if the minimum interval has elapsed since the last
/// processed one.
#[derive(Debug)]
pub struct PathUpdateThrottle {
    minimum_interval: Duration,
    last_processed_at: Option<Instant>,
}

impl PathUpdateThrottle {
    pub fn new(minimum_interval: Duration) -> Self {
        Self { minimum_interval, last_processed_at: None }
    }

    pub fn should_process(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_processed_at {
            if now.saturating_duration_since(last) < self.minimum_interval {
                return false;
            }
        }

        self.last_processed_at = Some(now);
        true
    }
}

impl Default for PathUpdateThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_PATH_REFRESH_INTERVAL)
    }
}

/// Production [`InterfaceSnapshotSource`]: classifies every raw platform
/// record and builds the snapshot.
///
/// Authoritative metadata wins when present; otherwise the hardware-port map
/// supplies the fallback label, and the device-name prefix fills in for
/// devices the map does not know.
pub struct SnapshotEngine {
    observations: Arc<dyn ObservationSource>,
    metadata: Arc<dyn MetadataSource>,
    default_route: Arc<dyn DefaultRouteSource>,
    port_cache: HardwarePortCache,
}

impl SnapshotEngine {
    pub fn new(
        observations: Arc<dyn ObservationSource>,
        metadata: Arc<dyn MetadataSource>,
        default_route: Arc<dyn DefaultRouteSource>,
        port_cache: HardwarePortCache,
    ) -> Self {
        Self { observations, metadata, default_route, port_cache }
    }

    fn observe(&self) -> Vec<InterfaceObservation> {
        let port_map = self.port_cache.current_map();
        let metadata = self.metadata.authoritative_metadata();

        let records = match self.observations.raw_records() {
            Ok(records) => records,
            Err(e) => {
                warn!("interface enumeration failed: {e}");
                return Vec::new();
            }
        };

        records
            .into_iter()
            .map(|record| {
                let classification = metadata.get(&record.name).cloned().unwrap_or_else(|| {
                    let label = port_map
                        .get(&record.name)
                        .map(String::as_str)
                        .unwrap_or_else(|| fallback_label(&record.name));
                    classify(&record.name, None, None, label)
                });

                let adapter_description = (classification.confidence
                    == ClassificationConfidence::High)
                    .then(|| classification.display_name.clone());

                InterfaceObservation {
                    name: record.name,
                    display_name: classification.display_name,
                    hardware_address: record.hardware_address,
                    is_active: record.is_active,
                    addresses: record.address.into_iter().collect(),
                    medium: classification.medium,
                    confidence: classification.confidence,
                    adapter_description,
                }
            })
            .collect()
    }
}

#[async_trait]
impl InterfaceSnapshotSource for SnapshotEngine {
    async fn snapshot(&self, path_uses_wired_ethernet: bool) -> InterfaceSnapshot {
        self.port_cache.refresh_if_needed();
        let default_route = self.default_route.default_route_interface();
        let observations = self.observe();
        build_snapshot(observations, path_uses_wired_ethernet, default_route.as_deref())
    }
}

/// One poll cycle's worth of output.
#[derive(Debug, Clone)]
pub struct MonitorUpdate {
    pub snapshot: InterfaceSnapshot,
    pub speed: NetworkSpeedReading,
}

type MonotonicClock = Box<dyn Fn() -> Instant + Send + Sync>;

/// Drives the poll loop: refreshes the snapshot, samples throughput, and
/// fetches the public IP on demand.
///
/// Owns the speed sampler's mutable state; all mutation happens through
/// `&mut self`, keeping the single-poll-loop contract explicit.
pub struct NetworkMonitor {
    interfaces: Arc<dyn InterfaceSnapshotSource>,
    traffic: Arc<dyn TrafficSnapshotSource>,
    public_ip: Arc<dyn PublicIpSource>,
    settings: MonitorSettings,
    sampler: NetworkSpeedSampler,
    throttle: PathUpdateThrottle,
    latest_path_uses_wired: bool,
    now: MonotonicClock,
}

impl NetworkMonitor {
    pub fn new(
        interfaces: Arc<dyn InterfaceSnapshotSource>,
        traffic: Arc<dyn TrafficSnapshotSource>,
        public_ip: Arc<dyn PublicIpSource>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            interfaces,
            traffic,
            public_ip,
            settings,
            sampler: NetworkSpeedSampler::new(),
            throttle: PathUpdateThrottle::default(),
            latest_path_uses_wired: false,
            now: Box::new(Instant::now),
        }
    }

    pub fn with_clock(mut self, now: MonotonicClock) -> Self {
        self.now = now;
        self
    }

    pub fn with_throttle(mut self, throttle: PathUpdateThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut MonitorSettings {
        &mut self.settings
    }

    /// Latches the path signal from a network-path-change notification and
    /// reports whether a refresh should run now.
    pub fn handle_path_event(&mut self, path_uses_wired_ethernet: bool) -> bool {
        self.latest_path_uses_wired = path_uses_wired_ethernet;
        let now = (self.now)();
        self.throttle.should_process(now)
    }

    /// Runs one poll cycle.
    pub async fn refresh(&mut self) -> MonitorUpdate {
        let snapshot = self.interfaces.snapshot(self.latest_path_uses_wired).await;
        let traffic = self.traffic.current_snapshot();
        let speed = self.sampler.next_speed(traffic, (self.now)());

        MonitorUpdate { snapshot, speed }
    }

    /// Resolves the public IP, or `None` when disabled or on failure. The
    /// provider is not consulted at all while the lookup is disabled.
    pub async fn fetch_public_ip(&self) -> Option<String> {
        if !self.settings.show_public_ip {
            return None;
        }

        match self.public_ip.fetch_public_ip().await {
            Ok(ip) => Some(ip),
            Err(e) => {
                warn!("public IP lookup failed: {e}");
                None
            }
        }
    }

    /// Turns the monitor into a periodic update stream at the configured
    /// refresh interval.
    pub fn updates(self) -> impl Stream<Item = MonitorUpdate> + Send {
        let interval = self.settings.refresh_interval();
        futures::stream::unfold(
            (self, tokio::time::interval(interval)),
            |(mut monitor, mut ticker)| async move {
                ticker.tick().await;
                let update = monitor.refresh().await;
                Some((update, (monitor, ticker)))
            },
        )
    }
}
