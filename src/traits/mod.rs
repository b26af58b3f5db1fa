//! Capability seams between the core and the platform/presentation layers.
//!
//! Each trait covers exactly one concern so tests can substitute
//! deterministic fakes. The platform adapters implementing these live with
//! the host application; the crate ships [`crate::monitor::SnapshotEngine`]
//! and [`crate::public_ip::HttpPublicIpSource`] as the production
//! implementations it can provide itself.

use std::collections::HashMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::Result;
use crate::interface::{Classification, RawInterfaceRecord};
use crate::snapshot::InterfaceSnapshot;
use crate::traffic::NetworkTrafficSnapshot;

/// Platform adapter producing one raw record per `getifaddrs`-style entry.
#[cfg_attr(test, automock)]
pub trait ObservationSource: Send + Sync {
    fn raw_records(&self) -> Result<Vec<RawInterfaceRecord>>;
}

/// Authoritative per-device classification, keyed by BSD name.
///
/// On macOS this is backed by the SystemConfiguration interface list; an
/// empty map simply means "no authoritative metadata available".
#[cfg_attr(test, automock)]
pub trait MetadataSource: Send + Sync {
    fn authoritative_metadata(&self) -> HashMap<String, Classification>;
}

/// Reports the BSD name of the interface carrying the default route, when
/// known.
#[cfg_attr(test, automock)]
pub trait DefaultRouteSource: Send + Sync {
    fn default_route_interface(&self) -> Option<String>;
}

/// Reads the cumulative system-wide traffic counters.
#[cfg_attr(test, automock)]
pub trait TrafficSnapshotSource: Send + Sync {
    fn current_snapshot(&self) -> NetworkTrafficSnapshot;
}

/// Resolves the machine's public IP address.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PublicIpSource: Send + Sync {
    async fn fetch_public_ip(&self) -> Result<String>;
}

/// Produces a full interface snapshot for one poll cycle.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InterfaceSnapshotSource: Send + Sync {
    async fn snapshot(&self, path_uses_wired_ethernet: bool) -> InterfaceSnapshot;
}
