//! nibble-core - interface classification and connection-state monitoring
//!
//! This crate is the engine behind a macOS menu-bar network status app. The
//! platform layer feeds it raw, noisy per-address-family interface records;
//! the crate merges them into a stable list of logical interfaces, classifies
//! each one into a medium (wired, Wi-Fi, VPN, bridge, loopback, AWDL,
//! Bluetooth) with a confidence level, and derives a tri-state wired
//! connection status using the system's default route as the tie-breaker.
//!
//! # Overview
//!
//! - **Classification**: [`interface::classify`] maps a BSD device name plus
//!   optional system metadata and a hardware-port label into a medium and
//!   confidence. Authoritative system types always outrank name heuristics.
//! - **Merging**: [`interface::merge_observations`] folds the per-address
//!   records for the same device into one [`interface::NetworkInterface`].
//! - **Snapshots**: [`snapshot::build_snapshot`] produces the full per-cycle
//!   result: all interfaces, the user-visible subset, and the
//!   [`snapshot::ConnectionState`].
//! - **Hardware ports**: [`hardware_port`] parses `networksetup` listing
//!   output and caches the device-to-label map with rate-limited refresh.
//! - **Throughput**: [`traffic::NetworkSpeedSampler`] turns cumulative byte
//!   counters into download/upload rates.
//! - **Orchestration**: [`monitor::NetworkMonitor`] drives the poll loop and
//!   [`monitor::SnapshotEngine`] wires the pieces together behind the
//!   [`traits`] seams.
//!
//! # Examples
//!
//! ```rust
//! use nibble_core::prelude::*;
//!
//! let snapshot = build_snapshot(
//!     vec![InterfaceObservation {
//!         name: "en5".to_string(),
//!         display_name: "USB-C LAN".to_string(),
//!         hardware_address: None,
//!         is_active: true,
//!         addresses: vec!["10.0.0.20".to_string()],
//!         medium: InterfaceMedium::Wired,
//!         confidence: ClassificationConfidence::High,
//!         adapter_description: None,
//!     }],
//!     true,
//!     Some("en5"),
//! );
//!
//! assert_eq!(snapshot.connection_state, ConnectionState::Active);
//! ```
//!
//! # Error Handling
//!
//! Classification, merging, evaluation, parsing, and sampling are total
//! functions: malformed input degrades to `Unknown` classifications or empty
//! results, never an error. The crate [`Error`] type only surfaces at the
//! platform and HTTP seams (interface enumeration, the public-IP lookup).
//!
//! # Thread Safety
//!
//! The pure functions are freely shareable. [`hardware_port::HardwarePortCache`]
//! is internally synchronized; [`traffic::NetworkSpeedSampler`] and
//! [`monitor::NetworkMonitor`] carry single-owner state and are mutated only
//! through the poll loop that owns them.

pub mod diagnostics;
pub mod hardware_port;
pub mod interface;
pub mod monitor;
pub mod public_ip;
pub mod snapshot;
pub mod traffic;
pub mod traits;

mod error;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::interface::{
        classify, merge_observations, Classification, ClassificationConfidence, InterfaceMedium,
        InterfaceObservation, NetworkInterface, RawInterfaceRecord, RouteRole,
        SystemInterfaceType,
    };
    pub use crate::monitor::{MonitorSettings, MonitorUpdate, NetworkMonitor, SnapshotEngine};
    pub use crate::snapshot::{
        build_snapshot, evaluate_connection_state, ConnectionState, InterfaceSnapshot,
    };
    pub use crate::traffic::{
        format_speed, NetworkSpeedReading, NetworkSpeedSampler, NetworkTrafficSnapshot,
    };
}
