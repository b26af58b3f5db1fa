//! Network-interface data model.
//!
//! The platform layer produces one [`RawInterfaceRecord`] per `getifaddrs`
//! entry, which means the same adapter shows up once per address family.
//! Classification turns each record into an [`InterfaceObservation`], and the
//! merge step folds observations sharing a BSD name into a single
//! [`NetworkInterface`].

use serde::Serialize;

mod classify;
mod merge;

pub use classify::{classify, fallback_label, Classification, SystemInterfaceType};
pub use merge::merge_observations;

#[cfg(test)]
mod tests;

/// Physical/logical transport classification of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceMedium {
    /// Wired Ethernet, including Thunderbolt/USB-C Ethernet adapters
    Wired,
    /// 802.11 wireless
    WiFi,
    /// Tunnel interfaces (utun, IPsec)
    Vpn,
    /// Bridge interface
    Bridge,
    /// Loopback interface
    Loopback,
    /// Apple Wireless Direct Link / low-latency WLAN service interfaces
    Awdl,
    /// Bluetooth PAN
    Bluetooth,
    /// Anything the classifier could not identify
    Unknown,
}

impl InterfaceMedium {
    /// Display string for this medium, used to populate the visible
    /// interface `type` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            InterfaceMedium::Wired => "Ethernet",
            InterfaceMedium::WiFi => "Wi-Fi",
            InterfaceMedium::Vpn => "VPN",
            InterfaceMedium::Bridge => "Bridge",
            InterfaceMedium::Loopback => "Loopback",
            InterfaceMedium::Awdl => "AWDL",
            InterfaceMedium::Bluetooth => "Bluetooth",
            InterfaceMedium::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for InterfaceMedium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Whether a classification came from authoritative system metadata or from
/// device-name heuristics.
///
/// `High` outranks `Low`; the derived ordering is what the merge step uses
/// when deciding whether an incoming observation replaces the accumulated
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationConfidence {
    /// Inferred purely from device-name prefixes or port labels
    Low,
    /// Backed by a system-reported interface type or hardware-port label
    High,
}

/// Role of an interface with respect to the system's default route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum RouteRole {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "defaultRoute")]
    DefaultRoute,
}

/// One raw `getifaddrs`-style record handed over by the platform adapter.
///
/// Carries at most one address: link-layer records populate
/// `hardware_address`, AF_INET/AF_INET6 records populate `address`.
#[derive(Debug, Clone, Default)]
pub struct RawInterfaceRecord {
    pub name: String,
    pub is_active: bool,
    pub address: Option<String>,
    pub hardware_address: Option<String>,
}

/// A single classified per-address-family observation of an adapter.
///
/// Transient: rebuilt from scratch on every poll cycle, never retained.
#[derive(Debug, Clone)]
pub struct InterfaceObservation {
    pub name: String,
    pub display_name: String,
    pub hardware_address: Option<String>,
    pub is_active: bool,
    pub addresses: Vec<String>,
    pub medium: InterfaceMedium,
    pub confidence: ClassificationConfidence,
    pub adapter_description: Option<String>,
}

/// A merged, externally visible network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    /// BSD device identifier, e.g. "en0"
    pub name: String,
    /// Human label (vendor/port name or fallback)
    pub display_name: String,
    /// MAC address, when a link-layer record contributed one
    pub hardware_address: Option<String>,
    /// True if any contributing observation saw the adapter up and running
    pub is_active: bool,
    /// Deduplicated union of addresses, sorted ascending
    pub addresses: Vec<String>,
    /// Display string derived from `medium`
    pub type_name: String,
    pub medium: InterfaceMedium,
    pub confidence: ClassificationConfidence,
    pub route_role: RouteRole,
    /// Shown only when the classification is authoritative
    pub adapter_description: Option<String>,
}
