//! Snapshot building and connection-state evaluation.
//!
//! A snapshot is rebuilt from scratch every poll cycle: merge the raw
//! observations, annotate the default-route interface, derive the visible
//! subset, and evaluate the wired connection state against the unfiltered
//! list.

use serde::Serialize;

use crate::interface::{merge_observations, InterfaceMedium, InterfaceObservation, NetworkInterface, RouteRole};


/// Tri-state wired connection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// A wired adapter is up and the default route uses it
    Active,
    /// A wired adapter is up but the default route goes elsewhere
    Inactive,
    /// No wired adapter is up and running
    Disconnected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Active)
    }
}

/// Derives the connection state from the merged interface list and the
/// "default path currently routes over wired Ethernet" signal.
///
/// Strict three-rule decision; rule 1 short-circuits regardless of the path
/// flag.
pub fn evaluate_connection_state(
    interfaces: &[NetworkInterface],
    path_uses_wired_ethernet: bool,
) -> ConnectionState {
    let has_active_wired = interfaces
        .iter()
        .any(|interface| interface.medium == InterfaceMedium::Wired && interface.is_active);

    if !has_active_wired {
        return ConnectionState::Disconnected;
    }

    if !path_uses_wired_ethernet {
        return ConnectionState::Inactive;
    }

    ConnectionState::Active
}

/// The full per-cycle result handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSnapshot {
    pub all_interfaces: Vec<NetworkInterface>,
    pub visible_interfaces: Vec<NetworkInterface>,
    pub connection_state: ConnectionState,
}

impl InterfaceSnapshot {
    pub fn is_ethernet_connected(&self) -> bool {
        self.connection_state.is_connected()
    }

    pub fn empty() -> Self {
        Self {
            all_interfaces: Vec::new(),
            visible_interfaces: Vec::new(),
            connection_state: ConnectionState::Disconnected,
        }
    }
}

/// Builds a snapshot from raw observations plus the routing signals.
///
/// The connection state is always evaluated against the unfiltered interface
/// list; the visibility filter is presentation-only.
pub fn build_snapshot(
    observations: Vec<InterfaceObservation>,
    path_uses_wired_ethernet: bool,
    default_route_interface: Option<&str>,
) -> InterfaceSnapshot {
    let mut interfaces = merge_observations(observations);
    annotate_route_role(&mut interfaces, default_route_interface);

    let visible_interfaces: Vec<NetworkInterface> = interfaces
        .iter()
        .filter(|interface| is_visible(&interface.name))
        .cloned()
        .collect();

    let connection_state = evaluate_connection_state(&interfaces, path_uses_wired_ethernet);

    InterfaceSnapshot {
        all_interfaces: interfaces,
        visible_interfaces,
        connection_state,
    }
}

/// Loopback, AWDL, link-local Wi-Fi direct and tunnel devices are hidden
/// from the user-facing list.
fn is_visible(name: &str) -> bool {
    !name.starts_with("lo")
        && !name.starts_with("awdl")
        && !name.starts_with("llw")
        && !name.starts_with("utun")
}

fn annotate_route_role(interfaces: &mut [NetworkInterface], default_route_interface: Option<&str>) {
    // Absent route information means every role stays None.
    let Some(route_name) = default_route_interface else {
        return;
    };

    for interface in interfaces {
        interface.route_role = if interface.name == route_name {
            RouteRole::DefaultRoute
        } else {
            RouteRole::None
        };
    }
}
