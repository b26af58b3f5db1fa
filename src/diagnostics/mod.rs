//! Diagnostics export: a JSON report of the current connection state and
//! interface list, with sensitive identifiers included only on explicit
//! opt-in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::interface::{ClassificationConfidence, InterfaceMedium, NetworkInterface, RouteRole};
use crate::snapshot::ConnectionState;


#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub generated_at: DateTime<Utc>,
    pub app_version: String,
    pub os_version: String,
    pub connection_state: ConnectionState,
    #[serde(rename = "publicIP", skip_serializing_if = "Option::is_none")]
    pub public_ip: Option<String>,
    pub interfaces: Vec<DiagnosticsInterface>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsInterface {
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub medium: InterfaceMedium,
    pub route_role: RouteRole,
    pub classification_confidence: ClassificationConfidence,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_address: Option<String>,
}

/// Assembles the report. Addresses, hardware addresses, and the public IP
/// are dropped entirely unless `include_sensitive_identifiers` is set.
#[allow(clippy::too_many_arguments)]
pub fn build_report(
    app_version: impl Into<String>,
    os_version: impl Into<String>,
    connection_state: ConnectionState,
    interfaces: &[NetworkInterface],
    public_ip: Option<&str>,
    include_sensitive_identifiers: bool,
    generated_at: DateTime<Utc>,
) -> DiagnosticsReport {
    DiagnosticsReport {
        generated_at,
        app_version: app_version.into(),
        os_version: os_version.into(),
        connection_state,
        public_ip: include_sensitive_identifiers.then(|| public_ip.map(str::to_string)).flatten(),
        interfaces: interfaces
            .iter()
            .map(|interface| DiagnosticsInterface {
                name: interface.name.clone(),
                display_name: interface.display_name.clone(),
                type_name: interface.type_name.clone(),
                medium: interface.medium,
                route_role: interface.route_role,
                classification_confidence: interface.confidence,
                is_active: interface.is_active,
                adapter_description: interface.adapter_description.clone(),
                addresses: include_sensitive_identifiers.then(|| interface.addresses.clone()),
                hardware_address: include_sensitive_identifiers
                    .then(|| interface.hardware_address.clone())
                    .flatten(),
            })
            .collect(),
    }
}

/// Pretty-prints the report as JSON.
pub fn to_json(report: &DiagnosticsReport) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| crate::error::Error::invalid_data(format!("diagnostics encoding failed: {e}")))
}
