use super::{ClassificationConfidence, InterfaceMedium};

/// Interface type as reported by an authoritative platform metadata source
/// (the SystemConfiguration taxonomy on macOS).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemInterfaceType {
    Ethernet,
    WiFi,
    Ipsec,
    Bridge,
    Loopback,
    BluetoothPan,
    Other,
}

impl SystemInterfaceType {
    fn medium(self) -> InterfaceMedium {
        match self {
            SystemInterfaceType::Ethernet => InterfaceMedium::Wired,
            SystemInterfaceType::WiFi => InterfaceMedium::WiFi,
            SystemInterfaceType::Ipsec => InterfaceMedium::Vpn,
            SystemInterfaceType::Bridge => InterfaceMedium::Bridge,
            SystemInterfaceType::Loopback => InterfaceMedium::Loopback,
            SystemInterfaceType::BluetoothPan => InterfaceMedium::Bluetooth,
            SystemInterfaceType::Other => InterfaceMedium::Unknown,
        }
    }
}

/// Result of classifying a single device name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub medium: InterfaceMedium,
    pub display_name: String,
    pub confidence: ClassificationConfidence,
}

/// Classifies a device into `(medium, display_name, confidence)`.
///
/// A system-reported type wins outright at `High` confidence. Without one,
/// the device-name prefix and the fallback label (typically the hardware-port
/// map entry) decide at `Low` confidence. Total: unmapped input resolves to
/// `Unknown`/`Low`, never an error.
pub fn classify(
    bsd_name: &str,
    system_type: Option<SystemInterfaceType>,
    display_name: Option<&str>,
    fallback_type_label: &str,
) -> Classification {
    let resolved_name = display_name
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            if fallback_type_label.is_empty() {
                bsd_name.to_string()
            } else {
                fallback_type_label.to_string()
            }
        });

    if let Some(system_type) = system_type {
        return Classification {
            medium: system_type.medium(),
            display_name: resolved_name,
            confidence: ClassificationConfidence::High,
        };
    }

    let medium = if bsd_name.starts_with("lo") {
        InterfaceMedium::Loopback
    } else if bsd_name.starts_with("awdl") || bsd_name.starts_with("llw") {
        InterfaceMedium::Awdl
    } else if bsd_name.starts_with("utun") {
        InterfaceMedium::Vpn
    } else if bsd_name.starts_with("bridge") {
        InterfaceMedium::Bridge
    } else {
        match fallback_type_label {
            "Wi-Fi" => InterfaceMedium::WiFi,
            "Ethernet" => InterfaceMedium::Wired,
            "Bridge" => InterfaceMedium::Bridge,
            // A Thunderbolt port without an Ethernet pairing is not itself
            // wired networking.
            "Thunderbolt" => InterfaceMedium::Unknown,
            "Bluetooth" => InterfaceMedium::Bluetooth,
            _ => InterfaceMedium::Unknown,
        }
    };

    Classification {
        medium,
        display_name: resolved_name,
        confidence: ClassificationConfidence::Low,
    }
}

/// Fallback type label for devices that appear in neither the hardware-port
/// map nor the authoritative metadata.
pub fn fallback_label(name: &str) -> &'static str {
    if name.starts_with("lo") {
        "Loopback"
    } else if name.starts_with("awdl") || name.starts_with("llw") {
        "AWDL"
    } else if name.starts_with("utun") {
        "VPN"
    } else if name.starts_with("bridge") {
        "Bridge"
    } else {
        "Unknown"
    }
}
