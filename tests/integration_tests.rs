use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use nibble_core::hardware_port::HardwarePortCache;
use nibble_core::prelude::*;
use nibble_core::traits::{
    DefaultRouteSource, MetadataSource, ObservationSource, PublicIpSource, TrafficSnapshotSource,
};

struct FakeObservations(Vec<RawInterfaceRecord>);

impl ObservationSource for FakeObservations {
    fn raw_records(&self) -> Result<Vec<RawInterfaceRecord>> {
        Ok(self.0.clone())
    }
}

struct FakeMetadata(HashMap<String, Classification>);

impl MetadataSource for FakeMetadata {
    fn authoritative_metadata(&self) -> HashMap<String, Classification> {
        self.0.clone()
    }
}

struct FakeRoute(Option<String>);

impl DefaultRouteSource for FakeRoute {
    fn default_route_interface(&self) -> Option<String> {
        self.0.clone()
    }
}

struct FakeTraffic;

impl TrafficSnapshotSource for FakeTraffic {
    fn current_snapshot(&self) -> NetworkTrafficSnapshot {
        NetworkTrafficSnapshot { received_bytes: 42_000, sent_bytes: 7_000 }
    }
}

struct FakePublicIp;

#[async_trait]
impl PublicIpSource for FakePublicIp {
    async fn fetch_public_ip(&self) -> Result<String> {
        Ok("203.0.113.10".to_string())
    }
}

fn record(name: &str, is_active: bool, address: Option<&str>) -> RawInterfaceRecord {
    RawInterfaceRecord {
        name: name.to_string(),
        is_active,
        address: address.map(str::to_string),
        hardware_address: None,
    }
}

fn engine() -> SnapshotEngine {
    let listing = "Hardware Port: Wi-Fi\nDevice: en0\n\nHardware Port: Thunderbolt Ethernet Slot 1\nDevice: en7";
    let port_cache = HardwarePortCache::with_parts(
        Duration::from_secs(300),
        Box::new(Instant::now),
        Box::new(move || Some(listing.to_string())),
        Box::new(|work| work()),
    );

    let mut link_record = record("en7", true, None);
    link_record.hardware_address = Some("aa:bb:cc:dd:ee:ff".to_string());

    SnapshotEngine::new(
        Arc::new(FakeObservations(vec![
            record("en0", true, Some("192.168.1.2")),
            link_record,
            record("en7", true, Some("10.0.0.20")),
            record("lo0", true, Some("127.0.0.1")),
        ])),
        Arc::new(FakeMetadata(HashMap::new())),
        Arc::new(FakeRoute(Some("en7".to_string()))),
        port_cache,
    )
}

#[tokio::test]
async fn full_cycle_from_raw_records_to_diagnostics_json() {
    let mut monitor = NetworkMonitor::new(
        Arc::new(engine()),
        Arc::new(FakeTraffic),
        Arc::new(FakePublicIp),
        MonitorSettings::default(),
    );

    monitor.handle_path_event(true);
    let update = monitor.refresh().await;

    assert_eq!(update.snapshot.connection_state, ConnectionState::Active);
    assert_eq!(update.snapshot.all_interfaces.len(), 3);

    let en7 = update
        .snapshot
        .all_interfaces
        .iter()
        .find(|i| i.name == "en7")
        .expect("en7 merged");
    assert_eq!(en7.medium, InterfaceMedium::Wired);
    assert_eq!(en7.type_name, "Ethernet");
    assert_eq!(en7.route_role, RouteRole::DefaultRoute);
    assert_eq!(en7.hardware_address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
    assert_eq!(en7.addresses, vec!["10.0.0.20"]);

    let visible: Vec<&str> = update
        .snapshot
        .visible_interfaces
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(visible, vec!["en0", "en7"]);

    let public_ip = monitor.fetch_public_ip().await;
    assert_eq!(public_ip.as_deref(), Some("203.0.113.10"));

    let report = nibble_core::diagnostics::build_report(
        "2.1.0",
        "macOS 14.4",
        update.snapshot.connection_state,
        &update.snapshot.all_interfaces,
        public_ip.as_deref(),
        false,
        chrono::Utc::now(),
    );
    let json = nibble_core::diagnostics::to_json(&report).expect("encodes");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["connectionState"], "active");
    assert!(value.get("publicIP").is_none());
    assert_eq!(value["interfaces"][1]["name"], "en7");
    assert_eq!(value["interfaces"][1]["routeRole"], "defaultRoute");
    assert!(value["interfaces"][1].get("hardwareAddress").is_none());
}

#[tokio::test]
async fn wired_adapter_without_wired_default_route_reads_inactive() {
    let mut monitor = NetworkMonitor::new(
        Arc::new(engine()),
        Arc::new(FakeTraffic),
        Arc::new(FakePublicIp),
        MonitorSettings::default(),
    );

    monitor.handle_path_event(false);
    let update = monitor.refresh().await;

    assert_eq!(update.snapshot.connection_state, ConnectionState::Inactive);
    assert!(!update.snapshot.is_ethernet_connected());
}
