use super::*;

fn observation(name: &str) -> InterfaceObservation {
    InterfaceObservation {
        name: name.to_string(),
        display_name: name.to_string(),
        hardware_address: None,
        is_active: false,
        addresses: Vec::new(),
        medium: InterfaceMedium::Unknown,
        confidence: ClassificationConfidence::Low,
        adapter_description: None,
    }
}

#[test]
fn medium_type_names_are_fixed() {
    assert_eq!(InterfaceMedium::Wired.type_name(), "Ethernet");
    assert_eq!(InterfaceMedium::WiFi.type_name(), "Wi-Fi");
    assert_eq!(InterfaceMedium::Vpn.type_name(), "VPN");
    assert_eq!(InterfaceMedium::Bridge.type_name(), "Bridge");
    assert_eq!(InterfaceMedium::Loopback.type_name(), "Loopback");
    assert_eq!(InterfaceMedium::Awdl.type_name(), "AWDL");
    assert_eq!(InterfaceMedium::Bluetooth.type_name(), "Bluetooth");
    assert_eq!(InterfaceMedium::Unknown.type_name(), "Unknown");
}

#[test]
fn classify_uses_system_type_at_high_confidence() {
    let classification = classify(
        "en5",
        Some(SystemInterfaceType::Ethernet),
        Some("USB-C 2.5G Ethernet"),
        "Unknown",
    );

    assert_eq!(classification.medium, InterfaceMedium::Wired);
    assert_eq!(classification.confidence, ClassificationConfidence::High);
    assert_eq!(classification.display_name, "USB-C 2.5G Ethernet");
}

#[test]
fn classify_maps_full_system_taxonomy() {
    let cases = [
        (SystemInterfaceType::Ethernet, InterfaceMedium::Wired),
        (SystemInterfaceType::WiFi, InterfaceMedium::WiFi),
        (SystemInterfaceType::Ipsec, InterfaceMedium::Vpn),
        (SystemInterfaceType::Bridge, InterfaceMedium::Bridge),
        (SystemInterfaceType::Loopback, InterfaceMedium::Loopback),
        (SystemInterfaceType::BluetoothPan, InterfaceMedium::Bluetooth),
        (SystemInterfaceType::Other, InterfaceMedium::Unknown),
    ];

    for (system_type, expected) in cases {
        let classification = classify("en0", Some(system_type), None, "Unknown");
        assert_eq!(classification.medium, expected);
        assert_eq!(classification.confidence, ClassificationConfidence::High);
    }
}

#[test]
fn classify_recognizes_device_name_prefixes() {
    let cases = [
        ("lo0", InterfaceMedium::Loopback),
        ("awdl0", InterfaceMedium::Awdl),
        ("llw0", InterfaceMedium::Awdl),
        ("utun3", InterfaceMedium::Vpn),
        ("bridge0", InterfaceMedium::Bridge),
    ];

    for (name, expected) in cases {
        let classification = classify(name, None, None, "Unknown");
        assert_eq!(classification.medium, expected, "device {name}");
        assert_eq!(classification.confidence, ClassificationConfidence::Low);
    }
}

#[test]
fn classify_falls_back_to_type_label() {
    let cases = [
        ("Wi-Fi", InterfaceMedium::WiFi),
        ("Ethernet", InterfaceMedium::Wired),
        ("Bridge", InterfaceMedium::Bridge),
        ("Thunderbolt", InterfaceMedium::Unknown),
        ("Bluetooth", InterfaceMedium::Bluetooth),
        ("iPhone USB", InterfaceMedium::Unknown),
    ];

    for (label, expected) in cases {
        let classification = classify("en9", None, None, label);
        assert_eq!(classification.medium, expected, "label {label}");
        assert_eq!(classification.confidence, ClassificationConfidence::Low);
    }
}

#[test]
fn classify_resolves_display_name_in_order() {
    // System display name wins, then the fallback label, then the raw name.
    assert_eq!(classify("en0", None, Some("Wi-Fi"), "Unknown").display_name, "Wi-Fi");
    assert_eq!(classify("en0", None, None, "Ethernet").display_name, "Ethernet");
    assert_eq!(classify("gif0", None, None, "").display_name, "gif0");
}

#[test]
fn fallback_label_matches_device_prefixes() {
    assert_eq!(fallback_label("lo0"), "Loopback");
    assert_eq!(fallback_label("awdl0"), "AWDL");
    assert_eq!(fallback_label("llw0"), "AWDL");
    assert_eq!(fallback_label("utun2"), "VPN");
    assert_eq!(fallback_label("bridge0"), "Bridge");
    assert_eq!(fallback_label("en0"), "Unknown");
}

#[test]
fn merge_combines_records_of_the_same_device() {
    let mut link = observation("en5");
    link.hardware_address = Some("aa:bb:cc:dd:ee:ff".to_string());
    link.medium = InterfaceMedium::Wired;

    let mut v6 = observation("en5");
    v6.addresses = vec!["fe80::1".to_string()];

    let mut v4 = observation("en5");
    v4.is_active = true;
    v4.addresses = vec!["192.168.1.10".to_string(), "fe80::1".to_string()];

    let interfaces = merge_observations(vec![link, v6, v4]);

    assert_eq!(interfaces.len(), 1);
    let interface = &interfaces[0];
    assert_eq!(interface.name, "en5");
    assert!(interface.is_active);
    assert_eq!(interface.hardware_address.as_deref(), Some("aa:bb:cc:dd:ee:ff"));
    assert_eq!(interface.addresses, vec!["192.168.1.10", "fe80::1"]);
    assert_eq!(interface.medium, InterfaceMedium::Wired);
}

#[test]
fn merge_prefers_higher_confidence_classification() {
    let mut low = observation("en5");
    low.medium = InterfaceMedium::Unknown;
    low.display_name = "en5".to_string();

    let mut high = observation("en5");
    high.medium = InterfaceMedium::Wired;
    high.confidence = ClassificationConfidence::High;
    high.display_name = "USB-C LAN".to_string();
    high.adapter_description = Some("USB-C 2.5G Ethernet".to_string());

    let interfaces = merge_observations(vec![low, high]);

    assert_eq!(interfaces[0].medium, InterfaceMedium::Wired);
    assert_eq!(interfaces[0].confidence, ClassificationConfidence::High);
    assert_eq!(interfaces[0].display_name, "USB-C LAN");
    assert_eq!(interfaces[0].adapter_description.as_deref(), Some("USB-C 2.5G Ethernet"));
    assert_eq!(interfaces[0].type_name, "Ethernet");
}

#[test]
fn merge_never_downgrades_a_high_confidence_classification() {
    let mut high = observation("en0");
    high.medium = InterfaceMedium::WiFi;
    high.confidence = ClassificationConfidence::High;
    high.display_name = "Wi-Fi".to_string();

    let mut low = observation("en0");
    low.medium = InterfaceMedium::Wired;
    low.display_name = "Ethernet".to_string();

    let interfaces = merge_observations(vec![high, low]);

    assert_eq!(interfaces[0].medium, InterfaceMedium::WiFi);
    assert_eq!(interfaces[0].confidence, ClassificationConfidence::High);
    assert_eq!(interfaces[0].display_name, "Wi-Fi");
}

#[test]
fn merge_replaces_unknown_medium_at_equal_confidence() {
    let unknown = observation("en7");

    let mut wired = observation("en7");
    wired.medium = InterfaceMedium::Wired;
    wired.display_name = "Thunderbolt Ethernet".to_string();

    let interfaces = merge_observations(vec![unknown, wired]);

    assert_eq!(interfaces[0].medium, InterfaceMedium::Wired);
    assert_eq!(interfaces[0].confidence, ClassificationConfidence::Low);
}

#[test]
fn merge_keeps_first_seen_medium_when_equal_confidence_disagrees() {
    let mut wired = observation("en7");
    wired.medium = InterfaceMedium::Wired;

    let mut bridge = observation("en7");
    bridge.medium = InterfaceMedium::Bridge;

    let interfaces = merge_observations(vec![wired, bridge]);

    assert_eq!(interfaces[0].medium, InterfaceMedium::Wired);
}

#[test]
fn merge_sorts_result_by_device_name() {
    let interfaces = merge_observations(vec![
        observation("utun0"),
        observation("en0"),
        observation("lo0"),
        observation("bridge0"),
    ]);

    let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["bridge0", "en0", "lo0", "utun0"]);
}

#[test]
fn merge_is_stable_under_group_reordering() {
    // Fields with first-non-None semantics are owned by a single observation
    // so reordering cannot change the outcome.
    let mut link = observation("en5");
    link.hardware_address = Some("aa:bb:cc:dd:ee:ff".to_string());
    link.medium = InterfaceMedium::Wired;
    link.confidence = ClassificationConfidence::High;
    link.adapter_description = Some("Dock LAN".to_string());

    let mut v4 = observation("en5");
    v4.is_active = true;
    v4.addresses = vec!["10.0.0.20".to_string()];

    let other = observation("en0");

    let forward = merge_observations(vec![link.clone(), v4.clone(), other.clone()]);
    let reversed = merge_observations(vec![other, v4, link]);

    assert_eq!(forward, reversed);
}
