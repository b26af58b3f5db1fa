use std::collections::{BTreeSet, HashMap};

use super::{
    ClassificationConfidence, InterfaceMedium, InterfaceObservation, NetworkInterface, RouteRole,
};

/// Folds per-address-family observations into one logical interface per BSD
/// name.
///
/// The result is sorted by device name ascending; this is the canonical
/// ordering the rest of the crate relies on. Within a group, observations are
/// folded in arrival order, which matters for the first-non-`None` fallback
/// fields and for the equal-confidence tie-break.
pub fn merge_observations(observations: Vec<InterfaceObservation>) -> Vec<NetworkInterface> {
    let mut merged: HashMap<String, ObservationAccumulator> = HashMap::new();

    for observation in observations {
        match merged.get_mut(&observation.name) {
            Some(existing) => existing.merge(observation),
            None => {
                merged.insert(
                    observation.name.clone(),
                    ObservationAccumulator::new(observation),
                );
            }
        }
    }

    let mut interfaces: Vec<NetworkInterface> =
        merged.into_values().map(ObservationAccumulator::finish).collect();
    interfaces.sort_by(|a, b| a.name.cmp(&b.name));
    interfaces
}

struct ObservationAccumulator {
    name: String,
    display_name: String,
    hardware_address: Option<String>,
    is_active: bool,
    addresses: BTreeSet<String>,
    medium: InterfaceMedium,
    confidence: ClassificationConfidence,
    adapter_description: Option<String>,
}

impl ObservationAccumulator {
    fn new(observation: InterfaceObservation) -> Self {
        Self {
            name: observation.name,
            display_name: observation.display_name,
            hardware_address: observation.hardware_address,
            is_active: observation.is_active,
            addresses: observation.addresses.into_iter().collect(),
            medium: observation.medium,
            confidence: observation.confidence,
            adapter_description: observation.adapter_description,
        }
    }

    fn merge(&mut self, observation: InterfaceObservation) {
        let replace_classification = self.should_replace_classification(&observation);

        self.is_active = self.is_active || observation.is_active;
        self.addresses.extend(observation.addresses);

        if self.hardware_address.is_none() {
            self.hardware_address = observation.hardware_address;
        }

        if self.adapter_description.is_none() {
            self.adapter_description = observation.adapter_description;
        }

        if replace_classification {
            self.medium = observation.medium;
            self.confidence = observation.confidence;
            self.display_name = observation.display_name;
        }
    }

    /// Replace iff the incoming confidence outranks the current one, or the
    /// ranks are equal and a non-`Unknown` medium arrives while the
    /// accumulated one is still `Unknown`. A `High` classification is never
    /// downgraded; two disagreeing `Low` non-`Unknown` media resolve in favor
    /// of the first seen.
    fn should_replace_classification(&self, observation: &InterfaceObservation) -> bool {
        if observation.confidence > self.confidence {
            return true;
        }

        observation.confidence == self.confidence
            && self.medium == InterfaceMedium::Unknown
            && observation.medium != InterfaceMedium::Unknown
    }

    fn finish(self) -> NetworkInterface {
        NetworkInterface {
            name: self.name,
            display_name: self.display_name,
            hardware_address: self.hardware_address,
            is_active: self.is_active,
            addresses: self.addresses.into_iter().collect(),
            type_name: self.medium.type_name().to_string(),
            medium: self.medium,
            confidence: self.confidence,
            route_role: RouteRole::None,
            adapter_description: self.adapter_description,
        }
    }
}
