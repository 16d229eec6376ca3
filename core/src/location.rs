//! Venue metadata attached to sessions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A physical location where sessions take place.
///
/// Purely descriptive: the core treats it as an opaque reference and never
/// derives behavior from it. Capacity here is advertised capacity, not a
/// constraint the seat registry enforces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    name: String,
    address: String,
    capacity: u32,
    description: String,
    features: BTreeMap<String, String>,
}

impl Location {
    /// Creates a location with an empty feature map.
    pub fn new(name: impl Into<String>, address: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            capacity,
            description: String::new(),
            features: BTreeMap::new(),
        }
    }

    /// Returns a copy with the given description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns a copy with a feature entry added.
    #[must_use]
    pub fn with_feature(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.features.insert(key.into(), value.into());
        self
    }

    /// The location name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The street address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Advertised capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Feature metadata (accessibility, parking, ...).
    #[must_use]
    pub const fn features(&self) -> &BTreeMap<String, String> {
        &self.features
    }
}
