//! Case-normalised lookup from street name to parking zone.

use std::collections::{BTreeSet, HashMap};

use crate::{Zone, ZoneConfig};

/// Normalise a street name for lookups.
///
/// Names are compared case-insensitively using Unicode lower-casing, so
/// Cyrillic and Latin spellings both fold correctly.
#[must_use]
pub fn normalise_street_name(name: &str) -> String {
    name.to_lowercase()
}

/// Mapping from lower-cased street name to its parking zone.
///
/// Built once from a [`ZoneConfig`] and never mutated afterwards. When a
/// street is listed under several zones the last one in zone order wins.
///
/// # Examples
/// ```
/// use parkzone_core::{StreetZoneIndex, Zone, ZoneConfig};
///
/// let config = ZoneConfig::empty().with_streets(Zone::Yellow, ["Цара Душана"]);
/// let index = StreetZoneIndex::build(&config);
/// assert_eq!(index.zone_for("ЦАРА ДУШАНА"), Some(Zone::Yellow));
/// assert_eq!(index.zone_for("Unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreetZoneIndex {
    entries: HashMap<String, Zone>,
}

impl StreetZoneIndex {
    /// Build the index from the configured zone street lists.
    #[must_use]
    pub fn build(config: &ZoneConfig) -> Self {
        let mut entries = HashMap::with_capacity(config.street_count());
        for (zone, streets) in config.iter() {
            for street in streets {
                entries.insert(normalise_street_name(street), zone);
            }
        }
        Self { entries }
    }

    /// Zone of `name`, normalising it first.
    #[must_use]
    pub fn zone_for(&self, name: &str) -> Option<Zone> {
        self.get(&normalise_street_name(name))
    }

    /// Zone of an already normalised name.
    #[must_use]
    pub fn get(&self, normalised: &str) -> Option<Zone> {
        self.entries.get(normalised).copied()
    }

    /// Whether an already normalised name is indexed.
    #[must_use]
    pub fn contains(&self, normalised: &str) -> bool {
        self.entries.contains_key(normalised)
    }

    /// Every indexed (normalised) street name, sorted.
    #[must_use]
    pub fn street_names(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Distinct zones that have at least one street, in drawing order.
    #[must_use]
    pub fn zones(&self) -> BTreeSet<Zone> {
        self.entries.values().copied().collect()
    }

    /// Number of indexed street names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no street is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
