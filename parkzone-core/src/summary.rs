//! Shape of the per-run processing report.

use std::collections::BTreeMap;

use log::{info, warn};
use serde::Serialize;

use crate::Zone;

/// Per-zone segment counts and the streets that were not found.
///
/// This is the status report other components rely on: counts keyed by zone
/// plus the sorted list of missing (normalised) street names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProcessingSummary {
    /// Number of matched segments per zone.
    pub zone_counts: BTreeMap<Zone, usize>,
    /// Configured streets without any match, sorted.
    pub missing_streets: Vec<String>,
}

impl ProcessingSummary {
    /// Total matched segments across all zones.
    #[must_use]
    pub fn total_segments(&self) -> usize {
        self.zone_counts.values().sum()
    }

    /// Emit the summary through the `log` facade.
    pub fn log(&self) {
        for (zone, count) in &self.zone_counts {
            info!("Found {count} street segments for the {zone} zone.");
        }
        if !self.missing_streets.is_empty() {
            warn!(
                "Could not find map data for {} streets:",
                self.missing_streets.len()
            );
            for street in &self.missing_streets {
                warn!(" - {}", capitalise(street));
            }
        }
    }
}

/// Upper-case the first character and lower-case the rest.
///
/// # Examples
/// ```
/// use parkzone_core::summary::capitalise;
///
/// assert_eq!(capitalise("кеј другог октобра"), "Кеј другог октобра");
/// assert_eq!(capitalise("20. октобра"), "20. октобра");
/// ```
#[must_use]
pub fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("пупинова", "Пупинова")]
    #[case("ЦАРА ДУШАНА", "Цара душана")]
    fn capitalise_handles_unicode(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(capitalise(input), expected);
    }

    #[rstest]
    fn serialises_zone_keys_in_lowercase() {
        let summary = ProcessingSummary {
            zone_counts: BTreeMap::from([(Zone::Red, 2), (Zone::Green, 0)]),
            missing_streets: vec!["обилићева".to_owned()],
        };
        let json = serde_json::to_value(&summary).expect("serialises");
        assert_eq!(json["zone_counts"]["red"], 2);
        assert_eq!(json["zone_counts"]["green"], 0);
        assert_eq!(json["missing_streets"][0], "обилићева");
        assert_eq!(summary.total_segments(), 2);
    }
}
