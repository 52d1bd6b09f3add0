//! Parking zones and their map colours.
//!
//! The enum offers compile-time safety for zone lookups and fixes the
//! drawing order (red, yellow, green) used throughout the workspace.
//!
//! # Examples
//! ```
//! use parkzone_core::Zone;
//!
//! assert_eq!(Zone::Red.as_str(), "red");
//! assert_eq!(Zone::Green.to_string(), "green");
//! assert_eq!(Zone::Yellow.colour(), "#FFFF00");
//! ```

use serde::{Deserialize, Serialize};

/// A colour-coded parking zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// Central zone with the shortest permitted stay.
    Red,
    /// Intermediate zone.
    Yellow,
    /// Outer zone.
    Green,
}

impl Zone {
    /// Every zone in drawing order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Yellow, Self::Green];

    /// Return the zone identifier as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }

    /// Hex colour used when drawing the zone's streets.
    #[must_use]
    pub const fn colour(self) -> &'static str {
        match self {
            Self::Red => "#FF0000",
            Self::Yellow => "#FFFF00",
            Self::Green => "#00FF00",
        }
    }

    /// Identifier with a leading capital, as shown in street popups.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
        }
    }

    /// Legend label in the municipality's language.
    #[must_use]
    pub const fn legend_label(self) -> &'static str {
        match self {
            Self::Red => "Црвена зона",
            Self::Yellow => "Жута зона",
            Self::Green => "Зелена зона",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            _ => Err(format!("unknown zone '{s}'")),
        }
    }
}
