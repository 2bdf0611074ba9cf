//! Rental equipment domain types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a piece of equipment can currently be rented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentAvailability {
    #[default]
    Available,
    Rented,
    Maintenance,
}

impl EquipmentAvailability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for EquipmentAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
