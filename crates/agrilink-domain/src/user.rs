//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Marketplace role, fixed when the account is registered.
///
/// Wire format: lowercase string (`farmer`, `coolie`, `rental`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Posts jobs.
    Farmer,
    /// Farm worker; applies to jobs.
    Coolie,
    /// Equipment rental provider; lists equipment.
    Rental,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Coolie => "coolie",
            Self::Rental => "rental",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmer" => Ok(Self::Farmer),
            "coolie" => Ok(Self::Coolie),
            "rental" => Ok(Self::Rental),
            other => Err(UnknownVariant {
                kind: "user role",
                value: other.to_owned(),
            }),
        }
    }
}
