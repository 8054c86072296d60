//! BloodGroup - Canonical ABO/Rh blood group

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the 8 canonical ABO/Rh blood groups
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All canonical blood groups, in registry order
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BloodGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A+" => Ok(BloodGroup::APositive),
            "A-" => Ok(BloodGroup::ANegative),
            "B+" => Ok(BloodGroup::BPositive),
            "B-" => Ok(BloodGroup::BNegative),
            "AB+" => Ok(BloodGroup::AbPositive),
            "AB-" => Ok(BloodGroup::AbNegative),
            "O+" => Ok(BloodGroup::OPositive),
            "O-" => Ok(BloodGroup::ONegative),
            _ => Err(format!("Unknown blood group: {}", s)),
        }
    }
}
