//! UrgencyLevel - Priority tag on a blood request

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request priority, used for ordering only, never for automatic approval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    Emergency,
    Urgent,
    #[default]
    Normal,
}

impl UrgencyLevel {
    /// Human-readable label shown alongside the raw value
    pub fn display_name(&self) -> &'static str {
        match self {
            UrgencyLevel::Emergency => "Emergency",
            UrgencyLevel::Urgent => "Urgent",
            UrgencyLevel::Normal => "Normal",
        }
    }

    /// Numeric rank for descending-urgency sorts. Higher is more urgent.
    pub fn priority(&self) -> i32 {
        match self {
            UrgencyLevel::Emergency => 3,
            UrgencyLevel::Urgent => 2,
            UrgencyLevel::Normal => 1,
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrgencyLevel::Emergency => write!(f, "EMERGENCY"),
            UrgencyLevel::Urgent => write!(f, "URGENT"),
            UrgencyLevel::Normal => write!(f, "NORMAL"),
        }
    }
}

impl std::str::FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EMERGENCY" => Ok(UrgencyLevel::Emergency),
            "URGENT" => Ok(UrgencyLevel::Urgent),
            "NORMAL" => Ok(UrgencyLevel::Normal),
            _ => Err(format!("Unknown urgency level: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_outranks_urgent_outranks_normal() {
        assert!(UrgencyLevel::Emergency.priority() > UrgencyLevel::Urgent.priority());
        assert!(UrgencyLevel::Urgent.priority() > UrgencyLevel::Normal.priority());
    }

    #[test]
    fn test_round_trips_through_display() {
        for level in [
            UrgencyLevel::Emergency,
            UrgencyLevel::Urgent,
            UrgencyLevel::Normal,
        ] {
            assert_eq!(level.to_string().parse::<UrgencyLevel>(), Ok(level));
        }
    }
}
