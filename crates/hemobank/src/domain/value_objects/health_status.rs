//! HealthStatus - Coarse system health signal derived by the dashboard

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Overall system health, evaluated from emergency, overdue and shortage counts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Critical,
    Warning,
    Healthy,
}

impl HealthStatus {
    /// Derive the health signal. Checks are evaluated in priority order:
    /// pending emergencies or a deep overdue backlog dominate shortages.
    pub fn evaluate(
        emergency_pending: i64,
        overdue_pending: i64,
        critical_shortages: i64,
    ) -> Self {
        if emergency_pending > 0 || overdue_pending > 5 {
            HealthStatus::Critical
        } else if critical_shortages > 3 {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Critical => write!(f, "CRITICAL"),
            HealthStatus::Warning => write!(f, "WARNING"),
            HealthStatus::Healthy => write!(f, "HEALTHY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_pending_is_critical() {
        assert_eq!(HealthStatus::evaluate(1, 0, 0), HealthStatus::Critical);
    }

    #[test]
    fn test_overdue_backlog_dominates_shortages() {
        // 6 overdue beats a single shortage regardless of emergencies
        assert_eq!(HealthStatus::evaluate(0, 6, 1), HealthStatus::Critical);
    }

    #[test]
    fn test_shortages_alone_are_a_warning() {
        assert_eq!(HealthStatus::evaluate(0, 0, 4), HealthStatus::Warning);
        assert_eq!(HealthStatus::evaluate(0, 5, 4), HealthStatus::Warning);
    }

    #[test]
    fn test_quiet_system_is_healthy() {
        assert_eq!(HealthStatus::evaluate(0, 0, 3), HealthStatus::Healthy);
        assert_eq!(HealthStatus::evaluate(0, 5, 0), HealthStatus::Healthy);
    }
}
