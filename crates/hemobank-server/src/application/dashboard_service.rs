//! Dashboard Application Service
//!
//! Read-only aggregation over the donor registry, the inventory ledger and
//! the request workflow. Every snapshot is recomputed from the repositories
//! on each call.

use std::sync::Arc;

use chrono::{DateTime, Days, Duration, Local, LocalResult, NaiveTime, TimeZone, Utc};

use hemobank::{
    DomainError, DonorRepository, HealthStatus, InventoryRepository, RequestRepository,
};

/// Donations within this window count as recent activity
const DONATION_ACTIVITY_DAYS: u64 = 30;
const OVERDUE_AFTER_HOURS: i64 = 24;

/// One point-in-time view over the whole system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub total_donors: i64,
    pub eligible_donors: i64,
    pub total_blood_units: i64,
    pub critical_shortages: i64,
    pub pending_requests: i64,
    pub emergency_requests: i64,
    pub today_requests: i64,
    pub today_donations: i64,
}

/// Application service for the dashboard views
pub struct DashboardService<D, I, R>
where
    D: DonorRepository,
    I: InventoryRepository,
    R: RequestRepository,
{
    donors: Arc<D>,
    inventory: Arc<I>,
    requests: Arc<R>,
}

impl<D, I, R> DashboardService<D, I, R>
where
    D: DonorRepository,
    I: InventoryRepository,
    R: RequestRepository,
{
    pub fn new(donors: Arc<D>, inventory: Arc<I>, requests: Arc<R>) -> Self {
        Self {
            donors,
            inventory,
            requests,
        }
    }

    pub async fn snapshot(&self) -> Result<DashboardSnapshot, DomainError> {
        let (today_start, today_end) = local_day_bounds();
        let donation_cutoff = Local::now().date_naive() - Days::new(DONATION_ACTIVITY_DAYS);

        let today_requests = self
            .requests
            .find_created_between(today_start, today_end)
            .await?
            .len() as i64;
        let today_donations = self.donors.find_donated_since(donation_cutoff).await?.len() as i64;

        Ok(DashboardSnapshot {
            total_donors: self.donors.count().await?,
            eligible_donors: self.donors.count_eligible().await?,
            total_blood_units: self.inventory.total_units().await?,
            critical_shortages: self.critical_shortage_count().await?,
            pending_requests: self
                .requests
                .count_by_status(hemobank::RequestStatus::Pending)
                .await?,
            emergency_requests: self.requests.count_emergency_pending().await?,
            today_requests,
            today_donations,
        })
    }

    /// Coarse health signal: pending emergencies and a deep overdue backlog
    /// dominate stock shortages.
    pub async fn health_status(&self) -> Result<HealthStatus, DomainError> {
        let emergency_pending = self.requests.count_emergency_pending().await?;
        let overdue_cutoff = Utc::now() - Duration::hours(OVERDUE_AFTER_HOURS);
        let overdue_pending = self.requests.find_overdue_pending(overdue_cutoff).await?.len() as i64;
        let critical_shortages = self.critical_shortage_count().await?;

        Ok(HealthStatus::evaluate(
            emergency_pending,
            overdue_pending,
            critical_shortages,
        ))
    }

    async fn critical_shortage_count(&self) -> Result<i64, DomainError> {
        let inventories = self.inventory.find_all().await?;
        Ok(inventories
            .iter()
            .filter(|inv| inv.is_critical_shortage())
            .count() as i64)
    }
}

/// The current local calendar day as a half-open UTC interval. Around DST
/// transitions an ambiguous midnight resolves to its earliest reading and a
/// skipped midnight falls back to the current instant.
fn local_day_bounds() -> (DateTime<Utc>, DateTime<Utc>) {
    let today = Local::now().date_naive();
    let start_naive = today.and_time(NaiveTime::MIN);
    let start = match Local.from_local_datetime(&start_naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => Utc::now(),
    };
    (start, start + Duration::days(1))
}
