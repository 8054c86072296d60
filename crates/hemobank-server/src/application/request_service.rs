//! Request Application Service
//!
//! Orchestrates the blood-request workflow: creation, the one-shot status
//! state machine, fulfillment against the inventory ledger, list queries and
//! statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use hemobank::{
    BloodGroup, BloodRequest, DomainError, InventoryRepository, RequestRepository, RequestStatus,
    UrgencyLevel, SYSTEM_PROCESSOR,
};

use crate::application::InventoryService;

const RECENT_WINDOW_DAYS: i64 = 7;
const OVERDUE_AFTER_HOURS: i64 = 24;

/// Workflow-wide counters, recomputed on every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStatistics {
    pub total_requests: i64,
    pub pending_requests: i64,
    pub approved_requests: i64,
    pub rejected_requests: i64,
    pub emergency_requests: i64,
    pub urgent_requests: i64,
}

/// Per-blood-group request counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRequestStatistics {
    pub blood_group: BloodGroup,
    pub total_requests: i64,
    pub total_units_requested: i64,
    pub pending_requests: i64,
    pub pending_units: i64,
}

/// Application service for the Request Workflow
pub struct RequestService<R: RequestRepository, I: InventoryRepository> {
    repo: Arc<R>,
    inventory: Arc<InventoryService<I>>,
}

impl<R: RequestRepository, I: InventoryRepository> RequestService<R, I> {
    pub fn new(repo: Arc<R>, inventory: Arc<InventoryService<I>>) -> Self {
        Self { repo, inventory }
    }

    /// Create a request. Requests always start `Pending`; availability is
    /// only checked when the request is processed, never at creation time.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        requester_name: String,
        contact_email: String,
        contact_phone: String,
        blood_group: BloodGroup,
        units_requested: i32,
        urgency_level: UrgencyLevel,
        hospital_name: String,
        patient_name: String,
        medical_reason: Option<String>,
    ) -> Result<BloodRequest, DomainError> {
        let request = BloodRequest::new(
            requester_name,
            contact_email,
            contact_phone,
            blood_group,
            units_requested,
            urgency_level,
            hospital_name,
            patient_name,
            medical_reason,
        );
        request.validate()?;

        let saved = self.repo.save(&request).await?;
        tracing::info!(
            "Created blood request {} for {} units of {} ({})",
            saved.id,
            saved.units_requested,
            saved.blood_group,
            saved.urgency_level
        );
        Ok(saved)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<BloodRequest>, DomainError> {
        self.repo.find_by_id(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn list_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo.find_by_status(status).await
    }

    pub async fn list_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo.find_by_blood_group(blood_group).await
    }

    pub async fn list_by_contact_email(
        &self,
        email: &str,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo.find_by_contact_email(email).await
    }

    /// Pending requests, oldest first
    pub async fn pending(&self) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo
            .find_by_status_oldest_first(RequestStatus::Pending)
            .await
    }

    /// Pending emergencies, oldest first
    pub async fn emergency_pending(&self) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo
            .find_by_urgency_and_status_oldest_first(UrgencyLevel::Emergency, RequestStatus::Pending)
            .await
    }

    /// Apply the one-shot transition out of `Pending`. Approving checks
    /// availability but never moves inventory; fulfillment goes through
    /// [`RequestService::approve_and_fulfill`] instead.
    pub async fn update_status(
        &self,
        id: Uuid,
        new_status: RequestStatus,
        admin_notes: Option<String>,
        processed_by: &str,
    ) -> Result<BloodRequest, DomainError> {
        if new_status == RequestStatus::Pending {
            return Err(DomainError::Validation(
                "Target status must be a terminal state".to_string(),
            ));
        }

        let request = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blood request", id))?;
        if !request.is_pending() {
            return Err(DomainError::AlreadyProcessed(id));
        }

        if new_status == RequestStatus::Approved {
            self.ensure_sufficient_stock(&request).await?;
        }

        let updated = self
            .repo
            .process(id, new_status, processed_by, admin_notes.as_deref())
            .await?;
        tracing::info!(
            "Blood request {} transitioned to {} by {}",
            id,
            new_status,
            processed_by
        );
        Ok(updated)
    }

    /// Approve a request and debit the matching inventory record in one unit
    /// of work. The request only reaches `Fulfilled` when the debit has
    /// happened; a failed debit leaves it `Pending`.
    pub async fn approve_and_fulfill(
        &self,
        id: Uuid,
        admin_notes: Option<String>,
        processed_by: &str,
    ) -> Result<BloodRequest, DomainError> {
        let request = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blood request", id))?;
        if !request.is_pending() {
            return Err(DomainError::AlreadyProcessed(id));
        }

        self.ensure_sufficient_stock(&request).await?;

        // The debit is an atomic check-then-decrement in the ledger; stock
        // depleted between the check above and this call surfaces here.
        let debit_note = format!("Units deducted for approved request {}", id);
        self.inventory
            .remove_units(
                request.blood_group,
                request.units_requested,
                Some(&debit_note),
            )
            .await
            .map_err(|e| DomainError::FulfillmentFailed {
                id,
                reason: e.to_string(),
            })?;

        match self
            .repo
            .process(id, RequestStatus::Fulfilled, processed_by, admin_notes.as_deref())
            .await
        {
            Ok(updated) => {
                tracing::info!(
                    "Fulfilled blood request {} and debited {} units of {}",
                    id,
                    request.units_requested,
                    request.blood_group
                );
                Ok(updated)
            }
            Err(err) => {
                // The transition was lost to a concurrent processor; give the
                // debited units back so no stock is stranded.
                let restore_note = format!("Restored units for unfulfilled request {}", id);
                if let Err(credit_err) = self
                    .inventory
                    .add_units(
                        request.blood_group,
                        request.units_requested,
                        Some(&restore_note),
                    )
                    .await
                {
                    tracing::error!(
                        "Failed to restore {} units of {} after lost fulfillment of {}: {}",
                        request.units_requested,
                        request.blood_group,
                        id,
                        credit_err
                    );
                }
                Err(err)
            }
        }
    }

    /// Cancel a pending request. System-initiated: no inventory interaction,
    /// the processor is recorded as the system sentinel.
    pub async fn cancel(
        &self,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<BloodRequest, DomainError> {
        let request = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blood request", id))?;
        if !request.is_pending() {
            return Err(DomainError::AlreadyProcessed(id));
        }

        let updated = self
            .repo
            .process(
                id,
                RequestStatus::Cancelled,
                SYSTEM_PROCESSOR,
                reason.as_deref(),
            )
            .await?;
        tracing::info!("Cancelled blood request {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted blood request {}", id);
        }
        Ok(deleted)
    }

    /// Requests created within the last 7 days, newest first
    pub async fn recent(&self) -> Result<Vec<BloodRequest>, DomainError> {
        let cutoff = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
        self.repo.find_created_since(cutoff).await
    }

    /// Pending requests older than 24 hours, most urgent first, then oldest
    pub async fn overdue_pending(&self) -> Result<Vec<BloodRequest>, DomainError> {
        let cutoff = Utc::now() - Duration::hours(OVERDUE_AFTER_HOURS);
        self.repo.find_overdue_pending(cutoff).await
    }

    pub async fn search_by_hospital(
        &self,
        fragment: &str,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo.search_by_hospital(fragment).await
    }

    pub async fn search_by_patient(
        &self,
        fragment: &str,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        self.repo.search_by_patient(fragment).await
    }

    pub async fn statistics(&self) -> Result<RequestStatistics, DomainError> {
        let urgent_pending = self
            .repo
            .find_by_urgency_and_status_oldest_first(UrgencyLevel::Urgent, RequestStatus::Pending)
            .await?;

        Ok(RequestStatistics {
            total_requests: self.repo.count().await?,
            pending_requests: self.repo.count_by_status(RequestStatus::Pending).await?,
            approved_requests: self.repo.count_by_status(RequestStatus::Approved).await?,
            rejected_requests: self.repo.count_by_status(RequestStatus::Rejected).await?,
            emergency_requests: self.repo.count_emergency_pending().await?,
            urgent_requests: urgent_pending.len() as i64,
        })
    }

    /// Per-blood-group counters, grouped in-process over the full set
    pub async fn blood_group_statistics(&self) -> Result<Vec<GroupRequestStatistics>, DomainError> {
        let requests = self.repo.find_all().await?;

        let mut by_group: BTreeMap<&'static str, GroupRequestStatistics> = BTreeMap::new();
        for request in &requests {
            let entry = by_group
                .entry(request.blood_group.as_str())
                .or_insert_with(|| GroupRequestStatistics {
                    blood_group: request.blood_group,
                    total_requests: 0,
                    total_units_requested: 0,
                    pending_requests: 0,
                    pending_units: 0,
                });
            entry.total_requests += 1;
            entry.total_units_requested += request.units_requested as i64;
            if request.is_pending() {
                entry.pending_requests += 1;
                entry.pending_units += request.units_requested as i64;
            }
        }

        Ok(by_group.into_values().collect())
    }

    async fn ensure_sufficient_stock(&self, request: &BloodRequest) -> Result<(), DomainError> {
        let available = self.inventory.units_available(request.blood_group).await?;
        if available < request.units_requested {
            return Err(DomainError::InsufficientStock {
                blood_group: request.blood_group,
                available,
                requested: request.units_requested,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryInventoryRepository, InMemoryRequestRepository};
    use crate::application::InventoryService;

    type TestService = RequestService<InMemoryRequestRepository, InMemoryInventoryRepository>;

    fn services() -> (TestService, Arc<InventoryService<InMemoryInventoryRepository>>) {
        let inventory = Arc::new(InventoryService::new(Arc::new(
            InMemoryInventoryRepository::default(),
        )));
        let requests = RequestService::new(
            Arc::new(InMemoryRequestRepository::default()),
            inventory.clone(),
        );
        (requests, inventory)
    }

    async fn create_request(svc: &TestService, blood_group: BloodGroup, units: i32) -> BloodRequest {
        svc.create(
            "Dr. Smith".to_string(),
            "smith@hospital.example".to_string(),
            "0409876543".to_string(),
            blood_group,
            units,
            UrgencyLevel::Normal,
            "City General".to_string(),
            "John Patient".to_string(),
            None,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_starts_pending_without_inventory_check() {
        // No inventory exists at all; creation must still succeed
        let (svc, _) = services();
        let req = create_request(&svc, BloodGroup::ONegative, 2).await;
        assert_eq!(req.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_validates_unit_bounds_before_any_write() {
        let (svc, _) = services();
        let err = svc
            .create(
                "Dr. Smith".to_string(),
                "smith@hospital.example".to_string(),
                "0409876543".to_string(),
                BloodGroup::APositive,
                11,
                UrgencyLevel::Normal,
                "City General".to_string(),
                "John Patient".to_string(),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_approve_with_empty_stock_fails_and_stays_pending() {
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::ONegative, 0, None, None, None, None)
            .await
            .unwrap();
        let req = create_request(&svc, BloodGroup::ONegative, 2).await;

        let err = svc
            .update_status(req.id, RequestStatus::Approved, None, "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));

        let reloaded = svc.get_by_id(req.id).await.unwrap().unwrap();
        assert!(reloaded.is_pending());
    }

    #[tokio::test]
    async fn test_approve_without_ledger_record_counts_as_insufficient() {
        let (svc, _) = services();
        let req = create_request(&svc, BloodGroup::AbNegative, 1).await;
        let err = svc
            .update_status(req.id, RequestStatus::Approved, None, "admin")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientStock { available: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_approval_never_moves_inventory() {
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::APositive, 10, None, None, None, None)
            .await
            .unwrap();
        let req = create_request(&svc, BloodGroup::APositive, 4).await;

        svc.update_status(req.id, RequestStatus::Approved, None, "admin")
            .await
            .unwrap();
        assert_eq!(
            inventory.units_available(BloodGroup::APositive).await.unwrap(),
            10
        );
    }

    #[tokio::test]
    async fn test_rejection_skips_inventory_check() {
        let (svc, _) = services();
        let req = create_request(&svc, BloodGroup::ONegative, 5).await;
        let updated = svc
            .update_status(req.id, RequestStatus::Rejected, Some("no match".to_string()), "admin")
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Rejected);
        assert_eq!(updated.processed_by.as_deref(), Some("admin"));
        assert!(updated.processed_at.is_some());
    }

    #[tokio::test]
    async fn test_requests_transition_exactly_once() {
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::BPositive, 20, None, None, None, None)
            .await
            .unwrap();
        let req = create_request(&svc, BloodGroup::BPositive, 2).await;

        svc.update_status(req.id, RequestStatus::Approved, None, "admin")
            .await
            .unwrap();

        let err = svc
            .update_status(req.id, RequestStatus::Rejected, None, "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::AlreadyProcessed(_)));
        let err = svc.approve_and_fulfill(req.id, None, "admin").await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyProcessed(_)));
        let err = svc.cancel(req.id, None).await.unwrap_err();
        assert!(matches!(err, DomainError::AlreadyProcessed(_)));
    }

    #[tokio::test]
    async fn test_fulfillment_debits_inventory() {
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::OPositive, 10, None, None, None, None)
            .await
            .unwrap();
        let req = create_request(&svc, BloodGroup::OPositive, 4).await;

        let updated = svc.approve_and_fulfill(req.id, None, "admin").await.unwrap();
        assert_eq!(updated.status, RequestStatus::Fulfilled);
        assert_eq!(
            inventory.units_available(BloodGroup::OPositive).await.unwrap(),
            6
        );
    }

    #[tokio::test]
    async fn test_fulfillment_with_short_stock_leaves_everything_untouched() {
        // units-available=3, units-requested=5
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::APositive, 3, None, None, None, None)
            .await
            .unwrap();
        let req = create_request(&svc, BloodGroup::APositive, 5).await;

        let err = svc.approve_and_fulfill(req.id, None, "admin").await.unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { available: 3, requested: 5, .. }));

        let reloaded = svc.get_by_id(req.id).await.unwrap().unwrap();
        assert!(reloaded.is_pending());
        assert_eq!(
            inventory.units_available(BloodGroup::APositive).await.unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_stock_depleted_after_creation_blocks_fulfillment() {
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::BNegative, 5, None, None, None, None)
            .await
            .unwrap();
        let req = create_request(&svc, BloodGroup::BNegative, 5).await;

        // Another fulfillment drains part of the stock before this one runs
        inventory
            .remove_units(BloodGroup::BNegative, 3, None)
            .await
            .unwrap();

        let err = svc.approve_and_fulfill(req.id, None, "admin").await.unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert!(svc.get_by_id(req.id).await.unwrap().unwrap().is_pending());
    }

    #[tokio::test]
    async fn test_cancel_records_system_sentinel() {
        let (svc, _) = services();
        let req = create_request(&svc, BloodGroup::ONegative, 2).await;
        let updated = svc
            .cancel(req.id, Some("duplicate entry".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Cancelled);
        assert_eq!(updated.processed_by.as_deref(), Some(SYSTEM_PROCESSOR));
        assert_eq!(updated.admin_notes.as_deref(), Some("duplicate entry"));
    }

    #[tokio::test]
    async fn test_update_status_rejects_pending_as_target() {
        let (svc, _) = services();
        let req = create_request(&svc, BloodGroup::ONegative, 2).await;
        let err = svc
            .update_status(req.id, RequestStatus::Pending, None, "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_request_fails_not_found() {
        let (svc, _) = services();
        let err = svc
            .update_status(Uuid::new_v4(), RequestStatus::Rejected, None, "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_blood_group_statistics_groups_in_process() {
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::APositive, 50, None, None, None, None)
            .await
            .unwrap();

        create_request(&svc, BloodGroup::APositive, 3).await;
        create_request(&svc, BloodGroup::APositive, 2).await;
        let fulfilled = create_request(&svc, BloodGroup::APositive, 4).await;
        create_request(&svc, BloodGroup::ONegative, 1).await;

        svc.approve_and_fulfill(fulfilled.id, None, "admin")
            .await
            .unwrap();

        let stats = svc.blood_group_statistics().await.unwrap();
        assert_eq!(stats.len(), 2);

        let a_pos = stats
            .iter()
            .find(|s| s.blood_group == BloodGroup::APositive)
            .unwrap();
        assert_eq!(a_pos.total_requests, 3);
        assert_eq!(a_pos.total_units_requested, 9);
        assert_eq!(a_pos.pending_requests, 2);
        assert_eq!(a_pos.pending_units, 5);
    }

    #[tokio::test]
    async fn test_statistics_counts() {
        let (svc, inventory) = services();
        inventory
            .create(BloodGroup::APositive, 50, None, None, None, None)
            .await
            .unwrap();

        let a = create_request(&svc, BloodGroup::APositive, 1).await;
        let b = create_request(&svc, BloodGroup::APositive, 2).await;
        create_request(&svc, BloodGroup::APositive, 3).await;

        svc.update_status(a.id, RequestStatus::Approved, None, "admin")
            .await
            .unwrap();
        svc.update_status(b.id, RequestStatus::Rejected, None, "admin")
            .await
            .unwrap();

        let stats = svc.statistics().await.unwrap();
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.pending_requests, 1);
        assert_eq!(stats.approved_requests, 1);
        assert_eq!(stats.rejected_requests, 1);
    }
}
