//! In-memory repository implementations for service tests.
//!
//! Each repository keeps its rows behind one mutex, so the guarded movement
//! operations (`credit`, `debit`, `process`) get the same check-then-write
//! atomicity the database adapters provide.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use hemobank::{
    BloodGroup, BloodInventory, BloodRequest, DomainError, Donor, DonorRepository,
    InventoryRepository, RequestRepository, RequestStatus, UrgencyLevel,
};

#[derive(Default)]
pub struct InMemoryDonorRepository {
    rows: Mutex<Vec<Donor>>,
}

#[async_trait]
impl DonorRepository for InMemoryDonorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Donor>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|d| d.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Donor>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|d| d.phone == phone).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Donor>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<Donor>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|d| d.blood_group == blood_group)
            .cloned()
            .collect())
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Donor>, DomainError> {
        let needle = fragment.to_lowercase();
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_donated_since(&self, cutoff: NaiveDate) -> Result<Vec<Donor>, DomainError> {
        let rows = self.rows.lock().unwrap();
        let mut hits: Vec<Donor> = rows
            .iter()
            .filter(|d| d.last_donation_date.map_or(false, |date| date >= cutoff))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.last_donation_date.cmp(&a.last_donation_date));
        Ok(hits)
    }

    async fn save(&self, donor: &Donor) -> Result<Donor, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|d| d.id == donor.id) {
            Some(existing) => *existing = donor.clone(),
            None => rows.push(donor.clone()),
        }
        Ok(donor.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|d| d.id != id);
        Ok(rows.len() < before)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().any(|d| d.email == email))
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().any(|d| d.phone == phone))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn count_eligible(&self) -> Result<i64, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|d| d.is_eligible).count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryInventoryRepository {
    rows: Mutex<Vec<BloodInventory>>,
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BloodInventory>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Option<BloodInventory>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|i| i.blood_group == blood_group).cloned())
    }

    async fn find_all(&self) -> Result<Vec<BloodInventory>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn exists_by_blood_group(&self, blood_group: BloodGroup) -> Result<bool, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().any(|i| i.blood_group == blood_group))
    }

    async fn save(&self, inventory: &BloodInventory) -> Result<BloodInventory, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|i| i.id == inventory.id) {
            Some(existing) => *existing = inventory.clone(),
            None => rows.push(inventory.clone()),
        }
        Ok(inventory.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|i| i.id != id);
        Ok(rows.len() < before)
    }

    async fn credit(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|i| i.blood_group == blood_group)
            .ok_or_else(|| DomainError::not_found_key("Blood inventory", blood_group))?;
        row.credit(units)?;
        if let Some(notes) = notes {
            row.notes = Some(notes.to_string());
        }
        Ok(row.clone())
    }

    async fn debit(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|i| i.blood_group == blood_group)
            .ok_or_else(|| DomainError::not_found_key("Blood inventory", blood_group))?;
        row.debit(units)?;
        if let Some(notes) = notes {
            row.notes = Some(notes.to_string());
        }
        Ok(row.clone())
    }

    async fn total_units(&self) -> Result<i64, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().map(|i| i.units_available as i64).sum())
    }
}

#[derive(Default)]
pub struct InMemoryRequestRepository {
    rows: Mutex<Vec<BloodRequest>>,
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<BloodRequest>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| r.status == status).cloned().collect())
    }

    async fn find_by_status_oldest_first(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let mut hits = self.find_by_status(status).await?;
        hits.sort_by_key(|r| r.created_at);
        Ok(hits)
    }

    async fn find_by_urgency_and_status_oldest_first(
        &self,
        urgency: UrgencyLevel,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        let mut hits: Vec<BloodRequest> = rows
            .iter()
            .filter(|r| r.urgency_level == urgency && r.status == status)
            .cloned()
            .collect();
        hits.sort_by_key(|r| r.created_at);
        Ok(hits)
    }

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.blood_group == blood_group)
            .cloned()
            .collect())
    }

    async fn find_by_contact_email(&self, email: &str) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.contact_email == email)
            .cloned()
            .collect())
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.created_at >= start && r.created_at < end)
            .cloned()
            .collect())
    }

    async fn find_created_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        let mut hits: Vec<BloodRequest> = rows
            .iter()
            .filter(|r| r.created_at >= cutoff)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(hits)
    }

    async fn find_overdue_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = self.rows.lock().unwrap();
        let mut hits: Vec<BloodRequest> = rows
            .iter()
            .filter(|r| r.is_pending() && r.created_at < cutoff)
            .cloned()
            .collect();
        hits.sort_by(|a, b| {
            b.urgency_level
                .priority()
                .cmp(&a.urgency_level.priority())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(hits)
    }

    async fn search_by_hospital(&self, fragment: &str) -> Result<Vec<BloodRequest>, DomainError> {
        let needle = fragment.to_lowercase();
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.hospital_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn search_by_patient(&self, fragment: &str) -> Result<Vec<BloodRequest>, DomainError> {
        let needle = fragment.to_lowercase();
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.patient_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn save(&self, request: &BloodRequest) -> Result<BloodRequest, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id == request.id) {
            Some(existing) => *existing = request.clone(),
            None => rows.push(request.clone()),
        }
        Ok(request.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn process(
        &self,
        id: Uuid,
        status: RequestStatus,
        processed_by: &str,
        notes: Option<&str>,
    ) -> Result<BloodRequest, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("Blood request", id))?;
        row.mark_processed(processed_by, status, notes.map(str::to_string))?;
        Ok(row.clone())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn count_by_status(&self, status: RequestStatus) -> Result<i64, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| r.status == status).count() as i64)
    }

    async fn count_emergency_pending(&self) -> Result<i64, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| r.is_pending() && r.urgency_level == UrgencyLevel::Emergency)
            .count() as i64)
    }
}
