//! Donor Application Service
//!
//! Manages the donor registry: registration with unique contact details,
//! lookups, donation-date bookkeeping and per-blood-group statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Days, Local, NaiveDate, Utc};
use uuid::Uuid;

use hemobank::{BloodGroup, DomainError, Donor, DonorRepository};

/// Window for the recent-donor query
const RECENT_DONATION_DAYS: u64 = 30;

/// Per-blood-group donor counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorGroupStatistics {
    pub blood_group: BloodGroup,
    pub total_donors: i64,
    pub eligible_donors: i64,
    pub available_donors: i64,
}

/// Optional fields for a partial donor update
#[derive(Debug, Default)]
pub struct DonorUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub last_donation_date: Option<NaiveDate>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub address: Option<String>,
    pub is_eligible: Option<bool>,
}

/// Application service for the Donor Registry
pub struct DonorService<R: DonorRepository> {
    repo: Arc<R>,
}

impl<R: DonorRepository> DonorService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a donor. Email and phone must be unique across the registry;
    /// the email collision is reported first when both are taken.
    #[allow(clippy::too_many_arguments)]
    pub async fn register(
        &self,
        name: String,
        email: String,
        phone: String,
        blood_group: BloodGroup,
        last_donation_date: Option<NaiveDate>,
        age: i32,
        weight: f64,
        address: String,
    ) -> Result<Donor, DomainError> {
        if self.repo.exists_by_email(&email).await? {
            return Err(DomainError::duplicate("Donor", "email", &email));
        }
        if self.repo.exists_by_phone(&phone).await? {
            return Err(DomainError::duplicate("Donor", "phone", &phone));
        }

        let donor = Donor::new(
            name,
            email,
            phone,
            blood_group,
            last_donation_date,
            age,
            weight,
            address,
        );
        donor.validate()?;

        let saved = self.repo.save(&donor).await?;
        tracing::info!(
            "Registered donor {} ({}, {})",
            saved.id,
            saved.name,
            saved.blood_group
        );
        Ok(saved)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Donor>, DomainError> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<Donor>, DomainError> {
        self.repo.find_by_email(email).await
    }

    pub async fn list_all(&self) -> Result<Vec<Donor>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn list_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<Donor>, DomainError> {
        self.repo.find_by_blood_group(blood_group).await
    }

    /// Donors of a blood group whose administrative eligibility flag is set.
    /// The donation-interval rule is not applied here.
    pub async fn eligible_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<Donor>, DomainError> {
        let donors = self.repo.find_by_blood_group(blood_group).await?;
        Ok(donors.into_iter().filter(|d| d.is_eligible).collect())
    }

    /// Donors who may donate today: eligible and past the 56-day interval
    pub async fn available_donors(&self) -> Result<Vec<Donor>, DomainError> {
        let today = Local::now().date_naive();
        let donors = self.repo.find_all().await?;
        Ok(donors
            .into_iter()
            .filter(|d| d.can_donate_on(today))
            .collect())
    }

    pub async fn available_donors_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<Donor>, DomainError> {
        let today = Local::now().date_naive();
        let donors = self.repo.find_by_blood_group(blood_group).await?;
        Ok(donors
            .into_iter()
            .filter(|d| d.can_donate_on(today))
            .collect())
    }

    /// Partial update. Email is immutable after registration; a phone change
    /// must not collide with another donor's number.
    pub async fn update(&self, id: Uuid, update: DonorUpdate) -> Result<Donor, DomainError> {
        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Donor", id))?;

        if let Some(phone) = update.phone {
            if phone != current.phone {
                if let Some(other) = self.repo.find_by_phone(&phone).await? {
                    if other.id != id {
                        return Err(DomainError::Conflict(format!(
                            "Phone {} is already registered to another donor",
                            phone
                        )));
                    }
                }
                current.phone = phone;
            }
        }
        if let Some(name) = update.name {
            current.name = name;
        }
        if let Some(blood_group) = update.blood_group {
            current.blood_group = blood_group;
        }
        if let Some(date) = update.last_donation_date {
            current.last_donation_date = Some(date);
        }
        if let Some(age) = update.age {
            current.age = age;
        }
        if let Some(weight) = update.weight {
            current.weight = weight;
        }
        if let Some(address) = update.address {
            current.address = address;
        }
        if let Some(is_eligible) = update.is_eligible {
            current.is_eligible = is_eligible;
        }
        current.updated_at = Utc::now();
        current.validate()?;

        self.repo.save(&current).await
    }

    /// Record a completed donation date
    pub async fn update_last_donation_date(
        &self,
        id: Uuid,
        date: NaiveDate,
    ) -> Result<Donor, DomainError> {
        let mut current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Donor", id))?;
        current.last_donation_date = Some(date);
        current.updated_at = Utc::now();

        let saved = self.repo.save(&current).await?;
        tracing::info!("Recorded donation on {} for donor {}", date, id);
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!("Deleted donor {}", id);
        }
        Ok(deleted)
    }

    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Donor>, DomainError> {
        self.repo.search_by_name(fragment).await
    }

    /// Donors who donated within the last 30 days, newest first
    pub async fn recent_donors(&self) -> Result<Vec<Donor>, DomainError> {
        let cutoff = Local::now().date_naive() - Days::new(RECENT_DONATION_DAYS);
        self.repo.find_donated_since(cutoff).await
    }

    /// Per-blood-group donor counters, grouped in-process over the full
    /// registry. Groups with no donors are omitted.
    pub async fn statistics(&self) -> Result<Vec<DonorGroupStatistics>, DomainError> {
        let today = Local::now().date_naive();
        let donors = self.repo.find_all().await?;

        let mut by_group: BTreeMap<&'static str, DonorGroupStatistics> = BTreeMap::new();
        for donor in &donors {
            let entry = by_group
                .entry(donor.blood_group.as_str())
                .or_insert_with(|| DonorGroupStatistics {
                    blood_group: donor.blood_group,
                    total_donors: 0,
                    eligible_donors: 0,
                    available_donors: 0,
                });
            entry.total_donors += 1;
            if donor.is_eligible {
                entry.eligible_donors += 1;
            }
            if donor.can_donate_on(today) {
                entry.available_donors += 1;
            }
        }

        Ok(by_group.into_values().collect())
    }

    pub async fn count(&self) -> Result<i64, DomainError> {
        self.repo.count().await
    }

    pub async fn count_eligible(&self) -> Result<i64, DomainError> {
        self.repo.count_eligible().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryDonorRepository;

    fn service() -> DonorService<InMemoryDonorRepository> {
        DonorService::new(Arc::new(InMemoryDonorRepository::default()))
    }

    async fn register(
        svc: &DonorService<InMemoryDonorRepository>,
        email: &str,
        phone: &str,
        blood_group: BloodGroup,
        last_donation: Option<NaiveDate>,
    ) -> Donor {
        svc.register(
            "Jane Doe".to_string(),
            email.to_string(),
            phone.to_string(),
            blood_group,
            last_donation,
            30,
            62.5,
            "1 Main St".to_string(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let svc = service();
        register(&svc, "jane@example.com", "0401111111", BloodGroup::OPositive, None).await;
        let err = svc
            .register(
                "Other Person".to_string(),
                "jane@example.com".to_string(),
                "0402222222".to_string(),
                BloodGroup::APositive,
                None,
                40,
                80.0,
                "2 Side St".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateKey { field: "email", .. }
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_phone() {
        let svc = service();
        register(&svc, "jane@example.com", "0401111111", BloodGroup::OPositive, None).await;
        let err = svc
            .register(
                "Other Person".to_string(),
                "other@example.com".to_string(),
                "0401111111".to_string(),
                BloodGroup::APositive,
                None,
                40,
                80.0,
                "2 Side St".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateKey { field: "phone", .. }
        ));
    }

    #[tokio::test]
    async fn test_register_reports_email_collision_before_phone() {
        let svc = service();
        register(&svc, "jane@example.com", "0401111111", BloodGroup::OPositive, None).await;
        let err = svc
            .register(
                "Other Person".to_string(),
                "jane@example.com".to_string(),
                "0401111111".to_string(),
                BloodGroup::APositive,
                None,
                40,
                80.0,
                "2 Side St".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateKey { field: "email", .. }
        ));
    }

    #[tokio::test]
    async fn test_register_validates_before_writing() {
        let svc = service();
        let err = svc
            .register(
                "Jane Doe".to_string(),
                "jane@example.com".to_string(),
                "0401111111".to_string(),
                BloodGroup::OPositive,
                None,
                17,
                62.5,
                "1 Main St".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(svc.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_phone_collision_with_other_donor() {
        let svc = service();
        register(&svc, "jane@example.com", "0401111111", BloodGroup::OPositive, None).await;
        let bob = register(&svc, "bob@example.com", "0402222222", BloodGroup::APositive, None).await;

        let err = svc
            .update(
                bob.id,
                DonorUpdate {
                    phone: Some("0401111111".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeping_own_phone_is_not_a_collision() {
        let svc = service();
        let jane =
            register(&svc, "jane@example.com", "0401111111", BloodGroup::OPositive, None).await;
        let updated = svc
            .update(
                jane.id,
                DonorUpdate {
                    phone: Some("0401111111".to_string()),
                    weight: Some(70.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.weight, 70.0);
    }

    #[tokio::test]
    async fn test_availability_applies_interval_rule() {
        let svc = service();
        let today = Local::now().date_naive();

        // Donated yesterday: inside the interval
        register(
            &svc,
            "recent@example.com",
            "0401111111",
            BloodGroup::OPositive,
            Some(today - Days::new(1)),
        )
        .await;
        // Donated 60 days ago: past the interval
        register(
            &svc,
            "ready@example.com",
            "0402222222",
            BloodGroup::OPositive,
            Some(today - Days::new(60)),
        )
        .await;
        // Never donated but administratively blocked
        let blocked =
            register(&svc, "blocked@example.com", "0403333333", BloodGroup::OPositive, None).await;
        svc.update(
            blocked.id,
            DonorUpdate {
                is_eligible: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let available = svc
            .available_donors_by_blood_group(BloodGroup::OPositive)
            .await
            .unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].email, "ready@example.com");

        // The eligible-by-group list ignores the interval rule
        let eligible = svc
            .eligible_by_blood_group(BloodGroup::OPositive)
            .await
            .unwrap();
        assert_eq!(eligible.len(), 2);
    }

    #[tokio::test]
    async fn test_update_last_donation_date() {
        let svc = service();
        let donor =
            register(&svc, "jane@example.com", "0401111111", BloodGroup::OPositive, None).await;
        let date = NaiveDate::from_ymd_opt(2026, 8, 20).unwrap();

        let updated = svc.update_last_donation_date(donor.id, date).await.unwrap();
        assert_eq!(updated.last_donation_date, Some(date));

        let err = svc
            .update_last_donation_date(Uuid::new_v4(), date)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_statistics_counts_per_group() {
        let svc = service();
        let today = Local::now().date_naive();

        register(&svc, "a@example.com", "0401111111", BloodGroup::APositive, None).await;
        register(
            &svc,
            "b@example.com",
            "0402222222",
            BloodGroup::APositive,
            Some(today - Days::new(10)),
        )
        .await;
        let blocked =
            register(&svc, "c@example.com", "0403333333", BloodGroup::ONegative, None).await;
        svc.update(
            blocked.id,
            DonorUpdate {
                is_eligible: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stats = svc.statistics().await.unwrap();
        assert_eq!(stats.len(), 2);

        let a_pos = stats
            .iter()
            .find(|s| s.blood_group == BloodGroup::APositive)
            .unwrap();
        assert_eq!(a_pos.total_donors, 2);
        assert_eq!(a_pos.eligible_donors, 2);
        assert_eq!(a_pos.available_donors, 1);

        let o_neg = stats
            .iter()
            .find(|s| s.blood_group == BloodGroup::ONegative)
            .unwrap();
        assert_eq!(o_neg.total_donors, 1);
        assert_eq!(o_neg.eligible_donors, 0);
        assert_eq!(o_neg.available_donors, 0);
    }
}
