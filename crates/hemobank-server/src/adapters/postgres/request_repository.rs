//! PostgreSQL implementation of RequestRepository
//!
//! The one-shot processing action runs as a guarded UPDATE on the pending
//! state, so two concurrent processors can never both win the transition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use hemobank::{
    BloodGroup, BloodRequest, DomainError, RequestRepository, RequestStatus, UrgencyLevel,
};

/// PostgreSQL implementation of RequestRepository
pub struct PgRequestRepository {
    pool: PgPool,
}

impl PgRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct RequestRow {
    id: Uuid,
    requester_name: String,
    contact_email: String,
    contact_phone: String,
    blood_group: String,
    units_requested: i32,
    urgency_level: String,
    hospital_name: String,
    patient_name: String,
    medical_reason: Option<String>,
    status: String,
    admin_notes: Option<String>,
    processed_by: Option<String>,
    processed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for BloodRequest {
    type Error = DomainError;

    fn try_from(row: RequestRow) -> Result<Self, DomainError> {
        let blood_group: BloodGroup = row
            .blood_group
            .parse()
            .map_err(|e: String| DomainError::Repository(e))?;
        let urgency_level: UrgencyLevel = row
            .urgency_level
            .parse()
            .map_err(|e: String| DomainError::Repository(e))?;
        let status: RequestStatus = row
            .status
            .parse()
            .map_err(|e: String| DomainError::Repository(e))?;
        Ok(Self {
            id: row.id,
            requester_name: row.requester_name,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            blood_group,
            units_requested: row.units_requested,
            urgency_level,
            hospital_name: row.hospital_name,
            patient_name: row.patient_name,
            medical_reason: row.medical_reason,
            status,
            admin_notes: row.admin_notes,
            processed_by: row.processed_by,
            processed_at: row.processed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn collect(rows: Vec<RequestRow>) -> Result<Vec<BloodRequest>, DomainError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BloodRequest>, DomainError> {
        let row = sqlx::query_as::<_, RequestRow>("SELECT * FROM blood_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM blood_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM blood_requests WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_by_status_oldest_first(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM blood_requests WHERE status = $1 ORDER BY created_at ASC",
        )
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_by_urgency_and_status_oldest_first(
        &self,
        urgency: UrgencyLevel,
        status: RequestStatus,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT * FROM blood_requests
            WHERE urgency_level = $1 AND status = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(urgency.to_string())
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM blood_requests WHERE blood_group = $1 ORDER BY created_at DESC",
        )
        .bind(blood_group.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_by_contact_email(&self, email: &str) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM blood_requests WHERE contact_email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT * FROM blood_requests
            WHERE created_at >= $1 AND created_at < $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_created_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            "SELECT * FROM blood_requests WHERE created_at >= $1 ORDER BY created_at DESC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_overdue_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT * FROM blood_requests
            WHERE status = 'PENDING' AND created_at < $1
            ORDER BY
                CASE urgency_level
                    WHEN 'EMERGENCY' THEN 3
                    WHEN 'URGENT' THEN 2
                    ELSE 1
                END DESC,
                created_at ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn search_by_hospital(&self, fragment: &str) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT * FROM blood_requests
            WHERE hospital_name ILIKE '%' || $1 || '%'
            ORDER BY created_at DESC
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn search_by_patient(&self, fragment: &str) -> Result<Vec<BloodRequest>, DomainError> {
        let rows = sqlx::query_as::<_, RequestRow>(
            r#"
            SELECT * FROM blood_requests
            WHERE patient_name ILIKE '%' || $1 || '%'
            ORDER BY created_at DESC
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn save(&self, request: &BloodRequest) -> Result<BloodRequest, DomainError> {
        // Check if exists
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM blood_requests WHERE id = $1)",
        )
        .bind(request.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        let row = if exists {
            // Update
            sqlx::query_as::<_, RequestRow>(
                r#"
                UPDATE blood_requests
                SET requester_name = $2, contact_email = $3, contact_phone = $4,
                    blood_group = $5, units_requested = $6, urgency_level = $7,
                    hospital_name = $8, patient_name = $9, medical_reason = $10,
                    status = $11, admin_notes = $12, processed_by = $13,
                    processed_at = $14, updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(request.id)
            .bind(&request.requester_name)
            .bind(&request.contact_email)
            .bind(&request.contact_phone)
            .bind(request.blood_group.as_str())
            .bind(request.units_requested)
            .bind(request.urgency_level.to_string())
            .bind(&request.hospital_name)
            .bind(&request.patient_name)
            .bind(&request.medical_reason)
            .bind(request.status.to_string())
            .bind(&request.admin_notes)
            .bind(&request.processed_by)
            .bind(request.processed_at)
            .fetch_one(&self.pool)
            .await
        } else {
            // Insert
            sqlx::query_as::<_, RequestRow>(
                r#"
                INSERT INTO blood_requests (id, requester_name, contact_email,
                    contact_phone, blood_group, units_requested, urgency_level,
                    hospital_name, patient_name, medical_reason, status,
                    admin_notes, processed_by, processed_at, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
                RETURNING *
                "#,
            )
            .bind(request.id)
            .bind(&request.requester_name)
            .bind(&request.contact_email)
            .bind(&request.contact_phone)
            .bind(request.blood_group.as_str())
            .bind(request.units_requested)
            .bind(request.urgency_level.to_string())
            .bind(&request.hospital_name)
            .bind(&request.patient_name)
            .bind(&request.medical_reason)
            .bind(request.status.to_string())
            .bind(&request.admin_notes)
            .bind(&request.processed_by)
            .bind(request.processed_at)
            .bind(request.created_at)
            .fetch_one(&self.pool)
            .await
        }
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM blood_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn process(
        &self,
        id: Uuid,
        status: RequestStatus,
        processed_by: &str,
        notes: Option<&str>,
    ) -> Result<BloodRequest, DomainError> {
        // Guarded on the pending state: only one transition can ever match
        let row = sqlx::query_as::<_, RequestRow>(
            r#"
            UPDATE blood_requests
            SET status = $2, processed_by = $3, admin_notes = COALESCE($4, admin_notes),
                processed_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'PENDING'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(processed_by)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        match row {
            Some(row) => row.try_into(),
            None => {
                // Disambiguate: the id is unknown, or the request already left
                // the pending state
                match self.find_by_id(id).await? {
                    Some(_) => Err(DomainError::AlreadyProcessed(id)),
                    None => Err(DomainError::not_found("Blood request", id)),
                }
            }
        }
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blood_requests")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn count_by_status(&self, status: RequestStatus) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blood_requests WHERE status = $1")
            .bind(status.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn count_emergency_pending(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM blood_requests
            WHERE status = 'PENDING' AND urgency_level = 'EMERGENCY'
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))
    }
}
