//! PostgreSQL implementation of DonorRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use hemobank::{BloodGroup, DomainError, Donor, DonorRepository};

/// PostgreSQL implementation of DonorRepository
pub struct PgDonorRepository {
    pool: PgPool,
}

impl PgDonorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct DonorRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    blood_group: String,
    last_donation_date: Option<NaiveDate>,
    age: i32,
    weight: f64,
    address: String,
    is_eligible: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<DonorRow> for Donor {
    type Error = DomainError;

    fn try_from(row: DonorRow) -> Result<Self, DomainError> {
        let blood_group: BloodGroup = row
            .blood_group
            .parse()
            .map_err(|e: String| DomainError::Repository(e))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            blood_group,
            last_donation_date: row.last_donation_date,
            age: row.age,
            weight: row.weight,
            address: row.address,
            is_eligible: row.is_eligible,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn collect(rows: Vec<DonorRow>) -> Result<Vec<Donor>, DomainError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

#[async_trait]
impl DonorRepository for PgDonorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>, DomainError> {
        let row = sqlx::query_as::<_, DonorRow>("SELECT * FROM donors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Donor>, DomainError> {
        let row = sqlx::query_as::<_, DonorRow>("SELECT * FROM donors WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Donor>, DomainError> {
        let row = sqlx::query_as::<_, DonorRow>("SELECT * FROM donors WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Donor>, DomainError> {
        let rows = sqlx::query_as::<_, DonorRow>("SELECT * FROM donors ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Vec<Donor>, DomainError> {
        let rows = sqlx::query_as::<_, DonorRow>(
            "SELECT * FROM donors WHERE blood_group = $1 ORDER BY created_at DESC",
        )
        .bind(blood_group.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Donor>, DomainError> {
        let rows = sqlx::query_as::<_, DonorRow>(
            "SELECT * FROM donors WHERE name ILIKE '%' || $1 || '%' ORDER BY name",
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn find_donated_since(&self, cutoff: NaiveDate) -> Result<Vec<Donor>, DomainError> {
        let rows = sqlx::query_as::<_, DonorRow>(
            r#"
            SELECT * FROM donors
            WHERE last_donation_date >= $1
            ORDER BY last_donation_date DESC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        collect(rows)
    }

    async fn save(&self, donor: &Donor) -> Result<Donor, DomainError> {
        // Check if exists
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM donors WHERE id = $1)")
                .bind(donor.id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        let row = if exists {
            // Update
            sqlx::query_as::<_, DonorRow>(
                r#"
                UPDATE donors
                SET name = $2, email = $3, phone = $4, blood_group = $5,
                    last_donation_date = $6, age = $7, weight = $8, address = $9,
                    is_eligible = $10, updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(donor.id)
            .bind(&donor.name)
            .bind(&donor.email)
            .bind(&donor.phone)
            .bind(donor.blood_group.as_str())
            .bind(donor.last_donation_date)
            .bind(donor.age)
            .bind(donor.weight)
            .bind(&donor.address)
            .bind(donor.is_eligible)
            .fetch_one(&self.pool)
            .await
        } else {
            // Insert
            sqlx::query_as::<_, DonorRow>(
                r#"
                INSERT INTO donors (id, name, email, phone, blood_group,
                    last_donation_date, age, weight, address, is_eligible)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
                "#,
            )
            .bind(donor.id)
            .bind(&donor.name)
            .bind(&donor.email)
            .bind(&donor.phone)
            .bind(donor.blood_group.as_str())
            .bind(donor.last_donation_date)
            .bind(donor.age)
            .bind(donor.weight)
            .bind(&donor.address)
            .bind(donor.is_eligible)
            .fetch_one(&self.pool)
            .await
        }
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM donors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM donors WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn exists_by_phone(&self, phone: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM donors WHERE phone = $1)")
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donors")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn count_eligible(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM donors WHERE is_eligible")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))
    }
}
