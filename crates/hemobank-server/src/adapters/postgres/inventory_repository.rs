//! PostgreSQL implementation of InventoryRepository
//!
//! Credit and debit run as single guarded UPDATEs so the precondition check
//! and the balance change hit the row atomically. A movement that matches no
//! row is disambiguated with a follow-up read.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use hemobank::{BloodGroup, BloodInventory, DomainError, InventoryRepository};

/// PostgreSQL implementation of InventoryRepository
pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct InventoryRow {
    id: Uuid,
    blood_group: String,
    units_available: i32,
    minimum_stock: i32,
    maximum_capacity: i32,
    expiry_date: Option<chrono::DateTime<chrono::Utc>>,
    notes: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<InventoryRow> for BloodInventory {
    type Error = DomainError;

    fn try_from(row: InventoryRow) -> Result<Self, DomainError> {
        let blood_group: BloodGroup = row
            .blood_group
            .parse()
            .map_err(|e: String| DomainError::Repository(e))?;
        Ok(Self {
            id: row.id,
            blood_group,
            units_available: row.units_available,
            minimum_stock: row.minimum_stock,
            maximum_capacity: row.maximum_capacity,
            expiry_date: row.expiry_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BloodInventory>, DomainError> {
        let row = sqlx::query_as::<_, InventoryRow>("SELECT * FROM blood_inventory WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_blood_group(
        &self,
        blood_group: BloodGroup,
    ) -> Result<Option<BloodInventory>, DomainError> {
        let row = sqlx::query_as::<_, InventoryRow>(
            "SELECT * FROM blood_inventory WHERE blood_group = $1",
        )
        .bind(blood_group.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BloodInventory>, DomainError> {
        let rows =
            sqlx::query_as::<_, InventoryRow>("SELECT * FROM blood_inventory ORDER BY blood_group")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn exists_by_blood_group(&self, blood_group: BloodGroup) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM blood_inventory WHERE blood_group = $1)",
        )
        .bind(blood_group.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))
    }

    async fn save(&self, inventory: &BloodInventory) -> Result<BloodInventory, DomainError> {
        // Check if exists
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM blood_inventory WHERE id = $1)",
        )
        .bind(inventory.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        let row = if exists {
            // Update
            sqlx::query_as::<_, InventoryRow>(
                r#"
                UPDATE blood_inventory
                SET blood_group = $2, units_available = $3, minimum_stock = $4,
                    maximum_capacity = $5, expiry_date = $6, notes = $7, updated_at = NOW()
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(inventory.id)
            .bind(inventory.blood_group.as_str())
            .bind(inventory.units_available)
            .bind(inventory.minimum_stock)
            .bind(inventory.maximum_capacity)
            .bind(inventory.expiry_date)
            .bind(&inventory.notes)
            .fetch_one(&self.pool)
            .await
        } else {
            // Insert
            sqlx::query_as::<_, InventoryRow>(
                r#"
                INSERT INTO blood_inventory (id, blood_group, units_available,
                    minimum_stock, maximum_capacity, expiry_date, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(inventory.id)
            .bind(inventory.blood_group.as_str())
            .bind(inventory.units_available)
            .bind(inventory.minimum_stock)
            .bind(inventory.maximum_capacity)
            .bind(inventory.expiry_date)
            .bind(&inventory.notes)
            .fetch_one(&self.pool)
            .await
        }
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM blood_inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn credit(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError> {
        // The capacity check and the increment happen in one statement
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            UPDATE blood_inventory
            SET units_available = units_available + $2,
                notes = COALESCE($3, notes),
                updated_at = NOW()
            WHERE blood_group = $1
              AND units_available + $2 <= maximum_capacity
            RETURNING *
            "#,
        )
        .bind(blood_group.as_str())
        .bind(units)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        match row {
            Some(row) => row.try_into(),
            None => {
                let current = self
                    .find_by_blood_group(blood_group)
                    .await?
                    .ok_or_else(|| DomainError::not_found_key("Blood inventory", blood_group))?;
                Err(DomainError::CapacityExceeded {
                    blood_group,
                    units,
                    capacity: current.maximum_capacity,
                })
            }
        }
    }

    async fn debit(
        &self,
        blood_group: BloodGroup,
        units: i32,
        notes: Option<&str>,
    ) -> Result<BloodInventory, DomainError> {
        // The sufficiency check and the decrement happen in one statement
        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            UPDATE blood_inventory
            SET units_available = units_available - $2,
                notes = COALESCE($3, notes),
                updated_at = NOW()
            WHERE blood_group = $1
              AND units_available >= $2
            RETURNING *
            "#,
        )
        .bind(blood_group.as_str())
        .bind(units)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        match row {
            Some(row) => row.try_into(),
            None => {
                let current = self
                    .find_by_blood_group(blood_group)
                    .await?
                    .ok_or_else(|| DomainError::not_found_key("Blood inventory", blood_group))?;
                Err(DomainError::InsufficientStock {
                    blood_group,
                    available: current.units_available,
                    requested: units,
                })
            }
        }
    }

    async fn total_units(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(units_available), 0) FROM blood_inventory",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))
    }
}
