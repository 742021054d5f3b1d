//! Observation record service
//!
//! Create/read/update/delete/search/aggregate operations over the
//! observation store. Validation happens before any mutation; no operation
//! leaves the store in a partially-validated state.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use shared::models::observation::{day_bounds, measurement_instant, seed_observations};
use shared::validation::{validate_precipitation, validate_region};

use crate::error::{AppError, AppResult};

/// Observation service for managing weather records
#[derive(Clone)]
pub struct ObservationService {
    db: PgPool,
}

/// One stored observation record.
///
/// `measured_at` is exposed on the wire as `date` to keep the public field
/// names of the API (`region`, `temperature`, `precipitation`, `date`,
/// `createdAt`).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: Uuid,
    pub region: String,
    pub temperature: Decimal,
    pub precipitation: Decimal,
    #[serde(rename = "date")]
    pub measured_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an observation.
///
/// Fields are optional so that presence checks surface as validation
/// errors in the envelope rather than body-level rejections.
#[derive(Debug, Deserialize)]
pub struct AddObservationInput {
    pub region: Option<String>,
    pub temperature: Option<Decimal>,
    pub precipitation: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

/// Input for a partial update; only provided fields are applied
#[derive(Debug, Default, Deserialize)]
pub struct UpdateObservationInput {
    pub region: Option<String>,
    pub temperature: Option<Decimal>,
    pub precipitation: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

/// Aggregate temperature statistics over the whole store
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_temperature: Option<Decimal>,
    pub total_records: i64,
}

impl ObservationService {
    /// Create a new ObservationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a new observation record
    pub async fn add(&self, input: AddObservationInput) -> AppResult<Observation> {
        let region = input.region.unwrap_or_default();
        validate_region(&region).map_err(|msg| AppError::Validation {
            field: "region".to_string(),
            message: msg.to_string(),
        })?;

        let temperature = input.temperature.ok_or_else(|| AppError::Validation {
            field: "temperature".to_string(),
            message: "temperature must be a number".to_string(),
        })?;

        let precipitation = input.precipitation.ok_or_else(|| AppError::Validation {
            field: "precipitation".to_string(),
            message: "precipitation must be a non-negative number".to_string(),
        })?;
        validate_precipitation(precipitation).map_err(|msg| AppError::Validation {
            field: "precipitation".to_string(),
            message: msg.to_string(),
        })?;

        let date = input.date.ok_or_else(|| AppError::Validation {
            field: "date".to_string(),
            message: "measurement date is required".to_string(),
        })?;

        let observation = sqlx::query_as::<_, Observation>(
            r#"
            INSERT INTO observations (region, temperature, precipitation, measured_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, region, temperature, precipitation, measured_at, created_at
            "#,
        )
        .bind(region.trim())
        .bind(temperature)
        .bind(precipitation)
        .bind(measurement_instant(date))
        .fetch_one(&self.db)
        .await?;

        Ok(observation)
    }

    /// Get an observation by ID
    pub async fn get(&self, id: Uuid) -> AppResult<Observation> {
        let observation = sqlx::query_as::<_, Observation>(
            r#"
            SELECT id, region, temperature, precipitation, measured_at, created_at
            FROM observations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Observation".to_string()))?;

        Ok(observation)
    }

    /// Get all observations, newest measurement first.
    ///
    /// Ordered by measurement date descending, ties broken by insertion
    /// time descending.
    pub async fn list(&self) -> AppResult<Vec<Observation>> {
        let observations = sqlx::query_as::<_, Observation>(
            r#"
            SELECT id, region, temperature, precipitation, measured_at, created_at
            FROM observations
            ORDER BY measured_at DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(observations)
    }

    /// Apply a partial update to an observation.
    ///
    /// Provided fields go through the same per-field validation as `add`;
    /// absent fields keep their stored values.
    pub async fn update(&self, id: Uuid, input: UpdateObservationInput) -> AppResult<Observation> {
        let existing = self.get(id).await?;

        let region = match input.region {
            Some(region) => {
                validate_region(&region).map_err(|msg| AppError::Validation {
                    field: "region".to_string(),
                    message: msg.to_string(),
                })?;
                region.trim().to_string()
            }
            None => existing.region,
        };

        let temperature = input.temperature.unwrap_or(existing.temperature);

        let precipitation = match input.precipitation {
            Some(precipitation) => {
                validate_precipitation(precipitation).map_err(|msg| AppError::Validation {
                    field: "precipitation".to_string(),
                    message: msg.to_string(),
                })?;
                precipitation
            }
            None => existing.precipitation,
        };

        let measured_at = input
            .date
            .map(measurement_instant)
            .unwrap_or(existing.measured_at);

        let observation = sqlx::query_as::<_, Observation>(
            r#"
            UPDATE observations
            SET region = $1, temperature = $2, precipitation = $3, measured_at = $4
            WHERE id = $5
            RETURNING id, region, temperature, precipitation, measured_at, created_at
            "#,
        )
        .bind(&region)
        .bind(temperature)
        .bind(precipitation)
        .bind(measured_at)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        // Lost a race with a concurrent delete; same outcome as an absent id
        .ok_or_else(|| AppError::NotFound("Observation".to_string()))?;

        Ok(observation)
    }

    /// Delete an observation, returning the removed record
    pub async fn delete(&self, id: Uuid) -> AppResult<Observation> {
        let observation = sqlx::query_as::<_, Observation>(
            r#"
            DELETE FROM observations
            WHERE id = $1
            RETURNING id, region, temperature, precipitation, measured_at, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Observation".to_string()))?;

        Ok(observation)
    }

    /// Get all observations within one calendar day, coldest first.
    ///
    /// The day window is inclusive of its midnight and exclusive of the
    /// next day's midnight.
    pub async fn search_by_date(&self, date: NaiveDate) -> AppResult<Vec<Observation>> {
        let (start, end) = day_bounds(date);

        let observations = sqlx::query_as::<_, Observation>(
            r#"
            SELECT id, region, temperature, precipitation, measured_at, created_at
            FROM observations
            WHERE measured_at >= $1 AND measured_at < $2
            ORDER BY temperature ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(observations)
    }

    /// Get the record with the global minimum temperature, if any.
    ///
    /// Ties are broken by earliest measurement date, then earliest
    /// insertion time.
    pub async fn coldest(&self) -> AppResult<Option<Observation>> {
        let observation = sqlx::query_as::<_, Observation>(
            r#"
            SELECT id, region, temperature, precipitation, measured_at, created_at
            FROM observations
            ORDER BY temperature ASC, measured_at ASC, created_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(observation)
    }

    /// Aggregate min/max/avg temperature and record count over the store
    pub async fn stats(&self) -> AppResult<TemperatureStats> {
        let row = sqlx::query_as::<_, (Option<Decimal>, Option<Decimal>, Option<Decimal>, i64)>(
            r#"
            SELECT MIN(temperature), MAX(temperature), AVG(temperature), COUNT(*)
            FROM observations
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        Ok(TemperatureStats {
            min_temperature: row.0,
            max_temperature: row.1,
            avg_temperature: row.2,
            total_records: row.3,
        })
    }

    /// Wipe the store and insert the fixed seed set, returning the count
    pub async fn reset_with_seed_data(&self) -> AppResult<u64> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM observations")
            .execute(&mut *tx)
            .await?;

        let inserted = insert_seed_data(&mut tx).await?;
        tx.commit().await?;

        Ok(inserted)
    }

    /// Insert the seed set iff the store is empty, returning the count.
    ///
    /// Called once at startup so a fresh deployment has data to show.
    pub async fn seed_if_empty(&self) -> AppResult<u64> {
        let mut tx = self.db.begin().await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM observations")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            return Ok(0);
        }

        let inserted = insert_seed_data(&mut tx).await?;
        tx.commit().await?;

        Ok(inserted)
    }
}

async fn insert_seed_data(tx: &mut Transaction<'_, Postgres>) -> AppResult<u64> {
    let seeds = seed_observations();
    for seed in &seeds {
        sqlx::query(
            r#"
            INSERT INTO observations (region, temperature, precipitation, measured_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(seed.region)
        .bind(seed.temperature)
        .bind(seed.precipitation)
        .bind(measurement_instant(seed.date))
        .execute(&mut **tx)
        .await?;
    }

    Ok(seeds.len() as u64)
}
