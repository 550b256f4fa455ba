use async_trait::async_trait;
use chrono::{DateTime, Utc};
use civicmap_core::error::{CivicmapError, Result};
use civicmap_core::models::{
    ActorId, GeoPoint, NewReport, RecordFilter, RecordId, Report, ReportState, ReportUpdate,
    SpatialRecord,
};
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::PostgresStore;
use crate::ports::{RecordStore, ReportStore};

fn unavailable(context: &'static str) -> impl FnOnce(sqlx::Error) -> CivicmapError {
    move |e| CivicmapError::StoreUnavailable { reason: format!("{}: {}", context, e) }
}

/// Postgres BIGINT columns are signed
fn to_db_id(value: u64, key: &str) -> Result<i64> {
    i64::try_from(value).map_err(|_| CivicmapError::Serialization(format!(
        "{} {} does not fit a BIGINT column",
        key, value
    )))
}

fn from_db_id(value: i64, key: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        CivicmapError::Serialization(format!("negative {} {} in reports table", key, value))
    })
}

fn read_location(row: &PgRow) -> Result<GeoPoint> {
    let latitude: f64 = row.try_get("latitude").map_err(unavailable("Failed to read latitude"))?;
    let longitude: f64 =
        row.try_get("longitude").map_err(unavailable("Failed to read longitude"))?;
    GeoPoint::new(latitude, longitude)
}

fn read_state(row: &PgRow) -> Result<ReportState> {
    let code: i16 = row.try_get("state").map_err(unavailable("Failed to read state"))?;
    let code = u8::try_from(code).map_err(|_| CivicmapError::InvalidReport {
        field: "state".to_string(),
        reason: format!("stored state code {} is out of range", code),
    })?;
    ReportState::try_from(code)
}

fn read_id(row: &PgRow, column: &str) -> Result<u64> {
    let value: i64 = row.try_get(column).map_err(unavailable("Failed to read id column"))?;
    from_db_id(value, column)
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn candidates(&self, filter: &RecordFilter) -> Result<Vec<SpatialRecord>> {
        let category_id = filter.category_id.map(|c| to_db_id(c, "category_id")).transpose()?;
        let territory_id = filter.territory_id.map(|t| to_db_id(t, "territory_id")).transpose()?;

        let rows = sqlx::query(
            r#"
            SELECT id, latitude, longitude
            FROM reports
            WHERE ($1::BIGINT IS NULL OR category_id = $1)
              AND ($2::BIGINT IS NULL OR territory_id = $2)
            "#,
        )
        .bind(category_id)
        .bind(territory_id)
        .fetch_all(self.pool())
        .await
        .map_err(unavailable("Failed to fetch candidates"))?;

        rows.iter()
            .map(|row| Ok(SpatialRecord::new(RecordId(read_id(row, "id")?), read_location(row)?)))
            .collect()
    }
}

#[async_trait]
impl ReportStore for PostgresStore {
    async fn create(&self, report: NewReport) -> Result<RecordId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reports (title, state, category_id, territory_id, owner_id, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&report.title)
        .bind(i16::from(report.state.code()))
        .bind(to_db_id(report.category_id, "category_id")?)
        .bind(to_db_id(report.territory_id, "territory_id")?)
        .bind(to_db_id(report.owner_id.0, "owner_id")?)
        .bind(report.location.latitude())
        .bind(report.location.longitude())
        .fetch_one(self.pool())
        .await
        .map_err(unavailable("Failed to store report"))?;

        Ok(RecordId(from_db_id(id, "id")?))
    }

    async fn get(&self, id: RecordId) -> Result<Option<Report>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, state, category_id, territory_id, owner_id, latitude, longitude, created_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(to_db_id(id.0, "id")?)
        .fetch_optional(self.pool())
        .await
        .map_err(unavailable("Failed to get report"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let title: String = row.try_get("title").map_err(unavailable("Failed to read title"))?;
        let created_at: DateTime<Utc> =
            row.try_get("created_at").map_err(unavailable("Failed to read created_at"))?;

        Ok(Some(Report {
            id: RecordId(read_id(&row, "id")?),
            title,
            state: read_state(&row)?,
            category_id: read_id(&row, "category_id")?,
            territory_id: read_id(&row, "territory_id")?,
            owner_id: ActorId(read_id(&row, "owner_id")?),
            location: read_location(&row)?,
            created_at,
        }))
    }

    async fn update(&self, id: RecordId, update: ReportUpdate) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET title = $2, state = $3, latitude = $4, longitude = $5
            WHERE id = $1
            "#,
        )
        .bind(to_db_id(id.0, "id")?)
        .bind(&update.title)
        .bind(i16::from(update.state.code()))
        .bind(update.location.latitude())
        .bind(update.location.longitude())
        .execute(self.pool())
        .await
        .map_err(unavailable("Failed to update report"))?;

        if result.rows_affected() == 0 {
            return Err(CivicmapError::RecordNotFound { id });
        }
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(to_db_id(id.0, "id")?)
            .execute(self.pool())
            .await
            .map_err(unavailable("Failed to delete report"))?;

        Ok(result.rows_affected() > 0)
    }
}
