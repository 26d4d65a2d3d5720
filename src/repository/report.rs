use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, MySqlPool};
use uuid::Uuid;

use super::ReportRepository;
use crate::error::{AppError, AppResult};
use crate::model::report::{Report, ReportSummary};

#[derive(FromRow)]
struct ReportRow {
    id: String,
    title: String,
    created: NaiveDateTime,
    bytes: Vec<u8>,
}

#[derive(FromRow)]
struct ReportSummaryRow {
    id: String,
    title: String,
    created: NaiveDateTime,
}

fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::Persistence(format!("corrupt report id {raw}: {e}")))
}

#[derive(Clone)]
pub struct MySqlReportRepository {
    pool: MySqlPool,
}

impl MySqlReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for MySqlReportRepository {
    async fn save(&self, bytes: &[u8], title: &str, created: NaiveDateTime) -> AppResult<Uuid> {
        let id = Uuid::new_v4();

        let result =
            sqlx::query("INSERT INTO reports (id, title, created, bytes) VALUES (?, ?, ?, ?)")
                .bind(id.to_string())
                .bind(title)
                .bind(created)
                .bind(bytes)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Persistence("Error saving report".into()));
        }
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> AppResult<Report> {
        let row = sqlx::query_as::<_, ReportRow>(
            "SELECT id, title, created, bytes FROM reports WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Report", id))?;

        Ok(Report {
            id: parse_id(&row.id)?,
            title: row.title,
            created: row.created,
            bytes: row.bytes,
        })
    }

    async fn list(&self) -> AppResult<Vec<ReportSummary>> {
        let rows =
            sqlx::query_as::<_, ReportSummaryRow>("SELECT id, title, created FROM reports")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ReportSummary {
                    id: parse_id(&row.id)?,
                    title: row.title,
                    created: row.created,
                })
            })
            .collect()
    }
}
