use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A generated PDF together with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub created: NaiveDateTime,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    #[schema(example = "7f0c5a8e-3c4b-4d0e-9f69-2f3b1c9a6d11", value_type = String, format = "uuid")]
    pub id: Uuid,

    #[schema(example = "TotalEmployees_10_18_2026_9_15 PM")]
    pub title: String,

    #[schema(example = "2026-10-18T21:15:00", value_type = String, format = "date-time")]
    pub created: NaiveDateTime,
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            title: report.title.clone(),
            created: report.created,
        }
    }
}
