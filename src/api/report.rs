use crate::{
    auth::auth::AuthUser,
    error::AppError,
    report::{self, ReportKind},
    repository::{EmployeeRepository, ReportRepository},
};
use actix_web::{
    HttpResponse,
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web,
};
use chrono::Local;
use tracing::{info, instrument};
use uuid::Uuid;

fn pdf_attachment(title: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(format!("{title}.pdf"))],
        })
        .body(bytes)
}

/// List Reports
#[utoipa::path(
    get,
    path = "/api/report/all",
    responses(
        (status = 200, description = "Reports, newest first", body = [crate::model::report::ReportSummary]),
        (status = 403, description = "HR Admin only")
    ),
    tag = "Report",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_reports(
    auth: AuthUser,
    reports: web::Data<dyn ReportRepository>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    let mut all = reports.list().await?;
    all.sort_by(|a, b| b.created.cmp(&a.created));
    Ok(HttpResponse::Ok().json(all))
}

/// Download a stored report
#[utoipa::path(
    get,
    path = "/api/report/{id}",
    params(
        ("id", Path, description = "Report UUID")
    ),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 400, description = "Malformed report id"),
        (status = 403, description = "HR Admin only"),
        (status = 404, description = "Report not found")
    ),
    tag = "Report",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_report(
    auth: AuthUser,
    reports: web::Data<dyn ReportRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    let raw = path.into_inner();
    let id = Uuid::parse_str(&raw)
        .map_err(|_| AppError::Validation(format!("'{raw}' is not a valid report id")))?;

    let report = reports.get(id).await?;
    Ok(pdf_attachment(&report.title, report.bytes))
}

#[instrument(name = "report_generate", skip(auth, employees, reports), fields(admin = auth.user_id))]
async fn generate_and_store(
    kind: ReportKind,
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    reports: web::Data<dyn ReportRepository>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    let generated_at = Local::now().naive_local();
    let snapshot = employees.list().await?;
    let generated = report::generate(kind, &snapshot, generated_at)?;

    let id = reports
        .save(&generated.bytes, &generated.title, generated.created)
        .await?;
    info!(report_id = %id, title = %generated.title, "Report saved");

    Ok(pdf_attachment(&generated.title, generated.bytes))
}

/// Generate the recent hires report
#[utoipa::path(
    get,
    path = "/api/report/EmployeesHiredWithinLast30Days",
    responses(
        (status = 200, description = "PDF listing employees hired in the last 30 days", content_type = "application/pdf"),
        (status = 403, description = "HR Admin only"),
        (status = 500, description = "Rendering or persistence failure")
    ),
    tag = "Report",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn employees_hired_within_last_30_days(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    reports: web::Data<dyn ReportRepository>,
) -> Result<HttpResponse, AppError> {
    generate_and_store(ReportKind::RecentHires, auth, employees, reports).await
}

/// Generate the headcount report
#[utoipa::path(
    get,
    path = "/api/report/TotalEmployees",
    responses(
        (status = 200, description = "PDF with the admin/employee split", content_type = "application/pdf"),
        (status = 403, description = "HR Admin only"),
        (status = 500, description = "Rendering or persistence failure")
    ),
    tag = "Report",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn total_employees(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    reports: web::Data<dyn ReportRepository>,
) -> Result<HttpResponse, AppError> {
    generate_and_store(ReportKind::TotalEmployees, auth, employees, reports).await
}
