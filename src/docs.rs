use crate::model::employee::{Employee, EmployeeDto};
use crate::model::report::ReportSummary;
use crate::models::{ApiResponse, LoginReqDto, LoginResponse};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Information System API",
        version = "1.0.0",
        description = r#"
## HR Information System

Employee records, login, and PDF reports for HR administrators.

### Security
Every endpoint except `/api/authenticate` requires a **JWT Bearer** token.
Creating, updating and deleting employees and all report endpoints are
restricted to **HR Admins**.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::report::list_reports,
        crate::api::report::get_report,
        crate::api::report::employees_hired_within_last_30_days,
        crate::api::report::total_employees
    ),
    components(
        schemas(
            Employee,
            EmployeeDto,
            ApiResponse,
            LoginReqDto,
            LoginResponse,
            ReportSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Report", description = "Report generation and download"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
