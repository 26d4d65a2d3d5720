use crate::{
    auth::{
        auth::AuthUser,
        password::{generate_password, hash_password},
    },
    error::AppError,
    model::employee::EmployeeDto,
    models::ApiResponse,
    repository::EmployeeRepository,
};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};
use validator::Validate;

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employee/all",
    responses(
        (status = 200, description = "All employees", body = [crate::model::employee::Employee]),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_employees(
    _auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let all = employees.list().await?;
    Ok(HttpResponse::Ok().json(all))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = crate::model::employee::Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "isSuccess": false,
            "message": "Employee with id 7 does not exist"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_employee(
    _auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let employee = employees.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
///
/// The generated password is returned once in `message`.
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = EmployeeDto,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse, example = json!({
            "isSuccess": true,
            "message": "Password: q8Z+d1x"
        })),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "HR Admin only"),
        (status = 500, description = "Duplicate email or persistence failure", body = Object, example = json!({
            "isSuccess": false,
            "message": "Employee with that email already exists"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
#[instrument(name = "employee_create", skip_all, fields(admin = auth.user_id))]
pub async fn create_employee(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    payload: web::Json<EmployeeDto>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;
    payload.validate()?;

    let (profile, _) = payload.into_inner().into_parts();
    let password = generate_password();
    let hash = hash_password(&password)?;

    let id = employees.create(&profile, &hash).await?;
    info!(employee_id = id, "Employee created");

    Ok(HttpResponse::Created().json(ApiResponse::success(format!("Password: {password}"))))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = EmployeeDto,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse, example = json!({
            "isSuccess": true,
            "message": "Successfully updated employee"
        })),
        (status = 400, description = "Id from route does not match id in request body"),
        (status = 403, description = "HR Admin only"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
#[instrument(name = "employee_update", skip_all, fields(admin = auth.user_id, employee_id = *path))]
pub async fn update_employee(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    path: web::Path<u64>,
    payload: web::Json<EmployeeDto>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    let id = path.into_inner();
    if id != payload.id {
        return Err(AppError::Validation(
            "Id from route does not match id in request body".into(),
        ));
    }
    payload.validate()?;

    let (profile, password) = payload.into_inner().into_parts();
    let hash = password.as_deref().map(hash_password).transpose()?;

    employees.update(id, &profile, hash.as_deref()).await?;
    info!("Employee updated");

    Ok(HttpResponse::Ok().json(ApiResponse::success("Successfully updated employee")))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = ApiResponse, example = json!({
            "isSuccess": true,
            "message": "Successfully deleted employee"
        })),
        (status = 400, description = "Attempt to delete own account"),
        (status = 403, description = "HR Admin only"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
#[instrument(name = "employee_delete", skip_all, fields(admin = auth.user_id, employee_id = *path))]
pub async fn delete_employee(
    auth: AuthUser,
    employees: web::Data<dyn EmployeeRepository>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    auth.require_admin()?;

    let id = path.into_inner();
    if id == auth.user_id {
        return Err(AppError::Validation("You cannot delete your own account".into()));
    }

    employees.delete(id).await?;
    info!("Employee deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::success("Successfully deleted employee")))
}
