use tracing::{debug, info};

use crate::{
    auth::{jwt::generate_access_token, password::verify_password},
    config::JwtSettings,
    error::{AppError, AppResult},
    models::LoginResponse,
    repository::EmployeeRepository,
};

/// Checks `email`/`password` against the stored credential and issues an
/// access token for the matching employee.
pub async fn authenticate(
    employees: &dyn EmployeeRepository,
    settings: &JwtSettings,
    email: &str,
    password: &str,
) -> AppResult<LoginResponse> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "No User Credentials to authenticate".into(),
        ));
    }

    let record = match employees.find_by_email(email).await? {
        Some(record) => record,
        None => {
            info!("Invalid credentials: unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(password, &record.password_hash)? {
        info!(user_id = record.employee.id, "Invalid credentials: password mismatch");
        return Err(AppError::InvalidCredentials);
    }

    debug!(user_id = record.employee.id, "Issuing access token");
    let access_token = generate_access_token(&record.employee, settings)?;
    let employee = record.employee;

    Ok(LoginResponse {
        id: employee.id,
        first_name: employee.first_name,
        last_name: employee.last_name,
        is_hr_admin: employee.is_hr_admin,
        access_token,
    })
}
