use crate::{
    auth::service::authenticate,
    config::Config,
    error::AppError,
    models::LoginReqDto,
    repository::EmployeeRepository,
};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

/// Authenticate
#[utoipa::path(
    post,
    path = "/api/authenticate",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = crate::models::LoginResponse),
        (status = 400, description = "Invalid credentials", body = Object, example = json!({
            "isSuccess": false,
            "message": "Invalid Credentials"
        }))
    ),
    tag = "Authentication"
)]
#[instrument(
    name = "auth_login",
    skip(employees, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    employees: web::Data<dyn EmployeeRepository>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    let response = authenticate(
        employees.get_ref(),
        &config.jwt,
        user.username.trim(),
        &user.password,
    )
    .await?;

    info!(user_id = response.id, "Login successful");
    Ok(HttpResponse::Ok().json(response))
}
