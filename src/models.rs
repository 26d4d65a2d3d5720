use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    /// The employee's email address.
    #[schema(example = "john.brown@company.com")]
    pub username: String,
    #[schema(example = "s3cr3t!")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "isHRAdmin")]
    pub is_hr_admin: bool,
    pub access_token: String,
}

/// Status envelope returned by the mutating employee endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub is_success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,

    #[serde(rename = "UserId")]
    pub user_id: u64,
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "IsHRAdmin")]
    pub is_hr_admin: bool,
}
