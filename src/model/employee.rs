use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "firstName": "John",
        "lastName": "Brown",
        "email": "john.brown@company.com",
        "phoneNumber": "8765551234",
        "position": "Accountant",
        "dateOfHire": "2024-01-01",
        "salary": 250000.0,
        "isHRAdmin": false
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Brown")]
    pub last_name: String,

    #[schema(example = "john.brown@company.com")]
    pub email: String,

    #[schema(example = "8765551234")]
    pub phone_number: String,

    #[schema(example = "Accountant")]
    pub position: String,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date_of_hire: NaiveDate,

    #[schema(example = 250000.0, value_type = f64)]
    pub salary: Decimal,

    #[serde(rename = "isHRAdmin")]
    pub is_hr_admin: bool,
}

impl Employee {
    pub fn from_profile(id: u64, profile: EmployeeProfile) -> Self {
        Self {
            id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            phone_number: profile.phone_number,
            position: profile.position,
            date_of_hire: profile.date_of_hire,
            salary: profile.salary,
            is_hr_admin: profile.is_hr_admin,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An employee row together with its stored password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeRecord {
    #[sqlx(flatten)]
    pub employee: Employee,
    pub password_hash: String,
}

/// Every writable employee field except the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub position: String,
    pub date_of_hire: NaiveDate,
    pub salary: Decimal,
    pub is_hr_admin: bool,
}

/// Request body for create and update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    /// Ignored on create; must match the route id on update.
    #[serde(default)]
    #[schema(example = 0)]
    pub id: u64,

    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    #[schema(example = "John")]
    pub first_name: String,

    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    #[schema(example = "Brown")]
    pub last_name: String,

    #[validate(email(message = "Valid email is required"))]
    #[schema(example = "john.brown@company.com", format = "email")]
    pub email: String,

    #[validate(custom(function = "validate_phone_number"))]
    #[schema(example = "8765551234")]
    pub phone_number: String,

    #[validate(length(min = 2, message = "Position must be at least 2 characters"))]
    #[schema(example = "Accountant")]
    pub position: String,

    #[serde(deserialize_with = "deserialize_hire_date")]
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date_of_hire: NaiveDate,

    #[validate(custom(function = "validate_salary"))]
    #[schema(example = 250000.0, value_type = f64)]
    pub salary: Decimal,

    #[serde(default, rename = "isHRAdmin")]
    pub is_hr_admin: bool,

    /// Replaces the stored password on update when present. Blank means absent.
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    #[validate(length(min = 7, message = "Password must be at least 7 characters"))]
    #[schema(example = "s3cr3t!", nullable = true)]
    pub password: Option<String>,
}

impl EmployeeDto {
    /// Splits the request into the profile and the optional new password.
    pub fn into_parts(self) -> (EmployeeProfile, Option<String>) {
        let profile = EmployeeProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            position: self.position.trim().to_string(),
            date_of_hire: self.date_of_hire,
            salary: self.salary,
            is_hr_admin: self.is_hr_admin,
        };
        (profile, self.password)
    }
}

/// `876` followed by seven digits, optionally prefixed with `1`.
fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let local = phone.strip_prefix('1').unwrap_or(phone);
    let valid = local.len() == 10
        && local.starts_with("876")
        && local.chars().all(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("phone_number")
            .with_message("Valid phone number is required".into()))
    }
}

fn validate_salary(salary: &Decimal) -> Result<(), ValidationError> {
    if salary.is_sign_positive() && !salary.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("salary").with_message("Valid positive salary is required".into()))
    }
}

/// Accepts both `2024-01-31` and `2024-01-31T00:00:00`.
fn deserialize_hire_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    let without_zone = raw.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(without_zone, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .map_err(|_| serde::de::Error::custom(format!("invalid dateOfHire: {raw}")))
}

fn deserialize_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|p| !p.trim().is_empty()))
}
