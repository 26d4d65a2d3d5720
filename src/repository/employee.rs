use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, instrument};

use super::EmployeeRepository;
use crate::error::{AppError, AppResult};
use crate::model::employee::{Employee, EmployeeProfile, EmployeeRecord};

const EMPLOYEE_COLUMNS: &str = r#"
    id, first_name, last_name, email, phone_number, position,
    date_of_hire, salary, is_hr_admin
"#;

#[derive(Clone)]
pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: u64) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ? LIMIT 1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    /// Whether `email` belongs to an employee other than `except_id`.
    async fn email_taken(&self, email: &str, except_id: Option<u64>) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE email = ? AND id <> ? LIMIT 1)",
        )
        .bind(email)
        .bind(except_id.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    #[instrument(name = "employee_repo_create", skip_all, fields(email = %profile.email))]
    async fn create(&self, profile: &EmployeeProfile, password_hash: &str) -> AppResult<u64> {
        if self.email_taken(&profile.email, None).await? {
            debug!("Email already registered");
            return Err(AppError::DuplicateEmail);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO employees
            (first_name, last_name, email, phone_number, position,
             date_of_hire, salary, is_hr_admin, password_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(&profile.position)
        .bind(profile.date_of_hire)
        .bind(profile.salary)
        .bind(profile.is_hr_admin)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Persistence("Error saving employee".into()));
        }

        Ok(result.last_insert_id())
    }

    async fn get(&self, id: u64) -> AppResult<Employee> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");

        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("Employee", id))
    }

    async fn list(&self) -> AppResult<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id");

        Ok(sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<EmployeeRecord>> {
        // BINARY keeps the comparison case-sensitive under the default collation
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS}, password_hash FROM employees WHERE BINARY email = ?"
        );

        Ok(sqlx::query_as::<_, EmployeeRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(name = "employee_repo_update", skip(self, profile, password_hash))]
    async fn update(
        &self,
        id: u64,
        profile: &EmployeeProfile,
        password_hash: Option<&str>,
    ) -> AppResult<()> {
        if !self.exists(id).await? {
            return Err(AppError::not_found("Employee", id));
        }
        if self.email_taken(&profile.email, Some(id)).await? {
            return Err(AppError::DuplicateEmail);
        }

        sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, email = ?, phone_number = ?,
                position = ?, date_of_hire = ?, salary = ?, is_hr_admin = ?,
                password_hash = COALESCE(?, password_hash)
            WHERE id = ?
            "#,
        )
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(&profile.position)
        .bind(profile.date_of_hire)
        .bind(profile.salary)
        .bind(profile.is_hr_admin)
        .bind(password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: u64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Employee", id));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }
}
