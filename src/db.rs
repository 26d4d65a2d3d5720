use anyhow::Context;
use chrono::Local;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::info;

use crate::{
    auth::password::hash_password,
    config::BootstrapAdmin,
    model::employee::EmployeeProfile,
    repository::EmployeeRepository,
};

pub async fn init_db(database_url: &str) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}

/// Creates the first HR admin when the employee table is empty.
pub async fn bootstrap_admin(
    employees: &dyn EmployeeRepository,
    admin: &BootstrapAdmin,
) -> anyhow::Result<()> {
    if employees.count().await? > 0 {
        return Ok(());
    }

    let profile = EmployeeProfile {
        first_name: "HR".to_string(),
        last_name: "Administrator".to_string(),
        email: admin.email.clone(),
        phone_number: "8760000000".to_string(),
        position: "HR Administrator".to_string(),
        date_of_hire: Local::now().date_naive(),
        salary: Decimal::ZERO,
        is_hr_admin: true,
    };
    let id = employees
        .create(&profile, &hash_password(&admin.password)?)
        .await?;
    info!(employee_id = id, email = %admin.email, "Bootstrap HR admin created");
    Ok(())
}
