//! Storage ports for employees and reports.
//!
//! Handlers only see the traits; `main` wires the MySQL adapters and the
//! integration tests wire the in-memory ones.

pub mod employee;
pub mod memory;
pub mod report;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::AppResult;
use crate::model::employee::{Employee, EmployeeProfile, EmployeeRecord};
use crate::model::report::{Report, ReportSummary};

pub use employee::MySqlEmployeeRepository;
pub use memory::{InMemoryEmployeeRepository, InMemoryReportRepository};
pub use report::MySqlReportRepository;

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Inserts a new employee and returns its id.
    ///
    /// Fails with `DuplicateEmail` without touching the store when the email
    /// is already taken.
    async fn create(&self, profile: &EmployeeProfile, password_hash: &str) -> AppResult<u64>;

    async fn get(&self, id: u64) -> AppResult<Employee>;

    async fn list(&self) -> AppResult<Vec<Employee>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<EmployeeRecord>>;

    /// Replaces every profile field; the password hash only when given.
    async fn update(
        &self,
        id: u64,
        profile: &EmployeeProfile,
        password_hash: Option<&str>,
    ) -> AppResult<()>;

    async fn delete(&self, id: u64) -> AppResult<()>;

    async fn count(&self) -> AppResult<u64>;
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn save(&self, bytes: &[u8], title: &str, created: NaiveDateTime) -> AppResult<Uuid>;

    async fn get(&self, id: Uuid) -> AppResult<Report>;

    async fn list(&self) -> AppResult<Vec<ReportSummary>>;
}
