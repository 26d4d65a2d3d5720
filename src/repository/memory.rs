//! In-process adapters backed by a `RwLock`ed map.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use super::{EmployeeRepository, ReportRepository};
use crate::error::{AppError, AppResult};
use crate::model::employee::{Employee, EmployeeProfile, EmployeeRecord};
use crate::model::report::{Report, ReportSummary};

fn read<T>(lock: &RwLock<T>) -> AppResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| AppError::Internal("in-memory store poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> AppResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| AppError::Internal("in-memory store poisoned".into()))
}

/// Uniqueness follows the case-insensitive collation of the MySQL index.
fn same_email(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[derive(Default)]
struct EmployeeTable {
    next_id: u64,
    rows: BTreeMap<u64, EmployeeRecord>,
}

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    table: RwLock<EmployeeTable>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn create(&self, profile: &EmployeeProfile, password_hash: &str) -> AppResult<u64> {
        let mut table = write(&self.table)?;

        if table.rows.values().any(|r| same_email(&r.employee.email, &profile.email)) {
            return Err(AppError::DuplicateEmail);
        }

        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            EmployeeRecord {
                employee: Employee::from_profile(id, profile.clone()),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(id)
    }

    async fn get(&self, id: u64) -> AppResult<Employee> {
        read(&self.table)?
            .rows
            .get(&id)
            .map(|r| r.employee.clone())
            .ok_or_else(|| AppError::not_found("Employee", id))
    }

    async fn list(&self) -> AppResult<Vec<Employee>> {
        Ok(read(&self.table)?
            .rows
            .values()
            .map(|r| r.employee.clone())
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<EmployeeRecord>> {
        Ok(read(&self.table)?
            .rows
            .values()
            .find(|r| r.employee.email == email)
            .cloned())
    }

    async fn update(
        &self,
        id: u64,
        profile: &EmployeeProfile,
        password_hash: Option<&str>,
    ) -> AppResult<()> {
        let mut table = write(&self.table)?;

        if !table.rows.contains_key(&id) {
            return Err(AppError::not_found("Employee", id));
        }
        if table
            .rows
            .values()
            .any(|r| r.employee.id != id && same_email(&r.employee.email, &profile.email))
        {
            return Err(AppError::DuplicateEmail);
        }

        if let Some(record) = table.rows.get_mut(&id) {
            record.employee = Employee::from_profile(id, profile.clone());
            if let Some(hash) = password_hash {
                record.password_hash = hash.to_string();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> AppResult<()> {
        write(&self.table)?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Employee", id))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(read(&self.table)?.rows.len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: RwLock<Vec<Report>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn save(&self, bytes: &[u8], title: &str, created: NaiveDateTime) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        write(&self.reports)?.push(Report {
            id,
            title: title.to_string(),
            created,
            bytes: bytes.to_vec(),
        });
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> AppResult<Report> {
        read(&self.reports)?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Report", id))
    }

    async fn list(&self) -> AppResult<Vec<ReportSummary>> {
        Ok(read(&self.reports)?.iter().map(ReportSummary::from).collect())
    }
}
