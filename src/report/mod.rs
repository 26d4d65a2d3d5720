//! Report generation: employee snapshot in, PDF bytes out.

pub mod chart;
pub mod document;
pub mod render;

use chrono::{Duration, NaiveDateTime};
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::error::AppResult;
use crate::model::employee::Employee;
use crate::utils::filename::clean_title;

pub const RECENT_HIRE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ReportKind {
    #[strum(serialize = "EmployeesHiredWithinLast30Days")]
    RecentHires,
    TotalEmployees,
}

impl ReportKind {
    pub fn heading(&self) -> &'static str {
        match self {
            ReportKind::RecentHires => "Employees Hired Within Last 30 Days",
            ReportKind::TotalEmployees => "Total Employees",
        }
    }
}

/// Employees hired no more than `days` days before `reference`.
///
/// Hire dates count from midnight; the boundary is inclusive and hire dates
/// after `reference` are included.
pub fn hired_within(employees: &[Employee], reference: NaiveDateTime, days: i64) -> Vec<Employee> {
    let window = Duration::days(days);
    employees
        .iter()
        .filter(|e| {
            e.date_of_hire
                .and_hms_opt(0, 0, 0)
                .is_some_and(|hired| reference - hired <= window)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadcountSplit {
    pub admins: u64,
    pub employees: u64,
}

impl HeadcountSplit {
    pub fn from_employees(employees: &[Employee]) -> Self {
        let admins = employees.iter().filter(|e| e.is_hr_admin).count() as u64;
        Self {
            admins,
            employees: employees.len() as u64 - admins,
        }
    }

    pub fn total(&self) -> u64 {
        self.admins + self.employees
    }
}

/// `{Kind}_{M/D/YYYY}_{h:mm AM}` with path-unsafe characters replaced.
pub fn report_title(kind: ReportKind, generated: NaiveDateTime) -> String {
    clean_title(&format!(
        "{}_{}_{}",
        kind,
        generated.format("%-m/%-d/%Y"),
        generated.format("%-I:%M %p")
    ))
}

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub title: String,
    pub created: NaiveDateTime,
    pub bytes: Vec<u8>,
}

pub fn generate(
    kind: ReportKind,
    employees: &[Employee],
    generated: NaiveDateTime,
) -> AppResult<GeneratedReport> {
    let doc = document::build(kind, employees, generated);
    let bytes = render::render_pdf(&doc)?;
    debug!(%kind, size = bytes.len(), "Rendered report");

    Ok(GeneratedReport {
        title: report_title(kind, generated),
        created: generated,
        bytes,
    })
}
