//! Renderer-independent layout of the two reports.

use chrono::NaiveDateTime;

use super::chart::PieChart;
use super::{HeadcountSplit, RECENT_HIRE_WINDOW_DAYS, ReportKind, hired_within};
use crate::model::employee::Employee;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub width_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody {
    Table(Table),
    Chart(PieChart),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Banner text repeated at the top of every page.
    pub heading: String,
    /// Footer text repeated at the bottom of every page.
    pub footer: String,
    pub body: ReportBody,
}

pub fn footer_text(generated: NaiveDateTime) -> String {
    format!("Generated on: {}", generated.format("%B %d, %Y"))
}

pub fn build(kind: ReportKind, employees: &[Employee], generated: NaiveDateTime) -> ReportDocument {
    let body = match kind {
        ReportKind::RecentHires => {
            let recent = hired_within(employees, generated, RECENT_HIRE_WINDOW_DAYS);
            ReportBody::Table(employee_table(&recent))
        }
        ReportKind::TotalEmployees => {
            ReportBody::Chart(PieChart::headcount(HeadcountSplit::from_employees(employees)))
        }
    };

    ReportDocument {
        heading: kind.heading().to_string(),
        footer: footer_text(generated),
        body,
    }
}

fn employee_table(employees: &[Employee]) -> Table {
    let columns = vec![
        Column { title: "ID", width_mm: 15.0 },
        Column { title: "First Name", width_mm: 32.0 },
        Column { title: "Last Name", width_mm: 32.0 },
        Column { title: "Email", width_mm: 66.0 },
        Column { title: "Position", width_mm: 35.0 },
    ];

    let rows = employees
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.first_name.clone(),
                e.last_name.clone(),
                e.email.clone(),
                e.position.clone(),
            ]
        })
        .collect();

    Table { columns, rows }
}
