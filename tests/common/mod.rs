#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::test::TestRequest;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use hris::auth::{jwt::generate_access_token, password::hash_password};
use hris::config::{Config, JwtSettings};
use hris::model::employee::{Employee, EmployeeProfile};
use hris::repository::{EmployeeRepository, InMemoryEmployeeRepository, InMemoryReportRepository};

/// Builds the full application over the context's in-memory stores.
macro_rules! init_app {
    ($ctx:expr) => {{
        let ctx = &$ctx;
        let config = ctx.config.clone();
        let employees: std::sync::Arc<dyn hris::repository::EmployeeRepository> =
            ctx.employees.clone();
        let reports: std::sync::Arc<dyn hris::repository::ReportRepository> =
            ctx.reports.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::from(employees))
                .app_data(actix_web::web::Data::from(reports))
                .app_data(actix_web::web::Data::new(config.clone()))
                .configure(|cfg| hris::routes::configure(cfg, &config)),
        )
        .await
    }};
}

pub fn test_config() -> Config {
    Config {
        database_url: "mysql://unused".into(),
        server_addr: "127.0.0.1:0".into(),
        jwt: JwtSettings {
            secret: "integration-test-secret".into(),
            issuer: "hris-test".into(),
            audience: "hris-test-ui".into(),
            subject: "hris-test".into(),
            expire_minutes: 15,
        },
        ui_origin: "http://localhost:3000".into(),
        rate_login_per_min: 600,
        rate_protected_per_min: 6000,
        api_prefix: "/api".into(),
        bootstrap_admin: None,
        log_dir: "logs".into(),
        log_level: "info".into(),
    }
}

pub struct TestContext {
    pub config: Config,
    pub employees: Arc<InMemoryEmployeeRepository>,
    pub reports: Arc<InMemoryReportRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            config: test_config(),
            employees: Arc::new(InMemoryEmployeeRepository::new()),
            reports: Arc::new(InMemoryReportRepository::new()),
        }
    }

    pub async fn seed(
        &self,
        email: &str,
        password: &str,
        is_hr_admin: bool,
        date_of_hire: NaiveDate,
    ) -> Employee {
        let profile = EmployeeProfile {
            first_name: "Test".into(),
            last_name: "Person".into(),
            email: email.into(),
            phone_number: "8761234567".into(),
            position: "Analyst".into(),
            date_of_hire,
            salary: Decimal::new(350000, 2),
            is_hr_admin,
        };
        let hash = hash_password(password).unwrap();
        let id = self.employees.create(&profile, &hash).await.unwrap();
        self.employees.get(id).await.unwrap()
    }

    /// Seeds an HR admin and returns it with a valid token.
    pub async fn admin(&self) -> (Employee, String) {
        let admin = self
            .seed("admin@company.com", "adminpass", true, date(2020, 1, 1))
            .await;
        let token = self.token(&admin);
        (admin, token)
    }

    pub async fn regular(&self) -> (Employee, String) {
        let employee = self
            .seed("staff@company.com", "staffpass", false, date(2021, 1, 1))
            .await;
        let token = self.token(&employee);
        (employee, token)
    }

    pub fn token(&self, employee: &Employee) -> String {
        generate_access_token(employee, &self.config.jwt).unwrap()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn peer() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}

/// Requests carry a peer address so the per-IP rate limiter can key them.
pub fn get(uri: &str) -> TestRequest {
    TestRequest::get().uri(uri).peer_addr(peer())
}

pub fn post(uri: &str) -> TestRequest {
    TestRequest::post().uri(uri).peer_addr(peer())
}

pub fn put(uri: &str) -> TestRequest {
    TestRequest::put().uri(uri).peer_addr(peer())
}

pub fn delete(uri: &str) -> TestRequest {
    TestRequest::delete().uri(uri).peer_addr(peer())
}

pub fn bearer(req: TestRequest, token: &str) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {token}")))
}
