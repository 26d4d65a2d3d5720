#[macro_use]
mod common;

use actix_web::{dev::ServiceResponse, http::StatusCode, http::header, test};
use chrono::{Local, NaiveDate};
use serde_json::Value;

use common::{TestContext, bearer, date, get};
use hris::repository::ReportRepository;

fn disposition<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn total_employees_returns_pdf_and_stores_it() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    ctx.regular().await;
    let app = init_app!(ctx);

    let req = bearer(get("/api/report/TotalEmployees"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let cd = disposition(&resp);
    assert!(cd.starts_with("attachment"));
    assert!(cd.contains("TotalEmployees_"));
    assert!(cd.contains(".pdf"));
    assert!(!cd.contains(':') && !cd.contains('/'));

    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"%PDF"));

    let stored = ctx.reports.list().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].title.starts_with("TotalEmployees_"));
}

#[actix_web::test]
async fn recent_hires_report_round_trips_through_the_store() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let today = Local::now().date_naive();
    ctx.seed("new@x.com", "newhire1", false, today).await;
    let app = init_app!(ctx);

    let req = bearer(get("/api/report/EmployeesHiredWithinLast30Days"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(disposition(&resp).contains("EmployeesHiredWithinLast30Days_"));
    let generated = test::read_body(resp).await;

    let req = bearer(get("/api/report/all"), &token).to_request();
    let listing: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listing.len(), 1);
    let id = listing[0]["id"].as_str().unwrap().to_string();
    assert!(listing[0].get("bytes").is_none());

    let req = bearer(get(&format!("/api/report/{id}")), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let downloaded = test::read_body(resp).await;
    assert_eq!(downloaded, generated);
}

#[actix_web::test]
async fn listing_is_newest_first() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let at = |d: NaiveDate| d.and_hms_opt(9, 0, 0).unwrap();
    ctx.reports
        .save(b"%PDF-a", "older", at(date(2024, 1, 1)))
        .await
        .unwrap();
    ctx.reports
        .save(b"%PDF-b", "newest", at(date(2024, 6, 1)))
        .await
        .unwrap();
    ctx.reports
        .save(b"%PDF-c", "middle", at(date(2024, 3, 1)))
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = bearer(get("/api/report/all"), &token).to_request();
    let listing: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = listing
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["newest", "middle", "older"]);
}

#[actix_web::test]
async fn malformed_report_id_is_400() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let req = bearer(get("/api/report/not-a-uuid"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_report_id_is_404() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let req = bearer(
        get("/api/report/3f2b8c1e-9d4a-4b7e-8f00-123456789abc"),
        &token,
    )
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn reports_are_admin_only() {
    let ctx = TestContext::new();
    let (_, token) = ctx.regular().await;
    let app = init_app!(ctx);

    for uri in [
        "/api/report/all",
        "/api/report/TotalEmployees",
        "/api/report/EmployeesHiredWithinLast30Days",
    ] {
        let req = bearer(get(uri), &token).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
    }
    assert!(ctx.reports.list().await.unwrap().is_empty());
}
