#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{Value, json};

use common::{TestContext, bearer, date, delete, get, post, put};
use hris::repository::EmployeeRepository;

fn new_hire(email: &str) -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "email": email,
        "phoneNumber": "8761234567",
        "position": "Clerk",
        "dateOfHire": "2024-03-01T00:00:00",
        "salary": 1500.5,
        "isHRAdmin": false
    })
}

#[actix_web::test]
async fn create_returns_generated_password_that_logs_in() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let req = bearer(post("/api/employee"), &token)
        .set_json(new_hire("b@x.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isSuccess"], true);
    let password = body["message"]
        .as_str()
        .and_then(|m| m.strip_prefix("Password: "))
        .unwrap()
        .to_string();
    assert_eq!(password.len(), 7);

    let stored = ctx.employees.find_by_email("b@x.com").await.unwrap().unwrap();
    assert_eq!(stored.employee.date_of_hire, date(2024, 3, 1));

    let req = post("/api/authenticate")
        .set_json(json!({ "username": "b@x.com", "password": password }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn create_with_blank_password_still_generates_one() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let mut body = new_hire("blank@x.com");
    body["password"] = json!("");
    let req = bearer(post("/api/employee"), &token)
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let password = body["message"]
        .as_str()
        .and_then(|m| m.strip_prefix("Password: "))
        .unwrap()
        .to_string();

    let req = post("/api/authenticate")
        .set_json(json!({ "username": "blank@x.com", "password": password }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn email_uniqueness_ignores_case() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let req = bearer(post("/api/employee"), &token)
        .set_json(new_hire("ADMIN@company.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(ctx.employees.count().await.unwrap(), 1);
}

#[actix_web::test]
async fn malformed_json_body_uses_error_envelope() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let mut body = new_hire("d@x.com");
    body["dateOfHire"] = json!("yesterday");
    let req = bearer(post("/api/employee"), &token)
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isSuccess"], false);
    assert!(body["message"].as_str().unwrap().contains("dateOfHire"));

    let mut body = new_hire("e@x.com");
    body.as_object_mut().unwrap().remove("firstName");
    let req = bearer(post("/api/employee"), &token)
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["isSuccess"], false);
    assert_eq!(ctx.employees.count().await.unwrap(), 1);
}

#[actix_web::test]
async fn duplicate_email_is_500_and_store_unchanged() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let req = bearer(post("/api/employee"), &token)
        .set_json(new_hire("admin@company.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee with that email already exists");
    assert_eq!(ctx.employees.count().await.unwrap(), 1);
}

#[actix_web::test]
async fn invalid_body_is_400() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let mut body = new_hire("c@x.com");
    body["phoneNumber"] = json!("555-1234");
    body["salary"] = json!(0);
    let req = bearer(post("/api/employee"), &token)
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.employees.count().await.unwrap(), 1);
}

#[actix_web::test]
async fn get_unknown_employee_is_404() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let req = bearer(get("/api/employee/999"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Employee with id 999 does not exist");
}

#[actix_web::test]
async fn list_returns_every_employee() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    ctx.regular().await;
    let app = init_app!(ctx);

    let req = bearer(get("/api/employee/all"), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|e| e.get("passwordHash").is_none()));
}

#[actix_web::test]
async fn update_with_mismatched_id_is_400_and_store_unchanged() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let (staff, _) = ctx.regular().await;
    let app = init_app!(ctx);

    let mut body = new_hire("changed@x.com");
    body["id"] = json!(staff.id + 100);
    let req = bearer(put(&format!("/api/employee/{}", staff.id)), &token)
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(ctx.employees.get(staff.id).await.unwrap(), staff);
}

#[actix_web::test]
async fn update_of_unknown_employee_is_404() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let mut body = new_hire("ghost@x.com");
    body["id"] = json!(42);
    let req = bearer(put("/api/employee/42"), &token)
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_replaces_fields_and_optional_password() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let (staff, _) = ctx.regular().await;
    let app = init_app!(ctx);

    let mut body = new_hire("staff@company.com");
    body["id"] = json!(staff.id);
    body["position"] = json!("Senior Clerk");
    let req = bearer(put(&format!("/api/employee/{}", staff.id)), &token)
        .set_json(body.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated = ctx.employees.get(staff.id).await.unwrap();
    assert_eq!(updated.position, "Senior Clerk");
    assert_eq!(updated.first_name, "Ann");

    // Old password still works when none was supplied.
    let req = post("/api/authenticate")
        .set_json(json!({ "username": "staff@company.com", "password": "staffpass" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    body["password"] = json!("brandnew1");
    let req = bearer(put(&format!("/api/employee/{}", staff.id)), &token)
        .set_json(body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = post("/api/authenticate")
        .set_json(json!({ "username": "staff@company.com", "password": "brandnew1" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn delete_removes_employee() {
    let ctx = TestContext::new();
    let (_, token) = ctx.admin().await;
    let (staff, _) = ctx.regular().await;
    let app = init_app!(ctx);

    let req = bearer(delete(&format!("/api/employee/{}", staff.id)), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Successfully deleted employee");
    assert_eq!(ctx.employees.count().await.unwrap(), 1);

    let req = bearer(delete(&format!("/api/employee/{}", staff.id)), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn admin_cannot_delete_own_account() {
    let ctx = TestContext::new();
    let (admin, token) = ctx.admin().await;
    let app = init_app!(ctx);

    let req = bearer(delete(&format!("/api/employee/{}", admin.id)), &token).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.employees.count().await.unwrap(), 1);
}
