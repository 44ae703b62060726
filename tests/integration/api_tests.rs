//! API integration tests
//!
//! These run against a live server backed by Postgres and Redis:
//! `cargo test -- --ignored`. Administrator tests read
//! `TEST_ADMIN_EMAIL` / `TEST_ADMIN_PASSWORD`.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}

/// Sign up a fresh account and return its bearer token
async fn signup_and_login(client: &Client) -> String {
    let email = unique_email("tech");
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "correct-horse",
            "full_name": "Test Technician"
        }))
        .send()
        .await
        .expect("Failed to send signup request");
    assert_eq!(response.status(), StatusCode::CREATED);

    login(client, &email, "correct-horse").await
}

async fn login(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn create_equipment(client: &Client, token: &str, warranty_expiry: Option<&str>) -> Value {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(token)
        .json(&json!({
            "inventory_number": format!("INV-{}", &Uuid::new_v4().simple().to_string()[..8]),
            "equipment_name": "CT Scanner Room 2",
            "equipment_type": "CT",
            "warranty_expiry": warranty_expiry,
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_signup_login_and_me() {
    let client = Client::new();
    let token = signup_and_login(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["full_name"], "Test Technician");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "nobody@example.com",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_signup_conflicts() {
    let client = Client::new();
    let email = unique_email("dup");
    let body = json!({ "email": email, "password": "correct-horse" });

    let first = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_logout_revokes_session() {
    let client = Client::new();
    let token = signup_and_login(&client).await;

    let response = client
        .post(format!("{}/auth/logout", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_password_change_revokes_other_sessions() {
    let client = Client::new();
    let email = unique_email("rotate");
    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({ "email": email, "password": "correct-horse" }))
        .send()
        .await
        .expect("Failed to send signup request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let current = login(&client, &email, "correct-horse").await;
    let other = login(&client, &email, "correct-horse").await;

    let response = client
        .put(format!("{}/auth/password", BASE_URL))
        .bearer_auth(&current)
        .json(&json!({
            "current_password": "correct-horse",
            "new_password": "battery-staple"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&other)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .bearer_auth(&current)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_admin_created_account_must_change_password() {
    let (Ok(admin_email), Ok(admin_password)) = (
        std::env::var("TEST_ADMIN_EMAIL"),
        std::env::var("TEST_ADMIN_PASSWORD"),
    ) else {
        return;
    };
    let client = Client::new();
    let admin_token = login(&client, &admin_email, &admin_password).await;

    let email = unique_email("staff");
    let response = client
        .post(format!("{}/admin/users", BASE_URL))
        .bearer_auth(&admin_token)
        .json(&json!({ "email": email, "password": "temporary-pw" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let token = login(&client, &email, "temporary-pw").await;

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .put(format!("{}/auth/password", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "current_password": "temporary-pw",
            "new_password": "permanent-pw"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_non_admin_cannot_create_accounts() {
    let client = Client::new();
    let token = signup_and_login(&client).await;

    let response = client
        .post(format!("{}/admin/users", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "email": unique_email("x"), "password": "temporary-pw" }))
        .send()
        .await
        .expect("Failed to send request");

    // The very first account of an empty database is an administrator
    assert!(matches!(
        response.status(),
        StatusCode::FORBIDDEN | StatusCode::CREATED
    ));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_signups_promote_at_most_one_admin() {
    let client = Client::new();
    let mut signups = tokio::task::JoinSet::new();
    for _ in 0..6 {
        let client = client.clone();
        signups.spawn(async move { signup_and_login(&client).await });
    }

    let mut admins = 0;
    while let Some(token) = signups.join_next().await {
        let token = token.expect("Sign-up task panicked");
        let response = client
            .post(format!("{}/admin/users", BASE_URL))
            .bearer_auth(&token)
            .json(&json!({ "email": unique_email("race"), "password": "temporary-pw" }))
            .send()
            .await
            .expect("Failed to send request");
        if response.status() == StatusCode::CREATED {
            admins += 1;
        } else {
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }
    }
    assert!(admins <= 1, "{} sign-ups were promoted to administrator", admins);
}

#[tokio::test]
#[ignore]
async fn test_schedule_derivation_and_completion() {
    let client = Client::new();
    let token = signup_and_login(&client).await;
    let equipment = create_equipment(&client, &token, None).await;

    let response = client
        .post(format!("{}/schedules", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "equipment_id": equipment["equipment_id"],
            "maintenance_type": "Tube calibration",
            "frequency": "Monthly",
            "last_performed": "2024-01-31"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(schedule["next_due"], "2024-02-29");
    let id = schedule["schedule_id"].as_str().expect("schedule id");

    let response = client
        .get(format!("{}/schedules/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let details: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(details["status"], "overdue");

    let response = client
        .post(format!("{}/schedules/{}/complete", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({ "completed_on": "2024-03-15" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let advanced: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(advanced["last_performed"], "2024-03-15");
    assert_eq!(advanced["next_due"], "2024-04-15");
}

#[tokio::test]
#[ignore]
async fn test_as_needed_schedule_cannot_be_completed() {
    let client = Client::new();
    let token = signup_and_login(&client).await;
    let equipment = create_equipment(&client, &token, None).await;

    let response = client
        .post(format!("{}/schedules", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "equipment_id": equipment["equipment_id"],
            "maintenance_type": "Detector repair",
            "frequency": "As Needed",
            "next_due": "2030-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule: Value = response.json().await.expect("Failed to parse response");
    let id = schedule["schedule_id"].as_str().expect("schedule id");

    let response = client
        .post(format!("{}/schedules/{}/complete", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_malformed_completion_date_leaves_schedule_unchanged() {
    let client = Client::new();
    let token = signup_and_login(&client).await;
    let equipment = create_equipment(&client, &token, None).await;

    let response = client
        .post(format!("{}/schedules", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "equipment_id": equipment["equipment_id"],
            "maintenance_type": "Coil inspection",
            "frequency": "Quarterly",
            "last_performed": "2024-01-15"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let schedule: Value = response.json().await.expect("Failed to parse response");
    let id = schedule["schedule_id"].as_str().expect("schedule id");

    let response = client
        .post(format!("{}/schedules/{}/complete", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({ "completed_on": "2024-13-45" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Not JSON at all
    let response = client
        .post(format!("{}/schedules/{}/complete", BASE_URL, id))
        .bearer_auth(&token)
        .body("completed_on=2024-03-15")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("{}/schedules/{}", BASE_URL, id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let details: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(details["last_performed"], "2024-01-15");
    assert_eq!(details["next_due"], "2024-04-15");
}

#[tokio::test]
#[ignore]
async fn test_calendar_rejects_inverted_range() {
    let client = Client::new();
    let token = signup_and_login(&client).await;

    let response = client
        .get(format!(
            "{}/schedules/calendar?start=2024-05-01&end=2024-04-01",
            BASE_URL
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_alerts_include_overdue_schedule() {
    let client = Client::new();
    let token = signup_and_login(&client).await;
    let equipment = create_equipment(&client, &token, None).await;

    let response = client
        .post(format!("{}/schedules", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "equipment_id": equipment["equipment_id"],
            "maintenance_type": "Radiation safety check",
            "frequency": "Annual",
            "next_due": "2020-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");
    let schedule: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .get(format!("{}/alerts", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let alerts: Vec<Value> = response.json().await.expect("Failed to parse response");
    let expected_id = format!("overdue-{}", schedule["schedule_id"].as_str().unwrap_or_default());
    let alert = alerts
        .iter()
        .find(|a| a["id"] == expected_id.as_str())
        .expect("overdue alert present");
    assert_eq!(alert["severity"], "high");
    assert_eq!(alert["alert_type"], "overdue");
}

#[tokio::test]
#[ignore]
async fn test_work_order_lifecycle() {
    let client = Client::new();
    let token = signup_and_login(&client).await;
    let equipment = create_equipment(&client, &token, None).await;

    let response = client
        .post(format!("{}/work-orders", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "equipment_id": equipment["equipment_id"],
            "workorder_type": "Corrective",
            "priority": "High",
            "problem_description": "Gantry rotation noise",
            "requested_by": "Radiology desk"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let order: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(order["status"], "Open");
    assert!(order["workorder_number"]
        .as_str()
        .is_some_and(|n| n.starts_with("WO-")));

    let id = order["workorder_id"].as_str().expect("work order id");
    let response = client
        .put(format!("{}/work-orders/{}", BASE_URL, id))
        .bearer_auth(&token)
        .json(&json!({
            "status": "Completed",
            "labor_cost": "120.00",
            "parts_cost": "30.50"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["total_cost"], "150.50");
    assert!(updated["completion_date"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_dashboard_counters() {
    let client = Client::new();
    let token = signup_and_login(&client).await;

    let response = client
        .get(format!("{}/dashboard", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["active_equipment"].is_number());
    assert!(body["overdue_schedules"].is_number());
    assert!(body["recent_work_orders"].as_array().is_some_and(|r| r.len() <= 5));
}

#[tokio::test]
#[ignore]
async fn test_parts_usage_csv_export() {
    let client = Client::new();
    let token = signup_and_login(&client).await;

    let response = client
        .get(format!("{}/reports/parts-usage?format=csv", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = response.text().await.expect("Failed to read body");
    assert!(body.starts_with("\"Part Number\",\"Part Name\""));
}

#[tokio::test]
#[ignore]
async fn test_equipment_detail_and_parts_carry_joined_names() {
    let client = Client::new();
    let token = signup_and_login(&client).await;
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_string();

    let response = client
        .post(format!("{}/manufacturers", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "manufacturer_code": format!("M{}", suffix), "manufacturer_name": "Siemens Healthineers" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let manufacturer: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .post(format!("{}/customers", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "customer_code": format!("C{}", suffix), "customer_name": "General Hospital" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let customer: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .post(format!("{}/customers/{}/locations", BASE_URL, customer["customer_id"]))
        .bearer_auth(&token)
        .json(&json!({ "department_name": "Interventional Radiology" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let location: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "inventory_number": format!("INV-{}", suffix),
            "equipment_name": "Angiography Suite",
            "equipment_type": "X-Ray",
            "manufacturer_id": manufacturer["manufacturer_id"],
            "location_id": location["location_id"],
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let equipment: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment["equipment_id"].as_str().expect("id")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    let detail: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(detail["manufacturer_name"], "Siemens Healthineers");
    assert_eq!(detail["department_name"], "Interventional Radiology");

    let category = format!("Detectors {}", suffix);
    let response = client
        .post(format!("{}/parts", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "part_number": format!("P-{}", suffix),
            "part_name": "Flat panel detector",
            "manufacturer_id": manufacturer["manufacturer_id"],
            "category": category,
            "current_stock": 2
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .get(format!("{}/parts/categories", BASE_URL))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let categories: Vec<String> = response.json().await.expect("Failed to parse response");
    assert!(categories.contains(&category));

    let response = client
        .get(format!("{}/parts", BASE_URL))
        .bearer_auth(&token)
        .query(&[("category", category.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    let parts: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0]["manufacturer_name"], "Siemens Healthineers");
}
