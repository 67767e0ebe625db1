//! API integration tests against a running server and database.
//!
//! Run with: cargo test -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Suffix keeping unique columns distinct between runs
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}{}", prefix, nanos % 10_000_000_000)
}

const STAFF_PASSWORD: &str = "integration-password";

/// Register a fresh staff account and return its bearer token
async fn get_auth_token(client: &Client) -> String {
    register_staff(client).await.1
}

/// Register and log in a fresh staff account, returning (username, token)
async fn register_staff(client: &Client) -> (String, String) {
    let username = unique("staff");
    let password = STAFF_PASSWORD;

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password,
            "email": format!("{}@example.org", username),
            "lastname": "Tester",
            "firstname": "Integration"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().expect("No token in response").to_string();
    (username, token)
}

async fn post(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get(client: &Client, token: &str, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn patch(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .patch(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn delete(client: &Client, token: &str, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

/// Id of the seeded "standard" member type
async fn standard_member_type(client: &Client, token: &str) -> i64 {
    let (_, types) = get(client, token, "/member-types").await;
    types
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "standard")
        .expect("standard member type is seeded")["id"]
        .as_i64()
        .unwrap()
}

async fn create_member(client: &Client, token: &str) -> Value {
    let member_type_id = standard_member_type(client, token).await;
    create_member_of_type(client, token, member_type_id).await
}

async fn create_member_of_type(client: &Client, token: &str, member_type_id: i64) -> Value {
    let (status, member) = post(
        client,
        token,
        "/members",
        json!({
            "lastname": "Durand",
            "firstname": "Alice",
            "email": format!("{}@example.org", unique("member")),
            "member_type_id": member_type_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    member
}

/// Category, publisher, document, location and one available copy
async fn create_copy(client: &Client, token: &str) -> Value {
    let (_, category) = post(client, token, "/categories", json!({ "name": unique("Novels ") })).await;
    let (_, publisher) = post(client, token, "/publishers", json!({ "name": unique("Gallimard ") })).await;
    let (_, author) = post(client, token, "/authors", json!({ "lastname": unique("Camus"), "firstname": "Albert" })).await;
    let (status, document) = post(
        client,
        token,
        "/documents",
        json!({
            "title": "L'Etranger",
            "publication_year": 1942,
            "category_id": category["id"],
            "publisher_id": publisher["id"],
            "author_ids": [author["id"]]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(document["author_ids"], json!([author["id"]]));

    let (_, location) = post(client, token, "/locations", json!({ "shelf_code": unique("A-") })).await;
    let (status, copy) = post(
        client,
        token,
        "/copies",
        json!({
            "inventory_number": unique("INV-"),
            "condition": "good",
            "location_id": location["id"],
            "document_id": document["id"]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(copy["status"], "available");
    copy
}

#[tokio::test]
#[ignore]
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
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "nobody-by-this-name",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_member_create_then_read_then_delete() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let id = member["id"].as_i64().unwrap();
    assert_eq!(member["member_type_name"], "standard");
    assert_eq!(member["is_active"], true);

    let (status, fetched) = get(&client, &token, &format!("/members/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], member["email"]);

    assert_eq!(delete(&client, &token, &format!("/members/{}", id)).await, StatusCode::OK);
    let (status, _) = get(&client, &token, &format!("/members/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_member_email_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let (status, body) = post(
        &client,
        &token,
        "/members",
        json!({
            "lastname": "Martin",
            "firstname": "Bob",
            "email": member["email"],
            "member_type_id": member["member_type_id"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Email"));
}

#[tokio::test]
#[ignore]
async fn test_unknown_member_type_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, _) = post(
        &client,
        &token,
        "/members",
        json!({
            "lastname": "Martin",
            "firstname": "Bob",
            "email": format!("{}@example.org", unique("member")),
            "member_type_id": 987654
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_document_with_unknown_author_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (_, category) = post(&client, &token, "/categories", json!({ "name": unique("Essays ") })).await;
    let (_, publisher) = post(&client, &token, "/publishers", json!({ "name": unique("Seuil ") })).await;

    let (status, _) = post(
        &client,
        &token,
        "/documents",
        json!({
            "title": "Nowhere",
            "category_id": category["id"],
            "publisher_id": publisher["id"],
            "author_ids": [987654]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_category_cycle_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (_, parent) = post(&client, &token, "/categories", json!({ "name": unique("Science ") })).await;
    let (_, child) = post(
        &client,
        &token,
        "/categories",
        json!({ "name": unique("Physics "), "parent_id": parent["id"] }),
    )
    .await;

    let (_, children) = get(&client, &token, &format!("/categories/{}/children", parent["id"])).await;
    assert_eq!(children.as_array().unwrap().len(), 1);

    let response = client
        .patch(format!("{}/categories/{}", BASE_URL, parent["id"]))
        .bearer_auth(&token)
        .json(&json!({ "parent_id": child["id"] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_loan_and_return_cycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let copy = create_copy(&client, &token).await;

    let (status, loan) = post(
        &client,
        &token,
        "/loans",
        json!({ "member_id": member["id"], "copy_id": copy["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(loan["returned_date"].is_null());

    let (_, lent_copy) = get(&client, &token, &format!("/copies/{}", copy["id"])).await;
    assert_eq!(lent_copy["status"], "on_loan");

    // the same copy cannot be lent twice
    let (status, _) = post(
        &client,
        &token,
        "/loans",
        json!({ "member_id": member["id"], "copy_id": copy["id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, outcome) = post(&client, &token, &format!("/loans/{}/return", loan["id"]), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(outcome["loan"]["returned_date"].is_string());
    assert!(outcome["penalty_id"].is_null());

    let (status, _) = post(&client, &token, &format!("/loans/{}/return", loan["id"]), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, member_loans) = get(&client, &token, &format!("/members/{}/loans", member["id"])).await;
    assert_eq!(member_loans.as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_late_return_creates_penalty() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let copy = create_copy(&client, &token).await;

    let (status, loan) = post(
        &client,
        &token,
        "/loans",
        json!({
            "member_id": member["id"],
            "copy_id": copy["id"],
            "loan_date": "2024-01-01T10:00:00Z",
            "due_date": "2024-01-10T10:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, outcome) = post(&client, &token, &format!("/loans/{}/return", loan["id"]), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let penalty_id = outcome["penalty_id"].as_i64().expect("late return records a penalty");

    let (_, penalty) = get(&client, &token, &format!("/penalties/{}", penalty_id)).await;
    assert_eq!(penalty["reason"], "late_return");
    assert_eq!(penalty["status"], "unpaid");
    assert_eq!(penalty["member_id"], member["id"]);
}

#[tokio::test]
#[ignore]
async fn test_penalty_overpayment_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let (status, _) = post(
        &client,
        &token,
        "/penalties",
        json!({
            "member_id": member["id"],
            "amount_due": "2.00",
            "amount_paid": "5.00",
            "reason": "damaged"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_refresh_and_logout() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, body) = post(&client, &token, "/auth/refresh", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    let refreshed = body["access_token"].as_str().expect("No token in response");

    let (status, me) = get(&client, refreshed, "/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["is_active"], true);

    let (status, _) = post(&client, refreshed, "/auth/logout", json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_deactivated_user_is_rejected() {
    let client = Client::new();
    let admin_token = get_auth_token(&client).await;
    let (username, token) = register_staff(&client).await;

    let (_, me) = get(&client, &token, "/auth/me").await;
    let (status, _) = patch(
        &client,
        &admin_token,
        &format!("/users/{}", me["id"]),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // the still-valid token no longer grants access
    let (status, body) = get(&client, &token, "/auth/me").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Inactive user account");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": STAFF_PASSWORD }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_loan_limit_enforced() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, member_type) = post(
        &client,
        &token,
        "/member-types",
        json!({
            "name": unique("single "),
            "max_loans": 1,
            "loan_duration_days": 7,
            "daily_penalty_rate": "0.10"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let member = create_member_of_type(&client, &token, member_type["id"].as_i64().unwrap()).await;
    let first = create_copy(&client, &token).await;
    let second = create_copy(&client, &token).await;

    let (status, _) = post(&client, &token, "/loans", json!({ "member_id": member["id"], "copy_id": first["id"] })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&client, &token, "/loans", json!({ "member_id": member["id"], "copy_id": second["id"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Maximum loans"));

    let (_, untouched) = get(&client, &token, &format!("/copies/{}", second["id"])).await;
    assert_eq!(untouched["status"], "available");
}

#[tokio::test]
#[ignore]
async fn test_inactive_member_cannot_borrow() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let copy = create_copy(&client, &token).await;

    let (status, _) = patch(
        &client,
        &token,
        &format!("/members/{}", member["id"]),
        json!({ "is_active": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(&client, &token, "/loans", json!({ "member_id": member["id"], "copy_id": copy["id"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_out_of_range_numbers_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, _) = post(
        &client,
        &token,
        "/member-types",
        json!({
            "name": unique("lavish "),
            "max_loans": 2,
            "loan_duration_days": 14,
            "daily_penalty_rate": "100"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &client,
        &token,
        "/member-types",
        json!({
            "name": unique("forever "),
            "max_loans": 2,
            "loan_duration_days": 2147483647,
            "daily_penalty_rate": "0.10"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let member = create_member(&client, &token).await;
    let (status, _) = post(
        &client,
        &token,
        "/penalties",
        json!({ "member_id": member["id"], "amount_due": "10000", "reason": "damaged" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_long_overdue_return_caps_penalty() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let copy = create_copy(&client, &token).await;

    let (status, loan) = post(
        &client,
        &token,
        "/loans",
        json!({
            "member_id": member["id"],
            "copy_id": copy["id"],
            "loan_date": "1900-01-01T10:00:00Z",
            "due_date": "1900-01-15T10:00:00Z"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, outcome) = post(&client, &token, &format!("/loans/{}/return", loan["id"]), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, penalty) = get(&client, &token, &format!("/penalties/{}", outcome["penalty_id"])).await;
    assert_eq!(penalty["amount_due"], "9999.99");
}

#[tokio::test]
#[ignore]
async fn test_reservation_update_stamps_modification() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let member = create_member(&client, &token).await;
    let copy = create_copy(&client, &token).await;

    let (status, reservation) = post(
        &client,
        &token,
        "/reservations",
        json!({ "member_id": member["id"], "document_id": copy["document_id"] }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(reservation["modif_date"].is_null());

    let (status, updated) = patch(
        &client,
        &token,
        &format!("/reservations/{}", reservation["id"]),
        json!({ "status": "ready" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["modif_date"].is_string());
}
