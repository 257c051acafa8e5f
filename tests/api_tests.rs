//! API integration tests
//!
//! These tests expect a running server with a migrated database and an
//! `admin`/`admin` account. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an admin access token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["access_token"]
        .as_str()
        .expect("No access token in response")
        .to_string()
}

/// Log in with arbitrary credentials, returning the access token
async fn login_as(client: &Client, username: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["access_token"]
        .as_str()
        .expect("No access token in response")
        .to_string()
}

/// Unique suffix so repeated runs do not collide on unique columns
fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

/// Create a genre, a shelf and a book with the given number of copies.
/// Returns the book ID.
async fn create_book(client: &Client, token: &str, copies: i32) -> i64 {
    let suffix = unique_suffix();

    let genre: Value = client
        .post(format!("{}/genres", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": format!("Genre {}", suffix) }))
        .send()
        .await
        .expect("Failed to create genre")
        .json()
        .await
        .expect("Failed to parse genre");

    let shelf: Value = client
        .post(format!("{}/shelves", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "code": format!("T-{}", suffix % 1_000_000_000),
            "location": "Test wing",
            "capacity": 100
        }))
        .send()
        .await
        .expect("Failed to create shelf")
        .json()
        .await
        .expect("Failed to parse shelf");

    let book: Value = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": format!("Test Book {}", suffix),
            "author": "Test Author",
            "isbn": format!("{:013}", suffix % 10_000_000_000_000),
            "genre_id": genre["id"],
            "shelf_id": shelf["id"],
            "available_copies": copies
        }))
        .send()
        .await
        .expect("Failed to create book")
        .json()
        .await
        .expect("Failed to parse book");

    book["id"].as_i64().expect("No book ID")
}

/// Register a fresh borrower account. Returns the user ID.
async fn create_borrower(client: &Client, token: &str) -> i64 {
    let suffix = unique_suffix();

    let user: Value = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "username": format!("borrower{}", suffix),
            "email": format!("borrower{}@example.com", suffix),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to create user")
        .json()
        .await
        .expect("Failed to parse user");

    user["id"].as_i64().expect("No user ID")
}

async fn get_book(client: &Client, token: &str, book_id: i64) -> Value {
    client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse book")
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
async fn test_register_and_login() {
    let client = Client::new();
    let suffix = unique_suffix();

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": format!("reader{}", suffix),
            "email": format!("reader{}@example.com", suffix),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": format!("reader{}", suffix),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_loan_decrements_and_return_increments_copies() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 3).await;
    let user_id = create_borrower(&client, &token).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create loan");
    assert_eq!(response.status(), 201);

    let loan: Value = response.json().await.expect("Failed to parse loan");
    assert_eq!(loan["status"], "active");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let book = get_book(&client, &token, book_id).await;
    assert_eq!(book["available_copies"], 2);

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to return loan");
    assert!(response.status().is_success());

    let returned: Value = response.json().await.expect("Failed to parse loan");
    assert_eq!(returned["status"], "returned");

    let book = get_book(&client, &token, book_id).await;
    assert_eq!(book["available_copies"], 3);
}

#[tokio::test]
#[ignore]
async fn test_loan_rejected_when_no_copies() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 0).await;
    let user_id = create_borrower(&client, &token).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    // The failed attempt must not touch the copy count
    let book = get_book(&client, &token, book_id).await;
    assert_eq!(book["available_copies"], 0);
}

#[tokio::test]
#[ignore]
async fn test_double_return_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    let loan: Value = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create loan")
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to return loan");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send second return");
    assert_eq!(response.status(), 422);

    // The copy must be freed exactly once
    let book = get_book(&client, &token, book_id).await;
    assert_eq!(book["available_copies"], 1);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_open_loan_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 5).await;
    let user_id = create_borrower(&client, &token).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create loan");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send duplicate loan");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_active_loan_limit_frees_up_after_return() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let user_id = create_borrower(&client, &token).await;

    // Fill the borrower's quota of 5 active loans
    let mut first_loan_id = None;
    for _ in 0..5 {
        let book_id = create_book(&client, &token, 1).await;
        let response = client
            .post(format!("{}/loans", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "user_id": user_id, "book_id": book_id }))
            .send()
            .await
            .expect("Failed to create loan");
        assert_eq!(response.status(), 201);

        let loan: Value = response.json().await.expect("Failed to parse loan");
        first_loan_id.get_or_insert(loan["id"].as_i64().expect("No loan ID"));
    }

    // The sixth loan is over the limit
    let extra_book = create_book(&client, &token, 1).await;
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": extra_book }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Returning one frees a slot
    let response = client
        .post(format!(
            "{}/loans/{}/return",
            BASE_URL,
            first_loan_id.unwrap()
        ))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to return loan");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": extra_book }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_read_persists_overdue_state() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    // Loan that was due ten days ago
    let due = chrono::Utc::now() - chrono::Duration::days(10);
    let loan: Value = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "user_id": user_id,
            "book_id": book_id,
            "due_date": due.to_rfc3339()
        }))
        .send()
        .await
        .expect("Failed to create loan")
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    // Reading the loan flips it to overdue with the fine computed
    let fetched: Value = client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get loan")
        .json()
        .await
        .expect("Failed to parse loan");

    assert_eq!(fetched["status"], "overdue");
    assert_eq!(fetched["overdue_days"], 10);
    assert_eq!(fetched["fine"].as_str(), Some("20.00"));

    // Renewal is no longer possible
    let new_due = chrono::Utc::now() + chrono::Duration::days(15);
    let response = client
        .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "due_date": new_due.to_rfc3339() }))
        .send()
        .await
        .expect("Failed to send renew request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_renewal_cap() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    let loan: Value = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create loan")
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    // Two renewals are allowed
    for i in 1..=2 {
        let new_due = chrono::Utc::now() + chrono::Duration::days(15 * (i + 1));
        let response = client
            .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "due_date": new_due.to_rfc3339() }))
            .send()
            .await
            .expect("Failed to renew loan");
        assert!(response.status().is_success());

        let renewed: Value = response.json().await.expect("Failed to parse loan");
        assert_eq!(renewed["status"], "renewed");
        assert_eq!(renewed["renewal_count"], i);
    }

    // The third is over the cap
    let new_due = chrono::Utc::now() + chrono::Duration::days(60);
    let response = client
        .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "due_date": new_due.to_rfc3339() }))
        .send()
        .await
        .expect("Failed to send renew request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_sweep_overdue_is_idempotent() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    let due = chrono::Utc::now() - chrono::Duration::days(3);
    client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "user_id": user_id,
            "book_id": book_id,
            "due_date": due.to_rfc3339()
        }))
        .send()
        .await
        .expect("Failed to create loan");

    let first: Value = client
        .post(format!("{}/loans/sweep-overdue", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to sweep")
        .json()
        .await
        .expect("Failed to parse sweep response");
    assert!(first["updated"].as_u64().unwrap() >= 1);

    // A second immediate sweep finds nothing left to flip
    let second: Value = client
        .post(format!("{}/loans/sweep-overdue", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to sweep")
        .json()
        .await
        .expect("Failed to parse sweep response");
    assert_eq!(second["updated"], 0);
}

#[tokio::test]
#[ignore]
async fn test_borrower_with_overdue_loan_cannot_borrow() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    let due = chrono::Utc::now() - chrono::Duration::days(1);
    let loan: Value = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "user_id": user_id,
            "book_id": book_id,
            "due_date": due.to_rfc3339()
        }))
        .send()
        .await
        .expect("Failed to create loan")
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    // Flip the loan to overdue
    client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get loan");

    let other_book = create_book(&client, &token, 1).await;
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": other_book }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_open_loan_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    let loan: Value = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create loan")
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    // Open loans still hold a copy
    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), 422);

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to return loan");
    assert!(response.status().is_success());

    // Once returned, the record can go
    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete loan");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get loan");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_inactive_borrower_cannot_borrow() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    let response = client
        .put(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "active": false }))
        .send()
        .await
        .expect("Failed to deactivate user");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send loan request");
    assert_eq!(response.status(), 422);

    // The rejected attempt must not touch the copy count
    let book = get_book(&client, &token, book_id).await;
    assert_eq!(book["available_copies"], 1);
}

#[tokio::test]
#[ignore]
async fn test_user_with_loan_history_is_deactivated_not_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    let loan: Value = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create loan")
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    // An open loan blocks removal outright
    let response = client
        .delete(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(response.status(), 409);

    client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to return loan");

    // With history but no open loans, deletion deactivates instead
    let response = client
        .delete(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete user");
    assert_eq!(response.status(), 204);

    let user: Value = client
        .get(format!("{}/users/{}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get user")
        .json()
        .await
        .expect("Failed to parse user");
    assert_eq!(user["active"], false);
}

#[tokio::test]
#[ignore]
async fn test_rejected_read_leaves_loan_untouched() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;
    let user_id = create_borrower(&client, &token).await;

    // A second account that does not own the loan
    let suffix = unique_suffix();
    let username = format!("onlooker{}", suffix);
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(response.status(), 201);
    let other_token = login_as(&client, &username, "password123").await;

    // Loan already past due
    let due = chrono::Utc::now() - chrono::Duration::days(2);
    let loan: Value = client
        .post(format!("{}/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "user_id": user_id,
            "book_id": book_id,
            "due_date": due.to_rfc3339()
        }))
        .send()
        .await
        .expect("Failed to create loan")
        .json()
        .await
        .expect("Failed to parse loan");
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let response = client
        .get(format!("{}/loans/{}", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", other_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // The refused read must not have persisted the overdue transition
    let list: Value = client
        .get(format!("{}/loans?user_id={}", BASE_URL, user_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to list loans")
        .json()
        .await
        .expect("Failed to parse loans");
    assert_eq!(list["items"][0]["status"], "active");
    assert_eq!(list["items"][0]["fine"].as_str(), Some("0.00"));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_review_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let book_id = create_book(&client, &token, 1).await;

    let response = client
        .post(format!("{}/reviews", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "book_id": book_id, "rating": 4, "comment": "Solid read" }))
        .send()
        .await
        .expect("Failed to create review");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/reviews", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "book_id": book_id, "rating": 5 }))
        .send()
        .await
        .expect("Failed to send duplicate review");
    assert_eq!(response.status(), 409);

    let rating: Value = client
        .get(format!("{}/books/{}/rating", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get rating")
        .json()
        .await
        .expect("Failed to parse rating");
    assert_eq!(rating["review_count"], 1);
    assert_eq!(rating["average_rating"], 4.0);
}

#[tokio::test]
#[ignore]
async fn test_global_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get stats");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse stats");
    assert!(body["users"]["total"].is_number());
    assert!(body["books"]["total"].is_number());
    assert!(body["loans"]["total"].is_number());
}
