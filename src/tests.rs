//! Integration tests for the mock banking backend.

use std::path::PathBuf;

use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::{Config, LogFormat};
use crate::errors::ErrorStyle;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    state: AppState,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_options(ErrorStyle::Coded, false, false).await
    }

    async fn with_options(style: ErrorStyle, portal_gate: bool, password_file: bool) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let password_file: Option<PathBuf> =
            password_file.then(|| temp_dir.path().join("secrets").join("password.txt"));

        // Create config
        let config = Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
            password_file,
            error_style: style,
            portal_requires_headers: portal_gate,
        };

        let state = AppState::build(config).await.expect("Failed to build state");
        let app = create_router(state.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            state,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach all five session headers.
    fn session(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("channelCode", "WEB")
            .header("username", "lucy")
            .header("lang", "en")
            .header("countryCode", "NL")
            .header("sessionId", "session-1")
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self
            .session(self.client.get(self.url(path)))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

fn without_timestamp(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.remove("timestamp");
    }
    body
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

// ==================== SESSION HEADERS ====================

#[tokio::test]
async fn test_banking_route_without_headers() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/customer/messages/list/CUST001"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 495);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "495");
    assert_eq!(body["error"]["message"], "Session Id is required");
    let description = body["error"]["description"].as_str().unwrap();
    for name in ["channelCode", "username", "lang", "countryCode", "sessionId"] {
        assert!(description.contains(name), "{} not listed", name);
    }
}

#[tokio::test]
async fn test_each_session_header_is_required() {
    let fixture = TestFixture::new().await;
    let headers = [
        ("channelCode", "WEB"),
        ("username", "lucy"),
        ("lang", "en"),
        ("countryCode", "NL"),
        ("sessionId", "session-1"),
    ];

    for skipped in 0..headers.len() {
        let mut request = fixture
            .client
            .get(fixture.url("/customer/messages/unread/CUST001"));
        for (i, (name, value)) in headers.iter().enumerate() {
            // A blank value counts as missing
            let value = if i == skipped { "  " } else { value };
            request = request.header(*name, value);
        }

        let resp = request.send().await.unwrap();
        assert_eq!(resp.status(), 495);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(
            body["error"]["description"],
            format!("Missing required headers: {}", headers[skipped].0)
        );
    }
}

#[tokio::test]
async fn test_legacy_error_style() {
    let fixture = TestFixture::with_options(ErrorStyle::Legacy, false, false).await;

    let resp = fixture
        .client
        .get(fixture.url("/accounts/list/CUST001"))
        .header("sessionId", "session-1")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 495);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Missing required headers: channelCode"));

    let (status, body) = fixture.get_json("/api/account/by-iban?iban=NL00XXXX0000").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Account not found for IBAN: NL00XXXX0000");
}

#[tokio::test]
async fn test_portal_open_by_default() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/chart-data"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_portal_gate_when_enabled() {
    let fixture = TestFixture::with_options(ErrorStyle::Coded, true, false).await;

    let resp = fixture
        .client
        .get(fixture.url("/api/chart-data"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 495);

    let (status, body) = fixture.get_json("/api/chart-data").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    // Health stays open
    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

// ==================== REFERENCE DATA ====================

#[tokio::test]
async fn test_dashboard() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/dashboard").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["accounts"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["chart_data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["combispaar"]["count"], 8);
    assert!(body["data"]["user_info"]["name"].is_string());
}

#[tokio::test]
async fn test_combispaar_totals() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/combispaar").await;
    assert_eq!(status, 200);
    let accounts = body["data"].as_array().unwrap();
    assert_eq!(body["count"], accounts.len());
    let sum: f64 = accounts
        .iter()
        .map(|a| a["balance"].as_f64().unwrap())
        .sum();
    assert!((body["total_balance"].as_f64().unwrap() - sum).abs() < 1e-6);
}

#[tokio::test]
async fn test_reference_data_is_stable() {
    let fixture = TestFixture::new().await;

    for path in [
        "/api/chart-data",
        "/api/combispaar/account-options",
        "/api/maxispaar/page-data",
        "/api/user",
    ] {
        let (_, first) = fixture.get_json(path).await;
        let (_, second) = fixture.get_json(path).await;
        assert_eq!(without_timestamp(first), without_timestamp(second), "{}", path);
    }
}

#[tokio::test]
async fn test_verification_code_is_six_digits() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/verification/send-code").await;
    assert_eq!(status, 200);
    let code = body["data"]["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_account_by_iban() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .get_json("/api/account/by-iban?iban=nl24dhbn2018470578")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let (status, body) = fixture.get_json("/api/account/by-iban?iban=NL00XXXX0000").await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "404");
    assert_eq!(
        body["error"]["description"],
        "Account not found for IBAN: NL00XXXX0000"
    );
}

#[tokio::test]
async fn test_document_download() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/documents/download?type=terms-conditions"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=\"Terms_and_Conditions.pdf\""
    );
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    let text = resp.text().await.unwrap();
    assert!(!text.is_empty());
    assert!(!text.contains("{generated_on}"));

    let (status, body) = fixture.get_json("/api/documents/download?type=tax-form").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["description"], "Document type not found: tax-form");
}

// ==================== MESSAGES ====================

#[tokio::test]
async fn test_portal_message_lifecycle() {
    let fixture = TestFixture::new().await;

    let (_, before) = fixture.get_json("/api/messages").await;
    let initial = before["count"].as_u64().unwrap();
    assert_eq!(before["new_count"], 2);

    let resp = fixture
        .client
        .post(fixture.url("/api/messages"))
        .json(&json!({ "type": "Push", "subject": "Hello", "content": "First contact" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["message"], "Message sent successfully");
    assert_eq!(created["data"]["type"], "Push");
    assert_eq!(created["data"]["content"], "First contact");
    assert_eq!(created["data"]["isRead"], false);
    let reference = created["data"]["id"].as_str().unwrap().to_string();

    let (_, after) = fixture.get_json("/api/messages").await;
    assert_eq!(after["count"].as_u64().unwrap(), initial + 1);
    assert_eq!(after["new_count"], 3);
    assert_eq!(after["data"][0]["id"], reference.as_str());

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/messages/{}", reference)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (_, restored) = fixture.get_json("/api/messages").await;
    assert_eq!(restored["data"], before["data"]);
}

#[tokio::test]
async fn test_message_defaults() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/messages"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["data"]["subject"], "New Message");
    assert_eq!(created["data"]["type"], "Email");
    assert_eq!(created["data"]["content"], "New message received.");
}

#[tokio::test]
async fn test_delete_keeps_order_and_ignores_unknown() {
    let fixture = TestFixture::new().await;

    let (_, before) = fixture.get_json("/customer/messages/list/CUST001").await;
    let references: Vec<String> = before
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["reference"].as_str().unwrap().to_string())
        .collect();

    let resp = fixture
        .session(
            fixture
                .client
                .delete(fixture.url(&format!("/customer/messages/CUST001/{}", references[2]))),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (_, after) = fixture.get_json("/customer/messages/list/CUST001").await;
    let remaining: Vec<&str> = after
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["reference"].as_str().unwrap())
        .collect();
    let mut expected: Vec<&str> = references.iter().map(String::as_str).collect();
    expected.remove(2);
    assert_eq!(remaining, expected);

    let resp = fixture
        .session(
            fixture
                .client
                .delete(fixture.url("/customer/messages/CUST001/MSG999")),
        )
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_customer_message_lookup() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/customer/messages/CUST001/MSG001").await;
    assert_eq!(status, 200);
    assert_eq!(body["reference"], "MSG001");

    let (status, body) = fixture.get_json("/customer/messages/CUST001/MSG999").await;
    assert_eq!(status, 477);
    assert_eq!(body["error"]["code"], "477");
    assert_eq!(body["error"]["description"], "Message not found");
}

#[tokio::test]
async fn test_customer_message_create_and_unread() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/customer/messages/unread/CUST001").await;
    assert_eq!(body["count"], 2);

    let resp = fixture
        .session(fixture.client.post(fixture.url("/customer/messages/CUST001")))
        .json(&json!({ "type": "Email", "subject": "Statement", "content": "Ready" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert!(created["reference"].as_str().unwrap().starts_with("MSG"));
    assert_eq!(created["body"], "Ready");
    assert_eq!(created["isRead"], false);

    let (_, body) = fixture.get_json("/customer/messages/unread/CUST001").await;
    assert_eq!(body["count"], 3);

    let resp = fixture
        .session(fixture.client.post(fixture.url("/customer/messages/CUST001")))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["subject"], "New Message");
    assert_eq!(created["body"], "New message received.");
}

#[tokio::test]
async fn test_blank_customer_id() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/customer/messages/list/%20").await;
    assert_eq!(status, 453);
    assert_eq!(body["error"]["code"], "453");
    assert_eq!(body["error"]["message"], "Customer id is null");

    let (status, body) = fixture.get_json("/accounts/saving/history/%20").await;
    assert_eq!(status, 456);
    assert_eq!(body["error"]["message"], "Account number is null");
}

// ==================== PERSONAL DETAILS ====================

#[tokio::test]
async fn test_personal_details_merge() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/personal-details"))
        .json(&json!({ "email": "lucy@example.nl", "nickname": "Lu" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["email"], "lucy@example.nl");
    assert!(body["data"].get("nickname").is_none());

    let (_, body) = fixture.get_json("/api/personal-details").await;
    assert_eq!(body["data"]["email"], "lucy@example.nl");

    let resp = fixture
        .client
        .put(fixture.url("/api/personal-details"))
        .json(&json!({ "telephone": 205551234, "address": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (_, body) = fixture.get_json("/api/personal-details").await;
    assert_eq!(body["data"]["telephone"], "205551234");
    assert_eq!(body["data"]["address"], "");
    assert_eq!(body["data"]["email"], "lucy@example.nl");

    let resp = fixture
        .client
        .put(fixture.url("/api/personal-details"))
        .header("content-type", "application/json")
        .body("[1, 2]")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "400");
}

#[tokio::test]
async fn test_phone_number() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/personal-details/phone").await;
    assert_eq!(body["data"]["phone"], "+31 6 12345678");
}

#[tokio::test]
async fn test_password_update_and_validate() {
    let fixture = TestFixture::new().await;

    let check = |password: &'static str| {
        fixture
            .client
            .post(fixture.url("/api/personal-details/validate-password"))
            .json(&json!({ "password": password }))
            .send()
    };

    let body: Value = check("password123").await.unwrap().json().await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["message"], "Password is valid");

    let resp = fixture
        .client
        .put(fixture.url("/api/personal-details/password"))
        .json(&json!({ "password": "n3w-Secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_ne!(body["data"]["password"], "n3w-Secret");

    let resp = check("password123").await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["valid"], false);
    assert_eq!(body["message"], "Password is incorrect");

    let body: Value = check("n3w-Secret").await.unwrap().json().await.unwrap();
    assert_eq!(body["valid"], true);

    let resp = fixture
        .client
        .put(fixture.url("/api/personal-details/password"))
        .json(&json!({ "password": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["description"], "Password is required");
}

#[tokio::test]
async fn test_password_persisted_to_file() {
    let fixture = TestFixture::with_options(ErrorStyle::Coded, false, true).await;
    assert!(fixture.state.store.password_is_persistent().await);

    let path = fixture.state.config.password_file.clone().unwrap();
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap().trim(), "password123");

    let resp = fixture
        .client
        .put(fixture.url("/api/personal-details/password"))
        .json(&json!({ "password": "rotated-42" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(tokio::fs::read_to_string(&path).await.unwrap().trim(), "rotated-42");
}

#[tokio::test]
async fn test_sof_questions_replace() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/api/sof-questions").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 7);

    let replacement = json!({
        "questions": [
            { "question": "Source of funds?", "answer": "Salary", "note": "monthly" },
            { "question": "Expected deposits?", "answer": 5 },
            { "foo": "bar" }
        ]
    });
    let resp = fixture
        .client
        .put(fixture.url("/api/sof-questions"))
        .json(&replacement)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"], replacement["questions"]);

    // Entries come back exactly as stored
    let (_, body) = fixture.get_json("/api/sof-questions").await;
    assert_eq!(body["data"], replacement["questions"]);

    let resp = fixture
        .client
        .put(fixture.url("/api/sof-questions"))
        .json(&json!({ "answers": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"]["description"]
        .as_str()
        .unwrap()
        .starts_with("questions array is required"));
}

// ==================== CUSTOMER PROFILE ====================

#[tokio::test]
async fn test_customer_phone() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/customer/profile/phone/CUST001").await;
    assert_eq!(status, 200);
    let phones = body.as_array().unwrap();
    assert!(!phones.is_empty());
    assert!(phones.iter().all(|p| p["phoneType"] == "MOBILE"));

    let resp = fixture
        .session(fixture.client.put(fixture.url("/customer/profile/phone/CUST001")))
        .json(&json!({ "phoneNumber": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 454);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Mobile phone number is null");
}

#[tokio::test]
async fn test_customer_login_issues_session() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .session(fixture.client.post(fixture.url("/customer/profile/login")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["sessionId"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_full_profile_echoes_customer() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/customer/profile/fullProfile/CUST042").await;
    assert_eq!(status, 200);
    assert_eq!(body["customerId"], "CUST042");
}

// ==================== ACCOUNTS ====================

#[tokio::test]
async fn test_saving_statement_paging() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .get_json("/accounts/saving/statement/2018470578/1/2")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["accountNumber"], "2018470578");
    assert_eq!(body["pagination"]["pageIndex"], 1);
    assert_eq!(body["pagination"]["pageSize"], 2);

    let (status, body) = fixture
        .get_json("/accounts/saving/statement/2018470578/first/2")
        .await;
    assert_eq!(status, 470);
    assert_eq!(body["error"]["code"], "470");
}

#[tokio::test]
async fn test_bad_paging_query_uses_envelope() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/accounts/statement/2018470578?pageIndex=abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "400");
    assert!(body["error"]["description"]
        .as_str()
        .unwrap()
        .contains("pageIndex"));
    assert!(body["timestamp"].is_string());

    let (status, body) = fixture
        .get_json("/api/accounts/statement/2018470578?pageIndex=1&pageSize=5")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["pagination"]["pageSize"], 5);
}

#[tokio::test]
async fn test_bad_paging_query_legacy_envelope() {
    let fixture = TestFixture::with_options(ErrorStyle::Legacy, false, false).await;

    let (status, body) = fixture
        .get_json("/api/accounts/statement/2018470578?pageSize=-1")
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("pageSize"));
}

#[tokio::test]
async fn test_accounts_by_type() {
    let fixture = TestFixture::new().await;

    let (_, body) = fixture.get_json("/accounts/list/CUST001").await;
    assert_eq!(body["saving"].as_array().unwrap().len(), 2);

    let (_, body) = fixture.get_json("/accounts/list/CUST001?accountType=current").await;
    assert!(body["current"].as_array().unwrap().is_empty());
}

// ==================== TRANSFERS ====================

#[tokio::test]
async fn test_transfer_simulation() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .get_json("/transfers/payment/CUST001/2018470578?targetIBAN=NL24DHBN2018470579&amount=125.50")
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "SIMULATED");
    assert_eq!(body["amount"], 125.5);
    assert_eq!(body["totalAmount"], 125.5);
    assert_eq!(body["currencyCode"], "EUR");

    let (status, body) = fixture
        .get_json("/transfers/payment/CUST001/2018470578?amount=lots")
        .await;
    assert_eq!(status, 470);
    assert_eq!(body["error"]["code"], "470");

    let (status, body) = fixture
        .get_json("/api/transfers/payment/CUST001/2018470578?amount=lots")
        .await;
    assert_eq!(status, 470);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_payee_verification() {
    let fixture = TestFixture::new().await;

    let verify = |body: Value| {
        fixture
            .session(fixture.client.post(fixture.url("/vop/requestPayeeVerification")))
            .json(&body)
            .send()
    };

    let resp = verify(json!({ "beneficiaryName": "Lucy Lavender" })).await.unwrap();
    assert_eq!(resp.status(), 474);

    let resp = verify(json!({ "targetIBAN": "NL24DHBN2018470579" })).await.unwrap();
    assert_eq!(resp.status(), 473);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Invalid party name");

    let resp = verify(json!({
        "targetIBAN": "NL24DHBN2018470579",
        "beneficiaryName": "Lucy Lavender"
    }))
    .await
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["verificationStatus"], "VERIFIED");
    assert_eq!(body["targetIBAN"], "NL24DHBN2018470579");
    assert!(!body["vopGuid"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_bank_date() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/transfers/utilities/bankDate").await;
    assert_eq!(status, 200);
    assert_eq!(body["bankDate"].as_str().unwrap().len(), 10);
    assert_eq!(body["isBusinessDay"], true);
}
