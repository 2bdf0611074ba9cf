use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{Value, json};

use agrilink_auth_types::cookie::AGRILINK_SESSION;
use agrilink_testing::auth::MockSession;

use agrilink_marketplace::config::MarketConfig;
use agrilink_marketplace::domain::repository::OtpRepository;
use agrilink_marketplace::router::build_router;
use agrilink_marketplace::state::AppState;

fn test_server() -> (TestServer, AppState) {
    let state = AppState::new(&MarketConfig::default());
    let server = TestServer::new(build_router(state.clone())).unwrap();
    (server, state)
}

/// Request a code over HTTP and read it back from storage.
async fn issue_code(server: &TestServer, state: &AppState, phone: &str) -> String {
    server
        .post("/api/auth/send-otp")
        .json(&json!({ "phone": phone }))
        .await
        .assert_status_ok();
    state
        .otp_repo()
        .find_latest_active(phone, Utc::now())
        .await
        .unwrap()
        .unwrap()
        .code
}

async fn sign_up(server: &TestServer, state: &AppState, phone: &str, role: &str) -> MockSession {
    let code = issue_code(server, state, phone).await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "phone": phone,
            "otp": code,
            "name": format!("{role} {phone}"),
            "role": role,
            "location": "Nashik",
        }))
        .await;
    response.assert_status_ok();
    MockSession::new(response.cookie(AGRILINK_SESSION).value())
}

fn job_body() -> Value {
    json!({
        "jobType": "Harvesting",
        "cropType": "Wheat",
        "location": "Nashik",
        "wage": "500/day",
        "duration": "3 days",
        "startDate": "2026-11-01",
        "description": "Need four workers for harvest",
        "urgency": "high",
    })
}

fn equipment_body() -> Value {
    json!({
        "name": "Mahindra 575",
        "type": "Tractor",
        "location": "Pune",
        "pricePerDay": "1500",
        "pricePerWeek": "9000",
        "description": "45 HP, with driver",
    })
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_health_checks() {
    let (server, _) = test_server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_set_cookie_and_reject_duplicate() {
    let (server, state) = test_server();
    let code = issue_code(&server, &state, "+15550001111").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "phone": "+15550001111",
            "otp": code,
            "name": "Ada",
            "role": "farmer",
            "location": "X",
        }))
        .await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "farmer");
    assert_eq!(body["user"]["name"], "Ada");
    assert_eq!(body["user"]["phone"], "+15550001111");

    let cookie = response.cookie(AGRILINK_SESSION);
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.path(), Some("/"));
    assert!(cookie.http_only().unwrap_or(false));

    let code = issue_code(&server, &state, "+15550001111").await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "phone": "+15550001111",
            "otp": code,
            "name": "Ada",
            "role": "farmer",
            "location": "X",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_reject_malformed_bodies() {
    let (server, _) = test_server();

    let response = server
        .post("/api/auth/send-otp")
        .json(&json!({ "number": "+15550001111" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_REQUEST");

    let response = server
        .post("/api/auth/send-otp")
        .json(&json!({ "phone": "call me" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "phone": "+15550001111",
            "otp": "123456",
            "name": "Ada",
            "role": "landlord",
            "location": "X",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_REQUEST");
}

#[tokio::test]
async fn should_reject_wrong_code_and_unknown_user_on_login() {
    let (server, state) = test_server();
    let code = issue_code(&server, &state, "+15550009999").await;

    let wrong = if code == "100000" { "100001" } else { "100000" };
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "phone": "+15550009999", "otp": wrong }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_OR_EXPIRED_CODE");

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "phone": "+15550009999", "otp": code }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn should_login_and_read_profile() {
    let (server, state) = test_server();
    sign_up(&server, &state, "+15550001111", "coolie").await;

    let code = issue_code(&server, &state, "+15550001111").await;
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "phone": "+15550001111", "otp": code }))
        .await;
    response.assert_status_ok();
    let session = MockSession::new(response.cookie(AGRILINK_SESSION).value());

    let (name, value) = session.header();
    let response = server.get("/api/auth/me").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user"]["role"], "coolie");
    assert_eq!(body["user"]["location"], "Nashik");
}

#[tokio::test]
async fn should_require_session_for_profile() {
    let (server, _) = test_server();

    let response = server.get("/api/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "NOT_AUTHENTICATED");

    let (name, value) = MockSession::new("forged").header();
    let response = server.get("/api/auth/me").add_header(name, value).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_logout_and_clear_cookie() {
    let (server, state) = test_server();
    let session = sign_up(&server, &state, "+15550001111", "farmer").await;

    let (name, value) = session.header();
    let response = server
        .post("/api/auth/logout")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status_ok();
    let cookie = response.cookie(AGRILINK_SESSION);
    assert_eq!(cookie.value(), "");

    let response = server
        .get("/api/auth/me")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    server
        .post("/api/auth/logout")
        .add_header(name, value)
        .await
        .assert_status_ok();
}

// ── Jobs & applications ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_run_job_lifecycle() {
    let (server, state) = test_server();
    let farmer = sign_up(&server, &state, "+15550001111", "farmer").await;
    let other_farmer = sign_up(&server, &state, "+15550003333", "farmer").await;
    let worker = sign_up(&server, &state, "+15550002222", "coolie").await;
    let (farmer_h, farmer_v) = farmer.header();
    let (other_h, other_v) = other_farmer.header();
    let (worker_h, worker_v) = worker.header();

    let response = server
        .post("/api/jobs")
        .add_header(worker_h.clone(), worker_v.clone())
        .json(&job_body())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post("/api/jobs")
        .add_header(farmer_h.clone(), farmer_v.clone())
        .json(&job_body())
        .await;
    response.assert_status_ok();
    let job = response.json::<Value>()["job"].clone();
    let job_id = job["id"].as_str().unwrap().to_owned();
    let farmer_id = job["farmerId"].as_str().unwrap().to_owned();
    assert_eq!(job["urgency"], "high");
    assert_eq!(job["farmName"], "farmer +15550001111");

    let listed: Value = server.get("/api/jobs").await.json();
    assert_eq!(listed["jobs"].as_array().unwrap().len(), 1);
    let by_farmer: Value = server.get(&format!("/api/jobs/farmer/{farmer_id}")).await.json();
    assert_eq!(by_farmer["jobs"][0]["id"], job_id.as_str());
    let mine: Value = server
        .get("/api/jobs/my")
        .add_header(farmer_h.clone(), farmer_v.clone())
        .await
        .json();
    assert_eq!(mine["jobs"].as_array().unwrap().len(), 1);

    let response = server
        .post(&format!("/api/jobs/{job_id}/apply"))
        .add_header(farmer_h.clone(), farmer_v.clone())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post(&format!("/api/jobs/{job_id}/apply"))
        .add_header(worker_h.clone(), worker_v.clone())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["application"]["jobId"], job_id.as_str());

    let response = server
        .post(&format!("/api/jobs/{job_id}/apply"))
        .add_header(worker_h.clone(), worker_v.clone())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "ALREADY_APPLIED");

    let applications: Value = server
        .get(&format!("/api/jobs/{job_id}/applications"))
        .await
        .json();
    assert_eq!(applications["applications"].as_array().unwrap().len(), 1);
    let my_applications: Value = server
        .get("/api/applications/my")
        .add_header(worker_h, worker_v)
        .await
        .json();
    assert_eq!(my_applications["applications"].as_array().unwrap().len(), 1);

    let response = server
        .patch(&format!("/api/jobs/{job_id}"))
        .add_header(farmer_h.clone(), farmer_v.clone())
        .json(&json!({ "wage": "650/day" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["job"]["wage"], "650/day");

    let response = server
        .delete(&format!("/api/jobs/{job_id}"))
        .add_header(other_h, other_v)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .delete(&format!("/api/jobs/{job_id}"))
        .add_header(farmer_h, farmer_v)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["success"], true);

    let response = server.get(&format!("/api/jobs/{job_id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "JOB_NOT_FOUND");
}

#[tokio::test]
async fn should_treat_unparseable_ids_as_unknown() {
    let (server, _) = test_server();

    server
        .get("/api/jobs/not-a-uuid")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/equipment/not-a-uuid")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/api/jobs/farmer/not-a-uuid").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["jobs"], json!([]));

    let response = server.get("/api/equipment/owner/not-a-uuid").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["equipment"], json!([]));
}

#[tokio::test]
async fn should_check_session_and_role_before_unparseable_ids() {
    let (server, state) = test_server();

    for response in [
        server.post("/api/jobs/not-a-uuid/apply").await,
        server.patch("/api/jobs/not-a-uuid").json(&json!({})).await,
        server.delete("/api/jobs/not-a-uuid").await,
        server.patch("/api/equipment/not-a-uuid").json(&json!({})).await,
        server.delete("/api/equipment/not-a-uuid").await,
    ] {
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["kind"], "NOT_AUTHENTICATED");
    }

    let farmer = sign_up(&server, &state, "+15550001111", "farmer").await;
    let (farmer_h, farmer_v) = farmer.header();
    let response = server
        .post("/api/jobs/not-a-uuid/apply")
        .add_header(farmer_h, farmer_v)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");

    let worker = sign_up(&server, &state, "+15550002222", "coolie").await;
    let (worker_h, worker_v) = worker.header();
    let response = server
        .post("/api/jobs/not-a-uuid/apply")
        .add_header(worker_h, worker_v)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "JOB_NOT_FOUND");
}

#[tokio::test]
async fn should_require_session_for_job_creation() {
    let (server, _) = test_server();
    let response = server.post("/api/jobs").json(&job_body()).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ── Equipment ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_run_equipment_lifecycle() {
    let (server, state) = test_server();
    let provider = sign_up(&server, &state, "+15550004444", "rental").await;
    let other = sign_up(&server, &state, "+15550005555", "rental").await;
    let farmer = sign_up(&server, &state, "+15550001111", "farmer").await;
    let (provider_h, provider_v) = provider.header();
    let (other_h, other_v) = other.header();
    let (farmer_h, farmer_v) = farmer.header();

    let response = server
        .post("/api/equipment")
        .add_header(farmer_h, farmer_v)
        .json(&equipment_body())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post("/api/equipment")
        .add_header(provider_h.clone(), provider_v.clone())
        .json(&equipment_body())
        .await;
    response.assert_status_ok();
    let item = response.json::<Value>()["equipment"].clone();
    let id = item["id"].as_str().unwrap().to_owned();
    let owner_id = item["ownerId"].as_str().unwrap().to_owned();
    assert_eq!(item["type"], "Tractor");
    assert_eq!(item["availability"], "available");

    let by_owner: Value = server
        .get(&format!("/api/equipment/owner/{owner_id}"))
        .await
        .json();
    assert_eq!(by_owner["equipment"].as_array().unwrap().len(), 1);
    let mine: Value = server
        .get("/api/equipment/my")
        .add_header(other_h.clone(), other_v.clone())
        .await
        .json();
    assert_eq!(mine["equipment"], json!([]));

    let response = server
        .patch(&format!("/api/equipment/{id}"))
        .add_header(other_h.clone(), other_v.clone())
        .json(&json!({ "availability": "rented" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .patch(&format!("/api/equipment/{id}"))
        .add_header(provider_h.clone(), provider_v.clone())
        .json(&json!({ "availability": "rented", "pricePerDay": "1800" }))
        .await;
    response.assert_status_ok();
    let updated = response.json::<Value>()["equipment"].clone();
    assert_eq!(updated["availability"], "rented");
    assert_eq!(updated["pricePerDay"], "1800");
    assert_eq!(updated["name"], "Mahindra 575");

    let response = server
        .patch(&format!("/api/equipment/{id}"))
        .add_header(provider_h.clone(), provider_v.clone())
        .json(&json!({ "name": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "VALIDATION");

    server
        .delete(&format!("/api/equipment/{id}"))
        .add_header(other_h, other_v)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    server
        .delete(&format!("/api/equipment/{id}"))
        .add_header(provider_h, provider_v)
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/equipment/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
