//! HTTP API integration tests.
//!
//! Drives the full call-request lifecycle (request → accept → schedule →
//! join → complete) through the REST surface, plus the failure paths.

mod fixtures;
use fixtures::{
    COLLEGE_TOKEN, RECRUITER_TOKEN, STUDENT_1_TOKEN, STUDENT_2_TOKEN, STUDENT_3_TOKEN, TestServer,
};

use serde_json::json;

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// RFC 3339 timestamp `minutes` minutes from now
fn minutes_from_now(minutes: i64) -> String {
    (chrono::Utc::now() + chrono::Duration::minutes(minutes)).to_rfc3339()
}

async fn create_request(server: &TestServer) -> serde_json::Value {
    let response = client()
        .post(format!("{}/request", server.api_url()))
        .header("Authorization", bearer(RECRUITER_TOKEN))
        .json(&json!({
            "collegeId": "college-1",
            "studentIds": ["student-1", "student-2"],
            "message": "Interview round 1",
            "conversationId": "conv-1"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    body["data"].clone()
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start(19080).await;

    // when (操作):
    let response = client()
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unauthenticated_request_rejected() {
    // テスト項目: トークンなしのリクエストは 401 で拒否される
    // given (前提条件):
    let server = TestServer::start(19081).await;

    // when (操作):
    let response = client()
        .get(format!("{}/college-requests", server.api_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 401);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_full_call_lifecycle_scenario() {
    // テスト項目: リクエスト → 承認 → スケジュール → 参加 → 完了の全シナリオ
    // given (前提条件):
    let server = TestServer::start(19082).await;

    // when (操作): リクルーターがリクエストを作成
    let created = create_request(&server).await;
    let request_id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["status"], "pending");

    // 大学側の一覧に現れる
    let response = client()
        .get(format!("{}/college-requests", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"][0]["id"], request_id.as_str());

    // 大学が承認
    let response = client()
        .post(format!("{}/accept", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["status"], "accepted");

    // 再承認は冪等に成功する
    let response = client()
        .post(format!("{}/accept", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // 大学が 2 分後にスケジュール（参加ウィンドウ内に収める）
    let response = client()
        .post(format!("{}/schedule", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": request_id, "scheduledTime": minutes_from_now(2)}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["status"], "scheduled");
    assert!(body["data"]["scheduledTime"].is_string());

    // 招待学生 1 人目が参加 → active、roomId が発行される
    let response = client()
        .post(format!("{}/join", server.api_url()))
        .header("Authorization", bearer(STUDENT_1_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let room_id = body["roomId"].as_str().expect("roomId").to_string();
    assert_eq!(body["data"]["status"], "active");

    // 2 人目も同じ roomId を受け取り、参加ログは 2 件になる
    let response = client()
        .post(format!("{}/join", server.api_url()))
        .header("Authorization", bearer(STUDENT_2_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["roomId"], room_id.as_str());
    assert_eq!(body["data"]["participants"].as_array().map(Vec::len), Some(2));

    // 招待されていない学生は 403
    let response = client()
        .post(format!("{}/join", server.api_url()))
        .header("Authorization", bearer(STUDENT_3_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // リクルーターの予定ビューに active として現れる
    let response = client()
        .get(format!("{}/scheduled-calls", server.api_url()))
        .header("Authorization", bearer(RECRUITER_TOKEN))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"][0]["id"], request_id.as_str());
    assert_eq!(body["data"][0]["status"], "active");

    // リクルーターが完了させる
    let response = client()
        .post(format!("{}/complete", server.api_url()))
        .header("Authorization", bearer(RECRUITER_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"]["status"], "completed");

    // then (期待する結果): completed 後の再参加は拒否される
    let response = client()
        .post(format!("{}/join", server.api_url()))
        .header("Authorization", bearer(STUDENT_1_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_join_outside_window_rejected() {
    // テスト項目: 開催 1 時間前の join はウィンドウ外として 400 になる
    // given (前提条件): 承認・スケジュール済み（開催は 1 時間後）
    let server = TestServer::start(19083).await;
    let created = create_request(&server).await;
    let request_id = created["id"].as_str().expect("id").to_string();

    client()
        .post(format!("{}/accept", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");
    client()
        .post(format!("{}/schedule", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": request_id, "scheduledTime": minutes_from_now(60)}))
        .send()
        .await
        .expect("Failed to send request");

    // when (操作):
    let response = client()
        .post(format!("{}/join", server.api_url()))
        .header("Authorization", bearer(STUDENT_1_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Video call time has passed or not yet started");
}

#[tokio::test]
async fn test_join_unscheduled_request_rejected() {
    // テスト項目: pending のままのリクエストへの join は 400 になる
    // given (前提条件):
    let server = TestServer::start(19084).await;
    let created = create_request(&server).await;
    let request_id = created["id"].as_str().expect("id");

    // when (操作):
    let response = client()
        .post(format!("{}/join", server.api_url()))
        .header("Authorization", bearer(STUDENT_1_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Video call is not scheduled");
}

#[tokio::test]
async fn test_request_missing_fields_rejected() {
    // テスト項目: collegeId / conversationId を欠いた作成リクエストは 400 になる
    // given (前提条件):
    let server = TestServer::start(19085).await;

    // when (操作):
    let response = client()
        .post(format!("{}/request", server.api_url()))
        .header("Authorization", bearer(RECRUITER_TOKEN))
        .json(&json!({"studentIds": ["student-1"]}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_accept_unknown_request_returns_404() {
    // テスト項目: 未知の requestId の承認は 404 になる
    // given (前提条件):
    let server = TestServer::start(19086).await;

    // when (操作):
    let response = client()
        .post(format!("{}/accept", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": "00000000-0000-0000-0000-000000000000"}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_schedule_with_invalid_time_rejected() {
    // テスト項目: RFC 3339 でない scheduledTime は 400 になる
    // given (前提条件):
    let server = TestServer::start(19087).await;
    let created = create_request(&server).await;
    let request_id = created["id"].as_str().expect("id");
    client()
        .post(format!("{}/accept", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": request_id}))
        .send()
        .await
        .expect("Failed to send request");

    // when (操作):
    let response = client()
        .post(format!("{}/schedule", server.api_url()))
        .header("Authorization", bearer(COLLEGE_TOKEN))
        .json(&json!({"requestId": request_id, "scheduledTime": "tomorrow at noon"}))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_students_by_college() {
    // テスト項目: 大学名で学生一覧が名前順に返される
    // given (前提条件):
    let server = TestServer::start(19088).await;

    // when (操作):
    let response = client()
        .get(format!("{}/students/IIT Delhi", server.api_url()))
        .header("Authorization", bearer(RECRUITER_TOKEN))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let students = body["data"].as_array().expect("data array");
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["name"], "Asha Verma");
    assert_eq!(students[1]["name"], "Ravi Kumar");
    assert!(students[0]["rollNumber"].is_string());
}

#[tokio::test]
async fn test_recruiter_requests_listing() {
    // テスト項目: リクルーター別一覧に自分のリクエストが新しい順で並ぶ
    // given (前提条件):
    let server = TestServer::start(19089).await;
    create_request(&server).await;
    create_request(&server).await;

    // when (操作):
    let response = client()
        .get(format!("{}/recruiter-requests", server.api_url()))
        .header("Authorization", bearer(RECRUITER_TOKEN))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}
