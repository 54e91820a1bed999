use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "test-token";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_401() {
    let resp = app(TOKEN)
        .oneshot(
            Request::builder()
                .uri("/api/v1/status")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_bytes(resp).await.as_ref(), b"Unauthorized");
}

#[tokio::test]
async fn wrong_token_is_401() {
    let resp = app("other-token")
        .oneshot(request("GET", "/api/v1/status"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- status ---

#[tokio::test]
async fn status_returns_json() {
    let resp = app(TOKEN)
        .oneshot(request("GET", "/api/v1/status"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let status = body_json(resp).await;
    assert_eq!(status["status"], true);
}

// --- unknown routes ---

#[tokio::test]
async fn unknown_collection_is_plain_404() {
    let resp = app(TOKEN)
        .oneshot(request("GET", "/api/v1/widgets"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await.as_ref(), b"Not Found");
}

#[tokio::test]
async fn path_outside_api_prefix_is_404() {
    let resp = app(TOKEN)
        .oneshot(request("GET", "/users"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- records ---

#[tokio::test]
async fn list_users_empty() {
    let resp = app(TOKEN)
        .oneshot(request("GET", "/api/v1/users"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert!(list["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_user_returns_201_with_id() {
    let resp = app(TOKEN)
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            r#"{"username":"andrew","email":"andrew@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user = body_json(resp).await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["username"], "andrew");
}

#[tokio::test]
async fn create_with_non_object_is_400() {
    let resp = app(TOKEN)
        .oneshot(json_request("POST", "/api/v1/domains", "[1, 2]"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_missing_record_is_404() {
    let resp = app(TOKEN)
        .oneshot(request("GET", "/api/v1/organizations/42"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_id_in_body_is_400() {
    let resp = app(TOKEN)
        .oneshot(json_request("PUT", "/api/v1/users", r#"{"username":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_missing_record_is_404() {
    let resp = app(TOKEN)
        .oneshot(request("DELETE", "/api/v1/domains/9"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn domain_lifecycle() {
    use tower::Service;

    let mut app = app(TOKEN).into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/v1/domains",
            r#"{"name":"example.com","enabled":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["id"].as_u64().unwrap();

    // lookup by name
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/api/v1/domains/byname/example.com"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["id"], id);

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/v1/domains/{id}"),
            r#"{"enabled":false}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["enabled"], false);
    assert_eq!(updated["name"], "example.com");

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("DELETE", &format!("/api/v1/domains/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // gone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", &format!("/api/v1/domains/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn password_change_lifecycle() {
    use tower::Service;

    let mut app = app(TOKEN).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/v1/users", r#"{"username":"kim"}"#))
        .await
        .unwrap();
    let id = body_json(resp).await["id"].as_u64().unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/v1/users/{id}/password"),
            r#"{"password1":"a","password2":"b"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(resp).await.as_ref(), b"Passwords do not match");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/v1/users/{id}/password"),
            r#"{"password1":"s3cret","password2":"s3cret"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
