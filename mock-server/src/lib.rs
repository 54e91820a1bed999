use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Collections served under `/api/v1/{kind}`.
pub const COLLECTIONS: [&str; 3] = ["users", "domains", "organizations"];

#[derive(Debug, Default)]
pub struct Store {
    collections: HashMap<&'static str, BTreeMap<u64, Value>>,
    next_id: u64,
}

impl Store {
    fn new() -> Self {
        Self {
            collections: COLLECTIONS.iter().map(|k| (*k, BTreeMap::new())).collect(),
            next_id: 0,
        }
    }

    fn records(&self, kind: &str) -> Option<&BTreeMap<u64, Value>> {
        self.collections.get(kind)
    }

    fn collection(&mut self, kind: &str) -> Option<&mut BTreeMap<u64, Value>> {
        self.collections.get_mut(kind)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

#[derive(Deserialize)]
pub struct PasswordChange {
    pub password1: String,
    pub password2: String,
}

type ApiResult = Result<Response, (StatusCode, &'static str)>;

const NOT_FOUND: (StatusCode, &str) = (StatusCode::NOT_FOUND, "Not Found");

pub fn app(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(Store::new())),
    };

    let api = Router::new()
        .route("/status", get(status))
        .route("/domains/byname/{name}", get(domain_by_name))
        .route("/users/{id}/password", put(change_password))
        .route(
            "/{kind}",
            get(list_records).post(create_record).put(update_record_in_body),
        )
        .route(
            "/{kind}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api)
        .fallback(|| async { NOT_FOUND })
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.token);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    tracing::debug!(method = %request.method(), uri = %request.uri(), authorized, "request");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }
    next.run(request).await
}

async fn status() -> Json<Value> {
    Json(json!({
        "inbound": 0,
        "outbound": 0,
        "status": true,
    }))
}

async fn list_records(State(state): State<AppState>, Path(kind): Path<String>) -> ApiResult {
    let db = state.db.read().await;
    let records = db.records(&kind).ok_or(NOT_FOUND)?;
    let items: Vec<Value> = records.values().cloned().collect();
    Ok(Json(json!({ "items": items })).into_response())
}

async fn create_record(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(mut input): Json<Value>,
) -> ApiResult {
    let mut db = state.db.write().await;
    db.collection(&kind).ok_or(NOT_FOUND)?;
    let Some(fields) = input.as_object_mut() else {
        return Err((StatusCode::BAD_REQUEST, "Invalid payload"));
    };
    db.next_id += 1;
    let id = db.next_id;
    fields.insert("id".to_string(), json!(id));
    db.collection(&kind).ok_or(NOT_FOUND)?.insert(id, input.clone());
    Ok((StatusCode::CREATED, Json(input)).into_response())
}

async fn get_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
) -> ApiResult {
    let db = state.db.read().await;
    let record = db.records(&kind).and_then(|c| c.get(&id)).ok_or(NOT_FOUND)?;
    Ok(Json(record.clone()).into_response())
}

async fn update_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
    Json(input): Json<Value>,
) -> ApiResult {
    apply_update(&state, &kind, id, input).await
}

/// `PUT /{kind}` with the record id carried in the body.
async fn update_record_in_body(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<Value>,
) -> ApiResult {
    let id = input
        .get("id")
        .and_then(Value::as_u64)
        .ok_or((StatusCode::BAD_REQUEST, "Missing id"))?;
    apply_update(&state, &kind, id, input).await
}

async fn apply_update(state: &AppState, kind: &str, id: u64, input: Value) -> ApiResult {
    let Value::Object(fields) = input else {
        return Err((StatusCode::BAD_REQUEST, "Invalid payload"));
    };
    let mut db = state.db.write().await;
    let record = db
        .collection(kind)
        .and_then(|c| c.get_mut(&id))
        .and_then(Value::as_object_mut)
        .ok_or(NOT_FOUND)?;
    for (key, value) in fields {
        if key != "id" {
            record.insert(key, value);
        }
    }
    Ok(Json(Value::Object(record.clone())).into_response())
}

async fn delete_record(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, u64)>,
) -> ApiResult {
    let mut db = state.db.write().await;
    db.collection(&kind)
        .and_then(|c| c.remove(&id))
        .ok_or(NOT_FOUND)?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn domain_by_name(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    let db = state.db.read().await;
    let record = db
        .records("domains")
        .and_then(|c| c.values().find(|d| d["name"] == name.as_str()).cloned())
        .ok_or(NOT_FOUND)?;
    Ok(Json(record).into_response())
}

async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<PasswordChange>,
) -> ApiResult {
    let mut db = state.db.write().await;
    let user = db
        .collection("users")
        .and_then(|c| c.get_mut(&id))
        .and_then(Value::as_object_mut)
        .ok_or(NOT_FOUND)?;
    if input.password1 != input.password2 {
        return Err((StatusCode::BAD_REQUEST, "Passwords do not match"));
    }
    user.insert("password_set".to_string(), json!(true));
    Ok(StatusCode::NO_CONTENT.into_response())
}
