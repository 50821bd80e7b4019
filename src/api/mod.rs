//! HTTP admin API: a bearer-token mirror of the template and messaging
//! operations, plus health endpoints for deployment probes.

pub mod auth;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::services::dispatch::{DispatchEngine, DispatchTarget, OutgoingMessage, Recipient};
use crate::storage::chats::{ChatEntry, ChatStore};
use crate::storage::subscribers::SubscriberStore;
use crate::storage::templates::{MessageButton, Template, TemplateError, TemplateStore};
use crate::storage::StorageError;

use self::auth::{create_access_token, AuthError, AuthSettings, AuthUser};

/// Error response carrying an HTTP status and a `detail` body, the shape
/// the admin frontend expects.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            detail: "Could not validate credentials".to_string(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }

    pub fn bad_gateway(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub subscribers: SubscriberStore,
    pub chats: ChatStore,
    pub templates: TemplateStore,
    pub engine: Arc<DispatchEngine>,
    pub auth: AuthSettings,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        subscribers: SubscriberStore,
        chats: ChatStore,
        templates: TemplateStore,
        engine: Arc<DispatchEngine>,
        auth: AuthSettings,
    ) -> Self {
        Self {
            subscribers,
            chats,
            templates,
            engine,
            auth,
            start_time: Utc::now(),
        }
    }
}

pub struct ApiService {
    pub router: Router,
}

impl ApiService {
    pub fn new(state: AppState) -> Self {
        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/live", get(liveness_check))
            .route("/api/login", post(login))
            .route("/api/stats", get(get_stats))
            .route("/api/chats", get(get_chats))
            .route("/api/templates", get(get_templates).post(create_template))
            .route("/api/templates/:name", delete(delete_template))
            .route("/api/send", post(send_message))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    // Single-user admin panel; constant credentials from the environment.
    if request.username != state.auth.username || request.password != state.auth.password {
        return Err(ApiError {
            status: StatusCode::UNAUTHORIZED,
            detail: AuthError::InvalidCredentials.to_string(),
        });
    }

    let access_token = create_access_token(&request.username, &state.auth.jwt_secret)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub user_count: usize,
    pub chat_count: usize,
}

async fn get_stats(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(StatsResponse {
        user_count: state.subscribers.count()?,
        chat_count: state.chats.count()?,
    }))
}

async fn get_chats(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<std::collections::BTreeMap<String, ChatEntry>>, ApiError> {
    Ok(Json(state.chats.list()?))
}

async fn get_templates(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<std::collections::BTreeMap<String, Template>>, ApiError> {
    Ok(Json(state.templates.list()?))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateCreate {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_url: Option<String>,
}

async fn create_template(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<TemplateCreate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let button = match (request.button_text, request.button_url) {
        (Some(text), Some(url)) => Some(MessageButton { text, url }),
        (None, None) => None,
        _ => return Err(ApiError::unprocessable("button text and URL must both be provided")),
    };

    state
        .templates
        .put(&request.name, request.content, button)
        .map_err(|e| match e {
            TemplateError::Storage(storage) => ApiError::from(storage),
            other => ApiError::unprocessable(other.to_string()),
        })?;

    Ok(Json(json!({ "status": "success", "template_name": request.name })))
}

async fn delete_template(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.templates.delete(&name)? {
        Ok(Json(json!({ "status": "success" })))
    } else {
        Err(ApiError::not_found("Template not found"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// Numeric chat id or a `@username` handle.
    pub chat_id: String,
    pub template_name: String,
}

async fn send_message(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let template = state
        .templates
        .get(&request.template_name)?
        .ok_or_else(|| ApiError::not_found("Template not found"))?;

    let outgoing = OutgoingMessage::from_template(&template);
    let target = DispatchTarget::Single(Recipient::parse(&request.chat_id));

    let report = state
        .engine
        .dispatch(&target, &outgoing)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    if let Some(failure) = report.failures.first() {
        return Err(ApiError::bad_gateway(failure.reason.clone()));
    }

    Ok(Json(json!({
        "status": "success",
        "detail": format!("Message sent to {}", request.chat_id),
    })))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub storage: StorageHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StorageHealth {
    pub status: String,
    pub subscriber_count: usize,
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    // The subscriber store exercises the same backing storage every other
    // operation uses, so one snapshot read is a sufficient probe.
    let (storage_status, subscriber_count) = match state.subscribers.count() {
        Ok(count) => ("healthy", count),
        Err(_) => ("unhealthy", 0),
    };

    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    let response = HealthResponse {
        status: storage_status.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: StorageHealth {
            status: storage_status.to_string(),
            subscriber_count,
        },
        uptime_seconds: uptime,
    };

    if storage_status == "healthy" {
        Ok(Json(response))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}
