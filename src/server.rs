// Inventory HTTP API (feature = "server")
//
// One Inventory shared behind a mutex; every request takes the lock, so
// requests are applied one at a time in arrival order.

use crate::error::{InputError, InventoryError};
use crate::input::{parse_item_input, parse_item_number};
use crate::inventory::Inventory;
use crate::item::Item;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inventory: Arc<Mutex<Inventory>>,
}

impl AppState {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Arc::new(Mutex::new(inventory)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inventory>, ApiError> {
        self.inventory
            .lock()
            .map_err(|_| ApiError::internal("inventory lock poisoned"))
    }
}

/// API Response wrapper
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Item as listed by the API, numbered from 1 like every other front end
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ItemResponse {
    pub number: usize,
    pub name: String,
    pub price: f64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddItemRequest {
    pub name: String,
    pub price: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ReloadResponse {
    pub loaded: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub truncated_at_line: Option<usize>,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<InputError> for ApiError {
    fn from(e: InputError) -> Self {
        let status = match e {
            InputError::NumberOutOfRange { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<InventoryError> for ApiError {
    fn from(e: InventoryError) -> Self {
        match e {
            InventoryError::IndexOutOfRange { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: e.to_string(),
            },
            other => {
                error!(error = %other, "inventory operation failed");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

fn numbered(items: &[Item]) -> Vec<ItemResponse> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| ItemResponse {
            number: i + 1,
            name: item.name().to_string(),
            price: item.price(),
        })
        .collect()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/items
async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let inventory = state.lock()?;
    Ok(Json(ApiResponse::ok(numbered(inventory.items()))))
}

/// POST /api/items
async fn add_item(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Accept both 10.5 and "10.5"
    let price = match &req.price {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let item = parse_item_input(&req.name, &price)?;

    let mut inventory = state.lock()?;
    inventory.add(item)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(numbered(inventory.items()))),
    ))
}

/// DELETE /api/items/:number
async fn delete_item(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let mut inventory = state.lock()?;
    // Parsed here rather than by the extractor so bad numbers get the JSON envelope
    let index = parse_item_number(&number, inventory.len())?;
    inventory.delete(index)?;

    Ok(Json(ApiResponse::ok(numbered(inventory.items()))))
}

/// POST /api/reload
async fn reload(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let mut inventory = state.lock()?;
    let report = inventory.load()?;

    Ok(Json(ApiResponse::ok(ReloadResponse {
        loaded: report.loaded,
        truncated_at_line: report.stopped_at.map(|e| e.line),
    })))
}

/// GET /
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/items", get(list_items).post(add_item))
        .route("/items/:number", delete(delete_item))
        .route("/reload", post(reload))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde::de::DeserializeOwned;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app_in(dir: &TempDir) -> Router {
        let inventory = Inventory::new(dir.path().join("inventory.txt")).unwrap();
        router(AppState::new(inventory))
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn body_json<T: DeserializeOwned>(res: Response) -> T {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_item(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let dir = TempDir::new().unwrap();
        let res = send(&app_in(&dir), get("/api/health")).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_list_delete() {
        let dir = TempDir::new().unwrap();
        let app = app_in(&dir);

        let res = send(&app, post_item(r#"{"name":"Pen","price":10}"#)).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let res = send(&app, post_item(r#"{"name":"Book","price":"50"}"#)).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = send(&app, get("/api/items")).await;
        let body: ApiResponse<Vec<ItemResponse>> = body_json(res).await;
        let items = body.data.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[1],
            ItemResponse { number: 2, name: "Book".to_string(), price: 50.0 }
        );

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/items/1")
            .body(Body::empty())
            .unwrap();
        let res = send(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: ApiResponse<Vec<ItemResponse>> = body_json(res).await;
        assert_eq!(body.data.unwrap()[0].name, "Book");

        let on_disk = std::fs::read_to_string(dir.path().join("inventory.txt")).unwrap();
        assert_eq!(on_disk, "Book 50\n");
    }

    #[tokio::test]
    async fn test_invalid_add_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let app = app_in(&dir);

        let res = send(&app, post_item(r#"{"name":"Blue Pen","price":1}"#)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = body_json(res).await;
        assert!(!body.success);
        assert!(body.error.is_some());

        let res = send(&app, post_item(r#"{"name":"Pen","price":-3}"#)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_unknown_number_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = app_in(&dir);

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/items/3")
            .body(Body::empty())
            .unwrap();
        let res = send(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_non_numeric_is_bad_request_with_envelope() {
        let dir = TempDir::new().unwrap();
        let app = app_in(&dir);
        send(&app, post_item(r#"{"name":"Pen","price":10}"#)).await;

        for uri in ["/api/items/abc", "/api/items/-1"] {
            let req = Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let res = send(&app, req).await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);

            let body: ApiResponse<()> = body_json(res).await;
            assert!(!body.success);
            assert!(body.error.unwrap().contains("not a whole number"));
        }

        let res = send(&app, get("/api/items")).await;
        let body: ApiResponse<Vec<ItemResponse>> = body_json(res).await;
        assert_eq!(body.data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_reports_truncation() {
        let dir = TempDir::new().unwrap();
        let app = app_in(&dir);
        std::fs::write(dir.path().join("inventory.txt"), "Pen 10\noops\n").unwrap();

        let req = Request::builder()
            .method("POST")
            .uri("/api/reload")
            .body(Body::empty())
            .unwrap();
        let res = send(&app, req).await;
        let body: ApiResponse<ReloadResponse> = body_json(res).await;

        assert_eq!(
            body.data.unwrap(),
            ReloadResponse { loaded: 1, truncated_at_line: Some(2) }
        );
    }
}
