//! End-to-end client tests against a local mock of the Speisekammer service

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use sk_client::{ApiError, SpeisekammerClient};
use sk_core::StockAction;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared state of the mock service; tests mutate it between calls
#[derive(Clone)]
struct MockService {
    communities: Arc<Mutex<Value>>,
    locations: Arc<Mutex<Value>>,
    stock_calls: Arc<AtomicUsize>,
    last_stock_body: Arc<Mutex<Option<Value>>>,
}

impl MockService {
    fn new(communities: Value, locations: Value) -> Self {
        Self {
            communities: Arc::new(Mutex::new(communities)),
            locations: Arc::new(Mutex::new(locations)),
            stock_calls: Arc::new(AtomicUsize::new(0)),
            last_stock_body: Arc::new(Mutex::new(None)),
        }
    }

    fn set_communities(&self, value: Value) {
        *self.communities.lock().unwrap() = value;
    }

    fn set_locations(&self, value: Value) {
        *self.locations.lock().unwrap() = value;
    }

    fn stock_call_count(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }

    fn last_stock_body(&self) -> Option<Value> {
        self.last_stock_body.lock().unwrap().clone()
    }
}

async fn list_communities(State(state): State<MockService>) -> Json<Value> {
    Json(state.communities.lock().unwrap().clone())
}

async fn list_locations(State(state): State<MockService>) -> Json<Value> {
    Json(state.locations.lock().unwrap().clone())
}

async fn put_stock(State(state): State<MockService>, Json(body): Json<Value>) -> Json<Value> {
    state.stock_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_stock_body.lock().unwrap() = Some(body);
    Json(json!({"result": "ok"}))
}

fn mock_router(state: MockService) -> Router {
    Router::new()
        .route("/communities", get(list_communities))
        .route("/communities/:id/storage-locations", get(list_locations))
        .route("/stock", put(put_stock))
        .with_state(state)
}

async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Standard fixture: community 7 with a pantry and a fridge
async fn ready_service() -> (MockService, SpeisekammerClient) {
    let state = MockService::new(
        json!([{"id": 7}]),
        json!([{"id": 1, "name": "Pantry"}, {"id": 2, "name": "Fridge"}]),
    );
    let addr = spawn_server(mock_router(state.clone())).await;
    let client = SpeisekammerClient::new(&format!("http://{}", addr), "test-token");
    (state, client)
}

#[tokio::test]
async fn test_initial_fetch_resolves_community_and_locations() {
    let (_state, client) = ready_service().await;
    client.fetch_initial_data().await.unwrap();

    assert!(client.is_ready().await);
    assert_eq!(client.community_id().await, Some(7.into()));

    let locations = client.storage_locations().await;
    assert_eq!(locations.len(), 2);
    assert_eq!(locations.get(&1).map(String::as_str), Some("Pantry"));
    assert_eq!(locations.get(&2).map(String::as_str), Some("Fridge"));
}

#[tokio::test]
async fn test_empty_community_list_fails_and_keeps_state() {
    let (state, client) = ready_service().await;
    client.fetch_initial_data().await.unwrap();

    state.set_communities(json!([]));
    let err = client.fetch_initial_data().await.unwrap_err();
    assert!(matches!(err, ApiError::CommunityUnavailable));

    // Prior cache survives the failed refresh
    assert_eq!(client.community_id().await, Some(7.into()));
    assert_eq!(client.storage_location_count().await, 2);
}

#[tokio::test]
async fn test_first_community_without_id_fails() {
    let state = MockService::new(json!([{"name": "Home"}]), json!([]));
    let addr = spawn_server(mock_router(state)).await;
    let client = SpeisekammerClient::new(&format!("http://{}", addr), "test-token");

    let err = client.fetch_initial_data().await.unwrap_err();
    assert!(matches!(err, ApiError::CommunityUnavailable));
    assert!(!client.is_ready().await);
}

#[tokio::test]
async fn test_empty_location_list_clears_cache_and_still_notifies() {
    let (state, client) = ready_service().await;
    client.fetch_initial_data().await.unwrap();
    assert_eq!(client.storage_location_count().await, 2);

    let mut refreshes = client.subscribe_refresh();
    state.set_locations(json!([]));
    client.fetch_initial_data().await.unwrap();

    assert_eq!(client.storage_location_count().await, 0);
    assert!(client.storage_locations().await.is_empty());
    refreshes.try_recv().expect("refresh notification expected");
}

#[tokio::test]
async fn test_refresh_fully_replaces_locations() {
    let (state, client) = ready_service().await;
    client.fetch_initial_data().await.unwrap();

    state.set_locations(json!([{"id": 3, "name": "Cellar"}]));
    client.fetch_initial_data().await.unwrap();

    let locations = client.storage_locations().await;
    assert_eq!(locations.len(), 1);
    assert_eq!(locations.get(&3).map(String::as_str), Some("Cellar"));
    assert!(!locations.contains_key(&1));
}

#[tokio::test]
async fn test_error_status_surfaces_as_status_error() {
    async fn unauthorized() -> (StatusCode, Json<Value>) {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad token"})))
    }
    let app = Router::new().route("/communities", get(unauthorized));
    let addr = spawn_server(app).await;
    let client = SpeisekammerClient::new(&format!("http://{}", addr), "wrong-token");

    let err = client.fetch_initial_data().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401, .. }));
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn test_server_error_surfaces_as_status_error() {
    async fn broken() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }
    let app = Router::new().route("/communities", get(broken));
    let addr = spawn_server(app).await;
    let client = SpeisekammerClient::new(&format!("http://{}", addr), "test-token");

    let err = client.fetch_initial_data().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_non_json_success_body_is_invalid_response() {
    async fn not_json() -> &'static str {
        "<html>definitely not json</html>"
    }
    let app = Router::new().route("/communities", get(not_json));
    let addr = spawn_server(app).await;
    let client = SpeisekammerClient::new(&format!("http://{}", addr), "test-token");

    let err = client.fetch_initial_data().await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_service_is_connectivity_error() {
    // Bind and immediately drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SpeisekammerClient::new(&format!("http://{}", addr), "test-token");
    let err = client.fetch_initial_data().await.unwrap_err();
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn test_unknown_storage_location_makes_no_network_call() {
    let (state, client) = ready_service().await;
    client.fetch_initial_data().await.unwrap();

    let err = client
        .update_stock(99, "4006381333931", StockAction::Add, 1, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UnknownStorageLocation(99)));
    assert_eq!(state.stock_call_count(), 0);
}

#[tokio::test]
async fn test_update_stock_add_payload() {
    let (state, client) = ready_service().await;
    client.fetch_initial_data().await.unwrap();

    let response = client
        .update_stock(1, "123", StockAction::Add, 3, Some("2025-01-01"))
        .await
        .unwrap();
    assert_eq!(response, json!({"result": "ok"}));

    assert_eq!(state.stock_call_count(), 1);
    assert_eq!(
        state.last_stock_body().unwrap(),
        json!({
            "status": 1,
            "community": 7,
            "storage": 1,
            "barcode": "123",
            "mhd": "2025-01-01",
            "count": 3
        })
    );
}

#[tokio::test]
async fn test_update_stock_remove_sends_status_two_and_null_mhd() {
    let (state, client) = ready_service().await;
    client.fetch_initial_data().await.unwrap();

    client
        .update_stock(2, "987", StockAction::Remove, 1, None)
        .await
        .unwrap();

    assert_eq!(
        state.last_stock_body().unwrap(),
        json!({
            "status": 2,
            "community": 7,
            "storage": 2,
            "barcode": "987",
            "mhd": null,
            "count": 1
        })
    );
}

#[tokio::test]
async fn test_refresh_notification_reaches_all_subscribers() {
    let (_state, client) = ready_service().await;
    let mut first = client.subscribe_refresh();
    let mut second = client.subscribe_refresh();

    client.fetch_initial_data().await.unwrap();

    first.try_recv().expect("first subscriber notified");
    second.try_recv().expect("second subscriber notified");
}
