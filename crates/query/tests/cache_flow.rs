//! End-to-end cache behavior against a counting stub API server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use api::{ApiClient, ApiConfig, NotificationService, SessionStore};
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use models::project::CreateProject;
use models::task::CreateTask;
use query::{QueryClient, queries::ActivityFeed};
use serde_json::json;
use uuid::Uuid;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

struct Harness {
    client: QueryClient,
    _tmp: tempfile::TempDir,
}

fn harness(addr: SocketAddr) -> Harness {
    let tmp = tempfile::tempdir().unwrap();
    let session = SessionStore::new(utils::storage::Storage::at(tmp.path()));
    let notifier = NotificationService::new();
    let config = ApiConfig::new(&format!("http://{addr}")).unwrap();
    let api = ApiClient::new(config, session, notifier).unwrap();
    Harness {
        client: QueryClient::new(api),
        _tmp: tmp,
    }
}

fn task_json(title: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "title": title,
        "description": "",
        "status": "todo",
        "priority": "medium",
        "project_id": Uuid::new_v4(),
        "creator_id": Uuid::new_v4(),
        "created_at": "2025-06-01T12:00:00Z",
        "updated_at": "2025-06-01T12:00:00Z"
    })
}

#[tokio::test]
async fn successful_mutation_invalidates_cached_lists() {
    let list_calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&list_calls);
    let app = Router::new()
        .route(
            "/tasks/",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!([task_json("Ship it")]))
                }
            })
            .post(|| async { Json(task_json("Ship it")) }),
        );
    let harness = harness(serve(app).await);

    harness.client.tasks().list(None).await.unwrap();
    harness.client.tasks().list(None).await.unwrap();
    assert_eq!(list_calls.load(Ordering::SeqCst), 1, "fresh read hit the network");

    let mut banners = harness.client.notifier().subscribe();
    let create = CreateTask {
        title: "Ship it".to_string(),
        description: "".to_string(),
        project_id: Uuid::new_v4(),
        status: None,
        priority: None,
        assignee_id: None,
        due_date: None,
    };
    harness.client.tasks().create(&create).await.unwrap();
    assert_eq!(
        banners.recv().await.unwrap().message,
        "Task created successfully"
    );

    harness.client.tasks().list(None).await.unwrap();
    assert_eq!(
        list_calls.load(Ordering::SeqCst),
        2,
        "invalidation forces a refetch"
    );
}

#[tokio::test]
async fn concurrent_scoped_reads_share_one_call() {
    let list_calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&list_calls);
    let app = Router::new().route(
        "/tasks/",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let counter = Arc::clone(&counter);
            async move {
                assert!(params.contains_key("project_id"));
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Json(json!([task_json("Shared")]))
            }
        }),
    );
    let harness = harness(serve(app).await);

    let project_id = Uuid::new_v4();
    let tasks = harness.client.tasks();
    let (a, b) = tokio::join!(
        tasks.list(Some(project_id)),
        tasks.list(Some(project_id))
    );

    assert_eq!(list_calls.load(Ordering::SeqCst), 1);
    assert_eq!(a.unwrap(), b.unwrap());
}

#[tokio::test]
async fn user_search_respects_the_length_threshold() {
    let search_calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&search_calls);
    let app = Router::new().route(
        "/users/search",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let counter = Arc::clone(&counter);
            async move {
                assert!(params.get("email").is_some_and(|q| q.len() >= 3));
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!([]))
            }
        }),
    );
    let harness = harness(serve(app).await);

    let below = harness.client.users().search("ab").await.unwrap();
    assert!(below.is_empty());
    assert_eq!(search_calls.load(Ordering::SeqCst), 0);

    harness.client.users().search("abc").await.unwrap();
    harness.client.users().search("abc").await.unwrap();
    assert_eq!(search_calls.load(Ordering::SeqCst), 1, "distinct query cached");

    harness.client.users().search("abcd").await.unwrap();
    assert_eq!(search_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn login_establishes_a_session_from_the_fresh_token() {
    const USER_ID: &str = "7b7e2f34-9f3c-4a27-b7d8-0f6a5d2c9e11";
    let app = Router::new()
        .route(
            "/auth/login",
            post(|| async {
                Json(json!({
                    "access_token": "fresh-token",
                    "token_type": "bearer",
                    "user_id": USER_ID
                }))
            }),
        )
        .route(
            "/users/profile/{id}",
            get(|Path(id): Path<Uuid>, headers: HeaderMap| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok());
                assert_eq!(auth, Some("Bearer fresh-token"));
                Json(json!({
                    "id": id,
                    "email": "ada@example.com",
                    "full_name": "Ada",
                    "created_at": "2025-06-01T12:00:00Z"
                }))
            }),
        );
    let harness = harness(serve(app).await);
    let mut banners = harness.client.notifier().subscribe();

    let session = harness
        .client
        .auth()
        .login("ada@example.com", "pw")
        .await
        .unwrap();

    assert_eq!(session.token, "fresh-token");
    assert!(harness.client.session().is_authenticated());
    assert_eq!(banners.recv().await.unwrap().message, "Welcome back!");
}

#[tokio::test]
async fn failed_mutation_leaves_caches_intact() {
    let list_calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&list_calls);
    let app = Router::new().route(
        "/projects/",
        get(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!([]))
            }
        })
        .post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": "Name is required"})),
            )
        }),
    );
    let harness = harness(serve(app).await);

    harness.client.projects().list().await.unwrap();
    let mut banners = harness.client.notifier().subscribe();

    let create = CreateProject {
        name: "".to_string(),
        description: "".to_string(),
        status: None,
        team_id: None,
    };
    let err = harness.client.projects().create(&create).await;
    assert!(err.is_err());

    // gateway banner, then the mutation's own banner, both with the detail
    assert_eq!(banners.recv().await.unwrap().message, "Name is required");
    assert_eq!(banners.recv().await.unwrap().message, "Name is required");

    harness.client.projects().list().await.unwrap();
    assert_eq!(
        list_calls.load(Ordering::SeqCst),
        1,
        "no invalidation on failure"
    );
}

#[tokio::test]
async fn activity_feed_refreshes_in_the_background() {
    let feed_calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&feed_calls);
    let app = Router::new().route(
        "/activities/recent",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let counter = Arc::clone(&counter);
            async move {
                assert_eq!(params.get("limit").map(String::as_str), Some("10"));
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!([]))
            }
        }),
    );
    let harness = harness(serve(app).await);

    let feed = ActivityFeed::spawn(harness.client.clone(), 10);
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(feed_calls.load(Ordering::SeqCst) >= 1);
    feed.abort();
}
