//! End-to-end tests: the real client (`ApiClient` + `BoardController`)
//! against a locally bound server with a canned completion backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use taskdeck::client::ApiClient;
use taskdeck::client::board::{BoardController, DragTarget};
use taskdeck::errors::GenerateError;
use taskdeck::server::api::AppState;
use taskdeck::server::generate::{CompletionBackend, TicketGenerator};
use taskdeck::server::store::TicketStore;
use taskdeck::server::build_router;
use taskdeck::ticket::TicketStatus;

struct CannedBackend {
    body: String,
}

#[async_trait]
impl CompletionBackend for CannedBackend {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _schema: serde_json::Value,
    ) -> Result<String, GenerateError> {
        Ok(self.body.clone())
    }
}

fn canned_breakdown() -> String {
    json!({
        "tickets": [
            {
                "title": "Scaffold the project",
                "description": "Repo layout, linting, CI",
                "priority": "High",
                "estimatedHours": 2,
                "category": "DevOps"
            },
            {
                "title": "Implement the API",
                "description": "CRUD endpoints for todos",
                "priority": "High",
                "estimatedHours": 6,
                "category": "Backend"
            },
            {
                "title": "Build the UI",
                "description": "List, create, complete",
                "priority": "Medium",
                "estimatedHours": 8,
                "category": "Frontend"
            },
            {
                "title": "Write the docs",
                "description": "README and API reference",
                "priority": "Low",
                "estimatedHours": 1.5,
                "category": "Docs"
            }
        ]
    })
    .to_string()
}

/// Bind the real server on an ephemeral port; return its base URL and a
/// handle to the underlying store for out-of-band assertions.
async fn spawn_server() -> (String, TicketStore) {
    let store = TicketStore::new();
    let state = Arc::new(AppState {
        store: store.clone(),
        generator: TicketGenerator::new(Arc::new(CannedBackend {
            body: canned_breakdown(),
        })),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), store)
}

#[tokio::test]
async fn test_generate_then_drag_to_in_progress() {
    let (base_url, store) = spawn_server().await;
    let mut controller = BoardController::new(ApiClient::new(&base_url));

    let created = controller.generate("Build a todo app").await.unwrap();
    assert_eq!(created.len(), 4);
    assert!(created.iter().all(|t| t.status == TicketStatus::Todo));
    assert_eq!(store.len().unwrap(), 4);

    controller.load().await.unwrap();
    let id = controller.state().tickets()[0].id;

    controller.state_mut().drag_start(id);
    controller
        .state_mut()
        .drag_over(DragTarget::Column(TicketStatus::InProgress));

    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let confirmed = controller.finish_drag().await.unwrap().unwrap();
    assert_eq!(confirmed.status, TicketStatus::InProgress);
    assert!(confirmed.updated_at > confirmed.created_at);

    // The server agrees.
    let server_side = ApiClient::new(&base_url).list_tickets().await.unwrap();
    let moved = server_side.iter().find(|t| t.id == id).unwrap();
    assert_eq!(moved.status, TicketStatus::InProgress);
}

#[tokio::test]
async fn test_failed_drag_confirmation_resyncs_from_server() {
    let (base_url, _store) = spawn_server().await;
    let mut controller = BoardController::new(ApiClient::new(&base_url));

    controller.generate("Build a todo app").await.unwrap();
    controller.load().await.unwrap();
    let id = controller.state().tickets()[0].id;

    controller.state_mut().drag_start(id);
    controller
        .state_mut()
        .drag_over(DragTarget::Column(TicketStatus::Done));
    assert_eq!(
        controller.state().get(id).unwrap().status,
        TicketStatus::Done
    );

    // The ticket vanishes server-side before the commit lands.
    ApiClient::new(&base_url).delete_ticket(id).await.unwrap();

    let err = controller.finish_drag().await.unwrap_err();
    assert!(err.is_not_found());

    // Optimistic state was discarded for the authoritative list.
    assert!(controller.state().get(id).is_none());
    assert_eq!(controller.state().tickets().len(), 3);
    assert!(
        controller
            .state()
            .tickets()
            .iter()
            .all(|t| t.status == TicketStatus::Todo)
    );
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let (base_url, _store) = spawn_server().await;
    let api = ApiClient::new(&base_url);

    let created = api.generate_tickets("Build a todo app").await.unwrap();
    let id = created[0].id;

    api.delete_ticket(id).await.unwrap();
    let err = api.delete_ticket(id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_clear_empties_the_board() {
    let (base_url, store) = spawn_server().await;
    let mut controller = BoardController::new(ApiClient::new(&base_url));

    controller.generate("Build a todo app").await.unwrap();
    assert!(!store.is_empty().unwrap());

    controller.clear().await.unwrap();
    assert!(store.is_empty().unwrap());
    assert!(controller.state().tickets().is_empty());
}

#[tokio::test]
async fn test_empty_prompt_is_rejected_with_400() {
    let (base_url, store) = spawn_server().await;
    let api = ApiClient::new(&base_url);

    let err = api.generate_tickets("").await.unwrap_err();
    match err {
        taskdeck::errors::ClientError::Api { status, message } => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert_eq!(message, "Prompt is required");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert!(store.is_empty().unwrap());
}
