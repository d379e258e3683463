//! Shared stubs for the flow tests: an in-process spell backend and an
//! always-accepting identity provider, both real HTTP servers on
//! ephemeral ports.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use grimoire_app::views::detail::Confirm;
use grimoire_auth::IdentityGateway;
use grimoire_client::SpellApi;

/// What the stub backend saw, shared with the test body.
#[derive(Debug, Default)]
pub struct Backend {
    pub create_bodies: Vec<Value>,
    pub update_bodies: Vec<(String, Value)>,
    pub delete_ids: Vec<String>,
    /// When set, DELETE responds with this status and a `message` body.
    pub fail_delete_with: Option<(u16, String)>,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

pub fn spell_json(id: &str, created_at: &str) -> Value {
    json!({
        "_id": id,
        "nom": "Fireball",
        "categorie": "Offensif",
        "description": "Boule de feu",
        "niveauDifficulte": 5,
        "puissance": 7,
        "tags": ["fire", "aoe"],
        "estInterdit": false,
        "dateCreation": created_at,
    })
}

pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    addr
}

/// Spawn the spell backend stub and a client pointed at it.
pub async fn spawn_backend() -> (SpellApi, SharedBackend) {
    async fn create(State(backend): State<SharedBackend>, Json(body): Json<Value>) -> Json<Value> {
        backend.lock().unwrap().create_bodies.push(body);
        Json(json!({ "sort": spell_json("created-1", "2024-01-15T10:30:00.000Z") }))
    }

    async fn get_one(Path(id): Path<String>) -> Json<Value> {
        Json(json!({ "sort": spell_json(&id, "2023-06-01T08:00:00.000Z") }))
    }

    async fn update(
        State(backend): State<SharedBackend>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let sort = body["sort"].clone();
        backend.lock().unwrap().update_bodies.push((id.clone(), body));
        Json(json!({ "sort": sort.as_object().map(|sort| {
            let mut sort = sort.clone();
            sort.insert("_id".into(), json!(id));
            Value::Object(sort)
        }).unwrap_or_default() }))
    }

    async fn delete_one(
        State(backend): State<SharedBackend>,
        Path(id): Path<String>,
    ) -> (StatusCode, Json<Value>) {
        let mut backend = backend.lock().unwrap();
        if let Some((status, message)) = backend.fail_delete_with.clone() {
            return (
                StatusCode::from_u16(status).expect("valid status"),
                Json(json!({ "message": message })),
            );
        }
        backend.delete_ids.push(id);
        (StatusCode::OK, Json(json!({ "message": "Sort supprimé." })))
    }

    async fn list() -> Json<Value> {
        Json(json!({ "sorts": [] }))
    }

    let backend: SharedBackend = Arc::default();
    let app = Router::new()
        .route("/api/sorts", get(list).post(create))
        .route(
            "/api/sorts/{id}",
            get(get_one).put(update).delete(delete_one),
        )
        .with_state(Arc::clone(&backend));
    let addr = spawn(app).await;

    (SpellApi::new(format!("http://{addr}/api")), backend)
}

/// Spawn an identity provider that accepts any credentials and return a
/// gateway pointed at it.
pub async fn spawn_gateway() -> IdentityGateway {
    async fn sign_in(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({ "email": body["email"], "idToken": "stub-token" }))
    }

    let app = Router::new().route(
        "/v1/accounts:signInWithPassword",
        axum::routing::post(sign_in),
    );
    let addr = spawn(app).await;

    IdentityGateway::new(format!("http://{addr}/v1"), "test-key")
}

/// Confirmation stub with a canned answer.
pub struct CannedConfirm(pub bool);

#[async_trait::async_trait]
impl Confirm for CannedConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
