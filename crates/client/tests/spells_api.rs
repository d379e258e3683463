//! Integration tests for [`SpellApi`] against an in-process stub server.
//!
//! The stub is a small axum router bound to an ephemeral port; the real
//! reqwest-backed client is pointed at it, so these tests cover query
//! serialization, envelopes, and error-message extraction end to end.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use grimoire_client::{ApiError, SpellApi};
use grimoire_core::spell::{Category, SpellFilters, SpellInput};

/// What the stub server saw, shared with the test body.
#[derive(Debug, Default)]
struct Recorded {
    list_queries: Vec<Option<String>>,
    create_bodies: Vec<Value>,
    deleted_ids: Vec<String>,
}

type Shared = Arc<Mutex<Recorded>>;

fn spell_json(id: &str) -> Value {
    json!({
        "_id": id,
        "nom": "Boule de feu",
        "categorie": "Offensif",
        "description": "Projette une boule de feu.",
        "niveauDifficulte": 5,
        "puissance": 7,
        "tags": ["feu", "zone"],
        "estInterdit": false,
        "dateCreation": "2024-01-15T10:30:00.000Z"
    })
}

fn sample_input() -> SpellInput {
    SpellInput {
        name: "Boule de feu".into(),
        category: Category::Offensive,
        description: "Projette une boule de feu.".into(),
        difficulty: 5,
        power: 7,
        tags: vec!["feu".into(), "zone".into()],
        forbidden: false,
        created_at: "2024-01-15T10:30:00.000Z".into(),
    }
}

/// Routes mirroring the real backend's `/api/sorts` surface.
fn stub_router(recorded: Shared) -> Router {
    async fn list(State(recorded): State<Shared>, RawQuery(query): RawQuery) -> Json<Value> {
        recorded.lock().unwrap().list_queries.push(query);
        Json(json!({ "sorts": [spell_json("abc123")] }))
    }

    async fn create(State(recorded): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
        recorded.lock().unwrap().create_bodies.push(body);
        Json(json!({ "sort": spell_json("created-1") }))
    }

    async fn get_one(Path(id): Path<String>) -> Json<Value> {
        Json(json!({ "sort": spell_json(&id) }))
    }

    async fn update(Path(id): Path<String>, Json(_body): Json<Value>) -> Json<Value> {
        Json(json!({ "sort": spell_json(&id) }))
    }

    async fn delete_one(State(recorded): State<Shared>, Path(id): Path<String>) -> Json<Value> {
        recorded.lock().unwrap().deleted_ids.push(id);
        Json(json!({ "message": "Sort supprimé." }))
    }

    Router::new()
        .route("/api/sorts", get(list).post(create))
        .route(
            "/api/sorts/{id}",
            get(get_one).put(update).delete(delete_one),
        )
        .with_state(recorded)
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    addr
}

async fn spawn_stub() -> (SpellApi, Shared) {
    let recorded: Shared = Arc::default();
    let addr = spawn(stub_router(Arc::clone(&recorded))).await;
    (SpellApi::new(format!("http://{addr}/api")), recorded)
}

// ---------------------------------------------------------------------------
// Filter serialization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_without_filters_sends_no_query_string() {
    let (api, recorded) = spawn_stub().await;

    let spells = api.list(&SpellFilters::default()).await.expect("list ok");

    assert_eq!(spells.len(), 1);
    assert_eq!(spells[0].name, "Boule de feu");
    assert_eq!(recorded.lock().unwrap().list_queries, vec![None]);
}

#[tokio::test]
async fn list_with_category_sends_exactly_one_parameter() {
    let (api, recorded) = spawn_stub().await;
    let filters = SpellFilters {
        category: Some(Category::Offensive),
        forbidden: None,
    };

    api.list(&filters).await.expect("list ok");

    assert_eq!(
        recorded.lock().unwrap().list_queries,
        vec![Some("categorie=Offensif".to_string())]
    );
}

#[tokio::test]
async fn list_with_forbidden_filter_sends_boolean_parameter() {
    let (api, recorded) = spawn_stub().await;
    let filters = SpellFilters {
        category: None,
        forbidden: Some(true),
    };

    api.list(&filters).await.expect("list ok");

    assert_eq!(
        recorded.lock().unwrap().list_queries,
        vec![Some("estInterdit=true".to_string())]
    );
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_unwraps_the_item_envelope() {
    let (api, _recorded) = spawn_stub().await;

    let spell = api.get("abc123").await.expect("get ok");

    assert_eq!(spell.id, "abc123");
    assert_eq!(spell.category, Category::Offensive);
}

#[tokio::test]
async fn create_wraps_the_payload_in_a_sort_envelope() {
    let (api, recorded) = spawn_stub().await;

    let created = api.create(&sample_input()).await.expect("create ok");

    assert_eq!(created.id, "created-1");
    let recorded = recorded.lock().unwrap();
    let bodies = &recorded.create_bodies;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["sort"]["nom"], "Boule de feu");
    assert_eq!(bodies[0]["sort"]["estInterdit"], false);
    assert_eq!(bodies[0]["sort"]["dateCreation"], "2024-01-15T10:30:00.000Z");
    assert!(bodies[0]["sort"].get("_id").is_none());
}

#[tokio::test]
async fn delete_discards_the_acknowledgement_body() {
    let (api, recorded) = spawn_stub().await;

    api.delete("abc123").await.expect("delete ok");

    assert_eq!(recorded.lock().unwrap().deleted_ids, vec!["abc123"]);
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failure_carries_the_server_message_when_present() {
    async fn not_found() -> (StatusCode, Json<Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Sort introuvable." })),
        )
    }
    let app = Router::new().route("/api/sorts/{id}", get(not_found));
    let addr = spawn(app).await;
    let api = SpellApi::new(format!("http://{addr}/api"));

    let err = api.get("missing").await.expect_err("must fail");

    assert_matches!(err, ApiError::Api { status: 404, ref message } if message == "Sort introuvable.");
}

#[tokio::test]
async fn failure_falls_back_to_fixed_text_without_a_message() {
    async fn boom() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "kaboom")
    }
    let app = Router::new().route("/api/sorts", get(boom));
    let addr = spawn(app).await;
    let api = SpellApi::new(format!("http://{addr}/api"));

    let err = api
        .list(&SpellFilters::default())
        .await
        .expect_err("must fail");

    assert_matches!(err, ApiError::Api { status: 500, ref message } if message == "Erreur lors de la récupération des sorts.");
}

#[tokio::test]
async fn json_error_body_without_message_field_uses_fallback() {
    async fn rejected() -> (StatusCode, Json<Value>) {
        (StatusCode::BAD_REQUEST, Json(json!({ "code": "BAD" })))
    }
    let app = Router::new().route("/api/sorts", axum::routing::post(rejected));
    let addr = spawn(app).await;
    let api = SpellApi::new(format!("http://{addr}/api"));

    let err = api.create(&sample_input()).await.expect_err("must fail");

    assert_matches!(err, ApiError::Api { status: 400, ref message } if message == "Erreur lors de l'ajout du sort.");
}
