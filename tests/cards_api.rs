use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use mesto::{
    db::{self, CardStore, SqliteCardStore, StoreError, StoreResult},
    messages::Locale,
    middleware::auth::create_access_token,
    models::{Card, CreateCardRequest},
    routes::{create_router, AppState},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "integration-secret";
const U1: &str = "0192a3b4-0000-7000-8000-0000000000a1";
const U2: &str = "0192a3b4-0000-7000-8000-0000000000a2";
const UNUSED_ID: &str = "0192a3b4-ffff-7fff-bfff-ffffffffffff";

async fn app_with_locale(locale: Locale) -> Router {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();
    db::migrate(&pool).await.unwrap();

    create_router(AppState {
        store: Arc::new(SqliteCardStore::new(pool)),
        jwt_secret: SECRET.to_string(),
        locale,
    })
}

async fn app() -> Router {
    app_with_locale(Locale::Ru).await
}

fn bearer(user_id: &str) -> String {
    let token = create_access_token(user_id, SECRET, Duration::minutes(15)).unwrap();
    format!("Bearer {}", token)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(user));

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    call(app, request).await
}

async fn create_oak(app: &Router, owner: &str) -> Card {
    let (status, body) = send(
        app,
        "POST",
        "/cards",
        owner,
        Some(json!({ "name": "Oak", "link": "http://x/oak.png" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = app().await;

    let (status, body) = send(&app, "GET", "/cards", U1, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_card_owned_by_acting_user() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/cards",
        U1,
        Some(json!({ "name": "Oak", "link": "http://x/oak.png" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Oak");
    assert_eq!(body["link"], "http://x/oak.png");
    assert_eq!(body["owner"], U1);
    assert_eq!(body["likes"], json!([]));
    assert!(body["_id"].is_string());

    let (status, list) = send(&app, "GET", "/cards", U2, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["_id"], body["_id"]);
}

#[tokio::test]
async fn create_with_empty_name_is_a_validation_error() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/cards",
        U1,
        Some(json!({ "name": "", "link": "http://x/oak.png" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "Переданы некорректные данные при создании карточки" })
    );
}

#[tokio::test]
async fn create_with_missing_or_unreadable_body_is_a_validation_error() {
    let app = app().await;

    let (status, body) = send(&app, "POST", "/cards", U1, Some(json!({ "name": "Oak" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Переданы некорректные данные при создании карточки"
    );

    let request = Request::builder()
        .method("POST")
        .uri("/cards")
        .header(header::AUTHORIZATION, bearer(U1))
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Oak"))
        .unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Переданы некорректные данные при создании карточки"
    );
}

#[tokio::test]
async fn create_with_malformed_owner_id_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/cards",
        "not-a-uuid",
        Some(json!({ "name": "Oak", "link": "http://x/oak.png" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Некорректный owner ID" }));
}

#[tokio::test]
async fn liking_twice_keeps_a_single_entry() {
    let app = app().await;
    let card = create_oak(&app, U1).await;
    let uri = format!("/cards/{}/likes", card.id);

    let (status, first) = send(&app, "PUT", &uri, U2, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["likes"], json!([U2]));

    let (status, second) = send(&app, "PUT", &uri, U2, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["likes"], json!([U2]));
    assert_eq!(second["owner"], U1);
}

#[tokio::test]
async fn unlike_without_like_leaves_likes_unchanged() {
    let app = app().await;
    let card = create_oak(&app, U1).await;
    let uri = format!("/cards/{}/likes", card.id);

    send(&app, "PUT", &uri, U1, None).await;

    let (status, body) = send(&app, "DELETE", &uri, U2, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], json!([U1]));

    let (status, body) = send(&app, "DELETE", &uri, U1, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["likes"], json!([]));
}

#[tokio::test]
async fn delete_unknown_card_is_not_found() {
    let app = app().await;

    let (status, body) = send(&app, "DELETE", &format!("/cards/{}", UNUSED_ID), U1, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "message": "Карточка с указанным _id не найдена" })
    );
}

#[tokio::test]
async fn delete_with_malformed_id_is_bad_request() {
    let app = app().await;

    let (status, body) = send(&app, "DELETE", "/cards/12345", U1, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Передан некорректный _id карточки" }));
}

#[tokio::test]
async fn delete_existing_card_confirms_and_removes_it() {
    let app = app().await;
    let card = create_oak(&app, U1).await;

    let (status, body) = send(&app, "DELETE", &format!("/cards/{}", card.id), U1, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Карточка удалена" }));

    let (_, list) = send(&app, "GET", "/cards", U1, None).await;
    assert_eq!(list, json!([]));

    let (status, _) = send(&app, "DELETE", &format!("/cards/{}", card.id), U1, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn like_routes_distinguish_malformed_and_missing_ids() {
    let app = app().await;

    let (status, body) = send(&app, "PUT", "/cards/abc/likes", U1, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Передан некорректный _id карточки для лайка"
    );

    let (status, body) = send(&app, "DELETE", "/cards/abc/likes", U1, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Передан некорректный _id карточки для снятия лайка"
    );

    let missing = format!("/cards/{}/likes", UNUSED_ID);
    for method in ["PUT", "DELETE"] {
        let (status, body) = send(&app, method, &missing, U1, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Передан несуществующий _id карточки");
    }
}

#[tokio::test]
async fn non_utf8_card_id_gets_json_message_body() {
    let app = app().await;

    let cases = [
        ("DELETE", "/cards/%FF", "Передан некорректный _id карточки"),
        ("PUT", "/cards/%FF/likes", "Передан некорректный _id карточки для лайка"),
        ("DELETE", "/cards/%FF/likes", "Передан некорректный _id карточки для снятия лайка"),
    ];

    for (method, uri, expected) in cases {
        let (status, body) = send(&app, method, uri, U1, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(body, json!({ "message": expected }));
    }
}

#[tokio::test]
async fn requests_without_valid_token_are_unauthorized() {
    let app = app().await;

    let request = Request::builder()
        .uri("/cards")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let request = Request::builder()
        .uri("/cards")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn messages_follow_configured_locale() {
    let app = app_with_locale(Locale::En).await;

    let (status, body) = send(&app, "DELETE", &format!("/cards/{}", UNUSED_ID), U1, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Card with the given _id was not found");

    let card = create_oak(&app, U1).await;
    let (_, body) = send(&app, "DELETE", &format!("/cards/{}", card.id), U1, None).await;
    assert_eq!(body, json!({ "message": "Card deleted" }));
}

#[tokio::test]
async fn health_reports_ok_with_working_store() {
    let app = app().await;

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = call(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

/// 항상 실패하는 저장소. `corrupt`이면 InvalidData, 아니면 Backend 장애를 흉내 냅니다.
struct BrokenStore {
    corrupt: bool,
}

impl BrokenStore {
    fn fail<T>(&self) -> StoreResult<T> {
        if self.corrupt {
            Err(StoreError::InvalidData("likes column is not JSON".to_string()))
        } else {
            Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
        }
    }
}

#[async_trait]
impl CardStore for BrokenStore {
    async fn ping(&self) -> StoreResult<()> {
        self.fail()
    }

    async fn find_all(&self) -> StoreResult<Vec<Card>> {
        self.fail()
    }

    async fn create(&self, _req: &CreateCardRequest, _owner: &str) -> StoreResult<Card> {
        self.fail()
    }

    async fn find_by_id_and_delete(&self, _id: &str) -> StoreResult<Option<Card>> {
        self.fail()
    }

    async fn add_like(&self, _id: &str, _user_id: &str) -> StoreResult<Option<Card>> {
        self.fail()
    }

    async fn remove_like(&self, _id: &str, _user_id: &str) -> StoreResult<Option<Card>> {
        self.fail()
    }
}

fn broken_app(corrupt: bool) -> Router {
    create_router(AppState {
        store: Arc::new(BrokenStore { corrupt }),
        jwt_secret: SECRET.to_string(),
        locale: Locale::Ru,
    })
}

#[tokio::test]
async fn store_faults_become_server_errors_naming_the_operation() {
    let app = broken_app(false);
    let card_uri = format!("/cards/{}", UNUSED_ID);
    let likes_uri = format!("/cards/{}/likes", UNUSED_ID);

    let cases = [
        ("GET", "/cards", None, "Ошибка базы данных при получении карточек"),
        (
            "POST",
            "/cards",
            Some(json!({ "name": "Oak", "link": "http://x/oak.png" })),
            "Ошибка базы данных при создании карточки",
        ),
        ("DELETE", card_uri.as_str(), None, "Ошибка базы данных при удалении карточки"),
        ("PUT", likes_uri.as_str(), None, "Ошибка базы данных при постановке лайка"),
        ("DELETE", likes_uri.as_str(), None, "Ошибка базы данных при снятии лайка"),
    ];

    for (method, uri, body, expected) in cases {
        let (status, response) = send(&app, method, uri, U1, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(response, json!({ "message": expected }));
    }
}

#[tokio::test]
async fn unclassified_faults_use_generic_message() {
    let app = broken_app(true);

    let (status, body) = send(&app, "GET", "/cards", U1, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Ошибка сервера" }));

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, _) = call(&app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
