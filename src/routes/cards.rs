//! # 카드(Card) 라우트 핸들러
//!
//! 카드 목록 조회, 생성, 삭제, 좋아요/좋아요 취소를 처리하는 HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 성공 응답 |
//! |--------|------|--------|-----------|
//! | GET | /cards | `list_cards` | 200, 카드 배열 |
//! | POST | /cards | `create_card` | 201, 생성된 카드 |
//! | DELETE | /cards/{card_id} | `delete_card` | 200, `{ "message": "Карточка удалена" }` |
//! | PUT | /cards/{card_id}/likes | `like_card` | 200, 갱신된 카드 |
//! | DELETE | /cards/{card_id}/likes | `unlike_card` | 200, 갱신된 카드 |
//!
//! ## 처리 흐름
//! 모든 핸들러는 같은 모양입니다:
//! 1. Extractor로 요청 파라미터와 요청한 사용자(`AuthUser`)를 꺼낸다
//! 2. 저장소 작업을 정확히 한 번 호출한다
//! 3. 결과를 응답으로, `StoreError`를 `AppError`로 바꾼다
//!
//! ## 실패 매핑 (구체적인 것부터)
//! - `StoreError::MalformedInput` → 400 (어떤 ID가 잘못됐는지 알려주는 메시지)
//! - `StoreError::Validation` → 400 (어떤 데이터가 잘못됐는지 알려주는 메시지)
//! - `Ok(None)` (카드 없음) → 404. 에러가 아니므로 로그 레벨도 낮습니다.
//! - `StoreError::Backend` → 500 (작업 이름이 들어간 일반 메시지, 상세 내용은 로그에만)
//! - `StoreError::InvalidData` → 500 (일반 서버 오류 메시지)

use crate::{
    db::{CardStore, StoreError},
    error::AppError,
    messages::{self, Failure, Locale, Operation},
    middleware::auth::AuthUser,
    models::*,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `Arc<dyn CardStore>`라서 clone해도 저장소 자체는 복제되지 않습니다.
#[derive(Clone)]
pub struct AppState {
    /// 카드 저장소 (운영: SQLite, 테스트: 대역 구현도 가능)
    pub store: Arc<dyn CardStore>,
    /// Bearer 토큰 검증용 비밀키
    pub jwt_secret: String,
    /// 응답 메시지 언어
    pub locale: Locale,
}

/// `GET /cards` — 전체 카드 목록을 조회합니다.
///
/// 정렬 순서는 저장소 기본 순서이며, 카드가 없으면 빈 배열 `[]`을 반환합니다.
pub async fn list_cards(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Card>>, AppError> {
    let cards = state
        .store
        .find_all()
        .await
        .map_err(|e| reject(state.locale, Operation::List, e))?;

    tracing::debug!("Listed {} cards", cards.len());
    Ok(Json(cards))
}

/// `POST /cards` — 새 카드를 생성합니다.
///
/// `owner`는 본문이 아니라 인증된 사용자 ID에서 가져옵니다.
///
/// # Extractor
/// - `payload`: 본문 파싱 실패를 Axum의 기본 응답(415/422) 대신 직접 처리하기 위해
///   `Result<Json<_>, JsonRejection>`으로 받습니다. 파싱 실패도 검증 실패(400)로 응답합니다.
pub async fn create_card(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Card>), AppError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected unreadable card body");
        AppError::BadRequest(
            messages::message(state.locale, Operation::Create, Failure::Validation).to_string(),
        )
    })?;

    let card = state
        .store
        .create(&req, &user.user_id)
        .await
        .map_err(|e| reject(state.locale, Operation::Create, e))?;

    tracing::info!(card_id = %card.id, owner = %card.owner, "Card created");
    // 201 Created: 새 리소스가 생성되었음을 나타냅니다
    Ok((StatusCode::CREATED, Json(card)))
}

/// `DELETE /cards/{card_id}` — 카드를 삭제합니다.
///
/// 삭제된 카드를 되돌려주지 않고 확인 메시지만 반환합니다.
pub async fn delete_card(
    State(state): State<AppState>,
    _user: AuthUser,
    card_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let card_id = path_id(state.locale, Operation::Delete, card_id)?;
    let deleted = state
        .store
        .find_by_id_and_delete(&card_id)
        .await
        .map_err(|e| reject(state.locale, Operation::Delete, e))?
        .ok_or_else(|| not_found(state.locale, Operation::Delete, &card_id))?;

    tracing::info!(card_id = %deleted.id, "Card deleted");
    Ok(Json(json!({ "message": messages::deleted(state.locale) })))
}

/// `PUT /cards/{card_id}/likes` — 카드에 좋아요를 추가합니다.
///
/// 같은 사용자가 여러 번 호출해도 `likes`에는 한 번만 들어갑니다.
pub async fn like_card(
    State(state): State<AppState>,
    user: AuthUser,
    card_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Card>, AppError> {
    let card_id = path_id(state.locale, Operation::Like, card_id)?;
    let card = state
        .store
        .add_like(&card_id, &user.user_id)
        .await
        .map_err(|e| reject(state.locale, Operation::Like, e))?
        .ok_or_else(|| not_found(state.locale, Operation::Like, &card_id))?;

    tracing::debug!(card_id = %card.id, user_id = %user.user_id, "Card liked");
    Ok(Json(card))
}

/// `DELETE /cards/{card_id}/likes` — 카드의 좋아요를 취소합니다.
///
/// 좋아요를 누른 적이 없어도 에러가 아니며, 카드를 그대로 반환합니다.
pub async fn unlike_card(
    State(state): State<AppState>,
    user: AuthUser,
    card_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Card>, AppError> {
    let card_id = path_id(state.locale, Operation::Unlike, card_id)?;
    let card = state
        .store
        .remove_like(&card_id, &user.user_id)
        .await
        .map_err(|e| reject(state.locale, Operation::Unlike, e))?
        .ok_or_else(|| not_found(state.locale, Operation::Unlike, &card_id))?;

    tracing::debug!(card_id = %card.id, user_id = %user.user_id, "Card unliked");
    Ok(Json(card))
}

/// 저장소 에러 태그를 HTTP 에러로 바꿉니다.
///
/// 클라이언트 잘못(400)은 warn, 서버 장애(500)는 error 레벨로 남기며
/// 원래 에러 내용은 응답 본문에 절대 넣지 않습니다.
fn reject(locale: Locale, op: Operation, err: StoreError) -> AppError {
    let failure = match err {
        StoreError::MalformedInput(_) => Failure::MalformedInput,
        StoreError::Validation(_) => Failure::Validation,
        StoreError::Backend(_) => Failure::StoreFault,
        StoreError::InvalidData(_) => Failure::Unknown,
    };
    let message = messages::message(locale, op, failure).to_string();

    match failure {
        Failure::MalformedInput | Failure::Validation => {
            tracing::warn!(operation = op.as_str(), error = %err, "Rejected card request");
            AppError::BadRequest(message)
        }
        _ => {
            tracing::error!(operation = op.as_str(), error = ?err, "Card store failure");
            AppError::Internal(message)
        }
    }
}

/// 경로의 `card_id`를 꺼냅니다. UTF-8이 아닌 값 같은 추출 실패는 형식 오류(400)입니다.
fn path_id(
    locale: Locale,
    op: Operation,
    card_id: Result<Path<String>, PathRejection>,
) -> Result<String, AppError> {
    card_id.map(|Path(id)| id).map_err(|rejection| {
        tracing::warn!(operation = op.as_str(), error = %rejection, "Rejected card path");
        AppError::BadRequest(messages::message(locale, op, Failure::MalformedInput).to_string())
    })
}

fn not_found(locale: Locale, op: Operation, card_id: &str) -> AppError {
    tracing::debug!(operation = op.as_str(), %card_id, "Card not found");
    AppError::NotFound(messages::message(locale, op, Failure::NotFound).to_string())
}
