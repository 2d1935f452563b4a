//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과 라우터 구성을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `cards`: 카드 CRUD 및 좋아요 핸들러, 공유 상태(`AppState`)
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod cards;
pub mod health;

pub use cards::*;
pub use health::*;

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 애플리케이션 라우터를 생성합니다.
///
/// axum 0.8부터 경로 파라미터는 `{card_id}` 문법을 사용합니다.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cards", get(list_cards).post(create_card))
        .route("/cards/{card_id}", delete(delete_card))
        .route("/cards/{card_id}/likes", delete(unlike_card).put(like_card))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
