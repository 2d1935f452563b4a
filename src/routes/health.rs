//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /health` → `{ "status": "ok" }` (저장소가 응답하지 않으면 500)
//!
//! 인증 없이 호출할 수 있으며, 로드밸런서나 컨테이너 오케스트레이터가 사용합니다.

use crate::{
    error::AppError,
    messages::{self, Failure, Operation},
    routes::cards::AppState,
};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 저장소 상태를 확인합니다.
///
/// 단순히 프로세스가 살아 있는지만이 아니라 `SELECT 1`로 DB 연결까지 확인합니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.store.ping().await.map_err(|e| {
        tracing::error!(error = ?e, "Health check failed");
        AppError::Internal(
            messages::message(state.locale, Operation::List, Failure::Unknown).to_string(),
        )
    })?;

    Ok(Json(json!({ "status": "ok" })))
}
