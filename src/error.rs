//! # 에러 처리 모듈
//!
//! 핸들러가 반환하는 웹 계층 에러 타입을 정의합니다.
//! 저장소 에러(`db::StoreError`)는 작업 종류에 맞는 메시지와 함께
//! 핸들러 경계에서 `AppError`로 변환되며, 그 이상 전파되지 않습니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 카드 API가 내보내는 세 가지 실패 응답(400, 404, 500)
//! - `IntoResponse` 구현: 에러를 `{ "message": ... }` JSON 응답으로 변환

use axum::{
    http::StatusCode,                     // HTTP 상태 코드 (400, 404, 500)
    response::{IntoResponse, Response},   // Axum의 응답 변환 트레이트
    Json,                                 // JSON 응답 래퍼
};
use serde_json::json;
use thiserror::Error;

/// 카드 API의 실패 응답
///
/// 각 variant는 이미 현지화된 메시지를 들고 있습니다.
/// 내부 에러의 상세 내용은 변환 시점에 로그로만 남기고, 여기에는 일반적인 문구만 담습니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 (HTTP 400): ID 형식 오류, 검증 실패
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 대상이 없음 (HTTP 404). 실패가 아니라 "그런 카드는 없다"는 정상적인 판정입니다.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// 결과: `{ "message": "Карточка с указанным _id не найдена" }`
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
