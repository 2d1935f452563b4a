//! # 미들웨어 모듈
//!
//! - `auth`: Bearer 토큰에서 요청한 사용자(`AuthUser`)를 추출하는 Extractor

pub mod auth;
