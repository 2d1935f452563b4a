//! # mesto 카드 서비스
//!
//! 사진 공유 서비스의 카드(Card) API입니다.
//! 바이너리(`main.rs`)는 설정·로깅·DB 초기화만 하고, 실제 구성 요소는 모두 이 라이브러리에 있습니다.
//! 통합 테스트(`tests/`)도 이 라이브러리를 통해 라우터를 직접 호출합니다.

pub mod config;
pub mod db;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod routes;
