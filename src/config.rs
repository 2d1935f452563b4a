//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `JWT_SECRET`: Bearer 토큰 검증에 사용할 비밀키 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `DB_MAX_CONNECTIONS`: 연결 풀 크기
//! - `MESSAGES_LOCALE`: 응답 메시지 언어 (`ru`, `en`, `ko`)

use crate::messages::Locale;
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite:data/mesto.db?mode=rwc";

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/mesto.db?mode=rwc")
    /// `mode=rwc`: 파일이 없으면 새로 만듭니다.
    pub database_url: String,
    /// Bearer 토큰 서명 검증에 사용하는 비밀키
    pub jwt_secret: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// SQLite 연결 풀 최대 연결 수 (기본값: 5)
    pub db_max_connections: u32,
    /// 에러/확인 메시지 언어 (기본값: 러시아어)
    pub locale: Locale,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `JWT_SECRET`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret: env::var("JWT_SECRET")?, // 필수: 없으면 에러
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or(env::var("PORT").ok(), 3000),
            db_max_connections: parse_or(env::var("DB_MAX_CONNECTIONS").ok(), 5),
            locale: parse_locale(env::var("MESSAGES_LOCALE").ok()),
        })
    }
}

/// 값이 없거나 파싱에 실패하면 기본값을 사용합니다.
fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn parse_locale(raw: Option<String>) -> Locale {
    match raw {
        None => Locale::default(),
        Some(s) => s.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, falling back to {:?}", e, Locale::default());
            Locale::default()
        }),
    }
}
