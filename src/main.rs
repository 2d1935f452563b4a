//! # mesto 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 라우터 설정
//! 6. HTTP 서버 시작

use anyhow::Result;
use mesto::{
    config::Config,
    db::{self, SqliteCardStore},
    routes::{self, AppState},
};
use std::{path::Path, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG 환경변수가 없으면 mesto, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mesto=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!(
        locale = ?config.locale,
        "Starting mesto server on {}:{}",
        config.host,
        config.port
    );

    // ── 4단계: SQLite 연결 풀 생성 ──
    // SQLite는 파일은 만들어도 디렉토리는 만들지 않으므로 미리 생성합니다.
    if let Some(dir) = database_dir(&config.database_url) {
        if !dir.exists() {
            tokio::fs::create_dir_all(dir).await?;
            tracing::info!("Created database directory: {}", dir.display());
        }
    }
    let pool = db::connect(&config.database_url, config.db_max_connections).await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    // ── 6단계: 애플리케이션 상태(State) 생성 ──
    let state = AppState {
        store: Arc::new(SqliteCardStore::new(pool)),
        jwt_secret: config.jwt_secret.clone(),
        locale: config.locale,
    };

    // ── 7단계: 라우터 설정 (CORS, 요청 로깅 포함) ──
    let app = routes::create_router(state);

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// `sqlite:data/mesto.db?mode=rwc` → `data`
///
/// 메모리 DB이거나 디렉토리 없이 파일명만 있으면 `None`을 반환합니다.
fn database_dir(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}
