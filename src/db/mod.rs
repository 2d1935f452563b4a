//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 카드 저장소의 계약(`CardStore` 트레이트)과 SQLite 구현을 담고 있습니다.
//! 라우트 핸들러(routes/)는 구체 타입이 아니라 `Arc<dyn CardStore>`를 통해서만 저장소를 사용합니다.
//!
//! ## 결과 규약
//! 모든 저장소 작업은 `StoreResult<T>`를 반환합니다.
//! - `Ok(Some(card))` / `Ok(card)`: 성공
//! - `Ok(None)`: 대상 카드가 없음 (에러가 아님 → 핸들러가 404로 응답)
//! - `Err(StoreError::...)`: 형식 오류, 검증 실패, 저장소 장애 중 하나

pub mod cards;

pub use cards::SqliteCardStore;

use crate::models::{Card, CreateCardRequest};
use async_trait::async_trait;
use sqlx::{error::ErrorKind, sqlite::SqlitePoolOptions, SqlitePool};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// 저장소 작업 실패 분류
///
/// 핸들러는 이 태그만 보고 HTTP 상태 코드와 메시지를 고릅니다.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 식별자가 UUID 형식이 아님
    #[error("malformed identifier: {0}")]
    MalformedInput(String),

    /// 저장하려는 데이터가 카드 규칙을 어김 (이름 길이, 링크 형식, DB 제약 조건)
    #[error("validation failed: {0}")]
    Validation(String),

    /// 연결 실패, 풀 타임아웃 등 데이터베이스 자체의 오류
    #[error("database error: {0}")]
    Backend(sqlx::Error),

    /// 저장된 행을 카드로 복원할 수 없음
    #[error("invalid stored card data: {0}")]
    InvalidData(String),
}

// 제약 조건 위반은 저장소가 내린 검증 판정이므로 Backend가 아니라 Validation으로 분류합니다.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if matches!(
                db_err.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation
            ) {
                return StoreError::Validation(db_err.message().to_string());
            }
        }
        StoreError::Backend(err)
    }
}

/// 카드 컬렉션에 대한 저장소 계약
///
/// 각 메서드는 원자적인 단일 저장소 작업입니다.
/// 특히 좋아요 추가/취소는 읽고-고치고-쓰기를 핸들러에 맡기지 않고 저장소 안에서 한 번에 처리합니다.
#[async_trait]
pub trait CardStore: Send + Sync + 'static {
    /// 저장소가 응답하는지 확인합니다 (헬스체크용).
    async fn ping(&self) -> StoreResult<()>;

    /// 모든 카드를 저장소 기본 순서대로 조회합니다.
    async fn find_all(&self) -> StoreResult<Vec<Card>>;

    /// 새 카드를 만듭니다. `owner`는 요청한 사용자의 ID이며 좋아요 목록은 비어 있습니다.
    async fn create(&self, req: &CreateCardRequest, owner: &str) -> StoreResult<Card>;

    /// 카드를 찾아 삭제하고, 삭제 직전의 카드를 돌려줍니다. 없으면 `None`.
    async fn find_by_id_and_delete(&self, id: &str) -> StoreResult<Option<Card>>;

    /// `likes` 집합에 사용자를 추가합니다 (이미 있으면 변화 없음).
    async fn add_like(&self, id: &str, user_id: &str) -> StoreResult<Option<Card>>;

    /// `likes` 집합에서 사용자를 제거합니다 (없으면 변화 없음).
    async fn remove_like(&self, id: &str, user_id: &str) -> StoreResult<Option<Card>>;
}

/// SQLite 연결 풀을 생성합니다.
///
/// `sqlite::memory:`를 쓸 때는 연결마다 별도의 DB가 생기므로 `max_connections`를 1로 두어야 합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// `./migrations`의 SQL 파일 중 아직 적용되지 않은 것을 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
