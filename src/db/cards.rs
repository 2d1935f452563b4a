//! # 카드 저장소 SQLite 구현
//!
//! ## 테이블 구조
//! - `cards`: 카드 엔티티 (id, name, link, owner, created_at)
//! - `card_likes`: 카드와 사용자의 좋아요 관계. (card_id, user_id) 복합 기본키가 중복을 막습니다.
//!
//! 조회할 때는 상관 서브쿼리로 좋아요 목록을 JSON 배열 하나로 집계해서
//! 카드 한 장을 한 행으로 가져옵니다.

use super::{CardStore, StoreError, StoreResult};
use crate::models::{Card, CardRow, CreateCardRequest};
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool};
use url::Url;
use uuid::Uuid;

const CARD_SELECT_SQL: &str = r#"
    SELECT c.id, c.name, c.link, c.owner, c.created_at,
           (SELECT json_group_array(l.user_id)
              FROM card_likes l
             WHERE l.card_id = c.id) AS likes
    FROM cards c
"#;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 30;

#[derive(Debug, Clone)]
pub struct SqliteCardStore {
    pool: SqlitePool,
}

impl SqliteCardStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardStore for SqliteCardStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_all(&self) -> StoreResult<Vec<Card>> {
        // UUIDv7은 시간순으로 정렬되므로 id 순서 = 생성 순서입니다.
        let rows = sqlx::query_as::<_, CardRow>(&format!("{CARD_SELECT_SQL} ORDER BY c.id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(into_card).collect()
    }

    async fn create(&self, req: &CreateCardRequest, owner: &str) -> StoreResult<Card> {
        let owner = parse_id(owner)?;
        validate_new_card(req)?;

        // INSERT와 읽기를 한 문장으로 처리해서 그 사이에 다른 요청이 끼어들 틈이 없습니다.
        // 새 카드의 좋아요는 항상 비어 있으므로 json_array()로 채웁니다.
        let id = Uuid::now_v7().to_string();
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            INSERT INTO cards (id, name, link, owner) VALUES (?, ?, ?, ?)
            RETURNING id, name, link, owner, created_at, json_array() AS likes
            "#,
        )
        .bind(&id)
        .bind(&req.name)
        .bind(&req.link)
        .bind(&owner)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(card_id = %id, %owner, "SQLite: card inserted");
        into_card(row)
    }

    async fn find_by_id_and_delete(&self, id: &str) -> StoreResult<Option<Card>> {
        let id = parse_id(id)?;

        // 첫 문장부터 쓰기로 시작해야 합니다.
        // 읽기로 시작하면 동시에 들어온 삭제끼리 쓰기 잠금 승격에서 충돌해 SQLITE_BUSY가 납니다.
        let mut tx = self.pool.begin().await?;
        let likes: Vec<String> =
            sqlx::query_scalar("DELETE FROM card_likes WHERE card_id = ? RETURNING user_id")
                .bind(&id)
                .fetch_all(&mut *tx)
                .await?;

        let row = sqlx::query_as::<_, CardRow>(
            r#"
            DELETE FROM cards WHERE id = ?
            RETURNING id, name, link, owner, created_at, json_array() AS likes
            "#,
        )
        .bind(&id)
        .fetch_optional(&mut *tx)
        .await?;

        // 카드가 없으면 커밋하지 않고 tx를 버립니다 (롤백).
        let Some(row) = row else {
            return Ok(None);
        };
        tx.commit().await?;

        let mut card = into_card(row)?;
        card.likes = likes;
        Ok(Some(card))
    }

    async fn add_like(&self, id: &str, user_id: &str) -> StoreResult<Option<Card>> {
        let id = parse_id(id)?;
        let user_id = parse_id(user_id)?;

        let mut tx = self.pool.begin().await?;
        // 카드가 없으면 SELECT가 0행이므로 아무것도 삽입되지 않습니다.
        // 이미 좋아요한 경우는 INSERT OR IGNORE가 조용히 무시합니다.
        sqlx::query(
            "INSERT OR IGNORE INTO card_likes (card_id, user_id) SELECT id, ? FROM cards WHERE id = ?",
        )
        .bind(&user_id)
        .bind(&id)
        .execute(&mut *tx)
        .await?;

        let card = fetch_card(&mut *tx, &id).await?;
        tx.commit().await?;

        Ok(card)
    }

    async fn remove_like(&self, id: &str, user_id: &str) -> StoreResult<Option<Card>> {
        let id = parse_id(id)?;
        let user_id = parse_id(user_id)?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM card_likes WHERE card_id = ? AND user_id = ?")
            .bind(&id)
            .bind(&user_id)
            .execute(&mut *tx)
            .await?;

        let card = fetch_card(&mut *tx, &id).await?;
        tx.commit().await?;

        Ok(card)
    }
}

/// 카드 한 장을 조회합니다. 좋아요 변경과 같은 트랜잭션 안에서 호출됩니다.
async fn fetch_card<'e, E>(executor: E, id: &str) -> StoreResult<Option<Card>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, CardRow>(&format!("{CARD_SELECT_SQL} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;

    row.map(into_card).transpose()
}

fn into_card(row: CardRow) -> StoreResult<Card> {
    let id = row.id.clone();
    Card::try_from(row).map_err(|e| {
        tracing::error!(card_id = %id, error = %e, "SQLite: failed to decode likes of card");
        StoreError::InvalidData(format!("card {}: {}", id, e))
    })
}

/// 식별자를 UUID로 파싱하고 소문자 하이픈 표기로 정규화합니다.
fn parse_id(raw: &str) -> StoreResult<String> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|e| StoreError::MalformedInput(format!("{:?}: {}", raw, e)))
}

/// 카드 스키마 규칙: 이름 2~30자, 링크는 http(s) 절대 URL
fn validate_new_card(req: &CreateCardRequest) -> StoreResult<()> {
    let name_len = req.name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
        return Err(StoreError::Validation(format!(
            "name must be {}-{} characters long, got {}",
            NAME_MIN_CHARS, NAME_MAX_CHARS, name_len
        )));
    }

    match Url::parse(&req.link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(StoreError::Validation(format!(
            "link is not an http(s) URL: {:?}",
            req.link
        ))),
    }
}
