//! # 카드 모델 정의
//!
//! 카드(Card)는 사용자가 공유하는 이미지 한 장입니다.
//!
//! ## 구조체 역할
//! - `Card`: API 응답으로 나가는 카드 (JSON 필드명은 기존 프론트엔드와 동일하게 `_id`, `createdAt`)
//! - `CardRow`: SQL 조회 결과 한 행. 좋아요 목록은 JSON 배열 문자열로 집계되어 옵니다.
//! - `CreateCardRequest`: 카드 생성 시 클라이언트가 보내는 JSON 본문

use serde::{Deserialize, Serialize};

/// 카드 엔티티
///
/// `likes`는 집합(set)입니다. 같은 사용자 ID가 두 번 들어가지 않으며,
/// 배열 안의 순서에는 의미가 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// 카드 고유 식별자 (UUIDv7 문자열). 생성 시 저장소가 부여합니다.
    #[serde(rename = "_id")]
    pub id: String,
    /// 카드 제목
    pub name: String,
    /// 이미지 주소
    pub link: String,
    /// 카드를 만든 사용자 ID
    pub owner: String,
    /// 좋아요를 누른 사용자 ID 목록
    pub likes: Vec<String>,
    /// 생성 시각 (UTC, ISO 8601 밀리초)
    pub created_at: String,
}

/// `cards` 테이블 한 행 + 집계된 좋아요 목록
#[derive(Debug, sqlx::FromRow)]
pub struct CardRow {
    pub id: String,
    pub name: String,
    pub link: String,
    pub owner: String,
    /// `json_group_array(user_id)` 결과. 좋아요가 없으면 `"[]"`.
    pub likes: String,
    pub created_at: String,
}

impl TryFrom<CardRow> for Card {
    type Error = serde_json::Error;

    fn try_from(row: CardRow) -> Result<Self, Self::Error> {
        Ok(Self {
            likes: serde_json::from_str(&row.likes)?,
            id: row.id,
            name: row.name,
            link: row.link,
            owner: row.owner,
            created_at: row.created_at,
        })
    }
}

/// 카드 생성 요청 — `POST /cards`의 요청 본문
///
/// 필드가 빠진 요청도 일단 받아들이고(빈 문자열), 검증은 저장소에서 합니다.
/// 그래야 필드 누락과 빈 값이 같은 검증 에러(400)로 응답됩니다.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCardRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(likes: &str) -> CardRow {
        CardRow {
            id: "0192a3b4-0000-7000-8000-000000000001".to_string(),
            name: "Oak".to_string(),
            link: "http://x/oak.png".to_string(),
            owner: "owner".to_string(),
            likes: likes.to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn row_with_empty_like_array_converts() {
        let card = Card::try_from(row("[]")).unwrap();
        assert!(card.likes.is_empty());
        assert_eq!(card.name, "Oak");
    }

    #[test]
    fn row_with_broken_like_array_is_rejected() {
        assert!(Card::try_from(row("not json")).is_err());
    }

    #[test]
    fn card_serializes_with_wire_field_names() {
        let card = Card::try_from(row(r#"["u2"]"#)).unwrap();
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["_id"], "0192a3b4-0000-7000-8000-000000000001");
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["likes"], serde_json::json!(["u2"]));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let req: CreateCardRequest = serde_json::from_str(r#"{ "name": "Oak" }"#).unwrap();
        assert_eq!(req.name, "Oak");
        assert_eq!(req.link, "");
    }
}
