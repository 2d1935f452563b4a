//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `card`: 카드(Card), DB 행(CardRow), 생성 요청(CreateCardRequest)
//!
//! `pub use card::*;`로 재공개하므로 `crate::models::Card`처럼 짧게 쓸 수 있습니다.

pub mod card;

pub use card::*;
