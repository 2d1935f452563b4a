//! # 응답 메시지 모듈
//!
//! 카드 API가 클라이언트에 돌려주는 `{ "message": ... }` 문자열을 한곳에 모아둡니다.
//! 메시지는 (언어, 작업, 실패 종류) 세 가지로 결정됩니다.
//!
//! 기본 언어는 러시아어(`ru`)이며, 기존 프론트엔드가 기대하는 문구와 글자 하나까지 같아야 합니다.

use std::str::FromStr;

/// 응답 메시지 언어
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ru,
    En,
    Ko,
}

impl FromStr for Locale {
    type Err = String;

    /// `"ru"`, `"en-US"`, `"KO"`처럼 언어 태그의 앞부분만 봅니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s.split(['-', '_']).next().unwrap_or_default();
        match lang.to_ascii_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            "ko" => Ok(Locale::Ko),
            _ => Err(format!("unsupported locale: {}", s)),
        }
    }
}

/// 카드 핸들러가 수행하는 작업
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Delete,
    Like,
    Unlike,
}

impl Operation {
    /// 로그용 이름
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::Like => "like",
            Operation::Unlike => "unlike",
        }
    }
}

/// 실패 종류. 구체적인 것부터 순서대로 나열되어 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// ID 형식이 잘못됨 (400)
    MalformedInput,
    /// 저장소 검증 실패 (400)
    Validation,
    /// 대상 카드가 없음 (404)
    NotFound,
    /// 저장소 장애 (500)
    StoreFault,
    /// 분류되지 않은 장애 (500)
    Unknown,
}

/// 실패 응답 메시지를 반환합니다.
///
/// 목록 조회에는 "카드 없음"이 있을 수 없으므로 `NotFound`는 일반 서버 오류 문구로 대체됩니다.
pub fn message(locale: Locale, op: Operation, failure: Failure) -> &'static str {
    use Failure::*;
    use Operation::*;

    match locale {
        Locale::Ru => match (op, failure) {
            (List, MalformedInput) => "Некорректные данные для поиска карточек",
            (List, Validation) => "Некорректные данные для поиска",
            (List, StoreFault) => "Ошибка базы данных при получении карточек",

            (Create, Validation) => "Переданы некорректные данные при создании карточки",
            (Create, MalformedInput) => "Некорректный owner ID",
            (Create, StoreFault) => "Ошибка базы данных при создании карточки",

            (Delete, MalformedInput) => "Передан некорректный _id карточки",
            (Delete, Validation) => "Некорректные данные для удаления",
            (Delete, NotFound) => "Карточка с указанным _id не найдена",
            (Delete, StoreFault) => "Ошибка базы данных при удалении карточки",

            (Like, MalformedInput) => "Передан некорректный _id карточки для лайка",
            (Like, Validation) => "Некорректные данные для постановки лайка",
            (Like, StoreFault) => "Ошибка базы данных при постановке лайка",

            (Unlike, MalformedInput) => "Передан некорректный _id карточки для снятия лайка",
            (Unlike, Validation) => "Некорректные данные для снятия лайка",
            (Unlike, StoreFault) => "Ошибка базы данных при снятии лайка",

            (Like | Unlike, NotFound) => "Передан несуществующий _id карточки",
            _ => "Ошибка сервера",
        },
        Locale::En => match (op, failure) {
            (List, MalformedInput) => "Invalid data for card lookup",
            (List, Validation) => "Invalid lookup data",
            (List, StoreFault) => "Database error while fetching cards",

            (Create, Validation) => "Invalid data passed when creating a card",
            (Create, MalformedInput) => "Invalid owner ID",
            (Create, StoreFault) => "Database error while creating a card",

            (Delete, MalformedInput) => "Invalid card _id passed",
            (Delete, Validation) => "Invalid data for deletion",
            (Delete, NotFound) => "Card with the given _id was not found",
            (Delete, StoreFault) => "Database error while deleting a card",

            (Like, MalformedInput) => "Invalid card _id passed for like",
            (Like, Validation) => "Invalid data for adding a like",
            (Like, StoreFault) => "Database error while adding a like",

            (Unlike, MalformedInput) => "Invalid card _id passed for removing a like",
            (Unlike, Validation) => "Invalid data for removing a like",
            (Unlike, StoreFault) => "Database error while removing a like",

            (Like | Unlike, NotFound) => "Non-existent card _id passed",
            _ => "Server error",
        },
        Locale::Ko => match (op, failure) {
            (List, MalformedInput) => "카드 조회 조건이 올바르지 않습니다",
            (List, Validation) => "조회 데이터가 올바르지 않습니다",
            (List, StoreFault) => "카드 목록을 가져오는 중 데이터베이스 오류가 발생했습니다",

            (Create, Validation) => "카드 생성 데이터가 올바르지 않습니다",
            (Create, MalformedInput) => "owner ID 형식이 올바르지 않습니다",
            (Create, StoreFault) => "카드를 생성하는 중 데이터베이스 오류가 발생했습니다",

            (Delete, MalformedInput) => "카드 _id 형식이 올바르지 않습니다",
            (Delete, Validation) => "삭제 데이터가 올바르지 않습니다",
            (Delete, NotFound) => "해당 _id의 카드를 찾을 수 없습니다",
            (Delete, StoreFault) => "카드를 삭제하는 중 데이터베이스 오류가 발생했습니다",

            (Like, MalformedInput) => "좋아요할 카드의 _id 형식이 올바르지 않습니다",
            (Like, Validation) => "좋아요 데이터가 올바르지 않습니다",
            (Like, StoreFault) => "좋아요를 추가하는 중 데이터베이스 오류가 발생했습니다",

            (Unlike, MalformedInput) => "좋아요를 취소할 카드의 _id 형식이 올바르지 않습니다",
            (Unlike, Validation) => "좋아요 취소 데이터가 올바르지 않습니다",
            (Unlike, StoreFault) => "좋아요를 취소하는 중 데이터베이스 오류가 발생했습니다",

            (Like | Unlike, NotFound) => "존재하지 않는 카드 _id입니다",
            _ => "서버 오류가 발생했습니다",
        },
    }
}

/// 카드 삭제 성공 메시지
pub fn deleted(locale: Locale) -> &'static str {
    match locale {
        Locale::Ru => "Карточка удалена",
        Locale::En => "Card deleted",
        Locale::Ko => "카드가 삭제되었습니다",
    }
}
