//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! 디코더가 생성하는 [`LogRecord`], 분류기가 생성하는 [`ClassifiedEvent`],
//! 레이아웃 엔진이 생성하는 [`SourceSeries`]를 정의합니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 로그 심각도 레벨 (lager 기준)
///
/// 숫자 표현은 lager의 `log_level` 필드 값과 같습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Error,
    Fatal,
}

impl LogLevel {
    /// lager 숫자 레벨(0~3)에서 변환합니다.
    pub fn from_lager_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Debug),
            1 => Some(Self::Info),
            2 => Some(Self::Error),
            3 => Some(Self::Fatal),
            _ => None,
        }
    }

    /// 문자열 레벨에서 변환합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "error" => Some(Self::Error),
            "fatal" => Some(Self::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// 구조화 로그 레코드
///
/// 디코더가 한 라인에서 만들어내는 레코드입니다. 분류 직후 버려집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// 로거/컴포넌트 이름 (예: "locket")
    pub source: String,
    /// 심각도
    pub level: LogLevel,
    /// 타임스탬프
    pub timestamp: DateTime<Utc>,
    /// 자유 형식 메시지 (예: "locket.lock.acquired-lock")
    pub message: String,
    /// lager 세션 ID (`data.session`)
    pub session: String,
    /// 에러 문자열 (`data.error`, ERROR/FATAL 레벨에서만 추출)
    pub error: Option<String>,
    /// 스택 트레이스 (`data.trace`)
    pub trace: Option<String>,
    /// 나머지 data 필드
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.level,
            self.timestamp.to_rfc3339(),
            self.source,
            self.message,
        )
    }
}

/// 한 라인의 디코딩 결과
///
/// 구조화되지 않은 라인도 정상 결과이며, 원문을 그대로 담아 내보냅니다.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLine {
    /// 기대한 구조화 형식으로 파싱됨
    Structured(LogRecord),
    /// 구조화 형식이 아님 (원문 보존)
    Unstructured(String),
}

impl DecodedLine {
    /// 구조화 라인 여부
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    /// 구조화 레코드를 꺼냅니다. 구조화되지 않은 라인이면 `None`.
    pub fn into_record(self) -> Option<LogRecord> {
        match self {
            Self::Structured(record) => Some(record),
            Self::Unstructured(_) => None,
        }
    }
}

/// 락 생명주기 이벤트 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Acquired,
    Released,
    Expired,
}

impl EventCategory {
    /// 분류 개수. 소스 밴드는 최소 이만큼의 행을 가져야 합니다.
    pub const COUNT: u32 = 3;

    /// 소스 밴드 안에서의 행 오프셋
    pub fn row_offset(self) -> u32 {
        match self {
            Self::Acquired => 0,
            Self::Released => 1,
            Self::Expired => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Acquired => "acquired",
            Self::Released => "released",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 분류된 락 이벤트
///
/// 생성 후 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEvent {
    /// 원본 레코드의 타임스탬프
    pub timestamp: DateTime<Utc>,
    /// 이벤트 분류
    pub category: EventCategory,
    /// 원본 레코드가 ERROR 레벨이었는지 여부 (FATAL 제외)
    pub errored: bool,
}

/// 차트 좌표 한 점 (시각, 레인)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanePoint {
    pub timestamp: DateTime<Utc>,
    pub lane: f64,
}

/// 로그 소스 하나의 좌표 시리즈
///
/// 포인트 순서는 원본 로그 순서이며 시간순 정렬을 보장하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSeries {
    /// 입력 순서상의 소스 인덱스
    pub index: usize,
    /// 표시 이름 (입력 파일 경로)
    pub name: String,
    /// 좌표 목록
    pub points: Vec<LanePoint>,
}

impl SourceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
