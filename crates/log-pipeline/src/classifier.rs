//! 락 이벤트 분류기 -- 메시지 패턴 매칭
//!
//! [`EventClassifier`]는 구조화 레코드의 메시지를 세 가지 락 생명주기 패턴과 비교해
//! [`ClassifiedEvent`]를 만듭니다. 패턴은 다음 우선순위로 검사하며 처음 매칭된 것이 이깁니다.
//!
//! 1. expired: `register-ttl\..*lock-expired`
//! 2. acquired: `lock\..*acquired-lock`
//! 3. released: `release\..*released-lock`
//!
//! 어느 패턴에도 맞지 않는 레코드는 에러 없이 건너뜁니다.
//! 기본 패턴은 프로세스 전체에서 한 번만 컴파일됩니다.

use std::sync::LazyLock;

use regex::Regex;

use lockviz_core::types::{ClassifiedEvent, EventCategory, LogLevel, LogRecord};

use crate::error::LogPipelineError;

/// 락 만료 패턴
pub const EXPIRED_PATTERN: &str = r"register-ttl\..*lock-expired";
/// 락 획득 패턴
pub const ACQUIRED_PATTERN: &str = r"lock\..*acquired-lock";
/// 락 해제 패턴
pub const RELEASED_PATTERN: &str = r"release\..*released-lock";

static DEFAULT_PATTERNS: LazyLock<LockPatterns> = LazyLock::new(|| LockPatterns {
    expired: Regex::new(EXPIRED_PATTERN).expect("expired-lock pattern is a valid regex"),
    acquired: Regex::new(ACQUIRED_PATTERN).expect("acquired-lock pattern is a valid regex"),
    released: Regex::new(RELEASED_PATTERN).expect("released-lock pattern is a valid regex"),
});

/// 컴파일된 락 이벤트 패턴 세트
#[derive(Debug, Clone)]
pub struct LockPatterns {
    expired: Regex,
    acquired: Regex,
    released: Regex,
}

impl LockPatterns {
    /// 사용자 정의 패턴을 컴파일합니다.
    pub fn compile(expired: &str, acquired: &str, released: &str) -> Result<Self, LogPipelineError> {
        Ok(Self {
            expired: Regex::new(expired)?,
            acquired: Regex::new(acquired)?,
            released: Regex::new(released)?,
        })
    }

    /// 메시지를 분류합니다. 우선순위: expired > acquired > released.
    pub fn categorize(&self, message: &str) -> Option<EventCategory> {
        if self.expired.is_match(message) {
            Some(EventCategory::Expired)
        } else if self.acquired.is_match(message) {
            Some(EventCategory::Acquired)
        } else if self.released.is_match(message) {
            Some(EventCategory::Released)
        } else {
            None
        }
    }
}

impl Default for LockPatterns {
    fn default() -> Self {
        DEFAULT_PATTERNS.clone()
    }
}

/// 락 이벤트 분류기
///
/// 상태가 없으므로 같은 입력에 대해 항상 같은 결과를 냅니다.
#[derive(Debug, Clone, Default)]
pub struct EventClassifier {
    patterns: LockPatterns,
}

impl EventClassifier {
    /// 기본 패턴으로 분류기를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 지정한 패턴 세트로 분류기를 생성합니다.
    pub fn with_patterns(patterns: LockPatterns) -> Self {
        Self { patterns }
    }

    /// 메시지 텍스트만으로 분류합니다.
    pub fn categorize(&self, message: &str) -> Option<EventCategory> {
        self.patterns.categorize(message)
    }

    /// 레코드 하나를 분류합니다. 매칭되지 않으면 `None`.
    ///
    /// `errored`는 ERROR 레벨일 때만 true입니다 (FATAL 제외).
    pub fn classify_record(&self, record: &LogRecord) -> Option<ClassifiedEvent> {
        let category = self.categorize(&record.message)?;
        Some(ClassifiedEvent {
            timestamp: record.timestamp,
            category,
            errored: record.level == LogLevel::Error,
        })
    }

    /// 레코드 시퀀스를 입력 순서대로 분류합니다.
    ///
    /// 지연(lazy) 이터레이터이므로 무한 스트림에도 사용할 수 있습니다.
    pub fn classify<'a, I>(&'a self, records: I) -> impl Iterator<Item = ClassifiedEvent> + 'a
    where
        I: IntoIterator<Item = LogRecord>,
        I::IntoIter: 'a,
    {
        records
            .into_iter()
            .filter_map(move |record| self.classify_record(&record))
    }
}
