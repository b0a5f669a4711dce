//! lager 로그 디코더
//!
//! Cloud Foundry 컴포넌트가 출력하는 lager JSON 라인을 [`LogRecord`]로 변환합니다.
//!
//! # 지원 형식
//! - 구형: `{"timestamp":"1487278236.563640118","source":"locket","message":"...","log_level":1,"data":{...}}`
//! - 신형: `{"timestamp":"2017-02-16T20:50:36.563640118Z","level":"info",...}`
//! - 첫 `{` 앞의 접두어(syslog 헤더 등)는 무시합니다.
//!
//! 구조가 맞지 않는 라인은 에러가 아니라 [`DecodedLine::Unstructured`]입니다.
//! 에러는 UTF-8 위반과 최대 길이 초과 같은 프레이밍 문제에만 사용됩니다.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use lockviz_core::error::{DecodeError, LockvizError};
use lockviz_core::pipeline::LineDecoder;
use lockviz_core::types::{DecodedLine, LogLevel, LogRecord};

/// lager JSON 라인 디코더
#[derive(Debug, Clone)]
pub struct LagerDecoder {
    /// 최대 허용 라인 길이 (바이트)
    max_line_length: usize,
}

impl LagerDecoder {
    /// 새 디코더를 생성합니다.
    pub fn new() -> Self {
        Self {
            max_line_length: 1024 * 1024, // 1MB
        }
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn with_max_line_length(mut self, size: usize) -> Self {
        self.max_line_length = size;
        self
    }

    /// 라인 하나를 디코딩합니다.
    ///
    /// 끝의 `\n`, `\r\n`은 제거합니다.
    pub fn decode_line(&self, line: usize, raw: &[u8]) -> Result<DecodedLine, DecodeError> {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        if raw.len() > self.max_line_length {
            return Err(DecodeError::LineTooLong {
                line,
                size: raw.len(),
                max: self.max_line_length,
            });
        }

        let text = std::str::from_utf8(raw).map_err(|e| DecodeError::InvalidUtf8 {
            line,
            offset: e.valid_up_to(),
        })?;

        let record = text
            .find('{')
            .and_then(|idx| Self::first_json_object(&text[idx..]))
            .and_then(Self::to_record);

        Ok(match record {
            Some(record) => DecodedLine::Structured(record),
            None => DecodedLine::Unstructured(text.to_owned()),
        })
    }

    /// 문자열 앞부분의 JSON 값 하나만 읽습니다. 뒤따르는 텍스트는 무시합니다.
    fn first_json_object(text: &str) -> Option<Map<String, Value>> {
        let mut values = serde_json::Deserializer::from_str(text).into_iter::<Value>();
        match values.next()? {
            Ok(Value::Object(obj)) => Some(obj),
            _ => None,
        }
    }

    /// JSON 객체를 lager 레코드로 변환합니다. lager 형식이 아니면 `None`.
    fn to_record(mut obj: Map<String, Value>) -> Option<LogRecord> {
        let timestamp = Self::parse_timestamp(obj.get("timestamp")?.as_str()?)?;
        let source = Self::optional_string(&obj, "source")?;
        let message = Self::optional_string(&obj, "message")?;
        let level = Self::parse_level(&obj)?;

        let mut data = match obj.remove("data") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(data)) => data,
            Some(_) => return None,
        };

        let error = if matches!(level, LogLevel::Error | LogLevel::Fatal) {
            Self::lift_string(&mut data, "error")?
        } else {
            None
        };
        let trace = Self::lift_string(&mut data, "trace")?;
        let session = Self::lift_string(&mut data, "session")?.unwrap_or_default();

        Some(LogRecord {
            source,
            level,
            timestamp,
            message,
            session,
            error,
            trace,
            data,
        })
    }

    /// 없으면 빈 문자열, 문자열이 아니면 `None`.
    fn optional_string(obj: &Map<String, Value>, field: &str) -> Option<String> {
        match obj.get(field) {
            None | Some(Value::Null) => Some(String::new()),
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => None,
        }
    }

    /// `data`에서 문자열 필드를 꺼냅니다.
    ///
    /// 바깥 `Option`은 형식 적합 여부, 안쪽 `Option`은 필드 존재 여부입니다.
    fn lift_string(data: &mut Map<String, Value>, field: &str) -> Option<Option<String>> {
        match data.remove(field) {
            None => Some(None),
            Some(Value::String(s)) => Some(Some(s)),
            Some(_) => None,
        }
    }

    /// `log_level`(정수) 또는 `level`(문자열) 필드에서 레벨을 읽습니다.
    ///
    /// 둘 다 없으면 lager 기본값인 DEBUG입니다.
    fn parse_level(obj: &Map<String, Value>) -> Option<LogLevel> {
        if let Some(code) = obj.get("log_level") {
            return LogLevel::from_lager_code(code.as_i64()?);
        }
        if let Some(level) = obj.get("level") {
            return LogLevel::from_str_loose(level.as_str()?);
        }
        Some(LogLevel::Debug)
    }

    /// 타임스탬프 문자열을 파싱합니다.
    ///
    /// 지원 형식:
    /// - 유닉스 초 + 소수부 (나노초까지 손실 없이): `1487278236.563640118`
    /// - RFC 3339: `2017-02-16T20:50:36.563640118Z`
    /// - 그 외 부동소수 표기: `1.4872782365e9`
    fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
        if let Some(dt) = Self::parse_epoch_decimal(timestamp) {
            return Some(dt);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
            return Some(dt.with_timezone(&Utc));
        }

        let secs = timestamp.parse::<f64>().ok().filter(|s| s.is_finite())?;
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9).round() as u32;
        DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
    }

    fn parse_epoch_decimal(timestamp: &str) -> Option<DateTime<Utc>> {
        let (secs, frac) = match timestamp.split_once('.') {
            Some((secs, frac)) => (secs, frac),
            None => (timestamp, ""),
        };

        if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let secs: i64 = secs.parse().ok()?;
        // 나노초 자릿수(9)로 자르거나 0으로 채움
        let digits: String = frac.chars().chain(std::iter::repeat('0')).take(9).collect();
        let nanos: u32 = digits.parse().ok()?;

        DateTime::from_timestamp(secs, nanos)
    }
}

impl Default for LagerDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder for LagerDecoder {
    fn format_name(&self) -> &str {
        "lager"
    }

    fn decode(&self, line: usize, raw: &[u8]) -> Result<DecodedLine, LockvizError> {
        self.decode_line(line, raw).map_err(LockvizError::from)
    }

    fn max_line_length(&self) -> Option<usize> {
        Some(self.max_line_length)
    }
}
