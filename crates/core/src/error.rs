//! 에러 타입 -- 도메인별 에러 정의

/// lockviz 최상위 에러 타입
///
/// 모든 에러는 실행 전체에 치명적입니다. 부분 성공 모드는 없습니다.
#[derive(Debug, thiserror::Error)]
pub enum LockvizError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 로그 디코딩 에러 (소스 전체 중단)
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// 차트 렌더링 에러
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 디코딩 에러 -- 구조화 로그 프레이밍 위반
///
/// "구조화되지 않은 라인"은 에러가 아니라 정상 결과입니다.
/// 이 타입은 스트림 자체를 더 이상 신뢰할 수 없을 때만 사용됩니다.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// 라인이 UTF-8이 아님
    #[error("line {line}: invalid utf-8 at byte {offset}")]
    InvalidUtf8 { line: usize, offset: usize },

    /// 라인 길이 초과
    #[error("line {line}: {size} bytes exceeds max line length {max}")]
    LineTooLong { line: usize, size: usize, max: usize },

    /// 스트림 읽기 실패
    #[error("read failed after line {line}: {reason}")]
    Read { line: usize, reason: String },
}

/// 렌더링 에러
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// 그릴 데이터 포인트가 없음
    #[error("no data points to render across {sources} source(s)")]
    NoData { sources: usize },

    /// 드로잉 백엔드 실패
    #[error("drawing failed: {0}")]
    Backend(String),

    /// 이미지 인코딩 실패
    #[error("image encoding failed: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_converts_to_lockviz_error() {
        let err: LockvizError = DecodeError::LineTooLong {
            line: 3,
            size: 2048,
            max: 1024,
        }
        .into();
        assert!(matches!(err, LockvizError::Decode(_)));
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("2048"));
    }

    #[test]
    fn render_no_data_display() {
        let err = RenderError::NoData { sources: 2 };
        assert!(err.to_string().contains("2 source"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.log");
        let err: LockvizError = io.into();
        assert!(matches!(err, LockvizError::Io(_)));
        assert!(err.to_string().contains("missing.log"));
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "layout.spacing".to_owned(),
            reason: "must be greater than zero".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("layout.spacing"));
        assert!(msg.contains("greater than zero"));
    }
}
