//! 로그 파이프라인 에러 타입
//!
//! [`LogPipelineError`]는 소스 하나를 처리하는 동안 발생하는 모든 에러를 표현합니다.
//! 어떤 소스에서 실패했는지(`source_name`)를 함께 담아 상위 레이어로 전파합니다.

use lockviz_core::error::{ConfigError, DecodeError, LockvizError};

/// 로그 파이프라인 도메인 에러
///
/// 모든 변형은 실행 전체를 중단시킵니다. 부분 결과는 반환하지 않습니다.
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 입력 파일 열기/읽기 실패
    #[error("failed to read {source_name}: {error}")]
    Io {
        /// 입력 소스 이름 (파일 경로)
        source_name: String,
        /// 원인 I/O 에러
        #[source]
        error: std::io::Error,
    },

    /// 구조화 로그 프레이밍 위반
    #[error("decode error in {source_name}: {error}")]
    Decode {
        /// 입력 소스 이름 (파일 경로)
        source_name: String,
        /// 원인 디코딩 에러
        #[source]
        error: DecodeError,
    },

    /// 디코더 구현이 반환한 기타 에러
    #[error("decoder failed on {source_name}: {error}")]
    Decoder {
        /// 입력 소스 이름 (파일 경로)
        source_name: String,
        /// 원인 에러
        #[source]
        error: LockvizError,
    },

    /// producer 태스크 통신 에러
    #[error("channel error: {0}")]
    Channel(String),

    /// 파이프라인 구성 값 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl LogPipelineError {
    /// 디코더 trait 에러에 소스 이름을 붙여 변환합니다.
    pub fn from_decoder(source_name: &str, err: LockvizError) -> Self {
        match err {
            LockvizError::Decode(error) => Self::Decode {
                source_name: source_name.to_owned(),
                error,
            },
            LockvizError::Io(error) => Self::Io {
                source_name: source_name.to_owned(),
                error,
            },
            other => Self::Decoder {
                source_name: source_name.to_owned(),
                error: other,
            },
        }
    }
}

impl From<LogPipelineError> for LockvizError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::Io { source_name, error } => LockvizError::Io(std::io::Error::new(
                error.kind(),
                format!("{source_name}: {error}"),
            )),
            LogPipelineError::Decode { error, .. } => LockvizError::Decode(error),
            LogPipelineError::Decoder { error, .. } => error,
            LogPipelineError::Config(error) => LockvizError::Config(error),
            LogPipelineError::Channel(reason) => {
                LockvizError::Io(std::io::Error::other(format!("channel error: {reason}")))
            }
            LogPipelineError::Regex(error) => LockvizError::Config(ConfigError::InvalidValue {
                field: "classifier.patterns".to_owned(),
                reason: error.to_string(),
            }),
        }
    }
}
