#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`decoder`]: lager JSON 라인 디코더 및 스트리밍 producer
//! - [`classifier`]: 메시지 패턴 기반 락 이벤트 분류
//! - [`layout`]: 소스별 레인 배치 및 색상 버킷 계산
//! - [`pipeline`]: 소스 단위 처리 오케스트레이션
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! File -> LagerDecoder task -> mpsc -> EventClassifier -> LaneLayout -> SourceSeries
//!            |                              |                 |
//!     Structured/Unstructured        expired > acquired    i * band + offset
//!                                       > released
//! ```

pub mod classifier;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod pipeline;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{LockPipeline, LockPipelineBuilder, SourceStats};

// 에러
pub use error::LogPipelineError;

// 디코더
pub use decoder::{LagerDecoder, RecordStream};

// 분류기
pub use classifier::{EventClassifier, LockPatterns};

// 레이아웃
pub use layout::LaneLayout;
