//! 메트릭 상수
//!
//! 모든 메트릭의 이름을 중앙에서 정의합니다.
//! 각 모듈은 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더(exporter)는 설치하지 않으므로 기본적으로 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `lockviz_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(lockviz_core::metrics::RECORDS_DECODED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 이벤트 분류 레이블 키 (acquired, released, expired)
pub const LABEL_CATEGORY: &str = "category";

/// 디코더 형식 레이블 키 (lager)
pub const LABEL_FORMAT: &str = "format";

// ─── Log Pipeline 메트릭 ────────────────────────────────────────────

/// 디코딩된 구조화 레코드 수 (counter, label: format)
pub const RECORDS_DECODED_TOTAL: &str = "lockviz_records_decoded_total";

/// 구조화되지 않아 건너뛴 라인 수 (counter, label: format)
pub const UNSTRUCTURED_LINES_TOTAL: &str = "lockviz_unstructured_lines_total";

/// 디코딩(프레이밍) 에러 수 (counter)
pub const DECODE_ERRORS_TOTAL: &str = "lockviz_decode_errors_total";

/// 분류된 이벤트 수 (counter, label: category)
pub const EVENTS_CLASSIFIED_TOTAL: &str = "lockviz_events_classified_total";

/// 처리 완료된 소스 수 (counter)
pub const SOURCES_PROCESSED_TOTAL: &str = "lockviz_sources_processed_total";
