//! 설정 관리 -- 런타임 설정
//!
//! [`LockvizConfig`]는 모든 모듈의 설정을 담는 최상위 구조체입니다.
//! 설정 파일은 없습니다.
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`LOCKVIZ_LAYOUT_SPACING=3` 형식)
//! 2. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), lockviz_core::error::LockvizError> {
//! use lockviz_core::config::LockvizConfig;
//!
//! let config = LockvizConfig::from_env()?;
//! assert_eq!(config.layout.band_height(), 6);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LockvizError};
use crate::types::EventCategory;

/// 캔버스 한 변의 최대 픽셀 수
pub const MAX_CANVAS_DIMENSION: u32 = 16_384;

/// lockviz 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockvizConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 레인 레이아웃 설정
    #[serde(default)]
    pub layout: LayoutConfig,
    /// 디코더 설정
    #[serde(default)]
    pub decoder: DecoderConfig,
    /// 차트 렌더링 설정
    #[serde(default)]
    pub chart: ChartConfig,
}

impl LockvizConfig {
    /// 기본값에 환경변수 오버라이드를 적용하고 검증합니다.
    pub fn from_env() -> Result<Self, LockvizError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOCKVIZ_{SECTION}_{FIELD}`
    /// 예: `LOCKVIZ_CHART_WIDTH=1600`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOCKVIZ_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOCKVIZ_GENERAL_LOG_FORMAT");

        // Layout
        override_u32(
            &mut self.layout.rows_per_source,
            "LOCKVIZ_LAYOUT_ROWS_PER_SOURCE",
        );
        override_u32(&mut self.layout.spacing, "LOCKVIZ_LAYOUT_SPACING");

        // Decoder
        override_usize(
            &mut self.decoder.channel_capacity,
            "LOCKVIZ_DECODER_CHANNEL_CAPACITY",
        );
        override_usize(
            &mut self.decoder.max_line_length,
            "LOCKVIZ_DECODER_MAX_LINE_LENGTH",
        );

        // Chart
        override_u32(&mut self.chart.width, "LOCKVIZ_CHART_WIDTH");
        override_u32(&mut self.chart.height, "LOCKVIZ_CHART_HEIGHT");
        override_u32(&mut self.chart.dot_size, "LOCKVIZ_CHART_DOT_SIZE");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LockvizError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        // 카테고리 오프셋(0..=2)이 밴드 안에 들어가야 함
        if self.layout.rows_per_source < EventCategory::COUNT {
            return Err(invalid(
                "layout.rows_per_source",
                "must be at least 3 (one row per lock event category)".to_owned(),
            ));
        }
        if self.layout.spacing == 0 {
            return Err(invalid(
                "layout.spacing",
                "must be greater than zero".to_owned(),
            ));
        }

        if self.decoder.channel_capacity == 0 {
            return Err(invalid(
                "decoder.channel_capacity",
                "must be greater than zero".to_owned(),
            ));
        }
        if self.decoder.max_line_length == 0 {
            return Err(invalid(
                "decoder.max_line_length",
                "must be greater than zero".to_owned(),
            ));
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(invalid(
                "chart.width/chart.height",
                "canvas dimensions must be greater than zero".to_owned(),
            ));
        }
        if self.chart.width > MAX_CANVAS_DIMENSION || self.chart.height > MAX_CANVAS_DIMENSION {
            return Err(invalid(
                "chart.width/chart.height",
                format!("canvas dimensions must not exceed {MAX_CANVAS_DIMENSION} pixels"),
            ));
        }
        if self.chart.dot_size == 0 {
            return Err(invalid(
                "chart.dot_size",
                "must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> LockvizError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 레인 레이아웃 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// 소스당 행 수
    pub rows_per_source: u32,
    /// 소스 간 간격 배수
    pub spacing: u32,
}

impl LayoutConfig {
    /// 소스 하나가 차지하는 레인 밴드 높이 (`rows_per_source * spacing`)
    pub fn band_height(&self) -> u32 {
        self.rows_per_source * self.spacing
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rows_per_source: 3,
            spacing: 2,
        }
    }
}

/// 디코더 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// 디코더 -> 분류기 채널 용량
    pub channel_capacity: usize,
    /// 최대 라인 길이 (바이트)
    pub max_line_length: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
            max_line_length: 1024 * 1024, // 1MB
        }
    }
}

/// 차트 렌더링 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// 이미지 너비 (픽셀)
    pub width: u32,
    /// 이미지 높이 (픽셀)
    pub height: u32,
    /// 점 반지름 (픽셀)
    pub dot_size: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 400,
            dot_size: 5,
        }
    }
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u32(target: &mut u32, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u32>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u32 from env var, ignoring"
            ),
        }
    }
}
