//! 환경변수 기반 설정 통합 테스트
//!
//! - 환경변수 우선순위 테스트
//! - 잘못된 값 무시 / 검증 실패 테스트

use lockviz_core::config::LockvizConfig;
use lockviz_core::error::{ConfigError, LockvizError};

/// 환경변수를 설정한 상태로 클로저를 실행하고 원래 값을 복원합니다.
fn with_env<T>(key: &str, value: &str, f: impl FnOnce() -> T) -> T {
    let original = std::env::var(key).ok();
    // SAFETY: 테스트는 serial_test로 직렬화되어 환경변수 조작이 안전합니다.
    unsafe {
        std::env::set_var(key, value);
    }

    let result = f();

    // SAFETY: 테스트 정리
    unsafe {
        match original {
            Some(val) => std::env::set_var(key, val),
            None => std::env::remove_var(key),
        }
    }

    result
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial_test::serial]
fn env_override_takes_precedence_over_defaults() {
    let config = with_env("LOCKVIZ_LAYOUT_SPACING", "4", || {
        LockvizConfig::from_env().expect("should load")
    });

    assert_eq!(config.layout.spacing, 4);
    assert_eq!(config.layout.band_height(), 12);
    // 다른 필드는 기본값
    assert_eq!(config.layout.rows_per_source, 3);
}

#[test]
#[serial_test::serial]
fn env_override_log_level() {
    let config = with_env("LOCKVIZ_GENERAL_LOG_LEVEL", "debug", || {
        LockvizConfig::from_env().expect("should load")
    });
    assert_eq!(config.general.log_level, "debug");
}

#[test]
#[serial_test::serial]
fn env_override_chart_dimensions() {
    let config = with_env("LOCKVIZ_CHART_WIDTH", "1600", || {
        with_env("LOCKVIZ_CHART_HEIGHT", "900", || {
            LockvizConfig::from_env().expect("should load")
        })
    });
    assert_eq!(config.chart.width, 1600);
    assert_eq!(config.chart.height, 900);
}

#[test]
#[serial_test::serial]
fn unparseable_numeric_env_is_ignored() {
    let config = with_env("LOCKVIZ_DECODER_CHANNEL_CAPACITY", "lots", || {
        LockvizConfig::from_env().expect("should load")
    });
    assert_eq!(config.decoder.channel_capacity, 1024);
}

#[test]
#[serial_test::serial]
fn invalid_env_value_fails_validation() {
    let result = with_env("LOCKVIZ_GENERAL_LOG_FORMAT", "yaml", LockvizConfig::from_env);

    match result {
        Err(LockvizError::Config(ConfigError::InvalidValue { field, .. })) => {
            assert_eq!(field, "general.log_format");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
#[serial_test::serial]
fn zero_rows_from_env_fails_validation() {
    let result = with_env("LOCKVIZ_LAYOUT_ROWS_PER_SOURCE", "0", LockvizConfig::from_env);
    assert!(result.is_err());
}

#[test]
#[serial_test::serial]
fn huge_canvas_from_env_fails_validation() {
    let result = with_env("LOCKVIZ_CHART_WIDTH", "4000000000", LockvizConfig::from_env);

    match result {
        Err(LockvizError::Config(ConfigError::InvalidValue { field, .. })) => {
            assert_eq!(field, "chart.width/chart.height");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}
