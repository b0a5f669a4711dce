//! 통합 테스트 -- 파이프라인 전체 흐름 검증
//!
//! 임시 파일에 lager 로그를 기록한 뒤 디코딩부터 레인 배치까지 검증합니다.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use lockviz_core::config::LockvizConfig;
use lockviz_core::types::EventCategory;
use lockviz_log_pipeline::{LockPipeline, LockPipelineBuilder, LogPipelineError};

fn lager_line(secs: u64, level: u8, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{secs}.000000000","source":"locket","message":"{message}","log_level":{level},"data":{{"session":"1"}}}}"#
    )
}

fn write_log(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    for line in lines {
        writeln!(file, "{line}").expect("failed to write temp file");
    }
    file.flush().expect("failed to flush temp file");
    file
}

fn pipeline() -> LockPipeline {
    LockPipelineBuilder::new().build().expect("default pipeline")
}

/// 단일 소스의 세 가지 이벤트가 순서대로 레인 0, 1, 2에 배치됨
#[tokio::test]
async fn single_source_three_categories() {
    let file = write_log(&[
        lager_line(100, 1, "lock.foo.acquired-lock"),
        lager_line(200, 1, "release.foo.released-lock"),
        lager_line(300, 1, "register-ttl.foo.lock-expired"),
    ]);

    let series = pipeline()
        .build_series(&[file.path().to_path_buf()])
        .await
        .unwrap();

    assert_eq!(series.len(), 1);
    let lanes: Vec<f64> = series[0].points.iter().map(|p| p.lane).collect();
    let secs: Vec<i64> = series[0]
        .points
        .iter()
        .map(|p| p.timestamp.timestamp())
        .collect();
    assert_eq!(lanes, vec![0.0, 1.0, 2.0]);
    assert_eq!(secs, vec![100, 200, 300]);
}

/// 두 소스의 밴드는 겹치지 않음
#[tokio::test]
async fn two_sources_get_separate_bands() {
    let first = write_log(&[lager_line(100, 1, "lock.a.acquired-lock")]);
    let second = write_log(&[lager_line(100, 1, "lock.b.acquired-lock")]);

    let series = pipeline()
        .build_series(&[first.path().to_path_buf(), second.path().to_path_buf()])
        .await
        .unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].index, 0);
    assert_eq!(series[0].points[0].lane, 0.0);
    assert_eq!(series[1].index, 1);
    assert_eq!(series[1].points[0].lane, 6.0);
    assert_eq!(series[1].name, second.path().display().to_string());
}

/// ERROR 레벨의 released 라인은 errored 이벤트가 됨
#[tokio::test]
async fn error_level_release_is_errored() {
    let file = write_log(&[lager_line(100, 2, "release.foo.released-lock")]);

    let (events, _) = pipeline().classify_file(file.path()).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, EventCategory::Released);
    assert!(events[0].errored);
}

/// FATAL 레벨은 errored가 아님
#[tokio::test]
async fn fatal_level_is_not_errored() {
    let file = write_log(&[lager_line(100, 3, "lock.foo.acquired-lock")]);

    let (events, _) = pipeline().classify_file(file.path()).await.unwrap();

    assert_eq!(events.len(), 1);
    assert!(!events[0].errored);
}

/// 구조화되지 않은 라인은 이벤트를 만들지 않고 실행도 중단하지 않음
#[tokio::test]
async fn unstructured_lines_are_skipped() {
    let file = write_log(&[
        "panic: something went wrong".to_owned(),
        "{not json".to_owned(),
        lager_line(100, 1, "lock.foo.acquired-lock"),
        String::new(),
    ]);

    let (events, stats) = pipeline().classify_file(file.path()).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(stats.lines, 4);
    assert_eq!(stats.structured, 1);
}

/// 분류되지 않는 구조화 레코드는 조용히 건너뜀
#[tokio::test]
async fn unmatched_records_produce_empty_series() {
    let file = write_log(&[
        lager_line(100, 1, "locket.started"),
        lager_line(101, 1, "locket.fetch.fetched-lock"),
    ]);

    let series = pipeline()
        .build_series(&[file.path().to_path_buf()])
        .await
        .unwrap();

    assert_eq!(series.len(), 1);
    assert!(series[0].is_empty());
}

/// 시간 역순 입력도 정렬하지 않고 입력 순서를 유지함
#[tokio::test]
async fn out_of_order_timestamps_are_preserved() {
    let file = write_log(&[
        lager_line(300, 1, "lock.foo.acquired-lock"),
        lager_line(100, 1, "release.foo.released-lock"),
    ]);

    let series = pipeline()
        .build_series(&[file.path().to_path_buf()])
        .await
        .unwrap();

    let secs: Vec<i64> = series[0]
        .points
        .iter()
        .map(|p| p.timestamp.timestamp())
        .collect();
    assert_eq!(secs, vec![300, 100]);
}

/// 프레이밍 위반(UTF-8 아님)은 전체 실행을 중단함
#[tokio::test]
async fn invalid_utf8_aborts_run() {
    let good = write_log(&[lager_line(100, 1, "lock.foo.acquired-lock")]);
    let mut bad = NamedTempFile::new().unwrap();
    bad.write_all(b"\xff\xfe\xfd\n").unwrap();
    bad.flush().unwrap();

    let result = pipeline()
        .build_series(&[good.path().to_path_buf(), bad.path().to_path_buf()])
        .await;

    match result {
        Err(LogPipelineError::Decode { source_name, .. }) => {
            assert_eq!(source_name, bad.path().display().to_string());
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

/// 최대 라인 길이를 넘으면 실행을 중단함
#[tokio::test]
async fn overlong_line_aborts_run() {
    let mut config = LockvizConfig::default();
    config.decoder.max_line_length = 64;
    let file = write_log(&[lager_line(100, 1, "lock.foo.acquired-lock")]);

    let result = LockPipeline::from_config(&config)
        .unwrap()
        .build_series(&[file.path().to_path_buf()])
        .await;

    assert!(matches!(result, Err(LogPipelineError::Decode { .. })));
}

/// 존재하지 않는 파일은 I/O 에러
#[tokio::test]
async fn missing_file_aborts_run() {
    let result = pipeline()
        .build_series(&[PathBuf::from("/nonexistent/lockviz/locket.stdout.log")])
        .await;

    assert!(matches!(result, Err(LogPipelineError::Io { .. })));
}

/// 간격 설정이 레인 밴드에 반영됨
#[tokio::test]
async fn spacing_config_changes_band() {
    let mut config = LockvizConfig::default();
    config.layout.spacing = 4;
    let first = write_log(&[lager_line(100, 1, "lock.a.acquired-lock")]);
    let second = write_log(&[lager_line(100, 1, "register-ttl.b.lock-expired")]);

    let series = LockPipeline::from_config(&config)
        .unwrap()
        .build_series(&[first.path().to_path_buf(), second.path().to_path_buf()])
        .await
        .unwrap();

    assert_eq!(series[1].points[0].lane, 14.0);
}

/// 작은 채널 용량에서도 모든 라인이 순서대로 전달됨
#[tokio::test]
async fn small_channel_capacity_keeps_every_event() {
    let lines: Vec<String> = (0..500)
        .map(|i| lager_line(1000 + i, 1, "lock.foo.acquired-lock"))
        .collect();
    let file = write_log(&lines);

    let pipeline = LockPipelineBuilder::new()
        .channel_capacity(1)
        .build()
        .unwrap();
    let (events, _) = pipeline.classify_file(file.path()).await.unwrap();

    assert_eq!(events.len(), 500);
    assert!(
        events
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp)
    );
}
