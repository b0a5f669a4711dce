#![no_main]

use arbitrary::Arbitrary;
use chrono::{DateTime, Utc};
use libfuzzer_sys::fuzz_target;

use lockviz_core::types::{LogLevel, LogRecord};
use lockviz_log_pipeline::{EventClassifier, LaneLayout};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    messages: Vec<String>,
    error_level: bool,
    source_index: u16,
    spacing: u8,
}

fuzz_target!(|input: FuzzInput| {
    let classifier = EventClassifier::new();
    let layout = LaneLayout::new(3, u32::from(input.spacing));
    let level = if input.error_level {
        LogLevel::Error
    } else {
        LogLevel::Info
    };

    let records: Vec<LogRecord> = input
        .messages
        .iter()
        .take(64)
        .map(|message| LogRecord {
            source: "fuzz".to_owned(),
            level,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            message: message.clone(),
            session: String::new(),
            error: None,
            trace: None,
            data: serde_json::Map::new(),
        })
        .collect();
    let count = records.len();

    let events: Vec<_> = classifier.classify(records).collect();
    assert!(events.len() <= count);

    let index = usize::from(input.source_index);
    let band = f64::from(layout.band_height());
    for point in layout.layout(index, &events) {
        // 레인은 항상 자기 소스 밴드 안에 있어야 함
        let base = index as f64 * band;
        assert!(point.lane >= base && point.lane < base + band);
        let _ = layout.color_bucket(point.lane);
    }
});
