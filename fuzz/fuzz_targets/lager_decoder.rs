#![no_main]

use libfuzzer_sys::fuzz_target;
use lockviz_core::types::DecodedLine;
use lockviz_log_pipeline::LagerDecoder;

fuzz_target!(|data: &[u8]| {
    let decoder = LagerDecoder::new().with_max_line_length(64 * 1024);
    match decoder.decode_line(1, data) {
        // 구조화 레코드는 반드시 파싱 가능한 타임스탬프를 가짐
        Ok(DecodedLine::Structured(record)) => {
            let _ = record.timestamp.timestamp();
        }
        Ok(DecodedLine::Unstructured(text)) => {
            assert!(std::str::from_utf8(text.as_bytes()).is_ok());
        }
        Err(_) => {}
    }
});
