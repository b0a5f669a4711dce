//! 로그 디코딩 모듈 -- lager 구조화 로그 디코더와 스트리밍 producer
//!
//! 각 디코더는 core의 [`LineDecoder`](lockviz_core::pipeline::LineDecoder) trait을 구현합니다.
//! [`spawn_decoder`]는 디코더를 별도 tokio 태스크에서 실행하여
//! 파일 전체를 버퍼링하지 않고 라인 단위로 [`RecordStream`]에 흘려보냅니다.
//!
//! # 사용 예시
//! ```ignore
//! use std::sync::Arc;
//! use lockviz_log_pipeline::decoder::{spawn_decoder, LagerDecoder};
//!
//! let file = tokio::fs::File::open("locket.stdout.log").await?;
//! let mut stream = spawn_decoder("locket.stdout.log", file, Arc::new(LagerDecoder::default()), 1024);
//! while let Some(line) = stream.next().await {
//!     let line = line?;
//! }
//! ```

pub mod lager;
pub mod stream;

pub use lager::LagerDecoder;
pub use stream::{RecordStream, spawn_decoder};
