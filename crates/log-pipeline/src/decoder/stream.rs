//! 스트리밍 디코딩 -- producer 태스크 + mpsc 채널
//!
//! [`spawn_decoder`]는 입력을 라인 단위로 읽어 디코딩하는 tokio 태스크를 띄우고,
//! 결과를 bounded 채널로 [`RecordStream`]에 전달합니다.
//!
//! # 순서 보장
//! - 라인은 입력 순서 그대로(FIFO) 전달됩니다.
//! - 에러는 채널로 한 번 전달된 뒤 스트림이 종료됩니다. 그 뒤의 라인은 읽지 않습니다.
//!
//! # 메모리 상한
//! 디코더가 [`LineDecoder::max_line_length`]를 알려주면 한 번에 그 길이와
//! 줄바꿈(`\r\n`)까지만 읽습니다. 그 안에서 줄바꿈을 찾지 못하면
//! [`DecodeError::LineTooLong`]으로 중단하므로 줄바꿈 없는 입력도 버퍼가 무한히 자라지 않습니다.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use lockviz_core::error::DecodeError;
use lockviz_core::pipeline::LineDecoder;
use lockviz_core::types::DecodedLine;

use crate::error::LogPipelineError;

/// 디코딩된 라인 스트림 (consumer 측)
pub struct RecordStream {
    /// 입력 소스 이름
    source_name: String,
    /// producer -> consumer 채널
    rx: mpsc::Receiver<Result<DecodedLine, LogPipelineError>>,
    /// producer 태스크 핸들
    producer: JoinHandle<()>,
    /// 에러를 내보냈거나 끝까지 읽었는지 여부
    finished: bool,
}

impl RecordStream {
    /// 입력 소스 이름을 반환합니다.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// 다음 디코딩 결과를 받습니다. 스트림이 끝나면 `None`.
    ///
    /// 에러를 한 번 반환한 뒤에는 항상 `None`을 반환합니다.
    pub async fn next(&mut self) -> Option<Result<DecodedLine, LogPipelineError>> {
        if self.finished {
            return None;
        }

        match self.rx.recv().await {
            Some(Err(e)) => {
                self.finished = true;
                Some(Err(e))
            }
            Some(Ok(line)) => Some(Ok(line)),
            None => {
                self.finished = true;
                self.join_producer().await.err().map(Err)
            }
        }
    }

    /// 채널이 닫힌 뒤 producer 태스크 종료 상태를 확인합니다.
    async fn join_producer(&mut self) -> Result<(), LogPipelineError> {
        (&mut self.producer).await.map_err(|e| {
            LogPipelineError::Channel(format!(
                "decoder task for {} terminated abnormally: {e}",
                self.source_name
            ))
        })
    }
}

impl Drop for RecordStream {
    fn drop(&mut self) {
        // consumer가 먼저 끝나면 producer도 더 읽을 필요가 없음
        self.producer.abort();
    }
}

/// 디코더 producer 태스크를 시작합니다.
///
/// tokio 런타임 안에서 호출해야 합니다.
pub fn spawn_decoder<R>(
    source_name: impl Into<String>,
    reader: R,
    decoder: Arc<dyn LineDecoder>,
    capacity: usize,
) -> RecordStream
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let source_name = source_name.into();
    let (tx, rx) = mpsc::channel(capacity.max(1));

    let task_source = source_name.clone();
    let producer = tokio::spawn(async move {
        produce(task_source, reader, decoder, tx).await;
    });

    RecordStream {
        source_name,
        rx,
        producer,
        finished: false,
    }
}

async fn produce<R>(
    source_name: String,
    reader: R,
    decoder: Arc<dyn LineDecoder>,
    tx: mpsc::Sender<Result<DecodedLine, LogPipelineError>>,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut line = 0usize;

    let max_line_length = decoder.max_line_length();
    // 본문 + "\r\n"
    let read_limit = max_line_length.map_or(u64::MAX, |max| max as u64 + 2);

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(read_limit)
            .read_until(b'\n', &mut buf)
            .await;
        let item = match read {
            Ok(0) => break,
            Ok(n) => {
                line += 1;
                match max_line_length {
                    Some(max) if n as u64 == read_limit && !buf.ends_with(b"\n") => {
                        Err(LogPipelineError::Decode {
                            source_name: source_name.clone(),
                            error: DecodeError::LineTooLong {
                                line,
                                size: n,
                                max,
                            },
                        })
                    }
                    _ => decoder
                        .decode(line, &buf)
                        .map_err(|e| LogPipelineError::from_decoder(&source_name, e)),
                }
            }
            Err(e) => Err(LogPipelineError::Decode {
                source_name: source_name.clone(),
                error: DecodeError::Read {
                    line,
                    reason: e.to_string(),
                },
            }),
        };

        let terminal = item.is_err();
        if tx.send(item).await.is_err() {
            tracing::debug!(source = %source_name, line, "record stream receiver dropped");
            return;
        }
        if terminal {
            tracing::debug!(source = %source_name, line, "decoder stopped on error");
            return;
        }
    }

    tracing::debug!(source = %source_name, lines = line, "decoder reached end of stream");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::LagerDecoder;

    fn lager() -> Arc<dyn LineDecoder> {
        Arc::new(LagerDecoder::default())
    }

    async fn drain(mut stream: RecordStream) -> Vec<Result<DecodedLine, LogPipelineError>> {
        let mut out = Vec::new();
        while let Some(item) = stream.next().await {
            out.push(item);
        }
        out
    }

    #[tokio::test]
    async fn delivers_lines_in_order() {
        let input = b"first\nsecond\nthird\n".to_vec();
        let stream = spawn_decoder("mem", std::io::Cursor::new(input), lager(), 1);
        let lines: Vec<_> = drain(stream)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(
            lines,
            vec![
                DecodedLine::Unstructured("first".to_owned()),
                DecodedLine::Unstructured("second".to_owned()),
                DecodedLine::Unstructured("third".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn last_line_without_newline_is_delivered() {
        let input = b"a\nb".to_vec();
        let stream = spawn_decoder("mem", std::io::Cursor::new(input), lager(), 4);
        assert_eq!(drain(stream).await.len(), 2);
    }

    #[tokio::test]
    async fn empty_input_yields_nothing() {
        let stream = spawn_decoder("mem", std::io::Cursor::new(Vec::new()), lager(), 4);
        assert!(drain(stream).await.is_empty());
    }

    #[tokio::test]
    async fn error_terminates_stream() {
        let input = b"ok\n\xff\xfe\nnever read\n".to_vec();
        let stream = spawn_decoder("bad.log", std::io::Cursor::new(input), lager(), 4);
        let items = drain(stream).await;

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        match &items[1] {
            Err(LogPipelineError::Decode { source_name, error }) => {
                assert_eq!(source_name, "bad.log");
                assert!(matches!(error, DecodeError::InvalidUtf8 { line: 2, .. }));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn endless_line_is_cut_at_max_length() {
        let decoder = Arc::new(LagerDecoder::new().with_max_line_length(16));
        let mut stream = spawn_decoder("endless", tokio::io::repeat(b'a'), decoder, 4);

        let item = tokio::time::timeout(std::time::Duration::from_secs(3), stream.next())
            .await
            .expect("decoder must give up on an unterminated line");

        match item {
            Some(Err(LogPipelineError::Decode { source_name, error })) => {
                assert_eq!(source_name, "endless");
                assert!(matches!(
                    error,
                    DecodeError::LineTooLong { line: 1, max: 16, .. }
                ));
            }
            other => panic!("expected LineTooLong, got {other:?}"),
        }
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn line_at_max_length_with_crlf_is_accepted() {
        let decoder = Arc::new(LagerDecoder::new().with_max_line_length(4));
        let input = b"abcd\r\nabcde\n".to_vec();
        let items = drain(spawn_decoder("mem", std::io::Cursor::new(input), decoder, 4)).await;

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].as_ref().unwrap(),
            &DecodedLine::Unstructured("abcd".to_owned())
        );
        assert!(matches!(
            items[1],
            Err(LogPipelineError::Decode {
                error: DecodeError::LineTooLong { line: 2, .. },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn source_name_is_kept() {
        let stream = spawn_decoder("x.log", std::io::Cursor::new(Vec::new()), lager(), 1);
        assert_eq!(stream.source_name(), "x.log");
    }
}
