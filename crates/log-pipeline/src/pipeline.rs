//! 파이프라인 오케스트레이션 -- 디코딩/분류/레인 배치의 전체 흐름을 관리합니다.
//!
//! [`LockPipeline`]은 입력 소스(파일)를 순서대로 하나씩 처리합니다.
//! 소스마다 디코더 태스크를 띄우고, 구조화 레코드만 분류기로 넘긴 뒤
//! 레인 레이아웃을 적용해 [`SourceSeries`]를 만듭니다.
//!
//! # 내부 아키텍처
//! ```text
//! File -> spawn_decoder -> mpsc -> RecordStream -> EventClassifier -> LaneLayout -> SourceSeries
//! ```
//!
//! 어떤 소스에서든 에러가 나면 전체 실행이 중단되며 부분 결과는 반환하지 않습니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncRead;

use lockviz_core::config::LockvizConfig;
use lockviz_core::error::ConfigError;
use lockviz_core::metrics as m;
use lockviz_core::pipeline::LineDecoder;
use lockviz_core::types::{ClassifiedEvent, DecodedLine, SourceSeries};

use crate::classifier::EventClassifier;
use crate::decoder::{LagerDecoder, spawn_decoder};
use crate::error::LogPipelineError;
use crate::layout::LaneLayout;

/// 소스 하나를 처리한 결과 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// 읽은 전체 라인 수
    pub lines: usize,
    /// 구조화 레코드 수
    pub structured: usize,
    /// 분류된 락 이벤트 수
    pub events: usize,
}

impl SourceStats {
    /// 구조화되지 않아 건너뛴 라인 수
    pub fn unstructured(&self) -> usize {
        self.lines - self.structured
    }
}

/// 락 이벤트 파이프라인
///
/// # 사용 예시
/// ```ignore
/// use lockviz_log_pipeline::LockPipelineBuilder;
///
/// let pipeline = LockPipelineBuilder::new().config(&config).build()?;
/// let series = pipeline.build_series(&paths).await?;
/// ```
pub struct LockPipeline {
    /// 라인 디코더
    decoder: Arc<dyn LineDecoder>,
    /// 이벤트 분류기
    classifier: EventClassifier,
    /// 레인 레이아웃
    layout: LaneLayout,
    /// 디코더 -> 분류기 채널 용량
    channel_capacity: usize,
}

impl LockPipeline {
    /// 설정으로 파이프라인을 생성합니다.
    pub fn from_config(config: &LockvizConfig) -> Result<Self, LogPipelineError> {
        LockPipelineBuilder::new().config(config).build()
    }

    /// 레인 레이아웃에 대한 참조를 반환합니다.
    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    /// 분류기에 대한 참조를 반환합니다.
    pub fn classifier(&self) -> &EventClassifier {
        &self.classifier
    }

    /// 임의의 비동기 입력을 끝까지 읽어 락 이벤트를 분류합니다.
    ///
    /// 이벤트 순서는 입력 순서와 같습니다.
    pub async fn classify_reader<R>(
        &self,
        source_name: &str,
        reader: R,
    ) -> Result<(Vec<ClassifiedEvent>, SourceStats), LogPipelineError>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let format = self.decoder.format_name().to_owned();
        let mut stream = spawn_decoder(
            source_name,
            reader,
            Arc::clone(&self.decoder),
            self.channel_capacity,
        );

        let mut events = Vec::new();
        let mut stats = SourceStats::default();

        while let Some(item) = stream.next().await {
            let line = match item {
                Ok(line) => line,
                Err(e) => {
                    metrics::counter!(m::DECODE_ERRORS_TOTAL).increment(1);
                    tracing::warn!(source = source_name, line = stats.lines + 1, error = %e, "aborting source");
                    return Err(e);
                }
            };

            stats.lines += 1;
            let record = match line {
                DecodedLine::Structured(record) => record,
                DecodedLine::Unstructured(_) => {
                    metrics::counter!(m::UNSTRUCTURED_LINES_TOTAL, m::LABEL_FORMAT => format.clone())
                        .increment(1);
                    continue;
                }
            };

            stats.structured += 1;
            metrics::counter!(m::RECORDS_DECODED_TOTAL, m::LABEL_FORMAT => format.clone())
                .increment(1);

            if let Some(event) = self.classifier.classify_record(&record) {
                metrics::counter!(m::EVENTS_CLASSIFIED_TOTAL, m::LABEL_CATEGORY => event.category.as_str())
                    .increment(1);
                tracing::trace!(
                    source = source_name,
                    category = %event.category,
                    errored = event.errored,
                    "classified lock event"
                );
                events.push(event);
            }
        }

        stats.events = events.len();
        Ok((events, stats))
    }

    /// 파일을 열어 락 이벤트를 분류합니다.
    pub async fn classify_file(
        &self,
        path: &Path,
    ) -> Result<(Vec<ClassifiedEvent>, SourceStats), LogPipelineError> {
        let source_name = path.display().to_string();
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|error| LogPipelineError::Io {
                source_name: source_name.clone(),
                error,
            })?;
        self.classify_reader(&source_name, file).await
    }

    /// 파일 하나를 처리해 `index` 번째 소스의 시리즈를 만듭니다.
    pub async fn source_series(
        &self,
        index: usize,
        path: &Path,
    ) -> Result<SourceSeries, LogPipelineError> {
        let (events, stats) = self.classify_file(path).await?;
        let series = self.layout.series(index, path.display().to_string(), &events);

        metrics::counter!(m::SOURCES_PROCESSED_TOTAL).increment(1);
        tracing::info!(
            source = %series.name,
            index,
            lines = stats.lines,
            unstructured = stats.unstructured(),
            events = stats.events,
            "source processed"
        );
        Ok(series)
    }

    /// 모든 입력 파일을 순서대로 처리합니다.
    ///
    /// 시리즈 `i`는 `paths[i]`에 대응합니다. 첫 에러에서 중단합니다.
    pub async fn build_series(
        &self,
        paths: &[PathBuf],
    ) -> Result<Vec<SourceSeries>, LogPipelineError> {
        let mut all = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            all.push(self.source_series(index, path).await?);
        }

        let points: usize = all.iter().map(SourceSeries::len).sum();
        tracing::info!(sources = all.len(), points, "all sources processed");
        Ok(all)
    }
}

/// 락 파이프라인 빌더
pub struct LockPipelineBuilder {
    decoder: Option<Arc<dyn LineDecoder>>,
    classifier: EventClassifier,
    layout: LaneLayout,
    channel_capacity: usize,
    max_line_length: usize,
}

impl LockPipelineBuilder {
    /// 기본값으로 새 빌더를 생성합니다.
    pub fn new() -> Self {
        let defaults = LockvizConfig::default();
        Self {
            decoder: None,
            classifier: EventClassifier::new(),
            layout: LaneLayout::from_config(&defaults.layout),
            channel_capacity: defaults.decoder.channel_capacity,
            max_line_length: defaults.decoder.max_line_length,
        }
    }

    /// 설정에서 레이아웃과 디코더 값을 가져옵니다.
    pub fn config(mut self, config: &LockvizConfig) -> Self {
        self.layout = LaneLayout::from_config(&config.layout);
        self.channel_capacity = config.decoder.channel_capacity;
        self.max_line_length = config.decoder.max_line_length;
        self
    }

    /// 기본 lager 디코더 대신 사용할 디코더를 지정합니다.
    pub fn decoder(mut self, decoder: Arc<dyn LineDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// 분류기를 지정합니다.
    pub fn classifier(mut self, classifier: EventClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// 레인 레이아웃을 지정합니다.
    pub fn layout(mut self, layout: LaneLayout) -> Self {
        self.layout = layout;
        self
    }

    /// 디코더 채널 용량을 지정합니다.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// 파이프라인을 빌드합니다.
    pub fn build(self) -> Result<LockPipeline, LogPipelineError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "decoder.channel_capacity".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }
        if self.max_line_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "decoder.max_line_length".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        let max_line_length = self.max_line_length;
        let decoder = self.decoder.unwrap_or_else(|| {
            Arc::new(LagerDecoder::new().with_max_line_length(max_line_length))
        });

        tracing::debug!(
            format = decoder.format_name(),
            band = self.layout.band_height(),
            capacity = self.channel_capacity,
            "lock pipeline built"
        );

        Ok(LockPipeline {
            decoder,
            classifier: self.classifier,
            layout: self.layout,
            channel_capacity: self.channel_capacity,
        })
    }
}

impl Default for LockPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
