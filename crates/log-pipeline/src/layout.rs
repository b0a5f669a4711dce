//! 레인 레이아웃 -- 분류된 이벤트를 차트 좌표로 배치
//!
//! 소스마다 `rows_per_source * spacing` 높이의 밴드를 할당합니다.
//! 기본값(3행, 간격 2)에서 소스 `n`의 레인은 다음과 같습니다.
//!
//! | 분류 | 레인 |
//! |------|------|
//! | acquired | `6n` |
//! | released | `6n + 1` |
//! | expired | `6n + 2` |
//!
//! 밴드의 나머지 행은 소스 사이의 시각적 여백입니다.

use lockviz_core::config::LayoutConfig;
use lockviz_core::types::{ClassifiedEvent, EventCategory, LanePoint, SourceSeries};

/// 이 값보다 큰 레인은 밴드 높이로 나머지 연산하여 색상 버킷을 구합니다.
pub const COLOR_WRAP_THRESHOLD: f64 = 3.0;

/// 레인 레이아웃 엔진
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneLayout {
    rows_per_source: u32,
    spacing: u32,
}

impl LaneLayout {
    /// 레이아웃을 생성합니다.
    ///
    /// `rows_per_source`는 분류 개수([`EventCategory::COUNT`]) 이상, `spacing`은 1 이상으로
    /// 보정되므로 모든 레인이 자기 소스의 밴드 안에 놓입니다.
    pub fn new(rows_per_source: u32, spacing: u32) -> Self {
        Self {
            rows_per_source: rows_per_source.max(EventCategory::COUNT),
            spacing: spacing.max(1),
        }
    }

    /// 설정에서 레이아웃을 생성합니다.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.rows_per_source, config.spacing)
    }

    /// 소스 하나의 밴드 높이
    pub fn band_height(&self) -> u32 {
        self.rows_per_source * self.spacing
    }

    /// 소스 인덱스와 분류로 레인 값을 계산합니다.
    pub fn lane(&self, source_index: usize, category: EventCategory) -> f64 {
        let base = source_index as f64 * f64::from(self.band_height());
        base + f64::from(category.row_offset())
    }

    /// 이벤트 목록을 입력 순서 그대로 좌표로 변환합니다.
    pub fn layout(&self, source_index: usize, events: &[ClassifiedEvent]) -> Vec<LanePoint> {
        events
            .iter()
            .map(|event| LanePoint {
                timestamp: event.timestamp,
                lane: self.lane(source_index, event.category),
            })
            .collect()
    }

    /// 소스 하나의 시리즈를 만듭니다.
    pub fn series(
        &self,
        source_index: usize,
        name: impl Into<String>,
        events: &[ClassifiedEvent],
    ) -> SourceSeries {
        SourceSeries {
            index: source_index,
            name: name.into(),
            points: self.layout(source_index, events),
        }
    }

    /// 레인 값에서 색상 버킷을 계산합니다.
    ///
    /// 정수로 절삭한 뒤 [`COLOR_WRAP_THRESHOLD`]보다 크면 밴드 높이로 나머지를 취합니다.
    /// 따라서 첫 번째 소스의 레인 0..=3은 그대로 유지되고 이후 소스는 `0..band` 로 접힙니다.
    pub fn color_bucket(&self, lane: f64) -> u32 {
        let truncated = lane as i64;
        let bucket = if lane > COLOR_WRAP_THRESHOLD {
            truncated.rem_euclid(i64::from(self.band_height()))
        } else {
            truncated
        };
        u32::try_from(bucket).unwrap_or(0)
    }

    /// 렌더러에 넘길 색상 버킷 함수
    pub fn bucket_fn(&self) -> impl Fn(f64) -> u32 + Send + Sync + 'static {
        let layout = *self;
        move |lane| layout.color_bucket(lane)
    }
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}
