//! plotters 기반 PNG 렌더러
//!
//! 모든 소스의 포인트를 하나의 산점도로 그립니다.
//! 선(stroke)으로 연결하지 않고 점만 찍습니다.
//! 아래쪽에 `HH:MM` 눈금의 시간 축을 그리며, Y축 라벨과 범례는 그리지 않습니다.
//! 축 라벨은 크레이트에 포함된 DejaVu Sans 글꼴로 렌더링하므로 시스템 글꼴이 필요 없습니다.

use std::io::Cursor;
use std::ops::Range;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

use lockviz_core::config::ChartConfig;
use lockviz_core::error::LockvizError;
use lockviz_core::pipeline::{ChartRenderer, ColorBucketFn};
use lockviz_core::types::{LanePoint, SourceSeries};

use crate::error::ChartError;
use crate::palette::dot_color;

/// 플롯 영역 바깥 여백 (픽셀)
const MARGIN: u32 = 20;

/// 시간 축 라벨 영역 높이 (픽셀)
const X_LABEL_AREA: u32 = 30;

/// 시간 축 눈금 개수
const X_LABEL_COUNT: usize = 8;

/// 소스 밴드 구분선 색상
const SEPARATOR_COLOR: RGBColor = RGBColor(220, 220, 220);

const AXIS_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// 축 라벨 글꼴 등록 결과. 프로세스당 한 번만 등록합니다.
static AXIS_FONT_REGISTERED: LazyLock<Result<(), String>> = LazyLock::new(|| {
    register_font("sans-serif", FontStyle::Normal, AXIS_FONT)
        .map_err(|_| "bundled axis font could not be parsed".to_owned())
});

/// 소스 밴드 구성 (구분선 위치 계산용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneBands {
    /// 소스 하나의 밴드 높이
    pub height: u32,
    /// 밴드 안에서 실제 이벤트가 놓이는 행 수
    pub rows: u32,
}

impl LaneBands {
    /// `index`번째 소스와 다음 소스 사이 구분선의 Y 값
    ///
    /// 마지막 사용 행과 다음 밴드 시작의 중간입니다.
    fn separator(&self, index: usize) -> f64 {
        let base = index as f64 * f64::from(self.height);
        let last_row = f64::from(self.rows.saturating_sub(1));
        base + (last_row + f64::from(self.height)) / 2.0
    }
}

/// 차트 좌표 범위
#[derive(Debug, Clone, PartialEq)]
struct Bounds {
    x: Range<f64>,
    y: Range<f64>,
    lane_min: f64,
    lane_max: f64,
}

impl Bounds {
    /// 모든 포인트를 포함하는 범위를 계산합니다. 포인트가 없으면 `None`.
    fn of(series: &[SourceSeries]) -> Option<Self> {
        let mut points = series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;

        let (mut t_min, mut t_max) = (epoch_seconds(first), epoch_seconds(first));
        let (mut lane_min, mut lane_max) = (first.lane, first.lane);
        for point in points {
            let t = epoch_seconds(point);
            t_min = t_min.min(t);
            t_max = t_max.max(t);
            lane_min = lane_min.min(point.lane);
            lane_max = lane_max.max(point.lane);
        }

        let x = if t_max > t_min {
            let pad = (t_max - t_min) * 0.02;
            (t_min - pad)..(t_max + pad)
        } else {
            (t_min - 1.0)..(t_max + 1.0)
        };

        Some(Self {
            x,
            y: (lane_min - 1.0)..(lane_max + 1.0),
            lane_min,
            lane_max,
        })
    }
}

fn backend_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Backend(err.to_string())
}

fn epoch_seconds(point: &LanePoint) -> f64 {
    point.timestamp.timestamp() as f64 + f64::from(point.timestamp.timestamp_subsec_nanos()) / 1e9
}

/// epoch 초를 UTC `HH:MM`으로 표시합니다.
fn minute_label(secs: &f64) -> String {
    DateTime::<Utc>::from_timestamp(secs.floor() as i64, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// plotters 비트맵 렌더러
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
    dot_size: u32,
    bands: Option<LaneBands>,
}

impl PlottersRenderer {
    /// 캔버스 크기로 렌더러를 생성합니다.
    pub fn new(width: u32, height: u32) -> Self {
        let defaults = ChartConfig::default();
        Self {
            width,
            height,
            dot_size: defaults.dot_size,
            bands: None,
        }
    }

    /// 설정에서 렌더러를 생성합니다.
    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.width, config.height).with_dot_size(config.dot_size)
    }

    /// 점 반지름을 지정합니다.
    pub fn with_dot_size(mut self, dot_size: u32) -> Self {
        self.dot_size = dot_size;
        self
    }

    /// 소스 밴드 구분선을 활성화합니다.
    pub fn with_bands(mut self, height: u32, rows: u32) -> Self {
        self.bands = Some(LaneBands { height, rows });
        self
    }

    /// 시리즈를 PNG 바이트로 렌더링합니다.
    pub fn render_png(
        &self,
        series: &[SourceSeries],
        color_bucket: &ColorBucketFn,
    ) -> Result<Vec<u8>, ChartError> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let bounds = Bounds::of(series).ok_or(ChartError::NoData {
            sources: series.len(),
        })?;

        let len = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|pixels| pixels.checked_mul(3))
            .ok_or(ChartError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })?;
        let mut buffer = vec![0u8; len];
        self.draw(&mut buffer, series, &bounds, color_bucket)?;

        let image = image::RgbImage::from_raw(self.width, self.height, buffer)
            .ok_or_else(|| ChartError::Encode("pixel buffer size mismatch".to_owned()))?;
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| ChartError::Encode(e.to_string()))?;

        let png = out.into_inner();
        tracing::debug!(
            width = self.width,
            height = self.height,
            sources = series.len(),
            bytes = png.len(),
            "chart rendered"
        );
        Ok(png)
    }

    fn draw(
        &self,
        buffer: &mut [u8],
        series: &[SourceSeries],
        bounds: &Bounds,
        color_bucket: &ColorBucketFn,
    ) -> Result<(), ChartError> {
        AXIS_FONT_REGISTERED.clone().map_err(ChartError::Backend)?;

        let root = BitMapBackend::with_buffer(buffer, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA)
            .build_cartesian_2d(bounds.x.clone(), bounds.y.clone())
            .map_err(backend_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .disable_y_axis()
            .x_labels(X_LABEL_COUNT)
            .x_label_formatter(&minute_label)
            .draw()
            .map_err(backend_err)?;

        if let Some(bands) = self.bands {
            let x = bounds.x.clone();
            let separators = (0..series.len().saturating_sub(1))
                .map(|i| bands.separator(i))
                .map(|y| PathElement::new(vec![(x.start, y), (x.end, y)], SEPARATOR_COLOR));
            chart.draw_series(separators).map_err(backend_err)?;
        }

        let radius = self.dot_size;
        for source in series {
            let dots = source.points.iter().map(|point| {
                let color = dot_color(color_bucket(point.lane), bounds.lane_min, bounds.lane_max);
                Circle::new((epoch_seconds(point), point.lane), radius, color.filled())
            });
            chart.draw_series(dots).map_err(backend_err)?;
        }

        root.present().map_err(backend_err)?;
        Ok(())
    }
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn format_name(&self) -> &str {
        "png"
    }

    fn render(
        &self,
        series: &[SourceSeries],
        color_bucket: &ColorBucketFn,
    ) -> Result<Vec<u8>, LockvizError> {
        self.render_png(series, color_bucket).map_err(LockvizError::from)
    }
}
