//! 점 색상 팔레트
//!
//! 색상 버킷에 [`BUCKET_STEP`]을 곱한 값을 차트 Y 범위 안에서 정규화해
//! viridis 색상표에서 샘플링합니다. 범위를 벗어난 값은 양 끝으로 고정됩니다.

use plotters::prelude::*;

/// 버킷 하나당 색상표 입력 간격
pub const BUCKET_STEP: f64 = 10.0;

/// 색상 버킷과 Y 범위로 점 색상을 계산합니다.
pub fn dot_color(bucket: u32, y_min: f64, y_max: f64) -> RGBColor {
    let value = f64::from(bucket) * BUCKET_STEP;
    let position = if y_max > y_min {
        ((value.clamp(y_min, y_max) - y_min) / (y_max - y_min)) as f32
    } else {
        0.0
    };
    ViridisRGB.get_color_normalized(position, 0.0, 1.0)
}
