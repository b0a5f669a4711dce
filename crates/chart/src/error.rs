//! 차트 렌더링 에러 타입

use lockviz_core::error::{LockvizError, RenderError};

/// 차트 렌더링 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// 모든 시리즈가 비어 있음
    #[error("no data points to render across {sources} source(s)")]
    NoData {
        /// 입력 소스 수
        sources: usize,
    },

    /// 캔버스 크기가 0
    #[error("invalid canvas size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// plotters 드로잉 실패
    #[error("drawing failed: {0}")]
    Backend(String),

    /// PNG 인코딩 실패
    #[error("png encoding failed: {0}")]
    Encode(String),
}

impl From<ChartError> for LockvizError {
    fn from(err: ChartError) -> Self {
        let render = match err {
            ChartError::NoData { sources } => RenderError::NoData { sources },
            ChartError::InvalidDimensions { width, height } => {
                RenderError::Backend(format!("invalid canvas size {width}x{height}"))
            }
            ChartError::Backend(reason) => RenderError::Backend(reason),
            ChartError::Encode(reason) => RenderError::Encode(reason),
        };
        LockvizError::Render(render)
    }
}
