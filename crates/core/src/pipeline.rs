//! 파이프라인 trait -- 디코더/렌더러 확장 포인트 정의

use crate::error::LockvizError;
use crate::types::{DecodedLine, SourceSeries};

/// 포인트별 색상 버킷 함수 (레인 값 -> 팔레트 인덱스)
pub type ColorBucketFn = dyn Fn(f64) -> u32 + Send + Sync;

/// 라인 디코더 trait
///
/// 새로운 구조화 로그 형식을 지원하려면 이 trait을 구현합니다.
/// 구조화되지 않은 라인은 `Ok(DecodedLine::Unstructured)`로 반환해야 하며,
/// `Err`는 스트림 전체를 중단시키는 프레이밍 위반에만 사용합니다.
pub trait LineDecoder: Send + Sync {
    /// 지원하는 로그 형식 이름
    fn format_name(&self) -> &str;

    /// 원시 라인 바이트를 디코딩 (`line`은 1부터 시작하는 라인 번호)
    fn decode(&self, line: usize, raw: &[u8]) -> Result<DecodedLine, LockvizError>;

    /// 줄바꿈을 제외한 최대 라인 길이 (바이트). `None`이면 제한 없음.
    ///
    /// 스트리밍 리더는 이 길이를 넘는 라인을 끝까지 버퍼링하지 않고 중단합니다.
    fn max_line_length(&self) -> Option<usize> {
        None
    }
}

/// 차트 렌더러 trait
///
/// 소스별 시리즈와 색상 버킷 함수를 받아 인코딩된 이미지 바이트를 반환합니다.
pub trait ChartRenderer {
    /// 출력 이미지 형식 이름 (예: "png")
    fn format_name(&self) -> &str;

    /// 시리즈 전체를 하나의 이미지로 렌더링
    fn render(
        &self,
        series: &[SourceSeries],
        color_bucket: &ColorBucketFn,
    ) -> Result<Vec<u8>, LockvizError>;
}
