#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`renderer`]: [`ChartRenderer`](lockviz_core::pipeline::ChartRenderer) 구현 (plotters + PNG)
//! - [`palette`]: 색상 버킷 -> viridis 색상 변환
//! - [`error`]: 렌더링 에러 타입

pub mod error;
pub mod palette;
pub mod renderer;

pub use error::ChartError;
pub use renderer::{LaneBands, PlottersRenderer};
