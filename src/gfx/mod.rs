//! 图形后端模块
//!
//! 本模块封装了 wgpu 的底层实现。场景和几何模块只产出 CPU 侧数据，
//! 所有 GPU 资源都由这里的 `Renderer` 持有。

pub mod wgpu;

pub use self::wgpu::{Renderer, WgpuBackend};
