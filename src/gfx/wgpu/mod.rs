//! wgpu 图形后端实现
//!
//! wgpu 是一个跨平台的图形 API，可以在 Vulkan、Metal、DirectX 12、
//! OpenGL 等多种后端上运行。
//!
//! # 模块结构
//!
//! - `backend` - WgpuBackend 结构（窗口、设备初始化和管理）
//! - `shaders` - GLSL 着色器读取与编译
//! - `pipeline` - 渲染管线缓存
//! - `renderer` - Renderer 结构（网格上传、模式切换、渲染循环）

mod backend;
pub mod pipeline;
mod renderer;
pub mod shaders;

pub use backend::WgpuBackend;
pub use renderer::Renderer;
pub use shaders::{ShaderProgram, ShaderStage};
