//! 核心功能模块
//!
//! 本模块提供渲染器的基础功能，包括数学库、日志系统、配置管理、错误处理和键盘输入。
//! 除 `input` 依赖 winit 的键码外，这些模块都独立于具体的图形 API。
//!
//! # 模块组织
//!
//! - `math`：数学库，nalgebra 类型别名与矩阵辅助函数
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载设置
//! - `error`：错误处理，定义统一的错误类型
//! - `input`：键盘输入到场景动作的映射

pub mod math;
pub mod log;
pub mod config;
pub mod error;
pub mod input;

// 重新导出常用类型，方便使用
pub use math::{Vector3, Vector4, Matrix4};
pub use error::{Result, ShapeRenderError};
pub use config::Config;
pub use input::{InputAction, InputSystem};
