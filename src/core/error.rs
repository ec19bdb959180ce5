//! 错误处理模块
//!
//! 定义了渲染器中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//! - 所有错误在 `main` 中都是终止性的：记录日志后以状态码 1 退出

use std::fmt;
use std::path::PathBuf;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, ShapeRenderError>;

/// ShapeRender 的错误类型
#[derive(Debug)]
pub enum ShapeRenderError {
    /// 配置错误
    Config(ConfigError),

    /// 图形 API 错误
    Graphics(GraphicsError),

    /// 着色器源文件错误
    Shader(ShaderError),

    /// IO 错误
    Io(std::io::Error),

    /// 初始化错误
    Initialization(String),

    /// 运行时错误
    Runtime(String),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 图形 API 相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 设备创建失败
    DeviceCreation(String),

    /// 交换链错误
    SwapchainError(String),

    /// 着色器编译或链接失败
    ShaderCompilation(String),

    /// 资源创建失败
    ResourceCreation(String),
}

/// 着色器源文件相关的错误
#[derive(Debug)]
pub enum ShaderError {
    /// 源文件不存在或无法打开
    SourceNotFound(PathBuf),

    /// 源文件读取失败（例如不是合法的 UTF-8）
    ReadFailed { path: PathBuf, reason: String },
}

impl fmt::Display for ShapeRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeRenderError::Config(e) => write!(f, "Configuration error: {}", e),
            ShapeRenderError::Graphics(e) => write!(f, "Graphics error: {}", e),
            ShapeRenderError::Shader(e) => write!(f, "Shader error: {}", e),
            ShapeRenderError::Io(e) => write!(f, "IO error: {}", e),
            ShapeRenderError::Initialization(msg) => write!(f, "Initialization error: {}", msg),
            ShapeRenderError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::DeviceCreation(msg) => write!(f, "Device creation failed: {}", msg),
            GraphicsError::SwapchainError(msg) => write!(f, "Swapchain error: {}", msg),
            GraphicsError::ShaderCompilation(msg) => write!(f, "Shader compilation failed: {}", msg),
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::SourceNotFound(path) => {
                write!(f, "failed to open {}", path.display())
            }
            ShaderError::ReadFailed { path, reason } => {
                write!(f, "failed to read {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ShapeRenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShapeRenderError::Io(e) => Some(e),
            ShapeRenderError::Config(e) => Some(e),
            ShapeRenderError::Graphics(e) => Some(e),
            ShapeRenderError::Shader(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for GraphicsError {}
impl std::error::Error for ShaderError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for ShapeRenderError {
    fn from(err: std::io::Error) -> Self {
        ShapeRenderError::Io(err)
    }
}

impl From<ConfigError> for ShapeRenderError {
    fn from(err: ConfigError) -> Self {
        ShapeRenderError::Config(err)
    }
}

impl From<GraphicsError> for ShapeRenderError {
    fn from(err: GraphicsError) -> Self {
        ShapeRenderError::Graphics(err)
    }
}

impl From<ShaderError> for ShapeRenderError {
    fn from(err: ShaderError) -> Self {
        ShapeRenderError::Shader(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_shader_error_message_names_file() {
        let err: ShapeRenderError = ShaderError::SourceNotFound(PathBuf::from("./mode2.vert")).into();
        let msg = err.to_string();
        assert!(msg.starts_with("Shader error"));
        assert!(msg.contains("mode2.vert"));
    }

    #[test]
    fn test_error_source_chain() {
        let err: ShapeRenderError = GraphicsError::ShaderCompilation("bad link".to_string()).into();
        assert!(err.source().is_some());

        let err = ShapeRenderError::Runtime("oops".to_string());
        assert!(err.source().is_none());
    }
}
