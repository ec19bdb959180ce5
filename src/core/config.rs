//! 配置管理模块
//!
//! 提供渲染器配置的加载、解析和校验功能，支持从 TOML 配置文件加载。
//! 配置文件是可选的：文件缺失或解析失败时使用默认值。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 640
//! height = 480
//! title = "Hello World"
//! resizable = false
//!
//! [graphics]
//! vsync = true
//! wireframe = true
//! fov_degrees = 45.0
//! aspect = 1.0
//!
//! [scene]
//! sphere_iterations = 5
//! initial_mode = 0
//! rotation_period = 400.0
//!
//! [shaders]
//! directory = "."
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::geometry::sphere::MAX_ITERATIONS;

/// 渲染器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 图形配置
    #[serde(default)]
    pub graphics: GraphicsConfig,

    /// 场景配置
    #[serde(default)]
    pub scene: SceneSettings,

    /// 着色器配置
    #[serde(default)]
    pub shaders: ShaderConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,

    /// 是否可调整大小
    #[serde(default = "default_resizable")]
    pub resizable: bool,
}

/// 图形配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsConfig {
    /// 垂直同步
    #[serde(default = "default_vsync")]
    pub vsync: bool,

    /// 是否请求线框模式（需要适配器支持 POLYGON_MODE_LINE）
    #[serde(default = "default_wireframe")]
    pub wireframe: bool,

    /// 垂直视野角度（度数）
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,

    /// 投影宽高比（固定值，与窗口尺寸无关）
    #[serde(default = "default_aspect")]
    pub aspect: f32,
}

/// 场景配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSettings {
    /// 球体细分迭代次数
    #[serde(default = "default_sphere_iterations")]
    pub sphere_iterations: u32,

    /// 启动时的模式（0、1 或 2）
    #[serde(default)]
    pub initial_mode: u8,

    /// 旋转周期（秒），角度 = (t mod period) * 360 / period
    #[serde(default = "default_rotation_period")]
    pub rotation_period: f32,
}

/// 着色器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// 着色器源文件所在目录
    #[serde(default = "default_shader_directory")]
    pub directory: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_title() -> String { "Hello World".to_string() }
fn default_resizable() -> bool { false }
fn default_vsync() -> bool { true }
fn default_wireframe() -> bool { true }
fn default_fov_degrees() -> f32 { 45.0 }
fn default_aspect() -> f32 { 1.0 }
fn default_sphere_iterations() -> u32 { 5 }
fn default_rotation_period() -> f32 { 400.0 }
fn default_shader_directory() -> String { ".".to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "shape_render.log".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            resizable: default_resizable(),
        }
    }
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            vsync: default_vsync(),
            wireframe: default_wireframe(),
            fov_degrees: default_fov_degrees(),
            aspect: default_aspect(),
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            sphere_iterations: default_sphere_iterations(),
            initial_mode: 0,
            rotation_period: default_rotation_period(),
        }
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            directory: default_shader_directory(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    ///
    /// 这个函数在日志系统初始化之前调用，所以这里不记录日志；
    /// 解析失败与文件缺失一样回退到默认值。
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 验证配置的有效性
    ///
    /// # 返回值
    ///
    /// 配置有效返回 `Ok(())`，否则返回错误
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        // 细分次数过大时面数按 4 的幂增长，内存不可接受
        if self.scene.sphere_iterations == 0 || self.scene.sphere_iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidValue {
                field: "scene.sphere_iterations".to_string(),
                reason: format!("Must be between 1 and {}", MAX_ITERATIONS),
            }.into());
        }

        if self.scene.initial_mode > 2 {
            return Err(ConfigError::InvalidValue {
                field: "scene.initial_mode".to_string(),
                reason: "Mode must be 0, 1 or 2".to_string(),
            }.into());
        }

        if !(self.scene.rotation_period > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "scene.rotation_period".to_string(),
                reason: "Rotation period must be greater than 0".to_string(),
            }.into());
        }

        if !(self.graphics.fov_degrees > 0.0 && self.graphics.fov_degrees < 180.0) {
            return Err(ConfigError::InvalidValue {
                field: "graphics.fov_degrees".to_string(),
                reason: "Field of view must be in (0, 180)".to_string(),
            }.into());
        }

        if !(self.graphics.aspect > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "graphics.aspect".to_string(),
                reason: "Aspect ratio must be greater than 0".to_string(),
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert!(!config.window.resizable);
        assert_eq!(config.scene.sphere_iterations, 5);
        assert_eq!(config.scene.initial_mode, 0);
        assert_eq!(config.shaders.directory, ".");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scene.sphere_iterations = 0;
        assert!(config.validate().is_err());
        config.scene.sphere_iterations = MAX_ITERATIONS + 1;
        assert!(config.validate().is_err());
        config.scene.sphere_iterations = MAX_ITERATIONS;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.scene.initial_mode = 3;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scene.rotation_period = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.graphics.fov_degrees = 180.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [scene]
            sphere_iterations = 3

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.scene.sphere_iterations, 3);
        assert_eq!(config.scene.rotation_period, 400.0);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.window.width, 640);
        assert_eq!(config.shaders.directory, ".");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml_str("[window\nwidth = 1").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = Config::from_file_or_default("definitely/not/here/config.toml");
        assert_eq!(config.window.title, "Hello World");
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
        let config = Config::from_file(&path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.scene.sphere_iterations, 5);
        assert!(config.graphics.wireframe);
    }
}
