//! 着色器加载
//!
//! 从着色器目录读取 GLSL 450 源文件（`<stem>.vert` / `<stem>.frag`），
//! 交给 wgpu 的 naga GLSL 前端编译。读取失败和编译失败都是致命错误。

use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::error::{GraphicsError, Result, ShaderError};
use crate::scene::ShaderFamily;

/// 着色器阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// 源文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::Fragment => "frag",
        }
    }

    fn naga_stage(&self) -> wgpu::naga::ShaderStage {
        match self {
            ShaderStage::Vertex => wgpu::naga::ShaderStage::Vertex,
            ShaderStage::Fragment => wgpu::naga::ShaderStage::Fragment,
        }
    }
}

/// 着色器源文件路径：`<dir>/<stem>.<ext>`
pub fn shader_source_path(dir: &Path, family: ShaderFamily, stage: ShaderStage) -> PathBuf {
    dir.join(format!("{}.{}", family.file_stem(), stage.extension()))
}

/// 读取整个着色器源文件
///
/// 文件不存在或无法打开时返回 [`ShaderError::SourceNotFound`]。
pub fn read_shader_source(path: &Path) -> Result<String> {
    info!("Loading {}", path.display());
    fs::read_to_string(path).map_err(|e| {
        let err = match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                ShaderError::SourceNotFound(path.to_path_buf())
            }
            _ => ShaderError::ReadFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        };
        err.into()
    })
}

/// 一个已编译的顶点 + 片段着色器对
pub struct ShaderProgram {
    /// 着色器族
    pub family: ShaderFamily,
    /// 顶点着色器模块
    pub vertex: wgpu::ShaderModule,
    /// 片段着色器模块
    pub fragment: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// 读取并编译一个着色器族
    ///
    /// 两个源文件都先读入内存，再进行编译，保证缺文件时不会留下半个程序。
    pub fn load(device: &wgpu::Device, dir: &Path, family: ShaderFamily) -> Result<Self> {
        let vertex_path = shader_source_path(dir, family, ShaderStage::Vertex);
        let fragment_path = shader_source_path(dir, family, ShaderStage::Fragment);

        let vertex_source = read_shader_source(&vertex_path)?;
        let fragment_source = read_shader_source(&fragment_path)?;

        let vertex = compile(device, &vertex_path, vertex_source, ShaderStage::Vertex)?;
        let fragment = compile(device, &fragment_path, fragment_source, ShaderStage::Fragment)?;

        debug!(family = family.file_stem(), "Shader program ready");

        Ok(Self { family, vertex, fragment })
    }
}

fn compile(
    device: &wgpu::Device,
    path: &Path,
    source: String,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule> {
    let label = path.display().to_string();

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(source),
            stage: stage.naga_stage(),
            defines: Default::default(),
        },
    });

    if let Some(e) = pollster::block_on(device.pop_error_scope()) {
        return Err(GraphicsError::ShaderCompilation(format!("{}: {}", label, e)).into());
    }

    Ok(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ShapeRenderError;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shape_render_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_shader_source_path() {
        let dir = Path::new("shaders");
        assert_eq!(
            shader_source_path(dir, ShaderFamily::Basic, ShaderStage::Vertex),
            PathBuf::from("shaders/mode1_mode3.vert")
        );
        assert_eq!(
            shader_source_path(dir, ShaderFamily::Lit, ShaderStage::Fragment),
            PathBuf::from("shaders/mode2.frag")
        );
    }

    #[test]
    fn test_read_existing_source() {
        let dir = temp_dir("read");
        let path = dir.join("mode2.vert");
        fs::write(&path, "#version 450\nvoid main() {}\n").unwrap();

        let source = read_shader_source(&path).unwrap();
        assert!(source.starts_with("#version 450"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let dir = temp_dir("missing");
        let path = dir.join("mode1_mode3.frag");

        match read_shader_source(&path) {
            Err(ShapeRenderError::Shader(ShaderError::SourceNotFound(p))) => assert_eq!(p, path),
            other => panic!("expected SourceNotFound, got {:?}", other.map(|_| ())),
        }

        let message = read_shader_source(&path).unwrap_err().to_string();
        assert!(message.contains("failed to open"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_shipped_shaders_exist() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        for family in [ShaderFamily::Basic, ShaderFamily::Lit] {
            for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
                let path = shader_source_path(root, family, stage);
                let source = read_shader_source(&path).unwrap();
                assert!(source.contains("#version 450"), "{}", path.display());
            }
        }
    }
}
