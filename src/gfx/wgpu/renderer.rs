//! wgpu 渲染器实现
//!
//! 本模块实现了基于 wgpu 的渲染器，包括：
//! - 网格上传（顶点缓冲，三角扇额外生成索引缓冲）
//! - 每个绘制命令一份 Uniform 缓冲
//! - 模式切换时的网格、着色器和管线重建
//! - 渲染循环

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use bytemuck::{Pod, Zeroable};
use tracing::{debug, info, warn};
use wgpu::util::DeviceExt;

use super::backend::WgpuBackend;
use super::pipeline::{PipelineCache, PipelineKey, DEPTH_FORMAT};
use super::shaders::ShaderProgram;
use crate::core::{Config, Matrix4};
use crate::core::error::{GraphicsError, Result};
use crate::geometry::MeshData;
use crate::scene::{rotation_angle, DrawCommand, MeshKind, Mode, Projection, Scene};

/// Uniform Buffer Object
///
/// 与着色器中的 `Transform` 块一一对应：`mvpmatrix` 和 `modelmatrix`。
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct TransformUniform {
    mvpmatrix: [[f32; 4]; 4],
    modelmatrix: [[f32; 4]; 4],
}

impl TransformUniform {
    fn new(mvp: &Matrix4, model: &Matrix4) -> Self {
        Self {
            mvpmatrix: *mvp.as_ref(),
            modelmatrix: *model.as_ref(),
        }
    }
}

/// 上传到 GPU 的网格
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    /// 三角扇展开后的索引缓冲和索引数量
    index_buffer: Option<(wgpu::Buffer, u32)>,
    vertex_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData) -> Result<Self> {
        mesh.validate().map_err(GraphicsError::ResourceCreation)?;

        let label = mesh.name.as_deref().unwrap_or("Mesh");
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = mesh.list_indices().map(|indices| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            (buffer, indices.len() as u32)
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            vertex_count: mesh.vertex_count() as u32,
        })
    }
}

/// 一个绘制命令使用的 Uniform 缓冲和绑定组
struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// wgpu 渲染器
pub struct Renderer {
    gfx: WgpuBackend,

    // 场景与 GPU 资源
    scene: Scene,
    meshes: HashMap<MeshKind, GpuMesh>,
    program: ShaderProgram,
    pipelines: PipelineCache,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_slots: Vec<UniformSlot>,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,

    // 渲染状态
    projection: Projection,
    rotation_period: f32,
    shader_dir: PathBuf,
    start: Instant,
}

impl Renderer {
    /// 创建新的 wgpu 渲染器，并进入配置中的初始模式
    pub fn new(event_loop: &winit::event_loop::EventLoop<()>, config: &Config) -> Result<Self> {
        info!("Creating wgpu renderer");

        // 1. 创建 wgpu 后端
        let gfx = WgpuBackend::new(event_loop, config)?;

        // 2. 初始场景
        let mode = Mode::from_index(config.scene.initial_mode).unwrap_or_default();
        let scene = Scene::new(mode, config.scene.sphere_iterations);

        // 3. 加载着色器
        let shader_dir = PathBuf::from(&config.shaders.directory);
        let program = ShaderProgram::load(&gfx.device, &shader_dir, mode.shader_family())?;

        // 4. 创建 Bind Group Layout
        debug!("Creating bind group layout");
        let bind_group_layout = gfx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Transform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        // 5. 管线缓存
        let pipelines = PipelineCache::new(
            &gfx.device,
            &bind_group_layout,
            gfx.surface_config.format,
            gfx.line_mode,
        );

        // 6. 创建深度纹理
        debug!("Creating depth texture");
        let (depth_texture, depth_view) =
            create_depth_texture(&gfx.device, gfx.surface_config.width, gfx.surface_config.height);

        let projection = Projection::from_degrees(config.graphics.fov_degrees, config.graphics.aspect);

        let mut renderer = Self {
            gfx,
            scene,
            meshes: HashMap::new(),
            program,
            pipelines,
            bind_group_layout,
            uniform_slots: Vec::new(),
            depth_texture,
            depth_view,
            projection,
            rotation_period: config.scene.rotation_period,
            shader_dir,
            start: Instant::now(),
        };

        // 7. 上传网格
        renderer.upload_meshes()?;

        info!("wgpu renderer created successfully, {}", mode);
        info!("Ready to render");

        Ok(renderer)
    }

    /// 当前模式
    pub fn mode(&self) -> Mode {
        self.scene.mode()
    }

    /// 切换模式
    ///
    /// 重新生成该模式的全部网格，重新读取并编译对应着色器，清空管线缓存。
    /// 即使模式未变也完整重建。
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        let program = ShaderProgram::load(&self.gfx.device, &self.shader_dir, mode.shader_family())?;

        self.scene.set_mode(mode);
        self.program = program;
        self.pipelines.clear();
        self.upload_meshes()?;

        info!("Now rendering {}", mode);
        Ok(())
    }

    /// 把场景中的网格上传到 GPU，替换旧缓冲
    fn upload_meshes(&mut self) -> Result<()> {
        let mut meshes = HashMap::new();
        for (kind, mesh) in self.scene.meshes() {
            debug!(
                "Uploading {:?}: {} vertices, {} primitives ({})",
                kind,
                mesh.vertex_count(),
                mesh.primitive_count(),
                mesh.topology.name()
            );
            meshes.insert(*kind, GpuMesh::upload(&self.gfx.device, mesh)?);
        }
        self.meshes = meshes;
        Ok(())
    }

    /// 确保至少有 `count` 个 Uniform 槽位
    fn ensure_uniform_slots(&mut self, count: usize) {
        while self.uniform_slots.len() < count {
            let buffer = self.gfx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Transform Uniform Buffer"),
                size: std::mem::size_of::<TransformUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.gfx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Transform Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            self.uniform_slots.push(UniformSlot { buffer, bind_group });
        }
    }

    /// 本帧的绘制命令
    fn frame_commands(&self) -> Vec<DrawCommand> {
        let elapsed = self.start.elapsed().as_secs_f32();
        let angle = rotation_angle(elapsed, self.rotation_period);
        self.scene.draw_list(angle)
    }

    /// 绘制一帧
    pub fn draw(&mut self) -> Result<()> {
        // 1. 获取交换链纹理
        let output = match self.gfx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost or outdated, reconfiguring");
                self.gfx.restore_surface();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring next image, skipping frame");
                return Ok(());
            }
            Err(e) => {
                return Err(GraphicsError::SwapchainError(format!("Failed to acquire next image: {}", e)).into());
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        // 2. 准备管线和 Uniform
        let commands = self.frame_commands();
        for cmd in &commands {
            self.pipelines.ensure(
                &self.gfx.device,
                &self.program,
                PipelineKey::new(cmd.topology, cmd.fill),
            )?;
        }
        self.ensure_uniform_slots(commands.len());

        let projection = self.projection.matrix();
        for (cmd, slot) in commands.iter().zip(&self.uniform_slots) {
            let uniform = TransformUniform::new(&cmd.mvp(&projection), &cmd.model);
            self.gfx.queue.write_buffer(&slot.buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        // 3. 创建命令编码器
        let mut encoder = self.gfx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        // 4. 渲染通道：黑色背景，清空深度
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for (cmd, slot) in commands.iter().zip(&self.uniform_slots) {
                let Some(mesh) = self.meshes.get(&cmd.mesh) else {
                    continue;
                };
                let Some(pipeline) = self.pipelines.get(&PipelineKey::new(cmd.topology, cmd.fill)) else {
                    continue;
                };

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &slot.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                match &mesh.index_buffer {
                    Some((index_buffer, index_count)) => {
                        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..*index_count, 0, 0..1);
                    }
                    None => render_pass.draw(0..mesh.vertex_count, 0..1),
                }
            }
        }

        // 5. 提交命令
        self.gfx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// 处理窗口大小调整
    ///
    /// 投影宽高比来自配置，不随窗口变化；这里只重建表面和深度缓冲。
    pub fn resize(&mut self) {
        let size = self.gfx.window().inner_size();

        if size.width > 0 && size.height > 0 {
            debug!("Resizing to {}x{}", size.width, size.height);

            self.gfx.reconfigure_surface(size.width, size.height);

            let (depth_texture, depth_view) = create_depth_texture(&self.gfx.device, size.width, size.height);
            self.depth_texture = depth_texture;
            self.depth_view = depth_view;
        }
    }

    /// 获取窗口引用
    pub fn window(&self) -> &winit::window::Window {
        self.gfx.window()
    }
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::matrix;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 128);
    }

    #[test]
    fn test_uniform_is_column_major() {
        let model = matrix::translation(1.0, 2.0, 3.0);
        let uniform = TransformUniform::new(&Matrix4::identity(), &model);
        // 第 4 列保存平移
        assert_eq!(uniform.modelmatrix[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.mvpmatrix[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
