//! 渲染管线缓存
//!
//! 管线按 (拓扑, 填充方式) 缓存，首次使用时创建。
//! 着色器程序更换（切换模式）时缓存整体清空。

use std::collections::HashMap;
use tracing::debug;

use super::shaders::ShaderProgram;
use crate::core::error::{GraphicsError, Result};
use crate::geometry::{Topology, Vertex};
use crate::scene::Fill;

/// 深度缓冲格式
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// 顶点属性：位置 (location 0) 和颜色 (location 1)，各为 3 个 f32
pub const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: Vertex::POSITION_LOCATION,
        format: wgpu::VertexFormat::Float32x3,
    },
    wgpu::VertexAttribute {
        offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        shader_location: Vertex::COLOR_LOCATION,
        format: wgpu::VertexFormat::Float32x3,
    },
];

/// 顶点缓冲布局
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// 网格拓扑对应的 wgpu 图元拓扑
///
/// 三角扇在上传时已展开为索引三角形列表。
pub fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::Triangles | Topology::TriangleFan => wgpu::PrimitiveTopology::TriangleList,
        Topology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
    }
}

/// 填充方式对应的多边形模式；设备未开启线框特性时退化为实心
pub fn polygon_mode(fill: Fill, line_mode: bool) -> wgpu::PolygonMode {
    match fill {
        Fill::Wireframe if line_mode => wgpu::PolygonMode::Line,
        Fill::Wireframe | Fill::Solid => wgpu::PolygonMode::Fill,
    }
}

/// 管线缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub topology: Topology,
    pub fill: Fill,
}

impl PipelineKey {
    pub fn new(topology: Topology, fill: Fill) -> Self {
        Self { topology, fill }
    }
}

/// 渲染管线缓存
pub struct PipelineCache {
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    layout: wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    line_mode: bool,
}

impl PipelineCache {
    /// 创建空缓存
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
        line_mode: bool,
    ) -> Self {
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        Self {
            pipelines: HashMap::new(),
            layout,
            surface_format,
            line_mode,
        }
    }

    /// 丢弃所有已创建的管线
    pub fn clear(&mut self) {
        self.pipelines.clear();
    }

    /// 已缓存的管线数量
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// 获取已创建的管线
    pub fn get(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(key)
    }

    /// 确保指定键的管线存在，不存在时用给定着色器程序创建
    pub fn ensure(
        &mut self,
        device: &wgpu::Device,
        program: &ShaderProgram,
        key: PipelineKey,
    ) -> Result<()> {
        if self.pipelines.contains_key(&key) {
            return Ok(());
        }

        debug!(
            "Creating pipeline: shader={}, topology={}, fill={:?}",
            program.family.file_stem(),
            key.topology.name(),
            key.fill
        );

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(key.topology.name()),
            layout: Some(&self.layout),
            vertex: wgpu::VertexState {
                module: &program.vertex,
                entry_point: "main",
                buffers: &[vertex_buffer_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &program.fragment,
                entry_point: "main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: primitive_topology(key.topology),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: polygon_mode(key.fill, self.line_mode),
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            return Err(GraphicsError::ShaderCompilation(format!(
                "{} pipeline: {}",
                program.family.file_stem(),
                e
            ))
            .into());
        }

        self.pipelines.insert(key, pipeline);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_vertex() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn test_primitive_topology() {
        assert_eq!(primitive_topology(Topology::Triangles), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(primitive_topology(Topology::TriangleFan), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(primitive_topology(Topology::LineStrip), wgpu::PrimitiveTopology::LineStrip);
    }

    #[test]
    fn test_polygon_mode_falls_back_without_line_feature() {
        assert_eq!(polygon_mode(Fill::Wireframe, true), wgpu::PolygonMode::Line);
        assert_eq!(polygon_mode(Fill::Wireframe, false), wgpu::PolygonMode::Fill);
        assert_eq!(polygon_mode(Fill::Solid, true), wgpu::PolygonMode::Fill);
    }
}
