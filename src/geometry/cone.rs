/// 圆锥生成模块
///
/// 以三角扇形式输出：第一个顶点是锥尖，随后是 `lod + 1` 个底面圆周点，
/// 最后一个圆周点与第一个重合（角度为 2π），用来闭合扇面。

use tracing::info;

use super::mesh::{MeshData, Topology};
use super::vertex::Vertex;
use crate::core::math::constants::TAU;

/// 圆周采样段数
pub const CONE_LOD: u32 = 32;

/// 底面半径
pub const CONE_RADIUS: f32 = 1.0;

/// 底面所在的 z 坐标（0 为圆盘，≥ 1 为圆锥）
pub const CONE_HEIGHT: f32 = 2.0;

/// 锥尖位置
pub const CONE_APEX: [f32; 3] = [0.0, 0.0, 0.0];

/// 交替取补的颜色序列
///
/// 内部只有一个标量 `cf`，初值为 0。每个颜色通道取当前的 `cf`，
/// 然后 `cf = 1 - cf`；三个通道用完后继续给下一个顶点使用。
#[derive(Debug, Clone, Default)]
pub struct AlternatingColors {
    cf: f32,
}

impl AlternatingColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 下一个顶点的颜色
    pub fn next_color(&mut self) -> [f32; 3] {
        let r = self.advance();
        let g = self.advance();
        let b = self.advance();
        [r, g, b]
    }

    fn advance(&mut self) -> f32 {
        let value = self.cf;
        self.cf = 1.0 - self.cf;
        value
    }
}

impl Iterator for AlternatingColors {
    type Item = [f32; 3];

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_color())
    }
}

/// 生成圆锥顶点（三角扇顺序）
///
/// 顶点数为 `1 + (CONE_LOD + 1)`。
pub fn generate_cone() -> Vec<Vertex> {
    let step = TAU / CONE_LOD as f32;
    let mut colors = AlternatingColors::new();
    let mut vertices = Vec::with_capacity(CONE_LOD as usize + 2);

    vertices.push(Vertex::new(CONE_APEX, colors.next_color()));

    for i in 0..=CONE_LOD {
        let a = i as f32 * step;
        let position = [CONE_RADIUS * a.cos(), CONE_RADIUS * a.sin(), CONE_HEIGHT];
        vertices.push(Vertex::new(position, colors.next_color()));
    }

    vertices
}

/// 生成圆锥网格（三角扇）
pub fn cone_mesh() -> MeshData {
    let vertices = generate_cone();
    info!("cone vertices: {}", vertices.len());
    MeshData::new("Cone", vertices, Topology::TriangleFan)
}
