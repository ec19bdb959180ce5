/// 几何体顶点定义模块
///
/// 定义所有程序化网格共用的顶点结构（位置 + 颜色），以及球体细分时
/// 使用的三角面片 `Facet`。

use bytemuck::{Pod, Zeroable};

/// 默认顶点颜色（绿色）
pub const DEFAULT_COLOR: [f32; 3] = [0.0, 1.0, 0.0];

/// 带颜色的3D顶点
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐，
/// 顶点切片可以通过 `bytemuck::cast_slice` 直接上传为交错缓冲。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)，偏移 0
/// - color: 12 bytes (3 * f32)，偏移 12
/// - **总计**: 24 bytes
///
/// # 示例
///
/// ```rust
/// use shape_render::geometry::vertex::Vertex;
///
/// let vertex = Vertex::at([0.0, 1.0, 0.0]);
/// assert_eq!(vertex.color, [0.0, 1.0, 0.0]);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 顶点颜色 (r, g, b)，范围 [0.0, 1.0]
    pub color: [f32; 3],
}

impl Vertex {
    /// 着色器中位置属性的 location
    pub const POSITION_LOCATION: u32 = 0;

    /// 着色器中颜色属性的 location
    pub const COLOR_LOCATION: u32 = 1;

    /// 创建一个新的顶点
    #[inline]
    pub fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    /// 在指定位置创建一个默认颜色的顶点
    #[inline]
    pub fn at(position: [f32; 3]) -> Self {
        Self::new(position, DEFAULT_COLOR)
    }

    /// 位置向量的欧几里得长度
    #[inline]
    pub fn length(&self) -> f32 {
        let [x, y, z] = self.position;
        (x * x + y * y + z * z).sqrt()
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::at([0.0, 0.0, 0.0])
    }
}

/// 三角面片
///
/// 球体细分过程中的中间单元，展开为顶点序列后即被丢弃。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Facet {
    pub p1: Vertex,
    pub p2: Vertex,
    pub p3: Vertex,
}

impl Facet {
    /// 由三个角点创建面片
    #[inline]
    pub fn new(p1: Vertex, p2: Vertex, p3: Vertex) -> Self {
        Self { p1, p2, p3 }
    }

    /// 按 p1, p2, p3 顺序返回三个角点
    #[inline]
    pub fn corners(&self) -> [Vertex; 3] {
        [self.p1, self.p2, self.p3]
    }
}
