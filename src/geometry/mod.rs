/// 程序化几何体生成模块
///
/// 生成三种基本体的顶点序列。所有函数都是纯函数：只返回数据，
/// 从不调用图形 API，因此可以在没有GPU上下文的情况下测试。
///
/// # 模块结构
///
/// - `vertex`: 顶点与三角面片定义
/// - `mesh`: 网格数据与图元拓扑
/// - `sphere`: 八面体细分单位球
/// - `cone`: 三角扇圆锥
/// - `cylinder`: 分片圆柱
///
/// # 架构设计
///
/// ```text
/// generate_* (纯计算)
///     ↓
/// MeshData (CPU侧数据)
///     ↓
/// Renderer (上传到GPU)
/// ```
///
/// # 使用示例
///
/// ```rust
/// use shape_render::geometry::{sphere_mesh, cone_mesh, cylinder_mesh};
///
/// let sphere = sphere_mesh(5);
/// assert_eq!(sphere.vertex_count(), 2048 * 3);
/// assert_eq!(cone_mesh().vertex_count(), 34);
/// assert_eq!(cylinder_mesh().vertex_count(), 300);
/// ```

pub mod vertex;
pub mod mesh;
pub mod sphere;
pub mod cone;
pub mod cylinder;

// 重新导出常用类型
pub use vertex::{Facet, Vertex};
pub use mesh::{MeshData, Topology};
pub use sphere::{generate_unit_sphere, sphere_mesh};
pub use cone::{generate_cone, cone_mesh};
pub use cylinder::{generate_cylinder, cylinder_mesh};
