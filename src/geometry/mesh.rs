/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器：顶点序列加上它被生成时所对应的绘制顺序。
/// 这是一个简单的数据持有者，不包含GPU资源。

use super::vertex::Vertex;

/// 顶点序列的图元拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// 每 3 个顶点一个独立三角形
    Triangles,

    /// 三角扇：所有三角形共享第一个顶点
    TriangleFan,

    /// 线带：相邻顶点依次相连
    LineStrip,
}

impl Topology {
    /// 拓扑名称，用于日志
    pub fn name(&self) -> &'static str {
        match self {
            Topology::Triangles => "triangles",
            Topology::TriangleFan => "triangle-fan",
            Topology::LineStrip => "line-strip",
        }
    }
}

/// 三角扇展开为三角形列表的索引
///
/// 现代图形 API 没有三角扇拓扑，扇面 `(0, i, i+1)` 需要用索引重新组织。
/// 少于 3 个顶点时返回空列表。
///
/// # 示例
///
/// ```rust
/// use shape_render::geometry::mesh::fan_to_list_indices;
///
/// assert_eq!(fan_to_list_indices(4), vec![0, 1, 2, 0, 2, 3]);
/// ```
pub fn fan_to_list_indices(vertex_count: u32) -> Vec<u32> {
    if vertex_count < 3 {
        return Vec::new();
    }
    (1..vertex_count - 1)
        .flat_map(|i| [0, i, i + 1])
        .collect()
}

/// CPU侧网格数据
///
/// # 架构说明
///
/// - **CPU侧**: `MeshData` 由 geometry 模块的生成函数产生
/// - **GPU侧**: 渲染器将 `MeshData` 上传到顶点缓冲区
#[derive(Debug, Clone)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 顶点的绘制顺序
    pub topology: Topology,

    /// 网格名称（可选），用于调试和识别
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个网格
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, topology: Topology) -> Self {
        Self {
            vertices,
            topology,
            name: Some(name.into()),
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取图元数量（三角形或线段）
    pub fn primitive_count(&self) -> usize {
        let n = self.vertices.len();
        match self.topology {
            Topology::Triangles => n / 3,
            Topology::TriangleFan => n.saturating_sub(2),
            Topology::LineStrip => n.saturating_sub(1),
        }
    }

    /// 按三角形列表绘制时需要的索引
    ///
    /// 只有三角扇需要索引，其他拓扑直接按顶点顺序绘制。
    pub fn list_indices(&self) -> Option<Vec<u32>> {
        match self.topology {
            Topology::TriangleFan => Some(fan_to_list_indices(self.vertices.len() as u32)),
            Topology::Triangles | Topology::LineStrip => None,
        }
    }

    /// 验证网格数据的有效性
    ///
    /// # 返回
    ///
    /// - `Ok(())`: 数据有效
    /// - `Err(String)`: 数据无效，返回错误描述
    pub fn validate(&self) -> Result<(), String> {
        let n = self.vertices.len();
        match self.topology {
            Topology::Triangles if n % 3 != 0 => Err(format!(
                "三角形列表的顶点数量必须是3的倍数，当前为: {}",
                n
            )),
            Topology::TriangleFan if n < 3 => Err(format!(
                "三角扇至少需要3个顶点，当前为: {}",
                n
            )),
            Topology::LineStrip if n < 2 => Err(format!(
                "线带至少需要2个顶点，当前为: {}",
                n
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(n: usize, topology: Topology) -> MeshData {
        MeshData::new("Test", vec![Vertex::default(); n], topology)
    }

    #[test]
    fn test_fan_to_list_indices() {
        assert_eq!(fan_to_list_indices(0), Vec::<u32>::new());
        assert_eq!(fan_to_list_indices(2), Vec::<u32>::new());
        assert_eq!(fan_to_list_indices(3), vec![0, 1, 2]);
        assert_eq!(fan_to_list_indices(5), vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn test_fan_index_count() {
        // 34 个顶点的圆锥展开成 32 个三角形
        assert_eq!(fan_to_list_indices(34).len(), 32 * 3);
    }

    #[test]
    fn test_primitive_count() {
        assert_eq!(mesh(24, Topology::Triangles).primitive_count(), 8);
        assert_eq!(mesh(34, Topology::TriangleFan).primitive_count(), 32);
        assert_eq!(mesh(300, Topology::LineStrip).primitive_count(), 299);
        assert_eq!(mesh(0, Topology::LineStrip).primitive_count(), 0);
    }

    #[test]
    fn test_list_indices_only_for_fans() {
        assert!(mesh(6, Topology::Triangles).list_indices().is_none());
        assert!(mesh(6, Topology::LineStrip).list_indices().is_none());
        assert_eq!(mesh(4, Topology::TriangleFan).list_indices(), Some(vec![0, 1, 2, 0, 2, 3]));
    }

    #[test]
    fn test_validation() {
        assert!(mesh(6, Topology::Triangles).validate().is_ok());
        assert!(mesh(7, Topology::Triangles).validate().is_err());
        assert!(mesh(2, Topology::TriangleFan).validate().is_err());
        assert!(mesh(1, Topology::LineStrip).validate().is_err());

        let result = mesh(4, Topology::Triangles).validate();
        assert!(result.unwrap_err().contains("3的倍数"));
    }

    #[test]
    fn test_topology_names() {
        assert_eq!(Topology::TriangleFan.name(), "triangle-fan");
        assert_eq!(Topology::LineStrip.name(), "line-strip");
    }
}
