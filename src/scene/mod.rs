//! 场景模块
//!
//! 持有当前模式以及该模式需要的全部网格，并按帧组合每个物体的变换。
//! 本模块不接触图形 API：`Scene` 产出网格数据和绘制命令，
//! 由 `gfx::Renderer` 上传和执行。
//!
//! # 模式
//!
//! | 模式 | 按键 | 内容 | 着色器 |
//! |------|------|------|--------|
//! | 0 | A | 线框球体 | mode1_mode3 |
//! | 1 | B | 带光照的实心球体 | mode2 |
//! | 2 | C | 球体、圆柱、圆锥组成的线框火箭 | mode1_mode3 |

pub mod transforms;

use std::fmt;
use tracing::info;

use crate::core::math::Matrix4;
use crate::geometry::{cone_mesh, cylinder_mesh, sphere_mesh, MeshData, Topology};

pub use transforms::{rotation_angle, Projection};

/// 渲染模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// 模式 0：线框球体
    #[default]
    Wireframe = 0,
    /// 模式 1：带光照的球体
    Lit = 1,
    /// 模式 2：多物体线框场景
    Rocket = 2,
}

impl Mode {
    /// 全部模式
    pub const ALL: [Mode; 3] = [Mode::Wireframe, Mode::Lit, Mode::Rocket];

    /// 从模式编号创建
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// 模式编号
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// 该模式使用的着色器
    pub fn shader_family(&self) -> ShaderFamily {
        match self {
            Mode::Wireframe | Mode::Rocket => ShaderFamily::Basic,
            Mode::Lit => ShaderFamily::Lit,
        }
    }

    /// 该模式的多边形填充方式
    pub fn fill(&self) -> Fill {
        match self {
            Mode::Wireframe | Mode::Rocket => Fill::Wireframe,
            Mode::Lit => Fill::Solid,
        }
    }

    /// 该模式需要生成的网格
    pub fn mesh_kinds(&self) -> &'static [MeshKind] {
        match self {
            Mode::Wireframe | Mode::Lit => &[MeshKind::Sphere],
            Mode::Rocket => &[MeshKind::Sphere, MeshKind::Cone, MeshKind::Cylinder],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Wireframe => "wireframe sphere",
            Mode::Lit => "lit sphere",
            Mode::Rocket => "wireframe rocket",
        };
        write!(f, "mode {} ({})", self.index(), name)
    }
}

/// 着色器程序族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderFamily {
    /// 顶点颜色直通，模式 0 和 2 使用
    Basic,
    /// 方向光漫反射，模式 1 使用
    Lit,
}

impl ShaderFamily {
    /// 着色器文件名（不含扩展名）
    pub fn file_stem(&self) -> &'static str {
        match self {
            ShaderFamily::Basic => "mode1_mode3",
            ShaderFamily::Lit => "mode2",
        }
    }
}

/// 多边形填充方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    Wireframe,
    Solid,
}

/// 网格种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Sphere,
    Cone,
    Cylinder,
}

impl MeshKind {
    /// 生成该种类的网格
    pub fn generate(&self, sphere_iterations: u32) -> MeshData {
        match self {
            MeshKind::Sphere => sphere_mesh(sphere_iterations),
            MeshKind::Cone => cone_mesh(),
            MeshKind::Cylinder => cylinder_mesh(),
        }
    }
}

/// 一次绘制调用
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// 使用的网格
    pub mesh: MeshKind,
    /// 图元拓扑
    pub topology: Topology,
    /// 填充方式
    pub fill: Fill,
    /// 视图矩阵
    pub view: Matrix4,
    /// 模型矩阵
    pub model: Matrix4,
}

impl DrawCommand {
    /// 组合 MVP 矩阵：projection * view * model
    pub fn mvp(&self, projection: &Matrix4) -> Matrix4 {
        projection * self.view * self.model
    }
}

/// 场景状态
///
/// 持有当前模式和该模式的全部网格。切换模式时所有网格从头重新生成。
#[derive(Debug, Clone)]
pub struct Scene {
    mode: Mode,
    sphere_iterations: u32,
    meshes: Vec<(MeshKind, MeshData)>,
}

impl Scene {
    /// 创建场景并生成初始模式的网格
    pub fn new(mode: Mode, sphere_iterations: u32) -> Self {
        let mut scene = Self {
            mode,
            sphere_iterations,
            meshes: Vec::new(),
        };
        scene.rebuild_meshes();
        scene
    }

    /// 当前模式
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// 球体细分次数
    pub fn sphere_iterations(&self) -> u32 {
        self.sphere_iterations
    }

    /// 切换模式并重新生成所有网格
    ///
    /// 即使模式未变也会重新生成，与按键触发的完整重建一致。
    pub fn set_mode(&mut self, mode: Mode) {
        info!(from = %self.mode, to = %mode, "Switching mode");
        self.mode = mode;
        self.rebuild_meshes();
    }

    /// 当前模式的全部网格
    pub fn meshes(&self) -> &[(MeshKind, MeshData)] {
        &self.meshes
    }

    /// 获取指定种类的网格
    pub fn mesh(&self, kind: MeshKind) -> Option<&MeshData> {
        self.meshes.iter().find(|(k, _)| *k == kind).map(|(_, m)| m)
    }

    /// 生成本帧的绘制命令
    ///
    /// # 参数
    ///
    /// - `angle`: 动画角度，见 [`rotation_angle`]
    pub fn draw_list(&self, angle: f32) -> Vec<DrawCommand> {
        let fill = self.mode.fill();
        transforms::placements(self.mode, angle)
            .into_iter()
            .filter_map(|(kind, view, model)| {
                let topology = self.mesh(kind)?.topology;
                Some(DrawCommand { mesh: kind, topology, fill, view, model })
            })
            .collect()
    }

    fn rebuild_meshes(&mut self) {
        self.meshes = self
            .mode
            .mesh_kinds()
            .iter()
            .map(|&kind| (kind, kind.generate(self.sphere_iterations)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_index() {
        assert_eq!(Mode::from_index(0), Some(Mode::Wireframe));
        assert_eq!(Mode::from_index(1), Some(Mode::Lit));
        assert_eq!(Mode::from_index(2), Some(Mode::Rocket));
        assert_eq!(Mode::from_index(3), None);
        assert_eq!(Mode::Rocket.index(), 2);
    }

    #[test]
    fn test_mode_shader_family() {
        assert_eq!(Mode::Wireframe.shader_family().file_stem(), "mode1_mode3");
        assert_eq!(Mode::Lit.shader_family().file_stem(), "mode2");
        assert_eq!(Mode::Rocket.shader_family().file_stem(), "mode1_mode3");
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Lit.to_string(), "mode 1 (lit sphere)");
    }

    #[test]
    fn test_scene_meshes_per_mode() {
        let scene = Scene::new(Mode::Wireframe, 2);
        assert_eq!(scene.meshes().len(), 1);
        assert!(scene.mesh(MeshKind::Sphere).is_some());
        assert!(scene.mesh(MeshKind::Cone).is_none());

        let scene = Scene::new(Mode::Rocket, 2);
        assert_eq!(scene.meshes().len(), 3);
        assert_eq!(scene.mesh(MeshKind::Cone).map(|m| m.vertex_count()), Some(34));
        assert_eq!(scene.mesh(MeshKind::Cylinder).map(|m| m.vertex_count()), Some(300));
    }

    #[test]
    fn test_set_mode_regenerates_without_growth() {
        let mut scene = Scene::new(Mode::Wireframe, 2);
        let before = scene.mesh(MeshKind::Sphere).map(|m| m.vertex_count());

        scene.set_mode(Mode::Rocket);
        scene.set_mode(Mode::Wireframe);
        scene.set_mode(Mode::Wireframe);

        assert_eq!(scene.mode(), Mode::Wireframe);
        assert_eq!(scene.mesh(MeshKind::Sphere).map(|m| m.vertex_count()), before);
        assert_eq!(scene.meshes().len(), 1);
    }

    #[test]
    fn test_draw_list_counts() {
        assert_eq!(Scene::new(Mode::Wireframe, 1).draw_list(0.0).len(), 1);
        assert_eq!(Scene::new(Mode::Lit, 1).draw_list(0.0).len(), 1);

        let rocket = Scene::new(Mode::Rocket, 1).draw_list(0.0);
        assert_eq!(rocket.len(), 7);
        let count = |kind| rocket.iter().filter(|c| c.mesh == kind).count();
        assert_eq!(count(MeshKind::Sphere), 3);
        assert_eq!(count(MeshKind::Cone), 3);
        assert_eq!(count(MeshKind::Cylinder), 1);
    }

    #[test]
    fn test_draw_list_topology_and_fill() {
        let rocket = Scene::new(Mode::Rocket, 1).draw_list(0.3);
        for cmd in &rocket {
            assert_eq!(cmd.fill, Fill::Wireframe);
            let expected = match cmd.mesh {
                MeshKind::Sphere => Topology::Triangles,
                MeshKind::Cone => Topology::TriangleFan,
                MeshKind::Cylinder => Topology::LineStrip,
            };
            assert_eq!(cmd.topology, expected);
        }

        let lit = Scene::new(Mode::Lit, 1).draw_list(0.3);
        assert_eq!(lit[0].fill, Fill::Solid);
        assert_eq!(lit[0].topology, Topology::Triangles);
    }

    #[test]
    fn test_mvp_composition() {
        let cmd = &Scene::new(Mode::Wireframe, 1).draw_list(0.0)[0];
        let projection = Matrix4::identity();
        let mvp = cmd.mvp(&projection);

        // 角度为 0 时视图矩阵只有向 -Z 的平移
        assert!((mvp[(2, 3)] + 5.0).abs() < 1e-6);
        assert!((mvp[(0, 0)] - 1.0).abs() < 1e-6);
    }
}
