//! 场景变换
//!
//! 每个模式下各物体的视图矩阵和模型矩阵，以及动画角度和投影。
//! 模式 2 中球体为火箭头部，圆柱为箭身，三个圆锥为尾焰。

use super::{MeshKind, Mode};
use crate::core::math::{constants, matrix, Matrix4};

/// 相机到原点的距离
const CAMERA_DISTANCE: f32 = 5.0;

/// 动画角度
///
/// `angle = (t mod period) * 360 / period`。结果直接作为弧度使用，
/// 决定了物体的旋转速度（默认周期 400 秒时约 0.9 弧度/秒）。
pub fn rotation_angle(elapsed_secs: f32, period: f32) -> f32 {
    (elapsed_secs % period) * 360.0 / period
}

/// 透视投影参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// 垂直视野（弧度）
    pub fov_y: f32,
    /// 宽高比
    pub aspect: f32,
    /// 近裁剪面
    pub near: f32,
    /// 远裁剪面
    pub far: f32,
}

impl Projection {
    /// 从角度制视野创建
    pub fn from_degrees(fov_degrees: f32, aspect: f32) -> Self {
        Self {
            fov_y: fov_degrees * constants::DEG_TO_RAD,
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// wgpu 裁剪空间下的投影矩阵
    pub fn matrix(&self) -> Matrix4 {
        matrix::perspective(self.fov_y, self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_degrees(45.0, 1.0)
    }
}

/// 绕三轴的翻滚：Rx(-a) * Ry(a/2) * Rz(a/2)
fn tumble(angle: f32) -> Matrix4 {
    matrix::rotation_x(-angle) * matrix::rotation_y(angle * 0.5) * matrix::rotation_z(angle * 0.5)
}

/// 模式对应的视图矩阵
pub fn view_matrix(mode: Mode, angle: f32) -> Matrix4 {
    let back = matrix::translation(0.0, 0.0, -CAMERA_DISTANCE);
    match mode {
        Mode::Wireframe => back * tumble(angle),
        Mode::Lit => back,
        Mode::Rocket => back * matrix::uniform_scaling(0.5) * tumble(angle),
    }
}

/// 模式 2 中圆锥的模型矩阵：先绕 X 轴转 90°，再平移、缩放
fn cone_model(x: f32, z: f32, scale: f32) -> Matrix4 {
    matrix::rotation_x(constants::HALF_PI)
        * matrix::translation(x, 0.0, z)
        * matrix::uniform_scaling(scale)
}

/// 小球的模型矩阵
fn small_sphere_model(x: f32) -> Matrix4 {
    matrix::translation(x, 3.75, 0.0) * matrix::uniform_scaling(0.5)
}

/// 模式下所有物体的 (网格, 视图矩阵, 模型矩阵)，按绘制顺序排列
pub fn placements(mode: Mode, angle: f32) -> Vec<(MeshKind, Matrix4, Matrix4)> {
    let view = view_matrix(mode, angle);
    match mode {
        Mode::Wireframe => vec![(MeshKind::Sphere, view, Matrix4::identity())],
        Mode::Lit => vec![(MeshKind::Sphere, view, matrix::rotation_z(-angle))],
        Mode::Rocket => vec![
            (MeshKind::Sphere, view, Matrix4::identity()),
            (MeshKind::Cylinder, view, matrix::translation(0.0, 2.0, 0.0)),
            (MeshKind::Cone, view, cone_model(0.0, -6.0, 1.0)),
            (MeshKind::Sphere, view, small_sphere_model(1.5)),
            (MeshKind::Sphere, view, small_sphere_model(-1.5)),
            (MeshKind::Cone, view, cone_model(1.5, -5.0, 0.5)),
            (MeshKind::Cone, view, cone_model(-1.5, -5.0, 0.5)),
        ],
    }
}
