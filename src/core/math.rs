//! 数学库模块
//!
//! 基于 `nalgebra` 提供场景变换需要的类型别名和矩阵辅助函数。
//!
//! # 坐标约定
//!
//! - 右手坐标系，相机默认朝向 -Z
//! - 投影矩阵先按 OpenGL 约定（深度范围 [-1, 1]）构造，
//!   再乘以 [`OPENGL_TO_WGPU`] 转换到 wgpu 的深度范围 [0, 1]

pub use nalgebra::{
    Matrix4 as Mat4, Vector3 as Vec3, Vector4 as Vec4,
};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix4 = Mat4<f32>;

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 2π
    pub const TAU: f32 = std::f32::consts::TAU;

    /// π/2
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// OpenGL 裁剪空间到 wgpu 裁剪空间的深度修正矩阵
///
/// z' = 0.5 * z + 0.5 * w
#[rustfmt::skip]
pub const OPENGL_TO_WGPU: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5, 1.0],
];

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 创建均匀缩放矩阵
    pub fn uniform_scaling(s: f32) -> Matrix4 {
        Matrix4::new_scaling(s)
    }

    /// 创建绕 X 轴旋转的矩阵
    pub fn rotation_x(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::x_axis(), angle)
    }

    /// 创建绕 Y 轴旋转的矩阵
    pub fn rotation_y(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
    }

    /// 创建绕 Z 轴旋转的矩阵
    pub fn rotation_z(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::z_axis(), angle)
    }

    /// 创建 wgpu 可直接使用的透视投影矩阵
    ///
    /// `fov_y` 为弧度。
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
        opengl_to_wgpu() * Matrix4::new_perspective(aspect, fov_y, near, far)
    }

    /// [`OPENGL_TO_WGPU`] 的矩阵形式
    pub fn opengl_to_wgpu() -> Matrix4 {
        // 常量按列存储，与 nalgebra 的内存布局一致
        Matrix4::from(OPENGL_TO_WGPU)
    }
}
