/// 圆柱生成模块
///
/// 每个角度切片输出 6 个顶点：顶面圆心、顶面圆周上当前与下一角度的两点、
/// 底面圆周上当前与下一角度的两点、底面圆心。绘制时作为线带使用。

use super::mesh::{MeshData, Topology};
use super::vertex::Vertex;
use crate::core::math::constants::TAU;

/// 切片数
pub const CYLINDER_SLICES: u32 = 50;

/// 半径
pub const CYLINDER_RADIUS: f32 = 1.0;

/// 半高（顶面 y = +h，底面 y = -h）
pub const CYLINDER_HALF_LENGTH: f32 = 2.0;

/// 每个切片输出的顶点数
pub const VERTICES_PER_SLICE: usize = 6;

/// 生成圆柱顶点
///
/// 顶点数为 `CYLINDER_SLICES * 6`，全部为默认颜色。
pub fn generate_cylinder() -> Vec<Vertex> {
    let r = CYLINDER_RADIUS;
    let h = CYLINDER_HALF_LENGTH;
    let rim = |theta: f32, y: f32| Vertex::at([r * theta.cos(), y, r * theta.sin()]);

    let mut vertices = Vec::with_capacity(CYLINDER_SLICES as usize * VERTICES_PER_SLICE);
    for i in 0..CYLINDER_SLICES {
        let theta = i as f32 * TAU / CYLINDER_SLICES as f32;
        let next_theta = (i + 1) as f32 * TAU / CYLINDER_SLICES as f32;

        vertices.push(Vertex::at([0.0, h, 0.0]));
        vertices.push(rim(theta, h));
        vertices.push(rim(next_theta, h));
        vertices.push(rim(theta, -h));
        vertices.push(rim(next_theta, -h));
        vertices.push(Vertex::at([0.0, -h, 0.0]));
    }

    vertices
}

/// 生成圆柱网格（线带）
pub fn cylinder_mesh() -> MeshData {
    MeshData::new("Cylinder", generate_cylinder(), Topology::LineStrip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_vertex_count() {
        assert_eq!(generate_cylinder().len(), 300);
    }

    #[test]
    fn test_cylinder_cap_centers() {
        let vertices = generate_cylinder();
        for slice in vertices.chunks_exact(VERTICES_PER_SLICE) {
            assert_eq!(slice[0].position, [0.0, CYLINDER_HALF_LENGTH, 0.0]);
            assert_eq!(slice[5].position, [0.0, -CYLINDER_HALF_LENGTH, 0.0]);
        }
    }

    #[test]
    fn test_cylinder_rim_points() {
        let vertices = generate_cylinder();
        for slice in vertices.chunks_exact(VERTICES_PER_SLICE) {
            for (k, v) in slice[1..5].iter().enumerate() {
                let [x, y, z] = v.position;
                assert!(((x * x + z * z).sqrt() - CYLINDER_RADIUS).abs() < 1e-5);
                let expected_y = if k < 2 { CYLINDER_HALF_LENGTH } else { -CYLINDER_HALF_LENGTH };
                assert_eq!(y, expected_y);
            }
            // 顶面与底面在同一角度上对齐
            assert_eq!(slice[1].position[0], slice[3].position[0]);
            assert_eq!(slice[2].position[2], slice[4].position[2]);
        }
    }

    #[test]
    fn test_cylinder_slices_are_contiguous() {
        let vertices = generate_cylinder();
        let slices: Vec<&[Vertex]> = vertices.chunks_exact(VERTICES_PER_SLICE).collect();
        for pair in slices.windows(2) {
            let next_of_first = pair[0][2].position;
            let current_of_second = pair[1][1].position;
            for i in 0..3 {
                assert!((next_of_first[i] - current_of_second[i]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_cylinder_mesh() {
        let mesh = cylinder_mesh();
        assert_eq!(mesh.topology, Topology::LineStrip);
        assert!(mesh.vertices.iter().all(|v| v.color == [0.0, 1.0, 0.0]));
    }
}
