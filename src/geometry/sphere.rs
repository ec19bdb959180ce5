/// 单位球体细分模块
///
/// 从八面体出发，每次迭代把每个三角面片按边中点拆成四个，
/// 中点投影回单位球面。迭代结束后再对全部角点做一次归一化，
/// 保证浮点误差不会让任何顶点偏离单位球面。
///
/// # 面片数量
///
/// `k` 次迭代后共有 `8 · 4^(k-1)` 个面片：
///
/// | 迭代次数 | 面片数 | 顶点数 |
/// |---------|--------|--------|
/// | 1       | 8      | 24     |
/// | 3       | 128    | 384    |
/// | 5       | 2048   | 6144   |
///
/// # 注意
///
/// 中点取两个端点坐标的算术平均，而非球面插值，因此最终的面片密度
/// 并不完全均匀。面片的生成顺序和坐标是确定的，可逐位复现。

use tracing::{debug, warn};

use super::mesh::{MeshData, Topology};
use super::vertex::{Facet, Vertex};

/// 允许的最大迭代次数（7 次已有 32768 个面片）
pub const MAX_ITERATIONS: u32 = 7;

/// 八面体的六个角点（归一化之前）
///
/// 赤道上的四个点位于 (±1, ±1, 0)，两极位于 (0, 0, ±1)。
const BASE_CORNERS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
    [-1.0, -1.0, 0.0],
    [1.0, -1.0, 0.0],
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
];

/// 八面体的八个面（角点在 `BASE_CORNERS` 中的下标）
const BASE_FACETS: [[usize; 3]; 8] = [
    [0, 3, 4],
    [0, 4, 5],
    [0, 5, 2],
    [0, 2, 3],
    [1, 4, 3],
    [1, 5, 4],
    [1, 2, 5],
    [1, 3, 2],
];

/// 归一化顶点位置
///
/// 长度为零时返回零向量，不做除法。颜色保持不变。
pub fn normalize(vertex: Vertex) -> Vertex {
    let length = vertex.length();
    let position = if length != 0.0 {
        let [x, y, z] = vertex.position;
        [x / length, y / length, z / length]
    } else {
        [0.0, 0.0, 0.0]
    };
    Vertex::new(position, vertex.color)
}

/// 两个顶点的中点
///
/// 坐标取算术平均；新顶点使用默认颜色。
pub fn midpoint(a: &Vertex, b: &Vertex) -> Vertex {
    Vertex::at([
        (a.position[0] + b.position[0]) / 2.0,
        (a.position[1] + b.position[1]) / 2.0,
        (a.position[2] + b.position[2]) / 2.0,
    ])
}

/// `iterations` 次细分后的面片数量：`8 · 4^(iterations-1)`
///
/// `iterations` 为 0 时按 1 处理。
pub fn facet_count(iterations: u32) -> usize {
    8 * 4usize.pow(iterations.max(1) - 1)
}

/// 归一化后的八面体八个面片
pub fn base_octahedron() -> Vec<Facet> {
    let corners = BASE_CORNERS.map(|p| normalize(Vertex::at(p)));
    BASE_FACETS
        .iter()
        .map(|&[a, b, c]| Facet::new(corners[a], corners[b], corners[c]))
        .collect()
}

/// 生成单位球体的面片
///
/// # 参数
///
/// - `iterations`: 细分迭代次数，1 表示只有八面体本身
///
/// # 返回
///
/// 独立三角形的面片列表（不共享顶点），长度为 [`facet_count`]。
///
/// # 面片顺序
///
/// 每次迭代中，第 `j` 个面片被原地替换为保留 p1 角的那一块，
/// 另外三块依次追加到列表末尾。
pub fn generate_unit_sphere(iterations: u32) -> Vec<Facet> {
    if iterations == 0 {
        warn!("Sphere iterations must be at least 1, using 1");
    }
    let iterations = iterations.max(1);

    let mut facets = Vec::with_capacity(facet_count(iterations));
    facets.extend(base_octahedron());

    for _ in 1..iterations {
        let existing = facets.len();
        for j in 0..existing {
            let Facet { p1, p2, p3 } = facets[j];

            let m12 = midpoint(&p1, &p2);
            let m23 = midpoint(&p2, &p3);
            let m31 = midpoint(&p3, &p1);

            facets[j] = Facet::new(p1, m12, m31);
            facets.push(Facet::new(m12, p2, m23));
            facets.push(Facet::new(m31, m23, p3));
            facets.push(Facet::new(m12, m23, m31));
        }
    }

    for facet in facets.iter_mut() {
        facet.p1 = normalize(facet.p1);
        facet.p2 = normalize(facet.p2);
        facet.p3 = normalize(facet.p3);
    }

    debug!(iterations, facets = facets.len(), "Unit sphere tessellated");
    facets
}

/// 把面片展开为顶点序列（每个面片按 p1, p2, p3 顺序）
pub fn flatten_facets(facets: &[Facet]) -> Vec<Vertex> {
    facets.iter().flat_map(Facet::corners).collect()
}

/// 生成球体网格（三角形列表）
pub fn sphere_mesh(iterations: u32) -> MeshData {
    let facets = generate_unit_sphere(iterations);
    tracing::info!("{} facets generated", facets.len());

    MeshData::new("Sphere", flatten_facets(&facets), Topology::Triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < EPSILON)
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = normalize(Vertex::at([3.0, 0.0, 4.0]));
        assert!(approx_eq(v.position, [0.6, 0.0, 0.8]));
        assert!((v.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let v = normalize(Vertex::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]));
        assert_eq!(v.position, [0.0, 0.0, 0.0]);
        assert_eq!(v.color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_midpoint_is_arithmetic_mean() {
        let a = Vertex::new([0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let b = Vertex::at([1.0, 0.0, 0.0]);
        let m = midpoint(&a, &b);

        // 不投影到球面，长度小于 1
        assert_eq!(m.position, [0.5, 0.0, 0.5]);
        assert!(m.length() < 1.0);
        assert_eq!(m.color, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_facet_count_formula() {
        assert_eq!(facet_count(0), 8);
        assert_eq!(facet_count(1), 8);
        assert_eq!(facet_count(2), 32);
        assert_eq!(facet_count(5), 2048);
    }

    #[test]
    fn test_facet_count_matches_generation() {
        for k in 1..=5 {
            assert_eq!(generate_unit_sphere(k).len(), facet_count(k), "iterations = {}", k);
        }
    }

    #[test]
    fn test_zero_iterations_yields_octahedron() {
        assert_eq!(generate_unit_sphere(0), generate_unit_sphere(1));
    }

    #[test]
    fn test_all_vertices_on_unit_sphere() {
        for facet in generate_unit_sphere(4) {
            for corner in facet.corners() {
                assert!((corner.length() - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_iteration_one_uses_base_corners() {
        let corners: Vec<[f32; 3]> = BASE_CORNERS
            .iter()
            .map(|&p| normalize(Vertex::at(p)).position)
            .collect();

        let facets = generate_unit_sphere(1);
        assert_eq!(facets.len(), 8);

        let vertices = flatten_facets(&facets);
        assert_eq!(vertices.len(), 24);
        for v in &vertices {
            assert!(corners.iter().any(|&c| approx_eq(c, v.position)));
        }
    }

    #[test]
    fn test_base_corners_are_distinct() {
        let octahedron = base_octahedron();
        let mut seen: Vec<[f32; 3]> = Vec::new();
        for v in flatten_facets(&octahedron) {
            if !seen.iter().any(|&s| approx_eq(s, v.position)) {
                seen.push(v.position);
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_first_subdivision_order() {
        let base = base_octahedron();
        let facets = generate_unit_sphere(2);

        // 第 0 个面片被原地替换，保留原来的 p1
        assert!(approx_eq(facets[0].p1.position, base[0].p1.position));

        // 追加的第一块以原面片的 p2 为第二个角点
        assert!(approx_eq(facets[8].p2.position, base[0].p2.position));
        assert!(approx_eq(facets[9].p3.position, base[0].p3.position));
    }

    #[test]
    fn test_sphere_mesh_is_triangle_list() {
        let mesh = sphere_mesh(3);
        assert_eq!(mesh.topology, Topology::Triangles);
        assert_eq!(mesh.vertex_count() % 3, 0);
        assert_eq!(mesh.vertex_count(), facet_count(3) * 3);
        assert!(mesh.vertices.iter().all(|v| v.color == [0.0, 1.0, 0.0]));
    }
}
