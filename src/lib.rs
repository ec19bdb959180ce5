//! ShapeRender - 程序化几何体渲染
//!
//! 生成八面体细分球、三角扇圆锥和线带圆柱，并用 wgpu 在三种模式下绘制：
//! 线框球体、带光照的球体、以及由三种几何体组成的线框火箭。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理、输入）
//! - `geometry`: 几何体生成（纯计算，不依赖 GPU）
//! - `scene`: 模式、网格集合和每帧的绘制命令
//! - `gfx`: wgpu 图形后端与渲染器
//!
//! # 使用示例
//!
//! ```no_run
//! use shape_render::scene::{Mode, Scene};
//!
//! let scene = Scene::new(Mode::Rocket, 5);
//! for cmd in scene.draw_list(0.0) {
//!     println!("{:?} as {}", cmd.mesh, cmd.topology.name());
//! }
//! ```

pub mod core;
pub mod geometry;
pub mod scene;
pub mod gfx;
