//! ShapeRender - 程序化几何体渲染程序
//!
//! 打开一个 640×480 的窗口，按键切换三种渲染模式：
//!
//! | 按键 | 动作 |
//! |------|------|
//! | A | 模式 0：线框球体 |
//! | B | 模式 1：带光照的球体 |
//! | C | 模式 2：线框火箭 |
//! | Esc / Q | 退出 |
//!
//! # 使用方法
//!
//! ```bash
//! # 着色器文件默认从当前目录读取
//! cargo run
//! ```
//!
//! 可选的 `config.toml` 覆盖窗口、投影、细分次数、着色器目录和日志设置。

use shape_render::core::{log, Config, InputAction, InputSystem, Result, ShapeRenderError};
use shape_render::gfx::Renderer;
use tracing::{debug, error, info};
use winit::event::{Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml，缺失时使用默认值）
/// 2. 验证配置
/// 3. 初始化日志系统
/// 4. 创建事件循环和渲染器
/// 5. 启动主循环
///
/// 任何错误都会记录日志、输出到 stderr，并以状态码 1 退出。
fn main() {
    // 1. 加载配置（在初始化日志之前）
    let config = Config::from_file_or_default("config.toml");

    // 2. 验证配置
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!("ShapeRender starting...");
    info!(version = env!("CARGO_PKG_VERSION"), "Application initialized");

    info!(
        width = config.window.width,
        height = config.window.height,
        sphere_iterations = config.scene.sphere_iterations,
        initial_mode = config.scene.initial_mode,
        shader_dir = %config.shaders.directory,
        "Configuration"
    );

    if let Err(e) = run(&config) {
        fatal(&e);
    }
}

/// 创建窗口和渲染器并运行事件循环，直到窗口关闭
fn run(config: &Config) -> Result<()> {
    // 4. 创建事件循环
    let event_loop = EventLoop::new()
        .map_err(|e| ShapeRenderError::Initialization(format!("Failed to create event loop: {}", e)))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // 5. 创建渲染器
    let mut renderer = Renderer::new(&event_loop, config)?;
    let mut input = InputSystem::new();

    info!("Entering main loop...");

    // 6. 启动事件循环
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, window_id } if window_id == renderer.window().id() => {
                match event {
                    // 窗口关闭事件
                    WindowEvent::CloseRequested => {
                        info!("Close requested, shutting down...");
                        elwt.exit();
                    }
                    // 键盘事件
                    WindowEvent::KeyboardInput {
                        event: KeyEvent {
                            physical_key: PhysicalKey::Code(keycode),
                            state,
                            ..
                        },
                        ..
                    } => match input.on_keyboard_input(keycode, state) {
                        Some(InputAction::Quit) => {
                            info!("Quit key pressed, shutting down...");
                            elwt.exit();
                        }
                        Some(InputAction::SelectMode(mode)) => {
                            if let Err(e) = renderer.set_mode(mode) {
                                fatal(&e);
                            }
                        }
                        None => {}
                    },
                    // 失去焦点时释放的按键收不到，全部清空
                    WindowEvent::Focused(false) => input.reset(),
                    // 窗口大小调整事件
                    WindowEvent::Resized(new_size) => {
                        debug!(
                            width = new_size.width,
                            height = new_size.height,
                            "Window resized"
                        );
                        renderer.resize();
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = renderer.draw() {
                            fatal(&e);
                        }
                    }
                    _ => {}
                }
            }
            // 准备绘制下一帧
            Event::AboutToWait => renderer.window().request_redraw(),
            _ => {}
        })
        .map_err(|e| ShapeRenderError::Runtime(format!("Event loop failed: {}", e)))?;

    info!("ShapeRender exited");
    Ok(())
}

/// 记录终止性错误并以状态码 1 退出
fn fatal(e: &ShapeRenderError) -> ! {
    error!("{}", e);
    eprintln!("{}", e);
    std::process::exit(1);
}
