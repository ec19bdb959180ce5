/// Build script for ShapeRender
///
/// # Shader Strategy:
/// - GLSL 450 shaders are read from the working directory at runtime and
///   compiled by wgpu (naga glsl frontend), so nothing is embedded here.
/// - The script only makes cargo rebuild when the shipped sources change.
fn main() {
    println!("cargo:rerun-if-changed=mode1_mode3.vert");
    println!("cargo:rerun-if-changed=mode1_mode3.frag");
    println!("cargo:rerun-if-changed=mode2.vert");
    println!("cargo:rerun-if-changed=mode2.frag");
}
