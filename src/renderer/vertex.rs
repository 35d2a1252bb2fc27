//! Vertex format shared by every court primitive

use bytemuck::{Pod, Zeroable};

/// Flat-colored 2D vertex, six per quad
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Neon palette for the court elements
pub mod colors {
    /// Clear color: deep navy, not quite black
    pub const BACKGROUND: [f32; 4] = [0.02, 0.03, 0.06, 1.0];
    /// Dashed center line, electric cyan (#00cfff)
    pub const CENTER_LINE: [f32; 4] = [0.0, 0.812, 1.0, 1.0];
    /// Player paddle, spring green (#00ffaf)
    pub const PLAYER_PADDLE: [f32; 4] = [0.0, 1.0, 0.686, 1.0];
    /// AI paddle, hot magenta (#ff008c)
    pub const AI_PADDLE: [f32; 4] = [1.0, 0.0, 0.549, 1.0];
    /// Ball, signal yellow (#fffd3e)
    pub const BALL: [f32; 4] = [1.0, 0.992, 0.243, 1.0];
}
