//! Vertex and instance types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::{Health, Particle};

/// Mesh vertex in model space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
}

impl MeshVertex {
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Per-instance model transform and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    _pad: f32,
}

impl CircleInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x3
    ];

    pub fn new(model: Mat4, color: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
            _pad: 0.0,
        }
    }

    /// Scale by radius, translate by position, no rotation
    pub fn from_particle(particle: &Particle) -> Self {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(particle.radius() as f32),
            Quat::IDENTITY,
            Vec3::new(particle.pos.x as f32, particle.pos.y as f32, 0.0),
        );
        Self::new(model, health_color(particle.health))
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Display color for a health state
pub fn health_color(health: Health) -> [f32; 3] {
    match health {
        Health::Susceptible => colors::SUSCEPTIBLE,
        Health::Infected => colors::INFECTED,
        Health::Recovered => colors::RECOVERED,
    }
}

/// Colors for scene elements
pub mod colors {
    pub const SUSCEPTIBLE: [f32; 3] = [0.0, 0.0, 1.0];
    pub const INFECTED: [f32; 3] = [1.0, 0.0, 0.0];
    pub const RECOVERED: [f32; 3] = [0.0, 1.0, 0.0];
    pub const ARENA: [f32; 3] = [0.0, 0.0, 0.0];
    /// Letterbox around the square arena
    pub const BORDER: wgpu::Color = wgpu::Color {
        r: 0.2,
        g: 0.2,
        b: 0.2,
        a: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_instance_layout_size() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 80);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 12);
    }

    #[test]
    fn test_instance_from_particle() {
        let particle = Particle::new(DVec2::new(0.5, -0.25), DVec2::X, 0.05)
            .with_health(Health::Infected);
        let instance = CircleInstance::from_particle(&particle);

        assert_eq!(instance.model[3], [0.5, -0.25, 0.0, 1.0]);
        assert!((instance.model[0][0] - 0.05).abs() < 1e-7);
        assert!((instance.model[1][1] - 0.05).abs() < 1e-7);
        assert_eq!(instance.model[0][1], 0.0);
        assert_eq!(instance.color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_health_colors_are_distinct() {
        let colors = [
            health_color(Health::Susceptible),
            health_color(Health::Infected),
            health_color(Health::Recovered),
        ];
        assert_eq!(colors[0], [0.0, 0.0, 1.0]);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
