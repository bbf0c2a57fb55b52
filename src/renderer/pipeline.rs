//! WebGPU render pipeline setup
//!
//! Circles are drawn instanced: one shared unit mesh per `MeshHandle`, one
//! `CircleInstance` (model matrix + color) per particle. Everything is drawn
//! inside a centered square viewport so circles stay round on any window.

use std::ops::Range;

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::shapes::{MeshData, circle_mesh, unit_square};
use super::vertex::{CircleInstance, MeshVertex, colors};
use crate::consts::NUM_CIRCLE_VERTICES;
use crate::sim::{MeshHandle, Particle};

/// Handle of the arena backdrop, registered right after the circle mesh
pub const ARENA_MESH: MeshHandle = MeshHandle(1);

/// Centered square region of the framebuffer (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

/// Largest centered square that fits the framebuffer
pub fn square_viewport(width: u32, height: u32) -> Viewport {
    let side = width.min(height);
    Viewport {
        x: (width - side) / 2,
        y: (height - side) / 2,
        side,
    }
}

/// Contiguous run of instances sharing one mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub mesh: MeshHandle,
    pub instances: Range<u32>,
}

/// Build the instance list for a frame: the arena backdrop, then (optionally)
/// every particle, grouped by mesh.
pub fn build_instances(particles: &[Particle], draw_particles: bool) -> (Vec<CircleInstance>, Vec<Batch>) {
    let mut instances = Vec::with_capacity(particles.len() + 1);
    let mut batches = Vec::new();

    instances.push(CircleInstance::new(Mat4::IDENTITY, colors::ARENA));
    batches.push(Batch {
        mesh: ARENA_MESH,
        instances: 0..1,
    });

    if !draw_particles {
        return (instances, batches);
    }

    let mut order: Vec<&Particle> = particles.iter().collect();
    order.sort_by_key(|p| p.mesh);

    for particle in order {
        let index = instances.len() as u32;
        instances.push(CircleInstance::from_particle(particle));

        match batches.last_mut() {
            Some(batch) if batch.mesh == particle.mesh && batch.instances.end == index => {
                batch.instances.end += 1;
            }
            _ => batches.push(Batch {
                mesh: particle.mesh,
                instances: index..index + 1,
            }),
        }
    }

    (instances, batches)
}

/// GPU-resident mesh
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    /// Indexed by `MeshHandle`
    meshes: Vec<Mesh>,
    instance_buffer: wgpu::Buffer,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("contact-sim-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("circle_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("circle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::desc(), CircleInstance::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("instance_buffer"),
            contents: bytemuck::cast_slice(&[CircleInstance::new(Mat4::IDENTITY, colors::ARENA)]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let mut state = Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            meshes: Vec::new(),
            instance_buffer,
            size: (width, height),
        };

        // Registration order fixes the handles particles refer to
        let circle = state.register_mesh(&circle_mesh(NUM_CIRCLE_VERTICES));
        let arena = state.register_mesh(&unit_square());
        debug_assert_eq!(circle, MeshHandle::CIRCLE);
        debug_assert_eq!(arena, ARENA_MESH);

        Ok(state)
    }

    /// Upload static geometry; the returned handle is shared by every user
    pub fn register_mesh(&mut self, data: &MeshData) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u32);

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertices"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_indices"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        self.meshes.push(Mesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        });
        handle
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Draw the arena and, once the run has started, every particle
    pub fn render(&mut self, particles: &[Particle], draw_particles: bool) -> Result<(), wgpu::SurfaceError> {
        let (instances, batches) = build_instances(particles, draw_particles);

        // Recreate buffer each frame (population is small)
        self.instance_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("instance_buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::BORDER),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let viewport = square_viewport(self.size.0, self.size.1);
            render_pass.set_viewport(
                viewport.x as f32,
                viewport.y as f32,
                viewport.side as f32,
                viewport.side as f32,
                0.0,
                1.0,
            );
            render_pass.set_scissor_rect(viewport.x, viewport.y, viewport.side, viewport.side);

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            for batch in &batches {
                let Some(mesh) = self.meshes.get(batch.mesh.index()) else {
                    log::warn!("Unknown mesh handle {:?}", batch.mesh);
                    continue;
                };
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Health;
    use glam::DVec2;

    #[test]
    fn test_square_viewport_landscape() {
        assert_eq!(
            square_viewport(800, 600),
            Viewport {
                x: 100,
                y: 0,
                side: 600
            }
        );
    }

    #[test]
    fn test_square_viewport_portrait() {
        assert_eq!(
            square_viewport(480, 640),
            Viewport {
                x: 0,
                y: 80,
                side: 480
            }
        );
    }

    #[test]
    fn test_instances_hidden_while_setting_up() {
        let particles = vec![Particle::new(DVec2::ZERO, DVec2::X, 0.05)];
        let (instances, batches) = build_instances(&particles, false);

        assert_eq!(instances.len(), 1);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].mesh, ARENA_MESH);
    }

    #[test]
    fn test_instances_batched_by_mesh() {
        let particles = vec![
            Particle::new(DVec2::new(-0.5, 0.0), DVec2::X, 0.05),
            Particle::new(DVec2::new(0.5, 0.0), DVec2::X, 0.05).with_health(Health::Infected),
            Particle::new(DVec2::new(0.0, 0.5), DVec2::X, 0.05).with_health(Health::Recovered),
        ];
        let (instances, batches) = build_instances(&particles, true);

        assert_eq!(instances.len(), 4);
        assert_eq!(
            batches,
            vec![
                Batch {
                    mesh: ARENA_MESH,
                    instances: 0..1
                },
                Batch {
                    mesh: MeshHandle::CIRCLE,
                    instances: 1..4
                },
            ]
        );
        assert_eq!(instances[2].color, [1.0, 0.0, 0.0]);
    }
}
