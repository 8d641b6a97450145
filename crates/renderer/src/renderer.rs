use std::sync::Arc;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::{Camera, CameraUniform};
use crate::mesh::Mesh;
use crate::overlay::{generate_font_atlas, OverlayVertex};
use crate::pipeline::{Pipelines, DEPTH_FORMAT};
use crate::vertex::{InstanceData, StarInstance};

/// Which scene pipeline a draw call goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    Opaque,
    Transparent,
    /// Wireframe where supported, transparent fill otherwise.
    Hologram,
}

/// Per-field starfield uniform: the roll transform plus point size and
/// opacity.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct StarUniform {
    model: [[f32; 4]; 4],
    // x = point half size, y = opacity, zw unused
    params: [f32; 4],
}

pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    pipelines: Pipelines,

    camera_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,

    star_bind_group: wgpu::BindGroup,
    star_buffer: wgpu::Buffer,
    star_instance_buffer: wgpu::Buffer,
    star_capacity: u32,

    font_bind_group: wgpu::BindGroup,

    depth_view: wgpu::TextureView,

    // Instance buffer for batched rendering
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    /// Tracks current write offset into instance_buffer per frame.
    /// Each draw call writes to a unique region so `queue.write_buffer`
    /// calls don't overwrite each other.
    frame_instance_offset: u32,
}

const MAX_INSTANCES: u32 = 1024;
const STAR_CAPACITY: u32 = 8192;

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let wireframe_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);
        let required_features = if wireframe_supported {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features,
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let present_mode = if vsync {
            // Mailbox presents the newest frame at vblank, less input lag than Fifo.
            surface_caps
                .present_modes
                .iter()
                .find(|m| matches!(m, wgpu::PresentMode::Mailbox))
                .copied()
                .unwrap_or(wgpu::PresentMode::AutoVsync)
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        let pipelines = Pipelines::new(&device, surface_format, wireframe_supported);

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipelines.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let star_uniform = StarUniform {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            params: [0.5, 0.8, 0.0, 0.0],
        };
        let star_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Star Uniform"),
            contents: bytemuck::cast_slice(&[star_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let star_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Star Bind Group"),
            layout: &pipelines.star_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: star_buffer.as_entire_binding(),
            }],
        });
        let star_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Star Instance Buffer"),
            size: (STAR_CAPACITY as usize * std::mem::size_of::<StarInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let font_bind_group = create_font_bind_group(&device, &queue, &pipelines.font_layout);

        let depth_view = create_depth_texture(&device, config.width, config.height);

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (MAX_INSTANCES as usize * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            pipelines,
            camera_bind_group,
            camera_buffer,
            camera_uniform,
            star_bind_group,
            star_buffer,
            star_instance_buffer,
            star_capacity: STAR_CAPACITY,
            font_bind_group,
            depth_view,
            instance_buffer,
            max_instances: MAX_INSTANCES,
            frame_instance_offset: 0,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view =
                create_depth_texture(&self.device, self.config.width, self.config.height);
        }
    }

    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update(camera);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    pub fn begin_frame(&mut self) -> Result<(wgpu::SurfaceTexture, wgpu::CommandEncoder)> {
        self.frame_instance_offset = 0;
        let output = self.surface.get_current_texture()?;
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        Ok((output, encoder))
    }

    /// Clear color and depth. Runs first each frame; every later pass loads.
    pub fn clear(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.0,
                        g: 0.0,
                        b: 0.01,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
    }

    /// Upload star positions and draw the whole field in one instanced call.
    pub fn render_stars(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        positions: &[StarInstance],
        model: glam::Mat4,
        point_size: f32,
        opacity: f32,
    ) {
        if positions.is_empty() {
            return;
        }
        let count = positions.len().min(self.star_capacity as usize);

        let uniform = StarUniform {
            model: model.to_cols_array_2d(),
            params: [point_size, opacity, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.star_buffer, 0, bytemuck::cast_slice(&[uniform]));
        self.queue.write_buffer(
            &self.star_instance_buffer,
            0,
            bytemuck::cast_slice(&positions[..count]),
        );

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Star Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipelines.stars);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.star_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.star_instance_buffer.slice(..));
        render_pass.draw(0..4, 0..count as u32);
    }

    /// Render a mesh with instancing through the chosen scene pipeline.
    pub fn render_instanced(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
        pass: PassKind,
    ) {
        if instances.is_empty() {
            return;
        }

        // Allocate a unique region in the instance buffer for this draw call
        let offset = self.frame_instance_offset;
        let remaining = self.max_instances.saturating_sub(offset) as usize;
        let instance_count = instances.len().min(remaining);
        if instance_count == 0 {
            return;
        }

        let byte_offset = (offset as usize * std::mem::size_of::<InstanceData>()) as u64;
        self.queue.write_buffer(
            &self.instance_buffer,
            byte_offset,
            bytemuck::cast_slice(&instances[..instance_count]),
        );
        self.frame_instance_offset = offset + instance_count as u32;

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let pipeline = match pass {
            PassKind::Opaque => &self.pipelines.opaque,
            PassKind::Transparent => &self.pipelines.transparent,
            PassKind::Hologram => &self.pipelines.hologram,
        };
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.num_indices, 0, offset..(offset + instance_count as u32));
    }

    /// Render HUD geometry. Vertex data is small and rebuilt every frame,
    /// so per-frame buffers are fine here.
    pub fn render_overlay(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        vertices: &[OverlayVertex],
        indices: &[u32],
    ) {
        if vertices.is_empty() || indices.is_empty() {
            return;
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Overlay Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipelines.overlay);
        render_pass.set_bind_group(0, &self.font_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
    }

    /// End frame and present.
    pub fn end_frame(&self, output: wgpu::SurfaceTexture, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}

fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_font_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
) -> wgpu::BindGroup {
    let (pixels, width, height) = generate_font_atlas();

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Font Atlas"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::R8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &pixels,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    // Nearest keeps the pixel font crisp at integer scales.
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Font Sampler"),
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Font Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}
