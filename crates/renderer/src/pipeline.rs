use crate::overlay::OverlayVertex;
use crate::vertex::{InstanceData, StarInstance, Vertex};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// All render pipelines and their shared bind group layouts.
///
/// Holograms want wireframe rendering; on adapters without
/// `POLYGON_MODE_LINE` they fall back to the transparent fill pipeline.
pub struct Pipelines {
    pub camera_layout: wgpu::BindGroupLayout,
    pub star_layout: wgpu::BindGroupLayout,
    pub font_layout: wgpu::BindGroupLayout,
    pub opaque: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
    pub hologram: wgpu::RenderPipeline,
    pub stars: wgpu::RenderPipeline,
    pub overlay: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        wireframe_supported: bool,
    ) -> Self {
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let star_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("star_bind_group_layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let font_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("font_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });
        let stars_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stars_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/stars.wgsl").into()),
        });
        let overlay_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("overlay_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&camera_layout],
            push_constant_ranges: &[],
        });

        let opaque = make_scene_pipeline(
            device,
            &scene_pl,
            &scene_shader,
            surface_format,
            SceneVariant::Opaque,
        );
        let transparent = make_scene_pipeline(
            device,
            &scene_pl,
            &scene_shader,
            surface_format,
            SceneVariant::Transparent,
        );
        let hologram = if wireframe_supported {
            make_scene_pipeline(
                device,
                &scene_pl,
                &scene_shader,
                surface_format,
                SceneVariant::Wireframe,
            )
        } else {
            log::warn!("POLYGON_MODE_LINE unsupported, holograms render as transparent fill");
            make_scene_pipeline(
                device,
                &scene_pl,
                &scene_shader,
                surface_format,
                SceneVariant::Transparent,
            )
        };

        let stars_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stars_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &star_layout],
            push_constant_ranges: &[],
        });
        let stars = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stars_pipeline"),
            layout: Some(&stars_pl),
            vertex: wgpu::VertexState {
                module: &stars_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[StarInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &stars_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let overlay_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("overlay_pipeline_layout"),
            bind_group_layouts: &[&font_layout],
            push_constant_ranges: &[],
        });
        let overlay = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("overlay_pipeline"),
            layout: Some(&overlay_pl),
            vertex: wgpu::VertexState {
                module: &overlay_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[OverlayVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &overlay_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            multiview: None,
            cache: None,
        });

        Self {
            camera_layout,
            star_layout,
            font_layout,
            opaque,
            transparent,
            hologram,
            stars,
            overlay,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum SceneVariant {
    Opaque,
    Transparent,
    Wireframe,
}

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    variant: SceneVariant,
) -> wgpu::RenderPipeline {
    let (label, blend, depth_write, polygon_mode, cull) = match variant {
        SceneVariant::Opaque => (
            "scene_opaque_pipeline",
            Some(wgpu::BlendState::REPLACE),
            true,
            wgpu::PolygonMode::Fill,
            Some(wgpu::Face::Back),
        ),
        SceneVariant::Transparent => (
            "scene_transparent_pipeline",
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
            wgpu::PolygonMode::Fill,
            None,
        ),
        SceneVariant::Wireframe => (
            "scene_wireframe_pipeline",
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
            wgpu::PolygonMode::Line,
            None,
        ),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout(), InstanceData::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: cull,
            polygon_mode,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
