//! Sprite pipeline creation helpers.

use std::sync::Arc;

use glam::Mat4;
use quadrant_core::SpriteVertex;

/// The built-in sprite shader. Custom passes must keep its entry points and bindings:
/// `vs_main`/`fs_main`, texture and sampler in group 0, projection uniform in group 1.
pub const SPRITE_SHADER: &str = include_str!("sprite.wgsl");

/// Vertex buffer layout matching [`SpriteVertex`].
pub fn sprite_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Unorm8x4,  // color
        2 => Float32x2, // tex_coord
    ];
    wgpu::VertexBufferLayout {
        array_stride: SpriteVertex::SIZE,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: ATTRS,
    }
}

/// Screen-space projection: origin top-left, y down, depth passed through.
pub(crate) fn projection_matrix(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_lh(0.0, width.max(1) as f32, height.max(1) as f32, 0.0, 0.0, 1.0)
}

pub(crate) fn create_projection_buffer(device: &wgpu::Device) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sprite_projection"),
        size: std::mem::size_of::<Mat4>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) fn create_projection_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("sprite_projection_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

pub(crate) fn create_projection_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sprite_projection_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

/// Texture + sampler layout bound at group 0.
pub(crate) fn create_texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("sprite_texture_layout"),
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
    })
}

pub(crate) fn create_sprite_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("sprite_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// Create an alpha-blended sprite pipeline from WGSL source.
pub(crate) fn create_sprite_pipeline(
    device: &wgpu::Device,
    pipeline_layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    label: &str,
    source: &str,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[sprite_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Rotated and mirrored sprites flip winding.
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        // Ordering comes from the batcher's sort, not a depth buffer.
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// One pass of a sprite shader effect: the pipeline used for the next draw.
#[derive(Debug, Clone)]
pub struct SpritePass {
    label: String,
    pipeline: Arc<wgpu::RenderPipeline>,
}

impl SpritePass {
    pub(crate) fn new(label: impl Into<String>, pipeline: wgpu::RenderPipeline) -> Self {
        Self {
            label: label.into(),
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn pipeline(&self) -> &Arc<wgpu::RenderPipeline> {
        &self.pipeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_vertex_layout_matches_sprite_vertex() {
        let layout = sprite_vertex_layout();
        assert_eq!(layout.array_stride, 24);

        let offsets: Vec<_> = layout.attributes.iter().map(|attr| attr.offset).collect();
        assert_eq!(offsets, vec![0, 12, 16]);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Unorm8x4);
    }

    #[test]
    fn test_projection_maps_screen_corners() {
        let projection = projection_matrix(800, 600);

        let top_left = projection.project_point3(Vec3::new(0.0, 0.0, 0.5));
        assert!((top_left.x + 1.0).abs() < 1e-5);
        assert!((top_left.y - 1.0).abs() < 1e-5);
        assert!((top_left.z - 0.5).abs() < 1e-5);

        let bottom_right = projection.project_point3(Vec3::new(800.0, 600.0, 0.0));
        assert!((bottom_right.x - 1.0).abs() < 1e-5);
        assert!((bottom_right.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shader_entry_points() {
        assert!(SPRITE_SHADER.contains("fn vs_main"));
        assert!(SPRITE_SHADER.contains("fn fs_main"));
    }
}
