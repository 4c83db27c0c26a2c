use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use quadrant_core::TextureHandle;

use crate::context::{GraphicsContext, GraphicsError, GraphicsResult};

static NEXT_TEXTURE_ID: AtomicU32 = AtomicU32::new(1);

/// A sampled RGBA8 texture ready to be bound by the sprite pipeline.
///
/// Cloning is cheap: clones share the GPU resources and compare equal by id.
#[derive(Debug, Clone)]
pub struct SpriteTexture {
    id: u32,
    width: u32,
    height: u32,
    bind_group: Arc<wgpu::BindGroup>,
    _texture: Arc<wgpu::Texture>,
}

impl SpriteTexture {
    /// Upload tightly packed RGBA8 pixels.
    pub fn from_rgba8(
        context: &GraphicsContext,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: Option<&str>,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> GraphicsResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(GraphicsError::TextureDataSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::create(context, layout, sampler, label, width, height, data))
    }

    /// 1x1 opaque white, sampled by untextured sprites.
    pub(crate) fn white(
        context: &GraphicsContext,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        Self::create(
            context,
            layout,
            sampler,
            Some("quadrant_white_texture"),
            1,
            1,
            &[255, 255, 255, 255],
        )
    }

    fn create(
        context: &GraphicsContext,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        label: Option<&str>,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self {
            id: NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            bind_group: Arc::new(bind_group),
            _texture: Arc::new(texture),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn bind_group(&self) -> &Arc<wgpu::BindGroup> {
        &self.bind_group
    }
}

impl PartialEq for SpriteTexture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SpriteTexture {}

impl TextureHandle for SpriteTexture {
    fn sort_key(&self) -> u32 {
        self.id
    }
}
