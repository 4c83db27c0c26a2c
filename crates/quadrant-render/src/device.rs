use std::sync::Arc;

use quadrant_batch::TEXTURE_SLOT;
use quadrant_core::profiling::profile_function;
use quadrant_core::{GraphicsDevice, SpriteVertex};

use crate::context::{GraphicsContext, GraphicsResult};
use crate::pipeline::{self, SPRITE_SHADER, SpritePass};
use crate::texture::SpriteTexture;

/// Options for creating a [`WgpuSpriteDevice`].
#[derive(Debug, Clone)]
pub struct SpriteDeviceDescriptor {
    /// Format of the color target the sprites are rendered into.
    pub surface_format: wgpu::TextureFormat,
    pub label: Option<&'static str>,
}

impl Default for SpriteDeviceDescriptor {
    fn default() -> Self {
        Self {
            surface_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            label: None,
        }
    }
}

/// A draw recorded during a flush, replayed by [`WgpuSpriteDevice::render`].
#[derive(Debug)]
struct DrawCommand {
    pipeline: Arc<wgpu::RenderPipeline>,
    bind_group: Arc<wgpu::BindGroup>,
    first_index: u32,
    index_count: u32,
    base_vertex: i32,
}

/// [`GraphicsDevice`] backed by wgpu.
///
/// Draws issued by the batcher are staged on the CPU. A frame looks like:
///
/// ```rust,ignore
/// batcher.flush(&mut device, SpriteSortMode::BackToFront, None)?;
/// device.prepare();
/// {
///     let mut pass = encoder.begin_render_pass(&descriptor);
///     device.render(&mut pass);
/// }
/// queue.submit([encoder.finish()]);
/// device.finish_frame();
/// ```
///
/// A shader pass applies to the next draw only; draws without one use the built-in
/// sprite pipeline.
pub struct WgpuSpriteDevice {
    context: Arc<GraphicsContext>,
    surface_format: wgpu::TextureFormat,
    texture_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    sampler: wgpu::Sampler,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    default_pipeline: Arc<wgpu::RenderPipeline>,
    white_texture: Option<SpriteTexture>,

    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    vertices: Vec<SpriteVertex>,
    indices: Vec<u16>,
    commands: Vec<DrawCommand>,

    bound: Option<SpriteTexture>,
    pending_pass: Option<Arc<wgpu::RenderPipeline>>,
    viewport: (u32, u32),
}

impl WgpuSpriteDevice {
    pub fn new(context: Arc<GraphicsContext>, descriptor: SpriteDeviceDescriptor) -> Self {
        let device = &context.device;
        let texture_layout = pipeline::create_texture_bind_group_layout(device);
        let projection_layout = pipeline::create_projection_bind_group_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: descriptor.label.or(Some("sprite_pipeline_layout")),
            bind_group_layouts: &[&texture_layout, &projection_layout],
            push_constant_ranges: &[],
        });
        let projection_buffer = pipeline::create_projection_buffer(device);
        let projection_bind_group =
            pipeline::create_projection_bind_group(device, &projection_layout, &projection_buffer);
        let default_pipeline = pipeline::create_sprite_pipeline(
            device,
            &pipeline_layout,
            descriptor.surface_format,
            "sprite_pipeline",
            SPRITE_SHADER,
        );
        let sampler = pipeline::create_sprite_sampler(device);

        let mut sprite_device = Self {
            surface_format: descriptor.surface_format,
            texture_layout,
            pipeline_layout,
            sampler,
            projection_buffer,
            projection_bind_group,
            default_pipeline: Arc::new(default_pipeline),
            white_texture: None,
            vertex_buffer: None,
            index_buffer: None,
            vertices: Vec::new(),
            indices: Vec::new(),
            commands: Vec::new(),
            bound: None,
            pending_pass: None,
            viewport: (0, 0),
            context,
        };
        sprite_device.set_viewport_size(1, 1);
        sprite_device
    }

    pub fn context(&self) -> &Arc<GraphicsContext> {
        &self.context
    }

    /// Update the projection so sprite coordinates map to pixels of a `width` x `height`
    /// target.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        if self.viewport == (width, height) {
            return;
        }
        self.viewport = (width, height);
        let projection = pipeline::projection_matrix(width, height);
        self.context.queue.write_buffer(
            &self.projection_buffer,
            0,
            bytemuck::cast_slice(&projection.to_cols_array()),
        );
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    /// Upload tightly packed RGBA8 pixels as a sprite texture.
    pub fn create_texture(
        &self,
        label: Option<&str>,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> GraphicsResult<SpriteTexture> {
        SpriteTexture::from_rgba8(
            &self.context,
            &self.texture_layout,
            &self.sampler,
            label,
            width,
            height,
            data,
        )
    }

    /// Compile a shader pass from WGSL that follows the layout of [`SPRITE_SHADER`].
    pub fn create_pass(&self, label: &str, source: &str) -> SpritePass {
        let pipeline = pipeline::create_sprite_pipeline(
            &self.context.device,
            &self.pipeline_layout,
            self.surface_format,
            label,
            source,
        );
        SpritePass::new(label, pipeline)
    }

    /// The 1x1 white texture for untextured sprites, created on first use.
    pub fn white_texture(&mut self) -> SpriteTexture {
        if let Some(texture) = &self.white_texture {
            return texture.clone();
        }
        let texture = SpriteTexture::white(&self.context, &self.texture_layout, &self.sampler);
        tracing::debug!("Created white texture {}", texture.id());
        self.white_texture = Some(texture.clone());
        texture
    }

    /// Upload the vertices and indices staged since the last frame.
    pub fn prepare(&mut self) {
        profile_function!();

        if self.commands.is_empty() {
            return;
        }

        // Buffer writes must be a multiple of four bytes.
        if self.indices.len() % 2 == 1 {
            self.indices.push(0);
        }

        let device = &self.context.device;
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&self.indices);
        let vertex_buffer = ensure_buffer(
            device,
            &mut self.vertex_buffer,
            "sprite_vertex_buffer",
            wgpu::BufferUsages::VERTEX,
            vertex_bytes.len() as u64,
        );
        self.context.queue.write_buffer(vertex_buffer, 0, vertex_bytes);
        let index_buffer = ensure_buffer(
            device,
            &mut self.index_buffer,
            "sprite_index_buffer",
            wgpu::BufferUsages::INDEX,
            index_bytes.len() as u64,
        );
        self.context.queue.write_buffer(index_buffer, 0, index_bytes);
    }

    /// Replay the recorded draws into `pass`. Call [`prepare`](Self::prepare) first.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        profile_function!();

        let (Some(vertex_buffer), Some(index_buffer)) = (&self.vertex_buffer, &self.index_buffer)
        else {
            return;
        };
        if self.commands.is_empty() {
            return;
        }

        pass.set_bind_group(1, &self.projection_bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        let mut current: Option<&Arc<wgpu::RenderPipeline>> = None;
        for command in &self.commands {
            if current.is_none_or(|pipeline| !Arc::ptr_eq(pipeline, &command.pipeline)) {
                pass.set_pipeline(&command.pipeline);
                current = Some(&command.pipeline);
            }
            pass.set_bind_group(0, command.bind_group.as_ref(), &[]);
            pass.draw_indexed(
                command.first_index..command.first_index + command.index_count,
                command.base_vertex,
                0..1,
            );
        }
    }

    /// Drop the recorded draws and bindings.
    pub fn finish_frame(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.commands.clear();
        self.bound = None;
        self.pending_pass = None;
    }

    /// Draws recorded since the last [`finish_frame`](Self::finish_frame).
    pub fn draw_count(&self) -> usize {
        self.commands.len()
    }
}

impl GraphicsDevice for WgpuSpriteDevice {
    type Texture = SpriteTexture;
    type Pass = SpritePass;

    fn bind_texture(&mut self, slot: u32, texture: &SpriteTexture) {
        if slot != TEXTURE_SLOT {
            tracing::warn!("Sprite pipeline only samples slot {TEXTURE_SLOT}, ignoring slot {slot}");
            return;
        }
        self.bound = Some(texture.clone());
    }

    fn draw_indexed_triangles(
        &mut self,
        vertices: &[SpriteVertex],
        indices: &[u16],
        triangle_count: u32,
    ) {
        let index_count = draw_index_count(triangle_count, indices.len());
        if index_count == 0 {
            return;
        }

        let texture = match self.bound.clone() {
            Some(texture) => texture,
            None => self.white_texture(),
        };
        let pipeline = self
            .pending_pass
            .take()
            .unwrap_or_else(|| self.default_pipeline.clone());

        let base_vertex = self.vertices.len() as i32;
        let first_index = self.indices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend_from_slice(&indices[..index_count]);

        self.commands.push(DrawCommand {
            pipeline,
            bind_group: texture.bind_group().clone(),
            first_index,
            index_count: index_count as u32,
            base_vertex,
        });
    }

    fn apply_shader_pass(&mut self, pass: &SpritePass) {
        self.pending_pass = Some(pass.pipeline().clone());
    }
}

/// Indices consumed by a draw of `triangle_count` triangles from a slice of `available`.
///
/// A short slice is a caller bug: debug builds panic, release builds draw what fits.
fn draw_index_count(triangle_count: u32, available: usize) -> usize {
    let requested = triangle_count as usize * 3;
    debug_assert!(
        available >= requested,
        "draw of {triangle_count} triangles passed only {available} indices"
    );
    requested.min(available)
}

/// Return a buffer of at least `required` bytes, replacing `slot` when it is too small.
fn ensure_buffer<'a>(
    device: &wgpu::Device,
    slot: &'a mut Option<wgpu::Buffer>,
    label: &str,
    usage: wgpu::BufferUsages,
    required: u64,
) -> &'a wgpu::Buffer {
    if slot.as_ref().is_some_and(|buffer| buffer.size() < required) {
        *slot = None;
    }
    slot.get_or_insert_with(|| {
        let size = required.next_power_of_two().max(wgpu::COPY_BUFFER_ALIGNMENT);
        tracing::debug!("Growing {label} to {size} bytes");
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_index_count_uses_every_triangle() {
        assert_eq!(draw_index_count(2, 6), 6);
        assert_eq!(draw_index_count(2, 12), 6);
        assert_eq!(draw_index_count(0, 0), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "draw of 4 triangles passed only 6 indices")]
    fn test_draw_index_count_rejects_short_slice() {
        draw_index_count(4, 6);
    }
}
