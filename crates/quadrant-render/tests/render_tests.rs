//! wgpu backend tests. All but the error formatting test need a GPU adapter:
//! run with `cargo test -p quadrant-render -- --ignored`.

use std::sync::Arc;

use quadrant_batch::{SpriteBatcher, SpriteSortMode};
use quadrant_core::{Color, GraphicsDevice, Rect, ShaderEffect, TextureHandle};
use quadrant_render::{
    GraphicsContext, GraphicsError, SPRITE_SHADER, SpriteDeviceDescriptor, WgpuSpriteDevice, wgpu,
};

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

fn sprite_device() -> Option<WgpuSpriteDevice> {
    match GraphicsContext::new_owned_sync() {
        Ok(ctx) => Some(WgpuSpriteDevice::new(
            ctx,
            SpriteDeviceDescriptor {
                surface_format: TARGET_FORMAT,
                label: Some("test_sprite_device"),
            },
        )),
        Err(e) => {
            println!("GPU not available: {:?}", e);
            None
        }
    }
}

fn render_offscreen(device: &mut WgpuSpriteDevice, width: u32, height: u32) {
    let ctx = device.context().clone();
    let target = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("test_target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TARGET_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());

    device.set_viewport_size(width, height);
    device.prepare();
    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("test_encoder"),
        });
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("test_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        device.render(&mut pass);
    }
    ctx.queue.submit([encoder.finish()]);
    device.finish_frame();
}

#[test]
#[ignore] // Requires GPU
fn test_context_arc_cloning() {
    if let Ok(ctx) = GraphicsContext::new_owned_sync() {
        let ctx2 = ctx.clone();
        assert_eq!(Arc::strong_count(&ctx), 2);
        assert_eq!(
            ctx.limits().max_texture_dimension_2d,
            ctx2.limits().max_texture_dimension_2d
        );

        drop(ctx2);
        assert_eq!(Arc::strong_count(&ctx), 1);
    }
}

#[test]
#[ignore] // Requires GPU
fn test_white_texture_is_cached() {
    let Some(mut device) = sprite_device() else {
        return;
    };

    let first = device.white_texture();
    let second = device.white_texture();
    assert_eq!(first, second);
    assert!(first.same_texture(&second));
    assert_eq!((first.width(), first.height()), (1, 1));
}

#[test]
#[ignore] // Requires GPU
fn test_texture_ids_are_unique() {
    let Some(device) = sprite_device() else {
        return;
    };

    let a = device.create_texture(Some("a"), 2, 2, &[255; 16]).unwrap();
    let b = device.create_texture(Some("b"), 2, 2, &[128; 16]).unwrap();
    assert_ne!(a.sort_key(), b.sort_key());
    assert!(!a.same_texture(&b));
}

#[test]
#[ignore] // Requires GPU
fn test_texture_rejects_short_data() {
    let Some(device) = sprite_device() else {
        return;
    };

    let result = device.create_texture(None, 4, 4, &[0; 12]);
    assert!(matches!(
        result,
        Err(GraphicsError::TextureDataSize {
            expected: 64,
            actual: 12,
            ..
        })
    ));
}

#[test]
#[ignore] // Requires GPU
fn test_batcher_flush_records_draws() {
    let Some(mut device) = sprite_device() else {
        return;
    };
    let red = device.create_texture(Some("red"), 1, 1, &[255, 0, 0, 255]).unwrap();
    let white = device.white_texture();

    let mut batcher = SpriteBatcher::new();
    for i in 0..10 {
        let texture = if i < 5 { red.clone() } else { white.clone() };
        batcher.get_item(texture).set(
            i as f32 * 8.0,
            0.0,
            8.0,
            8.0,
            Color::WHITE,
            Rect::UNIT,
            0.5,
        );
    }
    batcher
        .flush(&mut device, SpriteSortMode::Deferred, None)
        .unwrap();
    assert_eq!(device.draw_count(), 2);

    render_offscreen(&mut device, 128, 32);
    assert_eq!(device.draw_count(), 0);
}

#[test]
#[ignore] // Requires GPU
fn test_effect_pass_applies_to_each_run() {
    let Some(mut device) = sprite_device() else {
        return;
    };
    let pass = device.create_pass("tinted", SPRITE_SHADER);
    let effect = ShaderEffect::new("tint", vec![pass]);
    let texture = device.white_texture();

    let mut batcher = SpriteBatcher::new();
    batcher
        .get_item(texture)
        .set(0.0, 0.0, 4.0, 4.0, Color::RED, Rect::UNIT, 0.0);
    batcher
        .flush(&mut device, SpriteSortMode::Deferred, Some(&effect))
        .unwrap();
    assert_eq!(device.draw_count(), 1);

    render_offscreen(&mut device, 16, 16);
}

#[test]
#[ignore] // Requires GPU
fn test_unbound_draw_uses_white_texture() {
    let Some(mut device) = sprite_device() else {
        return;
    };

    let quad = [quadrant_core::SpriteVertex::default(); 4];
    device.draw_indexed_triangles(&quad, &[0, 1, 2, 1, 3, 2], 2);
    assert_eq!(device.draw_count(), 1);

    render_offscreen(&mut device, 4, 4);
}

#[test]
fn test_graphics_error_display() {
    let err = GraphicsError::NoAdapter;
    assert_eq!(err.to_string(), "Failed to find a suitable GPU adapter");
    assert!(format!("{:?}", err).contains("NoAdapter"));
}
