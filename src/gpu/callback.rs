//! Viewport rendering callback for wgpu integration with egui
//!
//! Bridges the per-frame [`RenderSnapshot`] into egui's wgpu render pass.
//! A single shared renderer owns the pipelines and buffers; callbacks are
//! cheap clones carrying only the snapshot.

use crate::gpu::renderer::Renderer3D;
use crate::viewer::RenderSnapshot;
use eframe::wgpu;
use egui_wgpu::CallbackTrait;
use log::warn;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

// Shared renderer instance for all viewport paints
static SHARED_RENDERER: Lazy<Arc<Mutex<Renderer3D>>> =
    Lazy::new(|| Arc::new(Mutex::new(Renderer3D::new())));

/// Paint callback handed to `egui::Painter` each frame
#[derive(Clone)]
pub struct ViewportRenderCallback {
    renderer: Arc<Mutex<Renderer3D>>,
    snapshot: RenderSnapshot,
}

impl ViewportRenderCallback {
    pub fn new(snapshot: RenderSnapshot) -> Self {
        Self {
            renderer: SHARED_RENDERER.clone(),
            snapshot,
        }
    }
}

impl CallbackTrait for ViewportRenderCallback {
    fn prepare(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        _screen_descriptor: &egui_wgpu::ScreenDescriptor,
        _egui_encoder: &mut wgpu::CommandEncoder,
        _callback_resources: &mut egui_wgpu::CallbackResources,
    ) -> Vec<wgpu::CommandBuffer> {
        match self.renderer.lock() {
            Ok(mut renderer) => {
                if !renderer.is_initialized() {
                    renderer.initialize_from_refs(device, queue);
                }
                renderer.prepare(queue, &self.snapshot);
            }
            Err(e) => warn!("viewport renderer lock poisoned in prepare: {}", e),
        }
        Vec::new()
    }

    fn paint(
        &self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'static>,
        _callback_resources: &egui_wgpu::CallbackResources,
    ) {
        match self.renderer.lock() {
            Ok(renderer) => {
                if renderer.is_initialized() {
                    renderer.render(render_pass, &self.snapshot);
                }
            }
            Err(e) => warn!("viewport renderer lock poisoned in paint: {}", e),
        }
    }
}
