//! Central viewport: camera input, the wgpu paint callback, and the
//! transient status chip.
//!
//! Drag orbits, Shift+drag pans, scroll zooms. The viewer session is only
//! touched through its camera and snapshot operations.

use crate::constants::camera as cam_const;
use crate::gpu::ViewportRenderCallback;
use crate::theme::{Colors, Dimensions};
use crate::viewer::ViewerSession;
use egui::{Align2, Color32, FontId, Sense, Ui};

#[derive(Default)]
pub struct ViewportPanel;

impl ViewportPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn ui(&mut self, ui: &mut Ui, session: &mut ViewerSession) {
        let size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        session
            .camera
            .set_aspect(rect.width().max(1.0) / rect.height().max(1.0));

        if response.dragged() {
            let delta = response.drag_delta();
            let shift = ui.ctx().input(|i| i.modifiers.shift);
            if shift {
                session.camera.pan(delta.x, delta.y, rect.height());
            } else {
                session.camera.orbit(
                    delta.x * cam_const::DRAG_SENSITIVITY,
                    delta.y * cam_const::DRAG_SENSITIVITY,
                );
            }
        }
        if response.hovered() {
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                session.camera.zoom(scroll * cam_const::SCROLL_SENSITIVITY);
            }
        }

        let snapshot = session.render_snapshot();
        ui.painter().add(egui_wgpu::Callback::new_paint_callback(
            rect,
            ViewportRenderCallback::new(snapshot),
        ));

        if let Some((text, alpha, error)) = session.status_line() {
            let colors = Colors::default();
            let dims = Dimensions::default();
            let base = if error {
                colors.status_error
            } else {
                colors.status_text
            };
            let color = base.linear_multiply(alpha);
            let pos = rect.left_top() + egui::vec2(dims.status_offset, dims.status_offset);
            // Subtle backdrop keeps the chip readable over bright scenes
            let chip_rect = egui::Rect::from_min_size(pos, egui::vec2(72.0, 20.0));
            ui.painter().rect_filled(
                chip_rect.expand(2.0),
                dims.corner_radius,
                Color32::from_black_alpha((60.0 * alpha) as u8),
            );
            ui.painter().text(
                pos,
                Align2::LEFT_TOP,
                text,
                FontId::proportional(14.0),
                color,
            );
        }
    }
}
