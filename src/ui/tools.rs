//! Tool strip with inline toggle panels
//!
//! Every tool is a key mapped to a panel builder. Clicking a tool's
//! button toggles its panel; clicking another tool replaces the open
//! panel, so at most one is open at a time. Panels initialize their
//! controls from the viewer's current values and write back through its
//! operations on every change.

use crate::constants::anim;
use crate::viewer::{QuickAnimKind, QuickAnimParams, ViewerSession};
use egui::{Slider, Ui};

/// Actions the panel cannot perform itself (dialogs, viewport commands)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolsAction {
    None,
    OpenFileDialog,
    Screenshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKey {
    Open,
    Background,
    Exposure,
    Wireframe,
    Grid,
    Axes,
    AutoRotate,
    QuickAnim,
    Materials,
    Lights,
    MaterialReset,
    Fit,
    Reset,
    Screenshot,
}

impl ToolKey {
    pub const ALL: [ToolKey; 14] = [
        ToolKey::Open,
        ToolKey::Background,
        ToolKey::Exposure,
        ToolKey::Wireframe,
        ToolKey::Grid,
        ToolKey::Axes,
        ToolKey::AutoRotate,
        ToolKey::QuickAnim,
        ToolKey::Materials,
        ToolKey::Lights,
        ToolKey::MaterialReset,
        ToolKey::Fit,
        ToolKey::Reset,
        ToolKey::Screenshot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKey::Open => "Open File",
            ToolKey::Background => "Background",
            ToolKey::Exposure => "Exposure",
            ToolKey::Wireframe => "Wireframe",
            ToolKey::Grid => "Grid",
            ToolKey::Axes => "Axes",
            ToolKey::AutoRotate => "Auto-Rotate",
            ToolKey::QuickAnim => "Quick Animations",
            ToolKey::Materials => "Materials",
            ToolKey::Lights => "Lights",
            ToolKey::MaterialReset => "Material Reset",
            ToolKey::Fit => "Fit to View",
            ToolKey::Reset => "Reset View",
            ToolKey::Screenshot => "Screenshot",
        }
    }
}

pub struct ToolsPanel {
    open_panel: Option<ToolKey>,
    // Quick-anim parameters keep their values while no mode is running
    qa_speed: f32,
    qa_amp: f32,
    qa_height: f32,
}

impl Default for ToolsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolsPanel {
    pub fn new() -> Self {
        Self {
            open_panel: None,
            qa_speed: anim::DEFAULT_SPEED,
            qa_amp: anim::DEFAULT_AMP,
            qa_height: anim::DEFAULT_HEIGHT,
        }
    }

    /// Toggle semantics: same key closes, a different key replaces
    pub fn toggle(&mut self, key: ToolKey) {
        if self.open_panel == Some(key) {
            self.open_panel = None;
        } else {
            self.open_panel = Some(key);
        }
    }

    pub fn open_panel(&self) -> Option<ToolKey> {
        self.open_panel
    }

    pub fn ui(&mut self, ui: &mut Ui, session: &mut ViewerSession) -> ToolsAction {
        let mut action = ToolsAction::None;
        ui.heading("Tools");
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for key in ToolKey::ALL {
                let selected = self.open_panel == Some(key);
                if ui.selectable_label(selected, key.label()).clicked() {
                    self.toggle(key);
                }
                if self.open_panel == Some(key) {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        action = self.panel_body(ui, key, session).unwrap_or(action);
                    });
                }
            }
        });
        action
    }

    fn panel_body(
        &mut self,
        ui: &mut Ui,
        key: ToolKey,
        session: &mut ViewerSession,
    ) -> Option<ToolsAction> {
        match key {
            ToolKey::Open => {
                if ui.button("Choose .glb / .gltf").clicked() {
                    return Some(ToolsAction::OpenFileDialog);
                }
            }
            ToolKey::Background => {
                let mut color = session.env().background;
                if ui.color_edit_button_rgb(&mut color).changed() {
                    session.set_background(color);
                }
            }
            ToolKey::Exposure => {
                let mut exposure = session.env().exposure;
                if ui
                    .add(Slider::new(&mut exposure, 0.3..=2.0).text("Exposure"))
                    .changed()
                {
                    session.set_exposure(exposure);
                }
            }
            ToolKey::Wireframe => {
                let mut on = session.wireframe_enabled();
                if ui.checkbox(&mut on, "Enable").changed() {
                    session.set_wireframe(on);
                }
            }
            ToolKey::Grid => {
                let mut on = session.env().show_grid;
                if ui.checkbox(&mut on, "Show grid").changed() {
                    session.set_grid(on);
                }
            }
            ToolKey::Axes => {
                let mut on = session.env().show_axes;
                if ui.checkbox(&mut on, "Show axes").changed() {
                    session.set_axes(on);
                }
            }
            ToolKey::AutoRotate => {
                let mut on = session.is_auto_rotating();
                if ui.checkbox(&mut on, "Enable").changed() {
                    session.set_auto_rotate(on);
                }
                let mut speed = session.auto_rotate_speed();
                if ui
                    .add(Slider::new(&mut speed, -5.0..=5.0).text("Speed"))
                    .changed()
                {
                    session.set_auto_rotate_speed(speed);
                }
            }
            ToolKey::QuickAnim => return Some(self.quick_anim_body(ui, session)),
            ToolKey::Materials => {
                let mut roughness = session.roughness();
                if ui
                    .add(Slider::new(&mut roughness, 0.0..=1.0).text("Roughness"))
                    .changed()
                {
                    session.set_roughness(roughness);
                }
                let mut metalness = session.metalness();
                if ui
                    .add(Slider::new(&mut metalness, 0.0..=1.0).text("Metalness"))
                    .changed()
                {
                    session.set_metalness(metalness);
                }
            }
            ToolKey::Lights => {
                let env = session.env();
                let mut hemisphere = env.hemisphere;
                if ui
                    .add(Slider::new(&mut hemisphere, 0.0..=2.0).text("Hemisphere"))
                    .changed()
                {
                    session.set_hemisphere_intensity(hemisphere);
                }
                let mut key_light = env.key;
                if ui
                    .add(Slider::new(&mut key_light, 0.0..=2.0).text("Key"))
                    .changed()
                {
                    session.set_key_intensity(key_light);
                }
                let mut rim = env.rim;
                if ui.add(Slider::new(&mut rim, 0.0..=2.0).text("Rim")).changed() {
                    session.set_rim_intensity(rim);
                }
            }
            ToolKey::MaterialReset => {
                if ui.button("Reset all materials").clicked() {
                    session.reset_materials();
                }
            }
            ToolKey::Fit => {
                if ui.button("Fit model").clicked() {
                    session.auto_frame();
                }
            }
            ToolKey::Reset => {
                if ui.button("Reset view").clicked() {
                    session.reset_view();
                }
            }
            ToolKey::Screenshot => {
                if ui.button("Save PNG").clicked() {
                    return Some(ToolsAction::Screenshot);
                }
            }
        }
        None
    }

    fn quick_anim_body(&mut self, ui: &mut Ui, session: &mut ViewerSession) -> ToolsAction {
        let active = session.quick_anim_kind();
        if ui.selectable_label(active.is_none(), "None").clicked() {
            session.stop_quick_anim();
        }
        for kind in QuickAnimKind::ALL {
            if ui
                .selectable_label(active == Some(kind), kind.label())
                .clicked()
            {
                session.set_quick_anim(QuickAnimParams {
                    kind,
                    speed: self.qa_speed,
                    amp: self.qa_amp,
                    height: self.qa_height,
                });
            }
        }

        ui.separator();
        let mut changed = false;
        changed |= ui
            .add(Slider::new(&mut self.qa_speed, 0.2..=3.0).text("Speed"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut self.qa_amp, 0.0..=1.0).text("Amplitude"))
            .changed();
        changed |= ui
            .add(Slider::new(&mut self.qa_height, 0.0..=0.6).text("Height"))
            .changed();
        if changed {
            session.update_quick_anim_params(self.qa_speed, self.qa_amp, self.qa_height);
        }

        ui.separator();
        let clips_label = if session.are_clips_playing() {
            "Stop Built-in Animations"
        } else {
            "Play Built-in Animations"
        };
        if ui.button(clips_label).clicked() {
            session.toggle_clips();
        }
        ui.small("Each action is a toggle. Starting one animation stops others. Built-in clips auto-start on load.");
        ToolsAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_the_same_tool_twice_opens_then_closes() {
        let mut tools = ToolsPanel::new();
        tools.toggle(ToolKey::Background);
        assert_eq!(tools.open_panel(), Some(ToolKey::Background));
        tools.toggle(ToolKey::Background);
        assert_eq!(tools.open_panel(), None);
    }

    #[test]
    fn clicking_a_different_tool_replaces_the_open_panel() {
        let mut tools = ToolsPanel::new();
        tools.toggle(ToolKey::Background);
        tools.toggle(ToolKey::Exposure);
        assert_eq!(tools.open_panel(), Some(ToolKey::Exposure));
    }
}
