//! Application shell: panel layout, keyboard shortcuts, preference
//! persistence, file dialogs, and screenshot plumbing.

use crate::constants::panel;
use crate::prefs::UiPrefs;
use crate::theme;
use crate::ui::{SidebarPanel, ToolsAction, ToolsPanel, ViewportPanel};
use crate::viewer::ViewerSession;
use eframe::egui;
use egui::{Color32, Context, Key};
use log::{error, info, warn};
use std::path::Path;

pub struct ViewerApp {
    session: ViewerSession,
    sidebar: SidebarPanel,
    tools: ToolsPanel,
    viewport: ViewportPanel,
    prefs: UiPrefs,
    saved_prefs: UiPrefs,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, manifest_path: &Path) -> Self {
        theme::apply(&cc.egui_ctx);
        let prefs = UiPrefs::load();
        Self {
            session: ViewerSession::new(),
            sidebar: SidebarPanel::new(manifest_path),
            tools: ToolsPanel::new(),
            viewport: ViewportPanel::new(),
            prefs,
            saved_prefs: prefs,
        }
    }

    fn handle_shortcuts(&mut self, ctx: &Context) {
        ctx.input(|i| {
            if i.modifiers.alt && i.key_pressed(Key::L) {
                self.prefs.left_collapsed = !self.prefs.left_collapsed;
            }
            if i.modifiers.alt && i.key_pressed(Key::R) {
                self.prefs.right_collapsed = !self.prefs.right_collapsed;
            }
        });
    }

    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("glTF models", &["glb", "gltf"])
            .pick_file()
        {
            info!("opening {}", path.display());
            self.session.load_asset(path);
        }
    }

    fn handle_screenshots(&mut self, ctx: &Context) {
        let images: Vec<_> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Screenshot { image, .. } => Some(image.clone()),
                    _ => None,
                })
                .collect()
        });
        for image in images {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("PNG image", &["png"])
                .set_file_name("screenshot.png")
                .save_file()
            else {
                continue;
            };
            let [width, height] = image.size;
            let bytes: Vec<u8> = image
                .pixels
                .iter()
                .flat_map(|c| c.to_array())
                .collect();
            match image::RgbaImage::from_raw(width as u32, height as u32, bytes) {
                Some(rgba) => {
                    if let Err(e) = rgba.save(&path) {
                        error!("failed to save screenshot: {}", e);
                    } else {
                        info!("screenshot saved to {}", path.display());
                    }
                }
                None => error!("screenshot buffer had unexpected size"),
            }
        }
    }

    fn persist_prefs_if_changed(&mut self) {
        if self.prefs != self.saved_prefs {
            if let Err(e) = self.prefs.save() {
                warn!("could not persist UI prefs: {}", e);
            }
            self.saved_prefs = self.prefs;
        }
    }

    /// Edge button that restores a collapsed panel
    fn edge_restore_button(ctx: &Context, id: &str, align: egui::Align2, label: &str) -> bool {
        let mut clicked = false;
        egui::Area::new(egui::Id::new(id))
            .anchor(align, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if ui.button(label).clicked() {
                    clicked = true;
                }
            });
        clicked
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Animations and pending loads need continuous frames
        ctx.request_repaint();

        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.session.advance(dt);

        self.handle_shortcuts(ctx);
        self.handle_screenshots(ctx);

        if self.prefs.left_collapsed {
            if Self::edge_restore_button(ctx, "left_edge_toggle", egui::Align2::LEFT_CENTER, "⏵ Models")
            {
                self.prefs.left_collapsed = false;
            }
        } else {
            let response = egui::SidePanel::left("sidebar")
                .resizable(true)
                .default_width(self.prefs.left_width)
                .width_range(panel::SIDEBAR_MIN_WIDTH..=panel::SIDEBAR_MAX_WIDTH)
                .show(ctx, |ui| {
                    if let Some(entry) = self.sidebar.ui(ui) {
                        info!("model selected: {}", entry.name);
                        self.session.load_asset(entry.path);
                    }
                });
            self.prefs.left_width = response.response.rect.width();
        }

        if self.prefs.right_collapsed {
            if Self::edge_restore_button(ctx, "right_edge_toggle", egui::Align2::RIGHT_CENTER, "Tools ⏴")
            {
                self.prefs.right_collapsed = false;
            }
        } else {
            let mut action = ToolsAction::None;
            let response = egui::SidePanel::right("tools")
                .resizable(true)
                .default_width(self.prefs.right_width)
                .width_range(panel::TOOLBAR_MIN_WIDTH..=panel::TOOLBAR_MAX_WIDTH)
                .show(ctx, |ui| {
                    action = self.tools.ui(ui, &mut self.session);
                });
            self.prefs.right_width = response.response.rect.width();

            match action {
                ToolsAction::None => {}
                ToolsAction::OpenFileDialog => self.open_file_dialog(),
                ToolsAction::Screenshot => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(
                        egui::UserData::default(),
                    ));
                }
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(Color32::from_rgb(22, 27, 34)))
            .show(ctx, |ui| {
                self.viewport.ui(ui, &mut self.session);
            });

        self.persist_prefs_if_changed();
    }
}
