//! Category sidebar: a single-open accordion over the model catalog
//!
//! All sections start collapsed; opening one closes the others. Selecting
//! an entry reports it to the app, which asks the viewer to load it.

use crate::catalog::{self, ModelCatalog, ModelEntry};
use crate::theme::Colors;
use egui::{RichText, Ui};
use log::info;
use std::path::{Path, PathBuf};

pub struct SidebarPanel {
    catalog: Result<ModelCatalog, String>,
    open_category: Option<String>,
    active_model: Option<PathBuf>,
}

impl SidebarPanel {
    /// Load the manifest; a failure is kept and rendered inline
    pub fn new(manifest_path: &Path) -> Self {
        let catalog = catalog::load_manifest(manifest_path);
        if let Err(err) = &catalog {
            info!("sidebar disabled: {}", err);
        }
        Self {
            catalog,
            open_category: None,
            active_model: None,
        }
    }

    /// Accordion rule: open sections are exclusive, a second click closes
    pub fn toggle_category(&mut self, label: &str) {
        if self.open_category.as_deref() == Some(label) {
            self.open_category = None;
        } else {
            self.open_category = Some(label.to_string());
        }
    }

    pub fn open_category(&self) -> Option<&str> {
        self.open_category.as_deref()
    }

    /// Render the accordion; returns the entry picked this frame, if any
    pub fn ui(&mut self, ui: &mut Ui) -> Option<ModelEntry> {
        let colors = Colors::default();
        ui.heading("Models");
        ui.separator();

        let catalog = match &self.catalog {
            Ok(catalog) => catalog.clone(),
            Err(err) => {
                ui.colored_label(
                    colors.status_error,
                    format!("Could not load model manifest.\n{}", err),
                );
                return None;
            }
        };

        let mut picked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for group in &catalog.categories {
                let is_open = self.open_category.as_deref() == Some(group.label.as_str());
                let marker = if is_open { "⏷" } else { "⏵" };
                let header = format!("{} {} ({})", marker, group.label, group.entries.len());
                let text = if is_open {
                    RichText::new(header).color(colors.category_open).strong()
                } else {
                    RichText::new(header)
                };
                if ui
                    .add(egui::Button::new(text).frame(false))
                    .clicked()
                {
                    self.toggle_category(&group.label);
                }

                if self.open_category.as_deref() == Some(group.label.as_str()) {
                    ui.indent(&group.label, |ui| {
                        for entry in &group.entries {
                            let active = self.active_model.as_deref() == Some(entry.path.as_path());
                            let response = ui.selectable_label(active, &entry.name);
                            let response = if entry.description.is_empty() {
                                response
                            } else {
                                response.on_hover_text(&entry.description)
                            };
                            if response.clicked() {
                                self.active_model = Some(entry.path.clone());
                                picked = Some(entry.clone());
                            }
                        }
                    });
                }
            }
        });
        picked
    }
}
