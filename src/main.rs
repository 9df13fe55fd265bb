//! Maquette - categorized glTF model viewer
//!
//! Usage: `maquette [manifest]` where `manifest` defaults to
//! `data/models.json`. Model paths inside the manifest resolve against
//! the manifest's own directory.

use eframe::egui;
use maquette::app::ViewerApp;
use std::path::PathBuf;

const HELP: &str = "\
maquette - categorized glTF model viewer

USAGE:
  maquette [manifest]

ARGS:
  <manifest>  Path to the model manifest JSON [default: data/models.json]
";

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(());
    }
    let manifest: PathBuf = args
        .opt_free_from_str()
        .ok()
        .flatten()
        .unwrap_or_else(|| PathBuf::from("data/models.json"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Maquette"),
        renderer: eframe::Renderer::Wgpu,
        depth_buffer: 32,
        ..Default::default()
    };

    eframe::run_native(
        "Maquette",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, &manifest)))),
    )
}
