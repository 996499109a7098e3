//! Application entry point for the particle tree viewer.
//!
//! This binary sets up logging and eframe/egui and delegates simulation
//! and rendering to [`Viewer`] from the `viewer` module.

mod error;
mod viewer;

use error::ViewError;
use scene_core::config::Config;
use viewer::Viewer;

const TITLE: &str = "Particle Christmas Tree";

/// Starts the native eframe application.
///
/// The scene is generated before the window opens, from a fresh random
/// seed that is logged so a run can be reproduced. The window has the
/// fixed size of the render canvas and closes the program on exit.
///
/// ### Returns
/// - `Ok(())` once the window is closed.
/// - `Err` if the scene cannot be built or eframe fails to create the
///   native window or event loop.
fn main() -> Result<(), ViewError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut cfg = Config::default();
    cfg.seed = rand::random();
    log::info!("scene seed {}", cfg.seed);

    let viewer = Viewer::new(cfg)?;
    let size = viewer.canvas_size();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([size.x, size.y])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(TITLE, options, Box::new(|_cc| Ok(Box::new(viewer))))?;
    log::info!("window closed");
    Ok(())
}
