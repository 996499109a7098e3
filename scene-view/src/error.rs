use scene_core::SceneError;
use thiserror::Error;

/// Fatal errors that stop the viewer before or while opening its window.
#[derive(Error, Debug)]
pub enum ViewError {
    /// The scene could not be generated from the configuration.
    #[error("failed to build scene: {0}")]
    Scene(#[from] SceneError),

    /// The native window or its event loop could not be created.
    #[error("failed to open window: {0}")]
    Platform(#[from] eframe::Error),
}
