//! Core 3-D particle tree scene: generation, simulation, projection and
//! software compositing.
//!
//! Main components:
//! - [`particle`] — particles and their category-specific payload.
//! - [`builder`] — procedural generation of tree, star cluster and snow.
//! - [`simulator`] — per-frame rotation, snow fall and frame time.
//! - [`projector`] — perspective projection of particles to screen space.
//! - [`compositor`] — painter's-algorithm ordering and per-category drawing.
//! - [`glow`] — additive halo rendering around bright particles.
//! - [`surface`] — the render target trait and an RGBA software surface.
//! - [`clock`] — fixed-rate frame pacing.
//! - [`config`] — scene, motion and view configuration.
//! - [`scene`] — the mutable scene state shared by the stages above.
//! - [`color`] — color types and the scene palette.
//! - [`error`] — error type for configuration and construction failures.
//! - [`types`] — shared type aliases and IDs.

pub mod builder;
pub mod clock;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod glow;
pub mod particle;
pub mod projector;
pub mod scene;
pub mod simulator;
pub mod surface;
pub mod types;

pub use error::{Result, SceneError};
