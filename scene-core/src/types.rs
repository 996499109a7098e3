/// Identifier for a particle in a [`crate::scene::SceneState`].
///
/// This is an index into `SceneState::particles`. The population never
/// grows or shrinks after generation, so an id stays valid for the whole
/// lifetime of the scene.
pub type ParticleId = usize;
