//! Scene orchestration: builds the scene from configuration and drives the
//! per-frame and per-pointer-event callbacks.
//!
//! # Invariants
//! - Particle buffers reach the scene graph only through explicit uploads.
//! - The camera pose is written only by the follow effect, and only while it
//!   is enabled.

pub mod config;
mod scene;

pub use config::{
    CameraSettings, ConfigError, FollowSettings, GlobalLightSettings, SceneConfig,
    ShaderCubeSettings, ViewportSettings,
};
pub use scene::SpellbookScene;
