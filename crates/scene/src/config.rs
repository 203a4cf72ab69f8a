//! Scene configuration.
//!
//! Every section has defaults, so a config file only needs the keys it wants
//! to override. YAML and JSON are accepted, chosen by file extension.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use spellbook_camera::CameraFollowConfig;
use spellbook_particles::ParticleFieldConfig;
use std::path::Path;

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0:?}")]
    UnsupportedFormat(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 10.0),
            fov_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalLightSettings {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub visible: bool,
}

impl Default for GlobalLightSettings {
    fn default() -> Self {
        Self {
            position: Vec3::splat(2.0),
            color: Vec3::ONE,
            intensity: 2.0,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowSettings {
    /// Whether the effect starts subscribed to pointer events.
    pub enabled: bool,
    #[serde(flatten)]
    pub effect: CameraFollowConfig,
}

impl Default for FollowSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            effect: CameraFollowConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderCubeSettings {
    pub position: Vec3,
    pub size: f32,
    pub shader: String,
    /// Shader clock advance per frame, in seconds.
    pub time_step: f32,
}

impl Default for ShaderCubeSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(3.0, 1.0, 0.0),
            size: 1.0,
            shader: "rune_glow".into(),
            time_step: 1.0 / 60.0,
        }
    }
}

/// Full scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub viewport: ViewportSettings,
    pub camera: CameraSettings,
    pub global_light: GlobalLightSettings,
    pub follow: FollowSettings,
    pub particle_fields: Vec<ParticleFieldConfig>,
    pub shader_cube: Option<ShaderCubeSettings>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportSettings::default(),
            camera: CameraSettings::default(),
            global_light: GlobalLightSettings::default(),
            follow: FollowSettings::default(),
            particle_fields: vec![ParticleFieldConfig {
                anchor: Vec3::new(0.0, 1.0, 0.0),
                ..ParticleFieldConfig::default()
            }],
            shader_cube: Some(ShaderCubeSettings::default()),
        }
    }
}

impl SceneConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let config: Self = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&text)?,
            "json" => serde_json::from_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(ext)),
        };
        config.validate()?;
        tracing::info!(path = %path.display(), "scene config loaded");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return invalid(format!(
                "viewport must be positive, got {}x{}",
                self.viewport.width, self.viewport.height
            ));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return invalid(format!("camera fov {} out of (0, 180)", self.camera.fov_degrees));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return invalid(format!(
                "camera clip planes near={} far={} are not ordered",
                self.camera.near, self.camera.far
            ));
        }
        let smoothing = self.follow.effect.position_smoothing;
        if !(0.0..=1.0).contains(&smoothing) {
            return invalid(format!("position_smoothing {smoothing} out of [0, 1]"));
        }
        let effect = &self.follow.effect;
        if !effect.rotation_scale.is_finite() || !effect.offset_scale.is_finite() {
            return invalid("follow scales must be finite".into());
        }
        for (i, field) in self.particle_fields.iter().enumerate() {
            if !(field.radius >= 0.0 && field.radius.is_finite()) {
                return invalid(format!("particle field {i}: radius {} must be >= 0", field.radius));
            }
            if !field.angle_step.is_finite() {
                return invalid(format!("particle field {i}: angle_step must be finite"));
            }
            if field.size < 0.0 {
                return invalid(format!("particle field {i}: size {} must be >= 0", field.size));
            }
        }
        if let Some(cube) = &self.shader_cube {
            if cube.size <= 0.0 {
                return invalid(format!("shader cube size {} must be > 0", cube.size));
            }
        }
        Ok(())
    }
}
