use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::buffer::PositionBuffer;
use crate::spherical::{SphericalAngles, spherical_to_cartesian};

/// Angle increment applied per [`ParticleField::update`] call.
///
/// This is per frame, not per second: animation speed follows the frame rate.
pub const DEFAULT_ANGLE_STEP: f64 = 0.01;

/// Index of the particle whose position drives the field's point light.
pub const DEFAULT_LIGHT_ANCHOR_INDEX: usize = 0;

/// Construction parameters for a [`ParticleField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleFieldConfig {
    pub count: usize,
    pub radius: f32,
    /// World-space centre of the sphere.
    pub anchor: Vec3,
    pub angle_step: f64,
    pub light_anchor_index: usize,
    /// Point sprite size in world units.
    pub size: f32,
    /// Linear RGB for ordinary particles.
    pub color: Vec3,
    /// Linear RGB for the light anchor particle and its light.
    pub secondary_color: Vec3,
    pub light_intensity: f32,
    /// Fixed seed for reproducible layouts. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: 60,
            radius: 1.0,
            anchor: Vec3::ZERO,
            angle_step: DEFAULT_ANGLE_STEP,
            light_anchor_index: DEFAULT_LIGHT_ANCHOR_INDEX,
            size: 0.15,
            color: rgb_from_hex(0xffd27f),
            secondary_color: rgb_from_hex(0x290050),
            light_intensity: 20.0,
            seed: None,
        }
    }
}

/// Convert a `0xRRGGBB` colour to a `[0, 1]` RGB vector.
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// A fixed number of particles orbiting on a sphere of fixed radius.
///
/// Every update advances each particle's angle pair by the same step and
/// rewrites its position in place. The particle at `light_anchor_index`
/// carries a point light whose world position is tracked as
/// `anchor + position[light_anchor_index]`.
#[derive(Debug, Clone)]
pub struct ParticleField {
    radius: f32,
    anchor: Vec3,
    angle_step: f64,
    light_anchor_index: usize,
    angles: Vec<SphericalAngles>,
    positions: PositionBuffer,
    colors: Vec<f32>,
    light_position: Option<Vec3>,
}

impl ParticleField {
    /// Scatter `count` particles uniformly over a sphere of `radius` around
    /// `anchor`, with default step, colours and light anchor.
    pub fn initialize(count: usize, radius: f32, anchor: Vec3) -> Self {
        Self::from_config(&ParticleFieldConfig {
            count,
            radius,
            anchor,
            ..ParticleFieldConfig::default()
        })
    }

    pub fn from_config(config: &ParticleFieldConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let angles = (0..config.count)
            .map(|_| SphericalAngles::sample_uniform(&mut rng))
            .collect();
        Self::from_angles(config, angles)
    }

    /// Build a field from explicit starting angles. `config.count` and
    /// `config.seed` are ignored; the field has one particle per angle pair.
    pub fn from_angles(config: &ParticleFieldConfig, angles: Vec<SphericalAngles>) -> Self {
        let mut positions = PositionBuffer::zeroed(angles.len());
        for (i, a) in angles.iter().enumerate() {
            positions.set(i, spherical_to_cartesian(config.radius, *a));
        }

        let mut colors = Vec::with_capacity(angles.len() * 3);
        for i in 0..angles.len() {
            let c = if i == config.light_anchor_index {
                config.secondary_color
            } else {
                config.color
            };
            colors.extend_from_slice(&c.to_array());
        }

        let mut field = Self {
            radius: config.radius,
            anchor: config.anchor,
            angle_step: config.angle_step,
            light_anchor_index: config.light_anchor_index,
            angles,
            positions,
            colors,
            light_position: None,
        };
        field.sync_light();

        tracing::debug!(
            count = field.count(),
            radius = field.radius,
            anchor = ?field.anchor,
            "particle field initialized"
        );
        field
    }

    /// Advance one frame by the configured angle step.
    pub fn update(&mut self) {
        self.update_by(self.angle_step);
    }

    /// Advance one frame by an explicit angle step.
    ///
    /// The buffer is rewritten in place and flagged for upload. With zero
    /// particles nothing is written and the light stays untracked.
    pub fn update_by(&mut self, step: f64) {
        for (i, angles) in self.angles.iter_mut().enumerate() {
            angles.advance(step);
            self.positions.set(i, spherical_to_cartesian(self.radius, *angles));
        }
        self.sync_light();
    }

    fn sync_light(&mut self) {
        self.light_position = self
            .positions
            .get(self.light_anchor_index)
            .map(|p| self.anchor + p);
    }

    pub fn count(&self) -> usize {
        self.angles.len()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    pub fn light_anchor_index(&self) -> usize {
        self.light_anchor_index
    }

    pub fn angles(&self) -> &[SphericalAngles] {
        &self.angles
    }

    pub fn positions(&self) -> &PositionBuffer {
        &self.positions
    }

    /// Acknowledge that the current positions have been uploaded.
    pub fn mark_uploaded(&mut self) {
        self.positions.mark_uploaded();
    }

    /// Flat per-particle RGB, index-aligned with the position buffer.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// World-space position of the light anchor particle, or `None` when the
    /// field has no particle at that index.
    pub fn light_position(&self) -> Option<Vec3> {
        self.light_position
    }

    /// World-space position of particle `index`.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).map(|p| self.anchor + p)
    }
}
