//! Particle field: points orbiting on a sphere, one of which carries a light.
//!
//! # Invariants
//! - `position[i] == radius * spherical_to_cartesian(angles[i])` after every update.
//! - The position buffer never changes length after construction.
//! - Updates advance angles by a fixed step per call, not per elapsed time.
//! - Randomness is only consumed at construction; updates are deterministic.

pub mod buffer;
pub mod field;
pub mod spherical;

pub use buffer::PositionBuffer;
pub use field::{
    DEFAULT_ANGLE_STEP, DEFAULT_LIGHT_ANCHOR_INDEX, ParticleField, ParticleFieldConfig,
    rgb_from_hex,
};
pub use spherical::{SphericalAngles, spherical_to_cartesian};
