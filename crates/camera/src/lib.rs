//! Camera effects driven by pointer input.
//!
//! # Invariants
//! - Effects borrow the camera pose per event; they never own it.
//! - A disabled effect never mutates the camera.
//! - Camera motion is not tied to the frame rate: it only moves on pointer events.

mod follow;

pub use follow::{CameraFollowConfig, CameraFollowEffect};
