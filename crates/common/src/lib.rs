//! Shared value types used by every spellbook crate.

mod types;

pub use types::{CameraPose, ObjectId};
