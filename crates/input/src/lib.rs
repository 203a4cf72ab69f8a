//! Pointer input and mode switches for the scene.
//!
//! # Invariants
//! - Components never read global pointer state; they are handed
//!   normalized coordinates by an injected [`PointerEventSource`].
//! - Delivery is synchronous. There is no queueing or coalescing.

pub mod action;
pub mod dispatch;
pub mod pointer;

pub use action::SceneAction;
pub use dispatch::{ListenerId, PointerDispatcher, PointerEventSource, PointerListener};
pub use pointer::NormalizedPointer;
