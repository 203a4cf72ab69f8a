//! Rendering capability: a retained scene graph plus a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers only read the scene graph and camera.
//! - Point buffers are copied in on explicit upload; the graph never reaches
//!   back into the components that produced them.
//!
//! # Workaround
//! Ships a debug text renderer in place of a GPU backend. The trait is stable;
//! a GPU implementation can be swapped in without changing consumers.

mod camera;
mod renderer;
mod scene_graph;

pub use camera::PerspectiveCamera;
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene_graph::{
    DirectionalLight, Mesh, MeshMaterial, PointLight, Points, SceneGraph, SceneNode, SceneObject,
};

pub fn crate_info() -> &'static str {
    "spellbook-render v0.1.0"
}
