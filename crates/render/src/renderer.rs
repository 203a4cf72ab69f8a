use std::fmt::Write;

use crate::camera::PerspectiveCamera;
use crate::scene_graph::{MeshMaterial, SceneGraph, SceneObject};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene graph and camera, then produces output. It
/// never mutates either.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene from the camera's point of view.
    fn render(&self, scene: &SceneGraph, camera: &PerspectiveCamera) -> Self::Output;
}

/// Debug text renderer used in place of a GPU backend.
///
/// Produces a human-readable dump of the camera and every scene object.
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneGraph, camera: &PerspectiveCamera) -> String {
        let mut out = String::new();
        let p = camera.pose.position;
        let r = camera.pose.rotation;
        let _ = writeln!(out, "=== Scene ({} objects) ===", scene.len());
        let _ = writeln!(
            out,
            "Camera: pos=({:.3}, {:.3}, {:.3}) rot=({:.3}, {:.3}, {:.3}) fov={:.0}",
            p.x, p.y, p.z, r.x, r.y, r.z, camera.fov_degrees
        );

        for (id, node) in scene.iter() {
            let pos = node.object.position();
            let _ = write!(
                out,
                "  [{}] {} {} pos=({:.2}, {:.2}, {:.2})",
                id.short(),
                node.name,
                node.object.kind(),
                pos.x,
                pos.y,
                pos.z
            );
            match &node.object {
                SceneObject::Points(pts) => {
                    let _ = write!(out, " points={} v{}", pts.point_count(), pts.version);
                }
                SceneObject::PointLight(l) => {
                    let _ = write!(out, " intensity={:.1}", l.intensity);
                }
                SceneObject::DirectionalLight(l) => {
                    let _ = write!(out, " intensity={:.1}", l.intensity);
                }
                SceneObject::Mesh(m) => match &m.material {
                    MeshMaterial::Standard { .. } => {
                        let _ = write!(out, " material=standard");
                    }
                    MeshMaterial::Shader { name, time } => {
                        let _ = write!(out, " shader={name} t={time:.2}");
                    }
                },
            }
            if !node.visible {
                out.push_str(" (hidden)");
            }
            out.push('\n');
        }

        out
    }
}
