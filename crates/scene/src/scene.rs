use glam::Vec3;
use spellbook_camera::CameraFollowEffect;
use spellbook_common::{CameraPose, ObjectId};
use spellbook_input::{NormalizedPointer, PointerDispatcher, SceneAction};
use spellbook_particles::ParticleField;
use spellbook_render::{
    DirectionalLight, Mesh, MeshMaterial, PerspectiveCamera, PointLight, Points, Renderer,
    SceneGraph, SceneObject,
};

use crate::config::{ConfigError, SceneConfig};

/// A particle field together with the scene objects it drives.
struct FieldBinding {
    field: ParticleField,
    points: ObjectId,
    light: ObjectId,
}

/// Owns the scene graph, camera, particle fields and camera effect, and
/// exposes the two callbacks the host loop invokes: [`SpellbookScene::frame`]
/// once per rendered frame and [`SpellbookScene::pointer_moved`] per pointer
/// event.
pub struct SpellbookScene {
    graph: SceneGraph,
    camera: PerspectiveCamera,
    viewport: (f32, f32),
    fields: Vec<FieldBinding>,
    pointer: PointerDispatcher,
    follow: CameraFollowEffect,
    global_light: ObjectId,
    shader_cube: Option<(ObjectId, f32)>,
    frame_count: u64,
}

impl SpellbookScene {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut graph = SceneGraph::new();
        let mut camera = PerspectiveCamera {
            pose: CameraPose::at(config.camera.position),
            fov_degrees: config.camera.fov_degrees,
            near: config.camera.near,
            far: config.camera.far,
            ..PerspectiveCamera::default()
        };
        camera.set_aspect(config.viewport.width, config.viewport.height);

        let light = config.global_light;
        let global_light = graph.add(
            "global_light",
            SceneObject::DirectionalLight(DirectionalLight {
                position: light.position,
                color: light.color,
                intensity: light.intensity,
            }),
        );
        graph.set_visible(global_light, light.visible);

        let shader_cube = config.shader_cube.as_ref().map(|cube| {
            let id = graph.add(
                "shader_cube",
                SceneObject::Mesh(Mesh {
                    position: cube.position,
                    scale: Vec3::splat(cube.size),
                    material: MeshMaterial::Shader {
                        name: cube.shader.clone(),
                        time: 0.0,
                    },
                }),
            );
            (id, cube.time_step)
        });

        let mut fields = Vec::with_capacity(config.particle_fields.len());
        for (i, field_config) in config.particle_fields.iter().enumerate() {
            let mut field = ParticleField::from_config(field_config);

            let mut points = Points::new(field.anchor(), field_config.size);
            points.colors = field.colors().to_vec();
            points.upload(field.positions().as_bytes());
            field.mark_uploaded();
            let points = graph.add(format!("particles_{i}"), SceneObject::Points(points));

            let light = graph.add(
                format!("particles_{i}_light"),
                SceneObject::PointLight(PointLight {
                    position: field.light_position().unwrap_or(field.anchor()),
                    color: field_config.secondary_color,
                    intensity: field_config.light_intensity,
                }),
            );
            graph.set_visible(light, field.light_position().is_some());

            fields.push(FieldBinding {
                field,
                points,
                light,
            });
        }

        let mut pointer = PointerDispatcher::new();
        let mut follow = CameraFollowEffect::new(&camera.pose, config.follow.effect, &mut pointer);
        if config.follow.enabled {
            follow.enable(&mut pointer);
        }

        tracing::info!(
            objects = graph.len(),
            fields = fields.len(),
            follow = follow.is_enabled(),
            "scene initialized"
        );

        Ok(Self {
            graph,
            camera,
            viewport: (config.viewport.width, config.viewport.height),
            fields,
            pointer,
            follow,
            global_light,
            shader_cube,
            frame_count: 0,
        })
    }

    /// Per-frame callback: animate particles, push changed buffers into the
    /// scene graph, move each field's light, advance the cube's shader clock.
    pub fn frame(&mut self) {
        let _span = tracing::debug_span!("frame", n = self.frame_count).entered();

        for binding in &mut self.fields {
            binding.field.update();

            if binding.field.positions().needs_upload() {
                if let Some(points) = self.graph.points_mut(binding.points) {
                    points.upload(binding.field.positions().as_bytes());
                }
                binding.field.mark_uploaded();
            }

            if let Some(position) = binding.field.light_position() {
                self.graph.set_position(binding.light, position);
            }
        }

        if let Some((id, step)) = self.shader_cube {
            if let Some(Mesh {
                material: MeshMaterial::Shader { time, .. },
                ..
            }) = self.graph.mesh_mut(id)
            {
                *time += step;
            }
        }

        self.frame_count += 1;
    }

    /// Pointer-move callback in window pixels. Returns whether the camera
    /// effect received the event.
    pub fn pointer_moved(&mut self, px: f32, py: f32) -> bool {
        let (w, h) = self.viewport;
        match NormalizedPointer::from_screen(px, py, w, h) {
            Some(pointer) => self.pointer_moved_normalized(pointer),
            None => false,
        }
    }

    pub fn pointer_moved_normalized(&mut self, pointer: NormalizedPointer) -> bool {
        self.pointer.dispatch(pointer, &mut self.follow, &mut self.camera.pose)
    }

    /// Track the viewport extents used to normalize pointer coordinates.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = (width, height);
            self.camera.set_aspect(width, height);
        }
    }

    pub fn apply(&mut self, action: SceneAction) {
        match action {
            SceneAction::ToggleGlobalLight => {
                let visible = !self.global_light_visible();
                self.set_global_light(visible);
            }
            SceneAction::SetGlobalLight(visible) => self.set_global_light(visible),
            SceneAction::SetCameraFollow(true) => {
                if self.follow.enable(&mut self.pointer) {
                    tracing::info!("camera follow enabled");
                }
            }
            SceneAction::SetCameraFollow(false) => {
                if self.follow.disable(&mut self.pointer) {
                    tracing::info!("camera follow disabled");
                }
            }
            SceneAction::Noop => {}
        }
    }

    fn set_global_light(&mut self, visible: bool) {
        self.graph.set_visible(self.global_light, visible);
        tracing::info!(visible, "global light");
    }

    pub fn render<R: Renderer>(&self, renderer: &R) -> R::Output {
        renderer.render(&self.graph, &self.camera)
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn fields(&self) -> impl Iterator<Item = &ParticleField> + '_ {
        self.fields.iter().map(|b| &b.field)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn global_light_visible(&self) -> bool {
        self.graph.is_visible(self.global_light).unwrap_or(false)
    }

    pub fn follow_enabled(&self) -> bool {
        self.follow.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spellbook_particles::ParticleFieldConfig;
    use spellbook_render::DebugTextRenderer;

    fn config() -> SceneConfig {
        SceneConfig {
            particle_fields: vec![ParticleFieldConfig {
                count: 24,
                radius: 1.5,
                anchor: Vec3::new(0.0, 1.0, 0.0),
                seed: Some(17),
                ..ParticleFieldConfig::default()
            }],
            ..SceneConfig::default()
        }
    }

    #[test]
    fn builds_objects_from_config() {
        let scene = SpellbookScene::new(config()).unwrap();
        // global light, cube, points, point light
        assert_eq!(scene.graph().len(), 4);
        assert!(scene.graph().find("particles_0").is_some());
        assert!(scene.global_light_visible());
        assert!(scene.follow_enabled());
        assert_eq!(scene.camera().aspect, 1280.0 / 720.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = config();
        cfg.follow.effect.position_smoothing = -0.1;
        assert!(SpellbookScene::new(cfg).is_err());
    }

    #[test]
    fn frame_uploads_positions_and_moves_light() {
        let mut scene = SpellbookScene::new(config()).unwrap();
        let points_id = scene.graph().find("particles_0").unwrap();
        let light_id = scene.graph().find("particles_0_light").unwrap();
        let version = scene.graph().points(points_id).unwrap().version;

        scene.frame();

        let field = scene.fields().next().unwrap();
        let points = scene.graph().points(points_id).unwrap();
        assert_eq!(points.version, version + 1);
        assert_eq!(points.positions, field.positions().as_slice());
        assert!(!field.positions().needs_upload());

        let light = scene.graph().get(light_id).unwrap().object.position();
        assert_eq!(Some(light), field.light_position());
        assert_eq!(scene.frame_count(), 1);
    }

    #[test]
    fn frame_advances_shader_clock() {
        let mut scene = SpellbookScene::new(config()).unwrap();
        for _ in 0..3 {
            scene.frame();
        }
        let output = scene.render(&DebugTextRenderer::new());
        assert!(output.contains("shader=rune_glow t=0.05"));
    }

    #[test]
    fn empty_field_hides_its_light_and_survives_frames() {
        let mut cfg = config();
        cfg.particle_fields[0].count = 0;
        let mut scene = SpellbookScene::new(cfg).unwrap();
        scene.frame();
        scene.frame();

        let light_id = scene.graph().find("particles_0_light").unwrap();
        assert_eq!(scene.graph().is_visible(light_id), Some(false));
        assert_eq!(scene.fields().next().unwrap().count(), 0);
    }

    #[test]
    fn pointer_moves_camera_while_following() {
        let mut scene = SpellbookScene::new(config()).unwrap();
        // Bottom-right corner of a 1280x720 viewport.
        assert!(scene.pointer_moved(1280.0, 720.0));

        let pose = scene.camera().pose;
        assert_eq!(pose.rotation.x, 0.1);
        assert_eq!(pose.rotation.y, 0.1);
        assert!(pose.position.x > 0.0);
        assert!(pose.position.y < 2.0);
    }

    #[test]
    fn disabling_follow_freezes_camera() {
        let mut scene = SpellbookScene::new(config()).unwrap();
        scene.apply(SceneAction::SetCameraFollow(false));
        let before = scene.camera().pose;

        assert!(!scene.pointer_moved(100.0, 100.0));
        assert_eq!(scene.camera().pose, before);

        scene.apply(SceneAction::SetCameraFollow(true));
        assert!(scene.pointer_moved(100.0, 100.0));
        assert_ne!(scene.camera().pose, before);
    }

    #[test]
    fn toggling_global_light() {
        let mut scene = SpellbookScene::new(config()).unwrap();
        scene.apply(SceneAction::ToggleGlobalLight);
        assert!(!scene.global_light_visible());
        scene.apply(SceneAction::ToggleGlobalLight);
        assert!(scene.global_light_visible());
        scene.apply(SceneAction::SetGlobalLight(false));
        assert!(!scene.global_light_visible());
        scene.apply(SceneAction::Noop);
        assert!(!scene.global_light_visible());
    }

    #[test]
    fn viewport_changes_pointer_normalization() {
        let mut scene = SpellbookScene::new(config()).unwrap();
        scene.set_viewport(200.0, 100.0);
        scene.pointer_moved(100.0, 50.0);
        let pose = scene.camera().pose;
        assert_eq!(pose.rotation.x, 0.0);
        assert_eq!(pose.rotation.y, 0.0);
        assert_eq!(scene.camera().aspect, 2.0);
    }
}
