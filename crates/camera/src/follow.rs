use serde::{Deserialize, Serialize};
use spellbook_common::CameraPose;
use spellbook_input::{ListenerId, NormalizedPointer, PointerEventSource, PointerListener};

/// Tuning for [`CameraFollowEffect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraFollowConfig {
    /// Fraction of the remaining distance to the target covered per event, in `[0, 1]`.
    pub position_smoothing: f32,
    /// Rotation in radians at full pointer deflection, per axis.
    pub rotation_scale: f32,
    /// Target offset in world units at full pointer deflection.
    pub offset_scale: f32,
}

impl Default for CameraFollowConfig {
    fn default() -> Self {
        Self {
            position_smoothing: 0.05,
            rotation_scale: 0.1,
            offset_scale: 0.5,
        }
    }
}

/// Parallax effect: the camera drifts toward a pointer-derived target and
/// tilts with the pointer.
///
/// Position uses a one-step exponential filter, `p += (target - p) * smoothing`,
/// applied once per pointer event. Rotation is not smoothed: it is set
/// directly from the pointer offset. The target's height is relative to the
/// camera height captured at construction.
///
/// Not `Clone`: the listener id is the effect's identity on its event source.
#[derive(Debug)]
pub struct CameraFollowEffect {
    id: ListenerId,
    base_height: f32,
    config: CameraFollowConfig,
    enabled: bool,
}

impl CameraFollowEffect {
    /// Create a disabled effect for `camera`, reserving a listener slot on `source`.
    pub fn new(
        camera: &CameraPose,
        config: CameraFollowConfig,
        source: &mut impl PointerEventSource,
    ) -> Self {
        Self {
            id: source.allocate_listener(),
            base_height: camera.position.y,
            config,
            enabled: false,
        }
    }

    /// Start receiving pointer events. Returns `false` if already enabled.
    pub fn enable(&mut self, source: &mut impl PointerEventSource) -> bool {
        if self.enabled {
            return false;
        }
        source.subscribe(self.id);
        self.enabled = true;
        tracing::debug!(listener = self.id.0, "camera follow enabled");
        true
    }

    /// Stop receiving pointer events. Returns `false` if already disabled.
    pub fn disable(&mut self, source: &mut impl PointerEventSource) -> bool {
        if !self.enabled {
            return false;
        }
        source.unsubscribe(self.id);
        self.enabled = false;
        tracing::debug!(listener = self.id.0, "camera follow disabled");
        true
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn base_height(&self) -> f32 {
        self.base_height
    }

    pub fn config(&self) -> &CameraFollowConfig {
        &self.config
    }

    fn follow(&self, camera: &mut CameraPose, pointer: NormalizedPointer) {
        let k = self.config.position_smoothing;
        let target_x = pointer.x * self.config.offset_scale;
        let target_y = pointer.y * self.config.offset_scale + self.base_height;

        camera.position.x += (target_x - camera.position.x) * k;
        camera.position.y += (target_y - camera.position.y) * k;

        camera.rotation.x = -pointer.y * self.config.rotation_scale;
        camera.rotation.y = pointer.x * self.config.rotation_scale;
    }
}

impl PointerListener for CameraFollowEffect {
    type Target = CameraPose;

    fn listener_id(&self) -> ListenerId {
        self.id
    }

    fn on_pointer_move(&mut self, camera: &mut CameraPose, pointer: NormalizedPointer) {
        if self.enabled {
            self.follow(camera, pointer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use spellbook_input::PointerDispatcher;

    fn effect_with(
        camera: &CameraPose,
        position_smoothing: f32,
        rotation_scale: f32,
        dispatcher: &mut PointerDispatcher,
    ) -> CameraFollowEffect {
        let mut effect = CameraFollowEffect::new(
            camera,
            CameraFollowConfig {
                position_smoothing,
                rotation_scale,
                ..CameraFollowConfig::default()
            },
            dispatcher,
        );
        effect.enable(dispatcher);
        effect
    }

    #[test]
    fn centre_pointer_leaves_resting_camera_in_place() {
        let mut dispatcher = PointerDispatcher::new();
        let mut camera = CameraPose::at(Vec3::new(0.0, 2.0, 0.0));
        let mut effect = effect_with(&camera, 0.3, 0.1, &mut dispatcher);

        dispatcher.dispatch(NormalizedPointer::CENTER, &mut effect, &mut camera);

        assert_eq!(camera.position, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(camera.rotation.x, 0.0);
        assert_eq!(camera.rotation.y, 0.0);
    }

    #[test]
    fn corner_pointer_sets_rotation_directly() {
        let mut dispatcher = PointerDispatcher::new();
        let mut camera = CameraPose::at(Vec3::new(0.0, 2.0, 10.0));
        let mut effect = effect_with(&camera, 0.05, 0.1, &mut dispatcher);

        dispatcher.dispatch(NormalizedPointer::new(1.0, -1.0), &mut effect, &mut camera);

        assert_eq!(camera.rotation.x, 0.1);
        assert_eq!(camera.rotation.y, 0.1);
        assert_eq!(camera.rotation.z, 0.0);
    }

    #[test]
    fn full_smoothing_jumps_to_target() {
        let mut dispatcher = PointerDispatcher::new();
        let mut camera = CameraPose::at(Vec3::new(3.0, 7.0, 10.0));
        let mut effect = effect_with(&camera, 1.0, 0.1, &mut dispatcher);

        dispatcher.dispatch(NormalizedPointer::new(0.5, 1.0), &mut effect, &mut camera);

        assert_eq!(camera.position.x, 0.25);
        assert_eq!(camera.position.y, 0.5 + 7.0);
        assert_eq!(camera.position.z, 10.0);
    }

    #[test]
    fn zero_smoothing_never_moves_position() {
        let mut dispatcher = PointerDispatcher::new();
        let start = Vec3::new(-1.0, 2.0, 10.0);
        let mut camera = CameraPose::at(start);
        let mut effect = effect_with(&camera, 0.0, 0.2, &mut dispatcher);

        for p in [(1.0, 1.0), (-1.0, -1.0), (0.3, -0.7)] {
            dispatcher.dispatch(NormalizedPointer::new(p.0, p.1), &mut effect, &mut camera);
        }

        assert_eq!(camera.position, start);
        assert_eq!(camera.rotation.y, 0.3 * 0.2);
    }

    #[test]
    fn smoothing_converges_exponentially() {
        let mut dispatcher = PointerDispatcher::new();
        let mut camera = CameraPose::at(Vec3::new(0.0, 2.0, 10.0));
        let mut effect = effect_with(&camera, 0.5, 0.1, &mut dispatcher);
        let pointer = NormalizedPointer::new(1.0, 0.0);

        dispatcher.dispatch(pointer, &mut effect, &mut camera);
        assert_eq!(camera.position.x, 0.25);
        dispatcher.dispatch(pointer, &mut effect, &mut camera);
        assert_eq!(camera.position.x, 0.375);

        for _ in 0..60 {
            dispatcher.dispatch(pointer, &mut effect, &mut camera);
        }
        assert!((camera.position.x - 0.5).abs() < 1e-6);
        assert_eq!(camera.position.y, 2.0);
    }

    #[test]
    fn disabled_effect_does_not_touch_camera() {
        let mut dispatcher = PointerDispatcher::new();
        let start = CameraPose::at(Vec3::new(0.0, 2.0, 10.0));
        let mut camera = start;
        let mut effect = effect_with(&camera, 1.0, 0.1, &mut dispatcher);

        assert!(effect.disable(&mut dispatcher));
        let delivered =
            dispatcher.dispatch(NormalizedPointer::new(1.0, 1.0), &mut effect, &mut camera);
        assert!(!delivered);
        assert_eq!(camera, start);

        // Calling the listener directly while disabled is also a no-op.
        effect.on_pointer_move(&mut camera, NormalizedPointer::new(1.0, 1.0));
        assert_eq!(camera, start);
    }

    #[test]
    fn re_enable_resumes_on_next_event() {
        let mut dispatcher = PointerDispatcher::new();
        let mut camera = CameraPose::at(Vec3::new(0.0, 2.0, 10.0));
        let mut effect = effect_with(&camera, 1.0, 0.1, &mut dispatcher);

        effect.disable(&mut dispatcher);
        dispatcher.dispatch(NormalizedPointer::new(1.0, 0.0), &mut effect, &mut camera);
        assert_eq!(camera.position.x, 0.0);

        assert!(effect.enable(&mut dispatcher));
        dispatcher.dispatch(NormalizedPointer::new(1.0, 0.0), &mut effect, &mut camera);
        assert_eq!(camera.position.x, 0.5);
    }

    #[test]
    fn enable_and_disable_are_idempotent() {
        let mut dispatcher = PointerDispatcher::new();
        let camera = CameraPose::at(Vec3::new(0.0, 2.0, 10.0));
        let mut effect =
            CameraFollowEffect::new(&camera, CameraFollowConfig::default(), &mut dispatcher);
        assert!(!effect.is_enabled());

        assert!(effect.enable(&mut dispatcher));
        assert!(!effect.enable(&mut dispatcher));
        assert_eq!(dispatcher.subscriber_count(), 1);

        assert!(effect.disable(&mut dispatcher));
        assert!(!effect.disable(&mut dispatcher));
        assert_eq!(dispatcher.subscriber_count(), 0);
    }

    #[test]
    fn effects_on_one_source_have_independent_subscriptions() {
        let mut dispatcher = PointerDispatcher::new();
        let mut camera = CameraPose::at(Vec3::new(0.0, 2.0, 10.0));
        let mut first = effect_with(&camera, 1.0, 0.1, &mut dispatcher);
        let mut second = effect_with(&camera, 1.0, 0.1, &mut dispatcher);
        assert_ne!(first.listener_id(), second.listener_id());
        assert_eq!(dispatcher.subscriber_count(), 2);

        assert!(second.disable(&mut dispatcher));
        assert!(dispatcher.is_subscribed(first.listener_id()));
        assert!(dispatcher.dispatch(NormalizedPointer::new(1.0, 0.0), &mut first, &mut camera));
        assert!(!dispatcher.dispatch(NormalizedPointer::new(1.0, 0.0), &mut second, &mut camera));

        assert!(first.disable(&mut dispatcher));
        assert!(first.enable(&mut dispatcher));
        assert!(dispatcher.is_subscribed(first.listener_id()));
    }

    #[test]
    fn base_height_is_captured_at_construction() {
        let mut dispatcher = PointerDispatcher::new();
        let mut camera = CameraPose::at(Vec3::new(0.0, 4.0, 10.0));
        let mut effect = effect_with(&camera, 1.0, 0.1, &mut dispatcher);

        camera.position.y = 100.0;
        dispatcher.dispatch(NormalizedPointer::CENTER, &mut effect, &mut camera);
        assert_eq!(effect.base_height(), 4.0);
        assert_eq!(camera.position.y, 4.0);
    }
}
