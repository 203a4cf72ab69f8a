/// A mode switch the orchestrator can apply to the running scene.
///
/// Debug controls and keyboard shortcuts produce actions; the scene never
/// reacts to raw UI events directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneAction {
    /// Flip the global directional light on or off.
    ToggleGlobalLight,
    /// Show or hide the global directional light.
    SetGlobalLight(bool),
    /// Enable or disable the pointer-driven camera follow effect.
    SetCameraFollow(bool),
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

impl SceneAction {
    /// Map a single-character shortcut to an action.
    pub fn from_shortcut(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'l' => Self::ToggleGlobalLight,
            'f' => Self::SetCameraFollow(true),
            'o' => Self::SetCameraFollow(false),
            _ => Self::Noop,
        }
    }
}
