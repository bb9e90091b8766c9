use crate::animation::controller::PlaybackController;
use crate::animation::mixer::AnimationMixer;

/// Animation system.
///
/// The per-frame hook of the render loop. It does not schedule anything
/// itself; whatever drives frames calls [`AnimationSystem::update`] once per
/// tick with the elapsed time.
pub struct AnimationSystem;

impl AnimationSystem {
    /// Advances the running clip and reconciles the controller with it.
    ///
    /// # Arguments
    /// * `mixer` - Owner of the clip handles
    /// * `controller` - Transport state to keep in sync
    /// * `dt` - Delta time since the previous frame (in seconds)
    #[inline]
    pub fn update(mixer: &mut AnimationMixer, controller: &mut PlaybackController, dt: f32) {
        if dt <= 0.0 || !dt.is_finite() {
            controller.reconcile(mixer);
            return;
        }
        mixer.update(dt);
        controller.reconcile(mixer);
    }
}
