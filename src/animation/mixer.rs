use slotmap::{SlotMap, new_key_type};

use crate::animation::action::AnimationAction;

new_key_type! {
    /// Stable key of an [`AnimationAction`] inside an [`AnimationMixer`].
    pub struct ActionHandle;
}

/// Owns the playback handles of one loaded asset.
///
/// The mixer is the only place actions live. Registries and controllers keep
/// [`ActionHandle`]s and issue commands through [`AnimationMixer::action_mut`].
#[derive(Debug, Clone)]
pub struct AnimationMixer {
    actions: SlotMap<ActionHandle, AnimationAction>,
    /// Global speed multiplier applied on top of each action's own scale.
    pub time_scale: f32,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: SlotMap::with_key(),
            time_scale: 1.0,
        }
    }

    pub fn add_action(&mut self, action: AnimationAction) -> ActionHandle {
        self.actions.insert(action)
    }

    #[must_use]
    pub fn action(&self, handle: ActionHandle) -> Option<&AnimationAction> {
        self.actions.get(handle)
    }

    pub fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut AnimationAction> {
        self.actions.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Stops every scheduled action, paused ones included.
    ///
    /// Returns how many actions were stopped.
    pub fn stop_all(&mut self) -> usize {
        let mut stopped = 0;
        for (_handle, action) in &mut self.actions {
            if action.is_active() {
                action.stop();
                stopped += 1;
            }
        }
        stopped
    }

    /// Handles of every action currently advancing.
    #[must_use]
    pub fn running_handles(&self) -> Vec<ActionHandle> {
        self.actions
            .iter()
            .filter(|(_, action)| action.is_running())
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Drops every action. Outstanding handles resolve to `None` afterwards.
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Advances every running action by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let dt = dt * self.time_scale;
        for (_handle, action) in &mut self.actions {
            action.update(dt);
        }
    }
}
