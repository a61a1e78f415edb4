#![allow(dead_code)]
//! Binding seam between a bone and the host playback engine.
//!
//! Playback itself lives outside this crate. A `Tween` records which bone
//! it belongs to and which playback controller feeds that bone's
//! `FrameData`; the host engine looks both up when writing poses.

use crate::ids::BoneId;

/// Opaque handle to a playback controller owned by the host animation
/// engine (small string key).
pub type AnimationHandle = String;

#[derive(Clone, Debug, Default)]
pub struct Tween {
    bone: Option<BoneId>,
    animation: Option<AnimationHandle>,
}

impl Tween {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach this tween to the bone that owns it.
    pub fn init(&mut self, bone: BoneId) {
        self.bone = Some(bone);
    }

    pub fn bone(&self) -> Option<BoneId> {
        self.bone
    }

    /// Bind to the armature's playback controller. Attaching a bone to an
    /// armature calls this immediately.
    pub fn set_animation(&mut self, animation: Option<AnimationHandle>) {
        self.animation = animation;
    }

    pub fn animation(&self) -> Option<&AnimationHandle> {
        self.animation.as_ref()
    }
}
