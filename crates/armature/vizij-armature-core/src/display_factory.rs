#![allow(dead_code)]
//! Per-frame refresh of a bone's active display.
//!
//! Dispatches once per frame on the active display variant: sprites get
//! the skin transform composed with the bone world transform, nested
//! armatures are stepped with the frame's dt, particle systems just ride
//! the bone transform. Backends read the resulting [`RenderNode`]s.

use crate::bone::Bone;
use crate::display::{DecorativeDisplay, DisplayData};

/// Refresh the bone's active display for this frame. `dirty` is true when
/// either the bone or the armature transform changed, letting the display
/// skip its own derived-transform work on clean frames.
pub fn update_display(bone: &mut Bone, dt: f32, dirty: bool) {
    let world = *bone.node_to_armature_transform();
    let visible = bone.node().visible && bone.display_manager().is_visible();
    let blend = bone.blend_type();

    // A hosted sub-skeleton rides the bone transform and is stepped every
    // frame regardless of dirtiness.
    if let Some(child) = bone.child_armature_mut() {
        if dirty {
            child.set_transform(world);
        }
        child.update(dt);
    }

    let Some(DecorativeDisplay { data, node }) =
        bone.display_manager_mut().current_decorative_display_mut()
    else {
        return;
    };
    let Some(node) = node.as_mut() else {
        return;
    };

    node.visible = visible;
    node.blend = blend;
    if dirty {
        node.transform = match data {
            DisplayData::Sprite {
                skin: Some(skin), ..
            } => skin.to_affine().concat(&world),
            DisplayData::Sprite { skin: None, .. }
            | DisplayData::Armature { .. }
            | DisplayData::Particle { .. } => world,
        };
    }
}
