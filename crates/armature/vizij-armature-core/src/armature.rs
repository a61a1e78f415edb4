#![allow(dead_code)]
//! Armature: owns the bone arena and drives the per-frame update.
//!
//! Bones live in an arena keyed by [`BoneId`]; parent/child links are id
//! pairs, so detaching a subtree never destroys it. The update walk is an
//! explicit depth-first pre-order over the root list, which is what makes
//! the dirty-flag handshake between parent and child sound: a child reads
//! its parent's not-yet-cleared flag, and a bone clears its own flag only
//! after its children ran.

use hashbrown::HashMap;
use log::warn;

use crate::bone::Bone;
use crate::data::ArmatureData;
use crate::display_factory;
use crate::ids::{BoneId, IdAllocator};
use crate::transform::AffineTransform;
use crate::tween::AnimationHandle;

#[derive(Debug)]
pub struct Armature {
    name: String,
    armature_data: ArmatureData,
    bones: Vec<(BoneId, Bone)>,
    /// Bone names are not guaranteed unique; the index is last-wins.
    name_index: HashMap<String, BoneId>,
    /// Top-level bones, in update order.
    roots: Vec<BoneId>,
    ids: IdAllocator,
    animation: Option<AnimationHandle>,
    /// Armature node-to-parent transform; scene placement is owned by the
    /// host (or by the bone hosting this armature as a sub-skeleton).
    transform: AffineTransform,
    armature_transform_dirty: bool,
}

impl Armature {
    pub fn new(armature_data: ArmatureData) -> Self {
        Self {
            name: armature_data.name.clone(),
            armature_data,
            bones: Vec::new(),
            name_index: HashMap::new(),
            roots: Vec::new(),
            ids: IdAllocator::new(),
            animation: None,
            transform: AffineTransform::IDENTITY,
            armature_transform_dirty: false,
        }
    }

    /// Instantiate every bone of the armature definition and wire parents
    /// by name. Bones without a parent stay top-level.
    pub fn build_from_data(&mut self) {
        let bone_datas = self.armature_data.bone_data.clone();
        for data in &bone_datas {
            let id = self.create_bone(&data.name);
            if let Some(bone) = self.bone_mut(id) {
                bone.set_bone_data(Some(data.clone()));
            }
        }
        for data in &bone_datas {
            let Some(parent_name) = &data.parent_name else {
                continue;
            };
            let child = self.bone_id_by_name(&data.name);
            let parent = self.bone_id_by_name(parent_name);
            match (parent, child) {
                (Some(parent), Some(child)) => self.add_child_bone(parent, child),
                _ => warn!(
                    "armature '{}': bone '{}' references unknown parent '{}'",
                    self.name, data.name, parent_name
                ),
            }
        }
    }

    /// Allocate a new bone. It starts as a top-level bone with its tween
    /// bound to this armature's playback controller.
    pub fn create_bone(&mut self, name: &str) -> BoneId {
        let id = self.ids.alloc_bone();
        let mut bone = Bone::new(id, name);
        bone.tween_mut().set_animation(self.animation.clone());
        self.name_index.insert(name.to_string(), id);
        self.roots.push(id);
        self.bones.push((id, bone));
        id
    }

    // ---- lookups -------------------------------------------------------

    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones
            .iter()
            .find_map(|(b, bone)| if *b == id { Some(bone) } else { None })
    }

    pub fn bone_mut(&mut self, id: BoneId) -> Option<&mut Bone> {
        self.bones
            .iter_mut()
            .find_map(|(b, bone)| if *b == id { Some(bone) } else { None })
    }

    pub fn bone_id_by_name(&self, name: &str) -> Option<BoneId> {
        self.name_index.get(name).copied()
    }

    pub fn bone_by_name(&self, name: &str) -> Option<&Bone> {
        self.bone_id_by_name(name).and_then(|id| self.bone(id))
    }

    pub fn bones(&self) -> impl Iterator<Item = &Bone> {
        self.bones.iter().map(|(_, bone)| bone)
    }

    pub fn roots(&self) -> &[BoneId] {
        &self.roots
    }

    // ---- tree mutation -------------------------------------------------

    /// Attach `child` under `parent`. Rejected with a diagnostic if either
    /// id is unknown, the child already has a parent, or the attachment
    /// would be a self-loop; a rejected call leaves both bones untouched.
    pub fn add_child_bone(&mut self, parent: BoneId, child: BoneId) {
        if self.bone(parent).is_none() || self.bone(child).is_none() {
            warn!("add_child_bone: unknown bone id");
            return;
        }
        if parent == child {
            warn!("add_child_bone: a bone cannot be its own child");
            return;
        }
        if self.bone(child).and_then(|b| b.parent()).is_some() {
            warn!("add_child_bone: child already added, it can't be added again");
            return;
        }
        let already_present = self
            .bone(parent)
            .is_some_and(|b| b.children().contains(&child));
        if already_present {
            return;
        }
        if let Some(parent_bone) = self.bone_mut(parent) {
            parent_bone.children_mut().push(child);
        }
        if let Some(child_bone) = self.bone_mut(child) {
            child_bone.set_parent(Some(parent));
        }
        self.roots.retain(|&r| r != child);
    }

    /// Detach `child` from `parent`: clear its parent link and active
    /// display, remove it from the children list. With `recursive`, first
    /// detach all of the child's own descendants the same way. Detached
    /// bones stay in the arena but are no longer updated.
    pub fn remove_child_bone(&mut self, parent: BoneId, child: BoneId, recursive: bool) {
        let is_child = self
            .bone(parent)
            .is_some_and(|b| b.children().contains(&child));
        if !is_child {
            warn!("remove_child_bone: bone is not a child of the given parent");
            return;
        }
        if recursive {
            let grandchildren = self
                .bone(child)
                .map(|b| b.children().to_vec())
                .unwrap_or_default();
            for grandchild in grandchildren {
                self.remove_child_bone(child, grandchild, true);
            }
        }
        if let Some(bone) = self.bone_mut(child) {
            bone.set_parent(None);
            bone.display_manager_mut().set_current_decorative_display(None);
        }
        if let Some(bone) = self.bone_mut(parent) {
            bone.children_mut().retain(|&c| c != child);
        }
    }

    /// Detach a bone from its parent; no-op for a top-level bone.
    pub fn remove_from_parent(&mut self, bone: BoneId, recursive: bool) {
        if let Some(parent) = self.bone(bone).and_then(|b| b.parent()) {
            self.remove_child_bone(parent, bone, recursive);
        }
    }

    /// Remove a bone from the armature entirely. Without `recursive` its
    /// children are left in the arena as detached bones; with it the whole
    /// subtree is freed.
    pub fn remove_bone(&mut self, bone: BoneId, recursive: bool) {
        if self.bone(bone).is_none() {
            warn!("remove_bone: unknown bone id");
            return;
        }
        let children = self
            .bone(bone)
            .map(|b| b.children().to_vec())
            .unwrap_or_default();
        if recursive {
            for child in children {
                self.remove_child_bone(bone, child, false);
                self.remove_bone(child, true);
            }
        } else {
            for child in children {
                self.remove_child_bone(bone, child, false);
            }
        }
        self.remove_from_parent(bone, false);
        self.roots.retain(|&r| r != bone);
        self.name_index.retain(|_, &mut id| id != bone);
        self.bones.retain(|(id, _)| *id != bone);
    }

    /// Re-home a bone under the bone named `parent_name`, or make it
    /// top-level when no name is given. Unlike removal this keeps the
    /// active display.
    pub fn change_bone_parent(&mut self, bone: BoneId, parent_name: Option<&str>) {
        if self.bone(bone).is_none() {
            warn!("change_bone_parent: unknown bone id");
            return;
        }
        if let Some(old_parent) = self.bone(bone).and_then(|b| b.parent()) {
            if let Some(parent_bone) = self.bone_mut(old_parent) {
                parent_bone.children_mut().retain(|&c| c != bone);
            }
            if let Some(b) = self.bone_mut(bone) {
                b.set_parent(None);
            }
            self.roots.push(bone);
        }
        if let Some(name) = parent_name {
            match self.bone_id_by_name(name) {
                Some(parent) => self.add_child_bone(parent, bone),
                None => warn!(
                    "change_bone_parent: no bone named '{name}' in armature '{}'",
                    self.name
                ),
            }
        }
    }

    // ---- per-frame update ----------------------------------------------

    /// Step the whole tree by `dt`: every top-level bone, depth-first
    /// pre-order, parent strictly before children. Call once per logical
    /// frame, after the playback engine wrote this frame's poses.
    pub fn update(&mut self, dt: f32) {
        let roots = self.roots.clone();
        for root in roots {
            self.update_bone(root, dt);
        }
        self.armature_transform_dirty = false;
    }

    fn update_bone(&mut self, id: BoneId, dt: f32) {
        let data_version = self.armature_data.data_version;
        let armature_dirty = self.armature_transform_dirty;

        // Parent state is read before the child mutates: the parent's flag
        // has not been cleared yet (it clears after its children ran).
        let parent_state = self
            .bone(id)
            .and_then(|b| b.parent())
            .and_then(|p| self.bone(p))
            .map(|p| (p.is_transform_dirty(), *p.world_transform()));

        let children = {
            let Some(bone) = self.bone_mut(id) else {
                return;
            };
            if let Some((parent_dirty, _)) = parent_state {
                if parent_dirty {
                    bone.set_transform_dirty(true);
                }
            }
            if bone.is_transform_dirty() {
                let parent_world = parent_state.map(|(_, world)| world);
                bone.recompute_world_transform(parent_world.as_ref(), data_version);
            }
            let display_dirty = bone.is_transform_dirty() || armature_dirty;
            display_factory::update_display(bone, dt, display_dirty);
            bone.children().to_vec()
        };

        for child in children {
            self.update_bone(child, dt);
        }

        // Cleared only now, so the children above observed it.
        if let Some(bone) = self.bone_mut(id) {
            bone.set_transform_dirty(false);
        }
    }

    // ---- queries / accessors -------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn armature_data(&self) -> &ArmatureData {
        &self.armature_data
    }

    pub fn data_version(&self) -> f32 {
        self.armature_data.data_version
    }

    pub fn animation(&self) -> Option<&AnimationHandle> {
        self.animation.as_ref()
    }

    /// Bind a playback controller; every bone tween is rebound with it.
    pub fn set_animation(&mut self, animation: Option<AnimationHandle>) {
        self.animation = animation;
        for (_, bone) in &mut self.bones {
            bone.tween_mut().set_animation(self.animation.clone());
        }
    }

    pub fn armature_transform_dirty(&self) -> bool {
        self.armature_transform_dirty
    }

    /// Place the armature node; bones see this as an armature-level dirty
    /// signal on the next update.
    pub fn set_transform(&mut self, transform: AffineTransform) {
        self.transform = transform;
        self.armature_transform_dirty = true;
    }

    /// Armature-space → world/screen-space transform.
    pub fn node_to_world_transform(&self) -> AffineTransform {
        self.transform
    }

    /// A bone's true world-space transform: cached armature-space
    /// transform composed with the armature's own placement.
    pub fn bone_node_to_world_transform(&self, bone: BoneId) -> Option<AffineTransform> {
        self.bone(bone)
            .map(|b| b.node_to_armature_transform().concat(&self.transform))
    }

    /// Recompute a bone's draw order under this armature's data version.
    pub fn update_bone_z_order(&mut self, bone: BoneId) {
        let data_version = self.armature_data.data_version;
        if let Some(b) = self.bone_mut(bone) {
            b.update_z_order(data_version);
        }
    }
}
