#![allow(dead_code)]
//! One node of the armature tree.
//!
//! A bone owns its per-frame tween pose, its display manager and its
//! cached world transform. Tree links are `BoneId` pairs resolved through
//! the owning [`Armature`](crate::armature::Armature); the per-frame walk
//! (parent strictly before children) lives there as well.

use log::warn;

use crate::armature::Armature;
use crate::data::{modulate_channel, BlendType, BoneData, Color, FrameData, VERSION_COMBINED};
use crate::display::{DisplayData, DisplayManager, RenderNode};
use crate::ids::BoneId;
use crate::node::NodeState;
use crate::transform::AffineTransform;
use crate::tween::Tween;

#[derive(Debug)]
pub struct Bone {
    id: BoneId,
    name: String,
    bone_data: Option<BoneData>,
    node: NodeState,
    /// Current pose; overwritten by the playback engine before each update.
    tween_data: FrameData,
    tween: Tween,
    /// Bone-local → armature-space transform. Valid only while
    /// `transform_dirty` is false.
    world_transform: AffineTransform,
    transform_dirty: bool,
    parent: Option<BoneId>,
    children: Vec<BoneId>,
    /// Sub-skeleton hosted by this bone (e.g. a weapon armature attached
    /// to a hand bone).
    child_armature: Option<Box<Armature>>,
    display_manager: DisplayManager,
    blend_type: BlendType,
    ignore_movement_bone_data: bool,
}

impl Bone {
    /// A freshly created bone starts dirty so its first update computes a
    /// world transform.
    pub(crate) fn new(id: BoneId, name: &str) -> Self {
        let mut tween = Tween::new();
        tween.init(id);
        Self {
            id,
            name: name.to_string(),
            bone_data: None,
            node: NodeState::default(),
            tween_data: FrameData::default(),
            tween,
            world_transform: AffineTransform::IDENTITY,
            transform_dirty: true,
            parent: None,
            children: Vec::new(),
            child_armature: None,
            display_manager: DisplayManager::new(),
            blend_type: BlendType::default(),
            ignore_movement_bone_data: false,
        }
    }

    /// Bind static config: adopt its name and z-order, seed the display
    /// list. A missing value is rejected with a diagnostic.
    pub fn set_bone_data(&mut self, bone_data: Option<BoneData>) {
        let Some(data) = bone_data else {
            warn!("bone '{}': bone data must not be null", self.name);
            return;
        };
        self.name = data.name.clone();
        self.node.z_order = data.base.z_order;
        self.display_manager.init_display_list(&data);
        self.bone_data = Some(data);
    }

    pub fn bone_data(&self) -> Option<&BoneData> {
        self.bone_data.as_ref()
    }

    // ---- per-frame transform ------------------------------------------

    /// Fold the static base pose into the live tween pose (combined data
    /// format). Scale is centered at 1.0: adding the base scale and
    /// subtracting 1 leaves the multiplicative effect intact. Runs at most
    /// once per frame, inside a dirty recompute; the playback engine must
    /// supply a fresh pose each frame.
    fn combine_base_pose(&mut self) {
        if let Some(data) = &self.bone_data {
            let base = &data.base;
            let t = &mut self.tween_data;
            t.x += base.x;
            t.y += base.y;
            t.skew_x += base.skew_x;
            t.skew_y += base.skew_y;
            t.scale_x += base.scale_x;
            t.scale_y += base.scale_y;

            t.scale_x -= 1.0;
            t.scale_y -= 1.0;
        }
    }

    /// Recompute the cached world transform from the tween pose, this
    /// bone's own node transform, and the parent's world transform.
    pub(crate) fn recompute_world_transform(
        &mut self,
        parent_world: Option<&AffineTransform>,
        data_version: f32,
    ) {
        if data_version >= VERSION_COMBINED {
            self.combine_base_pose();
        }
        let local = self.tween_data.to_affine();
        let mut world = self.node.to_parent_transform().concat(&local);
        if let Some(parent) = parent_world {
            world = world.concat(parent);
        }
        self.world_transform = world;
    }

    // ---- color / opacity / z-order ------------------------------------

    /// Apply a parent-cascaded color. The bone's own color is forced back
    /// to white first; only the tween data tints the composed display.
    pub fn update_displayed_color(&mut self, parent_color: Color) {
        self.node.real_color = Color::WHITE;
        self.node.displayed_color = self.node.real_color.modulate(parent_color);
        self.update_color();
    }

    /// Apply a parent-cascaded opacity; same forcing rule as color.
    pub fn update_displayed_opacity(&mut self, parent_opacity: u8) {
        self.node.real_opacity = 255;
        self.node.displayed_opacity = modulate_channel(self.node.real_opacity, parent_opacity);
        self.update_color();
    }

    /// Push the composed tint onto the active render node:
    /// `displayed * tween / 255` per channel.
    pub fn update_color(&mut self) {
        let tween = &self.tween_data;
        let opacity = modulate_channel(self.node.displayed_opacity, tween.alpha);
        let color = self.node.displayed_color.modulate(tween.color);
        if let Some(node) = self.display_manager.display_render_node_mut() {
            node.set_color_and_opacity(color, opacity);
        }
    }

    /// Recompute the draw order from the tween pose; in the combined data
    /// format the static z-order is added on top.
    pub fn update_z_order(&mut self, data_version: f32) {
        let z = if data_version >= VERSION_COMBINED {
            let base = self.bone_data.as_ref().map_or(0, |d| d.base.z_order);
            self.tween_data.z_order + base
        } else {
            self.tween_data.z_order
        };
        self.set_z_order(z);
    }

    /// Set the draw order, writing through only on change.
    pub fn set_z_order(&mut self, z_order: i32) {
        if self.node.z_order != z_order {
            self.node.z_order = z_order;
        }
        if let Some(node) = self.display_manager.display_render_node_mut() {
            node.z_order = z_order;
        }
    }

    pub fn z_order(&self) -> i32 {
        self.node.z_order
    }

    // ---- transform queries --------------------------------------------

    /// Cached transform relative to the armature origin. Only meaningful
    /// after an update has cleared the dirty flag.
    pub fn node_to_armature_transform(&self) -> &AffineTransform {
        &self.world_transform
    }

    pub(crate) fn world_transform(&self) -> &AffineTransform {
        &self.world_transform
    }

    pub fn is_transform_dirty(&self) -> bool {
        self.transform_dirty
    }

    pub fn set_transform_dirty(&mut self, dirty: bool) {
        self.transform_dirty = dirty;
    }

    // ---- tree links ----------------------------------------------------

    pub fn id(&self) -> BoneId {
        self.id
    }

    pub fn parent(&self) -> Option<BoneId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<BoneId>) {
        self.parent = parent;
    }

    pub fn children(&self) -> &[BoneId] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<BoneId> {
        &mut self.children
    }

    pub fn child_armature(&self) -> Option<&Armature> {
        self.child_armature.as_deref()
    }

    pub fn child_armature_mut(&mut self) -> Option<&mut Armature> {
        self.child_armature.as_deref_mut()
    }

    pub fn set_child_armature(&mut self, armature: Option<Box<Armature>>) {
        self.child_armature = armature;
    }

    // ---- display delegation -------------------------------------------

    pub fn display_manager(&self) -> &DisplayManager {
        &self.display_manager
    }

    pub fn display_manager_mut(&mut self) -> &mut DisplayManager {
        &mut self.display_manager
    }

    pub fn add_display(&mut self, data: DisplayData, index: i32) {
        self.display_manager.add_display(data, index);
    }

    pub fn add_skin(&mut self, skin: RenderNode, index: i32) {
        self.display_manager.add_skin(skin, index);
    }

    pub fn change_display_by_index(&mut self, index: i32, force: bool) {
        self.display_manager.change_display_by_index(index, force);
    }

    pub fn display_render_node(&self) -> Option<&RenderNode> {
        self.display_manager.display_render_node()
    }

    // ---- plain accessors ----------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn node(&self) -> &NodeState {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut NodeState {
        &mut self.node
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn tween_mut(&mut self) -> &mut Tween {
        &mut self.tween
    }

    pub fn tween_data(&self) -> &FrameData {
        &self.tween_data
    }

    /// Exclusive pose access for the playback engine; writing a pose does
    /// not mark the transform dirty by itself, callers pair it with
    /// [`set_transform_dirty`](Bone::set_transform_dirty).
    pub fn tween_data_mut(&mut self) -> &mut FrameData {
        &mut self.tween_data
    }

    pub fn set_tween_data(&mut self, data: FrameData) {
        self.tween_data = data;
    }

    pub fn blend_type(&self) -> BlendType {
        self.blend_type
    }

    pub fn set_blend_type(&mut self, blend_type: BlendType) {
        self.blend_type = blend_type;
    }

    pub fn ignore_movement_bone_data(&self) -> bool {
        self.ignore_movement_bone_data
    }

    /// When playback has no pose track for this bone, it is normally
    /// hidden; setting the ignore flag keeps it shown.
    pub fn set_ignore_movement_bone_data(&mut self, ignore: bool) {
        self.ignore_movement_bone_data = ignore;
    }
}
