#![allow(dead_code)]
//! Display list for one bone: the set of possible visual representations
//! and the currently active one.
//!
//! Rendering stays outside this crate. A [`RenderNode`] is the
//! engine-agnostic snapshot a backend draws from (transform, tint,
//! z-order, blend); [`DisplayData`] describes what kind of visual an entry
//! is. The manager only tracks membership and the active index.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::data::{BaseData, BlendType, BoneData, Color};
use crate::transform::AffineTransform;

/// Description of one possible visual for a bone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayData {
    /// A textured sprite; `skin` is an optional base transform applied
    /// between the texture and the bone.
    Sprite {
        display_name: String,
        #[serde(default)]
        skin: Option<BaseData>,
    },
    /// A nested armature rendered in place of a sprite.
    Armature { armature_name: String },
    /// A particle system keyed by its definition file.
    Particle { plist: String },
}

impl DisplayData {
    pub fn name(&self) -> &str {
        match self {
            DisplayData::Sprite { display_name, .. } => display_name,
            DisplayData::Armature { armature_name } => armature_name,
            DisplayData::Particle { plist } => plist,
        }
    }

    pub fn kind(&self) -> RenderKind {
        match self {
            DisplayData::Sprite { .. } => RenderKind::Sprite,
            DisplayData::Armature { .. } => RenderKind::Armature,
            DisplayData::Particle { .. } => RenderKind::Particle,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Sprite,
    Armature,
    Particle,
}

/// What a backend needs to draw one display this frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RenderNode {
    pub kind: RenderKind,
    pub transform: AffineTransform,
    pub color: Color,
    pub opacity: u8,
    pub z_order: i32,
    pub visible: bool,
    pub blend: BlendType,
}

impl RenderNode {
    pub fn new(kind: RenderKind) -> Self {
        Self {
            kind,
            transform: AffineTransform::IDENTITY,
            color: Color::WHITE,
            opacity: 255,
            z_order: 0,
            visible: true,
            blend: BlendType::Normal,
        }
    }

    /// Single color-application path for every backend kind.
    pub fn set_color_and_opacity(&mut self, color: Color, opacity: u8) {
        self.color = color;
        self.opacity = opacity;
    }
}

/// One display-list entry: the description plus the render node built for
/// it (absent until the entry has been initialized).
#[derive(Clone, Debug, PartialEq)]
pub struct DecorativeDisplay {
    pub data: DisplayData,
    pub node: Option<RenderNode>,
}

impl DecorativeDisplay {
    pub fn new(data: DisplayData) -> Self {
        let node = RenderNode::new(data.kind());
        Self {
            data,
            node: Some(node),
        }
    }
}

/// Owns a bone's display list and the active entry.
#[derive(Clone, Debug)]
pub struct DisplayManager {
    displays: Vec<DecorativeDisplay>,
    /// Index of the active entry; `None` means nothing is shown.
    display_index: Option<usize>,
    force_change_display: bool,
    visible: bool,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self {
            displays: Vec::new(),
            display_index: None,
            force_change_display: false,
            visible: true,
        }
    }

    /// Rebuild the display list from a bone's static config. Does not pick
    /// an active entry; callers switch with [`change_display_by_index`].
    ///
    /// [`change_display_by_index`]: DisplayManager::change_display_by_index
    pub fn init_display_list(&mut self, bone_data: &BoneData) {
        self.displays.clear();
        self.display_index = None;
        for data in &bone_data.display_data {
            self.displays.push(DecorativeDisplay::new(data.clone()));
        }
    }

    pub fn displays(&self) -> &[DecorativeDisplay] {
        &self.displays
    }

    pub fn display_index(&self) -> Option<usize> {
        self.display_index
    }

    pub fn is_force_change_display(&self) -> bool {
        self.force_change_display
    }

    pub fn current_decorative_display(&self) -> Option<&DecorativeDisplay> {
        self.display_index.and_then(|i| self.displays.get(i))
    }

    pub fn current_decorative_display_mut(&mut self) -> Option<&mut DecorativeDisplay> {
        match self.display_index {
            Some(i) => self.displays.get_mut(i),
            None => None,
        }
    }

    /// Render node of the active entry, if any.
    pub fn display_render_node(&self) -> Option<&RenderNode> {
        self.current_decorative_display()
            .and_then(|d| d.node.as_ref())
    }

    pub fn display_render_node_mut(&mut self) -> Option<&mut RenderNode> {
        self.current_decorative_display_mut()
            .and_then(|d| d.node.as_mut())
    }

    /// Add or replace a display entry. A negative index appends; replacing
    /// the active index re-activates the new entry in place.
    pub fn add_display(&mut self, data: DisplayData, index: i32) {
        if index >= 0 && (index as usize) < self.displays.len() {
            let slot = index as usize;
            self.displays[slot] = DecorativeDisplay::new(data);
            if self.display_index == Some(slot) {
                self.force_change_display = true;
            }
        } else {
            self.displays.push(DecorativeDisplay::new(data));
        }
    }

    /// Add a prebuilt sprite node (a "skin") as a display entry.
    pub fn add_skin(&mut self, skin: RenderNode, index: i32) {
        let entry = DecorativeDisplay {
            data: DisplayData::Sprite {
                display_name: String::new(),
                skin: None,
            },
            node: Some(RenderNode {
                kind: RenderKind::Sprite,
                ..skin
            }),
        };
        if index >= 0 && (index as usize) < self.displays.len() {
            let slot = index as usize;
            self.displays[slot] = entry;
            if self.display_index == Some(slot) {
                self.force_change_display = true;
            }
        } else {
            self.displays.push(entry);
        }
    }

    /// Switch the active display. An out-of-range index is rejected with a
    /// diagnostic; a negative index hides the bone (no active entry).
    pub fn change_display_by_index(&mut self, index: i32, force: bool) {
        if index >= self.displays.len() as i32 {
            warn!(
                "change_display_by_index: index {index} out of range ({} displays)",
                self.displays.len()
            );
            return;
        }
        self.force_change_display = force;
        if index < 0 {
            self.display_index = None;
            return;
        }
        self.display_index = Some(index as usize);
    }

    /// Directly set (or clear) the active entry by index. Used when a bone
    /// is detached from the tree.
    pub fn set_current_decorative_display(&mut self, index: Option<usize>) {
        match index {
            Some(i) if i < self.displays.len() => self.display_index = Some(i),
            Some(i) => warn!(
                "set_current_decorative_display: index {i} out of range ({} displays)",
                self.displays.len()
            ),
            None => self.display_index = None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(name: &str) -> DisplayData {
        DisplayData::Sprite {
            display_name: name.to_string(),
            skin: None,
        }
    }

    #[test]
    fn add_append_and_replace() {
        let mut dm = DisplayManager::new();
        dm.add_display(sprite("a"), -1);
        dm.add_display(sprite("b"), -1);
        assert_eq!(dm.displays().len(), 2);
        dm.add_display(sprite("c"), 0);
        assert_eq!(dm.displays().len(), 2);
        assert_eq!(dm.displays()[0].data.name(), "c");
    }

    #[test]
    fn out_of_range_switch_is_rejected() {
        let mut dm = DisplayManager::new();
        dm.add_display(sprite("a"), -1);
        dm.change_display_by_index(0, false);
        assert_eq!(dm.display_index(), Some(0));
        dm.change_display_by_index(5, false);
        assert_eq!(dm.display_index(), Some(0));
    }

    #[test]
    fn negative_switch_hides() {
        let mut dm = DisplayManager::new();
        dm.add_display(sprite("a"), -1);
        dm.change_display_by_index(0, false);
        dm.change_display_by_index(-1, false);
        assert!(dm.current_decorative_display().is_none());
    }
}
