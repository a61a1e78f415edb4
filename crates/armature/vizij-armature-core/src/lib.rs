#![allow(dead_code)]
//! Vizij Armature Core (engine-agnostic)
//!
//! 2D skeletal armature: a tree of bones, each combining parent-relative
//! transform data with the per-frame pose written by a playback engine,
//! producing cached world transforms and display snapshots for a rendering
//! backend. This crate owns the transform-propagation pass (dirty-flag
//! incremental recomputation, parent-before-child ordering, the combined
//! and legacy data-format formulas) and the display-list bookkeeping;
//! playback, resource loading and rendering live in the host.

pub mod armature;
pub mod bone;
pub mod data;
pub mod display;
pub mod display_factory;
pub mod ids;
pub mod node;
pub mod transform;
pub mod tween;

// Re-exports for consumers (adapters)
pub use armature::Armature;
pub use bone::Bone;
pub use data::{
    modulate_channel, ArmatureData, BaseData, BlendType, BoneData, Color, DefinitionError,
    FrameData, VERSION_COMBINED,
};
pub use display::{DecorativeDisplay, DisplayData, DisplayManager, RenderKind, RenderNode};
pub use ids::{BoneId, IdAllocator};
pub use node::NodeState;
pub use transform::AffineTransform;
pub use tween::{AnimationHandle, Tween};
