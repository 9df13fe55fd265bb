//! Scene data model for loaded assets
//!
//! A loaded asset is flattened into a `SceneData`: a node tree stored in
//! parent-before-child order, mesh geometry shared behind an `Arc` so the
//! GPU layer can hold onto it across frames, plain material records the
//! tool panels can edit, and the asset's animation clips.

pub mod animation;

pub use animation::{AnimationClip, ChannelValues, ClipChannel};

use glam::{Mat4, Quat, Vec3};
use std::sync::Arc;

/// Local translation/rotation/scale of one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTrs {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for NodeTrs {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl NodeTrs {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// One node of the flattened scene tree
///
/// Nodes are stored so that a parent always precedes its children, which
/// lets world transforms be computed in a single forward pass.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub rest: NodeTrs,
    pub parent: Option<usize>,
    /// Indices into `SceneData::meshes` (one per primitive)
    pub meshes: Vec<usize>,
}

/// Triangle geometry of a single primitive
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    /// Index into `SceneData::materials`
    pub material: usize,
    /// Non-geometric annotation (label, billboard, ...) excluded from framing
    pub overlay: bool,
    /// Local-space bounds, computed once at load
    pub bounds: Aabb,
}

/// Editable material parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialData {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub wireframe: bool,
    pub double_sided: bool,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            wireframe: false,
            double_sided: false,
        }
    }
}

/// A fully loaded asset
#[derive(Debug, Clone)]
pub struct SceneData {
    pub nodes: Vec<SceneNode>,
    /// Geometry is immutable after load; shared with the GPU uploader
    pub meshes: Arc<Vec<MeshData>>,
    pub materials: Vec<MaterialData>,
    pub clips: Vec<AnimationClip>,
}

impl SceneData {
    /// Rest pose of every node, in node order
    pub fn rest_pose(&self) -> Vec<NodeTrs> {
        self.nodes.iter().map(|n| n.rest).collect()
    }

    /// Pose with every clip sampled at `time` (clips layer over the rest pose)
    pub fn pose_at(&self, time: f32) -> Vec<NodeTrs> {
        let mut pose = self.rest_pose();
        for clip in &self.clips {
            clip.sample_into(time, &mut pose);
        }
        pose
    }

    /// World transform per node for the given pose
    ///
    /// Relies on the parent-before-child storage order.
    pub fn world_transforms(&self, pose: &[NodeTrs]) -> Vec<Mat4> {
        let mut worlds = Vec::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            let local = pose[i].matrix();
            let world = match node.parent {
                Some(p) => worlds[p] * local,
                None => local,
            };
            worlds.push(world);
        }
        worlds
    }

    pub fn has_clips(&self) -> bool {
        !self.clips.is_empty()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f32; 3]>) -> Self {
        let mut aabb = Self::EMPTY;
        for p in points {
            aabb.union_point(Vec3::from_array(*p));
        }
        aabb
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn union_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&mut self, other: &Aabb) {
        if !other.is_empty() {
            self.union_point(other.min);
            self.union_point(other.max);
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Bounds of this box under an affine transform (all eight corners)
    pub fn transformed(&self, mat: Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::EMPTY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.union_point(mat.transform_point3(corner));
        }
        out
    }
}

/// Name hints marking meshes as non-geometric overlays
///
/// Matching is a case-insensitive substring test against node and mesh
/// names; matching meshes are tagged at load time and skipped by framing.
pub const OVERLAY_NAME_HINTS: [&str; 8] = [
    "label",
    "text",
    "annotation",
    "arrow",
    "billboard",
    "sprite",
    "tag",
    "callout",
];

pub fn is_overlay_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    OVERLAY_NAME_HINTS.iter().any(|hint| lower.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, parent: Option<usize>, translation: Vec3) -> SceneNode {
        SceneNode {
            name: name.to_string(),
            rest: NodeTrs {
                translation,
                ..Default::default()
            },
            parent,
            meshes: Vec::new(),
        }
    }

    #[test]
    fn world_transforms_chain_through_parents() {
        let scene = SceneData {
            nodes: vec![
                node("root", None, Vec3::new(1.0, 0.0, 0.0)),
                node("child", Some(0), Vec3::new(0.0, 2.0, 0.0)),
            ],
            meshes: Arc::new(Vec::new()),
            materials: Vec::new(),
            clips: Vec::new(),
        };
        let worlds = scene.world_transforms(&scene.rest_pose());
        let p = worlds[1].transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn aabb_union_and_center() {
        let mut a = Aabb::EMPTY;
        assert!(a.is_empty());
        a.union_point(Vec3::new(-1.0, 0.0, 0.0));
        a.union_point(Vec3::new(3.0, 2.0, 4.0));
        assert_eq!(a.center(), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(a.size(), Vec3::new(4.0, 2.0, 4.0));
    }

    #[test]
    fn aabb_transform_covers_rotated_corners() {
        let a = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let rotated = a.transformed(Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4));
        let expect = std::f32::consts::SQRT_2;
        assert!((rotated.max.x - expect).abs() < 1e-5);
        assert!((rotated.max.z - expect).abs() < 1e-5);
        assert!((rotated.max.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn overlay_names_match_case_insensitively() {
        assert!(is_overlay_name("Price_Label_01"));
        assert!(is_overlay_name("BILLBOARD"));
        assert!(is_overlay_name("info-text"));
        assert!(!is_overlay_name("hull"));
        assert!(!is_overlay_name("propeller"));
    }
}
