//! Center-and-frame: fit the loaded content into the camera's view
//!
//! Bounds are measured in the content's own coordinate space over meshes
//! that are not tagged as overlays, with the pose frozen at clip time
//! zero so mid-animation deformation cannot skew the result. The content
//! is recentered at the origin by a baked offset, and the camera is
//! placed along a yaw/pitch direction at a distance that fits the
//! bounding sphere in the vertical field of view.

use crate::constants::{camera as cam_const, view};
use crate::scene::{Aabb, SceneData};
use crate::viewer::camera::OrbitCamera;
use glam::Vec3;

/// Framing parameters, adjustable from the tool panels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    /// 1.0 = tight fit, larger backs the camera off
    pub distance_factor: f32,
    /// Screen-space pan in fractions of the framed radius; positive moves
    /// the subject right / up on screen
    pub pan_h: f32,
    pub pan_v: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            yaw_deg: view::YAW_DEG,
            pitch_deg: view::PITCH_DEG,
            distance_factor: view::DISTANCE_FACTOR,
            pan_h: view::PAN_H,
            pan_v: view::PAN_V,
        }
    }
}

/// Result of a framing pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    /// Translation baked into the model root so bounds center at origin
    pub content_offset: Vec3,
    /// Bounding-sphere radius used for distance and zoom bounds
    pub radius: f32,
}

/// Bounds of the scene's non-overlay meshes in content space.
///
/// Falls back to a bound over every mesh when the filter leaves nothing.
/// The pose is sampled at clip time zero when the asset has clips.
pub fn content_bounds(scene: &SceneData) -> Aabb {
    let pose = if scene.has_clips() {
        scene.pose_at(0.0)
    } else {
        scene.rest_pose()
    };
    let worlds = scene.world_transforms(&pose);

    let mut bounds = accumulate(scene, &worlds, false);
    if bounds.is_empty() {
        bounds = accumulate(scene, &worlds, true);
    }
    bounds
}

fn accumulate(scene: &SceneData, worlds: &[glam::Mat4], include_overlays: bool) -> Aabb {
    let mut bounds = Aabb::EMPTY;
    for (i, node) in scene.nodes.iter().enumerate() {
        for &mesh_id in &node.meshes {
            let mesh = &scene.meshes[mesh_id];
            if mesh.overlay && !include_overlays {
                continue;
            }
            bounds.union(&mesh.bounds.transformed(worlds[i]));
        }
    }
    bounds
}

/// Center the content and pose the camera to frame it.
///
/// Returns `None` when the scene has no measurable geometry.
pub fn center_and_frame(
    scene: &SceneData,
    camera: &mut OrbitCamera,
    params: &ViewParams,
) -> Option<Framing> {
    let bounds = content_bounds(scene);
    if bounds.is_empty() {
        return None;
    }

    let content_offset = -bounds.center();
    let radius = (bounds.size().length() * 0.5).max(1e-4);

    let dist = radius / (camera.fov * 0.5).sin() * params.distance_factor;

    let yaw = params.yaw_deg.to_radians();
    let pitch = params.pitch_deg.to_radians();
    let dir = Vec3::new(
        pitch.cos() * yaw.sin(),
        pitch.sin(),
        pitch.cos() * yaw.cos(),
    )
    .normalize();

    // Screen-space pan: offset camera and pivot along the view-plane axes
    let right = dir.cross(Vec3::Y).normalize_or_zero();
    let true_up = right.cross(dir).normalize_or_zero();
    let pan_offset = right * (-params.pan_h * radius) + true_up * (-params.pan_v * radius);

    camera.position = dir * dist + pan_offset;
    camera.target = pan_offset;
    camera.min_distance = (radius * cam_const::MIN_DISTANCE_FACTOR).max(0.01);
    camera.max_distance = radius * cam_const::MAX_DISTANCE_FACTOR;

    Some(Framing {
        content_offset,
        radius,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MaterialData, MeshData, NodeTrs, SceneNode};
    use glam::Quat;
    use std::sync::Arc;

    fn cube_mesh(name: &str, center: Vec3, half: f32, overlay: bool) -> MeshData {
        let mut positions = Vec::new();
        for i in 0..8 {
            positions.push([
                center.x + if i & 1 == 0 { -half } else { half },
                center.y + if i & 2 == 0 { -half } else { half },
                center.z + if i & 4 == 0 { -half } else { half },
            ]);
        }
        let bounds = Aabb::from_points(&positions);
        MeshData {
            name: name.to_string(),
            positions,
            normals: vec![[0.0, 1.0, 0.0]; 8],
            uvs: vec![[0.0, 0.0]; 8],
            indices: (0..8).collect(),
            material: 0,
            overlay,
            bounds,
        }
    }

    fn scene_with(meshes: Vec<MeshData>) -> SceneData {
        let node = SceneNode {
            name: "root".to_string(),
            rest: NodeTrs {
                translation: Vec3::new(5.0, -2.0, 1.0),
                rotation: Quat::IDENTITY,
                scale: Vec3::ONE,
            },
            parent: None,
            meshes: (0..meshes.len()).collect(),
        };
        SceneData {
            nodes: vec![node],
            meshes: Arc::new(meshes),
            materials: vec![MaterialData::default()],
            clips: Vec::new(),
        }
    }

    #[test]
    fn framing_centers_bounds_at_origin() {
        let scene = scene_with(vec![cube_mesh("hull", Vec3::new(3.0, 1.0, -2.0), 1.0, false)]);
        let mut camera = OrbitCamera::default();
        let framing = center_and_frame(&scene, &mut camera, &ViewParams::default()).unwrap();

        let bounds = content_bounds(&scene);
        let centered = bounds.center() + framing.content_offset;
        assert!(centered.length() < 1e-5);
    }

    #[test]
    fn overlay_meshes_do_not_affect_framing() {
        let subject = cube_mesh("hull", Vec3::ZERO, 1.0, false);
        let far_label = cube_mesh("price_label", Vec3::new(100.0, 0.0, 0.0), 1.0, true);
        let with_label = scene_with(vec![subject.clone(), far_label]);
        let without = scene_with(vec![subject]);

        let mut cam_a = OrbitCamera::default();
        let mut cam_b = OrbitCamera::default();
        let a = center_and_frame(&with_label, &mut cam_a, &ViewParams::default()).unwrap();
        let b = center_and_frame(&without, &mut cam_b, &ViewParams::default()).unwrap();
        assert!((a.radius - b.radius).abs() < 1e-5);
        assert!((a.content_offset - b.content_offset).length() < 1e-5);
    }

    #[test]
    fn all_overlay_scene_falls_back_to_full_bounds() {
        let scene = scene_with(vec![cube_mesh("big_label", Vec3::ZERO, 2.0, true)]);
        let bounds = content_bounds(&scene);
        assert!(!bounds.is_empty());
        let mut camera = OrbitCamera::default();
        assert!(center_and_frame(&scene, &mut camera, &ViewParams::default()).is_some());
    }

    #[test]
    fn camera_distance_fits_the_bounding_sphere() {
        let scene = scene_with(vec![cube_mesh("hull", Vec3::ZERO, 1.0, false)]);
        let mut camera = OrbitCamera::default();
        let params = ViewParams {
            pan_h: 0.0,
            pan_v: 0.0,
            ..ViewParams::default()
        };
        let framing = center_and_frame(&scene, &mut camera, &params).unwrap();

        let expected = framing.radius / (camera.fov * 0.5).sin() * params.distance_factor;
        assert!((camera.distance() - expected).abs() < 1e-3);
        assert!((camera.min_distance - framing.radius * 0.5).abs() < 1e-5);
        assert!((camera.max_distance - framing.radius * 10.0).abs() < 1e-4);
    }

    #[test]
    fn pan_shifts_camera_and_target_alike() {
        let scene = scene_with(vec![cube_mesh("hull", Vec3::ZERO, 1.0, false)]);
        let mut plain = OrbitCamera::default();
        let mut panned = OrbitCamera::default();
        center_and_frame(&scene, &mut plain, &ViewParams::default()).unwrap();
        center_and_frame(
            &scene,
            &mut panned,
            &ViewParams {
                pan_h: 0.5,
                pan_v: -0.25,
                ..ViewParams::default()
            },
        )
        .unwrap();

        let shift = panned.target - plain.target;
        assert!(shift.length() > 0.0);
        let cam_shift = panned.position - plain.position;
        assert!((shift - cam_shift).length() < 1e-4);
    }

    #[test]
    fn empty_scene_is_not_framed() {
        let scene = scene_with(Vec::new());
        let mut camera = OrbitCamera::default();
        assert!(center_and_frame(&scene, &mut camera, &ViewParams::default()).is_none());
    }
}
