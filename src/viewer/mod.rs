//! Viewer state machine
//!
//! `ViewerSession` owns the loaded scene, the orbit camera, the framing
//! parameters, and the single active motion mode. Every mutation funnels
//! through its operation set; the UI layer never reaches into fields.
//! Loads run on worker threads and report back over a channel tagged with
//! a generation counter so the latest request always wins.

pub mod camera;
pub mod framing;
pub mod motion;

pub use camera::OrbitCamera;
pub use framing::{Framing, ViewParams};
pub use motion::{BaseTransform, MotionMode, QuickAnimKind, QuickAnimParams};

use crate::constants::{anim, lights, status};
use crate::loader;
use crate::scene::{MaterialData, MeshData, SceneData};
use glam::{Mat4, Vec3};
use log::{debug, error, info};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Scene-wide rendering environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub background: [f32; 3],
    pub exposure: f32,
    pub hemisphere: f32,
    pub key: f32,
    pub rim: f32,
    pub show_grid: bool,
    pub show_axes: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            background: [1.0, 1.0, 1.0],
            exposure: 1.0,
            hemisphere: lights::HEMISPHERE,
            key: lights::KEY,
            rim: lights::RIM,
            show_grid: false,
            show_axes: false,
        }
    }
}

/// Optional scale pulse, orthogonal to the motion modes (scale only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub enabled: bool,
    pub bpm: f32,
    pub amp: f32,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            enabled: false,
            bpm: 60.0,
            amp: 0.06,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusChip {
    text: String,
    error: bool,
    age: f32,
}

/// Completion report from a loader worker
struct LoadResult {
    generation: u64,
    path: PathBuf,
    outcome: Result<SceneData, String>,
}

/// One draw of one mesh, with the final model matrix for this frame
#[derive(Debug, Clone)]
pub struct MeshDraw {
    pub mesh: usize,
    pub model: Mat4,
    pub material: MaterialData,
}

/// Immutable per-frame description handed to the GPU layer
#[derive(Clone)]
pub struct RenderSnapshot {
    /// Bumped whenever the scene (and thus the geometry to upload) changes
    pub revision: u64,
    pub geometry: Option<Arc<Vec<MeshData>>>,
    pub draws: Vec<MeshDraw>,
    pub camera: OrbitCamera,
    pub env: Environment,
}

/// The single live viewer instance
pub struct ViewerSession {
    scene: Option<SceneData>,
    scene_revision: u64,

    /// Baked recentering offset from the last framing pass
    content_offset: Vec3,
    framed_radius: f32,

    // Model-root pose driven by the procedural motions
    root_position: Vec3,
    root_yaw: f32,
    root_scale: f32,
    base: Option<BaseTransform>,

    motion: MotionMode,
    auto_rotate_speed: f32,

    pub camera: OrbitCamera,
    view: ViewParams,
    env: Environment,
    pulse: Pulse,

    /// Material values captured at load time, for reset
    material_snapshot: Vec<MaterialData>,

    clock: f32,
    clip_time: f32,

    status: Option<StatusChip>,

    load_generation: u64,
    load_tx: Sender<LoadResult>,
    load_rx: Receiver<LoadResult>,
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerSession {
    pub fn new() -> Self {
        let (load_tx, load_rx) = mpsc::channel();
        Self {
            scene: None,
            scene_revision: 0,
            content_offset: Vec3::ZERO,
            framed_radius: 0.0,
            root_position: Vec3::ZERO,
            root_yaw: 0.0,
            root_scale: 1.0,
            base: None,
            motion: MotionMode::Idle,
            auto_rotate_speed: 1.0,
            camera: OrbitCamera::default(),
            view: ViewParams::default(),
            env: Environment::default(),
            pulse: Pulse::default(),
            material_snapshot: Vec::new(),
            clock: 0.0,
            clip_time: 0.0,
            status: None,
            load_generation: 0,
            load_tx,
            load_rx,
        }
    }

    // ---------------------------------------------------------------- loads

    /// Start loading an asset, superseding any load still in flight.
    ///
    /// All motion stops immediately and the previous scene is dropped;
    /// the new scene is attached only once its import completes.
    pub fn load_asset(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.force_idle();
        self.clear_scene();
        self.set_status("Loading...");

        self.load_generation += 1;
        let generation = self.load_generation;
        let tx = self.load_tx.clone();
        std::thread::spawn(move || {
            let outcome = loader::load_gltf_scene_from_path(&path);
            let _ = tx.send(LoadResult {
                generation,
                path,
                outcome,
            });
        });
    }

    fn poll_loads(&mut self) {
        while let Ok(result) = self.load_rx.try_recv() {
            self.apply_load_result(result);
        }
    }

    fn apply_load_result(&mut self, result: LoadResult) {
        if result.generation != self.load_generation {
            debug!(
                "discarding superseded load of {} (gen {} < {})",
                result.path.display(),
                result.generation,
                self.load_generation
            );
            return;
        }
        match result.outcome {
            Ok(scene) => self.install_scene(scene),
            Err(err) => {
                error!("model load failed: {}", err);
                self.set_error_status("Error");
            }
        }
    }

    /// Attach a fully loaded scene: cache materials, frame it, and start
    /// its clips if it has any.
    pub fn install_scene(&mut self, scene: SceneData) {
        self.material_snapshot = scene.materials.clone();
        let has_clips = scene.has_clips();
        self.scene = Some(scene);
        self.scene_revision += 1;
        self.root_position = Vec3::ZERO;
        self.root_yaw = 0.0;
        self.root_scale = 1.0;
        self.base = None;
        self.clip_time = 0.0;
        self.reframe();
        self.motion = if has_clips {
            info!("clips present, starting playback");
            MotionMode::ClipPlayback
        } else {
            MotionMode::Idle
        };
        self.set_status("Loaded");
    }

    fn clear_scene(&mut self) {
        if self.scene.take().is_some() {
            self.scene_revision += 1;
        }
        self.material_snapshot.clear();
        self.content_offset = Vec3::ZERO;
        self.framed_radius = 0.0;
    }

    pub fn has_content(&self) -> bool {
        self.scene.is_some()
    }

    pub fn scene(&self) -> Option<&SceneData> {
        self.scene.as_ref()
    }

    // ------------------------------------------------------------- framing

    fn reframe(&mut self) {
        let Some(scene) = &self.scene else { return };
        if let Some(framing) = framing::center_and_frame(scene, &mut self.camera, &self.view) {
            self.content_offset = framing.content_offset;
            self.framed_radius = framing.radius;
        }
    }

    /// Re-run framing on the current content ("Fit to View")
    pub fn auto_frame(&mut self) {
        self.reframe();
    }

    /// Re-run framing and confirm via the status chip ("Reset View")
    pub fn reset_view(&mut self) {
        self.reframe();
        self.set_status("Ready");
    }

    pub fn view_params(&self) -> ViewParams {
        self.view
    }

    pub fn set_view_params(&mut self, params: ViewParams) {
        self.view = params;
        self.reframe();
    }

    pub fn framed_radius(&self) -> f32 {
        self.framed_radius
    }

    // -------------------------------------------------------------- motion

    pub fn motion_mode(&self) -> MotionMode {
        self.motion
    }

    /// Stop whatever is running and restore the base pose
    fn force_idle(&mut self) {
        if let Some(base) = self.base.take() {
            self.root_position = base.position;
            self.root_yaw = base.yaw;
        }
        self.motion = MotionMode::Idle;
    }

    /// Snapshot the model-root pose once; re-arming without passing
    /// through Idle keeps the original snapshot.
    fn arm_base(&mut self) {
        if self.base.is_none() {
            self.base = Some(BaseTransform {
                position: self.root_position,
                yaw: self.root_yaw,
            });
        }
    }

    /// Start or toggle built-in clip playback. Returns whether clips are
    /// playing afterwards.
    pub fn set_clips_playing(&mut self, on: bool) -> bool {
        let has_clips = self.scene.as_ref().map(SceneData::has_clips).unwrap_or(false);
        if !has_clips {
            if matches!(self.motion, MotionMode::ClipPlayback) {
                self.motion = MotionMode::Idle;
            }
            return false;
        }
        if on {
            self.force_idle();
            self.clip_time = 0.0;
            self.motion = MotionMode::ClipPlayback;
            true
        } else {
            if matches!(self.motion, MotionMode::ClipPlayback) {
                self.motion = MotionMode::Idle;
            }
            false
        }
    }

    pub fn toggle_clips(&mut self) -> bool {
        self.set_clips_playing(!self.are_clips_playing())
    }

    pub fn are_clips_playing(&self) -> bool {
        matches!(self.motion, MotionMode::ClipPlayback)
    }

    /// Start a quick animation, or toggle it off when its kind is already
    /// running. Switching kinds keeps the original base snapshot.
    pub fn set_quick_anim(&mut self, params: QuickAnimParams) {
        if let MotionMode::QuickAnim(active) = self.motion {
            if active.kind == params.kind {
                self.force_idle();
                return;
            }
        }
        if self.scene.is_none() {
            return;
        }
        self.arm_base();
        self.motion = MotionMode::QuickAnim(params);
        self.reframe();
    }

    /// Stop the quick animation (the "None" choice); other modes untouched
    pub fn stop_quick_anim(&mut self) {
        if matches!(self.motion, MotionMode::QuickAnim(_)) {
            self.force_idle();
        }
    }

    /// Adjust speed/amp/height of the running quick animation in place
    pub fn update_quick_anim_params(&mut self, speed: f32, amp: f32, height: f32) {
        if let MotionMode::QuickAnim(params) = &mut self.motion {
            params.speed = speed;
            params.amp = amp;
            params.height = height;
        }
    }

    pub fn quick_anim_kind(&self) -> Option<QuickAnimKind> {
        match self.motion {
            MotionMode::QuickAnim(params) => Some(params.kind),
            _ => None,
        }
    }

    /// Enable or disable camera auto-rotate. Enabling while already
    /// rotating toggles back to Idle; exiting never resumes clips.
    pub fn set_auto_rotate(&mut self, on: bool) -> bool {
        if matches!(self.motion, MotionMode::AutoRotate { .. }) {
            self.force_idle();
            return false;
        }
        if !on {
            return false;
        }
        if self.scene.is_none() {
            return false;
        }
        self.force_idle();
        self.motion = MotionMode::AutoRotate {
            speed: self.auto_rotate_speed,
        };
        self.reframe();
        true
    }

    pub fn is_auto_rotating(&self) -> bool {
        matches!(self.motion, MotionMode::AutoRotate { .. })
    }

    pub fn auto_rotate_speed(&self) -> f32 {
        self.auto_rotate_speed
    }

    pub fn set_auto_rotate_speed(&mut self, speed: f32) {
        self.auto_rotate_speed = speed;
        if let MotionMode::AutoRotate { speed: active } = &mut self.motion {
            *active = speed;
        }
    }

    // ------------------------------------------------------------ materials

    pub fn set_wireframe(&mut self, on: bool) {
        if let Some(scene) = &mut self.scene {
            for material in &mut scene.materials {
                material.wireframe = on;
            }
        }
    }

    pub fn wireframe_enabled(&self) -> bool {
        self.scene
            .as_ref()
            .map(|s| s.materials.iter().any(|m| m.wireframe))
            .unwrap_or(false)
    }

    pub fn set_roughness(&mut self, value: f32) {
        if let Some(scene) = &mut self.scene {
            for material in &mut scene.materials {
                material.roughness = value;
            }
        }
    }

    pub fn set_metalness(&mut self, value: f32) {
        if let Some(scene) = &mut self.scene {
            for material in &mut scene.materials {
                material.metallic = value;
            }
        }
    }

    pub fn roughness(&self) -> f32 {
        self.scene
            .as_ref()
            .and_then(|s| s.materials.first())
            .map(|m| m.roughness)
            .unwrap_or(0.5)
    }

    pub fn metalness(&self) -> f32 {
        self.scene
            .as_ref()
            .and_then(|s| s.materials.first())
            .map(|m| m.metallic)
            .unwrap_or(0.0)
    }

    /// Restore every material to its load-time snapshot
    pub fn reset_materials(&mut self) {
        let Some(scene) = &mut self.scene else { return };
        for (material, cached) in scene.materials.iter_mut().zip(&self.material_snapshot) {
            material.wireframe = cached.wireframe;
            material.double_sided = cached.double_sided;
            material.roughness = cached.roughness;
            material.metallic = cached.metallic;
        }
    }

    // ---------------------------------------------------------- environment

    pub fn env(&self) -> Environment {
        self.env
    }

    pub fn set_background(&mut self, color: [f32; 3]) {
        self.env.background = color;
    }

    pub fn set_exposure(&mut self, exposure: f32) {
        self.env.exposure = exposure.clamp(0.3, 2.0);
    }

    pub fn set_hemisphere_intensity(&mut self, value: f32) {
        self.env.hemisphere = value;
    }

    pub fn set_key_intensity(&mut self, value: f32) {
        self.env.key = value;
    }

    pub fn set_rim_intensity(&mut self, value: f32) {
        self.env.rim = value;
    }

    pub fn set_grid(&mut self, on: bool) {
        self.env.show_grid = on;
    }

    pub fn set_axes(&mut self, on: bool) {
        self.env.show_axes = on;
    }

    pub fn pulse(&self) -> Pulse {
        self.pulse
    }

    pub fn set_pulse(&mut self, enabled: bool, bpm: f32, amp: f32) {
        self.pulse = Pulse { enabled, bpm, amp };
    }

    // -------------------------------------------------------------- status

    fn set_status(&mut self, text: &str) {
        self.status = Some(StatusChip {
            text: text.to_string(),
            error: false,
            age: 0.0,
        });
    }

    fn set_error_status(&mut self, text: &str) {
        self.status = Some(StatusChip {
            text: text.to_string(),
            error: true,
            age: 0.0,
        });
    }

    /// Current status text with its fade-out alpha, if still visible
    pub fn status_line(&self) -> Option<(&str, f32, bool)> {
        let chip = self.status.as_ref()?;
        let alpha = if chip.age <= status::HOLD_SECS {
            1.0
        } else {
            1.0 - (chip.age - status::HOLD_SECS) / status::FADE_SECS
        };
        if alpha <= 0.0 {
            return None;
        }
        Some((&chip.text, alpha, chip.error))
    }

    // ---------------------------------------------------------------- tick

    /// Per-frame tick: applies pending load results, advances the clock,
    /// and evaluates the active motion.
    pub fn advance(&mut self, dt: f32) {
        self.poll_loads();
        self.clock += dt;

        if let Some(chip) = &mut self.status {
            chip.age += dt;
            if chip.age > status::HOLD_SECS + status::FADE_SECS {
                self.status = None;
            }
        }

        match self.motion {
            MotionMode::Idle => {}
            MotionMode::ClipPlayback => {
                self.clip_time += dt;
            }
            MotionMode::QuickAnim(params) => {
                if let Some(base) = self.base {
                    let (position, yaw) = motion::quick_anim_pose(&params, &base, self.clock);
                    self.root_position = position;
                    self.root_yaw = yaw;
                }
            }
            MotionMode::AutoRotate { speed } => {
                self.camera
                    .rotate_azimuth(speed * anim::AUTO_ROTATE_RATE * dt);
            }
        }

        self.root_scale = if self.pulse.enabled {
            1.0 + self.pulse.amp
                * (std::f32::consts::TAU * (self.pulse.bpm / 60.0) * self.clock).sin()
        } else {
            1.0
        };
    }

    // -------------------------------------------------------------- render

    /// Model-root transform composed from the procedural pose, the pulse
    /// scale, and the baked recentering offset
    fn root_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.root_position)
            * Mat4::from_rotation_y(self.root_yaw)
            * Mat4::from_scale(Vec3::splat(self.root_scale))
            * Mat4::from_translation(self.content_offset)
    }

    /// Snapshot of everything the GPU layer needs this frame
    pub fn render_snapshot(&self) -> RenderSnapshot {
        let mut draws = Vec::new();
        let geometry = self.scene.as_ref().map(|s| s.meshes.clone());

        if let Some(scene) = &self.scene {
            let pose = if self.are_clips_playing() {
                scene.pose_at(self.clip_time)
            } else {
                scene.rest_pose()
            };
            let worlds = scene.world_transforms(&pose);
            let root = self.root_matrix();

            for (i, node) in scene.nodes.iter().enumerate() {
                for &mesh_id in &node.meshes {
                    let mesh = &scene.meshes[mesh_id];
                    draws.push(MeshDraw {
                        mesh: mesh_id,
                        model: root * worlds[i],
                        material: scene.materials[mesh.material],
                    });
                }
            }
        }

        RenderSnapshot {
            revision: self.scene_revision,
            geometry,
            draws,
            camera: self.camera.clone(),
            env: self.env,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{
        Aabb, AnimationClip, ChannelValues, ClipChannel, MeshData, NodeTrs, SceneNode,
    };

    fn test_scene(with_clips: bool) -> SceneData {
        let positions = vec![
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0],
        ];
        let bounds = Aabb::from_points(&positions);
        let mesh = MeshData {
            name: "body".to_string(),
            positions,
            normals: vec![[0.0, 1.0, 0.0]; 4],
            uvs: vec![[0.0, 0.0]; 4],
            indices: vec![0, 1, 2],
            material: 0,
            overlay: false,
            bounds,
        };
        let clips = if with_clips {
            vec![
                AnimationClip {
                    name: "a".to_string(),
                    duration: 1.0,
                    channels: vec![ClipChannel {
                        node: 0,
                        times: vec![0.0, 1.0],
                        values: ChannelValues::Translation(vec![
                            Vec3::ZERO,
                            Vec3::new(0.0, 1.0, 0.0),
                        ]),
                    }],
                },
                AnimationClip {
                    name: "b".to_string(),
                    duration: 1.0,
                    channels: vec![ClipChannel {
                        node: 0,
                        times: vec![0.0, 1.0],
                        values: ChannelValues::Scale(vec![Vec3::ONE, Vec3::splat(2.0)]),
                    }],
                },
            ]
        } else {
            Vec::new()
        };
        SceneData {
            nodes: vec![SceneNode {
                name: "root".to_string(),
                rest: NodeTrs::default(),
                parent: None,
                meshes: vec![0],
            }],
            meshes: Arc::new(vec![mesh]),
            materials: vec![MaterialData {
                roughness: 0.4,
                metallic: 0.1,
                ..MaterialData::default()
            }],
            clips,
        }
    }

    fn session_with_scene(with_clips: bool) -> ViewerSession {
        let mut session = ViewerSession::new();
        session.install_scene(test_scene(with_clips));
        session
    }

    #[test]
    fn clips_auto_play_on_install() {
        let session = session_with_scene(true);
        assert!(session.are_clips_playing());
        assert_eq!(session.motion_mode(), MotionMode::ClipPlayback);

        let silent = session_with_scene(false);
        assert_eq!(silent.motion_mode(), MotionMode::Idle);
    }

    #[test]
    fn auto_rotate_stops_clips_and_toggles_off_without_resuming_them() {
        let mut session = session_with_scene(true);
        assert!(session.are_clips_playing());

        assert!(session.set_auto_rotate(true));
        assert!(session.is_auto_rotating());
        assert!(!session.are_clips_playing());

        // Re-invoking the same mode toggles back to Idle; clips stay off
        assert!(!session.set_auto_rotate(true));
        assert_eq!(session.motion_mode(), MotionMode::Idle);
        assert!(!session.are_clips_playing());
    }

    #[test]
    fn at_most_one_motion_is_ever_active() {
        let mut session = session_with_scene(true);
        session.set_quick_anim(QuickAnimParams::new(QuickAnimKind::Swing));
        assert_eq!(session.quick_anim_kind(), Some(QuickAnimKind::Swing));
        assert!(!session.are_clips_playing());
        assert!(!session.is_auto_rotating());

        session.set_auto_rotate(true);
        assert!(session.is_auto_rotating());
        assert_eq!(session.quick_anim_kind(), None);

        session.set_clips_playing(true);
        assert!(session.are_clips_playing());
        assert!(!session.is_auto_rotating());
    }

    #[test]
    fn toggling_same_quick_anim_restores_the_exact_base_pose() {
        let mut session = session_with_scene(false);
        let params = QuickAnimParams::new(QuickAnimKind::Jump);

        session.set_quick_anim(params);
        // Let the animation move the root away from its base
        for _ in 0..7 {
            session.advance(0.05);
        }
        assert!(session.root_position != Vec3::ZERO || session.root_yaw != 0.0);

        session.set_quick_anim(params);
        assert_eq!(session.motion_mode(), MotionMode::Idle);
        assert_eq!(session.root_position, Vec3::ZERO);
        assert_eq!(session.root_yaw, 0.0);
    }

    #[test]
    fn base_snapshot_is_not_rearmed_when_switching_kinds() {
        let mut session = session_with_scene(false);
        session.set_quick_anim(QuickAnimParams::new(QuickAnimKind::Turntable));
        let armed = session.base;
        for _ in 0..5 {
            session.advance(0.1);
        }
        session.set_quick_anim(QuickAnimParams::new(QuickAnimKind::Hover));
        assert_eq!(session.base, armed);

        // Exiting from the second kind still restores the original snapshot
        session.set_quick_anim(QuickAnimParams::new(QuickAnimKind::Hover));
        assert_eq!(session.root_position, armed.unwrap().position);
        assert_eq!(session.root_yaw, armed.unwrap().yaw);
    }

    #[test]
    fn param_updates_do_not_toggle_the_running_animation() {
        let mut session = session_with_scene(false);
        session.set_quick_anim(QuickAnimParams::new(QuickAnimKind::Swing));
        session.update_quick_anim_params(2.0, 0.5, 0.3);
        match session.motion_mode() {
            MotionMode::QuickAnim(p) => {
                assert_eq!(p.kind, QuickAnimKind::Swing);
                assert_eq!(p.speed, 2.0);
                assert_eq!(p.amp, 0.5);
                assert_eq!(p.height, 0.3);
            }
            other => panic!("expected quick anim, got {:?}", other),
        }
    }

    #[test]
    fn motion_commands_without_content_are_noops() {
        let mut session = ViewerSession::new();
        assert!(!session.set_auto_rotate(true));
        assert!(!session.set_clips_playing(true));
        session.set_quick_anim(QuickAnimParams::new(QuickAnimKind::Hover));
        assert_eq!(session.motion_mode(), MotionMode::Idle);
        session.reset_view();
        session.auto_frame();
        session.reset_materials();
    }

    #[test]
    fn clips_on_scene_without_clips_stay_off() {
        let mut session = session_with_scene(false);
        assert!(!session.set_clips_playing(true));
        assert_eq!(session.motion_mode(), MotionMode::Idle);
    }

    #[test]
    fn material_reset_restores_load_time_values() {
        let mut session = session_with_scene(false);
        session.set_wireframe(true);
        session.set_roughness(1.0);
        session.set_metalness(0.9);
        assert!(session.wireframe_enabled());

        session.reset_materials();
        assert!(!session.wireframe_enabled());
        assert_eq!(session.roughness(), 0.4);
        assert_eq!(session.metalness(), 0.1);
    }

    #[test]
    fn stale_load_results_are_discarded() {
        let mut session = session_with_scene(false);
        session.load_generation = 5;
        session.apply_load_result(LoadResult {
            generation: 4,
            path: PathBuf::from("old.glb"),
            outcome: Ok(test_scene(true)),
        });
        // The stale scene must not have replaced anything
        assert!(!session.are_clips_playing());

        session.apply_load_result(LoadResult {
            generation: 5,
            path: PathBuf::from("new.glb"),
            outcome: Ok(test_scene(true)),
        });
        assert!(session.are_clips_playing());
    }

    #[test]
    fn failed_load_reports_error_and_keeps_scene_empty() {
        let mut session = ViewerSession::new();
        session.load_generation = 1;
        session.apply_load_result(LoadResult {
            generation: 1,
            path: PathBuf::from("broken.glb"),
            outcome: Err("bad file".to_string()),
        });
        assert!(!session.has_content());
        assert_eq!(session.motion_mode(), MotionMode::Idle);
        let (text, alpha, error) = session.status_line().unwrap();
        assert_eq!(text, "Error");
        assert_eq!(alpha, 1.0);
        assert!(error);
    }

    #[test]
    fn status_chip_fades_out() {
        let mut session = session_with_scene(false);
        assert!(session.status_line().is_some());
        session.advance(5.0);
        assert!(session.status_line().is_none());
    }

    #[test]
    fn framing_centers_content_for_rendering() {
        let session = session_with_scene(false);
        let snapshot = session.render_snapshot();
        assert_eq!(snapshot.draws.len(), 1);

        // The baked offset recenters the mesh bounds at the origin
        let scene = session.scene().unwrap();
        let bounds = framing::content_bounds(scene);
        let centered = snapshot.draws[0].model.transform_point3(bounds.center());
        assert!(centered.length() < 1e-5);
    }

    #[test]
    fn pulse_scales_only_when_enabled() {
        let mut session = session_with_scene(false);
        session.advance(0.3);
        assert_eq!(session.root_scale, 1.0);

        session.set_pulse(true, 60.0, 0.1);
        session.advance(0.25);
        assert!((session.root_scale - 1.0).abs() > 1e-3);

        session.set_pulse(false, 60.0, 0.1);
        session.advance(0.01);
        assert_eq!(session.root_scale, 1.0);
    }

    #[test]
    fn framing_ignores_mid_animation_deformation() {
        let mut session = session_with_scene(true);
        let before = session.content_offset;
        for _ in 0..10 {
            session.advance(0.07);
        }
        session.auto_frame();
        assert_eq!(session.content_offset, before);
        assert!(session.are_clips_playing());
    }

    #[test]
    fn clip_playback_advances_the_sampled_pose() {
        let mut session = session_with_scene(true);
        session.advance(0.5);
        let snapshot = session.render_snapshot();
        // Translation channel lifts the node by t at time 0.5
        let origin = snapshot.draws[0].model.transform_point3(Vec3::ZERO);
        let rest = session.content_offset;
        assert!((origin.y - (rest.y + 0.5)).abs() < 0.26); // scale clip also runs
    }

    #[test]
    fn exposure_clamps_to_supported_range() {
        let mut session = ViewerSession::new();
        session.set_exposure(9.0);
        assert_eq!(session.env().exposure, 2.0);
        session.set_exposure(0.0);
        assert_eq!(session.env().exposure, 0.3);
    }
}
