//! Motion modes and procedural animation poses
//!
//! Exactly one motion mode is active at a time: built-in clip playback,
//! a procedural quick animation, or camera auto-rotate. Quick-anim poses
//! are pure functions of the elapsed clock and the base snapshot taken
//! when the mode was entered; nothing accumulates frame-over-frame.

use crate::constants::anim;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAnimKind {
    Turntable,
    Swing,
    Jump,
    Hover,
}

impl QuickAnimKind {
    pub const ALL: [QuickAnimKind; 4] = [
        QuickAnimKind::Turntable,
        QuickAnimKind::Swing,
        QuickAnimKind::Jump,
        QuickAnimKind::Hover,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuickAnimKind::Turntable => "Turntable",
            QuickAnimKind::Swing => "Swing",
            QuickAnimKind::Jump => "Jump & Turn",
            QuickAnimKind::Hover => "Hover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickAnimParams {
    pub kind: QuickAnimKind,
    pub speed: f32,
    pub amp: f32,
    pub height: f32,
}

impl QuickAnimParams {
    pub fn new(kind: QuickAnimKind) -> Self {
        Self {
            kind,
            speed: anim::DEFAULT_SPEED,
            amp: anim::DEFAULT_AMP,
            height: anim::DEFAULT_HEIGHT,
        }
    }
}

/// The one active motion class
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionMode {
    Idle,
    ClipPlayback,
    QuickAnim(QuickAnimParams),
    AutoRotate { speed: f32 },
}

impl MotionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, MotionMode::Idle)
    }
}

/// Model-root pose snapshot taken on entering a procedural mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseTransform {
    pub position: Vec3,
    pub yaw: f32,
}

/// Evaluate a quick animation at elapsed time `t`.
///
/// Returns the model-root position and yaw, measured from the base
/// snapshot.
pub fn quick_anim_pose(params: &QuickAnimParams, base: &BaseTransform, t: f32) -> (Vec3, f32) {
    match params.kind {
        QuickAnimKind::Turntable => {
            let yaw = t * anim::TURNTABLE_RATE * params.speed;
            (base.position, base.yaw + yaw)
        }
        QuickAnimKind::Swing => {
            let yaw = params.amp * (t * anim::SWING_RATE * params.speed).sin();
            (base.position, base.yaw + yaw)
        }
        QuickAnimKind::Jump => {
            let s = (t * anim::JUMP_RATE * params.speed).sin();
            let lift = s.max(0.0) * params.height;
            let yaw = if s > 0.0 {
                anim::JUMP_YAW_KICK * params.amp
            } else {
                0.0
            };
            (base.position + Vec3::Y * lift, base.yaw + yaw)
        }
        QuickAnimKind::Hover => {
            let lift = params.height * anim::HOVER_LIFT * (t * anim::HOVER_RATE * params.speed).sin();
            let yaw = anim::HOVER_DRIFT * (t * anim::HOVER_DRIFT_RATE * params.speed).sin();
            (base.position + Vec3::Y * lift, base.yaw + yaw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseTransform {
        BaseTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            yaw: 0.5,
        }
    }

    #[test]
    fn turntable_spins_at_the_configured_rate() {
        let params = QuickAnimParams {
            speed: 2.0,
            ..QuickAnimParams::new(QuickAnimKind::Turntable)
        };
        let (pos, yaw) = quick_anim_pose(&params, &base(), 3.0);
        assert_eq!(pos, base().position);
        assert!((yaw - (0.5 + 3.0 * anim::TURNTABLE_RATE * 2.0)).abs() < 1e-6);
    }

    #[test]
    fn swing_oscillates_around_base_yaw() {
        let params = QuickAnimParams::new(QuickAnimKind::Swing);
        let t = std::f32::consts::PI / (anim::SWING_RATE * params.speed);
        // One half period: sin == 0 again
        let (_, yaw) = quick_anim_pose(&params, &base(), t);
        assert!((yaw - base().yaw).abs() < 1e-5);
    }

    #[test]
    fn jump_never_dips_below_base() {
        let params = QuickAnimParams::new(QuickAnimKind::Jump);
        for i in 0..100 {
            let (pos, _) = quick_anim_pose(&params, &base(), i as f32 * 0.1);
            assert!(pos.y >= base().position.y - 1e-6);
        }
    }

    #[test]
    fn jump_kicks_yaw_only_while_ascending() {
        let params = QuickAnimParams::new(QuickAnimKind::Jump);
        let rising = 0.25 * std::f32::consts::PI / (anim::JUMP_RATE * params.speed);
        let falling = 1.5 * std::f32::consts::PI / (anim::JUMP_RATE * params.speed);
        let (_, yaw_up) = quick_anim_pose(&params, &base(), rising);
        let (_, yaw_down) = quick_anim_pose(&params, &base(), falling);
        assert!(yaw_up > base().yaw);
        assert!((yaw_down - base().yaw).abs() < 1e-6);
    }

    #[test]
    fn hover_lift_is_half_height_at_peak() {
        let params = QuickAnimParams::new(QuickAnimKind::Hover);
        let peak = 0.5 * std::f32::consts::PI / (anim::HOVER_RATE * params.speed);
        let (pos, _) = quick_anim_pose(&params, &base(), peak);
        let lift = pos.y - base().position.y;
        assert!((lift - params.height * anim::HOVER_LIFT).abs() < 1e-5);
    }

    #[test]
    fn pose_at_zero_matches_base_for_stationary_kinds() {
        for kind in [QuickAnimKind::Turntable, QuickAnimKind::Swing, QuickAnimKind::Hover] {
            let params = QuickAnimParams::new(kind);
            let (pos, yaw) = quick_anim_pose(&params, &base(), 0.0);
            assert_eq!(pos, base().position);
            assert!((yaw - base().yaw).abs() < 1e-6);
        }
    }
}
