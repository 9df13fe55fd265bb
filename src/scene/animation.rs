//! Keyframed animation clips and sampling
//!
//! Clips carry per-node translation/rotation/scale channels with their own
//! keyframe times. Sampling is linear (slerp for rotations), and playback
//! wraps around the clip duration so every clip loops.

use super::NodeTrs;
use glam::{Quat, Vec3};

/// Keyframe values of one channel
#[derive(Debug, Clone)]
pub enum ChannelValues {
    Translation(Vec<Vec3>),
    Rotation(Vec<Quat>),
    Scale(Vec<Vec3>),
}

/// One animated property of one node
#[derive(Debug, Clone)]
pub struct ClipChannel {
    /// Index into `SceneData::nodes`
    pub node: usize,
    /// Keyframe times in seconds, ascending
    pub times: Vec<f32>,
    pub values: ChannelValues,
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Largest keyframe time across channels
    pub duration: f32,
    pub channels: Vec<ClipChannel>,
}

impl AnimationClip {
    /// Sample this clip at `time` (wrapped into the clip's duration) and
    /// write the animated properties over `pose`.
    pub fn sample_into(&self, time: f32, pose: &mut [NodeTrs]) {
        let t = if self.duration > 0.0 {
            time.rem_euclid(self.duration)
        } else {
            0.0
        };
        for channel in &self.channels {
            if channel.node >= pose.len() || channel.times.is_empty() {
                continue;
            }
            let (i0, i1, frac) = keyframe_span(&channel.times, t);
            let trs = &mut pose[channel.node];
            match &channel.values {
                ChannelValues::Translation(v) => {
                    trs.translation = v[i0].lerp(v[i1], frac);
                }
                ChannelValues::Rotation(v) => {
                    trs.rotation = v[i0].slerp(v[i1], frac);
                }
                ChannelValues::Scale(v) => {
                    trs.scale = v[i0].lerp(v[i1], frac);
                }
            }
        }
    }
}

/// Find the keyframe pair bracketing `t` and the interpolation fraction.
///
/// Times before the first key clamp to it, times past the last key clamp
/// to that; a single-key channel is constant.
fn keyframe_span(times: &[f32], t: f32) -> (usize, usize, f32) {
    let last = times.len() - 1;
    if t <= times[0] {
        return (0, 0, 0.0);
    }
    if t >= times[last] {
        return (last, last, 0.0);
    }
    let next = times.partition_point(|&k| k <= t);
    let prev = next - 1;
    let span = times[next] - times[prev];
    let frac = if span > 0.0 { (t - times[prev]) / span } else { 0.0 };
    (prev, next, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> AnimationClip {
        AnimationClip {
            name: "bounce".to_string(),
            duration: 2.0,
            channels: vec![ClipChannel {
                node: 0,
                times: vec![0.0, 1.0, 2.0],
                values: ChannelValues::Translation(vec![
                    Vec3::ZERO,
                    Vec3::new(0.0, 1.0, 0.0),
                    Vec3::ZERO,
                ]),
            }],
        }
    }

    #[test]
    fn sample_interpolates_linearly() {
        let clip = clip();
        let mut pose = vec![NodeTrs::default()];
        clip.sample_into(0.5, &mut pose);
        assert!((pose[0].translation.y - 0.5).abs() < 1e-6);
        clip.sample_into(1.5, &mut pose);
        assert!((pose[0].translation.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sample_wraps_past_duration() {
        let clip = clip();
        let mut pose = vec![NodeTrs::default()];
        clip.sample_into(2.5, &mut pose);
        assert!((pose[0].translation.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn sample_at_zero_is_first_key() {
        let clip = clip();
        let mut pose = vec![NodeTrs::default()];
        clip.sample_into(0.0, &mut pose);
        assert_eq!(pose[0].translation, Vec3::ZERO);
    }

    #[test]
    fn rotation_channels_slerp() {
        let half_turn = Quat::from_rotation_y(std::f32::consts::PI);
        let clip = AnimationClip {
            name: "spin".to_string(),
            duration: 1.0,
            channels: vec![ClipChannel {
                node: 0,
                times: vec![0.0, 1.0],
                values: ChannelValues::Rotation(vec![Quat::IDENTITY, half_turn]),
            }],
        };
        let mut pose = vec![NodeTrs::default()];
        clip.sample_into(0.5, &mut pose);
        let quarter = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(pose[0].rotation.angle_between(quarter) < 1e-4);
    }

    #[test]
    fn channel_for_missing_node_is_ignored() {
        let mut clip = clip();
        clip.channels[0].node = 7;
        let mut pose = vec![NodeTrs::default()];
        clip.sample_into(0.5, &mut pose);
        assert_eq!(pose[0].translation, Vec3::ZERO);
    }
}
