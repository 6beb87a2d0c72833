//! Synthetic data for trying the viewer without recordings

use std::f64::consts::TAU;
use std::sync::Arc;
use parking_lot::Mutex;
use mv_data::{AnnotationData, MotionTrack};

pub const DEMO_MOTION_FRAMES: usize = 500;
pub const DEMO_ANNOTATION_FRAMES: usize = 300;

/// Last pose the demo track was asked to show
pub type PoseSlot = Arc<Mutex<Option<usize>>>;

/// A motion track whose "skeleton" only records the frame it was posed at
pub fn demo_motion() -> (MotionTrack, PoseSlot) {
    let pose: PoseSlot = Arc::new(Mutex::new(None));
    let slot = pose.clone();
    let track = MotionTrack::new("demo motion", DEMO_MOTION_FRAMES).with_pose_hook(move |frame| {
        *slot.lock() = Some(frame);
    });
    (track, pose)
}

/// Smooth normalized curves shaped like per-limb activity scores
pub fn demo_annotation() -> AnnotationData {
    let wave = |period: f64, phase: f64| -> Vec<f64> {
        (0..DEMO_ANNOTATION_FRAMES)
            .map(|frame| 0.5 + 0.45 * (TAU * frame as f64 / period + phase).sin())
            .collect()
    };
    AnnotationData::new("demo annotation")
        .with_feature("BODY", wave(120.0, 0.0))
        .with_feature("LEFT_ARM", wave(60.0, 1.0))
        .with_feature("RIGHT_ARM", wave(75.0, 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mv_core::TimeIndexed;

    #[test]
    fn test_demo_track_reports_pose() {
        let (mut track, pose) = demo_motion();
        track.goto_frame(DEMO_MOTION_FRAMES + 10);
        assert_eq!(*pose.lock(), Some(DEMO_MOTION_FRAMES - 1));
    }

    #[test]
    fn test_demo_annotation_is_normalized() {
        let data = demo_annotation();
        assert_eq!(data.feature_count(), 3);
        assert_eq!(data.max_len(), DEMO_ANNOTATION_FRAMES);
        for name in data.feature_names() {
            let values = data.feature(name).unwrap();
            assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }
}
