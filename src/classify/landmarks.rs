//! Hand skeleton as produced by the landmark detector.
//!
//! The detector emits 21 normalised image-space points per hand, wrist first.
//! The pose classifier is translation-invariant only if it sees coordinates
//! relative to the wrist, so [`HandLandmarks::wrist_relative_features`]
//! flattens the skeleton into `[x0 - xw, y0 - yw, x1 - xw, ...]`.

use super::classifier::ClassifyError;

/// Points per hand skeleton.
pub const LANDMARK_COUNT: usize = 21;
/// Length of the classifier input vector (x and y per landmark).
pub const FEATURE_LEN: usize = LANDMARK_COUNT * 2;

/// One landmark in normalised image coordinates (`0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A detected hand: exactly [`LANDMARK_COUNT`] points, index 0 is the wrist.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Point; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Build from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// [`ClassifyError::LandmarkCount`] unless exactly 21 points are given.
    pub fn from_points(points: &[(f32, f32)]) -> Result<Self, ClassifyError> {
        if points.len() != LANDMARK_COUNT {
            return Err(ClassifyError::LandmarkCount(points.len()));
        }
        let mut out = [Point::default(); LANDMARK_COUNT];
        for (slot, &(x, y)) in out.iter_mut().zip(points) {
            *slot = Point { x, y };
        }
        Ok(Self { points: out })
    }

    pub fn wrist(&self) -> Point {
        self.points[0]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Flatten to the 42-value classifier input, relative to the wrist.
    pub fn wrist_relative_features(&self) -> [f32; FEATURE_LEN] {
        let wrist = self.wrist();
        let mut features = [0.0f32; FEATURE_LEN];
        for (i, p) in self.points.iter().enumerate() {
            features[2 * i] = p.x - wrist.x;
            features[2 * i + 1] = p.y - wrist.y;
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skeleton(offset: f32) -> Vec<(f32, f32)> {
        (0..LANDMARK_COUNT)
            .map(|i| (offset + i as f32 * 0.01, offset + i as f32 * 0.02))
            .collect()
    }

    #[test]
    fn rejects_wrong_point_count() {
        let err = HandLandmarks::from_points(&[(0.0, 0.0); 20]).unwrap_err();
        assert!(matches!(err, ClassifyError::LandmarkCount(20)));
    }

    #[test]
    fn features_are_relative_to_wrist() {
        let hand = HandLandmarks::from_points(&skeleton(0.5)).unwrap();
        let f = hand.wrist_relative_features();
        assert_eq!(f.len(), FEATURE_LEN);
        assert_eq!(f[0], 0.0);
        assert_eq!(f[1], 0.0);
        assert!((f[2] - 0.01).abs() < 1e-6);
        assert!((f[3] - 0.02).abs() < 1e-6);
        assert!((f[40] - 0.20).abs() < 1e-5);
        assert!((f[41] - 0.40).abs() < 1e-5);
    }

    #[test]
    fn features_are_translation_invariant() {
        let a = HandLandmarks::from_points(&skeleton(0.1)).unwrap();
        let b = HandLandmarks::from_points(&skeleton(0.6)).unwrap();
        let (fa, fb) = (a.wrist_relative_features(), b.wrist_relative_features());
        for (x, y) in fa.iter().zip(fb.iter()) {
            assert!((x - y).abs() < 1e-5);
        }
    }
}
