//! Pose classifier seam and score decoding.
//!
//! # Overview
//!
//! [`PoseClassifier`] is the interface to the black-box model that maps the
//! 42 wrist-relative landmark features to one score per alphabet label.  It is
//! object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn PoseClassifier>`.
//!
//! [`decode_scores`] turns a score vector into a [`Prediction`] by arg-max.
//!
//! [`MockClassifier`] (available under `#[cfg(test)]`) returns a
//! pre-configured score vector.

use thiserror::Error;

use crate::spelling::{Alphabet, Label};

// ---------------------------------------------------------------------------
// ClassifyError
// ---------------------------------------------------------------------------

/// Errors that can arise while classifying a hand pose.
#[derive(Debug, Clone, Error)]
pub enum ClassifyError {
    /// The detector produced a skeleton with the wrong number of points.
    #[error("expected 21 hand landmarks, got {0}")]
    LandmarkCount(usize),

    /// The model failed to run.
    #[error("classifier inference failed: {0}")]
    Inference(String),
}

// ---------------------------------------------------------------------------
// PoseClassifier trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for hand-pose classifiers.
///
/// # Contract
///
/// - `features` is the output of
///   [`HandLandmarks::wrist_relative_features`](super::HandLandmarks::wrist_relative_features).
/// - The returned vector holds one score per alphabet label, in alphabet
///   order.  Scores need not be normalised.
pub trait PoseClassifier: Send + Sync {
    fn predict(&self, features: &[f32]) -> Result<Vec<f32>, ClassifyError>;
}

// Compile-time assertion: Box<dyn PoseClassifier> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn PoseClassifier>) {}
};

// ---------------------------------------------------------------------------
// Prediction / decode_scores
// ---------------------------------------------------------------------------

/// Best label for one frame and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub confidence: f32,
}

/// Arg-max `scores` over `alphabet`.
///
/// Returns `None` when `scores` is empty, its length differs from the
/// alphabet, every score is NaN, or the best score is below
/// `min_confidence`.  On ties the lowest index wins.
///
/// ```
/// use fingerspell::classify::decode_scores;
/// use fingerspell::spelling::Alphabet;
///
/// let alphabet = Alphabet::from_labels(["A", "B", "C"]);
/// let p = decode_scores(&[0.1, 0.7, 0.2], &alphabet, 0.5).unwrap();
/// assert_eq!(p.label.as_str(), "B");
/// assert!(decode_scores(&[0.4, 0.3, 0.3], &alphabet, 0.5).is_none());
/// ```
pub fn decode_scores(scores: &[f32], alphabet: &Alphabet, min_confidence: f32) -> Option<Prediction> {
    if scores.is_empty() || scores.len() != alphabet.len() {
        if !scores.is_empty() {
            log::debug!(
                "classify: {} scores for a {}-label alphabet; ignoring frame",
                scores.len(),
                alphabet.len()
            );
        }
        return None;
    }

    let (index, &confidence) = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_nan())
        .fold(None, |best: Option<(usize, &f32)>, (i, s)| match best {
            Some((_, b)) if *b >= *s => best,
            _ => Some((i, s)),
        })?;

    if confidence < min_confidence {
        return None;
    }

    Some(Prediction {
        label: alphabet.get(index)?.clone(),
        confidence,
    })
}

// ---------------------------------------------------------------------------
// MockClassifier  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns pre-configured scores without any model.
#[cfg(test)]
pub struct MockClassifier {
    response: Result<Vec<f32>, ClassifyError>,
}

#[cfg(test)]
impl MockClassifier {
    /// Always return `scores`.
    pub fn ok(scores: Vec<f32>) -> Self {
        Self {
            response: Ok(scores),
        }
    }

    /// One-hot scores selecting `index` out of `len` labels.
    pub fn one_hot(index: usize, len: usize) -> Self {
        let mut scores = vec![0.0; len];
        scores[index] = 1.0;
        Self::ok(scores)
    }

    /// Always fail with `err`.
    pub fn err(err: ClassifyError) -> Self {
        Self { response: Err(err) }
    }
}

#[cfg(test)]
impl PoseClassifier for MockClassifier {
    fn predict(&self, _features: &[f32]) -> Result<Vec<f32>, ClassifyError> {
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
