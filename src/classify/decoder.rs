//! Landmarks → [`FrameSignal`] adapter.

use std::sync::Arc;

use crate::pipeline::FrameSignal;
use crate::spelling::Alphabet;

use super::classifier::{decode_scores, PoseClassifier};
use super::landmarks::HandLandmarks;

/// Runs the classifier on each detected hand and produces the per-frame
/// signal consumed by the session.
///
/// Classifier failures are logged and reported as "hand present, no label":
/// one bad frame never interrupts the loop.
pub struct LabelDecoder {
    classifier: Arc<dyn PoseClassifier>,
    alphabet: Alphabet,
    min_confidence: f32,
}

impl LabelDecoder {
    pub fn new(classifier: Arc<dyn PoseClassifier>, alphabet: Alphabet, min_confidence: f32) -> Self {
        Self {
            classifier,
            alphabet,
            min_confidence,
        }
    }

    /// Build the signal for one rendered frame.
    ///
    /// `None` means the detector found no hand.
    pub fn frame(&self, landmarks: Option<&HandLandmarks>) -> FrameSignal {
        let Some(hand) = landmarks else {
            return FrameSignal::absent();
        };

        let features = hand.wrist_relative_features();
        match self.classifier.predict(&features) {
            Ok(scores) => {
                let prediction = decode_scores(&scores, &self.alphabet, self.min_confidence);
                FrameSignal::present(prediction.map(|p| p.label))
            }
            Err(e) => {
                log::warn!("classify: prediction failed ({e}); treating frame as unlabeled");
                FrameSignal::present(None)
            }
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{ClassifyError, MockClassifier, LANDMARK_COUNT};
    use crate::spelling::Label;

    fn hand() -> HandLandmarks {
        HandLandmarks::from_points(&[(0.5, 0.5); LANDMARK_COUNT]).unwrap()
    }

    #[test]
    fn no_landmarks_means_hand_absent() {
        let decoder = LabelDecoder::new(
            Arc::new(MockClassifier::one_hot(0, 26)),
            Alphabet::latin(),
            0.0,
        );
        let frame = decoder.frame(None);
        assert!(!frame.hand_present);
        assert!(frame.label.is_none());
    }

    #[test]
    fn landmarks_are_classified() {
        let decoder = LabelDecoder::new(
            Arc::new(MockClassifier::one_hot(7, 26)),
            Alphabet::latin(),
            0.0,
        );
        let frame = decoder.frame(Some(&hand()));
        assert!(frame.hand_present);
        assert_eq!(frame.label, Some(Label::new("H")));
    }

    #[test]
    fn low_confidence_keeps_hand_but_drops_label() {
        let decoder = LabelDecoder::new(
            Arc::new(MockClassifier::ok(vec![0.1; 26])),
            Alphabet::latin(),
            0.5,
        );
        let frame = decoder.frame(Some(&hand()));
        assert!(frame.hand_present);
        assert!(frame.label.is_none());
    }

    #[test]
    fn classifier_error_is_recovered() {
        let decoder = LabelDecoder::new(
            Arc::new(MockClassifier::err(ClassifyError::Inference("boom".into()))),
            Alphabet::latin(),
            0.0,
        );
        let frame = decoder.frame(Some(&hand()));
        assert!(frame.hand_present);
        assert!(frame.label.is_none());
    }
}
