//! Hand-pose classification adapter.
//!
//! # Architecture
//!
//! ```text
//! landmark detector ──▶ HandLandmarks ──wrist_relative_features──▶ [f32; 42]
//!                                                                    │
//!                                          PoseClassifier::predict ◀─┘
//!                                                    │ scores
//!                                                    ▼
//!                                   decode_scores (arg-max over Alphabet)
//!                                                    │
//!                                                    ▼
//!                                          FrameSignal { label, hand_present }
//! ```
//!
//! The detector and the model are external; this module only fixes the
//! feature layout and how scores become labels.

pub mod classifier;
pub mod decoder;
pub mod landmarks;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use classifier::{decode_scores, ClassifyError, PoseClassifier, Prediction};
pub use decoder::LabelDecoder;
pub use landmarks::{HandLandmarks, Point, FEATURE_LEN, LANDMARK_COUNT};

#[cfg(test)]
pub use classifier::MockClassifier;
