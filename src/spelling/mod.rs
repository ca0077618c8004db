//! Letter stabilisation and sentence assembly.
//!
//! * [`Label`] / [`Alphabet`] — the finite label set a classifier emits.
//! * [`LetterDebouncer`] — converts a noisy per-frame label stream into
//!   edge-triggered [`CommitEvent`]s.
//! * [`SentenceBuffer`] — accumulates committed letters, accepted words and
//!   inserted spaces.
//!
//! These types are plain synchronous state; the session controller in
//! [`crate::pipeline`] owns one of each and drives them frame by frame.

pub mod debounce;
pub mod label;
pub mod sentence;

pub use debounce::{CommitEvent, LetterDebouncer, DEFAULT_COMMIT_THRESHOLD};
pub use label::{Alphabet, Label};
pub use sentence::SentenceBuffer;
