//! Edge-triggered letter debouncer.
//!
//! Per-frame classification is noisy while the hand moves between poses.
//! [`LetterDebouncer`] only emits a [`CommitEvent`] once the same label has
//! been observed for `threshold` consecutive frames, and only on the frame
//! where the streak *reaches* the threshold.  Holding a pose for longer never
//! produces a second commit.
//!
//! ```text
//! frame:   A A A … A(T) A A …  B B … B(T)
//! streak:  1 2 3 … T    T+1 …  1 2 … T
//! commit:               ▲               ▲
//!                       A               B
//! ```
//!
//! A label equal to the most recently committed one is suppressed even if it
//! reaches the threshold again (e.g. `A → B flicker → A`).  The commit memory
//! is cleared by [`forget_commit`](LetterDebouncer::forget_commit), which the
//! session calls after inserting a space or accepting a suggestion.

use super::label::Label;

/// Default number of stable frames required before a label commits.
pub const DEFAULT_COMMIT_THRESHOLD: u32 = 10;

// ---------------------------------------------------------------------------
// CommitEvent
// ---------------------------------------------------------------------------

/// A label that has been held long enough to be appended to the sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEvent {
    pub label: Label,
}

// ---------------------------------------------------------------------------
// LetterDebouncer
// ---------------------------------------------------------------------------

/// Turns a raw per-frame label stream into commit events.
///
/// ```
/// use fingerspell::spelling::{Label, LetterDebouncer};
///
/// let mut debouncer = LetterDebouncer::new(3);
/// let a = Label::new("A");
/// assert!(debouncer.observe(Some(&a)).is_none());
/// assert!(debouncer.observe(Some(&a)).is_none());
/// assert_eq!(debouncer.observe(Some(&a)).unwrap().label, a);
/// assert!(debouncer.observe(Some(&a)).is_none()); // held, no repeat
/// ```
#[derive(Debug, Clone)]
pub struct LetterDebouncer {
    threshold: u32,
    last_label: Option<Label>,
    streak: u32,
    last_committed: Option<Label>,
}

impl LetterDebouncer {
    /// Create a debouncer that commits after `threshold` identical frames.
    /// A threshold of `0` is treated as `1`.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            last_label: None,
            streak: 0,
            last_committed: None,
        }
    }

    /// Feed one frame's label.
    ///
    /// `None` (no pose recognised) leaves the state untouched.
    pub fn observe(&mut self, label: Option<&Label>) -> Option<CommitEvent> {
        let label = label?;

        if self.last_label.as_ref() == Some(label) {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.last_label = Some(label.clone());
            self.streak = 1;
        }

        if self.streak != self.threshold || self.last_committed.as_ref() == Some(label) {
            return None;
        }

        log::debug!("debounce: commit {label} after {} frames", self.streak);
        self.last_committed = Some(label.clone());
        Some(CommitEvent {
            label: label.clone(),
        })
    }

    /// Clear the commit memory so the next stable label commits even if it
    /// equals the previous one.  The current streak is kept.
    pub fn forget_commit(&mut self) {
        self.last_committed = None;
    }

    /// End the current streak without touching the commit memory.  Called
    /// after a space is inserted, so a pose held again afterwards starts
    /// from one.
    pub fn interrupt(&mut self) {
        self.last_label = None;
        self.streak = 0;
    }

    /// Return to the initial state.
    pub fn reset(&mut self) {
        self.last_label = None;
        self.streak = 0;
        self.last_committed = None;
    }

    /// Label seen on the most recent non-empty frame.
    pub fn last_label(&self) -> Option<&Label> {
        self.last_label.as_ref()
    }

    pub fn last_committed(&self) -> Option<&Label> {
        self.last_committed.as_ref()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for LetterDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_COMMIT_THRESHOLD)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(debouncer: &mut LetterDebouncer, label: &str, frames: usize) -> Vec<(usize, Label)> {
        let label = Label::new(label);
        (1..=frames)
            .filter_map(|i| debouncer.observe(Some(&label)).map(|ev| (i, ev.label)))
            .collect()
    }

    // ---- threshold edge ---

    #[test]
    fn commits_exactly_once_on_threshold_frame() {
        for frames in [10, 11, 50, 500] {
            let mut d = LetterDebouncer::new(10);
            let commits = feed(&mut d, "A", frames);
            assert_eq!(commits, vec![(10, Label::new("A"))], "frames = {frames}");
        }
    }

    #[test]
    fn no_commit_below_threshold() {
        let mut d = LetterDebouncer::new(10);
        assert!(feed(&mut d, "A", 9).is_empty());
        assert_eq!(d.streak(), 9);
    }

    #[test]
    fn zero_threshold_is_treated_as_one() {
        let mut d = LetterDebouncer::new(0);
        assert_eq!(d.threshold(), 1);
        assert_eq!(feed(&mut d, "A", 1).len(), 1);
    }

    #[test]
    fn label_change_restarts_streak() {
        let mut d = LetterDebouncer::new(10);
        feed(&mut d, "A", 5);
        feed(&mut d, "B", 1);
        assert_eq!(d.streak(), 1);
        assert!(feed(&mut d, "A", 9).is_empty());
    }

    #[test]
    fn two_stable_labels_commit_in_order() {
        let mut d = LetterDebouncer::new(10);
        let mut commits = feed(&mut d, "A", 10);
        commits.extend(feed(&mut d, "B", 10));
        let labels: Vec<_> = commits.into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec![Label::new("A"), Label::new("B")]);
    }

    // ---- empty frames ---

    #[test]
    fn none_label_is_ignored() {
        let mut d = LetterDebouncer::new(3);
        feed(&mut d, "A", 2);
        assert!(d.observe(None).is_none());
        assert_eq!(d.streak(), 2);
        assert_eq!(feed(&mut d, "A", 1).len(), 1);
    }

    // ---- commit memory ---

    #[test]
    fn flicker_back_to_committed_label_does_not_recommit() {
        let mut d = LetterDebouncer::new(10);
        assert_eq!(feed(&mut d, "A", 10).len(), 1);
        assert!(feed(&mut d, "B", 3).is_empty());
        assert!(feed(&mut d, "A", 20).is_empty());
    }

    #[test]
    fn returning_label_commits_after_another_commit() {
        let mut d = LetterDebouncer::new(10);
        feed(&mut d, "A", 10);
        feed(&mut d, "B", 10);
        assert_eq!(feed(&mut d, "A", 10).len(), 1);
    }

    #[test]
    fn forget_commit_allows_repeat_letter() {
        let mut d = LetterDebouncer::new(10);
        feed(&mut d, "L", 10);
        d.forget_commit();
        // The held streak already passed the edge; a fresh streak is needed.
        assert!(feed(&mut d, "L", 5).is_empty());
        feed(&mut d, "X", 1);
        assert_eq!(feed(&mut d, "L", 10).len(), 1);
    }

    #[test]
    fn interrupt_restarts_streak_but_keeps_memory() {
        let mut d = LetterDebouncer::new(10);
        feed(&mut d, "A", 10);
        d.interrupt();
        assert_eq!(d.streak(), 0);
        assert!(feed(&mut d, "A", 10).is_empty());

        d.interrupt();
        d.forget_commit();
        assert_eq!(feed(&mut d, "A", 10), vec![(10, Label::new("A"))]);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut d = LetterDebouncer::new(4);
        feed(&mut d, "A", 4);
        d.reset();
        assert!(d.last_label().is_none());
        assert!(d.last_committed().is_none());
        assert_eq!(d.streak(), 0);
        assert_eq!(feed(&mut d, "A", 4).len(), 1);
    }
}
