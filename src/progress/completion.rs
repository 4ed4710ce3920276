//! Completion evaluation
//!
//! Two thresholds are in play. Crossing [`NAVIGATION_UNLOCK`] lets the
//! learner move on to the next lesson for the rest of this viewing;
//! crossing [`LESSON_COMPLETION`] records the lesson as completed for good.

/// Percentage of `duration` reached at `current_time`, clamped to `[0, 100]`.
///
/// Zero when the duration is zero, negative, or not yet known.
pub fn percentage(current_time: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0) || !current_time.is_finite() {
        return 0.0;
    }
    (current_time / duration * 100.0).clamp(0.0, 100.0)
}

/// A threshold that fires once per viewing session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionPolicy {
    pub name: &'static str,
    /// Percentage at or above which the policy fires
    pub threshold: f64,
}

/// Unlocks the next lesson for the current session
pub const NAVIGATION_UNLOCK: CompletionPolicy =
    CompletionPolicy { name: "navigation-unlock", threshold: 90.0 };

/// Marks the lesson completed in persisted progress
pub const LESSON_COMPLETION: CompletionPolicy =
    CompletionPolicy { name: "lesson-completion", threshold: 95.0 };

impl CompletionPolicy {
    pub fn is_met(&self, percentage: f64) -> bool {
        percentage >= self.threshold
    }
}

/// What a single evaluation newly crossed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionSignals {
    /// First crossing of the navigation threshold
    pub navigation_unlocked: bool,
    /// First crossing of the completion threshold
    pub lesson_completed: bool,
}

impl CompletionSignals {
    pub fn any(&self) -> bool {
        self.navigation_unlocked || self.lesson_completed
    }
}

/// Latches both policies for one viewing session
#[derive(Debug, Clone, Default)]
pub struct CompletionEvaluator {
    unlocked: bool,
    completed: bool,
}

impl CompletionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator for a lesson whose viewing already counts as complete
    pub fn already_completed() -> Self {
        Self { unlocked: true, completed: true }
    }

    /// Evaluate one snapshot's position. Each signal is raised at most once.
    pub fn evaluate(&mut self, current_time: f64, duration: f64) -> CompletionSignals {
        let pct = percentage(current_time, duration);
        let mut signals = CompletionSignals::default();

        if !self.unlocked && NAVIGATION_UNLOCK.is_met(pct) {
            self.unlocked = true;
            signals.navigation_unlocked = true;
        }
        if !self.completed && LESSON_COMPLETION.is_met(pct) {
            self.completed = true;
            signals.lesson_completed = true;
        }

        signals
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn percentage_of_unknown_duration_is_zero() {
        assert_eq!(percentage(30.0, 0.0), 0.0);
        assert_eq!(percentage(30.0, f64::NAN), 0.0);
        assert_eq!(percentage(30.0, -10.0), 0.0);
    }

    #[test]
    fn percentage_is_linear() {
        assert_eq!(percentage(150.0, 300.0), 50.0);
        assert_eq!(percentage(300.0, 300.0), 100.0);
    }

    #[test]
    fn unlock_fires_before_completion() {
        let mut evaluator = CompletionEvaluator::new();

        let at_91 = evaluator.evaluate(91.0, 100.0);
        assert!(at_91.navigation_unlocked);
        assert!(!at_91.lesson_completed);

        let at_96 = evaluator.evaluate(96.0, 100.0);
        assert!(!at_96.navigation_unlocked);
        assert!(at_96.lesson_completed);
    }

    #[test]
    fn jump_past_both_thresholds_fires_both() {
        let mut evaluator = CompletionEvaluator::new();
        let signals = evaluator.evaluate(100.0, 100.0);
        assert!(signals.navigation_unlocked && signals.lesson_completed);
    }

    #[test]
    fn completion_survives_seeking_backward() {
        let mut evaluator = CompletionEvaluator::new();
        assert!(evaluator.evaluate(97.0, 100.0).lesson_completed);

        let after_seek = evaluator.evaluate(10.0, 100.0);
        assert!(!after_seek.any());
        assert!(evaluator.is_completed());

        assert!(!evaluator.evaluate(99.0, 100.0).any());
    }

    #[test]
    fn already_completed_raises_nothing() {
        let mut evaluator = CompletionEvaluator::already_completed();
        assert!(!evaluator.evaluate(100.0, 100.0).any());
    }

    proptest! {
        #[test]
        fn percentage_matches_ratio_within_bounds(d in 0.001f64..100_000.0, frac in 0.0f64..=1.0) {
            let t = d * frac;
            let pct = percentage(t, d);
            prop_assert!((pct - t / d * 100.0).abs() < 1e-9);
            prop_assert!((0.0..=100.0).contains(&pct));
        }

        #[test]
        fn percentage_is_clamped_outside_media(
            d in 0.001f64..10_000.0,
            t in -10_000.0f64..100_000.0,
        ) {
            let pct = percentage(t, d);
            prop_assert!((0.0..=100.0).contains(&pct));
        }

        #[test]
        fn completion_never_reverts(times in prop::collection::vec(0.0f64..=100.0, 1..50)) {
            let mut evaluator = CompletionEvaluator::new();
            let mut seen_complete = false;
            for t in times {
                evaluator.evaluate(t, 100.0);
                seen_complete |= t >= LESSON_COMPLETION.threshold;
                prop_assert_eq!(evaluator.is_completed(), seen_complete);
            }
        }
    }
}
