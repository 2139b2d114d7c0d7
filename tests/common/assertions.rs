//! Custom test assertions

use certforge::{BatchResult, FailureReason};

/// Assertions for a terminal batch report
pub trait BatchResultAssertions {
    /// `succeeded + failed == total`
    fn assert_consistent(&self);

    /// Names of succeeded entries, in report order
    fn succeeded_names(&self) -> Vec<&str>;

    /// Assert `name` failed for `reason`
    fn assert_failed_with(&self, name: &str, reason: FailureReason);

    /// Assert exactly `count` entries failed for `reason`
    fn assert_failure_count(&self, reason: FailureReason, count: usize);
}

impl BatchResultAssertions for BatchResult {
    fn assert_consistent(&self) {
        assert!(
            self.is_consistent(),
            "succeeded ({}) + failed ({}) != total ({})",
            self.succeeded.len(),
            self.failed.len(),
            self.total
        );
    }

    fn succeeded_names(&self) -> Vec<&str> {
        self.succeeded
            .iter()
            .map(|artifact| artifact.student_name.as_str())
            .collect()
    }

    fn assert_failed_with(&self, name: &str, reason: FailureReason) {
        let failure = self
            .failed
            .iter()
            .find(|f| f.student_name == name)
            .unwrap_or_else(|| panic!("Expected '{}' among failures: {:?}", name, self.failed));
        assert_eq!(failure.reason, reason, "Unexpected reason for '{}'", name);
    }

    fn assert_failure_count(&self, reason: FailureReason, count: usize) {
        assert_eq!(
            self.failures_with(reason),
            count,
            "Unexpected number of {} failures: {:?}",
            reason,
            self.failed
        );
    }
}

/// Assert a batch is in the given state variant
#[macro_export]
macro_rules! assert_state {
    ($progress:expr, $pattern:pat) => {
        assert!(
            matches!($progress.state, $pattern),
            "Unexpected batch state: {:?}",
            $progress.state
        );
    };
}

/// Assert a collection contains an item matching a predicate
#[macro_export]
macro_rules! assert_contains {
    ($collection:expr, $predicate:expr) => {
        assert!(
            $collection.iter().any($predicate),
            "Collection does not contain expected item"
        );
    };
}
