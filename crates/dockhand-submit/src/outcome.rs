//! Result of one submission attempt

/// Tri-state outcome of a submission attempt.
///
/// Starts [`Unresolved`](Self::Unresolved) and transitions exactly once to
/// a terminal state when the remote write completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The attempt has not completed (or not started).
    #[default]
    Unresolved,
    /// The backend acknowledged the write.
    Success,
    /// The write failed; the cause is logged, not surfaced.
    Error,
}

impl SubmissionOutcome {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SubmissionOutcome::Unresolved)
    }
}
