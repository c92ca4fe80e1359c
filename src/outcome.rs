//! Outcome type for individually-idempotent provisioning steps.

/// The result of one guarded, idempotent provisioning step.
///
/// Steps that find their work already done report
/// [`AlreadyPresent`](StepOutcome::AlreadyPresent) and are treated as
/// success; this is deliberately not an error variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step created or wrote something new.
    Created,
    /// The step found its work already done and changed nothing.
    AlreadyPresent,
}

impl StepOutcome {
    /// Returns true when the step changed nothing.
    #[must_use]
    pub fn is_already_present(self) -> bool {
        matches!(self, StepOutcome::AlreadyPresent)
    }
}
